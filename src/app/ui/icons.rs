//! Unicode UI icon constants.
//!
//! Uses a BMP-only "safe" subset for broad font coverage (no emoji fonts needed).

pub const ICON_MENU: &str = "☰";
pub const ICON_SIDE_TOGGLE: &str = "⟷";
pub const ICON_POLYGON: &str = "⬠";
pub const ICON_LINE: &str = "╱";
pub const ICON_POLYGON_TOOL: &str = "⬡";
pub const ICON_DELETE_ALL: &str = "✖";
pub const ICON_DELETE: &str = "✖";
pub const ICON_GENERATE: &str = "▤";
pub const ICON_ZOOM_IN: &str = "＋";
pub const ICON_ZOOM_OUT: &str = "－";
pub const ICON_RESET_VIEW: &str = "⟳";
pub const ICON_LOCATE: &str = "◎";
pub const ICON_FIT: &str = "▣";
pub const ICON_ROW_MENU: &str = "⋮";
pub const ICON_EXPORT: &str = "⇩";
pub const ICON_COPY: &str = "⎘";
