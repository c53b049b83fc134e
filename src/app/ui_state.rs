use crate::export::ExportFormat;
use crate::waypoints::WaypointTable;
use egui_file_dialog::FileDialog;

/// Cursor shown over the map canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapCursor {
    #[default]
    Default,
    Crosshair,
    Pointer,
}

pub struct UiState {
    pub(super) side_open: bool,
    pub(super) cursor: MapCursor,
    pub(super) last_status: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            side_open: true,
            cursor: MapCursor::Default,
            last_status: None,
        }
    }
}

#[derive(Debug)]
pub enum NativeDialog {
    OpenDrawing(FileDialog),
    SaveDrawing(FileDialog),
    Export {
        dialog: FileDialog,
        table: WaypointTable,
        format: ExportFormat,
    },
}
