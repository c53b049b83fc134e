use crate::waypoints::WaypointTable;

/// Tables, modal visibility and the one-shot polygon tool listener.
#[derive(Debug, Default)]
pub struct ModalState {
    pub(super) mission: Option<WaypointTable>,
    pub(super) mission_open: bool,
    pub(super) polygon_tool: Option<WaypointTable>,
    pub(super) polygon_tool_open: bool,
    /// Row whose ⋮ menu is expanded. At most one at a time.
    pub(super) dropdown_visible: Option<usize>,
    /// Set by the polygon tool button, consumed by the next created feature.
    pub(super) polygon_tool_armed: bool,
    /// Blocking notification text, e.g. "No features drawn!".
    pub(super) alert: Option<String>,
}

impl ModalState {
    pub(super) fn clear_tables(&mut self) {
        self.mission = None;
        self.mission_open = false;
        self.polygon_tool = None;
        self.polygon_tool_open = false;
        self.dropdown_visible = None;
    }

    /// The table exports and clipboard copies act on: the mission table first.
    pub(super) fn current_table(&self) -> Option<&WaypointTable> {
        self.mission.as_ref().or(self.polygon_tool.as_ref())
    }
}
