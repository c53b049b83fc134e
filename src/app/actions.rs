use super::{INSERT_FLY_ZOOM, LOCATE_FLY_ZOOM, MapCursor, MissionApp};
use crate::draw::{DrawEvent, DrawMode, FeatureId};
use crate::geo::LonLat;
use crate::waypoints::{generate_table, polygon_tool_table};

/// Which side of a waypoint row a new polygon is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Before,
    After,
}

impl InsertPosition {
    const fn label(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

impl MissionApp {
    pub(crate) fn draw_polygon(&mut self) {
        self.draw.change_mode(DrawMode::DrawPolygon);
        self.ui.cursor = MapCursor::Crosshair;
        self.set_status("Drawing polygon: click to add vertices, Enter or click the first vertex to close.");
    }

    pub(crate) fn draw_line_string(&mut self) {
        self.draw.change_mode(DrawMode::DrawLineString);
        self.ui.cursor = MapCursor::Pointer;
        self.set_status("Drawing line: click to add points, Enter or click the last point to finish.");
    }

    /// Start a polygon whose creation opens the polygon tool dialog.
    pub(crate) fn polygon_tool_click(&mut self) {
        self.draw_polygon();
        self.modals.polygon_tool_armed = true;
    }

    pub(crate) fn delete_all_features(&mut self) {
        let event = self.draw.delete_all();
        self.modals.mission = None;
        self.modals.mission_open = false;
        self.modals.dropdown_visible = None;
        self.ui.cursor = MapCursor::Default;
        self.handle_draw_event(event);
        self.set_status("All features deleted.");
    }

    pub(crate) fn delete_feature(&mut self, id: FeatureId) {
        if let Some(event) = self.draw.delete(id) {
            self.handle_draw_event(event);
            self.set_status(format!("Deleted feature #{id}."));
        }
    }

    pub(crate) fn handle_draw_event(&mut self, event: DrawEvent) {
        log::debug!("draw event: {event:?}");
        match event {
            DrawEvent::Created(id) => {
                self.ui.cursor = MapCursor::Default;
                if let Some(feature) = self.draw.get(id) {
                    let msg = format!(
                        "{} #{id} created ({} vertices).",
                        feature.geometry.kind().label(),
                        feature.geometry.vertex_count()
                    );
                    self.set_status(msg);
                }
                if self.modals.polygon_tool_armed {
                    self.modals.polygon_tool_armed = false;
                    if let Some(table) = polygon_tool_table(&self.draw.get_all()) {
                        self.modals.polygon_tool = Some(table);
                        self.modals.polygon_tool_open = true;
                        self.modals.mission_open = false;
                    }
                }
            }
            DrawEvent::Deleted(_) | DrawEvent::DeletedAll => {}
        }
    }

    /// Build the mission table from the first drawn feature and show it.
    pub(crate) fn generate_modal_data(&mut self) {
        match generate_table(&self.draw.get_all()) {
            Ok(table) => {
                log::info!("generated {} waypoints ({})", table.rows.len(), table.kind.label());
                self.modals.mission = Some(table);
                self.modals.mission_open = true;
                self.modals.dropdown_visible = None;
            }
            Err(err) => {
                log::warn!("table generation failed: {err}");
                self.modals.alert = Some(err.to_string());
            }
        }
    }

    /// Whether the blocking notification is up, so map input must be ignored.
    pub(crate) const fn input_blocked(&self) -> bool {
        self.modals.alert.is_some()
    }

    pub(crate) fn dismiss_alert(&mut self) {
        self.modals.alert = None;
    }

    pub(crate) fn close_mission_modal(&mut self) {
        self.modals.mission_open = false;
        self.modals.dropdown_visible = None;
    }

    pub(crate) const fn close_polygon_tool_modal(&mut self) {
        self.modals.polygon_tool_open = false;
    }

    pub(crate) fn on_dropdown_click(&mut self, index: usize) {
        self.modals.dropdown_visible = if self.modals.dropdown_visible == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    /// Fly to a waypoint row and start drawing a polygon next to it.
    pub(crate) fn insert_polygon(&mut self, index: usize, position: InsertPosition) {
        let Some(row) = self
            .modals
            .mission
            .as_ref()
            .and_then(|t| t.rows.get(index))
            .cloned()
        else {
            return;
        };
        self.draw.change_mode(DrawMode::DrawPolygon);
        self.ui.cursor = MapCursor::Crosshair;
        self.map.fly_to(row.position, INSERT_FLY_ZOOM);
        self.modals.dropdown_visible = None;
        // The modal would swallow the clicks the new polygon needs.
        self.modals.mission_open = false;
        self.set_status(format!(
            "Insert polygon {} WP {}: click on the map to add vertices.",
            position.label(),
            row.label()
        ));
    }

    /// A primary click on the map at `point`. Returns true when it added a vertex.
    pub(crate) fn click_map(&mut self, point: LonLat) -> bool {
        if self.input_blocked() {
            return false;
        }
        self.draw.add_vertex(point)
    }

    pub(crate) fn finish_sketch(&mut self) {
        let mode = self.draw.mode();
        if !mode.is_drawing() || self.input_blocked() {
            return;
        }
        match self.draw.finish() {
            Some(event) => self.handle_draw_event(event),
            None => {
                self.ui.cursor = MapCursor::Default;
                self.set_status(format!(
                    "Sketch discarded: {mode} needs at least {} vertices.",
                    mode.min_vertices()
                ));
            }
        }
    }

    pub(crate) fn cancel_sketch(&mut self) {
        if self.draw.mode().is_drawing() {
            self.draw.cancel();
            self.ui.cursor = MapCursor::Default;
            self.set_status("Drawing canceled.");
        }
    }

    pub(crate) fn remove_last_sketch_vertex(&mut self) {
        if self.draw.remove_last_vertex() {
            self.set_status(format!("{} vertices in sketch.", self.draw.sketch().len()));
        }
    }

    /// Enter finishes a sketch while drawing and generates the table otherwise.
    pub(crate) fn handle_enter(&mut self) {
        if self.draw.mode().is_drawing() {
            self.finish_sketch();
        } else {
            self.generate_modal_data();
        }
    }

    /// Escape closes the front-most dialog, or cancels the sketch when none is open.
    pub(crate) fn handle_escape(&mut self) {
        if self.modals.alert.is_some() {
            self.dismiss_alert();
        } else if self.modals.polygon_tool_open {
            self.close_polygon_tool_modal();
        } else if self.modals.mission_open {
            self.close_mission_modal();
        } else {
            self.cancel_sketch();
        }
    }

    pub(crate) fn locate(&mut self) {
        match self.config.map.home() {
            Some(home) => {
                self.map.fly_to(home, LOCATE_FLY_ZOOM);
                self.set_status(format!("Flying to home ({}).", home.format_lat_lon()));
            }
            None => self.set_status("No home position configured."),
        }
    }

    pub(crate) fn reset_view(&mut self) {
        self.map
            .fly_to(self.config.map.initial_center(), self.config.map.initial_zoom());
    }

    pub(crate) fn set_smooth_fly(&mut self, smooth: bool) {
        self.config.map.smooth_fly = smooth;
        self.map.set_smooth(smooth);
    }
}
