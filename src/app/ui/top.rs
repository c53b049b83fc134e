use super::super::MissionApp;
use super::icons;
use crate::draw::DrawMode;
use crate::export::ExportFormat;

impl MissionApp {
    pub(crate) fn ui_top(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            // Use egui's built-in theme toggle so icon matches current mode.
            egui::widgets::global_theme_preference_switch(ui);
            ui.separator();

            self.ui_file_menu(ui);
            ui.separator();

            self.ui_side_toggle(ui);
            ui.separator();

            self.ui_draw_controls(ui);
            ui.separator();

            self.ui_generate_button(ui);
        });
    }

    fn ui_file_menu(&mut self, ui: &mut egui::Ui) {
        let has_features = !self.draw.is_empty();
        let has_table = self.modals.current_table().is_some();
        ui.menu_button(format!("{} File", icons::ICON_MENU), |ui| {
            if ui
                .add(egui::Button::new("Open drawing…").shortcut_text("Ctrl+O"))
                .on_hover_text("Load a GeoJSON drawing (Ctrl+O). You can also drop a file on the map.")
                .clicked()
            {
                self.open_drawing_dialog();
                ui.close();
            }
            if ui
                .add_enabled(
                    has_features,
                    egui::Button::new("Save drawing…").shortcut_text("Ctrl+S"),
                )
                .on_hover_text("Save the drawn features as GeoJSON (Ctrl+S)")
                .clicked()
            {
                self.save_drawing_dialog();
                ui.close();
            }

            ui.separator();

            for format in ExportFormat::ALL {
                if ui
                    .add_enabled(
                        has_table,
                        egui::Button::new(format!(
                            "{} Export {}…",
                            icons::ICON_EXPORT,
                            format.label()
                        )),
                    )
                    .on_hover_text("Export the current waypoint table")
                    .on_disabled_hover_text("Generate a waypoint table first")
                    .clicked()
                {
                    self.start_export(format);
                    ui.close();
                }
            }
            if ui
                .add_enabled(
                    has_table,
                    egui::Button::new(format!("{} Copy table", icons::ICON_COPY)),
                )
                .on_hover_text("Copy the waypoint table as tab-separated text")
                .clicked()
            {
                self.copy_table_to_clipboard();
                ui.close();
            }
        });
    }

    fn ui_side_toggle(&mut self, ui: &mut egui::Ui) {
        let side_label = if self.ui.side_open {
            "Hide features"
        } else {
            "Show features"
        };
        if ui
            .add(
                egui::Button::new(format!("{} {side_label}", icons::ICON_SIDE_TOGGLE))
                    .shortcut_text("Ctrl+B"),
            )
            .on_hover_text("Toggle the features panel (Ctrl+B)")
            .clicked()
        {
            self.ui.side_open = !self.ui.side_open;
        }
    }

    fn ui_draw_controls(&mut self, ui: &mut egui::Ui) {
        let mode = self.draw.mode();
        let polygon_active = mode == DrawMode::DrawPolygon && !self.modals.polygon_tool_armed;
        if ui
            .selectable_label(polygon_active, format!("{} Polygon", icons::ICON_POLYGON))
            .on_hover_text("Draw a polygon (Ctrl+P)")
            .clicked()
        {
            self.draw_polygon();
        }
        if ui
            .selectable_label(
                mode == DrawMode::DrawLineString,
                format!("{} LineString", icons::ICON_LINE),
            )
            .on_hover_text("Draw a line string (Ctrl+L)")
            .clicked()
        {
            self.draw_line_string();
        }
        if ui
            .selectable_label(
                self.modals.polygon_tool_armed,
                format!("{} Polygon Tool", icons::ICON_POLYGON_TOOL),
            )
            .on_hover_text("Draw a polygon and list its coordinates when it is closed")
            .clicked()
        {
            self.polygon_tool_click();
        }
        if ui
            .add(
                egui::Button::new(format!("{} Delete All", icons::ICON_DELETE_ALL))
                    .shortcut_text("Ctrl+Shift+D"),
            )
            .on_hover_text("Delete every drawn feature (Ctrl+Shift+D)")
            .clicked()
        {
            self.delete_all_features();
        }
    }

    fn ui_generate_button(&mut self, ui: &mut egui::Ui) {
        if ui
            .add(
                egui::Button::new(format!("{} Generate", icons::ICON_GENERATE))
                    .shortcut_text("Enter"),
            )
            .on_hover_text("Build the waypoint table from the first drawn feature")
            .clicked()
        {
            self.generate_modal_data();
        }
        if ui
            .add_enabled(
                !self.draw.is_empty(),
                egui::Button::new(format!("{} Fit", icons::ICON_FIT)),
            )
            .on_hover_text("Zoom to the drawn features")
            .clicked()
        {
            self.fit_to_drawing();
        }
    }
}
