use super::super::MissionApp;
use super::icons;
use super::table::{RowAction, waypoint_table};
use crate::export::ExportFormat;
use egui::{Align2, RichText};

const ROUTE_HINT: &str =
    "Click on the map to mark points of the route and then press ⮌ to complete the route.";

impl MissionApp {
    pub(crate) fn ui_mission_modal(&mut self, ctx: &egui::Context) {
        if !self.modals.mission_open {
            return;
        }
        let Some(table) = self.modals.mission.as_ref() else {
            self.modals.mission_open = false;
            return;
        };

        let mut open = true;
        let mut close_requested = false;
        let mut row_action = None;
        let mut export: Option<ExportFormat> = None;
        let mut copy = false;
        egui::Window::new("Mission Creation")
            .id(egui::Id::new("mission_modal"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.heading(&table.title);
                ui.add_space(6.0);
                row_action = waypoint_table(
                    ui,
                    "mission_table",
                    table,
                    Some(self.modals.dropdown_visible),
                );
                ui.add_space(6.0);
                ui.label(RichText::new(ROUTE_HINT).italics());
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("Generate Data").clicked() {
                        close_requested = true;
                    }
                    ui.separator();
                    copy = export_buttons(ui, &mut export);
                });
            });

        match row_action {
            Some(RowAction::ToggleDropdown(idx)) => self.on_dropdown_click(idx),
            Some(RowAction::Insert(idx, position)) => self.insert_polygon(idx, position),
            None => {}
        }
        if !open || close_requested {
            self.close_mission_modal();
        }
        self.run_table_footer_actions(export, copy);
    }

    pub(crate) fn ui_polygon_tool_modal(&mut self, ctx: &egui::Context) {
        if !self.modals.polygon_tool_open {
            return;
        }
        let Some(table) = self.modals.polygon_tool.as_ref() else {
            self.modals.polygon_tool_open = false;
            return;
        };

        let mut open = true;
        let mut close_requested = false;
        egui::Window::new("Polygon Tool")
            .id(egui::Id::new("polygon_tool_modal"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.heading(&table.title);
                ui.add_space(6.0);
                waypoint_table(ui, "polygon_tool_table", table, None);
                ui.add_space(6.0);
                if ui.button("Imports Points").clicked() {
                    close_requested = true;
                }
            });

        if !open || close_requested {
            self.close_polygon_tool_modal();
        }
    }

    pub(crate) fn ui_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.modals.alert.clone() else {
            return;
        };
        let mut dismissed = false;
        // The backdrop swallows pointer input meant for the map and toolbar.
        let response = egui::Modal::new(egui::Id::new("alert_modal")).show(ctx, |ui| {
            ui.set_min_width(220.0);
            ui.heading("Notice");
            ui.add_space(4.0);
            ui.label(message);
            ui.add_space(6.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
        dismissed |= response.should_close();
        if dismissed {
            self.dismiss_alert();
        }
    }

    fn run_table_footer_actions(&mut self, export: Option<ExportFormat>, copy: bool) {
        if let Some(format) = export {
            self.start_export(format);
        }
        if copy {
            self.copy_table_to_clipboard();
        }
    }
}

/// Copy and export controls under the mission table. Returns true when copy was clicked.
fn export_buttons(ui: &mut egui::Ui, export: &mut Option<ExportFormat>) -> bool {
    let copy = ui
        .button(format!("{} Copy", icons::ICON_COPY))
        .on_hover_text("Copy the table as tab-separated text")
        .clicked();
    ui.menu_button(format!("{} Export", icons::ICON_EXPORT), |ui| {
        for format in ExportFormat::ALL {
            if ui.button(format.label()).clicked() {
                *export = Some(format);
                ui.close();
            }
        }
    });
    copy
}
