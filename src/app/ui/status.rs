use super::super::MissionApp;
use egui::{Color32, RichText};

impl MissionApp {
    pub(crate) fn ui_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let small = |text: String| RichText::new(text).small().color(Color32::from_gray(180));
            ui.label(small(format!("Mode: {}", self.draw.mode())));
            ui.separator();
            ui.label(small(format!("Zoom: {:.2}", self.map.zoom())));
            ui.separator();
            let cursor_text = self.cursor_position.map_or_else(|| "--".to_string(), |p| p.format_lat_lon());
            ui.label(small(format!("Cursor: {cursor_text}")));
            ui.separator();
            ui.label(small(format!("Features: {}", self.draw.features().len())));
            if let Some(msg) = &self.ui.last_status {
                ui.separator();
                ui.label(
                    RichText::new(msg.as_str())
                        .small()
                        .color(Color32::from_gray(200)),
                );
            }
        });
    }
}
