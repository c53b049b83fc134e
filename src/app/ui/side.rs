use super::super::MissionApp;
use super::common::{feature_summary, toggle_switch};
use super::icons;
use crate::draw::{FeatureId, GeometryKind};
use egui::RichText;

impl MissionApp {
    pub(crate) fn ui_side(&mut self, ui: &mut egui::Ui) {
        ui.heading("Features");
        ui.add_space(4.0);
        self.ui_feature_list(ui);

        ui.add_space(8.0);
        ui.separator();
        ui.heading("Map");
        self.ui_map_settings(ui);
    }

    fn ui_feature_list(&mut self, ui: &mut egui::Ui) {
        if self.draw.is_empty() {
            ui.label(
                RichText::new("Nothing drawn yet. Pick Polygon or LineString in the toolbar.")
                    .weak(),
            );
            return;
        }

        let mut to_delete: Option<FeatureId> = None;
        egui::ScrollArea::vertical()
            .max_height(ui.available_height() * 0.6)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for (idx, feature) in self.draw.features().iter().enumerate() {
                    let geometry = &feature.geometry;
                    ui.horizontal(|ui| {
                        let kind = geometry.kind().label();
                        let heading = if idx == 0 {
                            format!("#{} {kind}  (mission)", feature.id)
                        } else {
                            format!("#{} {kind}", feature.id)
                        };
                        ui.label(RichText::new(heading).strong());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui
                                .small_button(icons::ICON_DELETE)
                                .on_hover_text("Delete this feature")
                                .clicked()
                            {
                                to_delete = Some(feature.id);
                            }
                        });
                    });
                    ui.label(
                        RichText::new(feature_summary(
                            geometry.vertex_count(),
                            geometry.length_m(),
                            geometry.kind() == GeometryKind::Polygon,
                        ))
                        .small(),
                    );
                    ui.add_space(2.0);
                }
            });

        if let Some(id) = to_delete {
            self.delete_feature(id);
        }
    }

    fn ui_map_settings(&mut self, ui: &mut egui::Ui) {
        let mut smooth = self.config.map.smooth_fly;
        ui.horizontal(|ui| {
            if toggle_switch(ui, &mut smooth)
                .on_hover_text("Animate zoom and fly-to transitions")
                .changed()
            {
                self.set_smooth_fly(smooth);
            }
            ui.label("Smooth transitions");
        });
        let center = self.map.center();
        ui.label(format!("Center: {}", center.format_lat_lon()));
        ui.label(format!("Zoom: {:.2}", self.map.zoom()));
        match self.config.map.home() {
            Some(home) => ui.label(format!("Home: {}", home.format_lat_lon())),
            None => ui.label(RichText::new("Home: not configured").weak()),
        };
    }
}
