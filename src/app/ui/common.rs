use crate::util::rounded_u8;
use egui::{CornerRadius, StrokeKind, pos2};

pub fn toggle_switch(ui: &mut egui::Ui, on: &mut bool) -> egui::Response {
    let desired_size = egui::vec2(
        ui.spacing().interact_size.y * 1.8,
        ui.spacing().interact_size.y,
    );
    let (rect, mut response) = ui.allocate_exact_size(desired_size, egui::Sense::click());
    if response.clicked() {
        *on = !*on;
        response.mark_changed();
    }

    if ui.is_rect_visible(rect) {
        let visuals = ui.style().interact_selectable(&response, *on);
        let radius = rect.height() / 2.0;
        ui.painter().rect(
            rect,
            CornerRadius::same(rounded_u8(radius)),
            visuals.bg_fill,
            visuals.bg_stroke,
            StrokeKind::Middle,
        );

        let knob_radius = radius - 2.0;
        let knob_x = egui::lerp(
            (rect.left() + knob_radius + 2.0)..=(rect.right() - knob_radius - 2.0),
            if *on { 1.0 } else { 0.0 },
        );
        ui.painter()
            .circle_filled(pos2(knob_x, rect.center().y), knob_radius, visuals.fg_stroke.color);
    }

    response
}

/// Vertex count and length summary shown next to a feature.
pub fn feature_summary(vertices: usize, length_m: f64, closed: bool) -> String {
    let what = if closed { "perimeter" } else { "length" };
    format!(
        "{vertices} vertices, {what} {}",
        crate::geo::format_distance(length_m)
    )
}
