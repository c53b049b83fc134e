use crate::geo::format_distance;

/// A round distance and its on-screen length.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleBar {
    pub pixels: f32,
    pub label: String,
}

/// Longest 1/2/5×10ⁿ meter bar that fits in `max_px` pixels.
pub fn scale_bar(meters_per_pixel: f64, max_px: f32) -> Option<ScaleBar> {
    if !meters_per_pixel.is_finite() || meters_per_pixel <= 0.0 || max_px <= 0.0 {
        return None;
    }
    let max_meters = meters_per_pixel * f64::from(max_px);
    let magnitude = 10f64.powf(max_meters.log10().floor());
    let meters = [5.0, 2.0, 1.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|m| *m <= max_meters)?;
    #[allow(clippy::cast_possible_truncation)]
    let pixels = (meters / meters_per_pixel) as f32;
    Some(ScaleBar {
        pixels,
        label: format_distance(meters),
    })
}
