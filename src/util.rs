/// Narrow a world/screen coordinate to egui's `f32`, mapping NaN to zero.
pub const fn f64_to_f32(value: f64) -> f32 {
    #[allow(clippy::cast_possible_truncation)]
    {
        if value.is_nan() {
            0.0
        } else {
            value.clamp(f32::MIN as f64, f32::MAX as f64) as f32
        }
    }
}

pub fn rounded_u8(value: f32) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        value.round().clamp(0.0, f32::from(u8::MAX)) as u8
    }
}
