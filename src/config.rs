use std::fs;
use std::path::PathBuf;

use directories::{BaseDirs, ProjectDirs};
use egui::{Color32, Stroke};
use serde::Deserialize;

use crate::geo::LonLat;
use crate::map::{MAX_LATITUDE, MAX_ZOOM, MIN_ZOOM};

const CONFIG_FILE_NAME: &str = "missionmap.toml";

fn alpha_to_u8(alpha: f32) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub color: [u8; 3],
    pub alpha: f32,
    pub thickness: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: [251, 176, 59],
            alpha: 1.0,
            thickness: 2.0,
        }
    }
}

impl StrokeStyle {
    const fn rgb(color: [u8; 3], alpha: f32, thickness: f32) -> Self {
        Self {
            color,
            alpha,
            thickness,
        }
    }

    pub fn color32(&self) -> Color32 {
        Color32::from_rgba_unmultiplied(
            self.color[0],
            self.color[1],
            self.color[2],
            alpha_to_u8(self.alpha),
        )
    }

    pub fn stroke(&self) -> Stroke {
        Stroke {
            width: self.thickness.max(0.1),
            color: self.color32(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PointStyle {
    pub color: [u8; 3],
    pub alpha: f32,
    pub radius: f32,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            color: [255, 255, 255],
            alpha: 1.0,
            radius: 4.0,
        }
    }
}

impl PointStyle {
    pub fn color32(&self) -> Color32 {
        Color32::from_rgba_unmultiplied(
            self.color[0],
            self.color[1],
            self.color[2],
            alpha_to_u8(self.alpha),
        )
    }

    pub const fn radius(&self) -> f32 {
        self.radius.max(0.1)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// `[lon, lat]` shown at startup and on "reset view".
    pub initial_center: [f64; 2],
    pub initial_zoom: f64,
    /// `[lon, lat]` the locate button flies to. Unset disables the button.
    pub home: Option<[f64; 2]>,
    pub smooth_fly: bool,
    pub scroll_zoom_speed: f64,
    /// Fetch raster basemap tiles. Off leaves a plain background.
    pub basemap: bool,
    /// XYZ tile URL with `{z}`, `{x}`, `{y}`. Unset uses OpenStreetMap.
    pub tile_url: Option<String>,
    /// Keep downloaded tiles in the platform cache directory.
    pub tile_cache: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_center: [-100.43, 35.0],
            initial_zoom: 5.0,
            home: None,
            smooth_fly: true,
            scroll_zoom_speed: 1.0,
            basemap: true,
            tile_url: None,
            tile_cache: true,
        }
    }
}

impl MapConfig {
    pub fn initial_center(&self) -> LonLat {
        sanitize_lon_lat(self.initial_center).unwrap_or_else(|| Self::default().initial_center.into())
    }

    pub const fn initial_zoom(&self) -> f64 {
        if self.initial_zoom.is_finite() {
            self.initial_zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            5.0
        }
    }

    pub fn home(&self) -> Option<LonLat> {
        self.home.and_then(sanitize_lon_lat)
    }

    /// The configured tile URL, if it has every placeholder.
    pub fn tile_url(&self) -> Option<&str> {
        self.tile_url
            .as_deref()
            .filter(|url| ["{z}", "{x}", "{y}"].iter().all(|p| url.contains(p)))
    }

    pub const fn scroll_zoom_factor(&self) -> f64 {
        if self.scroll_zoom_speed.is_finite() {
            self.scroll_zoom_speed.clamp(0.05, 10.0)
        } else {
            1.0
        }
    }
}

fn sanitize_lon_lat([lon, lat]: [f64; 2]) -> Option<LonLat> {
    (lon.is_finite() && lat.is_finite())
        .then(|| LonLat::new(lon.clamp(-180.0, 180.0), lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub polygon: StrokeStyle,
    pub polygon_fill_alpha: f32,
    pub line_string: StrokeStyle,
    pub sketch: StrokeStyle,
    pub vertex: PointStyle,
    pub background: [u8; 3],
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            polygon: StrokeStyle::rgb([220, 70, 70], 1.0, 2.0),
            polygon_fill_alpha: 0.15,
            line_string: StrokeStyle::rgb([60, 130, 230], 1.0, 2.5),
            sketch: StrokeStyle::default(),
            vertex: PointStyle::default(),
            background: [236, 240, 243],
        }
    }
}

impl StyleConfig {
    pub fn polygon_fill(&self) -> Color32 {
        let [r, g, b] = self.polygon.color;
        Color32::from_rgba_unmultiplied(r, g, b, alpha_to_u8(self.polygon_fill_alpha))
    }

    pub const fn background_color(&self) -> Color32 {
        let [r, g, b] = self.background;
        Color32::from_rgb(r, g, b)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub map: MapConfig,
    pub style: StyleConfig,
}

impl AppConfig {
    pub fn load() -> Self {
        for path in Self::candidate_paths() {
            if let Ok(contents) = fs::read_to_string(&path) {
                match Self::parse(&contents) {
                    Ok(cfg) => {
                        log::info!("loaded config from {}", path.display());
                        return cfg;
                    }
                    Err(err) => {
                        log::warn!("Failed to parse config {}: {err}", path.display());
                    }
                }
            }
        }
        log::debug!("no config file found, using defaults");
        Self::default()
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Self>(contents)
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(exe_path) = std::env::current_exe()
            && let Some(dir) = exe_path.parent()
        {
            paths.push(dir.join(CONFIG_FILE_NAME));
        }

        if let Some(proj_dirs) = ProjectDirs::from("dev", "Missionmap", "Missionmap") {
            paths.push(proj_dirs.config_dir().join(CONFIG_FILE_NAME));
        }

        if let Some(base_dirs) = BaseDirs::new() {
            paths.push(
                base_dirs
                    .config_dir()
                    .join("missionmap")
                    .join(CONFIG_FILE_NAME),
            );
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AppConfig::parse("").expect("empty config parses");
        let center = cfg.map.initial_center();
        assert!((center.lon + 100.43).abs() < 1e-12);
        assert!((center.lat - 35.0).abs() < 1e-12);
        assert!((cfg.map.initial_zoom() - 5.0).abs() < f64::EPSILON);
        assert!(cfg.map.home().is_none());
        assert!(cfg.map.smooth_fly);
        assert!(cfg.map.basemap);
        assert!(cfg.map.tile_url().is_none());
    }

    #[test]
    fn tile_url_needs_every_placeholder() {
        let cfg = AppConfig::parse(
            r#"
[map]
basemap = false
tile_url = "https://tiles.example.org/{z}/{x}/{y}.png"
"#,
        )
        .expect("config parses");
        assert!(!cfg.map.basemap);
        assert_eq!(
            cfg.map.tile_url(),
            Some("https://tiles.example.org/{z}/{x}/{y}.png")
        );

        let cfg = AppConfig::parse("[map]\ntile_url = \"https://tiles.example.org/{z}/{x}.png\"")
            .expect("config parses");
        assert!(cfg.map.tile_url().is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = AppConfig::parse(
            r"
[map]
initial_zoom = 8.5
home = [13.4, 52.5]

[style.line_string]
color = [0, 0, 0]
",
        )
        .expect("config parses");
        assert!((cfg.map.initial_zoom() - 8.5).abs() < f64::EPSILON);
        assert_eq!(cfg.map.home(), Some(LonLat::new(13.4, 52.5)));
        assert_eq!(cfg.style.line_string.color, [0, 0, 0]);
        assert!((cfg.style.line_string.thickness - 2.0).abs() < f32::EPSILON);
        assert_eq!(cfg.style.polygon.color, [220, 70, 70]);
    }

    #[test]
    fn out_of_range_values_are_sanitized() {
        let cfg = AppConfig::parse(
            r"
[map]
initial_center = [400.0, -95.0]
initial_zoom = 99.0
scroll_zoom_speed = 0.0
",
        )
        .expect("config parses");
        let center = cfg.map.initial_center();
        assert!((center.lon - 180.0).abs() < f64::EPSILON);
        assert!((center.lat + MAX_LATITUDE).abs() < f64::EPSILON);
        assert!((cfg.map.initial_zoom() - MAX_ZOOM).abs() < f64::EPSILON);
        assert!((cfg.map.scroll_zoom_factor() - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(AppConfig::parse("[map]\ninitial_zoom = \"far\"").is_err());
    }

    #[test]
    fn style_colors_apply_alpha() {
        let style = StyleConfig::default();
        assert_eq!(style.polygon_fill().a(), alpha_to_u8(0.15));
        let faded = StrokeStyle::rgb([0, 0, 0], 0.45, 1.0);
        assert_eq!(faded.stroke().color.a(), alpha_to_u8(0.45));
    }
}
