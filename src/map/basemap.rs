//! Raster basemap tiles fetched over HTTP.

use crate::config::MapConfig;
use directories::ProjectDirs;
use walkers::sources::{Attribution, OpenStreetMap, TileSource};
use walkers::{HeaderValue, HttpOptions, HttpTiles, TileId};

/// Any XYZ raster server, given as a URL with `{z}`, `{x}` and `{y}` placeholders.
#[derive(Debug, Clone)]
struct TemplateSource {
    template: String,
}

impl TileSource for TemplateSource {
    fn tile_url(&self, tile_id: TileId) -> String {
        self.template
            .replace("{z}", &tile_id.zoom.to_string())
            .replace("{x}", &tile_id.x.to_string())
            .replace("{y}", &tile_id.y.to_string())
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: "Custom tile server",
            url: "",
            logo_light: None,
            logo_dark: None,
        }
    }
}

/// Tile downloader for the configured basemap, or `None` when the basemap is off.
pub fn http_tiles(config: &MapConfig, ctx: egui::Context) -> Option<HttpTiles> {
    if !config.basemap {
        log::info!("basemap disabled in config");
        return None;
    }
    let options = http_options(config.tile_cache);
    let tiles = match config.tile_url() {
        Some(template) => {
            log::info!("basemap tiles from {template}");
            HttpTiles::with_options(
                TemplateSource {
                    template: template.to_owned(),
                },
                options,
                ctx,
            )
        }
        None => {
            if config.tile_url.is_some() {
                log::warn!("tile_url needs {{z}}, {{x}} and {{y}}; using OpenStreetMap");
            }
            HttpTiles::with_options(OpenStreetMap, options, ctx)
        }
    };
    Some(tiles)
}

fn http_options(cache: bool) -> HttpOptions {
    let cache = cache
        .then(|| ProjectDirs::from("dev", "Missionmap", "Missionmap"))
        .flatten()
        .map(|dirs| dirs.cache_dir().join("tiles"));
    if let Some(dir) = &cache {
        log::debug!("tile cache at {}", dir.display());
    }
    HttpOptions {
        cache,
        user_agent: Some(HeaderValue::from_static(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))),
        ..HttpOptions::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_source_fills_placeholders() {
        let source = TemplateSource {
            template: "https://tiles.example.org/{z}/{x}/{y}.png".to_owned(),
        };
        let url = source.tile_url(TileId {
            x: 12,
            y: 34,
            zoom: 5,
        });
        assert_eq!(url, "https://tiles.example.org/5/12/34.png");
    }

    #[test]
    fn requests_identify_the_app() {
        let options = http_options(false);
        assert!(options.cache.is_none());
        let agent = options.user_agent.expect("user agent");
        assert!(agent.to_str().is_ok_and(|s| s.starts_with("missionmap/")));
    }
}
