use anyhow::Context as _;
use geojson::{FeatureCollection, GeoJson};
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write `collection` as pretty GeoJSON, staging it next to `path` first.
pub fn save_drawing(path: &Path, collection: &FeatureCollection) -> anyhow::Result<()> {
    let json =
        serde_json::to_vec_pretty(collection).context("Failed to serialize drawing as GeoJSON")?;
    write_atomic(path, &json)
}

/// Read a GeoJSON file: a feature collection, a single feature or a bare geometry.
pub fn load_drawing(path: &Path) -> anyhow::Result<GeoJson> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read drawing {}", path.display()))?;
    text.parse::<GeoJson>()
        .with_context(|| format!("{} is not valid GeoJSON", path.display()))
}

/// Sibling file the drawing is staged in before it replaces `target`.
fn staging_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map_or_else(|| OsString::from("drawing.geojson"), ToOwned::to_owned);
    name.push(".partial");
    target.with_file_name(name)
}

fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let staged = staging_path(path);
    let result = fs::File::create(&staged)
        .and_then(|mut file| {
            file.write_all(data)?;
            file.sync_all()
        })
        .with_context(|| format!("Failed to write {}", staged.display()))
        .and_then(|()| {
            // Windows refuses to rename onto an existing file.
            if cfg!(windows) && path.exists() {
                fs::remove_file(path)
                    .with_context(|| format!("Failed to remove old {}", path.display()))?;
            }
            fs::rename(&staged, path)
                .with_context(|| format!("Failed to replace {}", path.display()))
        });
    if result.is_err() {
        let _ = fs::remove_file(&staged);
        return result;
    }
    log::debug!("wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}
