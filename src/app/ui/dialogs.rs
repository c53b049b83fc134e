use super::super::{MissionApp, NativeDialog};
use crate::export::ExportFormat;
use egui_file_dialog::FileDialog;
use std::path::Path;

impl MissionApp {
    pub(crate) fn open_drawing_dialog(&mut self) {
        let mut dialog = FileDialog::new()
            .title("Open drawing")
            .add_file_filter_extensions("GeoJSON", vec!["geojson", "json"])
            .default_file_filter("GeoJSON");
        if let Some(dir) = self.last_drawing_dir.as_deref() {
            dialog = dialog.initial_directory(dir.to_path_buf());
        }
        dialog.pick_file();
        self.active_dialog = Some(NativeDialog::OpenDrawing(dialog));
    }

    pub(crate) fn save_drawing_dialog(&mut self) {
        if self.draw.is_empty() {
            self.set_status("Nothing to save: draw a feature first.");
            return;
        }
        let default_name = self
            .last_drawing_path
            .as_ref()
            .and_then(|p| p.file_name().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "mission.geojson".to_string());
        let mut dialog = Self::make_save_dialog(
            "Save drawing",
            &default_name,
            &["geojson", "json"],
            self.last_drawing_dir.as_deref(),
        );
        dialog.save_file();
        self.active_dialog = Some(NativeDialog::SaveDrawing(dialog));
    }

    pub(crate) fn start_export(&mut self, format: ExportFormat) {
        let Some(table) = self.modals.current_table().cloned() else {
            self.set_status("Nothing to export: generate a table first.");
            return;
        };
        let default_name = format!("waypoints.{}", format.extension());
        let mut dialog = Self::make_save_dialog(
            &format!("Export {}", format.label()),
            &default_name,
            &[format.extension()],
            self.last_export_dir.as_deref(),
        );
        dialog.save_file();
        self.active_dialog = Some(NativeDialog::Export {
            dialog,
            table,
            format,
        });
    }

    pub(crate) fn make_save_dialog(
        title: &str,
        default_name: &str,
        extensions: &[&str],
        initial_dir: Option<&Path>,
    ) -> FileDialog {
        let mut dialog = FileDialog::new()
            .title(title)
            .default_file_name(default_name);
        let mut first_label: Option<String> = None;
        for ext in extensions {
            let label = format!("*.{ext}");
            if first_label.is_none() {
                first_label = Some(label.clone());
            }
            dialog = dialog.add_save_extension(&label, ext);
        }
        if let Some(label) = first_label.as_deref() {
            dialog = dialog.default_save_extension(label);
        }
        if let Some(dir) = initial_dir {
            dialog = dialog.initial_directory(dir.to_path_buf());
        }
        dialog
    }
}
