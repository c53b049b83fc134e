//! Main egui/eframe application state and UI orchestration.

use crate::config::AppConfig;
use crate::draw::{self, DrawStore, ImportSummary};
use crate::geo::LonLat;
use crate::map::{self, MapView};
use egui::{Context, Key, Modifiers, Rect};
use std::path::{Path, PathBuf};

mod actions;
mod clipboard;
mod modal_state;
mod ui;
mod ui_state;

#[cfg(test)]
mod tests;

pub use actions::InsertPosition;
use modal_state::ModalState;
use ui_state::{MapCursor, NativeDialog, UiState};

const POINT_HIT_RADIUS: f32 = 10.0;
const INSERT_FLY_ZOOM: f64 = 15.0;
const LOCATE_FLY_ZOOM: f64 = 15.0;
const FIT_PADDING: f32 = 48.0;

/// Top-level application state.
pub struct MissionApp {
    config: AppConfig,
    map: MapView,
    draw: DrawStore,
    modals: ModalState,
    ui: UiState,
    /// Map viewport from the last frame, used to fit views outside the paint pass.
    last_viewport: Option<Rect>,
    /// Geographic position under the pointer.
    cursor_position: Option<LonLat>,
    active_dialog: Option<NativeDialog>,
    last_drawing_dir: Option<PathBuf>,
    last_drawing_path: Option<PathBuf>,
    last_export_dir: Option<PathBuf>,
}

impl MissionApp {
    pub fn with_config(config: AppConfig) -> Self {
        let map = MapView::new(
            config.map.initial_center(),
            config.map.initial_zoom(),
            config.map.smooth_fly,
        );
        Self {
            config,
            map,
            draw: DrawStore::new(),
            modals: ModalState::default(),
            ui: UiState::default(),
            last_viewport: None,
            cursor_position: None,
            active_dialog: None,
            last_drawing_dir: None,
            last_drawing_path: None,
            last_export_dir: None,
        }
    }

    /// Create the app with its basemap and optionally load a GeoJSON drawing given on the
    /// command line.
    pub fn new_with_initial_path(ctx: &Context, initial_path: Option<&Path>) -> Self {
        let mut app = Self::with_config(AppConfig::load());
        if let Some(tiles) = map::http_tiles(&app.config.map, ctx.clone()) {
            app.map.set_tiles(tiles);
        }
        if let Some(path) = initial_path {
            app.load_drawing_from_path(path);
        }
        app
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.ui.last_status = Some(msg.into());
    }

    fn load_drawing_from_path(&mut self, path: &Path) {
        self.last_drawing_dir = path.parent().map(Path::to_path_buf);
        match draw::load_drawing(path) {
            Ok(geojson) => {
                let summary = self.draw.set_all(geojson);
                self.last_drawing_path = Some(path.to_path_buf());
                self.modals.clear_tables();
                self.fit_to_drawing();
                log::info!("loaded drawing {}: {summary:?}", path.display());
                let name = path
                    .file_name()
                    .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned());
                self.set_status(import_status(&name, summary));
            }
            Err(err) => {
                log::warn!("drawing load failed: {err:#}");
                self.set_status(format!("Failed to load drawing: {err}"));
            }
        }
    }

    fn save_drawing_to_path(&mut self, path: &Path) {
        self.last_drawing_dir = path.parent().map(Path::to_path_buf);
        self.last_drawing_path = Some(path.to_path_buf());
        match draw::save_drawing(path, &self.draw.get_all()) {
            Ok(()) => {
                log::info!("saved drawing to {}", path.display());
                self.set_status(format!("Drawing saved ({} features).", self.draw.features().len()));
            }
            Err(err) => {
                log::warn!("drawing save failed: {err:#}");
                self.set_status(format!("Drawing save failed: {err}"));
            }
        }
    }

    fn fit_to_drawing(&mut self) {
        let points: Vec<_> = self
            .draw
            .features()
            .iter()
            .flat_map(|f| f.geometry.coordinates().iter().copied())
            .collect();
        if points.is_empty() {
            return;
        }
        let size = self
            .last_viewport
            .map_or_else(|| egui::vec2(1200.0, 760.0), |r| r.size());
        self.map.fit_bounds(&points, size, FIT_PADDING);
    }

    fn remember_export_dir_from_path(&mut self, path: &Path) {
        if let Some(parent) = path.parent() {
            self.last_export_dir = Some(parent.to_path_buf());
        }
    }

    fn handle_hotkeys(&mut self, ctx: &Context) {
        // Keys typed into text fields belong to the field.
        if ctx.wants_keyboard_input() || self.active_dialog.is_some() {
            return;
        }

        if self.modals.alert.is_some() {
            if ctx.input(|i| i.key_pressed(Key::Enter) || i.key_pressed(Key::Escape)) {
                self.dismiss_alert();
            }
            return;
        }

        if ctx.input(|i| i.key_pressed(Key::Enter)) {
            self.handle_enter();
        }
        if ctx.input(|i| i.key_pressed(Key::Backspace)) && self.draw.mode().is_drawing() {
            self.remove_last_sketch_vertex();
        }
        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            self.handle_escape();
        }
        // Ctrl/Cmd + P: draw polygon
        if ctx.input(|i| i.key_pressed(Key::P) && i.modifiers.command) {
            self.draw_polygon();
        }
        // Ctrl/Cmd + L: draw line string
        if ctx.input(|i| i.key_pressed(Key::L) && i.modifiers.command) {
            self.draw_line_string();
        }
        // Ctrl/Cmd + Shift + D: delete all
        if ctx.input(|i| i.key_pressed(Key::D) && i.modifiers.command && i.modifiers.shift) {
            self.delete_all_features();
        }
        // Ctrl/Cmd + O / S: open and save drawings
        if ctx.input(|i| i.key_pressed(Key::O) && i.modifiers.command) {
            self.open_drawing_dialog();
        }
        if ctx.input(|i| i.key_pressed(Key::S) && i.modifiers.command) {
            self.save_drawing_dialog();
        }
        // Ctrl/Cmd + B: toggle side panel
        if ctx.input(|i| i.key_pressed(Key::B) && i.modifiers.command) {
            self.ui.side_open = !self.ui.side_open;
        }
        // Ctrl/Cmd with +/- belongs to egui's UI zoom.
        if ctx.input(|i| {
            is_map_zoom_modifiers(i.modifiers)
                && (i.key_pressed(Key::Plus) || i.key_pressed(Key::Equals))
        }) {
            self.map.zoom_in();
        }
        if ctx.input(|i| is_map_zoom_modifiers(i.modifiers) && i.key_pressed(Key::Minus)) {
            self.map.zoom_out();
        }
    }

    fn poll_active_dialog(&mut self, ctx: &Context) {
        let mut close_dialog = false;
        let mut picked_export_path: Option<PathBuf> = None;
        let mut picked_open: Option<PathBuf> = None;
        let mut picked_save: Option<PathBuf> = None;
        let mut status: Option<String> = None;

        if let Some(dialog_state) = self.active_dialog.as_mut() {
            let (dialog, canceled_msg) = match dialog_state {
                NativeDialog::OpenDrawing(dialog) => (dialog, "Open canceled."),
                NativeDialog::SaveDrawing(dialog) => (dialog, "Save canceled."),
                NativeDialog::Export { dialog, .. } => (dialog, "Export canceled."),
            };
            dialog.update(ctx);
            if let Some(path) = dialog.take_picked() {
                close_dialog = true;
                match dialog_state {
                    NativeDialog::OpenDrawing(_) => picked_open = Some(path),
                    NativeDialog::SaveDrawing(_) => picked_save = Some(path),
                    NativeDialog::Export { table, format, .. } => {
                        status = Some(
                            match crate::export::export_table(&path, table, *format) {
                                Ok(()) => format!("{} exported.", format.label()),
                                Err(err) => format!("{} export failed: {err}", format.label()),
                            },
                        );
                        picked_export_path = Some(path);
                    }
                }
            } else {
                match dialog.state() {
                    egui_file_dialog::DialogState::Cancelled => {
                        status = Some(canceled_msg.to_string());
                        close_dialog = true;
                    }
                    egui_file_dialog::DialogState::Closed => close_dialog = true,
                    _ => {}
                }
            }
        }

        if close_dialog {
            self.active_dialog = None;
        }
        if let Some(msg) = status {
            self.set_status(msg);
        }
        if let Some(path) = picked_export_path {
            self.remember_export_dir_from_path(&path);
        }
        if let Some(path) = picked_open {
            self.load_drawing_from_path(&path);
        }
        if let Some(path) = picked_save {
            self.save_drawing_to_path(&path);
        }
    }

    const fn cursor_icon(&self) -> egui::CursorIcon {
        match self.ui.cursor {
            MapCursor::Default => egui::CursorIcon::Default,
            MapCursor::Crosshair => egui::CursorIcon::Crosshair,
            MapCursor::Pointer => egui::CursorIcon::PointingHand,
        }
    }
}

/// Map zoom keys work bare or with Shift, which some layouts need for `+`.
const fn is_map_zoom_modifiers(modifiers: Modifiers) -> bool {
    !(modifiers.alt || modifiers.ctrl || modifiers.command || modifiers.mac_cmd)
}

fn import_status(name: &str, summary: ImportSummary) -> String {
    if summary.skipped > 0 {
        format!(
            "Loaded {} features from {name} ({} unsupported skipped).",
            summary.imported, summary.skipped
        )
    } else {
        format!("Loaded {} features from {name}.", summary.imported)
    }
}

impl eframe::App for MissionApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_hotkeys(ctx);

        if self.map.is_flying() {
            let dt = ctx.input(|i| i.stable_dt);
            self.map.step_animation(dt);
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("top").show(ctx, |ui| self.ui_top(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.ui_status_bar(ui));
        egui::SidePanel::right("side")
            .resizable(true)
            .default_width(260.0)
            .show_animated(ctx, self.ui.side_open, |ui| self.ui_side(ui));
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.ui_map_canvas(ui));

        self.ui_mission_modal(ctx);
        self.ui_polygon_tool_modal(ctx);
        self.ui_alert(ctx);
        self.poll_active_dialog(ctx);
    }

    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}
}
