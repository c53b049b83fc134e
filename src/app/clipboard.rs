use super::MissionApp;
use crate::export::table_to_tsv;
use arboard::{Clipboard, Error as ClipboardError};

impl MissionApp {
    /// Copy the current waypoint table as tab-separated text.
    pub(crate) fn copy_table_to_clipboard(&mut self) {
        let Some(table) = self.modals.current_table() else {
            self.set_status("Nothing to copy: generate a table first.");
            return;
        };
        let rows = table.rows.len();
        let text = table_to_tsv(table);
        match write_clipboard_text(text) {
            Ok(()) => self.set_status(format!("Copied {rows} waypoints to the clipboard.")),
            Err(err) => {
                log::warn!("clipboard copy failed: {err}");
                self.set_status(err);
            }
        }
    }
}

fn write_clipboard_text(text: String) -> Result<(), String> {
    let mut clipboard = Clipboard::new().map_err(format_clipboard_error)?;
    clipboard.set_text(text).map_err(format_clipboard_error)
}

fn format_clipboard_error(err: ClipboardError) -> String {
    match err {
        ClipboardError::ClipboardNotSupported => {
            "Copy failed: clipboard access is not supported in this environment.".to_string()
        }
        ClipboardError::ClipboardOccupied => {
            "Copy failed: clipboard is busy; try again in a moment.".to_string()
        }
        ClipboardError::ConversionFailure => {
            "Copy failed: table text could not be converted.".to_string()
        }
        ClipboardError::Unknown { description } => format!("Copy failed: {description}"),
        _ => format!("Copy failed: {err}"),
    }
}
