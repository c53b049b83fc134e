use super::super::InsertPosition;
use super::icons;
use crate::geo::format_distance;
use crate::waypoints::WaypointTable;
use egui::RichText;

const TABLE_MAX_HEIGHT: f32 = 360.0;

/// What a click inside the waypoint table asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    ToggleDropdown(usize),
    Insert(usize, InsertPosition),
}

/// Render the WP / Coordinates / Distance grid. Row menus are shown when
/// `dropdown` is `Some`; its inner value is the row whose menu is expanded.
pub fn waypoint_table(
    ui: &mut egui::Ui,
    id_salt: &str,
    table: &WaypointTable,
    dropdown: Option<Option<usize>>,
) -> Option<RowAction> {
    let mut action = None;
    let with_menus = dropdown.is_some();
    let expanded = dropdown.flatten();

    egui::ScrollArea::vertical()
        .id_salt(id_salt)
        .max_height(TABLE_MAX_HEIGHT)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            egui::Grid::new(id_salt)
                .num_columns(if with_menus { 4 } else { 3 })
                .striped(true)
                .spacing([18.0, 4.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("WP").strong());
                    ui.label(RichText::new("Coordinates").strong());
                    ui.label(RichText::new("Distance").strong());
                    if with_menus {
                        ui.label("");
                    }
                    ui.end_row();

                    for (idx, row) in table.rows.iter().enumerate() {
                        ui.monospace(row.label());
                        ui.monospace(row.coordinates_label());
                        ui.monospace(row.distance_label());
                        if with_menus {
                            let open = expanded == Some(idx);
                            if ui
                                .selectable_label(open, icons::ICON_ROW_MENU)
                                .on_hover_text("Row actions")
                                .clicked()
                            {
                                action = Some(RowAction::ToggleDropdown(idx));
                            }
                        }
                        ui.end_row();

                        if with_menus && expanded == Some(idx) {
                            ui.label("");
                            ui.horizontal(|ui| {
                                if ui.button("Insert Polygon Before").clicked() {
                                    action = Some(RowAction::Insert(idx, InsertPosition::Before));
                                }
                                if ui.button("Insert Polygon After").clicked() {
                                    action = Some(RowAction::Insert(idx, InsertPosition::After));
                                }
                            });
                            ui.label("");
                            ui.label("");
                            ui.end_row();
                        }
                    }
                });
        });

    ui.add_space(4.0);
    ui.label(
        RichText::new(format!(
            "{} waypoints, total {}",
            table.rows.len(),
            format_distance(table.total_distance_m())
        ))
        .small(),
    );
    action
}
