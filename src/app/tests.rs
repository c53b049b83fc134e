use super::*;
use crate::draw::{DrawMode, GeometryKind};
use crate::geo::LonLat;

fn app() -> MissionApp {
    let mut config = AppConfig::default();
    config.map.smooth_fly = false;
    MissionApp::with_config(config)
}

fn draw_triangle(app: &mut MissionApp) {
    for p in [
        LonLat::new(-100.0, 35.0),
        LonLat::new(-99.0, 35.0),
        LonLat::new(-99.5, 36.0),
    ] {
        assert!(app.click_map(p));
    }
    app.finish_sketch();
}

fn draw_line(app: &mut MissionApp) {
    app.draw_line_string();
    app.click_map(LonLat::new(0.0, 0.0));
    app.click_map(LonLat::new(0.0, 1.0));
    app.handle_enter();
}

#[test]
fn generate_without_features_alerts_and_opens_nothing() {
    let mut app = app();
    app.generate_modal_data();
    assert_eq!(app.modals.alert.as_deref(), Some("No features drawn!"));
    assert!(!app.modals.mission_open);
    assert!(app.modals.mission.is_none());

    app.handle_escape();
    assert!(app.modals.alert.is_none());
}

#[test]
fn draw_buttons_set_mode_and_cursor() {
    let mut app = app();
    app.draw_polygon();
    assert_eq!(app.draw.mode(), DrawMode::DrawPolygon);
    assert_eq!(app.ui.cursor, MapCursor::Crosshair);
    app.draw_line_string();
    assert_eq!(app.draw.mode(), DrawMode::DrawLineString);
    assert_eq!(app.ui.cursor, MapCursor::Pointer);
    app.handle_escape();
    assert_eq!(app.draw.mode(), DrawMode::SimpleSelect);
    assert_eq!(app.ui.cursor, MapCursor::Default);
}

#[test]
fn clicks_outside_draw_mode_add_nothing() {
    let mut app = app();
    assert!(!app.click_map(LonLat::new(1.0, 1.0)));
    assert!(app.draw.sketch().is_empty());
}

#[test]
fn enter_finishes_then_generates() {
    let mut app = app();
    draw_line(&mut app);
    assert_eq!(app.draw.features().len(), 1);
    assert_eq!(app.draw.mode(), DrawMode::SimpleSelect);
    assert_eq!(app.ui.cursor, MapCursor::Default);
    assert!(!app.modals.mission_open);

    app.handle_enter();
    assert!(app.modals.mission_open);
    let table = app.modals.mission.as_ref().expect("mission table");
    assert_eq!(table.kind, GeometryKind::LineString);
    assert_eq!(table.title, "LineString Waypoints");
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[1].distance_label(), "111194.93");
}

#[test]
fn polygon_mission_table_has_closing_row() {
    let mut app = app();
    app.draw_polygon();
    draw_triangle(&mut app);
    app.generate_modal_data();
    let table = app.modals.mission.as_ref().expect("mission table");
    assert_eq!(table.title, "Polygon Waypoints");
    assert_eq!(table.rows.len(), 4);
    assert_eq!(table.rows[3].position, table.rows[0].position);
}

#[test]
fn short_sketch_is_discarded() {
    let mut app = app();
    app.draw_polygon();
    app.click_map(LonLat::new(0.0, 0.0));
    app.click_map(LonLat::new(1.0, 0.0));
    app.handle_enter();
    assert!(app.draw.is_empty());
    assert_eq!(app.draw.mode(), DrawMode::SimpleSelect);
    assert!(app.ui.last_status.as_deref().is_some_and(|s| s.contains("discarded")));
}

#[test]
fn polygon_tool_opens_on_next_polygon_only() {
    let mut app = app();
    draw_line(&mut app);
    app.generate_modal_data();
    assert!(app.modals.mission_open);

    app.polygon_tool_click();
    assert!(app.modals.polygon_tool_armed);
    assert_eq!(app.draw.mode(), DrawMode::DrawPolygon);
    draw_triangle(&mut app);

    assert!(!app.modals.polygon_tool_armed);
    assert!(app.modals.polygon_tool_open);
    assert!(!app.modals.mission_open);
    let table = app.modals.polygon_tool.as_ref().expect("polygon tool table");
    assert_eq!(table.title, "Polygon Tool Coordinates");
    assert_eq!(table.rows.len(), 4);

    app.close_polygon_tool_modal();
    app.draw_polygon();
    draw_triangle(&mut app);
    assert!(!app.modals.polygon_tool_open);
}

#[test]
fn polygon_tool_is_disarmed_by_a_line() {
    let mut app = app();
    app.polygon_tool_click();
    draw_line(&mut app);
    assert!(!app.modals.polygon_tool_armed);
    assert!(!app.modals.polygon_tool_open);
    assert!(app.modals.polygon_tool.is_none());
}

#[test]
fn delete_all_clears_mission_data_and_closes_modal() {
    let mut app = app();
    draw_line(&mut app);
    app.generate_modal_data();
    app.on_dropdown_click(1);
    app.delete_all_features();
    assert!(app.draw.is_empty());
    assert!(app.modals.mission.is_none());
    assert!(!app.modals.mission_open);
    assert!(app.modals.dropdown_visible.is_none());

    app.generate_modal_data();
    assert_eq!(app.modals.alert.as_deref(), Some("No features drawn!"));
}

#[test]
fn dropdown_toggles_one_row_at_a_time() {
    let mut app = app();
    app.on_dropdown_click(2);
    assert_eq!(app.modals.dropdown_visible, Some(2));
    app.on_dropdown_click(0);
    assert_eq!(app.modals.dropdown_visible, Some(0));
    app.on_dropdown_click(0);
    assert_eq!(app.modals.dropdown_visible, None);
}

#[test]
fn insert_polygon_flies_to_row_and_starts_drawing() {
    let mut app = app();
    draw_line(&mut app);
    app.generate_modal_data();
    app.on_dropdown_click(1);

    app.insert_polygon(1, InsertPosition::After);
    assert_eq!(app.draw.mode(), DrawMode::DrawPolygon);
    assert_eq!(app.ui.cursor, MapCursor::Crosshair);
    assert!(app.modals.dropdown_visible.is_none());
    assert!((app.map.zoom() - INSERT_FLY_ZOOM).abs() < 1e-9);
    assert!((app.map.center().lat - 1.0).abs() < 1e-9);
    assert!(app.map.center().lon.abs() < 1e-9);
    assert!(app.modals.mission.is_some());
    assert!(app.ui.last_status.as_deref().is_some_and(|s| s.contains("after WP 01")));
}

#[test]
fn insert_polygon_for_missing_row_is_ignored() {
    let mut app = app();
    app.insert_polygon(5, InsertPosition::Before);
    assert_eq!(app.draw.mode(), DrawMode::SimpleSelect);
}

#[test]
fn escape_closes_modals_before_canceling() {
    let mut app = app();
    draw_line(&mut app);
    app.generate_modal_data();
    app.draw_polygon();
    app.click_map(LonLat::new(3.0, 3.0));

    app.handle_escape();
    assert!(!app.modals.mission_open);
    assert_eq!(app.draw.sketch().len(), 1);
    app.handle_escape();
    assert!(app.draw.sketch().is_empty());
}

#[test]
fn locate_needs_a_home_position() {
    let mut app = app();
    let zoom = app.map.zoom();
    app.locate();
    assert!((app.map.zoom() - zoom).abs() < f64::EPSILON);

    let mut config = AppConfig::default();
    config.map.smooth_fly = false;
    config.map.home = Some([13.4, 52.5]);
    let mut app = MissionApp::with_config(config);
    app.locate();
    assert!((app.map.zoom() - LOCATE_FLY_ZOOM).abs() < 1e-9);
    assert!((app.map.center().lat - 52.5).abs() < 1e-9);
}

#[test]
fn reset_view_returns_to_initial_center() {
    let mut app = app();
    app.map.fly_to(LonLat::new(12.0, 48.0), 11.0);
    app.reset_view();
    assert!((app.map.center().lon + 100.43).abs() < 1e-9);
    assert!((app.map.center().lat - 35.0).abs() < 1e-9);
    assert!((app.map.zoom() - 5.0).abs() < 1e-9);
}

#[test]
fn deleting_a_feature_keeps_the_others() {
    let mut app = app();
    draw_line(&mut app);
    app.draw_polygon();
    draw_triangle(&mut app);
    let first = app.draw.features()[0].id;
    app.delete_feature(first);
    assert_eq!(app.draw.features().len(), 1);
    app.generate_modal_data();
    let table = app.modals.mission.as_ref().expect("mission table");
    assert_eq!(table.kind, GeometryKind::Polygon);
}

#[test]
fn loading_a_drawing_replaces_features_and_tables() {
    let dir = std::env::temp_dir().join(format!(
        "missionmap_app_load_{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0)
    ));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join("route.geojson");

    let mut app = app();
    draw_line(&mut app);
    app.save_drawing_to_path(&path);
    app.generate_modal_data();
    app.delete_all_features();
    app.draw_polygon();
    draw_triangle(&mut app);

    app.load_drawing_from_path(&path);
    assert_eq!(app.draw.features().len(), 1);
    assert_eq!(
        app.draw.features()[0].geometry.kind(),
        GeometryKind::LineString
    );
    assert!(app.modals.mission.is_none());
    assert_eq!(app.last_drawing_path.as_deref(), Some(path.as_path()));

    app.load_drawing_from_path(&dir.join("missing.geojson"));
    assert_eq!(app.draw.features().len(), 1);
    assert!(app.ui.last_status.as_deref().is_some_and(|s| s.starts_with("Failed to load")));
}

#[test]
fn map_zoom_keys_leave_ui_zoom_chords_alone() {
    assert!(is_map_zoom_modifiers(Modifiers::NONE));
    assert!(is_map_zoom_modifiers(Modifiers::SHIFT));
    assert!(!is_map_zoom_modifiers(Modifiers::CTRL));
    assert!(!is_map_zoom_modifiers(Modifiers::COMMAND));
    assert!(!is_map_zoom_modifiers(Modifiers::ALT));
}

#[test]
fn map_input_is_ignored_while_the_notice_is_up() {
    let mut app = app();
    app.draw_polygon();
    assert!(app.click_map(LonLat::new(0.0, 0.0)));
    app.generate_modal_data();
    assert!(app.input_blocked());

    assert!(!app.click_map(LonLat::new(1.0, 0.0)));
    app.finish_sketch();
    assert_eq!(app.draw.sketch().len(), 1);
    assert_eq!(app.draw.mode(), DrawMode::DrawPolygon);

    app.dismiss_alert();
    assert!(app.click_map(LonLat::new(1.0, 0.0)));
}
