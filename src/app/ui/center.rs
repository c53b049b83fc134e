use super::super::{MissionApp, POINT_HIT_RADIUS};
use super::icons;
use crate::config::StyleConfig;
use crate::draw::{DrawMode, DrawStore, Geometry};
use crate::geo::LonLat;
use crate::map::{meters_per_pixel, scale_bar};
use egui::{Align2, Color32, CornerRadius, FontId, Pos2, Rect, Response, Shape, Stroke, Vec2, pos2};
use walkers::{Map, MapMemory, Plugin, Projector};

const SCALE_BAR_MAX_PX: f32 = 120.0;
const CANVAS_MARGIN: f32 = 10.0;
/// Wheel zoom speed of the map widget at `scroll_zoom_speed = 1`.
const BASE_ZOOM_SPEED: f64 = 2.0;

/// Pointer input on the map, resolved to geographic positions while the projector is live.
struct CanvasInput {
    click: Option<CanvasClick>,
    double_clicked: bool,
    hover: Option<LonLat>,
    /// Drag, wheel or pinch went to the map.
    gesture: bool,
}

enum CanvasClick {
    /// Hit the vertex that completes the sketch.
    Close,
    Vertex(LonLat),
}

impl MissionApp {
    pub(crate) fn ui_map_canvas(&mut self, ui: &mut egui::Ui) {
        self.handle_dropped_drawings(ui);

        ui.painter().rect_filled(
            ui.available_rect_before_wrap(),
            CornerRadius::ZERO,
            self.config.style.background_color(),
        );
        let attribution = self.map.attribution().map(|a| a.text);
        let zoom_speed = BASE_ZOOM_SPEED * self.config.map.scroll_zoom_factor();
        let draw = &self.draw;
        let layer = DrawingLayer {
            draw,
            style: &self.config.style,
        };

        let (tiles, memory, anchor) = self.map.widget_parts();
        let shown = Map::new(tiles, memory, anchor)
            .zoom_with_ctrl(false)
            .double_click_to_zoom(false)
            .zoom_speed(zoom_speed)
            .with_plugin(layer)
            .show(ui, |ui, response, projector, _memory| {
                paint_scale_bar(ui.painter(), response.rect, projector);
                if let Some(text) = attribution {
                    paint_attribution(ui.painter(), response.rect, text);
                }
                read_input(ui, response, projector, draw)
            });

        let rect = shown.response.rect;
        self.last_viewport = Some(rect);
        self.apply_canvas_input(shown.inner);
        self.ui_nav_controls(ui.ctx(), rect);
        shown.response.on_hover_cursor(self.cursor_icon());
    }

    fn handle_dropped_drawings(&mut self, ui: &egui::Ui) {
        let dropped = ui.input(|i| i.raw.dropped_files.clone());
        if let Some(path) = dropped.iter().find_map(|f| f.path.clone()) {
            log::debug!("dropped file {}", path.display());
            self.load_drawing_from_path(&path);
        } else if !dropped.is_empty() {
            self.set_status("Drop failed: only files with a path can be opened.");
        }
    }

    fn apply_canvas_input(&mut self, input: CanvasInput) {
        self.cursor_position = input.hover;
        self.map.after_gestures(input.gesture);
        match input.click {
            Some(CanvasClick::Close) => self.finish_sketch(),
            Some(CanvasClick::Vertex(point)) => {
                self.click_map(point);
            }
            None => {}
        }
        if input.double_clicked {
            self.finish_sketch();
        }
    }

    /// Zoom, reset and locate buttons floating over the top-right corner of the map.
    fn ui_nav_controls(&mut self, ctx: &egui::Context, rect: Rect) {
        let has_home = self.config.map.home().is_some();
        egui::Area::new(egui::Id::new("map_nav_controls"))
            .fixed_pos(pos2(rect.right() - 44.0, rect.top() + CANVAS_MARGIN))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        if ui
                            .button(icons::ICON_ZOOM_IN)
                            .on_hover_text("Zoom in (+)")
                            .clicked()
                        {
                            self.map.zoom_in();
                        }
                        if ui
                            .button(icons::ICON_ZOOM_OUT)
                            .on_hover_text("Zoom out (-)")
                            .clicked()
                        {
                            self.map.zoom_out();
                        }
                        if ui
                            .button(icons::ICON_RESET_VIEW)
                            .on_hover_text("Reset to the initial view")
                            .clicked()
                        {
                            self.reset_view();
                        }
                        let locate_hint = if has_home {
                            "Fly to the home position"
                        } else {
                            "Set [map] home in missionmap.toml to enable"
                        };
                        if ui
                            .add_enabled(has_home, egui::Button::new(icons::ICON_LOCATE))
                            .on_hover_text(locate_hint)
                            .on_disabled_hover_text(locate_hint)
                            .clicked()
                        {
                            self.locate();
                        }
                    });
                });
            });
    }
}

fn read_input(
    ui: &egui::Ui,
    response: &Response,
    projector: &Projector,
    draw: &DrawStore,
) -> CanvasInput {
    let to_lonlat = |pos: Pos2| LonLat::from(projector.unproject(pos.to_vec2()));
    let click = if response.clicked() && draw.mode().is_drawing() {
        response.interact_pointer_pos().map(|pos| {
            if closing_vertex_hit(draw, projector, pos) {
                CanvasClick::Close
            } else {
                CanvasClick::Vertex(to_lonlat(pos))
            }
        })
    } else {
        None
    };
    let wheel_or_pinch = ui.input(|i| {
        i.smooth_scroll_delta != Vec2::ZERO || (i.zoom_delta() - 1.0).abs() > f32::EPSILON
    });
    CanvasInput {
        click,
        double_clicked: response.double_clicked(),
        hover: response.hover_pos().map(to_lonlat),
        gesture: response.dragged() || (response.hovered() && wheel_or_pinch),
    }
}

/// Whether `pos` is on the vertex that completes the sketch: the first one for a
/// polygon, the last one for a line.
fn closing_vertex_hit(draw: &DrawStore, projector: &Projector, pos: Pos2) -> bool {
    if !draw.can_finish() {
        return false;
    }
    let sketch = draw.sketch();
    let target = match draw.mode() {
        DrawMode::DrawPolygon => sketch.first(),
        DrawMode::DrawLineString => sketch.last(),
        DrawMode::SimpleSelect => None,
    };
    target.is_some_and(|p| screen_point(projector, *p).distance(pos) <= POINT_HIT_RADIUS)
}

fn screen_point(projector: &Projector, point: LonLat) -> Pos2 {
    projector.project(point.into()).to_pos2()
}

fn screen_points(projector: &Projector, points: &[LonLat]) -> Vec<Pos2> {
    points.iter().map(|p| screen_point(projector, *p)).collect()
}

/// Map plugin painting finished features and the sketch over the basemap.
struct DrawingLayer<'a> {
    draw: &'a DrawStore,
    style: &'a StyleConfig,
}

impl Plugin for DrawingLayer<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &Response,
        projector: &Projector,
        _map_memory: &MapMemory,
    ) {
        let painter = ui.painter().with_clip_rect(response.rect);
        self.paint_features(&painter, projector);
        self.paint_sketch(&painter, projector, response.hover_pos());
    }
}

impl DrawingLayer<'_> {
    fn paint_features(&self, painter: &egui::Painter, projector: &Projector) {
        for feature in self.draw.features() {
            let points = screen_points(projector, feature.geometry.coordinates());
            match &feature.geometry {
                Geometry::Polygon(_) => {
                    let stroke = self.style.polygon.stroke();
                    // Ring without the repeated closing vertex.
                    let ring = &points[..points.len().saturating_sub(1)];
                    if is_convex(ring) {
                        painter.add(Shape::convex_polygon(
                            ring.to_vec(),
                            self.style.polygon_fill(),
                            stroke,
                        ));
                    } else {
                        painter.add(Shape::closed_line(ring.to_vec(), stroke));
                    }
                    self.paint_vertices(painter, ring, stroke.color);
                }
                Geometry::LineString(_) => {
                    let stroke = self.style.line_string.stroke();
                    painter.add(Shape::line(points.clone(), stroke));
                    self.paint_vertices(painter, &points, stroke.color);
                }
            }
        }
    }

    fn paint_vertices(&self, painter: &egui::Painter, points: &[Pos2], outline: Color32) {
        let vertex = &self.style.vertex;
        for p in points {
            painter.circle(*p, vertex.radius(), vertex.color32(), Stroke::new(1.5, outline));
        }
    }

    fn paint_sketch(&self, painter: &egui::Painter, projector: &Projector, hover: Option<Pos2>) {
        let mode = self.draw.mode();
        if !mode.is_drawing() {
            return;
        }
        let stroke = self.style.sketch.stroke();
        let points = screen_points(projector, self.draw.sketch());
        if points.len() >= 2 {
            painter.add(Shape::line(points.clone(), stroke));
        }
        if let (Some(last), Some(cursor)) = (points.last(), hover) {
            painter.extend(Shape::dashed_line(&[*last, cursor], stroke, 6.0, 4.0));
            if mode == DrawMode::DrawPolygon
                && points.len() >= 2
                && let Some(first) = points.first()
            {
                painter.extend(Shape::dashed_line(&[cursor, *first], stroke, 6.0, 4.0));
            }
        }
        self.paint_vertices(painter, &points, stroke.color);

        if let Some(cursor) = hover
            && closing_vertex_hit(self.draw, projector, cursor)
        {
            let target = match mode {
                DrawMode::DrawPolygon => points.first(),
                _ => points.last(),
            };
            if let Some(p) = target {
                painter.circle_stroke(*p, POINT_HIT_RADIUS, stroke);
            }
        }
    }
}

fn paint_scale_bar(painter: &egui::Painter, rect: Rect, projector: &Projector) {
    let center = LonLat::from(projector.unproject(rect.center().to_vec2()));
    let Some(bar) = scale_bar(meters_per_pixel(projector, center), SCALE_BAR_MAX_PX) else {
        return;
    };
    let color = Color32::from_gray(40);
    let stroke = Stroke::new(2.0, color);
    let left = pos2(rect.left() + CANVAS_MARGIN, rect.bottom() - CANVAS_MARGIN);
    let right = pos2(left.x + bar.pixels, left.y);
    let tick = egui::vec2(0.0, -6.0);
    painter.line_segment([left, right], stroke);
    painter.line_segment([left, left + tick], stroke);
    painter.line_segment([right, right + tick], stroke);
    painter.text(
        pos2(left.x + 2.0, left.y - 8.0),
        Align2::LEFT_BOTTOM,
        bar.label,
        FontId::proportional(11.0),
        color,
    );
}

/// Tile credit in the bottom-right corner.
fn paint_attribution(painter: &egui::Painter, rect: Rect, text: &str) {
    let color = Color32::from_gray(50);
    let galley = painter.layout_no_wrap(format!("© {text}"), FontId::proportional(10.0), color);
    let padding = egui::vec2(4.0, 2.0);
    let size = galley.size() + 2.0 * padding;
    let min = rect.right_bottom() - size;
    painter.rect_filled(
        Rect::from_min_size(min, size),
        CornerRadius::same(2),
        Color32::from_white_alpha(190),
    );
    painter.galley(min + padding, galley, color);
}

/// Whether a closed ring (without repeated last vertex) is convex, so egui can fill it.
fn is_convex(ring: &[Pos2]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut positive: Option<bool> = None;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        let c = ring[(i + 2) % ring.len()];
        let cross = (b - a).x.mul_add((c - b).y, -((b - a).y * (c - b).x));
        if cross.abs() <= f32::EPSILON {
            continue;
        }
        match positive {
            None => positive = Some(cross > 0.0),
            Some(p) if p != (cross > 0.0) => return false,
            Some(_) => {}
        }
    }
    positive.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapView;

    fn viewport() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    #[test]
    fn convexity_of_rings() {
        let square = [pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(10.0, 10.0), pos2(0.0, 10.0)];
        assert!(is_convex(&square));
        let arrow = [
            pos2(0.0, 0.0),
            pos2(10.0, 5.0),
            pos2(0.0, 10.0),
            pos2(4.0, 5.0),
        ];
        assert!(!is_convex(&arrow));
        assert!(!is_convex(&square[..2]));
        // Collinear vertices do not break convexity.
        let with_midpoint = [
            pos2(0.0, 0.0),
            pos2(5.0, 0.0),
            pos2(10.0, 0.0),
            pos2(10.0, 10.0),
        ];
        assert!(is_convex(&with_midpoint));
    }

    #[test]
    fn closing_vertex_depends_on_mode() {
        let view = MapView::new(LonLat::new(0.0, 0.0), 10.0, false);
        let projector = view.projector(viewport());
        let points = [
            LonLat::new(-0.1, 0.0),
            LonLat::new(0.1, 0.0),
            LonLat::new(0.0, 0.1),
        ];

        let mut draw = DrawStore::new();
        draw.change_mode(DrawMode::DrawPolygon);
        draw.add_vertex(points[0]);
        draw.add_vertex(points[1]);
        let first = screen_point(&projector, points[0]);
        assert!(!closing_vertex_hit(&draw, &projector, first));
        draw.add_vertex(points[2]);
        assert!(closing_vertex_hit(&draw, &projector, first + egui::vec2(3.0, 3.0)));
        let last = screen_point(&projector, points[2]);
        assert!(!closing_vertex_hit(&draw, &projector, last));

        draw.change_mode(DrawMode::DrawLineString);
        draw.add_vertex(points[0]);
        draw.add_vertex(points[1]);
        let end = screen_point(&projector, points[1]);
        assert!(closing_vertex_hit(&draw, &projector, end));
        assert!(!closing_vertex_hit(&draw, &projector, first));
    }
}
