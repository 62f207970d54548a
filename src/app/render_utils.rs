use eframe::egui::{
    Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, StrokeKind, Vec2, epaint,
};

use super::scene::{RenderPrimitive, Scene};

const COLUMN_FILL: Color32 = Color32::from_rgba_premultiplied(57, 58, 58, 64);
const DIVIDER_COLOR: Color32 = Color32::from_rgba_premultiplied(64, 64, 64, 128);
const ARROW_LENGTH: f32 = 0.45;
const ARROW_HALF_WIDTH: f32 = 0.18;

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Pos2) -> Pos2 {
    rect.center() + pan + world.to_vec2() * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Pos2 {
    ((screen - rect.center() - pan) / zoom).to_pos2()
}

fn rect_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Rect) -> Rect {
    Rect::from_min_max(
        world_to_screen(rect, pan, zoom, world.min),
        world_to_screen(rect, pan, zoom, world.max),
    )
}

pub(super) fn rect_visible(view: Rect, rect: Rect) -> bool {
    view.intersects(rect)
}

pub(super) fn fit_view(rect: Rect, bounds: Rect) -> (Vec2, f32) {
    if !bounds.is_positive() || !rect.is_positive() {
        return (Vec2::ZERO, 1.0);
    }

    let zoom = (rect.width() / bounds.width()).min(rect.height() / bounds.height()) * 0.96;
    (-bounds.center().to_vec2() * zoom, zoom)
}

fn arrow_head(control: Pos2, tip: Pos2, zoom: f32) -> Option<[Pos2; 3]> {
    let direction = (tip - control).normalized();
    if !direction.is_finite() || direction == Vec2::ZERO {
        return None;
    }

    let back = tip - direction * ARROW_LENGTH * zoom;
    let side = direction.rot90() * ARROW_HALF_WIDTH * zoom;
    Some([tip, back + side, back - side])
}

pub(super) fn paint_scene(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32, scene: &Scene) {
    painter.rect_filled(rect, 0.0, Color32::WHITE);
    let to_screen = |world: Pos2| world_to_screen(rect, pan, zoom, world);
    let text_size = |size: f32| (size * zoom).clamp(6.0, 28.0);

    for primitive in &scene.primitives {
        match primitive {
            RenderPrimitive::ColumnBackground { rect: column, title } => {
                let column = rect_to_screen(rect, pan, zoom, *column);
                if !rect_visible(rect, column) {
                    continue;
                }
                painter.rect_filled(column, 0.5 * zoom, COLUMN_FILL);
                painter.text(
                    column.center_top() + Vec2::new(0.0, 0.4 * zoom),
                    Align2::CENTER_TOP,
                    title,
                    FontId::proportional(text_size(0.55)),
                    Color32::from_gray(20),
                );
            }
            RenderPrimitive::ColumnDivider { x, top, bottom } => {
                let start = to_screen(Pos2::new(*x, *top));
                let end = to_screen(Pos2::new(*x, *bottom));
                painter.extend(Shape::dashed_line(
                    &[start, end],
                    Stroke::new(0.9, DIVIDER_COLOR),
                    6.0,
                    4.0,
                ));
            }
            RenderPrimitive::Edge { points, style, .. } => {
                let [start, control, end] = points.map(&to_screen);
                let stroke = Stroke::new(style.width, style.stroke);
                painter.add(epaint::QuadraticBezierShape::from_points_stroke(
                    [start, control, end],
                    false,
                    Color32::TRANSPARENT,
                    stroke,
                ));
                if let Some(head) = arrow_head(control, end, zoom) {
                    painter.add(Shape::convex_polygon(head.to_vec(), style.stroke, Stroke::NONE));
                }
            }
            RenderPrimitive::CourseBox { rect: course, style, .. } => {
                let course = rect_to_screen(rect, pan, zoom, *course);
                if !rect_visible(rect, course) {
                    continue;
                }
                let rounding = 0.1 * zoom;
                painter.rect_filled(course, rounding, style.fill);
                painter.rect_stroke(
                    course,
                    rounding,
                    Stroke::new(style.width, style.stroke),
                    StrokeKind::Middle,
                );
            }
            RenderPrimitive::HeatmapCell { rect: cell, color } => {
                let cell = rect_to_screen(rect, pan, zoom, *cell);
                if !rect_visible(rect, cell) {
                    continue;
                }
                painter.rect_filled(cell, 0.0, *color);
                painter.rect_stroke(
                    cell,
                    0.0,
                    Stroke::new(0.3, Color32::WHITE),
                    StrokeKind::Inside,
                );
            }
            RenderPrimitive::Label {
                anchor,
                text,
                style,
                ..
            } => {
                painter.text(
                    to_screen(*anchor),
                    Align2::CENTER_CENTER,
                    text,
                    FontId::monospace(text_size(0.32)),
                    style.stroke,
                );
            }
        }
    }
}
