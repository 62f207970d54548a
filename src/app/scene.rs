use std::collections::BTreeSet;

use eframe::egui::{Color32, Pos2, Rect, Vec2, pos2, vec2};

use crate::catalog::CourseSource;
use crate::config::LayoutConfig;
use crate::curriculum::CourseDag;
use crate::layout::LayeredLayout;

use super::heatmap::{HeatmapOrdering, grade_samples, heatmap_cells};

const EDGE_CURVATURE: f32 = 0.08;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PrimitiveStyle {
    pub(crate) fill: Color32,
    pub(crate) stroke: Color32,
    pub(crate) width: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StyleRole {
    Default,
    OnPath,
    Active,
}

impl StyleRole {
    pub(crate) fn box_style(self) -> PrimitiveStyle {
        match self {
            Self::Default => PrimitiveStyle {
                fill: Color32::WHITE,
                stroke: Color32::BLACK,
                width: 1.3,
            },
            Self::OnPath => PrimitiveStyle {
                fill: Color32::from_rgb(232, 241, 255),
                stroke: Color32::from_rgb(30, 100, 220),
                width: 2.4,
            },
            Self::Active => PrimitiveStyle {
                fill: Color32::from_rgb(255, 243, 224),
                stroke: Color32::from_rgb(230, 120, 0),
                width: 3.0,
            },
        }
    }

    pub(crate) fn label_style(self) -> PrimitiveStyle {
        let stroke = match self {
            Self::Default => Color32::BLACK,
            Self::OnPath => Color32::from_rgb(30, 100, 220),
            Self::Active => Color32::from_rgb(200, 95, 0),
        };
        PrimitiveStyle {
            fill: Color32::TRANSPARENT,
            stroke,
            width: 1.0,
        }
    }

    pub(crate) fn edge_style(self) -> PrimitiveStyle {
        match self {
            Self::Default => PrimitiveStyle {
                fill: Color32::TRANSPARENT,
                stroke: Color32::from_rgb(0x26, 0x26, 0x26),
                width: 1.8,
            },
            Self::OnPath | Self::Active => PrimitiveStyle {
                fill: Color32::TRANSPARENT,
                stroke: Color32::from_rgb(30, 100, 220),
                width: 3.2,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum RenderPrimitive {
    ColumnBackground {
        rect: Rect,
        title: String,
    },
    ColumnDivider {
        x: f32,
        top: f32,
        bottom: f32,
    },
    Edge {
        pick_id: String,
        points: [Pos2; 3],
        style: PrimitiveStyle,
    },
    CourseBox {
        pick_id: String,
        rect: Rect,
        style: PrimitiveStyle,
    },
    HeatmapCell {
        rect: Rect,
        color: Color32,
    },
    Label {
        pick_id: String,
        anchor: Pos2,
        text: String,
        style: PrimitiveStyle,
    },
}

#[derive(Clone, Debug)]
pub(crate) struct Scene {
    pub(crate) primitives: Vec<RenderPrimitive>,
    pub(crate) bounds: Rect,
}

pub(crate) fn edge_pick_id(from: &str, to: &str) -> String {
    format!("{from}->{to}")
}

pub(crate) fn parse_edge_pick_id(pick_id: &str) -> Option<(&str, &str)> {
    pick_id
        .split_once("->")
        .filter(|(from, to)| !from.is_empty() && !to.is_empty())
}

fn to_scene(layout_position: Vec2) -> Pos2 {
    pos2(layout_position.x, -layout_position.y)
}

fn edge_points(from: Pos2, to: Pos2, box_width: f32, box_height: f32) -> Option<[Pos2; 3]> {
    let delta = to - from;
    if delta.length() <= f32::EPSILON {
        return None;
    }

    let mut start = from;
    let mut end = to;
    if delta.x > 0.0 {
        start.x += box_width / 2.0;
        end.x -= box_width / 2.0;
    } else if delta.x < 0.0 {
        start.x -= box_width / 2.0;
        end.x += box_width / 2.0;
    }
    if delta.y > 0.0 {
        start.y += box_height / 2.0;
        end.y -= box_height / 2.0;
    } else if delta.y < 0.0 {
        start.y -= box_height / 2.0;
        end.y += box_height / 2.0;
    }

    let span = end - start;
    let control = start + span * 0.5 + vec2(span.y, -span.x) * EDGE_CURVATURE;
    Some([start, control, end])
}

pub(crate) fn build_scene(
    dag: &CourseDag,
    layout: &LayeredLayout,
    source: &dyn CourseSource,
    ordering: HeatmapOrdering,
    config: &LayoutConfig,
) -> Scene {
    let mut primitives = Vec::new();
    let spacing = config.horizontal_spacing;
    let top = -layout.y_max;
    let bottom = -layout.y_min;

    for &semester in &layout.columns {
        let x = layout.column_x(semester, spacing);
        primitives.push(RenderPrimitive::ColumnBackground {
            rect: Rect::from_min_max(pos2(x - spacing / 2.0, top), pos2(x + spacing / 2.0, bottom)),
            title: format!("Sem {semester}"),
        });
    }

    for &semester in layout.columns.iter().skip(1) {
        primitives.push(RenderPrimitive::ColumnDivider {
            x: layout.column_x(semester, spacing) - spacing / 2.0,
            top,
            bottom,
        });
    }

    for (from, to) in dag.edges() {
        let (Some(&from_position), Some(&to_position)) =
            (layout.positions.get(from), layout.positions.get(to))
        else {
            continue;
        };
        let Some(points) = edge_points(
            to_scene(from_position),
            to_scene(to_position),
            config.box_width,
            config.box_height,
        ) else {
            continue;
        };

        primitives.push(RenderPrimitive::Edge {
            pick_id: edge_pick_id(from, to),
            points,
            style: StyleRole::Default.edge_style(),
        });
    }

    let box_size = vec2(config.box_width, config.box_height);
    let heatmap_size = vec2(config.box_width * 0.9, config.box_height * 0.65);
    let mut labels = Vec::new();

    for node in dag.nodes() {
        let Some(&position) = layout.positions.get(&node.code) else {
            continue;
        };
        let center = to_scene(position);

        primitives.push(RenderPrimitive::CourseBox {
            pick_id: node.code.clone(),
            rect: Rect::from_center_size(center, box_size),
            style: StyleRole::Default.box_style(),
        });

        let heatmap_bounds = Rect::from_center_size(
            center - vec2(0.0, config.box_height * 0.15),
            heatmap_size,
        );
        let samples = grade_samples(source, &node.code);
        for cell in heatmap_cells(&samples, heatmap_bounds, ordering) {
            primitives.push(RenderPrimitive::HeatmapCell {
                rect: cell.rect,
                color: cell.color,
            });
        }

        labels.push(RenderPrimitive::Label {
            pick_id: node.code.clone(),
            anchor: center + vec2(0.0, config.box_height * 0.4),
            text: node.code.clone(),
            style: StyleRole::Default.label_style(),
        });
    }
    primitives.extend(labels);

    let first_x = layout.columns.first().copied().unwrap_or(1);
    let last_x = layout.columns.last().copied().unwrap_or(1);
    let bounds = Rect::from_min_max(
        pos2(
            layout.column_x(first_x, spacing) - spacing / 1.5,
            top - 0.8,
        ),
        pos2(
            layout.column_x(last_x, spacing) + spacing / 1.5,
            bottom + 0.8,
        ),
    );

    Scene { primitives, bounds }
}

impl Scene {
    // Returns how many primitives changed style.
    pub(crate) fn apply_highlight(
        &mut self,
        hovered: Option<&str>,
        highlighted: &BTreeSet<String>,
    ) -> usize {
        let node_role = |code: &str| {
            if hovered == Some(code) {
                StyleRole::Active
            } else if highlighted.contains(code) {
                StyleRole::OnPath
            } else {
                StyleRole::Default
            }
        };

        let mut changed = 0;
        for primitive in &mut self.primitives {
            let (style, next) = match primitive {
                RenderPrimitive::CourseBox { pick_id, style, .. } => {
                    (style, node_role(pick_id.as_str()).box_style())
                }
                RenderPrimitive::Label { pick_id, style, .. } => {
                    (style, node_role(pick_id.as_str()).label_style())
                }
                RenderPrimitive::Edge { pick_id, style, .. } => {
                    let Some((from, to)) = parse_edge_pick_id(pick_id) else {
                        continue;
                    };
                    let role = if highlighted.contains(from) && highlighted.contains(to) {
                        StyleRole::OnPath
                    } else {
                        StyleRole::Default
                    };
                    (style, role.edge_style())
                }
                _ => continue,
            };

            if *style != next {
                *style = next;
                changed += 1;
            }
        }

        changed
    }

    pub(crate) fn clear_highlight(&mut self) -> usize {
        self.apply_highlight(None, &BTreeSet::new())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::catalog::{Catalog, CourseRecord, GradeRecord, GradeTable};
    use crate::layout::layered_layout;

    pub(crate) fn course(code: &str, semester: u32, prerequisites: &[&str]) -> CourseRecord {
        CourseRecord {
            code: code.to_owned(),
            name: format!("Course {code}"),
            credits: 4,
            semester,
            prerequisites: prerequisites.iter().map(|p| (*p).to_owned()).collect(),
        }
    }

    pub(crate) fn chain_catalog() -> Catalog {
        let record = |student_id: &str, grade: f32| GradeRecord {
            student_id: student_id.to_owned(),
            class_group: "A".to_owned(),
            grade,
            attendance: 90.0,
        };
        let grades = GradeTable::new(
            [("B".to_owned(), vec![record("1", 8.5), record("3", 4.0)])]
                .into_iter()
                .collect(),
            vec!["1".to_owned(), "2".to_owned(), "3".to_owned()],
        );

        Catalog::new(
            vec![
                course("A", 1, &[]),
                course("B", 2, &["A"]),
                course("C", 3, &["B"]),
            ],
            grades,
        )
    }

    pub(crate) fn edge_style(scene: &Scene, pick: &str) -> Option<PrimitiveStyle> {
        scene.primitives.iter().find_map(|primitive| match primitive {
            RenderPrimitive::Edge { pick_id, style, .. } if pick_id == pick => Some(*style),
            _ => None,
        })
    }

    pub(crate) fn box_style(scene: &Scene, pick: &str) -> Option<PrimitiveStyle> {
        scene.primitives.iter().find_map(|primitive| match primitive {
            RenderPrimitive::CourseBox { pick_id, style, .. } if pick_id == pick => Some(*style),
            _ => None,
        })
    }

    pub(crate) fn scene_for(catalog: &Catalog, ordering: HeatmapOrdering) -> (CourseDag, Scene) {
        let config = LayoutConfig::default();
        let dag = CourseDag::from_courses(catalog.courses());
        let layout = layered_layout(
            &dag,
            config.horizontal_spacing,
            config.vertical_spacing,
            config.column_margin,
        );
        let scene = build_scene(&dag, &layout, catalog, ordering, &config);
        (dag, scene)
    }

    #[test]
    fn primitives_are_in_paint_order() {
        let (_, scene) = scene_for(&chain_catalog(), HeatmapOrdering::Descending);

        let rank = |primitive: &RenderPrimitive| match primitive {
            RenderPrimitive::ColumnBackground { .. } => 0,
            RenderPrimitive::ColumnDivider { .. } => 1,
            RenderPrimitive::Edge { .. } => 2,
            RenderPrimitive::CourseBox { .. } | RenderPrimitive::HeatmapCell { .. } => 3,
            RenderPrimitive::Label { .. } => 4,
        };
        let ranks = scene.primitives.iter().map(rank).collect::<Vec<_>>();
        assert!(ranks.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn heatmap_cells_sit_inside_their_course_box() {
        let (_, scene) = scene_for(&chain_catalog(), HeatmapOrdering::Descending);

        let box_rect = scene
            .primitives
            .iter()
            .find_map(|primitive| match primitive {
                RenderPrimitive::CourseBox { pick_id, rect, .. } if pick_id == "B" => Some(*rect),
                _ => None,
            })
            .unwrap();
        let cells = scene
            .primitives
            .iter()
            .filter_map(|primitive| match primitive {
                RenderPrimitive::HeatmapCell { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect::<Vec<_>>();

        assert_eq!(cells.len(), 3);
        assert!(cells.iter().all(|(rect, _)| box_rect.expand(1e-4).contains_rect(*rect)));
        assert_eq!(cells[2].1, super::super::color::ABSENT_GRADE_COLOR);
    }

    #[test]
    fn edges_leave_and_enter_at_box_borders() {
        let (_, scene) = scene_for(&chain_catalog(), HeatmapOrdering::Descending);

        let points = scene
            .primitives
            .iter()
            .find_map(|primitive| match primitive {
                RenderPrimitive::Edge { pick_id, points, .. } if pick_id == "A->B" => Some(*points),
                _ => None,
            })
            .unwrap();

        assert_eq!(points[0], pos2(8.0 + 1.75, 0.0));
        assert_eq!(points[2], pos2(16.0 - 1.75, 0.0));
    }

    #[test]
    fn columns_get_titles_and_dividers_between_them() {
        let (_, scene) = scene_for(&chain_catalog(), HeatmapOrdering::Descending);

        let titles = scene
            .primitives
            .iter()
            .filter_map(|primitive| match primitive {
                RenderPrimitive::ColumnBackground { title, .. } => Some(title.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>();
        let dividers = scene
            .primitives
            .iter()
            .filter(|primitive| matches!(primitive, RenderPrimitive::ColumnDivider { .. }))
            .count();

        assert_eq!(titles, ["Sem 1", "Sem 2", "Sem 3"]);
        assert_eq!(dividers, 2);
    }

    #[test]
    fn edge_needs_both_endpoints_highlighted() {
        let (_, mut scene) = scene_for(&chain_catalog(), HeatmapOrdering::Descending);
        let highlighted = ["B", "C"].map(str::to_owned).into_iter().collect();

        scene.apply_highlight(Some("C"), &highlighted);

        assert_eq!(edge_style(&scene, "B->C"), Some(StyleRole::OnPath.edge_style()));
        assert_eq!(edge_style(&scene, "A->B"), Some(StyleRole::Default.edge_style()));
        assert_eq!(box_style(&scene, "C"), Some(StyleRole::Active.box_style()));
        assert_eq!(box_style(&scene, "B"), Some(StyleRole::OnPath.box_style()));
        assert_eq!(box_style(&scene, "A"), Some(StyleRole::Default.box_style()));
    }

    #[test]
    fn malformed_edge_ids_are_left_alone() {
        let mut scene = Scene {
            primitives: vec![RenderPrimitive::Edge {
                pick_id: "no arrow here".to_owned(),
                points: [Pos2::ZERO; 3],
                style: StyleRole::Default.edge_style(),
            }],
            bounds: Rect::NOTHING,
        };
        let highlighted = ["no arrow here".to_owned()].into_iter().collect();

        assert_eq!(scene.apply_highlight(None, &highlighted), 0);
        assert_eq!(parse_edge_pick_id("->B"), None);
    }
}
