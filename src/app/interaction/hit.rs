use eframe::egui::{Pos2, Rect};

use super::super::scene::{RenderPrimitive, Scene};

pub(crate) struct HitIndex {
    boxes: Vec<(Rect, String)>,
    labels: Vec<(Pos2, String)>,
    label_radius: f32,
}

impl HitIndex {
    pub(crate) fn from_scene(scene: &Scene, label_radius: f32) -> Self {
        let mut boxes = Vec::new();
        let mut labels = Vec::new();

        for primitive in &scene.primitives {
            match primitive {
                RenderPrimitive::CourseBox { pick_id, rect, .. } => {
                    boxes.push((*rect, pick_id.clone()));
                }
                RenderPrimitive::Label {
                    pick_id, anchor, ..
                } => {
                    labels.push((*anchor, pick_id.clone()));
                }
                _ => {}
            }
        }

        Self {
            boxes,
            labels,
            label_radius,
        }
    }

    pub(crate) fn pick(&self, position: Pos2) -> Option<&str> {
        if let Some((_, code)) = self.boxes.iter().find(|(rect, _)| rect.contains(position)) {
            return Some(code.as_str());
        }

        let mut nearest: Option<(&str, f32)> = None;
        for (anchor, code) in &self.labels {
            let distance = anchor.distance(position);
            if distance > self.label_radius {
                continue;
            }
            if nearest.is_none_or(|(_, best)| distance < best) {
                nearest = Some((code.as_str(), distance));
            }
        }

        nearest.map(|(code, _)| code)
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{Color32, pos2, vec2};

    use super::*;
    use crate::app::scene::PrimitiveStyle;

    fn style() -> PrimitiveStyle {
        PrimitiveStyle {
            fill: Color32::WHITE,
            stroke: Color32::BLACK,
            width: 1.0,
        }
    }

    fn scene() -> Scene {
        Scene {
            primitives: vec![
                RenderPrimitive::CourseBox {
                    pick_id: "BOX".to_owned(),
                    rect: Rect::from_center_size(pos2(0.0, 0.0), vec2(2.0, 2.0)),
                    style: style(),
                },
                RenderPrimitive::Label {
                    pick_id: "FAR".to_owned(),
                    anchor: pos2(5.0, 0.0),
                    text: "FAR".to_owned(),
                    style: style(),
                },
                RenderPrimitive::Label {
                    pick_id: "NEAR".to_owned(),
                    anchor: pos2(4.0, 0.0),
                    text: "NEAR".to_owned(),
                    style: style(),
                },
                RenderPrimitive::Label {
                    pick_id: "TWIN".to_owned(),
                    anchor: pos2(0.5, 0.0),
                    text: "TWIN".to_owned(),
                    style: style(),
                },
                RenderPrimitive::Edge {
                    pick_id: "BOX->NEAR".to_owned(),
                    points: [pos2(1.0, 0.0), pos2(2.0, 0.0), pos2(3.0, 0.0)],
                    style: style(),
                },
            ],
            bounds: Rect::from_min_max(pos2(-1.0, -1.0), pos2(6.0, 1.0)),
        }
    }

    #[test]
    fn boxes_take_priority_over_labels() {
        let index = HitIndex::from_scene(&scene(), 1.0);

        assert_eq!(index.pick(pos2(0.5, 0.1)), Some("BOX"));
    }

    #[test]
    fn nearest_label_within_radius() {
        let index = HitIndex::from_scene(&scene(), 1.0);

        assert_eq!(index.pick(pos2(4.4, 0.0)), Some("NEAR"));
        assert_eq!(index.pick(pos2(4.6, 0.0)), Some("FAR"));
        assert_eq!(index.pick(pos2(4.5, 0.0)), Some("FAR"));
    }

    #[test]
    fn edges_and_empty_space_do_not_pick() {
        let index = HitIndex::from_scene(&scene(), 0.5);

        assert_eq!(index.pick(pos2(2.0, 0.0)), None);
        assert_eq!(index.pick(pos2(0.0, 5.0)), None);
    }
}
