use std::collections::BTreeSet;
use std::sync::Arc;

use eframe::egui::Pos2;

use crate::curriculum::CourseDag;

use super::highlight::longest_connected_path;
use super::scene::Scene;

mod hit;

use self::hit::HitIndex;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum HoverState {
    #[default]
    Idle,
    Hovering {
        code: String,
        highlighted: BTreeSet<String>,
    },
}

impl HoverState {
    pub(crate) fn code(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Hovering { code, .. } => Some(code.as_str()),
        }
    }
}

pub(crate) struct InteractionController {
    dag: Arc<CourseDag>,
    scene: Scene,
    hits: HitIndex,
    hover: HoverState,
    selected: Option<String>,
    restyle_passes: u64,
}

impl InteractionController {
    pub(crate) fn new(dag: Arc<CourseDag>, scene: Scene, label_pick_radius: f32) -> Self {
        let hits = HitIndex::from_scene(&scene, label_pick_radius);
        Self {
            dag,
            scene,
            hits,
            hover: HoverState::Idle,
            selected: None,
            restyle_passes: 0,
        }
    }

    pub(crate) fn scene(&self) -> &Scene {
        &self.scene
    }

    pub(crate) fn hover(&self) -> &HoverState {
        &self.hover
    }

    pub(crate) fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn restyle_passes(&self) -> u64 {
        self.restyle_passes
    }

    pub(crate) fn pick(&self, position: Pos2) -> Option<&str> {
        self.hits.pick(position)
    }

    pub(crate) fn on_pointer_move(&mut self, position: Pos2) -> bool {
        let resolved = self.pick(position).map(str::to_owned);
        self.set_hover(resolved)
    }

    pub(crate) fn on_pointer_leave(&mut self) -> bool {
        self.set_hover(None)
    }

    pub(crate) fn on_click(&mut self, position: Pos2) -> Option<String> {
        let code = self.pick(position)?.to_owned();
        self.select(&code).then_some(code)
    }

    pub(crate) fn select(&mut self, code: &str) -> bool {
        if !self.dag.contains(code) {
            return false;
        }
        self.selected = Some(code.to_owned());
        true
    }

    fn set_hover(&mut self, code: Option<String>) -> bool {
        if self.hover.code() == code.as_deref() {
            return false;
        }

        self.hover = match code {
            Some(code) => {
                let highlighted = longest_connected_path(&self.dag, &code);
                let changed = self.scene.apply_highlight(Some(&code), &highlighted);
                log::debug!(
                    "hovering {code}: {} courses on path, {changed} primitives restyled (pass {})",
                    highlighted.len(),
                    self.restyle_passes + 1
                );
                HoverState::Hovering { code, highlighted }
            }
            None => {
                self.scene.clear_highlight();
                log::debug!("hover cleared");
                HoverState::Idle
            }
        };
        self.restyle_passes += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;
    use crate::app::heatmap::HeatmapOrdering;
    use crate::app::scene::tests::{box_style, chain_catalog, edge_style, scene_for};
    use crate::app::scene::{RenderPrimitive, StyleRole};

    fn controller() -> InteractionController {
        let (dag, scene) = scene_for(&chain_catalog(), HeatmapOrdering::Descending);
        InteractionController::new(Arc::new(dag), scene, 0.9)
    }

    fn box_center(controller: &InteractionController, code: &str) -> Pos2 {
        controller
            .scene()
            .primitives
            .iter()
            .find_map(|primitive| match primitive {
                RenderPrimitive::CourseBox { pick_id, rect, .. } if pick_id == code => {
                    Some(rect.center())
                }
                _ => None,
            })
            .unwrap()
    }

    fn edge_ids(controller: &InteractionController) -> Vec<&str> {
        controller
            .scene()
            .primitives
            .iter()
            .filter_map(|primitive| match primitive {
                RenderPrimitive::Edge { pick_id, .. } => Some(pick_id.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn hovering_middle_course_highlights_whole_chain() {
        let mut controller = controller();
        let b = box_center(&controller, "B");

        assert!(controller.on_pointer_move(b));

        let expected = ["A", "B", "C"].map(str::to_owned).into_iter().collect::<BTreeSet<_>>();
        assert_eq!(
            controller.hover(),
            &HoverState::Hovering {
                code: "B".to_owned(),
                highlighted: expected,
            }
        );
        assert_eq!(edge_ids(&controller), ["A->B", "B->C"]);
        for edge in ["A->B", "B->C"] {
            assert_eq!(
                edge_style(controller.scene(), edge),
                Some(StyleRole::OnPath.edge_style())
            );
        }
        assert_eq!(
            box_style(controller.scene(), "B"),
            Some(StyleRole::Active.box_style())
        );
        assert_eq!(
            box_style(controller.scene(), "A"),
            Some(StyleRole::OnPath.box_style())
        );
    }

    #[test]
    fn repeated_moves_over_the_same_course_are_debounced() {
        let mut controller = controller();
        let b = box_center(&controller, "B");

        assert!(controller.on_pointer_move(b));
        let styled = controller.scene().clone();
        assert!(!controller.on_pointer_move(b + eframe::egui::vec2(0.3, 0.2)));

        assert_eq!(controller.restyle_passes(), 1);
        assert_eq!(controller.scene().primitives, styled.primitives);
    }

    #[test]
    fn moving_to_empty_space_restores_default_styles() {
        let mut controller = controller();
        let pristine = controller.scene().clone();

        controller.on_pointer_move(box_center(&controller, "C"));
        assert!(controller.on_pointer_move(pos2(-100.0, -100.0)));

        assert_eq!(controller.hover(), &HoverState::Idle);
        assert_eq!(controller.scene().primitives, pristine.primitives);
        assert!(!controller.on_pointer_move(pos2(-90.0, -90.0)));
    }

    #[test]
    fn leaving_the_canvas_clears_hover() {
        let mut controller = controller();

        controller.on_pointer_move(box_center(&controller, "A"));
        assert!(controller.on_pointer_leave());
        assert!(!controller.on_pointer_leave());

        assert_eq!(controller.hover().code(), None);
        assert_eq!(controller.restyle_passes(), 2);
    }

    #[test]
    fn switching_courses_restyles_once() {
        let mut controller = controller();

        controller.on_pointer_move(box_center(&controller, "A"));
        assert!(controller.on_pointer_move(box_center(&controller, "C")));

        assert_eq!(controller.hover().code(), Some("C"));
        assert_eq!(
            box_style(controller.scene(), "C"),
            Some(StyleRole::Active.box_style())
        );
        assert_eq!(controller.restyle_passes(), 2);
    }

    #[test]
    fn click_selects_and_empty_click_keeps_selection() {
        let mut controller = controller();

        assert_eq!(
            controller.on_click(box_center(&controller, "C")),
            Some("C".to_owned())
        );
        assert_eq!(controller.on_click(pos2(-100.0, -100.0)), None);

        assert_eq!(controller.selected(), Some("C"));
        assert_eq!(controller.hover(), &HoverState::Idle);
    }

    #[test]
    fn selecting_unknown_code_is_ignored() {
        let mut controller = controller();

        assert!(!controller.select("NOPE"));
        assert_eq!(controller.selected(), None);
    }
}
