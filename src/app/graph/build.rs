use std::sync::Arc;

use crate::layout::layered_layout;

use super::super::interaction::InteractionController;
use super::super::scene::build_scene;
use super::super::{HeatmapOrdering, ViewModel};

impl ViewModel {
    pub(in crate::app) fn rebuild_scene(&mut self) {
        let previous_selection = self
            .controller
            .take()
            .and_then(|controller| controller.selected().map(str::to_owned));

        let layout = layered_layout(
            &self.dag,
            self.config.horizontal_spacing,
            self.config.vertical_spacing,
            self.config.column_margin,
        );
        let scene = build_scene(&self.dag, &layout, &self.catalog, self.ordering, &self.config);
        log::info!(
            "built scene: {} primitives across {} columns, heatmap order {:?}",
            scene.primitives.len(),
            layout.columns.len(),
            self.ordering
        );

        let mut controller = InteractionController::new(
            Arc::clone(&self.dag),
            scene,
            self.config.label_pick_radius,
        );
        if let Some(code) = previous_selection {
            controller.select(&code);
        }

        self.controller = Some(controller);
        self.scene_dirty = false;
    }

    pub(in crate::app) fn set_heatmap_ordering(&mut self, ordering: HeatmapOrdering) {
        if self.ordering == ordering {
            return;
        }

        self.ordering = ordering;
        self.scene_dirty = true;
    }
}
