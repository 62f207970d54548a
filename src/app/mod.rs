use std::sync::Arc;

use eframe::egui::{Context, Vec2};

use crate::catalog::{Catalog, CourseRecord};
use crate::config::LayoutConfig;
use crate::curriculum::CourseDag;

mod color;
mod graph;
mod heatmap;
mod highlight;
mod interaction;
mod render_utils;
mod scene;
mod ui;

pub(crate) use self::heatmap::HeatmapOrdering;
use self::interaction::InteractionController;

pub struct CurriculumApp {
    model: Box<ViewModel>,
}

struct ViewModel {
    catalog: Catalog,
    catalog_name: String,
    dag: Arc<CourseDag>,
    config: LayoutConfig,
    ordering: HeatmapOrdering,
    scene_dirty: bool,
    controller: Option<InteractionController>,
    selected_course: Option<CourseRecord>,
    search: String,
    pan: Vec2,
    zoom: f32,
    fit_pending: bool,
}

impl CurriculumApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        catalog: Catalog,
        catalog_name: String,
        config: LayoutConfig,
        ordering: HeatmapOrdering,
    ) -> Self {
        Self {
            model: Box::new(ViewModel::new(catalog, catalog_name, config, ordering)),
        }
    }
}

impl eframe::App for CurriculumApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.model.show(ctx);
    }
}
