use std::sync::Arc;

use eframe::egui::{self, Align, Context, Layout, Vec2};

use crate::catalog::{Catalog, CourseSource};
use crate::config::LayoutConfig;
use crate::curriculum::CourseDag;

use super::super::interaction::HoverState;
use super::super::{HeatmapOrdering, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(
        catalog: Catalog,
        catalog_name: String,
        config: LayoutConfig,
        ordering: HeatmapOrdering,
    ) -> Self {
        let dag = Arc::new(CourseDag::from_courses(catalog.courses()));
        log::info!(
            "course graph: {} courses, {} prerequisite edges",
            dag.node_count(),
            dag.edge_count()
        );

        Self {
            catalog,
            catalog_name,
            dag,
            config,
            ordering,
            scene_dirty: true,
            controller: None,
            selected_course: None,
            search: String::new(),
            pan: Vec2::ZERO,
            zoom: 20.0,
            fit_pending: true,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        if self.scene_dirty {
            self.rebuild_scene();
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Curriculum map");
                    ui.separator();
                    ui.label(format!("catalog: {}", self.catalog_name));
                    if ui.button("Fit view").clicked() {
                        self.fit_pending = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(HoverState::Hovering { code, highlighted }) =
                            self.controller.as_ref().map(|controller| controller.hover())
                        {
                            ui.label(format!("{code}: chain of {} courses", highlighted.len()));
                        }
                    });
                });
            });

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));
    }

    pub(in crate::app) fn on_course_selected(&mut self, code: &str) {
        let Some(record) = self.catalog.course(code) else {
            return;
        };

        if let Some(controller) = self.controller.as_mut() {
            controller.select(code);
        }
        log::debug!("selected {code}");
        self.selected_course = Some(record.clone());
    }
}
