use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Stroke, StrokeKind, Ui, vec2};

use crate::catalog::CourseSource;

use super::super::color::{color_hex, grade_color};
use super::super::{HeatmapOrdering, ViewModel};
use super::search::search_courses;

const LEGEND_GRADES: [f32; 6] = [0.0, 2.0, 4.0, 6.0, 8.0, 10.0];
const SEARCH_RESULT_LIMIT: usize = 12;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Information");
        ui.add_space(6.0);

        ui.label(RichText::new("Catalog").strong());
        ui.label(RichText::new(self.catalog_name.as_str()).italics());

        ui.add_space(8.0);
        ui.label(RichText::new("Statistics").strong());
        ui.label(format!("Courses: {}", self.dag.node_count()));
        ui.label(format!("Prerequisites: {}", self.dag.edge_count()));
        ui.label(format!("Students: {}", self.catalog.student_ids().len()));

        ui.separator();
        self.draw_selected_course(ui);

        ui.separator();
        draw_heatmap_legend(ui);
        ui.add_space(6.0);
        self.draw_ordering_control(ui);

        ui.separator();
        self.draw_search(ui);
    }

    fn draw_selected_course(&self, ui: &mut Ui) {
        ui.label(RichText::new("Selected course").strong());

        let Some(course) = &self.selected_course else {
            ui.label("None. Click a course in the graph.");
            return;
        };

        let name = if course.name.is_empty() {
            "(unnamed)"
        } else {
            course.name.as_str()
        };
        ui.add(egui::Label::new(RichText::new(name).strong()).wrap());
        ui.label(format!("ID: {}", course.code));
        ui.label(format!("Credits: {}", course.credits));
        if course.semester == 0 {
            ui.label("Semester: unassigned");
        } else {
            ui.label(format!("Semester: {}", course.semester));
        }

        let prerequisites = self.dag.predecessors(&course.code);
        if prerequisites.is_empty() {
            ui.label("Prerequisites: none");
        } else {
            ui.add(egui::Label::new(format!("Prerequisites: {}", prerequisites.join(", "))).wrap());
        }
    }

    fn draw_ordering_control(&mut self, ui: &mut Ui) {
        let mut ordering = self.ordering;
        egui::ComboBox::from_label("Heatmap order")
            .selected_text(ordering.label())
            .show_ui(ui, |ui| {
                for option in HeatmapOrdering::ALL {
                    ui.selectable_value(&mut ordering, option, option.label());
                }
            });
        self.set_heatmap_ordering(ordering);
    }

    fn draw_search(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Find course").strong())
            .on_hover_text("Fuzzy match on course code or name.");
        ui.text_edit_singleline(&mut self.search);

        let mut picked = None;
        for code in search_courses(&self.dag, &self.search, SEARCH_RESULT_LIMIT) {
            let name = self
                .dag
                .node(&code)
                .map(|node| node.name.as_str())
                .unwrap_or_default();
            if ui.link(format!("{code}  {name}")).clicked() {
                picked = Some(code);
            }
        }

        if let Some(code) = picked {
            self.on_course_selected(&code);
        }
    }
}

fn draw_heatmap_legend(ui: &mut Ui) {
    ui.label(RichText::new("Heatmap").strong());

    let swatch = vec2(34.0, 18.0);
    let gap = 8.0;
    let width = LEGEND_GRADES.len() as f32 * (swatch.x + gap);
    let (rect, response) = ui.allocate_exact_size(vec2(width, swatch.y + 18.0), Sense::hover());
    let painter = ui.painter_at(rect);

    let mut hovered = None;
    for (index, grade) in LEGEND_GRADES.into_iter().enumerate() {
        let min = rect.left_top() + vec2(index as f32 * (swatch.x + gap), 0.0);
        let cell = egui::Rect::from_min_size(min, swatch);
        let color = grade_color(grade);

        painter.rect_filled(cell, 2.0, color);
        painter.rect_stroke(cell, 2.0, Stroke::new(0.5, Color32::BLACK), StrokeKind::Inside);
        painter.text(
            cell.center_bottom() + vec2(0.0, 3.0),
            Align2::CENTER_TOP,
            format!("{grade:.1}"),
            FontId::proportional(11.0),
            ui.visuals().text_color(),
        );

        if response.hover_pos().is_some_and(|pointer| cell.contains(pointer)) {
            hovered = Some(color);
        }
    }

    if let Some(color) = hovered {
        response.on_hover_text(color_hex(color));
    }
}
