use eframe::egui::{self, Sense, Ui};

use super::super::render_utils::{paint_scene, screen_to_world};
use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        if self.scene_dirty {
            self.rebuild_scene();
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        if self.fit_pending {
            self.fit_to_scene(rect);
        }
        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);

        let pan = self.pan;
        let zoom = self.zoom;
        let Some(controller) = self.controller.as_mut() else {
            ui.label("The catalog has no courses to draw.");
            return;
        };

        let restyled = match response.hover_pos() {
            Some(pointer) => controller.on_pointer_move(screen_to_world(rect, pan, zoom, pointer)),
            None => controller.on_pointer_leave(),
        };
        if restyled {
            ui.ctx().request_repaint();
        }

        if controller.hover().code().is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let clicked = if response.clicked_by(egui::PointerButton::Primary) {
            response
                .interact_pointer_pos()
                .and_then(|pointer| controller.on_click(screen_to_world(rect, pan, zoom, pointer)))
        } else {
            None
        };

        paint_scene(&painter, rect, pan, zoom, controller.scene());

        if let Some(code) = clicked {
            self.on_course_selected(&code);
        }
    }
}
