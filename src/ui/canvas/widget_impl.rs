use egui::emath::TSTransform;
use egui::{Color32, Shape, Stroke, Widget};

use crate::rendering::BACKGROUND;

use super::canvas::Canvas;
use super::scene::Demo;

impl Widget for &mut Canvas {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let desired_size = ui.available_size();
        let (screen_rect, canvas_response) =
            ui.allocate_exact_size(desired_size, egui::Sense::drag());

        let outcome = self
            .input_state_manager
            .update(ui, &canvas_response);

        let screen = TSTransform::from_translation(screen_rect.min.to_vec2());

        if outcome.reset {
            self.reset();
        }

        if let Some(touch) = outcome.touch {
            let changed = match self.active {
                Demo::BitmapMesh => {
                    let local = (screen * self.mesh_scene.transform()).inverse() * touch;
                    self.mesh_scene.touch(local)
                }
                Demo::Vertices => {
                    let local = (screen * self.vertices_scene.transform()).inverse() * touch;
                    self.vertices_scene.touch(local)
                }
            };
            if changed {
                ui.ctx().request_repaint();
            }
        }

        let painter = ui.painter_at(screen_rect);
        painter.rect_filled(screen_rect, 0.0, BACKGROUND);

        let Some((texture, tex_size)) = self.texture else {
            return canvas_response;
        };

        // 由底到顶：网格纹理，然后是线框
        match self.active {
            Demo::BitmapMesh => {
                painter.add(Shape::mesh(self.mesh_scene.mesh(texture, screen)));
                if self.show_wireframe {
                    painter.extend(
                        self.mesh_scene
                            .wireframe(screen, Stroke::new(1.0, Color32::from_black_alpha(120))),
                    );
                }
            }
            Demo::Vertices => {
                for mesh in self.vertices_scene.meshes(texture, tex_size, screen) {
                    painter.add(Shape::mesh(mesh));
                }
            }
        }

        canvas_response
    }
}
