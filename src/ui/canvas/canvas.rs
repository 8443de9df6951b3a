use egui::{TextureId, Vec2};

use crate::warp::WarpConfig;

use super::input::state_manager::InputStateManager;
use super::scene::{BitmapMeshScene, Demo, MeshSettings, VerticesScene};

/// Interactive view onto one of the demo scenes.
pub struct Canvas {
    pub active: Demo,
    pub show_wireframe: bool,
    pub input_state_manager: InputStateManager,
    pub mesh_scene: BitmapMeshScene,
    pub vertices_scene: VerticesScene,
    pub(super) texture: Option<(TextureId, [usize; 2])>,
}

impl Canvas {
    pub fn new(bitmap_size: [usize; 2], settings: MeshSettings, config: WarpConfig) -> Self {
        let size = Vec2::new(bitmap_size[0] as f32, bitmap_size[1] as f32);
        Self {
            active: Demo::BitmapMesh,
            show_wireframe: false,
            input_state_manager: InputStateManager::new(),
            mesh_scene: BitmapMeshScene::new(size, settings, config),
            vertices_scene: VerticesScene::new(size),
            texture: None,
        }
    }

    pub fn set_texture(&mut self, texture: TextureId, size: [usize; 2]) {
        self.texture = Some((texture, size));
    }

    /// Rebuild the mesh grid if the resolution changed. The focus is dropped.
    pub fn set_mesh_settings(&mut self, settings: MeshSettings) {
        let settings = settings.clamped();
        if settings == self.mesh_scene.settings() {
            return;
        }
        let grid = self.mesh_scene.warper().grid();
        let size = grid.size();
        let config = *self.mesh_scene.warper().config();
        let parallel = self.mesh_scene.warper().parallel();
        log::info!("Rebuilding mesh at {}x{} cells", settings.cols, settings.rows);
        self.mesh_scene = BitmapMeshScene::new(size, settings, config);
        self.mesh_scene.warper_mut().set_parallel(parallel);
    }

    pub fn set_warp_config(&mut self, config: WarpConfig) {
        self.mesh_scene.warper_mut().set_config(config);
    }

    pub fn reset(&mut self) {
        match self.active {
            Demo::BitmapMesh => self.mesh_scene.warper_mut().reset(),
            Demo::Vertices => self.vertices_scene.reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use egui::Pos2;

    use super::*;
    use crate::ui::canvas::scene::MAX_CELLS;

    fn canvas() -> Canvas {
        Canvas::new([320, 240], MeshSettings::default(), WarpConfig::new(5000.0))
    }

    #[test]
    fn test_resolution_change_rebuilds_grid() {
        let mut canvas = canvas();
        canvas.mesh_scene.warper_mut().set_parallel(true);
        assert!(canvas.mesh_scene.touch(Pos2::new(100.0, 100.0)));

        canvas.set_mesh_settings(MeshSettings { cols: 8, rows: 4 });

        let warper = canvas.mesh_scene.warper();
        assert_eq!(warper.grid().len(), 9 * 5);
        assert_eq!(warper.grid().size(), Vec2::new(320.0, 240.0));
        assert_eq!(warper.focus(), None);
        assert_eq!(warper.warped(), warper.grid().points());
        assert_eq!(warper.config(), &WarpConfig::new(5000.0));
        assert!(warper.parallel());
    }

    #[test]
    fn test_unchanged_resolution_keeps_focus() {
        let mut canvas = canvas();
        let focus = Pos2::new(40.0, 60.0);
        canvas.mesh_scene.touch(focus);
        let warped = canvas.mesh_scene.warper().warped().to_vec();

        canvas.set_mesh_settings(MeshSettings::default());

        let warper = canvas.mesh_scene.warper();
        assert_eq!(warper.focus(), Some(focus));
        assert_eq!(warper.warped(), warped.as_slice());
    }

    #[test]
    fn test_clamped_to_current_resolution_keeps_focus() {
        let mut canvas = canvas();
        canvas.set_mesh_settings(MeshSettings { cols: 1, rows: MAX_CELLS });
        let focus = Pos2::new(12.0, 34.0);
        canvas.mesh_scene.touch(focus);

        // 钳制后与当前分辨率相同，不应重建
        canvas.set_mesh_settings(MeshSettings { cols: 0, rows: 999 });

        assert_eq!(canvas.mesh_scene.warper().focus(), Some(focus));
        assert_eq!(canvas.mesh_scene.warper().grid().len(), 2 * (MAX_CELLS + 1));
    }

    #[test]
    fn test_out_of_range_resolution_is_clamped() {
        let mut canvas = canvas();
        canvas.set_mesh_settings(MeshSettings { cols: 0, rows: 10_000 });
        assert_eq!(
            canvas.mesh_scene.settings(),
            MeshSettings {
                cols: 1,
                rows: MAX_CELLS
            }
        );
    }

    #[test]
    fn test_reset_targets_active_demo() {
        let mut canvas = canvas();
        canvas.mesh_scene.touch(Pos2::new(10.0, 10.0));
        canvas.vertices_scene.touch(Pos2::new(1.0, 2.0));

        canvas.active = Demo::Vertices;
        canvas.reset();
        assert_eq!(canvas.vertices_scene.fan().center(), Pos2::new(160.0, 120.0));
        assert!(canvas.mesh_scene.warper().focus().is_some());

        canvas.active = Demo::BitmapMesh;
        canvas.reset();
        assert_eq!(canvas.mesh_scene.warper().focus(), None);
    }
}
