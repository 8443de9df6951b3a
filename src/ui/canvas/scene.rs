use egui::emath::TSTransform;
use egui::{Mesh, Pos2, Shape, Stroke, TextureId, Vec2};
use serde::{Deserialize, Serialize};

use crate::models::{Grid, TriangleFan};
use crate::rendering::{fan_mesh, grid_mesh, grid_wireframe};
use crate::warp::{MeshWarper, WarpConfig};

pub const MAX_CELLS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Demo {
    BitmapMesh,
    Vertices,
}

impl Demo {
    pub const ALL: [Demo; 2] = [Demo::BitmapMesh, Demo::Vertices];

    pub fn label(self) -> &'static str {
        match self {
            Demo::BitmapMesh => "Bitmap mesh",
            Demo::Vertices => "Vertices",
        }
    }
}

/// Mesh resolution in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshSettings {
    pub cols: usize,
    pub rows: usize,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self { cols: 20, rows: 20 }
    }
}

impl MeshSettings {
    pub fn clamped(self) -> Self {
        Self {
            cols: self.cols.clamp(1, MAX_CELLS),
            rows: self.rows.clamp(1, MAX_CELLS),
        }
    }
}

/// A bitmap covered by a grid that bends toward the touch point.
pub struct BitmapMeshScene {
    warper: MeshWarper,
    tex_coords: Vec<Pos2>,
    transform: TSTransform,
}

impl BitmapMeshScene {
    pub fn new(size: Vec2, settings: MeshSettings, config: WarpConfig) -> Self {
        let settings = settings.clamped();
        let grid = Grid::new(size.x, size.y, settings.cols, settings.rows);
        let tex_coords = grid.tex_coords();
        Self {
            warper: MeshWarper::new(grid, config),
            tex_coords,
            transform: TSTransform::from_translation(Vec2::new(10.0, 10.0)),
        }
    }

    pub fn warper(&self) -> &MeshWarper {
        &self.warper
    }

    pub fn warper_mut(&mut self) -> &mut MeshWarper {
        &mut self.warper
    }

    pub fn transform(&self) -> TSTransform {
        self.transform
    }

    pub fn settings(&self) -> MeshSettings {
        let grid = self.warper.grid();
        MeshSettings {
            cols: grid.cols(),
            rows: grid.rows(),
        }
    }

    /// Touch in scene space. Returns whether the mesh changed.
    pub fn touch(&mut self, pos: Pos2) -> bool {
        self.warper.set_focus(pos)
    }

    pub fn mesh(&self, texture: TextureId, screen: TSTransform) -> Mesh {
        let grid = self.warper.grid();
        grid_mesh(
            texture,
            &self.tex_coords,
            self.warper.warped(),
            grid.cols(),
            grid.rows(),
            screen * self.transform,
        )
    }

    pub fn wireframe(&self, screen: TSTransform, stroke: Stroke) -> Vec<Shape> {
        grid_wireframe(
            self.warper.grid(),
            self.warper.warped(),
            screen * self.transform,
            stroke,
        )
    }
}

/// Triangle fan whose hub follows the touch point, drawn twice: once with
/// fixed texture coordinates, once (below) using the moving vertices as their
/// own texture coordinates.
pub struct VerticesScene {
    fan: TriangleFan,
    size: Vec2,
    transform: TSTransform,
}

impl VerticesScene {
    pub fn new(size: Vec2) -> Self {
        Self {
            fan: TriangleFan::new(size.x, size.y),
            size,
            transform: TSTransform::from_scaling(0.8)
                * TSTransform::from_translation(Vec2::new(20.0, 20.0)),
        }
    }

    pub fn fan(&self) -> &TriangleFan {
        &self.fan
    }

    pub fn transform(&self) -> TSTransform {
        self.transform
    }

    pub fn touch(&mut self, pos: Pos2) -> bool {
        if !pos.x.is_finite() || !pos.y.is_finite() {
            log::warn!("Ignoring non-finite touch {:?}", pos);
            return false;
        }
        if self.fan.center() == pos {
            return false;
        }
        self.fan.move_center(pos);
        true
    }

    pub fn reset(&mut self) {
        self.fan = TriangleFan::new(self.size.x, self.size.y);
    }

    pub fn meshes(
        &self,
        texture: TextureId,
        tex_size: [usize; 2],
        screen: TSTransform,
    ) -> [Mesh; 2] {
        let top = screen * self.transform;
        let bottom = top * TSTransform::from_translation(Vec2::new(0.0, self.size.y));
        [
            fan_mesh(texture, &self.fan, self.fan.texs(), tex_size, top),
            fan_mesh(texture, &self.fan, self.fan.verts(), tex_size, bottom),
        ]
    }
}
