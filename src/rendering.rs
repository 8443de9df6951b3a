use egui::emath::TSTransform;
use egui::epaint::Vertex;
use egui::{Color32, ColorImage, Context, Mesh, Pos2, Shape, Stroke, TextureHandle, TextureId};
use noise::{NoiseFn, Perlin};

use crate::models::{Grid, TriangleFan};

pub const BACKGROUND: Color32 = Color32::from_rgb(0xCC, 0xCC, 0xCC);

const CHECKER_SIZE: usize = 32;

#[derive(Clone, Debug)]
pub struct PaletteStop {
    pub position: f32,
    pub color: Color32,
}

#[derive(Clone, Debug)]
pub struct Palette {
    stops: Vec<PaletteStop>,
}

impl Palette {
    pub fn new(mut stops: Vec<PaletteStop>) -> Self {
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Self { stops }
    }

    pub fn sample(&self, t: f32) -> Color32 {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Color32::WHITE;
        };
        let clamped = t.clamp(0.0, 1.0);
        for window in self.stops.windows(2) {
            if clamped >= window[0].position && clamped <= window[1].position {
                let range = (window[1].position - window[0].position).max(1e-5);
                let local_t = (clamped - window[0].position) / range;
                return lerp(window[0].color, window[1].color, local_t);
            }
        }
        if clamped <= first.position {
            first.color
        } else {
            last.color
        }
    }
}

fn lerp(a: Color32, b: Color32, t: f32) -> Color32 {
    let clamped = t.clamp(0.0, 1.0);
    let r = a.r() as f32 + (b.r() as f32 - a.r() as f32) * clamped;
    let g = a.g() as f32 + (b.g() as f32 - a.g() as f32) * clamped;
    let b = a.b() as f32 + (b.b() as f32 - a.b() as f32) * clamped;
    Color32::from_rgb(r.round() as u8, g.round() as u8, b.round() as u8)
}

/// Sand-to-sea colours for the sample bitmap.
pub fn beach_palette() -> Palette {
    Palette::new(vec![
        PaletteStop {
            position: 0.0,
            color: Color32::from_rgb(12, 58, 110),
        },
        PaletteStop {
            position: 0.4,
            color: Color32::from_rgb(40, 140, 196),
        },
        PaletteStop {
            position: 0.55,
            color: Color32::from_rgb(232, 214, 160),
        },
        PaletteStop {
            position: 1.0,
            color: Color32::from_rgb(250, 244, 222),
        },
    ])
}

/// Procedural sample bitmap: Perlin noise through `palette`, with a checker
/// overlay so deformation is easy to see.
pub fn generate_bitmap(width: usize, height: usize, seed: u32, palette: &Palette) -> ColorImage {
    let perlin = Perlin::new(seed);
    let mut pixels = Vec::with_capacity(width * height);

    for y in 0..height {
        for x in 0..width {
            let n = perlin.get([x as f64 * 0.02, y as f64 * 0.02]);
            let t = ((n + 1.0) * 0.5) as f32;
            let color = palette.sample(t);
            let dark = ((x / CHECKER_SIZE) + (y / CHECKER_SIZE)) % 2 == 1;
            pixels.push(if dark { darken(color, 0.8) } else { color });
        }
    }

    ColorImage {
        size: [width, height],
        pixels,
    }
}

fn darken(color: Color32, factor: f32) -> Color32 {
    Color32::from_rgb(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
    )
}

/// Owns the GPU texture the meshes sample from.
pub struct BitmapRenderer {
    texture: Option<TextureHandle>,
    size: [usize; 2],
}

impl BitmapRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            texture: None,
            size: [width, height],
        }
    }

    pub fn size(&self) -> [usize; 2] {
        self.size
    }

    /// Regenerate the bitmap and replace the texture. The previous texture is
    /// freed when its handle drops.
    pub fn upload(&mut self, ctx: &Context, seed: u32, palette: &Palette) {
        let image = generate_bitmap(self.size[0], self.size[1], seed, palette);
        let tex = ctx.load_texture("bitmap", image, egui::TextureOptions::LINEAR);
        log::info!(
            "Uploaded {}x{} bitmap (seed {})",
            self.size[0],
            self.size[1],
            seed
        );
        self.texture = Some(tex);
    }

    pub fn texture(&self) -> Option<TextureId> {
        self.texture.as_ref().map(|t| t.id())
    }
}

/// Index list for a `cols × rows` mesh: two triangles per cell.
pub fn grid_indices(cols: usize, rows: usize) -> Vec<u32> {
    let stride = cols as u32 + 1;
    let mut indices = Vec::with_capacity(cols * rows * 6);
    for y in 0..rows as u32 {
        for x in 0..cols as u32 {
            let i = y * stride + x;
            indices.extend_from_slice(&[i, i + 1, i + stride]);
            indices.extend_from_slice(&[i + 1, i + stride + 1, i + stride]);
        }
    }
    indices
}

/// Texture-mapped mesh from per-vertex positions and texture coordinates.
///
/// `tex_coords` are normalised; `verts` are in scene space and mapped to the
/// screen through `transform`.
pub fn grid_mesh(
    texture: TextureId,
    tex_coords: &[Pos2],
    verts: &[Pos2],
    cols: usize,
    rows: usize,
    transform: TSTransform,
) -> Mesh {
    debug_assert_eq!(tex_coords.len(), verts.len());
    debug_assert_eq!(verts.len(), (cols + 1) * (rows + 1));

    let mut mesh = Mesh::with_texture(texture);
    mesh.vertices = verts
        .iter()
        .zip(tex_coords)
        .map(|(&pos, &uv)| Vertex {
            pos: transform * pos,
            uv,
            color: Color32::WHITE,
        })
        .collect();
    mesh.indices = grid_indices(cols, rows);
    mesh
}

/// Texture-mapped mesh for a triangle fan.
///
/// `tex_points` are in bitmap pixels and normalised by `tex_size`.
pub fn fan_mesh(
    texture: TextureId,
    fan: &TriangleFan,
    tex_points: &[Pos2; 5],
    tex_size: [usize; 2],
    transform: TSTransform,
) -> Mesh {
    let w = tex_size[0].max(1) as f32;
    let h = tex_size[1].max(1) as f32;

    let mut mesh = Mesh::with_texture(texture);
    for (&pos, &tex) in fan.verts().iter().zip(tex_points) {
        mesh.vertices.push(Vertex {
            pos: transform * pos,
            uv: Pos2::new(tex.x / w, tex.y / h),
            color: Color32::WHITE,
        });
    }
    for [a, b, c] in fan.triangles() {
        mesh.add_triangle(a as u32, b as u32, c as u32);
    }
    mesh
}

/// Line segments along the rows and columns of a (possibly warped) grid.
///
/// `verts` holds one position per point of `grid`, in grid order.
pub fn grid_wireframe(
    grid: &Grid,
    verts: &[Pos2],
    transform: TSTransform,
    stroke: Stroke,
) -> Vec<Shape> {
    if verts.len() != grid.len() {
        log::warn!(
            "Wireframe needs {} vertices, got {}",
            grid.len(),
            verts.len()
        );
        return Vec::new();
    }

    let (cols, rows) = (grid.cols(), grid.rows());
    let mut shapes = Vec::with_capacity(2 * cols * rows + cols + rows);
    for y in 0..=rows {
        for x in 0..=cols {
            let p = transform * verts[grid.index(x, y)];
            if x < cols {
                let right = transform * verts[grid.index(x + 1, y)];
                shapes.push(Shape::line_segment([p, right], stroke));
            }
            if y < rows {
                let below = transform * verts[grid.index(x, y + 1)];
                shapes.push(Shape::line_segment([p, below], stroke));
            }
        }
    }
    shapes
}
