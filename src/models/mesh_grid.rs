use egui::{Pos2, Vec2};

/// Undeformed sample positions of a rectangular mesh.
///
/// A grid of `cols × rows` cells has `(cols + 1) × (rows + 1)` points stored
/// row-major: point `(x, y)` lives at `y * (cols + 1) + x` and sits at
/// `(width * x / cols, height * y / rows)`.
///
/// The points are fixed at construction; warping produces a separate buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: f32,
    height: f32,
    cols: usize,
    rows: usize,
    points: Vec<Pos2>,
}

impl Grid {
    /// Build a grid covering `width × height` with the given cell counts.
    ///
    /// A zero cell count collapses that axis to a single line of points at 0.
    pub fn new(width: f32, height: f32, cols: usize, rows: usize) -> Self {
        let mut points = Vec::with_capacity((cols + 1) * (rows + 1));

        for y in 0..=rows {
            let fy = if rows == 0 {
                0.0
            } else {
                height * y as f32 / rows as f32
            };
            for x in 0..=cols {
                let fx = if cols == 0 {
                    0.0
                } else {
                    width * x as f32 / cols as f32
                };
                points.push(Pos2::new(fx, fy));
            }
        }

        Self {
            width,
            height,
            cols,
            rows,
            points,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the point in column `x`, row `y`.
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x <= self.cols && y <= self.rows);
        y * (self.cols + 1) + x
    }

    /// Texture coordinates in `[0, 1]`, one per point, in grid order.
    ///
    /// The texture is pinned to the undeformed positions, so moving a vertex
    /// drags the bitmap with it.
    pub fn tex_coords(&self) -> Vec<Pos2> {
        let w = self.width.max(f32::MIN_POSITIVE);
        let h = self.height.max(f32::MIN_POSITIVE);
        self.points
            .iter()
            .map(|p| Pos2::new(p.x / w, p.y / h))
            .collect()
    }

    /// Interleaved `[x0, y0, x1, y1, ...]` view of the points.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_count_and_layout() {
        let grid = Grid::new(200.0, 100.0, 4, 2);
        assert_eq!(grid.len(), 5 * 3);
        assert_eq!(grid.points()[0], Pos2::new(0.0, 0.0));
        assert_eq!(grid.points()[grid.index(4, 0)], Pos2::new(200.0, 0.0));
        assert_eq!(grid.points()[grid.index(0, 1)], Pos2::new(0.0, 50.0));
        assert_eq!(grid.points()[grid.index(4, 2)], Pos2::new(200.0, 100.0));
    }

    #[test]
    fn test_row_major_order() {
        let grid = Grid::new(10.0, 10.0, 2, 2);
        // 每一行 y 不变，x 递增
        for row in grid.points().chunks(3) {
            assert!(row.iter().all(|p| p.y == row[0].y));
            assert!(row.windows(2).all(|w| w[0].x < w[1].x));
        }
    }

    #[test]
    fn test_degenerate_axes() {
        let grid = Grid::new(10.0, 10.0, 0, 3);
        assert_eq!(grid.len(), 4);
        assert!(grid.points().iter().all(|p| p.x == 0.0));
    }

    #[test]
    fn test_tex_coords_are_normalized() {
        let grid = Grid::new(320.0, 240.0, 20, 20);
        let uv = grid.tex_coords();
        assert_eq!(uv.len(), grid.len());
        assert_eq!(uv[0], Pos2::ZERO);
        assert_eq!(uv[grid.len() - 1], Pos2::new(1.0, 1.0));
        assert!(uv
            .iter()
            .all(|p| (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y)));
    }

    #[test]
    fn test_as_floats_interleaves_coordinates() {
        let grid = Grid::new(10.0, 20.0, 1, 1);
        assert_eq!(
            grid.as_floats(),
            &[0.0, 0.0, 10.0, 0.0, 0.0, 20.0, 10.0, 20.0]
        );
    }
}
