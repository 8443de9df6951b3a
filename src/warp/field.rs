use egui::Pos2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_STRENGTH: f32 = 10_000.0;
pub const DEFAULT_EPSILON: f32 = 1e-6;

/// Parameters of the radial displacement field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpConfig {
    /// Field strength `K`. Points with `K / d³ >= 1` snap onto the focus, so
    /// the snap radius is `K^(1/3)`.
    pub strength: f32,

    /// Added to `d²` and `d` so a point sitting on the focus stays finite.
    pub epsilon: f32,
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            strength: DEFAULT_STRENGTH,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl WarpConfig {
    pub fn new(strength: f32) -> Self {
        Self {
            strength,
            ..Default::default()
        }
    }

    /// Replace out-of-range values with usable ones.
    ///
    /// Strength must be finite and non-negative; epsilon must be finite and
    /// strictly positive.
    pub fn sanitized(self) -> Self {
        let strength = if self.strength.is_finite() {
            self.strength.max(0.0)
        } else {
            DEFAULT_STRENGTH
        };
        let epsilon = if self.epsilon.is_finite() && self.epsilon > 0.0 {
            self.epsilon
        } else {
            DEFAULT_EPSILON
        };
        Self { strength, epsilon }
    }

    /// Distance below which points collapse onto the focus.
    pub fn snap_radius(&self) -> f32 {
        self.strength.cbrt()
    }

    /// Interpolation weight toward the focus for a point at offset `(dx, dy)`.
    ///
    /// Roughly `K / d³`; values `>= 1` mean a full snap.
    #[inline]
    pub fn pull(&self, dx: f32, dy: f32) -> f32 {
        let dist_sq = dx * dx + dy * dy;
        let dist = dist_sq.sqrt();
        let pull = self.strength / (dist_sq + self.epsilon);
        pull / (dist + self.epsilon)
    }

    /// Displace a single point toward `focus`.
    #[inline]
    pub fn warp_point(&self, point: Pos2, focus: Pos2) -> Pos2 {
        let dx = focus.x - point.x;
        let dy = focus.y - point.y;
        let pull = self.pull(dx, dy);

        if pull >= 1.0 {
            focus
        } else if pull.is_nan() || pull <= 0.0 {
            // 极端坐标下 dx 溢出为 inf，pull 为 0 或 NaN
            point
        } else {
            Pos2::new(point.x + dx * pull, point.y + dy * pull)
        }
    }
}

/// Pull every point of `grid` toward `focus`.
///
/// Returns a fresh buffer of the same length and order; `grid` is untouched.
pub fn warp(grid: &[Pos2], focus: Pos2, config: &WarpConfig) -> Vec<Pos2> {
    grid.iter()
        .map(|&p| config.warp_point(p, focus))
        .collect()
}

/// Same as [`warp`] but writes into a caller-owned buffer.
///
/// `out` is fully overwritten.
///
/// # Panics
/// If `out.len() != grid.len()`.
pub fn warp_into(grid: &[Pos2], focus: Pos2, config: &WarpConfig, out: &mut [Pos2]) {
    assert_eq!(
        grid.len(),
        out.len(),
        "warp output buffer must match the grid length"
    );
    for (dst, &src) in out.iter_mut().zip(grid) {
        *dst = config.warp_point(src, focus);
    }
}

/// Parallel [`warp`]. Output order matches `grid`.
pub fn par_warp(grid: &[Pos2], focus: Pos2, config: &WarpConfig) -> Vec<Pos2> {
    grid.par_iter()
        .map(|&p| config.warp_point(p, focus))
        .collect()
}

/// Parallel [`warp_into`].
pub fn par_warp_into(grid: &[Pos2], focus: Pos2, config: &WarpConfig, out: &mut [Pos2]) {
    assert_eq!(
        grid.len(),
        out.len(),
        "warp output buffer must match the grid length"
    );
    out.par_iter_mut()
        .zip(grid.par_iter())
        .for_each(|(dst, &src)| *dst = config.warp_point(src, focus));
}
