use egui::Pos2;

use crate::models::Grid;

use super::field::{par_warp_into, warp_into, WarpConfig};

/// Below this many points the rayon split costs more than it saves.
const PARALLEL_THRESHOLD: usize = 4096;

/// Owns a base grid and its warped copy.
///
/// The warped buffer is allocated once (equal to the grid) and overwritten
/// in place on every accepted focus update.
#[derive(Debug, Clone)]
pub struct MeshWarper {
    grid: Grid,
    warped: Vec<Pos2>,
    config: WarpConfig,
    focus: Option<Pos2>,
    /// Integer-truncated focus of the last recompute.
    last_cell: Option<(i32, i32)>,
    parallel: bool,
}

impl MeshWarper {
    pub fn new(grid: Grid, config: WarpConfig) -> Self {
        let warped = grid.points().to_vec();
        Self {
            grid,
            warped,
            config: config.sanitized(),
            focus: None,
            last_cell: None,
            parallel: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn warped(&self) -> &[Pos2] {
        &self.warped
    }

    pub fn config(&self) -> &WarpConfig {
        &self.config
    }

    pub fn focus(&self) -> Option<Pos2> {
        self.focus
    }

    /// Allow splitting large grids across the rayon pool.
    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Move the focus and recompute the warped grid.
    ///
    /// Returns `false` when nothing was recomputed: either the focus is not
    /// finite, or it truncates to the same integer position as the last
    /// applied focus.
    pub fn set_focus(&mut self, focus: Pos2) -> bool {
        if !focus.x.is_finite() || !focus.y.is_finite() {
            log::warn!("Ignoring non-finite warp focus {:?}", focus);
            return false;
        }

        let cell = (focus.x as i32, focus.y as i32);
        if self.last_cell == Some(cell) {
            return false;
        }

        self.last_cell = Some(cell);
        self.focus = Some(focus);
        self.recompute(focus);
        true
    }

    /// Swap the field parameters, re-warping at the current focus if any.
    pub fn set_config(&mut self, config: WarpConfig) {
        let config = config.sanitized();
        if config == self.config {
            return;
        }
        self.config = config;
        if let Some(focus) = self.focus {
            self.recompute(focus);
        }
    }

    /// Drop the focus and restore the undeformed grid.
    pub fn reset(&mut self) {
        self.focus = None;
        self.last_cell = None;
        self.warped.copy_from_slice(self.grid.points());
    }

    fn recompute(&mut self, focus: Pos2) {
        log::trace!(
            "Warping {} points toward ({:.1}, {:.1})",
            self.grid.len(),
            focus.x,
            focus.y
        );
        if self.parallel && self.grid.len() >= PARALLEL_THRESHOLD {
            par_warp_into(self.grid.points(), focus, &self.config, &mut self.warped);
        } else {
            warp_into(self.grid.points(), focus, &self.config, &mut self.warped);
        }
    }
}
