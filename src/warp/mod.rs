//! Radial displacement field for mesh warping.
//!
//! Every grid point is pulled toward a focus point with a weight of roughly
//! `K / d³`. Points close enough for the weight to reach 1 collapse onto the
//! focus; far points barely move.
//!
//! ```text
//!  Grid (immutable)        focus
//!        │                   │
//!        └──────┬────────────┘
//!               ▼
//!        warp() / par_warp()      ── pure, one output per input
//!               │
//!               ▼
//!         warped points  ──►  rendering::grid_mesh()
//! ```
//!
//! [`MeshWarper`] wraps the pure functions for callers that redraw every
//! frame and want to reuse one output buffer.
//!
//! ```ignore
//! use meshwarp::models::Grid;
//! use meshwarp::warp::{warp, WarpConfig};
//! use egui::Pos2;
//!
//! let grid = Grid::new(320.0, 240.0, 20, 20);
//! let warped = warp(grid.points(), Pos2::new(100.0, 80.0), &WarpConfig::default());
//! assert_eq!(warped.len(), grid.len());
//! ```

mod field;
mod warper;


pub use field::{
    par_warp, par_warp_into, warp, warp_into, WarpConfig, DEFAULT_EPSILON, DEFAULT_STRENGTH,
};
pub use warper::MeshWarper;
