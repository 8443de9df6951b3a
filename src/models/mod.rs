pub mod fan;
pub mod mesh_grid;

pub use fan::TriangleFan;
pub use mesh_grid::Grid;
