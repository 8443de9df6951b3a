#![warn(clippy::all, rust_2018_idioms)]

mod app;
pub mod models;
pub mod rendering;
pub mod ui;
pub mod warp;

pub use app::MeshWarpApp;
