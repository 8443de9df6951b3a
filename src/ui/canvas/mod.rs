pub mod canvas;
pub mod input;
pub mod scene;
mod widget_impl;

pub use canvas::Canvas;
