pub mod constants;
pub mod overlays;
pub mod render;
