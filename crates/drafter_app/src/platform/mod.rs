mod app;
mod effects;
mod textures;
mod ui;

pub use app::run_app;
