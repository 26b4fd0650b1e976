mod app;
mod config;
mod decode;
mod effects;
mod keys;
mod logging;
mod ui;

pub use app::run_app;
