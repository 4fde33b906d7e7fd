mod app;
mod dom;
pub mod indicators;
pub mod net;
mod render;
mod state;
pub mod submit;

pub use app::run;
