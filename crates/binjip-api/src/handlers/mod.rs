mod dashboard;
mod export;
mod health;
mod render;

pub use dashboard::dashboard;
pub use export::handle_export;
pub use health::health_check;
pub use render::handle_render;
