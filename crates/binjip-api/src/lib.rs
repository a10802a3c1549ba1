//! Binjip API - Web dashboard for the vacant building map
//!
//! Serves the upload page and the render/export endpoints. The server keeps
//! no per-user data: every request carries its own spreadsheet and photos.

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use router::create_router;
pub use state::{AppState, BoundaryStatus};
