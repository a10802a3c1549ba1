//! Binjip Core - Building records, district codes, and the load/filter/aggregate steps
//!
//! This crate holds the domain model of the vacant building dashboard and every
//! step of the pipeline that does not need a map: reading the uploaded
//! spreadsheet, filtering by district and housing type, counting per district
//! and resolving uploaded photos.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod filter;
pub mod formats;
pub mod loader;
pub mod models;
pub mod photos;

pub use error::{BinjipError, Result};
