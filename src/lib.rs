//! GearGuard Equipment Maintenance Tracking
//!
//! A Rust implementation of the GearGuard maintenance server, providing a
//! REST JSON API for reporting broken equipment, working requests through
//! their lifecycle, and reviewing maintenance reports.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod permissions;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
