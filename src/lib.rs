//! Library lending core
//!
//! In-memory catalog of physical books and e-books, the lending rules that
//! govern them, and the user directory used to authenticate borrowers.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use services::Services;
