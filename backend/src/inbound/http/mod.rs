//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod profile;
pub mod state;

pub use error::{ApiResult, ErrorResponse};

/// JSON extractor configuration shared by every route that takes a body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(error::json_error_handler)
}
