//! HTTP inbound adapter exposing REST endpoints.

pub mod courses;
pub mod error;
pub mod extractors;
pub mod health;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
