//! # API Shared
//!
//! Shared definitions for the odontogram APIs.
//!
//! Contains:
//! - Transport types (`dto` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and `cli` so both surfaces speak the same JSON.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
