//! # Odonto Core
//!
//! Core logic for the clinic's dental charting (odontogram) feature.
//!
//! This crate contains the chart state model, the interactive editor session
//! and the SQLite-backed storage adapter:
//! - [`chart`]: per-tooth, per-surface annotations for the general and
//!   evolution charts, tolerant hydration and canonical serialization
//! - [`editor`]: toolbar state machine and cell activation for one editing session
//! - [`repositories`]: the [`OdontogramStore`] contract and [`SqliteStore`]
//! - [`service`]: patient-scoped load/submit/save operations over a store
//!
//! **No API concerns**: HTTP servers and command-line handling belong in
//! `api-rest`, `api-shared` and `cli`.

pub mod chart;
pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod repositories;
pub mod service;
pub mod validation;

pub use odonto_types;

pub use config::CoreConfig;
pub use constants::DEFAULT_DATABASE_PATH;
pub use error::{OdontoError, OdontoResult};
pub use repositories::{OdontogramStore, PatientId, SqliteStore};
pub use service::OdontogramService;
