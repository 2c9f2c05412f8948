//! Storage adapter for odontogram state.
//!
//! [`OdontogramStore`] is the contract the rest of the crate depends on;
//! [`SqliteStore`] implements it on the clinic's local SQLite database.

mod patients;
mod schema;
mod sqlite;
mod store;

pub use sqlite::SqliteStore;
pub use store::{OdontogramStore, PatientId, ToothRecordRow, ToothUpsert};
