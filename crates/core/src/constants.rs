//! Constants used throughout the odontogram core crate.
//!
//! Table names and storage defaults live here so the schema bootstrap, the
//! store and the binaries agree on them.

/// Default SQLite database path when no explicit path is configured.
pub const DEFAULT_DATABASE_PATH: &str = "data/clinic.sqlite";

/// Table holding the patients that own odontogram state.
pub const PATIENTS_TABLE: &str = "patients";

/// Table holding per-tooth status/notes rows (upserted one tooth at a time).
pub const ODONTOGRAM_ENTRIES_TABLE: &str = "odontogram_entries";

/// Table holding the full multi-surface payload (replaced on every submission).
pub const ODONTOGRAM_DOCUMENTS_TABLE: &str = "odontogram_documents";

/// Payload returned when a patient has never saved a chart.
pub const EMPTY_DOCUMENT_SENTINEL: &str = "{}";

/// Upper bound on per-tooth notes, in characters.
pub const MAX_TOOTH_NOTES_LEN: usize = 2_000;

/// Upper bound on a patient's full name, in characters.
pub const MAX_PATIENT_NAME_LEN: usize = 200;
