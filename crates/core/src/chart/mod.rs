//! Odontogram state model.
//!
//! The document is a per-patient pair of charts (`general` and `evolution`),
//! each mapping a tooth to its annotated surfaces plus optional whole-tooth
//! status and notes. Absence is always represented by a missing key: erasing
//! the last thing recorded on a tooth removes the tooth entry itself, so
//! repeated edit sessions never accumulate empty shells.
//!
//! [`hydrate`] is the only way raw payloads enter the model and it never
//! fails; [`serialize`] produces the canonical payload, which hydrates back to
//! the same document.

mod document;
mod hydrate;

pub use document::{Annotation, Chart, DiagramKind, OdontogramDocument, ToothEntry};
pub(crate) use document::parse_cell;
pub use hydrate::{hydrate, Hydrated};

use crate::OdontoResult;

/// Canonical transport form of a document.
pub fn serialize(doc: &OdontogramDocument) -> OdontoResult<String> {
    doc.serialize()
}
