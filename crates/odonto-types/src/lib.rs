//! # Odonto Types
//!
//! Closed reference enumerations shared by every odontogram crate.
//!
//! Nothing in here is user-editable: tooth codes, surfaces, annotation tags and
//! clinical statuses are fixed sets. Parsing is strict (unknown values are an
//! error); callers that need to tolerate stale or hostile input use the
//! `*_or_default` helpers instead of propagating the raw string.

mod status;
mod tags;
mod tooth;

pub use status::ToothStatus;
pub use tags::{Color, Mark, Surface};
pub use tooth::{DentitionGroup, ToothCode};

/// Errors produced when a string does not belong to one of the closed enumerations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeError {
    #[error("unknown tooth code: {0:?}")]
    UnknownTooth(String),
    #[error("unknown tooth surface: {0:?}")]
    UnknownSurface(String),
    #[error("unknown annotation color: {0:?}")]
    UnknownColor(String),
    #[error("unknown annotation mark: {0:?}")]
    UnknownMark(String),
    #[error("unknown tooth status: {0:?}")]
    UnknownStatus(String),
}
