//! Input validation utilities.
//!
//! These functions guard the strict entry points (per-tooth saves, patient
//! creation). Chart payloads go through [`crate::chart::hydrate`] instead,
//! which coerces rather than rejects.

use crate::constants::{MAX_PATIENT_NAME_LEN, MAX_TOOTH_NOTES_LEN};
use crate::{OdontoError, OdontoResult};
use odonto_types::{ToothCode, ToothStatus};

/// Validates a tooth code string against the FDI chart.
///
/// # Errors
///
/// Returns `OdontoError::InvalidToothCode` if the code is blank or not one of
/// the 52 charted teeth.
pub fn validate_tooth_code(code: &str) -> OdontoResult<ToothCode> {
    ToothCode::parse(code).map_err(|_| OdontoError::InvalidToothCode(code.trim().to_string()))
}

/// Validates a status key such as `caries` or `endodoncia`.
///
/// # Errors
///
/// Returns `OdontoError::InvalidStatus` if the key is not one of the known
/// statuses.
pub fn validate_status_key(key: &str) -> OdontoResult<ToothStatus> {
    key.trim()
        .parse::<ToothStatus>()
        .map_err(|_| OdontoError::InvalidStatus(key.trim().to_string()))
}

/// Trims notes, returning `None` when nothing remains.
///
/// # Errors
///
/// Returns `OdontoError::InvalidInput` if the trimmed notes exceed
/// [`MAX_TOOTH_NOTES_LEN`] characters.
pub fn normalise_notes(notes: &str) -> OdontoResult<Option<String>> {
    let trimmed = notes.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if trimmed.chars().count() > MAX_TOOTH_NOTES_LEN {
        return Err(OdontoError::InvalidInput(format!(
            "notes exceed maximum length of {} characters",
            MAX_TOOTH_NOTES_LEN
        )));
    }

    Ok(Some(trimmed.to_string()))
}

/// Validates and trims a patient's full name.
///
/// # Errors
///
/// Returns `OdontoError::InvalidInput` if the name is blank or longer than
/// [`MAX_PATIENT_NAME_LEN`] characters.
pub fn validate_patient_name(full_name: &str) -> OdontoResult<String> {
    let trimmed = full_name.trim();
    if trimmed.is_empty() {
        return Err(OdontoError::InvalidInput("full_name is required".into()));
    }

    if trimmed.chars().count() > MAX_PATIENT_NAME_LEN {
        return Err(OdontoError::InvalidInput(format!(
            "full_name exceeds maximum length of {} characters",
            MAX_PATIENT_NAME_LEN
        )));
    }

    Ok(trimmed.to_string())
}
