//! Request and response bodies.
//!
//! Field names match the JSON the chart page sends and receives. Codes
//! (teeth, statuses, colors) travel as their string keys; the core crate
//! parses them.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatePatientReq {
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatePatientRes {
    pub id: i64,
}

/// Submitted chart form. `payload` is the hidden field the editor fills with
/// the serialized document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OdontogramPayloadReq {
    pub payload: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SaveToothReq {
    /// Status key, e.g. `caries` or `endodoncia`.
    pub status: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SaveToothRes {
    pub tooth: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ToothRecordRes {
    pub tooth: String,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub surface_data: Option<String>,
    /// `YYYY-MM-DD HH:MM:SS`, UTC.
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ToothRecordsRes {
    pub records: Vec<ToothRecordRes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArchRes {
    pub label: String,
    pub is_deciduous: bool,
    pub teeth: Vec<String>,
}

/// Fixed chart geometry the page renders its grids from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LayoutRes {
    pub arches: Vec<ArchRes>,
    pub surfaces: Vec<String>,
    pub colors: Vec<String>,
    pub marks: Vec<String>,
    pub statuses: Vec<StatusOptionRes>,
    pub initial_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusOptionRes {
    pub key: String,
    pub label: String,
}
