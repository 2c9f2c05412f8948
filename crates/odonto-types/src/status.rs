use crate::CodeError;
use std::fmt;
use std::str::FromStr;

/// Whole-tooth clinical category recorded by the per-tooth save form.
///
/// The serialized keys are the ones already stored in existing clinic databases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ToothStatus {
    #[serde(rename = "sin_registro")]
    NoRecord,
    #[serde(rename = "sano")]
    Healthy,
    #[serde(rename = "caries")]
    Caries,
    #[serde(rename = "restaurado")]
    Restored,
    #[serde(rename = "obturacion")]
    Filled,
    #[serde(rename = "endodoncia")]
    RootCanal,
    #[serde(rename = "protesis")]
    Prosthesis,
    #[serde(rename = "implante")]
    Implant,
    #[serde(rename = "ausente")]
    Missing,
    #[serde(rename = "fractura")]
    Fractured,
    #[serde(rename = "en_tratamiento")]
    InTreatment,
}

impl ToothStatus {
    pub const ALL: [ToothStatus; 11] = [
        ToothStatus::NoRecord,
        ToothStatus::Healthy,
        ToothStatus::Caries,
        ToothStatus::Restored,
        ToothStatus::Filled,
        ToothStatus::RootCanal,
        ToothStatus::Prosthesis,
        ToothStatus::Implant,
        ToothStatus::Missing,
        ToothStatus::Fractured,
        ToothStatus::InTreatment,
    ];

    /// Storage key, e.g. `"endodoncia"`.
    pub fn key(self) -> &'static str {
        match self {
            ToothStatus::NoRecord => "sin_registro",
            ToothStatus::Healthy => "sano",
            ToothStatus::Caries => "caries",
            ToothStatus::Restored => "restaurado",
            ToothStatus::Filled => "obturacion",
            ToothStatus::RootCanal => "endodoncia",
            ToothStatus::Prosthesis => "protesis",
            ToothStatus::Implant => "implante",
            ToothStatus::Missing => "ausente",
            ToothStatus::Fractured => "fractura",
            ToothStatus::InTreatment => "en_tratamiento",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToothStatus::NoRecord => "No record",
            ToothStatus::Healthy => "Healthy",
            ToothStatus::Caries => "Caries",
            ToothStatus::Restored => "Restored",
            ToothStatus::Filled => "Filled",
            ToothStatus::RootCanal => "Root canal",
            ToothStatus::Prosthesis => "Fixed/removable prosthesis",
            ToothStatus::Implant => "Implant",
            ToothStatus::Missing => "Missing",
            ToothStatus::Fractured => "Fractured",
            ToothStatus::InTreatment => "In treatment",
        }
    }
}

impl fmt::Display for ToothStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ToothStatus {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToothStatus::ALL
            .into_iter()
            .find(|status| status.key() == s)
            .ok_or_else(|| CodeError::UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_status_round_trips_through_its_key() {
        for status in ToothStatus::ALL {
            assert_eq!(status.key().parse::<ToothStatus>().unwrap(), status);
        }
    }

    #[test]
    fn labels_are_not_keys() {
        assert!("Root canal".parse::<ToothStatus>().is_err());
        assert_eq!(
            ToothStatus::from_str("endodoncia").unwrap().label(),
            "Root canal"
        );
    }
}
