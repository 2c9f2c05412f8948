//! Tooth identifiers and the anatomical groups they belong to.
//!
//! Codes follow the two-digit FDI notation: the first digit is the quadrant
//! (1-4 permanent, 5-8 deciduous) and the second the position from the midline.

use crate::CodeError;
use std::fmt;
use std::str::FromStr;

/// One of the 52 charted teeth.
///
/// Ordering is numeric, which keeps serialized charts stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToothCode(u8);

const fn t(code: u8) -> ToothCode {
    ToothCode(code)
}

#[rustfmt::skip]
const PERMANENT_UPPER: [ToothCode; 16] = [
    t(18), t(17), t(16), t(15), t(14), t(13), t(12), t(11),
    t(21), t(22), t(23), t(24), t(25), t(26), t(27), t(28),
];

#[rustfmt::skip]
const PERMANENT_LOWER: [ToothCode; 16] = [
    t(48), t(47), t(46), t(45), t(44), t(43), t(42), t(41),
    t(31), t(32), t(33), t(34), t(35), t(36), t(37), t(38),
];

#[rustfmt::skip]
const DECIDUOUS_UPPER: [ToothCode; 10] = [
    t(55), t(54), t(53), t(52), t(51),
    t(61), t(62), t(63), t(64), t(65),
];

#[rustfmt::skip]
const DECIDUOUS_LOWER: [ToothCode; 10] = [
    t(85), t(84), t(83), t(82), t(81),
    t(71), t(72), t(73), t(74), t(75),
];

impl ToothCode {
    /// Parses a two-digit tooth code, rejecting anything outside the fixed set.
    pub fn parse(input: &str) -> Result<Self, CodeError> {
        let trimmed = input.trim();
        let code = trimmed
            .parse::<u8>()
            .ok()
            .filter(|_| trimmed.len() == 2)
            .map(ToothCode)
            .filter(|code| code.group_opt().is_some());

        code.ok_or_else(|| CodeError::UnknownTooth(input.to_string()))
    }

    /// Numeric FDI value, e.g. `11`.
    pub fn value(self) -> u8 {
        self.0
    }

    /// The anatomical group this tooth is charted in.
    pub fn group(self) -> DentitionGroup {
        match self.group_opt() {
            Some(group) => group,
            // Construction goes through `parse` or the group tables only.
            None => unreachable!("tooth code {} is outside every dentition group", self.0),
        }
    }

    pub fn is_deciduous(self) -> bool {
        self.group().is_deciduous()
    }

    /// Every valid code, in charting order (group by group, left to right).
    pub fn all() -> impl Iterator<Item = ToothCode> {
        DentitionGroup::ALL
            .into_iter()
            .flat_map(|group| group.teeth().iter().copied())
    }

    fn group_opt(self) -> Option<DentitionGroup> {
        DentitionGroup::ALL
            .into_iter()
            .find(|group| group.teeth().contains(&self))
    }
}

impl fmt::Display for ToothCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ToothCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for ToothCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ToothCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ToothCode::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// The four rows of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DentitionGroup {
    PermanentUpper,
    PermanentLower,
    DeciduousUpper,
    DeciduousLower,
}

impl DentitionGroup {
    pub const ALL: [DentitionGroup; 4] = [
        DentitionGroup::PermanentUpper,
        DentitionGroup::PermanentLower,
        DentitionGroup::DeciduousUpper,
        DentitionGroup::DeciduousLower,
    ];

    /// Teeth in display order, patient's right to left.
    pub fn teeth(self) -> &'static [ToothCode] {
        match self {
            DentitionGroup::PermanentUpper => &PERMANENT_UPPER,
            DentitionGroup::PermanentLower => &PERMANENT_LOWER,
            DentitionGroup::DeciduousUpper => &DECIDUOUS_UPPER,
            DentitionGroup::DeciduousLower => &DECIDUOUS_LOWER,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DentitionGroup::PermanentUpper => "Upper jaw",
            DentitionGroup::PermanentLower => "Lower jaw",
            DentitionGroup::DeciduousUpper => "Upper deciduous dentition",
            DentitionGroup::DeciduousLower => "Lower deciduous dentition",
        }
    }

    pub fn is_deciduous(self) -> bool {
        matches!(
            self,
            DentitionGroup::DeciduousUpper | DentitionGroup::DeciduousLower
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn there_are_exactly_52_codes() {
        let all: Vec<_> = ToothCode::all().collect();
        assert_eq!(all.len(), 52);

        let mut deduped = all.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), 52);
    }

    #[test]
    fn parse_accepts_every_charted_code() {
        for code in ToothCode::all() {
            let parsed = ToothCode::parse(&code.to_string()).unwrap();
            assert_eq!(parsed, code);
        }
    }

    #[test]
    fn parse_rejects_codes_outside_the_chart() {
        for input in ["", "19", "10", "56", "76", "99", "011", "1", "ab", "-11"] {
            assert!(
                ToothCode::parse(input).is_err(),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn groups_classify_deciduous_teeth() {
        assert_eq!(ToothCode::parse("11").unwrap().group(), DentitionGroup::PermanentUpper);
        assert_eq!(ToothCode::parse("36").unwrap().group(), DentitionGroup::PermanentLower);
        assert!(ToothCode::parse("55").unwrap().is_deciduous());
        assert!(ToothCode::parse("71").unwrap().is_deciduous());
        assert!(!ToothCode::parse("48").unwrap().is_deciduous());
    }

    #[test]
    fn serde_uses_the_string_form() {
        let code = ToothCode::parse("26").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"26\"");
        let back: ToothCode = serde_json::from_str("\"26\"").unwrap();
        assert_eq!(back, code);
        assert!(serde_json::from_str::<ToothCode>("\"29\"").is_err());
    }
}
