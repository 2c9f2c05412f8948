//! Tolerant parsing of stored or submitted payloads.
//!
//! The payload is walked as untyped JSON so that one bad tooth, surface or tag
//! only loses that piece instead of the whole chart. Nothing here returns an
//! error: a payload that cannot be understood at all hydrates as
//! [`Hydrated::Empty`].

use super::document::{Annotation, Chart, DiagramKind, OdontogramDocument, ToothEntry};
use crate::constants::MAX_TOOTH_NOTES_LEN;
use odonto_types::{Surface, ToothCode, ToothStatus};
use serde_json::{Map, Value};

/// Result of validating a payload at the hydration boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hydrated {
    /// The root was a JSON object; individual charts were sanitised.
    Parsed(OdontogramDocument),
    /// Blank, non-JSON, or non-object payload.
    Empty,
}

impl Hydrated {
    pub fn is_empty(&self) -> bool {
        matches!(self, Hydrated::Empty)
    }

    pub fn into_document(self) -> OdontogramDocument {
        match self {
            Hydrated::Parsed(doc) => doc,
            Hydrated::Empty => OdontogramDocument::default(),
        }
    }
}

/// Parses a raw payload into a document.
///
/// Surfaces may sit directly in the tooth object or under a nested
/// `surfaces` object. Re-serializing fills in defaults: a cell without a
/// `mark` comes back with `"mark": ""` and a missing chart comes back as `{}`.
pub fn hydrate(raw: &str) -> Hydrated {
    let raw = raw.trim();
    if raw.is_empty() {
        return Hydrated::Empty;
    }

    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "discarding odontogram payload that is not valid JSON");
            return Hydrated::Empty;
        }
    };

    let Value::Object(root) = value else {
        tracing::warn!("discarding odontogram payload whose root is not an object");
        return Hydrated::Empty;
    };

    let mut doc = OdontogramDocument::default();
    for diagram in DiagramKind::ALL {
        let sub = root
            .get(diagram.key())
            .or_else(|| root.get(diagram.legacy_key()));
        if let Some(sub) = sub {
            *doc.chart_mut(diagram) = hydrate_chart(diagram, sub);
        }
    }

    Hydrated::Parsed(doc)
}

fn hydrate_chart(diagram: DiagramKind, value: &Value) -> Chart {
    let mut chart = Chart::default();

    let Value::Object(teeth) = value else {
        tracing::warn!(diagram = diagram.key(), "chart is not an object; using an empty chart");
        return chart;
    };

    for (code, entry) in teeth {
        let Some(tooth) = ToothCode::parse(code).ok().filter(|t| t.to_string() == *code) else {
            tracing::debug!(diagram = diagram.key(), code = %code, "dropping unknown tooth code");
            continue;
        };
        if let Value::Object(entry) = entry {
            chart.insert_entry(tooth, hydrate_entry(entry));
        }
    }

    chart
}

fn hydrate_entry(entry: &Map<String, Value>) -> ToothEntry {
    let mut out = ToothEntry::default();

    for (key, value) in entry {
        match key.as_str() {
            "status" => {
                out.status = value
                    .as_str()
                    .and_then(|s| s.trim().parse::<ToothStatus>().ok());
            }
            "notes" => {
                out.notes = value.as_str().and_then(hydrate_notes);
            }
            "surfaces" => {
                if let Value::Object(nested) = value {
                    for (key, cell) in nested {
                        insert_surface(&mut out, key, cell);
                    }
                }
            }
            other => insert_surface(&mut out, other, value),
        }
    }

    out
}

fn insert_surface(entry: &mut ToothEntry, key: &str, cell: &Value) {
    let Ok(surface) = key.parse::<Surface>() else {
        return;
    };
    if let Some(annotation) = hydrate_annotation(cell) {
        entry.surfaces.insert(surface, annotation);
    }
}

/// Trimmed and cut to [`MAX_TOOTH_NOTES_LEN`] characters; blank is absent.
fn hydrate_notes(notes: &str) -> Option<String> {
    let trimmed = notes.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_TOOTH_NOTES_LEN).collect())
}

/// A cell without a color is absent; any other cell is coerced into range.
fn hydrate_annotation(cell: &Value) -> Option<Annotation> {
    let cell = cell.as_object()?;
    let color = cell
        .get("color")
        .and_then(Value::as_str)
        .filter(|c| !c.trim().is_empty())?;
    let mark = cell.get("mark").and_then(Value::as_str).unwrap_or("");

    Some(Annotation::coerce(color, mark))
}

#[cfg(test)]
mod tests {
    use super::*;
    use odonto_types::{Color, Mark};

    fn tooth(code: &str) -> ToothCode {
        ToothCode::parse(code).unwrap()
    }

    #[test]
    fn malformed_payloads_hydrate_empty() {
        for raw in ["", "   ", "not json", "[1,2,3]", "null", "42", "\"text\"", "{\"general\":"] {
            let hydrated = hydrate(raw);
            assert!(hydrated.is_empty(), "expected {raw:?} to hydrate empty");
            assert!(hydrated.into_document().is_empty());
        }
    }

    #[test]
    fn non_object_sub_documents_become_empty_charts() {
        let hydrated = hydrate(
            r#"{"general":[1,2],"evolution":{"11":{"top":{"color":"red","mark":""}}}}"#,
        );
        let Hydrated::Parsed(doc) = hydrated else {
            panic!("object root should parse");
        };
        assert!(doc.general.is_empty());
        assert_eq!(
            doc.get_annotation(DiagramKind::Evolution, tooth("11"), Surface::Top),
            Some(Annotation::new(Color::Red, Mark::None))
        );
    }

    #[test]
    fn round_trip_is_idempotent_for_well_formed_payloads() {
        let raw = r#"{
            "general": {
                "11": {"top": {"color": "red", "mark": "dot"}, "left": {"color": "blue", "mark": ""}},
                "36": {"status": "caries", "notes": "distal lesion"}
            },
            "evolution": {
                "75": {"center": {"color": "blue", "mark": "x"}}
            }
        }"#;

        let doc = hydrate(raw).into_document();
        let serialized = doc.serialize().unwrap();

        let original: Value = serde_json::from_str(raw).unwrap();
        let reparsed: Value = serde_json::from_str(&serialized).unwrap();
        assert_eq!(original, reparsed);

        let again = hydrate(&serialized).into_document().serialize().unwrap();
        assert_eq!(serialized, again);
    }

    #[test]
    fn legacy_keys_are_read() {
        let doc = hydrate(
            r#"{"odontodiagrama":{"18":{"right":{"color":"blue","mark":"vertical"}}},"evolucion":{}}"#,
        )
        .into_document();
        assert_eq!(
            doc.get_annotation(DiagramKind::General, tooth("18"), Surface::Right),
            Some(Annotation::new(Color::Blue, Mark::VerticalBar))
        );
    }

    #[test]
    fn nested_surfaces_object_is_read() {
        let doc = hydrate(
            r#"{"odontodiagrama":{"11":{"surfaces":{"top":{"color":"red","mark":"dot"}}}},"evolucion":{}}"#,
        )
        .into_document();

        assert_eq!(
            doc.get_annotation(DiagramKind::General, tooth("11"), Surface::Top),
            Some(Annotation::new(Color::Red, Mark::Dot))
        );
        assert_eq!(
            doc.serialize().unwrap(),
            r#"{"general":{"11":{"top":{"color":"red","mark":"dot"}}},"evolution":{}}"#
        );
    }

    #[test]
    fn nested_and_flat_surfaces_combine() {
        let doc = hydrate(
            r#"{"general":{"26":{"left":{"color":"blue","mark":"x"},"surfaces":{"right":{"color":"red"}},"status":"caries"}}}"#,
        )
        .into_document();

        let entry = doc.general.tooth(tooth("26")).unwrap();
        assert_eq!(entry.surfaces.len(), 2);
        assert_eq!(entry.status, Some(ToothStatus::Caries));
        assert_eq!(
            entry.surfaces.get(&Surface::Right),
            Some(&Annotation::new(Color::Red, Mark::None))
        );
    }

    #[test]
    fn padded_tooth_key_does_not_erase_real_tooth() {
        let doc = hydrate(
            r#"{"general":{"11":{"top":{"color":"red","mark":"dot"}},"11 ":{}," 12":{"top":{"color":"red"}}}}"#,
        )
        .into_document();

        assert_eq!(doc.general.len(), 1);
        assert_eq!(
            doc.get_annotation(DiagramKind::General, tooth("11"), Surface::Top),
            Some(Annotation::new(Color::Red, Mark::Dot))
        );
        assert!(doc.general.tooth(tooth("12")).is_none());
    }

    #[test]
    fn notes_are_trimmed_and_capped() {
        let long = "a".repeat(MAX_TOOTH_NOTES_LEN + 50);
        let raw = serde_json::json!({
            "general": {
                "21": {"notes": "  mesial  "},
                "22": {"notes": format!("  {long}")}
            }
        })
        .to_string();

        let doc = hydrate(&raw).into_document();
        assert_eq!(
            doc.general.tooth(tooth("21")).unwrap().notes.as_deref(),
            Some("mesial")
        );
        let capped = doc.general.tooth(tooth("22")).unwrap().notes.clone().unwrap();
        assert_eq!(capped.chars().count(), MAX_TOOTH_NOTES_LEN);
        assert!(capped.starts_with('a'));
    }

    #[test]
    fn missing_mark_and_missing_chart_serialize_with_defaults() {
        let doc = hydrate(r#"{"general":{"11":{"top":{"color":"red"}}}}"#).into_document();

        assert_eq!(
            doc.serialize().unwrap(),
            r#"{"general":{"11":{"top":{"color":"red","mark":""}}},"evolution":{}}"#
        );
    }

    #[test]
    fn bad_pieces_are_dropped_or_coerced() {
        let doc = hydrate(
            r#"{"general":{
                "19": {"top": {"color": "red"}},
                "11": {"occlusal": {"color": "red"}, "top": {"color": "green", "mark": "erase"}},
                "12": {"top": {"mark": "dot"}, "left": {"color": ""}},
                "13": "not an entry",
                "14": {"top": [], "status": "broken", "notes": "   "},
                "15": {"status": "implante"}
            }}"#,
        )
        .into_document();

        let general = &doc.general;
        assert_eq!(general.len(), 2);
        assert_eq!(
            general.get_annotation(tooth("11"), Surface::Top),
            Some(Annotation::new(Color::Blue, Mark::None))
        );
        assert!(general.tooth(tooth("12")).is_none());
        assert!(general.tooth(tooth("14")).is_none());
        assert_eq!(
            general.tooth(tooth("15")).unwrap().status,
            Some(ToothStatus::Implant)
        );
    }
}
