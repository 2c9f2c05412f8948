//! Odontogram service.
//!
//! Ties the state model to a store: loads charts for editing, accepts
//! submitted payloads and applies single-tooth saves. Every operation first
//! checks that the patient exists, so a missing patient is reported as
//! [`OdontoError::PatientNotFound`] rather than as a constraint failure.

use crate::chart::{self, hydrate, DiagramKind, Hydrated, OdontogramDocument};
use crate::editor::{ChartEditor, ChartLayout};
use crate::repositories::{OdontogramStore, PatientId, ToothRecordRow, ToothUpsert};
use crate::validation::{normalise_notes, validate_status_key, validate_tooth_code};
use crate::{OdontoError, OdontoResult};
use odonto_types::ToothCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct OdontogramService {
    store: Arc<dyn OdontogramStore>,
}

impl OdontogramService {
    pub fn new(store: Arc<dyn OdontogramStore>) -> Self {
        Self { store }
    }

    fn ensure_patient(&self, patient: PatientId) -> OdontoResult<()> {
        if self.store.patient_exists(patient)? {
            Ok(())
        } else {
            Err(OdontoError::PatientNotFound(patient))
        }
    }

    /// Stored payload exactly as last written.
    pub fn load_raw(&self, patient: PatientId) -> OdontoResult<String> {
        self.ensure_patient(patient)?;
        self.store.load_document(patient)
    }

    /// Loads a patient's document.
    ///
    /// Per-tooth rows saved through [`Self::save_tooth`] are overlaid on the
    /// general chart; surface annotations from the stored payload are kept.
    /// A row field that is absent or unreadable leaves the payload's value.
    pub fn load(&self, patient: PatientId) -> OdontoResult<OdontogramDocument> {
        let raw = self.load_raw(patient)?;
        let mut document = hydrate(&raw).into_document();

        let general = document.chart_mut(DiagramKind::General);
        for row in self.store.list_tooth_records(patient)? {
            if row.status.is_none() && row.notes.is_none() {
                continue;
            }
            let (status, notes) = match general.tooth(row.tooth) {
                Some(entry) => (
                    row.status.or(entry.status),
                    row.notes.or_else(|| entry.notes.clone()),
                ),
                None => (row.status, row.notes),
            };
            general.set_tooth_record(row.tooth, status, notes);
        }

        Ok(document)
    }

    /// Starts an editing session on the patient's current document.
    pub fn open_editor(&self, patient: PatientId, layout: ChartLayout) -> OdontoResult<ChartEditor> {
        Ok(ChartEditor::new(self.load(patient)?, layout))
    }

    /// Replaces the stored document with the canonical form of `raw`.
    ///
    /// Unknown teeth, surfaces and statuses are dropped and unknown colors or
    /// marks are coerced. A payload that is not a JSON object at all is
    /// rejected so a broken form cannot wipe the stored chart.
    pub fn submit(&self, patient: PatientId, raw: &str) -> OdontoResult<OdontogramDocument> {
        self.ensure_patient(patient)?;

        let document = match hydrate(raw) {
            Hydrated::Parsed(document) => document,
            Hydrated::Empty => {
                return Err(OdontoError::InvalidInput(
                    "odontogram payload must be a JSON object".into(),
                ));
            }
        };

        self.store.replace_document(patient, &chart::serialize(&document)?)?;
        Ok(document)
    }

    /// Saves the status and notes of a single tooth.
    pub fn save_tooth(
        &self,
        patient: PatientId,
        tooth: &str,
        status: &str,
        notes: &str,
    ) -> OdontoResult<ToothCode> {
        let tooth = validate_tooth_code(tooth)?;
        let status = validate_status_key(status)?;
        let notes = normalise_notes(notes)?;
        self.ensure_patient(patient)?;

        self.store.upsert_tooth(
            patient,
            tooth,
            &ToothUpsert {
                status: Some(status),
                notes,
                surface_data: None,
            },
        )?;

        Ok(tooth)
    }

    pub fn tooth_records(&self, patient: PatientId) -> OdontoResult<Vec<ToothRecordRow>> {
        self.ensure_patient(patient)?;
        self.store.list_tooth_records(patient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::SqliteStore;
    use odonto_types::{Color, Mark, Surface, ToothStatus};

    fn setup() -> (Arc<SqliteStore>, OdontogramService, PatientId) {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let patient = store.create_patient("Ana Pérez").unwrap();
        let service = OdontogramService::new(store.clone());
        (store, service, patient)
    }

    fn tooth(code: &str) -> ToothCode {
        ToothCode::parse(code).unwrap()
    }

    #[test]
    fn new_patient_loads_empty_document() {
        let (_, service, patient) = setup();
        assert!(service.load(patient).unwrap().is_empty());
    }

    #[test]
    fn unknown_patient_is_reported() {
        let (_, service, _) = setup();

        assert!(matches!(service.load(999), Err(OdontoError::PatientNotFound(999))));
        assert!(matches!(
            service.submit(999, "{}"),
            Err(OdontoError::PatientNotFound(999))
        ));
        assert!(matches!(
            service.save_tooth(999, "11", "caries", ""),
            Err(OdontoError::PatientNotFound(999))
        ));
    }

    #[test]
    fn submit_stores_canonical_form() {
        let (store, service, patient) = setup();
        let raw = r#"{"odontodiagrama":{"11":{"top":{"color":"green","mark":"x"}},"99":{"top":{"color":"red"}}}}"#;

        service.submit(patient, raw).unwrap();

        assert_eq!(
            store.load_document(patient).unwrap(),
            r#"{"general":{"11":{"top":{"color":"blue","mark":"x"}}},"evolution":{}}"#
        );
        let loaded = service.load(patient).unwrap();
        assert_eq!(
            loaded.get_annotation(DiagramKind::General, tooth("11"), Surface::Top),
            Some(crate::chart::Annotation::new(Color::Blue, Mark::Cross))
        );
    }

    #[test]
    fn malformed_submission_keeps_previous_document() {
        let (store, service, patient) = setup();
        service
            .submit(patient, r#"{"general":{"21":{"left":{"color":"red","mark":""}}}}"#)
            .unwrap();
        let before = store.load_document(patient).unwrap();

        for bad in ["", "not json", "[1,2]"] {
            assert!(matches!(
                service.submit(patient, bad),
                Err(OdontoError::InvalidInput(_))
            ));
        }

        assert_eq!(store.load_document(patient).unwrap(), before);
    }

    #[test]
    fn save_tooth_validates_input() {
        let (_, service, patient) = setup();

        assert!(matches!(
            service.save_tooth(patient, "19", "caries", ""),
            Err(OdontoError::InvalidToothCode(_))
        ));
        assert!(matches!(
            service.save_tooth(patient, "11", "rotten", ""),
            Err(OdontoError::InvalidStatus(_))
        ));
        assert!(service.tooth_records(patient).unwrap().is_empty());
    }

    #[test]
    fn saved_teeth_are_overlaid_without_touching_surfaces() {
        let (_, service, patient) = setup();
        service
            .submit(patient, r#"{"general":{"16":{"center":{"color":"red","mark":"dot"}}}}"#)
            .unwrap();

        service.save_tooth(patient, "16", "caries", " occlusal ").unwrap();
        service.save_tooth(patient, "55", "ausente", "").unwrap();

        let doc = service.load(patient).unwrap();
        let general = doc.chart(DiagramKind::General);

        let t16 = general.tooth(tooth("16")).unwrap();
        assert_eq!(t16.status, Some(ToothStatus::Caries));
        assert_eq!(t16.notes.as_deref(), Some("occlusal"));
        assert_eq!(
            doc.get_annotation(DiagramKind::General, tooth("16"), Surface::Center),
            Some(crate::chart::Annotation::new(Color::Red, Mark::Dot))
        );

        let t55 = general.tooth(tooth("55")).unwrap();
        assert_eq!(t55.status, Some(ToothStatus::Missing));
        assert!(t55.surfaces.is_empty());

        assert!(doc.chart(DiagramKind::Evolution).is_empty());
    }

    #[test]
    fn unreadable_row_keeps_payload_status_and_notes() {
        let (store, service, patient) = setup();
        service
            .submit(
                patient,
                r#"{"general":{"21":{"status":"endodoncia","notes":"retreat","top":{"color":"red","mark":""}}}}"#,
            )
            .unwrap();
        store
            .conn()
            .execute(
                "INSERT INTO odontogram_entries (patient_id, tooth_code, status, notes)
                 VALUES (?1, '21', 'rotten', '  ')",
                rusqlite::params![patient],
            )
            .unwrap();

        let doc = service.load(patient).unwrap();
        let t21 = doc.chart(DiagramKind::General).tooth(tooth("21")).unwrap();
        assert_eq!(t21.status, Some(ToothStatus::RootCanal));
        assert_eq!(t21.notes.as_deref(), Some("retreat"));
        assert_eq!(t21.surfaces.len(), 1);
    }

    #[test]
    fn legacy_nested_payload_survives_load_and_resubmit() {
        let (store, service, patient) = setup();
        store
            .replace_document(
                patient,
                r#"{"odontodiagrama":{"11":{"surfaces":{"top":{"color":"red","mark":"dot"}}}},"evolucion":{}}"#,
            )
            .unwrap();

        let editor = service.open_editor(patient, ChartLayout::standard()).unwrap();
        let payload = editor.document().serialize().unwrap();
        service.submit(patient, &payload).unwrap();

        assert_eq!(
            store.load_document(patient).unwrap(),
            r#"{"general":{"11":{"top":{"color":"red","mark":"dot"}}},"evolution":{}}"#
        );
    }

    #[test]
    fn saving_a_tooth_twice_keeps_one_row() {
        let (_, service, patient) = setup();
        service.save_tooth(patient, "11", "caries", "first").unwrap();
        service.save_tooth(patient, "11", "obturacion", "").unwrap();

        let rows = service.tooth_records(patient).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, Some(ToothStatus::Filled));
        assert_eq!(rows[0].notes, None);
    }

    #[test]
    fn editor_session_round_trips_through_submit() {
        let (store, service, patient) = setup();
        let mut editor = service.open_editor(patient, ChartLayout::standard()).unwrap();

        editor.select_color(DiagramKind::Evolution, Color::Red);
        editor.activate_cell(DiagramKind::Evolution, tooth("46"), Surface::Bottom);

        let payload = editor.submission_payload().unwrap().unwrap();
        service.submit(patient, &payload).unwrap();

        assert_eq!(store.load_document(patient).unwrap(), payload);
    }
}
