use crate::{OdontoError, OdontoResult};
use odonto_types::{Color, Mark, Surface, ToothCode, ToothStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// Color and optional mark painted on one tooth surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Annotation {
    pub color: Color,
    pub mark: Mark,
}

impl Annotation {
    pub fn new(color: Color, mark: Mark) -> Self {
        Self { color, mark }
    }

    /// Builds an annotation from untrusted strings.
    ///
    /// Unknown colors become the default color and unknown marks become
    /// "no mark"; the call never fails.
    pub fn coerce(color: &str, mark: &str) -> Self {
        Self {
            color: Color::parse_or_default(color.trim()),
            mark: Mark::parse_or_none(mark.trim()),
        }
    }
}

/// Everything recorded against a single tooth in one chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToothEntry {
    #[serde(flatten)]
    pub surfaces: BTreeMap<Surface, Annotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ToothStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ToothEntry {
    /// An entry with nothing in it must not be kept.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty() && self.status.is_none() && self.notes.is_none()
    }
}

/// One odontogram grid: tooth code to entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Chart {
    teeth: BTreeMap<ToothCode, ToothEntry>,
}

impl Chart {
    pub fn is_empty(&self) -> bool {
        self.teeth.is_empty()
    }

    pub fn len(&self) -> usize {
        self.teeth.len()
    }

    pub fn tooth(&self, tooth: ToothCode) -> Option<&ToothEntry> {
        self.teeth.get(&tooth)
    }

    pub fn teeth(&self) -> impl Iterator<Item = (ToothCode, &ToothEntry)> {
        self.teeth.iter().map(|(code, entry)| (*code, entry))
    }

    pub fn get_annotation(&self, tooth: ToothCode, surface: Surface) -> Option<Annotation> {
        self.teeth
            .get(&tooth)
            .and_then(|entry| entry.surfaces.get(&surface))
            .copied()
    }

    /// Paints (`Some`) or erases (`None`) one surface.
    pub fn set_annotation(
        &mut self,
        tooth: ToothCode,
        surface: Surface,
        annotation: Option<Annotation>,
    ) {
        match annotation {
            Some(annotation) => {
                self.teeth
                    .entry(tooth)
                    .or_default()
                    .surfaces
                    .insert(surface, annotation);
            }
            None => {
                if let Some(entry) = self.teeth.get_mut(&tooth) {
                    entry.surfaces.remove(&surface);
                }
                self.collapse(tooth);
            }
        }
    }

    /// Replaces the whole-tooth status and notes, leaving surfaces untouched.
    ///
    /// Blank notes count as no notes.
    pub fn set_tooth_record(
        &mut self,
        tooth: ToothCode,
        status: Option<ToothStatus>,
        notes: Option<String>,
    ) {
        let notes = notes.filter(|n| !n.trim().is_empty());
        let entry = self.teeth.entry(tooth).or_default();
        entry.status = status;
        entry.notes = notes;
        self.collapse(tooth);
    }

    /// Inserts a hydrated entry; empty entries are dropped and never replace
    /// an existing one.
    pub(crate) fn insert_entry(&mut self, tooth: ToothCode, entry: ToothEntry) {
        if !entry.is_empty() {
            self.teeth.insert(tooth, entry);
        }
    }

    fn collapse(&mut self, tooth: ToothCode) {
        if self.teeth.get(&tooth).is_some_and(ToothEntry::is_empty) {
            self.teeth.remove(&tooth);
        }
    }
}

/// Which of the two independent charts an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    General,
    Evolution,
}

impl DiagramKind {
    pub const ALL: [DiagramKind; 2] = [DiagramKind::General, DiagramKind::Evolution];

    /// Payload key.
    pub fn key(self) -> &'static str {
        match self {
            DiagramKind::General => "general",
            DiagramKind::Evolution => "evolution",
        }
    }

    /// Key used by payloads saved before the charts were renamed.
    pub fn legacy_key(self) -> &'static str {
        match self {
            DiagramKind::General => "odontodiagrama",
            DiagramKind::Evolution => "evolucion",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        DiagramKind::ALL
            .into_iter()
            .find(|kind| kind.key() == input || kind.legacy_key() == input)
    }
}

/// The full odontogram state of one patient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OdontogramDocument {
    pub general: Chart,
    pub evolution: Chart,
}

impl OdontogramDocument {
    pub fn is_empty(&self) -> bool {
        self.general.is_empty() && self.evolution.is_empty()
    }

    pub fn chart(&self, diagram: DiagramKind) -> &Chart {
        match diagram {
            DiagramKind::General => &self.general,
            DiagramKind::Evolution => &self.evolution,
        }
    }

    pub fn chart_mut(&mut self, diagram: DiagramKind) -> &mut Chart {
        match diagram {
            DiagramKind::General => &mut self.general,
            DiagramKind::Evolution => &mut self.evolution,
        }
    }

    pub fn get_annotation(
        &self,
        diagram: DiagramKind,
        tooth: ToothCode,
        surface: Surface,
    ) -> Option<Annotation> {
        self.chart(diagram).get_annotation(tooth, surface)
    }

    pub fn set_annotation(
        &mut self,
        diagram: DiagramKind,
        tooth: ToothCode,
        surface: Surface,
        annotation: Option<Annotation>,
    ) {
        self.chart_mut(diagram)
            .set_annotation(tooth, surface, annotation);
    }

    /// Lookup by raw codes. Unknown tooth or surface codes are simply absent.
    pub fn get_annotation_raw(
        &self,
        diagram: DiagramKind,
        tooth: &str,
        surface: &str,
    ) -> Option<Annotation> {
        let (tooth, surface) = parse_cell(tooth, surface)?;
        self.get_annotation(diagram, tooth, surface)
    }

    /// Mutation by raw codes. Unknown tooth or surface codes are ignored and
    /// `false` is returned.
    pub fn set_annotation_raw(
        &mut self,
        diagram: DiagramKind,
        tooth: &str,
        surface: &str,
        annotation: Option<Annotation>,
    ) -> bool {
        match parse_cell(tooth, surface) {
            Some((tooth, surface)) => {
                self.set_annotation(diagram, tooth, surface, annotation);
                true
            }
            None => {
                tracing::debug!(tooth, surface, "ignoring mutation of unknown chart cell");
                false
            }
        }
    }

    pub fn serialize(&self) -> OdontoResult<String> {
        serde_json::to_string(self).map_err(OdontoError::Serialization)
    }
}

pub(crate) fn parse_cell(tooth: &str, surface: &str) -> Option<(ToothCode, Surface)> {
    let tooth = ToothCode::parse(tooth).ok()?;
    let surface = surface.trim().parse::<Surface>().ok()?;
    Some((tooth, surface))
}
