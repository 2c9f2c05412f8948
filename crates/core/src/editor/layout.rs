use odonto_types::{Color, DentitionGroup, Surface, ToothCode};
use serde::Serialize;

/// One row of the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchLayout {
    pub group: DentitionGroup,
    pub label: &'static str,
    pub is_deciduous: bool,
    pub teeth: Vec<ToothCode>,
}

/// The fixed anatomical layout an editing session renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartLayout {
    pub arches: Vec<ArchLayout>,
    pub surfaces: Vec<Surface>,
    /// Color button marked active when the toolbar is first drawn.
    pub initial_color: Color,
}

impl ChartLayout {
    /// Four arches, five surfaces per tooth, default color pre-selected.
    pub fn standard() -> Self {
        let arches = DentitionGroup::ALL
            .into_iter()
            .map(|group| ArchLayout {
                group,
                label: group.label(),
                is_deciduous: group.is_deciduous(),
                teeth: group.teeth().to_vec(),
            })
            .collect();

        Self {
            arches,
            surfaces: Surface::ALL.to_vec(),
            initial_color: Color::default(),
        }
    }

    pub fn with_initial_color(mut self, color: Color) -> Self {
        self.initial_color = color;
        self
    }

    /// Whether the layout draws a cell for this tooth and surface.
    pub fn contains(&self, tooth: ToothCode, surface: Surface) -> bool {
        self.surfaces.contains(&surface)
            && self.arches.iter().any(|arch| arch.teeth.contains(&tooth))
    }
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self::standard()
    }
}
