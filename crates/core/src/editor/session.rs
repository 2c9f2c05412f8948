use super::layout::ChartLayout;
use super::tool::{Stroke, ToolButton, ToolState};
use super::view::CellView;
use crate::chart::{hydrate, parse_cell, DiagramKind, OdontogramDocument};
use crate::OdontoResult;
use odonto_types::{Color, Surface, ToothCode};

/// One interactive editing session over a patient's odontogram.
///
/// Constructed when the chart page loads and dropped when the user navigates
/// away. Each chart has its own toolbar. Mutations apply immediately, in the
/// order they are dispatched, and mark the session dirty.
#[derive(Debug, Clone)]
pub struct ChartEditor {
    document: OdontogramDocument,
    layout: ChartLayout,
    general_tool: ToolState,
    evolution_tool: ToolState,
    dirty: bool,
}

impl ChartEditor {
    pub fn new(document: OdontogramDocument, layout: ChartLayout) -> Self {
        let tool = ToolState::new(layout.initial_color);
        Self {
            document,
            layout,
            general_tool: tool,
            evolution_tool: tool,
            dirty: false,
        }
    }

    /// Hydrates the stored payload. A malformed payload opens an empty chart.
    pub fn load(raw: &str, layout: ChartLayout) -> Self {
        Self::new(hydrate(raw).into_document(), layout)
    }

    pub fn document(&self) -> &OdontogramDocument {
        &self.document
    }

    pub fn into_document(self) -> OdontogramDocument {
        self.document
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub fn tool(&self, diagram: DiagramKind) -> &ToolState {
        match diagram {
            DiagramKind::General => &self.general_tool,
            DiagramKind::Evolution => &self.evolution_tool,
        }
    }

    fn tool_mut(&mut self, diagram: DiagramKind) -> &mut ToolState {
        match diagram {
            DiagramKind::General => &mut self.general_tool,
            DiagramKind::Evolution => &mut self.evolution_tool,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn select_color(&mut self, diagram: DiagramKind, color: Color) {
        self.tool_mut(diagram).select_color(color);
    }

    pub fn press(&mut self, diagram: DiagramKind, button: ToolButton) {
        self.tool_mut(diagram).press(button);
    }

    /// Color button click with the raw button value; unknown colors do nothing.
    pub fn select_color_raw(&mut self, diagram: DiagramKind, raw: &str) -> bool {
        match ToolButton::parse_color(raw) {
            Some(button) => {
                self.press(diagram, button);
                true
            }
            None => false,
        }
    }

    /// Mark-slot button click with the raw button value; unknown values do nothing.
    pub fn press_tool_raw(&mut self, diagram: DiagramKind, raw: &str) -> bool {
        match ToolButton::parse_tool(raw) {
            Some(button) => {
                self.press(diagram, button);
                true
            }
            None => false,
        }
    }

    /// Applies the current tool to a cell and returns the cell's new look.
    ///
    /// Cells outside the layout are ignored.
    pub fn activate_cell(
        &mut self,
        diagram: DiagramKind,
        tooth: ToothCode,
        surface: Surface,
    ) -> Option<CellView> {
        if !self.layout.contains(tooth, surface) {
            return None;
        }

        let annotation = match self.tool(diagram).stroke() {
            Stroke::Erase => None,
            Stroke::Paint(annotation) => Some(annotation),
        };
        self.document
            .set_annotation(diagram, tooth, surface, annotation);
        self.dirty = true;

        Some(CellView::from_annotation(annotation))
    }

    pub fn activate_cell_raw(
        &mut self,
        diagram: DiagramKind,
        tooth: &str,
        surface: &str,
    ) -> Option<CellView> {
        let (tooth, surface) = parse_cell(tooth, surface)?;
        self.activate_cell(diagram, tooth, surface)
    }

    pub fn cell_view(&self, diagram: DiagramKind, tooth: ToothCode, surface: Surface) -> CellView {
        CellView::from_annotation(self.document.get_annotation(diagram, tooth, surface))
    }

    /// Serialized document for the form's payload field, only if something changed.
    pub fn submission_payload(&self) -> OdontoResult<Option<String>> {
        if !self.dirty {
            return Ok(None);
        }
        self.document.serialize().map(Some)
    }
}
