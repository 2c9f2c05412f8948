use crate::chart::Annotation;
use odonto_types::{Color, Mark};
use serde::Serialize;

/// Visual state of one surface cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub fill: Option<Color>,
    pub mark: Mark,
}

impl CellView {
    pub fn from_annotation(annotation: Option<Annotation>) -> Self {
        match annotation {
            Some(a) => Self {
                fill: Some(a.color),
                mark: a.mark,
            },
            None => Self::default(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.fill.is_none()
    }

    /// CSS classes for the cell: fill first, then the mark glyph and its accent.
    pub fn classes(&self) -> Vec<String> {
        let Some(color) = self.fill else {
            return Vec::new();
        };

        let mut classes = vec![format!("fill-{color}"), "has-fill".to_string()];
        if !self.mark.is_none() {
            classes.push(format!("mark-{}", self.mark));
            classes.push(format!("color-{color}"));
            classes.push("has-mark".to_string());
        }
        classes
    }
}
