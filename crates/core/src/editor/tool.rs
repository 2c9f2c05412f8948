//! Toolbar state machine.
//!
//! A toolbar holds one active color plus a mode: idle, a mark, or erase.
//! Mark and erase buttons share one slot and toggle: pressing the active one
//! again returns to idle. Color buttons never change the mode.

use crate::chart::Annotation;
use odonto_types::{Color, Mark};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToolMode {
    #[default]
    Idle,
    Mark(Mark),
    Erase,
}

/// A toolbar button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolButton {
    Color(Color),
    Mark(Mark),
    Erase,
}

impl ToolButton {
    /// Parses a color button value. Unknown colors yield `None`.
    pub fn parse_color(raw: &str) -> Option<Self> {
        raw.trim().parse::<Color>().ok().map(ToolButton::Color)
    }

    /// Parses a mark-slot button value (`"dot"`, `"x"`, ..., or `"erase"`).
    ///
    /// The empty mark is not a button; it and unknown values yield `None`.
    pub fn parse_tool(raw: &str) -> Option<Self> {
        match raw.trim() {
            "erase" => Some(ToolButton::Erase),
            other => other
                .parse::<Mark>()
                .ok()
                .filter(|mark| !mark.is_none())
                .map(ToolButton::Mark),
        }
    }
}

/// What activating a cell does under the current tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    Paint(Annotation),
    Erase,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolState {
    color: Color,
    mode: ToolMode,
}

impl ToolState {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            mode: ToolMode::Idle,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn select_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn toggle_mark(&mut self, mark: Mark) {
        if mark.is_none() {
            self.mode = ToolMode::Idle;
            return;
        }
        self.mode = if self.mode == ToolMode::Mark(mark) {
            ToolMode::Idle
        } else {
            ToolMode::Mark(mark)
        };
    }

    pub fn toggle_erase(&mut self) {
        self.mode = if self.mode == ToolMode::Erase {
            ToolMode::Idle
        } else {
            ToolMode::Erase
        };
    }

    pub fn press(&mut self, button: ToolButton) {
        match button {
            ToolButton::Color(color) => self.select_color(color),
            ToolButton::Mark(mark) => self.toggle_mark(mark),
            ToolButton::Erase => self.toggle_erase(),
        }
    }

    /// Selection indicator for a button (`aria-pressed`).
    pub fn is_pressed(&self, button: ToolButton) -> bool {
        match button {
            ToolButton::Color(color) => self.color == color,
            ToolButton::Mark(mark) => self.mode == ToolMode::Mark(mark),
            ToolButton::Erase => self.mode == ToolMode::Erase,
        }
    }

    pub fn stroke(&self) -> Stroke {
        match self.mode {
            ToolMode::Erase => Stroke::Erase,
            ToolMode::Idle => Stroke::Paint(Annotation::new(self.color, Mark::None)),
            ToolMode::Mark(mark) => Stroke::Paint(Annotation::new(self.color, mark)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressing_the_active_mark_again_returns_to_idle() {
        let mut tool = ToolState::new(Color::Blue);
        tool.press(ToolButton::Mark(Mark::Dot));
        assert_eq!(tool.mode(), ToolMode::Mark(Mark::Dot));

        tool.press(ToolButton::Mark(Mark::Dot));
        assert_eq!(tool.mode(), ToolMode::Idle);
    }

    #[test]
    fn another_mark_replaces_erase() {
        let mut tool = ToolState::new(Color::Blue);
        tool.press(ToolButton::Erase);
        assert_eq!(tool.stroke(), Stroke::Erase);

        tool.press(ToolButton::Mark(Mark::Cross));
        assert_eq!(tool.mode(), ToolMode::Mark(Mark::Cross));

        tool.press(ToolButton::Erase);
        tool.press(ToolButton::Erase);
        assert_eq!(tool.mode(), ToolMode::Idle);
    }

    #[test]
    fn color_buttons_leave_the_mode_alone() {
        let mut tool = ToolState::new(Color::Blue);
        tool.press(ToolButton::Mark(Mark::HorizontalBar));
        tool.press(ToolButton::Color(Color::Red));

        assert_eq!(tool.mode(), ToolMode::Mark(Mark::HorizontalBar));
        assert!(tool.is_pressed(ToolButton::Color(Color::Red)));
        assert!(!tool.is_pressed(ToolButton::Color(Color::Blue)));
        assert_eq!(
            tool.stroke(),
            Stroke::Paint(Annotation::new(Color::Red, Mark::HorizontalBar))
        );
    }

    #[test]
    fn unknown_button_values_do_not_parse() {
        assert_eq!(ToolButton::parse_color("green"), None);
        assert_eq!(ToolButton::parse_tool(""), None);
        assert_eq!(ToolButton::parse_tool("zigzag"), None);
        assert_eq!(ToolButton::parse_tool("erase"), Some(ToolButton::Erase));
        assert_eq!(
            ToolButton::parse_tool("vertical"),
            Some(ToolButton::Mark(Mark::VerticalBar))
        );
    }
}
