//! Surface identifiers and the flat color/mark tags an annotation carries.

use crate::CodeError;
use std::fmt;
use std::str::FromStr;

/// A clinically distinct face of a tooth, named by its position in the chart cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Top,
    Left,
    Center,
    Right,
    Bottom,
}

impl Surface {
    pub const ALL: [Surface; 5] = [
        Surface::Top,
        Surface::Left,
        Surface::Center,
        Surface::Right,
        Surface::Bottom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Surface::Top => "top",
            Surface::Left => "left",
            Surface::Center => "center",
            Surface::Right => "right",
            Surface::Bottom => "bottom",
        }
    }

    /// Clinical name of the face drawn in this position.
    pub fn clinical_name(self) -> &'static str {
        match self {
            Surface::Top => "Occlusal surface",
            Surface::Left => "Mesial surface",
            Surface::Center => "Central surface",
            Surface::Right => "Distal surface",
            Surface::Bottom => "Lingual surface",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Surface {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Surface::ALL
            .into_iter()
            .find(|surface| surface.as_str() == s)
            .ok_or_else(|| CodeError::UnknownSurface(s.to_string()))
    }
}

/// Fill color of an annotated surface.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    Blue,
    Red,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Blue, Color::Red];

    pub fn as_str(self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Red => "red",
        }
    }

    /// Lenient parse: anything outside the enumeration becomes the default color.
    pub fn parse_or_default(input: &str) -> Self {
        input.parse().unwrap_or_default()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::ALL
            .into_iter()
            .find(|color| color.as_str() == s)
            .ok_or_else(|| CodeError::UnknownColor(s.to_string()))
    }
}

/// Optional glyph drawn over a filled surface.
///
/// `None` serializes as the empty string, matching what the chart client
/// submits for an unmarked surface.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Mark {
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = "dot")]
    Dot,
    #[serde(rename = "x")]
    Cross,
    #[serde(rename = "vertical")]
    VerticalBar,
    #[serde(rename = "horizontal")]
    HorizontalBar,
}

impl Mark {
    pub const ALL: [Mark; 5] = [
        Mark::None,
        Mark::Dot,
        Mark::Cross,
        Mark::VerticalBar,
        Mark::HorizontalBar,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mark::None => "",
            Mark::Dot => "dot",
            Mark::Cross => "x",
            Mark::VerticalBar => "vertical",
            Mark::HorizontalBar => "horizontal",
        }
    }

    pub fn is_none(self) -> bool {
        self == Mark::None
    }

    /// Lenient parse: anything outside the enumeration means "no mark".
    pub fn parse_or_none(input: &str) -> Self {
        input.parse().unwrap_or_default()
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mark {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mark::ALL
            .into_iter()
            .find(|mark| mark.as_str() == s)
            .ok_or_else(|| CodeError::UnknownMark(s.to_string()))
    }
}
