//! Chart editor: the interactive side of the odontogram.
//!
//! The editor turns toolbar clicks and cell clicks into state-model calls and
//! reports the visual state each cell should take. It holds no global state;
//! a [`ChartEditor`] is an explicit session value.

mod layout;
mod session;
mod tool;
mod view;

pub use layout::{ArchLayout, ChartLayout};
pub use session::ChartEditor;
pub use tool::{Stroke, ToolButton, ToolMode, ToolState};
pub use view::CellView;
