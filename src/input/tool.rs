//! Drawing tool selection.

use crate::draw::MarkKind;
use serde::{Deserialize, Serialize};

/// Drawing tool selection.
///
/// The active tool determines what kind of mark is created when a stroke starts.
/// Tools are switched by explicit selection events (toolbar or keybindings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Freehand ink (default)
    #[default]
    Pencil,
    /// Freehand stroke that erases committed ink
    Eraser,
    /// Rectangle outline - from corner to corner
    Rect,
    /// Ellipse inscribed in the dragged box
    Ellipse,
    /// Line with a two-legged head at the release point
    Arrow,
}

impl ToolKind {
    /// Kind of mark this tool produces.
    pub fn mark_kind(self) -> MarkKind {
        match self {
            ToolKind::Pencil | ToolKind::Eraser => MarkKind::Freehand,
            ToolKind::Rect => MarkKind::Rect,
            ToolKind::Ellipse => MarkKind::Ellipse,
            ToolKind::Arrow => MarkKind::Arrow,
        }
    }

    /// Whether marks made with this tool erase instead of paint.
    pub fn is_eraser(self) -> bool {
        self == ToolKind::Eraser
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pencil => "pencil",
            ToolKind::Eraser => "eraser",
            ToolKind::Rect => "rect",
            ToolKind::Ellipse => "ellipse",
            ToolKind::Arrow => "arrow",
        }
    }
}
