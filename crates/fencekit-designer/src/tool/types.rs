//! Tool type definitions: ToolState, ToolEvent, Key.

use crate::geometry::CanvasPoint;

/// Interaction mode of the layout tool.
///
/// Gate placement is tracked separately on the tool since it can be armed
/// while idle or while drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolState {
    /// Nothing in progress
    #[default]
    Idle,
    /// A polyline is being drawn, or an existing measurement re-edited
    Drawing,
    /// A vertex of the active polyline follows the pointer
    DraggingPoint { id: u64, moved: bool },
    /// A gate follows the pointer
    DraggingGate { id: u64, moved: bool },
}

impl ToolState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::DraggingPoint { .. } | Self::DraggingGate { .. })
    }
}

/// Keys the tool reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Delete,
    Backspace,
    Char(char),
}

/// Input delivered by the host surface. Positions are in screen
/// coordinates relative to the canvas; times are milliseconds from any
/// monotonic origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolEvent {
    PointerDown { position: CanvasPoint, time_ms: u64 },
    PointerMove { position: CanvasPoint },
    PointerUp { position: CanvasPoint },
    Click { position: CanvasPoint, time_ms: u64 },
    DoubleClick { position: CanvasPoint },
    /// Pointer pressed somewhere outside the canvas bounds
    OutsidePointerDown,
    Key(Key),
}
