//! Input event types for the measurement tool.
//!
//! Events from the drawing surface and its side panel are represented
//! as messages in the Elm architecture style and applied to the engine
//! by [`crate::handle_tool_message`].

/// Messages produced by the drawing surface and the wall panel.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolMessage {
    /// Pointer clicked on the canvas
    PointerDown { x: f32, y: f32 },
    /// An existing vertex was dragged to a new position
    VertexDragged { index: usize, x: f32, y: f32 },
    /// A vertex is hovered (or hover ended) for highlighting
    VertexHovered(Option<usize>),
    /// Text entered in a wall's length field
    WallLengthInput { index: usize, value: String },
    /// Clear button pressed
    Clear,
}
