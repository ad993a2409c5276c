//! Message handlers for the measurement tool.
//!
//! Translates drawing-surface events into engine calls and applies the
//! presentation policies that do not belong in the engine itself:
//! forgiving pointer input on a finished shape and the calibration
//! consistency warning.

use crate::engine::{AddVertex, MeasureEngine};
use crate::error::Result;
use crate::geometry::Point;
use crate::message::ToolMessage;

/// Apply a single message to the engine.
///
/// Clicks on an already-closed shape are ignored rather than surfaced,
/// since stray clicks on a finished drawing are ordinary user input.
/// Every other engine error indicates a caller bug and is propagated.
pub fn handle_tool_message(msg: ToolMessage, engine: &mut MeasureEngine) -> Result<()> {
    match msg {
        ToolMessage::PointerDown { x, y } => {
            if engine.is_closed() {
                log::debug!("click at ({x:.0}, {y:.0}) ignored: shape is closed");
                return Ok(());
            }
            match engine.add_vertex(Point::new(x, y))? {
                AddVertex::Appended { index } => {
                    log::debug!("vertex {index} placed at ({x:.0}, {y:.0})");
                }
                AddVertex::Closed => {
                    log::debug!("shape closed with {} walls", engine.wall_count());
                }
            }
        }
        ToolMessage::VertexDragged { index, x, y } => {
            engine.move_vertex(index, Point::new(x, y))?;
            log::debug!("vertex {index} dragged to ({x:.0}, {y:.0})");
        }
        ToolMessage::VertexHovered(index) => {
            engine.set_active_vertex(index);
        }
        ToolMessage::WallLengthInput { index, value } => {
            engine.wall_length_input(index, &value)?;
            warn_on_inconsistent_scales(engine);
        }
        ToolMessage::Clear => {
            engine.reset();
            log::debug!("drawing cleared");
        }
    }
    Ok(())
}

/// Log a warning when the per-wall calibrations disagree by more than
/// the configured threshold. Presentation policy only; the engine
/// still reports the area it derives.
fn warn_on_inconsistent_scales(engine: &MeasureEngine) {
    let threshold = engine.config().consistency_warn_percent;
    if let Some(percent) = engine.scale_consistency_percent() {
        if percent > threshold {
            log::warn!(
                "wall measurements disagree: scale consistency {percent:.1}% exceeds {threshold:.1}%"
            );
        }
    }
}
