//! Chronological record of strokes with undo/redo
use crate::{group_strokes, Point, RenderGroups, Scalar, Stroke, StrokeId, Tool};
use std::fmt;

/// Misuse of the ledger interface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LedgerError {
    /// Point appended while there is no stroke in progress
    NoActiveStroke,
    /// Undo requested with no strokes in the ledger
    EmptyLedger,
    /// Redo requested with nothing undone
    EmptyUndoStack,
    /// Pen stroke requested without a color
    InvalidModeConfig,
    /// Stroke width is not a positive finite number
    InvalidStrokeWidth(Scalar),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::NoActiveStroke => write!(f, "no stroke is in progress"),
            LedgerError::EmptyLedger => write!(f, "nothing to undo"),
            LedgerError::EmptyUndoStack => write!(f, "nothing to redo"),
            LedgerError::InvalidModeConfig => write!(f, "pen stroke requires a color"),
            LedgerError::InvalidStrokeWidth(width) => {
                write!(f, "stroke width must be positive: {}", width)
            }
        }
    }
}

impl std::error::Error for LedgerError {}

/// Ordered log of pen and eraser strokes
///
/// Insertion order is the drawing order: it is the z-order of pen strokes and the
/// occlusion order of eraser strokes. Only the last stroke, while it is not finished,
/// accepts new points. Strokes removed by `undo` are kept on the undo stack until
/// `redo` brings them back or a new stroke is started.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    strokes: Vec<Stroke>,
    undone: Vec<Stroke>,
    next_id: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new stroke with a single `point`
    ///
    /// Finishes the stroke in progress (if any) and clears the undo stack.
    pub fn start_stroke(&mut self, tool: Tool, point: Point) -> Result<StrokeId, LedgerError> {
        let kind = tool.kind()?;
        let width = tool.stroke_width()?;
        self.end_stroke();

        let id = StrokeId(self.next_id);
        self.next_id += 1;
        self.strokes.push(Stroke::new(id, kind, width, point));
        if !self.undone.is_empty() {
            tracing::debug!("[ledger:redo_dropped] {}", self.undone.len());
            self.undone.clear();
        }
        tracing::debug!("[ledger:start] {:?} {:?} width={} at {:?}", id, kind, width, point);
        Ok(id)
    }

    /// Append point to the stroke in progress
    pub fn append_point(&mut self, point: Point) -> Result<(), LedgerError> {
        match self.strokes.last_mut() {
            Some(stroke) if !stroke.is_finished() => {
                tracing::trace!("[ledger:append] {:?} {:?}", stroke.id(), point);
                stroke.push(point);
                Ok(())
            }
            _ => Err(LedgerError::NoActiveStroke),
        }
    }

    /// Finish the stroke in progress
    ///
    /// Returns `false` if there was no stroke in progress.
    pub fn end_stroke(&mut self) -> bool {
        match self.strokes.last_mut() {
            Some(stroke) if !stroke.is_finished() => {
                stroke.finish();
                tracing::debug!(
                    "[ledger:end] {:?} points={}",
                    stroke.id(),
                    stroke.points().len()
                );
                true
            }
            _ => false,
        }
    }

    /// Move the last stroke to the undo stack
    ///
    /// A stroke in progress stays unfinished, so `redo` restores it exactly. It
    /// accepts no points while it is on the undo stack.
    pub fn undo(&mut self) -> Result<&Stroke, LedgerError> {
        let stroke = self.strokes.pop().ok_or(LedgerError::EmptyLedger)?;
        tracing::debug!("[ledger:undo] {:?}", stroke.id());
        let index = self.undone.len();
        self.undone.push(stroke);
        Ok(&self.undone[index])
    }

    /// Move the most recently undone stroke back to the end of the ledger
    pub fn redo(&mut self) -> Result<&Stroke, LedgerError> {
        let stroke = self.undone.pop().ok_or(LedgerError::EmptyUndoStack)?;
        tracing::debug!("[ledger:redo] {:?}", stroke.id());
        let index = self.strokes.len();
        self.strokes.push(stroke);
        Ok(&self.strokes[index])
    }

    /// Partition strokes into groups renderable with occlusion masks
    pub fn group_for_render(&self) -> RenderGroups<'_> {
        group_strokes(&self.strokes)
    }

    /// All strokes in drawing order
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn last(&self) -> Option<&Stroke> {
        self.strokes.last()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Number of strokes available for redo
    pub fn undo_depth(&self) -> usize {
        self.undone.len()
    }

    /// Whether a stroke is in progress
    pub fn is_drawing(&self) -> bool {
        self.strokes
            .last()
            .is_some_and(|stroke| !stroke.is_finished())
    }
}
