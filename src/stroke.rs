//! Strokes recorded by the ledger
use crate::{to_path_commands, BBox, LedgerError, PathData, Point, Scalar, RGBA};
use std::fmt;

/// Drawing tool mode as selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    #[default]
    Pen,
    Eraser,
}

/// Tool settings supplied when a stroke is started
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tool {
    pub mode: Mode,
    /// Ink color, required by the pen and ignored by the eraser
    pub color: Option<RGBA>,
    /// Line thickness, must be positive
    pub width: Scalar,
}

impl Tool {
    pub fn pen(color: RGBA, width: Scalar) -> Self {
        Self {
            mode: Mode::Pen,
            color: Some(color),
            width,
        }
    }

    pub fn eraser(width: Scalar) -> Self {
        Self {
            mode: Mode::Eraser,
            color: None,
            width,
        }
    }

    /// Validated kind of the stroke this tool draws
    pub fn kind(&self) -> Result<StrokeKind, LedgerError> {
        match (self.mode, self.color) {
            (Mode::Pen, Some(color)) => Ok(StrokeKind::Pen { color }),
            (Mode::Pen, None) => Err(LedgerError::InvalidModeConfig),
            (Mode::Eraser, _) => Ok(StrokeKind::Eraser),
        }
    }

    /// Validated width of the stroke this tool draws
    pub fn stroke_width(&self) -> Result<Scalar, LedgerError> {
        if self.width.is_finite() && self.width > 0.0 {
            Ok(self.width)
        } else {
            Err(LedgerError::InvalidStrokeWidth(self.width))
        }
    }
}

/// What a stroke does to the drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "lowercase"))]
pub enum StrokeKind {
    /// Visible ink of the given color
    Pen { color: RGBA },
    /// Occluder hiding ink drawn before it, has no color of its own
    Eraser,
}

impl StrokeKind {
    pub fn mode(&self) -> Mode {
        match self {
            StrokeKind::Pen { .. } => Mode::Pen,
            StrokeKind::Eraser => Mode::Eraser,
        }
    }

    pub fn is_pen(&self) -> bool {
        matches!(self, StrokeKind::Pen { .. })
    }

    pub fn is_eraser(&self) -> bool {
        matches!(self, StrokeKind::Eraser)
    }
}

/// Identifier of a stroke, unique within a ledger
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StrokeId(pub(crate) u64);

impl StrokeId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Single pointer-down to pointer-up gesture
///
/// Holds at least one point. Points are only ever appended, and only until the
/// stroke is finished.
#[derive(Clone, PartialEq)]
pub struct Stroke {
    id: StrokeId,
    kind: StrokeKind,
    width: Scalar,
    points: Vec<Point>,
    finished: bool,
}

impl fmt::Debug for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stroke")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("width", &self.width)
            .field("points", &self.points.len())
            .field("finished", &self.finished)
            .finish()
    }
}

impl Stroke {
    pub(crate) fn new(id: StrokeId, kind: StrokeKind, width: Scalar, point: Point) -> Self {
        Self {
            id,
            kind,
            width,
            points: vec![point],
            finished: false,
        }
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn kind(&self) -> StrokeKind {
        self.kind
    }

    pub fn mode(&self) -> Mode {
        self.kind.mode()
    }

    /// Ink color, `None` for eraser strokes
    pub fn color(&self) -> Option<RGBA> {
        match self.kind {
            StrokeKind::Pen { color } => Some(color),
            StrokeKind::Eraser => None,
        }
    }

    pub fn width(&self) -> Scalar {
        self.width
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Whether the gesture that produced this stroke is over
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub(crate) fn finish(&mut self) {
        self.finished = true;
    }

    /// Smoothed path of the stroke
    pub fn path(&self) -> PathData {
        to_path_commands(&self.points)
    }

    /// Area covered by the stroke, including half of its width on every side
    pub fn bbox(&self) -> BBox {
        let first = self.points[0];
        self.points[1..]
            .iter()
            .fold(BBox::new(first, first), |bbox, point| bbox.extend(*point))
            .inflate(self.width / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_kind() {
        assert_eq!(
            Tool::pen(RGBA::RED, 4.0).kind(),
            Ok(StrokeKind::Pen { color: RGBA::RED })
        );
        assert_eq!(Tool::eraser(4.0).kind(), Ok(StrokeKind::Eraser));

        let tool = Tool {
            mode: Mode::Pen,
            color: None,
            width: 4.0,
        };
        assert_eq!(tool.kind(), Err(LedgerError::InvalidModeConfig));

        // eraser ignores color
        let tool = Tool {
            mode: Mode::Eraser,
            color: Some(RGBA::BLUE),
            width: 4.0,
        };
        assert_eq!(tool.kind(), Ok(StrokeKind::Eraser));
    }

    #[test]
    fn test_tool_width() {
        assert_eq!(Tool::eraser(0.5).stroke_width(), Ok(0.5));
        assert_eq!(
            Tool::eraser(0.0).stroke_width(),
            Err(LedgerError::InvalidStrokeWidth(0.0))
        );
        assert_eq!(
            Tool::eraser(-1.0).stroke_width(),
            Err(LedgerError::InvalidStrokeWidth(-1.0))
        );
        assert!(Tool::eraser(Scalar::NAN).stroke_width().is_err());
        assert!(Tool::eraser(Scalar::INFINITY).stroke_width().is_err());
    }

    #[test]
    fn test_stroke() {
        let mut stroke = Stroke::new(
            StrokeId(3),
            StrokeKind::Pen { color: RGBA::BLUE },
            4.0,
            Point::new(1.0, 1.0),
        );
        assert_eq!(stroke.color(), Some(RGBA::BLUE));
        assert_eq!(stroke.mode(), Mode::Pen);
        assert_eq!(stroke.path().to_svg_path(), "M1,1");

        stroke.push(Point::new(5.0, 3.0));
        stroke.push(Point::new(5.0, 3.0));
        assert_eq!(stroke.points().len(), 3);
        assert_eq!(stroke.path().curves_count(), 2);

        let bbox = stroke.bbox();
        assert_eq!(bbox.min(), Point::new(-1.0, -1.0));
        assert_eq!(bbox.max(), Point::new(7.0, 5.0));

        assert!(!stroke.is_finished());
        stroke.finish();
        assert!(stroke.is_finished());
        assert!(format!("{:?}", stroke).contains("points: 3"));
    }

    #[test]
    fn test_eraser_has_no_color() {
        let stroke = Stroke::new(StrokeId(0), StrokeKind::Eraser, 10.0, Point::new(0.0, 0.0));
        assert_eq!(stroke.color(), None);
        assert!(stroke.kind().is_eraser());
        assert!(!stroke.kind().is_pen());
    }
}
