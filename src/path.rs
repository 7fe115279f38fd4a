//! Path commands produced by the smoother and their SVG path data representation
//!
//! See [SVG Path Specification](https://www.w3.org/TR/SVG11/paths.html#PathData)
use crate::Point;
use std::{fmt, io::Write};

/// Draw command of a stroke path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    /// Start of the path, the only command of a single point stroke
    MoveTo(Point),
    /// Cubic bezier curve from the current position with two control points
    CubicTo(Point, Point, Point),
}

impl PathCmd {
    /// Get destination point of the command
    pub fn dst(&self) -> Point {
        use PathCmd::*;
        *match self {
            MoveTo(dst) => dst,
            CubicTo(_, _, dst) => dst,
        }
    }
}

impl fmt::Display for PathCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathCmd::MoveTo(p) => write!(f, "M{:?}", p),
            PathCmd::CubicTo(p1, p2, p3) => write!(f, "C{:?} {:?} {:?}", p1, p2, p3),
        }
    }
}

/// Ordered list of path commands describing a single stroke
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    cmds: Vec<PathCmd>,
}

impl PathData {
    pub fn new(cmds: Vec<PathCmd>) -> Self {
        Self { cmds }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn cmds(&self) -> &[PathCmd] {
        &self.cmds
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    /// Number of cubic segments in the path
    pub fn curves_count(&self) -> usize {
        self.cmds
            .iter()
            .filter(|cmd| matches!(cmd, PathCmd::CubicTo(..)))
            .count()
    }

    /// Save path in SVG path format.
    pub fn save(&self, mut out: impl Write) -> std::io::Result<()> {
        write!(&mut out, "{}", self)
    }

    /// Convert path to SVG path representation
    pub fn to_svg_path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cmds = self.cmds.iter();
        if let Some(cmd) = cmds.next() {
            write!(f, "{}", cmd)?;
        }
        for cmd in cmds {
            write!(f, " {}", cmd)?;
        }
        Ok(())
    }
}

impl FromIterator<PathCmd> for PathData {
    fn from_iter<T: IntoIterator<Item = PathCmd>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Extend<PathCmd> for PathData {
    fn extend<T: IntoIterator<Item = PathCmd>>(&mut self, iter: T) {
        self.cmds.extend(iter)
    }
}

impl IntoIterator for PathData {
    type Item = PathCmd;
    type IntoIter = <Vec<PathCmd> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.cmds.into_iter()
    }
}

impl<'a> IntoIterator for &'a PathData {
    type Item = &'a PathCmd;
    type IntoIter = <&'a Vec<PathCmd> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.cmds.iter()
    }
}
