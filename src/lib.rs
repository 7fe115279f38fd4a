//! Freehand drawing core with undoable pen strokes and non-destructive erasing.
//!
//! Main features:
//!  - Stroke ledger with undo/redo
//!  - Smoothing of pointer samples into cubic Bézier SVG path data
//!  - Grouping of strokes into layers masked by the erasers drawn after them
//!  - Session that coalesces pointer events into lazily rebuilt scenes
//!
#![deny(warnings)]

mod color;
mod config;
mod curve;
mod geometry;
mod group;
mod ledger;
mod path;
mod scene;
mod session;
mod stroke;
mod utils;

pub use color::{srgb_to_linear, ColorError, RGBA};
pub use config::{ConfigError, SessionConfig};
pub use curve::{control_point, smooth, to_path_commands, Cubic, SmoothIter, SMOOTHING};
pub use geometry::{scalar_fmt, BBox, Point, Scalar, EPSILON, PI};
pub use group::{group_strokes, RenderGroup, RenderGroups};
pub use ledger::{Ledger, LedgerError};
pub use path::{PathCmd, PathData};
pub use scene::{PathCache, Scene, SceneLayer, StrokePath};
pub use session::{PointerEvent, Session};
pub use stroke::{Mode, Stroke, StrokeId, StrokeKind, Tool};
pub use utils::{clamp, Rnd};
