//! Drawing session driven by pointer events
//!
//! Input handlers only record points, which is O(1) per event. Grouping and path
//! generation are deferred until the presenter asks for a `Scene`, so any number of
//! events between two frames results in a single rebuild.
use crate::{
    clamp, ConfigError, Ledger, LedgerError, PathCache, Point, Scalar, Scene, SessionConfig,
    StrokeId, Tool, RGBA,
};
use std::sync::Arc;

/// Pointer input translated into ledger calls
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed, starts a new stroke with the current tool
    Start(Point),
    /// Pointer dragged, ignored unless a stroke is in progress
    Move(Point),
    /// Pointer released
    End,
    /// Gesture interrupted, finalizes the stroke exactly as `End` does
    Cancel,
}

/// Single drawing surface state
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    tool: Tool,
    ledger: Ledger,
    cache: PathCache,
    scene: Arc<Scene>,
    dirty: bool,
    rebuilds: usize,
    /// Pointer is down since the last `Start`
    dragging: bool,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let tool = Tool::pen(config.default_color, config.default_width);
        Ok(Self {
            config,
            tool,
            ledger: Ledger::new(),
            cache: PathCache::new(),
            scene: Arc::default(),
            dirty: true,
            rebuilds: 0,
            dragging: false,
        })
    }

    /// Apply pointer event to the ledger
    pub fn handle(&mut self, event: PointerEvent) -> Result<(), LedgerError> {
        let result = match event {
            PointerEvent::Start(point) => {
                let result = self.ledger.start_stroke(self.tool, point).map(|_| {
                    self.dirty = true;
                });
                self.dragging = result.is_ok();
                result
            }
            PointerEvent::Move(point) if self.dragging && self.ledger.is_drawing() => {
                self.ledger.append_point(point).map(|_| {
                    self.dirty = true;
                })
            }
            PointerEvent::Move(_) => Ok(()),
            PointerEvent::End | PointerEvent::Cancel => {
                self.dragging = false;
                self.ledger.end_stroke();
                Ok(())
            }
        };
        if let Err(error) = result {
            tracing::warn!("[session:handle] {:?}: {}", event, error);
        }
        result
    }

    /// Remove the last stroke
    ///
    /// Moves of the current drag are ignored while its stroke is undone.
    pub fn undo(&mut self) -> Result<StrokeId, LedgerError> {
        match self.ledger.undo() {
            Ok(stroke) => {
                let id = stroke.id();
                self.dirty = true;
                Ok(id)
            }
            Err(error) => {
                tracing::warn!("[session:undo] {}", error);
                Err(error)
            }
        }
    }

    /// Restore the most recently undone stroke
    ///
    /// A stroke undone in the middle of a drag keeps receiving points if the drag is
    /// still going on, otherwise it is finished.
    pub fn redo(&mut self) -> Result<StrokeId, LedgerError> {
        match self.ledger.redo() {
            Ok(stroke) => {
                let id = stroke.id();
                if !self.dragging {
                    self.ledger.end_stroke();
                }
                self.dirty = true;
                Ok(id)
            }
            Err(error) => {
                tracing::warn!("[session:redo] {}", error);
                Err(error)
            }
        }
    }

    /// Switch to pen with the given color, keeping current width
    pub fn select_pen(&mut self, color: RGBA) {
        self.tool = Tool::pen(color, self.tool.width);
    }

    /// Switch to eraser, keeping current width
    pub fn select_eraser(&mut self) {
        self.tool = Tool::eraser(self.tool.width);
    }

    /// Set width of the current tool clamped to the configured limits
    ///
    /// Returns the width actually selected. `NaN` leaves the width unchanged.
    pub fn set_width(&mut self, width: Scalar) -> Scalar {
        if !width.is_nan() {
            self.tool.width = clamp(width, self.config.min_width, self.config.max_width);
        }
        self.tool.width
    }

    /// Tool used by the next stroke
    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Pen colors offered to the user
    pub fn palette(&self) -> &[RGBA] {
        &self.config.palette
    }

    /// Label color legible on top of a swatch of the given color
    pub fn swatch_label_color(color: RGBA) -> RGBA {
        color.best_contrast(RGBA::WHITE, RGBA::BLACK)
    }

    /// Whether the next call to `scene` rebuilds the snapshot
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of scene rebuilds performed so far
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }

    /// Snapshot reflecting every event handled so far
    pub fn scene(&mut self) -> Arc<Scene> {
        if self.dirty {
            let _span = tracing::debug_span!("[scene]", strokes = self.ledger.len()).entered();
            let scene = Scene::build(&self.ledger.group_for_render(), &mut self.cache);
            self.scene = Arc::new(scene);
            self.dirty = false;
            self.rebuilds += 1;
        }
        self.scene.clone()
    }
}
