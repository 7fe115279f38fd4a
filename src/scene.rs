//! Owned render snapshot handed to the presentation layer
//!
//! Presenter draws every layer's pens in order, each layer masked by `Scene::mask`
//! of its index. Path data is shared via `Arc` so the snapshot is cheap to clone
//! and to keep around while the ledger keeps changing.
use crate::{BBox, RenderGroups, Scalar, Stroke, StrokeId, StrokeKind};
use std::{collections::HashMap, sync::Arc};

/// Smoothed path of a single stroke ready to be drawn
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StrokePath {
    pub id: StrokeId,
    pub kind: StrokeKind,
    pub width: Scalar,
    /// SVG path data
    pub d: Arc<str>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub bbox: BBox,
}

/// Rendering group converted to path data
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SceneLayer {
    pub pens: Vec<StrokePath>,
    pub erasers: Vec<StrokePath>,
}

impl SceneLayer {
    /// Area covered by pen strokes of the layer
    pub fn bbox(&self) -> Option<BBox> {
        self.pens
            .iter()
            .fold(None, |bbox, path| Some(path.bbox.union_opt(bbox)))
    }
}

/// Snapshot of the whole drawing
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Scene {
    layers: Vec<SceneLayer>,
}

impl Scene {
    /// Build scene from rendering groups, reusing path data from the `cache`
    pub fn build(groups: &RenderGroups<'_>, cache: &mut PathCache) -> Self {
        let layers = groups
            .groups()
            .iter()
            .map(|group| SceneLayer {
                pens: group.pens().iter().map(|s| cache.stroke_path(s)).collect(),
                erasers: group.erasers().iter().map(|s| cache.stroke_path(s)).collect(),
            })
            .collect();
        cache.evict();
        Self { layers }
    }

    pub fn layers(&self) -> &[SceneLayer] {
        &self.layers
    }

    /// Eraser paths masking pens of the layer at `index`
    pub fn mask(&self, index: usize) -> impl Iterator<Item = &StrokePath> {
        self.layers
            .get(index..)
            .unwrap_or_default()
            .iter()
            .flat_map(|layer| layer.erasers.iter())
    }

    /// Area covered by all pen strokes
    pub fn bbox(&self) -> Option<BBox> {
        self.layers.iter().fold(None, |bbox, layer| match bbox {
            Some(bbox) => Some(layer.bbox().map_or(bbox, |other| bbox.union(other))),
            None => layer.bbox(),
        })
    }

    /// Total number of strokes in the scene
    pub fn strokes_count(&self) -> usize {
        self.layers
            .iter()
            .map(|layer| layer.pens.len() + layer.erasers.len())
            .sum()
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    points: usize,
    d: Arc<str>,
    bbox: BBox,
    generation: u64,
}

/// Memoized SVG path data and bounds of strokes
///
/// Strokes only grow by appending points, so the pair `(id, points count)` identifies
/// stroke geometry. Strokes which were not used by the last scene are evicted.
#[derive(Debug, Clone, Default)]
pub struct PathCache {
    entries: HashMap<StrokeId, CacheEntry>,
    generation: u64,
    hits: usize,
    misses: usize,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the stroke, smoothed only if its geometry changed since it was cached
    pub fn stroke_path(&mut self, stroke: &Stroke) -> StrokePath {
        let points = stroke.points().len();
        let generation = self.generation;
        let (d, bbox) = match self.entries.get_mut(&stroke.id()) {
            Some(entry) if entry.points == points => {
                self.hits += 1;
                entry.generation = generation;
                (entry.d.clone(), entry.bbox)
            }
            _ => {
                self.misses += 1;
                let d: Arc<str> = stroke.path().to_svg_path().into();
                let bbox = stroke.bbox();
                self.entries.insert(
                    stroke.id(),
                    CacheEntry {
                        points,
                        d: d.clone(),
                        bbox,
                        generation,
                    },
                );
                (d, bbox)
            }
        };
        StrokePath {
            id: stroke.id(),
            kind: stroke.kind(),
            width: stroke.width(),
            d,
            bbox,
        }
    }

    /// Drop entries not used since the previous eviction
    fn evict(&mut self) {
        let generation = self.generation;
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.generation == generation);
        if before != self.entries.len() {
            tracing::debug!("[cache:evict] {}", before - self.entries.len());
        }
        self.generation += 1;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of paths reused and smoothed so far
    pub fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Ledger, LedgerError, Point, Rnd, Tool, RGBA};

    fn scribble(ledger: &mut Ledger, rnd: &mut Rnd, tool: Tool) -> Result<(), LedgerError> {
        let start = 100.0 * rnd.point();
        let mut points = rnd.walk(start, 8, 4.0).into_iter();
        if let Some(first) = points.next() {
            ledger.start_stroke(tool, first)?;
        }
        for point in points {
            ledger.append_point(point)?;
        }
        ledger.end_stroke();
        Ok(())
    }

    fn fresh(ledger: &Ledger) -> Scene {
        Scene::build(&ledger.group_for_render(), &mut PathCache::new())
    }

    #[test]
    fn test_scene_layers() -> Result<(), LedgerError> {
        let mut rnd = Rnd::with_seed(2);
        let mut ledger = Ledger::new();
        scribble(&mut ledger, &mut rnd, Tool::pen(RGBA::RED, 3.0))?;
        scribble(&mut ledger, &mut rnd, Tool::eraser(12.0))?;
        scribble(&mut ledger, &mut rnd, Tool::pen(RGBA::BLUE, 3.0))?;

        let scene = fresh(&ledger);
        assert_eq!(scene.layers().len(), 2);
        assert_eq!(scene.strokes_count(), 3);

        let layer = &scene.layers()[0];
        let stroke = &ledger.strokes()[0];
        assert_eq!(layer.pens[0].id, stroke.id());
        assert_eq!(layer.pens[0].kind, StrokeKind::Pen { color: RGBA::RED });
        assert_eq!(&*layer.pens[0].d, stroke.path().to_svg_path().as_str());
        assert_eq!(layer.erasers[0].kind, StrokeKind::Eraser);
        assert_eq!(layer.erasers[0].width, 12.0);

        assert_eq!(scene.mask(0).count(), 1);
        assert_eq!(scene.mask(1).count(), 0);
        assert_eq!(scene.mask(2).count(), 0);
        Ok(())
    }

    #[test]
    fn test_scene_bbox() -> Result<(), LedgerError> {
        let mut ledger = Ledger::new();
        assert!(fresh(&ledger).bbox().is_none());

        ledger.start_stroke(Tool::pen(RGBA::BLACK, 2.0), Point::new(0.0, 0.0))?;
        ledger.append_point(Point::new(10.0, 0.0))?;
        ledger.start_stroke(Tool::eraser(100.0), Point::new(0.0, 0.0))?;
        ledger.start_stroke(Tool::pen(RGBA::BLACK, 4.0), Point::new(20.0, 20.0))?;
        let bbox = fresh(&ledger).bbox().unwrap();
        assert_eq!(bbox.min(), Point::new(-1.0, -1.0));
        assert_eq!(bbox.max(), Point::new(22.0, 22.0));
        Ok(())
    }

    #[test]
    fn test_cache_reuse() -> Result<(), LedgerError> {
        let mut rnd = Rnd::with_seed(4);
        let mut ledger = Ledger::new();
        let mut cache = PathCache::new();
        for _ in 0..4 {
            scribble(&mut ledger, &mut rnd, Tool::pen(RGBA::BLACK, 2.0))?;
        }
        let s0 = Scene::build(&ledger.group_for_render(), &mut cache);
        assert_eq!(cache.stats(), (0, 4));

        // only the stroke in progress is smoothed again
        ledger.start_stroke(Tool::eraser(5.0), Point::new(1.0, 1.0))?;
        let s1 = Scene::build(&ledger.group_for_render(), &mut cache);
        ledger.append_point(Point::new(2.0, 2.0))?;
        let s2 = Scene::build(&ledger.group_for_render(), &mut cache);
        assert_eq!(cache.stats(), (8, 6));
        assert_eq!(s1.layers()[0].pens, s0.layers()[0].pens);
        for (cached, stroke) in s2.layers()[0].pens.iter().zip(ledger.strokes()) {
            assert_eq!(cached.bbox, stroke.bbox());
        }
        assert_eq!(s2.layers()[0].erasers[0].bbox, ledger.strokes()[4].bbox());
        assert_eq!(s2, fresh(&ledger));
        Ok(())
    }

    #[test]
    fn test_cache_evict() -> Result<(), LedgerError> {
        let mut rnd = Rnd::with_seed(8);
        let mut ledger = Ledger::new();
        let mut cache = PathCache::new();
        scribble(&mut ledger, &mut rnd, Tool::pen(RGBA::BLACK, 2.0))?;
        scribble(&mut ledger, &mut rnd, Tool::pen(RGBA::BLACK, 2.0))?;
        Scene::build(&ledger.group_for_render(), &mut cache);
        assert_eq!(cache.len(), 2);

        ledger.undo()?;
        let scene = Scene::build(&ledger.group_for_render(), &mut cache);
        assert_eq!(cache.len(), 1);
        assert_eq!(scene, fresh(&ledger));

        // redone stroke keeps its id and is smoothed again
        ledger.redo()?;
        let scene = Scene::build(&ledger.group_for_render(), &mut cache);
        assert_eq!(cache.len(), 2);
        assert_eq!(scene, fresh(&ledger));
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_to_json() -> Result<(), Box<dyn std::error::Error>> {
        let mut ledger = Ledger::new();
        ledger.start_stroke(Tool::pen(RGBA::RED, 2.0), Point::new(1.0, 2.0))?;
        ledger.start_stroke(Tool::eraser(6.0), Point::new(3.0, 4.0))?;
        let json = fresh(&ledger).to_json()?;
        assert_eq!(
            json,
            serde_json::json!({
                "layers": [{
                    "pens": [{
                        "id": 0,
                        "kind": { "mode": "pen", "color": "#ff0000" },
                        "width": 2.0,
                        "d": "M1,2",
                    }],
                    "erasers": [{
                        "id": 1,
                        "kind": { "mode": "eraser" },
                        "width": 6.0,
                        "d": "M3,4",
                    }],
                }]
            })
        );
        Ok(())
    }
}
