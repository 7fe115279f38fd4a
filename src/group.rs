//! Partitioning of strokes into groups rendered with occlusion masks
//!
//! Erasing never modifies ink, erasers are rendered as masks over it. To make an
//! eraser affect only the ink drawn before it, strokes are split into groups: every
//! group is a run of pen strokes followed by the eraser strokes drawn after them. A
//! pen stroke drawn after an eraser opens a new group. Pen strokes of group `i` are
//! then masked by the erasers of groups `i..N`.
use crate::{BBox, Stroke};

/// Contiguous run of pen strokes with the erasers that follow them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderGroup<'a> {
    pens: Vec<&'a Stroke>,
    erasers: Vec<&'a Stroke>,
}

impl<'a> RenderGroup<'a> {
    /// Pen strokes in drawing order
    pub fn pens(&self) -> &[&'a Stroke] {
        &self.pens
    }

    /// Eraser strokes drawn after the pen strokes of this group
    pub fn erasers(&self) -> &[&'a Stroke] {
        &self.erasers
    }

    pub fn is_empty(&self) -> bool {
        self.pens.is_empty() && self.erasers.is_empty()
    }

    /// Area covered by the pen strokes of the group
    pub fn bbox(&self) -> Option<BBox> {
        self.pens.iter().fold(None, |bbox, stroke| {
            Some(stroke.bbox().union_opt(bbox))
        })
    }
}

/// Rendering groups in drawing order
#[derive(Debug, Clone, PartialEq)]
pub struct RenderGroups<'a> {
    groups: Vec<RenderGroup<'a>>,
}

impl<'a> RenderGroups<'a> {
    pub fn groups(&self) -> &[RenderGroup<'a>] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RenderGroup<'a>> {
        self.groups.get(index)
    }

    /// Eraser strokes occluding pen strokes of the group at `index`
    ///
    /// These are the erasers of this group and of every group after it, in drawing order.
    pub fn mask(&self, index: usize) -> impl Iterator<Item = &'a Stroke> + '_ {
        self.groups
            .get(index..)
            .unwrap_or_default()
            .iter()
            .flat_map(|group| group.erasers.iter().copied())
    }

    /// Pen strokes of all groups in drawing order
    pub fn pens(&self) -> impl Iterator<Item = &'a Stroke> + '_ {
        self.groups
            .iter()
            .flat_map(|group| group.pens.iter().copied())
    }
}

impl<'a> IntoIterator for RenderGroups<'a> {
    type Item = RenderGroup<'a>;
    type IntoIter = <Vec<RenderGroup<'a>> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Partition strokes into rendering groups
///
/// Always produces at least one (possibly empty) group.
pub fn group_strokes(strokes: &[Stroke]) -> RenderGroups<'_> {
    let _span = tracing::trace_span!("[group]", strokes = strokes.len()).entered();
    let mut groups = Vec::new();
    let mut current = RenderGroup::default();
    for stroke in strokes {
        if stroke.kind().is_pen() {
            if !current.erasers.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
            current.pens.push(stroke);
        } else {
            current.erasers.push(stroke);
        }
    }
    groups.push(current);
    RenderGroups { groups }
}
