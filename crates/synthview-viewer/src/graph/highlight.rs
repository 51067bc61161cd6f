use std::collections::HashSet;
use std::hash::Hash;
use synthview_core::{TimelinePoint, VerticalRelation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightClass {
    Up,
    Current,
    Down,
}

/// Order in which classes win when one glyph belongs to several sets.
pub const HIGHLIGHT_PRIORITY: [HighlightClass; 3] =
    [HighlightClass::Up, HighlightClass::Current, HighlightClass::Down];

/// Process ids related to the selected point, each list deduplicated in
/// first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightState<T> {
    pub up: Vec<T>,
    pub current: Vec<T>,
    pub down: Vec<T>,
}

impl<T> Default for HighlightState<T> {
    fn default() -> Self {
        Self {
            up: Vec::new(),
            current: Vec::new(),
            down: Vec::new(),
        }
    }
}

impl<T: Copy + Eq + Hash> HighlightState<T> {
    pub fn is_empty(&self) -> bool {
        self.up.is_empty() && self.current.is_empty() && self.down.is_empty()
    }

    pub fn ids(&self, class: HighlightClass) -> &[T] {
        match class {
            HighlightClass::Up => &self.up,
            HighlightClass::Current => &self.current,
            HighlightClass::Down => &self.down,
        }
    }

    pub fn contains(&self, class: HighlightClass, id: &T) -> bool {
        self.ids(class).contains(id)
    }

    /// Class used to draw `point`: the first of its ids that falls in any
    /// set decides, with ties between sets broken by `HIGHLIGHT_PRIORITY`.
    pub fn classify(&self, point: &[TimelinePoint<T>]) -> Option<HighlightClass> {
        point.iter().find_map(|p| {
            HIGHLIGHT_PRIORITY
                .into_iter()
                .find(|class| self.contains(*class, &p.process_id))
        })
    }
}

/// Single-hop neighbours of the selected points. Relations are not
/// followed transitively.
pub fn compute_highlight<T: Copy + Eq + Hash>(
    selected: &[TimelinePoint<T>],
    relations: &[VerticalRelation<T>],
) -> HighlightState<T> {
    let chosen: HashSet<T> = selected.iter().map(|p| p.process_id).collect();

    let mut out = HighlightState::default();
    let mut seen_current = HashSet::new();
    for p in selected {
        if seen_current.insert(p.process_id) {
            out.current.push(p.process_id);
        }
    }

    let mut seen_up = HashSet::new();
    let mut seen_down = HashSet::new();
    for rel in relations {
        let (from, to) = (rel.from_id(), rel.to_id());
        if chosen.contains(&to) && seen_up.insert(from) {
            out.up.push(from);
        }
        if chosen.contains(&from) && seen_down.insert(to) {
            out.down.push(to);
        }
    }
    out
}

/// `.` for an empty slot, `*` for one process, `#` for co-located ones.
pub fn point_glyph<T>(point: &[TimelinePoint<T>]) -> char {
    match point.len() {
        0 => '.',
        1 => '*',
        _ => '#',
    }
}
