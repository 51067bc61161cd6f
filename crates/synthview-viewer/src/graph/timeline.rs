use std::collections::HashMap;
use std::hash::Hash;
use synthview_core::{
    Level, PathId, ProcessTimelines, TimelinePoint, TimelineRow, VerticalRelation, ViewPoint,
};

use crate::error::ViewerError;
use crate::graph::highlight::{compute_highlight, HighlightState};
use crate::net::protocol::{FetchKind, FetchRequest, RequestToken, TokenSource};

type RowFilter = fn(&ViewPoint) -> bool;

// Display categories, in order. The last pass takes whatever is left.
const CATEGORY_PASSES: [RowFilter; 5] = [
    |vp| vp.component.is_empty(),
    |vp| vp.level == Level::Cad,
    |vp| vp.level == Level::Fun,
    |vp| vp.level == Level::EndPoint,
    |_| true,
];

/// Orders timeline rows by component name, then pulls them out category by
/// category. Both steps are stable.
pub fn group_rows<T>(mut rows: Vec<TimelineRow<T>>) -> Vec<TimelineRow<T>> {
    rows.sort_by(|a, b| a.viewpoint.component.cmp(&b.viewpoint.component));

    let mut out = Vec::with_capacity(rows.len());
    let mut rest = rows;
    for pass in CATEGORY_PASSES {
        let (taken, left): (Vec<_>, Vec<_>) =
            rest.into_iter().partition(|row| pass(&row.viewpoint));
        out.extend(taken);
        rest = left;
    }
    out
}

pub fn viewpoint_label(vp: &ViewPoint) -> String {
    format!("{}@{}", vp.component, vp.level)
}

/// Process id to point lookup for resolving related ids to their payloads.
#[derive(Debug, Clone)]
pub struct ProcessIndex<T> {
    points: HashMap<T, TimelinePoint<T>>,
}

impl<T> Default for ProcessIndex<T> {
    fn default() -> Self {
        Self {
            points: HashMap::new(),
        }
    }
}

impl<T: Copy + Eq + Hash> ProcessIndex<T> {
    pub fn build(rows: &[TimelineRow<T>]) -> Self {
        let mut points = HashMap::new();
        for row in rows {
            for point in &row.points {
                for p in point {
                    points.insert(p.process_id, p.clone());
                }
            }
        }
        Self { points }
    }

    pub fn get(&self, id: &T) -> Option<&TimelinePoint<T>> {
        self.points.get(id)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Timelines of the selected synthesis node plus the point highlight.
#[derive(Debug, Default)]
pub struct TimelineView {
    pub node: Option<PathId>,
    pub rows: Vec<TimelineRow<u64>>,
    pub relations: Vec<VerticalRelation<u64>>,
    pub index: ProcessIndex<u64>,
    pub highlight: HighlightState<u64>,
    pub detail: Vec<TimelinePoint<u64>>,
    pub loaded: bool,
    pending: Option<RequestToken>,
}

impl TimelineView {
    /// Switches to `node`, dropping data of the previous one. Returns the
    /// request to issue, or `None` when `node` is already shown.
    pub fn show_node(&mut self, node: PathId, tokens: &mut TokenSource) -> Option<FetchRequest> {
        if self.node.as_ref() == Some(&node) {
            return None;
        }
        self.node = Some(node);
        self.clear_data();
        Some(self.request(tokens))
    }

    pub fn reload(&mut self, tokens: &mut TokenSource) -> Option<FetchRequest> {
        self.node.as_ref()?;
        Some(self.request(tokens))
    }

    fn request(&mut self, tokens: &mut TokenSource) -> FetchRequest {
        let node = self.node.clone().unwrap_or_else(PathId::root);
        let token = tokens.issue(node.clone());
        self.pending = Some(token.clone());
        FetchRequest {
            token,
            kind: FetchKind::Timelines(node),
        }
    }

    fn clear_data(&mut self) {
        self.rows.clear();
        self.relations.clear();
        self.index = ProcessIndex::default();
        self.highlight = HighlightState::default();
        self.detail.clear();
        self.loaded = false;
    }

    pub fn is_pending(&self, token: &RequestToken) -> bool {
        self.pending.as_ref() == Some(token)
    }

    pub fn apply(&mut self, token: &RequestToken, data: ProcessTimelines<u64>) -> bool {
        if !self.is_pending(token) || self.node.as_ref() != Some(&token.target) {
            tracing::debug!(seq = token.seq, target = %token.target, "dropping stale timelines");
            return false;
        }
        self.pending = None;
        self.clear_data();
        self.index = ProcessIndex::build(&data.timelines);
        self.rows = group_rows(data.timelines);
        self.relations = data.vertical_relations;
        self.loaded = true;
        tracing::debug!(
            node = %token.target,
            rows = self.rows.len(),
            relations = self.relations.len(),
            "timelines loaded"
        );
        true
    }

    pub fn fail_pending(&mut self, token: &RequestToken) -> bool {
        if self.is_pending(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn point(&self, row: usize, column: usize) -> Option<&[TimelinePoint<u64>]> {
        self.rows
            .get(row)
            .and_then(|r| r.points.get(column))
            .map(Vec::as_slice)
    }

    pub fn select_point(&mut self, row: usize, column: usize) -> Result<(), ViewerError> {
        let Some(point) = self.point(row, column) else {
            return Err(ViewerError::UnknownPoint { row, column });
        };
        let point = point.to_vec();
        self.select_points(point);
        Ok(())
    }

    /// Replaces the highlight with the neighbours of `points`.
    pub fn select_points(&mut self, points: Vec<TimelinePoint<u64>>) {
        self.highlight = compute_highlight(&points, &self.relations);
        self.detail = points;
    }

    /// Width in characters of the widest row label, at least the header's.
    pub fn label_width(&self, header: &str) -> usize {
        self.rows
            .iter()
            .map(|r| viewpoint_label(&r.viewpoint).chars().count())
            .fold(header.chars().count(), usize::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(component: &str, level: &str) -> TimelineRow<u64> {
        TimelineRow {
            viewpoint: ViewPoint {
                component: component.to_string(),
                level: Level::from(level.to_string()),
            },
            points: Vec::new(),
        }
    }

    fn keys(rows: &[TimelineRow<u64>]) -> Vec<(String, String)> {
        rows.iter()
            .map(|r| (r.viewpoint.component.clone(), r.viewpoint.level.to_string()))
            .collect()
    }

    fn pair(c: &str, l: &str) -> (String, String) {
        (c.to_string(), l.to_string())
    }

    fn pt(id: u64) -> TimelinePoint<u64> {
        TimelinePoint {
            process_id: id,
            info: serde_json::json!(format!("step {id}")),
        }
    }

    #[test]
    fn grouping_puts_empty_component_first_then_levels() {
        let rows = vec![
            row("b", ""),
            row("a", "EndPoint"),
            row("", "Fun"),
            row("a", "CAD"),
        ];
        let grouped = group_rows(rows);
        assert_eq!(
            keys(&grouped),
            vec![
                pair("", "Fun"),
                pair("a", "CAD"),
                pair("a", "EndPoint"),
                pair("b", ""),
            ]
        );
    }

    #[test]
    fn sort_ties_keep_input_order() {
        let rows = vec![
            row("x", "Instr"),
            row("x", "Target"),
            row("w", "Fun"),
            row("x", "Fun"),
        ];
        let grouped = group_rows(rows);
        assert_eq!(
            keys(&grouped),
            vec![
                pair("w", "Fun"),
                pair("x", "Fun"),
                pair("x", "Instr"),
                pair("x", "Target"),
            ]
        );
    }

    #[test]
    fn grouping_is_idempotent_and_lossless() {
        let rows = vec![
            row("pu2", "Fun"),
            row("", "CAD"),
            row("pu1", "EndPoint"),
            row("pu1", "Fun"),
            row("net", "Other"),
            row("", ""),
        ];
        let once = group_rows(rows.clone());
        assert_eq!(once.len(), rows.len());
        let twice = group_rows(once.clone());
        assert_eq!(keys(&once), keys(&twice));
    }

    #[test]
    fn viewpoint_label_joins_component_and_level() {
        assert_eq!(viewpoint_label(&row("fram1", "Fun").viewpoint), "fram1@Fun");
        assert_eq!(viewpoint_label(&row("", "").viewpoint), "@");
    }

    fn loaded_view() -> (TimelineView, TokenSource) {
        let mut tokens = TokenSource::default();
        let mut view = TimelineView::default();
        let req = view.show_node(PathId::from("-:1"), &mut tokens).unwrap();
        assert_eq!(req.kind, FetchKind::Timelines(PathId::from("-:1")));

        let mut r1 = row("pu", "Fun");
        r1.points = vec![vec![pt(7)], vec![], vec![pt(9), pt(10)]];
        let mut r2 = row("", "CAD");
        r2.points = vec![vec![pt(3)], vec![pt(5)], vec![pt(11)]];
        let data = ProcessTimelines {
            timelines: vec![r1, r2],
            vertical_relations: vec![
                VerticalRelation(7, 3),
                VerticalRelation(5, 9),
                VerticalRelation(9, 11),
            ],
        };
        assert!(view.apply(&req.token, data));
        (view, tokens)
    }

    #[test]
    fn loaded_timelines_are_grouped_and_indexed() {
        let (view, _) = loaded_view();
        assert_eq!(view.rows[0].viewpoint.component, "");
        assert_eq!(view.index.len(), 6);
        assert_eq!(
            view.index.get(&9).map(|p| p.info.clone()),
            Some(serde_json::json!("step 9"))
        );
        assert_eq!(view.label_width("view point"), "view point".len());
    }

    #[test]
    fn selecting_a_point_replaces_highlight() {
        let (mut view, _) = loaded_view();
        view.select_point(1, 2).unwrap();
        assert_eq!(view.highlight.current, vec![9, 10]);
        assert_eq!(view.highlight.up, vec![5]);
        assert_eq!(view.highlight.down, vec![11]);
        assert_eq!(view.detail.len(), 2);

        view.select_point(0, 0).unwrap();
        assert_eq!(view.highlight.current, vec![3]);
        assert_eq!(view.highlight.up, vec![7]);
        assert!(view.highlight.down.is_empty());

        assert!(matches!(
            view.select_point(5, 0),
            Err(ViewerError::UnknownPoint { row: 5, column: 0 })
        ));
    }

    #[test]
    fn stale_timelines_are_dropped() {
        let mut tokens = TokenSource::default();
        let mut view = TimelineView::default();
        let old = view.show_node(PathId::from("-:1"), &mut tokens).unwrap();
        let new = view.show_node(PathId::from("-:2"), &mut tokens).unwrap();

        assert!(!view.apply(&old.token, ProcessTimelines::default()));
        assert!(!view.loaded);
        assert!(view.apply(&new.token, ProcessTimelines::default()));
        assert!(view.loaded);
    }

    #[test]
    fn same_node_does_not_refetch() {
        let (mut view, mut tokens) = loaded_view();
        assert!(view.show_node(PathId::from("-:1"), &mut tokens).is_none());
        assert!(view.reload(&mut tokens).is_some());
    }
}
