use smallvec::SmallVec;
use synthview_core::{PathId, TimelinePoint};

use crate::error::ViewerError;
use crate::graph::path::PathCodec;
use crate::graph::selection::{Redraw, SelectionOutcome, SelectionSync};
use crate::graph::timeline::TimelineView;
use crate::net::protocol::{FetchRequest, Incoming, IncomingKind, TokenSource};

/// Follow-up work produced by an event: requests to send and what to redraw.
#[derive(Debug, Default, PartialEq)]
pub struct Effects {
    pub fetch: SmallVec<[FetchRequest; 2]>,
    pub tree: Option<Redraw>,
    pub timeline: bool,
}

impl Effects {
    pub fn is_empty(&self) -> bool {
        self.fetch.is_empty() && self.tree.is_none() && !self.timeline
    }
}

/// All viewer state. Mutated only from the thread handling UI events.
#[derive(Debug, Default)]
pub struct ViewerState {
    pub selection: SelectionSync,
    pub timelines: TimelineView,
    tokens: TokenSource,
}

impl ViewerState {
    pub fn new(codec: PathCodec) -> Self {
        Self {
            selection: SelectionSync::new(codec),
            ..Self::default()
        }
    }

    pub fn on_selection_changed(&mut self, id: PathId) -> Result<Effects, ViewerError> {
        let mut fx = Effects::default();
        let outcome = self
            .selection
            .select(id.clone(), &mut self.tokens)
            .inspect_err(|e| tracing::error!(error = %e, "selection aborted"))?;
        match outcome {
            SelectionOutcome::Unchanged => return Ok(fx),
            SelectionOutcome::Fetch(req) => fx.fetch.push(req),
            SelectionOutcome::Redraw(r) => fx.tree = Some(r),
        }
        if let Some(req) = self.timelines.show_node(id, &mut self.tokens) {
            fx.fetch.push(req);
            fx.timeline = true;
        }
        Ok(fx)
    }

    fn current_node(&self) -> PathId {
        self.selection.selected().cloned().unwrap_or_else(PathId::root)
    }

    /// Selects the `index`-th option of the current node.
    pub fn select_child(&mut self, index: usize) -> Result<Effects, ViewerError> {
        let current = self.current_node();
        let id = self.selection.codec().child_id(current.as_str(), index);
        self.on_selection_changed(id)
    }

    /// Selects the node the current one was reached from.
    pub fn select_parent(&mut self) -> Result<Effects, ViewerError> {
        let current = self.current_node();
        let id = self.selection.codec().parent_id(current.as_str());
        self.on_selection_changed(id)
    }

    pub fn on_point_selected(&mut self, points: Vec<TimelinePoint<u64>>) -> Effects {
        self.timelines.select_points(points);
        Effects {
            timeline: true,
            ..Effects::default()
        }
    }

    pub fn select_point(&mut self, row: usize, column: usize) -> Result<Effects, ViewerError> {
        self.timelines.select_point(row, column)?;
        Ok(Effects {
            timeline: true,
            ..Effects::default()
        })
    }

    /// Refetches the tree and the timelines of the current node.
    pub fn reload(&mut self) -> Effects {
        let mut fx = Effects::default();
        fx.fetch.push(self.selection.reload(&mut self.tokens));
        if let Some(req) = self.timelines.reload(&mut self.tokens) {
            fx.fetch.push(req);
        }
        fx
    }

    pub fn apply(&mut self, inc: Incoming) -> Effects {
        let mut fx = Effects::default();
        match inc.kind {
            IncomingKind::Tree(root) => {
                fx.tree = self.selection.apply_tree(&inc.token, &root);
            }
            IncomingKind::Timelines(data) => {
                fx.timeline = self.timelines.apply(&inc.token, data);
            }
            IncomingKind::Error(err) => {
                let live = self.selection.fail_pending(&inc.token)
                    || self.timelines.fail_pending(&inc.token);
                // prior state stays on screen
                tracing::warn!(
                    seq = inc.token.seq,
                    target = %inc.token.target,
                    live,
                    error = %err,
                    "fetch failed"
                );
            }
        }
        fx
    }
}
