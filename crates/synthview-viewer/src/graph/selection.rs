use smallvec::{smallvec, SmallVec};
use synthview_core::{NodeRecord, PathId};

use crate::error::ViewerError;
use crate::graph::model::NodeArena;
use crate::graph::path::PathCodec;
use crate::graph::tree::build_tree;
use crate::net::protocol::{FetchKind, FetchRequest, RequestToken, TokenSource};

/// What the renderer has to redraw after a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redraw {
    Full,
    Nodes(SmallVec<[PathId; 2]>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Unchanged,
    /// The tree must be fetched and rebuilt before the selection shows.
    Fetch(FetchRequest),
    Redraw(Redraw),
}

/// Keeps the indexed synthesis tree in step with the selected node.
#[derive(Debug, Default)]
pub struct SelectionSync {
    codec: PathCodec,
    tree: Option<NodeArena>,
    selected: Option<PathId>,
    // node currently carrying the selection marker
    marked: Option<PathId>,
    pending: Option<RequestToken>,
}

impl SelectionSync {
    pub fn new(codec: PathCodec) -> Self {
        Self {
            codec,
            ..Self::default()
        }
    }

    pub fn tree(&self) -> Option<&NodeArena> {
        self.tree.as_ref()
    }

    pub fn selected(&self) -> Option<&PathId> {
        self.selected.as_ref()
    }

    pub fn pending(&self) -> Option<&RequestToken> {
        self.pending.as_ref()
    }

    pub fn codec(&self) -> &PathCodec {
        &self.codec
    }

    pub fn select(
        &mut self,
        new_id: PathId,
        tokens: &mut TokenSource,
    ) -> Result<SelectionOutcome, ViewerError> {
        let indexed = self.tree.as_ref().is_some_and(|t| t.contains(&new_id));

        if self.selected.as_ref() == Some(&new_id) && indexed {
            return Ok(SelectionOutcome::Unchanged);
        }

        if !indexed || new_id.is_root() {
            tracing::debug!(id = %new_id, indexed, "selection needs a tree rebuild");
            self.selected = Some(new_id);
            return Ok(SelectionOutcome::Fetch(self.request_tree(tokens)));
        }

        let Some(tree) = self.tree.as_mut() else {
            return Err(ViewerError::IndexConsistency { id: new_id });
        };
        let Some(next) = tree.handle(&new_id) else {
            return Err(ViewerError::IndexConsistency { id: new_id });
        };
        let prev = match self.marked.as_ref().filter(|id| **id != new_id) {
            Some(id) => match tree.handle(id) {
                Some(h) => Some((h, id.clone())),
                None => return Err(ViewerError::IndexConsistency { id: id.clone() }),
            },
            None => None,
        };

        let mut touched: SmallVec<[PathId; 2]> = smallvec![];
        if let Some((h, id)) = prev {
            tree.get_mut(h).unmark();
            touched.push(id);
        }
        tree.get_mut(next).mark();
        touched.push(new_id.clone());

        self.marked = Some(new_id.clone());
        self.selected = Some(new_id);
        Ok(SelectionOutcome::Redraw(Redraw::Nodes(touched)))
    }

    /// Forces a refetch of the whole tree for the current selection.
    pub fn reload(&mut self, tokens: &mut TokenSource) -> FetchRequest {
        self.request_tree(tokens)
    }

    fn request_tree(&mut self, tokens: &mut TokenSource) -> FetchRequest {
        let target = self.selected.clone().unwrap_or_else(PathId::root);
        let token = tokens.issue(target);
        self.pending = Some(token.clone());
        FetchRequest {
            token,
            kind: FetchKind::SynthesisTree,
        }
    }

    pub fn is_pending(&self, token: &RequestToken) -> bool {
        self.pending.as_ref() == Some(token)
    }

    /// Installs a freshly fetched tree unless `token` is stale.
    pub fn apply_tree(&mut self, token: &RequestToken, root: &NodeRecord) -> Option<Redraw> {
        if !self.is_pending(token) {
            tracing::debug!(seq = token.seq, target = %token.target, "dropping stale tree response");
            return None;
        }
        self.pending = None;

        let mut tree = build_tree(root, &self.codec);
        self.marked = None;
        if let Some(id) = self.selected.as_ref() {
            match tree.by_id_mut(id) {
                Some(node) => {
                    node.mark();
                    self.marked = Some(id.clone());
                }
                None => tracing::warn!(id = %id, "selected node not in fetched tree"),
            }
        }
        self.tree = Some(tree);
        Some(Redraw::Full)
    }

    /// Forgets the in-flight request after a failed fetch; the current tree
    /// stays on screen.
    pub fn fail_pending(&mut self, token: &RequestToken) -> bool {
        if self.is_pending(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
