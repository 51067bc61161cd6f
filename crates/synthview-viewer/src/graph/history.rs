use synthview_core::PathId;

use crate::graph::model::{DisplayNode, NodeArena};

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStep<'a> {
    pub step: usize,
    pub node: &'a DisplayNode,
}

/// Decisions taken from the root down to `id`, root first.
pub fn root_path<'a>(tree: &'a NodeArena, id: &PathId) -> Vec<&'a DisplayNode> {
    let mut steps = Vec::new();
    let mut cur = tree.handle(id);
    while let Some(h) = cur {
        let node = tree.get(h);
        steps.push(node);
        cur = node.parent;
    }
    steps.reverse();
    steps
}

/// Numbered history of `id`. Steps count from the root either way; with
/// `reverse` the newest decision is listed first.
pub fn history<'a>(tree: &'a NodeArena, id: &PathId, reverse: bool) -> Vec<HistoryStep<'a>> {
    let mut out: Vec<HistoryStep<'a>> = root_path(tree, id)
        .into_iter()
        .enumerate()
        .map(|(i, node)| HistoryStep { step: i + 1, node })
        .collect();
    if reverse {
        out.reverse();
    }
    out
}
