use smallvec::SmallVec;
use std::collections::BTreeMap;
use synthview_core::NodeRecord;

use crate::graph::model::{AttrKey, DisplayNode, Marker, NodeArena, NodeHandle};
use crate::graph::path::PathCodec;

/// Converts a solver tree into an indexed arena of display nodes.
pub fn build_tree(root: &NodeRecord, codec: &PathCodec) -> NodeArena {
    let mut arena = NodeArena::with_capacity(root.node_count());
    build_subtree(root, None, 0, codec, &mut arena);
    tracing::debug!(nodes = arena.len(), "synthesis tree indexed");
    arena
}

fn build_subtree(
    rec: &NodeRecord,
    parent: Option<NodeHandle>,
    depth: usize,
    codec: &PathCodec,
    arena: &mut NodeArena,
) {
    // indexed before its children so a partial build is still addressable
    let (handle, replaced) = arena.insert(display_node(rec, parent, depth, codec));
    if replaced.is_some() {
        tracing::warn!(id = %rec.id, "duplicate node id in synthesis tree");
    }
    for child in &rec.children {
        build_subtree(child, Some(handle), depth + 1, codec, arena);
    }
}

fn display_node(
    rec: &NodeRecord,
    parent: Option<NodeHandle>,
    depth: usize,
    codec: &PathCodec,
) -> DisplayNode {
    let mut attributes = BTreeMap::new();
    attributes.insert(AttrKey::Decision, rec.option_type.clone());
    attributes.insert(
        AttrKey::Characteristic,
        format!("{} / {}", rec.duration, rec.characteristic),
    );
    for (i, entry) in rec.context.iter().enumerate() {
        attributes.insert(AttrKey::Context(i), entry.clone());
    }

    DisplayNode {
        id: rec.id.clone(),
        name: codec.last_segment(rec.id.as_str()).to_string(),
        attributes,
        status: rec.is_complete,
        marker: Marker::status_of(rec.is_edges_processed, rec.is_complete),
        saved_marker: None,
        duration: rec.duration,
        depth,
        parent,
        children: SmallVec::new(),
    }
}
