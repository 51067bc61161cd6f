use std::collections::BTreeMap;

use crate::graph::model::{Marker, NodeArena};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub nodes: usize,
    /// Edges processed but not complete.
    pub processed: usize,
    pub success: usize,
    /// Process duration of successful nodes -> count.
    pub success_duration: BTreeMap<u64, usize>,
    /// Synthesis steps (tree depth) of successful nodes -> count.
    pub success_steps: BTreeMap<usize, usize>,
}

impl TreeStats {
    pub fn collect(tree: &NodeArena) -> Self {
        let mut stats = TreeStats {
            nodes: tree.len(),
            ..TreeStats::default()
        };
        for h in tree.walk() {
            let node = tree.get(h);
            // the selection marker hides the status marker, so read the saved one
            let status = match node.marker {
                Marker::Selected => node.saved_marker.unwrap_or_default(),
                m => m,
            };
            if status == Marker::Processed {
                stats.processed += 1;
            }
            if node.status {
                stats.success += 1;
                *stats.success_duration.entry(node.duration).or_insert(0) += 1;
                *stats.success_steps.entry(node.depth).or_insert(0) += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::path::PathCodec;
    use crate::graph::tree::build_tree;
    use crate::graph::tree::tests::sample_tree;
    use synthview_core::PathId;

    #[test]
    fn counts_status_and_success_histograms() {
        let mut tree = build_tree(&sample_tree(), &PathCodec::default());
        tree.by_id_mut(&PathId::from("-:2")).unwrap().mark();

        let stats = TreeStats::collect(&tree);
        assert_eq!(stats.nodes, 6);
        assert_eq!(stats.processed, 1);
        assert_eq!(stats.success, 1);
        assert_eq!(stats.success_duration.get(&7), Some(&1));
        assert_eq!(stats.success_steps.get(&2), Some(&1));
    }
}
