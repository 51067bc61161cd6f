use proptest::prelude::*;
use std::collections::HashSet;
use synthview_core::{Level, NodeRecord, PathId, TimelinePoint, TimelineRow, VerticalRelation, ViewPoint};
use synthview_viewer::graph::{build_tree, compute_highlight, group_rows, Marker, PathCodec};

// node i > 0 hangs under parents[i - 1] % i
fn tree_from_parents(parents: &[usize], flags: &[(bool, bool)], codec: &PathCodec) -> NodeRecord {
    let n = parents.len() + 1;
    let mut kids: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (i, p) in parents.iter().enumerate() {
        kids[p % (i + 1)].push(i + 1);
    }
    fn make(
        i: usize,
        id: PathId,
        kids: &[Vec<usize>],
        flags: &[(bool, bool)],
        codec: &PathCodec,
    ) -> NodeRecord {
        let (processed, complete) = flags.get(i).copied().unwrap_or((false, false));
        NodeRecord {
            children: kids[i]
                .iter()
                .enumerate()
                .map(|(pos, &k)| make(k, codec.child_id(id.as_str(), pos), kids, flags, codec))
                .collect(),
            id,
            is_edges_processed: processed,
            is_complete: complete,
            option_type: format!("opt{i}"),
            duration: i as u64,
            characteristic: 0.0,
            context: Vec::new(),
        }
    }
    make(0, PathId::root(), &kids, flags, codec)
}

fn level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Empty),
        Just(Level::Cad),
        Just(Level::Fun),
        Just(Level::EndPoint),
        "[A-Z][a-z]{1,4}".prop_map(Level::from),
    ]
}

fn rows() -> impl Strategy<Value = Vec<TimelineRow<u64>>> {
    prop::collection::vec(("[a-c]{0,2}", level()), 0..12).prop_map(|keys| {
        keys.into_iter()
            .enumerate()
            .map(|(i, (component, level))| TimelineRow {
                viewpoint: ViewPoint { component, level },
                points: vec![vec![TimelinePoint {
                    process_id: i as u64,
                    info: serde_json::Value::Null,
                }]],
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn index_matches_tree(
        parents in prop::collection::vec(0..64usize, 0..40),
        flags in prop::collection::vec(any::<(bool, bool)>(), 0..41),
        dash in any::<bool>(),
    ) {
        let codec = if dash { PathCodec::new('-') } else { PathCodec::default() };
        let rec = tree_from_parents(&parents, &flags, &codec);
        let arena = build_tree(&rec, &codec);

        prop_assert_eq!(arena.index_len(), rec.node_count());
        prop_assert_eq!(arena.walk().len(), rec.node_count());
        for (id, node) in arena.index() {
            prop_assert_eq!(&node.id, id);
            prop_assert_eq!(node.name.as_str(), codec.last_segment(id.as_str()));
            prop_assert_eq!(node.marker, Marker::status_of(
                flags.get(node.duration as usize).map_or(false, |f| f.0),
                flags.get(node.duration as usize).map_or(false, |f| f.1),
            ));
        }
    }

    #[test]
    fn mark_unmark_round_trip(
        parents in prop::collection::vec(0..16usize, 1..20),
        flags in prop::collection::vec(any::<(bool, bool)>(), 21),
        pick in any::<prop::sample::Index>(),
        times in 1..4usize,
    ) {
        let codec = PathCodec::default();
        let mut arena = build_tree(&tree_from_parents(&parents, &flags, &codec), &codec);
        let ids: Vec<PathId> = arena.index().map(|(id, _)| id.clone()).collect();
        let id = &ids[pick.index(ids.len())];

        let before = arena.by_id(id).unwrap().marker;
        for _ in 0..times {
            arena.by_id_mut(id).unwrap().mark();
        }
        arena.by_id_mut(id).unwrap().unmark();
        prop_assert_eq!(arena.by_id(id).unwrap().marker, before);
    }

    #[test]
    fn highlight_is_single_hop(
        selected in prop::collection::vec(0..20u64, 0..5),
        rels in prop::collection::vec((0..20u64, 0..20u64), 0..30),
    ) {
        let points: Vec<TimelinePoint<u64>> = selected
            .iter()
            .map(|&id| TimelinePoint { process_id: id, info: serde_json::Value::Null })
            .collect();
        let relations: Vec<VerticalRelation<u64>> =
            rels.iter().map(|&(a, b)| VerticalRelation(a, b)).collect();
        let hl = compute_highlight(&points, &relations);
        let chosen: HashSet<u64> = selected.iter().copied().collect();

        for &(a, b) in &rels {
            if chosen.contains(&b) {
                prop_assert!(hl.up.contains(&a));
            }
            if chosen.contains(&a) {
                prop_assert!(hl.down.contains(&b));
            }
        }
        for up in &hl.up {
            prop_assert!(rels.iter().any(|&(a, b)| a == *up && chosen.contains(&b)));
        }
        for down in &hl.down {
            prop_assert!(rels.iter().any(|&(a, b)| b == *down && chosen.contains(&a)));
        }
        prop_assert_eq!(hl.current.iter().copied().collect::<HashSet<_>>(), chosen);
        let up_set: HashSet<u64> = hl.up.iter().copied().collect();
        prop_assert_eq!(up_set.len(), hl.up.len());
    }

    #[test]
    fn grouping_is_idempotent(rows in rows()) {
        let once = group_rows(rows.clone());
        prop_assert_eq!(once.len(), rows.len());
        let twice = group_rows(once.clone());
        prop_assert_eq!(&once, &twice);

        // every input row survives exactly once
        let mut ids: Vec<u64> = once.iter().map(|r| r.points[0][0].process_id).collect();
        ids.sort_unstable();
        prop_assert_eq!(ids, (0..rows.len() as u64).collect::<Vec<_>>());
    }
}
