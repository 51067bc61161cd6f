use synthview_core::PathId;

use crate::graph::history::history;
use crate::graph::metrics::TreeStats;
use crate::graph::model::{AttrKey, DisplayNode, Marker, NodeArena};

fn marker_glyph(m: Marker) -> char {
    match m {
        Marker::Pending => 'o',
        Marker::Processed => 'x',
        Marker::Success => '+',
        Marker::Selected => '@',
    }
}

fn node_line(node: &DisplayNode) -> String {
    let name = if node.name.is_empty() { "-" } else { &node.name };
    let attrs: Vec<String> = node
        .attributes
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect();
    format!(
        "{indent}{glyph} {name}  {attrs}",
        indent = "  ".repeat(node.depth),
        glyph = marker_glyph(node.marker),
        attrs = attrs.join(" "),
    )
}

pub fn render_tree(tree: &NodeArena) -> Vec<String> {
    if tree.is_empty() {
        return vec!["Empty graph".to_string()];
    }
    tree.walk()
        .into_iter()
        .map(|h| node_line(tree.get(h)))
        .collect()
}

pub fn render_history(tree: &NodeArena, id: &PathId, reverse: bool) -> Vec<String> {
    let steps = history(tree, id, reverse);
    if steps.is_empty() {
        return vec!["History: NOTHING".to_string()];
    }
    steps
        .iter()
        .map(|s| {
            let desc = if s.node.id.is_root() {
                "INITIAL STATE"
            } else {
                s.node.attribute(AttrKey::Decision).unwrap_or("")
            };
            format!("{:>4}  {}  {}", s.step, s.node.id, desc)
        })
        .collect()
}

/// Options explored from `id`, numbered the way `child <n>` addresses them.
pub fn render_children(tree: &NodeArena, id: &PathId) -> Vec<String> {
    let Some(handle) = tree.handle(id) else {
        return vec!["Options: NOTHING".to_string()];
    };
    let mut out = vec![format!("options of {id}:")];
    for (i, child) in tree.children(handle).enumerate() {
        out.push(format!(
            "{i:>4}  {glyph}  ch={ch}  dec={dec}",
            glyph = marker_glyph(child.marker),
            ch = child.attribute(AttrKey::Characteristic).unwrap_or(""),
            dec = child.attribute(AttrKey::Decision).unwrap_or(""),
        ));
    }
    if out.len() == 1 {
        out.push("  no options".to_string());
    }
    out
}

pub fn render_stats(stats: &TreeStats) -> Vec<String> {
    let mut out = vec![
        format!("nodes: {}", stats.nodes),
        format!("processed: {}", stats.processed),
        format!("success: {}", stats.success),
        "success nodes with duration:".to_string(),
    ];
    out.extend(
        stats
            .success_duration
            .iter()
            .map(|(d, n)| format!("  {d}: {n}")),
    );
    out.push("success nodes with steps:".to_string());
    out.extend(stats.success_steps.iter().map(|(s, n)| format!("  {s}: {n}")));
    out
}
