use synthview_core::TimelinePoint;

use crate::graph::highlight::{point_glyph, HighlightClass};
use crate::graph::timeline::{viewpoint_label, TimelineView};

const HEADER: &str = "view point";
const RULE: &str = "------------------------------";

fn point_cell(view: &TimelineView, point: &[TimelinePoint<u64>]) -> String {
    let g = point_glyph(point);
    match view.highlight.classify(point) {
        Some(HighlightClass::Up) => format!("^{g}^"),
        Some(HighlightClass::Current) => format!("[{g}]"),
        Some(HighlightClass::Down) => format!("v{g}v"),
        None => format!(" {g} "),
    }
}

/// Rows as `label | glyphs`, labels right-aligned to the widest one.
pub fn render_timelines(view: &TimelineView) -> Vec<String> {
    if !view.loaded {
        return vec!["LOADING".to_string()];
    }
    if view.rows.is_empty() {
        return vec!["EMPTY PROCESS TIMELINE".to_string()];
    }
    let width = view.label_width(HEADER);
    let mut out = Vec::with_capacity(view.rows.len() + 1);
    out.push(format!("{HEADER:<width$} | timeline"));
    for row in &view.rows {
        let label = viewpoint_label(&row.viewpoint);
        let cells: String = row.points.iter().map(|p| point_cell(view, p)).collect();
        out.push(format!("{label:>width$} | {cells}"));
    }
    out
}

fn info_line(p: &TimelinePoint<u64>) -> String {
    match &p.info {
        serde_json::Value::String(s) => format!("- {s}"),
        other => format!("- {other}"),
    }
}

/// Related points of the current selection, upstream first.
pub fn render_detail(view: &TimelineView) -> Vec<String> {
    let related = |ids: &[u64], out: &mut Vec<String>| {
        for id in ids {
            match view.index.get(id) {
                Some(p) => out.push(info_line(p)),
                None => out.push(format!("- #{id} (not on any timeline)")),
            }
        }
    };

    let mut out = vec![RULE.to_string(), "upper related:".to_string()];
    related(&view.highlight.up, &mut out);
    out.push(RULE.to_string());
    out.push("current:".to_string());
    out.extend(view.detail.iter().map(info_line));
    out.push(RULE.to_string());
    out.push("bottom related:".to_string());
    related(&view.highlight.down, &mut out);
    out
}
