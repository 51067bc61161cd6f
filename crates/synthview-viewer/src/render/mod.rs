pub mod timeline;
pub mod tree;

pub use timeline::{render_detail, render_timelines};
pub use tree::{render_children, render_history, render_stats, render_tree};
