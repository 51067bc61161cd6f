pub mod highlight;
pub mod history;
pub mod metrics;
pub mod model;
pub mod path;
pub mod selection;
pub mod state;
pub mod timeline;
pub mod tree;

pub use highlight::{compute_highlight, HighlightClass, HighlightState};
pub use model::{DisplayNode, Marker, NodeArena, NodeHandle};
pub use path::PathCodec;
pub use selection::{Redraw, SelectionOutcome, SelectionSync};
pub use state::{Effects, ViewerState};
pub use timeline::{group_rows, TimelineView};
pub use tree::build_tree;
