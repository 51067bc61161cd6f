//! Indexing and highlight engine behind the synthesis process viewer.
//!
//! `graph` holds the state that reacts to selection events, `net` talks to
//! the synthesis service, and `render` turns state into text lines.

pub mod command;
pub mod error;
pub mod graph;
pub mod net;
pub mod render;
pub mod util;

pub use error::ViewerError;
pub use graph::{Effects, ViewerState};
