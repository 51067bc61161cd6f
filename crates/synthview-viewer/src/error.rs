use synthview_core::PathId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViewerError {
    /// An id the viewer itself recorded is missing from the node index.
    #[error("node index out of sync: {id} not indexed")]
    IndexConsistency { id: PathId },

    #[error("no timeline point at row {row}, column {column}")]
    UnknownPoint { row: usize, column: usize },

    #[error("fetch failed: {0}")]
    Fetch(String),
}
