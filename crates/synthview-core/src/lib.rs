use serde::{Deserialize, Serialize};
use std::fmt;

/// Id of the synthesis tree root.
pub const ROOT_ID: &str = "-";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PathId(pub String);

impl PathId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn root() -> Self {
        Self(ROOT_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_ID
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PathId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One node of the synthesis tree as reported by the solver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: PathId,
    pub is_edges_processed: bool,
    pub is_complete: bool,
    pub option_type: String,
    pub duration: u64,
    pub characteristic: f64,
    #[serde(default)]
    pub context: Vec<String>,
    #[serde(default)]
    pub children: Vec<NodeRecord>,
}

impl NodeRecord {
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(NodeRecord::node_count).sum::<usize>()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelinePoint<T> {
    #[serde(rename = "pID", alias = "processId")]
    pub process_id: T,
    #[serde(rename = "pInfo", alias = "info", default)]
    pub info: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Level {
    Empty,
    Cad,
    Fun,
    EndPoint,
    Other(String),
}

impl Level {
    pub fn as_str(&self) -> &str {
        match self {
            Level::Empty => "",
            Level::Cad => "CAD",
            Level::Fun => "Fun",
            Level::EndPoint => "EndPoint",
            Level::Other(s) => s,
        }
    }
}

impl From<String> for Level {
    fn from(s: String) -> Self {
        match s.as_str() {
            "" => Level::Empty,
            "CAD" => Level::Cad,
            "Fun" => Level::Fun,
            "EndPoint" => Level::EndPoint,
            _ => Level::Other(s),
        }
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        match level {
            Level::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one timeline row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewPoint {
    pub component: String,
    pub level: Level,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineRow<T> {
    #[serde(rename = "timelineViewpoint", alias = "viewpoint")]
    pub viewpoint: ViewPoint,
    // each inner vec holds points that happened together
    #[serde(rename = "timelinePoints", alias = "points", default)]
    pub points: Vec<Vec<TimelinePoint<T>>>,
}

/// `from` precedes `to`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct VerticalRelation<T>(pub T, pub T);

impl<T: Copy> VerticalRelation<T> {
    pub fn from_id(&self) -> T {
        self.0
    }

    pub fn to_id(&self) -> T {
        self.1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessTimelines<T> {
    #[serde(default)]
    pub timelines: Vec<TimelineRow<T>>,
    #[serde(default)]
    pub vertical_relations: Vec<VerticalRelation<T>>,
}

impl<T> Default for ProcessTimelines<T> {
    fn default() -> Self {
        Self {
            timelines: Vec::new(),
            vertical_relations: Vec::new(),
        }
    }
}
