use smallvec::SmallVec;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use synthview_core::PathId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub usize);

/// Visual marker drawn for a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Marker {
    /// Still being explored by the solver.
    #[default]
    Pending,
    Processed,
    Success,
    Selected,
}

impl Marker {
    /// Status marker for a freshly built node. Success outranks processed.
    pub fn status_of(is_edges_processed: bool, is_complete: bool) -> Marker {
        let mut marker = Marker::Pending;
        if is_edges_processed {
            marker = Marker::Processed;
        }
        if is_complete {
            marker = Marker::Success;
        }
        marker
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttrKey {
    Decision,
    Characteristic,
    Context(usize),
}

impl fmt::Display for AttrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrKey::Decision => f.write_str("dec"),
            AttrKey::Characteristic => f.write_str("ch"),
            AttrKey::Context(i) => write!(f, "{i}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayNode {
    pub id: PathId,
    pub name: String,
    pub attributes: BTreeMap<AttrKey, String>,
    pub status: bool,
    pub marker: Marker,
    /// Marker to restore on unmark; `None` when the node is not marked.
    pub saved_marker: Option<Marker>,
    pub duration: u64,
    pub depth: usize,
    pub parent: Option<NodeHandle>,
    pub children: SmallVec<[NodeHandle; 4]>,
}

impl DisplayNode {
    /// Applies the selection marker, remembering the prior one only once.
    pub fn mark(&mut self) {
        if self.saved_marker.is_none() {
            self.saved_marker = Some(self.marker);
        }
        self.marker = Marker::Selected;
    }

    pub fn unmark(&mut self) {
        self.marker = self.saved_marker.take().unwrap_or_default();
    }

    pub fn attribute(&self, key: AttrKey) -> Option<&str> {
        self.attributes.get(&key).map(String::as_str)
    }
}

/// Owning store of display nodes; the id index and the tree shape are both
/// expressed as handles into `nodes`.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<DisplayNode>,
    by_id: HashMap<PathId, NodeHandle>,
    root: Option<NodeHandle>,
}

impl NodeArena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            by_id: HashMap::with_capacity(capacity),
            root: None,
        }
    }

    /// Stores `node` and indexes it under its id. Returns the previous
    /// handle if the id was already indexed.
    pub fn insert(&mut self, node: DisplayNode) -> (NodeHandle, Option<NodeHandle>) {
        let handle = NodeHandle(self.nodes.len());
        let replaced = self.by_id.insert(node.id.clone(), handle);
        if let Some(parent) = node.parent {
            self.nodes[parent.0].children.push(handle);
        } else if self.root.is_none() {
            self.root = Some(handle);
        }
        self.nodes.push(node);
        (handle, replaced)
    }

    pub fn root(&self) -> Option<NodeHandle> {
        self.root
    }

    pub fn root_node(&self) -> Option<&DisplayNode> {
        self.root.map(|h| &self.nodes[h.0])
    }

    pub fn handle(&self, id: &PathId) -> Option<NodeHandle> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &PathId) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn get(&self, handle: NodeHandle) -> &DisplayNode {
        &self.nodes[handle.0]
    }

    pub fn get_mut(&mut self, handle: NodeHandle) -> &mut DisplayNode {
        &mut self.nodes[handle.0]
    }

    pub fn by_id(&self, id: &PathId) -> Option<&DisplayNode> {
        self.handle(id).map(|h| &self.nodes[h.0])
    }

    pub fn by_id_mut(&mut self, id: &PathId) -> Option<&mut DisplayNode> {
        let h = self.handle(id)?;
        Some(&mut self.nodes[h.0])
    }

    pub fn children(&self, handle: NodeHandle) -> impl Iterator<Item = &DisplayNode> + '_ {
        self.nodes[handle.0].children.iter().map(|h| &self.nodes[h.0])
    }

    /// Number of indexed ids.
    pub fn index_len(&self) -> usize {
        self.by_id.len()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index(&self) -> impl Iterator<Item = (&PathId, &DisplayNode)> + '_ {
        self.by_id.iter().map(|(id, h)| (id, &self.nodes[h.0]))
    }

    /// Depth-first, children in order.
    pub fn walk(&self) -> Vec<NodeHandle> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeHandle> = self.root.into_iter().collect();
        while let Some(h) = stack.pop() {
            out.push(h);
            stack.extend(self.nodes[h.0].children.iter().rev().copied());
        }
        out
    }
}
