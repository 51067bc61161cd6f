use synthview_core::{NodeRecord, PathId, ProcessTimelines};

use crate::error::ViewerError;

/// Tags an in-flight request with the selection it was issued for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestToken {
    pub seq: u64,
    pub target: PathId,
}

/// Hands out tokens with increasing sequence numbers.
#[derive(Debug, Default)]
pub struct TokenSource {
    next: u64,
}

impl TokenSource {
    pub fn issue(&mut self, target: PathId) -> RequestToken {
        self.next += 1;
        RequestToken {
            seq: self.next,
            target,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchKind {
    SynthesisTree,
    Timelines(PathId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub token: RequestToken,
    pub kind: FetchKind,
}

#[derive(Debug, Clone)]
pub struct Incoming {
    pub token: RequestToken,
    pub kind: IncomingKind,
}

#[derive(Debug, Clone)]
pub enum IncomingKind {
    Tree(NodeRecord),
    Timelines(ProcessTimelines<u64>),
    Error(ViewerError),
}

impl Incoming {
    pub fn tree(token: RequestToken, root: NodeRecord) -> Self {
        Self {
            token,
            kind: IncomingKind::Tree(root),
        }
    }

    pub fn timelines(token: RequestToken, data: ProcessTimelines<u64>) -> Self {
        Self {
            token,
            kind: IncomingKind::Timelines(data),
        }
    }

    pub fn error(token: RequestToken, msg: String) -> Self {
        Self {
            token,
            kind: IncomingKind::Error(ViewerError::Fetch(msg)),
        }
    }
}
