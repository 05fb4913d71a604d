use petgraph::graph::NodeIndex;

use crate::graph::VertexIndex;
use crate::id::VertexId;

/// Side of a bipartite graph a vertex belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Side {
    Left,
    Right,
}

/// Attributes a vertex carries on top of its identity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum VertexKind {
    Plain,
    Group(Side),
    /// Required net supply (positive) or demand (negative) of a min-cost flow problem.
    Balance(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    id: VertexId,
    pos: usize,
    kind: VertexKind,
}

impl Vertex {
    pub(crate) fn new(id: VertexId, pos: usize, kind: VertexKind) -> Self {
        Self { id, pos, kind }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Position in the owning graph's vertex sequence.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn index(&self) -> VertexIndex {
        NodeIndex::new(self.pos)
    }

    pub fn kind(&self) -> VertexKind {
        self.kind
    }

    pub fn balance(&self) -> Option<f64> {
        match self.kind {
            VertexKind::Balance(balance) => Some(balance),
            _ => None,
        }
    }

    pub fn side(&self) -> Option<Side> {
        match self.kind {
            VertexKind::Group(side) => Some(side),
            _ => None,
        }
    }
}
