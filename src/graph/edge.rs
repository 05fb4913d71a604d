use petgraph::graph::EdgeIndex as RawEdgeIndex;

use crate::graph::{EdgeIndex, VertexIndex};
use crate::id::EdgeId;

/// Attributes an edge carries on top of its weight. For the flow kinds the weight is the
/// capacity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EdgeKind {
    Plain,
    Flow { flow: f64 },
    Cost { cost: f64, flow: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    id: EdgeId,
    pos: usize,
    start: VertexIndex,
    end: VertexIndex,
    weight: f64,
    kind: EdgeKind,
}

impl Edge {
    pub(crate) fn new(
        id: EdgeId,
        pos: usize,
        start: VertexIndex,
        end: VertexIndex,
        weight: f64,
        kind: EdgeKind,
    ) -> Self {
        Self {
            id,
            pos,
            start,
            end,
            weight,
            kind,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn index(&self) -> EdgeIndex {
        RawEdgeIndex::new(self.pos)
    }

    pub fn start(&self) -> VertexIndex {
        self.start
    }

    pub fn end(&self) -> VertexIndex {
        self.end
    }

    /// The endpoint that is not `vertex`. For a self-loop this is `vertex` itself.
    pub fn other(&self, vertex: VertexIndex) -> VertexIndex {
        if self.start == vertex {
            self.end
        } else {
            self.start
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn capacity(&self) -> f64 {
        self.weight
    }

    pub fn cost(&self) -> f64 {
        match self.kind {
            EdgeKind::Cost { cost, .. } => cost,
            _ => 0.0,
        }
    }

    pub fn flow(&self) -> f64 {
        match self.kind {
            EdgeKind::Flow { flow } | EdgeKind::Cost { flow, .. } => flow,
            EdgeKind::Plain => 0.0,
        }
    }

    /// Capacity left in forward direction.
    pub fn residual(&self) -> f64 {
        self.capacity() - self.flow()
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_kind(mut self, kind: EdgeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Same edge with start and end exchanged.
    pub fn reversed(mut self) -> Self {
        core::mem::swap(&mut self.start, &mut self.end);
        self
    }

    pub fn set_flow(&mut self, flow: f64) {
        assert!(
            (0.0..=self.capacity()).contains(&flow),
            "flow {} on edge {} outside of [0, {}]",
            flow,
            self.id,
            self.capacity()
        );
        self.kind = match self.kind {
            EdgeKind::Plain | EdgeKind::Flow { .. } => EdgeKind::Flow { flow },
            EdgeKind::Cost { cost, .. } => EdgeKind::Cost { cost, flow },
        };
    }

    /// Pushes `amount` more flow along the edge.
    pub fn augment(&mut self, amount: f64) {
        let residual = self.residual();
        assert!(amount <= residual, "augmenting edge {} beyond capacity", self.id);
        // snap to the bound so float rounding never leaves a sliver of residual capacity
        let flow = if amount == residual {
            self.capacity()
        } else {
            (self.flow() + amount).min(self.capacity())
        };
        self.set_flow(flow);
    }

    /// Takes `amount` of flow back from the edge.
    pub fn withdraw(&mut self, amount: f64) {
        let flow = self.flow();
        assert!(amount <= flow, "withdrawing more flow than edge {} carries", self.id);
        self.set_flow(if amount == flow { 0.0 } else { flow - amount });
    }
}

#[cfg(test)]
mod tests {
    use petgraph::graph::NodeIndex;

    use super::*;
    use crate::id::Id;

    fn edge(weight: f64, kind: EdgeKind) -> Edge {
        Edge::new(
            EdgeId::from_raw(234),
            0,
            NodeIndex::new(0),
            NodeIndex::new(1),
            weight,
            kind,
        )
    }

    #[test]
    fn accessors() {
        let e = edge(1.23, EdgeKind::Plain);
        assert_eq!(e.id().raw(), 234);
        assert_eq!(e.start(), NodeIndex::new(0));
        assert_eq!(e.end(), NodeIndex::new(1));
        assert_eq!(e.other(NodeIndex::new(0)), NodeIndex::new(1));
        assert_eq!(e.other(NodeIndex::new(1)), NodeIndex::new(0));
        assert_eq!(e.weight(), 1.23);
        assert_eq!(e.with_weight(124.23).weight(), 124.23);
    }

    #[test]
    fn reversed_swaps_endpoints_only() {
        let e = edge(2.0, EdgeKind::Cost { cost: 3.0, flow: 1.0 }).reversed();
        assert_eq!(e.start(), NodeIndex::new(1));
        assert_eq!(e.end(), NodeIndex::new(0));
        assert_eq!(e.cost(), 3.0);
        assert_eq!(e.flow(), 1.0);
    }

    #[test]
    fn plain_edge_becomes_flow_edge() {
        let mut e = edge(4.0, EdgeKind::Plain);
        assert_eq!(e.flow(), 0.0);
        e.set_flow(1.5);
        assert_eq!(e.kind(), EdgeKind::Flow { flow: 1.5 });
        assert_eq!(e.residual(), 2.5);
    }

    #[test]
    fn augment_snaps_to_capacity() {
        let mut e = edge(0.3, EdgeKind::Flow { flow: 0.1 });
        e.augment(e.residual());
        assert_eq!(e.flow(), 0.3);
        e.withdraw(0.3);
        assert_eq!(e.flow(), 0.0);
    }

    #[test]
    #[should_panic]
    fn augment_beyond_capacity_panics() {
        edge(1.0, EdgeKind::Flow { flow: 0.5 }).augment(0.75);
    }

    #[test]
    #[should_panic]
    fn negative_flow_panics() {
        edge(1.0, EdgeKind::Flow { flow: 0.5 }).withdraw(0.75);
    }
}
