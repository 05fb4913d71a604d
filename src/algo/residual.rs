use alloc::vec::Vec;

use itertools::Itertools;

use crate::graph::{EdgeIndex, Graph, VertexIndex};

/// Which quantity the arcs of a residual graph are weighted with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Weighting {
    /// Residual capacity, for augmenting path search.
    Capacity,
    /// Cost per unit (negated on backward arcs), for shortest path and cycle search.
    Cost,
}

/// Direction of a residual arc relative to the edge it stems from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sense {
    Forward,
    Backward,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Arc {
    /// Edge of the flow network this arc belongs to.
    pub edge: EdgeIndex,
    pub sense: Sense,
    /// How much flow can be pushed over this arc, always strictly positive.
    pub residual: f64,
}

/// Residual graph of a flow network: a directed graph over the same vertices with a forward arc
/// for every edge with capacity left and a backward arc for every edge carrying flow. Arcs with
/// zero residual capacity are left out.
#[derive(Clone, Debug)]
pub struct ResidualGraph {
    graph: Graph,
    weighting: Weighting,
    // indexed by arc position in `graph`
    arcs: Vec<Arc>,
}

impl ResidualGraph {
    pub fn build(network: &Graph, weighting: Weighting) -> Self {
        let mut graph = network.vertices_only();
        graph.set_directed(true);
        let mut arcs = Vec::with_capacity(network.edge_count());

        for edge in network.edges() {
            let residual = edge.residual();
            if residual > 0.0 {
                let weight = match weighting {
                    Weighting::Capacity => residual,
                    Weighting::Cost => edge.cost(),
                };
                graph.new_edge(edge.start(), edge.end(), weight);
                arcs.push(Arc {
                    edge: edge.index(),
                    sense: Sense::Forward,
                    residual,
                });
            }

            let flow = edge.flow();
            if flow > 0.0 {
                let weight = match weighting {
                    Weighting::Capacity => flow,
                    Weighting::Cost => -edge.cost(),
                };
                graph.new_edge(edge.end(), edge.start(), weight);
                arcs.push(Arc {
                    edge: edge.index(),
                    sense: Sense::Backward,
                    residual: flow,
                });
            }
        }

        Self {
            graph,
            weighting,
            arcs,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn arc(&self, arc: EdgeIndex) -> &Arc {
        &self.arcs[arc.index()]
    }

    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    /// The arc a path from `from` to `to` should take among parallel arcs, if there is any arc.
    ///
    /// Weighted by cost this is the cheapest arc, weighted by capacity the one with the most
    /// residual capacity. Ties go to the first arc.
    pub fn best_arc(&self, from: VertexIndex, to: VertexIndex) -> Option<EdgeIndex> {
        let weight = |arc: &EdgeIndex| self.graph[*arc].weight();
        let arcs = self
            .graph
            .outgoing_edges(from)
            .into_iter()
            .filter(|arc| self.graph[*arc].end() == to);
        match self.weighting {
            Weighting::Cost => arcs.min_by(|a, b| weight(a).total_cmp(&weight(b))),
            Weighting::Capacity => arcs.min_by(|a, b| weight(b).total_cmp(&weight(a))),
        }
    }

    fn connect<'a, I>(&self, vertices: I) -> Vec<EdgeIndex>
    where
        I: Iterator<Item = &'a VertexIndex>,
    {
        vertices
            .tuple_windows()
            .map(|(from, to)| {
                self.best_arc(*from, *to).unwrap_or_else(|| {
                    panic!("bug: no residual arc from {:?} to {:?}", from, to)
                })
            })
            .collect()
    }

    /// Arcs along a vertex path.
    pub fn walk(&self, path: &[VertexIndex]) -> Vec<EdgeIndex> {
        self.connect(path.iter())
    }

    /// Arcs along a cycle whose last vertex connects back to the first.
    pub fn closed_walk(&self, cycle: &[VertexIndex]) -> Vec<EdgeIndex> {
        self.connect(cycle.iter().chain(cycle.first()))
    }

    /// The most flow that can be pushed along all of `arcs` at once.
    pub fn bottleneck(&self, arcs: &[EdgeIndex]) -> f64 {
        arcs.iter()
            .map(|arc| self.arc(*arc).residual)
            .fold(f64::INFINITY, f64::min)
    }

    /// Sum of arc weights.
    pub fn weight(&self, arcs: &[EdgeIndex]) -> f64 {
        arcs.iter().map(|arc| self.graph[*arc].weight()).sum()
    }

    /// Pushes `amount` along `arcs`: more flow on edges used forward, less on edges used backward.
    pub fn push(&self, network: &mut Graph, arcs: &[EdgeIndex], amount: f64) {
        for arc in arcs {
            let Arc { edge, sense, .. } = *self.arc(*arc);
            match sense {
                Sense::Forward => network.edge_mut(edge).augment(amount),
                Sense::Backward => network.edge_mut(edge).withdraw(amount),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::graph::EdgeKind;

    fn network() -> (Graph, Vec<VertexIndex>) {
        let mut g = Graph::directed();
        let v: Vec<_> = (0..3).map(|_| g.new_vertex()).collect();
        g.new_edge_with(v[0], v[1], 4.0, EdgeKind::Cost { cost: 2.0, flow: 0.0 });
        g.new_edge_with(v[1], v[2], 3.0, EdgeKind::Cost { cost: 5.0, flow: 3.0 });
        g.new_edge_with(v[0], v[2], 2.0, EdgeKind::Cost { cost: 1.0, flow: 1.0 });
        (g, v)
    }

    #[test]
    fn capacity_weighting() {
        let (g, v) = network();
        let residual = ResidualGraph::build(&g, Weighting::Capacity);
        let r = residual.graph();
        assert!(r.is_directed());
        assert_eq!(r.vertex_count(), 3);
        // 0->1 forward, 2->1 backward, 0->2 forward, 2->0 backward; saturated 1->2 omitted
        assert_eq!(r.edge_count(), 4);
        assert_eq!(r.find_edge(v[1], v[2]), None);

        let arc = r.find_edge(v[2], v[1]).unwrap();
        assert_eq!(r[arc].weight(), 3.0);
        assert_eq!(residual.arc(arc).sense, Sense::Backward);
        assert_eq!(residual.arc(arc).edge.index(), 1);
        assert_eq!(r[r.find_edge(v[0], v[2]).unwrap()].weight(), 1.0);
    }

    #[test]
    fn cost_weighting_negates_backward_arcs() {
        let (g, v) = network();
        let residual = ResidualGraph::build(&g, Weighting::Cost);
        let r = residual.graph();
        assert_eq!(r[r.find_edge(v[0], v[1]).unwrap()].weight(), 2.0);
        assert_eq!(r[r.find_edge(v[2], v[1]).unwrap()].weight(), -5.0);
        assert_eq!(r[r.find_edge(v[2], v[0]).unwrap()].weight(), -1.0);
    }

    #[test]
    fn push_forward_and_backward() {
        let (mut g, v) = network();
        let residual = ResidualGraph::build(&g, Weighting::Cost);
        let arcs = residual.walk(&[v[2], v[1]]);
        let forward = residual.walk(&[v[0], v[1]]);
        assert_eq!(residual.bottleneck(&arcs), 3.0);
        assert_eq!(residual.weight(&arcs), -5.0);

        residual.push(&mut g, &arcs, 2.0);
        residual.push(&mut g, &forward, 2.0);
        assert_eq!(g.flows(), vec![2.0, 1.0, 1.0]);
    }

    #[test]
    fn widest_of_parallel_arcs_by_capacity() {
        let mut g = Graph::directed();
        let a = g.new_vertex();
        let b = g.new_vertex();
        g.new_edge(a, b, 1.0);
        g.new_edge(a, b, 4.0);
        g.new_edge(a, b, 4.0);
        g.new_edge_with(b, a, 3.0, EdgeKind::Flow { flow: 2.0 });
        let residual = ResidualGraph::build(&g, Weighting::Capacity);
        let arcs = residual.walk(&[a, b]);
        assert_eq!(residual.arc(arcs[0]).edge.index(), 1);
        assert_eq!(residual.bottleneck(&arcs), 4.0);

        // the backward arc of b -> a carries 2, less than the forward arc with 4 left
        let mut network = g.clone();
        residual.push(&mut network, &arcs, 4.0);
        assert_eq!(network.flows(), vec![0.0, 4.0, 0.0, 2.0]);
    }

    #[test]
    fn cheapest_of_parallel_arcs() {
        let mut g = Graph::directed();
        let a = g.new_vertex();
        let b = g.new_vertex();
        g.new_edge_with(a, b, 1.0, EdgeKind::Cost { cost: 7.0, flow: 0.0 });
        g.new_edge_with(a, b, 1.0, EdgeKind::Cost { cost: 3.0, flow: 0.0 });
        g.new_edge_with(b, a, 1.0, EdgeKind::Cost { cost: -2.0, flow: 0.0 });
        let residual = ResidualGraph::build(&g, Weighting::Cost);
        let arcs = residual.closed_walk(&[a, b]);
        assert_eq!(residual.arc(arcs[0]).edge.index(), 1);
        assert_eq!(residual.weight(&arcs), 1.0);
    }
}
