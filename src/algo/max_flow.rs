use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;

use itertools::Itertools;

use crate::algo::residual::{ResidualGraph, Weighting};
use crate::algo::{notify, FlowEvent, Observer};
use crate::graph::{Graph, VertexIndex};

/// Result of a maximum flow computation.
#[derive(Clone, Debug)]
pub struct MaxFlow {
    pub value: f64,
    /// Copy of the input graph whose edges carry the computed flow.
    pub network: Graph,
}

impl MaxFlow {
    /// Flow per edge, indexed by edge position of the input graph.
    pub fn flows(&self) -> Vec<f64> {
        self.network.flows()
    }
}

/// Edmonds-Karp: augment along least-hop paths of the residual graph until the sink is cut off.
#[derive(Default)]
pub struct EdmondsKarp {
    pub(crate) observer: Option<Observer>,
}

impl EdmondsKarp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observer(mut self, observer: Observer) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Maximum flow from `source` to `sink`, edge weights are capacities.
    ///
    /// The input graph is left untouched; negative capacities count as zero and any flow the edges
    /// already carry is discarded.
    pub fn max_flow(&mut self, graph: &Graph, source: VertexIndex, sink: VertexIndex) -> MaxFlow {
        let mut network = graph.transform_edges(|edge| {
            let capacity = edge.weight().max(0.0);
            let mut edge = edge.with_weight(capacity);
            edge.set_flow(0.0);
            edge
        });
        let value = self.augment(&mut network, source, sink);
        log::info!("max flow from {source:?} to {sink:?}: {value}");

        MaxFlow { value, network }
    }

    /// Augments the flow already present in `network` until it is maximal, returns the amount
    /// added.
    pub(crate) fn augment(
        &mut self,
        network: &mut Graph,
        source: VertexIndex,
        sink: VertexIndex,
    ) -> f64 {
        assert!(source.index() < network.vertex_count(), "source out of range");
        assert!(sink.index() < network.vertex_count(), "sink out of range");
        if source == sink {
            return 0.0;
        }

        let mut value = 0.0;
        let mut rounds = 0_usize;
        loop {
            let residual = ResidualGraph::build(network, Weighting::Capacity);
            let path = match least_hop_path(residual.graph(), source, sink) {
                Some(path) => path,
                None => break,
            };

            let arcs = residual.walk(&path);
            let amount = residual.bottleneck(&arcs);
            residual.push(network, &arcs, amount);
            value += amount;
            rounds += 1;

            log::trace!(
                "augmented {amount} along {}",
                path.iter().map(|v| v.index()).join(" -> ")
            );
            notify(
                &mut self.observer,
                FlowEvent::Augmented {
                    path: &path,
                    amount,
                },
            );
        }
        log::debug!("{rounds} augmenting paths");

        value
    }
}

/// Maximum flow from `source` to `sink` with the default [`EdmondsKarp`] engine.
pub fn edmonds_karp(graph: &Graph, source: VertexIndex, sink: VertexIndex) -> MaxFlow {
    EdmondsKarp::new().max_flow(graph, source, sink)
}

/// Breadth-first search over outgoing arcs in insertion order; the first path found to `end`
/// has the fewest hops.
fn least_hop_path(graph: &Graph, start: VertexIndex, end: VertexIndex) -> Option<Vec<VertexIndex>> {
    let mut predecessor: Vec<Option<VertexIndex>> = vec![None; graph.vertex_count()];
    predecessor[start.index()] = Some(start);
    let mut queue = VecDeque::from([start]);

    'search: while let Some(vertex) = queue.pop_front() {
        for next in graph.outgoing_neighbours(vertex) {
            if predecessor[next.index()].is_none() {
                predecessor[next.index()] = Some(vertex);
                if next == end {
                    break 'search;
                }
                queue.push_back(next);
            }
        }
    }

    if predecessor[end.index()].is_none() {
        return None;
    }
    let mut path = vec![end];
    let mut current = end;
    while let Some(previous) = predecessor[current.index()].filter(|p| *p != current) {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use core::cell::RefCell;

    use super::*;
    use crate::graph::EdgeKind;

    fn network(vertices: usize, edges: &[(usize, usize, f64)]) -> (Graph, Vec<VertexIndex>) {
        let mut g = Graph::directed();
        let v: Vec<_> = (0..vertices).map(|_| g.new_vertex()).collect();
        for &(start, end, capacity) in edges {
            g.new_edge(v[start], v[end], capacity);
        }
        (g, v)
    }

    #[test]
    fn two_routes_and_a_cross_edge() {
        // source, A, B, sink
        let (g, v) = network(4, &[(0, 1, 3.0), (1, 3, 3.0), (0, 2, 2.0), (2, 3, 2.0), (1, 2, 5.0)]);
        let flow = edmonds_karp(&g, v[0], v[3]);
        assert_eq!(flow.value, 5.0);
        assert_eq!(flow.flows(), vec![3.0, 3.0, 2.0, 2.0, 0.0]);
        // input stays plain
        assert!(g.edges().all(|e| e.kind() == EdgeKind::Plain));
    }

    #[test]
    fn undoes_flow_over_backward_arcs() {
        // s, a, c, x, y, t: the first path s-a-x-t blocks x until a-x is given back
        let (g, v) = network(
            6,
            &[
                (0, 1, 1.0),
                (0, 2, 1.0),
                (1, 3, 1.0),
                (1, 4, 1.0),
                (2, 3, 1.0),
                (3, 5, 1.0),
                (4, 5, 1.0),
            ],
        );
        let flow = edmonds_karp(&g, v[0], v[5]);
        assert_eq!(flow.value, 2.0);
        assert_eq!(flow.flows(), vec![1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn disconnected_sink_and_source_equal_sink() {
        let (g, v) = network(3, &[(0, 1, 4.0), (2, 1, 4.0)]);
        assert_eq!(edmonds_karp(&g, v[0], v[2]).value, 0.0);
        assert_eq!(edmonds_karp(&g, v[1], v[1]).value, 0.0);
    }

    #[test]
    fn negative_capacity_is_closed() {
        let (g, v) = network(2, &[(0, 1, -3.0), (0, 1, 1.5)]);
        let flow = edmonds_karp(&g, v[0], v[1]);
        assert_eq!(flow.value, 1.5);
        assert_eq!(flow.flows(), vec![0.0, 1.5]);
    }

    #[test]
    fn observer_sees_every_augmentation() {
        let (g, v) = network(3, &[(0, 1, 2.0), (1, 2, 1.0), (0, 2, 4.0)]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let flow = EdmondsKarp::new()
            .with_observer(Box::new(move |event: &FlowEvent<'_>| {
                if let FlowEvent::Augmented { path, amount } = event {
                    sink.borrow_mut().push((path.len(), *amount));
                }
            }))
            .max_flow(&g, v[0], v[2]);
        assert_eq!(flow.value, 5.0);
        assert_eq!(*seen.borrow(), vec![(2, 4.0), (3, 1.0)]);
    }
}
