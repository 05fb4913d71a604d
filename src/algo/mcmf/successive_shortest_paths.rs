use alloc::vec::Vec;

use itertools::{iproduct, Itertools};
use num_traits::float::FloatCore;

use crate::algo::mcmf::{
    balances, check_balances, cost_network, total_cost, MinCostFlow, OptimalFlow, SLACK,
    TOLERANCE,
};
use crate::algo::residual::{ResidualGraph, Weighting};
use crate::algo::shortest_path::{moore_bellman_ford_with_slack, ShortestPath};
use crate::algo::{notify, FlowEvent, Observer};
use crate::error::Error;
use crate::graph::{Edge, EdgeIndex, Graph, VertexIndex};

/// Minimum cost flow by routing supply along cheapest residual paths.
///
/// Negative-cost edges are saturated up front, so the residual graph starts out free of negative
/// cycles. Then, as long as some vertex has supply left, a cheapest path from a supplying to a
/// demanding vertex carries as much as the path, the supply and the demand allow.
#[derive(Default)]
pub struct SuccessiveShortestPaths {
    observer: Option<Observer>,
}

impl SuccessiveShortestPaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observer(mut self, observer: Observer) -> Self {
        self.observer = Some(observer);
        self
    }

    fn saturate_negative_edges(&mut self, network: &mut Graph, balance: &mut [f64]) {
        let negative: Vec<EdgeIndex> = network
            .edges()
            .filter(|edge| edge.cost() < 0.0 && edge.capacity() > 0.0)
            .map(Edge::index)
            .collect();

        for index in negative {
            let edge = network.edge(index);
            let (start, end, capacity) = (edge.start(), edge.end(), edge.capacity());
            network.set_flow(index, capacity);
            balance[start.index()] -= capacity;
            balance[end.index()] += capacity;
            log::trace!("saturated {index:?} with {capacity}");
            notify(&mut self.observer, FlowEvent::Saturated { edge: index });
        }
    }

    /// Cheapest path from any supplying to any demanding vertex.
    fn cheapest_path(
        residual: &ResidualGraph,
        excess: &[VertexIndex],
        deficit: &[VertexIndex],
    ) -> Option<Vec<VertexIndex>> {
        iproduct!(deficit, excess).find_map(|(&t, &s)| {
            match moore_bellman_ford_with_slack(residual.graph(), s, t, SLACK) {
                ShortestPath::Path { path, .. } => Some(path),
                ShortestPath::NegativeCycle(cycle) => {
                    log::warn!(
                        "negative residual cycle {} while routing {s:?} to {t:?}",
                        cycle.iter().map(|v| v.index()).join(" -> ")
                    );
                    None
                }
                ShortestPath::NoPath => None,
            }
        })
    }
}

impl MinCostFlow for SuccessiveShortestPaths {
    fn min_cost_flow(&mut self, graph: &Graph) -> Result<OptimalFlow, Error> {
        let mut balance = balances(graph)?;
        check_balances(&balance)?;
        let mut network = cost_network(graph);
        self.saturate_negative_edges(&mut network, &mut balance);

        let vertices: Vec<VertexIndex> = network.vertex_indices().collect();
        let mut excess: Vec<VertexIndex> = vertices
            .iter()
            .copied()
            .filter(|v| balance[v.index()] > TOLERANCE)
            .collect();
        let mut deficit: Vec<VertexIndex> = vertices
            .iter()
            .copied()
            .filter(|v| balance[v.index()] < -TOLERANCE)
            .collect();

        let mut rounds = 0_usize;
        while !excess.is_empty() && !deficit.is_empty() {
            let residual = ResidualGraph::build(&network, Weighting::Cost);
            let path = Self::cheapest_path(&residual, &excess, &deficit)
                .ok_or(Error::NoFeasibleFlow)?;
            let (s, t) = (path[0], path[path.len() - 1]);

            let arcs = residual.walk(&path);
            let amount = residual
                .bottleneck(&arcs)
                .min(balance[s.index()])
                .min(-balance[t.index()]);
            residual.push(&mut network, &arcs, amount);
            balance[s.index()] -= amount;
            balance[t.index()] += amount;
            rounds += 1;

            log::trace!(
                "routed {amount} along {}",
                path.iter().map(|v| v.index()).join(" -> ")
            );
            notify(
                &mut self.observer,
                FlowEvent::Augmented {
                    path: &path,
                    amount,
                },
            );

            excess.retain(|v| balance[v.index()] > TOLERANCE);
            deficit.retain(|v| balance[v.index()] < -TOLERANCE);
        }

        if balance.iter().any(|b| FloatCore::abs(*b) > TOLERANCE) {
            return Err(Error::NoFeasibleFlow);
        }

        let cost = total_cost(&network);
        log::info!("successive shortest paths: cost {cost} after {rounds} paths");
        Ok(OptimalFlow { cost, network })
    }
}
