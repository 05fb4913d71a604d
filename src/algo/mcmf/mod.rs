pub mod cycle_cancelling;
pub mod successive_shortest_paths;

use alloc::vec::Vec;

use num_traits::float::FloatCore;

use crate::error::Error;
use crate::graph::{EdgeKind, Graph};

pub use cycle_cancelling::CycleCancelling;
pub use successive_shortest_paths::SuccessiveShortestPaths;

/// Absolute tolerance for comparing flow amounts and balance totals.
pub const TOLERANCE: f64 = 1e-9;

/// Least improvement a label must make to count in residual path and cycle searches.
pub(crate) const SLACK: f64 = TOLERANCE / 2.0;

/// A minimum cost flow strategy.
pub trait MinCostFlow {
    /// Finds a flow meeting every vertex balance at minimum total cost.
    ///
    /// `graph` must have `Balance` vertices and edges whose weight is the capacity and whose
    /// `Cost` kind carries the cost per unit. The graph itself is not modified.
    fn min_cost_flow(&mut self, graph: &Graph) -> Result<OptimalFlow, Error>;
}

/// Result of a minimum cost flow computation.
#[derive(Clone, Debug)]
pub struct OptimalFlow {
    pub cost: f64,
    /// Copy of the input graph whose edges carry the optimal flow.
    pub network: Graph,
}

impl OptimalFlow {
    /// Flow per edge, indexed by edge position of the input graph.
    pub fn flows(&self) -> Vec<f64> {
        self.network.flows()
    }
}

/// Balance of every vertex in position order.
pub(crate) fn balances(graph: &Graph) -> Result<Vec<f64>, Error> {
    graph
        .vertices()
        .map(|vertex| vertex.balance().ok_or(Error::WrongVertexKind(vertex.pos())))
        .collect()
}

/// Verifies that supply and demand cancel out, returns the total supply.
pub(crate) fn check_balances(balances: &[f64]) -> Result<f64, Error> {
    let supply: f64 = balances.iter().filter(|b| **b > 0.0).sum();
    let demand: f64 = -balances.iter().filter(|b| **b < 0.0).sum::<f64>();
    if FloatCore::abs(supply - demand) > TOLERANCE {
        return Err(Error::InfeasibleBalances { supply, demand });
    }
    Ok(supply)
}

/// Copy of `graph` with zero flow on every edge and every edge carrying a cost.
pub(crate) fn cost_network(graph: &Graph) -> Graph {
    graph.transform_edges(|edge| {
        let cost = edge.cost();
        let capacity = edge.weight().max(0.0);
        edge.with_weight(capacity)
            .with_kind(EdgeKind::Cost { cost, flow: 0.0 })
    })
}

/// Σ flow · cost over all edges.
pub fn total_cost(network: &Graph) -> f64 {
    network.edges().map(|edge| edge.flow() * edge.cost()).sum()
}
