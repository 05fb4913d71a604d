use core::cmp::Ordering;

use itertools::Itertools;
use num_traits::float::FloatCore;

use crate::algo::max_flow::EdmondsKarp;
use crate::algo::mcmf::{
    balances, check_balances, cost_network, total_cost, MinCostFlow, OptimalFlow, SLACK,
    TOLERANCE,
};
use crate::algo::residual::{ResidualGraph, Weighting};
use crate::algo::shortest_path::{moore_bellman_ford_with_slack, ShortestPath};
use crate::algo::{notify, FlowEvent, Observer};
use crate::error::Error;
use crate::graph::{EdgeKind, Graph};

/// Minimum cost flow by cancelling negative cycles.
///
/// A feasible flow is found first by reducing the balances to a single-source, single-sink
/// maximum flow problem. Afterwards every vertex is probed for a negative-cost cycle in the
/// residual graph, and flow is pushed around each cycle found, until a whole pass over the
/// vertices comes up empty.
///
/// The number of cancellations is unbounded unless capped with [`Self::with_max_iterations`].
#[derive(Default)]
pub struct CycleCancelling {
    max_iterations: Option<usize>,
    observer: Option<Observer>,
}

impl CycleCancelling {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with [`Error::NotConverged`] instead of cancelling more than `max_iterations` cycles.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn with_observer(mut self, observer: Observer) -> Self {
        self.observer = Some(observer);
        self
    }

    fn feasible_flow(
        &mut self,
        graph: &Graph,
        balances: &[f64],
        supply: f64,
    ) -> Result<Graph, Error> {
        let network = cost_network(graph);

        let mut reduced = network.clone();
        let source = reduced.new_vertex();
        let sink = reduced.new_vertex();
        for (pos, &balance) in balances.iter().enumerate() {
            let vertex = reduced.vertex_at(pos);
            match balance.partial_cmp(&0.0) {
                Some(Ordering::Greater) => {
                    reduced.new_edge_with(source, vertex, balance, EdgeKind::Flow { flow: 0.0 });
                }
                Some(Ordering::Less) => {
                    reduced.new_edge_with(vertex, sink, -balance, EdgeKind::Flow { flow: 0.0 });
                }
                _ => {}
            }
        }

        let mut engine = EdmondsKarp {
            observer: self.observer.take(),
        };
        let value = engine.augment(&mut reduced, source, sink);
        self.observer = engine.observer;
        log::debug!("initial flow {value} of required {supply}");
        if FloatCore::abs(value - supply) > TOLERANCE {
            return Err(Error::NoFeasibleFlow);
        }

        // super source and sink edges come last, positions of the input edges line up
        let flows = reduced.flows();
        Ok(network.transform_edges(|mut edge| {
            edge.set_flow(flows[edge.pos()]);
            edge
        }))
    }

    /// Cancels negative cycles until there are none left, returns how many were cancelled.
    fn cancel_negative_cycles(&mut self, network: &mut Graph) -> Result<usize, Error> {
        let mut cancelled = 0_usize;
        loop {
            let mut improved = false;
            let mut residual = ResidualGraph::build(network, Weighting::Cost);

            for pos in 0..network.vertex_count() {
                let vertex = network.vertex_at(pos);
                let search = moore_bellman_ford_with_slack(residual.graph(), vertex, vertex, SLACK);
                let cycle = match search {
                    ShortestPath::NegativeCycle(cycle) => cycle,
                    _ => continue,
                };

                let arcs = residual.closed_walk(&cycle);
                let cost = residual.weight(&arcs);
                if cost >= -TOLERANCE {
                    log::warn!("ignoring cycle of cost {cost} found from {vertex:?}");
                    continue;
                }
                if let Some(max_iterations) = self.max_iterations {
                    if cancelled >= max_iterations {
                        return Err(Error::NotConverged(max_iterations));
                    }
                }

                let amount = residual.bottleneck(&arcs);
                residual.push(network, &arcs, amount);
                cancelled += 1;
                improved = true;

                log::trace!(
                    "cancelled {amount} around {} at {cost} per unit",
                    cycle.iter().map(|v| v.index()).join(" -> ")
                );
                notify(
                    &mut self.observer,
                    FlowEvent::CycleCancelled {
                        cycle: &cycle,
                        amount,
                        cost,
                    },
                );
                residual = ResidualGraph::build(network, Weighting::Cost);
            }

            log::debug!("pass over all vertices done, {cancelled} cycles cancelled so far");
            if !improved {
                return Ok(cancelled);
            }
        }
    }
}

impl MinCostFlow for CycleCancelling {
    fn min_cost_flow(&mut self, graph: &Graph) -> Result<OptimalFlow, Error> {
        let balances = balances(graph)?;
        let supply = check_balances(&balances)?;
        let mut network = self.feasible_flow(graph, &balances, supply)?;
        let cancelled = self.cancel_negative_cycles(&mut network)?;

        let cost = total_cost(&network);
        log::info!("cycle cancelling: cost {cost} after {cancelled} cancellations");
        Ok(OptimalFlow { cost, network })
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::Cell;

    use super::*;
    use crate::graph::{VertexIndex, VertexKind};

    fn network(balances: &[f64], edges: &[(usize, usize, f64, f64)]) -> Graph {
        let mut g = Graph::directed();
        let v: Vec<VertexIndex> = balances
            .iter()
            .map(|b| g.new_vertex_with(VertexKind::Balance(*b)))
            .collect();
        for &(start, end, capacity, cost) in edges {
            g.new_edge_with(v[start], v[end], capacity, EdgeKind::Cost { cost, flow: 0.0 });
        }
        g
    }

    // the direct edge is found first by the hop-minimal initial flow, and is the most expensive
    fn expensive_direct_route() -> Graph {
        network(
            &[2.0, -2.0, 0.0, 0.0],
            &[
                (0, 1, 2.0, 10.0),
                (0, 2, 1.0, 1.0),
                (2, 1, 1.0, 1.0),
                (0, 3, 2.0, 3.0),
                (3, 1, 2.0, 2.0),
            ],
        )
    }

    #[test]
    fn cancels_down_to_optimum() {
        let cancelled = Rc::new(Cell::new(0));
        let counter = Rc::clone(&cancelled);
        let flow = CycleCancelling::new()
            .with_observer(Box::new(move |event: &FlowEvent<'_>| {
                if let FlowEvent::CycleCancelled { .. } = event {
                    counter.set(counter.get() + 1);
                }
            }))
            .min_cost_flow(&expensive_direct_route())
            .unwrap();
        assert_eq!(flow.cost, 7.0);
        assert_eq!(flow.flows(), vec![0.0, 1.0, 1.0, 1.0, 1.0]);
        assert!(cancelled.get() >= 1);
    }

    #[test]
    fn iteration_cap() {
        let result = CycleCancelling::new()
            .with_max_iterations(0)
            .min_cost_flow(&expensive_direct_route());
        assert_eq!(result.err(), Some(Error::NotConverged(0)));
    }

    #[test]
    fn negative_cost_edge() {
        let g = network(
            &[1.0, -1.0, 0.0],
            &[(0, 1, 1.0, 4.0), (0, 2, 2.0, 1.0), (2, 1, 2.0, -3.0)],
        );
        let flow = CycleCancelling::new().min_cost_flow(&g).unwrap();
        assert_eq!(flow.cost, -2.0);
        assert_eq!(flow.flows(), vec![0.0, 1.0, 1.0]);
    }

    #[test]
    fn decimal_costs_around_a_zero_cycle() {
        let g = network(
            &[0.5, 0.0, -0.5],
            &[(0, 1, 1.0, -0.1), (1, 2, 1.0, 1.9), (2, 1, 1.0, -1.9)],
        );
        let flow = CycleCancelling::new().min_cost_flow(&g).unwrap();
        assert!(FloatCore::abs(flow.cost - 0.9) < TOLERANCE);
        assert_eq!(flow.flows(), vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn cycle_within_tolerance_is_left_alone() {
        // 0 -> 1 -> 0 saves 7e-10 per unit, not worth cancelling
        let g = network(&[0.0, 0.0], &[(0, 1, 1.0, 0.5), (1, 0, 1.0, -0.5000000007)]);
        let cancelled = Rc::new(Cell::new(0));
        let counter = Rc::clone(&cancelled);
        let flow = CycleCancelling::new()
            .with_observer(Box::new(move |event: &FlowEvent<'_>| {
                if let FlowEvent::CycleCancelled { .. } = event {
                    counter.set(counter.get() + 1);
                }
            }))
            .min_cost_flow(&g)
            .unwrap();
        assert_eq!(flow.flows(), vec![0.0, 0.0]);
        assert_eq!(flow.cost, 0.0);
        assert_eq!(cancelled.get(), 0);
    }

    #[test]
    fn unreachable_demand() {
        let g = network(&[1.0, -1.0, 0.0], &[(0, 2, 1.0, 1.0)]);
        assert_eq!(
            CycleCancelling::new().min_cost_flow(&g).err(),
            Some(Error::NoFeasibleFlow)
        );
    }

    #[test]
    fn unbalanced() {
        let g = network(&[3.0, -2.0], &[(0, 1, 5.0, 1.0)]);
        assert_eq!(
            CycleCancelling::new().min_cost_flow(&g).err(),
            Some(Error::InfeasibleBalances {
                supply: 3.0,
                demand: 2.0
            })
        );
    }
}
