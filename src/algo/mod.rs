use alloc::boxed::Box;

use crate::graph::{EdgeIndex, VertexIndex};

pub mod matching;
pub mod max_flow;
pub mod mcmf;
pub mod residual;
pub mod shortest_path;
pub mod spanning_tree;
pub mod traversal;
pub mod tsp;

/// Progress reported by the flow engines while they run.
#[derive(Clone, Debug, PartialEq)]
pub enum FlowEvent<'a> {
    /// `amount` was pushed along an augmenting path.
    Augmented {
        path: &'a [VertexIndex],
        amount: f64,
    },
    /// `amount` was pushed around a negative cycle of the given cost per unit.
    CycleCancelled {
        cycle: &'a [VertexIndex],
        amount: f64,
        cost: f64,
    },
    /// A negative-cost edge was filled up to its capacity up front.
    Saturated { edge: EdgeIndex },
}

/// Callback receiving [`FlowEvent`]s, invoked synchronously on the calling thread.
pub type Observer = Box<dyn FnMut(&FlowEvent<'_>)>;

pub(crate) fn notify(observer: &mut Option<Observer>, event: FlowEvent<'_>) {
    if let Some(observer) = observer.as_mut() {
        observer(&event);
    }
}
