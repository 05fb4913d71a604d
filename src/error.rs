use alloc::string::String;

use displaydoc::Display;

#[derive(Clone, Debug, PartialEq, Display)]
pub enum Error {
    /// Sum of positive balances ({supply}) does not match sum of negative balances ({demand})
    InfeasibleBalances { supply: f64, demand: f64 },
    /// No feasible flow satisfies the vertex balances
    NoFeasibleFlow,
    /// Negative edge weight found, shortest path query aborted
    NegativeEdgeWeight,
    /// Cycle cancelling did not converge within {0} iterations
    NotConverged(usize),
    /// Vertex {0} lacks the attribute required by this algorithm
    WrongVertexKind(usize),
    /// Unexpected end of input
    UnexpectedEof,
    /// Invalid integer `{0}`
    InvalidInteger(String),
    /// Invalid number `{0}`
    InvalidFloat(String),
    /// Vertex {vertex} is out of range for a graph with {count} vertices
    VertexOutOfRange { vertex: usize, count: usize },
    /// Group size {size} exceeds vertex count {count}
    InvalidGroupSize { size: usize, count: usize },
    /// Edge {0} connects two vertices on the same side
    NotBipartite(usize),
    /// No round trip through every vertex along the edges of the graph
    NoTour,
}
