//! Graph algorithms with a focus on network flows.
//!
//! Graphs are built incrementally through [`Graph`] and derived into flow networks or residual
//! graphs with [`Graph::transform`]. On top of that the crate offers maximum flow
//! ([`EdmondsKarp`]), minimum cost flow ([`CycleCancelling`], [`SuccessiveShortestPaths`]),
//! label-correcting and Dijkstra shortest paths, bipartite matching, minimum spanning trees,
//! travelling salesman tours, plain traversals and readers for the common text formats.

#![no_std]
#![deny(
    warnings,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod algo;
pub mod error;
pub mod graph;
pub mod id;
pub mod parser;

pub use crate::algo::matching::maximum_matching;
pub use crate::algo::max_flow::{edmonds_karp, EdmondsKarp, MaxFlow};
pub use crate::algo::mcmf::{
    CycleCancelling, MinCostFlow, OptimalFlow, SuccessiveShortestPaths,
};
pub use crate::algo::shortest_path::{dijkstra, moore_bellman_ford, ShortestPath};
pub use crate::algo::spanning_tree::{kruskal, prim, SpanningTree};
pub use crate::algo::traversal::{breadth_first_search, connected_components, depth_first_search};
pub use crate::algo::tsp::{double_tree, nearest_neighbour, optimal_tour, Tour};
pub use crate::algo::{FlowEvent, Observer};
pub use crate::error::Error;
pub use crate::graph::{
    Edge, EdgeIndex, EdgeKind, Graph, Side, Vertex, VertexIndex, VertexKind,
};
