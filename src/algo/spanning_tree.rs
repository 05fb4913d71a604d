//! Minimum spanning trees. Edge direction is ignored; the tree comes back as an undirected
//! graph over the same vertices, each tree edge keeping the orientation it had in the input.

use alloc::collections::BinaryHeap;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;

use petgraph::unionfind::UnionFind;

use crate::graph::{EdgeIndex, Graph, VertexIndex};

#[derive(Clone, Debug)]
pub struct SpanningTree {
    /// Sum of the tree edge weights, added up in the order the edges were chosen.
    pub weight: f64,
    pub tree: Graph,
}

impl SpanningTree {
    fn empty(graph: &Graph) -> Self {
        let mut tree = graph.vertices_only();
        tree.set_directed(false);
        Self { weight: 0.0, tree }
    }

    fn add(&mut self, graph: &Graph, edge: EdgeIndex) {
        let edge = &graph[edge];
        self.tree.new_edge(edge.start(), edge.end(), edge.weight());
        self.weight += edge.weight();
    }

    /// True if the tree reaches every vertex.
    pub fn is_spanning(&self) -> bool {
        self.tree.edge_count() + 1 >= self.tree.vertex_count()
    }
}

#[derive(Copy, Clone, Debug)]
struct Candidate {
    weight: f64,
    edge: EdgeIndex,
    vertex: VertexIndex,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    // reversed, `BinaryHeap` is a max-heap
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.edge.cmp(&self.edge))
    }
}

/// Marks `vertex` as part of the tree and queues every edge leaving the tree from it.
fn enter(
    graph: &Graph,
    vertex: VertexIndex,
    in_tree: &mut [bool],
    queue: &mut BinaryHeap<Candidate>,
) {
    in_tree[vertex.index()] = true;
    let edges = graph.outgoing_edges(vertex).into_iter();
    for edge in edges.chain(graph.incoming_edges(vertex)) {
        let other = graph[edge].other(vertex);
        if !in_tree[other.index()] {
            queue.push(Candidate {
                weight: graph[edge].weight(),
                edge,
                vertex: other,
            });
        }
    }
}

/// Prim's algorithm grown from `start`.
///
/// Only the component of `start` is spanned; on a disconnected graph the remaining vertices
/// stay isolated in the returned tree. Ties between equal weights go to the older edge.
pub fn prim(graph: &Graph, start: VertexIndex) -> SpanningTree {
    let mut result = SpanningTree::empty(graph);
    let mut in_tree = vec![false; graph.vertex_count()];
    let mut queue = BinaryHeap::new();

    enter(graph, start, &mut in_tree, &mut queue);
    while let Some(Candidate { edge, vertex, .. }) = queue.pop() {
        if in_tree[vertex.index()] {
            continue;
        }
        log::trace!("tree edge {} reaches vertex {}", edge.index(), vertex.index());
        result.add(graph, edge);
        enter(graph, vertex, &mut in_tree, &mut queue);
    }

    log::debug!(
        "prim: {} tree edges of weight {}",
        result.tree.edge_count(),
        result.weight
    );
    result
}

/// Kruskal's algorithm over all edges, cheapest first.
///
/// On a disconnected graph the result is a minimum spanning forest.
pub fn kruskal(graph: &Graph) -> SpanningTree {
    let mut result = SpanningTree::empty(graph);
    let target = graph.vertex_count().saturating_sub(1);

    let mut edges: Vec<EdgeIndex> = graph.edge_indices().collect();
    // stable, equal weights keep edge order
    edges.sort_by(|a, b| graph[*a].weight().total_cmp(&graph[*b].weight()));

    let mut components = UnionFind::<usize>::new(graph.vertex_count());
    for edge in edges {
        if result.tree.edge_count() == target {
            break;
        }
        let (start, end) = (graph[edge].start(), graph[edge].end());
        if components.union(start.index(), end.index()) {
            result.add(graph, edge);
        }
    }

    log::debug!(
        "kruskal: {} tree edges of weight {}",
        result.tree.edge_count(),
        result.weight
    );
    result
}
