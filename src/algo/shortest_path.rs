use alloc::collections::BinaryHeap;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::error::Error;
use crate::graph::{Graph, VertexIndex};

/// Outcome of a shortest path query.
#[derive(Clone, Debug, PartialEq)]
pub enum ShortestPath {
    /// The end vertex is not reachable from the start vertex.
    NoPath,
    /// A negative cycle reachable from the start vertex, in edge direction. The last vertex
    /// connects back to the first.
    NegativeCycle(Vec<VertexIndex>),
    /// Shortest distance and the vertices from start to end, both inclusive.
    Path {
        distance: f64,
        path: Vec<VertexIndex>,
    },
}

impl ShortestPath {
    pub fn path(&self) -> Option<&[VertexIndex]> {
        match self {
            ShortestPath::Path { path, .. } => Some(path.as_slice()),
            _ => None,
        }
    }
}

struct Labels {
    start: VertexIndex,
    distance: Vec<f64>,
    // `None` for unreached vertices and for `start` until a cycle leads back to it
    predecessor: Vec<Option<VertexIndex>>,
    // a label only counts as improved if it drops by more than this
    slack: f64,
}

impl Labels {
    fn new(vertex_count: usize, start: VertexIndex, slack: f64) -> Self {
        let mut labels = Self {
            start,
            distance: vec![f64::INFINITY; vertex_count],
            predecessor: vec![None; vertex_count],
            slack,
        };
        labels.distance[start.index()] = 0.0;
        labels
    }

    fn reached(&self, vertex: VertexIndex) -> bool {
        vertex == self.start || self.predecessor[vertex.index()].is_some()
    }

    fn distance(&self, vertex: VertexIndex) -> f64 {
        self.distance[vertex.index()]
    }

    /// Relaxes `from -> to`, returns whether the label of `to` improved.
    fn relax(&mut self, from: VertexIndex, to: VertexIndex, weight: f64) -> bool {
        if !self.reached(from) {
            return false;
        }
        let distance = self.distance(from) + weight;
        if distance < self.distance(to) - self.slack {
            self.distance[to.index()] = distance;
            self.predecessor[to.index()] = Some(from);
            true
        } else {
            false
        }
    }

    /// Follows the predecessors back from `vertex` for at most `|V|` steps, stopping early at
    /// `start` if it has no predecessor.
    fn walk_back(&self, mut vertex: VertexIndex) -> VertexIndex {
        for _ in 0..self.distance.len() {
            match self.predecessor[vertex.index()] {
                Some(previous) => vertex = previous,
                None => break,
            }
        }
        vertex
    }

    fn path_to(&self, end: VertexIndex) -> ShortestPath {
        if !self.reached(end) {
            return ShortestPath::NoPath;
        }
        let mut path = vec![end];
        let mut current = end;
        while current != self.start {
            if path.len() > self.distance.len() {
                // rounding can close a predecessor cycle of weight zero that misses `start`
                return match self.cycle_through(current) {
                    Some(cycle) => ShortestPath::NegativeCycle(cycle),
                    None => unreachable!("a walk of |V| steps that avoids start is in a cycle"),
                };
            }
            current = self.predecessor[current.index()]
                .unwrap_or_else(|| panic!("bug: {current:?} reached without a predecessor"));
            path.push(current);
        }
        path.reverse();

        ShortestPath::Path {
            distance: self.distance(end),
            path,
        }
    }

    /// The predecessor cycle `vertex` lies on, in edge direction. `None` if the predecessors of
    /// `vertex` run into `start` instead.
    fn cycle_through(&self, vertex: VertexIndex) -> Option<Vec<VertexIndex>> {
        let mut cycle = vec![vertex];
        let mut current = vertex;
        for _ in 0..self.distance.len() {
            current = self.predecessor[current.index()]?;
            if current == vertex {
                cycle.reverse();
                return Some(cycle);
            }
            cycle.push(current);
        }
        None
    }
}

/// Label-correcting shortest path search (Moore-Bellman-Ford) from `start` to `end`.
///
/// Negative edge weights are allowed. Every edge is relaxed up to `|V|` times, stopping early
/// once a pass changes nothing; edges of undirected graphs are relaxed in both directions. If
/// the `|V|`-th pass still improves a label, a negative cycle is reachable from `start` and
/// returned instead of a path. With `start == end` this doubles as a negative cycle probe.
/// A cycle whose weights cancel out can also be reported when rounding makes it look negative.
///
/// Runs in O(V·E). Panics if `start` or `end` is not a vertex of `graph`.
pub fn moore_bellman_ford(graph: &Graph, start: VertexIndex, end: VertexIndex) -> ShortestPath {
    moore_bellman_ford_with_slack(graph, start, end, 0.0)
}

/// [`moore_bellman_ford`] counting only improvements larger than `slack`. Every negative cycle
/// reported then weighs less than `-slack`, and cycles of weight zero up to rounding are never
/// reported.
pub(crate) fn moore_bellman_ford_with_slack(
    graph: &Graph,
    start: VertexIndex,
    end: VertexIndex,
    slack: f64,
) -> ShortestPath {
    let vertex_count = graph.vertex_count();
    assert!(start.index() < vertex_count, "start vertex out of range");
    assert!(end.index() < vertex_count, "end vertex out of range");
    let mut labels = Labels::new(vertex_count, start, slack);

    let mut changed = None;
    for pass in 0..vertex_count {
        changed = None;
        for edge in graph.edges() {
            let (u, v, weight) = (edge.start(), edge.end(), edge.weight());
            if labels.relax(u, v, weight) {
                changed = Some(v);
            }
            if !graph.is_directed() && labels.relax(v, u, weight) {
                changed = Some(u);
            }
        }

        if changed.is_none() {
            log::trace!("labels settled after {} passes", pass + 1);
            break;
        }
    }

    // |V| steps back along the predecessors end up inside a cycle unless they reach `start`
    match changed.and_then(|vertex| labels.cycle_through(labels.walk_back(vertex))) {
        Some(cycle) => ShortestPath::NegativeCycle(cycle),
        None => labels.path_to(end),
    }
}

#[derive(Copy, Clone, Debug)]
struct Candidate {
    distance: f64,
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
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

/// Dijkstra's shortest path search from `start` to `end`.
///
/// Fails with [`Error::NegativeEdgeWeight`] as soon as it inspects an edge with negative weight.
pub fn dijkstra(graph: &Graph, start: VertexIndex, end: VertexIndex) -> Result<ShortestPath, Error> {
    let vertex_count = graph.vertex_count();
    assert!(end.index() < vertex_count, "end vertex out of range");
    let mut labels = Labels::new(vertex_count, start, 0.0);
    let mut settled = vec![false; vertex_count];
    let mut queue = BinaryHeap::new();
    queue.push(Candidate {
        distance: 0.0,
        vertex: start,
    });

    while let Some(Candidate { vertex, .. }) = queue.pop() {
        if settled[vertex.index()] {
            continue;
        }
        settled[vertex.index()] = true;
        if vertex == end {
            break;
        }

        for edge in graph.adjacent_edges(vertex) {
            let edge = &graph[edge];
            if edge.weight() < 0.0 {
                return Err(Error::NegativeEdgeWeight);
            }
            let neighbour = edge.other(vertex);
            if labels.relax(vertex, neighbour, edge.weight()) {
                queue.push(Candidate {
                    distance: labels.distance(neighbour),
                    vertex: neighbour,
                });
            }
        }
    }

    Ok(labels.path_to(end))
}
