//! Round trips through every vertex (travelling salesman tours).
//!
//! Edge direction is ignored and parallel edges collapse to the cheapest one. A tour is given
//! by its vertex order; the closing edge back to the first vertex is implied.

use alloc::vec;
use alloc::vec::Vec;

use crate::algo::spanning_tree::prim;
use crate::algo::traversal::depth_first_search;
use crate::error::Error;
use crate::graph::{Graph, VertexIndex};

#[derive(Clone, Debug, PartialEq)]
pub struct Tour {
    pub length: f64,
    pub vertices: Vec<VertexIndex>,
}

/// Cheapest edge weight between every pair of distinct vertices.
struct Distances {
    count: usize,
    weights: Vec<Option<f64>>,
}

impl Distances {
    fn new(graph: &Graph) -> Self {
        let count = graph.vertex_count();
        let mut weights = vec![None; count * count];
        for edge in graph.edges().filter(|e| e.start() != e.end()) {
            let (a, b) = (edge.start().index(), edge.end().index());
            for slot in [a * count + b, b * count + a] {
                match weights[slot] {
                    Some(weight) if weight <= edge.weight() => {}
                    _ => weights[slot] = Some(edge.weight()),
                }
            }
        }
        Self { count, weights }
    }

    fn get(&self, from: VertexIndex, to: VertexIndex) -> Option<f64> {
        self.weights[from.index() * self.count + to.index()]
    }

    /// Length of the round trip along `vertices`, `NoTour` if a step has no edge.
    fn close(&self, vertices: Vec<VertexIndex>) -> Result<Tour, Error> {
        let mut length = 0.0;
        if vertices.len() > 1 {
            let closing = vertices.last().zip(vertices.first());
            for (from, to) in vertices.windows(2).map(|w| (&w[0], &w[1])).chain(closing) {
                length += self.get(*from, *to).ok_or(Error::NoTour)?;
            }
        }
        Ok(Tour { length, vertices })
    }
}

/// Greedy tour from `start`, always moving on to the closest unvisited vertex.
///
/// Ties go to the lower vertex position. Fails with `NoTour` when the walk gets stuck or the
/// last vertex has no edge back to `start`, even if some other tour exists.
pub fn nearest_neighbour(graph: &Graph, start: VertexIndex) -> Result<Tour, Error> {
    let distances = Distances::new(graph);
    let mut visited = vec![false; graph.vertex_count()];
    visited[start.index()] = true;
    let mut vertices = vec![start];

    let mut current = start;
    while vertices.len() < graph.vertex_count() {
        let (next, _) = graph
            .vertex_indices()
            .filter(|v| !visited[v.index()])
            .filter_map(|v| distances.get(current, v).map(|weight| (v, weight)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(|| {
                log::debug!("nearest neighbour stuck at vertex {}", current.index());
                Error::NoTour
            })?;
        visited[next.index()] = true;
        vertices.push(next);
        current = next;
    }
    distances.close(vertices)
}

/// Double tree heuristic: the depth-first pre-order of a minimum spanning tree grown from
/// `start`, shortcutting vertices already seen.
///
/// At most twice the optimum when the weights satisfy the triangle inequality.
pub fn double_tree(graph: &Graph, start: VertexIndex) -> Result<Tour, Error> {
    let mst = prim(graph, start);
    if !mst.is_spanning() {
        log::debug!("graph is disconnected, no spanning tree");
        return Err(Error::NoTour);
    }
    let vertices = depth_first_search(&mst.tree, start);
    Distances::new(graph).close(vertices)
}

struct Search<'a> {
    distances: &'a Distances,
    vertices: Vec<VertexIndex>,
    visited: Vec<bool>,
    best: Option<(f64, Vec<VertexIndex>)>,
}

impl Search<'_> {
    fn bound(&self) -> Option<f64> {
        self.best.as_ref().map(|(length, _)| *length)
    }

    fn extend(&mut self, length: f64) {
        let (first, last) = match (self.vertices.first(), self.vertices.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return,
        };

        if self.vertices.len() == self.distances.count {
            if let Some(back) = self.distances.get(last, first) {
                let length = length + back;
                if self.bound().map_or(true, |best| length < best) {
                    log::trace!("tour of length {length}");
                    self.best = Some((length, self.vertices.clone()));
                }
            }
            return;
        }

        for pos in 0..self.distances.count {
            if self.visited[pos] {
                continue;
            }
            let next = VertexIndex::new(pos);
            let Some(step) = self.distances.get(last, next) else {
                continue;
            };
            let length = length + step;
            if self.bound().is_some_and(|best| length >= best) {
                continue;
            }
            self.visited[pos] = true;
            self.vertices.push(next);
            self.extend(length);
            self.vertices.pop();
            self.visited[pos] = false;
        }
    }
}

/// Shortest tour by exhaustive search, starting from the first vertex.
///
/// Partial tours already as long as the best complete one are cut off, which needs
/// non-negative weights: a negative edge weight yields `NegativeEdgeWeight`. Runtime is
/// exponential in the vertex count.
pub fn optimal_tour(graph: &Graph) -> Result<Tour, Error> {
    if graph.edges().any(|e| e.weight() < 0.0) {
        return Err(Error::NegativeEdgeWeight);
    }
    let count = graph.vertex_count();
    if count == 0 {
        return Ok(Tour {
            length: 0.0,
            vertices: Vec::new(),
        });
    }

    let distances = Distances::new(graph);
    let mut search = Search {
        distances: &distances,
        vertices: vec![graph.vertex_at(0)],
        visited: vec![false; count],
        best: None,
    };
    search.visited[0] = true;
    if count == 1 {
        return distances.close(search.vertices);
    }
    search.extend(0.0);

    let (_, vertices) = search.best.ok_or(Error::NoTour)?;
    let tour = distances.close(vertices)?;
    log::debug!("optimal tour of length {}", tour.length);
    Ok(tour)
}
