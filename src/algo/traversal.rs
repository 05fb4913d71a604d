//! Plain graph traversals. Directed graphs are walked along edge direction, undirected ones
//! along both directions; neighbours are visited in edge insertion order.

use alloc::vec;
use alloc::vec::Vec;

use crate::graph::{Graph, VertexIndex};

/// Vertices reachable from `start` in breadth-first discovery order, `start` first.
pub fn breadth_first_search(graph: &Graph, start: VertexIndex) -> Vec<VertexIndex> {
    breadth_first(graph, start, Graph::adjacent)
}

fn breadth_first<F>(graph: &Graph, start: VertexIndex, neighbours: F) -> Vec<VertexIndex>
where
    F: Fn(&Graph, VertexIndex) -> Vec<VertexIndex>,
{
    let mut discovered = vec![false; graph.vertex_count()];
    discovered[start.index()] = true;
    let mut order = vec![start];

    // `order` doubles as the queue
    let mut next = 0;
    while let Some(&vertex) = order.get(next) {
        next += 1;
        for neighbour in neighbours(graph, vertex) {
            if !discovered[neighbour.index()] {
                discovered[neighbour.index()] = true;
                order.push(neighbour);
            }
        }
    }
    order
}

struct Frame {
    neighbours: Vec<VertexIndex>,
    next: usize,
}

/// Vertices reachable from `start` in depth-first pre-order, `start` first.
pub fn depth_first_search(graph: &Graph, start: VertexIndex) -> Vec<VertexIndex> {
    let mut discovered = vec![false; graph.vertex_count()];
    discovered[start.index()] = true;
    let mut order = vec![start];
    let mut stack = vec![Frame {
        neighbours: graph.adjacent(start),
        next: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        match frame.neighbours.get(frame.next) {
            Some(&neighbour) => {
                frame.next += 1;
                if !discovered[neighbour.index()] {
                    discovered[neighbour.index()] = true;
                    order.push(neighbour);
                    stack.push(Frame {
                        neighbours: graph.adjacent(neighbour),
                        next: 0,
                    });
                }
            }
            None => {
                stack.pop();
            }
        }
    }
    order
}

/// Number of connected components, edge direction ignored.
pub fn connected_components(graph: &Graph) -> usize {
    let mut seen = vec![false; graph.vertex_count()];
    let mut components = 0;
    for vertex in graph.vertex_indices() {
        if seen[vertex.index()] {
            continue;
        }
        components += 1;
        for reached in breadth_first(graph, vertex, Graph::neighbours) {
            seen[reached.index()] = true;
        }
    }
    log::debug!("{components} connected components");
    components
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_vertices() -> (Graph, Vec<VertexIndex>) {
        let mut g = Graph::directed();
        let v = (0..10).map(|_| g.new_vertex()).collect();
        (g, v)
    }

    fn check(
        search: fn(&Graph, VertexIndex) -> Vec<VertexIndex>,
        g: &mut Graph,
        v: &[VertexIndex],
        start: usize,
        directed: &[usize],
        undirected: &[usize],
    ) {
        let expect = |order: &[usize]| order.iter().map(|i| v[*i]).collect::<Vec<_>>();
        g.set_directed(true);
        assert_eq!(search(g, v[start]), expect(directed));
        g.set_directed(false);
        assert_eq!(search(g, v[start]), expect(undirected));
    }

    // edges point from lower to higher vertex unless noted
    #[test]
    fn breadth_first_order() {
        let (mut g, v) = ten_vertices();
        for (a, b) in [(0, 1), (0, 2), (0, 3), (1, 4), (3, 4), (5, 6), (5, 8), (6, 7)] {
            g.new_edge(v[a], v[b], 1.0);
        }
        let bfs = breadth_first_search;
        check(bfs, &mut g, &v, 0, &[0, 1, 2, 3, 4], &[0, 1, 2, 3, 4]);

        g.new_edge(v[4], v[5], 1.0);
        let all = [0, 1, 2, 3, 4, 5, 6, 8, 7];
        check(bfs, &mut g, &v, 0, &all, &all);

        g.new_edge(v[6], v[1], 1.0);
        check(bfs, &mut g, &v, 0, &all, &[0, 1, 2, 3, 4, 6, 5, 7, 8]);
        check(bfs, &mut g, &v, 9, &[9], &[9]);
        check(bfs, &mut g, &v, 6, &[6, 7, 1, 4, 5, 8], &[6, 7, 1, 5, 4, 0, 8, 3, 2]);
    }

    #[test]
    fn depth_first_order() {
        let (mut g, v) = ten_vertices();
        for (a, b) in [(0, 1), (0, 2), (0, 3), (1, 4), (3, 4), (5, 6), (5, 8), (6, 7)] {
            g.new_edge(v[a], v[b], 1.0);
        }
        let dfs = depth_first_search;
        check(dfs, &mut g, &v, 0, &[0, 1, 4, 2, 3], &[0, 1, 4, 3, 2]);

        g.new_edge(v[4], v[5], 1.0);
        let directed = [0, 1, 4, 5, 6, 7, 8, 2, 3];
        let undirected = [0, 1, 4, 5, 6, 7, 8, 3, 2];
        check(dfs, &mut g, &v, 0, &directed, &undirected);

        g.new_edge(v[6], v[1], 1.0);
        check(dfs, &mut g, &v, 0, &directed, &undirected);
        check(dfs, &mut g, &v, 9, &[9], &[9]);
        check(dfs, &mut g, &v, 6, &[6, 7, 1, 4, 5, 8], &[6, 7, 1, 4, 5, 8, 3, 0, 2]);
    }

    #[test]
    fn component_count() {
        let (mut g, v) = ten_vertices();
        assert_eq!(connected_components(&Graph::directed()), 0);
        assert_eq!(connected_components(&g), 10);

        let mut connect = |edges: &[(usize, usize)]| {
            for &(a, b) in edges {
                g.new_edge(v[a], v[b], 1.0);
            }
            connected_components(&g)
        };
        assert_eq!(connect(&[(0, 1), (0, 2), (3, 4), (5, 6), (5, 8), (6, 7)]), 4);
        assert_eq!(connect(&[(1, 3), (1, 4), (7, 8)]), 3);
        assert_eq!(connect(&[(4, 5)]), 2);
        assert_eq!(connect(&[(7, 9)]), 1);
    }

    #[test]
    fn components_ignore_direction() {
        let mut g = Graph::directed();
        let a = g.new_vertex();
        let b = g.new_vertex();
        let c = g.new_vertex();
        g.new_edge(b, a, 1.0);
        g.new_edge(c, a, 1.0);
        assert_eq!(breadth_first_search(&g, a), vec![a]);
        assert_eq!(connected_components(&g), 1);
    }
}
