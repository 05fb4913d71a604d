use std::collections::BTreeSet;

use flownet::parser::parse_bipartite;
use flownet::{maximum_matching, Error, Graph, Side, VertexKind};

#[test]
fn matches_everyone_from_file() {
    let g = parse_bipartite(include_str!("fixtures/bipartite_small.txt")).unwrap();
    let matched = maximum_matching(&g).unwrap();
    assert_eq!(matched.len(), 3);

    let mut covered = BTreeSet::new();
    for edge in &matched {
        assert!(covered.insert(g[*edge].start()));
        assert!(covered.insert(g[*edge].end()));
    }
    assert_eq!(covered.len(), 6);
}

#[test]
fn grid_of_pairs() {
    // left i is joined to right i and right i + 1
    let n = 20;
    let mut g = Graph::undirected();
    let left: Vec<_> = (0..n).map(|_| g.new_vertex_with(VertexKind::Group(Side::Left))).collect();
    let right: Vec<_> = (0..n).map(|_| g.new_vertex_with(VertexKind::Group(Side::Right))).collect();
    for i in 0..n {
        g.new_edge(left[i], right[i], 1.0);
        if i + 1 < n {
            g.new_edge(left[i], right[i + 1], 1.0);
        }
    }
    assert_eq!(maximum_matching(&g).unwrap().len(), n);
}

#[test]
fn plain_graph_is_rejected() {
    let mut g = Graph::undirected();
    let a = g.new_vertex_with(VertexKind::Group(Side::Left));
    let b = g.new_vertex();
    g.new_edge(a, b, 1.0);
    assert_eq!(maximum_matching(&g), Err(Error::WrongVertexKind(1)));
}
