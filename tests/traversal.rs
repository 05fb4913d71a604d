use flownet::parser::{parse_adjacency_matrix, parse_edges};
use flownet::{
    breadth_first_search, connected_components, depth_first_search, dijkstra, moore_bellman_ford,
    ShortestPath, VertexIndex,
};

fn positions(order: &[VertexIndex]) -> Vec<usize> {
    order.iter().map(|v| v.index()).collect()
}

#[test]
fn edge_list_traversals() {
    let mut g = parse_edges(include_str!("fixtures/components.txt"), false).unwrap();
    assert_eq!(connected_components(&g), 3);

    let start = g.vertex_at(0);
    assert_eq!(positions(&breadth_first_search(&g, start)), vec![0, 1, 2, 3]);
    assert_eq!(positions(&depth_first_search(&g, start)), vec![0, 1, 3, 2]);

    g.set_directed(false);
    let start = g.vertex_at(3);
    assert_eq!(positions(&breadth_first_search(&g, start)), vec![3, 1, 2, 0]);
    assert_eq!(positions(&depth_first_search(&g, start)), vec![3, 1, 0, 2]);
}

#[test]
fn matrix_shortest_paths() {
    let g = parse_adjacency_matrix(include_str!("fixtures/matrix.txt")).unwrap();
    let (start, end) = (g.vertex_at(0), g.vertex_at(3));
    let expected = ShortestPath::Path {
        distance: 4.0,
        path: vec![start, g.vertex_at(2), g.vertex_at(1), end],
    };
    assert_eq!(moore_bellman_ford(&g, start, end), expected);
    assert_eq!(dijkstra(&g, start, end), Ok(expected));
}
