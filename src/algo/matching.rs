use alloc::vec::Vec;

use crate::algo::max_flow::EdmondsKarp;
use crate::error::Error;
use crate::graph::{Edge, EdgeIndex, EdgeKind, Graph, Side};

/// Maximum cardinality matching of a bipartite graph.
///
/// Every vertex must be a `Group` vertex and every edge must join the two sides; direction does
/// not matter. The matching is found as a unit capacity maximum flow from a super source in front
/// of the left side to a super sink behind the right side. Returns the matched edges in position
/// order.
pub fn maximum_matching(graph: &Graph) -> Result<Vec<EdgeIndex>, Error> {
    let sides = graph
        .vertices()
        .map(|vertex| vertex.side().ok_or(Error::WrongVertexKind(vertex.pos())))
        .collect::<Result<Vec<Side>, _>>()?;
    if let Some(edge) = graph
        .edges()
        .find(|edge| sides[edge.start().index()] == sides[edge.end().index()])
    {
        return Err(Error::NotBipartite(edge.pos()));
    }

    let mut network = graph.transform_edges(|edge| {
        let edge = edge.with_weight(1.0).with_kind(EdgeKind::Flow { flow: 0.0 });
        match sides[edge.start().index()] {
            Side::Left => edge,
            Side::Right => edge.reversed(),
        }
    });
    network.set_directed(true);

    let source = network.new_vertex();
    let sink = network.new_vertex();
    for (pos, side) in sides.iter().enumerate() {
        let vertex = network.vertex_at(pos);
        match side {
            Side::Left => network.new_edge(source, vertex, 1.0),
            Side::Right => network.new_edge(vertex, sink, 1.0),
        };
    }

    let value = EdmondsKarp::new().augment(&mut network, source, sink);
    let matched: Vec<EdgeIndex> = network
        .edges()
        .take(graph.edge_count())
        .filter(|edge| edge.flow() >= 1.0)
        .map(Edge::index)
        .collect();
    assert_eq!(
        matched.len(),
        value as usize,
        "matching size must equal the unit capacity max flow"
    );

    log::info!("matched {} of {} edges", matched.len(), graph.edge_count());
    Ok(matched)
}
