//! Readers for the whitespace separated text formats graphs are exchanged in.
//!
//! Every format starts with the vertex count `n`; vertices `0..n` are created in order and the
//! resulting graph is directed. Tokens may be separated by any whitespace, line structure is
//! not significant.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::str::{FromStr, SplitWhitespace};

use crate::error::Error;
use crate::graph::{EdgeKind, Graph, Side, VertexIndex, VertexKind};

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            inner: input.split_whitespace(),
        }
    }

    fn is_empty(&self) -> bool {
        self.inner.clone().next().is_none()
    }

    fn parse<T: FromStr>(&mut self, invalid: fn(&str) -> Error) -> Result<T, Error> {
        let token = self.inner.next().ok_or(Error::UnexpectedEof)?;
        token.parse().map_err(|_| invalid(token))
    }

    fn integer(&mut self) -> Result<usize, Error> {
        self.parse(|token| Error::InvalidInteger(token.to_string()))
    }

    fn float(&mut self) -> Result<f64, Error> {
        self.parse(|token| Error::InvalidFloat(token.to_string()))
    }

    fn vertex(&mut self, count: usize) -> Result<VertexIndex, Error> {
        let vertex = self.integer()?;
        if vertex >= count {
            return Err(Error::VertexOutOfRange { vertex, count });
        }
        Ok(VertexIndex::new(vertex))
    }
}

/// Reads the vertex count and creates that many plain vertices.
fn header(tokens: &mut Tokens<'_>) -> Result<Graph, Error> {
    let count = tokens.integer()?;
    let mut graph = Graph::directed();
    for _ in 0..count {
        graph.new_vertex();
    }
    Ok(graph)
}

/// Edge list: `n`, then `start end` pairs, or `start end weight` triples if `weighted`.
/// Unweighted edges get weight 1.
pub fn parse_edges(input: &str, weighted: bool) -> Result<Graph, Error> {
    let mut tokens = Tokens::new(input);
    let mut graph = header(&mut tokens)?;
    let count = graph.vertex_count();

    while !tokens.is_empty() {
        let start = tokens.vertex(count)?;
        let end = tokens.vertex(count)?;
        let weight = if weighted { tokens.float()? } else { 1.0 };
        graph.new_edge(start, end, weight);
    }
    log::debug!("parsed {} vertices, {} edges", count, graph.edge_count());
    Ok(graph)
}

/// Adjacency matrix: `n`, then `n × n` weights row by row. Every positive entry becomes an edge
/// from its row to its column vertex.
pub fn parse_adjacency_matrix(input: &str) -> Result<Graph, Error> {
    let mut tokens = Tokens::new(input);
    let mut graph = header(&mut tokens)?;
    let count = graph.vertex_count();

    for row in 0..count {
        for col in 0..count {
            let weight = tokens.float()?;
            if weight > 0.0 {
                graph.new_edge(VertexIndex::new(row), VertexIndex::new(col), weight);
            }
        }
    }
    log::debug!("parsed {} vertices, {} edges", count, graph.edge_count());
    Ok(graph)
}

/// Bipartite graph: `n`, the size of the left group, then `start end` pairs. Vertices below the
/// group size are on the left, all others on the right.
pub fn parse_bipartite(input: &str) -> Result<Graph, Error> {
    let mut tokens = Tokens::new(input);
    let graph = header(&mut tokens)?;
    let count = graph.vertex_count();
    let size = tokens.integer()?;
    if size > count {
        return Err(Error::InvalidGroupSize { size, count });
    }

    let mut graph = graph.transform_vertices(|vertex| {
        let side = if vertex.pos() < size {
            Side::Left
        } else {
            Side::Right
        };
        VertexKind::Group(side)
    });
    while !tokens.is_empty() {
        let start = tokens.vertex(count)?;
        let end = tokens.vertex(count)?;
        graph.new_edge(start, end, 1.0);
    }
    Ok(graph)
}

/// Flow network: `n`, `n` vertex balances, then `start end cost capacity` rows.
///
/// Vertices carry their balance, edges their capacity as weight and a cost per unit.
pub fn parse_flow(input: &str) -> Result<Graph, Error> {
    let mut tokens = Tokens::new(input);
    let graph = header(&mut tokens)?;
    let count = graph.vertex_count();

    let balances = (0..count)
        .map(|_| tokens.float())
        .collect::<Result<Vec<_>, _>>()?;
    let mut graph = graph.transform_vertices(|vertex| VertexKind::Balance(balances[vertex.pos()]));

    let mut costs = Vec::new();
    while !tokens.is_empty() {
        let start = tokens.vertex(count)?;
        let end = tokens.vertex(count)?;
        costs.push(tokens.float()?);
        let capacity = tokens.float()?;
        graph.new_edge(start, end, capacity);
    }

    let graph = graph.transform_edges(|edge| {
        let cost = costs[edge.pos()];
        edge.with_kind(EdgeKind::Cost { cost, flow: 0.0 })
    });
    log::debug!("parsed flow network, {} vertices, {} edges", count, graph.edge_count());
    Ok(graph)
}
