//! Graph model shared by every algorithm in the crate.
//!
//! Vertices and edges live in a `petgraph` arena and are addressed by their position. All
//! cross-references are indices, so a graph can be cloned or transformed into a derived graph
//! (flow network, residual graph, ...) without aliasing. Positions are preserved by
//! [`Graph::transform`], which keeps position-indexed side tables valid across transforms.

mod edge;
mod vertex;

use alloc::vec::Vec;
use core::ops::Index;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

pub use edge::{Edge, EdgeKind};
pub use vertex::{Side, Vertex, VertexKind};

use crate::id::IdProvider;

pub type VertexIndex = NodeIndex<u32>;
pub type EdgeIndex = petgraph::graph::EdgeIndex<u32>;

#[derive(Clone, Debug)]
pub struct Graph {
    inner: DiGraph<Vertex, Edge>,
    directed: bool,
    vertex_ids: IdProvider,
    edge_ids: IdProvider,
}

impl Graph {
    pub fn new(directed: bool) -> Self {
        Self {
            inner: DiGraph::new(),
            directed,
            vertex_ids: IdProvider::default(),
            edge_ids: IdProvider::default(),
        }
    }

    pub fn directed() -> Self {
        Self::new(true)
    }

    pub fn undirected() -> Self {
        Self::new(false)
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    pub fn vertex_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Index of the vertex at `pos`. Panics if there is no such vertex.
    pub fn vertex_at(&self, pos: usize) -> VertexIndex {
        assert!(
            pos < self.vertex_count(),
            "vertex position {} out of range ({} vertices)",
            pos,
            self.vertex_count()
        );
        NodeIndex::new(pos)
    }

    pub fn new_vertex(&mut self) -> VertexIndex {
        self.new_vertex_with(VertexKind::Plain)
    }

    pub fn new_vertex_with(&mut self, kind: VertexKind) -> VertexIndex {
        let pos = self.inner.node_count();
        let id = self.vertex_ids.next_id();
        self.inner.add_node(Vertex::new(id, pos, kind))
    }

    pub fn new_edge(&mut self, start: VertexIndex, end: VertexIndex, weight: f64) -> EdgeIndex {
        self.new_edge_with(start, end, weight, EdgeKind::Plain)
    }

    pub fn new_edge_with(
        &mut self,
        start: VertexIndex,
        end: VertexIndex,
        weight: f64,
        kind: EdgeKind,
    ) -> EdgeIndex {
        let pos = self.inner.edge_count();
        let id = self.edge_ids.next_id();
        self.inner
            .add_edge(start, end, Edge::new(id, pos, start, end, weight, kind))
    }

    pub fn vertex(&self, vertex: VertexIndex) -> &Vertex {
        &self.inner[vertex]
    }

    pub fn edge(&self, edge: EdgeIndex) -> &Edge {
        &self.inner[edge]
    }

    /// Endpoints are immutable through this handle's public API, only flow and weight change.
    pub(crate) fn edge_mut(&mut self, edge: EdgeIndex) -> &mut Edge {
        &mut self.inner[edge]
    }

    pub fn set_flow(&mut self, edge: EdgeIndex, flow: f64) {
        self.edge_mut(edge).set_flow(flow);
    }

    /// Vertices in position order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.inner.raw_nodes().iter().map(|node| &node.weight)
    }

    /// Edges in position order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.inner.raw_edges().iter().map(|edge| &edge.weight)
    }

    pub fn vertex_indices(&self) -> impl Iterator<Item = VertexIndex> {
        self.inner.node_indices()
    }

    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIndex> {
        self.inner.edge_indices()
    }

    fn incident(&self, vertex: VertexIndex, direction: Direction) -> Vec<EdgeIndex> {
        // petgraph yields the newest edge first, we want insertion order
        let mut edges: Vec<_> = self
            .inner
            .edges_directed(vertex, direction)
            .map(|e| e.id())
            .collect();
        edges.sort_unstable();
        edges
    }

    pub fn outgoing_edges(&self, vertex: VertexIndex) -> Vec<EdgeIndex> {
        self.incident(vertex, Direction::Outgoing)
    }

    pub fn incoming_edges(&self, vertex: VertexIndex) -> Vec<EdgeIndex> {
        self.incident(vertex, Direction::Incoming)
    }

    pub fn outgoing_neighbours(&self, vertex: VertexIndex) -> Vec<VertexIndex> {
        self.outgoing_edges(vertex)
            .into_iter()
            .map(|e| self.inner[e].end())
            .collect()
    }

    pub fn incoming_neighbours(&self, vertex: VertexIndex) -> Vec<VertexIndex> {
        self.incoming_edges(vertex)
            .into_iter()
            .map(|e| self.inner[e].start())
            .collect()
    }

    /// Outgoing neighbours followed by incoming neighbours, regardless of direction.
    pub fn neighbours(&self, vertex: VertexIndex) -> Vec<VertexIndex> {
        let mut neighbours = self.outgoing_neighbours(vertex);
        neighbours.extend(self.incoming_neighbours(vertex));
        neighbours
    }

    /// Vertices reachable over one edge, honouring the `directed` flag.
    pub fn adjacent(&self, vertex: VertexIndex) -> Vec<VertexIndex> {
        if self.directed {
            self.outgoing_neighbours(vertex)
        } else {
            self.neighbours(vertex)
        }
    }

    /// Edges usable from `vertex`, honouring the `directed` flag.
    pub fn adjacent_edges(&self, vertex: VertexIndex) -> Vec<EdgeIndex> {
        let mut edges = self.outgoing_edges(vertex);
        if !self.directed {
            edges.extend(self.incoming_edges(vertex));
        }
        edges
    }

    /// First edge (by position) leading from `from` to `to`.
    pub fn find_edge(&self, from: VertexIndex, to: VertexIndex) -> Option<EdgeIndex> {
        self.outgoing_edges(from)
            .into_iter()
            .find(|e| self.inner[*e].end() == to)
    }

    /// Builds a new graph of the same shape by mapping every vertex and edge.
    ///
    /// Position `i` in `self` maps to position `i` in the result and identities are kept, so
    /// vertices created on the result later on never collide with existing ones. `edge_fn`
    /// receives a copy of each edge and may re-weight, re-kind or reverse it, but must return
    /// the edge at the same position.
    pub fn transform<VF, EF>(&self, mut vertex_fn: VF, mut edge_fn: EF) -> Graph
    where
        VF: FnMut(&Vertex) -> VertexKind,
        EF: FnMut(Edge) -> Edge,
    {
        let mut inner = DiGraph::with_capacity(self.vertex_count(), self.edge_count());
        for vertex in self.vertices() {
            inner.add_node(Vertex::new(vertex.id(), vertex.pos(), vertex_fn(vertex)));
        }
        for (pos, edge) in self.edges().enumerate() {
            let edge = edge_fn(edge.clone());
            assert_eq!(edge.pos(), pos, "edge transform must preserve positions");
            inner.add_edge(edge.start(), edge.end(), edge);
        }

        Graph {
            inner,
            directed: self.directed,
            vertex_ids: self.vertex_ids,
            edge_ids: self.edge_ids,
        }
    }

    pub fn transform_vertices<VF>(&self, vertex_fn: VF) -> Graph
    where
        VF: FnMut(&Vertex) -> VertexKind,
    {
        self.transform(vertex_fn, |edge| edge)
    }

    pub fn transform_edges<EF>(&self, edge_fn: EF) -> Graph
    where
        EF: FnMut(Edge) -> Edge,
    {
        self.transform(Vertex::kind, edge_fn)
    }

    /// Same vertices (identities, positions, kinds), no edges.
    pub fn vertices_only(&self) -> Graph {
        let mut inner = DiGraph::with_capacity(self.vertex_count(), 0);
        for vertex in self.vertices() {
            inner.add_node(vertex.clone());
        }

        Graph {
            inner,
            directed: self.directed,
            vertex_ids: self.vertex_ids,
            edge_ids: IdProvider::default(),
        }
    }

    /// Flow of every edge, indexed by edge position.
    pub fn flows(&self) -> Vec<f64> {
        self.edges().map(Edge::flow).collect()
    }
}

impl Index<VertexIndex> for Graph {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        self.vertex(index)
    }
}

impl Index<EdgeIndex> for Graph {
    type Output = Edge;

    fn index(&self, index: EdgeIndex) -> &Self::Output {
        self.edge(index)
    }
}
