use core::fmt::{self, Debug, Display};

/// A trait representing a graph element identifier.
pub trait Id: Copy + Ord + Debug + Display {
    fn from_raw(raw: usize) -> Self;
    fn raw(self) -> usize;
}

/// Identity of a vertex. Survives `Graph::transform`, never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(usize);

/// Identity of an edge. Survives `Graph::transform`, never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(usize);

impl Id for VertexId {
    fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    fn raw(self) -> usize {
        self.0
    }
}

impl Id for EdgeId {
    fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    fn raw(self) -> usize {
        self.0
    }
}

impl Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Hands out increasing identifiers, starting at zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct IdProvider(usize);

impl IdProvider {
    pub(crate) fn next_id<I: Id>(&mut self) -> I {
        let id = I::from_raw(self.0);
        self.0 += 1;
        id
    }
}
