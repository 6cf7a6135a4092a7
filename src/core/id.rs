//! Handles identifying vertices and edges in a graph.
//!
//! A handle is a slot position in an arena together with the generation of
//! that slot at the time the element was inserted. Removing an element bumps
//! the generation of its slot, so a handle to a removed element never resolves
//! again, even when its slot is reused by a later insertion.

use std::{fmt::Debug, hash::Hash};

/// A unique identification of a vertex or edge in a graph.
pub trait IdType: Copy + Eq + Hash + Debug {
    /// Dense integer position of the element.
    ///
    /// Positions are unique among the elements currently present in a graph,
    /// but may be shared with removed elements. Algorithms can use the
    /// position for indexing into contiguous storage as long as the graph is
    /// not modified in the meantime.
    fn as_usize(&self) -> usize;
}

/// Stable reference to an element of a
/// [`HandleList`](crate::storage::handle_list::HandleList).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle {
    pub(crate) slot: usize,
    pub(crate) generation: u32,
}

impl Handle {
    pub(crate) fn new(slot: usize, generation: u32) -> Self {
        Self { slot, generation }
    }

    /// Slot position of the element in the arena.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Generation of the slot at the time of insertion.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Handle of a vertex in a [`MatrixGraph`](crate::storage::MatrixGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub(crate) Handle);

/// Handle of an edge in a [`MatrixGraph`](crate::storage::MatrixGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub(crate) Handle);

impl VertexId {
    pub fn handle(&self) -> Handle {
        self.0
    }
}

impl EdgeId {
    pub fn handle(&self) -> Handle {
        self.0
    }
}

impl From<Handle> for VertexId {
    fn from(handle: Handle) -> Self {
        Self(handle)
    }
}

impl From<Handle> for EdgeId {
    fn from(handle: Handle) -> Self {
        Self(handle)
    }
}

impl IdType for VertexId {
    fn as_usize(&self) -> usize {
        self.0.slot
    }
}

impl IdType for EdgeId {
    fn as_usize(&self) -> usize {
        self.0.slot
    }
}

impl IdType for Handle {
    fn as_usize(&self) -> usize {
        self.slot
    }
}
