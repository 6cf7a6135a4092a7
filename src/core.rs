//! Core traits and types shared by the graph storage and the traversals.
//!
//! The traversals in [`visit`](crate::visit) are written only against the
//! traits in this module, so they work with any graph that can enumerate its
//! vertices and edges and report the edges incident to a vertex.

pub mod error;
pub mod id;

mod base;

pub use base::*;
pub use error::{
    InsertEdgeError, InsertEdgeErrorKind, NotIncidentError, ReplaceEdgeError, ReplaceVertexError,
};
