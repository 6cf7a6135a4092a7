use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("inserting edge failed: {kind}")]
pub struct InsertEdgeError<E> {
    pub attr: E,
    pub kind: InsertEdgeErrorKind,
}

impl<E> InsertEdgeError<E> {
    pub fn new(attr: E, kind: InsertEdgeErrorKind) -> Self {
        Self { attr, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertEdgeErrorKind {
    StartAbsent,
    EndAbsent,
    MultiEdge,
}

impl fmt::Display for InsertEdgeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            InsertEdgeErrorKind::StartAbsent => "start vertex does not exist",
            InsertEdgeErrorKind::EndAbsent => "end vertex does not exist",
            InsertEdgeErrorKind::MultiEdge => {
                "the vertices are already connected and the adjacency matrix holds one edge per pair"
            }
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("vertex does not exist")]
pub struct ReplaceVertexError<V>(pub V);

#[derive(Debug, Error, PartialEq)]
#[error("edge does not exist")]
pub struct ReplaceEdgeError<E>(pub E);

/// Returned by `opposite` when the vertex is not an endpoint of the edge.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("edge is not incident to vertex")]
pub struct NotIncidentError;
