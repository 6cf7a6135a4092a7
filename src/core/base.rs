use super::{error::NotIncidentError, id::IdType};

pub trait GraphBase {
    type VertexId: IdType;
    type EdgeId: IdType;

    // Upper bound, if known.
    fn vertex_count_hint(&self) -> Option<usize> {
        None
    }

    // Upper bound, if known.
    fn edge_count_hint(&self) -> Option<usize> {
        None
    }
}

pub trait VertexSet: GraphBase {
    type VerticesByIdIter<'a>: Iterator<Item = Self::VertexId>
    where
        Self: 'a;

    /// Vertices in insertion order.
    fn vertices_by_id(&self) -> Self::VerticesByIdIter<'_>;

    fn vertex_count(&self) -> usize {
        self.vertices_by_id().count()
    }

    /// Exclusive upper bound of [`IdType::as_usize`] over present vertices.
    fn vertex_bound(&self) -> usize {
        self.vertices_by_id()
            .map(|v| v.as_usize() + 1)
            .max()
            .unwrap_or_default()
    }

    fn contains_vertex(&self, id: &Self::VertexId) -> bool {
        self.vertices_by_id().any(|v| &v == id)
    }
}

pub trait EdgeSet: GraphBase {
    type EdgesByIdIter<'a>: Iterator<Item = Self::EdgeId>
    where
        Self: 'a;

    /// Edges in insertion order.
    fn edges_by_id(&self) -> Self::EdgesByIdIter<'_>;

    /// Returns the endpoints in the order they were given when the edge was
    /// created.
    fn endpoints(&self, id: &Self::EdgeId) -> Option<(Self::VertexId, Self::VertexId)>;

    fn edge_count(&self) -> usize {
        self.edges_by_id().count()
    }

    fn contains_edge(&self, id: &Self::EdgeId) -> bool {
        self.endpoints(id).is_some()
    }
}

/// Access to the edges touching a vertex.
pub trait Incidence: VertexSet + EdgeSet {
    type IncidentEdgesIter<'a>: Iterator<Item = Self::EdgeId>
    where
        Self: 'a;

    /// Edges having `id` as one of their endpoints. A self-loop is yielded
    /// once.
    fn incident_edges(&self, id: &Self::VertexId) -> Self::IncidentEdgesIter<'_>;

    /// Returns the endpoint of `edge` that is not `vertex`.
    fn opposite(
        &self,
        vertex: &Self::VertexId,
        edge: &Self::EdgeId,
    ) -> Result<Self::VertexId, NotIncidentError> {
        match self.endpoints(edge) {
            Some((start, end)) if &start == vertex => Ok(end),
            Some((start, end)) if &end == vertex => Ok(start),
            _ => Err(NotIncidentError),
        }
    }

    fn degree(&self, id: &Self::VertexId) -> usize {
        self.incident_edges(id)
            .map(|edge| match self.endpoints(&edge) {
                // Self-loop counts twice.
                Some((start, end)) if start == end => 2,
                _ => 1,
            })
            .sum()
    }
}
