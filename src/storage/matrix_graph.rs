//! Undirected graph backed by an adjacency matrix.
//!
//! Every vertex is assigned a _structural index_ when inserted. The index is
//! the number of vertex insertions made before it, so indices are never
//! reused: removing a vertex retires its row and column in the matrix, but the
//! matrix does not shrink. The matrix cell at `(i, j)` holds the edge
//! connecting the vertices with indices `i` and `j`. Only the lower triangle is
//! stored, so the cells `(i, j)` and `(j, i)` are always the same.
//!
//! The vertex and edge lists are the ground truth. The matrix is kept
//! consistent with the edge list after every operation: edge insertion and
//! removal write the cell directly, vertex removal rebuilds the whole matrix
//! from the edge list.

use std::mem;

use tracing::{debug, trace};

use crate::core::{
    error::{
        InsertEdgeError, InsertEdgeErrorKind, NotIncidentError, ReplaceEdgeError,
        ReplaceVertexError,
    },
    id::{EdgeId, VertexId},
    EdgeSet, GraphBase, Incidence, VertexSet,
};

use super::handle_list::{self, HandleList};

#[derive(Debug, Clone)]
struct VertexSlot<V> {
    attr: V,
    index: usize,
}

#[derive(Debug, Clone)]
struct EdgeSlot<E> {
    attr: E,
    start: VertexId,
    end: VertexId,
}

#[derive(Debug, Clone)]
pub struct MatrixGraph<V, E> {
    vertices: HandleList<VertexSlot<V>>,
    edges: HandleList<EdgeSlot<E>>,
    matrix: raw::Matrix,
}

impl<V, E> MatrixGraph<V, E> {
    pub fn new() -> Self {
        Self::with_capacity(8, 8)
    }

    pub fn with_capacity(vertex_count: usize, edge_count: usize) -> Self {
        Self {
            vertices: HandleList::with_capacity(vertex_count),
            edges: HandleList::with_capacity(edge_count),
            matrix: raw::Matrix::with_capacity(vertex_count),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of vertex insertions since the graph was created or cleared.
    /// This is the order of the adjacency matrix.
    pub fn max_index(&self) -> usize {
        self.matrix.order()
    }

    pub fn contains_vertex(&self, id: &VertexId) -> bool {
        self.vertices.contains(&id.0)
    }

    pub fn contains_edge(&self, id: &EdgeId) -> bool {
        self.edges.contains(&id.0)
    }

    /// Structural index of the vertex in the adjacency matrix.
    pub fn index_of(&self, id: &VertexId) -> Option<usize> {
        self.vertices.get(&id.0).map(|vertex| vertex.index)
    }

    pub fn vertex(&self, id: &VertexId) -> Option<&V> {
        self.vertices.get(&id.0).map(|vertex| &vertex.attr)
    }

    pub fn vertex_mut(&mut self, id: &VertexId) -> Option<&mut V> {
        self.vertices.get_mut(&id.0).map(|vertex| &mut vertex.attr)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&E> {
        self.edges.get(&id.0).map(|edge| &edge.attr)
    }

    pub fn edge_mut(&mut self, id: &EdgeId) -> Option<&mut E> {
        self.edges.get_mut(&id.0).map(|edge| &mut edge.attr)
    }

    pub fn insert_vertex(&mut self, vertex: V) -> VertexId {
        let index = self.matrix.push_row();
        let id = VertexId(self.vertices.push_back(VertexSlot {
            attr: vertex,
            index,
        }));

        trace!(?id, index, "inserted vertex");
        id
    }

    /// Connects the two vertices with a new edge.
    ///
    /// Fails if any of the vertices does not exist or if the vertices are
    /// already connected. The rejected edge is returned in the error.
    pub fn try_insert_edge(
        &mut self,
        start: &VertexId,
        end: &VertexId,
        edge: E,
    ) -> Result<EdgeId, InsertEdgeError<E>> {
        let start_index = match self.index_of(start) {
            Some(index) => index,
            None => {
                return Err(InsertEdgeError::new(
                    edge,
                    InsertEdgeErrorKind::StartAbsent,
                ))
            }
        };

        let end_index = match self.index_of(end) {
            Some(index) => index,
            None => return Err(InsertEdgeError::new(edge, InsertEdgeErrorKind::EndAbsent)),
        };

        if self.matrix.get(start_index, end_index).is_some() {
            return Err(InsertEdgeError::new(edge, InsertEdgeErrorKind::MultiEdge));
        }

        let id = EdgeId(self.edges.push_back(EdgeSlot {
            attr: edge,
            start: *start,
            end: *end,
        }));
        self.matrix.insert(start_index, end_index, id);

        trace!(?id, ?start, ?end, "inserted edge");
        Ok(id)
    }

    /// Connects the two vertices with a new edge.
    ///
    /// # Panics
    ///
    /// Panics if any of the vertices does not exist or if the vertices are
    /// already connected. Use [`MatrixGraph::try_insert_edge`] for a
    /// non-panicking variant.
    pub fn insert_edge(&mut self, start: &VertexId, end: &VertexId, edge: E) -> EdgeId {
        match self.try_insert_edge(start, end, edge) {
            Ok(id) => id,
            Err(error) => panic!("{error}"),
        }
    }

    /// Removes the vertex together with all its incident edges and returns
    /// its attribute.
    pub fn remove_vertex(&mut self, id: &VertexId) -> Option<V> {
        let index = self.index_of(id)?;

        let incident = self.incident_edges(id).collect::<Vec<_>>();
        for edge in incident.iter() {
            self.remove_edge(edge);
        }

        let vertex = self.vertices.remove(&id.0)?;
        self.matrix.retire_row(index);
        self.rebuild_matrix();

        trace!(?id, index, incident = incident.len(), "removed vertex");
        Some(vertex.attr)
    }

    pub fn remove_edge(&mut self, id: &EdgeId) -> Option<E> {
        let edge = self.edges.remove(&id.0)?;

        // The endpoints of a present edge are always present.
        if let (Some(start), Some(end)) = (self.index_of(&edge.start), self.index_of(&edge.end)) {
            let removed = self.matrix.remove(start, end);
            debug_assert_eq!(removed, Some(*id));
        }

        trace!(?id, "removed edge");
        Some(edge.attr)
    }

    /// Returns the endpoints in the order they were given when the edge was
    /// inserted.
    pub fn end_vertices(&self, id: &EdgeId) -> Option<(VertexId, VertexId)> {
        self.edges.get(&id.0).map(|edge| (edge.start, edge.end))
    }

    /// Returns the endpoint of `edge` that is not `vertex`. For a self-loop,
    /// this is `vertex` itself.
    pub fn opposite(&self, vertex: &VertexId, edge: &EdgeId) -> Result<VertexId, NotIncidentError> {
        match self.end_vertices(edge) {
            Some((start, end)) if &start == vertex => Ok(end),
            Some((start, end)) if &end == vertex => Ok(start),
            _ => Err(NotIncidentError),
        }
    }

    pub fn are_adjacent(&self, a: &VertexId, b: &VertexId) -> bool {
        self.edge_between(a, b).is_some()
    }

    /// Returns the edge connecting the two vertices, if any.
    pub fn edge_between(&self, a: &VertexId, b: &VertexId) -> Option<EdgeId> {
        let a = self.index_of(a)?;
        let b = self.index_of(b)?;
        self.matrix.get(a, b)
    }

    /// Reads the adjacency matrix cell directly by structural indices.
    pub fn edge_at(&self, row: usize, col: usize) -> Option<EdgeId> {
        self.matrix.get(row, col)
    }

    /// Occupied cells of the adjacency matrix as `(row, col, edge)`. Each
    /// edge is reported once, with `row >= col`.
    pub fn matrix_cells(&self) -> impl Iterator<Item = (usize, usize, EdgeId)> + '_ {
        self.matrix.occupied()
    }

    /// Returns `true` if the matrix row and column of given structural index
    /// belongs to a present vertex.
    pub fn is_live_index(&self, index: usize) -> bool {
        self.matrix.is_live(index)
    }

    pub fn try_replace_vertex(
        &mut self,
        id: &VertexId,
        vertex: V,
    ) -> Result<V, ReplaceVertexError<V>> {
        match self.vertex_mut(id) {
            Some(slot) => Ok(mem::replace(slot, vertex)),
            None => Err(ReplaceVertexError(vertex)),
        }
    }

    pub fn replace_vertex(&mut self, id: &VertexId, vertex: V) -> V {
        match self.try_replace_vertex(id, vertex) {
            Ok(original) => original,
            Err(error) => panic!("{error}"),
        }
    }

    pub fn try_replace_edge(&mut self, id: &EdgeId, edge: E) -> Result<E, ReplaceEdgeError<E>> {
        match self.edge_mut(id) {
            Some(slot) => Ok(mem::replace(slot, edge)),
            None => Err(ReplaceEdgeError(edge)),
        }
    }

    pub fn replace_edge(&mut self, id: &EdgeId, edge: E) -> E {
        match self.try_replace_edge(id, edge) {
            Ok(original) => original,
            Err(error) => panic!("{error}"),
        }
    }

    /// Edges having the vertex as one of their endpoints, in insertion order.
    ///
    /// The edge list is scanned, so this is linear in the number of edges.
    pub fn incident_edges(&self, id: &VertexId) -> IncidentEdges<'_, E> {
        IncidentEdges {
            inner: self.edges.iter(),
            vertex: *id,
        }
    }

    /// Number of edge ends at the vertex. A self-loop counts twice.
    pub fn degree(&self, id: &VertexId) -> usize {
        self.incident_edges(id)
            .map(|edge| match self.end_vertices(&edge) {
                Some((start, end)) if start == end => 2,
                _ => 1,
            })
            .sum()
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> VertexIds<'_, V> {
        VertexIds {
            inner: self.vertices.handles(),
        }
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> EdgeIds<'_, E> {
        EdgeIds {
            inner: self.edges.handles(),
        }
    }

    pub fn vertices_with_payload(&self) -> VerticesIter<'_, V> {
        VerticesIter {
            inner: self.vertices.iter(),
        }
    }

    pub fn edges_with_payload(&self) -> EdgesIter<'_, E> {
        EdgesIter {
            inner: self.edges.iter(),
        }
    }

    /// Removes all edges. The vertices and their structural indices are
    /// kept.
    pub fn clear_edges(&mut self) {
        self.edges.clear();
        self.matrix.clear();
    }

    /// Removes everything, including the retired matrix rows. Structural
    /// indices start from zero again.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.matrix.reset();
    }

    fn rebuild_matrix(&mut self) {
        let vertices = &self.vertices;
        let cells = self.edges.iter().filter_map(|(handle, edge)| {
            let start = vertices.get(&edge.start.0)?.index;
            let end = vertices.get(&edge.end.0)?.index;
            Some((EdgeId(handle), start, end))
        });

        self.matrix.rebuild(cells);

        debug!(
            order = self.matrix.order(),
            live = self.matrix.live_count(),
            edges = self.edges.len(),
            "rebuilt adjacency matrix"
        );
    }
}

impl<V, E> Default for MatrixGraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> GraphBase for MatrixGraph<V, E> {
    type VertexId = VertexId;
    type EdgeId = EdgeId;

    fn vertex_count_hint(&self) -> Option<usize> {
        Some(self.vertices.len())
    }

    fn edge_count_hint(&self) -> Option<usize> {
        Some(self.edges.len())
    }
}

impl<V, E> VertexSet for MatrixGraph<V, E> {
    type VerticesByIdIter<'a> = VertexIds<'a, V>
    where
        Self: 'a;

    fn vertices_by_id(&self) -> Self::VerticesByIdIter<'_> {
        MatrixGraph::vertices(self)
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn vertex_bound(&self) -> usize {
        self.vertices.slot_bound()
    }

    fn contains_vertex(&self, id: &VertexId) -> bool {
        self.vertices.contains(&id.0)
    }
}

impl<V, E> EdgeSet for MatrixGraph<V, E> {
    type EdgesByIdIter<'a> = EdgeIds<'a, E>
    where
        Self: 'a;

    fn edges_by_id(&self) -> Self::EdgesByIdIter<'_> {
        MatrixGraph::edges(self)
    }

    fn endpoints(&self, id: &EdgeId) -> Option<(VertexId, VertexId)> {
        self.end_vertices(id)
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn contains_edge(&self, id: &EdgeId) -> bool {
        self.edges.contains(&id.0)
    }
}

impl<V, E> Incidence for MatrixGraph<V, E> {
    type IncidentEdgesIter<'a> = IncidentEdges<'a, E>
    where
        Self: 'a;

    fn incident_edges(&self, id: &VertexId) -> Self::IncidentEdgesIter<'_> {
        MatrixGraph::incident_edges(self, id)
    }

    fn opposite(&self, vertex: &VertexId, edge: &EdgeId) -> Result<VertexId, NotIncidentError> {
        MatrixGraph::opposite(self, vertex, edge)
    }

    fn degree(&self, id: &VertexId) -> usize {
        MatrixGraph::degree(self, id)
    }
}

pub struct VertexIds<'a, V> {
    inner: handle_list::Handles<'a, VertexSlot<V>>,
}

impl<V> Iterator for VertexIds<'_, V> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(VertexId)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for VertexIds<'_, V> {}

pub struct EdgeIds<'a, E> {
    inner: handle_list::Handles<'a, EdgeSlot<E>>,
}

impl<E> Iterator for EdgeIds<'_, E> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(EdgeId)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<E> ExactSizeIterator for EdgeIds<'_, E> {}

pub struct VerticesIter<'a, V> {
    inner: handle_list::Iter<'a, VertexSlot<V>>,
}

impl<'a, V> Iterator for VerticesIter<'a, V> {
    type Item = (VertexId, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(handle, vertex)| (VertexId(handle), &vertex.attr))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

pub struct EdgesIter<'a, E> {
    inner: handle_list::Iter<'a, EdgeSlot<E>>,
}

impl<'a, E> Iterator for EdgesIter<'a, E> {
    type Item = (EdgeId, &'a E, VertexId, VertexId);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(handle, edge)| (EdgeId(handle), &edge.attr, edge.start, edge.end))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

pub struct IncidentEdges<'a, E> {
    inner: handle_list::Iter<'a, EdgeSlot<E>>,
    vertex: VertexId,
}

impl<E> Iterator for IncidentEdges<'_, E> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        let vertex = self.vertex;
        self.inner
            .find(|(_, edge)| edge.start == vertex || edge.end == vertex)
            .map(|(handle, _)| EdgeId(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

mod raw {
    use std::fmt;

    use bitvec::prelude::*;

    use crate::common::matrix::*;
    use crate::core::id::EdgeId;

    type Cells = Vec<Option<EdgeId>>;

    /// Symmetric matrix of edge ids.
    ///
    /// The order of the matrix is the number of rows ever pushed. Each row is
    /// flagged live until it is retired.
    #[derive(Clone)]
    pub struct Matrix {
        cells: Cells,
        live: BitVec,
    }

    impl Matrix {
        pub fn with_capacity(order: usize) -> Self {
            Self {
                cells: <Cells as MatrixLinearStorage<EdgeId>>::with_capacity(linear_len(order)),
                live: BitVec::with_capacity(order),
            }
        }

        pub fn order(&self) -> usize {
            self.live.len()
        }

        pub fn live_count(&self) -> usize {
            self.live.count_ones()
        }

        /// Adds a new row and column and returns their index.
        pub fn push_row(&mut self) -> usize {
            let index = self.order();
            self.live.push(true);
            grow::<EdgeId, _>(&mut self.cells, index + 1);
            index
        }

        pub fn retire_row(&mut self, row: usize) {
            self.live.set(row, false);
        }

        pub fn is_live(&self, row: usize) -> bool {
            self.live.get(row).map_or(false, |bit| *bit)
        }

        pub fn get(&self, row: usize, col: usize) -> Option<EdgeId> {
            if row >= self.order() || col >= self.order() {
                return None;
            }

            self.cells[index(row, col)]
        }

        pub fn insert(&mut self, row: usize, col: usize, edge: EdgeId) -> Option<EdgeId> {
            self.cells[index(row, col)].replace(edge)
        }

        pub fn remove(&mut self, row: usize, col: usize) -> Option<EdgeId> {
            self.cells[index(row, col)].take()
        }

        /// Replaces the content of the matrix with a fresh table populated
        /// from given edges. The order is unchanged.
        pub fn rebuild<I>(&mut self, edges: I)
        where
            I: IntoIterator<Item = (EdgeId, usize, usize)>,
        {
            let len = linear_len(self.order());
            let mut cells = <Cells as MatrixLinearStorage<EdgeId>>::with_capacity(len);
            cells.resize_with_none(len);

            for (edge, row, col) in edges {
                debug_assert!(self.is_live(row) && self.is_live(col));
                cells[index(row, col)] = Some(edge);
            }

            self.cells = cells;
        }

        /// Occupied cells of the lower triangle as `(row, col, edge)` with
        /// `row >= col`.
        pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, EdgeId)> + '_ {
            self.cells.iter().enumerate().filter_map(|(index, cell)| {
                let (row, col) = coords(index);
                cell.map(|edge| (row, col, edge))
            })
        }

        /// Empties all cells.
        pub fn clear(&mut self) {
            self.cells.iter_mut().for_each(|cell| *cell = None);
        }

        /// Drops all rows.
        pub fn reset(&mut self) {
            self.cells.clear();
            self.live.clear();
        }
    }

    impl fmt::Debug for Matrix {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            if f.alternate() {
                writeln!(f, "Matrix {{")?;
                for row in 0..self.order() {
                    write!(f, "    ")?;
                    for col in 0..self.order() {
                        if col > 0 {
                            write!(f, " ")?;
                        }

                        let cell = if !self.is_live(row) || !self.is_live(col) {
                            "x"
                        } else if self.get(row, col).is_some() {
                            "1"
                        } else {
                            "0"
                        };
                        write!(f, "{cell}")?;
                    }
                    writeln!(f)?;
                }
                write!(f, "}}")
            } else {
                f.debug_struct("Matrix")
                    .field("order", &self.order())
                    .field("live", &self.live_count())
                    .field("occupied", &self.cells.iter().flatten().count())
                    .finish()
            }
        }
    }

}
