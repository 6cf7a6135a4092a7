use fixedbitset::FixedBitSet;
use thiserror::Error;

use crate::{
    core::{EdgeSet, Incidence, VertexSet},
    storage::MatrixGraph,
};

pub fn create_path<V: Default, E: Default>(vertex_count: usize) -> MatrixGraph<V, E> {
    let mut graph = MatrixGraph::with_capacity(vertex_count, vertex_count.saturating_sub(1));

    let vertices = (0..vertex_count)
        .map(|_| graph.insert_vertex(V::default()))
        .collect::<Vec<_>>();

    for pair in vertices.windows(2) {
        graph.insert_edge(&pair[0], &pair[1], E::default());
    }

    graph
}

pub fn create_cycle<V: Default, E: Default>(vertex_count: usize) -> MatrixGraph<V, E> {
    let mut graph = create_path(vertex_count);

    if vertex_count > 2 {
        let first = graph.vertices().next();
        let last = graph.vertices().last();

        if let (Some(first), Some(last)) = (first, last) {
            graph.insert_edge(&last, &first, E::default());
        }
    }

    graph
}

pub fn create_complete<V: Default, E: Default>(vertex_count: usize) -> MatrixGraph<V, E> {
    let mut graph = MatrixGraph::with_capacity(vertex_count, vertex_count * vertex_count / 2);

    let vertices = (0..vertex_count)
        .map(|_| graph.insert_vertex(V::default()))
        .collect::<Vec<_>>();

    for (i, u) in vertices.iter().enumerate() {
        for v in vertices[i + 1..].iter() {
            graph.insert_edge(u, v, E::default());
        }
    }

    graph
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsistencyCheckError {
    #[error("vertex ids iterator count ({0}) is not equal to vertex count ({1})")]
    VertexIdsVertexCountMismatch(usize, usize),
    #[error("vertices iterator count ({0}) is not equal to vertex count ({1})")]
    VerticesVertexCountMismatch(usize, usize),
    #[error("vertex bound ({0}) is less than vertex count ({1})")]
    VertexBoundInvalid(usize, usize),
    #[error("live matrix rows ({0}) are not equal to vertex count ({1})")]
    LiveRowsVertexCountMismatch(usize, usize),
    #[error("vertex {0} (zero-based) has index out of the matrix or shared with another vertex")]
    VertexIndexInvalid(usize),
    #[error("edge ids iterator count ({0}) is not equal to edge count ({1})")]
    EdgeIdsEdgeCountMismatch(usize, usize),
    #[error("edges iterator count ({0}) is not equal to edge count ({1})")]
    EdgesEdgeCountMismatch(usize, usize),
    #[error("edge {0} (zero-based) is not stored in the matrix under its endpoints")]
    EdgeNotInMatrix(usize),
    #[error("matrix cell ({0}, {1}) refers to an edge with different endpoints")]
    MatrixCellInvalid(usize, usize),
    #[error("occupied matrix cells ({0}) are not equal to edge count ({1})")]
    MatrixCellsEdgeCountMismatch(usize, usize),
    #[error("sum of degrees ({0}) is not equal to doubled edge count ({1})")]
    HandshakingLemma(usize, usize),
}

/// Verifies that the vertex list, the edge list and the adjacency matrix of
/// the graph agree with each other.
pub fn check_consistency<V, E>(graph: &MatrixGraph<V, E>) -> Result<(), ConsistencyCheckError> {
    fn eq<F>(actual: usize, expected: usize, error: F) -> Result<(), ConsistencyCheckError>
    where
        F: FnOnce(usize, usize) -> ConsistencyCheckError,
    {
        if actual == expected {
            Ok(())
        } else {
            Err(error(actual, expected))
        }
    }

    let vertex_count = graph.vertex_count();

    eq(
        graph.vertices().count(),
        vertex_count,
        ConsistencyCheckError::VertexIdsVertexCountMismatch,
    )?;
    eq(
        graph.vertices_with_payload().count(),
        vertex_count,
        ConsistencyCheckError::VerticesVertexCountMismatch,
    )?;

    if graph.vertex_bound() < vertex_count {
        return Err(ConsistencyCheckError::VertexBoundInvalid(
            graph.vertex_bound(),
            vertex_count,
        ));
    }

    let live_rows = (0..graph.max_index())
        .filter(|index| graph.is_live_index(*index))
        .count();
    eq(
        live_rows,
        vertex_count,
        ConsistencyCheckError::LiveRowsVertexCountMismatch,
    )?;

    let mut seen = FixedBitSet::with_capacity(graph.max_index());
    for (i, vertex) in graph.vertices().enumerate() {
        let valid = match graph.index_of(&vertex) {
            Some(index) if index < seen.len() => !seen.put(index) && graph.is_live_index(index),
            _ => false,
        };

        if !valid {
            return Err(ConsistencyCheckError::VertexIndexInvalid(i));
        }
    }

    let edge_count = graph.edge_count();

    eq(
        graph.edges().count(),
        edge_count,
        ConsistencyCheckError::EdgeIdsEdgeCountMismatch,
    )?;
    eq(
        graph.edges_with_payload().count(),
        edge_count,
        ConsistencyCheckError::EdgesEdgeCountMismatch,
    )?;

    for (i, edge) in graph.edges().enumerate() {
        let stored = graph
            .end_vertices(&edge)
            .and_then(|(start, end)| graph.edge_between(&start, &end));

        if stored != Some(edge) {
            return Err(ConsistencyCheckError::EdgeNotInMatrix(i));
        }
    }

    let mut occupied = 0;
    for (row, col, edge) in graph.matrix_cells() {
        let indices = graph
            .end_vertices(&edge)
            .and_then(|(start, end)| Some((graph.index_of(&start)?, graph.index_of(&end)?)));

        match indices {
            Some((start, end)) if (start, end) == (row, col) || (end, start) == (row, col) => {}
            _ => return Err(ConsistencyCheckError::MatrixCellInvalid(row, col)),
        }

        occupied += 1;
    }

    eq(
        occupied,
        edge_count,
        ConsistencyCheckError::MatrixCellsEdgeCountMismatch,
    )?;

    let degree_sum = graph
        .vertices_by_id()
        .map(|vertex| Incidence::degree(graph, &vertex))
        .sum::<usize>();
    eq(
        degree_sum,
        2 * graph.edges_by_id().count(),
        ConsistencyCheckError::HandshakingLemma,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_graphs_are_consistent() {
        let path: MatrixGraph<(), ()> = create_path(5);
        assert_eq!(path.edge_count(), 4);
        assert_eq!(check_consistency(&path), Ok(()));

        let cycle: MatrixGraph<(), ()> = create_cycle(5);
        assert_eq!(cycle.edge_count(), 5);
        assert_eq!(check_consistency(&cycle), Ok(()));

        let complete: MatrixGraph<(), ()> = create_complete(6);
        assert_eq!(complete.edge_count(), 15);
        assert_eq!(check_consistency(&complete), Ok(()));
    }

    #[test]
    fn small_cycles_degenerate_to_paths() {
        let cycle: MatrixGraph<(), ()> = create_cycle(2);
        assert_eq!(cycle.edge_count(), 1);

        let cycle: MatrixGraph<(), ()> = create_cycle(0);
        assert_eq!(cycle.vertex_count(), 0);
    }
}
