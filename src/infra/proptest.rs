use std::fmt;

use proptest::{
    prelude::Rng,
    strategy::{NewTree, Strategy, ValueTree},
    test_runner::TestRunner,
};

use crate::storage::MatrixGraph;

pub fn graph<V: Strategy, E: Strategy>(vertex: V, edge: E) -> GraphStrategy<V, E> {
    GraphStrategy::new(vertex, edge)
}

#[derive(Debug, Clone, Copy)]
pub struct StrategyParams {
    max_size: usize,
    allow_loops: bool,
    density: f32,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            max_size: 32,
            allow_loops: false,
            density: 0.2,
        }
    }
}

impl StrategyParams {
    /// Maximum number of vertices.
    pub fn max_size(self, max_size: usize) -> Self {
        Self { max_size, ..self }
    }

    /// Allow edges connecting a vertex to itself.
    pub fn allow_loops(self) -> Self {
        Self {
            allow_loops: true,
            ..self
        }
    }

    /// Expected ratio of present edges to the number of all possible edges.
    pub fn density(self, density: f32) -> Self {
        Self {
            density: density.clamp(0.0, 1.0),
            ..self
        }
    }
}

pub struct GraphStrategy<V: Strategy, E: Strategy> {
    vertex: V,
    edge: E,
    params: StrategyParams,
}

impl<V: Strategy, E: Strategy> fmt::Debug for GraphStrategy<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphStrategy")
            .field("vertex", &self.vertex)
            .field("edge", &self.edge)
            .field("params", &self.params)
            .finish()
    }
}

impl<V: Strategy, E: Strategy> GraphStrategy<V, E> {
    pub fn new(vertex: V, edge: E) -> Self {
        Self::with_params(vertex, edge, StrategyParams::default())
    }

    pub fn with_params(vertex: V, edge: E, params: StrategyParams) -> Self {
        Self {
            vertex,
            edge,
            params,
        }
    }

    pub fn max_size(self, max_size: usize) -> Self {
        Self {
            params: self.params.max_size(max_size),
            ..self
        }
    }

    pub fn allow_loops(self) -> Self {
        Self {
            params: self.params.allow_loops(),
            ..self
        }
    }

    pub fn density(self, density: f32) -> Self {
        Self {
            params: self.params.density(density),
            ..self
        }
    }
}

impl<V: Strategy, E: Strategy> Strategy for GraphStrategy<V, E> {
    type Tree = GraphValueTree<V::Tree, E::Tree>;
    type Value = MatrixGraph<V::Value, E::Value>;

    fn new_tree(&self, runner: &mut TestRunner) -> NewTree<Self> {
        let vertex_count = runner.rng().gen_range(0..=self.params.max_size);

        let vertices = (0..vertex_count)
            .map(|_| self.vertex.new_tree(runner))
            .collect::<Result<Vec<_>, _>>()?;

        let mut edges = Vec::new();
        for u in 0..vertex_count {
            for v in u..vertex_count {
                if u == v && !self.params.allow_loops {
                    continue;
                }

                if runner.rng().gen::<f32>() < self.params.density {
                    // Randomize the order of endpoints as well.
                    let (start, end) = if runner.rng().gen() { (u, v) } else { (v, u) };
                    edges.push((start, end, self.edge.new_tree(runner)?));
                }
            }
        }

        Ok(GraphValueTree::new(vertices, edges))
    }
}

#[derive(Debug, Clone, Copy)]
enum Shrink {
    Edge(usize),
    Vertex(usize),
}

/// Shrinks the graph by removing edges one by one and then vertices one by
/// one. A removal that makes the test pass is reverted and never retried.
#[derive(Debug, Clone)]
pub struct GraphValueTree<V: ValueTree, E: ValueTree> {
    vertices: Vec<(V, bool)>,
    edges: Vec<(usize, usize, E, bool)>,
    edge_cursor: usize,
    vertex_cursor: usize,
    last: Option<Shrink>,
}

impl<V: ValueTree, E: ValueTree> GraphValueTree<V, E> {
    fn new(vertices: Vec<V>, edges: Vec<(usize, usize, E)>) -> Self {
        Self {
            vertices: vertices.into_iter().map(|vertex| (vertex, true)).collect(),
            edges: edges
                .into_iter()
                .map(|(start, end, edge)| (start, end, edge, true))
                .collect(),
            edge_cursor: 0,
            vertex_cursor: 0,
            last: None,
        }
    }
}

impl<V: ValueTree, E: ValueTree> ValueTree for GraphValueTree<V, E> {
    type Value = MatrixGraph<V::Value, E::Value>;

    fn current(&self) -> Self::Value {
        let mut graph = MatrixGraph::with_capacity(self.vertices.len(), self.edges.len());

        let ids = self
            .vertices
            .iter()
            .map(|(vertex, present)| present.then(|| graph.insert_vertex(vertex.current())))
            .collect::<Vec<_>>();

        for (start, end, edge, present) in self.edges.iter() {
            if !present {
                continue;
            }

            if let (Some(start), Some(end)) = (ids[*start], ids[*end]) {
                graph.insert_edge(&start, &end, edge.current());
            }
        }

        graph
    }

    fn simplify(&mut self) -> bool {
        while self.edge_cursor < self.edges.len() {
            let cursor = self.edge_cursor;
            self.edge_cursor += 1;

            if self.edges[cursor].3 {
                self.edges[cursor].3 = false;
                self.last = Some(Shrink::Edge(cursor));
                return true;
            }
        }

        while self.vertex_cursor < self.vertices.len() {
            let cursor = self.vertex_cursor;
            self.vertex_cursor += 1;

            if self.vertices[cursor].1 {
                self.vertices[cursor].1 = false;
                self.last = Some(Shrink::Vertex(cursor));
                return true;
            }
        }

        self.last = None;
        false
    }

    fn complicate(&mut self) -> bool {
        match self.last.take() {
            Some(Shrink::Edge(index)) => {
                self.edges[index].3 = true;
                true
            }
            Some(Shrink::Vertex(index)) => {
                self.vertices[index].1 = true;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::infra::testing::check_consistency;

    proptest! {
        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_generated_graph_is_consistent(graph in graph(any::<u8>(), any::<u8>()).allow_loops()) {
            prop_assert_eq!(check_consistency(&graph), Ok(()));
        }
    }

    #[test]
    fn shrinking_removes_edges_first() {
        let mut runner = TestRunner::deterministic();
        let mut tree = graph(Just(()), Just(()))
            .max_size(8)
            .density(1.0)
            .new_tree(&mut runner)
            .unwrap();

        let initial = tree.current();
        if initial.edge_count() == 0 {
            return;
        }

        assert!(tree.simplify());
        assert_eq!(tree.current().edge_count(), initial.edge_count() - 1);
        assert_eq!(tree.current().vertex_count(), initial.vertex_count());

        assert!(tree.complicate());
        assert_eq!(tree.current().edge_count(), initial.edge_count());
        assert!(!tree.complicate());
    }
}
