//! Depth-first traversal.
//!
//! See available parameters [here](DfsBuilder#implementations).
//!
//! # Examples
//!
//! ```
//! use matgraph::{visit::{Dfs, DfsEdgeLabel}, MatrixGraph};
//!
//! let mut graph = MatrixGraph::new();
//!
//! let a = graph.insert_vertex(0);
//! let b = graph.insert_vertex(1);
//! let c = graph.insert_vertex(2);
//!
//! let ab = graph.insert_edge(&a, &b, ());
//! let bc = graph.insert_edge(&b, &c, ());
//! let ca = graph.insert_edge(&c, &a, ());
//!
//! let dfs = Dfs::on(&graph).run();
//!
//! assert_eq!(dfs.order(), &[a, b, c]);
//! assert_eq!(dfs.edge_label(&ab), DfsEdgeLabel::Discovery);
//! assert_eq!(dfs.edge_label(&bc), DfsEdgeLabel::Discovery);
//! assert_eq!(dfs.edge_label(&ca), DfsEdgeLabel::Back);
//! ```

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::{
    common::{TypedBitSet, VisitSet},
    core::{GraphBase, Incidence},
};

use super::VertexLabel;

/// Classification of an edge by depth-first traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DfsEdgeLabel {
    /// The traversal did not reach the edge.
    #[default]
    Unexplored,
    /// The edge led the traversal to a new vertex.
    Discovery,
    /// The edge led to an already visited vertex.
    Back,
}

/// Result of a depth-first traversal.
///
/// See [module](self) documentation for more details and example.
pub struct Dfs<G: GraphBase> {
    visited: TypedBitSet<G::VertexId>,
    // Keyed by the full id, the bit set only by its position.
    members: FxHashSet<G::VertexId>,
    labels: FxHashMap<G::EdgeId, DfsEdgeLabel>,
    edges: Vec<G::EdgeId>,
    order: Vec<G::VertexId>,
    roots: Vec<G::VertexId>,
}

impl<G: GraphBase> Dfs<G> {
    pub fn on(graph: &G) -> DfsBuilder<'_, G> {
        DfsBuilder { graph, root: None }
    }

    pub fn vertex_label(&self, vertex: &G::VertexId) -> VertexLabel {
        if self.members.contains(vertex) {
            VertexLabel::Visited
        } else {
            VertexLabel::Unexplored
        }
    }

    pub fn edge_label(&self, edge: &G::EdgeId) -> DfsEdgeLabel {
        self.labels.get(edge).copied().unwrap_or_default()
    }

    /// Edges of the spanning forest in the order they were labeled.
    pub fn discovery_edges(&self) -> impl Iterator<Item = G::EdgeId> + '_ {
        self.labeled(DfsEdgeLabel::Discovery)
    }

    pub fn back_edges(&self) -> impl Iterator<Item = G::EdgeId> + '_ {
        self.labeled(DfsEdgeLabel::Back)
    }

    /// Vertices in the order they were visited.
    pub fn order(&self) -> &[G::VertexId] {
        &self.order
    }

    /// Roots of the trees of the spanning forest, one for each traversed
    /// component.
    pub fn roots(&self) -> &[G::VertexId] {
        &self.roots
    }

    pub fn visited_count(&self) -> usize {
        self.order.len()
    }

    fn labeled(&self, label: DfsEdgeLabel) -> impl Iterator<Item = G::EdgeId> + '_ {
        self.edges
            .iter()
            .copied()
            .filter(move |edge| self.labels.get(edge) == Some(&label))
    }

    fn new(graph: &G) -> Self {
        let vertex_count = graph.vertex_count_hint().unwrap_or_default();
        let edge_count = graph.edge_count_hint().unwrap_or_default();

        Self {
            visited: TypedBitSet::with_capacity(vertex_count),
            members: FxHashSet::with_capacity_and_hasher(vertex_count, Default::default()),
            labels: FxHashMap::with_capacity_and_hasher(edge_count, Default::default()),
            edges: Vec::with_capacity(edge_count),
            order: Vec::with_capacity(vertex_count),
            roots: Vec::new(),
        }
    }

    fn visit(&mut self, vertex: G::VertexId) {
        self.visited.visit(vertex);
        self.members.insert(vertex);
        self.order.push(vertex);
    }

    fn label(&mut self, edge: G::EdgeId, label: DfsEdgeLabel) {
        self.labels.insert(edge, label);
        self.edges.push(edge);
    }

    fn traverse(&mut self, graph: &G, root: G::VertexId)
    where
        G: Incidence,
    {
        let visited_before = self.order.len();

        self.roots.push(root);
        self.visit(root);

        let mut stack = vec![(root, graph.incident_edges(&root))];

        while let Some((vertex, edges)) = stack.last_mut() {
            let vertex = *vertex;

            let edge = match edges.next() {
                Some(edge) => edge,
                None => {
                    stack.pop();
                    continue;
                }
            };

            if self.labels.contains_key(&edge) {
                continue;
            }

            let next = graph
                .opposite(&vertex, &edge)
                .expect("incident edge has the vertex as an endpoint");

            if self.visited.is_visited(&next) {
                self.label(edge, DfsEdgeLabel::Back);
            } else {
                self.label(edge, DfsEdgeLabel::Discovery);
                self.visit(next);
                stack.push((next, graph.incident_edges(&next)));
            }
        }

        debug!(
            ?root,
            visited = self.order.len() - visited_before,
            "dfs tree finished"
        );
    }
}

impl<G> fmt::Debug for Dfs<G>
where
    G: GraphBase,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dfs")
            .field("order", &self.order)
            .field("roots", &self.roots)
            .field("labels", &self.labels)
            .finish()
    }
}

/// Builder for [`Dfs`].
pub struct DfsBuilder<'a, G>
where
    G: GraphBase,
{
    graph: &'a G,
    root: Option<G::VertexId>,
}

impl<'a, G> DfsBuilder<'a, G>
where
    G: GraphBase,
{
    /// Traverses only the component containing the vertex.
    ///
    /// Without a start vertex, the traversal covers the whole graph. It is
    /// started from every vertex that was not visited yet, in the order given
    /// by the graph.
    pub fn start(self, root: G::VertexId) -> Self {
        Self {
            root: Some(root),
            ..self
        }
    }

    /// Runs the traversal.
    ///
    /// # Panics
    ///
    /// Panics if the start vertex does not exist in the graph.
    pub fn run(self) -> Dfs<G>
    where
        G: Incidence,
    {
        let graph = self.graph;
        let mut dfs = Dfs::new(graph);

        match self.root {
            Some(root) => {
                assert!(graph.contains_vertex(&root), "vertex does not exist");
                dfs.traverse(graph, root);
            }
            None => {
                for vertex in graph.vertices_by_id() {
                    if !dfs.visited.is_visited(&vertex) {
                        dfs.traverse(graph, vertex);
                    }
                }
            }
        }

        dfs
    }
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "proptest")]
    use proptest::prelude::*;

    #[cfg(feature = "proptest")]
    use crate::infra::proptest::graph;
    use crate::{
        core::{id::IdType, EdgeSet},
        infra::testing::{create_complete, create_cycle, create_path},
        storage::MatrixGraph,
    };

    use super::*;

    fn assert_valid<V, E>(dfs: &Dfs<MatrixGraph<V, E>>, graph: &MatrixGraph<V, E>) {
        let discovered = dfs.discovery_edges().count();
        let back = dfs.back_edges().count();

        assert_eq!(
            discovered,
            dfs.visited_count() - dfs.roots().len(),
            "discovery edges do not form a spanning forest"
        );

        for edge in graph.edges_by_id() {
            let (u, v) = graph.endpoints(&edge).unwrap();
            let label = dfs.edge_label(&edge);

            if dfs.vertex_label(&u) == VertexLabel::Visited {
                assert_ne!(label, DfsEdgeLabel::Unexplored, "edge {edge:?} not labeled");
            } else {
                assert_eq!(dfs.vertex_label(&v), VertexLabel::Unexplored);
                assert_eq!(label, DfsEdgeLabel::Unexplored);
            }
        }

        assert_eq!(discovered + back, dfs.labels.len());
    }

    #[test]
    fn path_has_no_back_edges() {
        let graph: MatrixGraph<(), ()> = create_path(5);
        let dfs = Dfs::on(&graph).run();

        assert_eq!(dfs.discovery_edges().count(), 4);
        assert_eq!(dfs.back_edges().count(), 0);
        assert_eq!(dfs.order(), graph.vertices().collect::<Vec<_>>());
        assert_valid(&dfs, &graph);
    }

    #[test]
    fn cycle_has_one_back_edge() {
        let graph: MatrixGraph<(), ()> = create_cycle(6);
        let dfs = Dfs::on(&graph).run();

        assert_eq!(dfs.discovery_edges().count(), 5);
        assert_eq!(dfs.back_edges().count(), 1);
        assert_valid(&dfs, &graph);
    }

    #[test]
    fn complete_graph() {
        let graph: MatrixGraph<(), ()> = create_complete(5);
        let dfs = Dfs::on(&graph).run();

        assert_eq!(dfs.discovery_edges().count(), 4);
        assert_eq!(dfs.back_edges().count(), 10 - 4);
        assert_eq!(dfs.roots().len(), 1);
        assert_valid(&dfs, &graph);
    }

    #[test]
    fn goes_deep_first() {
        let mut graph = MatrixGraph::new();

        let a = graph.insert_vertex("a");
        let b = graph.insert_vertex("b");
        let c = graph.insert_vertex("c");
        let d = graph.insert_vertex("d");

        graph.insert_edge(&a, &b, ());
        graph.insert_edge(&a, &c, ());
        graph.insert_edge(&b, &d, ());

        let dfs = Dfs::on(&graph).start(a).run();
        assert_eq!(dfs.order(), &[a, b, d, c]);
    }

    #[test]
    fn forest() {
        let mut graph = MatrixGraph::new();

        let a = graph.insert_vertex(());
        let b = graph.insert_vertex(());
        let c = graph.insert_vertex(());
        let d = graph.insert_vertex(());
        let e = graph.insert_vertex(());

        graph.insert_edge(&a, &b, ());
        graph.insert_edge(&c, &d, ());

        let dfs = Dfs::on(&graph).run();

        assert_eq!(dfs.roots(), &[a, c, e]);
        assert_eq!(dfs.discovery_edges().count(), 5 - 3);
        assert_eq!(dfs.visited_count(), 5);
        assert_valid(&dfs, &graph);
    }

    #[test]
    fn start_covers_component_only() {
        let mut graph = MatrixGraph::new();

        let a = graph.insert_vertex(());
        let b = graph.insert_vertex(());
        let c = graph.insert_vertex(());
        let d = graph.insert_vertex(());

        let ab = graph.insert_edge(&a, &b, ());
        let cd = graph.insert_edge(&c, &d, ());

        let dfs = Dfs::on(&graph).start(b).run();

        assert_eq!(dfs.order(), &[b, a]);
        assert_eq!(dfs.edge_label(&ab), DfsEdgeLabel::Discovery);
        assert_eq!(dfs.edge_label(&cd), DfsEdgeLabel::Unexplored);
        assert_eq!(dfs.vertex_label(&c), VertexLabel::Unexplored);
        assert_valid(&dfs, &graph);
    }

    #[test]
    fn self_loop_is_back_edge() {
        let mut graph = MatrixGraph::new();

        let a = graph.insert_vertex(());
        let b = graph.insert_vertex(());

        let aa = graph.insert_edge(&a, &a, ());
        let ab = graph.insert_edge(&a, &b, ());

        let dfs = Dfs::on(&graph).run();

        assert_eq!(dfs.edge_label(&aa), DfsEdgeLabel::Back);
        assert_eq!(dfs.edge_label(&ab), DfsEdgeLabel::Discovery);
        assert_valid(&dfs, &graph);
    }

    #[test]
    fn after_vertex_removal() {
        let mut graph: MatrixGraph<(), ()> = create_cycle(4);
        let removed = graph.vertices().nth(1).unwrap();
        graph.remove_vertex(&removed);

        let dfs = Dfs::on(&graph).run();

        assert_eq!(dfs.vertex_label(&removed), VertexLabel::Unexplored);
        assert_eq!(dfs.visited_count(), 3);
        assert_eq!(dfs.back_edges().count(), 0);
        assert_valid(&dfs, &graph);
    }

    #[test]
    fn removed_vertex_with_reused_slot() {
        let mut graph = MatrixGraph::<&str, ()>::new();

        let a = graph.insert_vertex("a");
        graph.remove_vertex(&a);
        let b = graph.insert_vertex("b");

        let dfs = Dfs::on(&graph).run();

        assert_eq!(a.as_usize(), b.as_usize());
        assert_eq!(dfs.vertex_label(&b), VertexLabel::Visited);
        assert_eq!(dfs.vertex_label(&a), VertexLabel::Unexplored);
        assert_eq!(dfs.order(), &[b]);
    }

    #[test]
    fn empty_graph() {
        let graph = MatrixGraph::<(), ()>::new();
        let dfs = Dfs::on(&graph).run();

        assert!(dfs.order().is_empty());
        assert!(dfs.roots().is_empty());
    }

    #[test]
    #[should_panic(expected = "vertex does not exist")]
    fn start_absent() {
        let mut graph = MatrixGraph::<(), ()>::new();
        let a = graph.insert_vertex(());
        graph.remove_vertex(&a);

        Dfs::on(&graph).start(a).run();
    }

    #[cfg(feature = "proptest")]
    proptest! {
        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_dfs_labels(graph in graph(any::<()>(), any::<()>())) {
            let dfs = Dfs::on(&graph).run();

            prop_assert_eq!(dfs.visited_count(), graph.vertex_count());
            prop_assert_eq!(dfs.labels.len(), graph.edge_count());
            assert_valid(&dfs, &graph);
        }
    }
}
