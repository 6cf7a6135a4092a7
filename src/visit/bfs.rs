//! Breadth-first traversal.
//!
//! The traversal proceeds in levels. Level _i_ contains the vertices at
//! distance _i_ from the root of their tree. All vertices of a level are
//! processed before any vertex of the next one.
//!
//! See available parameters [here](BfsBuilder#implementations).
//!
//! # Examples
//!
//! ```
//! use matgraph::{visit::{Bfs, BfsEdgeLabel}, MatrixGraph};
//!
//! let mut graph = MatrixGraph::new();
//!
//! let a = graph.insert_vertex(0);
//! let b = graph.insert_vertex(1);
//! let c = graph.insert_vertex(2);
//! let d = graph.insert_vertex(3);
//!
//! graph.insert_edge(&a, &b, ());
//! graph.insert_edge(&a, &c, ());
//! let bd = graph.insert_edge(&b, &d, ());
//! let cd = graph.insert_edge(&c, &d, ());
//!
//! let bfs = Bfs::on(&graph).start(a).run();
//!
//! assert_eq!(bfs.levels(), &[vec![a], vec![b, c], vec![d]]);
//! assert_eq!(bfs.level_of(&d), Some(2));
//! assert_eq!(bfs.edge_label(&bd), BfsEdgeLabel::Discovery);
//! assert_eq!(bfs.edge_label(&cd), BfsEdgeLabel::Cross);
//! ```

use std::fmt;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{
    common::{TypedBitSet, VisitSet},
    core::{GraphBase, Incidence},
};

use super::VertexLabel;

/// Classification of an edge by breadth-first traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BfsEdgeLabel {
    #[default]
    Unexplored,
    Discovery,
    Cross,
}

/// Result of a breadth-first traversal.
///
/// See [module](self) documentation for more details and example.
pub struct Bfs<G: GraphBase> {
    visited: TypedBitSet<G::VertexId>,
    depth: FxHashMap<G::VertexId, usize>,
    labels: FxHashMap<G::EdgeId, BfsEdgeLabel>,
    edges: Vec<G::EdgeId>,
    order: Vec<G::VertexId>,
    levels: Vec<Vec<G::VertexId>>,
    roots: Vec<G::VertexId>,
}

impl<G: GraphBase> Bfs<G> {
    pub fn on(graph: &G) -> BfsBuilder<'_, G> {
        BfsBuilder { graph, root: None }
    }

    pub fn vertex_label(&self, vertex: &G::VertexId) -> VertexLabel {
        if self.depth.contains_key(vertex) {
            VertexLabel::Visited
        } else {
            VertexLabel::Unexplored
        }
    }

    pub fn edge_label(&self, edge: &G::EdgeId) -> BfsEdgeLabel {
        self.labels.get(edge).copied().unwrap_or_default()
    }

    pub fn discovery_edges(&self) -> impl Iterator<Item = G::EdgeId> + '_ {
        self.labeled(BfsEdgeLabel::Discovery)
    }

    pub fn cross_edges(&self) -> impl Iterator<Item = G::EdgeId> + '_ {
        self.labeled(BfsEdgeLabel::Cross)
    }

    /// Vertices in the order they were visited.
    pub fn order(&self) -> &[G::VertexId] {
        &self.order
    }

    /// Vertices grouped by their distance from the root of their tree.
    ///
    /// When the traversal covers multiple components, the levels of the same
    /// depth are concatenated in the order the trees were traversed.
    pub fn levels(&self) -> &[Vec<G::VertexId>] {
        &self.levels
    }

    /// Distance of the vertex from the root of its tree, or `None` if the
    /// vertex was not visited.
    pub fn level_of(&self, vertex: &G::VertexId) -> Option<usize> {
        self.depth.get(vertex).copied()
    }

    pub fn roots(&self) -> &[G::VertexId] {
        &self.roots
    }

    pub fn visited_count(&self) -> usize {
        self.order.len()
    }

    fn labeled(&self, label: BfsEdgeLabel) -> impl Iterator<Item = G::EdgeId> + '_ {
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
            depth: FxHashMap::with_capacity_and_hasher(vertex_count, Default::default()),
            labels: FxHashMap::with_capacity_and_hasher(edge_count, Default::default()),
            edges: Vec::with_capacity(edge_count),
            order: Vec::with_capacity(vertex_count),
            levels: Vec::new(),
            roots: Vec::new(),
        }
    }

    fn visit(&mut self, vertex: G::VertexId, depth: usize) {
        self.visited.visit(vertex);
        self.depth.insert(vertex, depth);
        self.order.push(vertex);
    }

    fn label(&mut self, edge: G::EdgeId, label: BfsEdgeLabel) {
        self.labels.insert(edge, label);
        self.edges.push(edge);
    }

    fn traverse(&mut self, graph: &G, root: G::VertexId)
    where
        G: Incidence,
    {
        self.roots.push(root);
        self.visit(root, 0);

        let mut level = vec![root];
        let mut depth = 0;

        while !level.is_empty() {
            let mut next_level = Vec::new();

            for vertex in level.iter() {
                for edge in graph.incident_edges(vertex) {
                    if self.labels.contains_key(&edge) {
                        continue;
                    }

                    let next = graph
                        .opposite(vertex, &edge)
                        .expect("incident edge has the vertex as an endpoint");

                    if self.visited.is_visited(&next) {
                        self.label(edge, BfsEdgeLabel::Cross);
                    } else {
                        self.label(edge, BfsEdgeLabel::Discovery);
                        self.visit(next, depth + 1);
                        next_level.push(next);
                    }
                }
            }

            if self.levels.len() <= depth {
                self.levels.push(Vec::new());
            }
            self.levels[depth].append(&mut level);

            level = next_level;
            depth += 1;
        }

        debug!(?root, levels = depth, "bfs tree finished");
    }
}

impl<G> fmt::Debug for Bfs<G>
where
    G: GraphBase,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bfs")
            .field("levels", &self.levels)
            .field("roots", &self.roots)
            .field("labels", &self.labels)
            .finish()
    }
}

/// Builder for [`Bfs`].
pub struct BfsBuilder<'a, G>
where
    G: GraphBase,
{
    graph: &'a G,
    root: Option<G::VertexId>,
}

impl<'a, G> BfsBuilder<'a, G>
where
    G: GraphBase,
{
    /// Traverses only the component containing the vertex.
    ///
    /// Without a start vertex, a breadth-first traversal is started from
    /// every vertex that was not visited yet, in the order given by the graph.
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
    pub fn run(self) -> Bfs<G>
    where
        G: Incidence,
    {
        let graph = self.graph;
        let mut bfs = Bfs::new(graph);

        match self.root {
            Some(root) => {
                assert!(graph.contains_vertex(&root), "vertex does not exist");
                bfs.traverse(graph, root);
            }
            None => {
                for vertex in graph.vertices_by_id() {
                    if !bfs.visited.is_visited(&vertex) {
                        bfs.traverse(graph, vertex);
                    }
                }
            }
        }

        bfs
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

    fn assert_valid<V, E>(bfs: &Bfs<MatrixGraph<V, E>>, graph: &MatrixGraph<V, E>) {
        assert_eq!(
            bfs.discovery_edges().count(),
            bfs.visited_count() - bfs.roots().len(),
            "discovery edges do not form a spanning forest"
        );

        for edge in graph.edges_by_id() {
            let (u, v) = graph.endpoints(&edge).unwrap();

            match bfs.edge_label(&edge) {
                BfsEdgeLabel::Discovery => {
                    let (du, dv) = (bfs.level_of(&u).unwrap(), bfs.level_of(&v).unwrap());
                    assert_eq!(du.abs_diff(dv), 1, "discovery edge {edge:?} skips a level");
                }
                BfsEdgeLabel::Cross => {
                    let (du, dv) = (bfs.level_of(&u).unwrap(), bfs.level_of(&v).unwrap());
                    assert!(du.abs_diff(dv) <= 1, "cross edge {edge:?} spans levels");
                }
                BfsEdgeLabel::Unexplored => {
                    assert_eq!(bfs.vertex_label(&u), VertexLabel::Unexplored);
                    assert_eq!(bfs.vertex_label(&v), VertexLabel::Unexplored);
                }
            }
        }

        let leveled = bfs.levels().iter().map(Vec::len).sum::<usize>();
        assert_eq!(leveled, bfs.visited_count());
    }

    #[test]
    fn path_from_end() {
        let graph: MatrixGraph<(), ()> = create_path(4);
        let v = graph.vertices().collect::<Vec<_>>();

        let bfs = Bfs::on(&graph).start(v[0]).run();

        assert_eq!(bfs.levels(), &[vec![v[0]], vec![v[1]], vec![v[2]], vec![v[3]]]);
        assert_eq!(bfs.discovery_edges().count(), 3);
        assert_eq!(bfs.cross_edges().count(), 0);
        assert_valid(&bfs, &graph);
    }

    #[test]
    fn path_levels() {
        let graph: MatrixGraph<(), ()> = create_path(4);
        let vertices = graph.vertices().collect::<Vec<_>>();

        let bfs = Bfs::on(&graph).start(vertices[1]).run();

        assert_eq!(
            bfs.levels(),
            &[vec![vertices[1]], vec![vertices[0], vertices[2]], vec![vertices[3]]]
        );
        assert_eq!(bfs.cross_edges().count(), 0);
        assert_valid(&bfs, &graph);
    }

    #[test]
    fn triangle() {
        let mut graph = MatrixGraph::new();

        let a = graph.insert_vertex("a");
        let b = graph.insert_vertex("b");
        let c = graph.insert_vertex("c");

        let ab = graph.insert_edge(&a, &b, ());
        let bc = graph.insert_edge(&b, &c, ());
        let ca = graph.insert_edge(&c, &a, ());

        let bfs = Bfs::on(&graph).start(a).run();

        assert_eq!(bfs.edge_label(&ab), BfsEdgeLabel::Discovery);
        assert_eq!(bfs.edge_label(&ca), BfsEdgeLabel::Discovery);
        assert_eq!(bfs.edge_label(&bc), BfsEdgeLabel::Cross);
        assert_eq!(bfs.levels(), &[vec![a], vec![b, c]]);
        assert_valid(&bfs, &graph);
    }

    #[test]
    fn even_cycle() {
        let graph: MatrixGraph<(), ()> = create_cycle(6);
        let bfs = Bfs::on(&graph).run();

        assert_eq!(bfs.levels().len(), 4);
        assert_eq!(bfs.cross_edges().count(), 1);
        assert_valid(&bfs, &graph);
    }

    #[test]
    fn complete_graph() {
        let graph: MatrixGraph<(), ()> = create_complete(5);
        let bfs = Bfs::on(&graph).run();

        assert_eq!(bfs.levels().len(), 2);
        assert_eq!(bfs.discovery_edges().count(), 4);
        assert_eq!(bfs.cross_edges().count(), 6);
        assert_valid(&bfs, &graph);
    }

    #[test]
    fn forest_merges_levels() {
        let mut graph = MatrixGraph::new();

        let a = graph.insert_vertex(());
        let b = graph.insert_vertex(());
        let c = graph.insert_vertex(());
        let d = graph.insert_vertex(());
        let e = graph.insert_vertex(());

        graph.insert_edge(&a, &b, ());
        graph.insert_edge(&c, &d, ());
        graph.insert_edge(&d, &e, ());

        let bfs = Bfs::on(&graph).run();

        assert_eq!(bfs.roots(), &[a, c]);
        assert_eq!(bfs.levels(), &[vec![a, c], vec![b, d], vec![e]]);
        assert_eq!(bfs.level_of(&e), Some(2));
        assert_eq!(bfs.discovery_edges().count(), 5 - 2);
        assert_valid(&bfs, &graph);
    }

    #[test]
    fn start_covers_component_only() {
        let mut graph = MatrixGraph::new();

        let a = graph.insert_vertex(());
        let b = graph.insert_vertex(());
        let c = graph.insert_vertex(());

        graph.insert_edge(&a, &b, ());

        let bfs = Bfs::on(&graph).start(a).run();

        assert_eq!(bfs.order(), &[a, b]);
        assert_eq!(bfs.vertex_label(&c), VertexLabel::Unexplored);
        assert_eq!(bfs.level_of(&c), None);
        assert_valid(&bfs, &graph);
    }

    #[test]
    fn self_loop_is_cross_edge() {
        let mut graph = MatrixGraph::new();

        let a = graph.insert_vertex(());
        let aa = graph.insert_edge(&a, &a, ());

        let bfs = Bfs::on(&graph).run();

        assert_eq!(bfs.edge_label(&aa), BfsEdgeLabel::Cross);
        assert_eq!(bfs.levels(), &[vec![a]]);
        assert_valid(&bfs, &graph);
    }

    #[test]
    fn removed_vertex_with_reused_slot() {
        let mut graph = MatrixGraph::new();

        let a = graph.insert_vertex("a");
        graph.remove_vertex(&a);
        let b = graph.insert_vertex("b");
        let c = graph.insert_vertex("c");
        graph.insert_edge(&b, &c, ());

        let bfs = Bfs::on(&graph).run();

        assert_eq!(a.as_usize(), b.as_usize());
        assert_eq!(bfs.vertex_label(&b), VertexLabel::Visited);
        assert_eq!(bfs.vertex_label(&a), VertexLabel::Unexplored);
        assert_eq!(bfs.level_of(&a), None);
        assert_eq!(bfs.levels(), &[vec![b], vec![c]]);
    }

    #[test]
    #[should_panic(expected = "vertex does not exist")]
    fn start_absent() {
        let mut graph = MatrixGraph::<(), ()>::new();
        let a = graph.insert_vertex(());
        graph.remove_vertex(&a);

        Bfs::on(&graph).start(a).run();
    }

    #[cfg(feature = "proptest")]
    proptest! {
        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_bfs_labels(graph in graph(any::<()>(), any::<()>())) {
            let bfs = Bfs::on(&graph).run();

            prop_assert_eq!(bfs.visited_count(), graph.vertex_count());
            prop_assert_eq!(bfs.labels.len(), graph.edge_count());
            assert_valid(&bfs, &graph);
        }
    }
}
