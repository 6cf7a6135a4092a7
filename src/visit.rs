//! Traversals that label the vertices and edges of a graph.
//!
//! Both [depth-first](Dfs) and [breadth-first](Bfs) traversals visit every
//! vertex reachable from the root exactly once and classify every edge they
//! encounter. Edges through which a new vertex was reached are _discovery_
//! edges and together form a spanning forest. The remaining edges are _back_
//! edges in DFS and _cross_ edges in BFS.
//!
//! The labels are stored in the traversal result, not in the graph. Running a
//! traversal does not modify the graph and any number of traversals can run on
//! the same graph.
//!
//! # Examples
//!
//! ```
//! use matgraph::{visit::{Dfs, DfsEdgeLabel, VertexLabel}, MatrixGraph};
//!
//! let mut graph = MatrixGraph::new();
//!
//! let a = graph.insert_vertex("a");
//! let b = graph.insert_vertex("b");
//! let c = graph.insert_vertex("c");
//!
//! let ab = graph.insert_edge(&a, &b, ());
//!
//! let dfs = Dfs::on(&graph).start(a).run();
//!
//! assert_eq!(dfs.edge_label(&ab), DfsEdgeLabel::Discovery);
//! assert_eq!(dfs.vertex_label(&b), VertexLabel::Visited);
//! assert_eq!(dfs.vertex_label(&c), VertexLabel::Unexplored);
//! ```

pub mod bfs;
pub mod dfs;

#[doc(inline)]
pub use self::{
    bfs::{Bfs, BfsBuilder, BfsEdgeLabel},
    dfs::{Dfs, DfsBuilder, DfsEdgeLabel},
};

/// State of a vertex after a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VertexLabel {
    #[default]
    Unexplored,
    Visited,
}
