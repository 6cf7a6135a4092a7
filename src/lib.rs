//! Undirected graph stored as an adjacency matrix, with depth-first and
//! breadth-first traversals that classify edges.
//!
//! # Examples
//!
//! ```
//! use matgraph::{
//!     storage::MatrixGraph,
//!     visit::{Bfs, BfsEdgeLabel, Dfs, DfsEdgeLabel},
//! };
//!
//! let mut graph = MatrixGraph::new();
//!
//! let a = graph.insert_vertex("a");
//! let b = graph.insert_vertex("b");
//! let c = graph.insert_vertex("c");
//!
//! let ab = graph.insert_edge(&a, &b, 1);
//! let bc = graph.insert_edge(&b, &c, 2);
//! let ca = graph.insert_edge(&c, &a, 3);
//!
//! assert!(graph.are_adjacent(&a, &c));
//! assert_eq!(graph.opposite(&a, &ab), Ok(b));
//!
//! let dfs = Dfs::on(&graph).start(a).run();
//! assert_eq!(dfs.back_edges().count(), 1);
//!
//! let bfs = Bfs::on(&graph).start(a).run();
//! assert_eq!(bfs.edge_label(&bc), BfsEdgeLabel::Cross);
//! assert_eq!(bfs.edge_label(&ca), BfsEdgeLabel::Discovery);
//! # let _ = DfsEdgeLabel::Back;
//! ```

pub mod common;
pub mod core;
pub mod infra;
pub mod storage;
pub mod visit;

#[doc(inline)]
pub use storage::MatrixGraph;

pub mod prelude {
    #[doc(hidden)]
    pub use crate::{
        core::{EdgeSet, GraphBase, Incidence, VertexSet},
        storage::MatrixGraph,
        visit::{Bfs, Dfs},
    };
}
