//! Graph storage.
//!
//! The graph is split into three parts:
//!
//! * a [handle list](handle_list) of vertices,
//! * a [handle list](handle_list) of edges,
//! * an adjacency matrix indexed by the structural index of the vertices.
//!
//! The lists own the data and give out stable handles. The matrix maps a pair
//! of vertices to the edge connecting them, if any.
//!
//! | operation      | complexity  |
//! |----------------|-------------|
//! | insert vertex  | _O*(V)_     |
//! | insert edge    | _O(1)_      |
//! | are adjacent   | _O(1)_      |
//! | edge between   | _O(1)_      |
//! | incident edges | _O(E)_      |
//! | remove vertex  | _O(V² + E)_ |
//! | remove edge    | _O(1)_      |
//! | space          | _O(V² + E)_ |
//!
//! * _V_ – number of vertex insertions since the last
//!   [`clear`](MatrixGraph::clear)
//! * _E_ – edge count
//! * _O*(..)_ – amortized complexity

pub mod handle_list;
pub mod matrix_graph;

#[doc(inline)]
pub use self::{handle_list::HandleList, matrix_graph::MatrixGraph};
