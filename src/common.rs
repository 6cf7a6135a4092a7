pub mod matrix;
pub mod visit_set;

pub use visit_set::{TypedBitSet, VisitSet};
