// src/dag/mod.rs

//! Directed acyclic graphs.
//!
//! - [`graph`] holds the edge-map DAG with cycle detection and
//!   topological sorting.
//! - [`sorted`] wraps it with a caller-supplied comparator that decides the
//!   output order.

pub mod graph;
pub mod sorted;

pub use graph::{CyclicGraphError, Dag, Nodes, Successors};
pub use sorted::SortedDag;
