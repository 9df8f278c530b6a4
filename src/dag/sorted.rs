// src/dag/sorted.rs

//! Comparator-ordered DAG.
//!
//! [`SortedDag`] keeps the same edge map as [`Dag`], but orders its output by
//! a caller-supplied total order instead of walking edges. The order is only
//! topologically valid if the comparator agrees with the edges: for every
//! edge `u -> v`, `cmp(u, v)` must not be `Greater`. Keeping the two in
//! agreement is up to the caller; [`SortedDag::first_inconsistent_edge`] can
//! check it on demand.

use std::cmp::Ordering;
use std::hash::Hash;

use tracing::debug;

use crate::dag::graph::{CyclicGraphError, Dag};

pub struct SortedDag<N: Eq + Hash, F> {
    dag: Dag<N>,
    cmp: F,
}

impl<N, F> SortedDag<N, F>
where
    N: Eq + Hash + Clone,
    F: Fn(&N, &N) -> Ordering,
{
    pub fn new(cmp: F) -> Self {
        Self {
            dag: Dag::new(),
            cmp,
        }
    }

    /// The underlying edge graph.
    pub fn graph(&self) -> &Dag<N> {
        &self.dag
    }

    /// See [`Dag::add_edge`].
    pub fn add_edge(&mut self, from: N, to: N) {
        self.dag.add_edge(from, to);
    }

    /// See [`Dag::add_node`].
    pub fn add_node(
        &mut self,
        name: N,
        edges: impl IntoIterator<Item = N>,
    ) -> Result<(), CyclicGraphError> {
        self.dag.add_node(name, edges)
    }

    /// Snapshot of every reachable node, stably sorted by the comparator.
    ///
    /// The snapshot is owned, so the graph may be changed while the returned
    /// iterator is still being consumed.
    pub fn all(&self) -> std::vec::IntoIter<N> {
        let mut snapshot: Vec<N> = self.dag.nodes().cloned().collect();
        snapshot.sort_by(|a, b| (self.cmp)(a, b));
        snapshot.into_iter()
    }

    /// Validate acyclicity, then return [`SortedDag::all`] as a vector.
    pub fn topological(&self) -> Result<Vec<N>, CyclicGraphError> {
        self.dag.validate()?;
        let order: Vec<N> = self.all().collect();

        debug!(nodes = order.len(), "comparator order complete");
        Ok(order)
    }

    /// First edge `u -> v` found with `cmp(u, v) == Greater`, if any.
    ///
    /// Runs in O(E). Edge iteration order is unspecified, so with several
    /// bad edges any one of them may be returned.
    pub fn first_inconsistent_edge(&self) -> Option<(&N, &N)> {
        self.dag
            .edges()
            .find(|&(from, to)| (self.cmp)(from, to) == Ordering::Greater)
    }
}

impl<N, F> std::fmt::Debug for SortedDag<N, F>
where
    N: Eq + Hash + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortedDag")
            .field("dag", &self.dag)
            .finish_non_exhaustive()
    }
}
