// src/dag/graph.rs

use std::cell::OnceCell;
use std::collections::HashMap;
use std::hash::Hash;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::set::Set;

/// The single failure the graph can report.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("graph is cyclic")]
pub struct CyclicGraphError;

/// Iterator over the direct successors of a node.
pub type Successors<'a, N> = std::iter::Flatten<std::option::IntoIter<&'a Set<N>>>;

/// Directed acyclic graph keyed by `N`.
///
/// Every node is a key of the edge map, including nodes that were only ever
/// mentioned as an edge destination. Roots (nodes with no incoming edge) are
/// derived from the edge map and cached until the next mutation.
///
/// There are two ways to grow the graph:
///
/// - [`Dag::add_node`] replaces a node's whole edge list and validates the
///   graph straight away. A successful call always leaves an acyclic graph.
///   This is the one to use unless you have a reason not to.
/// - [`Dag::add_edge`] inserts a single edge and never fails. Cycles only
///   show up later, from [`Dag::topological`] or [`Dag::validate`], so call
///   one of those before relying on the graph being acyclic.
///
/// A `Dag` is not `Sync`. Share it between threads behind a lock.
#[derive(Debug, Clone)]
pub struct Dag<N: Eq + Hash> {
    edges: HashMap<N, Set<N>>,
    roots: OnceCell<Set<N>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// On the current DFS path.
    InProgress,
    /// All successors finished; already emitted.
    Done,
}

impl<N: Eq + Hash + Clone> Dag<N> {
    pub fn new() -> Self {
        Self {
            edges: HashMap::new(),
            roots: OnceCell::new(),
        }
    }

    /// Build a graph from `(from, to)` pairs using [`Dag::add_edge`].
    ///
    /// The result is not validated.
    pub fn from_edges(edges: impl IntoIterator<Item = (N, N)>) -> Self {
        let mut dag = Self::new();
        dag.extend(edges);
        dag
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.edges.contains_key(node)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Set::len).sum()
    }

    /// Every node, in no particular order.
    ///
    /// Unlike [`Dag::nodes`] this includes nodes that no root can reach,
    /// which only happens when the graph has a cycle.
    pub fn iter(&self) -> impl Iterator<Item = &N> {
        self.edges.keys()
    }

    /// Direct successors of `node`. Empty if the node is unknown.
    pub fn successors(&self, node: &N) -> Successors<'_, N> {
        self.edges.get(node).into_iter().flatten()
    }

    /// Every edge as a `(from, to)` pair, in no particular order.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> {
        self.edges
            .iter()
            .flat_map(|(from, to)| to.iter().map(move |t| (from, t)))
    }

    /// Insert the edge `from -> to`, creating either endpoint if needed.
    ///
    /// Never fails, including for self-loops and edges that close a cycle.
    /// Re-adding an existing edge changes nothing.
    pub fn add_edge(&mut self, from: N, to: N) {
        self.edges.entry(to.clone()).or_default();
        self.edges.entry(from).or_default().add(to);
        self.invalidate_roots();

        trace!(nodes = self.edges.len(), "edge added");
    }

    /// Ensure `node` exists without touching its edges.
    ///
    /// Returns `true` if the node was created. An isolated node is a root.
    pub fn insert(&mut self, node: N) -> bool {
        if self.edges.contains_key(&node) {
            return false;
        }
        self.edges.insert(node, Set::new());
        self.invalidate_roots();
        true
    }

    /// Replace the outgoing edges of `name` with `edges` and validate.
    ///
    /// `name` and every destination are created if absent.
    ///
    /// If the graph is already cyclic (through earlier [`Dag::add_edge`]
    /// calls) the call fails with [`CyclicGraphError`] before anything is
    /// changed. If the new edge list is what makes the graph cyclic the call
    /// fails and is rolled back as follows:
    ///
    /// - a node that did not exist before the call is removed again, along
    ///   with any destinations this call created;
    /// - a node that already existed is kept but left with **no** outgoing
    ///   edges. Its previous edge list is not restored.
    pub fn add_node(
        &mut self,
        name: N,
        edges: impl IntoIterator<Item = N>,
    ) -> Result<(), CyclicGraphError> {
        if let Err(err) = self.validate() {
            warn!(
                nodes = self.edges.len(),
                "edge list not applied: graph is already cyclic"
            );
            return Err(err);
        }

        let existed = self.edges.contains_key(&name);
        let targets: Set<N> = edges.into_iter().collect();

        let created: Vec<N> = targets
            .iter()
            .filter(|to| **to != name && !self.edges.contains_key(*to))
            .cloned()
            .collect();
        for to in &created {
            self.edges.insert(to.clone(), Set::new());
        }
        let out_degree = targets.len();
        self.edges.insert(name.clone(), targets);
        self.invalidate_roots();

        if let Err(err) = self.validate() {
            let cycle_sizes: Vec<usize> = self.cycles().iter().map(Vec::len).collect();

            for to in &created {
                self.edges.remove(to);
            }
            if existed {
                self.edges.insert(name, Set::new());
            } else {
                self.edges.remove(&name);
            }
            self.invalidate_roots();

            warn!(
                existed,
                ?cycle_sizes,
                dropped_nodes = created.len(),
                "rejected edge list: graph would be cyclic"
            );
            return Err(err);
        }

        debug!(
            nodes = self.edges.len(),
            out_degree,
            replaced = existed,
            "node added"
        );
        Ok(())
    }

    /// Nodes with no incoming edge.
    pub fn roots(&self) -> impl Iterator<Item = &N> {
        self.root_set().iter()
    }

    /// Lazily walk every node reachable from a root, each exactly once.
    ///
    /// Nodes come out in discovery order, which is not a topological order.
    /// The walk starts fresh on every call.
    pub fn nodes(&self) -> Nodes<'_, N> {
        Nodes {
            dag: self,
            roots: self.root_set().iter(),
            stack: Vec::new(),
            visited: Set::with_capacity(self.edges.len()),
        }
    }

    /// All nodes ordered so that for every edge `u -> v`, `u` comes first.
    ///
    /// Fails with [`CyclicGraphError`] if the graph has a cycle; no partial
    /// order is returned in that case. Independent nodes may come out in a
    /// different order from one call to the next.
    pub fn topological(&self) -> Result<Vec<N>, CyclicGraphError> {
        let post_order = self.post_order()?;
        let order: Vec<N> = post_order.into_iter().rev().cloned().collect();

        debug!(nodes = order.len(), "topological sort complete");
        Ok(order)
    }

    /// Check that the graph has no cycle.
    pub fn validate(&self) -> Result<(), CyclicGraphError> {
        self.post_order().map(|_| ())
    }

    /// Strongly connected components that contain a cycle.
    ///
    /// A component is reported if it has more than one member or is a single
    /// node with a self-loop. Empty for an acyclic graph.
    pub fn cycles(&self) -> Vec<Vec<N>> {
        let mut graph: DiGraph<&N, ()> =
            DiGraph::with_capacity(self.edges.len(), self.edge_count());
        let mut index: HashMap<&N, NodeIndex> = HashMap::with_capacity(self.edges.len());

        for node in self.edges.keys() {
            index.insert(node, graph.add_node(node));
        }
        for (from, to) in self.edges() {
            if let (Some(&a), Some(&b)) = (index.get(from), index.get(to)) {
                graph.add_edge(a, b, ());
            }
        }

        tarjan_scc(&graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || component
                        .first()
                        .is_some_and(|n| graph.find_edge(*n, *n).is_some())
            })
            .map(|component| component.into_iter().map(|i| graph[i].clone()).collect())
            .collect()
    }

    fn invalidate_roots(&mut self) {
        self.roots = OnceCell::new();
    }

    fn root_set(&self) -> &Set<N> {
        self.roots.get_or_init(|| {
            let mut nonroots: Set<&N> = Set::with_capacity(self.edges.len());
            for to in self.edges.values() {
                nonroots.extend(to.iter());
            }

            self.edges
                .keys()
                .filter(|n| !nonroots.has(n))
                .cloned()
                .collect()
        })
    }

    /// Depth-first post-order from every root, failing on the first
    /// back-edge. Uses an explicit stack so deep chains cannot overflow.
    fn post_order(&self) -> Result<Vec<&N>, CyclicGraphError> {
        let roots = self.root_set();
        if roots.is_empty() && !self.edges.is_empty() {
            warn!(
                nodes = self.edges.len(),
                "graph has no roots; every node has an incoming edge"
            );
            return Err(CyclicGraphError);
        }

        let mut marks: HashMap<&N, Mark> = HashMap::with_capacity(self.edges.len());
        let mut order: Vec<&N> = Vec::with_capacity(self.edges.len());
        let mut stack: Vec<(&N, Successors<'_, N>)> = Vec::new();

        // Roots have no incoming edge, so no earlier DFS can have reached one.
        for root in roots {
            marks.insert(root, Mark::InProgress);
            stack.push((root, self.successors(root)));

            while let Some((node, successors)) = stack.last_mut() {
                match successors.next() {
                    Some(next) => match marks.get(next) {
                        Some(Mark::InProgress) => {
                            warn!(depth = stack.len(), "back-edge found; graph is cyclic");
                            return Err(CyclicGraphError);
                        }
                        Some(Mark::Done) => {}
                        None => {
                            marks.insert(next, Mark::InProgress);
                            stack.push((next, self.successors(next)));
                        }
                    },
                    None => {
                        let node = *node;
                        marks.insert(node, Mark::Done);
                        order.push(node);
                        stack.pop();
                    }
                }
            }
        }

        // Anything left over is only reachable through a cycle.
        if order.len() != self.edges.len() {
            warn!(
                unreached = self.edges.len() - order.len(),
                "nodes unreachable from any root; graph is cyclic"
            );
            return Err(CyclicGraphError);
        }

        Ok(order)
    }
}

impl<N: Eq + Hash + Clone> Default for Dag<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Eq + Hash + Clone> Extend<(N, N)> for Dag<N> {
    fn extend<I: IntoIterator<Item = (N, N)>>(&mut self, iter: I) {
        for (from, to) in iter {
            self.add_edge(from, to);
        }
    }
}

impl<N: Eq + Hash + Clone> FromIterator<(N, N)> for Dag<N> {
    fn from_iter<I: IntoIterator<Item = (N, N)>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}

/// Lazy discovery-order walk returned by [`Dag::nodes`].
///
/// Holds a shared borrow of the graph, so the graph cannot change while the
/// walk is in flight.
#[derive(Debug)]
pub struct Nodes<'a, N: Eq + Hash> {
    dag: &'a Dag<N>,
    roots: std::collections::hash_set::Iter<'a, N>,
    stack: Vec<&'a N>,
    visited: Set<&'a N>,
}

impl<'a, N: Eq + Hash> Iterator for Nodes<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<&'a N> {
        loop {
            let node = match self.stack.pop() {
                Some(node) => node,
                None => self.roots.next()?,
            };
            if self.visited.has(&node) {
                continue;
            }
            self.visited.add(node);

            if let Some(successors) = self.dag.edges.get(node) {
                self.stack.extend(successors.iter());
            }
            return Some(node);
        }
    }
}
