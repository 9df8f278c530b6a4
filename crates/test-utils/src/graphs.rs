//! Graph fixtures and assertions shared by the integration tests.

use std::collections::HashMap;

use petgraph::algo::is_cyclic_directed;
use petgraph::graphmap::DiGraphMap;
use vixen::Dag;

/// Build a `Dag<String>` from string pairs with `add_edge`.
pub fn dag_from_edges(edges: &[(&str, &str)]) -> Dag<String> {
    edges
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}

/// Independent cycle check used as an oracle.
pub fn petgraph_is_cyclic<N: Copy + Ord + std::hash::Hash>(edges: &[(N, N)]) -> bool {
    let graph: DiGraphMap<N, ()> = DiGraphMap::from_edges(edges.iter().copied());
    is_cyclic_directed(&graph)
}

/// Assert `order` is a permutation of the graph's nodes that respects every
/// edge.
pub fn assert_topological<N>(dag: &Dag<N>, order: &[N])
where
    N: Eq + std::hash::Hash + Clone + std::fmt::Debug,
{
    assert_eq!(order.len(), dag.len(), "order {:?} is not a permutation", order);

    let position: HashMap<&N, usize> = order.iter().enumerate().map(|(i, n)| (n, i)).collect();
    assert_eq!(position.len(), order.len(), "order {:?} repeats a node", order);

    for (from, to) in dag.edges() {
        let (Some(a), Some(b)) = (position.get(from), position.get(to)) else {
            panic!("edge {:?} -> {:?} has an endpoint missing from {:?}", from, to, order);
        };
        assert!(a < b, "{:?} must come before {:?} in {:?}", from, to, order);
    }
}
