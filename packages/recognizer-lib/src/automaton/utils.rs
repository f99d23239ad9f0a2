use itertools::Itertools;
use petgraph::{
    graph::{DefaultIx, DiGraph, IndexType, NodeIndex},
    visit::EdgeRef,
};

use crate::{
    automaton::{StateId, node::StateNode},
    error::{ConfigResult, ConfigurationError},
};

/// The largest number of states a state graph can hold. The last index of the
/// graph's index type is reserved by petgraph.
pub fn max_state_count() -> usize {
    <DefaultIx as IndexType>::max().index()
}

/// Maps a state id onto its graph node, or `None` if the id is not one of the
/// `state_count` states. Ids are never truncated into the graph's index type.
pub fn node_index(state: StateId, state_count: usize) -> Option<NodeIndex> {
    (state < state_count).then(|| NodeIndex::new(state))
}

/// Maps a state id onto its graph node, failing if the id is not one of the
/// `state_count` declared states.
pub fn check_state(state: StateId, state_count: usize) -> ConfigResult<NodeIndex> {
    node_index(state, state_count)
        .ok_or(ConfigurationError::StateOutOfRange { state, state_count })
}

/// Builds the state graph shared by DFA and NFA: `state_count` nodes, node `i`
/// being state `i`, with the final states marked as accepting.
pub fn build_state_graph<E>(
    state_count: usize,
    initial: StateId,
    final_states: impl IntoIterator<Item = StateId>,
) -> ConfigResult<(DiGraph<StateNode, E>, NodeIndex)> {
    if state_count == 0 {
        return Err(ConfigurationError::NoStates);
    }
    if state_count >= max_state_count() {
        return Err(ConfigurationError::TooManyStates {
            state_count,
            max: max_state_count() - 1,
        });
    }

    let initial = check_state(initial, state_count)?;

    let mut graph = DiGraph::with_capacity(state_count, state_count);
    for _ in 0..state_count {
        graph.add_node(StateNode::non_accepting());
    }

    for state in final_states {
        let node = check_state(state, state_count)?;
        graph[node].accepting = true;
    }

    Ok((graph, initial))
}

pub fn to_graphviz<E>(
    graph: &DiGraph<StateNode, E>,
    initial: NodeIndex,
    label: impl Fn(&E) -> String,
) -> String {
    let mut dot = String::new();
    dot.push_str("digraph finite_state_machine {\n");
    dot.push_str("fontname=\"Helvetica,Arial,sans-serif\"\n");
    dot.push_str("node [fontname=\"Helvetica,Arial,sans-serif\"]\n");
    dot.push_str("edge [fontname=\"Helvetica,Arial,sans-serif\"]\n");
    dot.push_str("rankdir=LR;\n");
    dot.push_str("node [shape=point,label=\"\"]START\n");

    let accepting_states = graph
        .node_indices()
        .filter(|node| graph[*node].accepting)
        .map(|node| format!("q{}", node.index()))
        .join(" ");

    if !accepting_states.is_empty() {
        dot.push_str(&format!("node [shape = doublecircle]; {};\n", accepting_states));
    }
    dot.push_str("node [shape = circle];\n");
    dot.push_str(&format!("START -> q{};\n", initial.index()));

    for edge in graph.edge_references() {
        dot.push_str(&format!(
            "q{} -> q{} [ label={:?} ];\n",
            edge.source().index(),
            edge.target().index(),
            label(edge.weight())
        ));
    }

    dot.push_str("}\n");

    dot
}

#[cfg(target_pointer_width = "64")]
#[test]
fn test_node_index_never_truncates() {
    assert_eq!(node_index(2, 3), Some(NodeIndex::new(2)));
    assert_eq!(node_index(3, 3), None);
    assert_eq!(node_index((1 << 32) + 2, 3), None);
}
