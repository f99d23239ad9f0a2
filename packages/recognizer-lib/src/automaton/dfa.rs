use std::fmt::{Debug, Display};

use itertools::Itertools;
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use crate::{
    automaton::{
        Alphabet, Language, Letter, StateId, Traceable, insert_letter,
        node::StateNode,
        trace::{Run, format_state},
        utils::{build_state_graph, check_state, node_index, to_graphviz},
    },
    config::TransitionPolicy,
    error::{ConfigResult, ConfigurationError},
};

/// One transition taken by a [DFA]. `to` is `None` if no transition was
/// defined, which ends the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfaStep<L: Letter> {
    pub from: StateId,
    pub symbol: L,
    pub to: Option<StateId>,
}

impl<L: Letter> Display for DfaStep<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to {
            Some(to) => write!(
                f,
                "{} --{:?}--> {}",
                format_state(self.from),
                self.symbol,
                format_state(to)
            ),
            None => write!(
                f,
                "{} --{:?}--> no transition",
                format_state(self.from),
                self.symbol
            ),
        }
    }
}

/// A deterministic finite automaton with a partial transition function.
///
/// Every state keeps its outgoing transitions in its own adjacency list, so
/// the alphabet is not bounded and missing transitions cost nothing.
#[derive(Clone)]
pub struct DFA<L: Letter> {
    initial: NodeIndex,
    graph: DiGraph<StateNode, L>,
    alphabet: Vec<L>,
    policy: TransitionPolicy,
}

impl<L: Letter> DFA<L> {
    /// Creates a DFA with the states `0..state_count` and no transitions.
    pub fn new(
        state_count: usize,
        initial: StateId,
        final_states: impl IntoIterator<Item = StateId>,
    ) -> ConfigResult<Self> {
        let (graph, initial) = build_state_graph(state_count, initial, final_states)?;

        Ok(DFA {
            initial,
            graph,
            alphabet: vec![],
            policy: TransitionPolicy::default(),
        })
    }

    /// Sets how [DFA::add_transition] treats a second transition for the same
    /// state and symbol.
    pub fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn transition_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn initial(&self) -> StateId {
        self.initial.index()
    }

    /// Returns false for states that do not exist.
    pub fn is_accepting(&self, state: StateId) -> bool {
        node_index(state, self.state_count())
            .is_some_and(|node| self.graph[node].accepting)
    }

    pub fn final_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.graph
            .node_indices()
            .filter(|node| self.graph[*node].accepting)
            .map(|node| node.index())
    }

    /// Records `origin --symbol--> destination`.
    ///
    /// Adding the exact same transition twice is a no-op. A different
    /// destination for an existing (origin, symbol) pair is rejected or
    /// replaces the old one, depending on the [TransitionPolicy].
    pub fn add_transition(
        &mut self,
        origin: StateId,
        symbol: L,
        destination: StateId,
    ) -> ConfigResult<()> {
        let from = check_state(origin, self.state_count())?;
        let to = check_state(destination, self.state_count())?;

        let existing = self
            .graph
            .edges_directed(from, Direction::Outgoing)
            .find(|edge| *edge.weight() == symbol)
            .map(|edge| (edge.id(), edge.target()));

        if let Some((edge, target)) = existing {
            if target == to {
                return Ok(());
            }

            match self.policy {
                TransitionPolicy::Reject => {
                    return Err(ConfigurationError::ConflictingTransition {
                        key: format!("({}, {:?})", format_state(origin), symbol),
                        existing: format_state(target.index()),
                        new: format_state(destination),
                    });
                }
                TransitionPolicy::Overwrite => {
                    tracing::debug!(
                        "Overwriting {} --{:?}--> {} with {}",
                        format_state(origin),
                        symbol,
                        format_state(target.index()),
                        format_state(destination)
                    );
                    self.graph.remove_edge(edge);
                }
            }
        }

        insert_letter(&mut self.alphabet, &symbol);
        self.graph.add_edge(from, to, symbol);

        Ok(())
    }

    /// The state reached from `state` by reading `symbol`, if defined.
    pub fn successor(&self, state: StateId, symbol: &L) -> Option<StateId> {
        node_index(state, self.state_count())
            .and_then(|node| self.successor_node(node, symbol))
            .map(|node| node.index())
    }

    fn successor_node(&self, node: NodeIndex, symbol: &L) -> Option<NodeIndex> {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .find(|edge| edge.weight() == symbol)
            .map(|edge| edge.target())
    }

    fn simulate<'a>(
        &self,
        input: impl IntoIterator<Item = &'a L>,
        mut trace: Option<&mut Vec<DfaStep<L>>>,
    ) -> bool
    where
        L: 'a,
    {
        let mut current = self.initial;

        for symbol in input {
            let next = self.successor_node(current, symbol);

            if let Some(steps) = trace.as_deref_mut() {
                steps.push(DfaStep {
                    from: current.index(),
                    symbol: symbol.clone(),
                    to: next.map(|node| node.index()),
                });
            }

            match next {
                Some(next) => current = next,
                None => {
                    tracing::trace!(
                        "No transition from {} on {:?}, rejecting",
                        format_state(current.index()),
                        symbol
                    );
                    return false;
                }
            }
        }

        self.graph[current].accepting
    }

    pub fn to_graphviz(&self) -> String {
        to_graphviz(&self.graph, self.initial, |symbol| format!("{:?}", symbol))
    }
}

impl<L: Letter> Alphabet for DFA<L> {
    type Letter = L;

    fn alphabet(&self) -> &[L] {
        &self.alphabet
    }
}

impl<L: Letter> Language for DFA<L> {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a L>) -> bool
    where
        L: 'a,
    {
        self.simulate(input, None)
    }
}

impl<L: Letter> Traceable for DFA<L> {
    type Step = DfaStep<L>;

    fn run<'a>(&self, input: impl IntoIterator<Item = &'a L>) -> Run<DfaStep<L>>
    where
        L: 'a,
    {
        let mut steps = vec![];
        let accepted = self.simulate(input, Some(&mut steps));
        Run::new(accepted, steps)
    }
}

impl<L: Letter> Debug for DFA<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DFA")
            .field("alphabet", &self.alphabet)
            .field("state_count", &self.graph.node_count())
            .field("initial_state", &self.initial.index())
            .field("final_states", &self.final_states().collect_vec())
            .field("policy", &self.policy)
            .field("edge_count", &self.graph.edge_count())
            .field(
                "edges",
                &self
                    .graph
                    .edge_references()
                    .map(|edge| {
                        format!(
                            "{} --- {:?} --> {}",
                            format_state(edge.source().index()),
                            edge.weight(),
                            format_state(edge.target().index())
                        )
                    })
                    .collect_vec(),
            )
            .finish()
    }
}
