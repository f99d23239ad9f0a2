use std::fmt::{Debug, Display};

use itertools::Itertools;
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use crate::{
    automaton::{
        Alphabet, Language, Letter, StateId, StateSet, Traceable, insert_letter,
        node::StateNode,
        trace::{Run, format_state, format_state_set},
        utils::{build_state_graph, check_state, node_index, to_graphviz},
    },
    error::ConfigResult,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NFAEdge<L: Letter> {
    Symbol(L),
    Epsilon,
}

impl<L: Letter> NFAEdge<L> {
    pub fn is_epsilon(&self) -> bool {
        matches!(self, NFAEdge::Epsilon)
    }

    /// Epsilon never matches an input letter.
    pub fn matches(&self, letter: &L) -> bool {
        match self {
            NFAEdge::Symbol(s) => s == letter,
            NFAEdge::Epsilon => false,
        }
    }
}

impl<L: Letter> From<Option<L>> for NFAEdge<L> {
    fn from(value: Option<L>) -> Self {
        match value {
            Some(l) => NFAEdge::Symbol(l),
            None => NFAEdge::Epsilon,
        }
    }
}

impl<L: Letter> Display for NFAEdge<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NFAEdge::Symbol(s) => write!(f, "{:?}", s),
            NFAEdge::Epsilon => write!(f, "ε"),
        }
    }
}

/// One input symbol consumed by an [NFA]. Both sets are epsilon closed, `to`
/// is empty when no state could read the symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfaStep<L: Letter> {
    pub from: StateSet,
    pub symbol: L,
    pub to: StateSet,
}

impl<L: Letter> Display for NfaStep<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} --{:?}--> {}",
            format_state_set(&self.from),
            self.symbol,
            format_state_set(&self.to)
        )
    }
}

/// A nondeterministic finite automaton with epsilon transitions.
#[derive(Clone)]
pub struct NFA<L: Letter> {
    initial: NodeIndex,
    graph: DiGraph<StateNode, NFAEdge<L>>,
    alphabet: Vec<L>,
}

impl<L: Letter> NFA<L> {
    /// Creates an NFA with the states `0..state_count` and no transitions.
    pub fn new(
        state_count: usize,
        initial: StateId,
        final_states: impl IntoIterator<Item = StateId>,
    ) -> ConfigResult<Self> {
        let (graph, initial) = build_state_graph(state_count, initial, final_states)?;

        Ok(NFA {
            initial,
            graph,
            alphabet: vec![],
        })
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

    /// Adds `destination` to the targets of `(origin, label)`. Transitions
    /// accumulate, adding the same one twice has no effect.
    pub fn add_transition(
        &mut self,
        origin: StateId,
        label: impl Into<NFAEdge<L>>,
        destination: StateId,
    ) -> ConfigResult<()> {
        let from = check_state(origin, self.state_count())?;
        let to = check_state(destination, self.state_count())?;
        let label = label.into();

        if self
            .graph
            .edges_connecting(from, to)
            .any(|edge| *edge.weight() == label)
        {
            return Ok(());
        }

        if let NFAEdge::Symbol(symbol) = &label {
            insert_letter(&mut self.alphabet, symbol);
        }
        self.graph.add_edge(from, to, label);

        Ok(())
    }

    /// Calculates the epsilon closure of a set of states: every state reachable
    /// from `states` using only epsilon transitions, `states` included.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = states.clone();
        self.extend_to_e_closure(&mut closure);
        closure
    }

    /// Extends `states` in place to its epsilon closure.
    pub fn extend_to_e_closure(&self, states: &mut StateSet) {
        let state_count = self.state_count();
        let mut stack = states
            .iter()
            .filter_map(|&state| node_index(state, state_count))
            .collect_vec();

        while let Some(node) = stack.pop() {
            for edge in self.graph.edges_directed(node, Direction::Outgoing) {
                if edge.weight().is_epsilon() && states.insert(edge.target().index()) {
                    stack.push(edge.target());
                }
            }
        }
    }

    /// The states reachable from `states` by reading exactly `symbol`, without
    /// taking epsilon transitions before or after.
    pub fn step(&self, states: &StateSet, symbol: &L) -> StateSet {
        let mut next = StateSet::new();

        let state_count = self.state_count();
        for node in states
            .iter()
            .filter_map(|&state| node_index(state, state_count))
        {
            for edge in self.graph.edges_directed(node, Direction::Outgoing) {
                if edge.weight().matches(symbol) {
                    next.insert(edge.target().index());
                }
            }
        }

        next
    }

    /// Returns false for states that do not exist.
    pub fn is_accepting(&self, state: StateId) -> bool {
        node_index(state, self.state_count())
            .is_some_and(|node| self.graph[node].accepting)
    }

    /// Checks if a set of states contains an accepting state.
    pub fn is_accepting_set(&self, states: &StateSet) -> bool {
        states.iter().any(|&state| self.is_accepting(state))
    }

    pub fn final_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.graph
            .node_indices()
            .filter(|node| self.graph[*node].accepting)
            .map(|node| node.index())
    }

    /// The epsilon closure of the initial state, where every run starts.
    pub fn initial_closure(&self) -> StateSet {
        self.epsilon_closure(&StateSet::from_iter([self.initial.index()]))
    }

    fn simulate<'a>(
        &self,
        input: impl IntoIterator<Item = &'a L>,
        mut trace: Option<&mut Vec<NfaStep<L>>>,
    ) -> bool
    where
        L: 'a,
    {
        let mut current_states = self.initial_closure();

        for symbol in input {
            let mut next_states = self.step(&current_states, symbol);
            self.extend_to_e_closure(&mut next_states);

            if let Some(steps) = trace.as_deref_mut() {
                steps.push(NfaStep {
                    from: current_states.clone(),
                    symbol: symbol.clone(),
                    to: next_states.clone(),
                });
            }

            // no state is left that could ever accept
            if next_states.is_empty() {
                tracing::trace!(
                    "No state of {} reads {:?}, rejecting",
                    format_state_set(&current_states),
                    symbol
                );
                return false;
            }

            current_states = next_states;
        }

        self.is_accepting_set(&current_states)
    }

    pub fn to_graphviz(&self) -> String {
        to_graphviz(&self.graph, self.initial, |edge| edge.to_string())
    }
}

impl<L: Letter> Alphabet for NFA<L> {
    type Letter = L;

    fn alphabet(&self) -> &[L] {
        &self.alphabet
    }
}

impl<L: Letter> Language for NFA<L> {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a L>) -> bool
    where
        L: 'a,
    {
        self.simulate(input, None)
    }
}

impl<L: Letter> Traceable for NFA<L> {
    type Step = NfaStep<L>;

    fn run<'a>(&self, input: impl IntoIterator<Item = &'a L>) -> Run<NfaStep<L>>
    where
        L: 'a,
    {
        let mut steps = vec![];
        let accepted = self.simulate(input, Some(&mut steps));
        Run::new(accepted, steps)
    }
}

impl<L: Letter> Debug for NFA<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NFA")
            .field("alphabet", &self.alphabet)
            .field("state_count", &self.graph.node_count())
            .field("initial_state", &self.initial.index())
            .field("final_states", &self.final_states().collect_vec())
            .field("edge_count", &self.graph.edge_count())
            .field(
                "edges",
                &self
                    .graph
                    .edge_references()
                    .map(|edge| {
                        format!(
                            "{} --- {} --> {}",
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
