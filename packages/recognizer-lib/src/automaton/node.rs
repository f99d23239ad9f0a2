/// A state of a [crate::automaton::dfa::DFA] or [crate::automaton::nfa::NFA].
/// The index of the state is its position in the underlying graph, so the
/// node only needs to remember whether it is final.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StateNode {
    pub accepting: bool,
}

impl StateNode {
    pub fn new(accepting: bool) -> Self {
        StateNode { accepting }
    }

    pub fn non_accepting() -> Self {
        StateNode::new(false)
    }
}
