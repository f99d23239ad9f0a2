use crate::automaton::StateId;

/// Raised while building an automaton. Once construction succeeded, a
/// simulation can only accept or reject; it never fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("an automaton needs at least one state")]
    NoStates,
    #[error("{state_count} states requested, at most {max} are supported")]
    TooManyStates { state_count: usize, max: usize },
    #[error("state {state} is out of range, the automaton has {state_count} states")]
    StateOutOfRange { state: StateId, state_count: usize },
    #[error("state {0} is not a declared state")]
    UnknownState(String),
    #[error("symbol {0} is not part of the input alphabet")]
    UnknownInputSymbol(String),
    #[error("symbol {0} is not part of the stack alphabet")]
    UnknownStackSymbol(String),
    #[error("conflicting transition for {key}: already leads to {existing}, refusing {new}")]
    ConflictingTransition {
        key: String,
        existing: String,
        new: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigurationError>;
