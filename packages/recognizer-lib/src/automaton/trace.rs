use std::fmt::Display;

use itertools::Itertools;

use crate::automaton::{StateId, StateSet};

/// The outcome of one simulation together with every step it took, in order.
///
/// A run that hit an undefined transition ends with a step whose target is
/// missing; no step is recorded for the input after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run<S> {
    pub accepted: bool,
    pub steps: Vec<S>,
}

impl<S> Run<S> {
    pub fn new(accepted: bool, steps: Vec<S>) -> Self {
        Run { accepted, steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last_step(&self) -> Option<&S> {
        self.steps.last()
    }
}

impl<S: Display> Run<S> {
    pub fn to_fancy_string(&self) -> String {
        format!("{}", self)
    }
}

impl<S: Display> Display for Run<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for step in &self.steps {
            writeln!(f, "{}", step)?;
        }
        write!(f, "{}", if self.accepted { "accepted" } else { "rejected" })
    }
}

pub fn format_state(state: StateId) -> String {
    format!("q{}", state)
}

/// Formats a state set in ascending order, e.g. `{q0, q2}`.
pub fn format_state_set(states: &StateSet) -> String {
    format!(
        "{{{}}}",
        states.iter().sorted().map(|s| format_state(*s)).join(", ")
    )
}

#[test]
fn test_format_state_set() {
    let states: StateSet = [2, 0, 11].into_iter().collect();
    assert_eq!(format_state_set(&states), "{q0, q2, q11}");
    assert_eq!(format_state_set(&StateSet::new()), "{}");
}
