use std::fmt::{Debug, Display};

use hashbrown::{HashMap, HashSet, hash_map::Entry};
use itertools::Itertools;

use crate::{
    automaton::{Alphabet, AutomatonNode, Language, Letter, Traceable, insert_letter, trace::Run},
    error::{ConfigResult, ConfigurationError},
};

pub mod presets;
pub mod stack;

use stack::{Stack, StackOp};

/// The lookup key of a PDA transition. `stack_top` is `None` when the
/// transition applies to an empty stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PdaKey<Q: AutomatonNode, L: Letter, G: Letter> {
    pub state: Q,
    pub symbol: L,
    pub stack_top: Option<G>,
}

impl<Q: AutomatonNode, L: Letter, G: Letter> Display for PdaKey<Q, L, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.stack_top {
            Some(top) => write!(f, "({:?}, {:?}, {:?})", self.state, self.symbol, top),
            None => write!(f, "({:?}, {:?}, empty)", self.state, self.symbol),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PdaMove<Q: AutomatonNode, G: Letter> {
    pub target: Q,
    pub op: StackOp<G>,
}

impl<Q: AutomatonNode, G: Letter> Display for PdaMove<Q, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}, {}", self.target, self.op)
    }
}

/// One row of the transition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdaTransition<Q: AutomatonNode, L: Letter, G: Letter> {
    pub key: PdaKey<Q, L, G>,
    pub result: PdaMove<Q, G>,
}

impl<Q: AutomatonNode, L: Letter, G: Letter> PdaTransition<Q, L, G> {
    pub fn new(state: Q, symbol: L, stack_top: Option<G>, target: Q, op: StackOp<G>) -> Self {
        PdaTransition {
            key: PdaKey {
                state,
                symbol,
                stack_top,
            },
            result: PdaMove { target, op },
        }
    }
}

/// One input symbol consumed by a [PDA]. `result` is `None` if the table has
/// no entry for the key, which ends the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdaStep<Q: AutomatonNode, L: Letter, G: Letter> {
    pub key: PdaKey<Q, L, G>,
    pub result: Option<PdaMove<Q, G>>,
    /// Stack height after the step.
    pub stack_height: usize,
}

impl<Q: AutomatonNode, L: Letter, G: Letter> Display for PdaStep<Q, L, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.result {
            Some(result) => write!(
                f,
                "{} -> ({}) [height {}]",
                self.key, result, self.stack_height
            ),
            None => write!(f, "{} -> no transition", self.key),
        }
    }
}

/// A deterministic pushdown automaton driven by a transition table keyed by
/// (state, input symbol, stack top). There are no epsilon moves and the table
/// only ever looks at the topmost stack symbol.
///
/// A word is accepted if the run ends in a final state with an empty stack.
#[derive(Clone)]
pub struct PDA<Q: AutomatonNode, L: Letter, G: Letter> {
    states: HashSet<Q>,
    input_alphabet: Vec<L>,
    stack_alphabet: HashSet<G>,
    initial: Q,
    final_states: HashSet<Q>,
    transitions: HashMap<PdaKey<Q, L, G>, PdaMove<Q, G>>,
}

impl<Q: AutomatonNode, L: Letter, G: Letter> PDA<Q, L, G> {
    pub fn new(
        states: impl IntoIterator<Item = Q>,
        input_alphabet: impl IntoIterator<Item = L>,
        stack_alphabet: impl IntoIterator<Item = G>,
        initial: Q,
        final_states: impl IntoIterator<Item = Q>,
        transitions: impl IntoIterator<Item = PdaTransition<Q, L, G>>,
    ) -> ConfigResult<Self> {
        let states: HashSet<Q> = states.into_iter().collect();
        if states.is_empty() {
            return Err(ConfigurationError::NoStates);
        }

        let mut alphabet = vec![];
        for letter in input_alphabet {
            insert_letter(&mut alphabet, &letter);
        }

        let mut pda = PDA {
            states,
            input_alphabet: alphabet,
            stack_alphabet: stack_alphabet.into_iter().collect(),
            initial: initial.clone(),
            final_states: HashSet::new(),
            transitions: HashMap::new(),
        };

        pda.check_state(&initial)?;
        for state in final_states {
            pda.check_state(&state)?;
            pda.final_states.insert(state);
        }

        for transition in transitions {
            pda.add_transition(transition)?;
        }

        tracing::debug!(
            "Built PDA with {} states and {} transitions",
            pda.states.len(),
            pda.transitions.len()
        );

        Ok(pda)
    }

    /// Adds one row to the transition table after checking that it only uses
    /// declared states and symbols. A second, different row for the same key
    /// is a conflict.
    pub fn add_transition(&mut self, transition: PdaTransition<Q, L, G>) -> ConfigResult<()> {
        let PdaTransition { key, result } = transition;

        self.check_state(&key.state)?;
        self.check_state(&result.target)?;

        if self.input_alphabet.binary_search(&key.symbol).is_err() {
            return Err(ConfigurationError::UnknownInputSymbol(format!(
                "{:?}",
                key.symbol
            )));
        }

        if let Some(top) = &key.stack_top {
            self.check_stack_symbol(top)?;
        }
        if let Some(pushed) = result.op.pushed_symbol() {
            self.check_stack_symbol(pushed)?;
        }

        match self.transitions.entry(key) {
            Entry::Occupied(entry) => {
                if *entry.get() != result {
                    return Err(ConfigurationError::ConflictingTransition {
                        key: entry.key().to_string(),
                        existing: entry.get().to_string(),
                        new: result.to_string(),
                    });
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(result);
            }
        }

        Ok(())
    }

    fn check_state(&self, state: &Q) -> ConfigResult<()> {
        if self.states.contains(state) {
            Ok(())
        } else {
            Err(ConfigurationError::UnknownState(format!("{:?}", state)))
        }
    }

    fn check_stack_symbol(&self, symbol: &G) -> ConfigResult<()> {
        if self.stack_alphabet.contains(symbol) {
            Ok(())
        } else {
            Err(ConfigurationError::UnknownStackSymbol(format!("{:?}", symbol)))
        }
    }

    pub fn initial(&self) -> &Q {
        &self.initial
    }

    pub fn is_final(&self, state: &Q) -> bool {
        self.final_states.contains(state)
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn lookup(&self, state: &Q, symbol: &L, stack_top: Option<&G>) -> Option<&PdaMove<Q, G>> {
        self.transitions.get(&PdaKey {
            state: state.clone(),
            symbol: symbol.clone(),
            stack_top: stack_top.cloned(),
        })
    }

    /// Runs the automaton on `input`. Stops at the first symbol without a
    /// matching table entry.
    pub fn simulate<'a>(&self, input: impl IntoIterator<Item = &'a L>) -> bool
    where
        L: 'a,
    {
        self.simulate_traced(input, None)
    }

    fn simulate_traced<'a>(
        &self,
        input: impl IntoIterator<Item = &'a L>,
        mut trace: Option<&mut Vec<PdaStep<Q, L, G>>>,
    ) -> bool
    where
        L: 'a,
    {
        let mut state = &self.initial;
        let mut stack = Stack::new();

        for symbol in input {
            let found = self.lookup(state, symbol, stack.top());
            let stack_top = match trace {
                Some(_) => stack.top().cloned(),
                None => None,
            };

            if let Some(found) = found {
                stack.apply(&found.op);
            }

            if let Some(steps) = trace.as_deref_mut() {
                steps.push(PdaStep {
                    key: PdaKey {
                        state: state.clone(),
                        symbol: symbol.clone(),
                        stack_top,
                    },
                    result: found.cloned(),
                    stack_height: stack.len(),
                });
            }

            match found {
                Some(found) => state = &found.target,
                None => {
                    tracing::trace!(
                        "No transition for {:?} on {:?} with stack {}, rejecting",
                        state,
                        symbol,
                        stack
                    );
                    return false;
                }
            }
        }

        self.is_final(state) && stack.is_empty()
    }
}

impl<Q: AutomatonNode, L: Letter, G: Letter> Alphabet for PDA<Q, L, G> {
    type Letter = L;

    fn alphabet(&self) -> &[L] {
        &self.input_alphabet
    }
}

impl<Q: AutomatonNode, L: Letter, G: Letter> Language for PDA<Q, L, G> {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a L>) -> bool
    where
        L: 'a,
    {
        self.simulate(input)
    }
}

impl<Q: AutomatonNode, L: Letter, G: Letter> Traceable for PDA<Q, L, G> {
    type Step = PdaStep<Q, L, G>;

    fn run<'a>(&self, input: impl IntoIterator<Item = &'a L>) -> Run<PdaStep<Q, L, G>>
    where
        L: 'a,
    {
        let mut steps = vec![];
        let accepted = self.simulate_traced(input, Some(&mut steps));
        Run::new(accepted, steps)
    }
}

impl<Q: AutomatonNode, L: Letter, G: Letter> Debug for PDA<Q, L, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PDA")
            .field("states", &self.states)
            .field("input_alphabet", &self.input_alphabet)
            .field("stack_alphabet", &self.stack_alphabet)
            .field("initial_state", &self.initial)
            .field("final_states", &self.final_states)
            .field(
                "transitions",
                &self
                    .transitions
                    .iter()
                    .map(|(key, result)| format!("{} -> ({})", key, result))
                    .sorted()
                    .collect_vec(),
            )
            .finish()
    }
}
