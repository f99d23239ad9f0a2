use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

use hashbrown::HashSet;

use crate::automaton::trace::Run;

pub mod dfa;
pub mod nfa;
pub mod node;
pub mod pda;
pub mod trace;
pub mod utils;

/// Index of a state in a [dfa::DFA] or [nfa::NFA]. States are numbered
/// `0..state_count`.
pub type StateId = usize;

/// A set of states of an [nfa::NFA].
pub type StateSet = HashSet<StateId>;

/// This trait represents types that can be used as state labels in an
/// automaton.
pub trait AutomatonNode: Debug + Clone + PartialEq + Eq + Hash {}
impl<T> AutomatonNode for T where T: Debug + Clone + PartialEq + Eq + Hash {}

/// Types that can be read by an automaton, both input and stack symbols.
pub trait Letter: Debug + Clone + PartialEq + Eq + Hash + Ord {}

impl<T: Debug + Clone + PartialEq + Eq + Hash + Ord> Letter for T {}

pub trait Alphabet {
    type Letter: Letter;

    /// The letters this automaton knows about, sorted.
    fn alphabet(&self) -> &[Self::Letter];
}

/// The basic trait for anything that defines a language over a set alphabet.
pub trait Language: Alphabet {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a Self::Letter>) -> bool
    where
        Self::Letter: 'a;
}

/// A [Language] that can report every step it takes while deciding a word.
///
/// `run(w).accepted == accepts(w)` for every word `w`.
pub trait Traceable: Language {
    type Step: Debug + Clone + Display;

    fn run<'a>(&self, input: impl IntoIterator<Item = &'a Self::Letter>) -> Run<Self::Step>
    where
        Self::Letter: 'a;
}

/// Inserts `letter` into a sorted, duplicate free alphabet.
pub(crate) fn insert_letter<L: Letter>(alphabet: &mut Vec<L>, letter: &L) {
    if let Err(position) = alphabet.binary_search(letter) {
        alphabet.insert(position, letter.clone());
    }
}

#[test]
fn test_insert_letter() {
    let mut alphabet = vec![];
    for letter in ['c', 'a', 'c', 'b', 'a'] {
        insert_letter(&mut alphabet, &letter);
    }
    assert_eq!(alphabet, vec!['a', 'b', 'c']);
}
