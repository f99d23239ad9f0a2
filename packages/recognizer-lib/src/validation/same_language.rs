use itertools::{Itertools, repeat_n};

use crate::automaton::{Language, Letter, insert_letter};

/// The union of both alphabets. Automata that learn their alphabet from their
/// transitions may know different letters even if their languages agree.
fn joint_alphabet<L: Letter>(
    a: &impl Language<Letter = L>,
    b: &impl Language<Letter = L>,
) -> Vec<L> {
    let mut alphabet = a.alphabet().to_vec();
    for letter in b.alphabet() {
        insert_letter(&mut alphabet, letter);
    }
    alphabet
}

/// All words over `alphabet` with a length below `max_word_length`, shortest
/// first. The empty word is always included.
pub fn words_up_to<L: Letter>(
    alphabet: &[L],
    max_word_length: usize,
) -> impl Iterator<Item = Vec<L>> + '_ {
    (0..max_word_length.max(1)).flat_map(move |length| {
        repeat_n(alphabet, length)
            .multi_cartesian_product()
            .map(|word| word.into_iter().cloned().collect_vec())
    })
}

/// Returns the first word on which `a` and `b` disagree.
pub fn find_difference<L: Letter>(
    a: &impl Language<Letter = L>,
    b: &impl Language<Letter = L>,
    max_word_length: usize,
) -> Option<Vec<L>> {
    let alphabet = joint_alphabet(a, b);

    words_up_to(&alphabet, max_word_length).find(|word| a.accepts(word) != b.accepts(word))
}

/// Checks if two automata accept the same words up to a certain length.
pub fn same_language<L: Letter>(
    a: &impl Language<Letter = L>,
    b: &impl Language<Letter = L>,
    max_word_length: usize,
) -> bool {
    find_difference(a, b, max_word_length).is_none()
}

pub fn assert_same_language<L: Letter>(
    a: &impl Language<Letter = L>,
    b: &impl Language<Letter = L>,
    max_word_length: usize,
) {
    if let Some(word) = find_difference(a, b, max_word_length) {
        if a.accepts(&word) {
            panic!(
                "{:?} is accepted by automaton `a` but not by automaton `b`. Thus their languages are not equal.",
                word
            );
        } else {
            panic!(
                "{:?} is accepted by automaton `b` but not by automaton `a`. Thus their languages are not equal.",
                word
            );
        }
    }
}

/// Assert that the language accepted by automaton `a` is the inverse of the
/// language accepted by automaton `b`. Meaning no word is accepted by both and
/// no word is accepted by none.
pub fn assert_inverse_language<L: Letter>(
    a: &impl Language<Letter = L>,
    b: &impl Language<Letter = L>,
    max_word_length: usize,
) {
    let alphabet = joint_alphabet(a, b);

    for word in words_up_to(&alphabet, max_word_length) {
        match (a.accepts(&word), b.accepts(&word)) {
            (true, true) => panic!(
                "{:?} is accepted by automaton `a` and by automaton `b`. Thus their languages are not inverse.",
                word
            ),
            (false, false) => panic!(
                "{:?} is accepted by neither automaton. Thus their languages are not inverse.",
                word
            ),
            _ => {}
        }
    }
}

#[test]
fn test_words_up_to() {
    let words = words_up_to(&['a', 'b'], 3).collect_vec();
    assert_eq!(words.len(), 1 + 2 + 4);
    assert_eq!(words[0], Vec::<char>::new());
    assert_eq!(words[3], vec!['a', 'a']);
}
