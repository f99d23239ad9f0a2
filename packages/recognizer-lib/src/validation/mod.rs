use crate::automaton::{Language, Traceable};

pub mod same_language;

/// Asserts that tracing a run does not change its verdict and that the trace
/// never covers more symbols than the word has.
pub fn assert_run_matches_verdict<T: Traceable>(automaton: &T, word: &[T::Letter]) {
    let run = automaton.run(word);

    assert_eq!(
        run.accepted,
        automaton.accepts(word),
        "traced and untraced verdicts differ on {:?}",
        word
    );
    assert!(
        run.len() <= word.len(),
        "trace of {:?} has {} steps",
        word,
        run.len()
    );
}
