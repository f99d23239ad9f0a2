use itertools::Itertools;
use recognizer_lib::{
    automaton::{
        Language, StateSet, Traceable,
        dfa::DFA,
        nfa::{NFA, NFAEdge},
    },
    error::ConfigurationError,
    validation::{
        assert_run_matches_verdict,
        same_language::{assert_inverse_language, assert_same_language, words_up_to},
    },
};

fn chars(input: &str) -> Vec<char> {
    input.chars().collect_vec()
}

fn set(states: &[usize]) -> StateSet {
    states.iter().copied().collect()
}

/// q0 -ε-> q1 -a-> q2, final q2
fn epsilon_then_a() -> NFA<char> {
    let mut nfa = NFA::new(3, 0, [2]).unwrap();
    nfa.add_transition(0, NFAEdge::Epsilon, 1).unwrap();
    nfa.add_transition(1, NFAEdge::Symbol('a'), 2).unwrap();
    nfa
}

/// Words over {a, b} that end in "ab", with epsilon shortcuts.
fn ends_in_ab() -> NFA<char> {
    let mut nfa = NFA::new(5, 0, [4]).unwrap();
    nfa.add_transition(0, Some('a'), 0).unwrap();
    nfa.add_transition(0, Some('b'), 0).unwrap();
    nfa.add_transition(0, NFAEdge::Epsilon, 1).unwrap();
    nfa.add_transition(1, Some('a'), 2).unwrap();
    nfa.add_transition(2, NFAEdge::Epsilon, 3).unwrap();
    nfa.add_transition(3, Some('b'), 4).unwrap();
    nfa
}

#[test]
fn test_nfa_epsilon_scenario() {
    let nfa = epsilon_then_a();

    assert!(nfa.accepts(&chars("a")));
    assert!(!nfa.accepts(&chars("")));
    assert!(!nfa.accepts(&chars("aa")));
    assert!(!nfa.accepts(&chars("b")));
}

#[test]
fn test_nfa_empty_word_uses_closure() {
    let mut nfa = NFA::<char>::new(3, 0, [2]).unwrap();
    nfa.add_transition(0, NFAEdge::Epsilon, 1).unwrap();
    nfa.add_transition(1, NFAEdge::Epsilon, 2).unwrap();

    assert_eq!(nfa.initial_closure(), set(&[0, 1, 2]));
    assert!(nfa.accepts(&chars("")));
}

#[test]
fn test_epsilon_closure() {
    let nfa = ends_in_ab();

    assert_eq!(nfa.epsilon_closure(&set(&[0])), set(&[0, 1]));
    assert_eq!(nfa.epsilon_closure(&set(&[2])), set(&[2, 3]));
    assert_eq!(nfa.epsilon_closure(&set(&[4])), set(&[4]));
    assert_eq!(nfa.epsilon_closure(&set(&[])), set(&[]));
}

#[test]
fn test_epsilon_closure_cycle() {
    let mut nfa = NFA::<char>::new(4, 0, [3]).unwrap();
    nfa.add_transition(0, NFAEdge::Epsilon, 1).unwrap();
    nfa.add_transition(1, NFAEdge::Epsilon, 2).unwrap();
    nfa.add_transition(2, NFAEdge::Epsilon, 0).unwrap();
    nfa.add_transition(2, NFAEdge::Symbol('x'), 3).unwrap();

    assert_eq!(nfa.epsilon_closure(&set(&[1])), set(&[0, 1, 2]));
    assert!(nfa.accepts(&chars("x")));
}

#[test]
fn test_epsilon_closure_is_idempotent() {
    let nfa = ends_in_ab();

    for subset in (0..nfa.state_count()).powerset() {
        let states: StateSet = subset.into_iter().collect();
        let closure = nfa.epsilon_closure(&states);

        assert!(states.is_subset(&closure));
        assert_eq!(nfa.epsilon_closure(&closure), closure);
    }
}

#[test]
fn test_nfa_step() {
    let nfa = ends_in_ab();

    assert_eq!(nfa.step(&set(&[0, 1]), &'a'), set(&[0, 2]));
    assert_eq!(nfa.step(&set(&[3]), &'a'), set(&[]));
    assert_eq!(nfa.step(&set(&[]), &'a'), set(&[]));
}

#[test]
fn test_nfa_duplicate_transitions_accumulate() {
    let mut nfa = NFA::<char>::new(3, 0, [2]).unwrap();
    nfa.add_transition(0, Some('a'), 1).unwrap();
    nfa.add_transition(0, Some('a'), 2).unwrap();
    nfa.add_transition(0, Some('a'), 2).unwrap();

    assert_eq!(nfa.transition_count(), 2);
    assert_eq!(nfa.step(&set(&[0]), &'a'), set(&[1, 2]));
}

#[test]
fn test_nfa_trace() {
    let nfa = ends_in_ab();
    let run = nfa.run(&chars("bab"));

    assert!(run.accepted);
    assert_eq!(
        run.steps.iter().map(|s| (s.from.clone(), s.to.clone())).collect_vec(),
        vec![
            (set(&[0, 1]), set(&[0, 1])),
            (set(&[0, 1]), set(&[0, 1, 2, 3])),
            (set(&[0, 1, 2, 3]), set(&[0, 1, 4])),
        ]
    );
    assert_eq!(
        run.steps[2].to_string(),
        "{q0, q1, q2, q3} --'b'--> {q0, q1, q4}"
    );
}

#[test]
fn test_nfa_short_circuits_on_empty_set() {
    let nfa = epsilon_then_a();
    let run = nfa.run(&chars("aaa"));

    assert!(!run.accepted);
    assert_eq!(run.len(), 2);
    assert!(run.last_step().unwrap().to.is_empty());
}

#[test]
fn test_nfa_same_language_as_dfa() {
    let nfa = ends_in_ab();

    // q0: last letter was not a, q1: last letter was a, q2: ended in ab
    let mut dfa = DFA::new(3, 0, [2]).unwrap();
    dfa.add_transition(0, 'a', 1).unwrap();
    dfa.add_transition(0, 'b', 0).unwrap();
    dfa.add_transition(1, 'a', 1).unwrap();
    dfa.add_transition(1, 'b', 2).unwrap();
    dfa.add_transition(2, 'a', 1).unwrap();
    dfa.add_transition(2, 'b', 0).unwrap();

    assert_same_language(&nfa, &dfa, 7);

    let mut complement = DFA::new(3, 0, [0, 1]).unwrap();
    complement.add_transition(0, 'a', 1).unwrap();
    complement.add_transition(0, 'b', 0).unwrap();
    complement.add_transition(1, 'a', 1).unwrap();
    complement.add_transition(1, 'b', 2).unwrap();
    complement.add_transition(2, 'a', 1).unwrap();
    complement.add_transition(2, 'b', 0).unwrap();

    assert_inverse_language(&nfa, &complement, 7);
}

#[test]
fn test_nfa_trace_matches_verdict() {
    let nfa = ends_in_ab();

    for word in words_up_to(&['a', 'b'], 6) {
        assert_run_matches_verdict(&nfa, &word);
    }
}

#[test]
fn test_nfa_rejects_invalid_states() {
    assert_eq!(
        NFA::<char>::new(0, 0, []).unwrap_err(),
        ConfigurationError::NoStates
    );
    assert!(NFA::<char>::new(3, 3, []).is_err());
    assert!(NFA::<char>::new(3, 0, [7]).is_err());

    let mut nfa = NFA::<char>::new(2, 0, [1]).unwrap();
    assert_eq!(
        nfa.add_transition(0, NFAEdge::Epsilon, 2).unwrap_err(),
        ConfigurationError::StateOutOfRange {
            state: 2,
            state_count: 2
        }
    );
}

#[test]
fn test_nfa_too_many_states() {
    assert!(matches!(
        NFA::<char>::new(usize::MAX, 0, []),
        Err(ConfigurationError::TooManyStates { .. })
    ));
}

#[cfg(target_pointer_width = "64")]
#[test]
fn test_nfa_unknown_state_ids_do_not_wrap() {
    let mut nfa = NFA::new(2, 0, [1]).unwrap();
    nfa.add_transition(0, NFAEdge::Epsilon, 1).unwrap();
    nfa.add_transition(0, Some('a'), 1).unwrap();

    let far = 1usize << 32;
    assert_eq!(nfa.epsilon_closure(&set(&[far])), set(&[far]));
    assert_eq!(nfa.epsilon_closure(&set(&[0, far])), set(&[0, 1, far]));
    assert_eq!(nfa.step(&set(&[far]), &'a'), set(&[]));
    assert!(!nfa.is_accepting(far + 1));
    assert!(!nfa.is_accepting_set(&set(&[far + 1])));
}

#[test]
fn test_nfa_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NFA<char>>();
}
