use itertools::Itertools;
use recognizer_lib::{
    automaton::{
        Alphabet, Language, Traceable,
        pda::{
            PDA, PdaTransition,
            presets::{A_N_B_C_N_WORDS, A_N_B_N_WORDS, PresetPDA, a_n_b_c_n, a_n_b_n},
            stack::StackOp,
        },
    },
    error::ConfigurationError,
    validation::{assert_run_matches_verdict, same_language::words_up_to},
};

fn chars(input: &str) -> Vec<char> {
    input.chars().collect_vec()
}

/// Counts a's and c's directly, for comparing against the presets.
fn is_a_n_b_c_n(word: &[char]) -> bool {
    let a = word.iter().take_while(|c| **c == 'a').count();
    a > 0 && word.len() == 2 * a + 1 && word[a] == 'b' && word[a + 1..].iter().all(|c| *c == 'c')
}

fn is_a_n_b_n(word: &[char]) -> bool {
    let a = word.iter().take_while(|c| **c == 'a').count();
    a > 0 && word.len() == 2 * a && word[a..].iter().all(|c| *c == 'b')
}

#[test]
fn test_a_n_b_c_n() {
    let pda = a_n_b_c_n();

    assert!(pda.simulate(&chars("aabcc")));
    assert!(pda.simulate(&chars("abc")));
    assert!(pda.simulate(&chars("aaabccc")));
    assert!(!pda.simulate(&chars("abbc")));
    assert!(!pda.simulate(&chars("abca")));
    assert!(!pda.simulate(&chars("aabc")));
    assert!(!pda.simulate(&chars("")));
}

#[test]
fn test_a_n_b_n() {
    let pda = a_n_b_n();

    assert!(pda.simulate(&chars("aabb")));
    assert!(pda.simulate(&chars("ab")));
    assert!(pda.simulate(&chars("aaabbb")));
    assert!(!pda.simulate(&chars("abb")));
    assert!(!pda.simulate(&chars("abab")));
    assert!(!pda.simulate(&chars("")));
}

#[test]
fn test_presets_match_their_languages() {
    let abc = a_n_b_c_n();
    let ab = a_n_b_n();

    for word in words_up_to(&['a', 'b', 'c'], 8) {
        assert_eq!(abc.accepts(&word), is_a_n_b_c_n(&word), "{:?}", word);
        assert_eq!(ab.accepts(&word), is_a_n_b_n(&word), "{:?}", word);
        assert_run_matches_verdict(&abc, &word);
    }
}

#[test]
fn test_demo_words() {
    let abc = a_n_b_c_n();
    let verdicts = A_N_B_C_N_WORDS
        .iter()
        .map(|w| abc.simulate(&chars(w)))
        .collect_vec();
    assert_eq!(verdicts, vec![true, true, false, true, false]);

    let ab = a_n_b_n();
    let verdicts = A_N_B_N_WORDS
        .iter()
        .map(|w| ab.simulate(&chars(w)))
        .collect_vec();
    assert_eq!(verdicts, vec![true, true, false, true, false]);
}

#[test]
fn test_final_state_with_non_empty_stack_rejects() {
    let pda = a_n_b_c_n();

    // ends in q3 with one X left
    let run = pda.run(&chars("aabc"));
    assert!(!run.accepted);
    assert_eq!(run.len(), 4);
    let last = run.last_step().unwrap();
    assert_eq!(last.result.as_ref().unwrap().target, "q3");
    assert_eq!(last.stack_height, 1);
}

#[test]
fn test_short_circuit_on_missing_transition() {
    let pda = a_n_b_n();

    let run = pda.run(&chars("abaab"));
    assert!(!run.accepted);
    assert_eq!(run.len(), 3);

    let last = run.last_step().unwrap();
    assert_eq!(last.key.state, "q2");
    assert_eq!(last.key.symbol, 'a');
    assert_eq!(last.key.stack_top, None);
    assert!(last.result.is_none());
}

#[test]
fn test_trace_records_stack_top_before_step() {
    let pda = a_n_b_n();
    let run = pda.run(&chars("aab"));

    assert_eq!(
        run.steps.iter().map(|s| s.key.stack_top).collect_vec(),
        vec![None, Some('X'), Some('X')]
    );
    assert_eq!(
        run.steps.iter().map(|s| s.stack_height).collect_vec(),
        vec![1, 2, 1]
    );
    assert_eq!(
        run.steps[0].to_string(),
        "(\"q0\", 'a', empty) -> (\"q1\", push 'X') [height 1]"
    );
}

#[test]
fn test_pop_on_empty_stack_is_noop() {
    // pops on an empty stack and still accepts with an empty stack
    let pda = PDA::new(
        [0, 1],
        ['a'],
        ['X'],
        0,
        [1],
        [
            PdaTransition::new(0, 'a', None, 1, StackOp::Pop),
            PdaTransition::new(1, 'a', None, 1, StackOp::Pop),
        ],
    )
    .unwrap();

    assert!(pda.simulate(&chars("aaa")));
    assert!(!pda.simulate(&chars("")));
}

#[test]
fn test_empty_word_on_final_initial_state() {
    let pda = PDA::new([0], ['a'], ['X'], 0, [0], []).unwrap();
    assert!(pda.simulate(&chars("")));
    assert!(!pda.simulate(&chars("a")));
}

#[test]
fn test_push_symbol_comes_from_transition() {
    // ( and [ must be closed in the right order
    let pda = PDA::new(
        ["open"],
        ['(', ')', '[', ']'],
        ['P', 'B'],
        "open",
        ["open"],
        [None, Some('P'), Some('B')].into_iter().flat_map(|top| {
            [
                PdaTransition::new("open", '(', top, "open", StackOp::Push('P')),
                PdaTransition::new("open", '[', top, "open", StackOp::Push('B')),
            ]
        })
        .chain([
            PdaTransition::new("open", ')', Some('P'), "open", StackOp::Pop),
            PdaTransition::new("open", ']', Some('B'), "open", StackOp::Pop),
        ]),
    )
    .unwrap();

    assert!(pda.simulate(&chars("([])[]")));
    assert!(!pda.simulate(&chars("([)]")));
    assert!(!pda.simulate(&chars("((")));
    assert_eq!(pda.alphabet(), &['(', ')', '[', ']']);
}

#[test]
fn test_pda_validation() {
    let build = |transitions: Vec<PdaTransition<&'static str, char, char>>| {
        PDA::new(["q0", "q1"], ['a'], ['X'], "q0", ["q1"], transitions)
    };

    assert_eq!(
        build(vec![PdaTransition::new("q0", 'a', None, "q9", StackOp::Keep)]).unwrap_err(),
        ConfigurationError::UnknownState("\"q9\"".into())
    );
    assert_eq!(
        build(vec![PdaTransition::new("q0", 'b', None, "q1", StackOp::Keep)]).unwrap_err(),
        ConfigurationError::UnknownInputSymbol("'b'".into())
    );
    assert_eq!(
        build(vec![PdaTransition::new("q0", 'a', Some('Y'), "q1", StackOp::Keep)]).unwrap_err(),
        ConfigurationError::UnknownStackSymbol("'Y'".into())
    );
    assert_eq!(
        build(vec![PdaTransition::new("q0", 'a', None, "q1", StackOp::Push('Z'))]).unwrap_err(),
        ConfigurationError::UnknownStackSymbol("'Z'".into())
    );

    let conflict = build(vec![
        PdaTransition::new("q0", 'a', None, "q1", StackOp::Keep),
        PdaTransition::new("q0", 'a', None, "q1", StackOp::Pop),
    ]);
    assert!(matches!(
        conflict,
        Err(ConfigurationError::ConflictingTransition { .. })
    ));

    let duplicate = build(vec![
        PdaTransition::new("q0", 'a', None, "q1", StackOp::Keep),
        PdaTransition::new("q0", 'a', None, "q1", StackOp::Keep),
    ])
    .unwrap();
    assert_eq!(duplicate.transition_count(), 1);

    assert_eq!(
        PDA::<&str, char, char>::new([], ['a'], ['X'], "q0", [], []).unwrap_err(),
        ConfigurationError::NoStates
    );
    assert!(PDA::<&str, char, char>::new(["q0"], ['a'], ['X'], "q0", ["q1"], []).is_err());
}

#[test]
fn test_pda_is_deterministic() {
    let pda = a_n_b_c_n();
    let word = chars("aaabccc");

    let first = pda.run(&word);
    for _ in 0..10 {
        assert_eq!(pda.run(&word), first);
    }
}

#[test]
fn test_pda_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PresetPDA>();

    let pda = a_n_b_c_n();
    let verdicts = std::thread::scope(|scope| {
        A_N_B_C_N_WORDS
            .iter()
            .map(|w| {
                let (pda, word) = (&pda, chars(w));
                scope.spawn(move || pda.simulate(&word))
            })
            .collect_vec()
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect_vec()
    });
    assert_eq!(verdicts, vec![true, true, false, true, false]);
}
