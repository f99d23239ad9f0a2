use std::io::{BufRead, Write};

use anyhow::Context;
use recognizer_lib::{
    automaton::{
        Language, StateId, Traceable,
        dfa::DFA,
        nfa::{NFA, NFAEdge},
        pda::presets::{A_N_B_C_N_WORDS, A_N_B_N_WORDS, PresetPDA, a_n_b_c_n, a_n_b_n},
    },
    config::RecognizerConfig,
};

use crate::{prompt::Prompter, render::Renderer};

/// The part of the questionnaire shared by the DFA and NFA sessions.
struct Header {
    state_count: usize,
    initial: StateId,
    final_states: Vec<StateId>,
}

fn read_header<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    kind: &str,
) -> anyhow::Result<Header> {
    let state_count: usize = p.number(&format!("Enter the number of states in the {}: ", kind))?;
    let initial = p.number(&format!(
        "Enter the initial state (0 to {}): ",
        state_count.saturating_sub(1)
    ))?;

    let final_count: usize = p.number("Enter the number of final states: ")?;
    let final_states = (1..=final_count)
        .map(|i| p.number(&format!("Final state {}: ", i)))
        .collect::<anyhow::Result<Vec<StateId>>>()?;

    Ok(Header {
        state_count,
        initial,
        final_states,
    })
}

pub fn dfa_session<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    config: &RecognizerConfig,
    graphviz: bool,
) -> anyhow::Result<bool> {
    let header = read_header(p, "DFA")?;
    let mut dfa = DFA::new(header.state_count, header.initial, header.final_states)
        .context("invalid DFA")?
        .with_policy(*config.get_dfa().get_duplicate_transitions());

    let transition_count: usize = p.number("Enter the number of transitions: ")?;
    for i in 1..=transition_count {
        let origin = p.number(&format!("Transition {} - origin state: ", i))?;
        let symbol = p.symbol(&format!("Transition {} - symbol: ", i))?;
        let destination = p.number(&format!("Transition {} - destination state: ", i))?;

        dfa.add_transition(origin, symbol, destination)
            .with_context(|| format!("invalid transition {}", i))?;
    }

    tracing::debug!("built {:?}", dfa);
    if graphviz {
        writeln!(p.output(), "{}", dfa.to_graphviz())?;
    }

    let word = p.line("Enter the string to check: ")?;
    let input = word.chars().collect::<Vec<_>>();

    let renderer = Renderer::from_config(config.get_trace());
    let accepted = if renderer.trace_enabled() {
        let run = dfa.run(&input);
        renderer.dfa_run(p.output(), &dfa, &run)?;
        run.accepted
    } else {
        dfa.accepts(&input)
    };

    writeln!(
        p.output(),
        "String '{}' is {} by the DFA.",
        word,
        renderer.verdict(accepted)
    )?;
    Ok(accepted)
}

pub fn nfa_session<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    config: &RecognizerConfig,
    graphviz: bool,
) -> anyhow::Result<bool> {
    let header = read_header(p, "NFA")?;
    let mut nfa = NFA::new(header.state_count, header.initial, header.final_states)
        .context("invalid NFA")?;

    let transition_count: usize = p.number("Enter the number of transitions: ")?;
    for i in 1..=transition_count {
        let origin = p.number(&format!("Transition {} - origin state: ", i))?;
        let symbol = p.optional_symbol(&format!(
            "Transition {} - symbol (leave blank for epsilon): ",
            i
        ))?;
        let destination = p.number(&format!("Transition {} - destination state: ", i))?;

        nfa.add_transition(origin, NFAEdge::from(symbol), destination)
            .with_context(|| format!("invalid transition {}", i))?;
    }

    tracing::debug!("built {:?}", nfa);
    if graphviz {
        writeln!(p.output(), "{}", nfa.to_graphviz())?;
    }

    let word = p.line("Enter the string to check: ")?;
    let input = word.chars().collect::<Vec<_>>();

    let renderer = Renderer::from_config(config.get_trace());
    let accepted = if renderer.trace_enabled() {
        let run = nfa.run(&input);
        renderer.nfa_run(p.output(), &nfa, &run)?;
        run.accepted
    } else {
        nfa.accepts(&input)
    };

    writeln!(
        p.output(),
        "String '{}' is {} by the NFA.",
        word,
        renderer.verdict(accepted)
    )?;
    Ok(accepted)
}

/// Runs both preset PDAs over their demonstration words and returns the
/// verdicts in order.
pub fn pda_demo(out: &mut impl Write, config: &RecognizerConfig) -> anyhow::Result<Vec<bool>> {
    let renderer = Renderer::from_config(config.get_trace());
    let presets: [(&str, PresetPDA, &[&str]); 2] = [
        ("a^n b c^n", a_n_b_c_n(), &A_N_B_C_N_WORDS),
        ("a^n b^n", a_n_b_n(), &A_N_B_N_WORDS),
    ];

    let mut verdicts = Vec::new();
    for (name, pda, words) in presets {
        writeln!(out, "Testing {}:", name)?;

        for word in words {
            let input = word.chars().collect::<Vec<_>>();
            let accepted = if renderer.trace_enabled() {
                let run = pda.run(&input);
                renderer.pda_run(out, &run)?;
                run.accepted
            } else {
                pda.simulate(&input)
            };

            writeln!(out, "String '{}' is {}.", word, renderer.verdict(accepted))?;
            verdicts.push(accepted);
        }
    }

    Ok(verdicts)
}
