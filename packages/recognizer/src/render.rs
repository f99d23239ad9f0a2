use std::io::Write;

use colored::Colorize;
use recognizer_lib::{
    automaton::{
        AutomatonNode, Letter,
        dfa::{DFA, DfaStep},
        nfa::{NFA, NfaStep},
        pda::PdaStep,
        trace::{Run, format_state, format_state_set},
    },
    config::TraceConfig,
};

/// Writes simulation traces and verdicts for a human reader.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    trace: bool,
    color: bool,
}

impl Renderer {
    pub fn new(trace: bool, color: bool) -> Self {
        Renderer { trace, color }
    }

    pub fn from_config(config: &TraceConfig) -> Self {
        Renderer::new(*config.get_enabled(), *config.get_color())
    }

    pub fn trace_enabled(&self) -> bool {
        self.trace
    }

    pub fn verdict(&self, accepted: bool) -> String {
        match (accepted, self.color) {
            (true, true) => "accepted".green().bold().to_string(),
            (false, true) => "rejected".red().bold().to_string(),
            (true, false) => "accepted".to_string(),
            (false, false) => "rejected".to_string(),
        }
    }

    fn highlight(&self, text: String) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text
        }
    }

    fn failure(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dfa_run<L: Letter>(
        &self,
        out: &mut impl Write,
        dfa: &DFA<L>,
        run: &Run<DfaStep<L>>,
    ) -> anyhow::Result<()> {
        writeln!(
            out,
            "Initial state: {}",
            self.highlight(format_state(dfa.initial()))
        )?;

        for step in &run.steps {
            match step.to {
                Some(to) => writeln!(
                    out,
                    "Processing symbol {:?} in state {} -> new state: {}",
                    step.symbol,
                    format_state(step.from),
                    self.highlight(format_state(to))
                )?,
                None => writeln!(
                    out,
                    "Processing symbol {:?} in state {} -> {}",
                    step.symbol,
                    format_state(step.from),
                    self.failure("invalid transition.")
                )?,
            }
        }

        let last = match run.last_step() {
            Some(step) => step.to,
            None => Some(dfa.initial()),
        };
        if let Some(state) = last {
            let status = if dfa.is_accepting(state) { "is" } else { "is not" };
            writeln!(
                out,
                "Final state {} {} a final state.",
                format_state(state),
                status
            )?;
        }

        Ok(())
    }

    pub fn nfa_run<L: Letter>(
        &self,
        out: &mut impl Write,
        nfa: &NFA<L>,
        run: &Run<NfaStep<L>>,
    ) -> anyhow::Result<()> {
        writeln!(
            out,
            "Initial states: {}",
            self.highlight(format_state_set(&nfa.initial_closure()))
        )?;

        for step in &run.steps {
            if step.to.is_empty() {
                writeln!(
                    out,
                    "Processing symbol {:?} in {} -> {}",
                    step.symbol,
                    format_state_set(&step.from),
                    self.failure("no reachable state.")
                )?;
            } else {
                writeln!(
                    out,
                    "Processing symbol {:?} in {} -> new states: {}",
                    step.symbol,
                    format_state_set(&step.from),
                    self.highlight(format_state_set(&step.to))
                )?;
            }
        }

        let last = match run.last_step() {
            Some(step) => step.to.clone(),
            None => nfa.initial_closure(),
        };
        if !last.is_empty() {
            let status = if nfa.is_accepting_set(&last) {
                "contain"
            } else {
                "do not contain"
            };
            writeln!(
                out,
                "Final states {} {} a final state.",
                format_state_set(&last),
                status
            )?;
        }

        Ok(())
    }

    pub fn pda_run<Q: AutomatonNode, L: Letter, G: Letter>(
        &self,
        out: &mut impl Write,
        run: &Run<PdaStep<Q, L, G>>,
    ) -> anyhow::Result<()> {
        for step in &run.steps {
            match &step.result {
                Some(result) => writeln!(
                    out,
                    "  {} -> {} [stack height {}]",
                    step.key,
                    self.highlight(result.to_string()),
                    step.stack_height
                )?,
                None => writeln!(
                    out,
                    "  {} -> {}",
                    step.key,
                    self.failure("invalid transition.")
                )?,
            }
        }

        Ok(())
    }
}
