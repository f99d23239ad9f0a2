use std::{fmt::Display, io, str::FromStr};

use clap::Parser;
use recognizer_lib::config::{GeneralConfig, RecognizerConfig};

use crate::prompt::Prompter;

mod logging;
mod prompt;
mod render;
mod session;

/// Which kind of automaton to build and run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Dfa,
    Nfa,
    Pda,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dfa" => Ok(Mode::Dfa),
            "nfa" => Ok(Mode::Nfa),
            "pda" => Ok(Mode::Pda),
            _ => Err(format!("Invalid mode: {}", s)),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Dfa => write!(f, "dfa"),
            Mode::Nfa => write!(f, "nfa"),
            Mode::Pda => write!(f, "pda"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "Recognizer")]
#[command(version = "0.1")]
#[command(about = "Check words against DFAs, NFAs and pushdown automata", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = Mode::Dfa)]
    mode: Mode,

    #[arg(short, long)]
    config: Option<String>,

    /// Print every step of the run before the verdict.
    #[arg(short, long)]
    trace: bool,

    /// Print the constructed automaton in Graphviz format.
    #[arg(short, long)]
    graphviz: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = RecognizerConfig::from_optional_file(args.config)?;
    if args.trace {
        let trace = config.get_trace().clone().with_enabled(true);
        config.set_trace(trace);
    }

    logging::init(
        config.logger(),
        "Recognizer",
        *config.get_trace().get_color(),
    )?;
    tracing::info!("running in {} mode", args.mode);

    match args.mode {
        Mode::Dfa => {
            let mut prompter = Prompter::new(io::stdin().lock(), io::stdout().lock());
            session::dfa_session(&mut prompter, &config, args.graphviz)?;
        }
        Mode::Nfa => {
            let mut prompter = Prompter::new(io::stdin().lock(), io::stdout().lock());
            session::nfa_session(&mut prompter, &config, args.graphviz)?;
        }
        Mode::Pda => {
            session::pda_demo(&mut io::stdout().lock(), &config)?;
        }
    }

    Ok(())
}

#[test]
fn test_mode_parsing() {
    assert_eq!("NFA".parse::<Mode>(), Ok(Mode::Nfa));
    assert_eq!(Mode::Pda.to_string().parse::<Mode>(), Ok(Mode::Pda));
    assert!("tm".parse::<Mode>().is_err());
}
