use serde::{Deserialize, Serialize};
use recognizer_macros::config;

use crate::logger::LogLevel;

pub trait IntoOr<T> {
    fn into_or(self, or: T) -> T;
}

impl<T> IntoOr<Option<T>> for Option<T> {
    fn into_or(self, or: Option<T>) -> Option<T> {
        match self {
            Some(t) => Some(t),
            None => or,
        }
    }
}

impl<T> IntoOr<T> for Option<T> {
    fn into_or(self, or: T) -> T {
        self.unwrap_or(or)
    }
}

pub trait GeneralConfig {
    fn logger(&self) -> &LoggerConfig;
}

config! {
    pub struct LoggerConfig {
        enabled: bool = false,
        /// Mirror log output into `./logs/`.
        log_file: bool = false,
        log_level: LogLevel = LogLevel::Warn,
    }
}

/// What happens when a DFA transition is added for a (state, symbol) pair
/// that already has one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Fail with a configuration error if the destination differs.
    #[default]
    Reject,
    /// Last write wins.
    Overwrite,
}

config! {
    pub struct DfaConfig {
        duplicate_transitions: TransitionPolicy = TransitionPolicy::Reject,
    }
}

config! {
    pub struct TraceConfig {
        enabled: bool = false,
        color: bool = true,
    }
}

config! {
    /// Top level configuration of the recognizer driver.
    pub struct RecognizerConfig {
        logger: LoggerConfig (Option<PartialLoggerConfig> = LoggerConfig::default()),
        dfa: DfaConfig (Option<PartialDfaConfig> = DfaConfig::default()),
        trace: TraceConfig (Option<PartialTraceConfig> = TraceConfig::default()),
    }
}

impl GeneralConfig for RecognizerConfig {
    fn logger(&self) -> &LoggerConfig {
        &self.logger
    }
}
