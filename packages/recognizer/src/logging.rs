use std::{
    fmt,
    fs::{self, File},
    sync::Mutex,
};

use anyhow::Context;
use chrono::Local;
use colored::Colorize;
use recognizer_lib::{config::LoggerConfig, logger::LogLevel};
use tracing::{Event, Subscriber};
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{FmtContext, FormatEvent, FormatFields, format::Writer},
    prelude::*,
    registry::LookupSpan,
};

/// Formats events as `[DBG] Recognizer: message`.
struct TagFormat {
    name: String,
    color: bool,
}

impl TagFormat {
    fn new(name: &str, color: bool) -> Self {
        TagFormat {
            name: name.to_string(),
            color,
        }
    }

    fn prefix(&self, level: LogLevel) -> String {
        if self.color {
            format!("[{}] {} ", level.tag(), format!("{}:", self.name).dimmed())
        } else {
            format!("[{}] {}: ", level.tag_no_color(), self.name)
        }
    }
}

impl<S, N> FormatEvent<S, N> for TagFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let level = LogLevel::from(*event.metadata().level());
        write!(writer, "{}", self.prefix(level))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn log_file_path() -> String {
    format!(
        "./logs/recognizer_run_{}.txt",
        Local::now().format("%Y-%m-%d_%H-%M-%S")
    )
}

/// Installs the global subscriber described by `config`. Nothing is
/// installed when logging is disabled, so library events are dropped.
/// `color` only affects stderr; the log file is always plain.
pub fn init(config: &LoggerConfig, name: &str, color: bool) -> anyhow::Result<()> {
    if !*config.get_enabled() {
        return Ok(());
    }

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(TagFormat::new(name, color))
        .with_ansi(color)
        .with_writer(std::io::stderr);

    let file_layer = if *config.get_log_file() {
        fs::create_dir_all("./logs").context("failed to create log directory")?;
        let path = log_file_path();
        let file = File::create(&path).with_context(|| format!("failed to create {}", path))?;

        Some(
            tracing_subscriber::fmt::layer()
                .event_format(TagFormat::new(name, false))
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
    } else {
        None
    };

    let level: tracing::Level = (*config.get_log_level()).into();
    tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install log subscriber")?;

    tracing::debug!("logging at level {}", config.get_log_level());
    Ok(())
}
