pub mod config;
pub mod tracing;

pub use config::{Config, ConfigError, LogFormat, LogLevel};

use crate::appender::ChunkAppender;
use crate::domain::LogEvent;
use crate::sink::JsonLinesSink;
use anyhow::Context;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::Arc;

/// Counters of one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub events_in: usize,
    pub events_out: usize,
    pub malformed: usize,
}

/// Reads one JSON `LogEvent` per line from `input` and appends each to `appender`.
///
/// Blank lines are skipped. Lines that do not parse are logged and counted. A sink
/// failure aborts the run.
pub fn run<R: BufRead>(appender: &ChunkAppender, input: R) -> anyhow::Result<RunStats> {
    let mut stats = RunStats::default();

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("Failed to read input line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }

        let event: LogEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(e) => {
                ::tracing::warn!(line = line_no, error = %e, "Skipping malformed event");
                stats.malformed += 1;
                continue;
            }
        };

        stats.events_in += 1;
        stats.events_out += appender
            .append(event)
            .with_context(|| format!("Failed to deliver event from line {line_no}"))?;
    }

    Ok(stats)
}

/// Application entry point: configuration, tracing, then the stdin/stdout pipeline.
pub fn main() -> anyhow::Result<()> {
    let config = Config::from_args_and_file(std::env::args_os())?;
    tracing::init_tracing(config.log_level, config.log_format)
        .context("Failed to initialize tracing")?;

    ::tracing::info!(
        enabled = config.enabled,
        max_length = config.max_length,
        sequence_key = %config.sequence_key,
        "Loaded configuration"
    );

    let appender = ChunkAppender::from_config(&config)?;
    appender.sinks().add_sink("stdout", Arc::new(JsonLinesSink::new("stdout", io::stdout())));

    let stats = match &config.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input {}", path.display()))?;
            run(&appender, BufReader::new(file))?
        }
        None => run(&appender, io::stdin().lock())?,
    };

    ::tracing::info!(
        events_in = stats.events_in,
        events_out = stats.events_out,
        malformed = stats.malformed,
        "Finished"
    );
    Ok(())
}
