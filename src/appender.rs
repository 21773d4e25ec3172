use crate::app::config::{Config, ConfigError};
use crate::chunker::{ChunkSettings, Chunker};
use crate::domain::LogEvent;
use crate::sink::{SinkError, SinkRegistry};
use std::num::NonZeroUsize;

/// Splits oversized events and forwards every produced event to the attached sinks.
///
/// The appender is not reentrant: settings change through `&mut self` between calls.
/// Sinks can be attached or detached through [`ChunkAppender::sinks`] at any time.
#[derive(Debug, Default)]
pub struct ChunkAppender {
    chunker: Chunker,
    sinks: SinkRegistry,
}

impl ChunkAppender {
    pub fn new(settings: ChunkSettings) -> Self {
        Self {
            chunker: Chunker::new(settings),
            sinks: SinkRegistry::new(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(config.chunk_settings()?))
    }

    pub fn sinks(&self) -> &SinkRegistry {
        &self.sinks
    }

    pub fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.chunker.set_enabled(enabled);
    }

    pub fn set_max_length(&mut self, max_length: NonZeroUsize) {
        self.chunker.set_max_length(max_length);
    }

    pub fn set_sequence_key(&mut self, sequence_key: impl Into<String>) {
        self.chunker.set_sequence_key(sequence_key);
    }

    /// Chunks `event` and delivers the parts in order. Returns the number of parts.
    ///
    /// Delivery stops at the first part some sink failed on.
    pub fn append(&self, event: LogEvent) -> Result<usize, SinkError> {
        let parts = self.chunker.process(event);
        for part in &parts {
            self.sinks.deliver(part)?;
        }
        Ok(parts.len())
    }
}
