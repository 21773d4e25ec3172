//! Event chunking.
//!
//! A [`Chunker`] takes one [`LogEvent`] and returns the events to forward in its place:
//! the event itself when nothing is too long, message windows when the formatted message
//! exceeds `max_length`, or frame groups when the stack trace does. Only one of the two
//! split paths is taken for an event; a message split drops the throwable.

pub mod cloner;
pub mod split;

pub use cloner::{clone_with_frames, clone_with_message};
pub use split::{group_frames, split_by_length};

use crate::domain::{ChunkError, LogEvent};
use std::num::NonZeroUsize;
use tracing::{trace, warn};

pub const DEFAULT_MAX_LENGTH: NonZeroUsize = match NonZeroUsize::new(8192) {
    Some(n) => n,
    None => unreachable!(),
};
pub const DEFAULT_SEQUENCE_KEY: &str = "seq";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSettings {
    pub enabled: bool,
    /// Chunk size and split threshold, in characters.
    pub max_length: NonZeroUsize,
    /// MDC key receiving the 1-based sequence number of each derived event.
    pub sequence_key: String,
}

impl Default for ChunkSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_length: DEFAULT_MAX_LENGTH,
            sequence_key: DEFAULT_SEQUENCE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Chunker {
    settings: ChunkSettings,
}

impl Chunker {
    pub fn new(settings: ChunkSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ChunkSettings {
        &self.settings
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.settings.enabled = enabled;
    }

    pub fn set_max_length(&mut self, max_length: NonZeroUsize) {
        self.settings.max_length = max_length;
    }

    pub fn set_sequence_key(&mut self, sequence_key: impl Into<String>) {
        self.settings.sequence_key = sequence_key.into();
    }

    /// Returns the events to forward in place of `event`, in delivery order.
    pub fn process(&self, event: LogEvent) -> Vec<LogEvent> {
        if !self.settings.enabled {
            return vec![event];
        }
        if self.should_split_message(&event) {
            self.split_message(&event)
        } else if self.should_split_stack_trace(&event) {
            self.split_stack_trace(event)
        } else {
            vec![event]
        }
    }

    pub fn should_split_message(&self, event: &LogEvent) -> bool {
        event.message_length() > self.settings.max_length.get()
    }

    pub fn should_split_stack_trace(&self, event: &LogEvent) -> bool {
        event.stack_trace_length() > self.settings.max_length.get()
    }

    /// One event per message window, tagged 1..N. The throwable is not carried over.
    pub fn split_message(&self, event: &LogEvent) -> Vec<LogEvent> {
        let windows = split_by_length(&event.message, self.settings.max_length);
        trace!(
            logger = %event.logger_name,
            parts = windows.len(),
            "Splitting message"
        );

        windows
            .into_iter()
            .enumerate()
            .map(|(idx, window)| {
                let mut part = clone_with_message(event, window);
                self.tag(&mut part, idx + 1);
                part
            })
            .collect()
    }

    /// One event per frame group, tagged 1..N, each carrying only its own frames.
    ///
    /// Falls back to the unchanged event when there are no frames or when the
    /// throwable cannot be rebuilt with a frame subset.
    pub fn split_stack_trace(&self, event: LogEvent) -> Vec<LogEvent> {
        let Some(throwable) = event.throwable.as_ref() else {
            return vec![event];
        };
        if throwable.frames().is_empty() {
            trace!("No stack trace to split");
            return vec![event];
        }

        let groups = group_frames(throwable.frames(), self.settings.max_length);
        let parts: Result<Vec<LogEvent>, ChunkError> = groups
            .iter()
            .enumerate()
            .map(|(idx, frames)| {
                let rebuilt = clone_with_frames(throwable, frames)?;
                trace!(seq = idx + 1, frames = frames.len(), "Adding stack trace part");
                let mut part = clone_with_message(&event, event.message.as_str());
                part.throwable = Some(rebuilt);
                self.tag(&mut part, idx + 1);
                Ok(part)
            })
            .collect();

        match parts {
            Ok(parts) => {
                trace!(parts = parts.len(), "Returning split stack trace events");
                parts
            }
            Err(e) => {
                warn!(error = %e, logger = %event.logger_name, "Cannot split stack trace, forwarding event unchanged");
                vec![event]
            }
        }
    }

    fn tag(&self, event: &mut LogEvent, seq: usize) {
        event
            .mdc
            .insert(self.settings.sequence_key.clone(), seq.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ErrorOrigin, ErrorRepresentation, Level, StackFrame, ThrowableProxy, ThrowableSnapshot,
    };
    use tracing_test::traced_test;

    fn chunker(max_length: usize) -> Chunker {
        Chunker::new(ChunkSettings {
            max_length: NonZeroUsize::new(max_length).unwrap(),
            ..ChunkSettings::default()
        })
    }

    fn frames(count: usize) -> Vec<StackFrame> {
        (0..count)
            .map(|i| {
                StackFrame::new(
                    "com.acme.service.OrderService",
                    format!("handle{i}"),
                    Some("OrderService.java"),
                    Some(100 + i as u32),
                )
            })
            .collect()
    }

    fn event_with_frames(count: usize) -> LogEvent {
        LogEvent::new(Level::Error, "com.acme", "failure").with_throwable(ThrowableProxy::new(
            ErrorOrigin::new("java.lang.RuntimeException", Some("Long stack trace")),
            frames(count),
        ))
    }

    #[test]
    fn test_default_settings() {
        let settings = ChunkSettings::default();
        assert!(settings.enabled);
        assert_eq!(settings.max_length.get(), 8192);
        assert_eq!(settings.sequence_key, "seq");
    }

    #[test]
    fn test_message_split_105_by_50() {
        let event = LogEvent::new(Level::Info, "t", "x".repeat(105));
        let parts = chunker(50).process(event);

        let lengths: Vec<usize> = parts.iter().map(|e| e.message.len()).collect();
        assert_eq!(lengths, vec![50, 50, 5]);
        let seqs: Vec<&str> = parts.iter().map(|e| e.mdc["seq"].as_str()).collect();
        assert_eq!(seqs, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_message_at_limit_is_not_split() {
        let message = "This is exactly one hundred characters long message that should be split into multiple log entries..";
        let event = LogEvent::new(Level::Info, "t", message);
        let parts = chunker(101).process(event.clone());
        assert_eq!(parts, vec![event.clone()]);

        let parts = chunker(message.len()).process(event.clone());
        assert_eq!(parts, vec![event]);
    }

    #[test]
    fn test_message_split_drops_throwable() {
        let mut event = event_with_frames(50);
        event.message = "y".repeat(30);
        let parts = chunker(10).process(event);
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|e| e.throwable.is_none()));
    }

    #[test]
    fn test_sequence_key_overwrites_existing_value() {
        let mut c = chunker(4);
        c.set_sequence_key("part");
        let event = LogEvent::new(Level::Info, "t", "abcdefgh").with_mdc("part", "stale");
        let parts = c.process(event);
        assert_eq!(parts[0].mdc["part"], "1");
        assert_eq!(parts[1].mdc["part"], "2");
    }

    #[test]
    fn test_disabled_passes_through() {
        let mut c = chunker(5);
        c.set_enabled(false);
        let mut event = event_with_frames(20);
        event.message = "z".repeat(500);
        assert_eq!(c.process(event.clone()), vec![event]);
    }

    #[test]
    fn test_stack_split_reconstructs_frames() {
        let event = event_with_frames(12);
        let parts = chunker(200).process(event.clone());
        assert!(parts.len() >= 2);

        let rebuilt: Vec<StackFrame> = parts
            .iter()
            .flat_map(|e| e.throwable.as_ref().unwrap().frames().to_vec())
            .collect();
        assert_eq!(rebuilt, event.throwable.as_ref().unwrap().frames());

        for (idx, part) in parts.iter().enumerate() {
            assert_eq!(part.mdc["seq"], (idx + 1).to_string());
            assert_eq!(part.message, event.message);
        }
    }

    #[test]
    fn test_stack_split_shares_origin() {
        let event = event_with_frames(12);
        let Some(ErrorRepresentation::Proxy(original)) = event.throwable.clone() else {
            panic!("expected proxy");
        };
        for part in chunker(200).process(event) {
            let Some(ErrorRepresentation::Proxy(proxy)) = part.throwable else {
                panic!("expected proxy");
            };
            assert!(std::sync::Arc::ptr_eq(original.origin(), proxy.origin()));
        }
    }

    #[test]
    fn test_short_stack_is_not_split() {
        let event = event_with_frames(2);
        assert_eq!(chunker(100_000).process(event.clone()), vec![event]);
    }

    #[test]
    fn test_stack_at_limit_is_not_split() {
        let event = event_with_frames(2);
        let limit = event.stack_trace_length();
        assert_eq!(limit, 126);

        let c = chunker(limit);
        assert!(!c.should_split_stack_trace(&event));
        assert_eq!(c.process(event.clone()), vec![event.clone()]);

        let parts = chunker(limit - 1).process(event);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].mdc["seq"], "1");
    }

    #[test]
    fn test_event_without_throwable_is_not_split() {
        let event = LogEvent::new(Level::Info, "t", "short");
        assert_eq!(chunker(1000).process(event.clone()), vec![event.clone()]);
        assert_eq!(chunker(5).process(event.clone()), vec![event]);
    }

    #[test]
    fn test_split_stack_trace_with_empty_frames_returns_event() {
        let event = event_with_frames(0);
        assert_eq!(chunker(1).split_stack_trace(event.clone()), vec![event]);
    }

    #[traced_test]
    #[test]
    fn test_snapshot_falls_back_to_original() {
        let event = LogEvent::new(Level::Error, "t", "m")
            .with_throwable(ThrowableSnapshot::new("java.lang.Error", None, frames(10)));
        let parts = chunker(100).process(event.clone());

        assert_eq!(parts, vec![event]);
        assert!(logs_contain("Cannot split stack trace"));
    }
}
