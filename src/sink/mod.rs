//! Downstream delivery of chunked events.
//!
//! A [`Sink`] receives one event at a time. [`SinkRegistry`] keeps the attached sinks in
//! registration order and fans every event out to all of them.

pub mod error;
pub mod json_lines;
pub mod memory;
pub mod registry;

pub use error::SinkError;
pub use json_lines::JsonLinesSink;
pub use memory::MemorySink;
pub use registry::SinkRegistry;

use crate::domain::LogEvent;

#[cfg(test)]
use mockall::automock;

/// Consumer of produced events.
#[cfg_attr(test, automock)]
pub trait Sink: Send + Sync {
    fn deliver(&self, event: &LogEvent) -> Result<(), SinkError>;
}
