use super::error_repr::{ErrorRepresentation, StackFrame};
use super::level::Level;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Named tag attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Marker(pub String);

impl Marker {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// A single log occurrence, as handed over by the host logger.
///
/// `message` is the fully formatted message. `mdc` is the contextual key/value map;
/// an event without one carries an empty map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    #[serde(default)]
    pub level: Level,
    #[serde(default)]
    pub logger_name: String,
    pub message: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub thread_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller_data: Option<Vec<StackFrame>>,
    #[serde(default)]
    pub mdc: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throwable: Option<ErrorRepresentation>,
}

impl LogEvent {
    pub fn new(level: Level, logger_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            logger_name: logger_name.into(),
            message: message.into(),
            timestamp: Utc::now(),
            thread_name: String::new(),
            markers: Vec::new(),
            caller_data: None,
            mdc: HashMap::new(),
            throwable: None,
        }
    }

    pub fn with_throwable(mut self, throwable: impl Into<ErrorRepresentation>) -> Self {
        self.throwable = Some(throwable.into());
        self
    }

    pub fn with_mdc(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.mdc.insert(key.into(), value.into());
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn with_thread_name(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = thread_name.into();
        self
    }

    pub fn has_caller_data(&self) -> bool {
        self.caller_data.as_ref().is_some_and(|frames| !frames.is_empty())
    }

    /// Length of the formatted message in characters.
    pub fn message_length(&self) -> usize {
        self.message.chars().count()
    }

    /// Total rendered length of the throwable's frames, 0 without a throwable.
    pub fn stack_trace_length(&self) -> usize {
        self.throwable
            .as_ref()
            .map_or(0, ErrorRepresentation::stack_length)
    }
}
