use super::error::ChunkError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::sync::Arc;

/// One entry of a stack trace. Stack splitting never cuts through a frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackFrame {
    pub declaring_class: String,
    pub method_name: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub line_number: Option<u32>,
}

impl StackFrame {
    pub fn new(
        declaring_class: impl Into<String>,
        method_name: impl Into<String>,
        file_name: Option<&str>,
        line_number: Option<u32>,
    ) -> Self {
        Self {
            declaring_class: declaring_class.into(),
            method_name: method_name.into(),
            file_name: file_name.map(str::to_string),
            line_number,
        }
    }

    /// Rendered form as it appears in a printed trace, e.g.
    /// `at com.acme.Service.call(Service.java:42)`.
    pub fn rendered(&self) -> String {
        self.to_string()
    }

    /// Length of the rendered form in characters.
    pub fn rendered_len(&self) -> usize {
        let mut counter = CharCounter(0);
        // CharCounter never fails to write
        let _ = write!(counter, "{self}");
        counter.0
    }
}

struct CharCounter(usize);

impl fmt::Write for CharCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.chars().count();
        Ok(())
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {}.{}(", self.declaring_class, self.method_name)?;
        match (&self.file_name, self.line_number) {
            (Some(file), Some(line)) => write!(f, "{file}:{line})"),
            (Some(file), None) => write!(f, "{file})"),
            (None, _) => f.write_str("Unknown Source)"),
        }
    }
}

/// The error an event was logged with: its type, message and cause chain.
///
/// Shared between an original event and every event derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorOrigin {
    pub class_name: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub cause: Option<Arc<ErrorOrigin>>,
}

impl ErrorOrigin {
    pub fn new(class_name: impl Into<String>, message: Option<&str>) -> Self {
        Self {
            class_name: class_name.into(),
            message: message.map(str::to_string),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: ErrorOrigin) -> Self {
        self.cause = Some(Arc::new(cause));
        self
    }
}

/// Locally captured throwable. Its frame sequence is fixed at construction, and a copy
/// with a different frame subset can be built around the same origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowableProxy {
    origin: Arc<ErrorOrigin>,
    frames: Vec<StackFrame>,
}

impl ThrowableProxy {
    pub fn new(origin: ErrorOrigin, frames: Vec<StackFrame>) -> Self {
        Self {
            origin: Arc::new(origin),
            frames,
        }
    }

    pub fn origin(&self) -> &Arc<ErrorOrigin> {
        &self.origin
    }

    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    /// Same origin, different frames.
    pub fn with_frames(&self, frames: Vec<StackFrame>) -> Self {
        Self {
            origin: Arc::clone(&self.origin),
            frames,
        }
    }
}

/// Throwable received in already-rendered form (e.g. deserialized from a remote
/// appender). Frames can be measured but the representation cannot be rebuilt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowableSnapshot {
    pub class_name: String,
    #[serde(default)]
    pub message: Option<String>,
    frames: Vec<StackFrame>,
}

impl ThrowableSnapshot {
    pub fn new(class_name: impl Into<String>, message: Option<&str>, frames: Vec<StackFrame>) -> Self {
        Self {
            class_name: class_name.into(),
            message: message.map(str::to_string),
            frames,
        }
    }

    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorRepresentation {
    Proxy(ThrowableProxy),
    Snapshot(ThrowableSnapshot),
}

impl ErrorRepresentation {
    pub fn frames(&self) -> &[StackFrame] {
        match self {
            ErrorRepresentation::Proxy(proxy) => proxy.frames(),
            ErrorRepresentation::Snapshot(snapshot) => snapshot.frames(),
        }
    }

    /// Sum of the rendered lengths of the top-level frames.
    pub fn stack_length(&self) -> usize {
        self.frames().iter().map(StackFrame::rendered_len).sum()
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            ErrorRepresentation::Proxy(_) => "proxy",
            ErrorRepresentation::Snapshot(_) => "snapshot",
        }
    }

    /// Rebuilds this representation around `frames`, keeping the origin.
    pub fn with_frames(&self, frames: Vec<StackFrame>) -> Result<Self, ChunkError> {
        match self {
            ErrorRepresentation::Proxy(proxy) => {
                Ok(ErrorRepresentation::Proxy(proxy.with_frames(frames)))
            }
            ErrorRepresentation::Snapshot(_) => Err(ChunkError::UnsupportedRepresentation {
                variant: self.variant_name(),
            }),
        }
    }
}

impl From<ThrowableProxy> for ErrorRepresentation {
    fn from(proxy: ThrowableProxy) -> Self {
        ErrorRepresentation::Proxy(proxy)
    }
}

impl From<ThrowableSnapshot> for ErrorRepresentation {
    fn from(snapshot: ThrowableSnapshot) -> Self {
        ErrorRepresentation::Snapshot(snapshot)
    }
}
