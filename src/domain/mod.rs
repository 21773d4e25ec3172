//! Domain layer for rask-log-chunker.
//!
//! Contains the canonical types shared across all modules:
//! - `LogEvent`: one log occurrence as it travels from the host logger to the sinks
//! - `ErrorRepresentation`: the throwable attached to an event, with its stack frames
//! - `Level`: event severity (Trace/Debug/Info/Warn/Error)
//! - `ChunkError`: errors raised while rebuilding events

pub mod error;
pub mod error_repr;
pub mod level;
pub mod log_event;

pub use error::ChunkError;
pub use error_repr::{ErrorOrigin, ErrorRepresentation, StackFrame, ThrowableProxy, ThrowableSnapshot};
pub use level::Level;
pub use log_event::{LogEvent, Marker};
