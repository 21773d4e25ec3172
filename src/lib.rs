#![warn(rust_2018_idioms)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
#![allow(
    clippy::missing_errors_doc,      // Internal API
    clippy::missing_panics_doc,      // Internal API
    clippy::module_name_repetitions, // e.g. ChunkError in chunker module
    clippy::must_use_candidate,      // Annotated selectively on critical APIs
    clippy::doc_markdown             // Internal API
)]

pub mod app;
pub mod appender;
pub mod chunker;
pub mod domain;
pub mod sink;

// Re-export main types for easy access
pub use app::Config;
pub use appender::ChunkAppender;
pub use chunker::{ChunkSettings, Chunker};
pub use domain::{ErrorRepresentation, Level, LogEvent, StackFrame};
pub use sink::{Sink, SinkError, SinkRegistry};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
