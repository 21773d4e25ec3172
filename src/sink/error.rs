use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Sink '{sink}' failed to serialize event: {source}")]
    Serialization {
        sink: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Sink '{sink}' I/O error: {source}")]
    Io {
        sink: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Sink '{sink}' rejected event: {reason}")]
    Rejected { sink: String, reason: String },
}
