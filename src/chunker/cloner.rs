use crate::domain::{ChunkError, ErrorRepresentation, LogEvent, StackFrame};

/// Copies `event` with `message` as its message.
///
/// Level, logger name, timestamp, thread name, markers, caller data and the contextual
/// map are copied. The throwable is not: message-split events carry none.
pub fn clone_with_message(event: &LogEvent, message: impl Into<String>) -> LogEvent {
    LogEvent {
        level: event.level,
        logger_name: event.logger_name.clone(),
        message: message.into(),
        timestamp: event.timestamp,
        thread_name: event.thread_name.clone(),
        markers: event.markers.clone(),
        caller_data: event
            .has_caller_data()
            .then(|| event.caller_data.clone())
            .flatten(),
        mdc: event.mdc.clone(),
        throwable: None,
    }
}

/// Rebuilds `repr` around a subset of its frames, keeping the same origin.
pub fn clone_with_frames(
    repr: &ErrorRepresentation,
    frames: &[StackFrame],
) -> Result<ErrorRepresentation, ChunkError> {
    repr.with_frames(frames.to_vec())
}
