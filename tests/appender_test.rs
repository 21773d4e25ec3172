use mockall::{Sequence, mock};
use rask_log_chunker::chunker::ChunkSettings;
use rask_log_chunker::domain::{ErrorOrigin, Level, LogEvent, StackFrame, ThrowableProxy};
use rask_log_chunker::sink::{MemorySink, Sink, SinkError};
use rask_log_chunker::ChunkAppender;
use std::num::NonZeroUsize;
use std::sync::Arc;

mock! {
    pub Downstream {}

    impl Sink for Downstream {
        fn deliver(&self, event: &LogEvent) -> Result<(), SinkError>;
    }
}

fn appender(max_length: usize) -> ChunkAppender {
    ChunkAppender::new(ChunkSettings {
        max_length: NonZeroUsize::new(max_length).unwrap(),
        ..ChunkSettings::default()
    })
}

#[test]
fn test_parts_reach_every_sink_in_order() {
    let mut seq = Sequence::new();
    let mut first = MockDownstream::new();
    let mut second = MockDownstream::new();

    for expected in ["1", "2", "3"] {
        first
            .expect_deliver()
            .withf(move |event| event.mdc["seq"] == expected)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        second
            .expect_deliver()
            .withf(move |event| event.mdc["seq"] == expected)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
    }

    let appender = appender(50);
    appender.sinks().add_sink("first", Arc::new(first));
    appender.sinks().add_sink("second", Arc::new(second));

    let produced = appender
        .append(LogEvent::new(Level::Info, "t", "m".repeat(105)))
        .unwrap();
    assert_eq!(produced, 3);
}

#[test]
fn test_detached_sink_receives_nothing() {
    let kept = Arc::new(MemorySink::new());
    let detached = Arc::new(MemorySink::new());

    let appender = appender(10);
    appender
        .sinks()
        .add_sink("kept", Arc::clone(&kept) as Arc<dyn Sink>);
    appender
        .sinks()
        .add_sink("detached", Arc::clone(&detached) as Arc<dyn Sink>);
    assert!(appender.sinks().detach_sink_by_name("detached"));

    appender
        .append(LogEvent::new(Level::Warn, "t", "0123456789abc"))
        .unwrap();

    assert_eq!(kept.len(), 2);
    assert!(detached.is_empty());
}

#[test]
fn test_stack_parts_delivered_with_subsets() {
    let frames: Vec<StackFrame> = (0..10)
        .map(|i| StackFrame::new("com.acme.Job", format!("step{i}"), Some("Job.java"), Some(i)))
        .collect();
    let event = LogEvent::new(Level::Error, "jobs", "job failed").with_throwable(
        ThrowableProxy::new(ErrorOrigin::new("java.lang.IllegalStateException", None), frames.clone()),
    );

    let memory = Arc::new(MemorySink::new());
    let appender = appender(60);
    appender
        .sinks()
        .add_sink("memory", Arc::clone(&memory) as Arc<dyn Sink>);

    let produced = appender.append(event).unwrap();
    let delivered = memory.events();
    assert_eq!(delivered.len(), produced);

    let rebuilt: Vec<StackFrame> = delivered
        .iter()
        .flat_map(|e| e.throwable.as_ref().unwrap().frames().to_vec())
        .collect();
    assert_eq!(rebuilt, frames);
}

#[test]
fn test_no_sinks_is_not_an_error() {
    let appender = appender(10);
    assert_eq!(
        appender
            .append(LogEvent::new(Level::Info, "t", "x".repeat(25)))
            .unwrap(),
        3
    );
}
