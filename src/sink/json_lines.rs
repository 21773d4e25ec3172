use super::{Sink, SinkError};
use crate::domain::LogEvent;
use parking_lot::Mutex;
use std::io::Write;

/// Writes each event as one JSON document per line.
pub struct JsonLinesSink<W: Write + Send> {
    name: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> Sink for JsonLinesSink<W> {
    fn deliver(&self, event: &LogEvent) -> Result<(), SinkError> {
        let line = serde_json::to_vec(event).map_err(|source| SinkError::Serialization {
            sink: self.name.clone(),
            source,
        })?;

        write_line(&mut *self.writer.lock(), &line).map_err(|source| SinkError::Io {
            sink: self.name.clone(),
            source,
        })
    }
}

fn write_line<W: Write>(writer: &mut W, line: &[u8]) -> std::io::Result<()> {
    writer.write_all(line)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Level;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("broken pipe"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writes_one_line_per_event() {
        let sink = JsonLinesSink::new("stdout", Vec::new());
        sink.deliver(&LogEvent::new(Level::Info, "a", "first").with_mdc("seq", "1"))
            .unwrap();
        sink.deliver(&LogEvent::new(Level::Warn, "a", "second")).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: LogEvent = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.message, "first");
        assert_eq!(first.mdc["seq"], "1");
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["level"], "WARN");
    }

    #[test]
    fn test_io_failure_names_sink() {
        let sink = JsonLinesSink::new("file", FailingWriter);
        let err = sink
            .deliver(&LogEvent::new(Level::Info, "a", "m"))
            .unwrap_err();
        assert!(matches!(err, SinkError::Io { .. }));
        assert!(err.to_string().contains("Sink 'file'"));
    }
}
