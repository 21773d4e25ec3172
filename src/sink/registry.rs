use super::{Sink, SinkError};
use crate::domain::LogEvent;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

struct Attached {
    name: String,
    sink: Arc<dyn Sink>,
}

/// Named sinks in registration order.
#[derive(Default)]
pub struct SinkRegistry {
    sinks: RwLock<Vec<Attached>>,
}

impl SinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sink(&self, name: impl Into<String>, sink: Arc<dyn Sink>) {
        let name = name.into();
        debug!(sink = %name, "Attaching sink");
        self.sinks.write().push(Attached { name, sink });
    }

    /// First sink attached under `name`.
    pub fn get_sink(&self, name: &str) -> Option<Arc<dyn Sink>> {
        self.sinks
            .read()
            .iter()
            .find(|attached| attached.name == name)
            .map(|attached| Arc::clone(&attached.sink))
    }

    pub fn is_attached(&self, sink: &Arc<dyn Sink>) -> bool {
        self.sinks
            .read()
            .iter()
            .any(|attached| Arc::ptr_eq(&attached.sink, sink))
    }

    pub fn detach_sink(&self, sink: &Arc<dyn Sink>) -> bool {
        self.detach_where(|attached| Arc::ptr_eq(&attached.sink, sink))
    }

    pub fn detach_sink_by_name(&self, name: &str) -> bool {
        self.detach_where(|attached| attached.name == name)
    }

    pub fn detach_all(&self) {
        self.sinks.write().clear();
    }

    /// Snapshot of the attached sinks with their names, in registration order.
    pub fn sinks(&self) -> Vec<(String, Arc<dyn Sink>)> {
        self.sinks
            .read()
            .iter()
            .map(|attached| (attached.name.clone(), Arc::clone(&attached.sink)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sinks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.read().is_empty()
    }

    /// Delivers `event` to every sink in registration order.
    ///
    /// A failing sink does not stop delivery to the following ones; the first failure
    /// is returned once all sinks have been tried. Sinks are called on a snapshot taken
    /// before delivery, so a sink may attach or detach sinks from inside `deliver`.
    pub fn deliver(&self, event: &LogEvent) -> Result<(), SinkError> {
        let mut first_error = None;

        for (name, sink) in self.sinks() {
            if let Err(e) = sink.deliver(event) {
                warn!(sink = %name, error = %e, "Sink delivery failed");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    fn detach_where(&self, predicate: impl Fn(&Attached) -> bool) -> bool {
        let mut sinks = self.sinks.write();
        match sinks.iter().position(predicate) {
            Some(idx) => {
                let removed = sinks.remove(idx);
                debug!(sink = %removed.name, "Detached sink");
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for SinkRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self
            .sinks
            .read()
            .iter()
            .map(|attached| attached.name.clone())
            .collect();
        f.debug_struct("SinkRegistry").field("sinks", &names).finish()
    }
}
