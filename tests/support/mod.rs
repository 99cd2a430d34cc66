//! Shared helpers for integration tests.

use std::sync::{Arc, Mutex};

use arbwatch::service::{Event, Notifier};

/// Thread-safe event collector for notification assertions in tests.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().expect("lock notifier events").clone()
    }

    pub fn opportunity_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::OpportunityDetected(_)))
            .count()
    }

    pub fn execution_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::ExecutionCompleted(_)))
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: Event) {
        self.events
            .lock()
            .expect("lock notifier events")
            .push(event);
    }
}
