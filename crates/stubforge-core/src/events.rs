//! Notifications about generated artifacts.

use serde::{Deserialize, Serialize};

/// Name under which generation events are published
pub const GENERATED_EVENT: &str = "stubforge.generator.generated";

/// Payload announcing a generated artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedEvent {
    /// Generator that produced the artifact, e.g. `Hydrator`
    pub generator: String,
    /// Identifier of the generated artifact
    pub name: String,
}

impl GeneratedEvent {
    /// Create an event for `name` produced by `generator`
    pub fn new(generator: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            generator: generator.into(),
            name: name.into(),
        }
    }
}

/// Observer of generation events.
pub trait GenerationListener {
    /// Called after an artifact has been written
    fn publish(&self, event_name: &str, event: &GeneratedEvent);
}

/// Listener that drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl GenerationListener for NoopListener {
    fn publish(&self, _event_name: &str, _event: &GeneratedEvent) {}
}

/// Listener that logs every event at info level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogListener;

impl GenerationListener for LogListener {
    fn publish(&self, event_name: &str, event: &GeneratedEvent) {
        log::info!("{}: {} generated {}", event_name, event.generator, event.name);
    }
}
