//! In-memory collaborators shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use openapiv3::OpenAPI;
use serde_json::Value as JsonValue;

use crate::events::{GeneratedEvent, GenerationListener};
use crate::output::Writer;
use crate::templates::Renderer;
use crate::Result;

/// Parse a YAML document, panicking on malformed fixtures
pub fn document(yaml: &str) -> OpenAPI {
    serde_yaml::from_str(yaml).expect("test document should parse")
}

/// Renders `<key>:<payload>` and remembers every call
#[derive(Default)]
pub struct RecordingRenderer {
    calls: Cell<usize>,
    rendered: RefCell<Vec<(String, JsonValue)>>,
}

impl RecordingRenderer {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn rendered(&self) -> Vec<(String, JsonValue)> {
        self.rendered.borrow().clone()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, key: &str, payload: &JsonValue) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        self.rendered
            .borrow_mut()
            .push((key.to_string(), payload.clone()));
        Ok(format!("{key}:{payload}"))
    }
}

/// Keeps written files in memory, keyed by path
#[derive(Default)]
pub struct MemoryWriter {
    files: RefCell<BTreeMap<PathBuf, String>>,
    order: RefCell<Vec<PathBuf>>,
}

impl MemoryWriter {
    pub fn get(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    /// Written paths in write order
    pub fn paths(&self) -> Vec<PathBuf> {
        self.order.borrow().clone()
    }

    pub fn files(&self) -> BTreeMap<PathBuf, String> {
        self.files.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.files.borrow().is_empty()
    }
}

impl Writer for MemoryWriter {
    fn write(&self, path: &Path, content: &str) -> Result<()> {
        self.order.borrow_mut().push(path.to_path_buf());
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

/// Fails every write
pub struct FailingWriter;

impl Writer for FailingWriter {
    fn write(&self, path: &Path, _content: &str) -> Result<()> {
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("cannot write {}", path.display()),
        )
        .into())
    }
}

/// Remembers every published event
#[derive(Default)]
pub struct RecordingListener {
    events: RefCell<Vec<(String, GeneratedEvent)>>,
}

impl RecordingListener {
    pub fn events(&self) -> Vec<(String, GeneratedEvent)> {
        self.events.borrow().clone()
    }
}

impl GenerationListener for RecordingListener {
    fn publish(&self, event_name: &str, event: &GeneratedEvent) {
        self.events
            .borrow_mut()
            .push((event_name.to_string(), event.clone()));
    }
}
