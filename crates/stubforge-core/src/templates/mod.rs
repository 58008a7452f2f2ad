//! Template system for code generation

pub mod dir;
pub mod kind;
pub mod manager;

pub use dir::*;
pub use kind::*;
pub use manager::*;

use serde_json::Value as JsonValue;

/// Turns a template key and a payload into generated text.
pub trait Renderer {
    /// Render the template registered under `key` with `payload` as context
    fn render(&self, key: &str, payload: &JsonValue) -> crate::Result<String>;
}
