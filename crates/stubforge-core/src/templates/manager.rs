//! Tera-backed template rendering

// Internal imports (std, crate)
use std::{path::PathBuf, sync::Arc};

use crate::{Error, Result};

use super::{Renderer, TemplateDir, TemplateKind};

// External imports (alphabetized)
use serde_json::Value as JsonValue;
use tera::{Context, Tera};

/// Template keys every template set provides
pub const TEMPLATE_KEYS: [&str; 3] = ["handler", "model-hydrator", "routes"];

const TEMPLATE_EXTENSION: &str = "tera";

const RUST_TEMPLATES: [(&str, &str); 3] = [
    (
        "handler.tera",
        include_str!("../../../../templates/rust/handler.tera"),
    ),
    (
        "model-hydrator.tera",
        include_str!("../../../../templates/rust/model-hydrator.tera"),
    ),
    (
        "routes.tera",
        include_str!("../../../../templates/rust/routes.tera"),
    ),
];

const PHP_TEMPLATES: [(&str, &str); 3] = [
    (
        "handler.tera",
        include_str!("../../../../templates/php/handler.tera"),
    ),
    (
        "model-hydrator.tera",
        include_str!("../../../../templates/php/model-hydrator.tera"),
    ),
    (
        "routes.tera",
        include_str!("../../../../templates/php/routes.tera"),
    ),
];

/// Manages loading and rendering of code generation templates
#[derive(Debug, Clone)]
pub struct TemplateManager {
    /// Cached Tera template engine instance
    tera: Arc<Tera>,
    /// Template kind the templates belong to
    kind: TemplateKind,
    /// Directory the templates were loaded from, `None` for built-in templates
    template_dir: Option<TemplateDir>,
}

impl TemplateManager {
    /// Create a new TemplateManager for the given template kind and directory
    ///
    /// # Arguments
    /// * `template_kind` - The kind of template to use
    /// * `template_dir` - Optional template directory. If None, the standard
    ///   locations are searched and the built-in templates are used when none exists.
    pub fn new(template_kind: TemplateKind, template_dir: Option<PathBuf>) -> Result<Self> {
        let template_dir = match template_dir {
            Some(dir) => TemplateDir::from_user_dir(&dir, template_kind)?,
            None => match TemplateDir::discover(template_kind, None) {
                Ok(dir) => dir,
                Err(e) => {
                    log::debug!("No template directory found ({}), using built-in templates", e);
                    return Self::builtin(template_kind);
                }
            },
        };

        Self::from_dir(template_dir)
    }

    /// Load every `*.tera` file below a template directory
    pub fn from_dir(template_dir: TemplateDir) -> Result<Self> {
        let template_path = template_dir.template_path();
        let template_dir_str = template_path.to_str().ok_or_else(|| {
            Error::template(format!(
                "Template path contains invalid UTF-8: {}",
                template_path.display()
            ))
        })?;

        let tera = Tera::new(&format!("{}/**/*.{}", template_dir_str, TEMPLATE_EXTENSION))
            .map_err(|e| Error::template(format!("Failed to parse templates: {}", e)))?;

        log::debug!(
            "Loaded templates from {}: {:?}",
            template_dir.display(),
            tera.get_template_names().collect::<Vec<_>>()
        );

        Ok(Self {
            tera: Arc::new(tera),
            kind: template_dir.kind(),
            template_dir: Some(template_dir),
        })
    }

    /// Templates compiled into the library
    pub fn builtin(template_kind: TemplateKind) -> Result<Self> {
        let templates = match template_kind {
            TemplateKind::Rust => RUST_TEMPLATES,
            TemplateKind::Php => PHP_TEMPLATES,
        };
        Self::from_raw(template_kind, &templates)
    }

    /// Build a manager from `(file name, source)` pairs
    pub fn from_raw(template_kind: TemplateKind, templates: &[(&str, &str)]) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates.iter().copied())?;

        Ok(Self {
            tera: Arc::new(tera),
            kind: template_kind,
            template_dir: None,
        })
    }

    /// Get the template kind this template manager is configured for
    pub fn template_kind(&self) -> TemplateKind {
        self.kind
    }

    /// Get the template directory, `None` for built-in templates
    pub fn template_dir(&self) -> Option<&TemplateDir> {
        self.template_dir.as_ref()
    }

    /// Check if a template exists for `key`
    pub fn has_template(&self, key: &str) -> bool {
        self.tera.get_template(&Self::template_name(key)).is_ok()
    }

    /// Keys of [`TEMPLATE_KEYS`] with no matching template
    pub fn missing_templates(&self) -> Vec<&'static str> {
        TEMPLATE_KEYS
            .into_iter()
            .filter(|key| !self.has_template(key))
            .collect()
    }

    fn template_name(key: &str) -> String {
        format!("{}.{}", key, TEMPLATE_EXTENSION)
    }

    fn template_source(&self, name: &str) -> String {
        self.template_dir
            .as_ref()
            .and_then(|dir| std::fs::read_to_string(dir.template_path().join(name)).ok())
            .unwrap_or_else(|| "<unable to read template file>".to_string())
    }
}

impl Renderer for TemplateManager {
    fn render(&self, key: &str, payload: &JsonValue) -> Result<String> {
        let template_name = Self::template_name(key);

        self.tera.get_template(&template_name).map_err(|e| {
            Error::template(format!("Template not found: {} - {}", template_name, e))
        })?;

        let context = Context::from_serialize(payload)?;

        log::debug!("Rendering template: {}", template_name);
        self.tera.render(&template_name, &context).map_err(|e| {
            log::error!("Template rendering failed for '{}': {}", template_name, e);
            Error::template(format!(
                "Failed to render template '{}': {}\nTemplate source:\n{}",
                template_name,
                e,
                self.template_source(&template_name)
            ))
        })
    }
}
