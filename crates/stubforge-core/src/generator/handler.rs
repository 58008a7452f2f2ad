//! One handler artifact per path.

use std::path::Path;

use openapiv3::{OpenAPI, PathItem};
use serde::Serialize;

use crate::{
    naming::{Namer, HANDLER_SUFFIX},
    openapi::{operations, paths},
    output::Emitter,
    Result,
};

/// Template key of handler artifacts
pub const HANDLER_TEMPLATE: &str = "handler";
/// Sub-directory of the output root receiving handlers
pub const HANDLER_DIR: &str = "Handler";

/// Context handed to the `handler` template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerPayload {
    pub class_name: String,
    pub namespace: String,
    /// Upper-case HTTP methods in path item order
    pub operation_methods: Vec<String>,
}

/// Generates one handler per path of the document
#[derive(Clone)]
pub struct HandlerGenerator<'a> {
    emitter: Emitter<'a>,
    namer: Namer,
}

impl<'a> HandlerGenerator<'a> {
    pub fn new(emitter: Emitter<'a>, namer: Namer) -> Self {
        Self { emitter, namer }
    }

    /// Handler type name for a raw path
    pub fn handler_name(&self, path: &str) -> String {
        self.namer.handler_name(path)
    }

    /// Namespace receiving the handlers
    pub fn namespace(&self, namespace: &str) -> String {
        self.namer.namespace(namespace, HANDLER_SUFFIX)
    }

    /// Generate handlers for every path; returns the names actually written
    pub fn generate_from_document(
        &self,
        document: &OpenAPI,
        output_root: &Path,
        namespace: &str,
    ) -> Result<Vec<String>> {
        let mut generated = Vec::new();
        for (path, item) in paths(document) {
            if let Some(name) = self.generate_from_path_item(item, path, output_root, namespace)? {
                generated.push(name);
            }
        }
        Ok(generated)
    }

    /// Generate the handler of one path; `None` when the artifact is ignored
    pub fn generate_from_path_item(
        &self,
        item: &PathItem,
        path: &str,
        output_root: &Path,
        namespace: &str,
    ) -> Result<Option<String>> {
        let handler_name = self.handler_name(path);
        let target = self
            .emitter
            .artifact_path(&output_root.join(HANDLER_DIR), &handler_name);

        let payload = HandlerPayload {
            class_name: handler_name.clone(),
            namespace: self.namespace(namespace),
            operation_methods: operations(item)
                .map(|(method, _)| method.to_string())
                .collect(),
        };

        if !self.emitter.emit(HANDLER_TEMPLATE, &payload, &target)? {
            return Ok(None);
        }
        log::debug!("Generated handler {} for {}", handler_name, path);
        Ok(Some(handler_name))
    }
}
