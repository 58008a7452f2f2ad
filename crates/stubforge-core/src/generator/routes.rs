//! The aggregated route table.

use std::path::Path;

use openapiv3::{OpenAPI, Operation, Parameter, PathItem, ReferenceOr};
use serde::{Deserialize, Serialize};

use crate::{
    naming::{Namer, HANDLER_SUFFIX, MODEL_SUFFIX},
    openapi::{operations, paths},
    output::Emitter,
    reference::{resolve_parameter, schema_name},
    Result,
};

/// Template key of the route table
pub const ROUTES_TEMPLATE: &str = "routes";
/// File stem of the route table inside the config directory
pub const ROUTES_FILE_STEM: &str = "swagger.routes";
/// Only request bodies of this media type select a model middleware
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// One route of the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
    /// Fully-qualified handler type
    pub middleware: String,
    /// Fully-qualified model type of a referenced JSON body
    pub model_middleware: Option<String>,
    /// Path with `{name}` placeholders rewritten to `:name`
    pub path: String,
    pub method: String,
    /// The operation's `operationId`
    pub name: Option<String>,
}

#[derive(Serialize)]
struct RoutesPayload<'r> {
    routes: &'r [RouteRecord],
}

/// Rewrite `{name}` placeholders to `:name`; names without a placeholder are no-ops.
///
/// ```
/// use stubforge_core::generator::rewrite_path;
///
/// assert_eq!(rewrite_path("/pets/{petId}", ["petId"]), "/pets/:petId");
/// ```
pub fn rewrite_path<'n>(path: &str, names: impl IntoIterator<Item = &'n str>) -> String {
    names.into_iter().fold(path.to_string(), |path, name| {
        path.replace(&format!("{{{name}}}"), &format!(":{name}"))
    })
}

/// Generates the single route table of a document
#[derive(Clone)]
pub struct RoutesGenerator<'a> {
    emitter: Emitter<'a>,
    namer: Namer,
}

impl<'a> RoutesGenerator<'a> {
    pub fn new(emitter: Emitter<'a>, namer: Namer) -> Self {
        Self { emitter, namer }
    }

    /// Write `<config_dir>/swagger.routes.<ext>`; `false` when the artifact is ignored
    pub fn generate_from_document(
        &self,
        document: &OpenAPI,
        namespace: &str,
        config_dir: &Path,
    ) -> Result<bool> {
        let target = self.emitter.artifact_path(config_dir, ROUTES_FILE_STEM);
        if self.emitter.is_ignored(&target) {
            return Ok(false);
        }

        let routes = self.build_routes(document, namespace)?;
        self.emitter
            .write(ROUTES_TEMPLATE, &RoutesPayload { routes: &routes }, &target)?;
        log::debug!("Generated {} route(s) in {}", routes.len(), target.display());
        Ok(true)
    }

    /// Route records in path order, then method order
    pub fn build_routes(&self, document: &OpenAPI, namespace: &str) -> Result<Vec<RouteRecord>> {
        let mut routes = Vec::new();
        for (path, item) in paths(document) {
            routes.extend(self.generate_from_path_item(document, path, item, namespace)?);
        }
        Ok(routes)
    }

    /// Records of every operation of one path item
    pub fn generate_from_path_item(
        &self,
        document: &OpenAPI,
        path: &str,
        item: &PathItem,
        namespace: &str,
    ) -> Result<Vec<RouteRecord>> {
        operations(item)
            .map(|(method, operation)| {
                self.generate_from_operation(document, path, item, operation, method, namespace)
            })
            .collect()
    }

    /// Record of one operation
    pub fn generate_from_operation(
        &self,
        document: &OpenAPI,
        path: &str,
        item: &PathItem,
        operation: &Operation,
        method: &str,
        namespace: &str,
    ) -> Result<RouteRecord> {
        let mut names = Vec::new();
        for parameter in item.parameters.iter().chain(&operation.parameters) {
            if let Parameter::Path { parameter_data, .. } = resolve_parameter(document, parameter)? {
                names.push(parameter_data.name.as_str());
            }
        }

        let handler_namespace = self.namer.namespace(namespace, HANDLER_SUFFIX);
        Ok(RouteRecord {
            middleware: self
                .namer
                .qualify(&handler_namespace, &self.namer.handler_name(path)),
            model_middleware: self.model_middleware(operation, namespace)?,
            path: rewrite_path(path, names),
            method: method.to_string(),
            name: operation.operation_id.clone(),
        })
    }

    /// Model type of a JSON request body given by reference.
    ///
    /// The schema name goes through [`Namer::model_name`] rather than being used
    /// raw, so it matches the `modelName` of the generated hydrator.
    pub fn model_middleware(&self, operation: &Operation, namespace: &str) -> Result<Option<String>> {
        let body = match &operation.request_body {
            Some(ReferenceOr::Item(body)) => body,
            Some(ReferenceOr::Reference { reference }) => {
                log::debug!("Not following request body reference {}", reference);
                return Ok(None);
            }
            None => return Ok(None),
        };
        match body
            .content
            .get(JSON_MEDIA_TYPE)
            .and_then(|media| media.schema.as_ref())
        {
            Some(ReferenceOr::Reference { reference }) => {
                let model_namespace = self.namer.namespace(namespace, MODEL_SUFFIX);
                let model = self.namer.model_name(schema_name(reference)?);
                Ok(Some(self.namer.qualify(&model_namespace, &model)))
            }
            _ => Ok(None),
        }
    }
}
