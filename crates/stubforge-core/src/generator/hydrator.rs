//! One hydrator artifact per component schema.

use std::path::Path;

use openapiv3::{OpenAPI, ReferenceOr, Schema};
use serde::{Deserialize, Serialize};

use crate::{
    events::{GeneratedEvent, GenerationListener, NoopListener, GENERATED_EVENT},
    model::{ModelProperty, PropertyResolver},
    naming::{Namer, HYDRATOR_SUFFIX, MODEL_SUFFIX},
    openapi::schemas,
    output::Emitter,
    Result,
};

/// Template key of hydrator artifacts
pub const MODEL_HYDRATOR_TEMPLATE: &str = "model-hydrator";
/// Sub-directory of the output root receiving hydrators
pub const HYDRATOR_DIR: &str = "Hydrator";
/// Generator name carried by published events
pub const HYDRATOR_GENERATOR: &str = "Hydrator";

/// Context handed to the `model-hydrator` template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HydratorPayload {
    pub class_name: String,
    pub namespace: String,
    pub model_name: String,
    pub model_namespace: String,
    pub properties: Vec<ModelProperty>,
}

/// Fully-qualified hydrator and model type of one schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HydratorClass {
    pub hydrator: String,
    pub model: String,
}

/// Generates one hydrator per component schema.
///
/// Every written hydrator is announced to the listener under [`GENERATED_EVENT`].
#[derive(Clone)]
pub struct HydratorGenerator<'a> {
    emitter: Emitter<'a>,
    namer: Namer,
    resolver: &'a dyn PropertyResolver,
    listener: &'a dyn GenerationListener,
}

impl<'a> HydratorGenerator<'a> {
    pub fn new(emitter: Emitter<'a>, namer: Namer, resolver: &'a dyn PropertyResolver) -> Self {
        Self {
            emitter,
            namer,
            resolver,
            listener: &NoopListener,
        }
    }

    /// Replace the default no-op listener
    pub fn with_listener(mut self, listener: &'a dyn GenerationListener) -> Self {
        self.listener = listener;
        self
    }

    /// Namespace receiving the hydrators
    pub fn namespace(&self, namespace: &str) -> String {
        self.namer.namespace(namespace, HYDRATOR_SUFFIX)
    }

    /// Namespace of the hydrated models
    pub fn model_namespace(&self, namespace: &str) -> String {
        self.namer.namespace(namespace, MODEL_SUFFIX)
    }

    /// Generate hydrators for every inline component schema; returns the names actually written
    pub fn generate_from_document(
        &self,
        document: &OpenAPI,
        output_root: &Path,
        namespace: &str,
    ) -> Result<Vec<String>> {
        let mut generated = Vec::new();
        for (name, schema) in schemas(document) {
            let schema = match schema {
                ReferenceOr::Item(schema) => schema,
                ReferenceOr::Reference { reference } => {
                    log::debug!("Skipping schema '{}' aliasing {}", name, reference);
                    continue;
                }
            };
            if let Some(hydrator) = self.generate_from_schema(schema, name, output_root, namespace)? {
                generated.push(hydrator);
            }
        }
        Ok(generated)
    }

    /// Generate the hydrator of one schema; `None` when the artifact is ignored
    pub fn generate_from_schema(
        &self,
        schema: &Schema,
        name: &str,
        output_root: &Path,
        namespace: &str,
    ) -> Result<Option<String>> {
        let model_name = self.namer.model_name(name);
        let class_name = self.namer.hydrator_name(name);
        let target = self
            .emitter
            .artifact_path(&output_root.join(HYDRATOR_DIR), &class_name);

        if self.emitter.is_ignored(&target) {
            return Ok(None);
        }

        let payload = HydratorPayload {
            class_name: class_name.clone(),
            namespace: self.namespace(namespace),
            model_name,
            model_namespace: self.model_namespace(namespace),
            properties: self.resolver.properties(schema, name)?,
        };
        self.emitter.write(MODEL_HYDRATOR_TEMPLATE, &payload, &target)?;

        self.listener.publish(
            GENERATED_EVENT,
            &GeneratedEvent::new(HYDRATOR_GENERATOR, class_name.as_str()),
        );
        log::debug!("Generated hydrator {} for schema '{}'", class_name, name);
        Ok(Some(class_name))
    }

    /// See [`hydrator_classes`]
    pub fn hydrator_classes(&self, document: &OpenAPI, namespace: &str) -> Vec<HydratorClass> {
        hydrator_classes(&self.namer, document, namespace)
    }
}

/// Hydrator and model type of every schema key, references included
pub fn hydrator_classes(namer: &Namer, document: &OpenAPI, namespace: &str) -> Vec<HydratorClass> {
    let hydrator_namespace = namer.namespace(namespace, HYDRATOR_SUFFIX);
    let model_namespace = namer.namespace(namespace, MODEL_SUFFIX);
    schemas(document)
        .map(|(name, _)| HydratorClass {
            hydrator: namer.qualify(&hydrator_namespace, &namer.hydrator_name(name)),
            model: namer.qualify(&model_namespace, &namer.model_name(name)),
        })
        .collect()
}
