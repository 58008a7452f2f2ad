//! Handler, hydrator and route table generators.
//!
//! Each generator walks its own part of the document independently; they share
//! only the [`Emitter`] and the [`Namer`], so a handler name used in the route
//! table is always derived from the path, never read back from generated output.

pub mod handler;
pub mod hydrator;
pub mod routes;

pub use handler::*;
pub use hydrator::*;
pub use routes::*;

use std::path::Path;

use openapiv3::OpenAPI;
use serde::Serialize;

use crate::{
    events::{GenerationListener, NoopListener},
    model::PropertyResolver,
    naming::Namer,
    output::Emitter,
    Result,
};

/// What one generation run wrote
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Handler names actually written
    pub handlers: Vec<String>,
    /// Hydrator names actually written
    pub hydrators: Vec<String>,
    /// Whether the route table was written
    pub routes_written: bool,
}

/// Runs the three generators over one document
pub struct Codegen<'a> {
    emitter: Emitter<'a>,
    namer: Namer,
    resolver: &'a dyn PropertyResolver,
    listener: &'a dyn GenerationListener,
}

impl<'a> Codegen<'a> {
    pub fn new(emitter: Emitter<'a>, namer: Namer, resolver: &'a dyn PropertyResolver) -> Self {
        Self {
            emitter,
            namer,
            resolver,
            listener: &NoopListener,
        }
    }

    pub fn with_listener(mut self, listener: &'a dyn GenerationListener) -> Self {
        self.listener = listener;
        self
    }

    pub fn handlers(&self) -> HandlerGenerator<'a> {
        HandlerGenerator::new(self.emitter, self.namer.clone())
    }

    pub fn hydrators(&self) -> HydratorGenerator<'a> {
        HydratorGenerator::new(self.emitter, self.namer.clone(), self.resolver)
            .with_listener(self.listener)
    }

    pub fn routes(&self) -> RoutesGenerator<'a> {
        RoutesGenerator::new(self.emitter, self.namer.clone())
    }

    /// Handlers, then hydrators, then the route table; the first error aborts the run
    pub fn run(
        &self,
        document: &OpenAPI,
        namespace: &str,
        output_dir: &Path,
        config_dir: &Path,
    ) -> Result<GenerationReport> {
        let handlers = self
            .handlers()
            .generate_from_document(document, output_dir, namespace)?;
        let hydrators = self
            .hydrators()
            .generate_from_document(document, output_dir, namespace)?;
        let routes_written = self
            .routes()
            .generate_from_document(document, namespace, config_dir)?;

        Ok(GenerationReport {
            handlers,
            hydrators,
            routes_written,
        })
    }
}
