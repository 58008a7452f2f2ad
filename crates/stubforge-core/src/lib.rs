//! Stubforge Core Library
//!
//! This library generates handler, model hydrator and route table stubs from
//! OpenAPI specifications. Generators render Tera templates and never overwrite
//! artifacts protected by the ignore rules.

pub mod config;
pub mod error;
pub mod events;
pub mod generate;
pub mod generator;
pub mod model;
pub mod naming;
pub mod openapi;
pub mod output;
pub mod reference;
pub mod templates;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::{
    config::Config,
    error::{Error, Result},
    generate::generate,
    generator::{Codegen, GenerationReport},
    naming::Namer,
    openapi::OpenApiContext,
    templates::{TemplateDir, TemplateKind, TemplateManager},
};
