//! OpenAPI specification loading and traversal.
//!
//! This module provides functionality for loading OpenAPI specifications into the
//! typed `openapiv3` object graph, plus the ordered accessors the generators walk.
//!
//! # Examples
//!
//! ```no_run
//! use stubforge_core::openapi::OpenApiContext;
//! use stubforge_core::error::Result;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let spec = OpenApiContext::from_file_or_url("openapi.yaml").await?;
//!
//! for (path, _item) in spec.paths() {
//!     println!("{}", path);
//! }
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::Path;

use crate::Error;

// External imports (alphabetized)
use openapiv3::{OpenAPI, Operation, PathItem, ReferenceOr, Schema};
use tokio::fs;

/// A loaded OpenAPI specification
#[derive(Debug, Clone)]
pub struct OpenApiContext {
    document: OpenAPI,
}

impl OpenApiContext {
    /// Wrap an already parsed document
    pub fn new(document: OpenAPI) -> Self {
        Self { document }
    }

    /// Load a spec from a file or URL (supports both YAML and JSON)
    pub async fn from_file_or_url<P: AsRef<str>>(location: P) -> crate::Result<Self> {
        let location = location.as_ref();

        if location.starts_with("http://") || location.starts_with("https://") {
            return Self::from_url(location).await;
        }

        Self::from_file(location).await
    }

    /// Load a spec from a file (supports both YAML and JSON)
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        Self::parse_content(&content).map_err(|e| {
            Error::openapi(format!(
                "Failed to parse OpenAPI spec at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load a spec from a URL (supports both YAML and JSON)
    pub async fn from_url(url: &str) -> crate::Result<Self> {
        let response = reqwest::get(url).await.map_err(|e| {
            Error::openapi(format!("Failed to fetch OpenAPI spec from {}: {}", url, e))
        })?;

        if !response.status().is_success() {
            return Err(Error::openapi(format!(
                "Failed to fetch OpenAPI spec from {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let content = response.text().await.map_err(|e| {
            Error::openapi(format!("Failed to read response from {}: {}", url, e))
        })?;

        Self::parse_content(&content).map_err(|e| {
            Error::openapi(format!("Failed to parse OpenAPI spec from {}: {}", url, e))
        })
    }

    /// Parse content as either JSON or YAML
    pub fn parse_content(content: &str) -> Result<Self, String> {
        let json_error = match serde_json::from_str(content) {
            Ok(document) => return Ok(Self { document }),
            Err(e) => e,
        };

        match serde_yaml::from_str(content) {
            Ok(document) => Ok(Self { document }),
            Err(yaml_error) => Err(format!(
                "content is neither a valid JSON ({}) nor YAML ({}) document",
                json_error, yaml_error
            )),
        }
    }

    /// The typed document
    pub fn document(&self) -> &OpenAPI {
        &self.document
    }

    /// Get the title of the API
    pub fn title(&self) -> &str {
        &self.document.info.title
    }

    /// Get the version of the API
    pub fn version(&self) -> &str {
        &self.document.info.version
    }

    /// See [`paths`]
    pub fn paths(&self) -> impl Iterator<Item = (&str, &PathItem)> {
        paths(&self.document)
    }

    /// See [`schemas`]
    pub fn schemas(&self) -> impl Iterator<Item = (&str, &ReferenceOr<Schema>)> {
        schemas(&self.document)
    }
}

/// Path items in document order.
///
/// Path entries that are themselves `$ref`s are skipped.
pub fn paths(document: &OpenAPI) -> impl Iterator<Item = (&str, &PathItem)> {
    document
        .paths
        .paths
        .iter()
        .filter_map(|(path, item)| match item {
            ReferenceOr::Item(item) => Some((path.as_str(), item)),
            ReferenceOr::Reference { reference } => {
                log::warn!("Skipping path '{}' defined by reference {}", path, reference);
                None
            }
        })
}

/// Component schemas in document order; empty when `components` is absent.
pub fn schemas(document: &OpenAPI) -> impl Iterator<Item = (&str, &ReferenceOr<Schema>)> {
    document
        .components
        .iter()
        .flat_map(|components| components.schemas.iter())
        .map(|(name, schema)| (name.as_str(), schema))
}

/// Operations of a path item with their upper-case HTTP method, in the fixed
/// order get, put, post, delete, options, head, patch, trace.
pub fn operations(item: &PathItem) -> impl Iterator<Item = (&'static str, &Operation)> {
    [
        ("GET", &item.get),
        ("PUT", &item.put),
        ("POST", &item.post),
        ("DELETE", &item.delete),
        ("OPTIONS", &item.options),
        ("HEAD", &item.head),
        ("PATCH", &item.patch),
        ("TRACE", &item.trace),
    ]
    .into_iter()
    .filter_map(|(method, operation)| operation.as_ref().map(|op| (method, op)))
}
