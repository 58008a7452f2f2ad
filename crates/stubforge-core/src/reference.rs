//! Validation of local `$ref` pointers into `components`.

use openapiv3::{OpenAPI, Parameter, ReferenceOr};

use crate::{Error, Result};

/// Prefix of every supported schema reference
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";
/// Prefix of every supported parameter reference
pub const PARAMETER_REF_PREFIX: &str = "#/components/parameters/";

/// Recover `<Name>` from `#/components/schemas/<Name>`.
///
/// ```
/// use stubforge_core::reference::schema_name;
///
/// assert_eq!(schema_name("#/components/schemas/Pet").unwrap(), "Pet");
/// assert!(schema_name("#/definitions/Pet").is_err());
/// ```
pub fn schema_name(reference: &str) -> Result<&str> {
    component_name(reference, SCHEMA_REF_PREFIX)
}

/// Recover `<Name>` from `#/components/parameters/<Name>`.
pub fn parameter_name(reference: &str) -> Result<&str> {
    component_name(reference, PARAMETER_REF_PREFIX)
}

fn component_name<'r>(reference: &'r str, prefix: &'static str) -> Result<&'r str> {
    match reference.strip_prefix(prefix) {
        Some(name) if !name.is_empty() && !name.contains('/') => Ok(name),
        _ => Err(Error::unsupported_reference(reference, prefix)),
    }
}

/// Resolve an inline or referenced parameter against `components.parameters`.
pub fn resolve_parameter<'d>(
    document: &'d OpenAPI,
    parameter: &'d ReferenceOr<Parameter>,
) -> Result<&'d Parameter> {
    match parameter {
        ReferenceOr::Item(parameter) => Ok(parameter),
        ReferenceOr::Reference { reference } => {
            let name = parameter_name(reference)?;
            document
                .components
                .as_ref()
                .and_then(|components| components.parameters.get(name))
                .and_then(ReferenceOr::as_item)
                .ok_or_else(|| Error::openapi(format!("Parameter '{}' not found", name)))
        }
    }
}
