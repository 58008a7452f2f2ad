//! Canonical naming shared by every generator.
//!
//! Handler, hydrator and route generation all derive identifiers through the same
//! [`Namer`], so a route can reference a handler it did not generate itself.

/// Suffix of the handler namespace and handler type names
pub const HANDLER_SUFFIX: &str = "Handler";
/// Suffix of the hydrator namespace and hydrator type names
pub const HYDRATOR_SUFFIX: &str = "Hydrator";
/// Suffix of the model namespace
pub const MODEL_SUFFIX: &str = "Model";

/// Convert a raw path or schema name into a type-name token.
///
/// Every run of non-alphanumeric characters is a separator; each remaining
/// segment gets its first character upper-cased and the segments are joined.
/// Letters outside ASCII, such as `ß` or `ö`, count as alphanumeric.
///
/// ```
/// use stubforge_core::naming::to_model_name;
///
/// assert_eq!(to_model_name("/pets/{petId}"), "PetsPetId");
/// assert_eq!(to_model_name("pet_store-item"), "PetStoreItem");
/// ```
pub fn to_model_name(raw: &str) -> String {
    raw.split(|c: char| !c.is_alphanumeric())
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect()
}

/// Append `suffix` to `base` as a new namespace segment.
pub fn to_namespace(base: &str, suffix: &str, separator: &str) -> String {
    if base.is_empty() {
        suffix.to_string()
    } else {
        format!("{base}{separator}{suffix}")
    }
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Pure naming strategy injected into the generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namer {
    separator: String,
}

impl Default for Namer {
    fn default() -> Self {
        Self::new("::")
    }
}

impl Namer {
    /// Create a namer joining namespace segments with `separator`
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// Namespace segment separator
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// See [`to_model_name`]
    pub fn model_name(&self, raw: &str) -> String {
        to_model_name(raw)
    }

    /// Handler type name for a raw path
    pub fn handler_name(&self, path: &str) -> String {
        format!("{}{HANDLER_SUFFIX}", self.model_name(path))
    }

    /// Hydrator type name for a raw schema name
    pub fn hydrator_name(&self, schema_name: &str) -> String {
        format!("{}{HYDRATOR_SUFFIX}", self.model_name(schema_name))
    }

    /// See [`to_namespace`]
    pub fn namespace(&self, base: &str, suffix: &str) -> String {
        to_namespace(base, suffix, &self.separator)
    }

    /// Fully-qualified reference to `name` inside `namespace`
    pub fn qualify(&self, namespace: &str, name: &str) -> String {
        format!("{namespace}{}{name}", self.separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_model_name() {
        assert_eq!(to_model_name("/pets/{petId}"), "PetsPetId");
        assert_eq!(to_model_name("/pets/:petId"), "PetsPetId");
        assert_eq!(to_model_name("pets-id"), "PetsId");
        assert_eq!(to_model_name("/pets/{id}"), "PetsId");
        assert_eq!(to_model_name("Pet"), "Pet");
        assert_eq!(to_model_name("new_pet.v2"), "NewPetV2");
        assert_eq!(to_model_name("/"), "");
    }

    #[test]
    fn test_to_model_name_keeps_unicode_letters() {
        assert_eq!(to_model_name("größe"), "Größe");
        assert_eq!(to_model_name("/maße/{höhe}"), "MaßeHöhe");
    }

    #[test]
    fn test_to_model_name_keeps_inner_case() {
        assert_eq!(to_model_name("HTTPResponse"), "HTTPResponse");
        assert_eq!(to_model_name("findByStatus"), "FindByStatus");
    }

    #[test]
    fn test_to_namespace() {
        assert_eq!(to_namespace("App", "Handler", "::"), "App::Handler");
        assert_eq!(to_namespace("App\\Api", "Model", "\\"), "App\\Api\\Model");
        assert_eq!(to_namespace("", "Model", "::"), "Model");
    }

    #[test]
    fn test_namer() {
        let namer = Namer::default();
        assert_eq!(namer.handler_name("/widgets/{id}"), "WidgetsIdHandler");
        assert_eq!(namer.hydrator_name("widget"), "WidgetHydrator");
        assert_eq!(namer.qualify("App::Model", "Widget"), "App::Model::Widget");
        assert_eq!(namer.namespace("App", HYDRATOR_SUFFIX), "App::Hydrator");
    }
}
