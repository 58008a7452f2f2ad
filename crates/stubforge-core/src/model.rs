//! Model property resolution for component schemas.

// External imports (alphabetized)
use openapiv3::{
    IntegerFormat, NumberFormat, ReferenceOr, Schema, SchemaKind, Type, VariantOrUnknownOrEmpty,
};
use serde::{Deserialize, Serialize};

use crate::{
    naming::Namer,
    reference::schema_name,
    templates::{Primitive, TemplateKind},
    Result,
};

/// One property of a generated model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelProperty {
    /// Property name as written in the schema
    pub name: String,
    /// Target-language type of the property
    #[serde(rename = "type")]
    pub type_name: String,
    /// Listed in the schema's `required`
    pub required: bool,
    /// Declared `nullable: true`
    pub nullable: bool,
}

/// Resolves the ordered property list of a schema.
pub trait PropertyResolver {
    /// Properties of the component schema `name`
    fn properties(&self, schema: &Schema, name: &str) -> Result<Vec<ModelProperty>>;
}

/// Resolves properties straight from the schema, spelling types for a template kind.
///
/// Objects (and untyped schemas carrying `properties`) yield their properties in
/// declaration order. `allOf` concatenates its inline members; referenced members
/// are skipped and the first declaration of a property name wins.
#[derive(Debug, Clone, Default)]
pub struct SchemaPropertyResolver {
    kind: TemplateKind,
    namer: Namer,
}

impl SchemaPropertyResolver {
    /// Resolver spelling types for `kind`
    pub fn new(kind: TemplateKind) -> Self {
        Self {
            kind,
            namer: Namer::new(kind.namespace_separator()),
        }
    }

    /// Target-language type of a property schema
    pub fn type_of(&self, schema: &ReferenceOr<Box<Schema>>) -> Result<String> {
        match schema {
            ReferenceOr::Reference { reference } => {
                Ok(self.namer.model_name(schema_name(reference)?))
            }
            ReferenceOr::Item(schema) => self.type_of_schema(schema),
        }
    }

    fn type_of_schema(&self, schema: &Schema) -> Result<String> {
        let primitive = match &schema.schema_kind {
            SchemaKind::Type(Type::String(_)) => Primitive::String,
            SchemaKind::Type(Type::Integer(integer)) => match integer.format {
                VariantOrUnknownOrEmpty::Item(IntegerFormat::Int32) => Primitive::Int32,
                _ => Primitive::Int64,
            },
            SchemaKind::Type(Type::Number(number)) => match number.format {
                VariantOrUnknownOrEmpty::Item(NumberFormat::Float) => Primitive::Float,
                _ => Primitive::Double,
            },
            SchemaKind::Type(Type::Boolean { .. }) => Primitive::Boolean,
            SchemaKind::Type(Type::Array(array)) => {
                let item = match &array.items {
                    Some(items) => self.type_of(items)?,
                    None => self.kind.any_type().to_string(),
                };
                return Ok(self.kind.array_type(&item));
            }
            _ => return Ok(self.kind.any_type().to_string()),
        };
        Ok(self.kind.primitive_type(primitive).to_string())
    }

    fn collect<'s>(
        &self,
        properties: impl IntoIterator<Item = (&'s String, &'s ReferenceOr<Box<Schema>>)>,
        required: &[String],
        out: &mut Vec<ModelProperty>,
    ) -> Result<()> {
        for (name, schema) in properties {
            if out.iter().any(|existing| &existing.name == name) {
                continue;
            }
            let nullable = match schema {
                ReferenceOr::Item(schema) => schema.schema_data.nullable,
                ReferenceOr::Reference { .. } => false,
            };
            out.push(ModelProperty {
                name: name.clone(),
                type_name: self.type_of(schema)?,
                required: required.contains(name),
                nullable,
            });
        }
        Ok(())
    }

    fn collect_schema(&self, schema: &Schema, name: &str, out: &mut Vec<ModelProperty>) -> Result<()> {
        match &schema.schema_kind {
            SchemaKind::Type(Type::Object(object)) => {
                self.collect(&object.properties, &object.required, out)
            }
            SchemaKind::Any(any) => self.collect(&any.properties, &any.required, out),
            SchemaKind::AllOf { all_of } => {
                for member in all_of {
                    match member {
                        ReferenceOr::Item(member) => self.collect_schema(member, name, out)?,
                        ReferenceOr::Reference { reference } => {
                            log::debug!("Skipping allOf reference {} in schema '{}'", reference, name);
                        }
                    }
                }
                Ok(())
            }
            _ => {
                log::debug!("Schema '{}' has no properties", name);
                Ok(())
            }
        }
    }
}

impl PropertyResolver for SchemaPropertyResolver {
    fn properties(&self, schema: &Schema, name: &str) -> Result<Vec<ModelProperty>> {
        let mut properties = Vec::new();
        self.collect_schema(schema, name, &mut properties)?;
        Ok(properties)
    }
}
