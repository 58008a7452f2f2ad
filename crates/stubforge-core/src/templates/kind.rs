//! Template kinds (target languages) supported by stubforge.
//!
//! A kind decides the file extension of generated artifacts, the namespace
//! separator used in fully-qualified references and how schema types are spelled.
//!
//! # Examples
//!
//! ```
//! use stubforge_core::templates::TemplateKind;
//! use std::str::FromStr;
//!
//! let kind = TemplateKind::from_str("php").unwrap();
//! assert_eq!(kind.extension(), "php");
//! assert_eq!(kind.namespace_separator(), "\\");
//!
//! assert_eq!(TemplateKind::default(), TemplateKind::Rust);
//! ```

// Internal imports (std, crate)
use std::fmt;
use std::str::FromStr;

/// Primitive OpenAPI types after format resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// `type: string`
    String,
    /// `type: integer, format: int32`
    Int32,
    /// `type: integer` with any other format
    Int64,
    /// `type: number, format: float`
    Float,
    /// `type: number` with any other format
    Double,
    /// `type: boolean`
    Boolean,
}

/// Supported template kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemplateKind {
    /// Rust modules
    #[default]
    Rust,
    /// PHP classes
    Php,
}

impl FromStr for TemplateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rust" => Ok(TemplateKind::Rust),
            "php" => Ok(TemplateKind::Php),
            _ => Err(format!("Unknown template kind: {}", s)),
        }
    }
}

impl TemplateKind {
    /// Returns the template identifier as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rust => "rust",
            Self::Php => "php",
        }
    }

    /// Returns an iterator over all available template kinds
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::Rust, Self::Php].into_iter()
    }

    /// File extension of generated artifacts
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Rust => "rs",
            Self::Php => "php",
        }
    }

    /// Separator between namespace segments
    pub fn namespace_separator(&self) -> &'static str {
        match self {
            Self::Rust => "::",
            Self::Php => "\\",
        }
    }

    /// Spelling of a primitive type
    pub fn primitive_type(&self, primitive: Primitive) -> &'static str {
        match (self, primitive) {
            (Self::Rust, Primitive::String) => "String",
            (Self::Rust, Primitive::Int32) => "i32",
            (Self::Rust, Primitive::Int64) => "i64",
            (Self::Rust, Primitive::Float) => "f32",
            (Self::Rust, Primitive::Double) => "f64",
            (Self::Rust, Primitive::Boolean) => "bool",
            (Self::Php, Primitive::String) => "string",
            (Self::Php, Primitive::Int32 | Primitive::Int64) => "int",
            (Self::Php, Primitive::Float | Primitive::Double) => "float",
            (Self::Php, Primitive::Boolean) => "bool",
        }
    }

    /// Spelling of a list of `item`
    pub fn array_type(&self, item: &str) -> String {
        match self {
            Self::Rust => format!("Vec<{item}>"),
            Self::Php => format!("{item}[]"),
        }
    }

    /// Spelling of a free-form value
    pub fn any_type(&self) -> &'static str {
        match self {
            Self::Rust => "serde_json::Value",
            Self::Php => "mixed",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
