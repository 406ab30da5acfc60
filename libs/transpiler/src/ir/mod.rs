//! Intermediate Representation (IR)
//!
//! Language-agnostic description of the types to transpile: names, ordered
//! property lists and the shape of every property's declared type.
//! The transpiler only ever looks at types through this model.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};

/// Namespace-qualified name of a type
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeName {
    /// Dotted namespace (e.g., "Example.Targets"); `None` for the global namespace
    pub namespace: Option<String>,
    /// Simple name (e.g., "ExampleClass1")
    pub name: String,
}

impl TypeName {
    pub fn new(namespace: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.filter(|ns| !ns.is_empty()).map(String::from),
            name: name.into(),
        }
    }

    /// Split a fully-qualified name at its last dot.
    /// E.g., "Example.Targets.ExampleClass1" -> ("Example.Targets", "ExampleClass1")
    pub fn parse(full_name: &str) -> Self {
        match full_name.rsplit_once('.') {
            Some((namespace, name)) => Self::new(Some(namespace), name),
            None => Self::new(None, full_name),
        }
    }

    /// Fully-qualified name
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{}.{}", namespace, self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(namespace) = &self.namespace {
            write!(f, "{}.", namespace)?;
        }
        f.write_str(&self.name)
    }
}

/// Built-in scalar families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    /// Integers, floating point and decimal numbers
    Number,
    Boolean,
    /// Strings, characters, GUIDs
    Text,
    /// Dates, times, offsets and durations
    DateTime,
}

impl ScalarKind {
    /// Resolve a scalar keyword (case-insensitive).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let kind = match keyword.to_ascii_lowercase().as_str() {
            "byte" | "sbyte" | "short" | "ushort" | "int" | "uint" | "long" | "ulong"
            | "int8" | "uint8" | "int16" | "uint16" | "int32" | "uint32" | "int64"
            | "uint64" | "float" | "single" | "double" | "decimal" | "number" => {
                ScalarKind::Number
            }
            "bool" | "boolean" => ScalarKind::Boolean,
            "string" | "char" | "guid" => ScalarKind::Text,
            "datetime" | "datetimeoffset" | "date" | "time" | "timespan" => ScalarKind::DateTime,
            _ => return None,
        };
        Some(kind)
    }
}

/// Shape of a declared property type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeRef {
    Scalar(ScalarKind),
    /// Another (potentially transpiled) type, possibly the declaring type itself
    Reference(TypeName),
    /// Homogeneous collection
    Array(Box<TypeRef>),
    /// Keyed collection
    Map { key: Box<TypeRef>, value: Box<TypeRef> },
    /// Value that may be absent
    Nullable(Box<TypeRef>),
    /// Instantiated generic type, e.g. `Pair<A, B>`
    Generic {
        definition: TypeName,
        arguments: Vec<TypeRef>,
    },
    /// Generic parameter without a concrete argument
    Parameter(String),
    /// Type the model could not resolve (description of what was found)
    Unresolved(String),
    /// Explicitly untyped value
    Any,
}

impl TypeRef {
    pub fn reference(full_name: &str) -> Self {
        TypeRef::Reference(TypeName::parse(full_name))
    }

    pub fn array(element: TypeRef) -> Self {
        TypeRef::Array(Box::new(element))
    }

    pub fn nullable(inner: TypeRef) -> Self {
        TypeRef::Nullable(Box::new(inner))
    }

    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        TypeRef::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }
}

/// A property of a type, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub name: String,
    pub type_ref: TypeRef,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
        }
    }
}

/// A single type to transpile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: TypeName,
    pub properties: Vec<PropertyDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: TypeName) -> Self {
        Self {
            name,
            properties: Vec::new(),
        }
    }

    /// Append a property (builder style)
    pub fn with_property(mut self, name: impl Into<String>, type_ref: TypeRef) -> Self {
        self.properties.push(PropertyDescriptor::new(name, type_ref));
        self
    }
}

/// Ordered registry of type descriptors
#[derive(Debug, Clone, Default)]
pub struct TypeModel {
    /// Types in document order
    types: Vec<TypeDescriptor>,
    /// Fully-qualified name -> position
    name_index: HashMap<String, usize>,
    /// Simple name -> position, `None` once the simple name is ambiguous
    simple_index: HashMap<String, Option<usize>>,
}

impl TypeModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type; fully-qualified names must be unique
    pub fn add_type(&mut self, type_def: TypeDescriptor) -> Result<()> {
        let full_name = type_def.name.full_name();
        if self.name_index.contains_key(&full_name) {
            return Err(Error::DuplicateType(full_name));
        }

        let position = self.types.len();
        self.simple_index
            .entry(type_def.name.name.clone())
            .and_modify(|slot| *slot = None)
            .or_insert(Some(position));
        self.name_index.insert(full_name, position);
        self.types.push(type_def);
        Ok(())
    }

    /// Look up a type by fully-qualified name, or by simple name when that is unambiguous
    pub fn get_type(&self, name: &str) -> Option<&TypeDescriptor> {
        self.name_index
            .get(name)
            .copied()
            .or_else(|| self.simple_index.get(name).copied().flatten())
            .map(|i| &self.types[i])
    }

    /// Iterate over all types in document order
    pub fn types(&self) -> &[TypeDescriptor] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Pick types by name, in the order given
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<TypeDescriptor>> {
        names
            .iter()
            .map(|name| {
                self.get_type(name.as_ref())
                    .cloned()
                    .ok_or_else(|| Error::UnknownType(name.as_ref().to_string()))
            })
            .collect()
    }
}
