//! Code generators for target languages
//!
//! Each language has its own module that implements the `Generator` trait.

pub mod typescript;

use heck::ToLowerCamelCase;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ir::TypeDescriptor;
use crate::translation::UnresolvedTypePolicy;

/// Trait that all language generators must implement
pub trait Generator {
    /// The output type of this generator
    type Output;

    /// Generate code for the given types, in order
    fn generate(&self, types: &[TypeDescriptor]) -> Result<Self::Output>;
}

/// How property names are spelled in generated code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyNaming {
    /// Keep the name as declared in the model
    #[default]
    Preserve,
    /// `SomeProperty` -> `someProperty`
    CamelCase,
}

impl PropertyNaming {
    pub fn apply(self, name: &str) -> String {
        match self {
            PropertyNaming::Preserve => name.to_string(),
            PropertyNaming::CamelCase => name.to_lower_camel_case(),
        }
    }
}

/// Configuration options for code generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Whether to generate documentation comments
    pub generate_docs: bool,
    /// Spelling of property names
    pub property_naming: PropertyNaming,
    /// Handling of types the model could not resolve
    pub unresolved_types: UnresolvedTypePolicy,
    /// Indentation of the property block
    pub indent: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generate_docs: true,
            property_naming: PropertyNaming::default(),
            unresolved_types: UnresolvedTypePolicy::default(),
            indent: "    ".to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from YAML; missing fields keep their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Set whether to generate documentation comments.
    pub fn generate_docs(mut self, value: bool) -> Self {
        self.generate_docs = value;
        self
    }

    /// Set the property naming.
    pub fn property_naming(mut self, value: PropertyNaming) -> Self {
        self.property_naming = value;
        self
    }

    /// Set the handling of unresolved types.
    pub fn unresolved_types(mut self, value: UnresolvedTypePolicy) -> Self {
        self.unresolved_types = value;
        self
    }

    /// Set the indentation.
    pub fn indent(mut self, value: impl Into<String>) -> Self {
        self.indent = value.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_naming() {
        assert_eq!(PropertyNaming::Preserve.apply("SomeProperty"), "SomeProperty");
        assert_eq!(PropertyNaming::CamelCase.apply("SomeProperty"), "someProperty");
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
generate_docs: false
property_naming: CamelCase
unresolved_types: Any
"#;
        let config = GeneratorConfig::from_yaml(yaml).unwrap();
        assert!(!config.generate_docs);
        assert_eq!(config.property_naming, PropertyNaming::CamelCase);
        assert_eq!(config.unresolved_types, UnresolvedTypePolicy::Any);
        assert_eq!(config.indent, "    ");
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        assert!(GeneratorConfig::from_yaml("generate_serde: true").is_err());
    }

    #[test]
    fn test_config_yaml_round_trip() {
        let config = GeneratorConfig::new()
            .generate_docs(false)
            .indent("\t")
            .unresolved_types(UnresolvedTypePolicy::Any);
        let yaml = config.to_yaml().unwrap();
        assert_eq!(GeneratorConfig::from_yaml(&yaml).unwrap(), config);
    }
}
