//! Error types for transpilation

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Template not registered: {0}")]
    MissingTemplate(String),

    #[error("Cannot translate type reference {type_name}: {reason}")]
    UnresolvedType { type_name: String, reason: String },

    #[error("Property {type_name}.{property}: {source}")]
    Property {
        type_name: String,
        property: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Invalid type model: {0}")]
    InvalidTypeModel(String),

    #[error("Type defined more than once: {0}")]
    DuplicateType(String),

    #[error("Type not found in model: {0}")]
    UnknownType(String),

    #[error("Fragments {first} and {second} would both be written to {file}")]
    OutputCollision {
        file: String,
        first: String,
        second: String,
    },

    #[error("Documentation XML error: {0}")]
    DocumentationXml(#[from] roxmltree::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an error raised while handling a single property of a type.
    pub(crate) fn in_property(self, type_name: &str, property: &str) -> Self {
        Error::Property {
            type_name: type_name.to_string(),
            property: property.to_string(),
            source: Box::new(self),
        }
    }
}
