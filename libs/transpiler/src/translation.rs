//! Translation of declared property types into target-language type references

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fragment::CodeFragmentId;
use crate::ir::TypeRef;

/// A translated type reference together with the fragments it pulls in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReferenceTranslation {
    referenced_type_name: String,
    dependencies: Vec<CodeFragmentId>,
}

impl TypeReferenceTranslation {
    pub fn new(referenced_type_name: impl Into<String>, dependencies: Vec<CodeFragmentId>) -> Self {
        Self {
            referenced_type_name: referenced_type_name.into(),
            dependencies: crate::fragment::distinct(dependencies),
        }
    }

    /// Translation of a type that needs no other fragment
    pub fn without_dependencies(referenced_type_name: impl Into<String>) -> Self {
        Self::new(referenced_type_name, Vec::new())
    }

    /// Target-language spelling of the type
    pub fn referenced_type_name(&self) -> &str {
        &self.referenced_type_name
    }

    pub fn dependencies(&self) -> &[CodeFragmentId] {
        &self.dependencies
    }

    pub fn into_parts(self) -> (String, Vec<CodeFragmentId>) {
        (self.referenced_type_name, self.dependencies)
    }
}

/// What to do with types the model cannot resolve (unbound generic parameters, unknown shapes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnresolvedTypePolicy {
    /// Abort the transpilation with [`crate::Error::UnresolvedType`]
    #[default]
    Fail,
    /// Emit the target language's untyped marker without dependencies
    Any,
}

/// Maps declared property types to target-language type references.
///
/// Implementations must be pure: the same `TypeRef` always yields the same translation.
pub trait TypeReferenceTranslator {
    fn translate(&self, type_ref: &TypeRef) -> Result<TypeReferenceTranslation>;
}

impl<T: TypeReferenceTranslator + ?Sized> TypeReferenceTranslator for &T {
    fn translate(&self, type_ref: &TypeRef) -> Result<TypeReferenceTranslation> {
        (**self).translate(type_ref)
    }
}
