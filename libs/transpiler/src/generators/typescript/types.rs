//! TypeScript spelling of declared property types

use crate::error::{Error, Result};
use crate::fragment::CodeFragmentId;
use crate::ir::{ScalarKind, TypeRef};
use crate::translation::{TypeReferenceTranslation, TypeReferenceTranslator, UnresolvedTypePolicy};

const ANY: &str = "any";

/// Maps model types to TypeScript types.
///
/// Scalars become TypeScript primitives, references become the referenced
/// interface name and contribute that type's fragment as a dependency.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTypeReferenceTranslator {
    unresolved: UnresolvedTypePolicy,
}

impl DefaultTypeReferenceTranslator {
    pub fn new(unresolved: UnresolvedTypePolicy) -> Self {
        Self { unresolved }
    }

    fn translate_into(&self, type_ref: &TypeRef, deps: &mut Vec<CodeFragmentId>) -> Result<String> {
        let name = match type_ref {
            TypeRef::Scalar(kind) => scalar_name(*kind).to_string(),
            TypeRef::Any => ANY.to_string(),
            TypeRef::Reference(name) => {
                deps.push(CodeFragmentId::for_type(name));
                name.name.clone()
            }
            TypeRef::Array(element) => {
                let element = self.translate_into(element, deps)?;
                if is_union(&element) {
                    format!("({})[]", element)
                } else {
                    format!("{}[]", element)
                }
            }
            TypeRef::Map { key, value } => {
                // Index signatures only accept string or number keys
                let key = match key.as_ref() {
                    TypeRef::Scalar(ScalarKind::Number) => "number",
                    _ => "string",
                };
                let value = self.translate_into(value, deps)?;
                format!("{{ [key: {}]: {} }}", key, value)
            }
            TypeRef::Nullable(inner) => {
                let inner = self.translate_into(inner, deps)?;
                format!("{} | null", inner)
            }
            TypeRef::Generic {
                definition,
                arguments,
            } if arguments.is_empty() => {
                self.unresolved_type(&definition.full_name(), "generic type without arguments")?
            }
            TypeRef::Generic {
                definition,
                arguments,
            } => {
                deps.push(CodeFragmentId::for_type(definition));
                let arguments = arguments
                    .iter()
                    .map(|argument| self.translate_into(argument, deps))
                    .collect::<Result<Vec<_>>>()?;
                format!("{}<{}>", definition.name, arguments.join(", "))
            }
            TypeRef::Parameter(name) => {
                self.unresolved_type(name, "unbound generic parameter")?
            }
            TypeRef::Unresolved(description) => {
                self.unresolved_type(description, "type could not be resolved")?
            }
        };
        Ok(name)
    }

    fn unresolved_type(&self, type_name: &str, reason: &str) -> Result<String> {
        match self.unresolved {
            UnresolvedTypePolicy::Fail => Err(Error::UnresolvedType {
                type_name: type_name.to_string(),
                reason: reason.to_string(),
            }),
            UnresolvedTypePolicy::Any => {
                tracing::warn!(type_name, reason, "Substituting `any` for unresolved type");
                Ok(ANY.to_string())
            }
        }
    }
}

impl TypeReferenceTranslator for DefaultTypeReferenceTranslator {
    fn translate(&self, type_ref: &TypeRef) -> Result<TypeReferenceTranslation> {
        let mut deps = Vec::new();
        let name = self.translate_into(type_ref, &mut deps)?;
        Ok(TypeReferenceTranslation::new(name, deps))
    }
}

fn scalar_name(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::Number => "number",
        ScalarKind::Boolean => "boolean",
        ScalarKind::Text => "string",
        ScalarKind::DateTime => "Date",
    }
}

/// Whether a rendered type is a top-level union and needs parentheses as an array element
fn is_union(rendered: &str) -> bool {
    let mut depth = 0i32;
    for c in rendered.chars() {
        match c {
            '<' | '{' | '(' | '[' => depth += 1,
            '>' | '}' | ')' | ']' => depth -= 1,
            '|' if depth == 0 => return true,
            _ => {}
        }
    }
    false
}
