//! Parser for type model documents
//!
//! Reads the JSON export of a type model and builds the intermediate
//! representation (IR) plus the documentation written inline in the document.
//!
//! ```json
//! {
//!   "types": [
//!     {
//!       "namespace": "Example.Targets",
//!       "name": "ExampleClass2",
//!       "documentation": "Simple example class type.",
//!       "properties": [
//!         { "name": "SomeProperty", "type": "string" },
//!         { "name": "Children", "type": { "array": "Example.Targets.ExampleClass2" } }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde_json::{Map, Value};

use crate::documentation::{DocumentationMap, MemberRef};
use crate::error::{Error, Result};
use crate::ir::{ScalarKind, TypeDescriptor, TypeModel, TypeName, TypeRef};

/// Type keywords that mean "untyped"
const ANY_KEYWORDS: [&str; 3] = ["object", "any", "dynamic"];

/// Parsed document: the types and their inline documentation
#[derive(Debug, Clone, Default)]
pub struct ParsedModel {
    pub model: TypeModel,
    pub documentation: DocumentationMap,
}

/// Parse a type model document from text
pub fn parse_str(input: &str) -> Result<ParsedModel> {
    let value: Value = serde_json::from_str(input)?;
    parse_document(&value)
}

/// Parse a type model document
pub fn parse_document(document: &Value) -> Result<ParsedModel> {
    let types = document
        .get("types")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid("types", "expected an array"))?;

    let mut parsed = ParsedModel::default();
    for (i, type_value) in types.iter().enumerate() {
        let path = format!("types[{}]", i);
        let type_def = parse_type(type_value, &path, &mut parsed.documentation)?;
        parsed.model.add_type(type_def)?;
    }

    Ok(parsed)
}

/// Parse a single type definition
fn parse_type(value: &Value, path: &str, docs: &mut DocumentationMap) -> Result<TypeDescriptor> {
    let object = value
        .as_object()
        .ok_or_else(|| invalid(path, "expected an object"))?;

    let name = required_str(object, "name", path)?;
    let namespace = optional_str(object, "namespace", path)?;
    let type_name = TypeName::new(namespace, name);

    if let Some(text) = optional_str(object, "documentation", path)? {
        docs.insert_member(MemberRef::Type(&type_name), text);
    }

    let mut type_def = TypeDescriptor::new(type_name);

    let properties: &[Value] = match object.get("properties") {
        None | Some(Value::Null) => &[],
        Some(Value::Array(properties)) => properties,
        Some(_) => return Err(invalid(&format!("{}.properties", path), "expected an array")),
    };

    for (i, property) in properties.iter().enumerate() {
        let property_path = format!("{}.properties[{}]", path, i);
        let property = property
            .as_object()
            .ok_or_else(|| invalid(&property_path, "expected an object"))?;

        let property_name = required_str(property, "name", &property_path)?;
        let type_value = property
            .get("type")
            .ok_or_else(|| invalid(&property_path, "missing 'type'"))?;
        let type_ref = parse_type_ref(type_value, &format!("{}.type", property_path))?;

        if let Some(text) = optional_str(property, "documentation", &property_path)? {
            docs.insert_member(
                MemberRef::Property {
                    declaring: &type_def.name,
                    name: property_name,
                },
                text,
            );
        }

        type_def = type_def.with_property(property_name, type_ref);
    }

    Ok(type_def)
}

/// Parse a property type.
///
/// Strings are scalar keywords or fully-qualified references; objects carry
/// exactly one of `reference`, `array`, `map`, `nullable`, `generic`,
/// `parameter` or `unresolved`.
pub fn parse_type_ref(value: &Value, path: &str) -> Result<TypeRef> {
    match value {
        Value::String(keyword) => parse_keyword(keyword, path),
        Value::Object(object) => parse_type_object(object, path),
        _ => Err(invalid(path, "expected a string or an object")),
    }
}

fn parse_keyword(keyword: &str, path: &str) -> Result<TypeRef> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(invalid(path, "empty type name"));
    }
    if let Some(kind) = ScalarKind::from_keyword(keyword) {
        return Ok(TypeRef::Scalar(kind));
    }
    if ANY_KEYWORDS.contains(&keyword.to_ascii_lowercase().as_str()) {
        return Ok(TypeRef::Any);
    }
    Ok(TypeRef::reference(keyword))
}

fn parse_type_object(object: &Map<String, Value>, path: &str) -> Result<TypeRef> {
    const SHAPES: [&str; 7] = [
        "reference",
        "array",
        "map",
        "nullable",
        "generic",
        "parameter",
        "unresolved",
    ];

    let shapes: Vec<&str> = SHAPES
        .iter()
        .copied()
        .filter(|shape| object.contains_key(*shape))
        .collect();
    let [shape] = shapes.as_slice() else {
        return Err(invalid(
            path,
            &format!("expected exactly one of {}", SHAPES.join(", ")),
        ));
    };

    // Only generics carry a sibling key
    for key in object.keys() {
        if key != *shape && !(*shape == "generic" && key == "arguments") {
            return Err(invalid(path, &format!("unexpected key '{}'", key)));
        }
    }

    let inner_path = format!("{}.{}", path, shape);
    let inner = &object[*shape];

    let type_ref = match *shape {
        "reference" => TypeRef::reference(required_name(inner, &inner_path)?),
        "array" => TypeRef::array(parse_type_ref(inner, &inner_path)?),
        "nullable" => TypeRef::nullable(parse_type_ref(inner, &inner_path)?),
        "map" => {
            if let Some(key) = inner
                .as_object()
                .and_then(|entries| entries.keys().find(|k| *k != "key" && *k != "value"))
            {
                return Err(invalid(&inner_path, &format!("unexpected key '{}'", key)));
            }
            let key = inner
                .get("key")
                .ok_or_else(|| invalid(&inner_path, "missing 'key'"))?;
            let value = inner
                .get("value")
                .ok_or_else(|| invalid(&inner_path, "missing 'value'"))?;
            TypeRef::map(
                parse_type_ref(key, &format!("{}.key", inner_path))?,
                parse_type_ref(value, &format!("{}.value", inner_path))?,
            )
        }
        "generic" => {
            let definition = TypeName::parse(required_name(inner, &inner_path)?);
            let arguments = match object.get("arguments") {
                Some(Value::Array(arguments)) => arguments
                    .iter()
                    .enumerate()
                    .map(|(i, argument)| {
                        parse_type_ref(argument, &format!("{}.arguments[{}]", path, i))
                    })
                    .collect::<Result<Vec<_>>>()?,
                _ => return Err(invalid(&format!("{}.arguments", path), "expected an array")),
            };
            TypeRef::Generic {
                definition,
                arguments,
            }
        }
        "parameter" => TypeRef::Parameter(required_name(inner, &inner_path)?.to_string()),
        _ => TypeRef::Unresolved(required_name(inner, &inner_path)?.to_string()),
    };

    Ok(type_ref)
}

fn required_name<'a>(value: &'a Value, path: &str) -> Result<&'a str> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| invalid(path, "expected a non-empty string"))
}

fn required_str<'a>(object: &'a Map<String, Value>, key: &str, path: &str) -> Result<&'a str> {
    optional_str(object, key, path)?
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| invalid(path, &format!("missing '{}'", key)))
}

fn optional_str<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<&'a str>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(invalid(&format!("{}.{}", path, key), "expected a string")),
    }
}

fn invalid(path: &str, message: &str) -> Error {
    Error::InvalidTypeModel(format!("{}: {}", path, message))
}
