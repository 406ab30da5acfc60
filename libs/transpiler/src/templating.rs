//! Named text templates with `{{Placeholder}}` substitution

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Template for a complete type declaration
pub const CLASS_DEFINITION: &str = "ClassDefinition";
/// Template for a single property declaration
pub const PROPERTY_DEFINITION: &str = "PropertyDefinition";

const TEMPLATE_EXTENSION: &str = "template";

const DEFAULT_CLASS_DEFINITION: &str =
    "{{Documentation}}export interface {{ClassDeclaration}} {\n{{Properties}}\n}\n";
const DEFAULT_PROPERTY_DEFINITION: &str = "{{Documentation}}{{PropertyName}}: {{PropertyType}};";

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern is valid")
});

/// Placeholder name -> replacement text
pub type Substitutions<'a> = HashMap<&'a str, String>;

/// Renders named templates
pub trait TemplatingEngine {
    /// Render `template_name` with the given substitutions.
    ///
    /// Fails with [`Error::MissingTemplate`] when no such template is registered.
    fn use_template(&self, template_name: &str, substitutions: &Substitutions<'_>) -> Result<String>;
}

/// In-memory template store
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, String>,
}

impl TemplateRegistry {
    /// Empty registry without any templates
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in TypeScript templates
    pub fn typescript() -> Self {
        let mut registry = Self::new();
        registry.register(CLASS_DEFINITION, DEFAULT_CLASS_DEFINITION);
        registry.register(PROPERTY_DEFINITION, DEFAULT_PROPERTY_DEFINITION);
        registry
    }

    /// Built-in templates overridden by every `*.template` file in `dir`.
    /// The file stem is the template name.
    pub fn from_directory(dir: &Path) -> Result<Self> {
        let mut registry = Self::typescript();
        registry.load_directory(dir)?;
        Ok(registry)
    }

    /// Register every `*.template` file in `dir`, replacing templates of the same name
    pub fn load_directory(&mut self, dir: &Path) -> Result<usize> {
        let mut loaded = 0;
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let text = fs::read_to_string(&path)?;
            tracing::debug!(template = name, path = %path.display(), "Loaded template");
            self.register(name, text);
            loaded += 1;
        }
        Ok(loaded)
    }

    pub fn register(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.templates.insert(name.into(), text.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }
}

impl TemplatingEngine for TemplateRegistry {
    fn use_template(&self, template_name: &str, substitutions: &Substitutions<'_>) -> Result<String> {
        let template = self
            .templates
            .get(template_name)
            .ok_or_else(|| Error::MissingTemplate(template_name.to_string()))?;
        Ok(render(template, substitutions))
    }
}

impl<T: TemplatingEngine + ?Sized> TemplatingEngine for &T {
    fn use_template(&self, template_name: &str, substitutions: &Substitutions<'_>) -> Result<String> {
        (**self).use_template(template_name, substitutions)
    }
}

/// Replace every placeholder in one pass; unknown placeholders become empty
fn render(template: &str, substitutions: &Substitutions<'_>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            substitutions
                .get(&caps[1])
                .cloned()
                .unwrap_or_default()
        })
        .into_owned()
}

/// Indent every non-empty line of `text`
pub fn add_indentation(text: &str, indent: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_placeholders() {
        let mut registry = TemplateRegistry::new();
        registry.register("Greeting", "Hello {{ Name }}, {{Missing}}bye {{Name}}");

        let subs = Substitutions::from([("Name", "World".to_string())]);
        let text = registry.use_template("Greeting", &subs).unwrap();
        assert_eq!(text, "Hello World, bye World");
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let mut registry = TemplateRegistry::new();
        registry.register("T", "{{A}}");

        let subs = Substitutions::from([("A", "{{B}}".to_string()), ("B", "x".to_string())]);
        assert_eq!(registry.use_template("T", &subs).unwrap(), "{{B}}");
    }

    #[test]
    fn test_missing_template() {
        let registry = TemplateRegistry::new();
        let err = registry
            .use_template(CLASS_DEFINITION, &Substitutions::new())
            .unwrap_err();
        assert!(matches!(err, Error::MissingTemplate(name) if name == CLASS_DEFINITION));
    }

    #[test]
    fn test_builtin_typescript_templates() {
        let registry = TemplateRegistry::typescript();
        let subs = Substitutions::from([
            ("ClassDeclaration", "Order".to_string()),
            ("Properties", "    id: number;".to_string()),
        ]);
        assert_eq!(
            registry.use_template(CLASS_DEFINITION, &subs).unwrap(),
            "export interface Order {\n    id: number;\n}\n"
        );
    }

    #[test]
    fn test_from_directory_overrides_builtins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("PropertyDefinition.template"),
            "readonly {{PropertyName}}: {{PropertyType}};",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let registry = TemplateRegistry::from_directory(dir.path()).unwrap();
        assert!(registry.contains(CLASS_DEFINITION));
        assert!(!registry.contains("notes"));

        let subs = Substitutions::from([
            ("PropertyName", "id".to_string()),
            ("PropertyType", "number".to_string()),
        ]);
        assert_eq!(
            registry.use_template(PROPERTY_DEFINITION, &subs).unwrap(),
            "readonly id: number;"
        );
    }

    #[test]
    fn test_add_indentation_skips_blank_lines() {
        assert_eq!(add_indentation("a\n\n  b", "    "), "    a\n\n      b");
        assert_eq!(add_indentation("", "    "), "");
    }
}
