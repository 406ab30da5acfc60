//! TypeScript code generator
//!
//! Every input type becomes one `interface` fragment. Property types are
//! resolved through a [`TypeReferenceTranslator`]; the fragment records every
//! other fragment its code mentions so that emitters can order or split the
//! output. Self-references and reference cycles are just edges here.

mod types;

pub use types::DefaultTypeReferenceTranslator;

use crate::documentation::{documentation_comment, DocumentationSource, MemberRef};
use crate::error::Result;
use crate::fragment::{CodeFragment, CodeFragmentId, TranspilationResult};
use crate::generators::{Generator, GeneratorConfig};
use crate::ir::TypeDescriptor;
use crate::templating::{
    add_indentation, Substitutions, TemplatingEngine, CLASS_DEFINITION, PROPERTY_DEFINITION,
};
use crate::translation::TypeReferenceTranslator;

/// Transpiles type descriptors to TypeScript interface declarations
pub struct TypeScriptTranspiler<E, D, R = DefaultTypeReferenceTranslator> {
    templating_engine: E,
    documentation_source: D,
    type_reference_translator: R,
    config: GeneratorConfig,
}

impl<E, D> TypeScriptTranspiler<E, D>
where
    E: TemplatingEngine,
    D: DocumentationSource,
{
    /// Create a transpiler using the default TypeScript type mapping
    pub fn new(templating_engine: E, documentation_source: D) -> Self {
        Self::with_config(templating_engine, documentation_source, GeneratorConfig::default())
    }

    pub fn with_config(templating_engine: E, documentation_source: D, config: GeneratorConfig) -> Self {
        let translator = DefaultTypeReferenceTranslator::new(config.unresolved_types);
        Self {
            templating_engine,
            documentation_source,
            type_reference_translator: translator,
            config,
        }
    }
}

impl<E, D, R> TypeScriptTranspiler<E, D, R>
where
    E: TemplatingEngine,
    D: DocumentationSource,
    R: TypeReferenceTranslator,
{
    /// Replace the type mapping
    pub fn with_translator<T: TypeReferenceTranslator>(self, translator: T) -> TypeScriptTranspiler<E, D, T> {
        TypeScriptTranspiler {
            templating_engine: self.templating_engine,
            documentation_source: self.documentation_source,
            type_reference_translator: translator,
            config: self.config,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Transpile the given types, one fragment per type in input order.
    ///
    /// The first failure aborts the whole batch; no partial result is returned.
    pub fn transpile(&self, types: &[TypeDescriptor]) -> Result<TranspilationResult> {
        let fragments = types
            .iter()
            .map(|type_def| self.generate_class_definition(type_def))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(fragments = fragments.len(), "Transpiled types");
        Ok(TranspilationResult::new(fragments))
    }

    fn generate_class_definition(&self, type_def: &TypeDescriptor) -> Result<CodeFragment> {
        let id = CodeFragmentId::for_type(&type_def.name);
        let (properties, dependencies) = self.generate_property_definitions(type_def)?;

        let substitutions = Substitutions::from([
            ("ClassDeclaration", type_def.name.name.clone()),
            (
                "Documentation",
                self.generate_documentation_comment(MemberRef::Type(&type_def.name))
                    .unwrap_or_default(),
            ),
            ("Properties", add_indentation(&properties, &self.config.indent)),
        ]);
        let code = self
            .templating_engine
            .use_template(CLASS_DEFINITION, &substitutions)?;

        tracing::debug!(
            fragment = %id,
            properties = type_def.properties.len(),
            dependencies = dependencies.len(),
            "Generated class definition"
        );

        Ok(CodeFragment::new(id, dependencies, code))
    }

    /// Render all properties in declaration order and collect their dependencies
    fn generate_property_definitions(
        &self,
        type_def: &TypeDescriptor,
    ) -> Result<(String, Vec<CodeFragmentId>)> {
        let mut snippets = Vec::with_capacity(type_def.properties.len());
        let mut dependencies = Vec::new();

        for property in &type_def.properties {
            let translation = self
                .type_reference_translator
                .translate(&property.type_ref)
                .map_err(|e| e.in_property(&type_def.name.full_name(), &property.name))?;
            let (property_type, property_dependencies) = translation.into_parts();
            dependencies.extend(property_dependencies);

            let documentation = self
                .generate_documentation_comment(MemberRef::Property {
                    declaring: &type_def.name,
                    name: &property.name,
                })
                .unwrap_or_default();
            let substitutions = Substitutions::from([
                ("PropertyName", self.config.property_naming.apply(&property.name)),
                ("Documentation", documentation),
                ("PropertyType", property_type),
            ]);
            snippets.push(
                self.templating_engine
                    .use_template(PROPERTY_DEFINITION, &substitutions)?,
            );
        }

        Ok((snippets.join("\n"), crate::fragment::distinct(dependencies)))
    }

    fn generate_documentation_comment(&self, member: MemberRef<'_>) -> Option<String> {
        if !self.config.generate_docs {
            return None;
        }
        let documentation = self.documentation_source.documentation_text(member);
        documentation_comment(documentation.as_deref())
    }
}

impl<E, D, R> Generator for TypeScriptTranspiler<E, D, R>
where
    E: TemplatingEngine,
    D: DocumentationSource,
    R: TypeReferenceTranslator,
{
    type Output = TranspilationResult;

    fn generate(&self, types: &[TypeDescriptor]) -> Result<Self::Output> {
        self.transpile(types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documentation::{DocumentationMap, NoDocumentation};
    use crate::error::Error;
    use crate::generators::PropertyNaming;
    use crate::ir::{ScalarKind, TypeName, TypeRef};
    use crate::templating::TemplateRegistry;
    use crate::translation::TypeReferenceTranslation;

    fn class(name: &str) -> TypeDescriptor {
        TypeDescriptor::new(TypeName::parse(name))
    }

    fn string() -> TypeRef {
        TypeRef::Scalar(ScalarKind::Text)
    }

    fn transpiler() -> TypeScriptTranspiler<TemplateRegistry, NoDocumentation> {
        TypeScriptTranspiler::new(TemplateRegistry::typescript(), NoDocumentation)
    }

    #[test]
    fn test_single_string_property() {
        let result = transpiler()
            .transpile(&[class("ClassX").with_property("PropA", string())])
            .unwrap();

        assert_eq!(result.len(), 1);
        let fragment = &result.code_fragments()[0];
        assert_eq!(fragment.id().as_str(), "ClassX");
        assert!(fragment.dependencies().is_empty());
        assert_eq!(
            fragment.code(),
            "export interface ClassX {\n    PropA: string;\n}\n"
        );
    }

    #[test]
    fn test_type_without_properties() {
        let result = transpiler().transpile(&[class("Ns.Empty")]).unwrap();
        let fragment = &result.code_fragments()[0];
        assert_eq!(fragment.id().as_str(), "Ns.Empty");
        assert!(fragment.dependencies().is_empty());
        assert_eq!(fragment.code(), "export interface Empty {\n\n}\n");
    }

    #[test]
    fn test_documentation_comments() {
        let name = TypeName::parse("Ns.Doc");
        let mut docs = DocumentationMap::new();
        docs.insert_member(MemberRef::Type(&name), "A documented type.");
        docs.insert_member(
            MemberRef::Property {
                declaring: &name,
                name: "Documented",
            },
            "A documented property.",
        );
        docs.insert_member(
            MemberRef::Property {
                declaring: &name,
                name: "Blank",
            },
            "   ",
        );

        let type_def = TypeDescriptor::new(name)
            .with_property("Documented", string())
            .with_property("Blank", string());
        let result = TypeScriptTranspiler::new(TemplateRegistry::typescript(), &docs)
            .transpile(&[type_def])
            .unwrap();

        assert_eq!(
            result.code_fragments()[0].code(),
            "/**\n * A documented type.\n */\nexport interface Doc {\n    \
             /**\n     * A documented property.\n     */\n    Documented: string;\n    \
             Blank: string;\n}\n"
        );
    }

    #[test]
    fn test_generate_docs_disabled() {
        let name = TypeName::parse("Ns.Doc");
        let mut docs = DocumentationMap::new();
        docs.insert_member(MemberRef::Type(&name), "Hidden.");

        let transpiler = TypeScriptTranspiler::with_config(
            TemplateRegistry::typescript(),
            docs,
            GeneratorConfig::new().generate_docs(false),
        );
        let result = transpiler.transpile(&[TypeDescriptor::new(name)]).unwrap();
        assert!(!result.code_fragments()[0].code().contains("Hidden."));
    }

    #[test]
    fn test_camel_case_property_names() {
        let transpiler = TypeScriptTranspiler::with_config(
            TemplateRegistry::typescript(),
            NoDocumentation,
            GeneratorConfig::new().property_naming(PropertyNaming::CamelCase),
        );
        let result = transpiler
            .transpile(&[class("Ns.A").with_property("SomeProperty", string())])
            .unwrap();
        assert!(result.code_fragments()[0]
            .code()
            .contains("    someProperty: string;"));
    }

    #[test]
    fn test_missing_property_template_aborts() {
        let mut registry = TemplateRegistry::new();
        registry.register(CLASS_DEFINITION, "{{ClassDeclaration}}");
        let transpiler = TypeScriptTranspiler::new(registry, NoDocumentation);

        // No properties: the property template is never needed
        assert!(transpiler.transpile(&[class("Ns.A")]).is_ok());

        let err = transpiler
            .transpile(&[class("Ns.A"), class("Ns.B").with_property("P", string())])
            .unwrap_err();
        assert!(matches!(err, Error::MissingTemplate(name) if name == PROPERTY_DEFINITION));
    }

    #[test]
    fn test_translation_error_names_type_and_property() {
        let err = transpiler()
            .transpile(&[class("Ns.Box").with_property("Value", TypeRef::Parameter("T".into()))])
            .unwrap_err();

        match err {
            Error::Property {
                type_name,
                property,
                source,
            } => {
                assert_eq!(type_name, "Ns.Box");
                assert_eq!(property, "Value");
                assert!(matches!(*source, Error::UnresolvedType { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    struct FixedTranslator;

    impl TypeReferenceTranslator for FixedTranslator {
        fn translate(&self, _type_ref: &TypeRef) -> Result<TypeReferenceTranslation> {
            Ok(TypeReferenceTranslation::new(
                "Custom",
                vec![CodeFragmentId::for_type(&TypeName::parse("Lib.Custom"))],
            ))
        }
    }

    #[test]
    fn test_custom_translator() {
        let result = transpiler()
            .with_translator(FixedTranslator)
            .transpile(&[class("Ns.A")
                .with_property("First", string())
                .with_property("Second", TypeRef::Any)])
            .unwrap();

        let fragment = &result.code_fragments()[0];
        assert_eq!(fragment.dependencies().len(), 1);
        assert_eq!(fragment.dependencies()[0].as_str(), "Lib.Custom");
        assert!(fragment.code().contains("First: Custom;"));
        assert!(fragment.code().contains("Second: Custom;"));
    }
}
