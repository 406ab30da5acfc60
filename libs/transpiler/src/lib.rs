//! Type definition transpiler
//!
//! This library turns structural type descriptions (names, ordered properties,
//! property types, documentation) into TypeScript declarations, one code
//! fragment per type. Each fragment lists the fragments its code refers to, so
//! downstream emitters can order, bundle or split the output, including
//! self-referencing types and reference cycles.
//!
//! ## Architecture
//!
//! 1. **Parser**: reads a JSON type model document into the IR
//! 2. **IR (Intermediate Representation)**: language-agnostic type descriptors
//! 3. **Generators**: assemble fragments from templates, a documentation
//!    source and a type reference translator
//!
//! ```rust
//! use tsgen_transpiler::ir::{ScalarKind, TypeDescriptor, TypeName, TypeRef};
//! use tsgen_transpiler::{NoDocumentation, TemplateRegistry, TypeScriptTranspiler};
//!
//! # fn main() -> tsgen_transpiler::Result<()> {
//! let node = TypeDescriptor::new(TypeName::parse("Tree.Node"))
//!     .with_property("Label", TypeRef::Scalar(ScalarKind::Text))
//!     .with_property("Children", TypeRef::array(TypeRef::reference("Tree.Node")));
//!
//! let transpiler = TypeScriptTranspiler::new(TemplateRegistry::typescript(), NoDocumentation);
//! let result = transpiler.transpile(&[node])?;
//!
//! let fragment = &result.code_fragments()[0];
//! assert!(fragment.is_self_referencing());
//! assert!(fragment.code().contains("Children: Node[];"));
//! # Ok(())
//! # }
//! ```

pub mod documentation;
pub mod error;
pub mod fragment;
pub mod generators;
pub mod ir;
pub mod parser;
pub mod templating;
pub mod translation;
pub mod utils;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

pub use documentation::{DocumentationMap, DocumentationSource, MemberRef, NoDocumentation};
pub use error::{Error, Result};
pub use fragment::{CodeFragment, CodeFragmentId, TranspilationResult};
pub use generators::typescript::{DefaultTypeReferenceTranslator, TypeScriptTranspiler};
pub use generators::{Generator, GeneratorConfig, PropertyNaming};
pub use templating::{TemplateRegistry, TemplatingEngine};
pub use translation::{TypeReferenceTranslation, TypeReferenceTranslator, UnresolvedTypePolicy};

use ir::{TypeDescriptor, TypeModel};

/// Main entry point: a type model with its documentation
pub struct Transpilation {
    model: TypeModel,
    documentation: DocumentationMap,
}

impl Transpilation {
    /// Create from a parsed type model document
    pub fn from_json(input: &str) -> Result<Self> {
        let parsed = parser::parse_str(input)?;
        Ok(Self {
            model: parsed.model,
            documentation: parsed.documentation,
        })
    }

    pub fn new(model: TypeModel, documentation: DocumentationMap) -> Self {
        Self {
            model,
            documentation,
        }
    }

    /// Add documentation on top of what the model carries; later entries win
    pub fn add_documentation(&mut self, documentation: DocumentationMap) {
        self.documentation.merge(documentation);
    }

    pub fn model(&self) -> &TypeModel {
        &self.model
    }

    pub fn documentation(&self) -> &DocumentationMap {
        &self.documentation
    }

    /// Types to transpile: all of them in document order, or the named ones in the given order
    pub fn select_types<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<TypeDescriptor>> {
        if names.is_empty() {
            Ok(self.model.types().to_vec())
        } else {
            self.model.select(names)
        }
    }

    /// Transpile the selected types to TypeScript
    pub fn transpile<E: TemplatingEngine, S: AsRef<str>>(
        &self,
        templates: E,
        config: GeneratorConfig,
        names: &[S],
    ) -> Result<TranspilationResult> {
        let types = self.select_types(names)?;
        TypeScriptTranspiler::with_config(templates, &self.documentation, config).transpile(&types)
    }

    /// Generate code with any generator over the selected types
    pub fn generate<G: Generator, S: AsRef<str>>(&self, generator: G, names: &[S]) -> Result<G::Output> {
        generator.generate(&self.select_types(names)?)
    }
}

/// Files and options for a transpilation run from disk
#[derive(Debug, Clone, Default)]
pub struct TranspileOptions {
    /// JSON type model document
    pub model: PathBuf,
    /// .NET XML documentation files, applied in order
    pub documentation: Vec<PathBuf>,
    /// Directory of `*.template` overrides
    pub templates: Option<PathBuf>,
    /// Types to transpile; empty means all
    pub types: Vec<String>,
    pub config: GeneratorConfig,
}

/// Convenience helper to transpile a type model file and write the fragments.
///
/// Returns the transpilation result that was written.
pub fn transpile_model_file(
    options: &TranspileOptions,
    output_dir: &Path,
) -> anyhow::Result<TranspilationResult> {
    let input = fs::read_to_string(&options.model)
        .with_context(|| format!("reading type model {}", options.model.display()))?;
    let mut transpilation = Transpilation::from_json(&input)
        .with_context(|| format!("parsing type model {}", options.model.display()))?;

    for path in &options.documentation {
        let xml = fs::read_to_string(path)
            .with_context(|| format!("reading documentation {}", path.display()))?;
        let docs = DocumentationMap::from_xml(&xml)
            .with_context(|| format!("parsing documentation {}", path.display()))?;
        tracing::debug!(path = %path.display(), entries = docs.len(), "Loaded documentation");
        transpilation.add_documentation(docs);
    }

    let templates = match &options.templates {
        Some(dir) => TemplateRegistry::from_directory(dir)
            .with_context(|| format!("loading templates from {}", dir.display()))?,
        None => TemplateRegistry::typescript(),
    };

    let result = transpilation
        .transpile(templates, options.config.clone(), options.types.as_slice())
        .context("transpiling types")?;

    utils::write_fragments(output_dir, &result)
        .with_context(|| format!("writing output to {}", output_dir.display()))?;

    Ok(result)
}
