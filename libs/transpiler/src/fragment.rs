//! Code fragments produced by a transpilation run

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ir::TypeName;

/// Stable identity of a code fragment, derived from the originating type
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeFragmentId(String);

impl CodeFragmentId {
    /// Identity of the fragment generated for the given type
    pub fn for_type(type_name: &TypeName) -> Self {
        Self(type_name.full_name())
    }

    /// Fully-qualified name of the originating type
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CodeFragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One generated unit of source code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CodeFragmentRecord")]
pub struct CodeFragment {
    id: CodeFragmentId,
    /// Distinct fragments the code refers to, in order of first reference
    dependencies: Vec<CodeFragmentId>,
    code: String,
}

impl CodeFragment {
    /// Create a fragment. Repeated dependencies are collapsed, keeping the first occurrence.
    pub fn new(id: CodeFragmentId, dependencies: Vec<CodeFragmentId>, code: String) -> Self {
        Self {
            id,
            dependencies: distinct(dependencies),
            code,
        }
    }

    pub fn id(&self) -> &CodeFragmentId {
        &self.id
    }

    pub fn dependencies(&self) -> &[CodeFragmentId] {
        &self.dependencies
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Whether the fragment refers to its own declaration
    pub fn is_self_referencing(&self) -> bool {
        self.dependencies.contains(&self.id)
    }
}

/// Serialized shape of a fragment; read back through [`CodeFragment::new`]
#[derive(Deserialize)]
struct CodeFragmentRecord {
    id: CodeFragmentId,
    #[serde(default)]
    dependencies: Vec<CodeFragmentId>,
    code: String,
}

impl From<CodeFragmentRecord> for CodeFragment {
    fn from(record: CodeFragmentRecord) -> Self {
        CodeFragment::new(record.id, record.dependencies, record.code)
    }
}

/// Result of a transpilation run: one fragment per input type, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranspilationResult {
    code_fragments: Vec<CodeFragment>,
}

impl TranspilationResult {
    pub fn new(code_fragments: Vec<CodeFragment>) -> Self {
        Self { code_fragments }
    }

    pub fn code_fragments(&self) -> &[CodeFragment] {
        &self.code_fragments
    }

    pub fn len(&self) -> usize {
        self.code_fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code_fragments.is_empty()
    }

    /// Find the first fragment with the given id
    pub fn get(&self, id: &CodeFragmentId) -> Option<&CodeFragment> {
        self.code_fragments.iter().find(|f| f.id() == id)
    }

    /// All `(dependent, dependency)` edges, fragment by fragment
    pub fn dependency_edges(&self) -> impl Iterator<Item = (&CodeFragmentId, &CodeFragmentId)> {
        self.code_fragments
            .iter()
            .flat_map(|f| f.dependencies().iter().map(move |d| (f.id(), d)))
    }

    pub fn into_code_fragments(self) -> Vec<CodeFragment> {
        self.code_fragments
    }
}

impl<'a> IntoIterator for &'a TranspilationResult {
    type Item = &'a CodeFragment;
    type IntoIter = std::slice::Iter<'a, CodeFragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.code_fragments.iter()
    }
}

/// Remove repeated ids, keeping the first occurrence of each
pub(crate) fn distinct(ids: Vec<CodeFragmentId>) -> Vec<CodeFragmentId> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
