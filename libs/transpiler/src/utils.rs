use heck::ToKebabCase;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::fragment::{CodeFragmentId, TranspilationResult};

/// Name of the dependency manifest written next to the generated files
pub const MANIFEST_FILE: &str = "manifest.json";

/// One entry of the dependency manifest
#[derive(Debug, Serialize)]
pub struct ManifestEntry<'a> {
    pub id: &'a CodeFragmentId,
    pub file: String,
    pub dependencies: &'a [CodeFragmentId],
}

/// File name of a fragment: the kebab-cased simple type name.
/// E.g., "Example.Targets.ExampleClass1" -> "example-class1.ts"
pub fn fragment_file_name(id: &CodeFragmentId) -> String {
    let simple = id.as_str().rsplit('.').next().unwrap_or(id.as_str());
    format!("{}.ts", simple.to_kebab_case())
}

/// Write one file per fragment plus the dependency manifest to `output_dir`.
/// Creates the directory if it does not exist.
///
/// Fails with [`Error::OutputCollision`] before writing anything when two
/// fragments map to the same file name (same simple name, different namespaces).
///
/// Returns the paths of the written fragment files, in fragment order.
pub fn write_fragments(output_dir: &Path, result: &TranspilationResult) -> Result<Vec<PathBuf>> {
    let files = fragment_file_names(result)?;
    fs::create_dir_all(output_dir)?;

    let mut manifest = Vec::with_capacity(result.len());
    let mut written = Vec::with_capacity(result.len());

    for (fragment, file) in result.code_fragments().iter().zip(files) {
        let path = output_dir.join(&file);
        fs::write(&path, fragment.code())?;
        tracing::debug!(fragment = %fragment.id(), path = %path.display(), "Wrote fragment");

        manifest.push(ManifestEntry {
            id: fragment.id(),
            file,
            dependencies: fragment.dependencies(),
        });
        written.push(path);
    }

    let manifest_path = output_dir.join(MANIFEST_FILE);
    fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;

    Ok(written)
}

/// File names of all fragments, in fragment order
fn fragment_file_names(result: &TranspilationResult) -> Result<Vec<String>> {
    let mut owners: HashMap<String, &CodeFragmentId> = HashMap::with_capacity(result.len());
    let mut files = Vec::with_capacity(result.len());

    for fragment in result {
        let file = fragment_file_name(fragment.id());
        if let Some(first) = owners.insert(file.clone(), fragment.id()) {
            return Err(Error::OutputCollision {
                file,
                first: first.to_string(),
                second: fragment.id().to_string(),
            });
        }
        files.push(file);
    }

    Ok(files)
}
