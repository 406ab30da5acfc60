//! Documentation lookup for types and properties
//!
//! Documentation is keyed with .NET XML documentation ids:
//! `T:Namespace.Type` for types and `P:Namespace.Type.Property` for properties.

use std::collections::HashMap;
use std::fmt;

use crate::error::Result;
use crate::ir::TypeName;

/// A documented member
#[derive(Debug, Clone, Copy)]
pub enum MemberRef<'a> {
    Type(&'a TypeName),
    Property {
        declaring: &'a TypeName,
        name: &'a str,
    },
}

/// Lookup key of a member
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentationKey(String);

impl DocumentationKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<MemberRef<'_>> for DocumentationKey {
    fn from(member: MemberRef<'_>) -> Self {
        match member {
            MemberRef::Type(name) => Self(format!("T:{}", name.full_name())),
            MemberRef::Property { declaring, name } => {
                Self(format!("P:{}.{}", declaring.full_name(), name))
            }
        }
    }
}

impl fmt::Display for DocumentationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Supplies human-readable documentation text for members
pub trait DocumentationSource {
    /// Raw documentation text, `None` when the member is undocumented
    fn documentation_text(&self, member: MemberRef<'_>) -> Option<String>;
}

impl<T: DocumentationSource + ?Sized> DocumentationSource for &T {
    fn documentation_text(&self, member: MemberRef<'_>) -> Option<String> {
        (**self).documentation_text(member)
    }
}

/// Source that never has documentation
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDocumentation;

impl DocumentationSource for NoDocumentation {
    fn documentation_text(&self, _member: MemberRef<'_>) -> Option<String> {
        None
    }
}

/// Documentation held in memory, keyed by documentation id
#[derive(Debug, Clone, Default)]
pub struct DocumentationMap {
    entries: HashMap<String, String>,
}

impl DocumentationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a .NET XML documentation file.
    ///
    /// Every `<member name="...">` with a `<summary>` contributes one entry;
    /// members without a summary are skipped.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(xml)?;
        let mut map = Self::new();

        for member in doc
            .descendants()
            .filter(|n| n.has_tag_name("member"))
        {
            let Some(key) = member.attribute("name") else {
                continue;
            };
            let Some(summary) = member.children().find(|n| n.has_tag_name("summary")) else {
                continue;
            };
            map.insert(key, normalize_summary(&summary_text(summary)));
        }

        Ok(map)
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    /// Insert documentation for a member
    pub fn insert_member(&mut self, member: MemberRef<'_>, text: impl Into<String>) {
        self.insert(DocumentationKey::from(member).0, text);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Copy all entries of `other` into this map; entries of `other` win
    pub fn merge(&mut self, other: DocumentationMap) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DocumentationSource for DocumentationMap {
    fn documentation_text(&self, member: MemberRef<'_>) -> Option<String> {
        self.get(DocumentationKey::from(member).as_str())
            .map(String::from)
    }
}

/// Text content of a `<summary>`; `<see cref="..."/>` becomes the referenced simple name
fn summary_text(summary: roxmltree::Node<'_, '_>) -> String {
    let mut text = String::new();
    for node in summary.descendants() {
        if node.is_text() {
            text.push_str(node.text().unwrap_or_default());
        } else if node.has_tag_name("see") || node.has_tag_name("seealso") {
            if let Some(cref) = node.attribute("cref") {
                let target = cref.split_once(':').map_or(cref, |(_, t)| t);
                text.push_str(target.rsplit('.').next().unwrap_or(target));
            }
        }
    }
    text
}

/// Trim the summary and every line in it, dropping leading/trailing blank lines
fn normalize_summary(text: &str) -> String {
    text.trim()
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render documentation text as a block comment.
///
/// Returns `None` for missing or whitespace-only documentation so that no
/// hollow comment is emitted.
pub fn documentation_comment(documentation: Option<&str>) -> Option<String> {
    let documentation = documentation?;
    if documentation.trim().is_empty() {
        return None;
    }

    let mut comment = String::from("/**\n");
    for line in documentation.lines() {
        let line = line.replace("*/", "*\\/");
        if line.is_empty() {
            comment.push_str(" *\n");
        } else {
            comment.push_str(" * ");
            comment.push_str(&line);
            comment.push('\n');
        }
    }
    comment.push_str(" */\n");
    Some(comment)
}
