//! Document discovery by filesystem walking.
//!
//! The scanner only identifies Markdown files laid out as
//! `{namespace}/{app}/{doc}.md` below the docs root. Grouping them into a
//! sidebar is handled by [`SidebarBuilder`](crate::SidebarBuilder).

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::SidebarError;

/// Markdown file extension, including the dot.
pub(crate) const MD_SUFFIX: &str = ".md";

/// Reference to a document found at `{namespace}/{app}/{name}.md`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DocumentRef {
    /// First path segment below the docs root.
    pub namespace: String,
    /// Second path segment below the docs root.
    pub app: String,
    /// File name without the `.md` extension.
    pub name: String,
}

impl DocumentRef {
    /// Root-relative identifier without extension (e.g., `"ns1/app1/doc1"`).
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}/{}/{}", self.namespace, self.app, self.name)
    }

    /// Parse a root-relative path into a document reference.
    ///
    /// Returns `None` unless the path has exactly three UTF-8 segments and
    /// the last one ends in `.md`:
    /// - `ns1/app1/doc1.md` -> `Some(ns1, app1, doc1)`
    /// - `ns1/stray.md` -> `None`
    /// - `ns1/app1/notes.txt` -> `None`
    /// - `ns1/app1/deep/doc.md` -> `None`
    #[must_use]
    pub fn from_relative_path(rel_path: &Path) -> Option<Self> {
        let segments = rel_path
            .components()
            .map(|c| match c {
                Component::Normal(s) => s.to_str(),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;

        let [namespace, app, file] = segments.as_slice() else {
            return None;
        };

        let name = file.strip_suffix(MD_SUFFIX)?;
        if name.is_empty() {
            return None;
        }

        Some(Self {
            namespace: (*namespace).to_owned(),
            app: (*app).to_owned(),
            name: name.to_owned(),
        })
    }
}

/// Discovers document references by walking the docs root.
pub struct Scanner {
    root: PathBuf,
}

impl Scanner {
    /// Create a scanner for the given docs root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Docs root this scanner walks.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan the docs root and return well-formed document references.
    ///
    /// Files that don't match `{namespace}/{app}/{doc}.md` are skipped.
    /// References come back in walk order, which is filesystem dependent.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::Io`] if any directory listing or stat fails,
    /// including when the root itself does not exist.
    pub fn scan(&self) -> Result<Vec<DocumentRef>, SidebarError> {
        let mut files = Vec::new();
        walk(&self.root, &mut files)?;

        let total = files.len();
        let refs: Vec<_> = files
            .iter()
            .filter_map(|path| {
                let rel_path = path.strip_prefix(&self.root).ok()?;
                let doc = DocumentRef::from_relative_path(rel_path);
                if doc.is_none() {
                    tracing::trace!(path = %rel_path.display(), "Skipping non-document file");
                }
                doc
            })
            .collect();

        tracing::debug!(
            root = %self.root.display(),
            files = total,
            documents = refs.len(),
            "Docs scan completed"
        );
        Ok(refs)
    }
}

/// Collect every regular file below `dir`, depth first.
///
/// Symlinks are followed. Entries that are neither files nor directories are
/// ignored.
fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), SidebarError> {
    let entries = fs::read_dir(dir).map_err(|e| SidebarError::io(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| SidebarError::io(dir, e))?;
        let path = entry.path();
        let metadata = fs::metadata(&path).map_err(|e| SidebarError::io(&path, e))?;

        if metadata.is_dir() {
            walk(&path, files)?;
        } else if metadata.is_file() {
            files.push(path);
        }
    }

    Ok(())
}
