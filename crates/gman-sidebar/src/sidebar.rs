//! Sidebar tree builder.
//!
//! Groups scanned documents into namespace and application categories and
//! produces the structure the site generator loads from `sidebars.js`.
//!
//! # Example
//!
//! ```no_run
//! use gman_sidebar::SidebarBuilder;
//!
//! let sidebar = SidebarBuilder::new("docs").build()?;
//! for category in sidebar.categories() {
//!     println!("{}", category.label());
//! }
//! # Ok::<(), gman_sidebar::SidebarError>(())
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::SidebarError;
use crate::scanner::{DocumentRef, MD_SUFFIX, Scanner};

/// Default index document looked up at the docs root.
pub const DEFAULT_INDEX_FILE: &str = "README.md";

/// Default name of the sidebar inside the sidebars config.
pub const DEFAULT_SIDEBAR_NAME: &str = "docsSidebar";

/// Navigation node: a document link or a labeled group of nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarItem {
    /// Link to a single document.
    Doc {
        /// Root-relative document path without extension.
        id: String,
        /// Display label.
        label: String,
    },
    /// Labeled group of child nodes.
    Category {
        /// Display label.
        label: String,
        /// Child nodes in display order.
        items: Vec<SidebarItem>,
    },
}

impl SidebarItem {
    /// Display label of the node.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Doc { label, .. } | Self::Category { label, .. } => label,
        }
    }

    /// Child nodes (empty for documents).
    #[must_use]
    pub fn items(&self) -> &[SidebarItem] {
        match self {
            Self::Doc { .. } => &[],
            Self::Category { items, .. } => items,
        }
    }
}

/// Top-level sidebar entry.
///
/// The root index document is referenced by its bare id; everything else is
/// a [`SidebarItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SidebarEntry {
    /// Bare document id (used for the root index).
    Index(String),
    /// Category or document node.
    Item(SidebarItem),
}

/// Ordered sidebar tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Sidebar {
    entries: Vec<SidebarEntry>,
}

impl Sidebar {
    /// All top-level entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[SidebarEntry] {
        &self.entries
    }

    /// Id of the root index document, if one was found.
    #[must_use]
    pub fn index(&self) -> Option<&str> {
        match self.entries.first() {
            Some(SidebarEntry::Index(id)) => Some(id),
            _ => None,
        }
    }

    /// Namespace categories in display order.
    pub fn categories(&self) -> impl Iterator<Item = &SidebarItem> {
        self.entries.iter().filter_map(|entry| match entry {
            SidebarEntry::Item(item) => Some(item),
            SidebarEntry::Index(_) => None,
        })
    }

    /// Number of document leaves across all categories.
    #[must_use]
    pub fn document_count(&self) -> usize {
        fn count(item: &SidebarItem) -> usize {
            match item {
                SidebarItem::Doc { .. } => 1,
                SidebarItem::Category { items, .. } => items.iter().map(count).sum(),
            }
        }
        self.categories().map(count).sum()
    }

    /// Returns true if the sidebar has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wrap this sidebar into a sidebars config under `name`.
    #[must_use]
    pub fn into_config(self, name: impl Into<String>) -> SidebarsConfig {
        SidebarsConfig {
            sidebars: BTreeMap::from([(name.into(), self)]),
        }
    }
}

/// Named sidebars, as exported by a `sidebars.js` module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SidebarsConfig {
    sidebars: BTreeMap<String, Sidebar>,
}

impl SidebarsConfig {
    /// Look up a sidebar by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Sidebar> {
        self.sidebars.get(name)
    }
}

/// Documents grouped by namespace, then application, then document name.
///
/// `BTreeMap` keeps every level in lexicographic order.
type Grouped = BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>;

/// Builds a [`Sidebar`] from a docs root.
///
/// Documents must live at `{namespace}/{app}/{doc}.md`. Namespaces become
/// top-level categories, applications become nested categories, and
/// documents become leaves. Everything is sorted lexicographically.
pub struct SidebarBuilder {
    root: PathBuf,
    index_file: String,
}

impl SidebarBuilder {
    /// Create a builder for the given docs root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            index_file: DEFAULT_INDEX_FILE.to_owned(),
        }
    }

    /// Use a different root index filename (default: `README.md`).
    #[must_use]
    pub fn with_index_file(mut self, index_file: impl Into<String>) -> Self {
        self.index_file = index_file.into();
        self
    }

    /// Scan the docs root and build the sidebar.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::Io`] if the docs root can't be walked.
    pub fn build(&self) -> Result<Sidebar, SidebarError> {
        let documents = Scanner::new(self.root.clone()).scan()?;
        let mut entries = Vec::new();

        if self.root.join(&self.index_file).is_file() {
            let id = self
                .index_file
                .strip_suffix(MD_SUFFIX)
                .unwrap_or(&self.index_file);
            entries.push(SidebarEntry::Index(id.to_owned()));
        }

        entries.extend(
            group(documents)
                .into_iter()
                .map(|(namespace, apps)| namespace_category(namespace, apps))
                .map(SidebarEntry::Item),
        );

        let sidebar = Sidebar { entries };
        tracing::debug!(
            root = %self.root.display(),
            has_index = sidebar.index().is_some(),
            namespaces = sidebar.categories().count(),
            documents = sidebar.document_count(),
            "Sidebar built"
        );
        Ok(sidebar)
    }
}

/// Group document references by namespace and application.
fn group(documents: Vec<DocumentRef>) -> Grouped {
    let mut grouped = Grouped::new();
    for doc in documents {
        let id = doc.id();
        grouped
            .entry(doc.namespace)
            .or_default()
            .entry(doc.app)
            .or_default()
            .insert(doc.name, id);
    }
    grouped
}

fn namespace_category(
    namespace: String,
    apps: BTreeMap<String, BTreeMap<String, String>>,
) -> SidebarItem {
    let items = apps
        .into_iter()
        .map(|(app, docs)| SidebarItem::Category {
            label: app,
            items: docs
                .into_iter()
                .map(|(label, id)| SidebarItem::Doc { id, label })
                .collect(),
        })
        .collect();

    SidebarItem::Category {
        label: namespace,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;
    use std::path::Path;

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "# Doc").unwrap();
    }

    fn doc(id: &str, label: &str) -> SidebarItem {
        SidebarItem::Doc {
            id: id.to_owned(),
            label: label.to_owned(),
        }
    }

    fn category(label: &str, items: Vec<SidebarItem>) -> SidebarItem {
        SidebarItem::Category {
            label: label.to_owned(),
            items,
        }
    }

    #[test]
    fn test_single_document() {
        let temp_dir = create_test_dir();
        touch(temp_dir.path(), "ns1/app1/doc1.md");

        let sidebar = SidebarBuilder::new(temp_dir.path()).build().unwrap();

        assert_eq!(
            sidebar.entries(),
            &[SidebarEntry::Item(category(
                "ns1",
                vec![category("app1", vec![doc("ns1/app1/doc1", "doc1")])]
            ))]
        );
        assert!(sidebar.index().is_none());
    }

    #[test]
    fn test_two_apps_in_one_namespace() {
        let temp_dir = create_test_dir();
        touch(temp_dir.path(), "ns1/app1/doc1.md");
        touch(temp_dir.path(), "ns1/app2/doc2.md");

        let sidebar = SidebarBuilder::new(temp_dir.path()).build().unwrap();

        let categories: Vec<_> = sidebar.categories().collect();
        assert_eq!(categories.len(), 1);
        assert_eq!(
            categories[0],
            &category(
                "ns1",
                vec![
                    category("app1", vec![doc("ns1/app1/doc1", "doc1")]),
                    category("app2", vec![doc("ns1/app2/doc2", "doc2")]),
                ]
            )
        );
    }

    #[test]
    fn test_namespaces_do_not_leak() {
        let temp_dir = create_test_dir();
        touch(temp_dir.path(), "ns1/app1/doc1.md");
        touch(temp_dir.path(), "ns2/app1/doc1.md");

        let sidebar = SidebarBuilder::new(temp_dir.path()).build().unwrap();

        let categories: Vec<_> = sidebar.categories().collect();
        assert_eq!(
            categories,
            vec![
                &category(
                    "ns1",
                    vec![category("app1", vec![doc("ns1/app1/doc1", "doc1")])]
                ),
                &category(
                    "ns2",
                    vec![category("app1", vec![doc("ns2/app1/doc1", "doc1")])]
                ),
            ]
        );
    }

    #[test]
    fn test_malformed_paths_excluded() {
        let temp_dir = create_test_dir();
        touch(temp_dir.path(), "ns1/stray.md");
        touch(temp_dir.path(), "ns1/app1/notes.txt");
        touch(temp_dir.path(), "ns1/app1/deep/doc.md");
        touch(temp_dir.path(), "ns2/app1/doc1.md");

        let sidebar = SidebarBuilder::new(temp_dir.path()).build().unwrap();

        assert_eq!(sidebar.document_count(), 1);
        let labels: Vec<_> = sidebar.categories().map(SidebarItem::label).collect();
        assert_eq!(labels, vec!["ns2"]);
    }

    #[test]
    fn test_readme_prepended_as_index() {
        let temp_dir = create_test_dir();
        touch(temp_dir.path(), "README.md");
        touch(temp_dir.path(), "ns1/app1/doc1.md");

        let sidebar = SidebarBuilder::new(temp_dir.path()).build().unwrap();

        assert_eq!(sidebar.index(), Some("README"));
        assert_eq!(
            sidebar.entries()[0],
            SidebarEntry::Index("README".to_owned())
        );
        assert_eq!(sidebar.entries().len(), 2);
    }

    #[test]
    fn test_readme_only() {
        let temp_dir = create_test_dir();
        touch(temp_dir.path(), "README.md");

        let sidebar = SidebarBuilder::new(temp_dir.path()).build().unwrap();

        assert_eq!(
            sidebar.entries(),
            &[SidebarEntry::Index("README".to_owned())]
        );
        assert_eq!(sidebar.document_count(), 0);
    }

    #[test]
    fn test_readme_directory_is_not_index() {
        let temp_dir = create_test_dir();
        fs::create_dir(temp_dir.path().join("README.md")).unwrap();

        let sidebar = SidebarBuilder::new(temp_dir.path()).build().unwrap();

        assert!(sidebar.index().is_none());
        assert!(sidebar.is_empty());
    }

    #[test]
    fn test_custom_index_file() {
        let temp_dir = create_test_dir();
        touch(temp_dir.path(), "README.md");
        touch(temp_dir.path(), "intro.md");

        let sidebar = SidebarBuilder::new(temp_dir.path())
            .with_index_file("intro.md")
            .build()
            .unwrap();

        assert_eq!(sidebar.index(), Some("intro"));
        assert_eq!(sidebar.entries().len(), 1);
    }

    #[test]
    fn test_sorted_output() {
        let temp_dir = create_test_dir();
        touch(temp_dir.path(), "zeta/web/usage.md");
        touch(temp_dir.path(), "alpha/worker/setup.md");
        touch(temp_dir.path(), "alpha/api/overview.md");
        touch(temp_dir.path(), "alpha/api/deploy.md");

        let sidebar = SidebarBuilder::new(temp_dir.path()).build().unwrap();

        let namespaces: Vec<_> = sidebar.categories().map(SidebarItem::label).collect();
        assert_eq!(namespaces, vec!["alpha", "zeta"]);

        let alpha = sidebar.categories().next().unwrap();
        let apps: Vec<_> = alpha.items().iter().map(SidebarItem::label).collect();
        assert_eq!(apps, vec!["api", "worker"]);

        let docs: Vec<_> = alpha.items()[0]
            .items()
            .iter()
            .map(SidebarItem::label)
            .collect();
        assert_eq!(docs, vec!["deploy", "overview"]);
    }

    #[test]
    fn test_build_is_idempotent() {
        let temp_dir = create_test_dir();
        touch(temp_dir.path(), "README.md");
        touch(temp_dir.path(), "ns1/app1/doc1.md");
        touch(temp_dir.path(), "ns2/app3/doc4.md");

        let builder = SidebarBuilder::new(temp_dir.path());

        assert_eq!(builder.build().unwrap(), builder.build().unwrap());
    }

    #[test]
    fn test_missing_root_is_error() {
        let result = SidebarBuilder::new("/nonexistent/gman-docs").build();

        assert!(matches!(result, Err(SidebarError::Io { .. })));
    }

    #[test]
    fn test_serialize_shape() {
        let sidebar = Sidebar {
            entries: vec![
                SidebarEntry::Index("README".to_owned()),
                SidebarEntry::Item(category(
                    "ns1",
                    vec![category("app1", vec![doc("ns1/app1/doc1", "doc1")])],
                )),
            ],
        };

        let value = serde_json::to_value(&sidebar).unwrap();

        assert_eq!(
            value,
            json!([
                "README",
                {
                    "type": "category",
                    "label": "ns1",
                    "items": [
                        {
                            "type": "category",
                            "label": "app1",
                            "items": [
                                {"type": "doc", "id": "ns1/app1/doc1", "label": "doc1"}
                            ]
                        }
                    ]
                }
            ])
        );
    }

    #[test]
    fn test_into_config() {
        let sidebar = Sidebar {
            entries: vec![SidebarEntry::Index("README".to_owned())],
        };

        let config = sidebar.clone().into_config(DEFAULT_SIDEBAR_NAME);

        assert_eq!(config.get("docsSidebar"), Some(&sidebar));
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({"docsSidebar": ["README"]})
        );
    }
}
