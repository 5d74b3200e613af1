//! Sidebar generation for namespaced application docs.
//!
//! Walks a docs root laid out as `{namespace}/{app}/{doc}.md` and builds the
//! navigation sidebar consumed by the static site generator:
//!
//! - [`Scanner`] finds well-formed document references
//! - [`SidebarBuilder`] groups them into namespace and application categories
//! - [`SidebarsConfig::render`] serializes the result as JSON or `sidebars.js`
//!
//! Output is sorted lexicographically at every level, so repeated builds over
//! the same tree are byte-identical.

mod error;
mod render;
mod scanner;
mod sidebar;

pub use error::SidebarError;
pub use render::OutputFormat;
pub use scanner::{DocumentRef, Scanner};
pub use sidebar::{
    DEFAULT_INDEX_FILE, DEFAULT_SIDEBAR_NAME, Sidebar, SidebarBuilder, SidebarEntry, SidebarItem,
    SidebarsConfig,
};
