//! Configuration management for gman docs.
//!
//! Parses `gman.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.root`
//! - `sidebar.output`
//!
//! A typical build points the docs root at the rendered docs directory:
//!
//! ```toml
//! [docs]
//! root = "${DOCS_DIR:-docs}"
//!
//! [sidebar]
//! format = "js"
//! output = "web/sidebars.js"
//! ```

mod expand;

use gman_sidebar::{DEFAULT_INDEX_FILE, DEFAULT_SIDEBAR_NAME, OutputFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs root directory.
    pub docs_root: Option<PathBuf>,
    /// Override sidebar name.
    pub sidebar_name: Option<String>,
    /// Override output format.
    pub format: Option<OutputFormat>,
    /// Override output file.
    pub output: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "gman.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Docs configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Sidebar output configuration (paths are relative strings from TOML).
    sidebar: SidebarConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved sidebar configuration (set after loading).
    #[serde(skip)]
    pub sidebar_resolved: SidebarConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    root: Option<String>,
    index_file: Option<String>,
}

/// Resolved docs configuration with absolute paths.
#[derive(Debug)]
pub struct DocsConfig {
    /// Docs root laid out as `{namespace}/{app}/{doc}.md`.
    pub root: PathBuf,
    /// Index document looked up directly under the root.
    pub index_file: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("docs"),
            index_file: DEFAULT_INDEX_FILE.to_owned(),
        }
    }
}

/// Raw sidebar configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SidebarConfigRaw {
    name: Option<String>,
    format: Option<OutputFormat>,
    output: Option<String>,
}

/// Resolved sidebar configuration.
#[derive(Debug)]
pub struct SidebarConfig {
    /// Key the sidebar is exported under.
    pub name: String,
    /// Output format.
    pub format: OutputFormat,
    /// Output file; `None` writes to stdout.
    pub output: Option<PathBuf>,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SIDEBAR_NAME.to_owned(),
            format: OutputFormat::default(),
            output: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.root`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `gman.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(root) = &settings.docs_root {
            self.docs_resolved.root.clone_from(root);
        }
        if let Some(name) = &settings.sidebar_name {
            self.sidebar_resolved.name.clone_from(name);
        }
        if let Some(format) = settings.format {
            self.sidebar_resolved.format = format;
        }
        if let Some(output) = &settings.output {
            self.sidebar_resolved.output = Some(output.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            sidebar: SidebarConfigRaw::default(),
            docs_resolved: DocsConfig {
                root: base.join("docs"),
                ..DocsConfig::default()
            },
            sidebar_resolved: SidebarConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI settings
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_docs()?;
        require_non_empty(&self.sidebar_resolved.name, "sidebar.name")?;
        Ok(())
    }

    /// Validate docs configuration.
    fn validate_docs(&self) -> Result<(), ConfigError> {
        let index_file = &self.docs_resolved.index_file;
        require_non_empty(index_file, "docs.index_file")?;

        // Index is looked up directly under the root
        if index_file.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "docs.index_file must be a file name, not a path".to_owned(),
            ));
        }
        if !index_file.ends_with(".md") {
            return Err(ConfigError::Validation(
                "docs.index_file must end with .md".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref root) = self.docs.root {
            self.docs.root = Some(expand::expand_env(root, "docs.root")?);
        }
        if let Some(ref output) = self.sidebar.output {
            self.sidebar.output = Some(expand::expand_env(output, "sidebar.output")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    ///
    /// Absolute values (e.g., an expanded `${DOCS_DIR}`) are kept as is.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let defaults = DocsConfig::default();

        self.docs_resolved = DocsConfig {
            root: config_dir.join(self.docs.root.as_deref().unwrap_or("docs")),
            index_file: self.docs.index_file.clone().unwrap_or(defaults.index_file),
        };

        let sidebar_defaults = SidebarConfig::default();
        self.sidebar_resolved = SidebarConfig {
            name: self.sidebar.name.clone().unwrap_or(sidebar_defaults.name),
            format: self.sidebar.format.unwrap_or_default(),
            output: self.sidebar.output.as_deref().map(|o| config_dir.join(o)),
        };
    }
}
