//! `gman sidebar` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use gman_config::{CliSettings, Config};
use gman_sidebar::{OutputFormat, SidebarBuilder};

use crate::error::CliError;
use crate::output::Output;

/// Output format accepted on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Pretty-printed JSON.
    Json,
    /// CommonJS `sidebars.js` module.
    Js,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Self::Json,
            FormatArg::Js => Self::Js,
        }
    }
}

/// Arguments for the sidebar command.
#[derive(Args)]
pub(crate) struct SidebarArgs {
    /// Path to configuration file (default: auto-discover gman.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Docs root laid out as {namespace}/{app}/{doc}.md (overrides config).
    #[arg(short, long, env = "DOCS_DIR")]
    docs_dir: Option<PathBuf>,

    /// Name the sidebar is exported under (overrides config).
    #[arg(short, long)]
    name: Option<String>,

    /// Output format (overrides config).
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Write to this file instead of stdout (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Rendered sidebar plus counts for the summary.
struct Generated {
    rendered: String,
    namespaces: usize,
    documents: usize,
}

impl SidebarArgs {
    /// Execute the sidebar command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the docs root can't be read,
    /// or the output can't be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            docs_root: self.docs_dir,
            sidebar_name: self.name,
            format: self.format.map(OutputFormat::from),
            output: self.output,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Docs root: {}",
            config.docs_resolved.root.display()
        ));

        let generated = generate(&config)?;

        if generated.documents == 0 {
            output.warning("No {namespace}/{app}/{doc}.md documents found");
        } else {
            output.info(&format!(
                "Found {} in {}",
                plural(generated.documents, "document"),
                plural(generated.namespaces, "namespace")
            ));
        }

        match &config.sidebar_resolved.output {
            Some(path) => {
                write_output(path, &generated.rendered)?;
                output.success(&format!("Sidebar written to {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(generated.rendered.as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(())
    }
}

/// Build and render the sidebar described by `config`.
fn generate(config: &Config) -> Result<Generated, CliError> {
    let sidebar = SidebarBuilder::new(config.docs_resolved.root.clone())
        .with_index_file(config.docs_resolved.index_file.clone())
        .build()?;

    let namespaces = sidebar.categories().count();
    let documents = sidebar.document_count();
    let rendered = sidebar
        .into_config(config.sidebar_resolved.name.clone())
        .render(config.sidebar_resolved.format)?;

    tracing::info!(namespaces, documents, "Sidebar generated");

    Ok(Generated {
        rendered,
        namespaces,
        documents,
    })
}

/// Format a count with a singular or plural noun (`1 document`, `2 documents`).
fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Write rendered output, creating parent directories as needed.
fn write_output(path: &Path, rendered: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CliError::output(parent, e))?;
    }
    std::fs::write(path, rendered).map_err(|e| CliError::output(path, e))
}
