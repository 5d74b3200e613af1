//! Serialization of sidebars config for the site generator.

use serde::Deserialize;

use crate::error::SidebarError;
use crate::sidebar::SidebarsConfig;

/// Output format for a rendered sidebars config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON object.
    #[default]
    Json,
    /// CommonJS module (`sidebars.js`) exporting the same object.
    Js,
}

impl SidebarsConfig {
    /// Render this config in the given format.
    ///
    /// Output always ends with a newline.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::Serialize`] if JSON serialization fails.
    pub fn render(&self, format: OutputFormat) -> Result<String, SidebarError> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(match format {
            OutputFormat::Json => format!("{json}\n"),
            OutputFormat::Js => format!(
                "// @ts-check\n\n\
                 /** @type {{import('@docusaurus/plugin-content-docs').SidebarsConfig}} */\n\
                 const sidebars = {json};\n\n\
                 module.exports = sidebars;\n"
            ),
        })
    }
}
