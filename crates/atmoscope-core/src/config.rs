//! Configuration for the front end
//!
//! Mirrors the user-facing settings surface: the LSP launch command, the
//! kill switch for the whole LSP integration, and build-on-save.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Settings for launching and gating the LSP client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LspConfig {
    /// Command name plus arguments used to spawn the server.
    pub cmd: Vec<String>,
    /// When true, no client is started and all dependent views and
    /// commands stay unregistered.
    pub disabled: bool,
}

impl Default for LspConfig {
    fn default() -> Self {
        Self {
            cmd: vec!["atmo".into(), "lsp".into()],
            disabled: false,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub lsp: LspConfig,
    /// When true, saving a source file inside a package triggers a build.
    pub build_on_save: bool,
}

impl Config {
    /// Load configuration from a JSON file, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    /// The toolchain executable name, taken from the first element of the
    /// LSP launch command. Build-on-save invokes `<tool> build`.
    #[must_use]
    pub fn tool(&self) -> &str {
        self.lsp.cmd.first().map_or("atmo", String::as_str)
    }

    /// Whether the LSP integration is usable: not disabled, and the launch
    /// command is non-empty.
    #[must_use]
    pub fn lsp_enabled(&self) -> bool {
        !self.lsp.disabled && !self.lsp.cmd.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_launch_atmo_lsp() {
        let config = Config::default();
        assert_eq!(config.lsp.cmd, vec!["atmo", "lsp"]);
        assert!(!config.lsp.disabled);
        assert!(!config.build_on_save);
        assert!(config.lsp_enabled());
        assert_eq!(config.tool(), "atmo");
    }

    #[test]
    fn parses_partial_json() {
        let config: Config =
            serde_json::from_str(r#"{"buildOnSave": true}"#).expect("parse");
        assert!(config.build_on_save);
        assert_eq!(config.lsp.cmd, vec!["atmo", "lsp"]);
    }

    #[test]
    fn parses_custom_lsp_cmd() {
        let config: Config =
            serde_json::from_str(r#"{"lsp": {"cmd": ["atmo-nightly", "lsp", "-v"]}}"#)
                .expect("parse");
        assert_eq!(config.lsp.cmd, vec!["atmo-nightly", "lsp", "-v"]);
        assert_eq!(config.tool(), "atmo-nightly");
    }

    #[test]
    fn disabled_flag_gates_lsp() {
        let config: Config =
            serde_json::from_str(r#"{"lsp": {"disabled": true}}"#).expect("parse");
        assert!(!config.lsp_enabled());
    }

    #[test]
    fn empty_cmd_gates_lsp() {
        let config: Config = serde_json::from_str(r#"{"lsp": {"cmd": []}}"#).expect("parse");
        assert!(!config.lsp_enabled());
        assert_eq!(config.tool(), "atmo");
    }

    #[test]
    fn load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load(&dir.path().join("no-such.json")).expect("load");
        assert!(config.lsp_enabled());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("atmoscope.json");
        std::fs::write(&path, r#"{"lsp": {"disabled": true}, "buildOnSave": true}"#)
            .expect("write");
        let config = Config::load(&path).expect("load");
        assert!(config.lsp.disabled);
        assert!(config.build_on_save);
    }

    #[test]
    fn load_rejects_malformed_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("atmoscope.json");
        std::fs::write(&path, "{not json").expect("write");
        assert!(Config::load(&path).is_err());
    }
}
