//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `GRIDCELL_FORMAT`, `GRIDCELL_SCHEMAS`
//! 2. Project-local: `.gridcell/config.toml`
//! 3. Global: `~/.gridcell/config.toml`
//!
//! Command-line flags override all three.

use clap::ValueEnum;
use gridcell_core::{GridError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// How command output is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputSection {
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemasSection {
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GridcellConfigFile {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub schemas: SchemasSection,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridcellConfig {
    pub format: OutputFormat,
    /// Directory holding `entities/*.toml`, if any
    pub schemas_dir: Option<PathBuf>,
}

impl GridcellConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = GridcellConfigFile::default();

        // Layer 1: Global config (~/.gridcell/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                Self::merge_into(&mut config, global);
            }
        }

        // Layer 2: Project-local config (.gridcell/config.toml)
        let local_path = PathBuf::from(".gridcell/config.toml");
        if local_path.exists() {
            let local = Self::load_file(&local_path)?;
            Self::merge_into(&mut config, local);
        }

        // Layer 3: Environment variable overrides
        Self::apply_overrides(&mut config, |key| std::env::var(key).ok())?;

        Ok(Self::resolve(config))
    }

    /// Load config from a specific file path, then apply the given overrides
    pub fn load_from_file(
        path: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        Self::apply_overrides(&mut config, lookup)?;
        Ok(Self::resolve(config))
    }

    fn resolve(file: GridcellConfigFile) -> Self {
        GridcellConfig {
            format: file.output.format.unwrap_or_default(),
            schemas_dir: file.schemas.dir,
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".gridcell").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<GridcellConfigFile> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            GridError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    fn merge_into(base: &mut GridcellConfigFile, overlay: GridcellConfigFile) {
        if overlay.output.format.is_some() {
            base.output.format = overlay.output.format;
        }
        if overlay.schemas.dir.is_some() {
            base.schemas.dir = overlay.schemas.dir;
        }
    }

    fn apply_overrides(
        config: &mut GridcellConfigFile,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<()> {
        if let Some(format) = lookup("GRIDCELL_FORMAT") {
            let parsed = OutputFormat::parse(&format).ok_or_else(|| {
                GridError::ConfigError(format!(
                    "GRIDCELL_FORMAT must be 'text' or 'json', got '{}'",
                    format
                ))
            })?;
            config.output.format = Some(parsed);
        }
        if let Some(dir) = lookup("GRIDCELL_SCHEMAS") {
            config.schemas.dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_load_config_from_file() {
        let (_dir, path) = temp_config(
            r#"
[output]
format = "json"

[schemas]
dir = "schemas"
"#,
        );
        let config = GridcellConfig::load_from_file(&path, no_env).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.schemas_dir, Some(PathBuf::from("schemas")));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let (_dir, path) = temp_config("");
        let config = GridcellConfig::load_from_file(&path, no_env).unwrap();
        assert_eq!(config, GridcellConfig::default());
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn test_env_override() {
        let (_dir, path) = temp_config("[output]\nformat = \"text\"\n");
        let config = GridcellConfig::load_from_file(&path, |key| match key {
            "GRIDCELL_FORMAT" => Some("JSON".to_string()),
            "GRIDCELL_SCHEMAS" => Some("/srv/schemas".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.schemas_dir, Some(PathBuf::from("/srv/schemas")));
    }

    #[test]
    fn test_bad_env_format() {
        let (_dir, path) = temp_config("");
        let result = GridcellConfig::load_from_file(&path, |key| {
            (key == "GRIDCELL_FORMAT").then(|| "yaml".to_string())
        });
        assert!(matches!(result, Err(GridError::ConfigError(_))));
    }

    #[test]
    fn test_bad_file() {
        let (_dir, path) = temp_config("[output]\nformat = \"xml\"\n");
        assert!(matches!(
            GridcellConfig::load_from_file(&path, no_env),
            Err(GridError::ConfigError(_))
        ));
    }

    #[test]
    fn test_merge_keeps_base_when_overlay_unset() {
        let mut base = GridcellConfigFile::default();
        base.output.format = Some(OutputFormat::Json);

        let mut overlay = GridcellConfigFile::default();
        overlay.schemas.dir = Some(PathBuf::from("local"));

        GridcellConfig::merge_into(&mut base, overlay);
        assert_eq!(base.output.format, Some(OutputFormat::Json));
        assert_eq!(base.schemas.dir, Some(PathBuf::from("local")));
    }
}
