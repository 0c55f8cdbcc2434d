//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level examgrade configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamgradeConfig {
    /// Output directory for reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Default output formats (comma-separated: json, html, sheet, all).
    #[serde(default = "default_formats")]
    pub formats: String,
    /// Where the last submitted input is kept.
    #[serde(default = "default_draft_path")]
    pub draft_path: PathBuf,
    /// Store each graded submission as the new draft.
    #[serde(default = "default_true")]
    pub save_draft: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./examgrade-results")
}
fn default_formats() -> String {
    "json".to_string()
}
fn default_draft_path() -> PathBuf {
    PathBuf::from(".examgrade").join("exam-data.json")
}
fn default_true() -> bool {
    true
}

impl Default for ExamgradeConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            formats: default_formats(),
            draft_path: default_draft_path(),
            save_draft: true,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `examgrade.toml` in the current directory
/// 2. `~/.config/examgrade/config.toml`
///
/// Environment variable overrides: `EXAMGRADE_OUTPUT_DIR`, `EXAMGRADE_DRAFT_PATH`.
pub fn load_config_from(path: Option<&Path>) -> Result<ExamgradeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("examgrade.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<ExamgradeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ExamgradeConfig::default(),
    };

    if let Ok(dir) = std::env::var("EXAMGRADE_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }
    if let Ok(draft) = std::env::var("EXAMGRADE_DRAFT_PATH") {
        config.draft_path = PathBuf::from(draft);
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("examgrade"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ExamgradeConfig::default();
        assert_eq!(config.formats, "json");
        assert!(config.save_draft);
        assert!(config.draft_path.ends_with("exam-data.json"));
    }

    #[test]
    fn parse_partial_config() {
        let config: ExamgradeConfig = toml::from_str(
            r#"
output_dir = "out"
save_draft = false
"#,
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert!(!config.save_draft);
        assert_eq!(config.formats, "json");
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let result = load_config_from(Some(Path::new("/definitely/not/here.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn explicit_config_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("examgrade.toml");
        std::fs::write(&path, "formats = \"html,sheet\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.formats, "html,sheet");
    }
}
