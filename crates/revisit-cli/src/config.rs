//! CLI configuration file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use revisit_core::{Preset, SessionConfig};

/// Contents of `revisit.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevisitConfig {
    /// Base policy. Individual `[session]` fields override it.
    #[serde(default)]
    pub preset: Option<Preset>,

    #[serde(default)]
    pub session: SessionOverrides,

    #[serde(default)]
    pub export: ExportConfig,
}

/// Per-field overrides on top of the preset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionOverrides {
    pub review_threshold: Option<f64>,
    pub wrong_answer_trigger: Option<usize>,
    pub max_review_cycles: Option<u32>,
    pub repeated_review_limit: Option<u32>,
    pub cyclic: Option<bool>,
}

/// Where the wrong-answer artifact goes at session end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_export_dir")]
    pub dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: default_export_dir(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

impl RevisitConfig {
    /// Resolve the session policy. `preset` from the command line wins over
    /// the file's preset; `[session]` fields apply on top of either.
    pub fn session_config(&self, preset: Option<Preset>) -> Result<SessionConfig> {
        let preset = preset.or(self.preset).unwrap_or(Preset::Classic);
        let mut config = preset.config();
        let overrides = &self.session;

        if let Some(v) = overrides.review_threshold {
            config.review_threshold = v;
        }
        if let Some(v) = overrides.wrong_answer_trigger {
            config.wrong_answer_trigger = v;
        }
        if let Some(v) = overrides.max_review_cycles {
            config.max_review_cycles = v;
        }
        if let Some(v) = overrides.repeated_review_limit {
            config.repeated_review_limit = Some(v);
        }
        if let Some(v) = overrides.cyclic {
            config.cyclic = v;
        }

        config
            .validate()
            .with_context(|| format!("invalid session settings for preset {preset}"))?;
        Ok(config)
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `revisit.toml` in the current directory
/// 2. `~/.config/revisit/config.toml`
///
/// Environment variable override: `REVISIT_EXPORT_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<RevisitConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("revisit.toml");
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
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<RevisitConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => RevisitConfig::default(),
    };

    if let Ok(dir) = std::env::var("REVISIT_EXPORT_DIR") {
        config.export.dir = PathBuf::from(dir);
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("revisit"))
}
