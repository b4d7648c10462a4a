//! Badge defaults loaded from JSON and the environment.
//!
//! Precedence, lowest first: built-in defaults, config file, `BADGESMITH_*` environment
//! variables, explicit values set by the caller (e.g. CLI flags).

use crate::{Error, Result};
use badgesmith_render::model::BadgeGeometry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_LABEL: &str = "Built with";
pub const DEFAULT_VALUE: &str = "badgesmith";
pub const DEFAULT_THEME: &str = "default";

pub const ENV_LABEL: &str = "BADGESMITH_LABEL";
pub const ENV_VALUE: &str = "BADGESMITH_VALUE";
pub const ENV_THEME: &str = "BADGESMITH_THEME";
pub const ENV_ICON: &str = "BADGESMITH_ICON";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct BadgeConfig {
    pub label: Option<String>,
    pub value: Option<String>,
    pub theme: Option<String>,
    /// Icon file; relative paths resolve against the config file's directory.
    pub icon: Option<PathBuf>,
    pub geometry: BadgeGeometry,
    pub scale: Option<f32>,
    pub background: Option<String>,
    pub jpeg_quality: Option<u8>,
}

impl BadgeConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut cfg = Self::from_json_str(&text)?;
        if let (Some(icon), Some(dir)) = (cfg.icon.as_ref(), path.parent()) {
            if icon.is_relative() {
                cfg.icon = Some(dir.join(icon));
            }
        }
        tracing::debug!(path = %path.display(), "loaded badge config");
        Ok(cfg)
    }

    /// Applies `BADGESMITH_*` overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    pub fn with_env_from(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        let set = |key: &str, slot: &mut Option<String>| {
            if let Some(v) = var(key) {
                tracing::debug!(key, "badge setting overridden from environment");
                *slot = Some(v);
            }
        };
        set(ENV_LABEL, &mut self.label);
        set(ENV_VALUE, &mut self.value);
        set(ENV_THEME, &mut self.theme);
        if let Some(icon) = var(ENV_ICON).filter(|v| !v.trim().is_empty()) {
            self.icon = Some(PathBuf::from(icon));
        }
        self
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_LABEL)
    }

    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or(DEFAULT_VALUE)
    }

    pub fn theme(&self) -> &str {
        self.theme.as_deref().unwrap_or(DEFAULT_THEME)
    }
}
