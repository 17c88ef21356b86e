//! Application configuration management.
//!
//! Configuration names the identity provider project the application signs
//! users in against. It is read from `~/.config/astral-pips/config.json`
//! and the `SUPABASE_URL` / `SUPABASE_ANON_KEY` environment variables,
//! with the environment taking precedence.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "astral-pips";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
pub const ENV_SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
}

impl Config {
    /// Load the config file (if any) and apply environment overrides
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Overlay values from `lookup` (normally the process environment).
    /// Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = non_blank(ENV_SUPABASE_URL) {
            self.supabase_url = Some(url);
        }
        if let Some(key) = non_blank(ENV_SUPABASE_ANON_KEY) {
            self.supabase_anon_key = Some(key);
        }
    }

    /// Project URL and anon key, or an error naming what is missing
    pub fn identity_endpoint(&self) -> Result<(&str, &str)> {
        let url = self.supabase_url.as_deref().with_context(|| {
            format!("No identity provider URL configured (set {})", ENV_SUPABASE_URL)
        })?;
        let key = self.supabase_anon_key.as_deref().with_context(|| {
            format!("No identity provider key configured (set {})", ENV_SUPABASE_ANON_KEY)
        })?;
        Ok((url, key))
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for log files
    pub fn log_dir() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = Config {
            supabase_url: Some("https://file.supabase.co".to_string()),
            supabase_anon_key: Some("file-key".to_string()),
        };
        let env: HashMap<&str, &str> = [(ENV_SUPABASE_URL, "https://env.supabase.co")].into();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.supabase_url.as_deref(), Some("https://env.supabase.co"));
        assert_eq!(config.supabase_anon_key.as_deref(), Some("file-key"));
    }

    #[test]
    fn test_blank_env_values_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|_| Some("   ".to_string()));
        assert!(config.supabase_url.is_none());
        assert!(config.supabase_anon_key.is_none());
    }

    #[test]
    fn test_identity_endpoint_requires_both_values() {
        let mut config = Config {
            supabase_url: Some("https://xyz.supabase.co".to_string()),
            supabase_anon_key: None,
        };
        let err = config.identity_endpoint().unwrap_err();
        assert!(err.to_string().contains(ENV_SUPABASE_ANON_KEY));

        config.supabase_anon_key = Some("anon".to_string());
        assert_eq!(
            config.identity_endpoint().expect("endpoint"),
            ("https://xyz.supabase.co", "anon")
        );
    }
}
