use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use std::{env, fs, path::PathBuf};

const MAX_OUTPUT_LIMIT: usize = 10_000;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct FileConfig {
    pub log_level: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub persist_contacts: Option<bool>,
    pub output_limit: Option<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub log_level: String,
    pub data_dir: Option<PathBuf>,
    pub persist_contacts: bool,
    pub output_limit: usize, // feedback lines kept in the output pane
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            data_dir: default_data_dir(),
            persist_contacts: true,
            output_limit: 500,
        }
    }
}

impl AppConfig {
    /// Build the effective config. Problems reading the file are returned
    /// rather than logged, since logging is configured from the result.
    pub fn from_env_and_file() -> (Self, Vec<String>) {
        let mut cfg = Self::default();
        let mut warnings = Vec::new();
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let loaded = fs::read_to_string(&path)
                    .with_context(|| format!("read {}", path.display()))
                    .and_then(|text| cfg.apply_toml(&text));
                if let Err(e) = loaded {
                    warnings.push(format!("{:#}", e));
                }
            }
        }
        cfg.apply_env(|key| env::var(key).ok());
        (cfg, warnings)
    }

    /// Merge a config file over the current values. A file that fails to
    /// parse leaves everything untouched.
    pub fn apply_toml(&mut self, text: &str) -> Result<()> {
        let file_cfg =
            toml::from_str::<FileConfig>(text).context("ignoring malformed config")?;
        if let Some(l) = file_cfg.log_level {
            self.log_level = l;
        }
        if let Some(d) = file_cfg.data_dir {
            self.data_dir = Some(d);
        }
        if let Some(p) = file_cfg.persist_contacts {
            self.persist_contacts = p;
        }
        if let Some(n) = file_cfg.output_limit {
            self.output_limit = n.clamp(1, MAX_OUTPUT_LIMIT);
        }
        Ok(())
    }

    /// `CMDBOX_LOG` and `CMDBOX_DATA_DIR` win over the file; blank values are ignored.
    pub fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(level) = get("CMDBOX_LOG").filter(|v| !v.trim().is_empty()) {
            self.log_level = level;
        }
        if let Some(dir) = get("CMDBOX_DATA_DIR").filter(|v| !v.trim().is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
    }

    fn config_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("cmdbox").join("config.toml"))
    }
}

fn default_data_dir() -> Option<PathBuf> {
    let base = BaseDirs::new()?;
    Some(base.data_dir().join("cmdbox"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_values_override_defaults() {
        let mut cfg = AppConfig::default();
        cfg.apply_toml(
            r#"
log_level = "debug"
data_dir = "/tmp/cmdbox-test"
persist_contacts = false
output_limit = 0
"#,
        )
        .unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.data_dir, Some(PathBuf::from("/tmp/cmdbox-test")));
        assert!(!cfg.persist_contacts);
        assert_eq!(cfg.output_limit, 1);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut cfg = AppConfig::default();
        cfg.apply_toml("output_limit = 20\n").unwrap();
        assert_eq!(cfg.output_limit, 20);
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.persist_contacts);
    }

    #[test]
    fn malformed_file_is_reported_and_ignored() {
        let mut cfg = AppConfig::default();
        let err = cfg.apply_toml("log_level = [").unwrap_err();
        assert!(format!("{:#}", err).starts_with("ignoring malformed config"));
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn output_limit_is_capped() {
        let mut cfg = AppConfig::default();
        cfg.apply_toml("output_limit = 1000000\n").unwrap();
        assert_eq!(cfg.output_limit, MAX_OUTPUT_LIMIT);
    }

    #[test]
    fn env_overrides_file_values() {
        let mut cfg = AppConfig::default();
        cfg.apply_toml("log_level = \"warn\"\n").unwrap();
        cfg.apply_env(|key| match key {
            "CMDBOX_LOG" => Some("trace".to_string()),
            "CMDBOX_DATA_DIR" => Some("/srv/cmdbox".to_string()),
            _ => None,
        });
        assert_eq!(cfg.log_level, "trace");
        assert_eq!(cfg.data_dir, Some(PathBuf::from("/srv/cmdbox")));
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut cfg = AppConfig::default();
        cfg.apply_env(|_| Some("   ".to_string()));
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn unset_env_changes_nothing() {
        let mut cfg = AppConfig::default();
        cfg.apply_env(|_| None);
        assert_eq!(cfg, AppConfig::default());
    }
}
