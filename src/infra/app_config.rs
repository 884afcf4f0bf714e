use crate::application::compare::{
    DEFAULT_MAX_TABLE_CELLS, DEFAULT_MAX_TOTAL_LINES, DiffOptions, RenderOptions,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Combined line count of both inputs above which comparisons fail.
    pub max_total_lines: usize,
    /// LCS table size above which the Myers fallback kicks in.
    pub max_table_cells: usize,
    pub context_lines: usize,
    pub side_by_side_width: usize,
    pub inline_highlight: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_total_lines: DEFAULT_MAX_TOTAL_LINES,
            max_table_cells: DEFAULT_MAX_TABLE_CELLS,
            context_lines: 3,
            side_by_side_width: 160,
            inline_highlight: true,
        }
    }
}

impl AppConfig {
    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            max_total_lines: self.max_total_lines,
            max_table_cells: self.max_table_cells,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            inline_highlight: self.inline_highlight,
        }
    }
}

/// Loads the config from its default location, falling back to defaults when
/// the file is missing or unreadable.
pub fn load_config() -> AppConfig {
    let path = config_path();
    let Ok(contents) = std::fs::read_to_string(&path) else {
        return AppConfig::default();
    };
    toml::from_str(&contents).unwrap_or_else(|err| {
        log::warn!("Ignoring invalid config {}: {}", path.display(), err);
        AppConfig::default()
    })
}

/// Loads a config file the user asked for explicitly; errors are surfaced.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("Invalid config {}", path.display()))
}

pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("CODESHIFT_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    app_data_dir().join("config.toml")
}

fn app_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var("CODESHIFT_DATA_HOME") {
        return PathBuf::from(path);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = home::home_dir() {
            return home
                .join("Library")
                .join("Application Support")
                .join("codeshift");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("codeshift");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("codeshift");
        }
        if let Some(home) = home::home_dir() {
            return home.join(".config").join("codeshift");
        }
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".codeshift")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str("max_total_lines = 500\n").unwrap();
        assert_eq!(config.max_total_lines, 500);
        assert_eq!(config.context_lines, 3);
        assert!(config.inline_highlight);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            context_lines: 1,
            inline_highlight: false,
            ..AppConfig::default()
        };

        save_config_to(&path, &config).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "max_total_lines = \"lots\"").unwrap();
        assert!(load_config_from(&path).is_err());
        assert!(load_config_from(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_options_follow_config() {
        let config = AppConfig {
            max_total_lines: 10,
            max_table_cells: 20,
            inline_highlight: false,
            ..AppConfig::default()
        };
        assert_eq!(
            config.diff_options(),
            DiffOptions {
                max_total_lines: 10,
                max_table_cells: 20
            }
        );
        assert!(!config.render_options().inline_highlight);
    }
}
