//! Configuration loading for the Sociogram CLI.
//!
//! An explicit `--config` path wins; otherwise the platform configuration
//! directory is checked for a `config.toml`, and finally defaults apply.

use std::{fs, path::PathBuf};

use directories::ProjectDirs;
use log::{debug, info};

use sociogram::{SociogramError, config::AppConfig};

/// Loads the application configuration.
///
/// # Errors
///
/// Returns [`SociogramError::Io`] when an explicitly given file cannot be
/// read and [`SociogramError::Config`] when TOML parsing fails.
pub fn load_config(path: Option<&String>) -> Result<AppConfig, SociogramError> {
    if let Some(path) = path {
        info!(config_path = path; "Loading configuration file");
        let content = fs::read_to_string(path)?;
        return parse_config(&content, path);
    }

    if let Some(default_path) = default_config_path() {
        if default_path.exists() {
            let path = default_path.to_string_lossy().to_string();
            info!(config_path = path; "Loading configuration from platform directory");
            let content = fs::read_to_string(&default_path)?;
            return parse_config(&content, &path);
        }
    }

    debug!("No configuration file found, using defaults");
    Ok(AppConfig::default())
}

fn parse_config(content: &str, path: &str) -> Result<AppConfig, SociogramError> {
    toml::from_str(content)
        .map_err(|err| SociogramError::Config(format!("Failed to parse {path}: {err}")))
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sociogram")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let path = "definitely/missing/config.toml".to_string();

        let result = load_config(Some(&path));

        assert!(matches!(result, Err(SociogramError::Io(_))));
    }

    #[test]
    fn test_valid_toml_parses() {
        let config = parse_config(
            r#"
                [layout]
                tables_per_row = 2

                [style]
                background_color = "white"
            "#,
            "inline",
        )
        .expect("valid TOML should parse");

        assert_eq!(config.layout().tables_per_row(), 2);
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let result = parse_config("not = [valid", "inline");

        assert!(matches!(result, Err(SociogramError::Config(_))));
    }
}
