//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use taxograph::{TaxographError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse TOML configuration {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),
}

impl From<ConfigError> for TaxographError {
    fn from(err: ConfigError) -> Self {
        TaxographError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (taxograph/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, TaxographError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path:? = path; "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("taxograph/config.toml");
    if local_config.exists() {
        info!(path:? = local_config; "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("org", "taxograph", "taxograph") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path:? = system_config; "Loading configuration from system path");
            return load_config_file(&system_config);
        }

        debug!(path:? = system_config; "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
fn load_config_file(path: &Path) -> Result<AppConfig, TaxographError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: AppConfig = toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r##"
            [style]
            font_family = "Helvetica"
            palette = ["#000000"]

            [labels]
            max_item_length = 40
            "##,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.style().font_family(), "Helvetica");
        assert_eq!(config.style().palette(), &["#000000"]);
        assert_eq!(config.labels().max_item_length(), Some(40));
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let Err(TaxographError::Config(message)) = load_config(Some(&path)) else {
            panic!("expected a config error");
        };
        assert!(message.starts_with("missing configuration file"));
    }

    #[test]
    fn test_invalid_toml_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[style\nfont_size = ").unwrap();

        assert!(matches!(
            load_config(Some(&path)),
            Err(TaxographError::Config(_))
        ));
    }
}
