//! Configuration management module.
//!
//! This module handles loading, saving, and managing application configuration,
//! including backend credentials and theme preferences.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/gym-tui";

/// Oversees management of configuration file.
///
#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub project_id: Option<String>,
    pub theme_name: String,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
}

fn default_theme_name() -> String {
    "light".to_string()
}

impl Config {
    /// Return a new empty instance.
    ///
    pub fn new() -> Config {
        Config {
            api_key: None,
            project_id: None,
            theme_name: default_theme_name(),
            file_path: None,
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// path if provided. If no configuration file exists yet, write a
    /// template at the default file path or the custom path if provided so
    /// the user has something to fill in.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        // Try to create dir path if it doesn't exist
        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        // Specify config file path
        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;

        // If file exists, try to extract credentials and theme preference
        if file_path.exists() {
            let contents = fs::read_to_string(file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            let data: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            self.api_key = Some(data.api_key).filter(|key| !key.is_empty());
            self.project_id = Some(data.project_id).filter(|id| !id.is_empty());
            self.theme_name = data.theme_name;
        } else {
            // Write a template so the user can fill in credentials
            self.save()?;
        }

        Ok(())
    }

    /// Save the current configuration to disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            api_key: self.api_key.clone().unwrap_or_default(),
            project_id: self.project_id.clone().unwrap_or_default(),
            theme_name: self.theme_name.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Return the backend credentials or an error pointing the user at the
    /// configuration file to fill in.
    ///
    pub fn credentials(&self) -> Result<(String, String), AppError> {
        let path = self
            .file_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(FILE_NAME));
        match (&self.api_key, &self.project_id) {
            (Some(api_key), Some(project_id)) => Ok((api_key.clone(), project_id.clone())),
            _ => Err(ConfigError::CredentialsNotSet { path }.into()),
        }
    }

    /// Returns the path buffer for the default path to the configuration file
    /// or an error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_config_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_config_path))
            }
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_dir() -> PathBuf {
        std::env::temp_dir().join(format!("gym-tui-test-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_load_writes_template_when_missing() {
        let dir = temp_config_dir();
        let mut config = Config::new();
        config
            .load(Some(dir.to_str().unwrap()))
            .expect("load should succeed");

        assert!(dir.join(FILE_NAME).exists());
        assert!(config.api_key.is_none());
        assert!(config.project_id.is_none());
        assert_eq!(config.theme_name, "light");
        assert!(config.credentials().is_err());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_load_reads_existing_file() {
        let dir = temp_config_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(FILE_NAME),
            "api_key: key-123\nproject_id: my-project\ntheme_name: dark\n",
        )
        .unwrap();

        let mut config = Config::new();
        config
            .load(Some(dir.to_str().unwrap()))
            .expect("load should succeed");

        let (api_key, project_id) = config.credentials().expect("credentials should be set");
        assert_eq!(api_key, "key-123");
        assert_eq!(project_id, "my-project");
        assert_eq!(config.theme_name, "dark");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_save_round_trip() {
        let dir = temp_config_dir();
        let mut config = Config::new();
        config.load(Some(dir.to_str().unwrap())).unwrap();
        config.api_key = Some("abc".to_string());
        config.project_id = Some("def".to_string());
        config.theme_name = "dark".to_string();
        config.save().unwrap();

        let mut reloaded = Config::new();
        reloaded.load(Some(dir.to_str().unwrap())).unwrap();
        assert_eq!(reloaded.api_key.as_deref(), Some("abc"));
        assert_eq!(reloaded.project_id.as_deref(), Some("def"));
        assert_eq!(reloaded.theme_name, "dark");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_empty_credentials_treated_as_unset() {
        let dir = temp_config_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(FILE_NAME), "api_key: \"\"\nproject_id: \"\"\n").unwrap();

        let mut config = Config::new();
        config.load(Some(dir.to_str().unwrap())).unwrap();
        assert!(config.api_key.is_none());
        assert!(config.credentials().is_err());

        fs::remove_dir_all(dir).unwrap();
    }
}
