//! Configuration management module.
//!
//! This module handles loading and saving the application configuration:
//! Firebase and Cloudinary settings, the persisted sign-in refresh token,
//! and the theme preference.

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
const DEFAULT_DIRECTORY_PATH: &str = ".config/folio-tui";

pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com";
pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com";
pub const DEFAULT_TOKEN_URL: &str = "https://securetoken.googleapis.com";
pub const DEFAULT_UPLOAD_URL: &str = "https://api.cloudinary.com";

/// Firebase project settings.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirebaseConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_firestore_url")]
    pub firestore_url: String,
    #[serde(default = "default_identity_url")]
    pub identity_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        FirebaseConfig {
            api_key: String::new(),
            project_id: String::new(),
            firestore_url: default_firestore_url(),
            identity_url: default_identity_url(),
            token_url: default_token_url(),
        }
    }
}

/// Cloudinary unsigned-upload settings.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudinaryConfig {
    #[serde(default)]
    pub cloud_name: String,
    #[serde(default)]
    pub upload_preset: String,
    #[serde(default = "default_upload_url")]
    pub upload_url: String,
}

impl Default for CloudinaryConfig {
    fn default() -> Self {
        CloudinaryConfig {
            cloud_name: String::new(),
            upload_preset: String::new(),
            upload_url: default_upload_url(),
        }
    }
}

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub firebase: FirebaseConfig,
    pub cloudinary: CloudinaryConfig,
    pub refresh_token: Option<String>,
    pub dev_auth_bypass: bool,
    pub theme_name: String,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default)]
    pub firebase: FirebaseConfig,
    #[serde(default)]
    pub cloudinary: CloudinaryConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub dev_auth_bypass: bool,
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
}

fn default_theme_name() -> String {
    "tokyo-night".to_string()
}

fn default_firestore_url() -> String {
    DEFAULT_FIRESTORE_URL.to_string()
}

fn default_identity_url() -> String {
    DEFAULT_IDENTITY_URL.to_string()
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

fn default_upload_url() -> String {
    DEFAULT_UPLOAD_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new empty instance.
    ///
    pub fn new() -> Config {
        Config {
            firebase: FirebaseConfig::default(),
            cloudinary: CloudinaryConfig::default(),
            refresh_token: None,
            dev_auth_bypass: false,
            theme_name: default_theme_name(),
            file_path: None,
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// directory if provided. A missing file leaves the defaults in place;
    /// the site then runs on fallback content.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };
        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;

        if file_path.exists() {
            let contents = fs::read_to_string(file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            self.apply_yaml(&contents)?;
        }
        Ok(())
    }

    /// Replace settings with those parsed from YAML text.
    ///
    pub fn apply_yaml(&mut self, contents: &str) -> Result<(), ConfigError> {
        let data: FileSpec = serde_yaml::from_str(contents)
            .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
        self.firebase = data.firebase;
        self.cloudinary = data.cloudinary;
        self.refresh_token = data.refresh_token.filter(|t| !t.is_empty());
        self.dev_auth_bypass = data.dev_auth_bypass;
        self.theme_name = data.theme_name;
        Ok(())
    }

    /// Serialize the configuration as YAML.
    ///
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        let data = FileSpec {
            firebase: self.firebase.clone(),
            cloudinary: self.cloudinary.clone(),
            refresh_token: self.refresh_token.clone(),
            dev_auth_bypass: self.dev_auth_bypass,
            theme_name: self.theme_name.clone(),
        };
        serde_yaml::to_string(&data).map_err(|e| ConfigError::SerializationFailed(e.to_string()))
    }

    /// Save the current configuration to disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let content = self.to_yaml()?;

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

    /// Store or clear the persisted refresh token and save.
    ///
    pub fn save_refresh_token(&mut self, token: Option<String>) -> Result<(), AppError> {
        if self.refresh_token == token {
            return Ok(());
        }
        self.refresh_token = token;
        self.save()
    }

    /// Whether Firestore can be reached with these settings.
    ///
    pub fn has_firebase(&self) -> bool {
        !self.firebase.api_key.is_empty() && !self.firebase.project_id.is_empty()
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
    use fake::{Fake, Faker};

    fn temp_dir() -> PathBuf {
        let name: u64 = Faker.fake();
        std::env::temp_dir().join(format!("folio-tui-config-{}", name))
    }

    #[test]
    fn test_missing_file_keeps_defaults() {
        let dir = temp_dir();
        let mut config = Config::new();
        config
            .load(dir.to_str())
            .expect("missing file should not fail");
        assert_eq!(config.firebase.firestore_url, DEFAULT_FIRESTORE_URL);
        assert_eq!(config.cloudinary.upload_url, DEFAULT_UPLOAD_URL);
        assert!(config.refresh_token.is_none());
        assert!(!config.dev_auth_bypass);
        assert!(!config.has_firebase());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let mut config = Config::new();
        config
            .apply_yaml(
                "firebase:\n  api_key: key\n  project_id: folio\ncloudinary:\n  cloud_name: demo\nrefresh_token: ''\n",
            )
            .expect("valid yaml");
        assert!(config.has_firebase());
        assert_eq!(config.firebase.identity_url, DEFAULT_IDENTITY_URL);
        assert_eq!(config.cloudinary.cloud_name, "demo");
        assert!(config.refresh_token.is_none());
        assert_eq!(config.theme_name, "tokyo-night");
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let mut config = Config::new();
        let result = config.apply_yaml("firebase: [");
        assert!(matches!(result, Err(ConfigError::DeserializationFailed(_))));
    }

    #[test]
    fn test_refresh_token_round_trips_through_disk() {
        let dir = temp_dir();
        let mut config = Config::new();
        config.load(dir.to_str()).expect("load");
        config.firebase.api_key = "key".to_string();
        config
            .save_refresh_token(Some("refresh-1".to_string()))
            .expect("save");

        let mut reloaded = Config::new();
        reloaded.load(dir.to_str()).expect("reload");
        assert_eq!(reloaded.refresh_token.as_deref(), Some("refresh-1"));
        assert_eq!(reloaded.firebase.api_key, "key");

        reloaded.save_refresh_token(None).expect("clear");
        let mut cleared = Config::new();
        cleared.load(dir.to_str()).expect("reload");
        assert!(cleared.refresh_token.is_none());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_save_without_path_fails() {
        let config = Config::new();
        assert!(config.save().is_err());
    }
}
