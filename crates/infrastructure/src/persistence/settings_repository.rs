//! Settings loading.
//!
//! Layers, later ones winning:
//! - built-in defaults
//! - a TOML file: `--config <path>` or the platform config directory
//!   (`~/.config/resumer/config.toml` on Linux)
//! - `RESUMER__SECTION__KEY` environment variables

use std::collections::HashMap;
use std::path::PathBuf;

use config::{Config, Environment, File};
use resumer_domain::Settings;
use tracing::debug;

/// Prefix of environment overrides, e.g. `RESUMER__PROVIDER__CLIENT_ID`.
const ENV_PREFIX: &str = "RESUMER";
const ENV_SEPARATOR: &str = "__";

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A layer could not be read or did not match the settings shape.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// An explicitly requested file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Builds [`Settings`] from defaults, a config file and the environment.
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader {
    explicit_file: Option<PathBuf>,
    env_source: Option<HashMap<String, String>>,
}

impl SettingsLoader {
    /// Creates a loader reading the default file location and the process environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `path` instead of the default location; the file must exist.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_file = Some(path.into());
        self
    }

    /// Reads overrides from `vars` instead of the process environment.
    #[must_use]
    pub fn with_env(mut self, vars: HashMap<String, String>) -> Self {
        self.env_source = Some(vars);
        self
    }

    /// Returns the path to the default config file.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("resumer").join("config.toml"))
    }

    /// Loads the settings.
    ///
    /// # Errors
    /// Fails if an explicit file is missing, a file cannot be parsed, or a
    /// value has the wrong type.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);

        match &self.explicit_file {
            Some(path) => {
                if !path.exists() {
                    return Err(SettingsError::NotFound(path.clone()));
                }
                debug!(path = %path.display(), "Reading config file");
                builder = builder.add_source(File::from(path.clone()).required(true));
            }
            None => {
                if let Some(path) = Self::default_path() {
                    debug!(path = %path.display(), "Looking for config file");
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }

        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .source(self.env_source.clone());

        let settings = builder.add_source(environment).build()?.try_deserialize()?;
        Ok(settings)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env() -> HashMap<String, String> {
        HashMap::new()
    }

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn settings_path_is_valid() {
        if let Some(p) = SettingsLoader::default_path() {
            assert!(p.ends_with("resumer/config.toml"));
        }
    }

    #[test]
    fn test_empty_file_keeps_defaults() {
        let file = toml_file("");
        let settings = SettingsLoader::new()
            .with_file(file.path())
            .with_env(no_env())
            .load()
            .unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = toml_file(
            r#"
token_file = "/tmp/hh.token"

[provider]
client_id = "CID"
client_secret = "SECRET"

[redirect]
port = 9010
"#,
        );
        let settings = SettingsLoader::new()
            .with_file(file.path())
            .with_env(no_env())
            .load()
            .unwrap();

        assert_eq!(settings.provider.client_id, "CID");
        assert_eq!(settings.provider.token_url, "https://api.hh.ru/token");
        assert_eq!(settings.redirect.port, 9010);
        assert_eq!(settings.redirect.host, "127.0.0.1");
        assert_eq!(settings.token_file, PathBuf::from("/tmp/hh.token"));
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = toml_file("[provider]\nclient_id = \"from-file\"\n");
        let env = HashMap::from([
            ("RESUMER__PROVIDER__CLIENT_ID".to_string(), "from-env".to_string()),
            ("RESUMER__PUBLISH__LOCALE".to_string(), "EN".to_string()),
        ]);
        let settings = SettingsLoader::new()
            .with_file(file.path())
            .with_env(env)
            .load()
            .unwrap();

        assert_eq!(settings.provider.client_id, "from-env");
        assert_eq!(settings.publish.locale, "EN");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SettingsLoader::new()
            .with_file(dir.path().join("absent.toml"))
            .with_env(no_env())
            .load()
            .unwrap_err();
        assert!(matches!(err, SettingsError::NotFound(_)));
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let file = toml_file("[redirect]\nport = \"eighty\"\n");
        let result = SettingsLoader::new()
            .with_file(file.path())
            .with_env(no_env())
            .load();
        assert!(matches!(result, Err(SettingsError::Config(_))));
    }
}
