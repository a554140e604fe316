use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../default_config.toml");

/// Name of the configuration file looked up in the data directory
pub const CONFIG_FILE_NAME: &str = "feedback.toml";

const MAX_PAGE_SIZE: usize = 1000;

/// Process-wide settings, read once at startup and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Table holding the feedback items
    pub table_name: String,

    /// Partition key value shared by every feedback item
    pub partition_key: String,

    /// Bucket receiving the rendered weekly reports
    pub reports_bucket: String,

    /// Number of items per page when listing
    pub default_page_size: usize,

    /// Who receives the weekly report e-mail
    pub recipient_email: String,

    /// Sender address of the report e-mail
    pub source_email: String,

    /// Sender display name of the report e-mail
    pub source_name: String,

    /// Transactional mail API endpoint
    pub mail_api_url: String,
}

impl Config {
    /// Load configuration from a file or use defaults, then apply environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the result is invalid
    pub fn load(data_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let mut config = Self::load_file(data_dir, config_path)?;
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;

        Ok(config)
    }

    fn load_file(data_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = data_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("no configuration file at '{path}', using defaults");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        log::debug!("loading configuration from '{final_path}'");
        toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))
    }

    /// Override settings from environment-style variables
    ///
    /// # Errors
    ///
    /// Returns an error if `DEFAULT_PAGE_SIZE` is not a number
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let text_settings: [(&str, &mut String); 7] = [
            ("TABLE_NAME", &mut self.table_name),
            ("PARTITION_KEY", &mut self.partition_key),
            ("REPORTS_BUCKET", &mut self.reports_bucket),
            ("RECIPIENT_EMAIL", &mut self.recipient_email),
            ("SOURCE_EMAIL", &mut self.source_email),
            ("SOURCE_NAME", &mut self.source_name),
            ("MAIL_API_URL", &mut self.mail_api_url),
        ];

        for (name, setting) in text_settings {
            if let Some(value) = lookup(name) {
                *setting = value;
            }
        }

        if let Some(value) = lookup("DEFAULT_PAGE_SIZE") {
            self.default_page_size = value
                .trim()
                .parse::<usize>()
                .into_app_err_with(|| format!("DEFAULT_PAGE_SIZE must be a positive integer, got '{value}'"))?;
        }

        Ok(())
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a name is empty, the page size is out of range, or an address is malformed
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("table_name", &self.table_name),
            ("partition_key", &self.partition_key),
            ("reports_bucket", &self.reports_bucket),
            ("mail_api_url", &self.mail_api_url),
        ] {
            if value.trim().is_empty() {
                return Err(app_err!("{name} must not be empty"));
            }
        }

        if !(1..=MAX_PAGE_SIZE).contains(&self.default_page_size) {
            return Err(app_err!(
                "default_page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.default_page_size
            ));
        }

        for (name, value) in [("recipient_email", &self.recipient_email), ("source_email", &self.source_email)] {
            if !value.contains('@') {
                return Err(app_err!("{name} must be an e-mail address, got '{value}'"));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn temp_root(tmp: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.table_name, "FeedbacksTable");
        assert_eq!(config.partition_key, "FEEDBACK");
        assert_eq!(config.default_page_size, 100);
    }

    #[test]
    fn test_validate_page_size_out_of_range() {
        let config = Config { default_page_size: 0, ..Config::default() };
        assert!(config.validate().is_err());

        let config = Config { default_page_size: MAX_PAGE_SIZE + 1, ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_table_name() {
        let config = Config { table_name: "  ".into(), ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_address() {
        let config = Config { recipient_email: "nobody".into(), ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars = HashMap::from([
            ("TABLE_NAME", "test-feedbacks-table"),
            ("REPORTS_BUCKET", "test-reports-bucket"),
            ("DEFAULT_PAGE_SIZE", "25"),
            ("RECIPIENT_EMAIL", "test@example.com"),
        ]);
        let mut config = Config::default();
        config.apply_env(|name| vars.get(name).map(ToString::to_string)).unwrap();

        assert_eq!(config.table_name, "test-feedbacks-table");
        assert_eq!(config.reports_bucket, "test-reports-bucket");
        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.recipient_email, "test@example.com");
        assert_eq!(config.source_email, Config::default().source_email);
    }

    #[test]
    fn test_env_rejects_non_numeric_page_size() {
        let mut config = Config::default();
        let result = config.apply_env(|name| (name == "DEFAULT_PAGE_SIZE").then(|| "many".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_save_default_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let output_path = temp_root(&tmp).join("custom.toml");
        Config::save_default(&output_path).unwrap();

        let loaded = Config::load_file(&temp_root(&tmp), Some(&output_path)).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_load_file_from_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let root = temp_root(&tmp);
        let text = DEFAULT_CONFIG_TOML.replace("default_page_size = 100", "default_page_size = 7");
        fs::write(root.join(CONFIG_FILE_NAME), text).unwrap();

        let loaded = Config::load_file(&root, None).unwrap();
        assert_eq!(loaded.default_page_size, 7);
    }

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load_file(&temp_root(&tmp), None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = temp_root(&tmp).join("bad.toml");
        fs::write(&path, format!("{DEFAULT_CONFIG_TOML}\nbucket_region = \"us-east-1\"\n")).unwrap();

        assert!(Config::load_file(&temp_root(&tmp), Some(&path)).is_err());
    }
}
