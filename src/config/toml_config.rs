use crate::core::export::DEFAULT_TABLE_FILE;
use crate::core::pipeline::DEFAULT_API_ENDPOINT;
use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub profile_url: String,
    pub timeout_seconds: Option<u64>,
    pub parameters: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub table_file: Option<String>,
    pub download_images: Option<bool>,
    pub save_json: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PROXYCURL_API})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        self.source.endpoint.as_deref().unwrap_or(DEFAULT_API_ENDPOINT)
    }

    fn api_key(&self) -> Option<&str> {
        self.source.api_key.as_deref()
    }

    fn profile_url(&self) -> &str {
        &self.source.profile_url
    }

    fn extra_parameters(&self) -> HashMap<String, String> {
        self.source.parameters.clone().unwrap_or_default()
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.source.timeout_seconds
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn table_file(&self) -> &str {
        self.load.table_file.as_deref().unwrap_or(DEFAULT_TABLE_FILE)
    }

    fn download_images(&self) -> bool {
        self.load.download_images.unwrap_or(true)
    }

    fn save_json(&self) -> bool {
        self.load.save_json.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_http_url("source.endpoint", self.api_endpoint())?;
        validation::validate_http_url("source.profile_url", &self.source.profile_url)?;

        let api_key = validation::validate_required_field("source.api_key", &self.source.api_key)?;
        validation::validate_non_empty_string("source.api_key", api_key)?;

        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_range("source.timeout_seconds", timeout, 1..=600)?;
        }

        validation::validate_output_dir("load.output_path", &self.load.output_path)?;
        validation::validate_table_file("load.table_file", self.table_file())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_toml_config() {
        let toml_content = r#"
[source]
api_key = "secret"
profile_url = "https://www.linkedin.com/in/janedoe/"

[load]
output_path = "./data"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api_endpoint(), DEFAULT_API_ENDPOINT);
        assert_eq!(config.table_file(), "linkedin_profile_data.csv");
        assert!(config.download_images());
        assert!(!config.save_json());
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[source]
endpoint = "https://api.example.com/v2/linkedin"
api_key = "secret"
profile_url = "https://www.linkedin.com/in/janedoe/"
timeout_seconds = 30

[source.parameters]
skills = "include"

[load]
output_path = "./out"
table_file = "people.csv"
download_images = false
save_json = true

[monitoring]
enabled = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api_endpoint(), "https://api.example.com/v2/linkedin");
        assert_eq!(config.timeout_seconds(), Some(30));
        assert_eq!(
            config.extra_parameters().get("skills").map(String::as_str),
            Some("include")
        );
        assert_eq!(config.table_file(), "people.csv");
        assert!(!config.download_images());
        assert!(config.save_json());
        assert!(config.monitoring_enabled());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PROFILE_ETL_TEST_KEY", "from-env");

        let toml_content = r#"
[source]
api_key = "${PROFILE_ETL_TEST_KEY}"
profile_url = "https://www.linkedin.com/in/janedoe/"

[load]
output_path = "./data"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_key(), Some("from-env"));

        std::env::remove_var("PROFILE_ETL_TEST_KEY");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = r#"
[source]
api_key = "${PROFILE_ETL_SURELY_UNSET_VAR}"
profile_url = "https://www.linkedin.com/in/janedoe/"

[load]
output_path = "./data"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_key(), Some("${PROFILE_ETL_SURELY_UNSET_VAR}"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_api_key_fails_validation() {
        let toml_content = r#"
[source]
profile_url = "https://www.linkedin.com/in/janedoe/"

[load]
output_path = "./data"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(EtlError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_table_file_outside_output_dir_fails_validation() {
        let toml_content = r#"
[source]
api_key = "secret"
profile_url = "https://www.linkedin.com/in/janedoe/"

[load]
output_path = "./data"
table_file = "../linkedin_profile_data.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(EtlError::InvalidConfigValueError { ref field, .. }) if field == "load.table_file"
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[source]
api_key = "secret"
profile_url = "https://www.linkedin.com/in/janedoe/"

[load]
output_path = "./file-output"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_path(), "./file-output");
    }
}
