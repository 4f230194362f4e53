pub mod storage;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::export::DEFAULT_TABLE_FILE;
#[cfg(feature = "cli")]
use crate::core::pipeline::DEFAULT_API_ENDPOINT;
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::logger::LogFormat;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::collections::HashMap;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "profile-etl")]
#[command(about = "Fetch a LinkedIn profile, normalize it and append it to a CSV table")]
pub struct CliConfig {
    /// Public LinkedIn profile URL to fetch
    #[arg(long)]
    pub profile_url: String,

    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    /// Bearer token for the profile API
    #[arg(long, env = "PROXYCURL_API", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, default_value = "./data")]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_TABLE_FILE)]
    pub table_file: String,

    /// Extra query parameters, e.g. `--param skills=include`
    #[arg(long = "param", value_parser = parse_key_value)]
    pub parameters: Vec<(String, String)>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Do not download profile and cover images")]
    pub skip_images: bool,

    #[arg(long, help = "Also save the normalized profile as JSON")]
    pub save_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[cfg(feature = "cli")]
fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", raw))
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn profile_url(&self) -> &str {
        &self.profile_url
    }

    fn extra_parameters(&self) -> HashMap<String, String> {
        self.parameters.iter().cloned().collect()
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn table_file(&self) -> &str {
        &self.table_file
    }

    fn download_images(&self) -> bool {
        !self.skip_images
    }

    fn save_json(&self) -> bool {
        self.save_json
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_http_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_http_url("profile_url", &self.profile_url)?;

        let api_key = validation::validate_required_field("api_key", &self.api_key)?;
        validation::validate_non_empty_string("api_key", api_key)?;

        validation::validate_output_dir("output_path", &self.output_path)?;
        validation::validate_table_file("table_file", self.table_file.as_str())?;

        if let Some(timeout) = self.timeout_seconds {
            validation::validate_range("timeout_seconds", timeout, 1..=600)?;
        }

        Ok(())
    }
}
