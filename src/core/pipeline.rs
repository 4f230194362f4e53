use crate::core::assets::{download_profile_images, profile_folder_name};
use crate::core::export::{append_row, flatten_profile};
use crate::core::normalizer::ProfileNormalizer;
use crate::core::{ConfigProvider, Document, Pipeline, Storage, TransformResult};
use crate::utils::error::{EtlError, Result};
use reqwest::{Client, StatusCode};
use std::collections::BTreeMap;

pub const DEFAULT_API_ENDPOINT: &str = "https://nubela.co/proxycurl/api/v2/linkedin";

/// 預設排除的欄位與快取策略
const DEFAULT_PARAMETERS: [(&str, &str); 10] = [
    ("extra", "exclude"),
    ("github_profile_id", "exclude"),
    ("facebook_profile_id", "exclude"),
    ("twitter_profile_id", "exclude"),
    ("personal_contact_number", "exclude"),
    ("personal_email", "exclude"),
    ("inferred_salary", "exclude"),
    ("skills", "exclude"),
    ("use_cache", "if-recent"),
    ("fallback_to_cache", "on-error"),
];

pub struct ProfilePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> ProfilePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    /// Query string sent to the provider. Configured parameters override the
    /// defaults.
    pub fn query_parameters(&self) -> BTreeMap<String, String> {
        let mut params: BTreeMap<String, String> = DEFAULT_PARAMETERS
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        params.insert(
            "linkedin_profile_url".to_string(),
            self.config.profile_url().to_string(),
        );
        params.extend(self.config.extra_parameters());
        params
    }

    async fn read_existing_table(&self, path: &str) -> Result<Option<Vec<u8>>> {
        match self.storage.read_file(path).await {
            Ok(data) => Ok(Some(data)),
            Err(EtlError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ProfilePipeline<S, C> {
    async fn extract(&self) -> Result<Document> {
        let endpoint = self.config.api_endpoint();
        tracing::info!(
            "🚀 Fetching profile {} from: {}",
            self.config.profile_url(),
            endpoint
        );

        let mut request = self.client.get(endpoint).query(&self.query_parameters());

        if let Some(api_key) = self.config.api_key() {
            request = request.bearer_auth(api_key);
        }

        if let Some(timeout) = self.config.timeout_seconds() {
            request = request.timeout(std::time::Duration::from_secs(timeout));
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            tracing::warn!("🔎 Profile not found, continuing with an empty document");
            return Ok(Document::new());
        }

        if !status.is_success() {
            return Err(EtlError::HttpStatusError {
                status: status.as_u16(),
                url: endpoint.to_string(),
            });
        }

        match response.json::<serde_json::Value>().await? {
            serde_json::Value::Object(document) => {
                tracing::info!("📊 Extracted document with {} top-level keys", document.len());
                Ok(document)
            }
            other => Err(EtlError::shape("$", "object", &other)),
        }
    }

    async fn transform(&self, document: Document) -> Result<TransformResult> {
        tracing::info!("🔧 Normalizing profile document");

        let profile = ProfileNormalizer::normalize(&document)?;
        tracing::debug!(
            "Normalized {}: {} experiences, {} education, {} certifications, {} projects",
            profile.full_name,
            profile.experiences.len(),
            profile.education.len(),
            profile.certifications.len(),
            profile.projects.len()
        );

        let row = flatten_profile(&profile)?;

        tracing::info!("✅ Transform complete for: {}", profile.full_name);
        Ok(TransformResult { profile, row })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let folder = profile_folder_name(&result.profile.full_name);

        if self.config.download_images() {
            let saved =
                download_profile_images(&self.client, &self.storage, &folder, &result.profile)
                    .await;
            tracing::debug!("Saved {} image(s) under {}", saved.len(), folder);
        }

        if self.config.save_json() {
            let snapshot = serde_json::to_string_pretty(&result.profile)?;
            let path = format!("{}/profile.json", folder);
            self.storage.write_file(&path, snapshot.as_bytes()).await?;
            tracing::debug!("Wrote normalized profile to {}", path);
        }

        let table_file = self.config.table_file();
        let existing = self.read_existing_table(table_file).await?;
        if existing.is_some() {
            tracing::debug!("Appending to existing table {}", table_file);
        }

        let data = append_row(existing.as_deref(), &result.row)?;
        self.storage.write_file(table_file, &data).await?;

        let output_path = format!("{}/{}", self.config.output_path(), table_file);
        tracing::info!(
            "💾 Profile data for {} saved to: {}",
            result.profile.full_name,
            output_path
        );
        Ok(output_path)
    }
}
