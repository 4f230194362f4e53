use crate::domain::model::{Document, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn profile_url(&self) -> &str;
    /// Query parameters added on top of the default exclusion set.
    fn extra_parameters(&self) -> HashMap<String, String>;
    fn timeout_seconds(&self) -> Option<u64>;
    fn output_path(&self) -> &str;
    fn table_file(&self) -> &str;
    fn download_images(&self) -> bool;
    fn save_json(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Document>;
    async fn transform(&self, document: Document) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
