pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{storage::LocalStorage, toml_config::TomlConfig};

pub use crate::core::{etl::EtlEngine, normalizer::ProfileNormalizer, pipeline::ProfilePipeline};
pub use crate::domain::model::{
    Activity, Certification, DateInfo, Document, Education, Experience, Profile, Project,
    Recommendation, SimilarProfile,
};
pub use utils::error::{EtlError, Result};
