pub mod assets;
pub mod etl;
pub mod export;
pub mod normalizer;
pub mod pipeline;

pub use crate::domain::model::{Document, Profile, ProfileRow, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
