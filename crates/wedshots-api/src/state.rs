//! Application state shared by every handler.

use std::sync::Arc;
use std::time::Duration;

use wedshots_core::Config;
use wedshots_db::MetadataRepository;
use wedshots_storage::Storage;

/// Photo bucket plus presign lifetimes
#[derive(Clone, Debug)]
pub struct BucketConfig {
    pub bucket: String,
    pub upload_url_expiry: Duration,
    pub view_url_expiry: Duration,
}

impl BucketConfig {
    pub fn from_config(config: &Config, bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            upload_url_expiry: Duration::from_secs(config.upload_url_expiry_secs()),
            view_url_expiry: Duration::from_secs(config.view_url_expiry_secs()),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub bucket: BucketConfig,
    pub storage: Arc<dyn Storage>,
    pub metadata_repository: Arc<dyn MetadataRepository>,
}

impl AppState {
    pub fn new(
        config: Config,
        bucket: BucketConfig,
        storage: Arc<dyn Storage>,
        metadata_repository: Arc<dyn MetadataRepository>,
    ) -> Self {
        Self {
            config,
            bucket,
            storage,
            metadata_repository,
        }
    }
}
