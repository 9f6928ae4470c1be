//! Test helpers: build AppState and router over in-memory storage and metadata.
//!
//! Run from workspace root: `cargo test -p wedshots-api`.

pub mod fixtures;

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum_test::TestServer;
use wedshots_api::setup::routes;
use wedshots_api::{AppState, BucketConfig};
use wedshots_core::{Config, PhotoMetadata, ScanFilter};
use wedshots_db::{MetadataRepository, RepositoryError, RepositoryResult};
use wedshots_storage::{DownloadStream, Storage, StorageError, StorageResult, StoredObject};

pub const TEST_BUCKET: &str = "wedding-photos-test";

/// One presign request as the handler made it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignCall {
    pub method: &'static str,
    pub bucket: String,
    pub key: String,
    pub content_type: Option<String>,
    pub expires_in: Duration,
}

/// Listing plus deterministic fake presigned URLs.
#[derive(Default)]
pub struct MockStorage {
    pub objects: Vec<StoredObject>,
    pub fail_list: bool,
    pub fail_put_presign: bool,
    pub fail_get_presign_for: HashSet<String>,
    pub calls: Mutex<Vec<PresignCall>>,
}

impl MockStorage {
    pub fn with_objects(objects: Vec<StoredObject>) -> Self {
        Self {
            objects,
            ..Default::default()
        }
    }

    pub fn failing_list() -> Self {
        Self {
            fail_list: true,
            ..Default::default()
        }
    }

    pub fn failing_put_presign() -> Self {
        Self {
            fail_put_presign: true,
            ..Default::default()
        }
    }

    pub fn presign_calls(&self) -> Vec<PresignCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn download_stream(&self, _bucket: &str, key: &str) -> StorageResult<DownloadStream> {
        Err(StorageError::NotFound(key.to_string()))
    }

    async fn presigned_put_url(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        self.calls.lock().unwrap().push(PresignCall {
            method: "PUT",
            bucket: bucket.to_string(),
            key: key.to_string(),
            content_type: Some(content_type.to_string()),
            expires_in,
        });
        if self.fail_put_presign {
            return Err(StorageError::PresignFailed("ExpiredToken".to_string()));
        }
        Ok(format!(
            "https://{}.s3.amazonaws.com/{}?X-Amz-Expires={}&X-Amz-Signature=put",
            bucket,
            key,
            expires_in.as_secs()
        ))
    }

    async fn get_presigned_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        self.calls.lock().unwrap().push(PresignCall {
            method: "GET",
            bucket: bucket.to_string(),
            key: key.to_string(),
            content_type: None,
            expires_in,
        });
        if self.fail_get_presign_for.contains(key) {
            return Err(StorageError::PresignFailed(format!("cannot sign {}", key)));
        }
        Ok(format!(
            "https://{}.s3.amazonaws.com/{}?X-Amz-Expires={}&X-Amz-Signature=get",
            bucket,
            key,
            expires_in.as_secs()
        ))
    }

    async fn list_objects(&self, _bucket: &str, prefix: &str) -> StorageResult<Vec<StoredObject>> {
        if self.fail_list {
            return Err(StorageError::ListFailed("AccessDenied".to_string()));
        }
        Ok(self
            .objects
            .iter()
            .filter(|object| object.key.starts_with(prefix))
            .cloned()
            .collect())
    }
}

/// Table contents evaluated with the same filter semantics as a DynamoDB scan.
#[derive(Default)]
pub struct MockRepository {
    pub records: Vec<PhotoMetadata>,
    pub fail_scan: bool,
    pub filters: Mutex<Vec<Option<ScanFilter>>>,
}

impl MockRepository {
    pub fn with_records(records: Vec<PhotoMetadata>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    pub fn failing_scan() -> Self {
        Self {
            fail_scan: true,
            ..Default::default()
        }
    }

    pub fn scan_filters(&self) -> Vec<Option<ScanFilter>> {
        self.filters.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataRepository for MockRepository {
    async fn put_metadata(&self, _metadata: &PhotoMetadata) -> RepositoryResult<()> {
        Ok(())
    }

    async fn scan_metadata(&self, filter: Option<&ScanFilter>) -> RepositoryResult<Vec<PhotoMetadata>> {
        self.filters.lock().unwrap().push(filter.cloned());
        if self.fail_scan {
            return Err(RepositoryError::Request(
                "ResourceNotFoundException: table missing".to_string(),
            ));
        }
        Ok(self
            .records
            .iter()
            .filter(|record| filter.map_or(true, |f| f.matches(record)))
            .cloned()
            .collect())
    }
}

/// Test application: server plus handles on the mocks behind it.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<MockStorage>,
    pub repository: Arc<MockRepository>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "S3_BUCKET" => Some(TEST_BUCKET.to_string()),
        _ => None,
    })
    .expect("Failed to build test config")
}

pub fn production_config() -> Config {
    Config::from_lookup(|key| match key {
        "S3_BUCKET" => Some(TEST_BUCKET.to_string()),
        "ENVIRONMENT" => Some("production".to_string()),
        _ => None,
    })
    .expect("Failed to build production config")
}

pub fn setup_test_app(storage: MockStorage, repository: MockRepository) -> TestApp {
    setup_test_app_with_config(test_config(), storage, repository)
}

pub fn setup_test_app_with_config(
    config: Config,
    storage: MockStorage,
    repository: MockRepository,
) -> TestApp {
    let storage = Arc::new(storage);
    let repository = Arc::new(repository);

    let state = Arc::new(AppState::new(
        config.clone(),
        BucketConfig::from_config(&config, TEST_BUCKET),
        storage.clone(),
        repository.clone(),
    ));

    let app = routes::setup_routes(state);
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        storage,
        repository,
    }
}

pub fn setup_default_app() -> TestApp {
    setup_test_app(MockStorage::default(), MockRepository::default())
}
