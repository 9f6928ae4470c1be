//! Test helpers: in-memory storage, face indexer and repository for the
//! metadata pipeline.
//!
//! Run from workspace root: `cargo test -p wedshots-worker`.

pub mod fixtures;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use wedshots_core::{FaceDetail, PhotoMetadata, ScanFilter};
use wedshots_db::{MetadataRepository, RepositoryError, RepositoryResult};
use wedshots_faces::{FaceIndexError, FaceIndexResult, FaceIndexer};
use wedshots_storage::{DownloadStream, Storage, StorageError, StorageResult, StoredObject};
use wedshots_worker::MetadataPipeline;

pub const TEST_BUCKET: &str = "wedding-photos-test";
pub const TEST_COLLECTION: &str = "wedding-faces";

/// Objects keyed by (bucket, key); bodies are served in 4 KiB chunks.
#[derive(Default)]
pub struct MockStorage {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    downloads: Mutex<Vec<String>>,
}

impl MockStorage {
    pub fn put(&self, bucket: &str, key: &str, body: Vec<u8>) {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), body);
    }

    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn download_stream(&self, bucket: &str, key: &str) -> StorageResult<DownloadStream> {
        self.downloads.lock().unwrap().push(key.to_string());

        let body = self
            .objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;

        let chunks: Vec<Result<Bytes, StorageError>> = body
            .chunks(4096)
            .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
            .collect();
        Ok(Box::pin(futures::stream::iter(chunks)))
    }

    async fn presigned_put_url(
        &self,
        _bucket: &str,
        _key: &str,
        _content_type: &str,
        _expires_in: Duration,
    ) -> StorageResult<String> {
        Err(StorageError::PresignFailed("not used by the worker".to_string()))
    }

    async fn get_presigned_url(
        &self,
        _bucket: &str,
        _key: &str,
        _expires_in: Duration,
    ) -> StorageResult<String> {
        Err(StorageError::PresignFailed("not used by the worker".to_string()))
    }

    async fn list_objects(&self, _bucket: &str, _prefix: &str) -> StorageResult<Vec<StoredObject>> {
        Ok(Vec::new())
    }
}

/// One IndexFaces call as the pipeline made it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexCall {
    pub bucket: String,
    pub key: String,
    pub collection_id: String,
}

/// Returns the same faces for every photo, or fails every call.
#[derive(Default)]
pub struct MockFaceIndexer {
    faces: Vec<FaceDetail>,
    fail: bool,
    calls: Mutex<Vec<IndexCall>>,
}

impl MockFaceIndexer {
    pub fn with_faces(faces: Vec<FaceDetail>) -> Self {
        Self {
            faces,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<IndexCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FaceIndexer for MockFaceIndexer {
    async fn index_faces(
        &self,
        bucket: &str,
        key: &str,
        collection_id: &str,
    ) -> FaceIndexResult<Vec<FaceDetail>> {
        self.calls.lock().unwrap().push(IndexCall {
            bucket: bucket.to_string(),
            key: key.to_string(),
            collection_id: collection_id.to_string(),
        });

        if self.fail {
            return Err(FaceIndexError::CollectionNotFound(collection_id.to_string()));
        }
        Ok(self.faces.clone())
    }
}

/// Keeps written records in memory; writes for `failing_keys` are rejected.
#[derive(Default)]
pub struct MockRepository {
    records: Mutex<Vec<PhotoMetadata>>,
    failing_keys: HashSet<String>,
}

impl MockRepository {
    pub fn failing_for(keys: &[&str]) -> Self {
        Self {
            failing_keys: keys.iter().map(|k| k.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn records(&self) -> Vec<PhotoMetadata> {
        self.records.lock().unwrap().clone()
    }

    pub fn get(&self, photo_id: &str) -> Option<PhotoMetadata> {
        self.records()
            .into_iter()
            .find(|record| record.photo_id == photo_id)
    }
}

#[async_trait]
impl MetadataRepository for MockRepository {
    async fn put_metadata(&self, metadata: &PhotoMetadata) -> RepositoryResult<()> {
        if self.failing_keys.contains(&metadata.photo_id) {
            return Err(RepositoryError::Request(
                "ProvisionedThroughputExceededException".to_string(),
            ));
        }
        self.records.lock().unwrap().push(metadata.clone());
        Ok(())
    }

    async fn scan_metadata(&self, filter: Option<&ScanFilter>) -> RepositoryResult<Vec<PhotoMetadata>> {
        Ok(self
            .records()
            .into_iter()
            .filter(|record| filter.map_or(true, |f| f.matches(record)))
            .collect())
    }
}

/// Pipeline plus handles on its collaborators.
pub struct TestPipeline {
    pub pipeline: MetadataPipeline,
    pub storage: Arc<MockStorage>,
    pub faces: Arc<MockFaceIndexer>,
    pub repository: Arc<MockRepository>,
}

pub fn setup_pipeline(faces: MockFaceIndexer, repository: MockRepository) -> TestPipeline {
    let storage = Arc::new(MockStorage::default());
    let faces = Arc::new(faces);
    let repository = Arc::new(repository);

    let pipeline = MetadataPipeline::new(
        storage.clone(),
        faces.clone(),
        repository.clone(),
        TEST_COLLECTION,
    );

    TestPipeline {
        pipeline,
        storage,
        faces,
        repository,
    }
}
