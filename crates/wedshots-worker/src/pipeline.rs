//! Per-object extraction pipeline: fetch, EXIF, faces, persist.

use std::sync::Arc;

use aws_lambda_events::event::s3::{S3Event, S3EventRecord};
use wedshots_core::constants::UPLOADS_PREFIX;
use wedshots_core::PhotoMetadata;
use wedshots_db::MetadataRepository;
use wedshots_faces::FaceIndexer;
use wedshots_processing::{download_to_temp, read_exif};
use wedshots_storage::Storage;

/// Object named by one event record, key already URL-decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
    pub size: Option<i64>,
}

impl ObjectRef {
    /// Extract the object from an event record.
    ///
    /// S3 notifications URL-encode keys (`+` for a space, `%XX` escapes).
    pub fn from_record(record: &S3EventRecord) -> Option<Self> {
        let bucket = record.s3.bucket.name.as_deref().filter(|b| !b.is_empty())?;
        let raw_key = record.s3.object.key.as_deref().filter(|k| !k.is_empty())?;
        let key = decode_key(raw_key)?;

        Some(Self {
            bucket: bucket.to_string(),
            key,
            size: record.s3.object.size,
        })
    }
}

fn decode_key(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(e) => {
            tracing::warn!(error = %e, key = %raw, "Object key is not valid UTF-8 once decoded");
            None
        }
    }
}

/// What happened to one record
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// Metadata written; faces may be empty when indexing failed
    Stored { key: String, face_count: i64 },
    /// Not an upload this worker handles
    Skipped { reason: String },
    /// Download or persistence failed; nothing (more) was written
    Failed { key: String, stage: &'static str },
}

/// Counts for one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub stored: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: &RecordOutcome) {
        match outcome {
            RecordOutcome::Stored { .. } => self.stored += 1,
            RecordOutcome::Skipped { .. } => self.skipped += 1,
            RecordOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Clients shared by every record of every invocation on a warm instance
#[derive(Clone)]
pub struct MetadataPipeline {
    storage: Arc<dyn Storage>,
    faces: Arc<dyn FaceIndexer>,
    repository: Arc<dyn MetadataRepository>,
    collection_id: String,
}

impl MetadataPipeline {
    pub fn new(
        storage: Arc<dyn Storage>,
        faces: Arc<dyn FaceIndexer>,
        repository: Arc<dyn MetadataRepository>,
        collection_id: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            faces,
            repository,
            collection_id: collection_id.into(),
        }
    }

    /// Process every record in delivery order. Never fails as a whole.
    pub async fn process_event(&self, event: &S3Event) -> BatchSummary {
        tracing::info!(record_count = event.records.len(), "Processing S3 event");

        let mut summary = BatchSummary::default();
        for record in &event.records {
            let outcome = self.process_record(record).await;
            summary.record(&outcome);
        }

        tracing::info!(
            stored = summary.stored,
            skipped = summary.skipped,
            failed = summary.failed,
            "S3 event processed"
        );
        summary
    }

    pub async fn process_record(&self, record: &S3EventRecord) -> RecordOutcome {
        let Some(object) = ObjectRef::from_record(record) else {
            tracing::warn!(event_name = ?record.event_name, "Record without bucket or key");
            return RecordOutcome::Skipped {
                reason: "missing bucket or key".to_string(),
            };
        };

        if !object.key.starts_with(UPLOADS_PREFIX) {
            tracing::debug!(bucket = %object.bucket, key = %object.key, "Ignoring object outside uploads/");
            return RecordOutcome::Skipped {
                reason: format!("{} is outside {}", object.key, UPLOADS_PREFIX),
            };
        }

        self.process_object(&object).await
    }

    #[tracing::instrument(skip(self), fields(bucket = %object.bucket, key = %object.key))]
    pub async fn process_object(&self, object: &ObjectRef) -> RecordOutcome {
        let start = std::time::Instant::now();
        tracing::info!(size_bytes = ?object.size, "Processing upload");

        // Fetch
        let (temp, written) =
            match download_to_temp(self.storage.as_ref(), &object.bucket, &object.key).await {
                Ok(download) => download,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to download object");
                    return RecordOutcome::Failed {
                        key: object.key.clone(),
                        stage: "download",
                    };
                }
            };

        let file_size = object.size.unwrap_or(written as i64);
        let mut metadata =
            PhotoMetadata::new(object.key.clone(), chrono::Utc::now().timestamp(), file_size);

        // EXIF, then release the scratch copy before calling out to Rekognition
        let exif = read_exif(temp.path().to_path_buf()).await;
        drop(temp);
        exif.apply_to(&mut metadata);

        // Faces
        match self
            .faces
            .index_faces(&object.bucket, &object.key, &self.collection_id)
            .await
        {
            Ok(faces) => {
                tracing::info!(face_count = faces.len(), "Faces indexed");
                metadata.set_faces(faces);
            }
            Err(e) => {
                tracing::error!(error = %e, collection_id = %self.collection_id, "Face indexing failed; storing without faces");
            }
        }

        // Persist
        if let Err(e) = self.repository.put_metadata(&metadata).await {
            tracing::error!(error = %e, "Failed to store metadata");
            return RecordOutcome::Failed {
                key: object.key.clone(),
                stage: "persist",
            };
        }

        tracing::info!(
            face_count = metadata.face_count,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Successfully processed upload"
        );

        RecordOutcome::Stored {
            key: object.key.clone(),
            face_count: metadata.face_count,
        }
    }
}
