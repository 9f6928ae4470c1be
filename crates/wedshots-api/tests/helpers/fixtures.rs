//! Test fixtures: stored objects and photo records.

use chrono::{TimeZone, Utc};
use wedshots_core::{FaceDetail, PhotoMetadata};
use wedshots_storage::StoredObject;

pub fn stored_object(key: &str, size: i64, modified_secs: i64) -> StoredObject {
    StoredObject {
        key: key.to_string(),
        size,
        last_modified: Utc.timestamp_opt(modified_secs, 0).single(),
    }
}

pub struct PhotoBuilder {
    record: PhotoMetadata,
}

impl PhotoBuilder {
    pub fn new(photo_id: &str) -> Self {
        Self {
            record: PhotoMetadata::new(photo_id, 1718000100, 204800),
        }
    }

    pub fn taken(mut self, date: &str) -> Self {
        self.record.date_taken = Some(date.to_string());
        self
    }

    pub fn model(mut self, model: &str) -> Self {
        self.record.model = Some(model.to_string());
        self
    }

    pub fn faces(mut self, ids: &[&str]) -> Self {
        self.record
            .set_faces(ids.iter().map(|id| FaceDetail::new(*id, 99.0)).collect());
        self
    }

    pub fn build(self) -> PhotoMetadata {
        self.record
    }
}

/// A small reception: four photos from three devices.
pub fn reception_photos() -> Vec<PhotoMetadata> {
    vec![
        PhotoBuilder::new("uploads/1718000000-ceremony.jpg")
            .taken("2024-06-08T14:05:00Z")
            .model("Canon EOS R5")
            .faces(&["face-bride", "face-groom"])
            .build(),
        PhotoBuilder::new("uploads/1718000001-first-dance.jpg")
            .taken("2024-06-08T21:30:00Z")
            .model("iPhone 15 Pro")
            .faces(&["face-bride", "face-groom", "face-guest-1"])
            .build(),
        PhotoBuilder::new("uploads/1718000002-cake.jpg")
            .taken("2024-06-08T22:10:00Z")
            .model("Pixel 8")
            .build(),
        // Screenshot without EXIF
        PhotoBuilder::new("uploads/1718000003-invite.png")
            .faces(&["face-guest-1"])
            .build(),
    ]
}
