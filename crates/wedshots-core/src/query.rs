//! Metadata query building
//!
//! `GET /metadata` filters in two phases. Face count, capture date and device
//! conditions become a DynamoDB scan filter; the face id cannot be expressed
//! against the embedded face list without an index, so it is applied to the
//! scanned records in memory.

use std::collections::BTreeMap;

use serde::Deserialize;
use utoipa::IntoParams;

use crate::models::PhotoMetadata;

/// Query string of `GET /metadata`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MetadataQuery {
    /// Keep only photos containing this indexed face
    pub face_id: Option<String>,
    /// Minimum number of faces; ignored when not an integer
    pub min_faces: Option<String>,
    /// Inclusive lower bound on `dateTaken` (string comparison)
    pub start_date: Option<String>,
    /// Inclusive upper bound on `dateTaken` (string comparison)
    pub end_date: Option<String>,
    /// Substring of the camera model
    pub device: Option<String>,
}

/// Attribute value bound to a `:placeholder` in a filter expression
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    S(String),
    N(i64),
}

/// Server-side scan filter: expression plus its placeholder bindings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanFilter {
    pub expression: String,
    /// `#name` placeholder -> attribute name
    pub names: BTreeMap<String, String>,
    /// `:value` placeholder -> value
    pub values: BTreeMap<String, FilterValue>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl MetadataQuery {
    /// Build from raw query pairs. The first occurrence of a parameter wins
    /// and unknown parameters are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "faceId" => &mut query.face_id,
                "minFaces" => &mut query.min_faces,
                "startDate" => &mut query.start_date,
                "endDate" => &mut query.end_date,
                "device" => &mut query.device,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }

    pub fn face_id(&self) -> Option<&str> {
        present(&self.face_id)
    }

    /// Parsed `minFaces`. Unparseable input is treated as absent.
    pub fn min_faces(&self) -> Option<i64> {
        present(&self.min_faces).and_then(|v| v.parse::<i64>().ok())
    }

    pub fn start_date(&self) -> Option<&str> {
        present(&self.start_date)
    }

    pub fn end_date(&self) -> Option<&str> {
        present(&self.end_date)
    }

    pub fn device(&self) -> Option<&str> {
        present(&self.device)
    }

    /// Build the scan filter, or `None` when no server-side condition applies.
    ///
    /// Conditions are ANDed in a fixed order: minimum faces, start date, end
    /// date, device.
    pub fn scan_filter(&self) -> Option<ScanFilter> {
        let mut conditions: Vec<&str> = Vec::new();
        let mut filter = ScanFilter::default();

        if let Some(min_faces) = self.min_faces() {
            conditions.push("#faceCount >= :minFaces");
            filter.bind_name("#faceCount", "faceCount");
            filter
                .values
                .insert(":minFaces".to_string(), FilterValue::N(min_faces));
        }

        if let Some(start) = self.start_date() {
            conditions.push("#dateTaken >= :startDate");
            filter.bind_name("#dateTaken", "dateTaken");
            filter
                .values
                .insert(":startDate".to_string(), FilterValue::S(start.to_string()));
        }

        if let Some(end) = self.end_date() {
            conditions.push("#dateTaken <= :endDate");
            filter.bind_name("#dateTaken", "dateTaken");
            filter
                .values
                .insert(":endDate".to_string(), FilterValue::S(end.to_string()));
        }

        if let Some(device) = self.device() {
            conditions.push("contains(#model, :device)");
            filter.bind_name("#model", "model");
            filter
                .values
                .insert(":device".to_string(), FilterValue::S(device.to_string()));
        }

        if conditions.is_empty() {
            return None;
        }

        filter.expression = conditions.join(" AND ");
        Some(filter)
    }

    /// In-memory phase: keep records holding a face with exactly this id.
    pub fn apply_face_filter(&self, records: Vec<PhotoMetadata>) -> Vec<PhotoMetadata> {
        match self.face_id() {
            Some(face_id) => records
                .into_iter()
                .filter(|record| record.has_face(face_id))
                .collect(),
            None => records,
        }
    }
}

impl ScanFilter {
    fn bind_name(&mut self, placeholder: &str, attribute: &str) {
        self.names
            .insert(placeholder.to_string(), attribute.to_string());
    }

    fn string_value(&self, placeholder: &str) -> Option<&str> {
        match self.values.get(placeholder) {
            Some(FilterValue::S(s)) => Some(s),
            _ => None,
        }
    }

    /// Evaluate the filter against a record the way DynamoDB would.
    ///
    /// A comparison against a missing attribute is false.
    pub fn matches(&self, record: &PhotoMetadata) -> bool {
        if let Some(FilterValue::N(min_faces)) = self.values.get(":minFaces") {
            if record.face_count < *min_faces {
                return false;
            }
        }

        if let Some(start) = self.string_value(":startDate") {
            match record.date_taken.as_deref() {
                Some(taken) if taken >= start => {}
                _ => return false,
            }
        }

        if let Some(end) = self.string_value(":endDate") {
            match record.date_taken.as_deref() {
                Some(taken) if taken <= end => {}
                _ => return false,
            }
        }

        if let Some(device) = self.string_value(":device") {
            match record.model.as_deref() {
                Some(model) if model.contains(device) => {}
                _ => return false,
            }
        }

        true
    }
}

/// Both filter phases over an in-memory candidate set, in candidate order.
pub fn filter_candidates(candidates: Vec<PhotoMetadata>, query: &MetadataQuery) -> Vec<PhotoMetadata> {
    let scanned = match query.scan_filter() {
        Some(filter) => candidates
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect(),
        None => candidates,
    };
    query.apply_face_filter(scanned)
}
