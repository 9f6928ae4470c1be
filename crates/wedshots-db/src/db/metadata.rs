use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use wedshots_core::{FilterValue, PhotoMetadata, ScanFilter};

use super::{MetadataRepository, RepositoryError, RepositoryResult};

/// Repository for photo metadata stored in DynamoDB
#[derive(Clone)]
pub struct DynamoMetadataRepository {
    client: Client,
    table: String,
}

impl DynamoMetadataRepository {
    pub fn new(config: &SdkConfig, table: impl Into<String>) -> Self {
        Self {
            client: Client::new(config),
            table: table.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

fn attribute_value(value: &FilterValue) -> AttributeValue {
    match value {
        FilterValue::S(s) => AttributeValue::S(s.clone()),
        FilterValue::N(n) => AttributeValue::N(n.to_string()),
    }
}

fn expression_attribute_names(filter: &ScanFilter) -> HashMap<String, String> {
    filter
        .names
        .iter()
        .map(|(placeholder, name)| (placeholder.clone(), name.clone()))
        .collect()
}

fn expression_attribute_values(filter: &ScanFilter) -> HashMap<String, AttributeValue> {
    filter
        .values
        .iter()
        .map(|(placeholder, value)| (placeholder.clone(), attribute_value(value)))
        .collect()
}

fn to_item(metadata: &PhotoMetadata) -> RepositoryResult<HashMap<String, AttributeValue>> {
    serde_dynamo::to_item(metadata).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

#[async_trait]
impl MetadataRepository for DynamoMetadataRepository {
    #[tracing::instrument(skip(self, metadata), fields(db.table = %self.table, db.operation = "put", photo_id = %metadata.photo_id))]
    async fn put_metadata(&self, metadata: &PhotoMetadata) -> RepositoryResult<()> {
        let start = std::time::Instant::now();
        let item = to_item(metadata)?;

        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "DynamoDB put_item failed"
                );
                RepositoryError::Request(e.to_string())
            })?;

        tracing::debug!(
            face_count = metadata.face_count,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Photo metadata stored"
        );

        Ok(())
    }

    #[tracing::instrument(skip(self, filter), fields(db.table = %self.table, db.operation = "scan"))]
    async fn scan_metadata(&self, filter: Option<&ScanFilter>) -> RepositoryResult<Vec<PhotoMetadata>> {
        let start = std::time::Instant::now();
        let mut items: Vec<HashMap<String, AttributeValue>> = Vec::new();
        let mut exclusive_start_key: Option<HashMap<String, AttributeValue>> = None;
        let mut pages = 0usize;

        loop {
            let mut request = self.client.scan().table_name(&self.table);

            if let Some(filter) = filter {
                request = request
                    .filter_expression(&filter.expression)
                    .set_expression_attribute_names(Some(expression_attribute_names(filter)))
                    .set_expression_attribute_values(Some(expression_attribute_values(filter)));
            }

            let output = request
                .set_exclusive_start_key(exclusive_start_key.take())
                .send()
                .await
                .map_err(|e| {
                    tracing::error!(
                        error = %e,
                        pages = pages,
                        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                        "DynamoDB scan failed"
                    );
                    RepositoryError::Request(e.to_string())
                })?;

            pages += 1;
            items.extend(output.items.unwrap_or_default());

            exclusive_start_key = output.last_evaluated_key;
            if exclusive_start_key.is_none() {
                break;
            }
        }

        let records: Vec<PhotoMetadata> = serde_dynamo::from_items(items)
            .map_err(|e| RepositoryError::Deserialization(e.to_string()))?;

        tracing::info!(
            count = records.len(),
            pages = pages,
            filtered = filter.is_some(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "DynamoDB scan complete"
        );

        Ok(records)
    }
}
