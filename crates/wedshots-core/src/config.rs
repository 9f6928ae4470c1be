//! Configuration module
//!
//! Configuration is read from the environment (the Lambda function configuration in
//! production, an optional `.env` file locally). Both binaries share the same
//! structure; the API additionally requires `S3_BUCKET`.

use std::env;

use crate::constants::{
    DEFAULT_FACE_COLLECTION_ID, DEFAULT_METADATA_TABLE, UPLOAD_URL_EXPIRY_SECS,
    VIEW_URL_EXPIRY_SECS,
};

const SERVER_PORT: u16 = 3000;

/// Settings shared by every wedshots process
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    /// `compact` (default) or `json`
    pub log_format: String,
}

/// Gallery configuration: bucket, table and face collection.
#[derive(Clone, Debug)]
pub struct GalleryConfig {
    pub base: BaseConfig,
    pub s3_bucket: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, LocalStack)
    pub aws_region: Option<String>,
    pub metadata_table: String,
    pub face_collection_id: String,
    pub upload_url_expiry_secs: u64,
    pub view_url_expiry_secs: u64,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<GalleryConfig>);

impl Config {
    fn as_gallery(&self) -> &GalleryConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.as_gallery().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = GalleryConfig::from_lookup(lookup)?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_gallery().validate()
    }

    /// Stricter validation for the HTTP API, which must know its bucket up front.
    pub fn validate_for_api(&self) -> Result<(), anyhow::Error> {
        self.validate()?;
        if self.s3_bucket().is_none() {
            return Err(anyhow::anyhow!("S3_BUCKET must be set for the upload API"));
        }
        Ok(())
    }

    pub fn server_port(&self) -> u16 {
        self.as_gallery().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.as_gallery().base.environment
    }

    pub fn log_format(&self) -> &str {
        &self.as_gallery().base.log_format
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.as_gallery().s3_bucket.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_gallery().s3_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.as_gallery().aws_region.as_deref()
    }

    pub fn metadata_table(&self) -> &str {
        &self.as_gallery().metadata_table
    }

    pub fn face_collection_id(&self) -> &str {
        &self.as_gallery().face_collection_id
    }

    pub fn upload_url_expiry_secs(&self) -> u64 {
        self.as_gallery().upload_url_expiry_secs
    }

    pub fn view_url_expiry_secs(&self) -> u64 {
        self.as_gallery().view_url_expiry_secs
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl GalleryConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = non_empty(lookup("ENVIRONMENT"))
            .or_else(|| non_empty(lookup("APP_ENV")))
            .unwrap_or_else(|| "development".to_string());

        let base = BaseConfig {
            server_port: match non_empty(lookup("SERVER_PORT")) {
                Some(port) => port
                    .parse()
                    .map_err(|_| anyhow::anyhow!("SERVER_PORT must be a valid number"))?,
                None => SERVER_PORT,
            },
            environment,
            log_format: non_empty(lookup("LOG_FORMAT"))
                .unwrap_or_else(|| "compact".to_string())
                .to_lowercase(),
        };

        Ok(GalleryConfig {
            base,
            s3_bucket: non_empty(lookup("S3_BUCKET")),
            s3_endpoint: non_empty(lookup("S3_ENDPOINT")),
            aws_region: non_empty(lookup("AWS_REGION")),
            metadata_table: non_empty(lookup("DYNAMODB_TABLE"))
                .unwrap_or_else(|| DEFAULT_METADATA_TABLE.to_string()),
            face_collection_id: non_empty(lookup("REKOGNITION_COLLECTION_ID"))
                .unwrap_or_else(|| DEFAULT_FACE_COLLECTION_ID.to_string()),
            upload_url_expiry_secs: non_empty(lookup("UPLOAD_URL_EXPIRY_SECS"))
                .and_then(|s| s.parse().ok())
                .unwrap_or(UPLOAD_URL_EXPIRY_SECS),
            view_url_expiry_secs: non_empty(lookup("VIEW_URL_EXPIRY_SECS"))
                .and_then(|s| s.parse().ok())
                .unwrap_or(VIEW_URL_EXPIRY_SECS),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.upload_url_expiry_secs == 0 || self.view_url_expiry_secs == 0 {
            return Err(anyhow::anyhow!(
                "UPLOAD_URL_EXPIRY_SECS and VIEW_URL_EXPIRY_SECS must be greater than zero"
            ));
        }

        // Presigned URLs are capped at seven days by S3
        const MAX_PRESIGN_SECS: u64 = 7 * 24 * 60 * 60;
        if self.upload_url_expiry_secs > MAX_PRESIGN_SECS
            || self.view_url_expiry_secs > MAX_PRESIGN_SECS
        {
            return Err(anyhow::anyhow!(
                "Presigned URL expiry cannot exceed {} seconds",
                MAX_PRESIGN_SECS
            ));
        }

        if let Some(endpoint) = &self.s3_endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(anyhow::anyhow!(
                    "S3_ENDPOINT must be an http:// or https:// URL"
                ));
            }
        }

        Ok(())
    }
}
