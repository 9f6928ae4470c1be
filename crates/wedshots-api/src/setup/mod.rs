//! Application setup and initialization

pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use wedshots_core::telemetry::init_telemetry;
use wedshots_core::Config;
use wedshots_db::DynamoMetadataRepository;
use wedshots_storage::{load_sdk_config, S3Storage};

use crate::state::{AppState, BucketConfig};

/// Validate configuration, start tracing, create AWS clients and build the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config
        .validate_for_api()
        .context("Configuration validation failed")?;

    init_telemetry(config.log_format(), "wedshots-api").context("Failed to initialize tracing")?;

    tracing::info!("Configuration loaded and validated successfully");

    let bucket = config
        .s3_bucket()
        .context("S3_BUCKET must be set for the upload API")?
        .to_string();

    let sdk_config = load_sdk_config(config.aws_region()).await;
    let storage = Arc::new(S3Storage::new(&sdk_config, config.s3_endpoint()));
    let repository = Arc::new(DynamoMetadataRepository::new(
        &sdk_config,
        config.metadata_table(),
    ));

    let state = Arc::new(AppState::new(
        config.clone(),
        BucketConfig::from_config(&config, bucket),
        storage,
        repository,
    ));

    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
