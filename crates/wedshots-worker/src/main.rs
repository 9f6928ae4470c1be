use std::sync::Arc;

use anyhow::Context;
use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use wedshots_core::telemetry::init_telemetry;
use wedshots_core::Config;
use wedshots_db::DynamoMetadataRepository;
use wedshots_faces::RekognitionFaceIndexer;
use wedshots_storage::{load_sdk_config, S3Storage};
use wedshots_worker::MetadataPipeline;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    init_telemetry(config.log_format(), "wedshots-worker")
        .context("Failed to initialize tracing")?;

    let sdk_config = load_sdk_config(config.aws_region()).await;
    let storage = S3Storage::new(&sdk_config, config.s3_endpoint());
    let faces = RekognitionFaceIndexer::new(&sdk_config);
    let repository = DynamoMetadataRepository::new(&sdk_config, config.metadata_table());

    tracing::info!(
        table = %repository.table(),
        collection_id = %config.face_collection_id(),
        environment = %config.environment(),
        "Metadata worker ready"
    );

    let pipeline = Arc::new(MetadataPipeline::new(
        Arc::new(storage),
        Arc::new(faces),
        Arc::new(repository),
        config.face_collection_id(),
    ));

    // Per-record failures are logged and absorbed; the invocation itself always succeeds
    let func = service_fn(move |event: LambdaEvent<S3Event>| {
        let pipeline = pipeline.clone();

        async move {
            let summary = pipeline.process_event(&event.payload).await;
            tracing::debug!(request_id = %event.context.request_id, ?summary, "Invocation finished");
            Ok::<(), Error>(())
        }
    });

    run(func).await
}
