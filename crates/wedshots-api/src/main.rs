use anyhow::Context;
use wedshots_api::setup::{initialize_app, server};
use wedshots_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env().context("Failed to load configuration")?;

    let (_state, router) = initialize_app(config.clone()).await?;

    // The Lambda runtime sets this for every function invocation environment
    if std::env::var("AWS_LAMBDA_RUNTIME_API").is_ok() {
        server::start_lambda(router).await
    } else {
        server::start_server(&config, router).await
    }
}
