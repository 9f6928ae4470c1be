use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Load the shared AWS configuration once per cold start.
///
/// An explicit region wins; otherwise the default provider chain (the
/// `AWS_REGION` set by Lambda, profile files, IMDS) decides.
pub async fn load_sdk_config(region: Option<&str>) -> SdkConfig {
    let region_provider = RegionProviderChain::first_try(region.map(|r| Region::new(r.to_string())))
        .or_default_provider();

    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider)
        .load()
        .await;

    tracing::debug!(
        region = ?config.region().map(|r| r.as_ref().to_string()),
        "AWS configuration loaded"
    );

    config
}
