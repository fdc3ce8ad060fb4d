//! S3-compatible backend built on the object_store crate

use std::sync::Arc;

use anyhow::{Context, Result};
use object_store::aws::{AmazonS3, AmazonS3Builder};

/// Configuration for S3 storage backend
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    pub endpoint: String,
}

/// Create an S3 store from configuration.
///
/// Requests use path-style addressing against the configured endpoint; plain
/// HTTP is allowed only when the endpoint asks for it.
pub fn create_s3_store(config: &S3Config) -> Result<Arc<AmazonS3>> {
    let store = AmazonS3Builder::new()
        .with_bucket_name(&config.bucket)
        .with_region(&config.region)
        .with_access_key_id(&config.access_key)
        .with_secret_access_key(&config.secret_key)
        .with_endpoint(&config.endpoint)
        .with_virtual_hosted_style_request(false)
        .with_allow_http(config.endpoint.starts_with("http://"))
        .build()
        .context("Failed to build S3 store")?;

    Ok(Arc::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: &str) -> S3Config {
        S3Config {
            bucket: "nightly-backups".to_string(),
            region: "nyc3".to_string(),
            access_key: "key".to_string(),
            secret_key: "secret".to_string(),
            endpoint: endpoint.to_string(),
        }
    }

    #[test]
    fn test_builds_store_for_https_endpoint() {
        assert!(create_s3_store(&config("https://nyc3.digitaloceanspaces.com")).is_ok());
    }

    #[test]
    fn test_builds_store_for_local_http_endpoint() {
        assert!(create_s3_store(&config("http://localhost:9000")).is_ok());
    }
}
