// Infrastructure error conversions
pub mod error;

// Storage implementations
pub mod apache_object_store_adapter;
pub mod bucket;

// Provider-specific implementations
pub mod s3;

// Re-export key types
pub use apache_object_store_adapter::ApacheObjectStoreAdapter;
pub use bucket::{BucketError, InMemoryBucketProvisioner, S3BucketProvisioner};
pub use s3::{create_s3_store, S3Config};
