use bucket_backup::{
    AppBuilder, AppConfig, BackupError, BackupService, BucketName, DayReport, RetentionWindow,
    StorageBackend, StorageError,
};
use chrono::{Duration, Utc};

// Note: These tests require MinIO to be running and configured via environment variables:
// - MINIO_ENDPOINT (default: http://localhost:9000)
// - MINIO_ACCESS_KEY_ID (default: minioadmin)
// - MINIO_SECRET_ACCESS_KEY (default: minioadmin)
// - MINIO_BUCKET (default: backup-cli-test)

fn minio_config() -> AppConfig {
    let endpoint =
        std::env::var("MINIO_ENDPOINT").unwrap_or_else(|_| "http://localhost:9000".to_string());
    let access_key =
        std::env::var("MINIO_ACCESS_KEY_ID").unwrap_or_else(|_| "minioadmin".to_string());
    let secret_key =
        std::env::var("MINIO_SECRET_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".to_string());
    let bucket = std::env::var("MINIO_BUCKET").unwrap_or_else(|_| "backup-cli-test".to_string());

    println!("Connecting to MinIO at {} with bucket {}", endpoint, bucket);

    AppConfig {
        bucket: BucketName::new(bucket).unwrap(),
        storage_backend: StorageBackend::S3 {
            endpoint,
            region: "us-east-1".to_string(),
            access_key,
            secret_key,
        },
    }
}

#[tokio::test]
#[ignore = "requires MinIO server to be running"]
async fn test_minio_backup_cycle() {
    let source_dir = tempfile::tempdir().unwrap();
    let download_dir = tempfile::tempdir().unwrap();

    // Creates the bucket on first run, finds it afterwards
    let services = AppBuilder::new(minio_config())
        .with_download_dir(download_dir.path())
        .build()
        .await
        .unwrap();
    let service = services.backup_service;
    println!("Bucket status: {:?}", services.bucket_status);

    let yesterday = Utc::now() - Duration::days(1);
    let name = format!("minio-test{}", yesterday.format("-%m-%d-%Y_0300.sql"));
    let file = source_dir.path().join(&name);
    std::fs::write(&file, b"Hello from MinIO!").unwrap();

    let report = service.upload(&[file]).await.unwrap();
    assert_eq!(report.uploaded[0].as_str(), name);

    let listing = service.list().await.unwrap();
    assert!(listing.objects.iter().any(|o| o.key.as_str() == name));

    let day = yesterday.format("%Y-%m-%d").to_string();
    match service.get_day(&day).await.unwrap() {
        DayReport::Downloaded { keys, .. } => {
            assert!(keys.iter().any(|k| k.as_str() == name))
        }
        other => panic!("Expected downloads, got {other:?}"),
    }
    assert_eq!(
        std::fs::read(download_dir.path().join(&name)).unwrap(),
        b"Hello from MinIO!"
    );

    // Our object was just written, so a long window keeps it
    let report = service.prune(RetentionWindow::days(36500)).await.unwrap();
    assert!(report.removed.iter().all(|k| k.as_str() != name));

    service.delete(&name).await.unwrap();
    let err = service.download(&name).await.unwrap_err();
    assert!(matches!(
        err,
        BackupError::Storage(StorageError::ObjectNotFound { .. })
    ));
}
