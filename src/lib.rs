pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    BackupDate,
    // Errors
    BackupError,
    BackupEvent,
    BucketName,
    DateParseError,
    DayReport,
    DomainValidationError,
    ListReport,
    // Value objects
    ObjectKey,
    // Models
    PruneReport,
    RetentionWindow,
    StorageError,
    StoredObject,
    UploadReport,
};

// Port types - interfaces for external systems
pub use ports::{
    // Service ports
    BackupService,
    // Storage ports
    BackupStore,
    BucketProvisioner,
    BucketStatus,
    Clock,
    FixedClock,
    Notifier,
    SilentNotifier,
    SystemClock,
};

// Service implementations - business logic
pub use services::{BackupServiceBuilder, BackupServiceImpl};

// Application factory and configuration
pub use app::{
    create_app_from_env, create_in_memory_app, AppBuilder, AppConfig, AppError, AppServices,
    StorageBackend,
};

// Adapter types - infrastructure implementations
pub use adapters::inbound::cli::ConsoleNotifier;
pub use adapters::outbound::storage::{
    ApacheObjectStoreAdapter, InMemoryBucketProvisioner, S3BucketProvisioner,
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        create_app_from_env, create_in_memory_app, ApacheObjectStoreAdapter, AppBuilder,
        AppConfig, AppServices, BackupDate, BackupService, BackupServiceImpl, BackupStore,
        BucketName, ObjectKey, RetentionWindow,
    };
}
