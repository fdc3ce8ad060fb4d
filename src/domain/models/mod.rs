pub mod event;
pub mod report;
pub mod stored_object;

pub use event::BackupEvent;
pub use report::{DayReport, ListReport, PruneReport, UploadReport};
pub use stored_object::StoredObject;
