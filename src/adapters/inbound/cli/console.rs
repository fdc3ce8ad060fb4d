use std::io::Write;

use tracing::warn;

use crate::{domain::models::BackupEvent, ports::Notifier};

/// Prints each progress event to stdout as its own line
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, event: &BackupEvent) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", event).and_then(|_| stdout.flush()) {
            warn!(error = %e, "failed to write progress line");
        }
    }
}
