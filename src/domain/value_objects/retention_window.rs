use chrono::{DateTime, TimeDelta, Utc};

/// Number of days a backup is kept before it becomes eligible for pruning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RetentionWindow {
    days: u32,
}

impl RetentionWindow {
    pub const DEFAULT_DAYS: u32 = 30;

    pub fn days(days: u32) -> Self {
        Self { days }
    }

    pub fn as_days(&self) -> u32 {
        self.days
    }

    /// The oldest instant still retained. Saturates at the earliest
    /// representable instant for windows reaching past it.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        TimeDelta::try_days(i64::from(self.days))
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// An object is expired when it was last modified strictly before the cutoff
    pub fn is_expired(&self, last_modified: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        last_modified < self.cutoff(now)
    }
}

impl Default for RetentionWindow {
    fn default() -> Self {
        Self::days(Self::DEFAULT_DAYS)
    }
}

impl std::fmt::Display for RetentionWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} days", self.days)
    }
}
