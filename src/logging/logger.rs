//! Structured logger with per-account summary collection.
use std::sync::Mutex;

use super::types::{AccountEntry, AccountStatus, Log};

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
///
/// `record_account` is not included because its signature differs from the
/// `fn(&self, &str)` pattern shared by the display methods.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Tracing-backed logger that also collects account results.
#[derive(Debug, Default)]
pub struct Logger {
    accounts: Mutex<Vec<AccountEntry>>,
}

impl Logger {
    /// Create a new logger with an empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a clone of all recorded account entries.
    #[must_use]
    pub fn account_entries(&self) -> Vec<AccountEntry> {
        self.accounts.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "account::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message.
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Record an account result for the summary.
    pub fn record_account(&self, title: &str, status: AccountStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.accounts.lock() {
            guard.push(AccountEntry {
                title: title.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Count the number of rejected accounts.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.accounts.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|a| a.status == AccountStatus::Failed)
                .count()
        })
    }

    /// Log the summary of all recorded accounts.
    pub fn print_summary(&self) {
        let accounts = self.account_entries();
        if accounts.is_empty() {
            return;
        }

        self.stage("Summary");

        let mut planned = 0u32;
        let mut removed = 0u32;
        let mut failed = 0u32;

        for account in &accounts {
            let (icon, color) = match account.status {
                AccountStatus::Planned => {
                    planned += 1;
                    ("✓", "\x1b[32m")
                }
                AccountStatus::Removed => {
                    removed += 1;
                    ("-", "\x1b[33m")
                }
                AccountStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
            };

            let suffix = account
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", account.title));
        }

        let total = planned + removed + failed;
        self.info(&format!(
            "{total} accounts: \x1b[32m{planned} planned\x1b[0m, \x1b[33m{removed} removed\x1b[0m, \x1b[31m{failed} failed\x1b[0m"
        ));
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error);

    fn record_account(&self, title: &str, status: AccountStatus, message: Option<&str>) {
        self.record_account(title, status, message);
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn logger_new() {
        assert!(Logger::new().account_entries().is_empty());
    }

    #[test]
    fn record_account_with_message() {
        let log = Logger::new();
        log.record_account("deploy", AccountStatus::Planned, Some("5 resources"));
        let entries = log.account_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "deploy");
        assert_eq!(entries[0].message.as_deref(), Some("5 resources"));
    }

    #[test]
    fn failure_count_returns_correct_count() {
        let log = Logger::new();
        assert_eq!(log.failure_count(), 0);
        log.record_account("a", AccountStatus::Planned, None);
        log.record_account("b", AccountStatus::Failed, Some("error 1"));
        log.record_account("c", AccountStatus::Removed, None);
        log.record_account("d", AccountStatus::Failed, Some("error 2"));
        assert_eq!(log.failure_count(), 2);
    }

    #[test]
    fn log_trait_delegates_to_logger() {
        let log = Logger::new();
        let log_ref: &dyn Log = &log;
        log_ref.record_account("via-trait", AccountStatus::Planned, None);
        assert_eq!(log.account_entries().len(), 1);
    }

    #[test]
    fn print_summary_without_subscriber_is_silent() {
        let log = Logger::new();
        log.record_account("a", AccountStatus::Planned, None);
        log.print_summary();
        assert_eq!(log.account_entries().len(), 1);
    }
}
