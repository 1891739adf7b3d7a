//! Core logging types: account entries, status, and the [`Log`] trait.

/// Per-account result for summary reporting.
#[derive(Debug, Clone)]
pub struct AccountEntry {
    /// Account title.
    pub title: String,
    /// Outcome of deriving the account.
    pub status: AccountStatus,
    /// Optional detail (resource count or error description).
    pub message: Option<String>,
}

/// Outcome of deriving one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    /// Resources were derived to be present.
    Planned,
    /// Resources were derived to be removed.
    Removed,
    /// The declaration was rejected.
    Failed,
}

/// Abstraction over logging backends.
///
/// Commands log through this trait so tests can substitute a recorder for
/// the console-backed [`Logger`](super::logger::Logger).
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (suppressed on console unless verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Record an account result for the summary.
    fn record_account(&self, title: &str, status: AccountStatus, message: Option<&str>);
}
