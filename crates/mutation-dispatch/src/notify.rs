//! User notification seam.

/// Delivers mutation outcomes to the user.
///
/// The CLI prints these; tests record them. Failures always reach the
/// notifier, never just a log line.
pub trait Notifier: Send + Sync {
    /// A mutation succeeded.
    fn success(&self, message: &str);

    /// A mutation failed.
    fn error(&self, message: &str);
}

/// Notifier that only logs, for headless use.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        tracing::info!(message = %message, "Mutation succeeded");
    }

    fn error(&self, message: &str) {
        tracing::error!(message = %message, "Mutation failed");
    }
}
