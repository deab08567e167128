//! Per-attempt render deadline.

use std::future::Future;
use std::time::Duration;

use crate::RenderFault;

/// Typed result of one guarded render attempt.
#[derive(Debug)]
pub enum RenderOutcome {
    Rendered(Vec<u8>),
    /// The deadline passed; the attempt was dropped and produced nothing.
    TimedOut,
    Failed(RenderFault),
}

/// A single-shot timer around one render attempt.
///
/// The deadline is armed when [`guard`][Self::guard] starts polling the
/// attempt and disarmed when it returns.  On expiry the attempt future is
/// dropped, which cancels it.
#[derive(Copy, Clone, Debug)]
pub struct RenderWatchdog {
    timeout: Duration,
}

impl RenderWatchdog {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn guard<F>(&self, attempt: F) -> RenderOutcome
    where
        F: Future<Output = Result<Vec<u8>, RenderFault>>,
    {
        match tokio::time::timeout(self.timeout, attempt).await {
            Ok(Ok(bytes)) => RenderOutcome::Rendered(bytes),
            Ok(Err(fault)) => RenderOutcome::Failed(fault),
            Err(_elapsed) => RenderOutcome::TimedOut,
        }
    }
}
