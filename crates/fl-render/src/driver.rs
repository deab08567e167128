//! The resumable batch driver and its retry policy.

use std::ops::Range;
use std::time::Duration;

use log::{debug, info, warn};

use crate::{
    BatchObserver, FrameClock, FrameStore, RenderConfig, RenderError, RenderOutcome,
    RenderResult, RenderWatchdog, Renderer, SharedTables,
};

// ── RetryPolicy ───────────────────────────────────────────────────────────────

/// How often, and how patiently, a stalling frame is retried.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RetryPolicy {
    /// Retries allowed after consecutive stalls on the same frame.  The
    /// stall after the last retry is fatal.
    pub max_retries_per_frame: u32,
    /// Wait before the first retry; doubled for each further retry.
    pub backoff_base_ms:       u64,
    /// Upper bound on any single wait.
    pub backoff_max_ms:        u64,
    /// Treat renderer errors like stalls instead of aborting the batch.
    pub retry_renderer_errors: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries_per_frame: 5,
            backoff_base_ms:       500,
            backoff_max_ms:        30_000,
            retry_renderer_errors: false,
        }
    }
}

impl RetryPolicy {
    pub fn validate(&self) -> RenderResult<()> {
        if self.backoff_max_ms < self.backoff_base_ms {
            return Err(RenderError::Config(format!(
                "backoff_max_ms ({}) is below backoff_base_ms ({})",
                self.backoff_max_ms, self.backoff_base_ms
            )));
        }
        Ok(())
    }

    /// Wait before retry number `attempt` (1-based): `base * 2^(attempt-1)`,
    /// capped at the maximum.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.saturating_sub(1).min(32);
        let ms = self.backoff_base_ms.saturating_mul(factor).min(self.backoff_max_ms);
        Duration::from_millis(ms)
    }
}

// ── State and report ──────────────────────────────────────────────────────────

/// Where the driver is in its range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// About to render (or rendering) this index.
    Running(u64),
    /// The render of this index timed out; it will be retried.
    Stalled(u64),
    Complete,
}

/// Counters for one [`ResumableBatchDriver::run`] call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub begin:  u64,
    pub end:    u64,
    /// Artifacts written.
    pub frames: u64,
    /// Render attempts that timed out.
    pub stalls: u32,
    /// Renderer errors that were retried.
    pub faults: u32,
    /// Supervisory passes over the range (1 when nothing stalled).
    pub passes: u32,
}

/// How one pass over the range ended.
enum Pass {
    Finished,
    Interrupted { index: u64 },
}

// ── ResumableBatchDriver ──────────────────────────────────────────────────────

/// Renders a frame range in order, resuming at the failing index whenever a
/// render stalls.
///
/// The checkpoint is the next index to attempt: every index below it within
/// the current run has an artifact.
pub struct ResumableBatchDriver<R: Renderer> {
    renderer:   R,
    watchdog:   RenderWatchdog,
    clock:      FrameClock,
    store:      FrameStore,
    policy:     RetryPolicy,
    state:      DriverState,
    checkpoint: u64,
}

impl<R: Renderer> ResumableBatchDriver<R> {
    pub fn new(renderer: R, clock: FrameClock, store: FrameStore, config: &RenderConfig) -> Self {
        Self {
            renderer,
            watchdog:   RenderWatchdog::new(config.timeout()),
            clock,
            store,
            policy:     config.retry.clone(),
            state:      DriverState::Running(0),
            checkpoint: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> DriverState {
        self.state
    }

    #[inline]
    pub fn checkpoint(&self) -> u64 {
        self.checkpoint
    }

    #[inline]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[inline]
    pub fn store(&self) -> &FrameStore {
        &self.store
    }

    /// Produce an artifact for every index in `range`.
    ///
    /// Stalls restart the pass at the stalled index after a backoff, up to
    /// the retry ceiling.  Renderer errors abort the batch unless the policy
    /// retries them.
    pub async fn run<O: BatchObserver>(
        &mut self,
        range:    Range<u64>,
        tables:   &SharedTables,
        observer: &mut O,
    ) -> RenderResult<BatchReport> {
        if range.start > range.end {
            return Err(RenderError::Range(format!("{}..{} is reversed", range.start, range.end)));
        }
        if range.end > self.store.capacity() {
            return Err(RenderError::Range(format!(
                "end {} needs more than the configured index width allows ({} frames)",
                range.end,
                self.store.capacity()
            )));
        }

        let mut report = BatchReport { begin: range.start, end: range.end, ..BatchReport::default() };
        let mut begin = range.start;
        let mut last_interrupt: Option<(u64, u32)> = None;
        self.checkpoint = begin;
        self.state = DriverState::Running(begin);
        info!("rendering frames {}..{} into {}", range.start, range.end, self.store.dir().display());

        loop {
            report.passes += 1;
            match self.run_pass(begin, range.end, tables, observer, &mut report).await? {
                Pass::Finished => break,
                Pass::Interrupted { index } => {
                    let attempt = match last_interrupt {
                        Some((at, n)) if at == index => n + 1,
                        _ => 1,
                    };
                    last_interrupt = Some((index, attempt));
                    if attempt > self.policy.max_retries_per_frame {
                        warn!("frame {index}: giving up after {attempt} failed attempts");
                        return Err(RenderError::StallLimit { index, attempts: attempt });
                    }
                    let backoff = self.policy.backoff(attempt);
                    observer.on_retry(index, attempt, backoff);
                    tokio::time::sleep(backoff).await;
                    begin = index;
                }
            }
        }

        self.state = DriverState::Complete;
        observer.on_batch_end(&report);
        Ok(report)
    }

    /// One supervisory pass: render `begin..end` until done or interrupted.
    async fn run_pass<O: BatchObserver>(
        &mut self,
        begin:    u64,
        end:      u64,
        tables:   &SharedTables,
        observer: &mut O,
        report:   &mut BatchReport,
    ) -> RenderResult<Pass> {
        for index in begin..end {
            self.state = DriverState::Running(index);
            self.checkpoint = index;
            let task = self.clock.task(index);
            observer.on_frame_start(&task);

            let outcome = self.watchdog.guard(self.renderer.render(&task, tables)).await;
            match outcome {
                RenderOutcome::Rendered(bytes) => {
                    let path = self.store.commit(index, &bytes)?;
                    report.frames += 1;
                    observer.on_frame_committed(&task, &path);
                }
                RenderOutcome::TimedOut => {
                    debug!("frame {index}: no result within {:?}", self.watchdog.timeout());
                    report.stalls += 1;
                    observer.on_stall(index);
                    self.state = DriverState::Stalled(index);
                    return Ok(Pass::Interrupted { index });
                }
                RenderOutcome::Failed(fault) => {
                    observer.on_renderer_fault(index, &fault);
                    if !self.policy.retry_renderer_errors {
                        return Err(RenderError::Renderer { index, fault });
                    }
                    report.faults += 1;
                    self.state = DriverState::Stalled(index);
                    return Ok(Pass::Interrupted { index });
                }
            }
        }
        self.checkpoint = end;
        Ok(Pass::Finished)
    }
}
