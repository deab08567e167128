//! Batch observer trait for progress reporting.

use std::path::Path;
use std::time::Duration;

use log::{debug, info, warn};

use crate::{BatchReport, FrameTask, RenderFault};

/// Callbacks invoked by [`ResumableBatchDriver::run`][crate::ResumableBatchDriver::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait BatchObserver {
    /// Called before every render attempt, including retries.
    fn on_frame_start(&mut self, _task: &FrameTask) {}

    /// Called after the artifact for `task` has been written.
    fn on_frame_committed(&mut self, _task: &FrameTask, _path: &Path) {}

    /// Called when frame `index` timed out.
    fn on_stall(&mut self, _index: u64) {}

    /// Called when the renderer returned an error for frame `index`.
    fn on_renderer_fault(&mut self, _index: u64, _fault: &RenderFault) {}

    /// Called after a stall or a retried fault, when frame `index` has been
    /// interrupted `attempt` times in a row and the driver is about to wait
    /// `backoff` before trying it again.
    fn on_retry(&mut self, _index: u64, _attempt: u32, _backoff: Duration) {}

    /// Called once when the whole range has been produced.
    fn on_batch_end(&mut self, _report: &BatchReport) {}
}

/// A [`BatchObserver`] that does nothing.
pub struct NoopObserver;

impl BatchObserver for NoopObserver {}

/// Reports progress through the `log` facade.
///
/// Every attempt is logged at `debug`, every `every`-th committed frame and
/// each retry at `info`, stalls and faults at `warn`.
pub struct LogObserver {
    every: u64,
}

impl LogObserver {
    pub fn new(every: u64) -> Self {
        Self { every: every.max(1) }
    }
}

impl BatchObserver for LogObserver {
    fn on_frame_start(&mut self, task: &FrameTask) {
        debug!("frame {} ({}) rendering", task.index, task.timestamp);
    }

    fn on_frame_committed(&mut self, task: &FrameTask, path: &Path) {
        if task.index % self.every == 0 {
            info!("frame {} ({}) -> {}", task.index, task.timestamp, path.display());
        }
    }

    fn on_stall(&mut self, index: u64) {
        warn!("frame {index} stalled");
    }

    fn on_renderer_fault(&mut self, index: u64, fault: &RenderFault) {
        warn!("frame {index}: {fault}");
    }

    fn on_retry(&mut self, index: u64, attempt: u32, backoff: Duration) {
        info!("frame {index}: retry {attempt} in {backoff:?}");
    }

    fn on_batch_end(&mut self, report: &BatchReport) {
        info!(
            "frames {}..{} complete: {} rendered, {} stalls, {} passes",
            report.begin, report.end, report.frames, report.stalls, report.passes
        );
    }
}
