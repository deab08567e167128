//! The renderer contract.
//!
//! A renderer turns one [`FrameTask`] plus the (read-only) trip and flow
//! tables into encoded image bytes.  It may take arbitrarily long; the
//! driver bounds every call with a [`RenderWatchdog`][crate::RenderWatchdog]
//! and cancels it by dropping the future.

use std::sync::Arc;

use async_trait::async_trait;
use fl_timetable::{FlowRecord, Trip};

use crate::{FrameTask, RenderFault};

/// Trip and flow tables shared by every frame of a batch.
///
/// Cloning is two reference-count bumps, so blocking renderers can move a
/// copy onto a worker thread.
#[derive(Clone, Debug)]
pub struct SharedTables {
    pub trips: Arc<[Trip]>,
    pub flows: Arc<[FlowRecord]>,
}

impl SharedTables {
    pub fn new(trips: Vec<Trip>, flows: Vec<FlowRecord>) -> Self {
        Self { trips: trips.into(), flows: flows.into() }
    }
}

/// Produces the image for one frame.
///
/// Implementations must tolerate being dropped mid-render: no shared state
/// may be left half-updated when the future is cancelled.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, frame: &FrameTask, tables: &SharedTables) -> Result<Vec<u8>, RenderFault>;
}

/// A synchronous renderer, run off the async executor by [`Blocking`].
pub trait BlockingRenderer: Send + Sync + 'static {
    fn render_blocking(&self, frame: &FrameTask, tables: &SharedTables) -> Result<Vec<u8>, RenderFault>;
}

/// Adapts a [`BlockingRenderer`] to [`Renderer`] via `spawn_blocking`.
///
/// A blocking call cannot be interrupted.  When the watchdog fires, the
/// worker thread runs on to completion and its result is discarded.
pub struct Blocking<R>(Arc<R>);

impl<R: BlockingRenderer> Blocking<R> {
    pub fn new(renderer: R) -> Self {
        Blocking(Arc::new(renderer))
    }
}

#[async_trait]
impl<R: BlockingRenderer> Renderer for Blocking<R> {
    async fn render(&self, frame: &FrameTask, tables: &SharedTables) -> Result<Vec<u8>, RenderFault> {
        let renderer = Arc::clone(&self.0);
        let frame = frame.clone();
        let tables = tables.clone();
        tokio::task::spawn_blocking(move || renderer.render_blocking(&frame, &tables))
            .await
            .map_err(|e| RenderFault::Join(e.to_string()))?
    }
}
