//! `fl-render` — turn a timetable into an indexed sequence of frame images.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`clock`]     | `FrameClock`, `FrameTask`                                      |
//! | [`renderer`]  | `Renderer` (async), `BlockingRenderer`, `Blocking`, `SharedTables` |
//! | [`watchdog`]  | `RenderWatchdog`, `RenderOutcome`                              |
//! | [`store`]     | `FrameStore` — `frame_000042.png` artifact layout              |
//! | [`driver`]    | `ResumableBatchDriver`, `DriverState`, `RetryPolicy`, `BatchReport` |
//! | [`observer`]  | `BatchObserver`, `NoopObserver`, `LogObserver`                 |
//! | [`scene`]     | `CityAtlas`, `ActiveTrip`, `active_trips`                      |
//! | [`raster`]    | `DotRenderer`, `Palette` — built-in PNG renderer               |
//! | [`config`]    | `RenderConfig`                                                 |
//! | [`error`]     | `RenderError`, `RenderFault`, `RenderResult<T>`                |
//!
//! # Driver loop
//!
//! ```text
//! begin = range.start
//! loop:
//!   for i in begin..end:                       ← one supervisory pass
//!     arm watchdog; render(frame i); disarm
//!       ok       → commit frame_{i}.png, continue
//!       timeout  → Stalled(i): back off, restart the pass at i
//!       fault    → fatal (or retried like a stall, if configured)
//!   Complete
//! ```
//!
//! Frames are produced strictly in order, one at a time.  The watchdog is
//! the only cancellation mechanism and only ever cancels the frame in
//! flight.

pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod observer;
pub mod raster;
pub mod renderer;
pub mod scene;
pub mod store;
pub mod watchdog;


pub use clock::{FrameClock, FrameTask};
pub use config::RenderConfig;
pub use driver::{BatchReport, DriverState, ResumableBatchDriver, RetryPolicy};
pub use error::{RenderError, RenderFault, RenderResult};
pub use observer::{BatchObserver, LogObserver, NoopObserver};
pub use raster::{DotRenderer, Palette};
pub use renderer::{Blocking, BlockingRenderer, Renderer, SharedTables};
pub use scene::{ActiveTrip, CityAtlas, active_trips};
pub use store::FrameStore;
pub use watchdog::{RenderOutcome, RenderWatchdog};
