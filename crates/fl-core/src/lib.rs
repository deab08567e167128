//! `fl-core` — foundational types for the `freightlapse` simulator.
//!
//! This crate is a dependency of every other `fl-*` crate.  It has no `fl-*`
//! dependencies and minimal external ones (`rand`, `thiserror`, `chrono`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`ids`]      | `CityId`, `CityTable`                                 |
//! | [`geo`]      | `MapPoint`, planar distance, interpolation            |
//! | [`time`]     | `Tick`, `TimeGrid`                                    |
//! | [`rng`]      | `FlowRng` (per flow record)                           |
//! | [`config`]   | `SimConfig`                                           |
//! | [`error`]    | `FlError`, `FlResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{FlError, FlResult};
pub use geo::MapPoint;
pub use ids::{CityId, CityTable};
pub use rng::FlowRng;
pub use time::{Tick, TimeGrid};
