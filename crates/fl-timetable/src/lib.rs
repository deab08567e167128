//! `fl-timetable` — turn aggregate annual flows into individual trips.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`flow`]     | `FlowRecord`, `FlowDefect` (record validation)             |
//! | [`model`]    | `ModelConfig`, `TravelTimeModel`, `DepartureCountModel`, `WrapPolicy` |
//! | [`trip`]     | `Trip`, `Category`                                         |
//! | [`sampler`]  | `TripSampler` — one record → concrete trips                |
//! | [`builder`]  | `TimetableBuilder`, `Timetable`, `BuildSummary`            |
//! | [`loader`]   | `load_flows_csv`, `load_flows_reader`                      |
//! | [`writer`]   | `write_timetable_csv`, `write_timetable_writer`            |
//! | [`error`]    | `TimetableError`, `TimetableResult<T>`                     |
//!
//! # Pipeline (summary)
//!
//! ```text
//! for each FlowRecord r (validated up front):
//!   travel    = round(dist_deg(r) * km_per_degree / km_per_tick)
//!   n         = round(volume(r) * mass_per_unit / capacity_per_vehicle)
//!   n trips   : departure ~ U[0, horizon)
//!               arrival   = departure + travel   (WrapPolicy past the end)
//!               category  ~ sub_volumes(r) / volume(r)
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Samples flow records on Rayon's thread pool.           |
//! | `serde`    | Serde derives on configuration and trip types.         |

pub mod builder;
pub mod error;
pub mod flow;
pub mod loader;
pub mod model;
pub mod sampler;
pub mod trip;
pub mod writer;

#[cfg(test)]
mod tests;

pub use builder::{BuildSummary, Timetable, TimetableBuilder};
pub use error::{TimetableError, TimetableResult};
pub use flow::{FlowDefect, FlowRecord};
pub use loader::{load_flows_csv, load_flows_reader};
pub use model::{DepartureCountModel, ModelConfig, TravelTimeModel, WrapPolicy};
pub use sampler::TripSampler;
pub use trip::{Category, Trip};
pub use writer::{write_timetable_csv, write_timetable_writer};
