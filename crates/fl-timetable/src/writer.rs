//! CSV timetable export.
//!
//! Columns: `from_city,to_city,departure_tick,arrival_tick,departure_time,
//! arrival_time,category,is_naval`.  Times are rendered from the
//! [`TimeGrid`]; cities by name.  A trip naming a city missing from the
//! [`CityTable`] fails the export.

use std::io::Write;
use std::path::Path;

use fl_core::{CityId, CityTable, FlError, TimeGrid};

use crate::{TimetableResult, Trip};

const HEADER: [&str; 8] = [
    "from_city",
    "to_city",
    "departure_tick",
    "arrival_tick",
    "departure_time",
    "arrival_time",
    "category",
    "is_naval",
];

/// Write `trips` to a new CSV file at `path`.
pub fn write_timetable_csv(
    path:   &Path,
    trips:  &[Trip],
    cities: &CityTable,
    grid:   &TimeGrid,
) -> TimetableResult<()> {
    let file = std::fs::File::create(path)?;
    write_timetable_writer(file, trips, cities, grid)
}

/// Like [`write_timetable_csv`] but accepts any `Write` sink.
pub fn write_timetable_writer<W: Write>(
    sink:   W,
    trips:  &[Trip],
    cities: &CityTable,
    grid:   &TimeGrid,
) -> TimetableResult<()> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(HEADER)?;
    for trip in trips {
        let row: [&str; 8] = [
            city_name(cities, trip.origin)?,
            city_name(cities, trip.destination)?,
            &trip.departure.0.to_string(),
            &trip.arrival.0.to_string(),
            &grid.timestamp(trip.departure).to_string(),
            &grid.timestamp(trip.arrival).to_string(),
            &trip.category.to_string(),
            if trip.naval { "1" } else { "0" },
        ];
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn city_name(cities: &CityTable, id: CityId) -> TimetableResult<&str> {
    cities.name(id).ok_or_else(|| FlError::CityNotFound(id).into())
}
