//! CSV flow table loader.
//!
//! # CSV format
//!
//! One row per city pair.  The first seven columns are fixed; the remaining
//! columns are the per-category sub-volumes, in category order (land block
//! first, then the naval block when naval mode is on).  Header names of the
//! category columns are free-form.
//!
//! ```csv
//! from_city,from_longitude,from_latitude,to_city,to_longitude,to_latitude,flux,c1,c2
//! Gleiwitz,18.67,50.29,Breslau,17.03,51.11,120.0,100.0,20.0
//! Essen,7.01,51.45,Hamburg,9.99,53.55,80.0,0.0,80.0
//! ```
//!
//! City names are interned into the returned [`CityTable`] in first-seen
//! order.  Rows are parsed but not validated here; the timetable builder
//! validates the whole table before sampling.

use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use fl_core::{CityTable, MapPoint};

use crate::{FlowRecord, TimetableError, TimetableResult};

/// Number of fixed columns before the category sub-volumes.
const FIXED_COLUMNS: usize = 7;

/// Load a flow table from a CSV file with `slots` sub-volume columns.
pub fn load_flows_csv(path: &Path, slots: usize) -> TimetableResult<(Vec<FlowRecord>, CityTable)> {
    let file = std::fs::File::open(path)?;
    load_flows_reader(file, slots)
}

/// Like [`load_flows_csv`] but accepts any `Read` source.
pub fn load_flows_reader<R: Read>(
    reader: R,
    slots: usize,
) -> TimetableResult<(Vec<FlowRecord>, CityTable)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let expected = FIXED_COLUMNS + slots;
    let header_len = csv_reader.headers()?.len();
    if header_len != expected {
        return Err(TimetableError::Parse(format!(
            "header has {header_len} columns, expected {FIXED_COLUMNS} fixed + {slots} categories"
        )));
    }

    let mut cities = CityTable::new();
    let mut flows = Vec::new();
    for result in csv_reader.records() {
        let row = result?;
        flows.push(parse_row(&row, slots, &mut cities)?);
    }
    Ok((flows, cities))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_row(row: &StringRecord, slots: usize, cities: &mut CityTable) -> TimetableResult<FlowRecord> {
    let line = row.position().map(|p| p.line()).unwrap_or_default();
    let field = |i: usize| -> TimetableResult<&str> {
        row.get(i)
            .ok_or_else(|| TimetableError::Parse(format!("line {line}: missing column {i}")))
    };
    let number = |i: usize| -> TimetableResult<f64> {
        let raw = field(i)?;
        raw.parse::<f64>().map_err(|_| {
            TimetableError::Parse(format!("line {line}: column {i}: {raw:?} is not a number"))
        })
    };

    let origin = cities.intern(field(0)?);
    let origin_point = MapPoint::new(number(1)?, number(2)?);
    let destination = cities.intern(field(3)?);
    let destination_point = MapPoint::new(number(4)?, number(5)?);
    let volume = number(6)?;
    let sub_volumes = (FIXED_COLUMNS..FIXED_COLUMNS + slots)
        .map(number)
        .collect::<TimetableResult<Vec<f64>>>()?;

    Ok(FlowRecord {
        origin,
        origin_point,
        destination,
        destination_point,
        volume,
        sub_volumes,
    })
}
