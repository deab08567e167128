//! Unit tests for fl-timetable.

use fl_core::{CityId, MapPoint, SimConfig};

use crate::{FlowRecord, ModelConfig};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn small_config(horizon_ticks: u64, category_count: u16, naval: bool) -> SimConfig {
    SimConfig {
        ticks_per_hour: 12,
        horizon_ticks,
        seed: 42,
        category_count,
        naval,
        ..SimConfig::default()
    }
}

/// One vehicle per volume unit; 1 km per degree, 5 km per tick.
fn unit_model() -> ModelConfig {
    ModelConfig {
        km_per_degree:        1.0,
        speed_kmph:           60.0,
        mass_per_unit:        1.0,
        capacity_per_vehicle: 1.0,
        ..ModelConfig::default()
    }
}

fn flow(volume: f64, sub_volumes: Vec<f64>) -> FlowRecord {
    FlowRecord {
        origin:            CityId(0),
        origin_point:      MapPoint::new(0.0, 0.0),
        destination:       CityId(1),
        destination_point: MapPoint::new(6.0, 8.0), // 10 degrees → 2 ticks
        volume,
        sub_volumes,
    }
}

#[cfg(test)]
mod models {
    use super::*;
    use crate::{DepartureCountModel, TravelTimeModel};

    #[test]
    fn zero_distance_is_zero_ticks() {
        let m = TravelTimeModel::new(&ModelConfig::default(), &SimConfig::default());
        let p = MapPoint::new(18.67, 50.29);
        assert_eq!(m.ticks(p, p), 0);
    }

    #[test]
    fn one_degree_at_default_speed() {
        // 68.671 km at 5 km per tick = 13.73 → 14 ticks.
        let m = TravelTimeModel::new(&ModelConfig::default(), &SimConfig::default());
        assert_eq!(m.ticks(MapPoint::new(0.0, 0.0), MapPoint::new(1.0, 0.0)), 14);
    }

    #[test]
    fn travel_is_symmetric() {
        let m = TravelTimeModel::new(&unit_model(), &small_config(100, 1, false));
        let a = MapPoint::new(0.0, 0.0);
        let b = MapPoint::new(6.0, 8.0);
        assert_eq!(m.ticks(a, b), 2);
        assert_eq!(m.ticks(b, a), 2);
    }

    #[test]
    fn zero_volume_is_zero_departures() {
        let m = DepartureCountModel::new(&ModelConfig::default());
        assert_eq!(m.departures(0.0), 0);
    }

    #[test]
    fn departures_scale_with_volume() {
        let m = DepartureCountModel::new(&ModelConfig::default());
        assert_eq!(m.departures(66.0), 100);
        let mut last = 0;
        for i in 0..2_000 {
            let d = m.departures(i as f64 * 0.37);
            assert!(d >= last, "departures decreased at volume {}", i as f64 * 0.37);
            last = d;
        }
    }

    #[test]
    fn departures_round_half_to_even() {
        let m = DepartureCountModel::new(&unit_model());
        assert_eq!(m.departures(2.5), 2);
        assert_eq!(m.departures(3.5), 4);
    }

    #[test]
    fn model_config_rejects_non_positive_constants() {
        let bad = ModelConfig { capacity_per_vehicle: 0.0, ..ModelConfig::default() };
        assert!(bad.validate().is_err());
        let bad = ModelConfig { speed_kmph: f64::NAN, ..ModelConfig::default() };
        assert!(bad.validate().is_err());
        assert!(ModelConfig::default().validate().is_ok());
    }
}

#[cfg(test)]
mod validation {
    use super::*;
    use crate::{FlowDefect, TimetableBuilder, TimetableError};

    #[test]
    fn well_formed_record_passes() {
        assert!(flow(10.0, vec![4.0, 6.0]).validate(2, 1e-3).is_ok());
    }

    #[test]
    fn negative_sub_volume_rejected() {
        let err = flow(10.0, vec![12.0, -2.0]).validate(2, 1e-3).unwrap_err();
        assert_eq!(err, FlowDefect::BadSubVolume { slot: 1, value: -2.0 });
    }

    #[test]
    fn empty_breakdown_rejected() {
        let err = flow(10.0, vec![0.0, 0.0]).validate(2, 1e-3).unwrap_err();
        assert_eq!(err, FlowDefect::EmptyBreakdown(10.0));
    }

    #[test]
    fn mismatched_sum_rejected() {
        let err = flow(10.0, vec![4.0, 5.0]).validate(2, 1e-3).unwrap_err();
        assert!(matches!(err, FlowDefect::SumMismatch { .. }));
        // Within tolerance is accepted.
        assert!(flow(10.0, vec![4.0, 5.999_9]).validate(2, 1e-3).is_ok());
    }

    #[test]
    fn wrong_slot_count_rejected() {
        let err = flow(10.0, vec![10.0]).validate(2, 1e-3).unwrap_err();
        assert_eq!(err, FlowDefect::SlotCount { expected: 2, got: 1 });
    }

    #[test]
    fn negative_total_rejected() {
        let err = flow(-1.0, vec![0.0, 0.0]).validate(2, 1e-3).unwrap_err();
        assert_eq!(err, FlowDefect::BadVolume(-1.0));
    }

    #[test]
    fn zero_volume_skips_sum_check() {
        assert!(flow(0.0, vec![0.0, 0.0]).validate(2, 1e-3).is_ok());
    }

    #[test]
    fn builder_fails_fast_on_any_bad_record() {
        let sim = small_config(100, 2, false);
        let builder = TimetableBuilder::new(&sim, &unit_model()).unwrap();
        let flows = vec![flow(10.0, vec![4.0, 6.0]), flow(10.0, vec![0.0, 0.0])];
        match builder.build(&flows) {
            Err(TimetableError::InvalidFlow { record, defect }) => {
                assert_eq!(record, 1);
                assert_eq!(defect, FlowDefect::EmptyBreakdown(10.0));
            }
            other => panic!("expected InvalidFlow, got {other:?}"),
        }
    }

    #[test]
    fn builder_rejects_bad_config() {
        let sim = small_config(0, 2, false);
        assert!(TimetableBuilder::new(&sim, &unit_model()).is_err());
    }
}

#[cfg(test)]
mod sampling {
    use fl_core::{FlError, FlowRng, Tick};

    use super::*;
    use crate::{Category, TimetableBuilder, TimetableError, TripSampler, WrapPolicy};

    #[test]
    fn three_departures_two_ticks_on_hundred_tick_horizon() {
        let sim = small_config(100, 1, false);
        let table = TimetableBuilder::new(&sim, &unit_model())
            .unwrap()
            .build(&[flow(3.0, vec![3.0])])
            .unwrap();

        assert_eq!(table.len(), 3);
        for trip in table.trips() {
            assert_eq!(trip.arrival.0, (trip.departure.0 + 2) % 100);
            assert_eq!(trip.origin, CityId(0));
            assert_eq!(trip.destination, CityId(1));
            assert_eq!(trip.category, Category(1));
            assert!(!trip.naval);
        }
        assert_eq!(table.summary.departures, 3);
        assert_eq!(table.summary.trips, 3);
    }

    #[test]
    fn ticks_stay_inside_horizon() {
        let sim = small_config(50, 2, false);
        let mut far = flow(2_000.0, vec![1_000.0, 1_000.0]);
        far.destination_point = MapPoint::new(150.0, 0.0); // 30 ticks of travel
        let table = TimetableBuilder::new(&sim, &unit_model()).unwrap().build(&[far]).unwrap();

        assert_eq!(table.len(), 2_000);
        assert!(table.summary.wrapped > 0);
        for trip in table.trips() {
            assert!(trip.departure.0 < 50);
            assert!(trip.arrival.0 < 50);
        }
    }

    #[test]
    fn empty_record_is_skipped() {
        let sim = small_config(100, 2, false);
        let table = TimetableBuilder::new(&sim, &unit_model())
            .unwrap()
            .build(&[flow(0.0, vec![0.0, 0.0]), flow(2.0, vec![1.0, 1.0])])
            .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.summary.skipped, 1);
        assert_eq!(table.summary.records, 2);
    }

    #[test]
    fn category_frequencies_converge() {
        let sim = small_config(1_000, 3, false);
        let mut rng = FlowRng::new(7, 0);
        let sampler = TripSampler::new(&sim, &unit_model());
        let trips = sampler
            .sample(&flow(10.0, vec![1.0, 3.0, 6.0]), 2, 20_000, &mut rng)
            .unwrap();

        let mut counts = [0usize; 3];
        for trip in &trips {
            counts[trip.category.slot()] += 1;
        }
        for (slot, expected) in [0.1, 0.3, 0.6].into_iter().enumerate() {
            let got = counts[slot] as f64 / trips.len() as f64;
            assert!((got - expected).abs() < 0.02, "slot {slot}: {got} vs {expected}");
        }
    }

    #[test]
    fn naval_flag_follows_upper_category_half() {
        let sim = small_config(100, 2, true);
        let mut rng = FlowRng::new(1, 0);
        let sampler = TripSampler::new(&sim, &unit_model());

        let ships = sampler.sample(&flow(4.0, vec![0.0, 0.0, 2.0, 2.0]), 2, 200, &mut rng).unwrap();
        assert!(ships.iter().all(|t| t.naval && t.category.0 > 2));

        let trains = sampler.sample(&flow(4.0, vec![2.0, 2.0, 0.0, 0.0]), 2, 200, &mut rng).unwrap();
        assert!(trains.iter().all(|t| !t.naval && t.category.0 <= 2));
    }

    #[test]
    fn category_range_overflow_is_rejected() {
        let sim = small_config(100, 40_000, true);
        assert!(matches!(
            TimetableBuilder::new(&sim, &unit_model()),
            Err(TimetableError::Core(FlError::Config(_)))
        ));

        // The largest layout that still fits keeps the naval half correct.
        let sim = small_config(100, 32_767, true);
        let mut sub_volumes = vec![0.0; sim.category_slots()];
        sub_volumes[sim.category_slots() - 1] = 4.0;
        let sampler = TripSampler::new(&sim, &unit_model());
        let mut rng = FlowRng::new(1, 0);
        let trips = sampler.sample(&flow(4.0, sub_volumes), 2, 50, &mut rng).unwrap();
        assert_eq!(trips.len(), 50);
        assert!(trips.iter().all(|t| t.naval && t.category == Category(65_534)));
    }

    #[test]
    fn same_seed_same_table() {
        let sim = small_config(500, 2, false);
        let flows = vec![flow(40.0, vec![10.0, 30.0]), flow(25.0, vec![25.0, 0.0])];
        let builder = TimetableBuilder::new(&sim, &unit_model()).unwrap();
        let a = builder.build(&flows).unwrap();
        let b = builder.build(&flows).unwrap();
        assert_eq!(a.trips, b.trips);

        let other = SimConfig { seed: 43, ..sim.clone() };
        let c = TimetableBuilder::new(&other, &unit_model()).unwrap().build(&flows).unwrap();
        assert_ne!(a.trips, c.trips);
    }

    #[test]
    fn clip_policy_pins_arrival_to_last_tick() {
        let sim = small_config(10, 1, false);
        let model = ModelConfig { wrap_policy: WrapPolicy::Clip, ..unit_model() };
        let mut far = flow(200.0, vec![200.0]);
        far.destination_point = MapPoint::new(40.0, 0.0); // 8 ticks
        let table = TimetableBuilder::new(&sim, &model).unwrap().build(&[far]).unwrap();

        assert_eq!(table.len(), 200);
        for trip in table.trips() {
            assert!(!trip.wraps());
            assert_eq!(trip.arrival, Tick((trip.departure.0 + 8).min(9)));
        }
    }

    #[test]
    fn drop_policy_discards_overflowing_trips() {
        let sim = small_config(10, 1, false);
        let model = ModelConfig { wrap_policy: WrapPolicy::Drop, ..unit_model() };
        let mut far = flow(200.0, vec![200.0]);
        far.destination_point = MapPoint::new(40.0, 0.0);
        let table = TimetableBuilder::new(&sim, &model).unwrap().build(&[far]).unwrap();

        assert!(table.len() < 200);
        assert_eq!(table.summary.departures, 200);
        assert!(table.trips().iter().all(|t| t.departure.0 <= 1));
    }

    #[test]
    fn saturated_travel_time_stays_in_horizon() {
        let sim = small_config(100, 1, false);
        let record = flow(50.0, vec![50.0]);
        let mut rng = FlowRng::new(3, 0);

        let wrapped = TripSampler::new(&sim, &unit_model())
            .sample(&record, u64::MAX, 50, &mut rng)
            .unwrap();
        assert_eq!(wrapped.len(), 50);
        for trip in &wrapped {
            assert_eq!(trip.arrival.0, (trip.departure.0 + u64::MAX % 100) % 100);
        }

        let clip = ModelConfig { wrap_policy: WrapPolicy::Clip, ..unit_model() };
        let clipped = TripSampler::new(&sim, &clip).sample(&record, u64::MAX, 50, &mut rng).unwrap();
        assert!(clipped.iter().all(|t| t.arrival == Tick(99)));

        let drop = ModelConfig { wrap_policy: WrapPolicy::Drop, ..unit_model() };
        let dropped = TripSampler::new(&sim, &drop).sample(&record, u64::MAX, 50, &mut rng).unwrap();
        assert!(dropped.is_empty());
    }
}

#[cfg(test)]
mod trips {
    use fl_core::Tick;

    use crate::{Category, Trip};

    fn trip(departure: u64, arrival: u64) -> Trip {
        Trip {
            origin:      fl_core::CityId(0),
            destination: fl_core::CityId(1),
            departure:   Tick(departure),
            arrival:     Tick(arrival),
            category:    Category(1),
            naval:       false,
        }
    }

    #[test]
    fn plain_trip_activity_and_progress() {
        let t = trip(10, 20);
        assert!(!t.is_active_at(Tick(9)));
        assert_eq!(t.progress_at(Tick(10), 100), Some(0.0));
        assert_eq!(t.progress_at(Tick(15), 100), Some(0.5));
        assert_eq!(t.progress_at(Tick(20), 100), Some(1.0));
        assert_eq!(t.progress_at(Tick(21), 100), None);
    }

    #[test]
    fn wrapped_trip_spans_the_horizon_end() {
        let t = trip(98, 2);
        assert!(t.wraps());
        assert_eq!(t.duration(100), 4);
        assert!(t.is_active_at(Tick(99)));
        assert!(t.is_active_at(Tick(1)));
        assert!(!t.is_active_at(Tick(50)));
        assert_eq!(t.progress_at(Tick(0), 100), Some(0.5));
    }

    #[test]
    fn category_slots_and_naval_half() {
        assert_eq!(Category::from_slot(0), Some(Category(1)));
        assert_eq!(Category::from_slot(65_534), Some(Category(u16::MAX)));
        assert_eq!(Category::from_slot(65_535), None);
        assert_eq!(Category(3).slot(), 2);
        assert!(Category(11).is_naval(10));
        assert!(!Category(10).is_naval(10));
    }
}

#[cfg(test)]
mod io {
    use std::io::Cursor;

    use chrono::NaiveDate;
    use fl_core::{CityId, CityTable, FlError, TimeGrid};

    use super::*;
    use crate::{
        TimetableBuilder, TimetableError, load_flows_csv, load_flows_reader, write_timetable_csv,
        write_timetable_writer,
    };

    const FLOWS_CSV: &str = "\
from_city,from_longitude,from_latitude,to_city,to_longitude,to_latitude,flux,land,sea\n\
Gleiwitz,18.67,50.29,Breslau,17.03,51.11,120.0,100.0,20.0\n\
Essen,7.01,51.45,Hamburg,9.99,53.55,80.0,0.0,80.0\n\
Breslau,17.03,51.11,Stettin,14.55,53.43,0.0,0.0,0.0\n\
";

    #[test]
    fn loads_rows_and_interns_cities() {
        let (flows, cities) = load_flows_reader(Cursor::new(FLOWS_CSV), 2).unwrap();
        assert_eq!(flows.len(), 3);
        assert_eq!(cities.len(), 5);
        assert_eq!(flows[0].origin, cities.get("Gleiwitz").unwrap());
        assert_eq!(flows[2].origin, flows[0].destination, "Breslau interned once");
        assert_eq!(flows[1].origin_point, MapPoint::new(7.01, 51.45));
        assert_eq!(flows[1].sub_volumes, vec![0.0, 80.0]);
    }

    #[test]
    fn wrong_column_count_is_a_parse_error() {
        let err = load_flows_reader(Cursor::new(FLOWS_CSV), 3).unwrap_err();
        assert!(matches!(err, TimetableError::Parse(_)));
    }

    #[test]
    fn non_numeric_field_reports_line() {
        let csv = "a,b,c,d,e,f,g,h\nX,1,2,Y,3,4,oops,5\n";
        match load_flows_reader(Cursor::new(csv), 1) {
            Err(TimetableError::Parse(msg)) => assert!(msg.contains("line 2"), "{msg}"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_flows_csv(std::path::Path::new("/nonexistent/flows.csv"), 2).unwrap_err();
        assert!(matches!(err, TimetableError::Io(_)));
    }

    #[test]
    fn timetable_export_has_one_row_per_trip() {
        let (flows, cities) = load_flows_reader(Cursor::new(FLOWS_CSV), 2).unwrap();
        let sim = small_config(1_000, 1, true);
        let table = TimetableBuilder::new(&sim, &ModelConfig::default())
            .unwrap()
            .build(&flows)
            .unwrap();
        assert!(!table.is_empty());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timetable.csv");
        let start = NaiveDate::from_ymd_opt(1881, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let grid = TimeGrid::new(start, 300, 1_000);
        write_timetable_csv(&path, table.trips(), &cities, &grid).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers[0], "from_city");
        assert_eq!(headers[7], "is_naval");
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), table.len());

        let first = &table.trips()[0];
        assert_eq!(&rows[0][0], cities.name(first.origin).unwrap());
        assert_eq!(&rows[0][2], first.departure.0.to_string());
        assert_eq!(&rows[0][4], grid.timestamp(first.departure).to_string());
        assert_ne!(first.origin, CityId::INVALID);
    }

    #[test]
    fn export_rejects_unknown_city() {
        let (flows, _) = load_flows_reader(Cursor::new(FLOWS_CSV), 2).unwrap();
        let sim = small_config(1_000, 1, true);
        let table = TimetableBuilder::new(&sim, &ModelConfig::default()).unwrap().build(&flows).unwrap();
        let start = NaiveDate::from_ymd_opt(1881, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let grid = TimeGrid::new(start, 300, 1_000);

        let err = write_timetable_writer(Vec::new(), table.trips(), &CityTable::default(), &grid).unwrap_err();
        assert!(matches!(err, TimetableError::Core(FlError::CityNotFound(_))), "{err}");
    }
}
