//! timelapse — freight flows to a numbered PNG sequence.
//!
//! Loads an aggregate flow table, samples a timetable of individual trips,
//! and renders one frame per simulation tick into the output directory.
//! Interrupted runs can be restarted with `--resume`; frames already on
//! disk are kept.
//!
//! ```text
//! RUST_LOG=info timelapse --flows flows.csv --config run.json --end 2000
//! ffmpeg -framerate 30 -i png/frame_%06d.png timelapse.mp4
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;
use serde::Deserialize;

use fl_core::SimConfig;
use fl_render::{
    Blocking, DotRenderer, FrameClock, FrameStore, LogObserver, RenderConfig, ResumableBatchDriver,
    SharedTables,
};
use fl_timetable::{ModelConfig, TimetableBuilder, load_flows_csv, write_timetable_csv};

/// Log a progress line every this many frames.
const PROGRESS_EVERY: u64 = 100;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "timelapse", about = "Render a freight flow timelapse")]
struct Args {
    /// Flow table CSV.
    #[arg(long)]
    flows: PathBuf,

    /// JSON run configuration (`sim`, `model`, `render` sections; all optional).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory for frames; overrides `render.output_dir`.
    #[arg(long)]
    out: Option<PathBuf>,

    /// First frame index.
    #[arg(long, default_value_t = 0)]
    begin: u64,

    /// One past the last frame index.  Defaults to the horizon length.
    #[arg(long)]
    end: Option<u64>,

    /// Start at the first missing frame in `begin..end`.
    #[arg(long)]
    resume: bool,

    /// Also write the sampled timetable to this CSV.
    #[arg(long)]
    timetable: Option<PathBuf>,
}

// ── Run configuration ─────────────────────────────────────────────────────────

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
struct RunConfig {
    sim:    SimConfig,
    model:  ModelConfig,
    render: RenderConfig,
}

impl RunConfig {
    fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = RunConfig::load(args.config.as_deref())?;
    if let Some(out) = args.out {
        config.render.output_dir = out;
    }
    config.sim.validate()?;
    config.render.validate()?;

    // 1. Flow table.
    let started = Instant::now();
    let (flows, cities) = load_flows_csv(&args.flows, config.sim.category_slots())
        .with_context(|| format!("loading {}", args.flows.display()))?;
    info!("loaded {} flow records between {} cities", flows.len(), cities.len());

    // 2. Timetable.
    let timetable = TimetableBuilder::new(&config.sim, &config.model)?.build(&flows)?;
    info!(
        "sampled {} trips ({} wrapped) in {:.2?}",
        timetable.len(),
        timetable.summary.wrapped,
        started.elapsed()
    );
    let grid = config.sim.make_grid();
    if let Some(path) = &args.timetable {
        write_timetable_csv(path, timetable.trips(), &cities, &grid)?;
        info!("timetable written to {}", path.display());
    }

    // 3. Frames.
    let clock = FrameClock::new(grid);
    let end = args.end.unwrap_or(clock.frame_count());
    if args.begin > end {
        bail!("--begin {} is past --end {end}", args.begin);
    }
    let store = FrameStore::from_config(&config.render)?;
    let begin = if args.resume { store.resume_point(args.begin..end) } else { args.begin };
    if begin == end {
        info!("frames {}..{end} already complete", args.begin);
        return Ok(());
    }

    let renderer = Blocking::new(DotRenderer::new(&config.render, config.sim.horizon_ticks)?);
    let tables = SharedTables::new(timetable.trips, flows);
    let mut driver = ResumableBatchDriver::new(renderer, clock, store, &config.render);
    let mut observer = LogObserver::new(PROGRESS_EVERY);

    let rt = tokio::runtime::Builder::new_current_thread().enable_time().build()?;
    let result = rt.block_on(driver.run(begin..end, &tables, &mut observer));
    // A timed-out blocking render may still be running; do not wait for it.
    rt.shutdown_background();
    let report = result?;

    let missing = driver.store().missing(args.begin..end);
    if !missing.is_empty() {
        bail!("{} frames missing in {}..{end}, first {}", missing.len(), args.begin, missing[0]);
    }
    info!(
        "{} frames in {:.2?} ({} stalls)",
        report.frames,
        started.elapsed(),
        report.stalls
    );
    Ok(())
}
