//! Built-in PNG renderer: routes as faint lines, vehicles as coloured dots.
//!
//! This stands in for a full map renderer.  It draws no basemap and no
//! text; its job is to make the simulated traffic visible frame by frame.

use std::io::Cursor;

use fl_core::MapPoint;
use fl_timetable::Category;
use image::{ImageOutputFormat, Rgb, RgbImage};

use crate::{
    BlockingRenderer, CityAtlas, FrameTask, RenderConfig, RenderError, RenderFault, RenderResult,
    SharedTables, active_trips,
};

const BACKGROUND: Rgb<u8> = Rgb([16, 20, 28]);
const ROUTE:      Rgb<u8> = Rgb([48, 56, 72]);
const CITY:       Rgb<u8> = Rgb([200, 200, 200]);

/// Pixels kept free around the fitted bounding box.
const MARGIN: f64 = 24.0;

// ── Palette ───────────────────────────────────────────────────────────────────

/// Category colours.  Naval categories reuse the land colours in order.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette(Vec<Rgb<u8>>);

impl Palette {
    /// Parse `#RRGGBB` strings (the `#` is optional).
    pub fn parse(colours: &[String]) -> RenderResult<Self> {
        if colours.is_empty() {
            return Err(RenderError::Config("palette is empty".into()));
        }
        colours.iter().map(|c| parse_hex(c)).collect::<RenderResult<Vec<_>>>().map(Palette)
    }

    pub fn colour(&self, category: Category) -> Rgb<u8> {
        self.0[category.slot() % self.0.len()]
    }
}

fn parse_hex(colour: &str) -> RenderResult<Rgb<u8>> {
    let hex = colour.trim().trim_start_matches('#');
    let bad = || RenderError::Config(format!("{colour:?} is not a #RRGGBB colour"));
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(bad());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Map → pixel transform preserving aspect ratio, latitude pointing up.
struct Viewport {
    origin: MapPoint,
    scale:  f64,
    height: u32,
}

impl Viewport {
    fn fit(atlas: &CityAtlas, width: u32, height: u32) -> Option<Viewport> {
        let (lo, hi) = atlas.bounds()?;
        let span_x = (hi.x - lo.x).max(1e-9);
        let span_y = (hi.y - lo.y).max(1e-9);
        let usable_x = (width as f64 - 2.0 * MARGIN).max(1.0);
        let usable_y = (height as f64 - 2.0 * MARGIN).max(1.0);
        Some(Viewport {
            origin: lo,
            scale:  (usable_x / span_x).min(usable_y / span_y),
            height,
        })
    }

    fn project(&self, p: MapPoint) -> (i64, i64) {
        let x = MARGIN + (p.x - self.origin.x) * self.scale;
        let y = self.height as f64 - MARGIN - (p.y - self.origin.y) * self.scale;
        (x.round() as i64, y.round() as i64)
    }
}

// ── DotRenderer ───────────────────────────────────────────────────────────────

pub struct DotRenderer {
    width:   u32,
    height:  u32,
    horizon: u64,
    palette: Palette,
}

impl DotRenderer {
    pub fn new(config: &RenderConfig, horizon: u64) -> RenderResult<Self> {
        config.validate()?;
        Ok(Self {
            width: config.width,
            height: config.height,
            horizon,
            palette: Palette::parse(&config.palette)?,
        })
    }

    /// Draw one frame into a raw image.
    pub fn draw(&self, frame: &FrameTask, tables: &SharedTables) -> RgbImage {
        let mut img = RgbImage::from_pixel(self.width, self.height, BACKGROUND);
        let atlas = CityAtlas::from_flows(&tables.flows);
        let Some(view) = Viewport::fit(&atlas, self.width, self.height) else {
            return img;
        };

        for flow in tables.flows.iter() {
            let a = view.project(flow.origin_point);
            let b = view.project(flow.destination_point);
            draw_segment(&mut img, a, b, ROUTE);
        }
        for city in atlas.points() {
            draw_square(&mut img, view.project(city), 1, CITY);
        }
        for trip in active_trips(&tables.trips, frame.tick, self.horizon, &atlas) {
            let radius = if trip.naval { 2 } else { 1 };
            draw_square(&mut img, view.project(trip.position), radius, self.palette.colour(trip.category));
        }
        img
    }
}

impl BlockingRenderer for DotRenderer {
    fn render_blocking(&self, frame: &FrameTask, tables: &SharedTables) -> Result<Vec<u8>, RenderFault> {
        let img = self.draw(frame, tables);
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
        Ok(bytes)
    }
}

// ── Pixel helpers ─────────────────────────────────────────────────────────────

fn put(img: &mut RgbImage, x: i64, y: i64, colour: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, colour);
    }
}

fn draw_square(img: &mut RgbImage, (cx, cy): (i64, i64), radius: i64, colour: Rgb<u8>) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            put(img, cx + dx, cy + dy, colour);
        }
    }
}

fn draw_segment(img: &mut RgbImage, (x0, y0): (i64, i64), (x1, y1): (i64, i64), colour: Rgb<u8>) {
    let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1);
    for s in 0..=steps {
        let t = s as f64 / steps as f64;
        let x = x0 as f64 + (x1 - x0) as f64 * t;
        let y = y0 as f64 + (y1 - y0) as f64 * t;
        put(img, x.round() as i64, y.round() as i64, colour);
    }
}
