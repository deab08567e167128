//! Planar map coordinates.
//!
//! Positions are kept in the map projection's degrees and every distance is
//! a flat Euclidean one.  The travel-time model converts degrees to
//! kilometres with a single constant; no great-circle correction is applied.

/// A point on the map: `x` is longitude, `y` is latitude.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

impl MapPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in map degrees.
    #[inline]
    pub fn planar_distance(self, other: MapPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point at fraction `t` along the segment `self → other`.
    ///
    /// `t` is not clamped; `0.0` yields `self` and `1.0` yields `other`.
    #[inline]
    pub fn lerp(self, other: MapPoint, t: f64) -> MapPoint {
        MapPoint {
            x: self.x * (1.0 - t) + other.x * t,
            y: self.y * (1.0 - t) + other.y * t,
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::fmt::Display for MapPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}
