//! Nakshatra utilities for Vedic astrology.
//!
//! Nakshatras are 27 lunar mansions, each spanning 13°20' (360/27 degrees).
//! Each nakshatra is divided into 4 padas (quarters).

use crate::ephemeris::{normalize_degrees, CelestialBody};
use crate::error::MarketError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const NAKSHATRA_SEGMENT_SIZE: f64 = 360.0 / 27.0;
pub const PADA_SIZE: f64 = NAKSHATRA_SEGMENT_SIZE / 4.0;

// (display name, planetary lord)
const NAKSHATRA_ORDER: &[(&str, CelestialBody)] = &[
    ("Ashwini", CelestialBody::Ketu),
    ("Bharani", CelestialBody::Venus),
    ("Krittika", CelestialBody::Sun),
    ("Rohini", CelestialBody::Moon),
    ("Mrigashira", CelestialBody::Mars),
    ("Ardra", CelestialBody::Rahu),
    ("Punarvasu", CelestialBody::Jupiter),
    ("Pushya", CelestialBody::Saturn),
    ("Ashlesha", CelestialBody::Mercury),
    ("Magha", CelestialBody::Ketu),
    ("Purva Phalguni", CelestialBody::Venus),
    ("Uttara Phalguni", CelestialBody::Sun),
    ("Hasta", CelestialBody::Moon),
    ("Chitra", CelestialBody::Mars),
    ("Swati", CelestialBody::Rahu),
    ("Vishakha", CelestialBody::Jupiter),
    ("Anuradha", CelestialBody::Saturn),
    ("Jyeshtha", CelestialBody::Mercury),
    ("Mula", CelestialBody::Ketu),
    ("Purva Ashadha", CelestialBody::Venus),
    ("Uttara Ashadha", CelestialBody::Sun),
    ("Shravana", CelestialBody::Moon),
    ("Dhanishta", CelestialBody::Mars),
    ("Shatabhisha", CelestialBody::Rahu),
    ("Purva Bhadrapada", CelestialBody::Jupiter),
    ("Uttara Bhadrapada", CelestialBody::Saturn),
    ("Revati", CelestialBody::Mercury),
];

/// One of the 27 nakshatras, identified by its zero-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Nakshatra(u8);

impl Nakshatra {
    pub const COUNT: usize = 27;

    pub fn from_index(index: usize) -> Nakshatra {
        Nakshatra((index % Self::COUNT) as u8)
    }

    /// Nakshatra containing `longitude`, with floor semantics at boundaries.
    pub fn from_longitude(longitude: f64) -> Nakshatra {
        let lon = normalize_degrees(longitude);
        Nakshatra::from_index((lon / NAKSHATRA_SEGMENT_SIZE).floor() as usize)
    }

    pub fn all() -> impl Iterator<Item = Nakshatra> {
        (0..Self::COUNT).map(Nakshatra::from_index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn name(self) -> &'static str {
        NAKSHATRA_ORDER[self.index()].0
    }

    pub fn lord(self) -> CelestialBody {
        NAKSHATRA_ORDER[self.index()].1
    }

    pub fn start_degree(self) -> f64 {
        self.index() as f64 * NAKSHATRA_SEGMENT_SIZE
    }

    pub fn end_degree(self) -> f64 {
        self.start_degree() + NAKSHATRA_SEGMENT_SIZE
    }
}

impl fmt::Display for Nakshatra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Nakshatra> for String {
    fn from(value: Nakshatra) -> Self {
        value.name().to_string()
    }
}

impl FromStr for Nakshatra {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        NAKSHATRA_ORDER
            .iter()
            .position(|(name, _)| name.eq_ignore_ascii_case(wanted))
            .map(Nakshatra::from_index)
            .ok_or_else(|| MarketError::UnknownNakshatra(s.to_string()))
    }
}

impl TryFrom<String> for Nakshatra {
    type Error = MarketError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NakshatraPlacement {
    pub longitude: f64,
    pub nakshatra: Nakshatra,
    pub lord: CelestialBody,
    pub pada: u8,
    #[serde(rename = "padaFraction")]
    pub pada_fraction: f64,
}

/// Shorthand for [`Nakshatra::from_longitude`].
pub fn nakshatra_of(longitude: f64) -> Nakshatra {
    Nakshatra::from_longitude(longitude)
}

/// Nakshatra, lord and pada for the given longitude.
pub fn nakshatra_placement(longitude: f64) -> NakshatraPlacement {
    let lon = normalize_degrees(longitude);
    let nakshatra = Nakshatra::from_longitude(lon);
    let offset = (lon - nakshatra.start_degree()).max(0.0);
    let pada = ((offset / PADA_SIZE).floor() as u8).min(3) + 1;
    let pada_offset = offset - (pada - 1) as f64 * PADA_SIZE;

    NakshatraPlacement {
        longitude: lon,
        nakshatra,
        lord: nakshatra.lord(),
        pada,
        pada_fraction: pada_offset / PADA_SIZE,
    }
}
