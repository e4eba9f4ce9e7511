use crate::error::MarketError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The nine tracked bodies. Declaration order is the canonical order used
/// for every iteration in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CelestialBody {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Rahu,
    Ketu,
}

/// Natural grouping of a body, which selects its scoring table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nature {
    Benefic,
    Malefic,
    Node,
    Neutral,
}

impl CelestialBody {
    pub const ALL: [CelestialBody; 9] = [
        CelestialBody::Sun,
        CelestialBody::Moon,
        CelestialBody::Mercury,
        CelestialBody::Venus,
        CelestialBody::Mars,
        CelestialBody::Jupiter,
        CelestialBody::Saturn,
        CelestialBody::Rahu,
        CelestialBody::Ketu,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CelestialBody::Sun => "Sun",
            CelestialBody::Moon => "Moon",
            CelestialBody::Mercury => "Mercury",
            CelestialBody::Venus => "Venus",
            CelestialBody::Mars => "Mars",
            CelestialBody::Jupiter => "Jupiter",
            CelestialBody::Saturn => "Saturn",
            CelestialBody::Rahu => "Rahu",
            CelestialBody::Ketu => "Ketu",
        }
    }

    pub fn nature(self) -> Nature {
        match self {
            CelestialBody::Jupiter | CelestialBody::Venus => Nature::Benefic,
            CelestialBody::Mars | CelestialBody::Saturn => Nature::Malefic,
            CelestialBody::Rahu | CelestialBody::Ketu => Nature::Node,
            CelestialBody::Sun | CelestialBody::Moon | CelestialBody::Mercury => Nature::Neutral,
        }
    }

    pub fn is_benefic(self) -> bool {
        self.nature() == Nature::Benefic
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CelestialBody {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CelestialBody::ALL
            .iter()
            .copied()
            .find(|body| body.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MarketError::UnknownBody(s.to_string()))
    }
}

/// Position of one body on one date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    /// Longitude in degrees [0, 360)
    pub lon: f64,
    /// Speed in longitude (degrees per day)
    pub speed_lon: f64,
    /// Whether the body moves backwards through the zodiac
    pub retrograde: bool,
}

/// Positions of all bodies for a single date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPositions {
    pub date: NaiveDate,
    pub planets: BTreeMap<CelestialBody, PlanetPosition>,
}

impl ChartPositions {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            planets: BTreeMap::new(),
        }
    }

    /// Build from bare longitudes; speeds are left at zero.
    pub fn from_longitudes(date: NaiveDate, longitudes: &[(CelestialBody, f64)]) -> Self {
        let planets = longitudes
            .iter()
            .map(|&(body, lon)| {
                (
                    body,
                    PlanetPosition {
                        lon,
                        speed_lon: 0.0,
                        retrograde: false,
                    },
                )
            })
            .collect();
        Self { date, planets }
    }

    pub fn longitude(&self, body: CelestialBody) -> Option<f64> {
        self.planets.get(&body).map(|p| p.lon)
    }

    /// `(body, longitude)` pairs in canonical body order.
    pub fn longitudes(&self) -> Vec<(CelestialBody, f64)> {
        self.planets.iter().map(|(body, p)| (*body, p.lon)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body_case_insensitive() {
        assert_eq!("jupiter".parse::<CelestialBody>().unwrap(), CelestialBody::Jupiter);
        assert_eq!(" KETU ".parse::<CelestialBody>().unwrap(), CelestialBody::Ketu);
        assert!(matches!(
            "Pluto".parse::<CelestialBody>(),
            Err(MarketError::UnknownBody(_))
        ));
    }

    #[test]
    fn test_canonical_order_matches_ord() {
        let mut sorted = CelestialBody::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, CelestialBody::ALL.to_vec());
    }
}
