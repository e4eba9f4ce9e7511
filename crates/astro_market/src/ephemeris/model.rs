use crate::ephemeris::types::{CelestialBody, ChartPositions, PlanetPosition};
use crate::error::{MarketError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Linear motion of one body: longitude on the reference date plus a
/// constant daily rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMotion {
    pub base_lon: f64,
    pub daily_motion: f64,
}

/// Settings for the linear position model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisSettings {
    pub reference_date: NaiveDate,
    pub motions: BTreeMap<CelestialBody, BodyMotion>,
}

// (body, longitude on 2025-01-01, degrees per day)
const DEFAULT_MOTIONS: &[(CelestialBody, f64, f64)] = &[
    (CelestialBody::Sun, 279.5, 0.9856),
    (CelestialBody::Moon, 145.2, 13.1764),
    (CelestialBody::Mercury, 285.1, 1.383),
    (CelestialBody::Venus, 320.7, 1.202),
    (CelestialBody::Mars, 295.3, 0.524),
    (CelestialBody::Jupiter, 42.8, 0.083),
    (CelestialBody::Saturn, 332.1, 0.034),
    (CelestialBody::Rahu, 15.4, -0.053),
    (CelestialBody::Ketu, 195.4, -0.053),
];

impl Default for EphemerisSettings {
    fn default() -> Self {
        let motions = DEFAULT_MOTIONS
            .iter()
            .map(|&(body, base_lon, daily_motion)| {
                (
                    body,
                    BodyMotion {
                        base_lon,
                        daily_motion,
                    },
                )
            })
            .collect();
        Self {
            reference_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
            motions,
        }
    }
}

impl EphemerisSettings {
    pub fn validate(&self) -> Result<()> {
        for (body, motion) in &self.motions {
            if !motion.base_lon.is_finite() || !motion.daily_motion.is_finite() {
                return Err(MarketError::InvalidSetting {
                    field: format!("ephemeris.{}", body.name().to_lowercase()),
                    message: "base and rate must be finite".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let mut normalized = value % 360.0;
    if normalized < 0.0 {
        normalized += 360.0;
    }
    // -1e-14 + 360.0 rounds to 360.0
    if normalized >= 360.0 {
        normalized = 0.0;
    }
    normalized
}

/// Synthetic ephemeris: every longitude is a linear function of the number
/// of days elapsed since the reference date.
#[derive(Debug, Clone, Default)]
pub struct LinearEphemeris {
    settings: EphemerisSettings,
}

impl LinearEphemeris {
    pub fn new(settings: EphemerisSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EphemerisSettings {
        &self.settings
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.settings.reference_date
    }

    /// Longitude of one body, `None` if the body has no motion entry.
    pub fn longitude(&self, body: CelestialBody, date: NaiveDate) -> Option<f64> {
        let motion = self.settings.motions.get(&body)?;
        let days = (date - self.settings.reference_date).num_days() as f64;
        Some(normalize_degrees(motion.base_lon + motion.daily_motion * days))
    }

    /// Days needed for a body to travel a full circle.
    pub fn period_days(&self, body: CelestialBody) -> Option<f64> {
        let rate = self.settings.motions.get(&body)?.daily_motion.abs();
        if rate == 0.0 {
            None
        } else {
            Some(360.0 / rate)
        }
    }

    /// Positions of every configured body on `date`.
    pub fn calc_positions(&self, date: NaiveDate) -> ChartPositions {
        let mut positions = ChartPositions::new(date);
        for (&body, motion) in &self.settings.motions {
            if let Some(lon) = self.longitude(body, date) {
                positions.planets.insert(
                    body,
                    PlanetPosition {
                        lon,
                        speed_lon: motion.daily_motion,
                        retrograde: motion.daily_motion < 0.0,
                    },
                );
            }
        }
        positions
    }
}
