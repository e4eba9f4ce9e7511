use crate::ephemeris::CelestialBody;
use crate::error::{MarketError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The five canonical aspects, in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AspectType {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectType {
    pub const ALL: [AspectType; 5] = [
        AspectType::Conjunction,
        AspectType::Sextile,
        AspectType::Square,
        AspectType::Trine,
        AspectType::Opposition,
    ];

    /// Exact angle for this aspect
    pub fn angle(self) -> f64 {
        match self {
            AspectType::Conjunction => 0.0,
            AspectType::Sextile => 60.0,
            AspectType::Square => 90.0,
            AspectType::Trine => 120.0,
            AspectType::Opposition => 180.0,
        }
    }

    pub fn default_orb(self) -> f64 {
        match self {
            AspectType::Sextile => 6.0,
            _ => 8.0,
        }
    }

    pub fn is_harmonious(self) -> bool {
        matches!(self, AspectType::Trine | AspectType::Sextile)
    }

    pub fn is_challenging(self) -> bool {
        matches!(self, AspectType::Square | AspectType::Opposition)
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectType::Conjunction => "Conjunction",
            AspectType::Sextile => "Sextile",
            AspectType::Square => "Square",
            AspectType::Trine => "Trine",
            AspectType::Opposition => "Opposition",
        }
    }
}

impl fmt::Display for AspectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How tight an aspect is, by distance from the exact angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectStrength {
    Exact,
    Close,
    Wide,
}

impl AspectStrength {
    pub fn from_orb(orb: f64) -> Self {
        if orb <= 2.0 {
            AspectStrength::Exact
        } else if orb <= 4.0 {
            AspectStrength::Close
        } else {
            AspectStrength::Wide
        }
    }

    /// Weight applied to an aspect's contribution in the daily score.
    pub fn multiplier(self) -> f64 {
        match self {
            AspectStrength::Exact => 1.0,
            AspectStrength::Close => 0.8,
            AspectStrength::Wide => 0.5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectStrength::Exact => "Exact",
            AspectStrength::Close => "Close",
            AspectStrength::Wide => "Wide",
        }
    }
}

impl fmt::Display for AspectStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Core aspect information
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectCore {
    pub aspect_type: AspectType,
    /// Minimal angular separation of the pair, in [0, 180]
    pub separation: f64,
    /// Deviation from the exact angle
    pub orb: f64,
    pub strength: AspectStrength,
}

/// An aspect between two bodies. `from` always precedes `to` in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub from: CelestialBody,
    pub to: CelestialBody,
    #[serde(flatten)]
    pub aspect: AspectCore,
}

impl Aspect {
    pub fn aspect_type(&self) -> AspectType {
        self.aspect.aspect_type
    }

    pub fn strength(&self) -> AspectStrength {
        self.aspect.strength
    }

    pub fn involves(&self, body: CelestialBody) -> bool {
        self.from == body || self.to == body
    }

    /// The partner of `body` in this aspect.
    pub fn other(&self, body: CelestialBody) -> Option<CelestialBody> {
        if self.from == body {
            Some(self.to)
        } else if self.to == body {
            Some(self.from)
        } else {
            None
        }
    }

    pub fn involves_benefic(&self) -> bool {
        self.from.is_benefic() || self.to.is_benefic()
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({}, orb {:.1}°)",
            self.from, self.aspect.aspect_type, self.to, self.aspect.strength, self.aspect.orb
        )
    }
}

/// Orb tolerance per aspect type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectSettings {
    pub orbs: BTreeMap<AspectType, f64>,
}

impl Default for AspectSettings {
    fn default() -> Self {
        Self {
            orbs: AspectType::ALL
                .iter()
                .map(|&aspect| (aspect, aspect.default_orb()))
                .collect(),
        }
    }
}

impl AspectSettings {
    pub fn orb_for(&self, aspect: AspectType) -> f64 {
        self.orbs
            .get(&aspect)
            .copied()
            .unwrap_or_else(|| aspect.default_orb())
    }

    pub fn validate(&self) -> Result<()> {
        for (aspect, orb) in &self.orbs {
            if !orb.is_finite() || *orb < 0.0 {
                return Err(MarketError::InvalidOrb {
                    aspect: aspect.name().to_string(),
                    orb: *orb,
                });
            }
        }
        Ok(())
    }
}
