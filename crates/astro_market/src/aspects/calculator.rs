use crate::aspects::types::{Aspect, AspectCore, AspectSettings, AspectStrength, AspectType};
use crate::ephemeris::{CelestialBody, ChartPositions};

/// Minimal angular separation between two longitudes, in [0, 180].
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let diff = (lon1 - lon2).abs() % 360.0;
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Aspect calculator
#[derive(Debug, Clone, Default)]
pub struct AspectCalculator {
    settings: AspectSettings,
}

impl AspectCalculator {
    pub fn new(settings: AspectSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AspectSettings {
        &self.settings
    }

    /// Compute aspects between every pair of bodies in the chart
    pub fn compute_aspects(&self, positions: &ChartPositions) -> Vec<Aspect> {
        self.compute_aspects_for(&positions.longitudes())
    }

    /// Compute aspects for an ordered list of bodies. Pairs are visited in
    /// list order (outer i, inner j > i) and, for each pair, in aspect
    /// enumeration order; callers that take a prefix rely on this order.
    pub fn compute_aspects_for(&self, longitudes: &[(CelestialBody, f64)]) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for i in 0..longitudes.len() {
            for j in (i + 1)..longitudes.len() {
                let (from, lon1) = longitudes[i];
                let (to, lon2) = longitudes[j];
                for aspect in self.calculate_aspects(lon1, lon2) {
                    aspects.push(Aspect { from, to, aspect });
                }
            }
        }
        log::debug!(
            "{} aspects across {} bodies",
            aspects.len(),
            longitudes.len()
        );
        aspects
    }

    /// Every aspect formed by two longitudes. More than one entry only
    /// when the orbs of neighbouring aspects overlap.
    pub fn calculate_aspects(&self, lon1: f64, lon2: f64) -> Vec<AspectCore> {
        let separation = angular_separation(lon1, lon2);
        AspectType::ALL
            .iter()
            .filter_map(|&aspect_type| {
                let orb = (separation - aspect_type.angle()).abs();
                (orb <= self.settings.orb_for(aspect_type)).then(|| AspectCore {
                    aspect_type,
                    separation,
                    orb,
                    strength: AspectStrength::from_orb(orb),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angular_separation_wraps() {
        assert_eq!(angular_separation(10.0, 350.0), 20.0);
        assert_eq!(angular_separation(0.0, 180.0), 180.0);
        assert_eq!(angular_separation(100.0, 100.0), 0.0);
    }

    #[test]
    fn test_overlapping_orbs_yield_two_aspects() {
        let mut settings = AspectSettings::default();
        settings.orbs.insert(AspectType::Sextile, 20.0);
        settings.orbs.insert(AspectType::Square, 20.0);
        let calculator = AspectCalculator::new(settings);
        let found: Vec<AspectType> = calculator
            .calculate_aspects(0.0, 75.0)
            .into_iter()
            .map(|a| a.aspect_type)
            .collect();
        assert_eq!(found, vec![AspectType::Sextile, AspectType::Square]);
    }
}
