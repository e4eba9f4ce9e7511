use crate::aspects::AspectSettings;
use crate::ephemeris::EphemerisSettings;
use crate::error::Result;
use crate::sentiment::{OutcomeOverrides, ScoringSettings};
use crate::timeline::TimelineSettings;
use serde::{Deserialize, Serialize};

/// Everything the analyzer needs, one section per pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerSettings {
    pub ephemeris: EphemerisSettings,
    pub aspects: AspectSettings,
    pub scoring: ScoringSettings,
    pub timeline: TimelineSettings,
    #[serde(default)]
    pub overrides: OutcomeOverrides,
}

impl AnalyzerSettings {
    pub fn validate(&self) -> Result<()> {
        self.ephemeris.validate()?;
        self.aspects.validate()?;
        self.scoring.validate()?;
        self.timeline.validate()?;
        self.overrides.validate()?;
        Ok(())
    }
}
