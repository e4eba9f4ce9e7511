//! Daily sentiment scoring.
//!
//! The score is accumulated in three passes (body dignities, the leading
//! aspects, weekday bias) and every contribution is logged as a factor
//! string in the order it was applied.

use crate::aspects::{Aspect, AspectType};
use crate::ephemeris::{CelestialBody, Nature};
use crate::error::{MarketError, Result};
use crate::sentiment::types::{format_delta, SentimentLabel, SentimentResult};
use crate::vedic::{weekday_lord, Dignity};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Score bias per day of the week
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeekdayBias {
    pub monday: f64,
    pub tuesday: f64,
    pub wednesday: f64,
    pub thursday: f64,
    pub friday: f64,
    pub saturday: f64,
    pub sunday: f64,
}

impl Default for WeekdayBias {
    fn default() -> Self {
        Self {
            monday: -0.5,
            tuesday: -1.0,
            wednesday: 0.0,
            thursday: 1.0,
            friday: 0.5,
            saturday: 0.0,
            sunday: 0.0,
        }
    }
}

impl WeekdayBias {
    pub fn for_weekday(&self, weekday: Weekday) -> f64 {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn weekday_theme(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "emotional volatility",
        Weekday::Tue => "aggressive trading",
        Weekday::Wed => "quick reversals",
        Weekday::Thu => "optimistic trading",
        Weekday::Fri => "favorable for gains",
        Weekday::Sat => "restrictive mood",
        Weekday::Sun => "thin participation",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringSettings {
    /// Only this many aspects, in detector order, are scored
    pub aspect_limit: usize,
    /// Base weight of a trine or sextile
    pub harmonious_weight: f64,
    /// Base weight of a square or opposition (applied negatively)
    pub challenging_weight: f64,
    /// Base weight of a conjunction; positive when a benefic is involved
    pub conjunction_weight: f64,
    pub weekday_bias: WeekdayBias,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            aspect_limit: 8,
            harmonious_weight: 1.0,
            challenging_weight: 1.0,
            conjunction_weight: 0.5,
            weekday_bias: WeekdayBias::default(),
        }
    }
}

impl ScoringSettings {
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("sentiment.harmonious_weight", self.harmonious_weight),
            ("sentiment.challenging_weight", self.challenging_weight),
            ("sentiment.conjunction_weight", self.conjunction_weight),
        ];
        for (field, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(MarketError::InvalidSetting {
                    field: field.to_string(),
                    message: format!("weight must be finite and non-negative, got {}", value),
                });
            }
        }
        Ok(())
    }
}

/// Contribution of a body's dignity to the daily score, with the phrase
/// used in the factor log. Neutral-natured bodies do not contribute.
fn dignity_contribution(body: CelestialBody, dignity: Dignity) -> Option<(f64, &'static str)> {
    match (body.nature(), dignity) {
        (Nature::Benefic, Dignity::Exalted) => Some((3.0, "exalted")),
        (Nature::Benefic, Dignity::OwnSign) => Some((2.0, "in own sign")),
        (Nature::Benefic, Dignity::Debilitated) => Some((-2.0, "debilitated")),
        (Nature::Benefic, Dignity::Neutral) => Some((1.0, "neutral")),
        (Nature::Malefic, Dignity::Exalted) => Some((1.0, "exalted")),
        (Nature::Malefic, Dignity::OwnSign) => Some((0.5, "in own sign")),
        (Nature::Malefic, Dignity::Debilitated) => Some((-3.0, "debilitated")),
        (Nature::Malefic, Dignity::Neutral) => Some((-1.0, "neutral")),
        (Nature::Node, Dignity::Exalted) => Some((0.5, "exalted")),
        (Nature::Node, Dignity::Debilitated) => Some((-2.0, "debilitated")),
        (Nature::Node, _) => Some((-0.5, "creates uncertainty")),
        (Nature::Neutral, _) => None,
    }
}

#[derive(Debug, Clone, Default)]
pub struct SentimentScorer {
    settings: ScoringSettings,
}

impl SentimentScorer {
    pub fn new(settings: ScoringSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ScoringSettings {
        &self.settings
    }

    /// Signed contribution of one aspect.
    pub fn aspect_contribution(&self, aspect: &Aspect) -> f64 {
        let multiplier = aspect.strength().multiplier();
        match aspect.aspect_type() {
            AspectType::Trine | AspectType::Sextile => self.settings.harmonious_weight * multiplier,
            AspectType::Square | AspectType::Opposition => {
                -self.settings.challenging_weight * multiplier
            }
            AspectType::Conjunction => {
                if aspect.involves_benefic() {
                    self.settings.conjunction_weight * multiplier
                } else {
                    -self.settings.conjunction_weight * multiplier
                }
            }
        }
    }

    /// Fold dignities, the leading aspects and the weekday into a score.
    /// Dignities are scored in the order given.
    pub fn score(
        &self,
        dignities: &[(CelestialBody, Dignity)],
        aspects: &[Aspect],
        date: NaiveDate,
    ) -> SentimentResult {
        let mut score = 0.0;
        let mut factors = Vec::new();

        for &(body, dignity) in dignities {
            if let Some((delta, phrase)) = dignity_contribution(body, dignity) {
                score += delta;
                factors.push(format!("{} {} ({})", body, phrase, format_delta(delta)));
            }
        }

        for aspect in aspects.iter().take(self.settings.aspect_limit) {
            let delta = self.aspect_contribution(aspect);
            score += delta;
            factors.push(format!(
                "{}-{} {} ({:+.1})",
                aspect.from,
                aspect.to,
                aspect.aspect_type(),
                delta
            ));
        }

        let weekday = date.weekday();
        let bias = self.settings.weekday_bias.for_weekday(weekday);
        if bias != 0.0 {
            score += bias;
            factors.push(format!(
                "{} ({} day) - {} ({})",
                weekday_name(weekday),
                weekday_lord(weekday),
                weekday_theme(weekday),
                format_delta(bias)
            ));
        }

        let label = SentimentLabel::from_score(score);
        log::debug!("sentiment for {}: {} ({:.2})", date, label, score);

        SentimentResult {
            label,
            score,
            factors,
            overridden: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_empty_input_scores_weekday_only() {
        let scorer = SentimentScorer::default();
        let result = scorer.score(&[], &[], wednesday());
        assert_eq!(result.score, 0.0);
        assert!(result.factors.is_empty());
        assert_eq!(result.label, SentimentLabel::Neutral);

        let tuesday = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let result = scorer.score(&[], &[], tuesday);
        assert_eq!(result.score, -1.0);
        assert_eq!(result.factors, vec!["Tuesday (Mars day) - aggressive trading (-1)"]);
    }

    #[test]
    fn test_luminaries_do_not_contribute() {
        let scorer = SentimentScorer::default();
        let result = scorer.score(
            &[
                (CelestialBody::Sun, Dignity::Exalted),
                (CelestialBody::Moon, Dignity::Debilitated),
            ],
            &[],
            wednesday(),
        );
        assert_eq!(result.score, 0.0);
        assert!(result.factors.is_empty());
    }

    #[test]
    fn test_node_own_sign_falls_back_to_uncertainty() {
        let scorer = SentimentScorer::default();
        let result = scorer.score(&[(CelestialBody::Rahu, Dignity::OwnSign)], &[], wednesday());
        assert_eq!(result.score, -0.5);
        assert_eq!(result.factors, vec!["Rahu creates uncertainty (-0.5)"]);
    }
}
