use crate::error::MarketError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seven ordered tiers, most bullish first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentLabel {
    #[serde(rename = "Extremely Bullish")]
    ExtremelyBullish,
    #[serde(rename = "Very Bullish")]
    VeryBullish,
    Bullish,
    Neutral,
    Bearish,
    #[serde(rename = "Very Bearish")]
    VeryBearish,
    #[serde(rename = "Extremely Bearish")]
    ExtremelyBearish,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 7] = [
        SentimentLabel::ExtremelyBullish,
        SentimentLabel::VeryBullish,
        SentimentLabel::Bullish,
        SentimentLabel::Neutral,
        SentimentLabel::Bearish,
        SentimentLabel::VeryBearish,
        SentimentLabel::ExtremelyBearish,
    ];

    /// Lower bounds are inclusive: 4.0 is Extremely Bullish, 3.99 Very Bullish.
    pub fn from_score(score: f64) -> Self {
        if score >= 4.0 {
            SentimentLabel::ExtremelyBullish
        } else if score >= 2.0 {
            SentimentLabel::VeryBullish
        } else if score >= 0.5 {
            SentimentLabel::Bullish
        } else if score >= -0.5 {
            SentimentLabel::Neutral
        } else if score >= -2.0 {
            SentimentLabel::Bearish
        } else if score >= -4.0 {
            SentimentLabel::VeryBearish
        } else {
            SentimentLabel::ExtremelyBearish
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SentimentLabel::ExtremelyBullish => "Extremely Bullish",
            SentimentLabel::VeryBullish => "Very Bullish",
            SentimentLabel::Bullish => "Bullish",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Bearish => "Bearish",
            SentimentLabel::VeryBearish => "Very Bearish",
            SentimentLabel::ExtremelyBearish => "Extremely Bearish",
        }
    }

    /// Kebab-case slug, handy for styling hooks in a host UI.
    pub fn slug(self) -> &'static str {
        match self {
            SentimentLabel::ExtremelyBullish => "extremely-bullish",
            SentimentLabel::VeryBullish => "very-bullish",
            SentimentLabel::Bullish => "bullish",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Bearish => "bearish",
            SentimentLabel::VeryBearish => "very-bearish",
            SentimentLabel::ExtremelyBearish => "extremely-bearish",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SentimentLabel {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SentimentLabel::ALL
            .iter()
            .copied()
            .find(|label| label.name().eq_ignore_ascii_case(wanted) || label.slug() == wanted)
            .ok_or_else(|| MarketError::UnknownLabel(s.to_string()))
    }
}

/// Outcome of the daily scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub score: f64,
    /// Human-readable contributions in the order they were applied
    pub factors: Vec<String>,
    /// True when a caller-supplied outcome replaced the computed score
    #[serde(default)]
    pub overridden: bool,
}

/// Signed contribution as it appears in factor strings: `+3`, `-0.5`.
pub(crate) fn format_delta(delta: f64) -> String {
    format!("{:+}", delta)
}
