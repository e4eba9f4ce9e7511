//! Caller-supplied outcomes that replace the computed sentiment for
//! specific dates.

use crate::error::{MarketError, Result};
use crate::sentiment::types::{SentimentLabel, SentimentResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeOverride {
    pub label: SentimentLabel,
    pub score: f64,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeOverrides {
    entries: BTreeMap<NaiveDate, OutcomeOverride>,
}

impl OutcomeOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an override; each date may be overridden once.
    pub fn insert(&mut self, date: NaiveDate, outcome: OutcomeOverride) -> Result<()> {
        check_score(date, &outcome)?;
        if self.entries.contains_key(&date) {
            return Err(MarketError::DuplicateOverride { date });
        }
        self.entries.insert(date, outcome);
        Ok(())
    }

    /// Re-check entries that bypassed `insert`, e.g. via deserialization.
    pub fn validate(&self) -> Result<()> {
        self.entries
            .iter()
            .try_for_each(|(date, outcome)| check_score(*date, outcome))
    }

    pub fn get(&self, date: NaiveDate) -> Option<&OutcomeOverride> {
        self.entries.get(&date)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The recorded result for `date`, if one was supplied.
    pub fn resolve(&self, date: NaiveDate) -> Option<SentimentResult> {
        let outcome = self.get(date)?;
        log::debug!("using recorded outcome for {}: {}", date, outcome.label);
        let mut factors = vec![format!(
            "Recorded outcome for {}: {} ({:+.1})",
            date, outcome.label, outcome.score
        )];
        if let Some(note) = &outcome.note {
            factors.push(note.clone());
        }
        Some(SentimentResult {
            label: outcome.label,
            score: outcome.score,
            factors,
            overridden: true,
        })
    }
}

fn check_score(date: NaiveDate, outcome: &OutcomeOverride) -> Result<()> {
    if !outcome.score.is_finite() {
        return Err(MarketError::InvalidSetting {
            field: "overrides.score".to_string(),
            message: format!("score for {} must be finite, got {}", date, outcome.score),
        });
    }
    Ok(())
}
