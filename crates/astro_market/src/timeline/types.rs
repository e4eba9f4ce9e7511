use crate::ephemeris::CelestialBody;
use crate::timeline::session::MarketSession;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Five-level label used for individual horas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HoraSentiment {
    #[serde(rename = "Very Bullish")]
    VeryBullish,
    Bullish,
    Neutral,
    Bearish,
    #[serde(rename = "Very Bearish")]
    VeryBearish,
}

impl HoraSentiment {
    pub fn from_score(score: f64) -> Self {
        if score >= 2.0 {
            HoraSentiment::VeryBullish
        } else if score >= 1.0 {
            HoraSentiment::Bullish
        } else if score >= -1.0 {
            HoraSentiment::Neutral
        } else if score >= -2.0 {
            HoraSentiment::Bearish
        } else {
            HoraSentiment::VeryBearish
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HoraSentiment::VeryBullish => "Very Bullish",
            HoraSentiment::Bullish => "Bullish",
            HoraSentiment::Neutral => "Neutral",
            HoraSentiment::Bearish => "Bearish",
            HoraSentiment::VeryBearish => "Very Bearish",
        }
    }
}

impl fmt::Display for HoraSentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What to do while a hora is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoraAction {
    Long,
    Short,
    Cautious,
}

impl HoraAction {
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            HoraAction::Long
        } else if score < -1.0 {
            HoraAction::Short
        } else {
            HoraAction::Cautious
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            HoraAction::Long => "LONG POSITIONS",
            HoraAction::Short => "SHORT POSITIONS",
            HoraAction::Cautious => "CAUTIOUS TRADING",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub hora_lord: CelestialBody,
    pub influence: String,
    pub label: HoraSentiment,
    pub score: f64,
}

impl TimelineSlot {
    /// Whether `now` falls in `[start, end)`.
    pub fn contains(&self, now: NaiveDateTime) -> bool {
        self.start <= now && now < self.end
    }

    pub fn action(&self) -> HoraAction {
        HoraAction::from_score(self.score)
    }

    pub fn title(&self) -> String {
        format!(
            "{} Hora - {}",
            self.hora_lord,
            self.start.format("%A")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub session: MarketSession,
    pub slots: Vec<TimelineSlot>,
}

impl Timeline {
    /// The hora active at `now`, if the session is open.
    pub fn current_slot(&self, now: NaiveDateTime) -> Option<&TimelineSlot> {
        self.slots.iter().find(|slot| slot.contains(now))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
