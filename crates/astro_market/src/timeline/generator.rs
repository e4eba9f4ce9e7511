use crate::aspects::{Aspect, AspectStrength, AspectType};
use crate::ephemeris::{CelestialBody, ChartPositions, Nature};
use crate::error::{MarketError, Result};
use crate::timeline::session::{MarketSession, DEFAULT_INDIAN_SYMBOLS};
use crate::timeline::types::{HoraSentiment, Timeline, TimelineSlot};
use crate::vedic::{dignity_of, hora_lord, hora_start_index, nakshatra_of, Dignity};
use crate::zodiac::sign_of;
use chrono::{NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSettings {
    /// Symbols traded on the Indian session; everything else is international
    pub indian_symbols: Vec<String>,
    /// How many aspects touching the hora lord feed its score
    pub aspects_per_hora: usize,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            indian_symbols: DEFAULT_INDIAN_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            aspects_per_hora: 2,
        }
    }
}

impl TimelineSettings {
    pub fn validate(&self) -> Result<()> {
        if self.indian_symbols.iter().any(|s| s.trim().is_empty()) {
            return Err(MarketError::InvalidSetting {
                field: "timeline.indian_symbols".to_string(),
                message: "symbols must not be blank".to_string(),
            });
        }
        Ok(())
    }
}

/// Aspect weight inside a single hora.
fn hora_aspect_weight(strength: AspectStrength) -> f64 {
    match strength {
        AspectStrength::Exact => 2.0,
        AspectStrength::Close => 1.5,
        AspectStrength::Wide => 1.0,
    }
}

/// Dignity weight of the hora lord.
fn hora_dignity_delta(body: CelestialBody, dignity: Dignity) -> f64 {
    match body.nature() {
        Nature::Benefic => match dignity {
            Dignity::Exalted => 2.0,
            Dignity::OwnSign => 1.0,
            Dignity::Debilitated => -2.0,
            Dignity::Neutral => 0.0,
        },
        Nature::Malefic | Nature::Node => match dignity {
            Dignity::Exalted => 1.0,
            Dignity::OwnSign => 0.5,
            Dignity::Debilitated => -2.0,
            Dignity::Neutral => -0.5,
        },
        Nature::Neutral => match dignity {
            Dignity::Exalted => 1.5,
            Dignity::OwnSign => 1.0,
            Dignity::Debilitated => -1.5,
            Dignity::Neutral => 0.0,
        },
    }
}

/// Extra remark for a lord that traditionally colours a given market.
fn symbol_note(lord: CelestialBody, symbol: &str) -> Option<&'static str> {
    let symbol = symbol.trim().to_uppercase();
    match lord {
        CelestialBody::Mars if symbol == "BANKNIFTY" => Some("Banking under Mars - volatility expected"),
        CelestialBody::Jupiter if symbol.contains("GOLD") => Some("Jupiter favorable for precious metals"),
        CelestialBody::Mercury if symbol.contains("BTC") => Some("Mercury enhances crypto momentum"),
        _ => None,
    }
}

/// Hora-by-hora forecast across a trading session.
#[derive(Debug, Clone, Default)]
pub struct TimelineGenerator {
    settings: TimelineSettings,
}

impl TimelineGenerator {
    pub fn new(settings: TimelineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &TimelineSettings {
        &self.settings
    }

    pub fn session_for(&self, symbol: &str) -> MarketSession {
        MarketSession::classify(symbol, &self.settings.indian_symbols)
    }

    pub fn generate(
        &self,
        symbol: &str,
        date: NaiveDate,
        positions: &ChartPositions,
        aspects: &[Aspect],
    ) -> Timeline {
        let session = self.session_for(symbol);
        let close = date.and_time(session.close());
        let step = session.slot_length();

        let mut slots = Vec::new();
        let mut next = Some(date.and_time(session.open()));
        let mut index = hora_start_index(date, session.open().hour());

        // Stepping past NaiveDateTime::MAX ends the session early.
        while let Some(start) = next.filter(|start| *start <= close) {
            let lord = hora_lord(index);
            let (score, influence) = self.score_hora(symbol, lord, positions, aspects);
            next = start.checked_add_signed(step);
            let end = next.map_or(close, |n| n.min(close));
            slots.push(TimelineSlot {
                start,
                end,
                hora_lord: lord,
                influence,
                label: HoraSentiment::from_score(score),
                score,
            });
            index += 1;
        }

        log::debug!(
            "{} {} horas for {} on {}",
            slots.len(),
            session.name(),
            symbol,
            date
        );
        Timeline { session, slots }
    }

    /// Mini-score and influence text for one hora lord.
    fn score_hora(
        &self,
        symbol: &str,
        lord: CelestialBody,
        positions: &ChartPositions,
        aspects: &[Aspect],
    ) -> (f64, String) {
        let lon = positions.longitude(lord).unwrap_or(0.0);
        let sign = sign_of(lon);
        let dignity = dignity_of(lord, sign);

        let mut parts = vec![format!(
            "{} at {:.1}° in {} ({})",
            lord,
            lon,
            sign,
            nakshatra_of(lon)
        )];
        if dignity != Dignity::Neutral {
            parts.push(format!("{} is {}", lord, dignity));
        }

        let mut score = 0.0;
        for aspect in aspects
            .iter()
            .filter(|a| a.involves(lord))
            .take(self.settings.aspects_per_hora)
        {
            let other = aspect.other(lord).unwrap_or(lord);
            parts.push(format!(
                "{} with {} ({})",
                aspect.aspect_type(),
                other,
                aspect.strength()
            ));
            let weight = hora_aspect_weight(aspect.strength());
            match aspect.aspect_type() {
                AspectType::Trine | AspectType::Sextile => score += weight,
                AspectType::Square | AspectType::Opposition => score -= weight,
                AspectType::Conjunction => {}
            }
        }

        score += hora_dignity_delta(lord, dignity);

        if let Some(note) = symbol_note(lord, symbol) {
            parts.push(note.to_string());
        }

        (score, parts.join(". "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hora_dignity_delta_groups() {
        assert_eq!(hora_dignity_delta(CelestialBody::Venus, Dignity::Neutral), 0.0);
        assert_eq!(hora_dignity_delta(CelestialBody::Ketu, Dignity::Neutral), -0.5);
        assert_eq!(hora_dignity_delta(CelestialBody::Saturn, Dignity::OwnSign), 0.5);
        assert_eq!(hora_dignity_delta(CelestialBody::Moon, Dignity::Debilitated), -1.5);
    }

    #[test]
    fn test_symbol_note() {
        assert!(symbol_note(CelestialBody::Mars, "banknifty").is_some());
        assert!(symbol_note(CelestialBody::Mars, "NIFTY").is_none());
        assert!(symbol_note(CelestialBody::Jupiter, "XAUGOLD").is_some());
        assert!(symbol_note(CelestialBody::Mercury, "btcusd").is_some());
    }
}
