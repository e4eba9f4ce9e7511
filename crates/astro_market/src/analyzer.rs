//! The full pipeline: positions, classification, aspects, sentiment and
//! timeline for one (date, symbol) query.

use crate::aspects::{Aspect, AspectCalculator};
use crate::ephemeris::{CelestialBody, ChartPositions, LinearEphemeris};
use crate::error::Result;
use crate::sentiment::{OutcomeOverrides, SentimentLabel, SentimentResult, SentimentScorer};
use crate::settings::AnalyzerSettings;
use crate::timeline::{MarketSession, Timeline, TimelineGenerator, TimelineSlot};
use crate::vedic::{dignity_of, nakshatra_placement, Dignity, Nakshatra};
use crate::zodiac::{format_degree, Sign};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Widest forecast window either side of the anchor date.
pub const MAX_FORECAST_SPAN: u32 = 366;

/// One row of the planetary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetRecord {
    pub body: CelestialBody,
    pub longitude: f64,
    /// Degrees and arc minutes, e.g. `279°30'`
    pub degree: String,
    pub sign: Sign,
    pub nakshatra: Nakshatra,
    pub pada: u8,
    pub dignity: Dignity,
    pub retrograde: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketView {
    pub date: NaiveDate,
    pub symbol: String,
    pub session: MarketSession,
    pub planetary_data: Vec<PlanetRecord>,
    pub aspects: Vec<Aspect>,
    pub sentiment: SentimentResult,
    pub timeline: Timeline,
}

impl MarketView {
    pub fn planet(&self, body: CelestialBody) -> Option<&PlanetRecord> {
        self.planetary_data.iter().find(|p| p.body == body)
    }

    pub fn current_slot(&self, now: NaiveDateTime) -> Option<&TimelineSlot> {
        self.timeline.current_slot(now)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForecastBias {
    Long,
    Short,
    Neutral,
}

impl ForecastBias {
    pub fn from_score(score: f64) -> Self {
        if score > 1.0 {
            ForecastBias::Long
        } else if score < -1.0 {
            ForecastBias::Short
        } else {
            ForecastBias::Neutral
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            ForecastBias::Long => "Long bias",
            ForecastBias::Short => "Short bias",
            ForecastBias::Neutral => "Neutral approach",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub label: SentimentLabel,
    pub score: f64,
    pub aspect_count: usize,
    pub bias: ForecastBias,
    /// The day the forecast was centred on
    pub is_anchor: bool,
}

/// Stateless pipeline runner. Holds only configuration, so a single
/// instance can serve concurrent queries.
#[derive(Debug, Clone, Default)]
pub struct MarketAnalyzer {
    ephemeris: LinearEphemeris,
    aspects: AspectCalculator,
    scorer: SentimentScorer,
    timeline: TimelineGenerator,
    overrides: OutcomeOverrides,
}

impl MarketAnalyzer {
    pub fn new(settings: AnalyzerSettings) -> Result<Self> {
        settings.validate()?;
        let AnalyzerSettings {
            ephemeris,
            aspects,
            scoring,
            timeline,
            overrides,
        } = settings;
        Ok(Self {
            ephemeris: LinearEphemeris::new(ephemeris),
            aspects: AspectCalculator::new(aspects),
            scorer: SentimentScorer::new(scoring),
            timeline: TimelineGenerator::new(timeline),
            overrides,
        })
    }

    pub fn ephemeris(&self) -> &LinearEphemeris {
        &self.ephemeris
    }

    pub fn positions(&self, date: NaiveDate) -> ChartPositions {
        self.ephemeris.calc_positions(date)
    }

    pub fn planet_records(&self, positions: &ChartPositions) -> Vec<PlanetRecord> {
        positions
            .planets
            .iter()
            .map(|(&body, position)| {
                let sign = Sign::from_longitude(position.lon);
                let placement = nakshatra_placement(position.lon);
                PlanetRecord {
                    body,
                    longitude: position.lon,
                    degree: format_degree(position.lon),
                    sign,
                    nakshatra: placement.nakshatra,
                    pada: placement.pada,
                    dignity: dignity_of(body, sign),
                    retrograde: position.retrograde,
                }
            })
            .collect()
    }

    pub fn aspects(&self, positions: &ChartPositions) -> Vec<Aspect> {
        self.aspects.compute_aspects(positions)
    }

    /// Recorded outcome for `date` if one was supplied, otherwise the
    /// computed score.
    pub fn sentiment(
        &self,
        date: NaiveDate,
        records: &[PlanetRecord],
        aspects: &[Aspect],
    ) -> SentimentResult {
        if let Some(result) = self.overrides.resolve(date) {
            return result;
        }
        let dignities: Vec<(CelestialBody, Dignity)> =
            records.iter().map(|r| (r.body, r.dignity)).collect();
        self.scorer.score(&dignities, aspects, date)
    }

    pub fn timeline(
        &self,
        symbol: &str,
        date: NaiveDate,
        positions: &ChartPositions,
        aspects: &[Aspect],
    ) -> Timeline {
        self.timeline.generate(symbol, date, positions, aspects)
    }

    pub fn compute_market_view(&self, date: NaiveDate, symbol: &str) -> MarketView {
        let positions = self.positions(date);
        let planetary_data = self.planet_records(&positions);
        let aspects = self.aspects(&positions);
        let sentiment = self.sentiment(date, &planetary_data, &aspects);
        let timeline = self.timeline(symbol, date, &positions, &aspects);
        log::debug!(
            "market view {} {}: {} ({:.2}), {} aspects, {} horas",
            date,
            symbol,
            sentiment.label,
            sentiment.score,
            aspects.len(),
            timeline.len()
        );

        MarketView {
            date,
            symbol: symbol.trim().to_string(),
            session: timeline.session,
            planetary_data,
            aspects,
            sentiment,
            timeline,
        }
    }

    /// Daily sentiment for `span_days` either side of `date`. The span is
    /// capped at [`MAX_FORECAST_SPAN`]; days outside the calendar range are
    /// skipped.
    pub fn forecast(&self, date: NaiveDate, span_days: u32) -> Vec<ForecastDay> {
        if span_days > MAX_FORECAST_SPAN {
            log::warn!(
                "forecast span {} capped at {} days",
                span_days,
                MAX_FORECAST_SPAN
            );
        }
        let span = i64::from(span_days.min(MAX_FORECAST_SPAN));
        (-span..=span)
            .filter_map(|offset| {
                date.checked_add_signed(Duration::days(offset))
                    .map(|day| (offset, day))
            })
            .map(|(offset, day)| {
                let positions = self.positions(day);
                let records = self.planet_records(&positions);
                let aspects = self.aspects(&positions);
                let sentiment = self.sentiment(day, &records, &aspects);
                ForecastDay {
                    date: day,
                    label: sentiment.label,
                    score: sentiment.score,
                    aspect_count: aspects.len(),
                    bias: ForecastBias::from_score(sentiment.score),
                    is_anchor: offset == 0,
                }
            })
            .collect()
    }
}

/// Run the pipeline with the built-in tables.
pub fn compute_market_view(date: NaiveDate, symbol: &str) -> MarketView {
    MarketAnalyzer::default().compute_market_view(date, symbol)
}
