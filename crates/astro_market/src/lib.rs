//! Astrology-flavoured market sentiment.
//!
//! A linear ephemeris places the nine grahas for a date; the positions are
//! classified by sign, nakshatra and dignity, paired into aspects and
//! folded into a seven-tier sentiment label. The trading session for a
//! symbol is split into planetary hours, each with its own mini-score.

pub mod analyzer;
pub mod aspects;
pub mod ephemeris;
pub mod error;
pub mod sentiment;
pub mod settings;
pub mod strategy;
pub mod timeline;
pub mod vedic;
pub mod zodiac;

pub use analyzer::{
    compute_market_view, ForecastBias, ForecastDay, MarketAnalyzer, MarketView, PlanetRecord,
};
pub use aspects::{Aspect, AspectCalculator, AspectSettings, AspectStrength, AspectType};
pub use ephemeris::{CelestialBody, ChartPositions, EphemerisSettings, LinearEphemeris};
pub use error::{parse_date, MarketError, Result};
pub use sentiment::{OutcomeOverride, OutcomeOverrides, SentimentLabel, SentimentResult};
pub use settings::AnalyzerSettings;
pub use strategy::TradingPlan;
pub use timeline::{MarketSession, Timeline, TimelineSlot};
pub use vedic::{Dignity, Nakshatra};
pub use zodiac::Sign;
