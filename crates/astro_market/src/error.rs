use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised at the edges of the pipeline: parsing names and dates, and
/// validating settings. The pipeline functions themselves are total.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    #[error("Unknown celestial body: {0}")]
    UnknownBody(String),
    #[error("Unknown zodiac sign: {0}")]
    UnknownSign(String),
    #[error("Unknown nakshatra: {0}")]
    UnknownNakshatra(String),
    #[error("Unknown sentiment label: {0}")]
    UnknownLabel(String),
    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },
    #[error("Invalid orb for {aspect}: {orb} (must be finite and non-negative)")]
    InvalidOrb { aspect: String, orb: f64 },
    #[error("Invalid setting {field}: {message}")]
    InvalidSetting { field: String, message: String },
    #[error("Duplicate outcome override for {date}")]
    DuplicateOverride { date: NaiveDate },
}

pub type Result<T> = std::result::Result<T, MarketError>;

/// Parse a calendar date typed at the UI boundary.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| MarketError::InvalidDate {
        input: input.to_string(),
    })
}
