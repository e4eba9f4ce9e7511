//! Trading session windows.
//!
//! Pure logic: the session is picked from the symbol alone, wall-clock
//! time never enters here.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

pub const DEFAULT_INDIAN_SYMBOLS: &[&str] = &["NIFTY", "BANKNIFTY", "FINNIFTY", "MIDCPNIFTY"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketSession {
    /// NSE index derivatives: 09:15-15:30, one hora per hour.
    Indian,
    /// Everything else: 05:00-23:55, one hora per two hours.
    International,
}

impl MarketSession {
    /// Pick a session for `symbol`, matching the allowlist case-insensitively.
    pub fn classify<S: AsRef<str>>(symbol: &str, indian_symbols: &[S]) -> Self {
        let symbol = symbol.trim();
        if indian_symbols
            .iter()
            .any(|s| s.as_ref().trim().eq_ignore_ascii_case(symbol))
        {
            MarketSession::Indian
        } else {
            MarketSession::International
        }
    }

    pub fn open(self) -> NaiveTime {
        match self {
            MarketSession::Indian => hm(9, 15),
            MarketSession::International => hm(5, 0),
        }
    }

    pub fn close(self) -> NaiveTime {
        match self {
            MarketSession::Indian => hm(15, 30),
            MarketSession::International => hm(23, 55),
        }
    }

    pub fn slot_length(self) -> Duration {
        match self {
            MarketSession::Indian => Duration::hours(1),
            MarketSession::International => Duration::hours(2),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MarketSession::Indian => "Indian",
            MarketSession::International => "International",
        }
    }
}

fn hm(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap_or(NaiveTime::MIN)
}
