//! The twelve zodiac signs.
//!
//! Each sign spans exactly 30 degrees starting from Aries at 0.

use crate::ephemeris::normalize_degrees;
use crate::error::MarketError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SIGN_SPAN: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    pub fn from_index(index: usize) -> Sign {
        Sign::ALL[index % 12]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Sign containing `longitude`. A longitude on a cusp belongs to the
    /// sign that starts there.
    pub fn from_longitude(longitude: f64) -> Sign {
        let lon = normalize_degrees(longitude);
        Sign::from_index((lon / SIGN_SPAN).floor() as usize)
    }

    pub fn start_degree(self) -> f64 {
        self.index() as f64 * SIGN_SPAN
    }

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sign {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Sign::ALL
            .iter()
            .copied()
            .find(|sign| sign.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MarketError::UnknownSign(s.to_string()))
    }
}

/// Shorthand for [`Sign::from_longitude`].
pub fn sign_of(longitude: f64) -> Sign {
    Sign::from_longitude(longitude)
}

/// Render a longitude as whole degrees and truncated arc minutes, e.g. `279°30'`.
pub fn format_degree(longitude: f64) -> String {
    let lon = normalize_degrees(longitude);
    let whole = lon.trunc();
    let minutes = ((lon - whole) * 60.0).trunc();
    format!("{}°{}'", whole as u32, minutes as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_boundaries_belong_to_higher_sign() {
        for (idx, sign) in Sign::ALL.iter().enumerate() {
            let boundary = idx as f64 * 30.0;
            assert_eq!(Sign::from_longitude(boundary), *sign);
            assert_eq!(Sign::from_longitude(boundary + 29.999), *sign);
        }
        assert_eq!(Sign::from_longitude(360.0), Sign::Aries);
        assert_eq!(Sign::from_longitude(-0.5), Sign::Pisces);
    }

    #[test]
    fn test_format_degree() {
        assert_eq!(format_degree(279.5), "279°30'");
        assert_eq!(format_degree(0.0), "0°0'");
        assert_eq!(format_degree(42.25), "42°15'");
    }

    #[test]
    fn test_parse_sign() {
        assert_eq!("capricorn".parse::<Sign>().unwrap(), Sign::Capricorn);
        assert!("Ophiuchus".parse::<Sign>().is_err());
    }
}
