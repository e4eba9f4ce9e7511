//! Dignity (strength) of a body in a sign.
//!
//! Each body has at most one exaltation sign, any number of own signs and
//! at most one debilitation sign. Everything else is neutral.

use crate::ephemeris::CelestialBody;
use crate::zodiac::Sign;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dignity {
    Exalted,
    #[serde(rename = "Own Sign")]
    OwnSign,
    Debilitated,
    Neutral,
}

impl Dignity {
    pub fn name(self) -> &'static str {
        match self {
            Dignity::Exalted => "Exalted",
            Dignity::OwnSign => "Own Sign",
            Dignity::Debilitated => "Debilitated",
            Dignity::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Dignity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rulership {
    pub exalted: Sign,
    pub own: Vec<Sign>,
    pub debilitated: Sign,
}

lazy_static::lazy_static! {
    static ref RULERSHIPS: HashMap<CelestialBody, Rulership> = {
        use CelestialBody::*;
        use Sign::*;
        let table = [
            (Sun, Aries, vec![Leo], Libra),
            (Moon, Taurus, vec![Cancer], Scorpio),
            (Mercury, Virgo, vec![Gemini, Virgo], Pisces),
            (Venus, Pisces, vec![Taurus, Libra], Virgo),
            (Mars, Capricorn, vec![Aries, Scorpio], Cancer),
            (Jupiter, Cancer, vec![Sagittarius, Pisces], Capricorn),
            (Saturn, Libra, vec![Capricorn, Aquarius], Aries),
            (Rahu, Gemini, vec![], Sagittarius),
            (Ketu, Sagittarius, vec![], Gemini),
        ];
        table
            .into_iter()
            .map(|(body, exalted, own, debilitated)| (body, Rulership { exalted, own, debilitated }))
            .collect()
    };
}

/// Rulership facts for a body.
pub fn rulership(body: CelestialBody) -> Option<&'static Rulership> {
    RULERSHIPS.get(&body)
}

/// Dignity of `body` in `sign`. Exaltation wins over own sign (Mercury in Virgo).
pub fn dignity_of(body: CelestialBody, sign: Sign) -> Dignity {
    let Some(rulership) = rulership(body) else {
        return Dignity::Neutral;
    };
    if sign == rulership.exalted {
        Dignity::Exalted
    } else if rulership.own.contains(&sign) {
        Dignity::OwnSign
    } else if sign == rulership.debilitated {
        Dignity::Debilitated
    } else {
        Dignity::Neutral
    }
}

/// Permissive lookup by name: an unknown body is simply neutral.
pub fn dignity_of_name(body: &str, sign: Sign) -> Dignity {
    match body.parse::<CelestialBody>() {
        Ok(body) => dignity_of(body, sign),
        Err(_) => {
            log::debug!("no rulership entry for '{}', treating as neutral", body);
            Dignity::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dignity_sun() {
        assert_eq!(dignity_of(CelestialBody::Sun, Sign::Aries), Dignity::Exalted);
        assert_eq!(dignity_of(CelestialBody::Sun, Sign::Leo), Dignity::OwnSign);
        assert_eq!(dignity_of(CelestialBody::Sun, Sign::Libra), Dignity::Debilitated);
        assert_eq!(dignity_of(CelestialBody::Sun, Sign::Gemini), Dignity::Neutral);
    }

    #[test]
    fn test_mercury_virgo_is_exalted() {
        assert_eq!(dignity_of(CelestialBody::Mercury, Sign::Virgo), Dignity::Exalted);
        assert_eq!(dignity_of(CelestialBody::Mercury, Sign::Gemini), Dignity::OwnSign);
    }

    #[test]
    fn test_unknown_name_is_neutral() {
        assert_eq!(dignity_of_name("Pluto", Sign::Scorpio), Dignity::Neutral);
        assert_eq!(dignity_of_name("jupiter", Sign::Cancer), Dignity::Exalted);
    }
}
