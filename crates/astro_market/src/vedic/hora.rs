//! Hora and weekday lords.
//!
//! Horas rotate through the seven visible bodies in Chaldean order
//! (slowest to fastest), starting from the Sun.

use crate::ephemeris::CelestialBody;
use chrono::{Datelike, NaiveDate, Weekday};

pub const HORA_SEQUENCE: [CelestialBody; 7] = [
    CelestialBody::Sun,
    CelestialBody::Venus,
    CelestialBody::Mercury,
    CelestialBody::Moon,
    CelestialBody::Saturn,
    CelestialBody::Jupiter,
    CelestialBody::Mars,
];

/// Position in [`HORA_SEQUENCE`] of the hora that begins at `start_hour` on
/// `date`. Weekdays count from Monday = 0.
pub fn hora_start_index(date: NaiveDate, start_hour: u32) -> usize {
    let weekday = date.weekday().num_days_from_monday() as usize;
    (weekday * 24 + start_hour as usize) % HORA_SEQUENCE.len()
}

pub fn hora_lord(index: usize) -> CelestialBody {
    HORA_SEQUENCE[index % HORA_SEQUENCE.len()]
}

/// Body that rules the day of the week.
pub fn weekday_lord(weekday: Weekday) -> CelestialBody {
    match weekday {
        Weekday::Mon => CelestialBody::Moon,
        Weekday::Tue => CelestialBody::Mars,
        Weekday::Wed => CelestialBody::Mercury,
        Weekday::Thu => CelestialBody::Jupiter,
        Weekday::Fri => CelestialBody::Venus,
        Weekday::Sat => CelestialBody::Saturn,
        Weekday::Sun => CelestialBody::Sun,
    }
}
