use astro_market::ephemeris::{BodyMotion, CelestialBody, EphemerisSettings, LinearEphemeris};
use chrono::{Duration, NaiveDate};

fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

#[test]
fn test_reference_date_returns_base_positions() {
    let ephemeris = LinearEphemeris::default();
    let positions = ephemeris.calc_positions(reference());
    assert_eq!(positions.planets.len(), 9);
    for (body, motion) in &ephemeris.settings().motions {
        assert_eq!(positions.longitude(*body), Some(motion.base_lon));
    }
    assert_eq!(positions.longitude(CelestialBody::Sun), Some(279.5));
    assert_eq!(positions.longitude(CelestialBody::Jupiter), Some(42.8));
}

#[test]
fn test_longitudes_stay_in_range() {
    let ephemeris = LinearEphemeris::default();
    for offset in [-40_000i64, -366, -1, 1, 17, 365, 10_000, 40_000] {
        let positions = ephemeris.calc_positions(reference() + Duration::days(offset));
        for (_, lon) in positions.longitudes() {
            assert!((0.0..360.0).contains(&lon), "{} out of range", lon);
        }
    }
}

#[test]
fn test_position_repeats_after_period() {
    let mut settings = EphemerisSettings::default();
    settings.motions.insert(
        CelestialBody::Mars,
        BodyMotion {
            base_lon: 100.0,
            daily_motion: 0.5,
        },
    );
    let ephemeris = LinearEphemeris::new(settings);
    assert_eq!(ephemeris.period_days(CelestialBody::Mars), Some(720.0));

    let date = reference() + Duration::days(33);
    let a = ephemeris.longitude(CelestialBody::Mars, date).unwrap();
    let b = ephemeris
        .longitude(CelestialBody::Mars, date + Duration::days(720))
        .unwrap();
    assert!((a - b).abs() < 1e-9);
}

#[test]
fn test_dates_before_reference() {
    let ephemeris = LinearEphemeris::default();
    let lon = ephemeris
        .longitude(CelestialBody::Sun, reference() - Duration::days(10))
        .unwrap();
    assert!((lon - (279.5 - 9.856)).abs() < 1e-9);
}

#[test]
fn test_nodes_move_backwards() {
    let ephemeris = LinearEphemeris::default();
    let positions = ephemeris.calc_positions(reference() + Duration::days(100));
    let rahu = &positions.planets[&CelestialBody::Rahu];
    assert!(rahu.retrograde);
    assert!(rahu.speed_lon < 0.0);
    assert!(!positions.planets[&CelestialBody::Sun].retrograde);
    assert!((rahu.lon - (15.4 - 5.3)).abs() < 1e-9);
}

#[test]
fn test_missing_body_is_skipped() {
    let mut settings = EphemerisSettings::default();
    settings.motions.remove(&CelestialBody::Ketu);
    let ephemeris = LinearEphemeris::new(settings);
    let positions = ephemeris.calc_positions(reference());
    assert_eq!(positions.planets.len(), 8);
    assert_eq!(positions.longitude(CelestialBody::Ketu), None);
}
