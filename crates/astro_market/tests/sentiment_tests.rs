use astro_market::aspects::AspectCalculator;
use astro_market::ephemeris::{CelestialBody, ChartPositions};
use astro_market::sentiment::{
    OutcomeOverride, OutcomeOverrides, ScoringSettings, SentimentLabel, SentimentScorer,
};
use astro_market::vedic::Dignity;
use chrono::NaiveDate;

// A Wednesday, so the weekday bias is zero.
fn wednesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 8).unwrap()
}

fn aspects_for(longitudes: &[(CelestialBody, f64)]) -> Vec<astro_market::aspects::Aspect> {
    let positions = ChartPositions::from_longitudes(wednesday(), longitudes);
    AspectCalculator::default().compute_aspects(&positions)
}

#[test]
fn test_label_thresholds() {
    let cases = [
        (4.0, SentimentLabel::ExtremelyBullish),
        (3.99, SentimentLabel::VeryBullish),
        (2.0, SentimentLabel::VeryBullish),
        (0.5, SentimentLabel::Bullish),
        (0.49, SentimentLabel::Neutral),
        (-0.5, SentimentLabel::Neutral),
        (-0.51, SentimentLabel::Bearish),
        (-2.0, SentimentLabel::Bearish),
        (-4.0, SentimentLabel::VeryBearish),
        (-4.01, SentimentLabel::ExtremelyBearish),
    ];
    for (score, label) in cases {
        assert_eq!(SentimentLabel::from_score(score), label, "{}", score);
    }
}

#[test]
fn test_labels_are_monotonic() {
    let mut previous = SentimentLabel::from_score(-10.0);
    let mut score = -10.0;
    while score <= 10.0 {
        let label = SentimentLabel::from_score(score);
        // Variants are declared most bullish first
        assert!(label <= previous);
        previous = label;
        score += 0.05;
    }
}

#[test]
fn test_harmonious_aspect_raises_score() {
    let scorer = SentimentScorer::default();
    let base = scorer.score(&[], &aspects_for(&[(CelestialBody::Sun, 10.0)]), wednesday());
    let with_trine = scorer.score(
        &[],
        &aspects_for(&[(CelestialBody::Sun, 10.0), (CelestialBody::Moon, 130.0)]),
        wednesday(),
    );
    assert!(with_trine.score > base.score);
    assert_eq!(with_trine.factors, vec!["Sun-Moon Trine (+1.0)"]);
}

#[test]
fn test_challenging_aspect_lowers_score() {
    let scorer = SentimentScorer::default();
    let result = scorer.score(
        &[],
        &aspects_for(&[(CelestialBody::Mars, 0.0), (CelestialBody::Saturn, 93.0)]),
        wednesday(),
    );
    assert!((result.score + 0.8).abs() < 1e-9);
    assert_eq!(result.factors, vec!["Mars-Saturn Square (-0.8)"]);
}

#[test]
fn test_conjunction_sign_depends_on_benefic() {
    let scorer = SentimentScorer::default();
    let benefic = scorer.score(
        &[],
        &aspects_for(&[(CelestialBody::Venus, 50.0), (CelestialBody::Mars, 51.0)]),
        wednesday(),
    );
    assert!((benefic.score - 0.5).abs() < 1e-9);

    let malefic = scorer.score(
        &[],
        &aspects_for(&[(CelestialBody::Mars, 50.0), (CelestialBody::Saturn, 51.0)]),
        wednesday(),
    );
    assert!((malefic.score + 0.5).abs() < 1e-9);
}

#[test]
fn test_only_leading_aspects_count() {
    let scorer = SentimentScorer::new(ScoringSettings {
        aspect_limit: 1,
        ..ScoringSettings::default()
    });
    let aspects = aspects_for(&[
        (CelestialBody::Sun, 0.0),
        (CelestialBody::Moon, 120.0),
        (CelestialBody::Mercury, 240.0),
    ]);
    assert_eq!(aspects.len(), 3);
    let result = scorer.score(&[], &aspects, wednesday());
    assert_eq!(result.factors.len(), 1);
    assert!((result.score - 1.0).abs() < 1e-9);
}

#[test]
fn test_dignity_factors() {
    let scorer = SentimentScorer::default();
    let result = scorer.score(
        &[
            (CelestialBody::Jupiter, Dignity::Exalted),
            (CelestialBody::Saturn, Dignity::Debilitated),
            (CelestialBody::Venus, Dignity::OwnSign),
        ],
        &[],
        wednesday(),
    );
    assert_eq!(
        result.factors,
        vec![
            "Jupiter exalted (+3)",
            "Saturn debilitated (-3)",
            "Venus in own sign (+2)",
        ]
    );
    assert!((result.score - 2.0).abs() < 1e-9);
    assert_eq!(result.label, SentimentLabel::VeryBullish);
}

#[test]
fn test_benefic_dignity_never_lowers_score() {
    let scorer = SentimentScorer::default();
    let thursday = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
    let aspects = aspects_for(&[(CelestialBody::Sun, 10.0), (CelestialBody::Moon, 130.0)]);
    assert!(!aspects.is_empty());

    for benefic in [CelestialBody::Jupiter, CelestialBody::Venus] {
        let score_with = |dignity| {
            scorer
                .score(
                    &[(benefic, dignity), (CelestialBody::Saturn, Dignity::Neutral)],
                    &aspects,
                    thursday,
                )
                .score
        };
        let neutral = score_with(Dignity::Neutral);
        let own = score_with(Dignity::OwnSign);
        let exalted = score_with(Dignity::Exalted);
        assert!(neutral <= own, "{}: {} > {}", benefic, neutral, own);
        assert!(own <= exalted, "{}: {} > {}", benefic, own, exalted);
    }
}

#[test]
fn test_weekday_bias() {
    let scorer = SentimentScorer::default();
    let thursday = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
    let result = scorer.score(&[], &[], thursday);
    assert_eq!(result.score, 1.0);
    assert_eq!(
        result.factors,
        vec!["Thursday (Jupiter day) - optimistic trading (+1)"]
    );
    assert_eq!(result.label, SentimentLabel::Bullish);
}

#[test]
fn test_override_resolution() {
    let mut overrides = OutcomeOverrides::new();
    let date = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();
    overrides
        .insert(
            date,
            OutcomeOverride {
                label: SentimentLabel::ExtremelyBearish,
                score: -5.0,
                note: Some("Tariff shock".to_string()),
            },
        )
        .unwrap();

    let result = overrides.resolve(date).unwrap();
    assert!(result.overridden);
    assert_eq!(result.label, SentimentLabel::ExtremelyBearish);
    assert_eq!(result.factors.len(), 2);
    assert!(result.factors[0].contains("Extremely Bearish"));
    assert!(overrides.resolve(wednesday()).is_none());
}
