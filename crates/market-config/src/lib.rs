use anyhow::Context;
use astro_market::aspects::AspectType;
use astro_market::ephemeris::{BodyMotion, CelestialBody};
use astro_market::sentiment::{OutcomeOverride, SentimentLabel};
use astro_market::settings::AnalyzerSettings;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_PATHS: [&str; 2] = ["configs/astro_market.toml", "../../configs/astro_market.toml"];

#[derive(Debug, Clone)]
pub struct MarketConfig {
    pub analyzer: AnalyzerSettings,
    /// Poll interval of the `watch` command
    pub refresh: Duration,
    /// File the settings came from, `None` when running on defaults
    pub source: Option<PathBuf>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerSettings::default(),
            refresh: Duration::from_secs(default_refresh_secs()),
            source: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct BodyToml {
    base: f64,
    rate: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    reference_date: Option<String>,
    #[serde(default)]
    bodies: BTreeMap<String, BodyToml>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AspectsToml {
    #[serde(default)]
    conjunction: Option<f64>,
    #[serde(default)]
    sextile: Option<f64>,
    #[serde(default)]
    square: Option<f64>,
    #[serde(default)]
    trine: Option<f64>,
    #[serde(default)]
    opposition: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct WeekdayBiasToml {
    monday: Option<f64>,
    tuesday: Option<f64>,
    wednesday: Option<f64>,
    thursday: Option<f64>,
    friday: Option<f64>,
    saturday: Option<f64>,
    sunday: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SentimentToml {
    #[serde(default)]
    aspect_limit: Option<usize>,
    #[serde(default)]
    harmonious_weight: Option<f64>,
    #[serde(default)]
    challenging_weight: Option<f64>,
    #[serde(default)]
    conjunction_weight: Option<f64>,
    #[serde(default)]
    weekday_bias: WeekdayBiasToml,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TimelineToml {
    #[serde(default)]
    indian_symbols: Option<Vec<String>>,
    #[serde(default)]
    aspects_per_hora: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
struct OverrideToml {
    date: String,
    label: String,
    score: f64,
    #[serde(default)]
    note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct WatchToml {
    #[serde(default = "default_refresh_secs")]
    refresh_secs: u64,
}

impl Default for WatchToml {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_secs(),
        }
    }
}

fn default_refresh_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    aspects: AspectsToml,
    #[serde(default)]
    sentiment: SentimentToml,
    #[serde(default)]
    timeline: TimelineToml,
    #[serde(default)]
    overrides: Vec<OverrideToml>,
    #[serde(default)]
    watch: WatchToml,
}

/// Try the common relative locations of `configs/astro_market.toml`.
pub fn read_config_toml_text() -> Option<(PathBuf, String)> {
    DEFAULT_PATHS.iter().find_map(|p| {
        fs::read_to_string(p)
            .ok()
            .map(|text| (PathBuf::from(p), text))
    })
}

/// Parse config text; keys that are absent keep their built-in defaults.
pub fn parse_market_config(text: &str) -> anyhow::Result<MarketConfig> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse astro_market config: {e}"))?;
    let RootConfigToml {
        ephemeris,
        aspects,
        sentiment,
        timeline,
        overrides,
        watch,
    } = root;

    let mut settings = AnalyzerSettings::default();

    if let Some(date) = ephemeris.reference_date {
        settings.ephemeris.reference_date = astro_market::parse_date(&date)
            .with_context(|| "ephemeris.reference_date")?;
    }
    for (name, body) in ephemeris.bodies {
        let celestial: CelestialBody = name
            .parse()
            .with_context(|| format!("ephemeris.bodies.{name}"))?;
        settings.ephemeris.motions.insert(
            celestial,
            BodyMotion {
                base_lon: body.base,
                daily_motion: body.rate,
            },
        );
    }

    let orbs = [
        (AspectType::Conjunction, aspects.conjunction),
        (AspectType::Sextile, aspects.sextile),
        (AspectType::Square, aspects.square),
        (AspectType::Trine, aspects.trine),
        (AspectType::Opposition, aspects.opposition),
    ];
    for (aspect, orb) in orbs {
        if let Some(orb) = orb {
            settings.aspects.orbs.insert(aspect, orb);
        }
    }

    let scoring = &mut settings.scoring;
    if let Some(limit) = sentiment.aspect_limit {
        scoring.aspect_limit = limit;
    }
    if let Some(weight) = sentiment.harmonious_weight {
        scoring.harmonious_weight = weight;
    }
    if let Some(weight) = sentiment.challenging_weight {
        scoring.challenging_weight = weight;
    }
    if let Some(weight) = sentiment.conjunction_weight {
        scoring.conjunction_weight = weight;
    }
    let bias = sentiment.weekday_bias;
    let days = [
        (&mut scoring.weekday_bias.monday, bias.monday),
        (&mut scoring.weekday_bias.tuesday, bias.tuesday),
        (&mut scoring.weekday_bias.wednesday, bias.wednesday),
        (&mut scoring.weekday_bias.thursday, bias.thursday),
        (&mut scoring.weekday_bias.friday, bias.friday),
        (&mut scoring.weekday_bias.saturday, bias.saturday),
        (&mut scoring.weekday_bias.sunday, bias.sunday),
    ];
    for (slot, value) in days {
        if let Some(value) = value {
            *slot = value;
        }
    }

    if let Some(symbols) = timeline.indian_symbols {
        settings.timeline.indian_symbols = symbols;
    }
    if let Some(n) = timeline.aspects_per_hora {
        settings.timeline.aspects_per_hora = n;
    }

    for entry in overrides {
        let date = astro_market::parse_date(&entry.date).context("overrides.date")?;
        let label: SentimentLabel = entry
            .label
            .parse()
            .with_context(|| format!("overrides label for {date}"))?;
        settings.overrides.insert(
            date,
            OutcomeOverride {
                label,
                score: entry.score,
                note: entry.note,
            },
        )?;
    }

    settings.validate().context("Invalid astro_market config")?;

    if watch.refresh_secs == 0 {
        anyhow::bail!("watch.refresh_secs must be at least 1");
    }

    Ok(MarketConfig {
        analyzer: settings,
        refresh: Duration::from_secs(watch.refresh_secs),
        source: None,
    })
}

/// Load settings from `path`, or from the default locations when no path
/// is given. Falls back to built-in defaults if no default file exists; an
/// explicit path that cannot be read is an error.
pub fn load_market_config(path: Option<&Path>) -> anyhow::Result<MarketConfig> {
    let (source, text) = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            (path.to_path_buf(), text)
        }
        None => match read_config_toml_text() {
            Some(found) => found,
            None => {
                log::info!(
                    "No astro_market.toml found in {:?}; using built-in tables",
                    DEFAULT_PATHS
                );
                return Ok(MarketConfig::default());
            }
        },
    };

    let mut config = parse_market_config(&text)
        .with_context(|| format!("Failed to load {}", source.display()))?;
    log::info!(
        "Loaded config from {} ({} overrides)",
        source.display(),
        config.analyzer.overrides.len()
    );
    config.source = Some(source);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    #[test]
    fn test_empty_text_is_defaults() {
        let config = parse_market_config("").unwrap();
        assert_eq!(config.analyzer, AnalyzerSettings::default());
        assert_eq!(config.refresh, Duration::from_secs(60));
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let text = include_str!("../../../configs/astro_market.toml");
        let config = parse_market_config(text).unwrap();
        assert_eq!(config.analyzer, AnalyzerSettings::default());
    }

    #[test]
    fn test_partial_sections() {
        let text = r#"
[ephemeris]
reference_date = "2024-01-01"

[ephemeris.bodies]
jupiter = { base = 10.0, rate = 0.1 }

[aspects]
sextile = 4.0

[sentiment]
aspect_limit = 5

[sentiment.weekday_bias]
monday = 0.0

[timeline]
indian_symbols = ["NIFTY", "SENSEX"]

[watch]
refresh_secs = 15
"#;
        let config = parse_market_config(text).unwrap();
        let analyzer = &config.analyzer;
        assert_eq!(
            analyzer.ephemeris.reference_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        let jupiter = analyzer.ephemeris.motions[&CelestialBody::Jupiter];
        assert_eq!(jupiter.base_lon, 10.0);
        assert_eq!(analyzer.ephemeris.motions[&CelestialBody::Sun].base_lon, 279.5);
        assert_eq!(analyzer.aspects.orb_for(AspectType::Sextile), 4.0);
        assert_eq!(analyzer.aspects.orb_for(AspectType::Trine), 8.0);
        assert_eq!(analyzer.scoring.aspect_limit, 5);
        assert_eq!(analyzer.scoring.weekday_bias.monday, 0.0);
        assert_eq!(analyzer.scoring.weekday_bias.tuesday, -1.0);
        assert_eq!(analyzer.timeline.indian_symbols, vec!["NIFTY", "SENSEX"]);
        assert_eq!(config.refresh, Duration::from_secs(15));
    }

    #[test]
    fn test_overrides() {
        let text = r#"
[[overrides]]
date = "2025-04-07"
label = "Extremely Bearish"
score = -5.0
note = "Tariff shock"

[[overrides]]
date = "2025-04-09"
label = "extremely-bullish"
score = 5.0
"#;
        let config = parse_market_config(text).unwrap();
        let overrides = &config.analyzer.overrides;
        assert_eq!(overrides.len(), 2);
        let first = overrides
            .get(NaiveDate::from_ymd_opt(2025, 4, 7).unwrap())
            .unwrap();
        assert_eq!(first.label, SentimentLabel::ExtremelyBearish);
        assert_eq!(first.note.as_deref(), Some("Tariff shock"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(parse_market_config("[aspects]\ntrine = -1.0\n").is_err());
        assert!(parse_market_config("[ephemeris.bodies]\npluto = { base = 1.0, rate = 1.0 }\n").is_err());
        assert!(parse_market_config("[[overrides]]\ndate = \"2025-13-01\"\nlabel = \"Bullish\"\nscore = 1.0\n").is_err());
        assert!(parse_market_config("[[overrides]]\ndate = \"2025-01-01\"\nlabel = \"Sideways\"\nscore = 1.0\n").is_err());
        assert!(parse_market_config("[watch]\nrefresh_secs = 0\n").is_err());
        assert!(parse_market_config("[timeline\n").is_err());
    }

    #[test]
    fn test_non_finite_override_score_rejected() {
        for score in ["nan", "inf", "-inf"] {
            let text = format!(
                "[[overrides]]\ndate = \"2025-04-07\"\nlabel = \"Bearish\"\nscore = {score}\n"
            );
            assert!(parse_market_config(&text).is_err(), "{score}");
        }
    }

    #[test]
    fn test_duplicate_override_rejected() {
        let text = r#"
[[overrides]]
date = "2025-04-07"
label = "Bearish"
score = -1.0

[[overrides]]
date = "2025-04-07"
label = "Bullish"
score = 1.0
"#;
        assert!(parse_market_config(text).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sentiment]\nchallenging_weight = 1.5").unwrap();
        let config = load_market_config(Some(file.path())).unwrap();
        assert_eq!(config.analyzer.scoring.challenging_weight, 1.5);
        assert_eq!(config.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_market_config(Some(&missing)).is_err());
    }
}
