//! Trading plan derived from a market view: hora entry windows, periods to
//! avoid, risk guidance and symbol-specific notes.

use crate::analyzer::MarketView;
use crate::ephemeris::CelestialBody;
use crate::sentiment::SentimentLabel;
use crate::vedic::Dignity;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

const MAX_WINDOWS: usize = 3;
const ENTRY_THRESHOLD: f64 = 1.5;
const AVOID_THRESHOLD: f64 = -1.5;

/// Fixed stop-loss for intraday trades, percent.
pub const STOP_LOSS_INTRADAY_PCT: f64 = 0.5;
/// Fixed stop-loss for swing trades, percent.
pub const STOP_LOSS_SWING_PCT: f64 = 1.0;
/// Daily loss limit, percent of capital.
pub const MAX_DAILY_LOSS_PCT: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryWindow {
    pub start: NaiveDateTime,
    pub hora_lord: CelestialBody,
    /// Profit target, percent
    pub target_pct: f64,
    /// Stop-loss, percent
    pub stop_pct: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvoidWindow {
    pub start: NaiveDateTime,
    pub hora_lord: CelestialBody,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionSize {
    /// 10-15% of capital
    Conservative,
    /// 15-20% of capital
    Moderate,
    /// 20-25% of capital
    Normal,
}

impl PositionSize {
    pub fn describe(self) -> &'static str {
        match self {
            PositionSize::Conservative => "Conservative (10-15%)",
            PositionSize::Moderate => "Moderate (15-20%)",
            PositionSize::Normal => "Normal (20-25%)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskGuidance {
    pub position_size: PositionSize,
    pub aggressive_profit_booking: bool,
    pub reduce_size: bool,
    pub stop_loss_intraday_pct: f64,
    pub stop_loss_swing_pct: f64,
    pub max_daily_loss_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingPlan {
    pub symbol: String,
    pub label: SentimentLabel,
    pub score: f64,
    pub entries: Vec<EntryWindow>,
    pub avoid: Vec<AvoidWindow>,
    pub risk: RiskGuidance,
    pub symbol_notes: Vec<String>,
    pub insight: String,
}

impl TradingPlan {
    pub fn from_view(view: &MarketView) -> Self {
        let score = view.sentiment.score;

        let entries = view
            .timeline
            .slots
            .iter()
            .filter(|slot| slot.score >= ENTRY_THRESHOLD)
            .take(MAX_WINDOWS)
            .map(|slot| EntryWindow {
                start: slot.start,
                hora_lord: slot.hora_lord,
                target_pct: 1.2 + slot.score * 0.3,
                stop_pct: 0.5,
                reason: slot.influence.clone(),
            })
            .collect();

        let avoid = view
            .timeline
            .slots
            .iter()
            .filter(|slot| slot.score <= AVOID_THRESHOLD)
            .take(MAX_WINDOWS)
            .map(|slot| AvoidWindow {
                start: slot.start,
                hora_lord: slot.hora_lord,
                reason: slot.influence.clone(),
            })
            .collect();

        let position_size = if score.abs() > 3.0 {
            PositionSize::Conservative
        } else if score.abs() > 1.0 {
            PositionSize::Moderate
        } else {
            PositionSize::Normal
        };

        Self {
            symbol: view.symbol.clone(),
            label: view.sentiment.label,
            score,
            entries,
            avoid,
            risk: RiskGuidance {
                position_size,
                aggressive_profit_booking: view.sentiment.label == SentimentLabel::ExtremelyBullish,
                reduce_size: score.abs() > 3.0,
                stop_loss_intraday_pct: STOP_LOSS_INTRADAY_PCT,
                stop_loss_swing_pct: STOP_LOSS_SWING_PCT,
                max_daily_loss_pct: MAX_DAILY_LOSS_PCT,
            },
            symbol_notes: symbol_notes(view),
            insight: insight(view),
        }
    }
}

fn level(value: f64, high: f64, moderate: f64, labels: [&'static str; 3]) -> &'static str {
    if value > high {
        labels[0]
    } else if value > moderate {
        labels[1]
    } else {
        labels[2]
    }
}

fn symbol_notes(view: &MarketView) -> Vec<String> {
    let score = view.sentiment.score;
    let lon = |body| view.planet(body).map(|p| p.longitude).unwrap_or(0.0);
    let symbol = view.symbol.to_uppercase();

    if symbol == "NIFTY" {
        vec![
            format!("Support: Jupiter at {:.0}° provides support", lon(CelestialBody::Jupiter)),
            format!("Resistance: Saturn at {:.0}° may create resistance", lon(CelestialBody::Saturn)),
            format!("Breakout potential: {}", level(score, 2.0, 0.0, ["High", "Moderate", "Low"])),
            format!(
                "Intraday range: expected {}",
                level(score.abs(), 2.0, 1.0, ["expansion", "normal", "contraction"])
            ),
        ]
    } else if symbol == "BANKNIFTY" {
        let Some(mars) = view.planet(CelestialBody::Mars) else {
            return Vec::new();
        };
        let banking = if score > 1.0 {
            "Positive"
        } else if score < -1.0 {
            "Negative"
        } else {
            "Mixed"
        };
        let focus = if matches!(mars.dignity, Dignity::Exalted | Dignity::OwnSign) {
            "Private banks"
        } else if score > 0.0 {
            "PSU banks"
        } else {
            "Defensive approach"
        };
        vec![
            format!("Mars influence: Mars at {:.0}° in {} - {}", mars.longitude, mars.sign, mars.dignity),
            format!("Banking sentiment: {}", banking),
            format!(
                "Volatility expected: {}",
                if score.abs() > 2.0 { "High" } else { "Moderate" }
            ),
            format!("Sector focus: {}", focus),
        ]
    } else if symbol.contains("GOLD") {
        vec![
            format!("Venus at {:.0}° affects precious metals", lon(CelestialBody::Venus)),
            format!(
                "Jupiter at {:.0}° provides {} support",
                lon(CelestialBody::Jupiter),
                if score > 1.0 { "strong" } else { "weak" }
            ),
            format!(
                "Safe haven status: {}",
                if score < -1.0 { "Enhanced" } else { "Normal" }
            ),
        ]
    } else {
        Vec::new()
    }
}

fn insight(view: &MarketView) -> String {
    let score = view.sentiment.score;
    let lead = view
        .timeline
        .slots
        .first()
        .map(|slot| slot.hora_lord.name())
        .unwrap_or("planetary");
    let advice = if score > 0.0 {
        "Focus on long positions during favorable horas and use trailing stops."
    } else if score < -1.0 {
        "Exercise caution and consider short strategies with tight risk management."
    } else {
        "Mixed signals suggest smaller position sizes and quick scalping strategies."
    };
    format!(
        "{} shows {} energy with primary influence from {} transits. {}",
        view.date.format("%d %B %Y (%A)"),
        view.sentiment.label.name().to_lowercase(),
        lead,
        advice
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::compute_market_view;
    use chrono::NaiveDate;

    fn view(symbol: &str) -> MarketView {
        compute_market_view(NaiveDate::from_ymd_opt(2025, 3, 11).unwrap(), symbol)
    }

    #[test]
    fn test_windows_respect_thresholds() {
        let plan = TradingPlan::from_view(&view("NIFTY"));
        assert!(plan.entries.len() <= MAX_WINDOWS);
        assert!(plan.avoid.len() <= MAX_WINDOWS);
        for entry in &plan.entries {
            assert!(entry.target_pct >= 1.2 + ENTRY_THRESHOLD * 0.3 - 1e-9);
            assert_eq!(entry.stop_pct, 0.5);
        }
    }

    #[test]
    fn test_symbol_notes() {
        assert_eq!(TradingPlan::from_view(&view("NIFTY")).symbol_notes.len(), 4);
        assert_eq!(TradingPlan::from_view(&view("BANKNIFTY")).symbol_notes.len(), 4);
        assert_eq!(TradingPlan::from_view(&view("XAUGOLD")).symbol_notes.len(), 3);
        assert!(TradingPlan::from_view(&view("AAPL")).symbol_notes.is_empty());
    }

    #[test]
    fn test_risk_follows_score() {
        let mut v = view("NIFTY");
        v.sentiment.score = 3.5;
        v.sentiment.label = SentimentLabel::VeryBullish;
        let plan = TradingPlan::from_view(&v);
        assert_eq!(plan.risk.position_size, PositionSize::Conservative);
        assert!(plan.risk.reduce_size);
        assert!(!plan.risk.aggressive_profit_booking);

        v.sentiment.score = 0.2;
        let plan = TradingPlan::from_view(&v);
        assert_eq!(plan.risk.position_size, PositionSize::Normal);
        assert!(!plan.risk.reduce_size);
    }

    #[test]
    fn test_fixed_risk_rules() {
        for symbol in ["NIFTY", "BTC"] {
            let risk = TradingPlan::from_view(&view(symbol)).risk;
            assert_eq!(risk.stop_loss_intraday_pct, 0.5);
            assert_eq!(risk.stop_loss_swing_pct, 1.0);
            assert_eq!(risk.max_daily_loss_pct, 2.0);
        }
    }

    #[test]
    fn test_insight_mentions_date() {
        let plan = TradingPlan::from_view(&view("NIFTY"));
        assert!(plan.insight.starts_with("11 March 2025 (Tuesday)"));
    }
}
