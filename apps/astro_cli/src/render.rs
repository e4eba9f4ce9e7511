//! Plain-text rendering of pipeline results.

use astro_market::analyzer::{ForecastDay, MarketView};
use astro_market::strategy::TradingPlan;
use astro_market::timeline::TimelineSlot;
use chrono::NaiveDateTime;
use std::fmt::Write;

fn slot_line(slot: &TimelineSlot) -> String {
    format!(
        "{}-{}  {:<8} {:<13} {:>+5.1}  {}",
        slot.start.format("%H:%M"),
        slot.end.format("%H:%M"),
        slot.hora_lord.name(),
        slot.label.name(),
        slot.score,
        slot.action().describe()
    )
}

pub fn view(view: &MarketView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} on {} ({} session)",
        view.symbol,
        view.date.format("%Y-%m-%d (%A)"),
        view.session.name()
    );
    let _ = writeln!(
        out,
        "Sentiment: {} ({:+.2}){}",
        view.sentiment.label,
        view.sentiment.score,
        if view.sentiment.overridden { " [recorded]" } else { "" }
    );
    for factor in &view.sentiment.factors {
        let _ = writeln!(out, "  - {}", factor);
    }

    let _ = writeln!(out, "\nPlanets:");
    for p in &view.planetary_data {
        let _ = writeln!(
            out,
            "  {:<8} {:>8}  {:<12} {:<18} pada {}  {:<11}{}",
            p.body.name(),
            p.degree,
            p.sign.name(),
            p.nakshatra.name(),
            p.pada,
            p.dignity.name(),
            if p.retrograde { " R" } else { "" }
        );
    }

    let _ = writeln!(out, "\nAspects ({}):", view.aspects.len());
    for aspect in &view.aspects {
        let _ = writeln!(out, "  {}", aspect);
    }

    out.push('\n');
    out.push_str(&timeline(view));
    out
}

pub fn timeline(view: &MarketView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Hora timeline for {} ({} horas):",
        view.symbol,
        view.timeline.len()
    );
    for slot in &view.timeline.slots {
        let _ = writeln!(out, "  {}", slot_line(slot));
        let _ = writeln!(out, "      {}", slot.influence);
    }
    out
}

pub fn forecast(symbol: &str, days: &[ForecastDay]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Forecast for {}:", symbol);
    for day in days {
        let _ = writeln!(
            out,
            "{} {}  {:<17} {:>+6.2}  {:>2} aspects  {}",
            if day.is_anchor { ">" } else { " " },
            day.date.format("%a %Y-%m-%d"),
            day.label.name(),
            day.score,
            day.aspect_count,
            day.bias.describe()
        );
    }
    out
}

pub fn plan(plan: &TradingPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Trading plan for {}: {} ({:+.2})",
        plan.symbol, plan.label, plan.score
    );

    let _ = writeln!(out, "\nEntry windows:");
    if plan.entries.is_empty() {
        let _ = writeln!(out, "  none");
    }
    for entry in &plan.entries {
        let _ = writeln!(
            out,
            "  {} {} hora: target {:.1}%, stop {:.1}%",
            entry.start.format("%H:%M"),
            entry.hora_lord,
            entry.target_pct,
            entry.stop_pct
        );
    }

    let _ = writeln!(out, "\nAvoid:");
    if plan.avoid.is_empty() {
        let _ = writeln!(out, "  none");
    }
    for avoid in &plan.avoid {
        let _ = writeln!(out, "  {} {} hora", avoid.start.format("%H:%M"), avoid.hora_lord);
    }

    let _ = writeln!(out, "\nRisk:");
    let _ = writeln!(out, "  Position size: {}", plan.risk.position_size.describe());
    let _ = writeln!(
        out,
        "  Profit booking: {}",
        if plan.risk.aggressive_profit_booking { "Aggressive" } else { "Gradual" }
    );
    let _ = writeln!(
        out,
        "  Size adjustment: {}",
        if plan.risk.reduce_size { "Reduce" } else { "Normal" }
    );
    let _ = writeln!(
        out,
        "  Stop-loss: {:.1}% intraday, {:.1}% swing",
        plan.risk.stop_loss_intraday_pct, plan.risk.stop_loss_swing_pct
    );
    let _ = writeln!(
        out,
        "  Max daily loss: {:.1}% of capital",
        plan.risk.max_daily_loss_pct
    );

    if !plan.symbol_notes.is_empty() {
        let _ = writeln!(out, "\n{} notes:", plan.symbol);
        for note in &plan.symbol_notes {
            let _ = writeln!(out, "  {}", note);
        }
    }
    let _ = writeln!(out, "\n{}", plan.insight);
    out
}

/// One line per watch tick.
pub fn tick(view: &MarketView, now: NaiveDateTime) -> String {
    let head = format!(
        "[{}] {} {} ({:+.2})",
        now.format("%Y-%m-%d %H:%M:%S"),
        view.symbol,
        view.sentiment.label,
        view.sentiment.score
    );
    match view.current_slot(now) {
        Some(slot) => format!("{} | {}", head, slot_line(slot)),
        None => format!("{} | session closed", head),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astro_market::compute_market_view;
    use chrono::NaiveDate;

    fn sample() -> MarketView {
        compute_market_view(NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(), "NIFTY")
    }

    #[test]
    fn test_view_lists_every_planet() {
        let text = view(&sample());
        assert!(text.starts_with("NIFTY on 2026-08-06 (Thursday) (Indian session)"));
        assert!(text.contains("Jupiter exalted (+3)"));
        assert!(text.contains("Punarvasu"));
        assert_eq!(text.matches(" pada ").count(), 9);
    }

    #[test]
    fn test_tick_outside_session() {
        let view = sample();
        let early = view.date.and_hms_opt(8, 0, 0).unwrap();
        assert!(tick(&view, early).ends_with("session closed"));
        let open = view.date.and_hms_opt(10, 30, 0).unwrap();
        assert!(tick(&view, open).contains("Jupiter"));
    }

    #[test]
    fn test_plan_lists_fixed_risk_rules() {
        let text = plan(&TradingPlan::from_view(&sample()));
        assert!(text.contains("  Stop-loss: 0.5% intraday, 1.0% swing\n"));
        assert!(text.contains("  Max daily loss: 2.0% of capital\n"));
    }
}
