mod render;

use anyhow::Context;
use astro_market::analyzer::{MarketAnalyzer, MarketView, MAX_FORECAST_SPAN};
use astro_market::strategy::TradingPlan;
use astro_market::timeline::TimelineSlot;
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Settings file (default: configs/astro_market.toml, else built-in tables).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug, Clone)]
struct Query {
    /// Date as YYYY-MM-DD (default: today, local time).
    #[arg(long)]
    date: Option<String>,

    #[arg(long, default_value = "NIFTY")]
    symbol: String,
}

impl Query {
    fn date(&self) -> anyhow::Result<NaiveDate> {
        match &self.date {
            Some(text) => Ok(astro_market::parse_date(text)?),
            None => Ok(Local::now().date_naive()),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Planets, aspects, sentiment and timeline for one day.
    View(Query),
    /// Hora-by-hora timeline only.
    Timeline(Query),
    /// Daily sentiment for a window around the date.
    Forecast {
        #[command(flatten)]
        query: Query,

        /// Days either side of the date.
        #[arg(
            long,
            default_value_t = 3,
            value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_FORECAST_SPAN))
        )]
        span: u32,
    },
    /// Entry windows, risk guidance and symbol notes.
    Plan(Query),
    /// Re-evaluate on an interval and print the active hora. Ctrl-C stops.
    Watch {
        #[command(flatten)]
        query: Query,

        /// Poll interval in seconds (overrides watch.refresh_secs).
        #[arg(long)]
        every: Option<u64>,
    },
}

#[derive(Serialize)]
struct WatchTick<'a> {
    now: NaiveDateTime,
    date: NaiveDate,
    symbol: &'a str,
    label: astro_market::SentimentLabel,
    score: f64,
    slot: Option<&'a TimelineSlot>,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = market_config::load_market_config(cli.config.as_deref())?;
    let analyzer = MarketAnalyzer::new(config.analyzer).context("Invalid analyzer settings")?;

    match cli.command {
        Command::View(query) => {
            let view = analyzer.compute_market_view(query.date()?, &query.symbol);
            match cli.format {
                Format::Text => print!("{}", render::view(&view)),
                Format::Json => print_json(&view)?,
            }
        }
        Command::Timeline(query) => {
            let view = analyzer.compute_market_view(query.date()?, &query.symbol);
            match cli.format {
                Format::Text => print!("{}", render::timeline(&view)),
                Format::Json => print_json(&view.timeline)?,
            }
        }
        Command::Forecast { query, span } => {
            let days = analyzer.forecast(query.date()?, span);
            match cli.format {
                Format::Text => print!("{}", render::forecast(query.symbol.trim(), &days)),
                Format::Json => print_json(&days)?,
            }
        }
        Command::Plan(query) => {
            let view = analyzer.compute_market_view(query.date()?, &query.symbol);
            let plan = TradingPlan::from_view(&view);
            match cli.format {
                Format::Text => print!("{}", render::plan(&plan)),
                Format::Json => print_json(&plan)?,
            }
        }
        Command::Watch { query, every } => {
            let refresh = every
                .map(std::time::Duration::from_secs)
                .unwrap_or(config.refresh);
            if refresh.is_zero() {
                anyhow::bail!("--every must be at least 1 second");
            }
            watch(&analyzer, &query, refresh, cli.format).await?;
        }
    }

    Ok(())
}

/// Poll until Ctrl-C. The view is recomputed only when the (date, symbol)
/// key changes; in between only the active hora is looked up again.
async fn watch(
    analyzer: &MarketAnalyzer,
    query: &Query,
    refresh: std::time::Duration,
    format: Format,
) -> anyhow::Result<()> {
    let fixed_date = match &query.date {
        Some(text) => Some(astro_market::parse_date(text)?),
        None => None,
    };
    let symbol = query.symbol.trim().to_string();

    let mut ticker = tokio::time::interval(refresh);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut cached: Option<((NaiveDate, String), MarketView)> = None;
    log::info!("watching {} every {:?}", symbol, refresh);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Local::now().naive_local();
                let date = fixed_date.unwrap_or_else(|| now.date());
                let key = (date, symbol.clone());

                let stale = cached.as_ref().map_or(true, |(k, _)| *k != key);
                if stale {
                    log::debug!("recomputing view for {} {}", date, symbol);
                    let view = analyzer.compute_market_view(date, &symbol);
                    cached = Some((key, view));
                }
                let Some((_, view)) = cached.as_ref() else {
                    continue;
                };

                match format {
                    Format::Text => println!("{}", render::tick(view, now)),
                    Format::Json => {
                        let tick = WatchTick {
                            now,
                            date,
                            symbol: &symbol,
                            label: view.sentiment.label,
                            score: view.sentiment.score,
                            slot: view.current_slot(now),
                        };
                        println!("{}", serde_json::to_string(&tick)?);
                    }
                }
            }
            res = &mut ctrl_c => {
                res.context("Failed to listen for Ctrl-C")?;
                log::info!("watch stopped");
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_span_limit() {
        let cli = Cli::try_parse_from(["astro-market", "forecast", "--span", "366"]).unwrap();
        assert!(matches!(cli.command, Command::Forecast { span: 366, .. }));
        assert!(Cli::try_parse_from(["astro-market", "forecast", "--span", "367"]).is_err());
        assert!(Cli::try_parse_from(["astro-market", "forecast", "--span", "4294967295"]).is_err());
    }
}
