mod cycles;
mod gateway;
mod projection;
mod render;
mod rng;
mod sentiment;
mod simulator;
mod types;

use anyhow::{anyhow, bail, Result};
use types::MarketSnapshot;

// Equity closes are a static placeholder; they feed the cross-market
// interpretation only, never the risk score.
// TODO: wire a real S&P 500 close feed
const SPX_CLOSE_NOW: f64 = 5100.0;
const SPX_CLOSE_PREV: f64 = 5100.0;

/// Runtime configuration, read once at startup.
struct MonitorConfig {
    monthly: f64,
    years: u32,
    refresh_secs: u64,
}

impl MonitorConfig {
    fn from_env() -> Result<Self> {
        let monthly = env_parse("DCA_MONTHLY", 500.0)?;
        let years = env_parse("DCA_YEARS", 10u32)?;
        let refresh_secs = env_parse("REFRESH_SECS", 900u64)?;

        if monthly <= 0.0 {
            bail!("DCA_MONTHLY must be positive");
        }
        if years == 0 {
            bail!("DCA_YEARS must be positive");
        }
        if refresh_secs == 0 {
            bail!("REFRESH_SECS must be positive");
        }

        Ok(Self {
            monthly,
            years,
            refresh_secs,
        })
    }
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("{} must be numeric, got '{}': {}", key, raw, e)),
        Err(_) => Ok(default),
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    println!("Starting BTC Sentiment Monitor...");

    let config = match MonitorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {}", e);
            return;
        }
    };
    println!(
        "Config: ${}/mo over {} years | refresh every {}s",
        config.monthly, config.years, config.refresh_secs
    );

    let cache = gateway::new_snapshot_cache();

    let mut interval =
        tokio::time::interval(tokio::time::Duration::from_secs(config.refresh_secs));
    loop {
        interval.tick().await;
        refresh_cycle(&cache, &config).await;
    }
}

/// One full refresh: fetch, classify, render, project.
///
/// Every cycle is independent; the only shared state is the gateway cache.
async fn refresh_cycle(cache: &gateway::SnapshotCache, config: &MonitorConfig) {
    let snapshot = match gateway::fetch_market_snapshot(cache).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("⚠️ Live data fetch failed, falling back to static: {}", e);
            MarketSnapshot::unavailable()
        }
    };

    // Degrade the sparkline to a flat line when history is down but the
    // price is known; skip it entirely otherwise.
    let spark = match gateway::fetch_price_history().await {
        Some(prices) => Some(prices),
        None => snapshot.btc_price.map(|price| vec![price; 120]),
    };
    let candles = gateway::fetch_daily_candles().await;

    let assessment = sentiment::assess(&snapshot);
    let equity_mood = sentiment::equity_mood(SPX_CLOSE_NOW, SPX_CLOSE_PREV);
    let interpretation = sentiment::interpret(snapshot.fear_greed_now, equity_mood);

    render::render_overview(
        &snapshot,
        &assessment,
        &interpretation,
        spark.as_deref(),
        candles.as_deref(),
        gateway::last_updated(cache),
    );

    match snapshot.btc_price {
        Some(price) => {
            let outcome = projection::run_simulation(price, config.monthly, config.years);
            render::render_projection(&outcome, config.monthly, config.years);
        }
        None => println!("⚠️ Skipping DCA projection: price feed unavailable"),
    }
}
