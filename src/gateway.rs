//! Market data gateway
//! Proxies the third-party price and sentiment APIs and normalizes their
//! shapes to what the classifier and simulator consume. Network and parse
//! failures are translated into `Err`/`None` here; the core never retries
//! or surfaces transport errors itself.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::types::{Candle, MarketSnapshot};

const COINGECKO_PRICE_URL: &str = "https://api.coingecko.com/api/v3/simple/price\
?ids=bitcoin&vs_currencies=usd&include_24hr_change=true&include_7d_change=true";
const FEAR_GREED_URL: &str = "https://api.alternative.me/fng/?limit=2";
// Free-tier OHLC endpoint; /market_chart requires an API key
const OHLC_URL_7D: &str =
    "https://api.coingecko.com/api/v3/coins/bitcoin/ohlc?vs_currency=usd&days=7";
const OHLC_URL_90D: &str =
    "https://api.coingecko.com/api/v3/coins/bitcoin/ohlc?vs_currency=usd&days=90";

const SNAPSHOT_CACHE_TTL_SECS: u64 = 900; // 15 minutes, matching upstream refresh cadence

/// A snapshot plus when the feeds were last hit.
#[derive(Debug, Clone, Copy)]
pub struct CachedSnapshot {
    pub snapshot: MarketSnapshot,
    pub updated_at: DateTime<Utc>,
    fetched_at: Instant,
}

/// Cache for the latest snapshot
pub type SnapshotCache = Arc<RwLock<Option<CachedSnapshot>>>;

/// Create a new snapshot cache
pub fn new_snapshot_cache() -> SnapshotCache {
    Arc::new(RwLock::new(None))
}

/// CoinGecko simple/price response
#[derive(Debug, Deserialize)]
struct PriceResponse {
    bitcoin: BitcoinQuote,
}

#[derive(Debug, Deserialize)]
struct BitcoinQuote {
    usd: f64,
    usd_24h_change: Option<f64>,
    usd_7d_change: Option<f64>,
}

/// alternative.me Fear & Greed response; values arrive as strings
#[derive(Debug, Deserialize)]
struct FearGreedResponse {
    data: Vec<FearGreedEntry>,
}

#[derive(Debug, Deserialize)]
struct FearGreedEntry {
    value: String,
}

fn parse_fear_greed(entry: Option<&FearGreedEntry>) -> Option<u8> {
    entry?
        .value
        .trim()
        .parse::<i64>()
        .ok()
        .map(|v| v.clamp(0, 100) as u8)
}

async fn fetch_price_quote() -> Result<BitcoinQuote> {
    let response = reqwest::get(COINGECKO_PRICE_URL)
        .await
        .context("CoinGecko request failed")?;
    if !response.status().is_success() {
        return Err(anyhow!("CoinGecko returned {}", response.status()));
    }
    let data: PriceResponse = response
        .json()
        .await
        .context("malformed CoinGecko price payload")?;
    Ok(data.bitcoin)
}

async fn fetch_fear_greed() -> Result<(u8, Option<u8>)> {
    let response = reqwest::get(FEAR_GREED_URL)
        .await
        .context("Fear & Greed request failed")?;
    if !response.status().is_success() {
        return Err(anyhow!("Fear & Greed returned {}", response.status()));
    }
    let data: FearGreedResponse = response
        .json()
        .await
        .context("malformed Fear & Greed payload")?;

    let now = parse_fear_greed(data.data.first())
        .ok_or_else(|| anyhow!("Fear & Greed feed returned no data"))?;
    let prev = parse_fear_greed(data.data.get(1)); // yesterday
    Ok((now, prev))
}

/// Fetch the current snapshot, hitting both feeds in parallel.
///
/// Serves from the cache while it is fresh. Either feed failing is an error;
/// the caller decides whether to fall back to a null-filled snapshot.
pub async fn fetch_market_snapshot(cache: &SnapshotCache) -> Result<MarketSnapshot> {
    if let Ok(cache_read) = cache.read() {
        if let Some(cached) = cache_read.as_ref() {
            if cached.fetched_at.elapsed() < Duration::from_secs(SNAPSHOT_CACHE_TTL_SECS) {
                return Ok(cached.snapshot);
            }
        }
    }

    let (quote_result, fg_result) = tokio::join!(fetch_price_quote(), fetch_fear_greed());
    let quote = quote_result?;
    let (fg_now, fg_prev) = fg_result?;

    let snapshot = MarketSnapshot {
        btc_price: Some(quote.usd),
        btc_24h: quote.usd_24h_change,
        btc_7d: quote.usd_7d_change,
        fear_greed_now: Some(fg_now),
        fear_greed_prev: fg_prev,
    };

    if let Ok(mut cache_write) = cache.write() {
        *cache_write = Some(CachedSnapshot {
            snapshot,
            updated_at: Utc::now(),
            fetched_at: Instant::now(),
        });
    }

    Ok(snapshot)
}

/// When the snapshot feeds were last hit, if ever.
pub fn last_updated(cache: &SnapshotCache) -> Option<DateTime<Utc>> {
    cache.read().ok()?.as_ref().map(|cached| cached.updated_at)
}

/// Raw CoinGecko OHLC row: [timestamp_ms, open, high, low, close]
type OhlcRow = [f64; 5];

async fn fetch_ohlc(url: &str) -> Result<Vec<OhlcRow>> {
    let response = reqwest::get(url).await.context("CoinGecko OHLC request failed")?;
    if !response.status().is_success() {
        return Err(anyhow!("CoinGecko OHLC returned {}", response.status()));
    }
    response
        .json::<Vec<OhlcRow>>()
        .await
        .context("malformed CoinGecko OHLC payload")
}

/// 7-day close prices for the sparkline.
pub async fn fetch_price_history() -> Option<Vec<f64>> {
    match fetch_ohlc(OHLC_URL_7D).await {
        Ok(rows) => {
            let prices: Vec<f64> = rows
                .iter()
                .map(|row| row[4])
                .filter(|close| close.is_finite() && *close > 0.0)
                .collect();
            if prices.is_empty() {
                None
            } else {
                Some(prices)
            }
        }
        Err(e) => {
            eprintln!("⚠️ Price history fetch failed: {}", e);
            None
        }
    }
}

/// 90-day daily candles, normalized to UNIX seconds and sorted ascending.
pub async fn fetch_daily_candles() -> Option<Vec<Candle>> {
    match fetch_ohlc(OHLC_URL_90D).await {
        Ok(rows) => {
            let mut candles: Vec<Candle> = rows
                .iter()
                .map(|row| Candle {
                    time: (row[0] / 1000.0).floor() as i64,
                    open: row[1],
                    high: row[2],
                    low: row[3],
                    close: row[4],
                })
                .collect();
            candles.sort_by_key(|c| c.time);
            if candles.is_empty() {
                None
            } else {
                Some(candles)
            }
        }
        Err(e) => {
            eprintln!("⚠️ Candle fetch failed: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_payload() {
        let payload = r#"{"bitcoin":{"usd":61234.5,"usd_24h_change":-1.25,"usd_7d_change":4.8}}"#;
        let parsed: PriceResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.bitcoin.usd, 61234.5);
        assert_eq!(parsed.bitcoin.usd_24h_change, Some(-1.25));
        assert_eq!(parsed.bitcoin.usd_7d_change, Some(4.8));
    }

    #[test]
    fn test_parse_price_payload_missing_changes() {
        let payload = r#"{"bitcoin":{"usd":61234.5}}"#;
        let parsed: PriceResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.bitcoin.usd_24h_change, None);
        assert_eq!(parsed.bitcoin.usd_7d_change, None);
    }

    #[test]
    fn test_parse_fear_greed_values() {
        let payload = r#"{"data":[{"value":"54"},{"value":"61"}]}"#;
        let parsed: FearGreedResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parse_fear_greed(parsed.data.first()), Some(54));
        assert_eq!(parse_fear_greed(parsed.data.get(1)), Some(61));
        assert_eq!(parse_fear_greed(parsed.data.get(2)), None);
    }

    #[test]
    fn test_parse_fear_greed_clamps_and_rejects_garbage() {
        let entry = FearGreedEntry { value: "250".to_string() };
        assert_eq!(parse_fear_greed(Some(&entry)), Some(100));
        let entry = FearGreedEntry { value: "-3".to_string() };
        assert_eq!(parse_fear_greed(Some(&entry)), Some(0));
        let entry = FearGreedEntry { value: "greedy".to_string() };
        assert_eq!(parse_fear_greed(Some(&entry)), None);
    }

    #[test]
    fn test_parse_ohlc_rows() {
        let payload = "[[1700000000000,100.0,110.0,95.0,105.0],[1700086400000,105.0,120.0,104.0,118.0]]";
        let rows: Vec<OhlcRow> = serde_json::from_str(payload).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][4], 105.0);
        assert_eq!(rows[1][0], 1700086400000.0);
    }
}
