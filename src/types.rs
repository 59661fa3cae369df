// Shared types for the sentiment monitor

/// One refresh cycle's worth of market inputs.
///
/// Produced by the gateway, consumed read-only by the classifier. Absent
/// upstream data is an explicit `None`, never an error state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketSnapshot {
    pub btc_price: Option<f64>,
    pub btc_24h: Option<f64>,       // 24h change, percent
    pub btc_7d: Option<f64>,        // 7d change, percent
    pub fear_greed_now: Option<u8>, // 0..=100
    pub fear_greed_prev: Option<u8>,
}

impl MarketSnapshot {
    /// Fallback snapshot for when every feed is down.
    pub fn unavailable() -> Self {
        Self {
            btc_price: None,
            btc_24h: None,
            btc_7d: None,
            fear_greed_now: None,
            fear_greed_prev: None,
        }
    }
}

/// Normalized daily OHLC candle. `time` is in UNIX seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}
