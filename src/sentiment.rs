//! Sentiment and Risk Classifier
//!
//! Pure functions mapping Fear & Greed readings and BTC price changes to a
//! market-cycle position, a 0-100 risk score, and narrative text.
//! Positions: Capitulation, Accumulation, Expansion, Euphoria

use crate::types::MarketSnapshot;

/// Risk score weighting
const FG_WEIGHT: f64 = 0.60;          // sentiment carries 60% of the score
const VOLATILITY_CAP: f64 = 40.0;     // volatility contributes at most 40 points
const DOWNSIDE_WEIGHT: f64 = 1.5;     // losses weigh more than gains
const DAILY_MOVE_WEIGHT: f64 = 1.2;   // 24h move counts slightly more than 7d
const NEUTRAL_FG: f64 = 50.0;         // fallback when the sentiment feed is down

/// Market cycle position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketPosition {
    Capitulation,
    Accumulation,
    Expansion,
    Euphoria,
}

impl MarketPosition {
    pub fn name(&self) -> &'static str {
        match self {
            MarketPosition::Capitulation => "Capitulation",
            MarketPosition::Accumulation => "Accumulation",
            MarketPosition::Expansion => "Expansion",
            MarketPosition::Euphoria => "Euphoria",
        }
    }

    /// One-line thesis for this phase
    pub fn thesis(&self) -> &'static str {
        match self {
            MarketPosition::Capitulation => "Panic is loud. Survival comes first.",
            MarketPosition::Accumulation => "Volatility is noise. Structure still holds.",
            MarketPosition::Expansion => "Trend improves. Discipline matters more than optimism.",
            MarketPosition::Euphoria => "Risk is highest. Protect gains and avoid chasing.",
        }
    }

    /// Short behavioral note shown next to the bias
    pub fn note(&self) -> &'static str {
        match self {
            MarketPosition::Capitulation => "Panic lows feel permanent. They aren't.",
            MarketPosition::Accumulation => "Historically, this is where retail loses conviction.",
            MarketPosition::Expansion => "Most mistakes happen by sizing up late.",
            MarketPosition::Euphoria => "Top signals feel good. That's the trap.",
        }
    }
}

/// Risk label buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLabel {
    Low,
    Normal,
    Elevated,
    High,
}

impl RiskLabel {
    pub fn from_score(score: u8) -> Self {
        if score >= 75 {
            RiskLabel::High
        } else if score >= 55 {
            RiskLabel::Elevated
        } else if score >= 35 {
            RiskLabel::Normal
        } else {
            RiskLabel::Low
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RiskLabel::Low => "Low",
            RiskLabel::Normal => "Normal",
            RiskLabel::Elevated => "Elevated",
            RiskLabel::High => "High",
        }
    }
}

/// Everything the presentation layer needs for the sentiment panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentAssessment {
    pub position: MarketPosition,
    pub risk_score: u8,
    pub risk_label: RiskLabel,
    pub bias: &'static str,
    pub thesis: &'static str,
}

/// Average today's and yesterday's Fear & Greed to dampen single-day noise.
pub fn smoothed_fear_greed(now: Option<u8>, prev: Option<u8>) -> Option<f64> {
    let now = now? as f64;
    match prev {
        Some(prev) => Some((now + prev as f64) / 2.0),
        None => Some(now),
    }
}

/// Cycle phase from smoothed Fear & Greed plus 7d price action.
///
/// Rule order matters: first match wins. Missing inputs default to
/// Accumulation, so the presentation layer never sees a hole.
pub fn classify_position(smoothed_fg: Option<f64>, btc_7d: Option<f64>) -> MarketPosition {
    let (fg, d7) = match (smoothed_fg, btc_7d) {
        (Some(fg), Some(d7)) => (fg, d7),
        _ => return MarketPosition::Accumulation,
    };

    if fg <= 25.0 {
        MarketPosition::Capitulation
    } else if fg <= 45.0 && d7 < 5.0 {
        MarketPosition::Accumulation
    } else if fg <= 75.0 && d7 >= 0.0 {
        MarketPosition::Expansion
    } else if fg > 75.0 {
        MarketPosition::Euphoria
    } else {
        MarketPosition::Accumulation
    }
}

/// Risk score: Fear & Greed level 60% + asymmetric recent volatility up to 40.
///
/// Downside moves are weighted 1.5x more than upside. The volatility term is
/// deliberately not normalized against any horizon; it is a stylistic
/// heuristic, not a calibrated risk model.
pub fn risk_score(fg_now: Option<u8>, btc_24h: Option<f64>, btc_7d: Option<f64>) -> u8 {
    let fg_risk = fg_now.map(|v| v as f64).unwrap_or(NEUTRAL_FG);

    let change_24h = btc_24h.unwrap_or(0.0);
    let change_7d = btc_7d.unwrap_or(0.0);
    let w24 = if change_24h < 0.0 { DOWNSIDE_WEIGHT } else { 1.0 };
    let w7d = if change_7d < 0.0 { DOWNSIDE_WEIGHT } else { 1.0 };
    let adj_24h = change_24h.abs() * w24;
    let adj_7d = change_7d.abs() * w7d;

    let volatility = (adj_24h * DAILY_MOVE_WEIGHT + adj_7d).clamp(0.0, VOLATILITY_CAP);

    (fg_risk * FG_WEIGHT + volatility).clamp(0.0, 100.0).round() as u8
}

/// Stance wording per phase; risk only adjusts the middle phases.
pub fn bias(position: MarketPosition, risk: u8) -> &'static str {
    match position {
        MarketPosition::Capitulation => "Defensive → Patient",
        MarketPosition::Accumulation => {
            if risk >= 60 {
                "Neutral → Careful"
            } else {
                "Neutral → Constructive"
            }
        }
        MarketPosition::Expansion => {
            if risk >= 70 {
                "Constructive → Cautious"
            } else {
                "Constructive"
            }
        }
        MarketPosition::Euphoria => "Cautious → Defensive",
    }
}

/// Full classification of one snapshot.
pub fn assess(snapshot: &MarketSnapshot) -> SentimentAssessment {
    let smoothed = smoothed_fear_greed(snapshot.fear_greed_now, snapshot.fear_greed_prev);
    let position = classify_position(smoothed, snapshot.btc_7d);
    let score = risk_score(snapshot.fear_greed_now, snapshot.btc_24h, snapshot.btc_7d);

    SentimentAssessment {
        position,
        risk_score: score,
        risk_label: RiskLabel::from_score(score),
        bias: bias(position, score),
        thesis: position.thesis(),
    }
}

// ===== Cross-market interpretation =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoMood {
    ExtremeFear,
    Fear,
    Greed,
    ExtremeGreed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquityMood {
    Fear,
    Cautious,
    Optimistic,
    Euphoric,
}

/// Title + body for the cross-market readout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpretation {
    pub title: &'static str,
    pub text: &'static str,
}

pub fn crypto_state(fg: u8) -> CryptoMood {
    if fg < 25 {
        CryptoMood::ExtremeFear
    } else if fg < 50 {
        CryptoMood::Fear
    } else if fg < 75 {
        CryptoMood::Greed
    } else {
        CryptoMood::ExtremeGreed
    }
}

pub fn equity_state(mood: i32) -> EquityMood {
    if mood < 30 {
        EquityMood::Fear
    } else if mood < 50 {
        EquityMood::Cautious
    } else if mood < 70 {
        EquityMood::Optimistic
    } else {
        EquityMood::Euphoric
    }
}

/// Percentage change between two closes. `None` when inputs are unusable.
pub fn pct_change(now: f64, prev: f64) -> Option<f64> {
    if !now.is_finite() || !prev.is_finite() || prev == 0.0 {
        return None;
    }
    Some((now - prev) / prev * 100.0)
}

/// Map an equity 1-day change onto the 0-100 mood scale.
pub fn equity_mood(close_now: f64, close_prev: f64) -> Option<i32> {
    pct_change(close_now, close_prev).map(|d| (50.0 + d * 2.0).round() as i32)
}

pub fn combined_interpretation(crypto: CryptoMood, equity: EquityMood) -> Interpretation {
    let crypto_fearful = matches!(crypto, CryptoMood::Fear | CryptoMood::ExtremeFear);
    let crypto_greedy = matches!(crypto, CryptoMood::Greed | CryptoMood::ExtremeGreed);

    if crypto_fearful && equity == EquityMood::Optimistic {
        Interpretation {
            title: "Divergence",
            text: "Crypto sentiment is fearful while equities remain optimistic.",
        }
    } else if crypto_greedy && equity == EquityMood::Fear {
        Interpretation {
            title: "Warning",
            text: "Crypto optimism is elevated while equity markets are stressed.",
        }
    } else if crypto_fearful && equity == EquityMood::Fear {
        Interpretation {
            title: "Risk-Off Environment",
            text: "Both crypto and equities show fear.",
        }
    } else if crypto_greedy && matches!(equity, EquityMood::Optimistic | EquityMood::Euphoric) {
        Interpretation {
            title: "Elevated Risk",
            text: "Optimism is high across markets.",
        }
    } else {
        Interpretation {
            title: "Neutral Conditions",
            text: "Market signals are mixed.",
        }
    }
}

/// Interpretation with the feed-down defaults applied (crypto falls back to
/// fear, equities to cautious).
pub fn interpret(fg_now: Option<u8>, equity_mood: Option<i32>) -> Interpretation {
    let crypto = fg_now.map(crypto_state).unwrap_or(CryptoMood::Fear);
    let equity = equity_mood.map(equity_state).unwrap_or(EquityMood::Cautious);
    combined_interpretation(crypto, equity)
}

// ===== Briefing text =====

/// Up to three "what changed" bullets for the morning-brief panel.
pub fn what_changed(snapshot: &MarketSnapshot) -> Vec<String> {
    let mut bullets = Vec::new();

    match snapshot.fear_greed_now {
        Some(now) => match snapshot.fear_greed_prev {
            Some(prev) => {
                let delta = now as i32 - prev as i32;
                let trend = if delta >= 0 { "improving" } else { "worsening" };
                let sign = if delta > 0 { "+" } else { "" };
                bullets.push(format!("Sentiment: {} ({}{}).", trend, sign, delta));
            }
            None => bullets.push(format!("Sentiment: {}/100 today.", now)),
        },
        None => bullets.push("Sentiment: unavailable (API).".to_string()),
    }

    if let Some(change) = snapshot.btc_24h {
        let dir = if change >= 0.0 { "up" } else { "down" };
        let sign = if change >= 0.0 { "+" } else { "" };
        bullets.push(format!("BTC: 24h {} ({}{:.2}%).", dir, sign, change));
    }
    if let Some(change) = snapshot.btc_7d {
        let dir = if change >= 0.0 { "up" } else { "down" };
        let sign = if change >= 0.0 { "+" } else { "" };
        bullets.push(format!("BTC: 7d {} ({}{:.2}%).", dir, sign, change));
    }

    bullets.truncate(3);
    bullets
}

/// One-line "what it means" summary keyed by phase.
pub fn what_it_means(position: MarketPosition, interpretation_title: &str) -> String {
    match position {
        MarketPosition::Capitulation => {
            "Stress is elevated. Reduce noise and avoid reactive decisions.".to_string()
        }
        MarketPosition::Accumulation => {
            "Short-term noise increased. Long-term thesis stays intact.".to_string()
        }
        MarketPosition::Expansion => {
            "Momentum improves, but discipline prevents overexposure.".to_string()
        }
        MarketPosition::Euphoria => {
            let title = if interpretation_title.is_empty() {
                "mixed signals"
            } else {
                interpretation_title
            };
            format!("Risk is elevated ({}). Avoid chasing and respect limits.", title)
        }
    }
}
