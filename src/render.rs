//! Terminal presentation layer
//!
//! Binds snapshots, assessments, and projections to stdout. Holds no market
//! logic; everything shown here is computed by the classifier or the
//! projection engine.

use chrono::{DateTime, Utc};

use crate::cycles;
use crate::projection::SimulationOutcome;
use crate::sentiment::{self, Interpretation, SentimentAssessment};
use crate::types::{Candle, MarketSnapshot};

const SPARK_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const SPARK_WIDTH: usize = 40;
const SPARK_MAX_POINTS: usize = 120;

/// Signed percentage with two decimals; em dash when the value is absent.
pub fn format_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}{:.2}%", if v >= 0.0 { "+" } else { "" }, v),
        None => "—".to_string(),
    }
}

/// Rounded dollar amount with thousands separators.
pub fn format_usd(value: f64) -> String {
    let rounded = value.round() as i64;
    if rounded < 0 {
        format!("-${}", group_thousands(rounded.unsigned_abs()))
    } else {
        format!("${}", group_thousands(rounded.unsigned_abs()))
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Unicode block sparkline over the most recent points.
pub fn sparkline(points: &[f64], width: usize) -> String {
    if points.is_empty() || width == 0 {
        return String::new();
    }

    let data = &points[points.len().saturating_sub(SPARK_MAX_POINTS)..];
    let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = if max - min > 0.0 { max - min } else { 1.0 };

    (0..width)
        .map(|i| {
            let idx = if width == 1 {
                0
            } else {
                i * (data.len() - 1) / (width - 1)
            };
            let level = ((data[idx] - min) / range * 7.0).round() as usize;
            SPARK_GLYPHS[level.min(7)]
        })
        .collect()
}

fn risk_dot(score: u8) -> &'static str {
    if score >= 65 {
        "🔴"
    } else if score >= 40 {
        "🟡"
    } else {
        "🟢"
    }
}

/// Render the market overview panel.
pub fn render_overview(
    snapshot: &MarketSnapshot,
    assessment: &SentimentAssessment,
    interpretation: &Interpretation,
    spark_points: Option<&[f64]>,
    candles: Option<&[Candle]>,
    updated_at: Option<DateTime<Utc>>,
) {
    println!("\n══════════════════════════════════════════════════");
    println!(" BTC MARKET OVERVIEW");
    if let Some(ts) = updated_at {
        println!(" Updated:   {}", ts.format("%Y-%m-%d %H:%M UTC"));
    }
    println!("──────────────────────────────────────────────────");

    match snapshot.btc_price {
        Some(price) => println!(" Price:     {}", format_usd(price)),
        None => println!(" Price:     unavailable"),
    }
    println!(
        " Change:    24h {} | 7d {}",
        format_pct(snapshot.btc_24h),
        format_pct(snapshot.btc_7d)
    );
    match snapshot.fear_greed_now {
        Some(now) => match snapshot.fear_greed_prev {
            Some(prev) => println!(" Fear&Greed: {}/100 (prev {})", now, prev),
            None => println!(" Fear&Greed: {}/100", now),
        },
        None => println!(" Fear&Greed: —"),
    }

    if let Some(points) = spark_points {
        if !points.is_empty() {
            println!(" 7d trend:  {}", sparkline(points, SPARK_WIDTH));
        }
    }
    if let Some(candles) = candles {
        if let Some((low, high)) = range_90d(candles) {
            println!(" 90d range: {} – {}", format_usd(low), format_usd(high));
        }
    }

    println!("──────────────────────────────────────────────────");
    println!(
        " Position:  {} {}",
        assessment.position.name(),
        risk_dot(assessment.risk_score)
    );
    println!(" Thesis:    {}", assessment.thesis);
    println!(
        " Risk:      {}/100 ({})",
        assessment.risk_score,
        assessment.risk_label.name()
    );
    println!(" Bias:      {}", assessment.bias);
    println!(" Note:      {}", assessment.position.note());
    println!(
        " Signals:   {} — {}",
        interpretation.title, interpretation.text
    );

    let bullets = sentiment::what_changed(snapshot);
    if !bullets.is_empty() {
        println!(" What changed:");
        for bullet in bullets {
            println!("   • {}", bullet);
        }
    }
    println!(
        " Means:     {}",
        sentiment::what_it_means(assessment.position, interpretation.title)
    );

    render_playbook(assessment);
}

fn render_playbook(assessment: &SentimentAssessment) {
    let playbook = cycles::playbook(assessment.position);
    println!("──────────────────────────────────────────────────");
    println!(" CYCLE PLAYBOOK: {}", playbook.title);
    println!(" {}", playbook.feel);
    println!(" Common mistakes:");
    for mistake in playbook.mistakes {
        println!("   • {}", mistake);
    }
    println!(" Better behaviors:");
    for item in playbook.better {
        println!("   • {}", item);
    }
    println!(" {}", playbook.example);
    println!("══════════════════════════════════════════════════");
}

fn range_90d(candles: &[Candle]) -> Option<(f64, f64)> {
    if candles.is_empty() {
        return None;
    }
    let low = candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
    let high = candles
        .iter()
        .map(|c| c.high)
        .fold(f64::NEG_INFINITY, f64::max);
    Some((low, high))
}

/// Render the DCA projection table plus the Base-Case summary.
pub fn render_projection(outcome: &SimulationOutcome, monthly_contribution: f64, years: u32) {
    println!("\n══════════════════════════════════════════════════");
    println!(
        " DCA PROJECTION: {}/mo over {} years ({} months)",
        format_usd(monthly_contribution),
        years,
        outcome.months
    );
    println!("──────────────────────────────────────────────────");
    println!(
        " {:<14} {:>12} {:>14} {:>8}",
        "Scenario", "Invested", "Final Value", "Gain"
    );
    for result in &outcome.results {
        println!(
            " {:<14} {:>12} {:>14} {:>7.1}%",
            result.scenario.name,
            format_usd(result.total_invested),
            format_usd(result.final_value),
            result.gain_pct
        );
    }

    let base = outcome.base_case();
    println!("──────────────────────────────────────────────────");
    println!(" Invested:  {}", format_usd(outcome.total_invested));
    println!(" Base Case: {}", format_usd(base.final_value));
    println!(" Return:    {:.1}%", base.gain_pct);
    println!(" Illustrative heuristic only, not a forecast.");
    println!("══════════════════════════════════════════════════");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(Some(1.5)), "+1.50%");
        assert_eq!(format_pct(Some(-2.0)), "-2.00%");
        assert_eq!(format_pct(Some(0.0)), "+0.00%");
        assert_eq!(format_pct(None), "—");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(61234.5), "$61,235");
        assert_eq!(format_usd(999.4), "$999");
        assert_eq!(format_usd(1_000_000.0), "$1,000,000");
        assert_eq!(format_usd(-1500.0), "-$1,500");
        assert_eq!(format_usd(0.2), "$0");
    }

    #[test]
    fn test_sparkline_width_and_extremes() {
        let points: Vec<f64> = (0..120).map(|i| i as f64).collect();
        let line = sparkline(&points, 40);
        assert_eq!(line.chars().count(), 40);
        assert_eq!(line.chars().next(), Some('▁'));
        assert_eq!(line.chars().last(), Some('█'));
    }

    #[test]
    fn test_sparkline_flat_series() {
        let line = sparkline(&[5.0; 10], 10);
        assert_eq!(line.chars().count(), 10);
        // zero range collapses to the bottom glyph
        assert!(line.chars().all(|c| c == '▁'));
    }

    #[test]
    fn test_sparkline_empty() {
        assert_eq!(sparkline(&[], 40), "");
        assert_eq!(sparkline(&[1.0], 0), "");
    }

    #[test]
    fn test_range_90d() {
        let candles = vec![
            Candle { time: 1, open: 10.0, high: 15.0, low: 8.0, close: 12.0 },
            Candle { time: 2, open: 12.0, high: 20.0, low: 11.0, close: 19.0 },
        ];
        assert_eq!(range_90d(&candles), Some((8.0, 20.0)));
        assert_eq!(range_90d(&[]), None);
    }

    #[test]
    fn test_risk_dot_thresholds() {
        assert_eq!(risk_dot(39), "🟢");
        assert_eq!(risk_dot(40), "🟡");
        assert_eq!(risk_dot(64), "🟡");
        assert_eq!(risk_dot(65), "🔴");
    }
}
