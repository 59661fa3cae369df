//! Price Path Simulator
//!
//! Generates a monthly BTC price trajectory per growth scenario: geometric
//! growth with yearly decay, plus seeded Gaussian noise. Same inputs always
//! reproduce the same path, so a given simulation redraws the same chart.

use crate::rng;

/// A named annual-growth assumption.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthScenario {
    pub name: &'static str,
    pub annual_growth: f64,
}

/// The three fixed scenarios every simulation runs.
pub const SCENARIOS: [GrowthScenario; 3] = [
    GrowthScenario { name: "Conservative", annual_growth: 0.25 },
    GrowthScenario { name: "Base Case", annual_growth: 0.40 },
    GrowthScenario { name: "Bull Case", annual_growth: 0.50 },
];

/// A path never drops below this fraction of its start price.
pub const PRICE_FLOOR_RATIO: f64 = 0.15;

const GROWTH_DECAY_PER_YEAR: f64 = 0.03; // returns slow as the asset matures
const MIN_ANNUAL_GROWTH: f64 = 0.10;
const MONTHLY_SHOCK_STDEV: f64 = 0.07;

/// Generate one monthly price path.
///
/// Each month draws two generator values at fixed seed offsets
/// (`seed + i*13 + 1`, `seed + i*13 + 2`) so every month's shock is
/// independent and reproducible. The draws go through the Box-Muller cosine
/// transform to produce a normal shock with 7% monthly standard deviation.
///
/// Panics on non-positive `start_price` or `months`; callers validate at the
/// boundary.
pub fn generate_path(start_price: f64, months: u32, annual_growth: f64, seed: u32) -> Vec<f64> {
    assert!(start_price > 0.0, "start_price must be positive");
    assert!(months > 0, "months must be positive");

    let floor = start_price * PRICE_FLOOR_RATIO;
    let mut price = start_price;
    let mut path = Vec::with_capacity(months as usize);

    for i in 0..months {
        let year = i / 12;
        let decay = 1.0 / (1.0 + year as f64 * GROWTH_DECAY_PER_YEAR);
        let adjusted_annual = (annual_growth * decay).max(MIN_ANNUAL_GROWTH);
        let monthly_growth = (1.0 + adjusted_annual).powf(1.0 / 12.0) - 1.0;

        let u1 = rng::uniform(seed.wrapping_add(i.wrapping_mul(13)).wrapping_add(1));
        let u2 = rng::uniform(seed.wrapping_add(i.wrapping_mul(13)).wrapping_add(2));
        let z = (-2.0 * u1.max(1e-10).ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        let shock = z * MONTHLY_SHOCK_STDEV;

        price *= (1.0 + monthly_growth) * (1.0 + shock);
        if price < floor {
            price = floor;
        }
        path.push(price);
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_is_deterministic() {
        let a = generate_path(60_000.0, 120, 0.40, 8538);
        let b = generate_path(60_000.0, 120, 0.40, 8538);
        assert_eq!(a, b);
    }

    #[test]
    fn test_path_length_matches_months() {
        assert_eq!(generate_path(60_000.0, 12, 0.25, 1).len(), 12);
        assert_eq!(generate_path(60_000.0, 360, 0.50, 1).len(), 360);
    }

    #[test]
    fn test_path_respects_floor() {
        // Stress with zero growth and many seeds; the floor must always hold
        for seed in 0..50 {
            let start = 1000.0;
            let path = generate_path(start, 240, 0.0, seed);
            for price in path {
                assert!(price >= start * PRICE_FLOOR_RATIO - 1e-9);
            }
        }
    }

    #[test]
    fn test_different_seeds_give_different_paths() {
        let a = generate_path(60_000.0, 24, 0.40, 1);
        let b = generate_path(60_000.0, 24, 0.40, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_prices_stay_positive() {
        for seed in [7, 8538, 99_999] {
            for price in generate_path(30_000.0, 120, 0.25, seed) {
                assert!(price > 0.0);
            }
        }
    }

    #[test]
    #[should_panic(expected = "start_price must be positive")]
    fn test_rejects_non_positive_start_price() {
        generate_path(0.0, 12, 0.40, 1);
    }

    #[test]
    #[should_panic(expected = "months must be positive")]
    fn test_rejects_zero_months() {
        generate_path(60_000.0, 0, 0.40, 1);
    }
}
