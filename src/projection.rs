//! DCA Projection Engine
//!
//! Turns simulated price paths into accumulated holdings, portfolio value
//! over time, and summary numbers per scenario. The projection is an
//! illustrative heuristic, not a forecast.

use crate::simulator::{self, GrowthScenario, SCENARIOS};

/// Outcome of one scenario's projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionResult {
    pub scenario: GrowthScenario,
    pub monthly_value: Vec<f64>,
    pub total_invested: f64,
    pub final_value: f64,
    pub gain_pct: f64,
}

/// One full simulation run: all three scenarios over the same horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub months: u32,
    pub total_invested: f64,
    pub results: Vec<ProjectionResult>,
}

impl SimulationOutcome {
    /// Base-Case result for the headline summary row.
    pub fn base_case(&self) -> &ProjectionResult {
        self.results
            .iter()
            .find(|r| r.scenario.name == "Base Case")
            .unwrap_or(&self.results[0])
    }
}

/// Walk a price path with a fixed monthly contribution.
///
/// Each month buys `contribution / price` BTC; the recorded value is the
/// running holdings marked at that month's price. Panics on a non-positive
/// contribution or empty path; callers validate at the boundary.
pub fn project(
    scenario: GrowthScenario,
    path: &[f64],
    monthly_contribution: f64,
) -> ProjectionResult {
    assert!(monthly_contribution > 0.0, "monthly contribution must be positive");
    assert!(!path.is_empty(), "price path must not be empty");

    let mut btc_held = 0.0;
    let mut monthly_value = Vec::with_capacity(path.len());
    for &price in path {
        btc_held += monthly_contribution / price;
        monthly_value.push(btc_held * price);
    }

    let total_invested = monthly_contribution * path.len() as f64;
    let final_value = monthly_value[monthly_value.len() - 1];
    let gain_pct = (final_value - total_invested) / total_invested * 100.0;

    ProjectionResult {
        scenario,
        monthly_value,
        total_invested,
        final_value,
        gain_pct,
    }
}

/// Run the full three-scenario simulation.
///
/// The seed derives from the inputs alone, so the same contribution and
/// horizon always reproduce the same simulated path set.
pub fn run_simulation(start_price: f64, monthly_contribution: f64, years: u32) -> SimulationOutcome {
    assert!(start_price > 0.0, "start_price must be positive");
    assert!(monthly_contribution > 0.0, "monthly contribution must be positive");
    assert!(years > 0, "years must be positive");

    let months = years * 12;
    let seed = (monthly_contribution * 17.0 + years as f64 * 31.0 + 7.0) as u32;

    let results = SCENARIOS
        .iter()
        .map(|scenario| {
            let path = simulator::generate_path(start_price, months, scenario.annual_growth, seed);
            project(*scenario, &path, monthly_contribution)
        })
        .collect();

    SimulationOutcome {
        months,
        total_invested: monthly_contribution * months as f64,
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::generate_path;

    #[test]
    fn test_project_is_idempotent() {
        let path = generate_path(60_000.0, 60, 0.40, 8538);
        let a = project(SCENARIOS[1], &path, 500.0);
        let b = project(SCENARIOS[1], &path, 500.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_project_accounting() {
        // Flat path: every buy gets the same price, so value equals invested
        let path = vec![50_000.0; 12];
        let result = project(SCENARIOS[0], &path, 500.0);
        assert_eq!(result.total_invested, 6_000.0);
        assert!((result.final_value - 6_000.0).abs() < 1e-6);
        assert!(result.gain_pct.abs() < 1e-9);
        assert_eq!(result.monthly_value.len(), 12);
        assert!((result.monthly_value[0] - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_rising_path_gains() {
        // Price doubles after the first buy; the first tranche doubles too
        let path = vec![100.0, 200.0];
        let result = project(SCENARIOS[0], &path, 100.0);
        // Month 0: 1 BTC worth 100. Month 1: 1.5 BTC worth 300.
        assert!((result.final_value - 300.0).abs() < 1e-9);
        assert!((result.gain_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_run_simulation_shape() {
        let outcome = run_simulation(60_000.0, 500.0, 1);
        assert_eq!(outcome.months, 12);
        assert_eq!(outcome.results.len(), 3);
        assert_eq!(outcome.total_invested, 6_000.0);
        for result in &outcome.results {
            assert_eq!(result.monthly_value.len(), 12);
            assert_eq!(result.total_invested, 6_000.0);
        }
    }

    #[test]
    fn test_run_simulation_deterministic() {
        let a = run_simulation(60_000.0, 500.0, 10);
        let b = run_simulation(60_000.0, 500.0, 10);
        assert_eq!(a, b);
    }

    #[test]
    fn test_growth_ordering_dominates_shared_noise() {
        // All scenarios share the seed-derived shock sequence, so at a 1-year
        // horizon the higher growth rate must come out ahead.
        let outcome = run_simulation(60_000.0, 500.0, 1);
        let conservative = &outcome.results[0];
        let base = outcome.base_case();
        let bull = &outcome.results[2];
        assert!(conservative.final_value < base.final_value);
        assert!(base.final_value < bull.final_value);
    }

    #[test]
    fn test_base_case_lookup() {
        let outcome = run_simulation(60_000.0, 500.0, 2);
        assert_eq!(outcome.base_case().scenario.name, "Base Case");
    }

    #[test]
    #[should_panic(expected = "monthly contribution must be positive")]
    fn test_project_rejects_non_positive_contribution() {
        project(SCENARIOS[0], &[100.0], 0.0);
    }

    #[test]
    #[should_panic(expected = "years must be positive")]
    fn test_run_simulation_rejects_zero_years() {
        run_simulation(60_000.0, 500.0, 0);
    }
}
