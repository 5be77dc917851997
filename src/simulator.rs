//! Compound-growth race between two populations.
//!
//! Population A starts smaller and grows faster; the simulator applies one
//! growth step per period to both until A is no longer behind, or the
//! iteration cap stops it.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const DEFAULT_MAX_PERIODS: u32 = 10_000;

/// One population: a starting size and a fractional per-period growth rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Population {
    pub initial_value: f64,
    pub growth_rate: f64,
}

impl Population {
    pub fn new(initial_value: f64, growth_rate: f64) -> Self {
        Self {
            initial_value,
            growth_rate,
        }
    }

    /// Builds a population from a rate given in percent (5.0 means 5%).
    pub fn from_percent(initial_value: f64, growth_rate_percent: f64) -> Self {
        Self::new(initial_value, growth_rate_percent / 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub entity_a: Population,
    pub entity_b: Population,
}

impl SimulationRequest {
    pub fn new(entity_a: Population, entity_b: Population) -> Self {
        Self { entity_a, entity_b }
    }

    /// Checks the request in a fixed order: populations, then rates, then
    /// whether A can ever catch up.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let a = &self.entity_a;
        let b = &self.entity_b;

        if !is_positive(a.initial_value) || !is_positive(b.initial_value) {
            return Err(ValidationError::InvalidPopulation {
                a: a.initial_value,
                b: b.initial_value,
            });
        }

        if !is_positive(a.growth_rate) || !is_non_negative(b.growth_rate) {
            return Err(ValidationError::InvalidRate {
                a: a.growth_rate,
                b: b.growth_rate,
            });
        }

        if a.initial_value >= b.initial_value || a.growth_rate <= b.growth_rate {
            return Err(ValidationError::InfeasibleComparison);
        }

        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// State at the start of a period, before that period's growth is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub period: u32,
    pub value_a: f64,
    pub value_b: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub periods: u32,
    pub series: Vec<SeriesPoint>,
    pub final_value_a: f64,
    pub final_value_b: f64,
    pub growth_percent_a: f64,
    pub growth_percent_b: f64,
}

impl SimulationResult {
    /// True when A actually passed B. False means the run stopped at the cap.
    pub fn crossed_over(&self) -> bool {
        self.final_value_a > self.final_value_b
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GrowthSimulator {
    max_periods: u32,
}

impl GrowthSimulator {
    pub fn new(max_periods: u32) -> Self {
        Self { max_periods }
    }

    pub fn max_periods(&self) -> u32 {
        self.max_periods
    }

    pub fn simulate(&self, request: &SimulationRequest) -> Result<SimulationResult, ValidationError> {
        simulate(request, self.max_periods)
    }
}

impl Default for GrowthSimulator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PERIODS)
    }
}

/// Runs the race. Hitting `max_periods` without a crossover is not an error;
/// check [`SimulationResult::crossed_over`] to tell the two apart.
pub fn simulate(
    request: &SimulationRequest,
    max_periods: u32,
) -> Result<SimulationResult, ValidationError> {
    request.validate()?;

    let a = request.entity_a;
    let b = request.entity_b;
    let mut pop_a = a.initial_value;
    let mut pop_b = b.initial_value;
    let mut period = 0_u32;
    let mut series = Vec::new();

    while pop_a <= pop_b && period < max_periods {
        series.push(SeriesPoint {
            period,
            value_a: pop_a,
            value_b: pop_b,
        });
        pop_a *= 1.0 + a.growth_rate;
        pop_b *= 1.0 + b.growth_rate;
        period += 1;
    }

    Ok(SimulationResult {
        periods: period,
        series,
        final_value_a: pop_a,
        final_value_b: pop_b,
        growth_percent_a: growth_percent(a.initial_value, pop_a),
        growth_percent_b: growth_percent(b.initial_value, pop_b),
    })
}

fn growth_percent(initial: f64, final_value: f64) -> f64 {
    (final_value - initial) / initial * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(a: (f64, f64), b: (f64, f64)) -> SimulationRequest {
        SimulationRequest::new(
            Population::from_percent(a.0, a.1),
            Population::from_percent(b.0, b.1),
        )
    }

    #[test]
    fn faster_smaller_population_overtakes() {
        let result = simulate(&request((1000.0, 5.0), (2000.0, 2.0)), DEFAULT_MAX_PERIODS)
            .expect("valid request");
        assert_eq!(result.periods, 24);
        assert!(result.crossed_over());
        assert_eq!(result.series.len(), 24);
        assert_eq!(
            result.series[0],
            SeriesPoint {
                period: 0,
                value_a: 1000.0,
                value_b: 2000.0
            }
        );
        let last = result.series.last().unwrap();
        assert!(last.value_a <= last.value_b);
    }

    #[test]
    fn growth_percent_is_measured_from_initial_values() {
        let result = simulate(&request((1000.0, 5.0), (2000.0, 2.0)), DEFAULT_MAX_PERIODS)
            .unwrap();
        let expected_a = (1.05_f64.powi(24) - 1.0) * 100.0;
        let expected_b = (1.02_f64.powi(24) - 1.0) * 100.0;
        assert!((result.growth_percent_a - expected_a).abs() < 1e-6);
        assert!((result.growth_percent_b - expected_b).abs() < 1e-6);
    }

    #[test]
    fn zero_cap_returns_initial_values() {
        let result = simulate(&request((10.0, 50.0), (20.0, 0.0)), 0).unwrap();
        assert_eq!(result.periods, 0);
        assert!(result.series.is_empty());
        assert_eq!(result.final_value_a, 10.0);
        assert_eq!(result.final_value_b, 20.0);
        assert_eq!(result.growth_percent_a, 0.0);
        assert!(!result.crossed_over());
    }

    #[test]
    fn stagnant_second_population_is_allowed() {
        let result = simulate(&request((50.0, 100.0), (100.0, 0.0)), 100).unwrap();
        // 50 -> 100 (tie, keeps going) -> 200
        assert_eq!(result.periods, 2);
        assert_eq!(result.final_value_a, 200.0);
        assert_eq!(result.final_value_b, 100.0);
    }

    #[test]
    fn validation_checks_population_before_rate() {
        let err = simulate(&request((0.0, -1.0), (100.0, -1.0)), 10).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPopulation { .. }));
    }

    #[test]
    fn non_finite_inputs_are_rejected() {
        let err = simulate(&request((f64::NAN, 5.0), (100.0, 1.0)), 10).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPopulation { .. }));

        let err = simulate(&request((10.0, f64::INFINITY), (100.0, 1.0)), 10).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidRate { .. }));
    }

    #[test]
    fn equal_start_is_infeasible() {
        let err = simulate(&request((100.0, 5.0), (100.0, 1.0)), 10).unwrap_err();
        assert_eq!(err, ValidationError::InfeasibleComparison);
    }

    #[test]
    fn equal_rates_are_infeasible() {
        let err = simulate(&request((10.0, 2.0), (100.0, 2.0)), 10).unwrap_err();
        assert_eq!(err, ValidationError::InfeasibleComparison);
    }

    #[test]
    fn simulator_value_uses_its_cap() {
        let simulator = GrowthSimulator::new(3);
        let result = simulator
            .simulate(&request((1.0, 1.0), (1_000_000.0, 0.0)))
            .unwrap();
        assert_eq!(result.periods, 3);
        assert_eq!(GrowthSimulator::default().max_periods(), DEFAULT_MAX_PERIODS);
    }
}
