//! Ties the simulator to the display side: country names in, report out.

use serde::Serialize;

use crate::{
    countries::CountryDirectory,
    error::ValidationError,
    report::{ComparisonReport, NumberLocale},
    scenario::Contender,
    simulator::{GrowthSimulator, SimulationRequest, SimulationResult},
};

#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub report: ComparisonReport,
    pub result: SimulationResult,
}

pub struct Comparator {
    directory: CountryDirectory,
    locale: NumberLocale,
    simulator: GrowthSimulator,
}

impl Comparator {
    pub fn new(directory: CountryDirectory, locale: NumberLocale, max_periods: u32) -> Self {
        Self {
            directory,
            locale,
            simulator: GrowthSimulator::new(max_periods),
        }
    }

    pub fn directory(&self) -> &CountryDirectory {
        &self.directory
    }

    pub fn locale(&self) -> NumberLocale {
        self.locale
    }

    pub fn max_periods(&self) -> u32 {
        self.simulator.max_periods()
    }

    /// Country label for display; unknown codes show the code itself.
    pub fn display_name(&self, code: &str) -> String {
        match self.directory.name_of(code) {
            "" => code.trim().to_uppercase(),
            name => name.to_string(),
        }
    }

    /// Validates and simulates one race. Nothing is built when validation
    /// fails.
    pub fn compare(
        &self,
        contender: &Contender,
        incumbent: &Contender,
    ) -> Result<Comparison, ValidationError> {
        let request = SimulationRequest::new(contender.population(), incumbent.population());
        let result = self.simulator.simulate(&request)?;

        let name_a = self.display_name(&contender.country);
        let name_b = self.display_name(&incumbent.country);
        log::debug!(
            "{name_a} ({}, {}%) vs {name_b} ({}, {}%): {} periods",
            contender.population,
            contender.growth_rate_percent,
            incumbent.population,
            incumbent.growth_rate_percent,
            result.periods
        );
        if !result.crossed_over() {
            log::warn!(
                "{name_a} did not overtake {name_b} within {} periods",
                self.max_periods()
            );
        }

        let report = ComparisonReport::build(&name_a, &name_b, &result, self.locale);
        Ok(Comparison { report, result })
    }
}
