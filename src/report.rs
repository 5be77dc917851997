//! Display model for a finished comparison: panel texts and chart series.

use std::{fmt, str::FromStr};

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::simulator::SimulationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NumberLocale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    EnUs,
}

impl NumberLocale {
    fn group_separator(self) -> char {
        match self {
            NumberLocale::PtBr => '.',
            NumberLocale::EnUs => ',',
        }
    }
}

impl FromStr for NumberLocale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt-br" | "pt_br" | "pt" => Ok(NumberLocale::PtBr),
            "en-us" | "en_us" | "en" => Ok(NumberLocale::EnUs),
            other => bail!("unsupported locale '{other}' (expected pt-BR or en-US)"),
        }
    }
}

impl fmt::Display for NumberLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberLocale::PtBr => write!(f, "pt-BR"),
            NumberLocale::EnUs => write!(f, "en-US"),
        }
    }
}

/// Shown instead of a number once a value has overflowed `f64`.
pub const OUT_OF_RANGE: &str = "out of range";

/// Rounds to the nearest integer and groups thousands.
pub fn format_grouped(value: f64, locale: NumberLocale) -> String {
    if !value.is_finite() {
        return OUT_OF_RANGE.to_string();
    }
    let digits = format!("{:.0}", value.abs().round());
    let separator = locale.group_separator();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value.round() < 0.0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

pub fn format_percent(percent: f64) -> String {
    if !percent.is_finite() {
        return OUT_OF_RANGE.to_string();
    }
    format!("{percent:.1}%")
}

/// Caption shown under a population input while the user types.
pub fn population_caption(value: f64, locale: NumberLocale) -> String {
    format!("{} inhabitants", format_grouped(value, locale))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
}

/// Two parallel value sequences keyed by period, ready for a line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<u32>,
    pub datasets: [ChartDataset; 2],
}

impl ChartSeries {
    pub fn from_result(name_a: &str, name_b: &str, result: &SimulationResult) -> Self {
        let labels = result.series.iter().map(|point| point.period).collect();
        let data_a = result.series.iter().map(|point| point.value_a).collect();
        let data_b = result.series.iter().map(|point| point.value_b).collect();
        Self {
            labels,
            datasets: [
                ChartDataset {
                    label: name_a.to_string(),
                    data: data_a,
                },
                ChartDataset {
                    label: name_b.to_string(),
                    data: data_b,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub periods: u32,
    pub periods_label: String,
    pub winner: String,
    pub overtaken: String,
    pub final_population_a: String,
    pub final_population_b: String,
    pub growth_a: String,
    pub growth_b: String,
    pub converged: bool,
    pub chart: ChartSeries,
}

impl ComparisonReport {
    pub fn build(
        name_a: &str,
        name_b: &str,
        result: &SimulationResult,
        locale: NumberLocale,
    ) -> Self {
        Self {
            periods: result.periods,
            periods_label: format!("{} years", result.periods),
            winner: name_a.to_string(),
            overtaken: name_b.to_string(),
            final_population_a: format_grouped(result.final_value_a, locale),
            final_population_b: format_grouped(result.final_value_b, locale),
            growth_a: format_percent(result.growth_percent_a),
            growth_b: format_percent(result.growth_percent_b),
            converged: result.crossed_over(),
            chart: ChartSeries::from_result(name_a, name_b, result),
        }
    }
}

/// Plain-text rendering for the terminal.
pub fn render_text(report: &ComparisonReport) -> String {
    let mut out = String::new();
    if report.converged {
        out.push_str(&format!(
            "{} overtakes {} after {}.\n",
            report.winner, report.overtaken, report.periods_label
        ));
    } else {
        out.push_str(&format!(
            "{} does not overtake {} within {}.\n",
            report.winner, report.overtaken, report.periods_label
        ));
    }
    out.push_str(&format!(
        "  {:<20} final {:>24}  growth {:>10}\n",
        report.winner, report.final_population_a, report.growth_a
    ));
    out.push_str(&format!(
        "  {:<20} final {:>24}  growth {:>10}\n",
        report.overtaken, report.final_population_b, report.growth_b
    ));
    out
}
