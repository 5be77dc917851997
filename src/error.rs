use thiserror::Error;

/// Why a comparison request was rejected before any period was simulated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("initial populations must be positive (got {a} and {b})")]
    InvalidPopulation { a: f64, b: f64 },

    #[error("growth rates out of range: first must be positive, second non-negative (got {a} and {b})")]
    InvalidRate { a: f64, b: f64 },

    #[error("the first population must start smaller and grow faster than the second")]
    InfeasibleComparison,
}

impl ValidationError {
    /// Stable machine-readable code, used by the JSON API.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::InvalidPopulation { .. } => "invalid_population",
            ValidationError::InvalidRate { .. } => "invalid_rate",
            ValidationError::InfeasibleComparison => "infeasible_comparison",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_snake_case_codes() {
        assert_eq!(
            ValidationError::InvalidPopulation { a: 0.0, b: 1.0 }.kind(),
            "invalid_population"
        );
        assert_eq!(
            ValidationError::InvalidRate { a: 0.0, b: 0.0 }.kind(),
            "invalid_rate"
        );
        assert_eq!(
            ValidationError::InfeasibleComparison.kind(),
            "infeasible_comparison"
        );
    }

    #[test]
    fn messages_mention_offending_values() {
        let err = ValidationError::InvalidPopulation { a: -3.0, b: 10.0 };
        assert!(err.to_string().contains("-3"));
    }
}
