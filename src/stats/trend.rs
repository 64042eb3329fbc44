//! Trend and curve-shape classification of a rate history

use serde::{Serialize, Serializer};
use std::fmt;

/// Whether throughput went up or down over the history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increasing,
    Decreasing,
}

impl Direction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rough curve shape of the rate history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    Linear,
    Exponential,
}

impl Pattern {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Exponential => "exponential",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction and shape derived from one collection's positive rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendClassification {
    pub average_rate: f64,
    #[serde(rename = "trend")]
    pub direction: Direction,
    pub pattern: Pattern,
}

/// Result of analysing a rate history
///
/// The two data-shortage variants are ordinary outcomes, not errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrendOutcome {
    Classified(TrendClassification),
    /// Fewer than two samples recorded
    InsufficientData,
    /// Samples exist but none has a positive rate
    NoValidRates,
}

impl TrendOutcome {
    pub const INSUFFICIENT_DATA: &'static str = "Insufficient data";
    pub const NO_VALID_RATES: &'static str = "No valid rates";

    /// Classify a chronological rate sequence
    ///
    /// Direction compares the last positive rate against the first (ties are
    /// `Decreasing`). Shape compares the middle rate against the arithmetic
    /// and geometric means of the endpoints: closer to the arithmetic mean is
    /// `Linear`, otherwise `Exponential`.
    #[must_use]
    pub fn classify(rates: &[f64]) -> Self {
        if rates.len() < 2 {
            return Self::InsufficientData;
        }

        let valid: Vec<f64> = rates.iter().copied().filter(|r| *r > 0.0).collect();
        let (Some(&first), Some(&last)) = (valid.first(), valid.last()) else {
            return Self::NoValidRates;
        };

        let average_rate = valid.iter().sum::<f64>() / valid.len() as f64;
        let direction = if last > first {
            Direction::Increasing
        } else {
            Direction::Decreasing
        };

        let mid = valid[valid.len() / 2];
        let linear_expected = (first + last) / 2.0;
        let geometric_expected = (first * last).sqrt();
        let pattern = if (mid - linear_expected).abs() < (mid - geometric_expected).abs() {
            Pattern::Linear
        } else {
            Pattern::Exponential
        };

        Self::Classified(TrendClassification {
            average_rate,
            direction,
            pattern,
        })
    }

    /// The classification, if there was enough data
    #[must_use]
    pub const fn classification(&self) -> Option<&TrendClassification> {
        match self {
            Self::Classified(c) => Some(c),
            _ => None,
        }
    }

    /// Marker text for the data-shortage outcomes
    #[must_use]
    pub const fn marker(&self) -> Option<&'static str> {
        match self {
            Self::Classified(_) => None,
            Self::InsufficientData => Some(Self::INSUFFICIENT_DATA),
            Self::NoValidRates => Some(Self::NO_VALID_RATES),
        }
    }

    /// Human-readable one-line summary
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Classified(c) => format!(
                "Processing rate is {} and appears to be {} (average rate: {:.2}/s)",
                c.direction, c.pattern, c.average_rate
            ),
            Self::InsufficientData => Self::INSUFFICIENT_DATA.to_string(),
            Self::NoValidRates => Self::NO_VALID_RATES.to_string(),
        }
    }
}

// Classified outcomes serialize as an object, shortages as their marker text
impl Serialize for TrendOutcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Classified(c) => c.serialize(serializer),
            Self::InsufficientData => serializer.serialize_str(Self::INSUFFICIENT_DATA),
            Self::NoValidRates => serializer.serialize_str(Self::NO_VALID_RATES),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classified(rates: &[f64]) -> TrendClassification {
        *TrendOutcome::classify(rates)
            .classification()
            .expect("should classify")
    }

    #[test]
    fn test_insufficient_data() {
        assert_eq!(TrendOutcome::classify(&[]), TrendOutcome::InsufficientData);
        assert_eq!(
            TrendOutcome::classify(&[3.0]),
            TrendOutcome::InsufficientData
        );
        // A single non-positive rate is still "insufficient", not "no valid"
        assert_eq!(
            TrendOutcome::classify(&[0.0]),
            TrendOutcome::InsufficientData
        );
    }

    #[test]
    fn test_no_valid_rates() {
        assert_eq!(
            TrendOutcome::classify(&[0.0, -1.0, 0.0]),
            TrendOutcome::NoValidRates
        );
    }

    #[test]
    fn test_geometric_sequence_is_exponential() {
        let c = classified(&[1.0, 2.0, 4.0]);
        assert_eq!(c.pattern, Pattern::Exponential);
        assert_eq!(c.direction, Direction::Increasing);
        assert!((c.average_rate - 7.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_arithmetic_sequence_is_linear() {
        let c = classified(&[1.0, 5.0, 9.0]);
        assert_eq!(c.pattern, Pattern::Linear);
    }

    #[test]
    fn test_tie_is_decreasing() {
        let c = classified(&[2.0, 3.0, 2.0]);
        assert_eq!(c.direction, Direction::Decreasing);

        let c = classified(&[4.0, 2.0, 1.0]);
        assert_eq!(c.direction, Direction::Decreasing);
    }

    #[test]
    fn test_constant_rates_are_exponential() {
        // Both expectations equal the midpoint, so the strict comparison fails
        let c = classified(&[2.0, 2.0]);
        assert_eq!(c.pattern, Pattern::Exponential);
    }

    #[test]
    fn test_non_positive_rates_are_filtered_before_classifying() {
        // Filtered sequence is [1.0, 2.0, 4.0]
        let c = classified(&[0.0, 1.0, -3.0, 2.0, 4.0]);
        assert_eq!(c.pattern, Pattern::Exponential);
        assert_eq!(c.direction, Direction::Increasing);
        assert!((c.average_rate - 7.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_describe() {
        let outcome = TrendOutcome::classify(&[1.0, 2.0, 4.0]);
        assert_eq!(
            outcome.describe(),
            "Processing rate is increasing and appears to be exponential (average rate: 2.33/s)"
        );
        assert_eq!(TrendOutcome::NoValidRates.describe(), "No valid rates");
    }

    #[test]
    fn test_serialization_shapes() {
        let json = serde_json::to_value(TrendOutcome::classify(&[1.0, 2.0, 4.0])).unwrap();
        assert_eq!(json["trend"], "increasing");
        assert_eq!(json["pattern"], "exponential");
        assert!(json["average_rate"].is_f64());

        let json = serde_json::to_value(TrendOutcome::InsufficientData).unwrap();
        assert_eq!(json, serde_json::json!("Insufficient data"));
    }
}
