use std::time::Duration;

use crate::io_struct::{PredictionOut, WineInput};
use crate::model::{ModelBundle, ModelError};

pub const LABEL_BAD: &str = "Bad (Score <= 6)";
pub const LABEL_GOOD: &str = "Good (Score >= 7)";
pub const LABEL_UNKNOWN: &str = "Unknown";

/// Map the model's class output onto the label shown to users.
pub fn quality_label(class: i64) -> &'static str {
    match class {
        0 => LABEL_BAD,
        1 => LABEL_GOOD,
        _ => LABEL_UNKNOWN,
    }
}

/// Classify one wine and return its label.
pub fn classify(bundle: &ModelBundle, input: &WineInput) -> Result<&'static str, ModelError> {
    let class = bundle.predict(&input.to_row())?;
    Ok(quality_label(class))
}

/// Elapsed time in milliseconds, rounded to two decimals.
pub fn latency_ms(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 1000.0 * 100.0).round() / 100.0
}

impl PredictionOut {
    pub fn new(label: &str, elapsed: Duration) -> Self {
        PredictionOut {
            quality_label: label.to_string(),
            latency_ms: latency_ms(elapsed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Classifier, FeatureTransformer};

    struct Fixed(i64);

    impl Classifier for Fixed {
        fn n_features(&self) -> usize {
            5
        }

        fn predict(&self, _row: &[f64]) -> Result<i64, ModelError> {
            Ok(self.0)
        }
    }

    struct Identity;

    impl FeatureTransformer for Identity {
        fn n_features(&self) -> usize {
            5
        }

        fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
            Ok(row.to_vec())
        }
    }

    #[test]
    fn test_quality_label_table() {
        assert_eq!(quality_label(0), LABEL_BAD);
        assert_eq!(quality_label(1), LABEL_GOOD);
        assert_eq!(quality_label(2), LABEL_UNKNOWN);
        assert_eq!(quality_label(-1), LABEL_UNKNOWN);
    }

    #[test]
    fn test_classify_maps_class() {
        let input = WineInput::example();
        let good = ModelBundle::new(Fixed(1), Identity);
        assert_eq!(classify(&good, &input).unwrap(), LABEL_GOOD);
        let odd = ModelBundle::new(Fixed(9), Identity);
        assert_eq!(classify(&odd, &input).unwrap(), LABEL_UNKNOWN);
    }

    #[test]
    fn test_latency_rounding() {
        assert_eq!(latency_ms(Duration::from_micros(1234)), 1.23);
        assert_eq!(latency_ms(Duration::from_micros(1236)), 1.24);
        assert_eq!(latency_ms(Duration::ZERO), 0.0);
        assert_eq!(latency_ms(Duration::from_millis(2)), 2.0);
    }
}
