use serde::{Deserialize, Serialize};
use validator::Validate;

/// Number of features a prediction request carries.
pub const FEATURE_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate)]
pub struct WineInput {
    /// Volatile acidity (typically 0.1 - 2.0)
    #[validate(range(exclusive_min = 0.0, message = "must be greater than 0"))]
    pub volatile_acidity: f64,

    #[validate(range(exclusive_min = 0.0, message = "must be greater than 0"))]
    pub chlorides: f64,

    /// Density (approx 0.99 - 1.0)
    #[validate(range(exclusive_min = 0.0, message = "must be greater than 0"))]
    pub density: f64,

    /// pH level (typically 2.0 - 4.0)
    #[serde(rename = "pH")]
    #[validate(range(
        exclusive_min = 0.0,
        exclusive_max = 14.0,
        message = "must be greater than 0 and less than 14"
    ))]
    pub ph: f64,

    /// Alcohol percentage
    #[validate(range(exclusive_min = 0.0, message = "must be greater than 0"))]
    pub alcohol: f64,
}

impl WineInput {
    /// The sample wine used by the homepage and the load-test client.
    pub fn example() -> Self {
        WineInput {
            volatile_acidity: 0.7,
            chlorides: 0.045,
            density: 0.99,
            ph: 3.2,
            alcohol: 10.5,
        }
    }

    /// Feature row in the order the artifacts were fitted on.
    pub fn to_row(&self) -> [f64; FEATURE_COUNT] {
        [
            self.volatile_acidity,
            self.chlorides,
            self.density,
            self.ph,
            self.alcohol,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PredictionOut {
    pub quality_label: String,
    /// Inference time in milliseconds
    pub latency_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_example_is_valid() {
        assert!(WineInput::example().validate().is_ok());
    }

    #[test]
    fn test_row_order() {
        assert_eq!(WineInput::example().to_row(), [0.7, 0.045, 0.99, 3.2, 10.5]);
    }

    #[test]
    fn test_ph_uses_original_casing() {
        let input: WineInput = serde_json::from_value(json!({
            "volatile_acidity": 0.7,
            "chlorides": 0.045,
            "density": 0.99,
            "pH": 3.2,
            "alcohol": 10.5
        }))
        .unwrap();
        assert_eq!(input, WineInput::example());

        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["pH"], json!(3.2));
        assert!(value.get("ph").is_none());
    }

    #[test]
    fn test_missing_field_fails_to_parse() {
        let result: Result<WineInput, _> = serde_json::from_value(json!({
            "volatile_acidity": 0.7,
            "chlorides": 0.045,
            "density": 0.99,
            "alcohol": 10.5
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_non_positive_values_rejected() {
        let cases: [fn(&mut WineInput); 5] = [
            |w| w.volatile_acidity = 0.0,
            |w| w.chlorides = -0.1,
            |w| w.density = 0.0,
            |w| w.ph = -3.0,
            |w| w.alcohol = 0.0,
        ];
        for mutate in cases {
            let mut input = WineInput::example();
            mutate(&mut input);
            assert!(input.validate().is_err(), "{:?} should be rejected", input);
        }
    }

    #[test]
    fn test_ph_upper_bound_is_exclusive() {
        let mut input = WineInput::example();
        input.ph = 14.0;
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 1);

        input.ph = 13.99;
        assert!(input.validate().is_ok());
    }
}
