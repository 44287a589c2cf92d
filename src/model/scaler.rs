use serde::{Deserialize, Serialize};

use super::{FeatureTransformer, ModelError, check_row_len};

/// Standardizes features by removing the mean and scaling to unit variance.
///
/// `mean` is absent when the scaler was fitted without centering, `scale`
/// when it was fitted without scaling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub n_features_in: usize,
    #[serde(default)]
    pub mean: Option<Vec<f64>>,
    #[serde(default)]
    pub scale: Option<Vec<f64>>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        StandardScaler {
            n_features_in: mean.len(),
            mean: Some(mean),
            scale: Some(scale),
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.n_features_in == 0 {
            return Err(ModelError::invalid("scaler has no features"));
        }
        if let Some(mean) = &self.mean {
            if mean.len() != self.n_features_in {
                return Err(ModelError::invalid(format!(
                    "scaler mean has {} entries, expected {}",
                    mean.len(),
                    self.n_features_in
                )));
            }
            if mean.iter().any(|m| !m.is_finite()) {
                return Err(ModelError::invalid("scaler mean contains non-finite values"));
            }
        }
        if let Some(scale) = &self.scale {
            if scale.len() != self.n_features_in {
                return Err(ModelError::invalid(format!(
                    "scaler scale has {} entries, expected {}",
                    scale.len(),
                    self.n_features_in
                )));
            }
            if scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
                return Err(ModelError::invalid(
                    "scaler scale must be finite and non-zero",
                ));
            }
        }
        Ok(())
    }
}

impl FeatureTransformer for StandardScaler {
    fn n_features(&self) -> usize {
        self.n_features_in
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_row_len(self.n_features_in, row)?;
        let scaled = row
            .iter()
            .enumerate()
            .map(|(i, x)| {
                let centered = match &self.mean {
                    Some(mean) => x - mean[i],
                    None => *x,
                };
                match &self.scale {
                    Some(scale) => centered / scale[i],
                    None => centered,
                }
            })
            .collect();
        Ok(scaled)
    }
}
