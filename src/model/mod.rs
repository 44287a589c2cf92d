pub mod forest;
pub mod scaler;

pub use forest::{DecisionTree, RandomForest};
pub use scaler::StandardScaler;

/// Errors raised while validating or evaluating a fitted artifact.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Expected {expected} features, got {got}")]
    FeatureMismatch { expected: usize, got: usize },

    #[error("Invalid artifact structure: {reason}")]
    InvalidStructure { reason: String },
}

impl ModelError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        ModelError::InvalidStructure {
            reason: reason.into(),
        }
    }
}

/// A fitted predictor mapping one feature row to an integer class.
pub trait Classifier: Send + Sync {
    fn n_features(&self) -> usize;
    fn predict(&self, row: &[f64]) -> Result<i64, ModelError>;
}

/// A fitted transformer applied to a feature row before prediction.
pub trait FeatureTransformer: Send + Sync {
    fn n_features(&self) -> usize;
    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelError>;
}

/// The pair of fitted objects the server predicts with.
///
/// Built once at startup and never mutated afterwards.
pub struct ModelBundle {
    pub model: Box<dyn Classifier>,
    pub scaler: Box<dyn FeatureTransformer>,
}

impl ModelBundle {
    pub fn new(model: impl Classifier + 'static, scaler: impl FeatureTransformer + 'static) -> Self {
        ModelBundle {
            model: Box::new(model),
            scaler: Box::new(scaler),
        }
    }

    /// Scale the row, then classify it.
    pub fn predict(&self, row: &[f64]) -> Result<i64, ModelError> {
        let scaled = self.scaler.transform(row)?;
        self.model.predict(&scaled)
    }
}

impl std::fmt::Debug for ModelBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelBundle")
            .field("model_features", &self.model.n_features())
            .field("scaler_features", &self.scaler.n_features())
            .finish()
    }
}

pub(crate) fn check_row_len(expected: usize, row: &[f64]) -> Result<(), ModelError> {
    if row.len() != expected {
        return Err(ModelError::FeatureMismatch {
            expected,
            got: row.len(),
        });
    }
    Ok(())
}
