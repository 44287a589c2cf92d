use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::io_struct::FEATURE_COUNT;
use crate::model::{ModelBundle, ModelError, RandomForest, StandardScaler};

pub const MODEL_FILE: &str = "tuned_random_forest.json";
pub const SCALER_FILE: &str = "standard_scaler.json";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifacts missing in {}: {}", .dir.display(), display_paths(.missing))]
    Missing { dir: PathBuf, missing: Vec<PathBuf> },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid artifact {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load the fitted model and scaler from `artifact_dir`.
///
/// Missing files are reported as [`ArtifactError::Missing`]; anything that
/// exists but cannot be read, parsed or validated is reported with the
/// offending path. Both outcomes are logged at ERROR.
pub fn load_model_artifacts(artifact_dir: impl AsRef<Path>) -> Result<ModelBundle, ArtifactError> {
    let dir = artifact_dir.as_ref();
    let model_path = dir.join(MODEL_FILE);
    let scaler_path = dir.join(SCALER_FILE);

    let missing: Vec<PathBuf> = [&model_path, &scaler_path]
        .into_iter()
        .filter(|p| !p.is_file())
        .cloned()
        .collect();
    if !missing.is_empty() {
        log::error!("Artifacts missing in {}", dir.display());
        return Err(ArtifactError::Missing {
            dir: dir.to_path_buf(),
            missing,
        });
    }

    log::info!("Loading ML artifacts into memory...");
    read_bundle(&model_path, &scaler_path).inspect_err(|e| {
        log::error!("Failed to load models: {}", e);
    })
}

fn read_bundle(model_path: &Path, scaler_path: &Path) -> Result<ModelBundle, ArtifactError> {
    let model: RandomForest = read_json(model_path)?;
    check(model_path, model.validate())?;
    check(model_path, expect_width("model", model.n_features_in))?;

    let scaler: StandardScaler = read_json(scaler_path)?;
    check(scaler_path, scaler.validate())?;
    check(scaler_path, expect_width("scaler", scaler.n_features_in))?;

    log::debug!(
        "Loaded forest with {} estimators over classes {:?}",
        model.estimators.len(),
        model.classes
    );
    Ok(ModelBundle::new(model, scaler))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn check(path: &Path, result: Result<(), ModelError>) -> Result<(), ArtifactError> {
    result.map_err(|source| ArtifactError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

fn expect_width(what: &str, n_features: usize) -> Result<(), ModelError> {
    if n_features != FEATURE_COUNT {
        return Err(ModelError::invalid(format!(
            "{} expects {} features, requests carry {}",
            what, n_features, FEATURE_COUNT
        )));
    }
    Ok(())
}
