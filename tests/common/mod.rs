#![allow(dead_code)]

use std::path::PathBuf;

use actix_web::dev::ServiceResponse;
use actix_web::{App, test, web};
use wine_quality_api::app_context::AppContext;
use wine_quality_api::artifacts::load_model_artifacts;
use wine_quality_api::model::{Classifier, FeatureTransformer, ModelBundle, ModelError};
use wine_quality_api::server::configure;

pub fn artifact_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("artifacts")
}

pub fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static")
}

/// Context backed by the artifacts shipped in the repository.
pub fn shipped_context() -> web::Data<AppContext> {
    let bundle = load_model_artifacts(artifact_dir()).expect("shipped artifacts load");
    web::Data::new(AppContext::new(Some(bundle), static_dir()))
}

pub fn context_without_model() -> web::Data<AppContext> {
    web::Data::new(AppContext::new(None, static_dir()))
}

pub fn context_with(bundle: ModelBundle) -> web::Data<AppContext> {
    web::Data::new(AppContext::new(Some(bundle), static_dir()))
}

/// Run one request against a fresh app built around `ctx`.
pub async fn send(ctx: web::Data<AppContext>, req: test::TestRequest) -> ServiceResponse {
    let app = test::init_service(App::new().configure(move |cfg| configure(cfg, ctx))).await;
    test::call_service(&app, req.to_request()).await
}

/// Always answers the same class.
pub struct FixedClassifier(pub i64);

impl Classifier for FixedClassifier {
    fn n_features(&self) -> usize {
        5
    }

    fn predict(&self, _row: &[f64]) -> Result<i64, ModelError> {
        Ok(self.0)
    }
}

/// Fails the test if a request ever reaches it.
pub struct UnreachableClassifier;

impl Classifier for UnreachableClassifier {
    fn n_features(&self) -> usize {
        5
    }

    fn predict(&self, row: &[f64]) -> Result<i64, ModelError> {
        panic!("model should not be reached, got row {:?}", row);
    }
}

pub struct IdentityScaler;

impl FeatureTransformer for IdentityScaler {
    fn n_features(&self) -> usize {
        5
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        Ok(row.to_vec())
    }
}
