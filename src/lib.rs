pub mod app_context;
pub mod artifacts;
pub mod config;
pub mod error;
pub mod inference;
pub mod io_struct;
pub mod logging;
pub mod model;
pub mod server;
pub mod validated;

use actix_web::web;

use app_context::AppContext;
use config::ServerConfig;

/// Load the artifacts, serve until the server is stopped, then release them.
///
/// A failed artifact load is not fatal: the server still starts and
/// `/predict` answers 503 until it is restarted with usable artifacts.
pub fn launch(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;
    logging::init_logging(config.level_filter()?);

    if !config.static_dir.is_dir() {
        log::warn!(
            "Static directory {} not found, homepage will return 404",
            config.static_dir.display()
        );
    }

    let bundle = match artifacts::load_model_artifacts(&config.artifact_dir) {
        Ok(bundle) => Some(bundle),
        Err(_) => {
            log::warn!("No model loaded, /predict will answer 503");
            None
        }
    };
    let app_context = web::Data::new(AppContext::new(bundle, config.static_dir.clone()));
    log::info!("Model loaded: {}", app_context.is_model_loaded());

    actix_web::rt::System::new().block_on(server::startup(&config, app_context.clone()))?;

    drop(app_context);
    log::info!("Model artifacts released");
    Ok(())
}
