use crate::app_context::AppContext;
use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::inference;
use crate::io_struct::{PredictionOut, WineInput};
use crate::validated::ValidatedJson;
use actix_files::{Files, NamedFile};
use actix_web::{HttpResponse, HttpServer, get, post, web};
use serde_json::json;
use std::time::Instant;

#[get("/")]
pub async fn index(app_context: web::Data<AppContext>) -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open_async(app_context.index_path()).await?)
}

#[get("/health")]
pub async fn health(app_context: web::Data<AppContext>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "model_loaded": app_context.is_model_loaded(),
    }))
}

#[post("/predict")]
pub async fn predict(
    app_context: web::Data<AppContext>,
    input: ValidatedJson<WineInput>,
) -> Result<HttpResponse, ApiError> {
    let start = Instant::now();
    let bundle = app_context.bundle().ok_or(ApiError::ModelUnavailable)?;

    let label = inference::classify(bundle, &input)?;
    Ok(HttpResponse::Ok().json(PredictionOut::new(label, start.elapsed())))
}

/// Register every route and the shared context on one app.
pub fn configure(cfg: &mut web::ServiceConfig, app_context: web::Data<AppContext>) {
    let static_dir = app_context.static_dir().to_path_buf();
    cfg.app_data(app_context)
        .service(index)
        .service(health)
        .service(predict)
        .service(Files::new("/static", static_dir));
}

pub async fn startup(
    config: &ServerConfig,
    app_context: web::Data<AppContext>,
) -> std::io::Result<()> {
    log::info!("Starting server at {}", config.bind_address());

    let mut server = HttpServer::new(move || {
        let app_context = app_context.clone();
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .configure(move |cfg| configure(cfg, app_context))
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    server
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
