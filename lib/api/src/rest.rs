use actix_cors::Cors;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer, Result as ActixResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use crate::orchestrator::QueryOrchestrator;

/// Body returned to clients when the backend fails. The cause is only logged.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Deserialize)]
struct ProductsRequest {
    filter: serde_json::Value,
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

#[derive(Serialize)]
struct HealthResponse {
    title: &'static str,
    version: &'static str,
    ordering: &'static str,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(
        orchestrator: Arc<QueryOrchestrator>,
        port: u16,
    ) -> std::io::Result<()> {
        info!("Ordering strategy: {}", orchestrator.ordering_name());
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(orchestrator.clone()))
                .configure(configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Register routes. Expects `web::Data<Arc<QueryOrchestrator>>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/api/products", web::post().to(query_products))
        .route("/health", web::get().to(health));
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse {
        message: format!("Invalid filter payload: {}", err),
    });
    InternalError::from_response(err, response).into()
}

async fn query_products(
    orchestrator: web::Data<Arc<QueryOrchestrator>>,
    req: web::Json<ProductsRequest>,
) -> ActixResult<HttpResponse> {
    match orchestrator.search(&req.filter).await {
        Ok(results) => Ok(HttpResponse::Ok().json(results)),
        Err(e) if e.is_client_error() => Ok(HttpResponse::BadRequest().json(ErrorResponse {
            message: e.to_string(),
        })),
        Err(_) => Ok(HttpResponse::InternalServerError().json(ErrorResponse {
            message: INTERNAL_ERROR_MESSAGE.to_string(),
        })),
    }
}

async fn health(
    orchestrator: web::Data<Arc<QueryOrchestrator>>,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthResponse {
        title: "facetx",
        version: env!("CARGO_PKG_VERSION"),
        ordering: orchestrator.ordering_name(),
    }))
}
