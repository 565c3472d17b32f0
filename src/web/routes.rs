use actix_web::error::InternalError;
use actix_web::{web, HttpResponse};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::web::handlers;
use crate::web::models::ErrorResponse;
use crate::web::openapi::ApiDoc;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::scope("/api")
                .route("/chat", web::post().to(handlers::chat))
        )
        .route("/", web::get().to(handlers::index))
        .route("/health", web::get().to(handlers::health_check))
        .service(web::redirect("/docs", "/docs/"))
        .service(SwaggerUi::new("/docs/{_:.*}").url("/openapi.json", ApiDoc::openapi()));
}

// Malformed bodies get the same JSON error shape as provider failures
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse {
            error: err.to_string(),
        });
        InternalError::from_response(err, response).into()
    })
}
