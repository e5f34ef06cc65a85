use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

pub mod api;
pub mod main;

/// JSON body returned with every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: &'static str,
    pub message: String,
}

/// Build an error response with a JSON body.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    let message = message.into();
    if status.is_server_error() {
        log::error!("{message}");
    }

    HttpResponse::build(status).json(ErrorBody {
        status: status.as_u16(),
        error: status.canonical_reason().unwrap_or("Unknown"),
        message,
    })
}

/// JSON extractor configuration: wrong content type is 415, anything else unparsable is 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        let response = match &err {
            JsonPayloadError::ContentType => error_response(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Content-Type must be application/json",
            ),
            other => error_response(StatusCode::BAD_REQUEST, format!("Bad Request: {other}")),
        };
        InternalError::from_response(err, response).into()
    })
}

/// Query extractor configuration: an undecodable query string is a 400.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        let response = error_response(StatusCode::BAD_REQUEST, format!("Bad Request: {err}"));
        InternalError::from_response(err, response).into()
    })
}

/// Path extractor configuration: a segment that is not a valid id names no resource, so 404.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, req: &HttpRequest| {
        let response = error_response(
            StatusCode::NOT_FOUND,
            format!("{} was not found on this server", req.path()),
        );
        InternalError::from_response(err, response).into()
    })
}

async fn not_found(req: HttpRequest) -> HttpResponse {
    error_response(
        StatusCode::NOT_FOUND,
        format!("{} was not found on this server", req.path()),
    )
}

/// Register every handler of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .service(main::index)
        .service(main::health)
        .service(api::list_promotions)
        .service(api::create_promotion)
        .service(api::activate_promotion)
        .service(api::deactivate_promotion)
        .service(api::get_promotion)
        .service(api::update_promotion)
        .service(api::delete_promotion)
        .default_service(web::to(not_found));
}
