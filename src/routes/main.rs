use actix_web::{HttpResponse, Responder, get};
use serde_json::json;

#[get("/")]
/// Describe the service and where its resources live.
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "name": "Promotions REST API Service",
        "version": env!("CARGO_PKG_VERSION"),
        "paths": {
            "promotions": "/api/promotions",
            "activate": "/api/promotions/activate/{promotion_id}",
            "deactivate": "/api/promotions/deactivate/{promotion_id}",
            "health": "/health",
        },
    }))
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({"status": 200, "message": "Healthy"}))
}
