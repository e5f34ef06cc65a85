use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde_json::Value;

use crate::forms::filters::PromotionFilterQuery;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::{ServiceError, promotions};

fn promotion_location(promotion_id: i32) -> String {
    format!("/api/promotions/{promotion_id}")
}

fn not_found(promotion_id: i32) -> HttpResponse {
    error_response(
        StatusCode::NOT_FOUND,
        format!("Promotion with id: {promotion_id} not found"),
    )
}

#[get("/api/promotions")]
/// List promotions, optionally filtered by `datetime`, `promotion_scope`, `promotion_type` and `active`.
pub async fn list_promotions(
    params: web::Query<PromotionFilterQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match promotions::list_promotions(repo.get_ref(), params.into_inner()) {
        Ok(promotions) => HttpResponse::Ok().json(promotions),
        Err(ServiceError::Form(message)) => {
            error_response(StatusCode::BAD_REQUEST, format!("Bad Request: {message}"))
        }
        Err(err) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to list promotions: {err}"),
        ),
    }
}

#[post("/api/promotions")]
/// Create a promotion and point `Location` at it.
pub async fn create_promotion(
    repo: web::Data<DieselRepository>,
    payload: web::Json<Value>,
) -> impl Responder {
    match promotions::create_promotion(repo.get_ref(), &payload) {
        Ok(promotion) => HttpResponse::Created()
            .insert_header((
                header::LOCATION,
                promotion_location(promotion.promotion_id),
            ))
            .json(promotion),
        Err(ServiceError::Form(message)) => {
            error_response(StatusCode::BAD_REQUEST, format!("Bad Request: {message}"))
        }
        Err(err) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to create promotion: {err}"),
        ),
    }
}

#[get("/api/promotions/{promotion_id}")]
pub async fn get_promotion(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let promotion_id = path.into_inner();

    match promotions::load_promotion(repo.get_ref(), promotion_id) {
        Ok(promotion) => HttpResponse::Ok().json(promotion),
        Err(ServiceError::NotFound) => not_found(promotion_id),
        Err(err) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to load promotion {promotion_id}: {err}"),
        ),
    }
}

#[put("/api/promotions/{promotion_id}")]
/// Update the fields present in the body; the rest keep their stored values.
pub async fn update_promotion(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    payload: web::Json<Value>,
) -> impl Responder {
    let promotion_id = path.into_inner();

    match promotions::modify_promotion(repo.get_ref(), promotion_id, &payload) {
        Ok(promotion) => HttpResponse::Ok().json(promotion),
        Err(ServiceError::NotFound) => not_found(promotion_id),
        Err(ServiceError::Form(message)) => {
            error_response(StatusCode::BAD_REQUEST, format!("Bad Request: {message}"))
        }
        Err(err) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("An error occurred updating promotion {promotion_id}: {err}"),
        ),
    }
}

#[delete("/api/promotions/{promotion_id}")]
pub async fn delete_promotion(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let promotion_id = path.into_inner();

    match promotions::remove_promotion(repo.get_ref(), promotion_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to delete promotion {promotion_id}: {err}"),
        ),
    }
}

#[put("/api/promotions/activate/{promotion_id}")]
pub async fn activate_promotion(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    toggle_promotion(path.into_inner(), repo.get_ref(), true)
}

#[put("/api/promotions/deactivate/{promotion_id}")]
pub async fn deactivate_promotion(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    toggle_promotion(path.into_inner(), repo.get_ref(), false)
}

fn toggle_promotion(promotion_id: i32, repo: &DieselRepository, active: bool) -> HttpResponse {
    match promotions::set_promotion_active(repo, promotion_id, active) {
        Ok(promotion) => HttpResponse::Ok().json(promotion),
        Err(ServiceError::NotFound) => not_found(promotion_id),
        Err(err) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to set active={active} on promotion {promotion_id}: {err}"),
        ),
    }
}
