use chrono::Utc;
use serde_json::Value;

use crate::domain::promotion::Promotion;
use crate::domain::validation::ValidationError;
use crate::forms::filters::PromotionFilterQuery;
use crate::forms::promotions::{normalize, normalize_new, supplies};
use crate::repository::{PromotionReader, PromotionWriter};
use crate::services::{ServiceError, ServiceResult};

fn form_error(err: ValidationError) -> ServiceError {
    ServiceError::Form(err.to_string())
}

/// Creates a promotion from a JSON body.
pub fn create_promotion<R>(repo: &R, input: &Value) -> ServiceResult<Promotion>
where
    R: PromotionWriter + ?Sized,
{
    let new_promotion = normalize_new(input, Utc::now().naive_utc()).map_err(form_error)?;

    log::info!("Creating promotion {}", new_promotion.promotion_name);
    repo.create_promotion(&new_promotion)
        .map_err(ServiceError::from)
}

/// Fetches a single promotion, failing with `NotFound` when it does not exist.
pub fn load_promotion<R>(repo: &R, promotion_id: i32) -> ServiceResult<Promotion>
where
    R: PromotionReader + ?Sized,
{
    repo.get_promotion_by_id(promotion_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Lists the promotions selected by the query string.
pub fn list_promotions<R>(repo: &R, query: PromotionFilterQuery) -> ServiceResult<Vec<Promotion>>
where
    R: PromotionReader + ?Sized,
{
    let filter = query.into_filter().map_err(form_error)?;

    repo.list_promotions(&filter).map_err(ServiceError::from)
}

/// Merges a JSON body over an existing promotion and stores the result.
///
/// `modified_when` is stamped with the current time unless the body supplies it.
pub fn modify_promotion<R>(repo: &R, promotion_id: i32, input: &Value) -> ServiceResult<Promotion>
where
    R: PromotionReader + PromotionWriter + ?Sized,
{
    let existing = load_promotion(repo, promotion_id)?;

    let mut updated = normalize(&existing, input).map_err(form_error)?;
    if !supplies(input, "modified_when") {
        updated.modified_when = Some(Utc::now().naive_utc());
    }

    log::info!("Saving promotion {promotion_id}");
    repo.replace_promotion(&updated)
        .map_err(ServiceError::from)
}

/// Deletes a promotion. Unknown ids are not an error.
pub fn remove_promotion<R>(repo: &R, promotion_id: i32) -> ServiceResult<()>
where
    R: PromotionWriter + ?Sized,
{
    log::info!("Deleting promotion {promotion_id}");
    repo.delete_promotion(promotion_id)
        .map_err(ServiceError::from)
}

/// Switches a promotion on or off.
pub fn set_promotion_active<R>(
    repo: &R,
    promotion_id: i32,
    active: bool,
) -> ServiceResult<Promotion>
where
    R: PromotionReader + PromotionWriter + ?Sized,
{
    let existing = load_promotion(repo, promotion_id)?;

    let updated = Promotion {
        active,
        modified_when: Some(Utc::now().naive_utc()),
        ..existing
    };

    log::info!("Setting promotion {promotion_id} active={active}");
    repo.replace_promotion(&updated)
        .map_err(ServiceError::from)
}
