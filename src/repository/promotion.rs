use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::promotion::{
    NewPromotion as DomainNewPromotion, Promotion as DomainPromotion, PromotionCriterion,
    PromotionFilter,
};
use crate::models::promotion::{
    NewPromotion as DbNewPromotion, Promotion as DbPromotion,
    ReplacePromotion as DbReplacePromotion,
};
use crate::repository::{DieselRepository, PromotionReader, PromotionWriter};

/// Convert a stored row, reporting undecodable columns as a deserialization failure.
fn decode(row: DbPromotion) -> RepositoryResult<DomainPromotion> {
    DomainPromotion::try_from(row).map_err(|err| {
        RepositoryError::from(diesel::result::Error::DeserializationError(Box::new(err)))
    })
}

impl PromotionReader for DieselRepository {
    fn get_promotion_by_id(&self, id: i32) -> RepositoryResult<Option<DomainPromotion>> {
        use crate::schema::promotions;

        let mut conn = self.conn()?;
        let promotion = promotions::table
            .find(id)
            .first::<DbPromotion>(&mut conn)
            .optional()?;

        promotion.map(decode).transpose()
    }

    fn list_promotions(&self, filter: &PromotionFilter) -> RepositoryResult<Vec<DomainPromotion>> {
        use crate::schema::promotions;

        let mut conn = self.conn()?;

        let mut items = promotions::table.into_boxed::<diesel::sqlite::Sqlite>();

        for criterion in filter.criteria() {
            items = match criterion {
                PromotionCriterion::ValidAt(instant) => items
                    .filter(promotions::start_date.le(*instant))
                    .filter(promotions::end_date.ge(*instant)),
                PromotionCriterion::ScopeIn(scopes) => {
                    let names: Vec<&str> = scopes.iter().map(|scope| scope.as_str()).collect();
                    items.filter(promotions::promotion_scope.eq_any(names))
                }
                PromotionCriterion::TypeIn(types) => {
                    let names: Vec<&str> = types.iter().map(|kind| kind.as_str()).collect();
                    items.filter(promotions::promotion_type.eq_any(names))
                }
                PromotionCriterion::Active(active) => {
                    items.filter(promotions::active.eq(*active))
                }
            };
        }

        let rows = items
            .order(promotions::promotion_id.asc())
            .load::<DbPromotion>(&mut conn)?;

        rows.into_iter().map(decode).collect()
    }
}

impl PromotionWriter for DieselRepository {
    fn create_promotion(
        &self,
        new_promotion: &DomainNewPromotion,
    ) -> RepositoryResult<DomainPromotion> {
        use crate::schema::promotions;

        let mut conn = self.conn()?;
        let insertable = DbNewPromotion::from(new_promotion);

        let created = diesel::insert_into(promotions::table)
            .values(&insertable)
            .get_result::<DbPromotion>(&mut conn)?;

        decode(created)
    }

    fn replace_promotion(&self, promotion: &DomainPromotion) -> RepositoryResult<DomainPromotion> {
        use crate::schema::promotions;

        let mut conn = self.conn()?;
        let changes = DbReplacePromotion::from(promotion);

        let updated = diesel::update(promotions::table.find(promotion.promotion_id))
            .set(&changes)
            .get_result::<DbPromotion>(&mut conn)?;

        decode(updated)
    }

    fn delete_promotion(&self, promotion_id: i32) -> RepositoryResult<()> {
        use crate::schema::promotions;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(promotions::table.find(promotion_id)).execute(&mut conn)?;
        if deleted == 0 {
            log::info!("Promotion {promotion_id} was already absent");
        }

        Ok(())
    }
}
