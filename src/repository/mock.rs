use mockall::mock;

use super::{PromotionReader, PromotionWriter};
use crate::domain::promotion::{NewPromotion, Promotion, PromotionFilter};
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub PromotionReader {}

    impl PromotionReader for PromotionReader {
        fn get_promotion_by_id(&self, id: i32) -> RepositoryResult<Option<Promotion>>;
        fn list_promotions(&self, filter: &PromotionFilter) -> RepositoryResult<Vec<Promotion>>;
    }
}

mock! {
    pub PromotionWriter {}

    impl PromotionWriter for PromotionWriter {
        fn create_promotion(&self, new_promotion: &NewPromotion) -> RepositoryResult<Promotion>;
        fn replace_promotion(&self, promotion: &Promotion) -> RepositoryResult<Promotion>;
        fn delete_promotion(&self, promotion_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub PromotionRepository {}

    impl PromotionReader for PromotionRepository {
        fn get_promotion_by_id(&self, id: i32) -> RepositoryResult<Option<Promotion>>;
        fn list_promotions(&self, filter: &PromotionFilter) -> RepositoryResult<Vec<Promotion>>;
    }

    impl PromotionWriter for PromotionRepository {
        fn create_promotion(&self, new_promotion: &NewPromotion) -> RepositoryResult<Promotion>;
        fn replace_promotion(&self, promotion: &Promotion) -> RepositoryResult<Promotion>;
        fn delete_promotion(&self, promotion_id: i32) -> RepositoryResult<()>;
    }
}
