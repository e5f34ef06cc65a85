use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::promotion::{NewPromotion, Promotion, PromotionFilter};

pub mod promotion;

#[cfg(test)]
pub mod mock;

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Error returned when the embedded migrations cannot be applied.
pub type MigrationError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }

    /// Apply any embedded migrations that have not run against the database yet.
    pub fn run_pending_migrations(&self) -> Result<(), MigrationError> {
        let mut conn = self.pool.get()?;
        let applied = conn.run_pending_migrations(MIGRATIONS)?;
        for version in applied {
            log::info!("Applied migration {version}");
        }
        Ok(())
    }
}

/// Read-only operations over promotion records.
pub trait PromotionReader {
    fn get_promotion_by_id(&self, id: i32) -> RepositoryResult<Option<Promotion>>;
    /// Promotions matching `filter`, ordered by identifier.
    fn list_promotions(&self, filter: &PromotionFilter) -> RepositoryResult<Vec<Promotion>>;
}

/// Write operations over promotion records.
pub trait PromotionWriter {
    fn create_promotion(&self, new_promotion: &NewPromotion) -> RepositoryResult<Promotion>;
    /// Overwrite every column of the stored row identified by `promotion.promotion_id`.
    fn replace_promotion(&self, promotion: &Promotion) -> RepositoryResult<Promotion>;
    /// Remove the promotion. Deleting an unknown id succeeds.
    fn delete_promotion(&self, promotion_id: i32) -> RepositoryResult<()>;
}
