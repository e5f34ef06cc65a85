//! Helpers for integration tests.
#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::RunQueryDsl;
use diesel_migrations::MigrationHarness;
use tempfile::TempDir;
use uuid::Uuid;

use pushkind_common::db::{DbPool, establish_connection_pool};
use pushkind_promotions::domain::promotion::{NewPromotion, PromotionScope, PromotionType};
use pushkind_promotions::repository::MIGRATIONS;

/// Temporary database used in integration tests. Removed together with its directory on drop.
pub struct TestDb {
    pool: DbPool,
    dir: TempDir,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory.");
        let path = dir.path().join(filename);
        let url = path.to_str().expect("Temporary path is not valid UTF-8.");

        let pool = establish_connection_pool(url).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb { pool, dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    /// Drop the promotions table so every storage call fails from here on.
    pub fn break_storage(&self) {
        let mut conn = self
            .pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        diesel::sql_query("DROP TABLE promotions")
            .execute(&mut conn)
            .expect("Failed to drop promotions table.");
    }

    pub fn dir(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("valid timestamp")
}

/// A promotion that is valid for the whole of 2025 across the entire store.
pub fn new_promotion(name: &str) -> NewPromotion {
    NewPromotion {
        promotion_name: name.to_string(),
        promotion_description: format!("{name} description"),
        promotion_type: PromotionType::Percentage,
        promotion_scope: PromotionScope::EntireStore,
        start_date: date(2025, 1, 1),
        end_date: date(2026, 1, 1),
        promotion_value: 10.0,
        promotion_code: Some("SAVE10".to_string()),
        created_by: Uuid::new_v4(),
        modified_by: Some(Uuid::new_v4()),
        created_when: date(2024, 12, 1),
        modified_when: Some(date(2024, 12, 2)),
        active: false,
    }
}
