//! Helpers for integration tests.
#![allow(dead_code)]

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use pushkind_common::db::{DbPool, establish_connection_pool};
use pushkind_products::schema::{brands, categories, sub_categories, variant_types, variants};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Temporary database used in integration tests.
pub struct TestDb {
    filename: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        std::fs::remove_file(filename).ok(); // Clean up old DB

        let pool =
            establish_connection_pool(filename).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            filename: filename.to_string(),
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    /// Insert one row into every reference table and return their ids.
    pub fn seed_references(&self) -> References {
        let mut conn = self.pool.get().expect("connection");

        let category_id = diesel::insert_into(categories::table)
            .values((
                categories::name.eq("Shoes"),
                categories::image.eq("http://localhost/image/category/shoes.png"),
            ))
            .returning(categories::id)
            .get_result::<i32>(&mut conn)
            .expect("insert category");

        let sub_category_id = diesel::insert_into(sub_categories::table)
            .values((
                sub_categories::name.eq("Running"),
                sub_categories::category_id.eq(category_id),
            ))
            .returning(sub_categories::id)
            .get_result::<i32>(&mut conn)
            .expect("insert sub-category");

        let brand_id = diesel::insert_into(brands::table)
            .values((
                brands::name.eq("Swift"),
                brands::sub_category_id.eq(sub_category_id),
            ))
            .returning(brands::id)
            .get_result::<i32>(&mut conn)
            .expect("insert brand");

        let variant_type_id = diesel::insert_into(variant_types::table)
            .values((
                variant_types::name.eq("Shoe size"),
                variant_types::type_.eq("size"),
            ))
            .returning(variant_types::id)
            .get_result::<i32>(&mut conn)
            .expect("insert variant type");

        let variant_id = diesel::insert_into(variants::table)
            .values((
                variants::name.eq("42"),
                variants::variant_type_id.eq(variant_type_id),
            ))
            .returning(variants::id)
            .get_result::<i32>(&mut conn)
            .expect("insert variant");

        References {
            category_id,
            sub_category_id,
            brand_id,
            variant_type_id,
            variant_id,
        }
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        std::fs::remove_file(&self.filename).ok();
        std::fs::remove_file(format!("{}-shm", &self.filename)).ok();
        std::fs::remove_file(format!("{}-wal", &self.filename)).ok();
    }
}

/// Identifiers of the seeded reference rows.
#[derive(Debug, Clone, Copy)]
pub struct References {
    pub category_id: i32,
    pub sub_category_id: i32,
    pub brand_id: i32,
    pub variant_type_id: i32,
    pub variant_id: i32,
}
