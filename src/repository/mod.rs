use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::product::{NewProduct, Product, ProductView, UpdateProduct};

pub mod product;
pub mod reference;

#[cfg(test)]
pub mod mock;

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
}

/// Read-only operations over product records.
pub trait ProductReader {
    /// All products in insertion order with their references projected.
    fn list_products(&self) -> RepositoryResult<Vec<ProductView>>;
    /// A single product with its references projected.
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<ProductView>>;
    /// A single product with raw reference identifiers, used for updates.
    fn find_product(&self, id: i32) -> RepositoryResult<Option<Product>>;
}

/// Write operations over product records.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(
        &self,
        product_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    /// Remove the product and its images. Fails with `NotFound` when no
    /// product has the given id.
    fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
}
