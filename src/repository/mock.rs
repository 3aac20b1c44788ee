use mockall::mock;

use super::{ProductReader, ProductWriter};
use crate::domain::product::{NewProduct, Product, ProductView, UpdateProduct};
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn list_products(&self) -> RepositoryResult<Vec<ProductView>>;
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<ProductView>>;
        fn find_product(&self, id: i32) -> RepositoryResult<Option<Product>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(
            &self,
            product_id: i32,
            updates: &UpdateProduct,
        ) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    }
}
