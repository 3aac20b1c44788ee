use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct,
        ProductImage as DomainProductImage, ProductView, UpdateProduct as DomainUpdateProduct,
    },
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
    },
    models::product_image::{NewProductImage as DbNewProductImage, ProductImage as DbProductImage},
    repository::reference::load_reference_index,
    repository::{DieselRepository, ProductReader, ProductWriter},
};

impl ProductReader for DieselRepository {
    fn list_products(&self) -> RepositoryResult<Vec<ProductView>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let db_products = products::table
            .order(products::id.asc())
            .load::<DbProduct>(&mut conn)?;

        let products = attach_images(&mut conn, db_products)?;
        let references = load_reference_index(&mut conn, &products)?;

        Ok(products
            .into_iter()
            .map(|product| ProductView::populate(product, &references))
            .collect())
    }

    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<ProductView>> {
        let mut conn = self.conn()?;

        let Some(product) = find_with_images(&mut conn, id)? else {
            return Ok(None);
        };

        let references = load_reference_index(&mut conn, std::slice::from_ref(&product))?;
        Ok(Some(ProductView::populate(product, &references)))
    }

    fn find_product(&self, id: i32) -> RepositoryResult<Option<DomainProduct>> {
        let mut conn = self.conn()?;
        find_with_images(&mut conn, id)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::{product_images, products};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let db_new = DbNewProduct::from(new_product);

            let created = diesel::insert_into(products::table)
                .values(&db_new)
                .get_result::<DbProduct>(conn)?;

            if !new_product.images.is_empty() {
                let rows: Vec<DbNewProductImage> = new_product
                    .images
                    .iter()
                    .map(|image| DbNewProductImage::new(created.id, image))
                    .collect();
                diesel::insert_into(product_images::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            let mut domain: DomainProduct = created.into();
            domain.images = load_images_for_products(conn, &[domain.id])?
                .remove(&domain.id)
                .unwrap_or_default();
            Ok(domain)
        })
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::{product_images, products};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let db_updates = DbUpdateProduct::from(updates);

            let updated = diesel::update(products::table.filter(products::id.eq(product_id)))
                .set(&db_updates)
                .get_result::<DbProduct>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            for image in &updates.images {
                let slot: i32 = image.image.into();
                let replaced = diesel::update(
                    product_images::table
                        .filter(product_images::product_id.eq(product_id))
                        .filter(product_images::slot.eq(slot)),
                )
                .set(product_images::url.eq(&image.url))
                .execute(conn)?;

                if replaced == 0 {
                    diesel::insert_into(product_images::table)
                        .values(&DbNewProductImage::new(product_id, image))
                        .execute(conn)?;
                }
            }

            let mut domain: DomainProduct = updated.into();
            domain.images = load_images_for_products(conn, &[domain.id])?
                .remove(&domain.id)
                .unwrap_or_default();
            Ok(domain)
        })
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::{product_images, products};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(product_images::table.filter(product_images::product_id.eq(product_id)))
                .execute(conn)?;

            let deleted = diesel::delete(products::table.filter(products::id.eq(product_id)))
                .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}

fn find_with_images(
    conn: &mut SqliteConnection,
    id: i32,
) -> RepositoryResult<Option<DomainProduct>> {
    use crate::schema::products;

    let product = products::table
        .filter(products::id.eq(id))
        .first::<DbProduct>(conn)
        .optional()?;

    match product {
        Some(db_product) => Ok(attach_images(conn, vec![db_product])?.pop()),
        None => Ok(None),
    }
}

fn attach_images(
    conn: &mut SqliteConnection,
    db_products: Vec<DbProduct>,
) -> RepositoryResult<Vec<DomainProduct>> {
    if db_products.is_empty() {
        return Ok(Vec::new());
    }

    let product_ids: Vec<i32> = db_products.iter().map(|product| product.id).collect();
    let mut image_map = load_images_for_products(conn, &product_ids)?;

    let mut domain_products = Vec::with_capacity(db_products.len());
    for db_product in db_products {
        let mut domain: DomainProduct = db_product.into();
        domain.images = image_map.remove(&domain.id).unwrap_or_default();
        domain_products.push(domain);
    }

    Ok(domain_products)
}

fn load_images_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DomainProductImage>>> {
    use crate::schema::product_images;

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_images::table
        .filter(product_images::product_id.eq_any(product_ids))
        .order(product_images::id.asc())
        .load::<DbProductImage>(conn)?;

    let mut map: HashMap<i32, Vec<DomainProductImage>> = HashMap::new();
    for row in rows {
        let product_id = row.product_id;
        match DomainProductImage::try_from(row) {
            Ok(image) => map.entry(product_id).or_default().push(image),
            Err(err) => log::warn!("Skipping image of product {product_id}: {err}"),
        }
    }

    Ok(map)
}
