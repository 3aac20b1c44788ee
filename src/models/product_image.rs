use diesel::prelude::*;

use crate::domain::product::{ImageSlot, InvalidImageSlot, ProductImage as DomainProductImage};

/// Diesel model representing the `product_images` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product_images)]
pub struct ProductImage {
    pub id: i32,
    pub product_id: i32,
    pub slot: i32,
    pub url: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::product_images)]
pub struct NewProductImage<'a> {
    pub product_id: i32,
    pub slot: i32,
    pub url: &'a str,
}

impl<'a> NewProductImage<'a> {
    pub fn new(product_id: i32, image: &'a DomainProductImage) -> Self {
        Self {
            product_id,
            slot: image.image.into(),
            url: image.url.as_str(),
        }
    }
}

impl TryFrom<ProductImage> for DomainProductImage {
    type Error = InvalidImageSlot;

    fn try_from(value: ProductImage) -> Result<Self, Self::Error> {
        Ok(Self {
            image: ImageSlot::try_from(value.slot)?,
            url: value.url,
        })
    }
}
