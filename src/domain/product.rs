use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::reference::{NamedReference, ReferenceIndex, VariantTypeReference};

/// Error returned when a number does not name one of the five image slots.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("image slot must be between 1 and 5, got {0}")]
pub struct InvalidImageSlot(pub i64);

/// One of the five fixed positions an uploaded product image may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ImageSlot(u8);

impl ImageSlot {
    pub const FIRST: u8 = 1;
    pub const LAST: u8 = 5;

    /// Build a slot from its 1-based number.
    pub fn new(value: u8) -> Option<Self> {
        (Self::FIRST..=Self::LAST)
            .contains(&value)
            .then_some(Self(value))
    }

    /// 1-based slot number.
    pub fn get(self) -> u8 {
        self.0
    }

    /// All slots in ascending order.
    pub fn all() -> impl Iterator<Item = ImageSlot> {
        (Self::FIRST..=Self::LAST).map(ImageSlot)
    }

    /// Name of the multipart field carrying the upload for this slot.
    pub fn field_name(self) -> String {
        format!("image{}", self.0)
    }
}

impl TryFrom<i64> for ImageSlot {
    type Error = InvalidImageSlot;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(ImageSlot::new)
            .ok_or(InvalidImageSlot(value))
    }
}

impl TryFrom<i32> for ImageSlot {
    type Error = InvalidImageSlot;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        ImageSlot::try_from(i64::from(value))
    }
}

impl From<ImageSlot> for i64 {
    fn from(value: ImageSlot) -> Self {
        i64::from(value.0)
    }
}

impl From<ImageSlot> for i32 {
    fn from(value: ImageSlot) -> Self {
        i32::from(value.0)
    }
}

/// Image attached to a product slot.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProductImage {
    /// Slot the image occupies.
    pub image: ImageSlot,
    /// Externally servable URL of the stored file.
    pub url: String,
}

impl ProductImage {
    pub fn new(image: ImageSlot, url: impl Into<String>) -> Self {
        Self {
            image,
            url: url.into(),
        }
    }
}

/// Replace the URL of the entry occupying `slot` or append a new entry.
fn put_image(images: &mut Vec<ProductImage>, slot: ImageSlot, url: String) {
    match images.iter_mut().find(|entry| entry.image == slot) {
        Some(entry) => entry.url = url,
        None => images.push(ProductImage::new(slot, url)),
    }
}

/// Stored representation of a product with raw reference identifiers.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Optional longer description shown to users.
    pub description: Option<String>,
    /// Units in stock.
    pub quantity: i32,
    /// Regular price.
    pub price: f64,
    /// Optional discounted price.
    pub offer_price: Option<f64>,
    /// Category the product belongs to.
    pub category_id: i32,
    /// Sub-category the product belongs to.
    pub sub_category_id: i32,
    /// Optional brand reference.
    pub brand_id: Option<i32>,
    /// Optional variant type reference.
    pub variant_type_id: Option<i32>,
    /// Optional variant reference.
    pub variant_id: Option<i32>,
    /// Images ordered by the time their slot was first filled.
    pub images: Vec<ProductImage>,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Point `slot` at a new URL, replacing the existing entry in place or
    /// appending a new one. Other slots are left untouched.
    pub fn set_image(&mut self, slot: ImageSlot, url: impl Into<String>) {
        put_image(&mut self.images, slot, url.into());
    }

    /// Return the image stored for `slot`, if any.
    pub fn image(&self, slot: ImageSlot) -> Option<&ProductImage> {
        self.images.iter().find(|entry| entry.image == slot)
    }
}

/// Product as returned to API clients, with references projected to their
/// display attributes.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub price: f64,
    pub offer_price: Option<f64>,
    #[serde(rename = "proCategoryId")]
    pub category: Option<NamedReference>,
    #[serde(rename = "proSubCategoryId")]
    pub sub_category: Option<NamedReference>,
    #[serde(rename = "proBrandId")]
    pub brand: Option<NamedReference>,
    #[serde(rename = "proVariantTypeId")]
    pub variant_type: Option<VariantTypeReference>,
    #[serde(rename = "proVariantId")]
    pub variant: Option<NamedReference>,
    pub images: Vec<ProductImage>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ProductView {
    /// Resolve the product references through `references`.
    ///
    /// A reference whose target is missing from the index projects to `None`.
    pub fn populate(product: Product, references: &ReferenceIndex) -> Self {
        Self {
            category: references.categories.get(&product.category_id).cloned(),
            sub_category: references
                .sub_categories
                .get(&product.sub_category_id)
                .cloned(),
            brand: product
                .brand_id
                .and_then(|id| references.brands.get(&id).cloned()),
            variant_type: product
                .variant_type_id
                .and_then(|id| references.variant_types.get(&id).cloned()),
            variant: product
                .variant_id
                .and_then(|id| references.variants.get(&id).cloned()),
            id: product.id,
            name: product.name,
            description: product.description,
            quantity: product.quantity,
            price: product.price,
            offer_price: product.offer_price,
            images: product.images,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Payload required to insert a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub price: f64,
    pub offer_price: Option<f64>,
    pub category_id: i32,
    pub sub_category_id: i32,
    pub brand_id: Option<i32>,
    pub variant_type_id: Option<i32>,
    pub variant_id: Option<i32>,
    /// Images in ascending slot order.
    pub images: Vec<ProductImage>,
}

impl NewProduct {
    /// Build a new product payload from the mandatory fields.
    pub fn new(
        name: impl Into<String>,
        quantity: i32,
        price: f64,
        category_id: i32,
        sub_category_id: i32,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            quantity,
            price,
            offer_price: None,
            category_id,
            sub_category_id,
            brand_id: None,
            variant_type_id: None,
            variant_id: None,
            images: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_offer_price(mut self, offer_price: f64) -> Self {
        self.offer_price = Some(offer_price);
        self
    }

    pub fn with_brand_id(mut self, brand_id: i32) -> Self {
        self.brand_id = Some(brand_id);
        self
    }

    pub fn with_variant_type_id(mut self, variant_type_id: i32) -> Self {
        self.variant_type_id = Some(variant_type_id);
        self
    }

    pub fn with_variant_id(mut self, variant_id: i32) -> Self {
        self.variant_id = Some(variant_id);
        self
    }

    /// Attach an image; a second image for the same slot replaces the first.
    pub fn with_image(mut self, slot: ImageSlot, url: impl Into<String>) -> Self {
        put_image(&mut self.images, slot, url.into());
        self.images.sort_by_key(|entry| entry.image);
        self
    }
}

/// Incoming changes for an existing product.
///
/// Every field is optional. [`ProductPatch::apply`] only overwrites a stored
/// value when the incoming one is present and truthy: non-empty text or a
/// non-zero number. There is no way to clear a field through a patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<f64>,
    pub offer_price: Option<f64>,
    pub category_id: Option<i32>,
    pub sub_category_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub variant_type_id: Option<i32>,
    pub variant_id: Option<i32>,
}

fn truthy_text(value: &Option<String>) -> Option<&String> {
    value.as_ref().filter(|text| !text.is_empty())
}

fn truthy_int(value: Option<i32>) -> Option<i32> {
    value.filter(|number| *number != 0)
}

fn truthy_float(value: Option<f64>) -> Option<f64> {
    value.filter(|number| *number != 0.0 && !number.is_nan())
}

impl ProductPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn quantity(mut self, quantity: i32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn offer_price(mut self, offer_price: f64) -> Self {
        self.offer_price = Some(offer_price);
        self
    }

    pub fn category_id(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn sub_category_id(mut self, sub_category_id: i32) -> Self {
        self.sub_category_id = Some(sub_category_id);
        self
    }

    pub fn brand_id(mut self, brand_id: i32) -> Self {
        self.brand_id = Some(brand_id);
        self
    }

    pub fn variant_type_id(mut self, variant_type_id: i32) -> Self {
        self.variant_type_id = Some(variant_type_id);
        self
    }

    pub fn variant_id(mut self, variant_id: i32) -> Self {
        self.variant_id = Some(variant_id);
        self
    }

    /// Overwrite the fields of `product` that carry a truthy incoming value.
    pub fn apply(&self, product: &mut Product) {
        if let Some(name) = truthy_text(&self.name) {
            product.name = name.clone();
        }
        if let Some(description) = truthy_text(&self.description) {
            product.description = Some(description.clone());
        }
        if let Some(quantity) = truthy_int(self.quantity) {
            product.quantity = quantity;
        }
        if let Some(price) = truthy_float(self.price) {
            product.price = price;
        }
        if let Some(offer_price) = truthy_float(self.offer_price) {
            product.offer_price = Some(offer_price);
        }
        if let Some(category_id) = truthy_int(self.category_id) {
            product.category_id = category_id;
        }
        if let Some(sub_category_id) = truthy_int(self.sub_category_id) {
            product.sub_category_id = sub_category_id;
        }
        if let Some(brand_id) = truthy_int(self.brand_id) {
            product.brand_id = Some(brand_id);
        }
        if let Some(variant_type_id) = truthy_int(self.variant_type_id) {
            product.variant_type_id = Some(variant_type_id);
        }
        if let Some(variant_id) = truthy_int(self.variant_id) {
            product.variant_id = Some(variant_id);
        }
    }
}

/// Full replacement state written back when updating a product.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProduct {
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub price: f64,
    pub offer_price: Option<f64>,
    pub category_id: i32,
    pub sub_category_id: i32,
    pub brand_id: Option<i32>,
    pub variant_type_id: Option<i32>,
    pub variant_id: Option<i32>,
    /// Images to upsert by slot; slots not listed here are left as stored.
    pub images: Vec<ProductImage>,
    /// Timestamp captured when the update was prepared.
    pub updated_at: NaiveDateTime,
}

impl From<&Product> for UpdateProduct {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            quantity: product.quantity,
            price: product.price,
            offer_price: product.offer_price,
            category_id: product.category_id,
            sub_category_id: product.sub_category_id,
            brand_id: product.brand_id,
            variant_type_id: product.variant_type_id,
            variant_id: product.variant_id,
            images: product.images.clone(),
            updated_at: Local::now().naive_utc(),
        }
    }
}
