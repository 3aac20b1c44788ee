use std::str::FromStr;

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use thiserror::Error;

use crate::domain::product::{ImageSlot, NewProduct, ProductPatch};

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error, PartialEq)]
pub enum ProductFormError {
    /// One of the fields needed to create a product is absent or falsy.
    #[error("Required fields are missing.")]
    MissingRequiredFields,
    /// A present value could not be cast to the column type.
    #[error("Cast to {expected} failed for value \"{value}\" at path \"{field}\"")]
    Cast {
        field: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl ProductFormError {
    /// Whether the error is a presence failure rather than a storage cast failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, ProductFormError::MissingRequiredFields)
    }
}

/// Multipart payload accepted by the create and update product endpoints.
#[derive(MultipartForm)]
pub struct ProductForm {
    pub name: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub quantity: Option<Text<String>>,
    pub price: Option<Text<String>>,
    #[multipart(rename = "offerPrice")]
    pub offer_price: Option<Text<String>>,
    #[multipart(rename = "proCategoryId")]
    pub pro_category_id: Option<Text<String>>,
    #[multipart(rename = "proSubCategoryId")]
    pub pro_sub_category_id: Option<Text<String>>,
    #[multipart(rename = "proBrandId")]
    pub pro_brand_id: Option<Text<String>>,
    #[multipart(rename = "proVariantTypeId")]
    pub pro_variant_type_id: Option<Text<String>>,
    #[multipart(rename = "proVariantId")]
    pub pro_variant_id: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub image1: Option<TempFile>,
    #[multipart(limit = "10MB")]
    pub image2: Option<TempFile>,
    #[multipart(limit = "10MB")]
    pub image3: Option<TempFile>,
    #[multipart(limit = "10MB")]
    pub image4: Option<TempFile>,
    #[multipart(limit = "10MB")]
    pub image5: Option<TempFile>,
}

/// Image upload bound to its slot.
pub struct SlotUpload {
    pub slot: ImageSlot,
    pub file: TempFile,
}

impl ProductForm {
    /// Split the payload into its text fields and the uploads present, in
    /// ascending slot order.
    pub fn into_parts(self) -> (ProductFields, Vec<SlotUpload>) {
        let text = |value: Option<Text<String>>| value.map(Text::into_inner);

        let fields = ProductFields {
            name: text(self.name),
            description: text(self.description),
            quantity: text(self.quantity),
            price: text(self.price),
            offer_price: text(self.offer_price),
            pro_category_id: text(self.pro_category_id),
            pro_sub_category_id: text(self.pro_sub_category_id),
            pro_brand_id: text(self.pro_brand_id),
            pro_variant_type_id: text(self.pro_variant_type_id),
            pro_variant_id: text(self.pro_variant_id),
        };

        let files = [self.image1, self.image2, self.image3, self.image4, self.image5];
        let uploads = ImageSlot::all()
            .zip(files)
            .filter_map(|(slot, file)| file.map(|file| SlotUpload { slot, file }))
            .collect();

        (fields, uploads)
    }
}

/// Text fields of a product submission exactly as received.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<String>,
    pub price: Option<String>,
    pub offer_price: Option<String>,
    pub pro_category_id: Option<String>,
    pub pro_sub_category_id: Option<String>,
    pub pro_brand_id: Option<String>,
    pub pro_variant_type_id: Option<String>,
    pub pro_variant_id: Option<String>,
}

impl ProductFields {
    /// Check that every required field is present and truthy.
    ///
    /// Only presence is checked here; a present but non-numeric quantity
    /// passes and fails later when cast.
    pub fn has_required(&self) -> bool {
        truthy_text(&self.name)
            && truthy_number(&self.quantity)
            && truthy_number(&self.price)
            && truthy_number(&self.pro_category_id)
            && truthy_number(&self.pro_sub_category_id)
    }

    /// Validate presence and cast the fields into a domain `NewProduct`.
    pub fn into_new_product(self) -> ProductFormResult<NewProduct> {
        if !self.has_required() {
            return Err(ProductFormError::MissingRequiredFields);
        }

        let name = self.name.ok_or(ProductFormError::MissingRequiredFields)?;
        let quantity = cast::<i32>("quantity", "Number", self.quantity)?
            .ok_or(ProductFormError::MissingRequiredFields)?;
        let price = cast::<f64>("price", "Number", self.price)?
            .ok_or(ProductFormError::MissingRequiredFields)?;
        let category_id = cast::<i32>("proCategoryId", "Integer", self.pro_category_id)?
            .ok_or(ProductFormError::MissingRequiredFields)?;
        let sub_category_id =
            cast::<i32>("proSubCategoryId", "Integer", self.pro_sub_category_id)?
                .ok_or(ProductFormError::MissingRequiredFields)?;

        let mut product = NewProduct::new(name, quantity, price, category_id, sub_category_id);

        if let Some(description) = self.description.filter(|value| !value.is_empty()) {
            product = product.with_description(description);
        }
        if let Some(offer_price) = cast::<f64>("offerPrice", "Number", self.offer_price)? {
            product = product.with_offer_price(offer_price);
        }
        if let Some(brand_id) = cast::<i32>("proBrandId", "Integer", self.pro_brand_id)? {
            product = product.with_brand_id(brand_id);
        }
        if let Some(variant_type_id) =
            cast::<i32>("proVariantTypeId", "Integer", self.pro_variant_type_id)?
        {
            product = product.with_variant_type_id(variant_type_id);
        }
        if let Some(variant_id) = cast::<i32>("proVariantId", "Integer", self.pro_variant_id)? {
            product = product.with_variant_id(variant_id);
        }

        Ok(product)
    }

    /// Cast the fields into a patch. Falsy values are kept in the patch and
    /// ignored when it is applied.
    pub fn into_patch(self) -> ProductFormResult<ProductPatch> {
        Ok(ProductPatch {
            name: self.name,
            description: self.description,
            quantity: cast("quantity", "Number", self.quantity)?,
            price: cast("price", "Number", self.price)?,
            offer_price: cast("offerPrice", "Number", self.offer_price)?,
            category_id: cast("proCategoryId", "Integer", self.pro_category_id)?,
            sub_category_id: cast("proSubCategoryId", "Integer", self.pro_sub_category_id)?,
            brand_id: cast("proBrandId", "Integer", self.pro_brand_id)?,
            variant_type_id: cast("proVariantTypeId", "Integer", self.pro_variant_type_id)?,
            variant_id: cast("proVariantId", "Integer", self.pro_variant_id)?,
        })
    }
}

fn truthy_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|text| !text.is_empty())
}

/// Non-empty and, when it reads as a number, not zero.
fn truthy_number(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|text| {
        !text.is_empty()
            && !text
                .trim()
                .parse::<f64>()
                .is_ok_and(|number| number == 0.0 || number.is_nan())
    })
}

/// Cast a raw field. Missing and empty values cast to `None`.
fn cast<T: FromStr>(
    field: &'static str,
    expected: &'static str,
    value: Option<String>,
) -> ProductFormResult<Option<T>> {
    match value {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ProductFormError::Cast {
                field,
                expected,
                value: raw,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    fn complete_fields() -> ProductFields {
        ProductFields {
            name: Some("Sneakers".to_string()),
            description: Some("Running shoes".to_string()),
            quantity: Some("10".to_string()),
            price: Some("99.90".to_string()),
            offer_price: Some("79.90".to_string()),
            pro_category_id: Some("1".to_string()),
            pro_sub_category_id: Some("2".to_string()),
            pro_brand_id: Some("3".to_string()),
            pro_variant_type_id: None,
            pro_variant_id: Some(String::new()),
        }
    }

    fn temp_upload(name: &str) -> TempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(b"png").expect("write temp file");
        TempFile {
            file,
            content_type: None,
            file_name: Some(name.to_string()),
            size: 3,
        }
    }

    fn text(value: &str) -> Option<Text<String>> {
        Some(Text(value.to_string()))
    }

    #[test]
    fn into_new_product_casts_all_fields() {
        let product = complete_fields()
            .into_new_product()
            .expect("expected success");

        assert_eq!(product.name, "Sneakers");
        assert_eq!(product.description.as_deref(), Some("Running shoes"));
        assert_eq!(product.quantity, 10);
        assert_eq!(product.price, 99.90);
        assert_eq!(product.offer_price, Some(79.90));
        assert_eq!(product.category_id, 1);
        assert_eq!(product.sub_category_id, 2);
        assert_eq!(product.brand_id, Some(3));
        assert_eq!(product.variant_type_id, None);
        assert_eq!(product.variant_id, None);
        assert!(product.images.is_empty());
    }

    #[test]
    fn into_new_product_requires_each_mandatory_field() {
        let clears: [fn(&mut ProductFields); 5] = [
            |f| f.name = None,
            |f| f.quantity = Some(String::new()),
            |f| f.price = None,
            |f| f.pro_category_id = None,
            |f| f.pro_sub_category_id = Some(String::new()),
        ];

        for clear in clears {
            let mut fields = complete_fields();
            clear(&mut fields);
            assert_eq!(
                fields.into_new_product(),
                Err(ProductFormError::MissingRequiredFields)
            );
        }
    }

    #[test]
    fn zero_quantity_counts_as_missing() {
        let mut fields = complete_fields();
        fields.quantity = Some("0".to_string());

        let err = fields.into_new_product().expect_err("expected failure");
        assert!(err.is_validation());
    }

    #[test]
    fn non_numeric_quantity_passes_presence_but_fails_cast() {
        let mut fields = complete_fields();
        fields.quantity = Some("lots".to_string());

        assert!(fields.has_required());
        let err = fields.into_new_product().expect_err("expected cast failure");
        assert!(!err.is_validation());
        assert_eq!(
            err.to_string(),
            "Cast to Number failed for value \"lots\" at path \"quantity\""
        );
    }

    #[test]
    fn into_patch_keeps_raw_presence() {
        let fields = ProductFields {
            name: Some(String::new()),
            quantity: Some("0".to_string()),
            price: Some("12.5".to_string()),
            pro_brand_id: Some("7".to_string()),
            ..ProductFields::default()
        };

        let patch = fields.into_patch().expect("expected success");

        assert_eq!(patch.name.as_deref(), Some(""));
        assert_eq!(patch.quantity, Some(0));
        assert_eq!(patch.price, Some(12.5));
        assert_eq!(patch.brand_id, Some(7));
        assert_eq!(patch.category_id, None);
    }

    #[test]
    fn into_patch_rejects_malformed_reference() {
        let fields = ProductFields {
            pro_category_id: Some("not-an-id".to_string()),
            ..ProductFields::default()
        };

        assert!(matches!(
            fields.into_patch(),
            Err(ProductFormError::Cast {
                field: "proCategoryId",
                ..
            })
        ));
    }

    #[test]
    fn into_parts_binds_uploads_to_slots() {
        let form = ProductForm {
            name: text("Sneakers"),
            description: None,
            quantity: text("1"),
            price: text("2"),
            offer_price: None,
            pro_category_id: text("1"),
            pro_sub_category_id: text("1"),
            pro_brand_id: None,
            pro_variant_type_id: None,
            pro_variant_id: None,
            image1: None,
            image2: Some(temp_upload("side.png")),
            image3: None,
            image4: Some(temp_upload("back.png")),
            image5: None,
        };

        let (fields, uploads) = form.into_parts();

        assert_eq!(fields.name.as_deref(), Some("Sneakers"));
        assert_eq!(fields.pro_sub_category_id.as_deref(), Some("1"));
        let slots: Vec<u8> = uploads.iter().map(|upload| upload.slot.get()).collect();
        assert_eq!(slots, vec![2, 4]);
        assert_eq!(uploads[0].file.file_name.as_deref(), Some("side.png"));
    }
}
