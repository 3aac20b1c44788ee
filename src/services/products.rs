use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::config::ImageConfig;
use crate::domain::product::{ProductView, UpdateProduct};
use crate::forms::products::{ProductFields, SlotUpload};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::images::store_uploads;
use crate::services::{ServiceError, ServiceResult};

fn ensure_role(user: &AuthenticatedUser) -> ServiceResult<()> {
    if check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Interpret a path identifier in the store's id scheme.
///
/// A malformed identifier is reported the way storage reports it, not as a
/// validation failure.
fn parse_product_id(raw: &str) -> ServiceResult<i32> {
    raw.trim().parse::<i32>().map_err(|_| {
        ServiceError::Persistence(format!(
            "Cast to Integer failed for value \"{raw}\" at path \"id\""
        ))
    })
}

/// Returns every product with its references projected.
pub fn list_products<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<ProductView>>
where
    R: ProductReader + ?Sized,
{
    ensure_role(user)?;

    repo.list_products().map_err(ServiceError::from)
}

/// Returns a single product with its references projected.
pub fn get_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: &str,
) -> ServiceResult<ProductView>
where
    R: ProductReader + ?Sized,
{
    ensure_role(user)?;

    let product_id = parse_product_id(product_id)?;

    repo.get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a product from the submitted fields and uploads.
///
/// Uploads are copied into the image directory only once the caller is
/// authorized, and before the fields are validated.
pub fn create_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    fields: ProductFields,
    uploads: Vec<SlotUpload>,
    image_config: &ImageConfig,
) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    ensure_role(user)?;

    let stored = store_uploads(image_config.upload_path(), uploads)?;

    let mut new_product = fields.into_new_product()?;
    for image in &stored {
        let image = image.to_product_image(image_config);
        new_product = new_product.with_image(image.image, image.url);
    }

    let created = repo
        .create_product(&new_product)
        .map_err(ServiceError::from)?;
    log::info!("Created product {} ({})", created.id, created.name);

    Ok(())
}

/// Applies the truthy fields and the new uploads to an existing product.
///
/// Uploads are stored only after the product has been found.
pub fn update_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: &str,
    fields: ProductFields,
    uploads: Vec<SlotUpload>,
    image_config: &ImageConfig,
) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    ensure_role(user)?;

    let product_id = parse_product_id(product_id)?;

    let mut product = repo
        .find_product(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let stored = store_uploads(image_config.upload_path(), uploads)?;

    fields.into_patch()?.apply(&mut product);
    for image in &stored {
        product.set_image(image.slot, image_config.image_url(&image.filename));
    }

    repo.update_product(product_id, &UpdateProduct::from(&product))
        .map_err(ServiceError::from)?;

    Ok(())
}

/// Removes a product and its images.
pub fn delete_product<R>(repo: &R, user: &AuthenticatedUser, product_id: &str) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    ensure_role(user)?;

    let product_id = parse_product_id(product_id)?;

    repo.delete_product(product_id).map_err(ServiceError::from)
}
