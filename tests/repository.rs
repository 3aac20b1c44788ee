use pushkind_common::repository::errors::RepositoryError;
use pushkind_products::domain::product::{ImageSlot, NewProduct, ProductPatch, UpdateProduct};
use pushkind_products::domain::reference::{NamedReference, VariantTypeReference};
use pushkind_products::repository::{DieselRepository, ProductReader, ProductWriter};

mod common;

fn slot(value: u8) -> ImageSlot {
    ImageSlot::new(value).expect("valid slot")
}

#[test]
fn test_product_repository_crud() {
    let test_db = common::TestDb::new("test_product_repository_crud.db");
    let refs = test_db.seed_references();
    let repo = DieselRepository::new(test_db.pool());

    let new_product = NewProduct::new("Sneakers", 10, 99.5, refs.category_id, refs.sub_category_id)
        .with_description("Running shoes")
        .with_brand_id(refs.brand_id)
        .with_variant_type_id(refs.variant_type_id)
        .with_variant_id(refs.variant_id)
        .with_image(slot(1), "http://localhost/image/products/front.png")
        .with_image(slot(3), "http://localhost/image/products/side.png");

    let created = repo.create_product(&new_product).unwrap();
    assert_eq!(created.name, "Sneakers");
    assert_eq!(created.images.len(), 2);

    let other = NewProduct::new("Sandals", 4, 20.0, refs.category_id, refs.sub_category_id);
    let other = repo.create_product(&other).unwrap();

    let listed = repo.list_products().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[1].id, other.id);
    assert_eq!(
        listed[0].category,
        Some(NamedReference::new(refs.category_id, "Shoes"))
    );
    assert_eq!(
        listed[0].sub_category,
        Some(NamedReference::new(refs.sub_category_id, "Running"))
    );
    assert_eq!(
        listed[0].brand,
        Some(NamedReference::new(refs.brand_id, "Swift"))
    );
    assert_eq!(
        listed[0].variant_type,
        Some(VariantTypeReference::new(refs.variant_type_id, "size"))
    );
    assert_eq!(
        listed[0].variant,
        Some(NamedReference::new(refs.variant_id, "42"))
    );
    assert_eq!(listed[1].brand, None);

    let mut stored = repo.find_product(created.id).unwrap().expect("product");
    ProductPatch::new()
        .quantity(0)
        .price(120.0)
        .apply(&mut stored);
    stored.set_image(slot(3), "http://localhost/image/products/side-2.png");
    stored.set_image(slot(5), "http://localhost/image/products/top.png");

    let updated = repo
        .update_product(created.id, &UpdateProduct::from(&stored))
        .unwrap();
    assert_eq!(updated.quantity, 10);
    assert_eq!(updated.price, 120.0);
    assert_eq!(updated.images.len(), 3);
    assert_eq!(
        updated.image(slot(3)).map(|image| image.url.as_str()),
        Some("http://localhost/image/products/side-2.png")
    );
    assert_eq!(updated.images[1].image, slot(3));
    assert_eq!(updated.images[2].image, slot(5));

    let err = repo
        .update_product(9999, &UpdateProduct::from(&stored))
        .expect_err("expected update of a missing product to fail");
    assert!(matches!(err, RepositoryError::NotFound));

    repo.delete_product(created.id).unwrap();
    assert!(repo.get_product_by_id(created.id).unwrap().is_none());

    let err = repo
        .delete_product(created.id)
        .expect_err("expected second delete to fail");
    assert!(matches!(err, RepositoryError::NotFound));

    let remaining = repo.list_products().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "Sandals");
}

#[test]
fn test_projection_serializes_only_display_fields() {
    let test_db = common::TestDb::new("test_projection_serializes_only_display_fields.db");
    let refs = test_db.seed_references();
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_product(
            &NewProduct::new("Sneakers", 1, 10.0, refs.category_id, refs.sub_category_id)
                .with_variant_type_id(refs.variant_type_id),
        )
        .unwrap();

    let view = repo
        .get_product_by_id(created.id)
        .unwrap()
        .expect("product");
    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(
        json["proCategoryId"],
        serde_json::json!({"id": refs.category_id, "name": "Shoes"})
    );
    assert_eq!(
        json["proVariantTypeId"],
        serde_json::json!({"id": refs.variant_type_id, "type": "size"})
    );
    assert!(json["proBrandId"].is_null());
    assert_eq!(json["images"], serde_json::json!([]));
}
