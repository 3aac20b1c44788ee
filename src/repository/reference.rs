use std::collections::BTreeSet;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::product::Product;
use crate::domain::reference::ReferenceIndex;
use crate::models::reference::{
    BrandName, CategoryName, SubCategoryName, VariantName, VariantTypeKind,
};

/// Load the display projections for every reference held by `products`.
///
/// Each reference table is queried at most once, restricted to the ids the
/// products actually point at.
pub(crate) fn load_reference_index(
    conn: &mut SqliteConnection,
    products: &[Product],
) -> RepositoryResult<ReferenceIndex> {
    use crate::schema::{brands, categories, sub_categories, variant_types, variants};

    let mut index = ReferenceIndex::default();
    if products.is_empty() {
        return Ok(index);
    }

    let category_ids = collect_ids(products.iter().map(|p| Some(p.category_id)));
    let sub_category_ids = collect_ids(products.iter().map(|p| Some(p.sub_category_id)));
    let brand_ids = collect_ids(products.iter().map(|p| p.brand_id));
    let variant_type_ids = collect_ids(products.iter().map(|p| p.variant_type_id));
    let variant_ids = collect_ids(products.iter().map(|p| p.variant_id));

    if !category_ids.is_empty() {
        let rows = categories::table
            .filter(categories::id.eq_any(&category_ids))
            .select(CategoryName::as_select())
            .load::<CategoryName>(conn)?;
        index
            .categories
            .extend(rows.into_iter().map(|row| (row.id, row.into())));
    }

    if !sub_category_ids.is_empty() {
        let rows = sub_categories::table
            .filter(sub_categories::id.eq_any(&sub_category_ids))
            .select(SubCategoryName::as_select())
            .load::<SubCategoryName>(conn)?;
        index
            .sub_categories
            .extend(rows.into_iter().map(|row| (row.id, row.into())));
    }

    if !brand_ids.is_empty() {
        let rows = brands::table
            .filter(brands::id.eq_any(&brand_ids))
            .select(BrandName::as_select())
            .load::<BrandName>(conn)?;
        index
            .brands
            .extend(rows.into_iter().map(|row| (row.id, row.into())));
    }

    if !variant_type_ids.is_empty() {
        let rows = variant_types::table
            .filter(variant_types::id.eq_any(&variant_type_ids))
            .select(VariantTypeKind::as_select())
            .load::<VariantTypeKind>(conn)?;
        index
            .variant_types
            .extend(rows.into_iter().map(|row| (row.id, row.into())));
    }

    if !variant_ids.is_empty() {
        let rows = variants::table
            .filter(variants::id.eq_any(&variant_ids))
            .select(VariantName::as_select())
            .load::<VariantName>(conn)?;
        index
            .variants
            .extend(rows.into_iter().map(|row| (row.id, row.into())));
    }

    Ok(index)
}

fn collect_ids(ids: impl Iterator<Item = Option<i32>>) -> Vec<i32> {
    ids.flatten()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
