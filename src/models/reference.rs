//! Projections of the reference tables a product points at.
//!
//! Only the identifier and the display column are selected; the remaining
//! columns of those tables are never loaded here.

use diesel::prelude::*;

use crate::domain::reference::{NamedReference, VariantTypeReference};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
pub struct CategoryName {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::sub_categories)]
pub struct SubCategoryName {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::brands)]
pub struct BrandName {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::variant_types)]
pub struct VariantTypeKind {
    pub id: i32,
    pub type_: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::variants)]
pub struct VariantName {
    pub id: i32,
    pub name: String,
}

impl From<CategoryName> for NamedReference {
    fn from(value: CategoryName) -> Self {
        Self::new(value.id, value.name)
    }
}

impl From<SubCategoryName> for NamedReference {
    fn from(value: SubCategoryName) -> Self {
        Self::new(value.id, value.name)
    }
}

impl From<BrandName> for NamedReference {
    fn from(value: BrandName) -> Self {
        Self::new(value.id, value.name)
    }
}

impl From<VariantName> for NamedReference {
    fn from(value: VariantName) -> Self {
        Self::new(value.id, value.name)
    }
}

impl From<VariantTypeKind> for VariantTypeReference {
    fn from(value: VariantTypeKind) -> Self {
        Self::new(value.id, value.type_)
    }
}
