use std::collections::HashMap;

use serde::Serialize;

/// Restricted view of a referenced catalog entity exposing only its display name.
///
/// Used for categories, sub-categories, brands and variants when a product is
/// returned to API clients.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct NamedReference {
    /// Identifier of the referenced entity.
    pub id: i32,
    /// Display name of the referenced entity.
    pub name: String,
}

impl NamedReference {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Restricted view of a variant type, projected to its `type` attribute.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct VariantTypeReference {
    /// Identifier of the variant type.
    pub id: i32,
    /// Variant type label such as `size` or `color`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl VariantTypeReference {
    pub fn new(id: i32, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
        }
    }
}

/// Reference views keyed by identifier, loaded once per product batch.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    pub categories: HashMap<i32, NamedReference>,
    pub sub_categories: HashMap<i32, NamedReference>,
    pub brands: HashMap<i32, NamedReference>,
    pub variant_types: HashMap<i32, VariantTypeReference>,
    pub variants: HashMap<i32, NamedReference>,
}
