use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Hard cap on page size for every list query
pub const MAX_PAGE_SIZE: u64 = 200;

/// Regex pattern for names: alphanumeric plus space, hyphen, underscore
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9 _-]*$").unwrap());

/// Custom validator for category/product names
fn validate_catalog_name(name: &str) -> Result<(), validator::ValidationError> {
    if !NAME_PATTERN.is_match(name) {
        return Err(validator::ValidationError::new("invalid_catalog_name"));
    }
    Ok(())
}

/// Clamp a requested page size to the allowed range
pub fn page_limit(limit: u64) -> u64 {
    limit.clamp(1, MAX_PAGE_SIZE)
}

/// Category entity - a grouping of products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    /// Unique identifier, assigned at creation and immutable
    pub id: Uuid,
    /// Category name (unique across the catalog)
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Product entity - a catalog item owned by one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier, assigned at creation and immutable
    pub id: Uuid,
    /// Product name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Price in minor currency units
    pub price_cents: i64,
    /// Owning category
    pub category_id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Product joined to its owning category.
///
/// The embedded category is the flat shape and never carries products back;
/// the category/product cycle is broken here, not left to the serializer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductWithCategory {
    pub product: Product,
    pub category: Option<Category>,
}

/// One category together with its products (flat, bounded)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryWithProducts {
    pub category: Category,
    pub products: Vec<Product>,
}

/// DTO for creating a new category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 100), custom(function = "validate_catalog_name"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// DTO for replacing an existing category.
///
/// Carries the full record; `id`, when present, must match the path id.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 100), custom(function = "validate_catalog_name"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 100), custom(function = "validate_catalog_name"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0))]
    pub price_cents: i64,
    pub category_id: Uuid,
}

/// DTO for replacing an existing product (full record, id-checked)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 100), custom(function = "validate_catalog_name"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0))]
    pub price_cents: i64,
    pub category_id: Uuid,
}

/// Query filters for listing categories
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct CategoryFilter {
    /// Restrict to categories having at least one product
    #[serde(default)]
    pub has_products: bool,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

/// Query filters for listing products
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct ProductFilter {
    pub category_id: Option<Uuid>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    50
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self {
            has_products: false,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category_id: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names_pass() {
        for name in ["Books", "Hand Tools", "usb-c_cables", "4k Monitors"] {
            let input = CreateCategory {
                name: name.to_string(),
                description: String::new(),
            };
            assert!(input.validate().is_ok(), "expected '{name}' to be valid");
        }
    }

    #[test]
    fn test_invalid_names_fail() {
        for name in ["", " leading-space", "semi;colon", "路"] {
            let input = CreateCategory {
                name: name.to_string(),
                description: String::new(),
            };
            assert!(input.validate().is_err(), "expected '{name}' to be invalid");
        }
    }

    #[test]
    fn test_negative_price_fails() {
        let input = CreateProduct {
            name: "Gizmo".to_string(),
            description: String::new(),
            price_cents: -1,
            category_id: Uuid::now_v7(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_page_limit_clamps() {
        assert_eq!(page_limit(0), 1);
        assert_eq!(page_limit(50), 50);
        assert_eq!(page_limit(10_000), MAX_PAGE_SIZE);
    }
}
