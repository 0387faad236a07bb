//! Product catalog loaded from a local snapshot of the hosted data service.
//!
//! The hosted service is an external collaborator that returns
//! already-shaped records; this module consumes a JSON snapshot of those
//! records, loads it once at startup, and answers the same queries the
//! product pages ask: visible products, filtered by category or name
//! search, in one of four sort orders.

use std::path::Path;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use feira_core::{CategoryId, ProductId};

use crate::cart::NewLineItem;

/// Errors loading the catalog snapshot.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The snapshot file exists but could not be read.
    #[error("failed to read catalog snapshot: {0}")]
    Io(#[from] std::io::Error),
    /// The snapshot file is not valid catalog JSON.
    #[error("failed to parse catalog snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A product record as shaped by the data service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Slug of the category this product belongs to, if any.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub stock: u32,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A category record as shaped by the data service.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

const fn default_visible() -> bool {
    true
}

impl From<&Product> for NewLineItem {
    /// The fields a product contributes to the cart when a shopper adds it.
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
        }
    }
}

/// Sort orders offered by the catalog listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    /// Most recently created first.
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Name,
}

/// Error parsing a [`ProductSort`] from text.
#[derive(Debug, Clone, Error)]
#[error("unknown sort order: {0} (expected newest, price-asc, price-desc, or name)")]
pub struct ParseSortError(String);

impl std::str::FromStr for ProductSort {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "name" => Ok(Self::Name),
            other => Err(ParseSortError(other.to_owned())),
        }
    }
}

/// Listing filter: all fields optional, defaults list everything visible.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Restrict to a category slug.
    pub category: Option<String>,
    /// Case-insensitive substring match on the product name.
    pub search: Option<String>,
    pub sort: ProductSort,
}

/// Catalog store holding all snapshot records in memory.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

#[derive(Debug, Deserialize, Default)]
struct Snapshot {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    categories: Vec<Category>,
}

impl Catalog {
    /// Load the catalog from a snapshot file.
    ///
    /// A missing file is an empty catalog (the store still opens, it just
    /// has nothing on the shelves); an unreadable or malformed file is an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file exists but cannot be read,
    /// or [`CatalogError::Parse`] if it is not valid catalog JSON.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            warn!("Catalog snapshot does not exist: {:?}", path);
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let mut snapshot: Snapshot = serde_json::from_str(&raw)?;

        // Categories render in pickers, so keep them name-ordered.
        snapshot.categories.sort_by(|a, b| a.name.cmp(&b.name));

        info!(
            products = snapshot.products.len(),
            categories = snapshot.categories.len(),
            "Loaded catalog snapshot"
        );

        Ok(Self {
            products: snapshot.products,
            categories: snapshot.categories,
        })
    }

    /// List visible products matching `filter`, in the requested order.
    #[must_use]
    pub fn products(&self, filter: &ProductFilter) -> Vec<&Product> {
        let search = filter.search.as_deref().map(str::to_lowercase);

        let mut results: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| p.visible)
            .filter(|p| {
                filter
                    .category
                    .as_deref()
                    .is_none_or(|slug| p.category.as_deref() == Some(slug))
            })
            .filter(|p| {
                search
                    .as_deref()
                    .is_none_or(|needle| p.name.to_lowercase().contains(needle))
            })
            .collect();

        match filter.sort {
            ProductSort::Newest => results.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            ProductSort::PriceAsc => results.sort_by(|a, b| a.price.cmp(&b.price)),
            ProductSort::PriceDesc => results.sort_by(|a, b| b.price.cmp(&a.price)),
            ProductSort::Name => results.sort_by(|a, b| a.name.cmp(&b.name)),
        }

        results
    }

    /// Look up a visible product by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.visible && p.id == *id)
    }

    /// List visible categories in name order.
    #[must_use]
    pub fn categories(&self) -> Vec<&Category> {
        self.categories.iter().filter(|c| c.visible).collect()
    }

    /// Look up a visible category by slug.
    #[must_use]
    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.visible && c.slug == slug)
    }
}
