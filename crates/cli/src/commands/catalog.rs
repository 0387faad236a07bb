//! Catalog browsing commands.

use feira_core::ProductId;
use feira_storefront::catalog::{ProductFilter, ProductSort};
use feira_storefront::error::{Result, StorefrontError};
use feira_storefront::state::AppState;

/// List visible products, optionally filtered and sorted.
///
/// # Errors
///
/// Returns `NotFound` for an unknown category slug.
pub fn list(
    state: &AppState,
    category: Option<String>,
    search: Option<String>,
    sort: ProductSort,
) -> Result<()> {
    if let Some(slug) = category.as_deref()
        && state.catalog().category_by_slug(slug).is_none()
    {
        return Err(StorefrontError::NotFound(format!("category {slug}")));
    }

    let filter = ProductFilter {
        category,
        search,
        sort,
    };
    let products = state.catalog().products(&filter);
    if products.is_empty() {
        println!("No products found.");
        return Ok(());
    }

    let currency = state.config().currency;
    for product in products {
        let featured = if product.featured { " *" } else { "" };
        println!(
            "{:<14} {:<36} {:>12}{featured}",
            product.id.as_str(),
            product.name,
            currency.format(product.price)
        );
    }
    Ok(())
}

/// Show one product in detail.
///
/// # Errors
///
/// Returns `NotFound` if the id does not name a visible product.
pub fn show(state: &AppState, id: &str) -> Result<()> {
    let id = ProductId::new(id);
    let product = state
        .catalog()
        .product(&id)
        .ok_or_else(|| StorefrontError::NotFound(format!("product {id}")))?;

    println!("{}", product.name);
    println!("  id:       {}", product.id);
    println!(
        "  price:    {}",
        state.config().currency.format(product.price)
    );
    if let Some(category) = &product.category {
        println!("  category: {category}");
    }
    if let Some(image_url) = &product.image_url {
        println!("  image:    {image_url}");
    }
    if let Some(description) = &product.description {
        println!("\n{description}");
    }
    if product.stock == 0 {
        println!("\nOut of stock");
    }
    Ok(())
}
