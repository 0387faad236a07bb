//! Cart commands.
//!
//! Each mutating command prints the resulting cart, the same re-render a
//! page performs when the change signal fires.

use feira_core::ProductId;
use feira_storefront::cart::{LineItem, NewLineItem};
use feira_storefront::error::{Result, StorefrontError};
use feira_storefront::state::AppState;

/// Show the cart contents.
pub fn show(state: &AppState) {
    print_cart(state, &state.cart().items());
}

/// Add one unit of a catalog product to the cart.
///
/// # Errors
///
/// Returns `NotFound` for an unknown product id, or the cart error if
/// persisting fails.
pub fn add(state: &AppState, product_id: &str) -> Result<()> {
    let id = ProductId::new(product_id);
    let product = state
        .catalog()
        .product(&id)
        .ok_or_else(|| StorefrontError::NotFound(format!("product {product_id}")))?;

    let items = state.cart().add(NewLineItem::from(product))?;
    println!("Added {} to cart.", product.name);
    print_cart(state, &items);
    Ok(())
}

/// Set the quantity of a cart entry; 0 or less removes it.
///
/// # Errors
///
/// Returns the cart error if persisting fails.
pub fn set_quantity(state: &AppState, product_id: &str, quantity: i64) -> Result<()> {
    let items = state
        .cart()
        .update_quantity(&ProductId::new(product_id), quantity)?;
    print_cart(state, &items);
    Ok(())
}

/// Remove an entry from the cart.
///
/// # Errors
///
/// Returns the cart error if persisting fails.
pub fn remove(state: &AppState, product_id: &str) -> Result<()> {
    let items = state.cart().remove(&ProductId::new(product_id))?;
    print_cart(state, &items);
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns the cart error if the storage slot cannot be deleted.
pub fn clear(state: &AppState) -> Result<()> {
    state.cart().clear()?;
    println!("Cart cleared.");
    Ok(())
}

/// Show the cart total.
pub fn total(state: &AppState) {
    println!("{}", state.config().currency.format(state.cart().total()));
}

fn print_cart(state: &AppState, items: &[LineItem]) {
    if items.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    let currency = state.config().currency;
    for item in items {
        println!(
            "{:<14} {:<36} x{:<4} {:>12}",
            item.id.as_str(),
            item.name,
            item.quantity,
            currency.format(item.line_total())
        );
    }
    let total: rust_decimal::Decimal = items.iter().map(LineItem::line_total).sum();
    println!("{:>69}", format!("Total: {}", currency.format(total)));
}
