//! Checkout: shipping details validation and simulated order placement.
//!
//! There is no payment processor behind this module. Placing an order
//! validates the shipping form, snapshots the cart into an [`Order`],
//! clears the cart, and returns the confirmation; payment and delivery are
//! arranged with the shopper out of band.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use feira_core::{Email, OrderId};

use crate::cart::{CartError, CartStore, LineItem};

/// Errors surfaced by order placement.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout requires at least one line item.
    #[error("cart is empty")]
    EmptyCart,

    /// The shipping form failed validation; the message names the field.
    #[error("invalid shipping details: {0}")]
    InvalidDetails(String),

    /// The cart could not be cleared after building the order; the order
    /// is NOT placed in that case.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Shipping form input, exactly the fields the checkout page collects.
#[derive(Debug, Clone)]
pub struct ShippingDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    /// Two-letter state code.
    pub state: String,
    pub zip_code: String,
}

/// A placed (simulated) order: the confirmation returned to the shopper.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub placed_at: DateTime<Utc>,
    pub contact: Email,
    pub details: ShippingDetails,
    pub items: Vec<LineItem>,
    pub total: Decimal,
}

/// Validate the shipping form, returning the parsed contact email.
///
/// # Errors
///
/// Returns [`CheckoutError::InvalidDetails`] naming the first field that
/// fails: every field is required, the email must be structurally valid,
/// and the state must be a two-letter code.
pub fn validate_details(details: &ShippingDetails) -> Result<Email, CheckoutError> {
    let required = [
        ("name", &details.name),
        ("email", &details.email),
        ("phone", &details.phone),
        ("address", &details.address),
        ("city", &details.city),
        ("state", &details.state),
        ("zip code", &details.zip_code),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(CheckoutError::InvalidDetails(format!(
                "{field} is required"
            )));
        }
    }

    let state = details.state.trim();
    if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CheckoutError::InvalidDetails(
            "state must be a two-letter code".to_owned(),
        ));
    }

    Email::parse(details.email.trim())
        .map_err(|e| CheckoutError::InvalidDetails(format!("email: {e}")))
}

/// Place an order for the current cart contents.
///
/// On success the cart has been cleared (which fires its change signal) and
/// the returned [`Order`] is the confirmation. Order success is simulated:
/// nothing is transmitted anywhere.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if there is nothing to order,
/// [`CheckoutError::InvalidDetails`] if the form fails validation, or
/// [`CheckoutError::Cart`] if clearing the cart fails (the order is not
/// considered placed).
pub fn place_order(cart: &CartStore, details: ShippingDetails) -> Result<Order, CheckoutError> {
    let items = cart.items();
    if items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let contact = validate_details(&details)?;
    let total = items.iter().map(LineItem::line_total).sum();

    let order = Order {
        id: OrderId::generate(),
        placed_at: Utc::now(),
        contact,
        details,
        items,
        total,
    };

    cart.clear()?;
    info!(order = %order.id, lines = order.items.len(), "Order placed");
    Ok(order)
}
