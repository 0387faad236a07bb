//! Unified error handling for the storefront library.
//!
//! Provides a unified `StorefrontError` that views can hold instead of the
//! per-module enums. The library never presents UI; callers translate with
//! [`StorefrontError::user_message`] and keep the full error for logs.

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Catalog snapshot failed to load.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Checkout failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl StorefrontError {
    /// Message suitable for showing a shopper.
    ///
    /// Internal failure details stay in the error for logging; the shopper
    /// sees what they can act on.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Storage(_)
            | Self::Cart(CartError::Storage(_) | CartError::Serialize(_)) => {
                "Could not update your cart. Please try again.".to_owned()
            }
            Self::Cart(CartError::InvalidItem(_)) => {
                "This product cannot be added to the cart.".to_owned()
            }
            Self::Catalog(_) => "The catalog is currently unavailable.".to_owned(),
            Self::Checkout(CheckoutError::EmptyCart) => "Your cart is empty.".to_owned(),
            Self::Checkout(CheckoutError::InvalidDetails(msg)) => msg.clone(),
            Self::Checkout(CheckoutError::Cart(_)) => {
                "Could not complete your order. Please try again.".to_owned()
            }
            Self::Config(_) => "The storefront is misconfigured.".to_owned(),
            Self::NotFound(what) => format!("Not found: {what}"),
        }
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
