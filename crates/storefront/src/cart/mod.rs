//! Shopping cart: durable line items plus change notification.

pub mod line_item;
pub mod store;

pub use line_item::{LineItem, NewLineItem};
pub use store::{CART_KEY, CartError, CartStore, ListenerId};
