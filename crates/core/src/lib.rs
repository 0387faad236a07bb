//! Feira Core - Shared types library.
//!
//! This crate provides common types used across all Feira components:
//! - `storefront` - Cart, catalog, and checkout library
//! - `cli` - Command-line shopper surface
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
