//! Feira Storefront library.
//!
//! This crate provides the storefront functionality as a library: the
//! durable shopping cart with change notification, the product catalog,
//! and the simulated checkout. Views (the CLI, tests, or any future
//! front end) consume it through [`state::AppState`], the once-per-process
//! composition root.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
