//! Integration tests for Feira.
//!
//! Each test builds a [`TestContext`]: a temporary data directory seeded
//! with a catalog snapshot, and an `AppState` over it, the same
//! composition a real process performs at startup. Re-opening a second
//! `AppState` over the same directory simulates a process restart (or a
//! second uncoordinated process, for the race tests).
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p feira-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use tempfile::TempDir;

use feira_storefront::config::StorefrontConfig;
use feira_storefront::state::AppState;

/// Catalog snapshot used by the integration tests.
pub const CATALOG_FIXTURE: &str = r#"{
    "products": [
        {"id": "basket", "name": "Woven Basket", "price": 29.9,
         "category": "home", "featured": true, "stock": 12,
         "imageUrl": "https://cdn.example/basket.jpg",
         "createdAt": "2026-01-10T12:00:00Z"},
        {"id": "mug", "name": "Clay Mug", "price": 15.0,
         "category": "kitchen", "stock": 40,
         "createdAt": "2026-02-01T12:00:00Z"},
        {"id": "candle", "name": "Amber Candle", "price": 22.5,
         "category": "home", "stock": 0,
         "createdAt": "2026-03-05T12:00:00Z"},
        {"id": "retired", "name": "Retired Item", "price": 1.0,
         "visible": false}
    ],
    "categories": [
        {"id": "c-kitchen", "name": "Kitchen", "slug": "kitchen"},
        {"id": "c-home", "name": "Home", "slug": "home"}
    ]
}"#;

/// A storefront process rooted in a temporary data directory.
pub struct TestContext {
    /// Keeps the temp directory alive for the test's duration.
    dir: TempDir,
    pub state: AppState,
}

impl TestContext {
    /// Create a fresh data directory with the standard catalog fixture.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp data dir");
        std::fs::write(dir.path().join("catalog.json"), CATALOG_FIXTURE)
            .expect("write catalog fixture");
        let state = open_state(dir.path());
        Self { dir, state }
    }

    /// Path of the data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Open a second, independent `AppState` over the same data directory,
    /// as a process restart or a concurrent uncoordinated process would.
    #[must_use]
    pub fn reopen(&self) -> AppState {
        open_state(self.dir.path())
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn open_state(data_dir: &Path) -> AppState {
    let config = StorefrontConfig {
        data_dir: data_dir.to_path_buf(),
        catalog_file: data_dir.join("catalog.json"),
        currency: feira_core::CurrencyCode::BRL,
    };
    AppState::new(config).expect("build app state")
}
