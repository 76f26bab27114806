//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with automatic cleanup (feature: "postgres")
//! - `TestDataBuilder`: Deterministic test data generation (always available)
//! - `assertions`: Custom assertion helpers (always available)
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     db.run_sql("CREATE TABLE t (id BIGSERIAL PRIMARY KEY)").await;
//!
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!     let name = builder.name("item", "main");
//! }
//! ```
//!
//! Container-backed tests need a running Docker daemon; mark them `#[ignore]`
//! and run them with `cargo test -- --ignored`.

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// The same seed always yields the same names and prices, so failures reproduce.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of the test name.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_item");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Unique name for a resource within this test.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(12345);
    /// assert_eq!(builder.name("item", "main"), "test-item-12345-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// A price in `[0.00, 99.99]` with two decimals, derived from the seed and `index`.
    pub fn price(&self, index: u64) -> f64 {
        let cents = self.seed.wrapping_add(index.wrapping_mul(7919)) % 10_000;
        cents as f64 / 100.0
    }

    /// A quantity in `[0, 999]`, derived from the seed and `index`.
    pub fn quantity(&self, index: u64) -> i32 {
        (self.seed.wrapping_add(index.wrapping_mul(104_729)) % 1_000) as i32
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that ids are strictly ascending
    pub fn assert_ascending(ids: &[i64], context: &str) {
        assert!(
            ids.windows(2).all(|w| w[0] < w[1]),
            "{}: expected ascending ids, got {:?}",
            context,
            ids
        );
    }
}
