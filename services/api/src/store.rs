//! Document store access for coupons.
//!
//! The [`CouponStore`] trait is the seam between the repository and the
//! persistence engine. It works on [`CouponDocument`]s, the persisted shape
//! with `created_at` as text, and knows nothing about search or timestamps.
//!
//! ## Implementations
//!
//! - **mongo** - MongoDB collection `coupons`, looked up by the `id` field
//! - **memory** - process-local vector, for tests and local runs

mod memory;
mod mongo;

pub use memory::MemoryCouponStore;
pub use mongo::MongoCouponStore;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::coupon::{CouponDocument, CouponFilter, UpdateCoupon};

/// Persistence operations over the coupon collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CouponStore: Send + Sync {
    /// Return up to `limit` documents matching every set field of `filter`,
    /// in store order.
    async fn find(&self, filter: &CouponFilter, limit: usize) -> Result<Vec<CouponDocument>>;

    /// Find the document with the given coupon id.
    async fn find_one(&self, id: &str) -> Result<Option<CouponDocument>>;

    /// Insert a new document.
    async fn insert(&self, document: &CouponDocument) -> Result<()>;

    /// Overwrite the provided fields of `changes` on one document.
    /// Returns false if no document has that id.
    async fn update_fields(&self, id: &str, changes: &UpdateCoupon) -> Result<bool>;

    /// Delete one document. Returns false if no document has that id.
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Whether the backing store is reachable.
    async fn ping(&self) -> Result<bool>;
}
