//! Coupon repository
//!
//! Sits on top of a [`CouponStore`]. Exact filters (`category`, `featured`)
//! run in the store; the free-text search runs here, after retrieval, because
//! it needs a case-insensitive substring match over three fields. The store
//! keeps `created_at` as ISO-8601 text and this module converts it on every
//! read and write.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    models::coupon::{Coupon, CouponDocument, CouponFilter, NewCoupon, UpdateCoupon},
    store::CouponStore,
};

/// Maximum number of documents fetched by a listing
pub const LIST_LIMIT: usize = 1000;

/// Errors raised by coupon operations
#[derive(Error, Debug)]
pub enum CouponError {
    /// No coupon has the requested id
    #[error("Coupon not found")]
    NotFound,

    /// A stored `created_at` could not be parsed
    #[error("Coupon {id} has an unreadable created_at {value:?}")]
    InvalidTimestamp {
        id: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The store failed or is unreachable
    #[error("Coupon store error: {0:#}")]
    Store(#[from] anyhow::Error),
}

/// Type alias for coupon results
pub type CouponResult<T> = Result<T, CouponError>;

/// Repository for coupon operations
#[derive(Clone)]
pub struct CouponRepository {
    store: Arc<dyn CouponStore>,
}

impl CouponRepository {
    /// Create a new coupon repository
    pub fn new(store: Arc<dyn CouponStore>) -> Self {
        Self { store }
    }

    /// List coupons matching `filter`, then narrow by `search`
    pub async fn list(
        &self,
        filter: &CouponFilter,
        search: Option<&str>,
    ) -> CouponResult<Vec<Coupon>> {
        let documents = self.store.find(filter, LIST_LIMIT).await?;
        let mut coupons = documents
            .into_iter()
            .map(from_document)
            .collect::<CouponResult<Vec<_>>>()?;

        if let Some(search) = search {
            let needle = search.to_lowercase();
            coupons.retain(|coupon| matches_search(coupon, &needle));
        }

        debug!(
            "Listed {} coupons (filter: {:?}, search: {:?})",
            coupons.len(),
            filter,
            search
        );
        Ok(coupons)
    }

    /// Get a coupon by ID
    pub async fn get(&self, id: &str) -> CouponResult<Coupon> {
        let document = self
            .store
            .find_one(id)
            .await?
            .ok_or(CouponError::NotFound)?;
        from_document(document)
    }

    /// Create a new coupon with a fresh id and creation time
    pub async fn create(&self, new_coupon: NewCoupon) -> CouponResult<Coupon> {
        let coupon = Coupon {
            id: Uuid::new_v4().to_string(),
            store_name: new_coupon.store_name,
            logo_url: new_coupon.logo_url,
            title: new_coupon.title,
            code: new_coupon.code,
            description: new_coupon.description,
            category: new_coupon.category,
            expiry_date: new_coupon.expiry_date,
            featured: new_coupon.featured,
            // Stored text keeps microseconds; truncate so the returned value
            // equals what a later read yields.
            created_at: Utc::now().trunc_subsecs(6).fixed_offset(),
        };

        self.store.insert(&to_document(&coupon)).await?;

        info!("Created coupon {} for {}", coupon.id, coupon.store_name);
        Ok(coupon)
    }

    /// Apply the provided fields of `changes` and return the updated coupon
    ///
    /// With no provided fields nothing is written and the current record is
    /// returned.
    pub async fn update(&self, id: &str, changes: &UpdateCoupon) -> CouponResult<Coupon> {
        let existing = self
            .store
            .find_one(id)
            .await?
            .ok_or(CouponError::NotFound)?;

        if changes.is_empty() {
            return from_document(existing);
        }

        if !self.store.update_fields(id, changes).await? {
            return Err(CouponError::NotFound);
        }

        info!("Updated coupon {}", id);
        self.get(id).await
    }

    /// Permanently delete a coupon
    pub async fn delete(&self, id: &str) -> CouponResult<()> {
        if self.store.delete(id).await? {
            info!("Deleted coupon {}", id);
            Ok(())
        } else {
            Err(CouponError::NotFound)
        }
    }

    /// Whether the underlying store is reachable
    pub async fn health_check(&self) -> CouponResult<bool> {
        Ok(self.store.ping().await?)
    }
}

fn matches_search(coupon: &Coupon, needle: &str) -> bool {
    [&coupon.store_name, &coupon.title, &coupon.category]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Render a timestamp the way it is persisted
pub fn format_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Parse a persisted timestamp
///
/// Values written without an offset are read as UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).or_else(|err| {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc().fixed_offset())
            .map_err(|_| err)
    })
}

fn to_document(coupon: &Coupon) -> CouponDocument {
    CouponDocument {
        id: coupon.id.clone(),
        store_name: coupon.store_name.clone(),
        logo_url: coupon.logo_url.clone(),
        title: coupon.title.clone(),
        code: coupon.code.clone(),
        description: coupon.description.clone(),
        category: coupon.category.clone(),
        expiry_date: coupon.expiry_date.clone(),
        featured: coupon.featured,
        created_at: format_timestamp(&coupon.created_at),
    }
}

fn from_document(document: CouponDocument) -> CouponResult<Coupon> {
    let created_at = match parse_timestamp(&document.created_at) {
        Ok(created_at) => created_at,
        Err(source) => {
            return Err(CouponError::InvalidTimestamp {
                id: document.id,
                value: document.created_at,
                source,
            });
        }
    };

    Ok(Coupon {
        id: document.id,
        store_name: document.store_name,
        logo_url: document.logo_url,
        title: document.title,
        code: document.code,
        description: document.description,
        category: document.category,
        expiry_date: document.expiry_date,
        featured: document.featured,
        created_at,
    })
}
