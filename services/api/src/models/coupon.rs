//! Coupon models for the API service

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Coupon as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub id: String,
    pub store_name: String,
    pub logo_url: Option<String>,
    pub title: String,
    pub code: String,
    pub description: String,
    pub category: String,
    /// Free-form, never parsed as a date
    pub expiry_date: String,
    pub featured: bool,
    pub created_at: DateTime<FixedOffset>,
}

/// Coupon as persisted in the document store
///
/// Identical to [`Coupon`] except that `created_at` is kept as an ISO-8601
/// string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponDocument {
    pub id: String,
    pub store_name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    pub title: String,
    pub code: String,
    pub description: String,
    pub category: String,
    pub expiry_date: String,
    #[serde(default)]
    pub featured: bool,
    pub created_at: String,
}

/// Payload for creating a coupon
#[derive(Debug, Clone, Deserialize)]
pub struct NewCoupon {
    pub store_name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    pub title: String,
    pub code: String,
    pub description: String,
    pub category: String,
    pub expiry_date: String,
    #[serde(default)]
    pub featured: bool,
}

/// Partial coupon update
///
/// `None` means the field was omitted and must be left untouched. Any
/// `Some`, including an empty string or `false`, is applied.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UpdateCoupon {
    pub store_name: Option<String>,
    pub logo_url: Option<String>,
    pub title: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub expiry_date: Option<String>,
    pub featured: Option<bool>,
}

impl UpdateCoupon {
    /// True when no field was provided
    pub fn is_empty(&self) -> bool {
        self.store_name.is_none()
            && self.logo_url.is_none()
            && self.title.is_none()
            && self.code.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.expiry_date.is_none()
            && self.featured.is_none()
    }
}

/// Exact-match filter evaluated by the document store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CouponFilter {
    pub category: Option<String>,
    pub featured: Option<bool>,
}

/// Query parameters for coupon listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CouponQuery {
    /// Exact category match
    pub category: Option<String>,
    /// Case-insensitive substring over store name, title and category
    pub search: Option<String>,
    /// Exact featured flag match
    pub featured: Option<bool>,
}

impl CouponQuery {
    /// Split into the store-level filter and the in-process search term.
    ///
    /// Empty `category` and `search` values are treated as absent.
    pub fn into_parts(self) -> (CouponFilter, Option<String>) {
        let filter = CouponFilter {
            category: self.category.filter(|c| !c.is_empty()),
            featured: self.featured,
        };
        (filter, self.search.filter(|s| !s.is_empty()))
    }
}
