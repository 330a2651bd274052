//! API models for request and response payloads

use serde::{Deserialize, Serialize};

pub mod coupon;

/// Fixed set of categories offered to the storefront, in display order
pub const CATEGORIES: [&str; 8] = [
    "Fashion",
    "Food",
    "Electronics",
    "Travel",
    "Beauty",
    "Health",
    "Home",
    "Education",
];

/// Request for admin login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response for a successful admin login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub message: String,
}

/// Response for the category listing
#[derive(Serialize)]
pub struct CategoriesResponse {
    pub categories: &'static [&'static str],
}

/// Response for a logo upload
#[derive(Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Generic acknowledgement body
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
