//! Repositories for coupon operations

pub mod coupon;

pub use coupon::{CouponError, CouponRepository};
