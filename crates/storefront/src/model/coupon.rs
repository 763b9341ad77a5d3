use super::CouponId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    pub id: CouponId,
    /// The code shoppers type. Matched exactly, case included.
    pub name: String,
    pub percent: u8,
}

#[derive(Debug, Clone)]
pub struct CouponCreate {
    pub name: String,
    pub percent: u8,
}

#[derive(Debug, Clone, Default)]
pub struct CouponFilter {
    pub name: Option<String>,
}
