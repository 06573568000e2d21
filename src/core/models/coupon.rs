use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How many billing periods a coupon applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponDuration {
    /// Applied a single time
    #[default]
    Once,
    /// Applied every billing period for a definite amount of time
    Repeating,
    /// Applied every billing period forever
    Forever,
}

impl std::fmt::Display for CouponDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Once => write!(f, "once"),
            Self::Repeating => write!(f, "repeating"),
            Self::Forever => write!(f, "forever"),
        }
    }
}

/// A discount applied to the payment account of a user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: String,
    pub promo_code: String,
    pub name: String,
    /// Fixed discount in cents
    pub amount_off: i64,
    pub percent_off: f64,
    pub added_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub duration: CouponDuration,
    pub partnered: bool,
}

impl Coupon {
    /// Human readable discount, e.g. "$10.00 off" or "25% off".
    pub fn discount_label(&self) -> String {
        if self.amount_off > 0 {
            format!("${:.2} off", self.amount_off as f64 / 100.0)
        } else {
            format!("{}% off", self.percent_off)
        }
    }
}
