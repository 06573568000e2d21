use chrono::{DateTime, Utc};
use serde::Serialize;

/// Usage of a single project over a period and what it will be charged at
/// the end of the month. Prices are in cents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUsageAndCharges {
    pub since: DateTime<Utc>,
    pub before: DateTime<Utc>,
    pub egress: f64,
    pub storage: f64,
    pub segment_count: f64,
    pub project_id: String,
    /// Cents for storing GB*Hrs
    pub storage_price: f64,
    /// Cents for egress
    pub egress_price: f64,
    /// Cents for segment count
    pub segment_price: f64,
}

impl ProjectUsageAndCharges {
    /// Total price for the project in cents.
    pub fn summary(&self) -> f64 {
        self.storage_price + self.egress_price + self.segment_price
    }
}

/// Unit prices for project usage. Kept as strings so display formatting
/// never sees a rounded float.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUsagePriceModel {
    #[serde(rename = "storageMBMonthCents")]
    pub storage_mb_month_cents: String,
    #[serde(rename = "egressMBCents")]
    pub egress_mb_cents: String,
    pub segment_month_cents: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
}
