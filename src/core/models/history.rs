use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::formatter::{capitalize, format_month_year};
use crate::core::models::token::TokenAmount;

/// Status of a billing history line. Invoices carry the processor's raw
/// invoice status, so anything unrecognised is kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentsHistoryItemStatus {
    Completed,
    Paid,
    #[default]
    Pending,
    Other(String),
}

impl PaymentsHistoryItemStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Completed => "completed",
            Self::Paid => "paid",
            Self::Pending => "pending",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for PaymentsHistoryItemStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "completed" => Self::Completed,
            "paid" => Self::Paid,
            "pending" => Self::Pending,
            _ => Self::Other(raw),
        }
    }
}

impl From<PaymentsHistoryItemStatus> for String {
    fn from(status: PaymentsHistoryItemStatus) -> Self {
        match status {
            PaymentsHistoryItemStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Kind of billing history line. Sent as an integer by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PaymentsHistoryItemType {
    /// Stripe invoice
    #[default]
    Invoice,
    /// Token deposit transaction
    Transaction,
    /// Credit card charge
    Charge,
    /// Promotional coupon
    Coupon,
    /// Bonus credited for token deposits
    DepositBonus,
}

impl TryFrom<u8> for PaymentsHistoryItemType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Invoice),
            1 => Ok(Self::Transaction),
            2 => Ok(Self::Charge),
            3 => Ok(Self::Coupon),
            4 => Ok(Self::DepositBonus),
            other => Err(format!("unknown payments history item type: {}", other)),
        }
    }
}

impl From<PaymentsHistoryItemType> for u8 {
    fn from(kind: PaymentsHistoryItemType) -> Self {
        match kind {
            PaymentsHistoryItemType::Invoice => 0,
            PaymentsHistoryItemType::Transaction => 1,
            PaymentsHistoryItemType::Charge => 2,
            PaymentsHistoryItemType::Coupon => 3,
            PaymentsHistoryItemType::DepositBonus => 4,
        }
    }
}

/// Display amounts of a history line, in dollars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Amount {
    pub currency: String,
    pub total: f64,
    pub received: f64,
}

/// One invoice, transaction, charge or coupon line of the billing history.
/// Money fields are in cents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentsHistoryItem {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub received: f64,
    pub status: PaymentsHistoryItemStatus,
    pub link: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: PaymentsHistoryItemType,
    pub remaining: f64,
}

impl PaymentsHistoryItem {
    pub fn quantity(&self) -> Amount {
        let received = if self.kind == PaymentsHistoryItemType::Transaction {
            cents_to_dollars(self.received)
        } else {
            0.0
        };
        Amount {
            currency: "USD $".to_string(),
            total: cents_to_dollars(self.amount),
            received,
        }
    }

    pub fn formatted_status(&self) -> String {
        capitalize(self.status.as_str())
    }

    pub fn formatted_start(&self) -> String {
        format_month_year(&self.start)
    }

    /// The backend marks "never expires" with its zero date (year 1), which
    /// lies before the Unix epoch, so only positive timestamps count.
    pub fn has_expiration(&self) -> bool {
        self.end.timestamp_millis() > 0
    }

    /// Remaining amount as a percentage of `amount`, in [0, 100].
    /// Zero when `amount` is zero.
    pub fn remaining_amount_percentage(&self) -> f64 {
        if self.amount == 0.0 {
            return 0.0;
        }
        (self.remaining / self.amount * 100.0).clamp(0.0, 100.0)
    }

    pub fn label(&self) -> &'static str {
        match self.kind {
            PaymentsHistoryItemType::Transaction => "Checkout",
            _ => "Invoice PDF",
        }
    }

    pub fn is_transaction_or_deposit(&self) -> bool {
        matches!(
            self.kind,
            PaymentsHistoryItemType::Transaction | PaymentsHistoryItemType::DepositBonus
        )
    }
}

fn cents_to_dollars(cents: f64) -> f64 {
    cents / 100.0
}

/// One on-chain token payment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NativePaymentHistoryItem {
    pub id: String,
    pub wallet: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: TokenAmount,
    pub received: TokenAmount,
    pub status: String,
    pub link: String,
    pub timestamp: DateTime<Utc>,
}

impl NativePaymentHistoryItem {
    pub fn formatted_status(&self) -> String {
        capitalize(&self.status)
    }

    pub fn formatted_type(&self) -> String {
        capitalize(&self.kind)
    }

    pub fn link_name(&self) -> String {
        if self.kind == "storxscan" {
            return "Etherscan".to_string();
        }
        self.formatted_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(kind: PaymentsHistoryItemType, amount: f64, remaining: f64) -> PaymentsHistoryItem {
        PaymentsHistoryItem {
            id: "i1".to_string(),
            description: "Invoice".to_string(),
            amount,
            received: 500.0,
            status: PaymentsHistoryItemStatus::Paid,
            link: String::new(),
            start: Utc.with_ymd_and_hms(2023, 3, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2023, 4, 1, 0, 0, 0).unwrap(),
            kind,
            remaining,
        }
    }

    #[test]
    fn remaining_percentage_zero_amount_is_zero() {
        let i = item(PaymentsHistoryItemType::Coupon, 0.0, 250.0);
        assert_eq!(i.remaining_amount_percentage(), 0.0);
    }

    #[test]
    fn remaining_percentage_of_amount() {
        let i = item(PaymentsHistoryItemType::Coupon, 1000.0, 250.0);
        assert!((i.remaining_amount_percentage() - 25.0).abs() < 1e-10);
    }

    #[test]
    fn remaining_percentage_stays_in_range() {
        let over = item(PaymentsHistoryItemType::Coupon, 100.0, 300.0);
        assert_eq!(over.remaining_amount_percentage(), 100.0);
        let under = item(PaymentsHistoryItemType::Coupon, 100.0, -5.0);
        assert_eq!(under.remaining_amount_percentage(), 0.0);
    }

    #[test]
    fn zero_date_has_no_expiration() {
        let mut i = item(PaymentsHistoryItemType::Coupon, 100.0, 0.0);
        i.end = "0001-01-01T00:00:00Z".parse().unwrap();
        assert!(!i.has_expiration());

        i.end = Utc.timestamp_opt(0, 0).unwrap();
        assert!(!i.has_expiration());

        i.end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(i.has_expiration());
    }

    #[test]
    fn quantity_only_reports_received_for_transactions() {
        let tx = item(PaymentsHistoryItemType::Transaction, 1250.0, 0.0);
        let q = tx.quantity();
        assert_eq!(q.currency, "USD $");
        assert!((q.total - 12.5).abs() < 1e-10);
        assert!((q.received - 5.0).abs() < 1e-10);

        let invoice = item(PaymentsHistoryItemType::Invoice, 1250.0, 0.0);
        assert_eq!(invoice.quantity().received, 0.0);
    }

    #[test]
    fn labels_and_formatting() {
        let tx = item(PaymentsHistoryItemType::Transaction, 100.0, 0.0);
        assert_eq!(tx.label(), "Checkout");
        assert!(tx.is_transaction_or_deposit());
        assert_eq!(tx.formatted_status(), "Paid");
        assert_eq!(tx.formatted_start(), "Mar 2023");

        let bonus = item(PaymentsHistoryItemType::DepositBonus, 100.0, 0.0);
        assert_eq!(bonus.label(), "Invoice PDF");
        assert!(bonus.is_transaction_or_deposit());

        let charge = item(PaymentsHistoryItemType::Charge, 100.0, 0.0);
        assert!(!charge.is_transaction_or_deposit());
    }

    #[test]
    fn unknown_status_is_kept_and_capitalized() {
        let status: PaymentsHistoryItemStatus = serde_json::from_str(r#""cancelled""#).unwrap();
        assert_eq!(status, PaymentsHistoryItemStatus::Other("cancelled".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""cancelled""#);

        let mut i = item(PaymentsHistoryItemType::Invoice, 100.0, 0.0);
        i.status = status;
        assert_eq!(i.formatted_status(), "Cancelled");

        let paid: PaymentsHistoryItemStatus = serde_json::from_str(r#""paid""#).unwrap();
        assert_eq!(paid, PaymentsHistoryItemStatus::Paid);
    }

    #[test]
    fn history_type_decodes_from_integer() {
        let kind: PaymentsHistoryItemType = serde_json::from_str("4").unwrap();
        assert_eq!(kind, PaymentsHistoryItemType::DepositBonus);
        assert!(serde_json::from_str::<PaymentsHistoryItemType>("9").is_err());
        assert_eq!(serde_json::to_string(&PaymentsHistoryItemType::Charge).unwrap(), "2");
    }

    #[test]
    fn native_item_link_name() {
        let mut native = NativePaymentHistoryItem {
            id: "n1".to_string(),
            wallet: "0xabc".to_string(),
            kind: "storxscan".to_string(),
            amount: TokenAmount::new("1.5", "STORX"),
            received: TokenAmount::new("1.5", "STORX"),
            status: "confirmed".to_string(),
            link: "https://etherscan.io/tx/0x1".to_string(),
            timestamp: Utc::now(),
        };
        assert_eq!(native.link_name(), "Etherscan");
        assert_eq!(native.formatted_status(), "Confirmed");

        native.kind = "coinpayments".to_string();
        assert_eq!(native.link_name(), "Coinpayments");
    }
}
