//! Wire shapes of the payments endpoints and their conversion into domain
//! types. Missing or mistyped fields fail decoding instead of producing
//! half-filled entities.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::core::models::balance::AccountBalance;
use crate::core::models::cards::CreditCard;
use crate::core::models::coupon::{Coupon, CouponDuration};
use crate::core::models::history::{
    NativePaymentHistoryItem, PaymentsHistoryItem, PaymentsHistoryItemStatus,
    PaymentsHistoryItemType,
};
use crate::core::models::token::TokenAmount;
use crate::core::models::usage::{ProjectUsageAndCharges, ProjectUsagePriceModel};
use crate::core::models::wallet::Wallet;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRecord {
    pub free_credits: i64,
    pub coins: String,
    pub credits: String,
}

impl From<BalanceRecord> for AccountBalance {
    fn from(r: BalanceRecord) -> Self {
        AccountBalance::new(r.free_credits, r.coins, r.credits)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRecord {
    pub since: DateTime<Utc>,
    pub before: DateTime<Utc>,
    pub egress: f64,
    pub storage: f64,
    pub segment_count: f64,
    pub project_id: String,
    pub storage_price: f64,
    pub egress_price: f64,
    pub segment_price: f64,
}

impl From<ChargeRecord> for ProjectUsageAndCharges {
    fn from(r: ChargeRecord) -> Self {
        ProjectUsageAndCharges {
            since: r.since,
            before: r.before,
            egress: r.egress,
            storage: r.storage,
            segment_count: r.segment_count,
            project_id: r.project_id,
            storage_price: r.storage_price,
            egress_price: r.egress_price,
            segment_price: r.segment_price,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceModelRecord {
    #[serde(rename = "storageMBMonthCents")]
    pub storage_mb_month_cents: String,
    #[serde(rename = "egressMBCents")]
    pub egress_mb_cents: String,
    pub segment_month_cents: String,
}

impl From<PriceModelRecord> for ProjectUsagePriceModel {
    fn from(r: PriceModelRecord) -> Self {
        ProjectUsagePriceModel {
            storage_mb_month_cents: r.storage_mb_month_cents,
            egress_mb_cents: r.egress_mb_cents,
            segment_month_cents: r.segment_month_cents,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: String,
    pub exp_month: u32,
    pub exp_year: u32,
    pub brand: String,
    pub last4: String,
    #[serde(default)]
    pub is_default: bool,
}

impl From<CardRecord> for CreditCard {
    fn from(r: CardRecord) -> Self {
        CreditCard {
            id: r.id,
            exp_month: r.exp_month,
            exp_year: r.exp_year,
            brand: r.brand,
            last4: r.last4,
            is_default: r.is_default,
            is_selected: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryRecord {
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

impl From<HistoryRecord> for PaymentsHistoryItem {
    fn from(r: HistoryRecord) -> Self {
        PaymentsHistoryItem {
            id: r.id,
            description: r.description,
            amount: r.amount,
            received: r.received,
            status: r.status,
            link: r.link,
            start: r.start,
            end: r.end,
            kind: r.kind,
            remaining: r.remaining,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenAmountRecord {
    pub value: String,
    pub currency: String,
}

impl From<TokenAmountRecord> for TokenAmount {
    fn from(r: TokenAmountRecord) -> Self {
        TokenAmount::new(r.value, r.currency)
    }
}

/// Envelope of the token payments listing. The backend encodes the items
/// with Go field names.
#[derive(Debug, Deserialize)]
pub struct NativePaymentsRecord {
    #[serde(default)]
    pub payments: Option<Vec<NativePaymentRecord>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NativePaymentRecord {
    #[serde(rename = "ID")]
    pub id: String,
    pub wallet: String,
    #[serde(rename = "Type")]
    pub kind: String,
    pub amount: TokenAmountRecord,
    pub received: TokenAmountRecord,
    pub status: String,
    pub link: String,
    pub timestamp: DateTime<Utc>,
}

impl From<NativePaymentRecord> for NativePaymentHistoryItem {
    fn from(r: NativePaymentRecord) -> Self {
        NativePaymentHistoryItem {
            id: r.id,
            wallet: r.wallet,
            kind: r.kind,
            amount: r.amount.into(),
            received: r.received.into(),
            status: r.status,
            link: r.link,
            timestamp: r.timestamp,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponRecord {
    pub id: String,
    pub promo_code: String,
    pub name: String,
    pub amount_off: i64,
    pub percent_off: f64,
    pub added_at: DateTime<Utc>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    pub duration: CouponDuration,
    #[serde(default)]
    pub partnered: bool,
}

impl From<CouponRecord> for Coupon {
    fn from(r: CouponRecord) -> Self {
        Coupon {
            id: r.id,
            promo_code: r.promo_code,
            name: r.name,
            amount_off: r.amount_off,
            percent_off: r.percent_off,
            added_at: r.added_at,
            expires_at: r.expires_at,
            duration: r.duration,
            partnered: r.partnered,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WalletRecord {
    pub address: String,
    pub balance: TokenAmountRecord,
}

impl From<WalletRecord> for Wallet {
    fn from(r: WalletRecord) -> Self {
        Wallet {
            address: r.address,
            balance: r.balance.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_payment_record_uses_go_field_names() {
        let json = r#"{
            "ID": "tx1",
            "Wallet": "0xabc",
            "Type": "storxscan",
            "Amount": { "value": "10.5", "currency": "STORX" },
            "Received": { "value": "10.5", "currency": "USD" },
            "Status": "confirmed",
            "Link": "https://etherscan.io/tx/1",
            "Timestamp": "2023-02-01T10:00:00Z"
        }"#;
        let record: NativePaymentRecord = serde_json::from_str(json).unwrap();
        let item = NativePaymentHistoryItem::from(record);
        assert_eq!(item.id, "tx1");
        assert_eq!(item.kind, "storxscan");
        assert!((item.amount.value() - 10.5).abs() < 1e-10);
        assert_eq!(item.received.currency, "USD");
    }

    #[test]
    fn coupon_record_without_expiry() {
        let json = r#"{
            "id": "c1",
            "promoCode": "PROMO",
            "name": "Promo",
            "amountOff": 0,
            "percentOff": 50,
            "addedAt": "2023-01-01T00:00:00Z",
            "expiresAt": null,
            "duration": "forever"
        }"#;
        let coupon = Coupon::from(serde_json::from_str::<CouponRecord>(json).unwrap());
        assert!(coupon.expires_at.is_none());
        assert!(!coupon.partnered);
        assert_eq!(coupon.duration, CouponDuration::Forever);
    }

    #[test]
    fn card_record_missing_field_fails() {
        let json = r#"{ "id": "card_1", "expMonth": 1, "brand": "visa", "last4": "4242" }"#;
        assert!(serde_json::from_str::<CardRecord>(json).is_err());
    }

    #[test]
    fn history_record_rejects_unknown_status() {
        let json = r#"{
            "id": "i1", "description": "", "amount": 1, "received": 0,
            "status": "refunded", "link": "", "start": "2023-01-01T00:00:00Z",
            "end": "2023-02-01T00:00:00Z", "type": 0, "remaining": 0
        }"#;
        assert!(serde_json::from_str::<HistoryRecord>(json).is_err());
    }
}
