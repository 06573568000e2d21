pub mod error;
pub mod http;
pub mod records;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::models::balance::AccountBalance;
use crate::core::models::cards::CreditCard;
use crate::core::models::coupon::Coupon;
use crate::core::models::history::{NativePaymentHistoryItem, PaymentsHistoryItem};
use crate::core::models::usage::{ProjectUsageAndCharges, ProjectUsagePriceModel};
use crate::core::models::wallet::Wallet;

use self::error::PaymentsError;
use self::http::{HttpClient, RawResponse};
use self::records::{
    BalanceRecord, CardRecord, ChargeRecord, CouponRecord, HistoryRecord, NativePaymentsRecord,
    PriceModelRecord, WalletRecord,
};

const ROOT_PATH: &str = "/api/v0/payments";

const COUPON_CONFLICT: &str = "You currently have an active coupon. Please try again when your coupon is no longer active, or contact Support for further help.";
const COUPON_RATE_LIMITED: &str = "You've exceeded limit of attempts, try again in 5 minutes";

/// Client for the satellite payments API.
///
/// Every operation issues one request and maps the response to a domain
/// value. Empty-but-OK responses map to a default or absent value where the
/// endpoint allows it; non-OK statuses map to `PaymentsError`.
pub struct PaymentsHttpApi<C> {
    client: C,
}

impl<C: HttpClient> PaymentsHttpApi<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Account balance. Free credits are in cents.
    pub async fn get_balance(&self) -> Result<AccountBalance, PaymentsError> {
        let path = format!("{}/account/balance", ROOT_PATH);
        let response = self.client.get(&path).await?;

        if !response.is_ok() {
            return Err(PaymentsError::generic("Can not get account balance"));
        }

        match response.json_body("account balance")? {
            Some(body) => Ok(decode::<BalanceRecord>("account balance", body)?.into()),
            None => Ok(AccountBalance::default()),
        }
    }

    /// Sets up a payment account and returns the type of the coupon granted
    /// on signup.
    pub async fn setup_account(&self) -> Result<String, PaymentsError> {
        let path = format!("{}/account", ROOT_PATH);
        let response = self.client.post(&path, None).await?;

        if !response.is_ok() {
            return Err(PaymentsError::generic("can not setup account"));
        }

        response.decode("account setup")
    }

    /// Usage and charges of every project the user owns, for the given period.
    pub async fn projects_usage_and_charges(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ProjectUsageAndCharges>, PaymentsError> {
        let path = format!(
            "{}/account/charges?from={}&to={}",
            ROOT_PATH,
            start.timestamp(),
            end.timestamp()
        );
        let response = self.client.get(&path).await?;

        if !response.is_ok() {
            return Err(PaymentsError::generic("can not get projects charges"));
        }

        decode_list::<ChargeRecord, _>("project charges", &response)
    }

    pub async fn project_usage_price_model(&self) -> Result<ProjectUsagePriceModel, PaymentsError> {
        let path = format!("{}/pricing", ROOT_PATH);
        let response = self.client.get(&path).await?;

        if !response.is_ok() {
            return Err(PaymentsError::generic("cannot get project usage price model"));
        }

        match response.json_body("usage price model")? {
            Some(body) => Ok(decode::<PriceModelRecord>("usage price model", body)?.into()),
            None => Ok(ProjectUsagePriceModel::default()),
        }
    }

    /// Adds a credit card from a payment processor token.
    pub async fn add_credit_card(&self, token: &str) -> Result<(), PaymentsError> {
        let path = format!("{}/cards", ROOT_PATH);
        let response = self.client.post(&path, Some(token.to_string())).await?;
        expect_ok(&response, "can not add credit card")
    }

    /// Detaches a credit card from the payment account.
    pub async fn remove_credit_card(&self, card_id: &str) -> Result<(), PaymentsError> {
        let path = format!("{}/cards/{}", ROOT_PATH, card_id);
        let response = self.client.delete(&path).await?;
        expect_ok(&response, "can not remove credit card")
    }

    pub async fn list_credit_cards(&self) -> Result<Vec<CreditCard>, PaymentsError> {
        let path = format!("{}/cards", ROOT_PATH);
        let response = self.client.get(&path).await?;

        if !response.is_ok() {
            return Err(PaymentsError::generic("can not list credit cards"));
        }

        decode_list::<CardRecord, _>("credit cards", &response)
    }

    pub async fn make_credit_card_default(&self, card_id: &str) -> Result<(), PaymentsError> {
        let path = format!("{}/cards", ROOT_PATH);
        let response = self.client.patch(&path, Some(card_id.to_string())).await?;
        expect_ok(&response, "can not make credit card default")
    }

    /// Invoices, transactions and every other billing history line of the
    /// payment account.
    pub async fn payments_history(&self) -> Result<Vec<PaymentsHistoryItem>, PaymentsError> {
        let path = format!("{}/billing-history", ROOT_PATH);
        let response = self.client.get(&path).await?;

        if !response.is_ok() {
            return Err(PaymentsError::generic("can not list billing history"));
        }

        decode_list::<HistoryRecord, _>("billing history", &response)
    }

    /// Native token payments of the user's wallet.
    pub async fn native_payments_history(
        &self,
    ) -> Result<Vec<NativePaymentHistoryItem>, PaymentsError> {
        let path = format!("{}/wallet/payments", ROOT_PATH);
        let response = self.client.get(&path).await?;

        if !response.is_ok() {
            return Err(PaymentsError::generic("Can not list token payment history"));
        }

        let Some(body) = response.json_body("token payment history")? else {
            return Ok(Vec::new());
        };
        let record: NativePaymentsRecord = decode("token payment history", body)?;

        Ok(record
            .payments
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Applies a coupon code to the account.
    pub async fn apply_coupon_code(&self, coupon_code: &str) -> Result<Coupon, PaymentsError> {
        let path = format!("{}/coupon/apply", ROOT_PATH);
        let response = self
            .client
            .patch(&path, Some(coupon_code.to_string()))
            .await?;
        let err_msg = format!("Could not apply coupon code \"{}\"", coupon_code);

        if !response.is_ok() {
            return Err(match response.status {
                StatusCode::CONFLICT => PaymentsError::Conflict(COUPON_CONFLICT.to_string()),
                StatusCode::TOO_MANY_REQUESTS => {
                    PaymentsError::TooManyRequests(COUPON_RATE_LIMITED.to_string())
                }
                _ => PaymentsError::Generic(err_msg),
            });
        }

        match response.json_body("coupon apply")? {
            Some(body) => Ok(decode::<CouponRecord>("coupon apply", body)?.into()),
            None => {
                log::warn!("coupon apply returned OK without a coupon");
                Err(PaymentsError::Generic(err_msg))
            }
        }
    }

    /// The coupon applied to the user, if any.
    pub async fn get_coupon(&self) -> Result<Option<Coupon>, PaymentsError> {
        let path = format!("{}/coupon", ROOT_PATH);
        let response = self.client.get(&path).await?;

        if !response.is_ok() {
            return Err(PaymentsError::generic("cannot retrieve coupon"));
        }

        match response.json_body("coupon")? {
            Some(body) => Ok(Some(decode::<CouponRecord>("coupon", body)?.into())),
            None => Ok(None),
        }
    }

    /// The user's native token wallet. A user without a wallet gets the
    /// default (unclaimed) wallet.
    pub async fn get_wallet(&self) -> Result<Wallet, PaymentsError> {
        let path = format!("{}/wallet", ROOT_PATH);
        let response = self.client.get(&path).await?;

        if response.status == StatusCode::NOT_FOUND {
            log::debug!("no wallet claimed yet");
            return Ok(Wallet::default());
        }
        if !response.is_ok() {
            return Err(PaymentsError::generic("Can not get wallet"));
        }

        match response.json_body("wallet")? {
            Some(body) => Ok(decode::<WalletRecord>("wallet", body)?.into()),
            None => {
                log::debug!("wallet endpoint returned an empty body");
                Ok(Wallet::default())
            }
        }
    }

    /// Claims a new native token wallet.
    pub async fn claim_wallet(&self) -> Result<Wallet, PaymentsError> {
        let path = format!("{}/wallet", ROOT_PATH);
        let response = self.client.post(&path, None).await?;

        if !response.is_ok() {
            return Err(PaymentsError::generic("Can not claim new wallet"));
        }

        match response.json_body("wallet claim")? {
            Some(body) => Ok(decode::<WalletRecord>("wallet claim", body)?.into()),
            None => Ok(Wallet::default()),
        }
    }

    /// Purchases the pricing package associated with the user's partner.
    pub async fn purchase_pricing_package(&self, token: &str) -> Result<(), PaymentsError> {
        let path = format!("{}/purchase-package", ROOT_PATH);
        let response = self.client.post(&path, Some(token.to_string())).await?;
        expect_ok(&response, "Could not purchase pricing package")
    }

    /// Whether a pricing package is configured for the user's partner.
    pub async fn pricing_package_available(&self) -> Result<bool, PaymentsError> {
        let path = format!("{}/package-available", ROOT_PATH);
        let response = self.client.get(&path).await?;

        if !response.is_ok() {
            return Err(PaymentsError::generic(
                "Could not check pricing package availability",
            ));
        }

        response.decode("package availability")
    }
}

fn expect_ok(response: &RawResponse, message: &str) -> Result<(), PaymentsError> {
    if response.is_ok() {
        return Ok(());
    }
    log::debug!("{}: HTTP {}", message, response.status.as_u16());
    Err(PaymentsError::generic(message))
}

fn decode<T: DeserializeOwned>(endpoint: &'static str, body: Value) -> Result<T, PaymentsError> {
    serde_json::from_value(body).map_err(|source| PaymentsError::Decode { endpoint, source })
}

fn decode_list<R, T>(
    endpoint: &'static str,
    response: &RawResponse,
) -> Result<Vec<T>, PaymentsError>
where
    R: DeserializeOwned + Into<T>,
{
    match response.json_body(endpoint)? {
        Some(body) => {
            let records: Vec<R> = decode(endpoint, body)?;
            Ok(records.into_iter().map(Into::into).collect())
        }
        None => Ok(Vec::new()),
    }
}
