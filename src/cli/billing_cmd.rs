use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde_json::json;

use crate::cli::output::{OutputFormat, OutputOptions};
use crate::cli::renderer;
use crate::core::config::{validate_satellite_url, AppConfig};
use crate::core::models::usage::DateRange;
use crate::core::payments::http::ReqwestHttpClient;
use crate::core::payments::PaymentsHttpApi;

type Api = PaymentsHttpApi<ReqwestHttpClient>;

fn connect(config: &AppConfig) -> Result<Api> {
    let satellite = &config.satellite;
    validate_satellite_url(&satellite.url).map_err(anyhow::Error::msg)?;
    if satellite.token.is_none() {
        log::warn!("no session token configured; requests will be unauthenticated");
    }
    let client =
        ReqwestHttpClient::new(&satellite.url, satellite.token.clone(), satellite.timeout())
            .context("Failed to build HTTP client")?;
    log::debug!("using satellite {}", satellite.url);
    Ok(PaymentsHttpApi::new(client))
}

/// Reports a completed action that has no payload.
fn done(opts: &OutputOptions, message: &str) -> Result<()> {
    match opts.format {
        OutputFormat::Json => println!("{}", json!({ "ok": true, "message": message })),
        OutputFormat::Text => println!("{}", message),
    }
    Ok(())
}

pub async fn balance(config: &AppConfig, opts: &OutputOptions) -> Result<()> {
    let balance = connect(config)?.get_balance().await?;
    opts.emit(&balance, renderer::render_balance)
}

pub async fn setup(config: &AppConfig, opts: &OutputOptions) -> Result<()> {
    let coupon_type = connect(config)?.setup_account().await?;
    match opts.format {
        OutputFormat::Json => println!("{}", json!({ "couponType": coupon_type })),
        OutputFormat::Text => {
            println!("Payment account set up.");
            if !coupon_type.is_empty() {
                println!("  Signup coupon: {}", coupon_type);
            }
        }
    }
    Ok(())
}

pub async fn charges(
    config: &AppConfig,
    since: Option<NaiveDate>,
    before: Option<NaiveDate>,
    opts: &OutputOptions,
) -> Result<()> {
    let range = charges_range(since, before, Utc::now())?;
    let charges = connect(config)?
        .projects_usage_and_charges(range.start, range.end)
        .await?;
    opts.emit(&charges, renderer::render_charges)
}

/// Period for a charges query. Defaults to the start of the current month
/// until `now`.
pub fn charges_range(
    since: Option<NaiveDate>,
    before: Option<NaiveDate>,
    now: DateTime<Utc>,
) -> Result<DateRange> {
    let start = match since {
        Some(date) => start_of_day(date),
        None => Utc
            .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
            .single()
            .context("Failed to compute start of month")?,
    };
    let end = before.map(start_of_day).unwrap_or(now);

    if start >= end {
        anyhow::bail!(
            "--since ({}) must be before --before ({})",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );
    }
    Ok(DateRange::new(start, end))
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

pub async fn pricing(config: &AppConfig, opts: &OutputOptions) -> Result<()> {
    let model = connect(config)?.project_usage_price_model().await?;
    opts.emit(&model, renderer::render_price_model)
}

pub async fn cards_list(config: &AppConfig, opts: &OutputOptions) -> Result<()> {
    let cards = connect(config)?.list_credit_cards().await?;
    opts.emit(&cards, renderer::render_cards)
}

pub async fn cards_add(config: &AppConfig, token: &str, opts: &OutputOptions) -> Result<()> {
    connect(config)?.add_credit_card(token).await?;
    done(opts, "Credit card added.")
}

pub async fn cards_remove(config: &AppConfig, card_id: &str, opts: &OutputOptions) -> Result<()> {
    connect(config)?.remove_credit_card(card_id).await?;
    done(opts, "Credit card removed.")
}

pub async fn cards_default(config: &AppConfig, card_id: &str, opts: &OutputOptions) -> Result<()> {
    connect(config)?.make_credit_card_default(card_id).await?;
    done(opts, "Default credit card updated.")
}

pub async fn history(config: &AppConfig, opts: &OutputOptions) -> Result<()> {
    let items = connect(config)?.payments_history().await?;
    opts.emit(&items, renderer::render_history)
}

pub async fn token_history(config: &AppConfig, opts: &OutputOptions) -> Result<()> {
    let items = connect(config)?.native_payments_history().await?;
    opts.emit(&items, renderer::render_native_history)
}

pub async fn coupon_show(config: &AppConfig, opts: &OutputOptions) -> Result<()> {
    let coupon = connect(config)?.get_coupon().await?;
    opts.emit(&coupon, renderer::render_coupon)
}

pub async fn coupon_apply(config: &AppConfig, code: &str, opts: &OutputOptions) -> Result<()> {
    let coupon = connect(config)?.apply_coupon_code(code).await?;
    opts.emit(&Some(coupon), renderer::render_coupon)
}

pub async fn wallet_show(config: &AppConfig, opts: &OutputOptions) -> Result<()> {
    let wallet = connect(config)?.get_wallet().await?;
    opts.emit(&wallet, renderer::render_wallet)
}

pub async fn wallet_claim(config: &AppConfig, opts: &OutputOptions) -> Result<()> {
    let wallet = connect(config)?.claim_wallet().await?;
    opts.emit(&wallet, renderer::render_wallet)
}

pub async fn package_available(config: &AppConfig, opts: &OutputOptions) -> Result<()> {
    let available = connect(config)?.pricing_package_available().await?;
    match opts.format {
        OutputFormat::Json => println!("{}", json!({ "available": available })),
        OutputFormat::Text if available => println!("A pricing package is available."),
        OutputFormat::Text => println!("No pricing package is available."),
    }
    Ok(())
}

pub async fn package_purchase(config: &AppConfig, token: &str, opts: &OutputOptions) -> Result<()> {
    connect(config)?.purchase_pricing_package(token).await?;
    done(opts, "Pricing package purchased.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn charges_range_defaults_to_month_to_date() {
        let now = Utc.with_ymd_and_hms(2023, 5, 17, 13, 30, 0).unwrap();
        let range = charges_range(None, None, now).unwrap();
        assert_eq!(range.start, Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap());
        assert_eq!(range.end, now);
    }

    #[test]
    fn charges_range_uses_given_dates() {
        let now = Utc::now();
        let range = charges_range(Some(date(2023, 1, 1)), Some(date(2023, 2, 1)), now).unwrap();
        assert_eq!(range.start.timestamp(), 1672531200);
        assert_eq!(range.end.timestamp(), 1675209600);
    }

    #[test]
    fn charges_range_rejects_inverted_dates() {
        let err = charges_range(Some(date(2023, 2, 1)), Some(date(2023, 1, 1)), Utc::now())
            .unwrap_err();
        assert!(err.to_string().contains("must be before"));
    }

    #[test]
    fn connect_rejects_plain_http() {
        let mut config = AppConfig::default();
        config.satellite.url = "http://evil.com".to_string();
        let err = connect(&config).err().unwrap();
        assert!(err.to_string().contains("must use HTTPS"));
    }
}
