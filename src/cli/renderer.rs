use colored::{control, ColoredString, Colorize};

use crate::core::formatter::{format_cents, format_date};
use crate::core::models::balance::AccountBalance;
use crate::core::models::cards::CreditCard;
use crate::core::models::coupon::Coupon;
use crate::core::models::history::{
    NativePaymentHistoryItem, PaymentsHistoryItem, PaymentsHistoryItemStatus,
    PaymentsHistoryItemType,
};
use crate::core::models::usage::{ProjectUsageAndCharges, ProjectUsagePriceModel};
use crate::core::models::wallet::Wallet;

/// Render the account balance block.
///
/// ```text
///  Balance
///   Free credits  $5.00
///   Tokens        12.5
///   Credits       $12.34
///   Total         512.5
/// ```
pub fn render_balance(balance: &AccountBalance, use_color: bool) -> String {
    control::set_override(use_color);

    let mut lines = vec![" Balance".bold().to_string()];
    lines.push(row("Free credits", format_cents(balance.free_credits as f64)));
    lines.push(row("Tokens", balance.coins().to_string()));
    if balance.has_credits() {
        lines.push(row("Credits", balance.formatted_credits()));
    }
    lines.push(row("Total", balance.sum().to_string()));
    lines.join("\n")
}

pub fn render_charges(charges: &Vec<ProjectUsageAndCharges>, use_color: bool) -> String {
    control::set_override(use_color);

    if charges.is_empty() {
        return " No project charges for this period".dimmed().to_string();
    }

    let mut lines = vec![" Project charges".bold().to_string()];
    let mut total = 0.0;
    for charge in charges {
        total += charge.summary();
        lines.push(format!(
            "  {}  {} .. {}",
            charge.project_id.cyan(),
            format_date(&charge.since),
            format_date(&charge.before)
        ));
        lines.push(format!(
            "    storage {:.2} GB*h  egress {} B  segments {:.2}",
            charge.storage, charge.egress, charge.segment_count
        ));
        lines.push(format!(
            "    {} storage + {} egress + {} segments = {}",
            format_cents(charge.storage_price),
            format_cents(charge.egress_price),
            format_cents(charge.segment_price),
            format_cents(charge.summary()).bold()
        ));
    }
    lines.push(row("Total", format_cents(total)));
    lines.join("\n")
}

pub fn render_price_model(model: &ProjectUsagePriceModel, use_color: bool) -> String {
    control::set_override(use_color);

    let or_unset = |v: &str| {
        if v.is_empty() {
            "-".to_string()
        } else {
            format!("{}¢", v)
        }
    };
    [
        " Usage prices".bold().to_string(),
        row("Storage", format!("{} per MB-month", or_unset(&model.storage_mb_month_cents))),
        row("Egress", format!("{} per MB", or_unset(&model.egress_mb_cents))),
        row("Segments", format!("{} per segment-month", or_unset(&model.segment_month_cents))),
    ]
    .join("\n")
}

pub fn render_cards(cards: &Vec<CreditCard>, use_color: bool) -> String {
    control::set_override(use_color);

    if cards.is_empty() {
        return " No credit cards".dimmed().to_string();
    }

    let mut lines = vec![" Credit cards".bold().to_string()];
    for card in cards {
        let marker = if card.is_default {
            " default".green().to_string()
        } else {
            String::new()
        };
        lines.push(format!(
            "  {:<10} **** {}  {}  {}{}",
            card.brand,
            card.last4,
            card.expiry().dimmed(),
            card.id.dimmed(),
            marker
        ));
    }
    lines.join("\n")
}

pub fn render_history(items: &Vec<PaymentsHistoryItem>, use_color: bool) -> String {
    control::set_override(use_color);

    if items.is_empty() {
        return " No billing history".dimmed().to_string();
    }

    let mut lines = vec![" Billing history".bold().to_string()];
    for item in items {
        let quantity = item.quantity();
        // Token deposits and their bonuses add to the balance.
        let sign = if item.is_transaction_or_deposit() { "+" } else { "" };
        let mut line = format!(
            "  {:<9} {:<32} {}{}{:.2}  {}",
            item.formatted_start(),
            item.description,
            sign,
            quantity.currency,
            quantity.total,
            color_status(&item.status, &item.formatted_status())
        );
        if item.kind == PaymentsHistoryItemType::Transaction {
            line.push_str(&format!("  received {}{:.2}", quantity.currency, quantity.received));
        }
        if item.kind == PaymentsHistoryItemType::Coupon {
            line.push_str(&format!(
                "  {:.0}% remaining",
                item.remaining_amount_percentage()
            ));
            if item.has_expiration() {
                line.push_str(&format!("  expires {}", format_date(&item.end)));
            }
        }
        lines.push(line);
        if !item.link.is_empty() {
            lines.push(format!("    {} {}", item.label().dimmed(), item.link.dimmed()));
        }
    }
    lines.join("\n")
}

pub fn render_native_history(items: &Vec<NativePaymentHistoryItem>, use_color: bool) -> String {
    control::set_override(use_color);

    if items.is_empty() {
        return " No token payments".dimmed().to_string();
    }

    let mut lines = vec![" Token payments".bold().to_string()];
    for item in items {
        lines.push(format!(
            "  {}  {} {}  received {} {}  {}",
            format_date(&item.timestamp),
            item.amount.raw_value(),
            item.amount.currency,
            item.received.raw_value(),
            item.received.currency,
            item.formatted_status()
        ));
        if !item.link.is_empty() {
            lines.push(format!("    {} {}", item.link_name().dimmed(), item.link.dimmed()));
        }
    }
    lines.join("\n")
}

pub fn render_coupon(coupon: &Option<Coupon>, use_color: bool) -> String {
    control::set_override(use_color);

    let Some(coupon) = coupon else {
        return " No active coupon".dimmed().to_string();
    };

    let mut lines = vec![format!(" {}", coupon.name).bold().to_string()];
    lines.push(row("Code", coupon.promo_code.clone()));
    lines.push(row("Discount", coupon.discount_label()));
    lines.push(row("Duration", coupon.duration.to_string()));
    lines.push(row("Added", format_date(&coupon.added_at)));
    if let Some(expires_at) = &coupon.expires_at {
        lines.push(row("Expires", format_date(expires_at)));
    }
    if coupon.partnered {
        lines.push(row("Partner", "yes".to_string()));
    }
    lines.join("\n")
}

pub fn render_wallet(wallet: &Wallet, use_color: bool) -> String {
    control::set_override(use_color);

    if !wallet.is_claimed() {
        return " No wallet claimed yet. Run `sxb wallet claim` to create one."
            .dimmed()
            .to_string();
    }

    [
        " Wallet".bold().to_string(),
        row("Address", wallet.address.clone()),
        row(
            "Balance",
            format!("{} {}", wallet.balance.raw_value(), wallet.balance.currency),
        ),
    ]
    .join("\n")
}

fn row(label: &str, value: String) -> String {
    format!("  {}  {}", format!("{:<12}", label).cyan(), value)
}

fn color_status(status: &PaymentsHistoryItemStatus, text: &str) -> ColoredString {
    match status {
        PaymentsHistoryItemStatus::Completed | PaymentsHistoryItemStatus::Paid => text.green(),
        PaymentsHistoryItemStatus::Pending => text.yellow(),
        PaymentsHistoryItemStatus::Other(_) => text.normal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::coupon::CouponDuration;
    use crate::core::models::token::TokenAmount;
    use chrono::{TimeZone, Utc};

    fn make_item(kind: PaymentsHistoryItemType) -> PaymentsHistoryItem {
        PaymentsHistoryItem {
            id: "in_1".to_string(),
            description: "Monthly invoice".to_string(),
            amount: 1250.0,
            received: 1250.0,
            status: PaymentsHistoryItemStatus::Paid,
            link: "https://invoice".to_string(),
            start: Utc.with_ymd_and_hms(2023, 3, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2023, 4, 1, 0, 0, 0).unwrap(),
            kind,
            remaining: 500.0,
        }
    }

    #[test]
    fn render_balance_contains_totals() {
        let output = render_balance(&AccountBalance::new(500, "12.5", "1234"), false);
        assert!(output.contains("$5.00"));
        assert!(output.contains("$12.34"));
        assert!(output.contains("512.5"));
    }

    #[test]
    fn render_balance_hides_zero_credits() {
        let output = render_balance(&AccountBalance::default(), false);
        assert!(!output.contains("Credits "));
    }

    #[test]
    fn render_history_invoice() {
        let output = render_history(&vec![make_item(PaymentsHistoryItemType::Invoice)], false);
        assert!(output.contains("Mar 2023"));
        assert!(output.contains("USD $12.50"));
        assert!(output.contains("Paid"));
        assert!(output.contains("Invoice PDF"));
    }

    #[test]
    fn render_history_coupon_shows_remaining() {
        let output = render_history(&vec![make_item(PaymentsHistoryItemType::Coupon)], false);
        assert!(output.contains("40% remaining"));
        assert!(output.contains("expires 2023-04-01"));
    }

    #[test]
    fn render_history_transaction_shows_checkout() {
        let output = render_history(&vec![make_item(PaymentsHistoryItemType::Transaction)], false);
        assert!(output.contains("+USD $12.50"));
        assert!(output.contains("received USD $12.50"));
        assert!(output.contains("Checkout"));
    }

    #[test]
    fn render_history_marks_deposit_bonus_as_credit() {
        let output = render_history(&vec![make_item(PaymentsHistoryItemType::DepositBonus)], false);
        assert!(output.contains("+USD $12.50"));
        let output = render_history(&vec![make_item(PaymentsHistoryItemType::Charge)], false);
        assert!(!output.contains("+USD"));
    }

    #[test]
    fn render_history_unknown_status_is_capitalized() {
        let mut item = make_item(PaymentsHistoryItemType::Invoice);
        item.status = PaymentsHistoryItemStatus::Other("uncollectible".to_string());
        let output = render_history(&vec![item], false);
        assert!(output.contains("Uncollectible"));
    }

    #[test]
    fn render_empty_lists() {
        assert!(render_cards(&vec![], false).contains("No credit cards"));
        assert!(render_history(&vec![], false).contains("No billing history"));
        assert!(render_native_history(&vec![], false).contains("No token payments"));
        assert!(render_charges(&vec![], false).contains("No project charges"));
    }

    #[test]
    fn render_cards_marks_default() {
        let card = CreditCard {
            id: "card_1".to_string(),
            exp_month: 4,
            exp_year: 2028,
            brand: "visa".to_string(),
            last4: "4242".to_string(),
            is_default: true,
            is_selected: false,
        };
        let output = render_cards(&vec![card], false);
        assert!(output.contains("**** 4242"));
        assert!(output.contains("04/2028"));
        assert!(output.contains("default"));
    }

    #[test]
    fn render_coupon_absent_and_present() {
        assert!(render_coupon(&None, false).contains("No active coupon"));

        let coupon = Coupon {
            id: "c1".to_string(),
            promo_code: "WELCOME".to_string(),
            name: "Welcome".to_string(),
            amount_off: 0,
            percent_off: 25.0,
            added_at: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
            expires_at: None,
            duration: CouponDuration::Forever,
            partnered: false,
        };
        let output = render_coupon(&Some(coupon), false);
        assert!(output.contains("WELCOME"));
        assert!(output.contains("25% off"));
        assert!(output.contains("forever"));
        assert!(!output.contains("Expires"));
    }

    #[test]
    fn render_wallet_unclaimed_hint() {
        assert!(render_wallet(&Wallet::default(), false).contains("wallet claim"));

        let wallet = Wallet {
            address: "0xabc".to_string(),
            balance: TokenAmount::new("7.5", "STORX"),
        };
        let output = render_wallet(&wallet, false);
        assert!(output.contains("0xabc"));
        assert!(output.contains("7.5 STORX"));
    }

    #[test]
    fn render_no_ansi_when_color_false() {
        let output = render_balance(&AccountBalance::new(500, "1", "100"), false);
        // ANSI escape sequences start with ESC (0x1b)
        assert!(!output.contains('\x1b'), "output should not contain ANSI codes");
    }
}
