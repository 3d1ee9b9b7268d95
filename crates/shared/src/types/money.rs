//! Amount formatting for financial figures.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every helper here works on `rust_decimal::Decimal`.

use rust_decimal::{Decimal, RoundingStrategy};

const THOUSAND: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);
const MILLION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
const BILLION: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);
const TRILLION: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Magnitude tiers from largest to smallest: unit, suffix, decimals.
const TIERS: [(Decimal, &str, usize); 4] = [
    (TRILLION, "T", 2),
    (BILLION, "B", 2),
    (MILLION, "M", 2),
    (THOUSAND, "K", 1),
];

/// Formats an amount with a magnitude suffix, e.g. `$250.00M` or `$1.5K`.
///
/// Trillions, billions, and millions use two decimals, thousands one.
/// An amount that rounds up to 1000 of its unit moves to the next tier, so
/// `999_999.96` prints as `$1.00M`. Negative amounts carry the sign before
/// the currency symbol.
#[must_use]
pub fn format_compact(amount: Decimal) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let abs = amount.abs();

    let tier = match TIERS.iter().position(|(unit, ..)| abs >= *unit) {
        Some(i) if i > 0 && scaled(abs, TIERS[i].0, TIERS[i].2) >= THOUSAND => Some(i - 1),
        None if abs.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven) >= THOUSAND => {
            Some(TIERS.len() - 1)
        }
        other => other,
    };

    let body = match tier {
        Some(i) => {
            let (unit, suffix, dp) = TIERS[i];
            format!("{:.*}{suffix}", dp, scaled(abs, unit, dp))
        }
        None => format_grouped(abs),
    };

    format!("{sign}${body}")
}

fn scaled(amount: Decimal, unit: Decimal, dp: usize) -> Decimal {
    let dp = u32::try_from(dp).unwrap_or(u32::MAX);
    (amount / unit).round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as a whole number with thousands separators.
#[must_use]
pub fn format_grouped(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Formats a percentage value with one decimal, e.g. `65.0%`.
#[must_use]
pub fn format_percent(value: Decimal) -> String {
    format!(
        "{:.1}%",
        value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    )
}
