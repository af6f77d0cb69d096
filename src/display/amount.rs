//! Amount formatting
//!
//! Amounts are shown with exactly two decimals and locale digit grouping.
//! A cell the user left empty, or filled with something that is not a
//! number, shows the placeholder dash instead of `0.00`.

use num_format::{Locale, ToFormattedString};

use crate::models::RawAmount;

/// Shown in place of a missing or unreadable amount
pub const PLACEHOLDER: &str = "–";

/// Format a number with two decimals and locale grouping
pub fn format_amount(value: f64, locale: &Locale) -> String {
    let cents = (value * 100.0).round();
    if !cents.is_finite() {
        return PLACEHOLDER.to_string();
    }

    // Float-to-int casts saturate, so huge values stay well-formed
    let cents = cents as i128;
    let abs = cents.unsigned_abs();
    let integer = (abs / 100).to_formatted_string(locale);
    let fraction = abs % 100;
    let sign = if cents < 0 { locale.minus_sign() } else { "" };

    format!("{}{}{}{:02}", sign, integer, locale.decimal(), fraction)
}

/// Format a raw cell: the placeholder unless the text is a valid number
pub fn format_raw(amount: &RawAmount, locale: &Locale) -> String {
    match amount.parse() {
        Ok(value) => format_amount(value, locale),
        Err(_) => PLACEHOLDER.to_string(),
    }
}
