//! Utility functions for the Poise project tracker

use crate::constants::{DATABASE_FILENAME, DATE_FORMAT, MAX_MONEY_UNITS, MONEY_SCALE};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

/// Get the default database path (`PoisePMS.sqlite` in the working directory)
#[must_use]
pub fn get_default_database_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(DATABASE_FILENAME)
}

/// Format a date for display and storage
#[must_use]
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a strict `YYYY-MM-DD` date
///
/// Both the shape (four digit year, two digit month and day) and calendar
/// validity must hold, so `2024-3-1` and `2023-02-30` are both rejected.
#[must_use]
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    if !has_iso_date_shape(date_str) {
        return None;
    }
    NaiveDate::parse_from_str(date_str, DATE_FORMAT).ok()
}

fn has_iso_date_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Parse a monetary amount
///
/// Accepts plain (`150000.00`) and scientific (`1.5e5`) notation. Amounts
/// outside [`is_storable_money`] are rejected; the sign is not checked.
#[must_use]
pub fn parse_money(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
        .filter(is_storable_money)
}

/// Whether an amount is small enough to keep two decimal places when stored
#[must_use]
pub fn is_storable_money(amount: &Decimal) -> bool {
    amount.abs() < Decimal::from(MAX_MONEY_UNITS)
}

/// Round an amount to the stored money scale, halves away from zero
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(
        MONEY_SCALE,
        rust_decimal::RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Format an amount with exactly two decimal places
///
/// Only amounts accepted by [`is_storable_money`] are guaranteed the full
/// scale; `rescale` keeps fewer places when the integer part is too wide.
#[must_use]
pub fn format_money(amount: &Decimal) -> String {
    let mut rounded = round_money(*amount);
    rounded.rescale(MONEY_SCALE);
    rounded.to_string()
}

/// Build a `LIKE` pattern matching `term` anywhere, escaping wildcards with `\`
#[must_use]
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
