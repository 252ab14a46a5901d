use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::record::InvoiceRecord;
use crate::error::ValidationError;

/// Whether an invoice without line items is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    #[default]
    Strict,
    Lenient,
}

impl Strictness {
    pub fn from_flag(strict: bool) -> Self {
        if strict {
            Strictness::Strict
        } else {
            Strictness::Lenient
        }
    }
}

/// A money value that displays with exactly two decimals, rounding half up
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Two-decimal display form, e.g. "140.50" or "-12.00"
    pub fn display(&self) -> String {
        let mut rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        // rescale is a no-op when the mantissa has no room left for two places
        let text = rounded.to_string();
        match text.split_once('.') {
            None => format!("{text}.00"),
            Some((_, frac)) if frac.len() == 1 => format!("{text}0"),
            Some(_) => text,
        }
    }

    /// Display form followed by the currency label
    pub fn with_currency(&self, currency: &str) -> String {
        if currency.is_empty() {
            self.display()
        } else {
            format!("{} {}", self.display(), currency)
        }
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Money(value)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl Serialize for Money {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display())
    }
}

/// Balance due: line totals minus discount minus advance. May be negative.
pub type BalanceDue = Money;

/// Every derived figure on the invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub line_totals: Vec<Money>,
    pub subtotal: Money,
    pub discount: Money,
    pub advance: Money,
    pub balance_due: BalanceDue,
}

static DECIMAL_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)$").unwrap());

/// Parse a required money field. Only plain decimal text is accepted.
pub(crate) fn parse_money(field: &str, raw: &str) -> Result<Money, ValidationError> {
    let invalid = || ValidationError::InvalidAmount {
        field: field.to_string(),
        value: raw.to_string(),
    };

    let text = raw.trim();
    if !DECIMAL_TEXT.is_match(text) {
        return Err(invalid());
    }
    Decimal::from_str(text).map(Money).map_err(|_| invalid())
}

/// Parse an optional money field; absent or blank means zero
pub(crate) fn parse_optional_money(
    field: &str,
    raw: Option<&str>,
) -> Result<Money, ValidationError> {
    match raw {
        Some(s) if !s.trim().is_empty() => parse_money(field, s),
        _ => Ok(Money::ZERO),
    }
}

/// Validate every money field of the record, then derive the totals.
///
/// All fields are parsed before any arithmetic happens, so an invalid
/// value anywhere yields an error and no partial figures.
pub fn compute_totals(record: &InvoiceRecord, strictness: Strictness) -> Result<Totals, ValidationError> {
    if strictness == Strictness::Strict && record.items.is_empty() {
        return Err(ValidationError::EmptyItems);
    }

    let line_totals = record
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_money(&format!("items[{i}].total"), &item.total))
        .collect::<Result<Vec<_>, _>>()?;

    for (i, item) in record.items.iter().enumerate() {
        parse_optional_money(&format!("items[{i}].amount"), item.amount.as_deref())?;
    }

    let discount = parse_optional_money("discount", record.discount.as_deref())?;
    let advance = parse_optional_money("advance", record.advance.as_deref())?;

    let subtotal = line_totals
        .iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.value()))
        .ok_or(ValidationError::AmountOutOfRange { field: "subtotal" })?;
    let balance_due = subtotal
        .checked_sub(discount.value())
        .and_then(|due| due.checked_sub(advance.value()))
        .ok_or(ValidationError::AmountOutOfRange {
            field: "balance due",
        })?;

    Ok(Totals {
        line_totals,
        subtotal: Money(subtotal),
        discount,
        advance,
        balance_due: Money(balance_due),
    })
}

/// Sum of line totals minus discount and advance
pub fn compute_balance_due(
    record: &InvoiceRecord,
    strictness: Strictness,
) -> Result<BalanceDue, ValidationError> {
    compute_totals(record, strictness).map(|t| t.balance_due)
}
