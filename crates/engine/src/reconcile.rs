//! Normalization and reconciliation applied to a balance sheet at creation.
//!
//! [`reconcile`] consumes the candidate sheet and returns the value ready
//! for persistence; callers never observe a half-normalized sheet. It runs
//! **only** on create. Updates replace a sheet verbatim and can leave it
//! out of balance.

use unicode_normalization::UnicodeNormalization;

use crate::{BalanceSheet, EngineError, LineItem};

/// Substituted when the incoming company name is absent or blank.
pub const DEFAULT_COMPANY_NAME: &str = "ABC Corp.";

/// Name of the synthetic equity entry that forces the sheet to balance.
pub const ADJUSTMENT_NAME: &str = "Reconciliation Adjustment";

/// Normalize and reconcile a candidate sheet.
///
/// 1. The company name is normalized (see [`normalize_company_name`]).
/// 2. Category totals are computed in collection order.
/// 3. If `total_assets != total_liabilities + total_equities`, one equity
///    item named [`ADJUSTMENT_NAME`] is appended whose value is the
///    pre-adjustment difference, restoring exact equality.
///
/// Fails with [`EngineError::InvalidAmount`] when the difference leaves
/// the representable cent range, since no adjustment entry could balance
/// such a sheet.
pub fn reconcile(mut sheet: BalanceSheet) -> Result<BalanceSheet, EngineError> {
    sheet.company_name = Some(normalize_company_name(sheet.company_name.as_deref()));

    let difference = sheet.checked_difference().ok_or_else(|| {
        EngineError::InvalidAmount("sheet totals exceed the representable amount range".to_string())
    })?;
    if !difference.is_zero() {
        sheet.equities.push(LineItem::new(ADJUSTMENT_NAME, difference));
    }

    Ok(sheet)
}

/// Normalize a company name for storage.
///
/// Absent or blank names become [`DEFAULT_COMPANY_NAME`]. Anything else is
/// trimmed, NFC-normalized, and title-cased token by token: first character
/// uppercased, the rest lowercased, tokens rejoined with single spaces.
#[must_use]
pub fn normalize_company_name(raw: Option<&str>) -> String {
    let trimmed = raw.map_or("", str::trim);
    if trimmed.is_empty() {
        return DEFAULT_COMPANY_NAME.to_string();
    }

    let composed: String = trimmed.nfc().collect();
    composed
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => {
            let mut word: String = first.to_uppercase().collect();
            word.extend(chars.flat_map(char::to_lowercase));
            word
        }
        None => String::new(),
    }
}
