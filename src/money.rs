//! Cents to dollar-string conversion
//!
//! Amounts are integer minor units everywhere in this crate. The strings
//! produced here are for display only; aggregate before formatting.

use crate::error::{ErrorCode, FinanceError, Result};

/// Format cents as a dollar string with thousands separators and two
/// fractional digits, e.g. `123456` becomes `"1,234.56"`.
pub fn format_cents(cents: u64) -> String {
    format!("{}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// Like [`format_cents`] but drops `.00` on whole-dollar amounts.
pub fn format_cents_compact(cents: u64) -> String {
    if cents % 100 == 0 {
        group_thousands(cents / 100)
    } else {
        format_cents(cents)
    }
}

fn group_thousands(units: u64) -> String {
    let digits = units.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parse a user-entered dollar amount into cents.
///
/// Accepts an optional leading `$`, `,` separators in the whole part and
/// at most two fractional digits. Integer arithmetic only.
pub fn parse_dollars(input: &str) -> Result<u64> {
    let invalid = |reason: &str| {
        FinanceError::validation_with_code(
            ErrorCode::VALIDATION_INVALID_MONEY,
            format!("'{}': {}", input, reason),
            Some("amount".to_string()),
        )
    };

    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed).trim_start();
    if trimmed.starts_with('-') {
        return Err(invalid("amount cannot be negative"));
    }

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("amount is empty"));
    }
    if fraction.len() > 2 {
        return Err(invalid("at most two decimal places are allowed"));
    }

    if whole.contains(',') && !is_grouped(whole) {
        return Err(invalid("misplaced ',' separator"));
    }

    let whole_digits: String = whole.chars().filter(|c| *c != ',').collect();
    if !whole_digits.chars().all(|c| c.is_ascii_digit())
        || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid("not a number"));
    }

    let units: u64 = if whole_digits.is_empty() {
        0
    } else {
        whole_digits
            .parse()
            .map_err(|_| invalid("amount is too large"))?
    };
    let minor: u64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<u64>().map_err(|_| invalid("not a number"))? * 10,
        _ => fraction.parse().map_err(|_| invalid("not a number"))?,
    };

    units
        .checked_mul(100)
        .and_then(|c| c.checked_add(minor))
        .ok_or_else(|| invalid("amount is too large"))
}

/// First group 1-3 characters, every later group exactly 3
fn is_grouped(whole: &str) -> bool {
    let mut groups = whole.split(',');
    let first_ok = groups
        .next()
        .is_some_and(|first| (1..=3).contains(&first.len()));
    first_ok && groups.all(|group| group.len() == 3)
}
