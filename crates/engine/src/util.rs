//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the write path enforces consistent
//! invariants.

use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_stored_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| EngineError::InvalidRecord(format!("invalid {label} id: {value}")))
}

/// Reject a blank required label. The label is kept exactly as given, since
/// categories are grouped byte for byte.
pub(crate) fn ensure_required_name(value: &str, label: &str) -> ResultEngine<String> {
    if value.trim().is_empty() {
        return Err(EngineError::InvalidName(format!("{label} must not be empty")));
    }
    Ok(value.to_string())
}

/// Trim optional free text; blank input becomes `None`.
pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Largest amount a single record may carry: 10 billion in major units.
///
/// Keeps dashboard sums far away from `i64` overflow for any realistic number
/// of records.
pub(crate) const MAX_RECORD_AMOUNT: Money = Money::new(1_000_000_000_000);

/// Amounts on the write path are within `0..=MAX_RECORD_AMOUNT`.
pub(crate) fn ensure_record_amount(amount: Money, label: &str) -> ResultEngine<()> {
    if amount.is_negative() {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must be >= 0, got {amount}"
        )));
    }
    if amount > MAX_RECORD_AMOUNT {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must be <= {MAX_RECORD_AMOUNT}, got {amount}"
        )));
    }
    Ok(())
}

/// Read a stored amount, rejecting rows written around the write path.
pub(crate) fn parse_stored_amount(cents: i64, label: &str) -> ResultEngine<Money> {
    let amount = Money::new(cents);
    ensure_record_amount(amount, label)
        .map_err(|_| EngineError::InvalidRecord(format!("{label} out of range: {amount}")))?;
    Ok(amount)
}
