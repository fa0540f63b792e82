//! Max-plus-one id generation.
//!
//! Ids are decimal strings. The next id is one more than the largest
//! existing id, or `"1"` for an empty collection. The computation only sees
//! the caller's snapshot, so two sessions (or two overlapping `add` calls)
//! working from the same snapshot produce the same id.

use crate::error::IdError;
use crate::types::Item;

/// True for a non-empty string of ASCII digits.
pub fn is_decimal_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

/// Derive the id for a new item from the existing collection.
///
/// Every id must parse as an unsigned decimal integer; the first one that
/// does not is reported as `IdError::NonNumeric`.
pub fn next_id(items: &[Item]) -> Result<String, IdError> {
    let mut max: Option<u64> = None;
    for item in items {
        let value = parse_id(&item.id)?;
        max = Some(max.map_or(value, |m| m.max(value)));
    }
    match max {
        None => Ok("1".to_string()),
        Some(m) => m
            .checked_add(1)
            .map(|next| next.to_string())
            .ok_or(IdError::Overflow),
    }
}

fn parse_id(id: &str) -> Result<u64, IdError> {
    if !is_decimal_id(id) {
        return Err(IdError::NonNumeric(id.to_string()));
    }
    // All digits, so the only parse failure left is overflow.
    id.parse::<u64>().map_err(|_| IdError::Overflow)
}
