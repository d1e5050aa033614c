//! CUSIP validity predicate.
//!
//! A CUSIP is nine characters: an eight-character issue/issuer code over the
//! alphabet `0-9`, `A-Z` plus the special characters `*`, `@` and `#`,
//! followed by a single check digit. The check digit is computed by doubling
//! the character values in even positions (1-based) and summing the decimal
//! digits of every value.

/// Returns `true` if `candidate` is a well-formed CUSIP with a valid check
/// digit. Input is trimmed and matched case-insensitively.
pub fn is_cusip(candidate: &str) -> bool {
    let normalized = candidate.trim().to_ascii_uppercase();
    let bytes = normalized.as_bytes();
    if bytes.len() != 9 {
        return false;
    }

    let mut sum: u32 = 0;
    for (i, &b) in bytes[..8].iter().enumerate() {
        let value = match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'A'..=b'Z' => u32::from(b - b'A') + 10,
            b'*' => 36,
            b'@' => 37,
            b'#' => 38,
            _ => return false,
        };
        // Even positions (1-based) are doubled before digit-summing.
        let value = if i % 2 == 1 { value * 2 } else { value };
        sum += value / 10 + value % 10;
    }

    let check = (10 - sum % 10) % 10;
    match bytes[8] {
        digit @ b'0'..=b'9' => u32::from(digit - b'0') == check,
        _ => false,
    }
}
