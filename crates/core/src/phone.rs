// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Phone number normalization.
//!
//! Accepts either a shared contact payload or typed digits. A bare 9-digit
//! local number is coerced to a full number by prefixing the country calling
//! code; anything already carrying a country code passes through unchanged
//! after non-digit stripping.

/// Default country calling code (Uzbekistan).
pub const DEFAULT_COUNTRY_CODE: &str = "998";

/// Normalize raw phone input to `+<digits>` form.
///
/// Returns `None` when the input contains no digits at all.
pub fn normalize_phone(raw: &str) -> Option<String> {
    normalize_phone_with(raw, DEFAULT_COUNTRY_CODE)
}

/// Normalize with an explicit country calling code.
pub fn normalize_phone_with(raw: &str, country_code: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let full = if digits.len() == 9 {
        format!("{country_code}{digits}")
    } else {
        digits
    };
    Some(format!("+{full}"))
}

#[cfg(test)]
#[path = "phone_tests.rs"]
mod tests;
