// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Money display formatting.

/// Format an amount with spaces as thousands separators: `1234567` → `"1 234 567"`.
pub fn format_money(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// Signed variant for balances.
pub fn format_money_signed(amount: i64) -> String {
    if amount < 0 {
        format!("-{}", format_money(amount.unsigned_abs()))
    } else {
        format_money(amount as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[yare::parameterized(
        zero      = { 0, "0" },
        hundreds  = { 950, "950" },
        thousands = { 1_000, "1 000" },
        typical   = { 120_000, "120 000" },
        millions  = { 1_234_567, "1 234 567" },
        exact     = { 1_000_000, "1 000 000" },
    )]
    fn formats(amount: u64, expected: &str) {
        assert_eq!(format_money(amount), expected);
    }

    #[test]
    fn signed_negative() {
        assert_eq!(format_money_signed(-45_000), "-45 000");
        assert_eq!(format_money_signed(45_000), "45 000");
    }
}
