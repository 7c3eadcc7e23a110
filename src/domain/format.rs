// src/domain/format.rs

/// Render a price as whole currency units with thousands separators,
/// e.g. `12345678.9` with "₦" becomes "₦12,345,678". The fraction is
/// truncated, not rounded.
pub fn format_currency(value: f64, symbol: &str) -> String {
    let whole = value.trunc() as i64;
    let digits = whole.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if whole < 0 { "-" } else { "" };
    format!("{sign}{symbol}{grouped}")
}
