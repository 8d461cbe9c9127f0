//! Formatting helpers for CLI output: money, percentages and progress bars.

/// `$1,234.50`, `-$12.00`
pub fn money(amount: f64, symbol: &str) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{:02}", cents % 100)
}

/// One decimal; `want_sign` adds `+` to positive values.
pub fn percent(value: f64, want_sign: bool) -> String {
    if want_sign && value > 0.0 {
        format!("+{value:.1}%")
    } else {
        format!("{value:.1}%")
    }
}

/// Filled/empty bar for a 0..=100+ progress value.
pub fn progress_bar(pct: f64, width: usize) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(money(1234.5, "$"), "$1,234.50");
        assert_eq!(money(0.0, "€"), "€0.00");
        assert_eq!(money(-12.0, "$"), "-$12.00");
        assert_eq!(money(999999.999, "$"), "$1,000,000.00");
    }

    #[test]
    fn percent_sign() {
        assert_eq!(percent(12.345, true), "+12.3%");
        assert_eq!(percent(-4.0, true), "-4.0%");
        assert_eq!(percent(4.0, false), "4.0%");
    }

    #[test]
    fn bar_is_clamped() {
        assert_eq!(progress_bar(50.0, 10), "[#####.....]");
        assert_eq!(progress_bar(150.0, 4), "[####]");
    }
}
