/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Change color:
/// \>0 → green
/// \<0 → red
/// 0 → reset
pub fn color_for_change(value: f64) -> &'static str {
    if value > 0.0 {
        GREEN
    } else if value < 0.0 {
        RED
    } else {
        RESET
    }
}

/// Grey for empty placeholders (`""`, `-`, `--:--`).
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "-" || v == "--:--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Hex color of an employer (`#RRGGBB`) as a 24-bit ANSI foreground.
pub fn hex_to_ansi(hex: &str) -> Option<String> {
    let h = hex.trim().trim_start_matches('#');
    if h.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&h[0..2], 16).ok()?;
    let g = u8::from_str_radix(&h[2..4], 16).ok()?;
    let b = u8::from_str_radix(&h[4..6], 16).ok()?;
    Some(format!("\x1b[38;2;{r};{g};{b}m"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employer_colors() {
        assert_eq!(hex_to_ansi("#FF8000").as_deref(), Some("\x1b[38;2;255;128;0m"));
        assert_eq!(hex_to_ansi("blue"), None);
    }
}
