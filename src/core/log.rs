use crate::db::log::{LogLine, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

const MAX_OP_WIDTH: usize = 60;

static ANSI: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok());

fn strip_ansi(s: &str) -> String {
    match ANSI.as_ref() {
        Some(re) => re.replace_all(s, "").into_owned(),
        None => s.to_string(),
    }
}

/// Colour of an operation name in `log --print`.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "shift_plan" | "entry_add" | "import" => Colour::Green,
        "shift_delete" | "entry_delete" | "alert_delete" | "alerts_purge" | "pin_clear" => {
            Colour::Red
        }
        "shift_edit" | "entry_edit" | "shift_status" | "profile" | "targets" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        "achievement" | "alerts_check" => Colour::Cyan,
        "init" => Colour::RGB(255, 153, 51),
        other if other.starts_with("employer") => Colour::Fixed(75),
        _ => Colour::White,
    }
}

fn render_line(line: &LogLine, id_w: usize, date_w: usize, op_w: usize) -> String {
    let color = color_for_operation(&line.operation);

    let visible = if line.target.is_empty() {
        line.operation.clone()
    } else {
        format!("{} ({})", line.operation, line.target)
    };
    let visible = if visible.chars().count() > MAX_OP_WIDTH {
        let mut s: String = visible.chars().take(MAX_OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        visible
    };

    // only the operation word is coloured
    let colored = match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    };
    let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

    format!(
        "{:>id_w$}: {:<date_w$} | {}{} => {}",
        line.id,
        line.date,
        colored,
        padding,
        line.message,
        id_w = id_w,
        date_w = date_w
    )
}

pub struct LogLogic;

impl LogLogic {
    /// Oldest first, limited to the last `limit` lines when given.
    pub fn print_log(pool: &DbPool, limit: Option<usize>) -> AppResult<()> {
        let mut lines = load_log(&pool.conn, limit)?;
        lines.reverse();

        if lines.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let op_w = lines
            .iter()
            .map(|l| l.operation.len() + l.target.len() + 3)
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = lines
            .iter()
            .map(|l| l.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = lines.iter().map(|l| l.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");
        for line in &lines {
            println!("{}", render_line(line, id_w, date_w, op_w));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_targets_are_truncated() {
        let line = LogLine {
            id: 7,
            date: "2025-03-01T10:00:00+00:00".into(),
            operation: "import".into(),
            target: "x".repeat(120),
            message: "done".into(),
        };
        let out = strip_ansi(&render_line(&line, 1, 25, MAX_OP_WIDTH));
        assert!(out.contains("..."));
        assert!(out.ends_with("=> done"));
    }
}
