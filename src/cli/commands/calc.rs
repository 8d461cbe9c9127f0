use crate::cli::parser::{CalcAction, Commands};
use crate::config::Config;
use crate::core::calculator::tip::{TIP_OUT_PRESETS, TIP_PRESETS, bill_tip, hourly_rate, tip_out};
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::table::{Column, Table};
use crate::utils::{money, percent};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let sym = cfg.currency_symbol.as_str();
    if let Commands::Calc { action } = cmd {
        match action {
            CalcAction::Tip {
                bill,
                percent: Some(pct),
                split,
            } => {
                let t = bill_tip(*bill, *pct, *split)?;
                header("Tip calculator");
                println!("  {:<18} {}", "Bill", money(*bill, sym));
                println!(
                    "  {:<18} {}",
                    format!("Tip ({})", percent(*pct, false)),
                    money(t.tip, sym)
                );
                println!("  {:<18} {}", "Total", money(t.total, sym));
                if *split > 1 {
                    println!(
                        "  {:<18} {}",
                        format!("Per person ({split})"),
                        money(t.per_person, sym)
                    );
                }
                println!();
            }
            CalcAction::Tip {
                bill,
                percent: None,
                split,
            } => {
                header(format!("Tip on {}", money(*bill, sym)));
                let mut columns = vec![
                    Column::new("Tip %", 7),
                    Column::new("Tip", 12),
                    Column::new("Total", 12),
                ];
                if *split > 1 {
                    columns.push(Column::new("Per person", 12));
                }
                let mut table = Table::new(columns);
                for pct in TIP_PRESETS {
                    let t = bill_tip(*bill, pct, *split)?;
                    table.add_row(vec![
                        percent(pct, false),
                        money(t.tip, sym),
                        money(t.total, sym),
                        money(t.per_person, sym),
                    ]);
                }
                print!("{}", table.render());
                println!();
            }
            CalcAction::TipOut {
                tips,
                percent: Some(pct),
            } => {
                let t = tip_out(*tips, *pct)?;
                header("Tip-out");
                println!("  {:<18} {}", "Tips", money(*tips, sym));
                println!(
                    "  {:<18} {}",
                    format!("Tip-out ({})", percent(*pct, false)),
                    money(t.handed_out, sym)
                );
                println!("  {:<18} {}", "You keep", money(t.kept, sym));
                println!();
            }
            CalcAction::TipOut {
                tips,
                percent: None,
            } => {
                header(format!("Tip-out of {}", money(*tips, sym)));
                let mut table = Table::new(vec![
                    Column::new("Share", 7),
                    Column::new("Handed out", 12),
                    Column::new("You keep", 12),
                ]);
                for pct in TIP_OUT_PRESETS {
                    let t = tip_out(*tips, pct)?;
                    table.add_row(vec![
                        percent(pct, false),
                        money(t.handed_out, sym),
                        money(t.kept, sym),
                    ]);
                }
                print!("{}", table.render());
                println!();
            }
            CalcAction::Hourly { earnings, hours } => {
                let rate = hourly_rate(*earnings, *hours)?;
                println!("Hourly rate: {}/h", money(rate, sym));
            }
        }
    }
    Ok(())
}
