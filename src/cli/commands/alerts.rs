use crate::cli::commands::{parse_id, reference_day};
use crate::cli::parser::{AlertsAction, Commands};
use crate::core::alerts::AlertLogic;
use crate::errors::AppResult;
use crate::models::Alert;
use crate::store::Store;
use crate::ui::messages::{info, success};
use crate::utils::colors::{BLUE, GREY, RESET};

pub fn handle(cmd: &Commands, store: &dyn Store) -> AppResult<()> {
    if let Commands::Alerts { action } = cmd {
        match action {
            AlertsAction::List { unread } => {
                let alerts = store.list_alerts(*unread)?;
                if alerts.is_empty() {
                    info("No alerts.");
                    return Ok(());
                }
                for a in &alerts {
                    print_alert(a);
                }
                println!(
                    "{GREY}{} alert(s), {} unread{RESET}",
                    alerts.len(),
                    alerts.iter().filter(|a| !a.is_read).count()
                );
            }
            AlertsAction::Check { date } => {
                let created = AlertLogic::check(store, reference_day(date.as_deref())?)?;
                if created.is_empty() {
                    info("No new alerts.");
                } else {
                    for a in &created {
                        print_alert(a);
                    }
                    success(format!("{} new alert(s)", created.len()));
                }
            }
            AlertsAction::Read { id } => {
                let id = id.as_deref().map(parse_id).transpose()?;
                let n = AlertLogic::read(store, id)?;
                success(format!("{n} alert(s) marked as read"));
            }
            AlertsAction::Clear { id } => {
                AlertLogic::clear(store, parse_id(id)?)?;
                success("Alert deleted");
            }
            AlertsAction::Purge { days } => {
                let n = AlertLogic::purge(store, *days)?;
                success(format!("{n} alert(s) older than {days} day(s) removed"));
            }
        }
    }
    Ok(())
}

fn print_alert(a: &Alert) {
    let marker = if a.is_read {
        format!("{GREY}·{RESET}")
    } else {
        format!("{BLUE}●{RESET}")
    };
    let when = a
        .created_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    println!(
        "{marker} {GREY}{when}{RESET} [{}] {}\n    {}\n    {GREY}{}{RESET}",
        a.alert_type, a.title, a.message, a.id
    );
}
