use crate::cli::commands::parse_id;
use crate::cli::parser::{Commands, EmployerAction};
use crate::config::Config;
use crate::core::employer::{EmployerEdit, EmployerLogic};
use crate::errors::AppResult;
use crate::store::Store;
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREY, RESET, colorize_optional, hex_to_ansi};
use crate::utils::money;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config, store: &dyn Store) -> AppResult<()> {
    if let Commands::Employer { action } = cmd {
        match action {
            EmployerAction::Add { name, rate, color } => {
                let e = EmployerLogic::add(store, name, *rate, color.as_deref())?;
                success(format!(
                    "Employer '{}' added ({}/h) id={}",
                    e.name,
                    money(e.hourly_rate, &cfg.currency_symbol),
                    e.id
                ));
            }
            EmployerAction::List { all } => {
                let employers = store.list_employers(!*all)?;
                if employers.is_empty() {
                    info("No employers found.");
                    return Ok(());
                }
                let mut table = Table::new(vec![
                    Column::new("ID", 36),
                    Column::new("Name", 24),
                    Column::new("Rate", 10),
                    Column::new("Active", 6),
                ]);
                for e in &employers {
                    let dot = hex_to_ansi(&e.color)
                        .map(|c| format!("{c}●{RESET} "))
                        .unwrap_or_default();
                    table.add_row(vec![
                        e.id.to_string(),
                        format!("{dot}{}", e.name),
                        money(e.hourly_rate, &cfg.currency_symbol),
                        if e.active { "yes".into() } else { colorize_optional("-") },
                    ]);
                }
                print!("{}", table.render());
                println!("{GREY}{} employer(s){RESET}", employers.len());
            }
            EmployerAction::Edit {
                id,
                name,
                rate,
                color,
            } => {
                let edit = EmployerEdit {
                    name: name.clone(),
                    hourly_rate: *rate,
                    color: color.clone(),
                };
                let e = EmployerLogic::edit(store, parse_id(id)?, edit)?;
                success(format!("Employer '{}' updated", e.name));
            }
            EmployerAction::Activate { id } => {
                let e = EmployerLogic::set_active(store, parse_id(id)?, true)?;
                success(format!("Employer '{}' activated", e.name));
            }
            EmployerAction::Deactivate { id } => {
                let e = EmployerLogic::set_active(store, parse_id(id)?, false)?;
                success(format!("Employer '{}' deactivated", e.name));
            }
            EmployerAction::Delete { id } => {
                let e = EmployerLogic::delete(store, parse_id(id)?)?;
                success(format!("Employer '{}' deleted", e.name));
            }
        }
    }
    Ok(())
}
