use crate::cli::commands::{parse_id, parse_optional_id, parse_optional_range};
use crate::cli::parser::{Commands, ShiftAction};
use crate::config::Config;
use crate::core::calculator::period::DateRange;
use crate::core::shift::{PlanRequest, ShiftEdit, ShiftLogic};
use crate::errors::AppResult;
use crate::models::{CompletedShift, ShiftStatus};
use crate::store::Store;
use crate::ui::messages::{info, success};
use crate::utils::colors::{CYAN, GREEN, GREY, RED, RESET, YELLOW, colorize_optional};
use crate::utils::date::{parse_date, parse_optional_date, today};
use crate::utils::money;
use crate::utils::table::{Column, Table};
use crate::utils::time::{parse_optional_time, parse_time};

pub fn handle(cmd: &Commands, cfg: &Config, store: &dyn Store) -> AppResult<()> {
    if let Commands::Shift { action } = cmd {
        match action {
            ShiftAction::Plan {
                date,
                start,
                end,
                employer,
                rate,
                lunch,
                sales_target,
                alert,
                notes,
            } => {
                let req = PlanRequest {
                    date: Some(parse_date(date)?),
                    start: Some(parse_time(start)?),
                    end: Some(parse_time(end)?),
                    employer_id: parse_optional_id(employer.as_deref())?,
                    hourly_rate: *rate,
                    lunch_minutes: *lunch,
                    sales_target: *sales_target,
                    alert_minutes: *alert,
                    notes: notes.clone(),
                };
                let shift = ShiftLogic::plan(store, req)?;
                success(format!(
                    "Shift planned on {} {} ({}) id={}",
                    shift.shift_date,
                    shift.time_range(),
                    shift.formatted_duration(),
                    shift.id
                ));
            }
            ShiftAction::List {
                period,
                status,
                now,
            } => {
                let range = if *now {
                    Some(DateRange::new(today(), today()))
                } else {
                    parse_optional_range(period.as_deref())?
                };
                let status = status.as_deref().map(ShiftStatus::parse).transpose()?;
                let shifts = ShiftLogic::list(store, range, status)?;
                print_shifts(&shifts, &cfg.currency_symbol);
            }
            ShiftAction::Edit {
                id,
                date,
                start,
                end,
                employer,
                rate,
                lunch,
                sales_target,
                alert,
                notes,
            } => {
                let edit = ShiftEdit {
                    date: parse_optional_date(date.as_deref())?,
                    start: parse_optional_time(start.as_deref())?,
                    end: parse_optional_time(end.as_deref())?,
                    employer_id: parse_optional_id(employer.as_deref())?,
                    hourly_rate: *rate,
                    lunch_minutes: *lunch,
                    sales_target: *sales_target,
                    alert_minutes: *alert,
                    notes: notes.clone(),
                };
                let shift = ShiftLogic::edit(store, parse_id(id)?, edit)?;
                success(format!(
                    "Shift updated: {} {} ({})",
                    shift.shift_date,
                    shift.time_range(),
                    shift.formatted_duration()
                ));
            }
            ShiftAction::Status { id, status } => {
                let shift = ShiftLogic::set_status(store, parse_id(id)?, ShiftStatus::parse(status)?)?;
                success(format!(
                    "Shift of {} is now {}",
                    shift.shift_date,
                    shift.status.as_str()
                ));
            }
            ShiftAction::Delete { id } => {
                let shift = ShiftLogic::delete(store, parse_id(id)?)?;
                success(format!(
                    "Shift of {} {} deleted",
                    shift.shift_date,
                    shift.time_range()
                ));
            }
        }
    }
    Ok(())
}

fn status_color(status: ShiftStatus) -> &'static str {
    match status {
        ShiftStatus::Planned => CYAN,
        ShiftStatus::Completed => GREEN,
        ShiftStatus::Missed => RED,
    }
}

fn print_shifts(shifts: &[CompletedShift], symbol: &str) {
    if shifts.is_empty() {
        info("No shifts found for the selected period.");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("ID", 36),
        Column::new("Date", 10),
        Column::new("Planned", 13),
        Column::new("Worked", 13),
        Column::new("Hours", 7),
        Column::new("Sales", 10),
        Column::new("Tips", 9),
        Column::new("Tip %", 6),
        Column::new("Employer", 16),
        Column::new("Status", 9),
    ]);

    for s in shifts {
        let worked = s.is_worked();
        let cell = |v: f64| {
            if worked {
                money(v, symbol)
            } else {
                colorize_optional("-")
            }
        };
        let status = s.status();
        table.add_row(vec![
            s.expected_shift.id.to_string(),
            s.shift_date().to_string(),
            s.time_range(),
            s.actual_time_range()
                .unwrap_or_else(|| colorize_optional("--:--")),
            format!("{:.2}", s.hours()),
            cell(s.sales()),
            cell(s.tips()),
            if worked {
                format!("{:.1}", s.tip_percentage())
            } else {
                colorize_optional("-")
            },
            s.employer_name().to_string(),
            format!("{}{}{RESET}", status_color(status), status.as_str()),
        ]);
    }

    print!("{}", table.render());

    let worked = shifts.iter().filter(|s| s.is_worked()).count();
    let overtime = shifts.iter().filter(|s| s.is_overtime()).count();
    println!(
        "{GREY}{} shift(s), {} worked{RESET}{}",
        shifts.len(),
        worked,
        if overtime > 0 {
            format!(" {YELLOW}({overtime} overtime){RESET}")
        } else {
            String::new()
        }
    );
}
