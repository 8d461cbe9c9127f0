use crate::cli::commands::{parse_id, parse_optional_id};
use crate::cli::parser::{Commands, EntryAction, EntryArgs};
use crate::config::Config;
use crate::core::entry::{EntryEdit, EntryLogic, EntryRequest};
use crate::core::shift::PlanRequest;
use crate::errors::AppResult;
use crate::models::ShiftEntry;
use crate::models::shift_entry::Earnings;
use crate::store::Store;
use crate::ui::messages::success;
use crate::utils::date::parse_date;
use crate::utils::money;
use crate::utils::time::{parse_optional_time, parse_time};

pub fn handle(cmd: &Commands, cfg: &Config, store: &dyn Store) -> AppResult<()> {
    if let Commands::Entry { action } = cmd {
        match action {
            EntryAction::Add { shift, data } => {
                let entry = EntryLogic::add(store, parse_id(shift)?, request(data)?)?;
                report("Entry recorded", &entry, &cfg.currency_symbol);
            }
            EntryAction::Quick {
                date,
                start,
                end,
                employer,
                rate,
                lunch,
                hours,
                sales,
                tips,
                tip_out,
                other,
                notes,
            } => {
                let start = parse_time(start)?;
                let end = parse_time(end)?;
                let plan = PlanRequest {
                    date: Some(parse_date(date)?),
                    start: Some(start),
                    end: Some(end),
                    employer_id: parse_optional_id(employer.as_deref())?,
                    hourly_rate: *rate,
                    lunch_minutes: *lunch,
                    ..PlanRequest::default()
                };
                let req = EntryRequest {
                    start: Some(start),
                    end: Some(end),
                    hours: *hours,
                    earnings: Earnings {
                        sales: *sales,
                        tips: *tips,
                        cash_out: *tip_out,
                        other: *other,
                    },
                    notes: notes.clone(),
                };
                let (shift, entry) = EntryLogic::quick(store, plan, req)?;
                report(
                    &format!("Shift {} recorded", shift.id),
                    &entry,
                    &cfg.currency_symbol,
                );
            }
            EntryAction::Edit {
                id,
                start,
                end,
                hours,
                sales,
                tips,
                tip_out,
                other,
                notes,
            } => {
                let edit = EntryEdit {
                    start: parse_optional_time(start.as_deref())?,
                    end: parse_optional_time(end.as_deref())?,
                    hours: *hours,
                    sales: *sales,
                    tips: *tips,
                    cash_out: *tip_out,
                    other: *other,
                    notes: notes.clone(),
                };
                let entry = EntryLogic::edit(store, parse_id(id)?, edit)?;
                report("Entry updated", &entry, &cfg.currency_symbol);
            }
            EntryAction::Delete { id } => {
                let entry = EntryLogic::delete(store, parse_id(id)?)?;
                success(format!(
                    "Entry {} deleted; shift {} is planned again",
                    entry.id, entry.shift_id
                ));
            }
        }
    }
    Ok(())
}

fn request(args: &EntryArgs) -> AppResult<EntryRequest> {
    Ok(EntryRequest {
        start: parse_optional_time(args.start.as_deref())?,
        end: parse_optional_time(args.end.as_deref())?,
        hours: args.hours,
        earnings: Earnings {
            sales: args.sales,
            tips: args.tips,
            cash_out: args.tip_out,
            other: args.other,
        },
        notes: args.notes.clone(),
    })
}

fn report(title: &str, entry: &ShiftEntry, symbol: &str) {
    success(format!("{title} id={}", entry.id));
    println!(
        "   {} ({})  wages {}  tips {}  tip% {:.1}  net {}",
        entry.time_range(),
        entry.formatted_duration(),
        money(entry.gross_income.unwrap_or(0.0), symbol),
        money(entry.total_tip_income(), symbol),
        entry.tip_percentage(),
        money(entry.net_income.unwrap_or(0.0), symbol),
    );
}
