use crate::cli::parser::{Commands, TargetsAction};
use crate::config::Config;
use crate::core::profile::{ProfileLogic, TargetsUpdate};
use crate::errors::AppResult;
use crate::models::UserProfile;
use crate::store::Store;
use crate::ui::messages::{header, success, warning};
use crate::utils::colors::{GREY, RESET};
use crate::utils::{money, percent};

pub fn handle(cmd: &Commands, cfg: &Config, store: &dyn Store) -> AppResult<()> {
    if let Commands::Targets { action } = cmd {
        match action {
            TargetsAction::Show => {
                print_targets(&store.profile_or_default()?, &cfg.currency_symbol);
            }
            TargetsAction::Set {
                tip_daily,
                tip_weekly,
                tip_monthly,
                sales_daily,
                sales_weekly,
                sales_monthly,
                hours_daily,
                hours_weekly,
                hours_monthly,
                tip_percentage,
            } => {
                let upd = TargetsUpdate {
                    tip_daily: *tip_daily,
                    tip_weekly: *tip_weekly,
                    tip_monthly: *tip_monthly,
                    sales_daily: *sales_daily,
                    sales_weekly: *sales_weekly,
                    sales_monthly: *sales_monthly,
                    hours_daily: *hours_daily,
                    hours_weekly: *hours_weekly,
                    hours_monthly: *hours_monthly,
                    tip_percentage: *tip_percentage,
                };
                if upd.is_empty() {
                    warning("Nothing to change: pass at least one target.");
                    return Ok(());
                }
                let profile = ProfileLogic::set_targets(store, upd)?;
                success("Targets updated");
                print_targets(&profile, &cfg.currency_symbol);
            }
        }
    }
    Ok(())
}

fn print_targets(p: &UserProfile, sym: &str) {
    header("Targets");
    let cell = |v: f64, fmt: &dyn Fn(f64) -> String| {
        if v > 0.0 {
            fmt(v)
        } else {
            format!("{GREY}-{RESET}")
        }
    };
    let m = |v: f64| money(v, sym);
    let h = |v: f64| format!("{v:.1}h");

    println!("  {:<10} {:>12} {:>12} {:>12}", "", "Daily", "Weekly", "Monthly");
    println!(
        "  {:<10} {:>12} {:>12} {:>12}",
        "Tips",
        cell(p.target_tip_daily, &m),
        cell(p.target_tip_weekly, &m),
        cell(p.target_tip_monthly, &m)
    );
    println!(
        "  {:<10} {:>12} {:>12} {:>12}",
        "Sales",
        cell(p.target_sales_daily, &m),
        cell(p.target_sales_weekly, &m),
        cell(p.target_sales_monthly, &m)
    );
    println!(
        "  {:<10} {:>12} {:>12} {:>12}",
        "Hours",
        cell(p.target_hours_daily, &h),
        cell(p.target_hours_weekly, &h),
        cell(p.target_hours_monthly, &h)
    );
    println!(
        "  {:<10} {:>12}",
        "Tip %",
        cell(p.tip_target_percentage, &|v| percent(v, false))
    );
    println!();
}
