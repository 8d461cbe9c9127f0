use crate::cli::commands::{parse_optional_range, reference_day};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::period::DashboardPeriod;
use crate::core::calculator::targets::ProgressLevel;
use crate::core::stats::{StatsLogic, StatsReport, StatsRequest};
use crate::errors::AppResult;
use crate::store::Store;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREEN, GREY, RED, RESET, YELLOW, color_for_change};
use crate::utils::formatting::progress_bar;
use crate::utils::{money, percent};

pub fn handle(cmd: &Commands, cfg: &Config, store: &dyn Store) -> AppResult<()> {
    if let Commands::Stats {
        period,
        range,
        four_weeks_view,
        compare,
        date,
    } = cmd
    {
        let req = StatsRequest {
            period: DashboardPeriod::parse(period)?,
            range: parse_optional_range(range.as_deref())?,
            four_weeks_view: *four_weeks_view,
            compare: *compare,
            today: reference_day(date.as_deref())?,
        };
        let report = StatsLogic::report(store, &req)?;
        print_report(&report, &cfg.currency_symbol, &cfg.separator_char);
    }
    Ok(())
}

fn level_color(level: ProgressLevel) -> &'static str {
    match level {
        ProgressLevel::Met => GREEN,
        ProgressLevel::Close => CYAN,
        ProgressLevel::Halfway => YELLOW,
        ProgressLevel::Behind => RED,
    }
}

fn print_report(r: &StatsReport, sym: &str, sep: &str) {
    header(format!("{} ({})", r.period, r.range));

    let s = &r.stats;
    let line = |label: &str, value: String| println!("  {:<22} {}", label, value);

    line("Shifts", s.shift_count.to_string());
    line("Hours", format!("{:.2}", s.hours));
    line("Sales", money(s.sales, sym));
    line("Tips", money(s.tips, sym));
    line("Tip %", percent(s.tip_percentage, false));
    line("Tip out", money(s.tip_out, sym));
    line("Other", money(s.other, sym));
    line("Gross wages", money(s.income, sym));
    line("Net wages", money(s.net_salary, sym));
    line("Total revenue", money(s.total_revenue, sym));
    line("Average hourly", money(r.average_hourly, sym));
    line("Average tips / shift", money(r.average_tips_per_shift, sym));

    if let Some(best) = &r.best_shift {
        line(
            "Best shift",
            format!(
                "{} {} ({})",
                best.shift_date(),
                money(best.total_earnings(), sym),
                best.employer_name()
            ),
        );
    }

    let rule = sep.repeat(44);
    if !r.targets.is_empty() {
        println!("{GREY}{rule}{RESET}");
        println!("  Targets");
        for t in &r.targets {
            let (value, target) = match t.name {
                "sales" | "tips" => (money(t.value, sym), money(t.target, sym)),
                "tip_percentage" => (percent(t.value, false), percent(t.target, false)),
                _ => (format!("{:.2}h", t.value), format!("{:.2}h", t.target)),
            };
            println!(
                "  {:<15} {}{} {:>6.1}%{RESET}  {} / {}",
                t.name,
                level_color(t.level),
                progress_bar(t.percent, 20),
                t.percent,
                value,
                target
            );
        }
    }

    if let Some(c) = &r.comparison {
        println!("{GREY}{rule}{RESET}");
        println!("  vs {}", c.previous_range);
        for (label, change) in [
            ("Revenue", c.revenue_change),
            ("Tips", c.tips_change),
            ("Sales", c.sales_change),
            ("Hours", c.hours_change),
        ] {
            println!(
                "  {:<22} {}{}{RESET}",
                label,
                color_for_change(change),
                percent(change, true)
            );
        }
    }
    println!();
}
