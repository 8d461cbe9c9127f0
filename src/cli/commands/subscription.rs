use crate::cli::parser::{Commands, SubscriptionAction};
use crate::core::subscription::{SubscriptionLogic, tier_for_product};
use crate::errors::AppResult;
use crate::store::Store;
use crate::ui::messages::{header, success};
use crate::utils::colors::{GREY, RED, RESET};
use crate::utils::date::today;

pub fn handle(cmd: &Commands, store: &dyn Store) -> AppResult<()> {
    if let Commands::Subscription { action } = cmd {
        match action {
            SubscriptionAction::Status => {
                let r = SubscriptionLogic::report(store, today())?;
                header("Subscription");
                println!("  {:<16} {}", "Tier", r.tier.as_str());
                if let Some(sub) = &r.subscription {
                    println!(
                        "  {:<16} {}",
                        "Product",
                        sub.product_id.as_deref().unwrap_or("-")
                    );
                    println!(
                        "  {:<16} {}",
                        "Status",
                        sub.status.map(|s| s.as_str()).unwrap_or("-")
                    );
                    if let Some(exp) = sub.expires_at {
                        println!("  {:<16} {}", "Expires", exp.format("%Y-%m-%d"));
                    }
                }
                println!("  {:<16} {}", "Week", r.week);
                let usage = |used: usize| match r.weekly_limit {
                    Some(limit) if used >= limit as usize => {
                        format!("{RED}{used} / {limit}{RESET}")
                    }
                    Some(limit) => format!("{used} / {limit}"),
                    None => format!("{used} {GREY}(unlimited){RESET}"),
                };
                println!("  {:<16} {}", "Shifts", usage(r.shifts_this_week));
                println!("  {:<16} {}", "Entries", usage(r.entries_this_week));
                println!();
            }
            SubscriptionAction::SetProduct { product_id } => {
                let sub = SubscriptionLogic::set_product(store, product_id)?;
                let tier = sub
                    .product_id
                    .as_deref()
                    .and_then(tier_for_product)
                    .map(|t| t.as_str())
                    .unwrap_or("none");
                success(format!("Subscription recorded: {tier}"));
            }
        }
    }
    Ok(())
}
