use crate::cli::parser::{AchievementsAction, Commands};
use crate::core::achievements::AchievementLogic;
use crate::errors::AppResult;
use crate::store::Store;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{GREEN, GREY, RESET};
use crate::utils::date::today;

pub fn handle(cmd: &Commands, store: &dyn Store) -> AppResult<()> {
    if let Commands::Achievements { action } = cmd {
        match action {
            AchievementsAction::List => {
                header("Achievements");
                let all = AchievementLogic::list(store)?;
                for (kind, unlocked) in &all {
                    match unlocked {
                        Some(a) => println!(
                            "  {GREEN}★ {:<18}{RESET} {:<34} {GREY}{}{RESET}",
                            kind.display_name(),
                            kind.description(),
                            a.unlocked_at
                                .map(|t| t.format("%Y-%m-%d").to_string())
                                .unwrap_or_default()
                        ),
                        None => println!(
                            "  {GREY}☆ {:<18} {}{RESET}",
                            kind.display_name(),
                            kind.description()
                        ),
                    }
                }
                let n = all.iter().filter(|(_, a)| a.is_some()).count();
                println!("\n  {n} / {} unlocked\n", all.len());
            }
            AchievementsAction::Check => {
                let new = AchievementLogic::check(store, today())?;
                if new.is_empty() {
                    info("No new achievements.");
                }
                for a in &new {
                    success(format!(
                        "Unlocked {}: {}",
                        a.achievement_type.display_name(),
                        a.achievement_type.description()
                    ));
                }
            }
        }
    }
    Ok(())
}
