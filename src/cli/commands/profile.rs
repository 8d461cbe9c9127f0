use crate::cli::commands::parse_optional_id;
use crate::cli::parser::{Commands, ProfileAction};
use crate::config::Config;
use crate::core::profile::{ProfileLogic, ProfileUpdate};
use crate::core::subscription::SubscriptionLogic;
use crate::errors::{AppError, AppResult};
use crate::models::{Language, UserProfile};
use crate::store::Store;
use crate::ui::messages::{header, success};
use crate::utils::money;

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub fn handle(cmd: &Commands, cfg: &Config, store: &dyn Store) -> AppResult<()> {
    if let Commands::Profile { action } = cmd {
        match action {
            ProfileAction::Show => {
                let profile = store.profile_or_default()?;
                print_profile(store, cfg, &profile)?;
            }
            ProfileAction::Set {
                name,
                rate,
                week_start,
                deduction,
                language,
                alert,
                multiple_employers,
                default_employer,
                auto_lock,
            } => {
                let preferred_language = language
                    .as_deref()
                    .map(|l| {
                        Language::from_db_str(&l.to_lowercase()).ok_or_else(|| {
                            AppError::Validation(format!("Unknown language '{l}' (en, fr, es)"))
                        })
                    })
                    .transpose()?;
                let upd = ProfileUpdate {
                    name: name.clone(),
                    default_hourly_rate: *rate,
                    week_start: *week_start,
                    average_deduction_percentage: *deduction,
                    preferred_language,
                    default_alert_minutes: *alert,
                    use_multiple_employers: *multiple_employers,
                    default_employer_id: parse_optional_id(default_employer.as_deref())?,
                    auto_lock_minutes: *auto_lock,
                };
                let profile = ProfileLogic::update(store, upd)?;
                success("Profile updated");
                print_profile(store, cfg, &profile)?;
            }
        }
    }
    Ok(())
}

fn print_profile(store: &dyn Store, cfg: &Config, p: &UserProfile) -> AppResult<()> {
    header("Profile");
    let line = |label: &str, value: String| println!("  {:<22} {}", label, value);

    line("User id", p.user_id.to_string());
    line("Backend", store.backend_name().to_string());
    line("Name", p.name.clone().unwrap_or_else(|| "-".into()));
    line(
        "Default hourly rate",
        money(p.default_hourly_rate, &cfg.currency_symbol),
    );
    line(
        "Week starts on",
        WEEKDAYS
            .get(p.week_start as usize)
            .copied()
            .unwrap_or("?")
            .to_string(),
    );
    line("Deduction", format!("{:.1}%", p.average_deduction_percentage));
    line("Language", p.preferred_language.as_str().to_string());
    line(
        "Default alert",
        p.default_alert_minutes
            .map(|m| format!("{m} min"))
            .unwrap_or_else(|| "off".into()),
    );
    line(
        "Multiple employers",
        if p.use_multiple_employers { "yes" } else { "no" }.to_string(),
    );
    let employer = match p.default_employer_id {
        Some(id) => store
            .get_employer(id)?
            .map(|e| e.name)
            .unwrap_or_else(|| id.to_string()),
        None => "-".into(),
    };
    line("Default employer", employer);
    line(
        "Subscription",
        SubscriptionLogic::effective_tier(store)?.as_str().to_string(),
    );
    line("Security", p.security_type.as_str().to_string());
    println!();
    Ok(())
}
