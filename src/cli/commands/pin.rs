use crate::cli::parser::{Commands, PinAction};
use crate::core::security::SecurityLogic;
use crate::errors::{AppError, AppResult};
use crate::store::Store;
use crate::ui::messages::{header, success, warning};

/// A wrong PIN is an error, so scripts can rely on the exit status.
pub fn handle(cmd: &Commands, store: &dyn Store) -> AppResult<()> {
    if let Commands::Pin { action } = cmd {
        match action {
            PinAction::Set { pin, auto_lock } => {
                SecurityLogic::set_pin(store, pin, *auto_lock)?;
                success("PIN set");
            }
            PinAction::Verify { pin } => {
                if SecurityLogic::verify(store, pin)? {
                    success("PIN accepted");
                } else {
                    return Err(AppError::Security("wrong PIN".into()));
                }
            }
            PinAction::Clear => {
                SecurityLogic::clear(store)?;
                success("PIN removed");
            }
            PinAction::Status => {
                let st = SecurityLogic::status(store)?;
                header("Security");
                println!("  {:<12} {}", "Type", st.security_type.as_str());
                println!("  {:<12} {}", "PIN", if st.pin_set { "set" } else { "not set" });
                let lock = if st.auto_lock_minutes == 0 {
                    "never".to_string()
                } else {
                    format!("after {} min", st.auto_lock_minutes)
                };
                println!("  {:<12} {}", "Auto-lock", lock);
                println!();
                if st.security_type.requires_pin() && !st.pin_set {
                    warning("PIN lock is enabled but no PIN is stored; run `pin set`.");
                }
            }
        }
    }
    Ok(())
}
