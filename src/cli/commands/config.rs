use crate::config::{Config, migrate};
use crate::errors::AppResult;

use crate::cli::parser::Commands;
use crate::ui::messages::{error, info, success, warning};
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate: run_migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration:\n");
            let mut shown = cfg.clone();
            if shown.access_token.is_some() {
                shown.access_token = Some("********".into());
            }
            println!("{}", serde_yaml::to_string(&shown)?);
        }

        if *check {
            if !path.exists() {
                warning(format!(
                    "No configuration file at {} (run `protip365 init`)",
                    path.display()
                ));
            } else {
                let missing = migrate::missing_keys(&path)?;
                if missing.is_empty() {
                    success("Configuration file is complete.");
                } else {
                    warning(format!("Missing fields: {}", missing.join(", ")));
                    info("Run `protip365 config --migrate` to add them.");
                }
            }
            if cfg.backend == crate::config::Backend::Remote {
                for problem in cfg.remote_problems() {
                    warning(format!("Remote backend: {problem}"));
                }
            }
        }

        if *run_migrate {
            if !path.exists() {
                warning(format!(
                    "No configuration file at {} (run `protip365 init`)",
                    path.display()
                ));
            } else {
                let added = migrate::fill_missing_keys(&path)?;
                if added.is_empty() {
                    info("Configuration already up to date.");
                } else {
                    success(format!("Added fields: {}", added.join(", ")));
                }
            }
        }

        if *edit_config {
            let requested_editor = editor.clone();

            let default_editor = std::env::var("EDITOR")
                .or_else(|_| std::env::var("VISUAL"))
                .unwrap_or_else(|_| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });

            let editor_to_use = requested_editor.unwrap_or_else(|| default_editor.clone());

            let status = Command::new(&editor_to_use).arg(&path).status();

            match status {
                Ok(s) if s.success() => {
                    success(format!(
                        "Configuration file edited successfully using '{}'",
                        editor_to_use
                    ));
                }
                Ok(_) | Err(_) => {
                    warning(format!(
                        "Editor '{}' not available, falling back to '{}'",
                        editor_to_use, default_editor
                    ));

                    let fallback_status = Command::new(&default_editor).arg(&path).status();
                    match fallback_status {
                        Ok(s) if s.success() => {
                            success(format!(
                                "Configuration file edited successfully using fallback '{}'",
                                default_editor
                            ));
                        }
                        Ok(_) | Err(_) => {
                            error(format!(
                                "Failed to edit configuration file using fallback '{}'",
                                default_editor
                            ));
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
