use crate::cli::parser::Commands;
use crate::core::import::ImportLogic;
use crate::errors::AppResult;
use crate::store::Store;
use crate::ui::messages::{success, warning};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, store: &dyn Store) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let summary = ImportLogic::from_file(store, &expand_tilde(file))?;
        success(format!(
            "Imported {} shift(s) and {} entries",
            summary.shifts, summary.entries
        ));
        if summary.skipped > 0 {
            warning(format!("{} row(s) already present were skipped", summary.skipped));
        }
    }
    Ok(())
}
