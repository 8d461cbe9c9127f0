use crate::cli::commands::parse_optional_range;
use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportOptions};
use crate::store::Store;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, store: &dyn Store) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        summary,
        force,
    } = cmd
    {
        let opts = ExportOptions {
            format: *format,
            file: expand_tilde(file),
            range: parse_optional_range(range.as_deref())?,
            summary: *summary,
            force: *force,
        };
        ExportLogic::export(store, &opts)?;
    }
    Ok(())
}
