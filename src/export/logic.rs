// src/export/logic.rs

use crate::core::calculator::dashboard::calculate_stats;
use crate::core::calculator::period::DateRange;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{
    ShiftExport, SummaryExport, mean_tip_percentage, shift_headers, summary_headers,
};
use crate::export::xlsx::export_xlsx;
use crate::store::Store;
use crate::ui::messages::warning;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub file: PathBuf,
    /// `None` exports every worked shift.
    pub range: Option<DateRange>,
    /// One totals row instead of one row per shift.
    pub summary: bool,
    pub force: bool,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Export the worked shifts of the range. Returns the written path.
    pub fn export(store: &dyn Store, opts: &ExportOptions) -> AppResult<PathBuf> {
        let path = opts.file.as_path();
        ensure_writable(path, opts.force)?;

        let profile = store.profile_or_default()?;
        let shifts = store.completed_shifts(opts.range)?;
        let worked: Vec<_> = shifts.into_iter().filter(|s| s.is_worked()).collect();

        if worked.is_empty() {
            warning("No worked shifts found for the selected range.");
        }

        if opts.summary {
            let stats = calculate_stats(
                &worked,
                profile.average_deduction_percentage,
                profile.default_hourly_rate,
            );
            let label = opts
                .range
                .map(|r| r.to_string())
                .unwrap_or_else(|| "All time".to_string());
            let rows = vec![SummaryExport::from_stats(
                &label,
                &stats,
                mean_tip_percentage(&worked),
            )];
            let table: Vec<Vec<String>> = rows.iter().map(SummaryExport::to_row).collect();
            write(opts.format, &rows, &summary_headers(), &table, path)?;
        } else {
            let rows: Vec<ShiftExport> = worked
                .iter()
                .filter_map(|s| {
                    ShiftExport::from_shift(
                        s,
                        profile.average_deduction_percentage,
                        profile.default_hourly_rate,
                    )
                })
                .collect();
            let table: Vec<Vec<String>> = rows.iter().map(ShiftExport::to_row).collect();
            write(opts.format, &rows, &shift_headers(), &table, path)?;
        }

        store.audit(
            "export",
            &path.display().to_string(),
            &format!(
                "{} export of {} shift(s){}",
                opts.format.as_str(),
                worked.len(),
                if opts.summary { " (summary)" } else { "" }
            ),
        )?;

        Ok(path.to_path_buf())
    }
}

fn write<T: serde::Serialize>(
    format: ExportFormat,
    rows: &[T],
    headers: &[&str],
    table: &[Vec<String>],
    path: &Path,
) -> AppResult<()> {
    match format {
        ExportFormat::Csv => export_csv(rows, headers, path),
        ExportFormat::Json => export_json(rows, path),
        ExportFormat::Xlsx => export_xlsx(headers, table, path),
    }
}
