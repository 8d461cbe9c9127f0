//! Quick calculators: tip on a bill, tip-out share and hourly rate.

use super::income;
use crate::errors::AppResult;
use crate::models::{ensure_non_negative, ensure_percentage};

/// Tip presets offered for a bill.
pub const TIP_PRESETS: [f64; 4] = [15.0, 18.0, 20.0, 25.0];
/// Usual tip-out shares handed to support staff.
pub const TIP_OUT_PRESETS: [f64; 4] = [2.0, 2.5, 3.0, 5.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillTip {
    pub tip: f64,
    pub total: f64,
    /// 0 when nobody shares the bill
    pub per_person: f64,
}

/// Tip at `percentage` of the bill, the total, and the total split
/// between `people`.
pub fn bill_tip(bill: f64, percentage: f64, people: u32) -> AppResult<BillTip> {
    ensure_non_negative("bill", bill)?;
    ensure_non_negative("percentage", percentage)?;
    let tip = bill * percentage / 100.0;
    let total = bill + tip;
    let per_person = if people > 0 {
        total / f64::from(people)
    } else {
        0.0
    };
    Ok(BillTip {
        tip,
        total,
        per_person,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TipOut {
    pub handed_out: f64,
    pub kept: f64,
}

/// Split the night's tips into the tip-out share and what the server keeps.
pub fn tip_out(total_tips: f64, percentage: f64) -> AppResult<TipOut> {
    ensure_non_negative("tips", total_tips)?;
    ensure_percentage("percentage", percentage)?;
    let handed_out = total_tips * percentage / 100.0;
    Ok(TipOut {
        handed_out,
        kept: total_tips - handed_out,
    })
}

/// Earnings per hour; 0 for zero hours.
pub fn hourly_rate(earnings: f64, hours: f64) -> AppResult<f64> {
    ensure_non_negative("earnings", earnings)?;
    ensure_non_negative("hours", hours)?;
    Ok(income::effective_hourly_rate(earnings, hours))
}
