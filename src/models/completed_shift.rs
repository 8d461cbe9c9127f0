use super::{Employer, ExpectedShift, ShiftEntry, ShiftStatus, non_blank};
use chrono::NaiveDate;
use serde::Serialize;

/// A planned shift joined with its entry (if worked) and its employer.
/// Read-only view used by listings, statistics and exports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletedShift {
    pub expected_shift: ExpectedShift,
    pub shift_entry: Option<ShiftEntry>,
    pub employer: Option<Employer>,
}

impl CompletedShift {
    pub fn new(
        expected_shift: ExpectedShift,
        shift_entry: Option<ShiftEntry>,
        employer: Option<Employer>,
    ) -> Self {
        Self {
            expected_shift,
            shift_entry,
            employer,
        }
    }

    /// An entry always means completed; otherwise a missed shift stays missed.
    pub fn status(&self) -> ShiftStatus {
        if self.shift_entry.is_some() {
            ShiftStatus::Completed
        } else if self.expected_shift.status == ShiftStatus::Missed {
            ShiftStatus::Missed
        } else {
            ShiftStatus::Planned
        }
    }

    pub fn is_worked(&self) -> bool {
        self.shift_entry.is_some()
    }

    pub fn shift_date(&self) -> NaiveDate {
        self.expected_shift.shift_date
    }

    pub fn total_earnings(&self) -> f64 {
        match &self.shift_entry {
            Some(e) => e.total_income(self.expected_shift.hourly_rate),
            None => self.expected_shift.expected_net_earnings(),
        }
    }

    pub fn effective_hourly_rate(&self) -> f64 {
        match &self.shift_entry {
            Some(e) => e.effective_hourly_rate(self.expected_shift.hourly_rate),
            None => self.expected_shift.hourly_rate,
        }
    }

    /// Actual hours when worked, expected hours otherwise.
    pub fn hours(&self) -> f64 {
        self.shift_entry
            .as_ref()
            .map(|e| e.actual_hours)
            .unwrap_or(self.expected_shift.expected_hours)
    }

    pub fn tips(&self) -> f64 {
        self.shift_entry.as_ref().map(|e| e.tips).unwrap_or(0.0)
    }

    pub fn sales(&self) -> f64 {
        self.shift_entry.as_ref().map(|e| e.sales).unwrap_or(0.0)
    }

    pub fn cash_out(&self) -> f64 {
        self.shift_entry.as_ref().map(|e| e.cash_out).unwrap_or(0.0)
    }

    pub fn other(&self) -> f64 {
        self.shift_entry.as_ref().map(|e| e.other).unwrap_or(0.0)
    }

    pub fn tip_percentage(&self) -> f64 {
        self.shift_entry
            .as_ref()
            .map(|e| e.tip_percentage())
            .unwrap_or(0.0)
    }

    /// hourly rate × hours
    pub fn wages(&self) -> f64 {
        self.expected_shift.hourly_rate * self.hours()
    }

    pub fn hours_variance(&self) -> Option<f64> {
        self.shift_entry
            .as_ref()
            .map(|e| e.hours_variance(self.expected_shift.expected_hours))
    }

    pub fn is_overtime(&self) -> bool {
        self.shift_entry
            .as_ref()
            .map(|e| e.is_overtime(self.expected_shift.expected_hours))
            .unwrap_or(false)
    }

    pub fn time_range(&self) -> String {
        self.expected_shift.time_range()
    }

    pub fn actual_time_range(&self) -> Option<String> {
        self.shift_entry.as_ref().map(ShiftEntry::time_range)
    }

    pub fn employer_name(&self) -> &str {
        self.employer
            .as_ref()
            .map(|e| e.name.as_str())
            .unwrap_or("Unknown Employer")
    }

    /// Entry notes first, then the planning notes. Blank notes are ignored.
    pub fn notes(&self) -> Option<&str> {
        self.shift_entry
            .as_ref()
            .and_then(|e| non_blank(&e.notes))
            .or_else(|| non_blank(&self.expected_shift.notes))
    }

    pub fn formatted_duration(&self) -> String {
        match &self.shift_entry {
            Some(e) => e.formatted_duration(),
            None => self.expected_shift.formatted_duration(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::shift_entry::Earnings;
    use chrono::NaiveTime;
    use uuid::Uuid;

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn planned() -> ExpectedShift {
        ExpectedShift::plan(
            Uuid::new_v4(),
            None,
            NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            t(9),
            t(17),
            15.0,
            0,
        )
        .unwrap()
    }

    #[test]
    fn unworked_shift_uses_expected_values() {
        let c = CompletedShift::new(planned(), None, None);
        assert_eq!(c.status(), ShiftStatus::Planned);
        assert!(!c.is_worked());
        assert_eq!(c.hours(), 8.0);
        assert_eq!(c.total_earnings(), 120.0);
        assert_eq!(c.effective_hourly_rate(), 15.0);
        assert_eq!(c.hours_variance(), None);
        assert_eq!(c.employer_name(), "Unknown Employer");
    }

    #[test]
    fn worked_shift_uses_entry_values() {
        let shift = planned();
        let mut entry = ShiftEntry::record(
            shift.id,
            shift.user_id,
            t(9),
            t(18),
            9.0,
            Earnings {
                sales: 400.0,
                tips: 80.0,
                ..Default::default()
            },
        )
        .unwrap();
        entry.notes = Some("  ".into());
        let mut shift = shift;
        shift.notes = Some("Patio section".into());

        let c = CompletedShift::new(shift, Some(entry), None);
        assert_eq!(c.status(), ShiftStatus::Completed);
        assert_eq!(c.hours(), 9.0);
        assert_eq!(c.tip_percentage(), 20.0);
        assert_eq!(c.total_earnings(), 9.0 * 15.0 + 80.0);
        assert_eq!(c.hours_variance(), Some(1.0));
        assert!(c.is_overtime());
        assert_eq!(c.notes(), Some("Patio section"));
        assert_eq!(c.actual_time_range().as_deref(), Some("09:00 - 18:00"));
    }

    #[test]
    fn missed_status_is_kept_without_entry() {
        let mut shift = planned();
        shift.status = ShiftStatus::Missed;
        let c = CompletedShift::new(shift, None, None);
        assert_eq!(c.status(), ShiftStatus::Missed);
    }
}
