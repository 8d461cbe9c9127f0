//! Shift overlap detection.

use crate::errors::{AppError, AppResult};
use crate::models::{ExpectedShift, ShiftStatus};

/// Half-open interval test on the shifts' real start/end instants.
pub fn overlaps(a: &ExpectedShift, b: &ExpectedShift) -> bool {
    a.starts_at() < b.ends_at() && b.starts_at() < a.ends_at()
}

/// Existing shifts the candidate would collide with. Missed shifts and the
/// candidate itself (same id) are skipped.
pub fn find_overlaps<'a>(
    candidate: &ExpectedShift,
    existing: &'a [ExpectedShift],
) -> Vec<&'a ExpectedShift> {
    existing
        .iter()
        .filter(|s| s.id != candidate.id)
        .filter(|s| s.status != ShiftStatus::Missed)
        .filter(|s| overlaps(candidate, s))
        .collect()
}

pub fn ensure_no_overlap(candidate: &ExpectedShift, existing: &[ExpectedShift]) -> AppResult<()> {
    match find_overlaps(candidate, existing).first() {
        Some(other) => Err(AppError::ShiftOverlap {
            date: other.shift_date.to_string(),
            range: other.time_range(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use uuid::Uuid;

    fn shift(day: u32, start: (u32, u32), end: (u32, u32)) -> ExpectedShift {
        ExpectedShift::plan(
            Uuid::nil(),
            None,
            NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            15.0,
            0,
        )
        .unwrap()
    }

    #[test]
    fn touching_shifts_do_not_overlap() {
        let a = shift(3, (9, 0), (13, 0));
        let b = shift(3, (13, 0), (17, 0));
        assert!(!overlaps(&a, &b));
        assert!(ensure_no_overlap(&b, &[a]).is_ok());
    }

    #[test]
    fn partial_overlap_is_rejected() {
        let a = shift(3, (9, 0), (13, 0));
        let b = shift(3, (12, 0), (18, 0));
        assert!(overlaps(&a, &b));
        let err = ensure_no_overlap(&b, &[a]).unwrap_err();
        assert!(matches!(err, AppError::ShiftOverlap { .. }));
    }

    #[test]
    fn overnight_shift_reaches_into_next_day() {
        let night = shift(3, (22, 0), (2, 0));
        let early = shift(4, (1, 0), (5, 0));
        let later = shift(4, (2, 0), (6, 0));
        assert!(overlaps(&night, &early));
        assert!(!overlaps(&night, &later));
    }

    #[test]
    fn missed_and_self_are_skipped() {
        let a = shift(3, (9, 0), (13, 0));
        let mut missed = shift(3, (10, 0), (12, 0));
        missed.status = ShiftStatus::Missed;
        assert!(ensure_no_overlap(&a, &[a.clone(), missed]).is_ok());
    }
}
