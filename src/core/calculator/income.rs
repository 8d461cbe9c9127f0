//! Per-shift income formulas.

/// Wages before deductions.
pub fn gross(hours: f64, hourly_rate: f64) -> f64 {
    hours * hourly_rate
}

/// Wages after the deduction percentage is taken out.
pub fn net_salary(gross: f64, deduction_percentage: f64) -> f64 {
    gross * (1.0 - deduction_percentage / 100.0)
}

/// net salary + tips + other - cash_out
pub fn total_income(net_salary: f64, tips: f64, other: f64, cash_out: f64) -> f64 {
    net_salary + tips + other - cash_out
}

/// tips / sales × 100. Zero sales (or a non-finite ratio) yields 0.
pub fn tip_percentage(tips: f64, sales: f64) -> f64 {
    if sales <= 0.0 {
        return 0.0;
    }
    let pct = tips / sales * 100.0;
    if pct.is_finite() { pct } else { 0.0 }
}

pub fn effective_hourly_rate(total: f64, hours: f64) -> f64 {
    if hours > 0.0 { total / hours } else { 0.0 }
}

/// Income figures frozen on a shift entry when it is recorded, so later
/// rate or deduction changes do not rewrite history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncomeSnapshot {
    pub hourly_rate: f64,
    pub gross_income: f64,
    pub total_income: f64,
    pub net_income: f64,
    pub deduction_percentage: f64,
}

impl IncomeSnapshot {
    pub fn compute(
        hours: f64,
        hourly_rate: f64,
        tips: f64,
        other: f64,
        cash_out: f64,
        deduction_percentage: f64,
    ) -> Self {
        let gross_income = gross(hours, hourly_rate);
        let total_income = gross_income + tips + other - cash_out;
        let net_income = total_income - gross_income * (deduction_percentage / 100.0);
        Self {
            hourly_rate,
            gross_income,
            total_income,
            net_income,
            deduction_percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_hours_at_fifteen() {
        let g = gross(8.0, 15.0);
        assert_eq!(g, 120.0);
        assert!((net_salary(g, 30.0) - 84.0).abs() < 1e-9);
        assert_eq!(tip_percentage(50.0, 200.0), 25.0);
    }

    #[test]
    fn total_income_adds_tips_and_other_minus_tip_out() {
        let net = net_salary(100.0, 20.0);
        assert!((total_income(net, 40.0, 5.0, 10.0) - 115.0).abs() < 1e-9);
    }

    #[test]
    fn zero_sales_or_hours_never_divide() {
        assert_eq!(tip_percentage(50.0, 0.0), 0.0);
        assert_eq!(tip_percentage(0.0, 0.0), 0.0);
        assert_eq!(tip_percentage(f64::NAN, 10.0), 0.0);
        assert_eq!(effective_hourly_rate(100.0, 0.0), 0.0);
        assert_eq!(effective_hourly_rate(100.0, 4.0), 25.0);
    }

    #[test]
    fn snapshot_keeps_gross_total_and_net_apart() {
        let s = IncomeSnapshot::compute(8.0, 15.0, 50.0, 0.0, 10.0, 30.0);
        assert_eq!(s.gross_income, 120.0);
        assert_eq!(s.total_income, 160.0);
        assert!((s.net_income - 124.0).abs() < 1e-9);
        assert_eq!(s.deduction_percentage, 30.0);
    }
}
