use chrono::{NaiveDate, NaiveTime};
use protip365::core::alerts::AlertLogic;
use protip365::core::calculator::period::{DashboardPeriod, DateRange};
use protip365::core::entry::{EntryLogic, EntryRequest};
use protip365::core::import::{ImportLogic, LegacyDump};
use protip365::core::security::SecurityLogic;
use protip365::core::shift::{PlanRequest, ShiftLogic};
use protip365::core::stats::{StatsLogic, StatsRequest};
use protip365::models::shift_entry::Earnings;
use protip365::models::{Achievement, AchievementType, AlertType, ShiftStatus};
use protip365::store::{
    AchievementRepository, AlertRepository, ProfileRepository, ShiftRepository, Store,
};
use protip365::store::local::LocalStore;
use std::env;
use std::fs;
use uuid::Uuid;

fn open_store(name: &str) -> LocalStore {
    let path = env::temp_dir().join(format!("{name}_workflow.sqlite"));
    fs::remove_file(&path).ok();
    LocalStore::open(&path.to_string_lossy(), Uuid::new_v4()).expect("open local store")
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

#[test]
fn planned_shift_with_entry_feeds_the_dashboard() {
    let store = open_store("dashboard");

    let shift = ShiftLogic::plan(
        &store,
        PlanRequest {
            date: Some(date("2025-03-07")),
            start: Some(time("16:00")),
            end: Some(time("00:00")),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(shift.status, ShiftStatus::Planned);
    assert_eq!(shift.expected_hours, 8.0);

    EntryLogic::add(
        &store,
        shift.id,
        EntryRequest {
            earnings: Earnings {
                sales: 200.0,
                tips: 50.0,
                ..Default::default()
            },
            ..Default::default()
        },
    )
    .unwrap();

    let stored = store.get_expected_shift(shift.id).unwrap().unwrap();
    assert_eq!(stored.status, ShiftStatus::Completed);

    let report = StatsLogic::report(
        &store,
        &StatsRequest {
            period: DashboardPeriod::Custom,
            range: Some(DateRange::new(date("2025-03-01"), date("2025-03-31"))),
            four_weeks_view: false,
            compare: false,
            today: date("2025-03-31"),
        },
    )
    .unwrap();

    let s = &report.stats;
    assert_eq!(s.shift_count, 1);
    assert!((s.income - 120.0).abs() < 1e-9);
    assert!((s.net_salary - 84.0).abs() < 1e-9);
    assert!((s.tip_percentage - 25.0).abs() < 1e-9);
    assert!((s.total_revenue - 134.0).abs() < 1e-9);
}

#[test]
fn legacy_dump_imports_once() {
    let store = open_store("legacy_import");

    let json = r#"[
        {"id": "0b8f0c1e-0000-4000-8000-000000000001", "user_id": "0b8f0c1e-0000-4000-8000-0000000000aa",
         "shift_date": "2025-02-03", "hours": 6, "hourly_rate": 14, "sales": 300, "tips": 60},
        {"id": "0b8f0c1e-0000-4000-8000-000000000002", "user_id": "0b8f0c1e-0000-4000-8000-0000000000aa",
         "shift_date": "2025-02-04", "hours": 5, "sales": 0, "tips": 20}
    ]"#;

    let first = ImportLogic::apply(&store, LegacyDump::parse(json).unwrap()).unwrap();
    assert_eq!(first.shifts, 2);
    assert_eq!(first.skipped, 0);

    let again = ImportLogic::apply(&store, LegacyDump::parse(json).unwrap()).unwrap();
    assert_eq!(again.shifts, 0);
    assert_eq!(again.skipped, 2);

    let shifts = store
        .completed_shifts(Some(DateRange::new(date("2025-02-01"), date("2025-02-28"))))
        .unwrap();
    assert_eq!(shifts.len(), 2);
    assert!(
        shifts
            .iter()
            .all(|s| s.expected_shift.user_id == store.user_id())
    );
}

#[test]
fn pin_lifecycle_keeps_only_a_hash() {
    let store = open_store("pin");

    SecurityLogic::set_pin(&store, "4321", Some(5)).unwrap();
    let profile = store.profile_or_default().unwrap();
    let hash = profile.pin_code_hash.clone().unwrap();
    assert_ne!(hash, "4321");
    assert_eq!(hash.len(), 64);

    assert!(SecurityLogic::verify(&store, "4321").unwrap());
    assert!(!SecurityLogic::verify(&store, "1111").unwrap());

    let status = SecurityLogic::status(&store).unwrap();
    assert!(status.pin_set);
    assert_eq!(status.auto_lock_minutes, 5);

    SecurityLogic::clear(&store).unwrap();
    assert!(!SecurityLogic::status(&store).unwrap().pin_set);
    assert!(SecurityLogic::verify(&store, "4321").is_err());
}

#[test]
fn alert_check_raises_missing_shift_once() {
    let store = open_store("alerts");
    let today = date("2025-03-09");

    let created = AlertLogic::check(&store, today).unwrap();
    assert!(
        created
            .iter()
            .any(|a| a.alert_type == AlertType::MissingShift)
    );

    let again = AlertLogic::check(&store, today).unwrap();
    assert!(again.is_empty());

    assert_eq!(AlertLogic::read(&store, None).unwrap(), created.len());
    assert_eq!(store.unread_alert_count().unwrap(), 0);
}

#[test]
fn four_week_view_keeps_monthly_targets_without_weekly_ones() {
    let store = open_store("four_week_targets");
    let mut profile = store.profile_or_default().unwrap();
    profile.target_sales_monthly = 4000.0;
    profile.target_sales_weekly = 0.0;
    store.upsert_profile(&profile).unwrap();

    let report = StatsLogic::report(
        &store,
        &StatsRequest {
            period: DashboardPeriod::Month,
            range: None,
            four_weeks_view: true,
            compare: false,
            today: date("2025-03-19"),
        },
    )
    .unwrap();

    assert_eq!(report.period, DashboardPeriod::FourWeeks);
    let sales = report
        .targets
        .iter()
        .find(|t| t.name == "sales")
        .expect("sales target present");
    assert_eq!(sales.target, 4000.0);
}

#[test]
fn imported_rows_without_rate_use_the_profile_default() {
    let store = open_store("legacy_default_rate");

    let json = r#"[{"id": "0b8f0c1e-0000-4000-8000-000000000010",
        "user_id": "0b8f0c1e-0000-4000-8000-0000000000aa",
        "shift_date": "2025-02-10", "hours": 8, "sales": 200, "tips": 50}]"#;
    ImportLogic::apply(&store, LegacyDump::parse(json).unwrap()).unwrap();

    let shifts = store
        .completed_shifts(Some(DateRange::new(date("2025-02-10"), date("2025-02-10"))))
        .unwrap();
    let profile = store.profile_or_default().unwrap();
    let stats = protip365::core::calculator::dashboard::calculate_stats(
        &shifts,
        profile.average_deduction_percentage,
        profile.default_hourly_rate,
    );
    // 8h at the default 15/h, 30% deduction, plus 50 tips
    assert!((stats.income - 120.0).abs() < 1e-9);
    assert!((stats.total_revenue - 134.0).abs() < 1e-9);
}

#[test]
fn legacy_row_with_absurd_hours_is_rejected() {
    let store = open_store("legacy_absurd_hours");
    let json = r#"[{"id": "0b8f0c1e-0000-4000-8000-000000000011",
        "user_id": "0b8f0c1e-0000-4000-8000-0000000000aa",
        "shift_date": "2025-02-11", "hours": 1e300}]"#;
    let err = ImportLogic::apply(&store, LegacyDump::parse(json).unwrap()).unwrap_err();
    assert!(err.to_string().contains("Validation failed"));
}

#[test]
fn purging_with_a_huge_age_removes_nothing() {
    let store = open_store("purge_huge_age");
    AlertLogic::check(&store, date("2025-03-09")).unwrap();
    let before = store.list_alerts(false).unwrap().len();
    assert!(before > 0);

    assert_eq!(store.delete_alerts_older_than(u32::MAX).unwrap(), 0);
    assert_eq!(store.list_alerts(false).unwrap().len(), before);
}

#[test]
fn unlocking_twice_returns_the_stored_achievement() {
    let store = open_store("unlock_twice");
    let first = store
        .unlock_achievement(&Achievement::unlock(
            store.user_id(),
            AchievementType::SalesStar,
            None,
        ))
        .unwrap();
    let again = store
        .unlock_achievement(&Achievement::unlock(
            store.user_id(),
            AchievementType::SalesStar,
            None,
        ))
        .unwrap();
    assert_eq!(again.id, first.id);
    assert_eq!(store.list_achievements().unwrap().len(), 1);
}
