use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{extract_id, init_db_with_data, pt, setup_test_db};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    pt().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());

    pt().args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));
}

#[test]
fn test_plan_then_record_entry() {
    let db_path = setup_test_db("cli_plan_entry");
    pt().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let out = pt()
        .args([
            "--db", &db_path, "shift", "plan", "2025-03-07", "--start", "16:00", "--end",
            "00:00", "--lunch", "30",
        ])
        .assert()
        .success()
        .stdout(contains("7h 30m"))
        .get_output()
        .stdout
        .clone();
    let shift_id = extract_id(&out);

    pt().args(["--db", &db_path, "shift", "list", "--status", "planned"])
        .assert()
        .success()
        .stdout(contains(shift_id.as_str()))
        .stdout(contains("planned"));

    pt().args([
        "--db", &db_path, "entry", "add", &shift_id, "--sales", "200", "--tips", "50",
        "--hours", "8",
    ])
    .assert()
    .success()
    .stdout(contains("tip% 25.0"))
    .stdout(contains("wages $120.00"));

    pt().args(["--db", &db_path, "shift", "list", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(contains("completed"))
        .stdout(contains("$50.00"));

    // one entry per shift
    pt().args(["--db", &db_path, "entry", "add", &shift_id, "--tips", "10"])
        .assert()
        .failure()
        .stderr(contains("already has an entry"));
}

#[test]
fn test_overlapping_shift_is_rejected() {
    let db_path = setup_test_db("cli_overlap");
    pt().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    pt().args([
        "--db", &db_path, "shift", "plan", "2025-03-07", "--start", "16:00", "--end", "00:00",
    ])
    .assert()
    .success();

    pt().args([
        "--db", &db_path, "shift", "plan", "2025-03-07", "--start", "20:00", "--end", "22:00",
    ])
    .assert()
    .failure()
    .stderr(contains("overlaps"));

    pt().args([
        "--db", &db_path, "shift", "plan", "2025-03-08", "--start", "10:00", "--end", "14:00",
    ])
    .assert()
    .success();
}

#[test]
fn test_deleting_entry_replans_shift() {
    let db_path = setup_test_db("cli_entry_delete");
    pt().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let out = pt()
        .args([
            "--db", &db_path, "entry", "quick", "2025-04-02", "--start", "09:00", "--end",
            "13:00", "--tips", "20",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&out).to_string();
    // the entry id comes last
    let entry_id = text[text.rfind("id=").expect("entry id") + 3..][..36].to_string();

    pt().args(["--db", &db_path, "entry", "delete", &entry_id])
        .assert()
        .success()
        .stdout(contains("planned again"));

    pt().args(["--db", &db_path, "shift", "list", "--status", "planned"])
        .assert()
        .success()
        .stdout(contains("2025-04-02"));
}

#[test]
fn test_stats_for_month() {
    let db_path = setup_test_db("cli_stats_month");
    init_db_with_data(&db_path);

    // 8h + 6h at 15/h, 30% deduction: net 147, tips 95
    pt().args([
        "--db", &db_path, "stats", "--period", "month", "--date", "2025-03-20",
    ])
    .assert()
    .success()
    .stdout(contains("2025-03-01"))
    .stdout(contains("$500.00"))
    .stdout(contains("$95.00"))
    .stdout(contains("$242.00"))
    .stdout(contains("19.0%"));

    pt().args(["--db", &db_path, "stats", "--range", "2025-03-14"])
        .assert()
        .success()
        .stdout(contains("Custom"))
        .stdout(contains("$300.00"))
        .stdout(contains("$500.00").not());
}

#[test]
fn test_stats_compare_with_previous_period() {
    let db_path = setup_test_db("cli_stats_compare");
    init_db_with_data(&db_path);

    pt().args([
        "--db", &db_path, "stats", "--period", "week", "--date", "2025-03-14", "--compare",
    ])
    .assert()
    .success()
    .stdout(contains("vs 2025-03-02"))
    .stdout(contains("Revenue"));
}

#[test]
fn test_targets_and_profile() {
    let db_path = setup_test_db("cli_targets");
    pt().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    pt().args(["--db", &db_path, "targets", "show"])
        .assert()
        .success()
        .stdout(contains("$100.00"))
        .stdout(contains("$2,000.00"));

    pt().args([
        "--db", &db_path, "targets", "set", "--sales-daily", "800", "--hours-weekly", "32",
    ])
    .assert()
    .success()
    .stdout(contains("$800.00"))
    .stdout(contains("32.0h"));

    pt().args([
        "--db", &db_path, "profile", "set", "--rate", "18.5", "--week-start", "1",
        "--language", "fr",
    ])
    .assert()
    .success()
    .stdout(contains("$18.50"))
    .stdout(contains("Monday"))
    .stdout(contains("fr"));

    pt().args(["--db", &db_path, "profile", "set", "--week-start", "9"])
        .assert()
        .failure()
        .stderr(contains("Week start"));
}

#[test]
fn test_pin_lifecycle() {
    let db_path = setup_test_db("cli_pin");
    pt().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    pt().args(["--db", &db_path, "pin", "set", "12"])
        .assert()
        .failure();

    pt().args(["--db", &db_path, "pin", "set", "4321"])
        .assert()
        .success();

    pt().args(["--db", &db_path, "pin", "verify", "4321"])
        .assert()
        .success()
        .stdout(contains("PIN accepted"));

    pt().args(["--db", &db_path, "pin", "verify", "0000"])
        .assert()
        .failure()
        .stderr(contains("wrong PIN"));

    pt().args(["--db", &db_path, "pin", "status"])
        .assert()
        .success()
        .stdout(contains("pin"))
        .stdout(contains("set"));

    pt().args(["--db", &db_path, "pin", "clear"])
        .assert()
        .success();

    pt().args(["--db", &db_path, "pin", "verify", "4321"])
        .assert()
        .failure()
        .stderr(contains("no PIN"));
}

#[test]
fn test_part_time_weekly_limit() {
    let db_path = setup_test_db("cli_part_time");
    pt().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    pt().args([
        "--db",
        &db_path,
        "subscription",
        "set-product",
        "com.protip365.parttime.monthly",
    ])
    .assert()
    .success()
    .stdout(contains("part_time"));

    // week of Sunday 2025-03-02
    for day in ["2025-03-03", "2025-03-04", "2025-03-05"] {
        pt().args([
            "--db", &db_path, "shift", "plan", day, "--start", "10:00", "--end", "14:00",
        ])
        .assert()
        .success();
    }

    pt().args([
        "--db", &db_path, "shift", "plan", "2025-03-06", "--start", "10:00", "--end", "14:00",
    ])
    .assert()
    .failure()
    .stderr(contains("limit reached"));

    // the next week is free again
    pt().args([
        "--db", &db_path, "shift", "plan", "2025-03-10", "--start", "10:00", "--end", "14:00",
    ])
    .assert()
    .success();

    pt().args(["--db", &db_path, "subscription", "set-product", "com.example.other"])
        .assert()
        .failure()
        .stderr(contains("Unknown product id"));
}

#[test]
fn test_employer_rate_is_used_for_shifts() {
    let db_path = setup_test_db("cli_employer");
    pt().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let out = pt()
        .args([
            "--db", &db_path, "employer", "add", "Main St Diner", "--rate", "20", "--color",
            "#FF8000",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let employer_id = extract_id(&out);

    pt().args([
        "--db", &db_path, "entry", "quick", "2025-05-01", "--start", "10:00", "--end", "14:00",
        "--employer", &employer_id,
    ])
    .assert()
    .success()
    .stdout(contains("wages $80.00"));

    pt().args(["--db", &db_path, "employer", "deactivate", &employer_id])
        .assert()
        .success();

    pt().args(["--db", &db_path, "employer", "list"])
        .assert()
        .success()
        .stdout(contains("No employers"));

    pt().args(["--db", &db_path, "employer", "list", "--all"])
        .assert()
        .success()
        .stdout(contains("Main St Diner"));

    pt().args(["--db", &db_path, "shift", "list", "--period", "2025-05"])
        .assert()
        .success()
        .stdout(contains("Main St Diner"));
}

#[test]
fn test_alerts_check_is_idempotent() {
    let db_path = setup_test_db("cli_alerts");
    pt().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    pt().args([
        "--db", &db_path, "shift", "plan", "2025-06-09", "--start", "10:00", "--end", "14:00",
    ])
    .assert()
    .success();

    pt().args(["--db", &db_path, "alerts", "check", "--date", "2025-06-10"])
        .assert()
        .success()
        .stdout(contains("Shift without entry"));

    pt().args(["--db", &db_path, "alerts", "check", "--date", "2025-06-10"])
        .assert()
        .success()
        .stdout(contains("No new alerts"));

    pt().args(["--db", &db_path, "alerts", "list", "--unread"])
        .assert()
        .success()
        .stdout(contains("incomplete_shift"));

    pt().args(["--db", &db_path, "alerts", "read"])
        .assert()
        .success()
        .stdout(contains("1 alert(s) marked as read"));

    pt().args(["--db", &db_path, "alerts", "list", "--unread"])
        .assert()
        .success()
        .stdout(contains("No alerts"));

    // an age past the calendar's start matches nothing
    pt().args(["--db", &db_path, "alerts", "purge", "--days", "4000000000"])
        .assert()
        .success()
        .stdout(contains("0 alert(s) older than 4000000000 day(s) removed"));
}

#[test]
fn test_achievements_list_and_check() {
    let db_path = setup_test_db("cli_achievements");
    init_db_with_data(&db_path);

    pt().args(["--db", &db_path, "achievements", "list"])
        .assert()
        .success()
        .stdout(contains("Tip Master"))
        .stdout(contains("0 / 12 unlocked"));

    // 500 in sales is below the Sales Star threshold
    pt().args(["--db", &db_path, "achievements", "check"])
        .assert()
        .success()
        .stdout(contains("Sales Star").not());
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("cli_log");
    init_db_with_data(&db_path);

    pt().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("shift_plan"))
        .stdout(contains("entry_add"));
}

#[test]
fn test_bad_input_is_reported() {
    let db_path = setup_test_db("cli_bad_input");
    pt().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    pt().args([
        "--db", &db_path, "shift", "plan", "2025-02-30", "--start", "10:00", "--end", "14:00",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid date"));

    pt().args(["--db", &db_path, "shift", "delete", "not-a-uuid"])
        .assert()
        .failure()
        .stderr(contains("Invalid identifier"));

    pt().args([
        "--db",
        &db_path,
        "shift",
        "delete",
        "00000000-0000-0000-0000-000000000001",
    ])
    .assert()
    .failure()
    .stderr(contains("not found"));
}

#[test]
fn test_calc_tip_tip_out_and_hourly() {
    pt().args(["calc", "tip", "100", "--percent", "18", "--split", "3"])
        .assert()
        .success()
        .stdout(contains("$18.00"))
        .stdout(contains("$118.00"))
        .stdout(contains("Per person (3)"))
        .stdout(contains("$39.33"));

    pt().args(["calc", "tip", "50"])
        .assert()
        .success()
        .stdout(contains("15.0%"))
        .stdout(contains("25.0%"))
        .stdout(contains("$62.50"));

    pt().args(["calc", "tip-out", "200", "--percent", "3"])
        .assert()
        .success()
        .stdout(contains("$6.00"))
        .stdout(contains("$194.00"));

    pt().args(["calc", "hourly", "250", "10"])
        .assert()
        .success()
        .stdout(contains("Hourly rate: $25.00/h"));

    pt().args(["calc", "tip-out", "200", "--percent", "120"])
        .assert()
        .failure()
        .stderr(contains("Validation failed"));

    pt().args(["calc", "tip", "100", "--split", "0"])
        .assert()
        .failure();
}
