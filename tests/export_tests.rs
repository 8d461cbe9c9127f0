mod common;
use common::{init_db_with_data, pt, setup_test_db, temp_out};
use predicates::str::contains;
use std::fs;

#[test]
fn test_export_detailed_csv_all() {
    let db_path = setup_test_db("export_detailed_csv_all");
    init_db_with_data(&db_path);

    let out = temp_out("export_detailed_csv_all", "csv");

    pt().args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some(
            "Date,Start Time,End Time,Hours,Hourly Rate,Base Salary,Sales,Tips,Tip Out,\
             Total Revenue,Tip Percentage,Employer,Notes"
        )
    );
    assert_eq!(
        lines.next(),
        Some("2025-03-07,16:00,00:00,8.0,15.00,120.00,200.00,50.00,0.00,134.00,25.0,Unknown Employer,")
    );
    assert!(content.contains("2025-03-14"));
    assert!(content.contains("patio"));
}

#[test]
fn test_export_summary_csv_range() {
    let db_path = setup_test_db("export_summary_csv_range");
    init_db_with_data(&db_path);

    let out = temp_out("export_summary_csv_range", "csv");

    pt().args([
        "--db", &db_path, "export", "--format", "csv", "--file", &out, "--summary", "--range",
        "2025-03",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with("Period,Total Shifts,Total Hours"));
    // mean of 25% and 15%, revenue 242 over 14h
    assert!(content.contains(",2,14.0,500.00,95.00,0.00,242.00,20.0,17.29"));
}

#[test]
fn test_export_json_range_filters_shifts() {
    let db_path = setup_test_db("export_json_range");
    init_db_with_data(&db_path);

    let out = temp_out("export_json_range", "json");

    pt().args([
        "--db", &db_path, "export", "--format", "json", "--file", &out, "--range",
        "2025-03-10:2025-03-20",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array of rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["Date"], "2025-03-14");
    assert_eq!(rows[0]["Tip Percentage"], "15.0");
}

#[test]
fn test_export_xlsx_writes_workbook() {
    let db_path = setup_test_db("export_xlsx");
    init_db_with_data(&db_path);

    let out = temp_out("export_xlsx", "xlsx");

    pt().args(["--db", &db_path, "export", "--format", "xlsx", "--file", &out])
        .assert()
        .success()
        .stdout(contains("XLSX export completed"));

    let bytes = fs::read(&out).expect("read workbook");
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_export_does_not_overwrite_without_force() {
    let db_path = setup_test_db("export_overwrite");
    init_db_with_data(&db_path);

    let out = temp_out("export_overwrite", "csv");
    fs::write(&out, "keep me").expect("seed file");

    pt().args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .failure()
        .stderr(contains("not overwritten"));
    assert_eq!(fs::read_to_string(&out).expect("read"), "keep me");

    pt().args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .write_stdin("y\n")
        .assert()
        .success();
    assert!(fs::read_to_string(&out).expect("read").contains("2025-03-07"));

    fs::write(&out, "keep me").expect("seed file");
    pt().args(["--db", &db_path, "export", "--format", "csv", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).expect("read").contains("2025-03-14"));
}

#[test]
fn test_backup_plain_and_compressed() {
    let db_path = setup_test_db("backup_db");
    init_db_with_data(&db_path);

    let plain = temp_out("backup_plain", "sqlite");
    pt().args(["--db", &db_path, "backup", "--file", &plain])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(fs::metadata(&plain).expect("backup exists").len() > 0);

    let zipped = temp_out("backup_zipped", "sqlite");
    let zip_path = zipped.replace(".sqlite", ".zip");
    fs::remove_file(&zip_path).ok();
    pt().args(["--db", &db_path, "backup", "--file", &zipped, "--compress"])
        .assert()
        .success();
    assert!(fs::read(&zip_path).expect("zip exists").starts_with(b"PK"));
    assert!(!std::path::Path::new(&zipped).exists());
}

#[test]
fn test_import_legacy_dump() {
    let db_path = setup_test_db("import_legacy");
    pt().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let dump = temp_out("import_legacy", "json");
    fs::write(
        &dump,
        r#"{
            "shifts": [{
                "id": "7d1e2f30-0000-4000-8000-000000000001",
                "user_id": "7d1e2f30-0000-4000-8000-0000000000ff",
                "shift_date": "2024-11-05",
                "hours": 6,
                "hourly_rate": 12,
                "sales": 400,
                "tips": 80,
                "start_time": "17:00:00",
                "end_time": "23:00:00"
            }]
        }"#,
    )
    .expect("write dump");

    pt().args(["--db", &db_path, "import", "--file", &dump])
        .assert()
        .success()
        .stdout(contains("Imported 1 shift(s)"));

    pt().args(["--db", &db_path, "import", "--file", &dump])
        .assert()
        .success()
        .stdout(contains("Imported 0 shift(s)"))
        .stdout(contains("1 row(s) already present"));

    pt().args(["--db", &db_path, "shift", "list", "--period", "2024-11"])
        .assert()
        .success()
        .stdout(contains("2024-11-05"))
        .stdout(contains("$80.00"))
        .stdout(contains("20.0"));
}
