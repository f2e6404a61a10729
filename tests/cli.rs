use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "driverbook";

fn driverbook(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("DRIVERBOOK_DATA_DIR", data_dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run(data_dir: &TempDir, args: &[&str]) {
    driverbook(data_dir).args(args).assert().success();
}

#[test]
fn init_creates_settings_and_data_files() {
    let dir = TempDir::new().unwrap();

    driverbook(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Initialization complete!"))
        .stdout(contains("Mon, Tue, Wed, Thu, Fri, Sat"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("transactions.json").exists());
    assert!(dir.path().join("data").join("bills.json").exists());
}

#[test]
fn goal_without_bills_congratulates() {
    let dir = TempDir::new().unwrap();

    driverbook(&dir)
        .args(["goal", "--today", "2025-01-06"])
        .assert()
        .success()
        .stdout(contains("$0.00"))
        .stdout(contains("Congratulations! No pending bills."));
}

#[test]
fn goal_spreads_remaining_bill_over_working_days() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["income", "add", "100", "Morning shift", "--date", "2025-01-05"]);
    run(&dir, &["bill", "add", "Rent", "1000", "--due", "2025-01-10"]);

    // Monday 6th through Friday 10th under the default Mon..Sat schedule
    driverbook(&dir)
        .args(["goal", "--today", "2025-01-06"])
        .assert()
        .success()
        .stdout(contains("$180.00"))
        .stdout(contains("Focus: pay off Rent in 5 days."));
}

#[test]
fn workdays_change_the_goal() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["bill", "add", "Car rental", "600", "--due", "2025-01-11"]);

    driverbook(&dir)
        .args(["goal", "--today", "2025-01-06"])
        .assert()
        .success()
        .stdout(contains("$100.00"));

    driverbook(&dir)
        .args(["workdays", "set", "1,2,3,4,5"])
        .assert()
        .success()
        .stdout(contains("Mon, Tue, Wed, Thu, Fri"));

    driverbook(&dir)
        .args(["goal", "--today", "2025-01-06"])
        .assert()
        .success()
        .stdout(contains("$120.00"));
}

#[test]
fn paid_bills_no_longer_count() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["bill", "add", "Insurance", "250", "--due", "2025-02-01"]);
    run(&dir, &["bill", "pay", "insurance"]);

    driverbook(&dir)
        .args(["goal", "--today", "2025-01-20"])
        .assert()
        .success()
        .stdout(contains("Congratulations! No pending bills."));

    driverbook(&dir)
        .args(["bill", "list", "--all"])
        .assert()
        .success()
        .stdout(contains("Insurance").and(contains("paid")));
}

#[test]
fn goal_json_output() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["bill", "add", "Phone", "40", "--due", "2025-01-06"]);

    driverbook(&dir)
        .args(["goal", "--json", "--today", "2025-01-06"])
        .assert()
        .success()
        .stdout(contains("\"explanation\""))
        .stdout(contains("Focus: pay off Phone in 1 day."));
}

#[test]
fn transaction_list_shows_recorded_entries() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["income", "add", "150", "Airport run", "--km", "42", "--date", "2025-03-03"]);
    run(&dir, &["expense", "add", "60", "Gas", "--category", "fuel", "--date", "2025-03-03"]);

    driverbook(&dir)
        .args(["txn", "list", "--range", "all"])
        .assert()
        .success()
        .stdout(contains("Airport run"))
        .stdout(contains("Fuel"))
        .stdout(contains("balance $90.00"));
}

#[test]
fn expense_with_unknown_category_fails() {
    let dir = TempDir::new().unwrap();

    driverbook(&dir)
        .args(["expense", "add", "12", "Snacks", "--category", "Treats"])
        .assert()
        .failure()
        .stderr(contains("Unknown category"));
}

#[test]
fn invalid_today_is_rejected() {
    let dir = TempDir::new().unwrap();

    driverbook(&dir)
        .args(["goal", "--today", "06/01/2025"])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));
}

#[test]
fn report_exports_daily_breakdown_csv() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["income", "add", "80", "Lunch rush", "--date", "2025-03-04"]);
    let output = dir.path().join("report.csv");

    driverbook(&dir)
        .args(["report", "--from", "2025-03-01", "--to", "2025-03-31", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("Report exported to"));

    let csv = std::fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("date,income,expense"));
    assert!(csv.contains("2025-03-04,80.00,0.00"));
}

#[test]
fn history_lists_recorded_changes() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["bill", "add", "Rent", "900", "--due", "2025-04-01"]);
    run(&dir, &["bill", "toggle", "rent"]);

    driverbook(&dir)
        .args(["history", "--limit", "5"])
        .assert()
        .success()
        .stdout(contains("created bill  Rent due 2025-04-01"))
        .stdout(contains("updated bill  Rent due 2025-04-01"))
        .stdout(contains("    is_paid: false -> true"));
}

#[test]
fn editing_a_due_date_moves_the_goal() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["bill", "add", "Car rental", "600", "--due", "2025-01-11"]);

    // Monday 6th through Saturday 11th
    driverbook(&dir)
        .args(["goal", "--today", "2025-01-06"])
        .assert()
        .success()
        .stdout(contains("$100.00"));

    driverbook(&dir)
        .args(["bill", "edit", "car rental", "--due", "2025-01-08"])
        .assert()
        .success()
        .stdout(contains("Updated bill: Car rental $600.00 due 2025-01-08"));

    driverbook(&dir)
        .args(["goal", "--today", "2025-01-06"])
        .assert()
        .success()
        .stdout(contains("$200.00"))
        .stdout(contains("Focus: pay off Car rental in 3 days."));
}

#[test]
fn bill_edit_without_changes_fails() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["bill", "add", "Phone", "40", "--due", "2025-01-20"]);

    driverbook(&dir)
        .args(["bill", "edit", "phone"])
        .assert()
        .failure()
        .stderr(contains("Nothing to change"));
}

#[test]
fn shift_records_income_and_expenses_together() {
    let dir = TempDir::new().unwrap();

    driverbook(&dir)
        .args([
            "shift", "200", "Friday night", "--date", "2025-03-07", "--km", "150", "--hours", "8",
            "--expense", "45:Gas:fuel", "-e", "6.50:Tolls",
        ])
        .assert()
        .success()
        .stdout(contains("Recorded shift: $200.00 Friday night"))
        .stdout(contains("expense: $45.00 Gas (shift)"))
        .stdout(contains("expense: $6.50 Tolls (shift)"))
        .stdout(contains("Net for the shift: $148.50"));

    driverbook(&dir)
        .args(["txn", "list", "--range", "all"])
        .assert()
        .success()
        .stdout(contains("Gas (shift)"))
        .stdout(contains("balance $148.50"));
}

#[test]
fn shift_with_bad_expense_records_nothing() {
    let dir = TempDir::new().unwrap();

    driverbook(&dir)
        .args(["shift", "120", "Lunch", "--expense", "oops"])
        .assert()
        .failure()
        .stderr(contains("AMOUNT:DESCRIPTION"));

    driverbook(&dir)
        .args(["txn", "list", "--range", "all"])
        .assert()
        .success()
        .stdout(contains("Lunch").not());
}
