use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fintrack(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fintrack").unwrap();
    cmd.env("FINTRACK_DATA_DIR", data_dir.path());
    cmd
}

#[test]
fn test_init_creates_settings() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("transactions.json").exists());
}

#[test]
fn test_transaction_add_and_list() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["transaction", "add", "expense", "Food", "45.50", "Farmers market"])
        .args(["--date", "2025-03-14"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded txn-"));

    fintrack(&dir)
        .args(["transaction", "list", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Farmers market"))
        .stdout(predicate::str::contains("-$45.50"));

    fintrack(&dir)
        .args(["transaction", "totals", "--kind", "expense"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$45.50"));
}

#[test]
fn test_income_category_rejected_for_expense() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["transaction", "add", "expense", "Salary", "10", "Wrong category"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn test_budget_progress() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["budget", "set", "Food", "600", "--month", "2025-03"])
        .assert()
        .success();
    fintrack(&dir)
        .args(["transaction", "add", "expense", "Food", "550", "Groceries"])
        .args(["--date", "2025-03-10"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["budget", "progress", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("91.67%"))
        .stdout(predicate::str::contains("near limit"))
        .stdout(predicate::str::contains("close to exceeding your budget in: Food"));

    fintrack(&dir)
        .args(["budget", "set", "food", "100", "--month", "2025-03"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_goal_contribute() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["goal", "add", "Emergency Fund", "1000", "2099-01-01"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["goal", "contribute", "emergency fund", "250"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$250.00 of $1000.00 saved (25%)"));

    fintrack(&dir)
        .args(["goal", "contribute", "Emergency Fund", "800"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the remaining goal amount"));

    fintrack(&dir)
        .args(["goal", "show", "Emergency Fund"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remaining:   $750.00"));
}

#[test]
fn test_goal_in_the_past_rejected() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["goal", "add", "Old Plan", "100", "2000-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be in the future"));
}

#[test]
fn test_config_set_and_show() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["config", "set", "currency_symbol", "€"])
        .assert()
        .success();

    fintrack(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"currency_symbol:\s+€").unwrap());

    fintrack(&dir)
        .args(["config", "set", "page_size", "0"])
        .assert()
        .failure();
}

#[test]
fn test_audit_log() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["transaction", "add", "income", "Salary", "3000", "March salary"])
        .assert()
        .success();

    fintrack(&dir)
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Transaction"))
        .stdout(predicate::str::contains("March salary"));
}

#[test]
fn test_export_transactions_csv() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("txns.csv");

    fintrack(&dir)
        .args(["transaction", "add", "income", "Salary", "3000", "March salary"])
        .args(["--date", "2025-03-01"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["export", "transactions"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 transactions"));

    let csv = std::fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("ID,Date,Type,Category,Description,Amount"));
    assert!(csv.contains("2025-03-01,income,Salary,March salary,3000.00"));
}

#[test]
fn test_dashboard_runs_on_empty_data() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["dashboard", "--month", "2025-06"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dashboard: Jun 2025"))
        .stdout(predicate::str::contains("No budgets set for this month."));
}

#[test]
fn test_report_trends_json() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["transaction", "add", "income", "Salary", "3000", "May salary"])
        .args(["--date", "2025-05-01"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["report", "trends", "--months", "2", "--end", "2025-05", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Apr 2025\""))
        .stdout(predicate::str::contains("\"Income\""))
        .stdout(predicate::str::contains("3000.0"));
}

#[test]
fn test_report_trends_rejects_oversized_window() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["report", "trends", "--months", "100000"])
        .assert()
        .failure();

    fintrack(&dir)
        .args(["config", "set", "trend_months", "5000"])
        .assert()
        .failure();
}

#[test]
fn test_config_rejects_time_only_date_format() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir).arg("init").assert().success();
    fintrack(&dir)
        .args(["config", "set", "date_format", "%H:%M"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("date_format"));

    fintrack(&dir)
        .args(["transaction", "add", "expense", "Food", "12.50", "Lunch"])
        .assert()
        .success();
    fintrack(&dir)
        .args(["transaction", "list"])
        .assert()
        .success();
}
