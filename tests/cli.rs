//! End-to-end tests driving the expenser binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn expenser(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expenser").unwrap();
    cmd.env("EXPENSER_DATA_DIR", data_dir.path());
    cmd.env_remove("EXPENSER_USERNAME");
    cmd.env_remove("EXPENSER_PASSWORD");
    cmd.current_dir(data_dir.path());
    cmd
}

fn register_jane(data_dir: &TempDir) {
    expenser(data_dir)
        .args([
            "register",
            "--name",
            "Jane Doe",
            "--username",
            "jane_d",
            "--password",
            "s3cret",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registration successful"));
}

fn jane(data_dir: &TempDir) -> Command {
    let mut cmd = expenser(data_dir);
    cmd.args(["--username", "jane_d", "--password", "s3cret"]);
    cmd
}

#[test]
fn register_rejects_duplicate_username() {
    let data_dir = TempDir::new().unwrap();
    register_jane(&data_dir);

    expenser(&data_dir)
        .args([
            "register",
            "--name",
            "Other Jane",
            "--username",
            "JANE_D",
            "--password",
            "other",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn authenticated_commands_require_credentials() {
    let data_dir = TempDir::new().unwrap();
    register_jane(&data_dir);

    expenser(&data_dir)
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--username"));

    expenser(&data_dir)
        .args(["--username", "jane_d", "--password", "wrong", "summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn add_list_summary_export_round_trip() {
    let data_dir = TempDir::new().unwrap();
    register_jane(&data_dir);

    jane(&data_dir)
        .args([
            "add",
            "food",
            "--amount",
            "12.50",
            "--restaurant",
            "Diner",
            "--meal",
            "lunch",
            "--date",
            "2024-01-15",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense added successfully"));

    jane(&data_dir)
        .args([
            "add",
            "travel",
            "--amount",
            "87.50",
            "--mode",
            "train",
            "--destination",
            "Lyon",
            "--distance",
            "430",
            "--date",
            "2024-01-16",
        ])
        .assert()
        .success();

    jane(&data_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Category: Food")
                .and(predicate::str::contains("Category: Travel"))
                .and(predicate::str::contains("Total Expenses: $100.00")),
        );

    jane(&data_dir)
        .args(["list", "--category", "FOOD"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Restaurant: Diner")
                .and(predicate::str::contains("Total Expenses: $12.50")),
        );

    jane(&data_dir)
        .args(["list", "--date", "2024-01-16"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Destination: Lyon"));

    jane(&data_dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Total Expenses: $100.00")
                .and(predicate::str::contains("Food: $12.50 (12.50%)"))
                .and(predicate::str::contains("Travel: $87.50 (87.50%)")),
        );

    jane(&data_dir)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Food\nTravel"));

    let export_path = data_dir.path().join("out.csv");
    jane(&data_dir)
        .args(["export", "--output", export_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total expenses exported: 2"));

    let exported = std::fs::read_to_string(&export_path).unwrap();
    assert!(exported.starts_with("ExpenseID,UserID,Category,Amount,DateTime,Description,AdditionalInfo"));
    assert!(exported.contains("Food,12.50,2024-01-15 00:00:00,,Diner,Lunch"));
}

#[test]
fn update_preserves_id_and_rewrites_fields() {
    let data_dir = TempDir::new().unwrap();
    register_jane(&data_dir);

    let output = jane(&data_dir)
        .args([
            "add",
            "food",
            "--amount",
            "10",
            "--restaurant",
            "Diner",
            "--meal",
            "dinner",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let id = stdout
        .split("Expense ID: ")
        .nth(1)
        .and_then(|rest| rest.split(' ').next())
        .unwrap()
        .to_string();
    assert!(id.starts_with("EXP_"));

    jane(&data_dir)
        .args(["update", &id, "--amount", "25", "--restaurant", "Bistro"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense updated successfully"));

    jane(&data_dir)
        .args(["show", &id])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(&id)
                .and(predicate::str::contains("Amount: $25.00"))
                .and(predicate::str::contains("Restaurant: Bistro")),
        );
}

#[test]
fn update_missing_id_fails() {
    let data_dir = TempDir::new().unwrap();
    register_jane(&data_dir);

    jane(&data_dir)
        .args([
            "update",
            "EXP_9e107d9d4f6e4c9b8f3a2b1c0d9e8f7a",
            "--amount",
            "25",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expense not found"));
}

#[test]
fn invalid_meal_type_is_rejected() {
    let data_dir = TempDir::new().unwrap();
    register_jane(&data_dir);

    jane(&data_dir)
        .args([
            "add",
            "food",
            "--amount",
            "10",
            "--restaurant",
            "Diner",
            "--meal",
            "brunch",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Breakfast, Lunch, Dinner, Snacks"));
}

#[test]
fn users_cannot_see_each_others_expenses() {
    let data_dir = TempDir::new().unwrap();
    register_jane(&data_dir);

    expenser(&data_dir)
        .args([
            "register",
            "--name",
            "John Roe",
            "--username",
            "john_r",
            "--password",
            "s3cret",
        ])
        .assert()
        .success();

    jane(&data_dir)
        .args([
            "add",
            "generic",
            "--amount",
            "42",
            "--category",
            "Miscellaneous",
        ])
        .assert()
        .success();

    expenser(&data_dir)
        .args(["--username", "john_r", "--password", "s3cret", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."));
}
