use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A salon command with HOME pointed at a scratch directory.
fn salon(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("salon").expect("bin");
    cmd.env("HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("SALON_PASSWORD")
        .env_remove("SALON_LOG");
    cmd
}

fn initialized() -> TempDir {
    let home = TempDir::new().expect("tempdir");
    let data = home.path().join("data");
    salon(home.path())
        .args(["init", "--data-dir"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized salon at"))
        .stdout(predicate::str::contains("maria@different.com"));
    home
}

#[test]
fn init_writes_settings_and_snapshot() {
    let home = initialized();
    assert!(home.path().join(".config/salon/settings.json").exists());
    let snapshot = fs::read_to_string(home.path().join("data/salon.json")).expect("snapshot");
    assert!(snapshot.contains("\"empleadas\""));
    assert!(snapshot.contains("\"transacciones\""));

    salon(home.path())
        .args(["init", "--data-dir"])
        .arg(home.path().join("data"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Using existing data"));
}

#[test]
fn status_needs_no_login() {
    let home = initialized();
    salon(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Employees:     5 (5 active)"))
        .stdout(predicate::str::contains("Services:      3"));
}

#[test]
fn gated_command_without_user_fails() {
    let home = initialized();
    salon(home.path())
        .arg("dashboard")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Login required for /dashboard"));
}

#[test]
fn wrong_password_is_rejected() {
    let home = initialized();
    salon(home.path())
        .args(["dashboard", "--user", "maria@different.com"])
        .env("SALON_PASSWORD", "nope")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email or password"));
}

#[test]
fn admin_dashboard_for_january() {
    let home = initialized();
    salon(home.path())
        .args(["dashboard", "--month", "2024-01", "--user", "maria@different.com"])
        .env("SALON_PASSWORD", "admin123")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total income"))
        .stdout(predicate::str::contains("$ 310"))
        .stdout(predicate::str::contains("Popular Services"));
}

#[test]
fn staff_is_redirected_from_balance_to_services() {
    let home = initialized();
    salon(home.path())
        .args(["balance", "--user", "ana@different.com"])
        .env("SALON_PASSWORD", "ana123")
        .assert()
        .success()
        .stdout(predicate::str::contains("Access denied to /balance"))
        .stdout(predicate::str::contains("/servicio"));
}

#[test]
fn half_custom_range_is_an_error() {
    let home = initialized();
    salon(home.path())
        .args(["balance", "--from", "2024-01-01", "--user", "maria@different.com"])
        .env("SALON_PASSWORD", "admin123")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--from requires --to"));
}

#[test]
fn balance_for_january_shows_totals_and_ledger() {
    let home = initialized();
    salon(home.path())
        .args(["balance", "--month", "2024-01", "--kind", "expense", "--user", "maria@different.com"])
        .env("SALON_PASSWORD", "admin123")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total expenses"))
        .stdout(predicate::str::contains("Productos de coloración"))
        .stdout(predicate::str::contains("Corte y Peinado").not());
}

#[test]
fn staff_service_is_persisted_under_their_id() {
    let home = initialized();
    salon(home.path())
        .args([
            "services", "add", "--date", "2024-02-01", "--kind", "corte", "--price", "50",
            "--client", "Paula Gil", "--user", "ana@different.com",
        ])
        .env("SALON_PASSWORD", "ana123")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged Corte for Paula Gil"));

    let snapshot = fs::read_to_string(home.path().join("data/salon.json")).expect("snapshot");
    assert!(snapshot.contains("Paula Gil"));

    salon(home.path())
        .args(["services", "list", "--range", "all-time", "--user", "ana@different.com"])
        .env("SALON_PASSWORD", "ana123")
        .assert()
        .success()
        .stdout(predicate::str::contains("Paula Gil"))
        .stdout(predicate::str::contains("Ana García"))
        .stdout(predicate::str::contains("María Torres").not());
}

#[test]
fn admin_service_needs_employee() {
    let home = initialized();
    salon(home.path())
        .args([
            "services", "add", "--kind", "corte", "--price", "50", "--client", "Paula Gil",
            "--user", "maria@different.com",
        ])
        .env("SALON_PASSWORD", "admin123")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--employee is required"));
}

#[test]
fn employee_add_requires_a_specialty() {
    let home = initialized();
    salon(home.path())
        .args([
            "employees", "add", "Lucía", "Pérez", "--email", "lucia@different.com",
            "--role", "colorista", "--user", "maria@different.com",
        ])
        .env("SALON_PASSWORD", "admin123")
        .assert()
        .failure()
        .stderr(predicate::str::contains("At least one specialty is required"));
}

#[test]
fn added_employee_can_log_in_with_temporary_password() {
    let home = initialized();
    let output = salon(home.path())
        .args([
            "employees", "add", "Lucía", "Pérez", "--email", "lucia@different.com",
            "--role", "colorista", "--specialty", "Color", "--user", "maria@different.com",
        ])
        .env("SALON_PASSWORD", "admin123")
        .output()
        .expect("run");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("Added employee: Lucía Pérez (ID 6)"));
    let password = stdout
        .lines()
        .find_map(|l| l.strip_prefix("Temporary password: "))
        .expect("password line")
        .trim()
        .to_string();

    salon(home.path())
        .args(["profile", "--user", "lucia@different.com"])
        .env("SALON_PASSWORD", &password)
        .assert()
        .success()
        .stdout(predicate::str::contains("Lucía Pérez"));
}

#[test]
fn manual_transaction_shows_in_balance() {
    let home = initialized();
    salon(home.path())
        .args([
            "transactions", "add", "--kind", "egreso", "--concept", "Alquiler local",
            "--amount", "1200", "--date", "2024-01-31", "--category", "alquiler",
            "--user", "maria@different.com",
        ])
        .env("SALON_PASSWORD", "admin123")
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded expense 'Alquiler local'"));

    salon(home.path())
        .args(["balance", "--month", "2024-01", "--search", "alquiler", "--user", "maria@different.com"])
        .env("SALON_PASSWORD", "admin123")
        .assert()
        .success()
        .stdout(predicate::str::contains("Alquiler local"));
}

#[test]
fn dashboard_trend_compares_against_previous_month() {
    let home = initialized();
    salon(home.path())
        .args([
            "services", "add", "--date", "2023-12-10", "--kind", "color", "--price", "155",
            "--client", "Elena Ruiz", "--employee", "3", "--user", "maria@different.com",
        ])
        .env("SALON_PASSWORD", "admin123")
        .assert()
        .success();

    // January: 155 manual income + 155 in services; December: 155 in services.
    salon(home.path())
        .args(["dashboard", "--month", "2024-01", "--user", "maria@different.com"])
        .env("SALON_PASSWORD", "admin123")
        .assert()
        .success()
        .stdout(predicate::str::contains("$ 310"))
        .stdout(predicate::str::contains("+100.0%"));
}

#[test]
fn far_dates_are_reported_not_panicked() {
    let home = initialized();
    salon(home.path())
        .args([
            "dashboard", "--from=-150000-01-01", "--to=+150000-01-01",
            "--user", "maria@different.com",
        ])
        .env("SALON_PASSWORD", "admin123")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total income"));

    let output = salon(home.path())
        .args(["dashboard", "--month", "262143-12", "--user", "maria@different.com"])
        .env("SALON_PASSWORD", "admin123")
        .output()
        .expect("run");
    assert_ne!(output.status.code(), Some(101));
    assert!(!String::from_utf8_lossy(&output.stderr).contains("panicked"));

    salon(home.path())
        .args(["balance", "--from", "2024-02-01", "--to", "2024-01-01", "--user", "maria@different.com"])
        .env("SALON_PASSWORD", "admin123")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be later than --to"));
}
