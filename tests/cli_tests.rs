use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{EMAIL, PASSWORD, Sandbox, nua};

#[test]
fn test_init_creates_database() {
    let sb = Sandbox::new();

    sb.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Database initialized").and(contains("0 registered account(s)")));

    assert!(fs::metadata(sb.db()).is_ok());

    // re-running init keeps existing accounts
    sb.signup(EMAIL, PASSWORD);
    sb.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(contains("1 registered account(s)"));
    // test mode never writes the config file
    assert!(!sb.config_file().exists());
}

#[test]
fn test_signup_login_status_logout() {
    let sb = Sandbox::new();
    sb.signup(EMAIL, PASSWORD);

    sb.cmd()
        .args(["login", "--email", EMAIL, "--password", PASSWORD])
        .assert()
        .success()
        .stdout(contains("Login Successful!").and(contains("Welcome, Ada Lovelace")));

    sb.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Home").and(contains(EMAIL)));

    sb.cmd()
        .arg("logout")
        .assert()
        .success()
        .stdout(contains("Logged out successfully"));

    sb.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(contains("No active session"));
}

#[test]
fn test_login_with_wrong_password_fails() {
    let sb = Sandbox::new();
    sb.signup(EMAIL, PASSWORD);

    sb.cmd()
        .args(["login", "--email", EMAIL, "--password", "nottheone"])
        .assert()
        .failure()
        .stderr(contains("Invalid email or password!"));
}

#[test]
fn test_login_twice_is_refused() {
    let sb = Sandbox::new();
    sb.signup(EMAIL, PASSWORD);
    sb.login(EMAIL, PASSWORD);

    sb.cmd()
        .args(["login", "--email", EMAIL, "--password", PASSWORD])
        .assert()
        .failure()
        .stderr(contains("Already logged in"));
}

#[test]
fn test_signup_duplicate_email_fails() {
    let sb = Sandbox::new();
    sb.signup(EMAIL, PASSWORD);

    sb.cmd()
        .args([
            "signup",
            "--first-name",
            "Other",
            "--last-name",
            "Person",
            "--dob",
            "01/01/2000",
            "--email",
            EMAIL,
            "--password",
            "another1",
            "--confirm",
            "another1",
        ])
        .assert()
        .failure()
        .stderr(contains("Email already registered!"));
}

#[test]
fn test_signup_invalid_fields_are_listed() {
    let sb = Sandbox::new();

    sb.cmd()
        .args([
            "signup",
            "--first-name",
            "A",
            "--last-name",
            "Lovelace",
            "--dob",
            "32/01/2000",
            "--email",
            "ada@",
            "--password",
            "short",
            "--confirm",
            "short",
        ])
        .assert()
        .failure()
        .stderr(
            contains("Please fix all errors!")
                .and(contains("First Name"))
                .and(contains("Date of Birth"))
                .and(contains("Invalid email format!")),
        );
}

#[test]
fn test_recover_resets_password() {
    let sb = Sandbox::new();
    sb.signup(EMAIL, PASSWORD);

    sb.cmd()
        .args([
            "recover", EMAIL, "--code", "1234", "--password", "brandnew", "--confirm",
            "brandnew",
        ])
        .assert()
        .success()
        .stdout(contains("Password Reset Successful!"));

    sb.cmd()
        .args(["login", "--email", EMAIL, "--password", PASSWORD])
        .assert()
        .failure();
    sb.login(EMAIL, "brandnew");
}

#[test]
fn test_recover_by_sms_uses_its_code() {
    let sb = Sandbox::new();
    sb.signup(EMAIL, PASSWORD);

    sb.cmd()
        .args([
            "recover", EMAIL, "--sms", "--code", "1234", "--password", "brandnew", "--confirm",
            "brandnew",
        ])
        .assert()
        .failure()
        .stderr(contains("Wrong code!"));

    sb.cmd()
        .args([
            "recover", EMAIL, "--sms", "--code", "6789", "--password", "brandnew", "--confirm",
            "brandnew",
        ])
        .assert()
        .success();
}

#[test]
fn test_recover_unknown_email_fails() {
    let sb = Sandbox::new();
    sb.cmd().arg("init").assert().success();

    sb.cmd()
        .args([
            "recover",
            "nobody@example.com",
            "--code",
            "1234",
            "--password",
            "brandnew",
            "--confirm",
            "brandnew",
        ])
        .assert()
        .failure()
        .stderr(contains("Email not found!"));
}

#[test]
fn test_recover_incomplete_code_fails() {
    let sb = Sandbox::new();
    sb.signup(EMAIL, PASSWORD);

    sb.cmd()
        .args([
            "recover", EMAIL, "--code", "12", "--password", "brandnew", "--confirm", "brandnew",
        ])
        .assert()
        .failure()
        .stderr(contains("Please enter complete code!"));
}

#[test]
fn test_logout_without_session_fails() {
    let sb = Sandbox::new();

    sb.cmd()
        .arg("logout")
        .assert()
        .failure()
        .stderr(contains("Not logged in"));
}

#[test]
fn test_log_print_shows_account_activity() {
    let sb = Sandbox::new();
    sb.signup(EMAIL, PASSWORD);
    sb.login(EMAIL, PASSWORD);

    sb.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(
            contains("signup")
                .and(contains("login"))
                .and(contains("migration_applied")),
        );
}

#[test]
fn test_config_print_shows_overrides() {
    let sb = Sandbox::new();

    sb.cmd()
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("accounts.sqlite").and(contains("otp_email_code")));
}

#[test]
fn test_config_check_and_migrate() {
    let sb = Sandbox::new();
    let path = sb.config_file();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, format!("database: {}\n", sb.db())).unwrap();

    sb.cmd()
        .args(["config", "--check"])
        .assert()
        .success()
        .stdout(contains("Missing fields").and(contains("splash_delay_ms")));

    sb.cmd()
        .args(["config", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Configuration updated"));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("otp_sms_code"));

    sb.cmd()
        .args(["config", "--check"])
        .assert()
        .success()
        .stdout(contains("Configuration file is complete"));
}

#[test]
fn test_invalid_config_is_reported() {
    let sb = Sandbox::new();
    let path = sb.config_file();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "database: x.sqlite\notp_email_code: \"12\"\n").unwrap();

    sb.cmd()
        .arg("status")
        .assert()
        .failure()
        .stderr(contains("OTP code must be exactly 4 digits"));
}

#[test]
fn test_storage_failure_is_reported_once() {
    let sb = Sandbox::new();
    sb.signup(EMAIL, PASSWORD);

    // a directory where the preferences file should be cannot be written
    let session_dir = sb.home.path().join("session-dir");
    fs::create_dir_all(&session_dir).unwrap();
    let db = sb.db();
    let session = session_dir.to_string_lossy().to_string();

    nua()
        .env("HOME", sb.home.path())
        .args([
            "--db",
            &db,
            "--session",
            &session,
            "--test",
            "login",
            "--email",
            EMAIL,
            "--password",
            PASSWORD,
        ])
        .assert()
        .failure()
        .stderr(contains("Error: I/O error").and(contains("Error: Error:").not()));
}
