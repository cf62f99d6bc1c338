use rusqlite::Connection;

use nutriauth::core::password::is_hashed;
use nutriauth::core::user_store::UserStore;
use nutriauth::db::log::load_log;
use nutriauth::errors::{AppError, ErrorKind};
use nutriauth::models::user::NewUser;

mod common;
use common::{EMAIL, PASSWORD, ada};

#[tokio::test]
async fn signup_then_login_round_trip() {
    let users = UserStore::in_memory().unwrap();
    let id = users.insert(ada()).await.unwrap();

    let found = users.login(EMAIL, PASSWORD).await.unwrap().expect("login");
    assert_eq!(found.id, id);
    assert_eq!(found.display_name(), "Ada Lovelace");
    assert_eq!(found.date_of_birth, "10/12/1990");

    assert!(users.login(EMAIL, "wrong-pass").await.unwrap().is_none());
    assert!(users.login("nobody@example.com", PASSWORD).await.unwrap().is_none());
}

#[tokio::test]
async fn passwords_are_stored_hashed() {
    let users = UserStore::in_memory().unwrap();
    users.insert(ada()).await.unwrap();

    let stored = users.find_by_email(EMAIL).await.unwrap().unwrap();
    assert_ne!(stored.password, PASSWORD);
    assert!(is_hashed(&stored.password));
}

#[tokio::test]
async fn email_lookup_is_exact() {
    let users = UserStore::in_memory().unwrap();
    users.insert(ada()).await.unwrap();

    assert!(users.find_by_email(EMAIL).await.unwrap().is_some());
    assert!(users.find_by_email("ADA@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn update_password_of_unknown_email_is_a_no_op() {
    let users = UserStore::in_memory().unwrap();
    users.insert(ada()).await.unwrap();

    users.update_password("missing@x.com", "new1").await.unwrap();

    assert_eq!(users.count().await.unwrap(), 1);
    assert!(users.find_by_email("missing@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn update_password_replaces_the_old_one() {
    let users = UserStore::in_memory().unwrap();
    users.insert(ada()).await.unwrap();

    users.update_password(EMAIL, "brandnew").await.unwrap();

    assert!(users.login(EMAIL, PASSWORD).await.unwrap().is_none());
    assert!(users.login(EMAIL, "brandnew").await.unwrap().is_some());
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let users = UserStore::in_memory().unwrap();
    users.insert(ada()).await.unwrap();

    let err = users
        .insert(NewUser::new("Other", "Person", "01/01/2000", EMAIL, "another1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateEmail(_)));
    assert_eq!(err.kind(), ErrorKind::DuplicateEmail);
    assert_eq!(err.notice(), "Email already registered!");
    assert_eq!(users.count().await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_signups_with_same_email_insert_once() {
    let users = UserStore::in_memory().unwrap();
    let (a, b) = tokio::join!(users.insert(ada()), users.insert(ada()));

    let ok = [a.is_ok(), b.is_ok()].iter().filter(|v| **v).count();
    assert_eq!(ok, 1);
    assert_eq!(users.count().await.unwrap(), 1);
}

#[tokio::test]
async fn audit_rows_land_in_the_log_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.sqlite");
    let path = path.to_string_lossy().to_string();

    let users = UserStore::open(&path).unwrap();
    users.audit("login", EMAIL, "Login successful").await;

    let conn = Connection::open(&path).unwrap();
    let entries = load_log(&conn).unwrap();
    assert!(
        entries
            .iter()
            .any(|e| e.operation == "login" && e.target == EMAIL)
    );
    // schema migrations are recorded too
    assert!(entries.iter().any(|e| e.operation == "migration_applied"));
}

#[tokio::test]
async fn legacy_full_name_table_is_rebuilt() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE users (
            id       INTEGER PRIMARY KEY AUTOINCREMENT,
            fullName TEXT,
            email    TEXT,
            password TEXT
        );
        INSERT INTO users (fullName, email, password) VALUES ('Ada King Lovelace', 'ada@example.com', 'secret1');
        INSERT INTO users (fullName, email, password) VALUES ('Ada Copy', 'ada@example.com', 'other12');
        INSERT INTO users (fullName, email, password) VALUES ('Grace', 'grace@example.com', 'cobol60');
        "#,
    )
    .unwrap();

    let users = UserStore::from_connection(conn).unwrap();
    assert_eq!(users.count().await.unwrap(), 2);

    // oldest row wins, clear text got hashed and still verifies
    let ada = users.login(EMAIL, PASSWORD).await.unwrap().expect("ada");
    assert_eq!(ada.first_name, "Ada");
    assert_eq!(ada.last_name, "King Lovelace");
    assert!(is_hashed(&ada.password));

    let grace = users.login("grace@example.com", "cobol60").await.unwrap().unwrap();
    assert_eq!(grace.display_name(), "Grace");
}

#[tokio::test]
async fn legacy_split_name_table_is_rebuilt() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE users (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            firstName   TEXT,
            lastName    TEXT,
            dateOfBirth TEXT,
            email       TEXT,
            password    TEXT
        );
        INSERT INTO users (firstName, lastName, dateOfBirth, email, password)
            VALUES ('Ada', 'Lovelace', '10/12/1990', 'ada@example.com', 'secret1');
        "#,
    )
    .unwrap();

    let users = UserStore::from_connection(conn).unwrap();
    let ada = users.login(EMAIL, PASSWORD).await.unwrap().expect("ada");
    assert_eq!(ada.date_of_birth, "10/12/1990");

    // the rebuilt table enforces uniqueness
    let err = users.insert(common::ada()).await.unwrap_err();
    assert!(matches!(err, AppError::DuplicateEmail(_)));
}
