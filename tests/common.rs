#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

use nutriauth::core::flow::AuthFlow;
use nutriauth::core::otp::FixedCodeIssuer;
use nutriauth::core::session::SessionStore;
use nutriauth::core::user_store::UserStore;
use nutriauth::models::user::NewUser;

pub const EMAIL: &str = "ada@example.com";
pub const PASSWORD: &str = "secret1";

pub fn nua() -> Command {
    cargo_bin_cmd!("nutriauth")
}

/// Private HOME with its own database and preferences file.
pub struct Sandbox {
    pub home: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            home: TempDir::new().expect("temp home"),
        }
    }

    pub fn db(&self) -> String {
        self.home
            .path()
            .join("accounts.sqlite")
            .to_string_lossy()
            .to_string()
    }

    pub fn session(&self) -> String {
        self.home
            .path()
            .join("prefs.json")
            .to_string_lossy()
            .to_string()
    }

    pub fn config_file(&self) -> PathBuf {
        self.home.path().join(".nutriauth").join("nutriauth.conf")
    }

    /// Binary invocation bound to this sandbox, in test mode.
    pub fn cmd(&self) -> Command {
        let mut cmd = nua();
        cmd.env("HOME", self.home.path())
            .env_remove("NUTRIAUTH_LOG")
            .args(["--db", &self.db(), "--session", &self.session(), "--test"]);
        cmd
    }

    pub fn signup(&self, email: &str, password: &str) {
        self.cmd()
            .args([
                "signup",
                "--first-name",
                "Ada",
                "--last-name",
                "Lovelace",
                "--dob",
                "10/12/1990",
                "--email",
                email,
                "--password",
                password,
                "--confirm",
                password,
            ])
            .assert()
            .success();
    }

    pub fn login(&self, email: &str, password: &str) {
        self.cmd()
            .args(["login", "--email", email, "--password", password])
            .assert()
            .success();
    }
}

pub fn ada() -> NewUser {
    NewUser::new("Ada", "Lovelace", "10/12/1990", EMAIL, PASSWORD)
}

/// Flow over an in-memory store seeded with [`ada`], no splash pause.
pub async fn seeded_flow(dir: &TempDir) -> (AuthFlow, UserStore, SessionStore) {
    let users = UserStore::in_memory().expect("in-memory store");
    users.insert(ada()).await.expect("seed user");
    let session = SessionStore::open(dir.path().join("prefs.json"));

    let flow = AuthFlow::new(users.clone(), session.clone(), FixedCodeIssuer::default())
        .with_splash_delay(Duration::ZERO);
    (flow, users, session)
}
