//! Handlers for each subcommand.
//!
//! Account commands drive an [`AuthFlow`] from the splash screen to the
//! screen they need, exactly as a user tapping through the app would.

use std::time::Duration;

use crate::config::Config;
use crate::core::flow::{AuthFlow, Outcome};
use crate::core::otp::FixedCodeIssuer;
use crate::core::session::SessionStore;
use crate::core::user_store::UserStore;
use crate::errors::{AppError, AppResult};
use crate::models::route::Route;
use crate::ui::messages::{field_error, header, success};

pub mod config;
pub mod init;
pub mod log;
pub mod login;
pub mod logout;
pub mod recover;
pub mod signup;
pub mod status;

/// Build the flow on top of the configured database and preferences file.
pub(crate) fn open_flow(cfg: &Config, splash_delay: Duration) -> AppResult<AuthFlow> {
    let users = UserStore::open(&cfg.database)?;
    let session = SessionStore::open(&cfg.session_file);
    let issuer = FixedCodeIssuer::from_config(cfg);
    Ok(AuthFlow::new(users, session, issuer).with_splash_delay(splash_delay))
}

/// Launch without a splash pause and require the Login screen.
///
/// A stored session lands on Home instead, which the account commands
/// refuse: the user has to log out first.
pub(crate) async fn start_logged_out(flow: &mut AuthFlow) -> AppResult<()> {
    let route = show(flow.launch().await)?;
    if route == Route::Home {
        let view = flow.refresh_profile().await;
        return Err(AppError::Refused(format!(
            "Already logged in as {}; run `nutriauth logout` first",
            view.display_email()
        )));
    }
    Ok(())
}

/// Print an outcome and return the route now visible.
///
/// A screen that stayed put becomes `AppError::Refused` after its invalid
/// fields are listed, so the process exits with a failure status.
pub(crate) fn show(outcome: Outcome) -> AppResult<Route> {
    match outcome {
        Outcome::Moved { to, notice } => {
            if let Some(n) = notice {
                success(n);
            }
            header(&to);
            Ok(to)
        }
        Outcome::Stayed { notice, fields } => {
            if let Some(fields) = fields {
                for (field, msg) in fields.iter() {
                    field_error(field.label(), msg);
                }
            }
            Err(AppError::Refused(notice))
        }
        Outcome::Discarded => Err(AppError::Other("screen dismissed".into())),
    }
}
