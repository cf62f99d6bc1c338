use crate::cli::commands::{open_flow, show};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::route::{Route, Tab};
use std::time::Duration;

/// Home → Profile tab → logout.
pub async fn handle(cfg: &Config) -> AppResult<()> {
    let mut flow = open_flow(cfg, Duration::ZERO)?;

    if show(flow.launch().await)? != Route::Home {
        return Err(AppError::Refused("Not logged in".into()));
    }

    show(flow.select_tab(Tab::Profile))?;
    show(flow.logout().await)?;
    Ok(())
}
