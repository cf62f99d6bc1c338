use crate::cli::commands::{open_flow, show, start_logged_out};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::forms::LoginForm;
use crate::errors::AppResult;
use crate::ui::messages::info;
use std::time::Duration;

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Login { email, password } = cmd else {
        return Ok(());
    };

    let mut flow = open_flow(cfg, Duration::ZERO)?;
    start_logged_out(&mut flow).await?;

    show(flow.submit_login(&LoginForm::new(email, password)).await)?;

    let view = flow.refresh_profile().await;
    info(format!("Welcome, {}", view.display_name()));
    Ok(())
}
