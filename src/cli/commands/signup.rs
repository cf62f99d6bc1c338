use crate::cli::commands::{open_flow, show, start_logged_out};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::forms::SignUpForm;
use crate::errors::AppResult;
use std::time::Duration;

/// Login → Sign Up → submit → back on Login.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Signup {
        first_name,
        last_name,
        dob,
        email,
        password,
        confirm,
    } = cmd
    else {
        return Ok(());
    };

    let mut flow = open_flow(cfg, Duration::ZERO)?;
    start_logged_out(&mut flow).await?;
    show(flow.open_sign_up())?;

    let form = SignUpForm {
        first_name: first_name.clone(),
        last_name: last_name.clone(),
        date_of_birth: dob.clone(),
        email: email.clone(),
        password: password.clone(),
        confirm_password: confirm.clone(),
    };
    show(flow.submit_sign_up(&form).await)?;
    Ok(())
}
