use crate::cli::commands::{open_flow, show, start_logged_out};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::forms::{ForgotPasswordForm, OtpForm, ResetPasswordForm};
use crate::core::otp::Channel;
use crate::errors::AppResult;
use std::time::Duration;

/// Login → Forgot Password → code → Reset Password → Login.
///
/// The code is checked exactly once; a wrong one ends the command since
/// there is no second prompt on a terminal run.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Recover {
        identifier,
        sms,
        code,
        password,
        confirm,
    } = cmd
    else {
        return Ok(());
    };

    let channel = if *sms { Channel::Sms } else { Channel::Email };

    let mut flow = open_flow(cfg, Duration::ZERO)?;
    start_logged_out(&mut flow).await?;
    show(flow.open_forgot_password())?;
    show(
        flow.submit_forgot_password(&ForgotPasswordForm::new(identifier), channel)
            .await,
    )?;

    let mut otp = OtpForm::from_digits(code);
    show(flow.submit_otp(&mut otp))?;

    show(
        flow.submit_reset_password(&ResetPasswordForm::new(password, confirm))
            .await,
    )?;
    Ok(())
}
