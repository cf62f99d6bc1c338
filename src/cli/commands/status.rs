use crate::cli::commands::{open_flow, show};
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::route::Route;
use crate::ui::messages::info;
use std::time::Duration;

/// Run the splash screen and report where the app lands.
pub async fn handle(cfg: &Config, is_test: bool) -> AppResult<()> {
    let delay = if is_test {
        Duration::ZERO
    } else {
        Duration::from_millis(cfg.splash_delay_ms)
    };

    let mut flow = open_flow(cfg, delay)?;
    if show(flow.launch().await)? == Route::Home {
        let view = flow.refresh_profile().await;
        println!("👤 Name  : {}", view.display_name());
        println!("✉️  Email : {}", view.display_email());
    } else {
        info("No active session");
    }
    Ok(())
}
