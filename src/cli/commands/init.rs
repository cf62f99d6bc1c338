use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::user_store::UserStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database with all pending migrations
pub async fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.as_deref(), cli.session.as_deref(), cli.test)?;

    info("Initializing nutriauth…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", cfg.database);
    println!("🔑 Session    : {}", cfg.session_file);

    let users = UserStore::open(&cfg.database)?;
    let accounts = users.count().await?;
    users
        .audit(
            "init",
            "Database initialized",
            &format!("Database initialized at {}", cfg.database),
        )
        .await;

    success(format!("Database initialized at {}", cfg.database));
    info(format!("{} registered account(s)", accounts));
    Ok(())
}
