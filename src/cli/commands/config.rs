use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::migrate::{migrate_config, missing_fields};
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
    } = cmd
    {
        let path = Config::config_file();

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", serde_yaml::to_string(cfg)?);
        }

        // ---- CHECK / MIGRATE need a file on disk ----
        if (*check || *migrate) && !path.exists() {
            warning(format!(
                "No configuration file at {}; run `nutriauth init` first",
                path.display()
            ));
            return Ok(());
        }

        if *check {
            let missing = missing_fields(&path)?;
            if missing.is_empty() {
                success("Configuration file is complete");
            } else {
                warning(format!("Missing fields: {}", missing.join(", ")));
                info("Run `nutriauth config --migrate` to add them");
            }
        }

        if *migrate && !migrate_config(&path)? {
            info("Configuration already up to date");
        }
    }

    Ok(())
}
