use clap::{Parser, Subcommand};

/// Command-line interface definition for nutriauth
/// Local accounts on SQLite: sign up, log in, recover a password
#[derive(Parser)]
#[command(
    name = "nutriauth",
    version = env!("CARGO_PKG_VERSION"),
    about = "Local account flow: sign-up, login and password recovery backed by SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the preferences file holding the session
    #[arg(global = true, long = "session")]
    pub session: Option<String>,

    /// Run in test mode (no config file update, no splash delay)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Register a new account
    Signup {
        #[arg(long = "first-name")]
        first_name: String,

        #[arg(long = "last-name")]
        last_name: String,

        /// Date of birth (DD/MM/YYYY)
        #[arg(long = "dob")]
        dob: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long = "confirm")]
        confirm: String,
    },

    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Recover a password: verify the code, then set a new password
    Recover {
        /// Registered email (or phone number)
        identifier: String,

        #[arg(long = "sms", help = "Ask for the code by SMS instead of email")]
        sms: bool,

        /// The 4-digit verification code
        #[arg(long)]
        code: String,

        #[arg(long)]
        password: String,

        #[arg(long = "confirm")]
        confirm: String,
    },

    /// End the current session
    Logout,

    /// Show where the app lands on start and who is logged in
    Status,
}
