use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::{LogEntry, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;

const MAX_OP_WIDTH: usize = 60;
const RESET: &str = "\x1b[0m";

/// ANSI colour for the operation word of a log row
fn color_for_operation(op: &str) -> &'static str {
    match op {
        "signup" | "login" => "\x1b[32m",
        "login_failed" => "\x1b[31m",
        "logout" => "\x1b[33m",
        "password_reset" => "\x1b[36m",
        "migration_applied" => "\x1b[35m",
        "init" => "\x1b[38;2;255;153;51m",
        _ => "\x1b[37m",
    }
}

/// "operation (target)", cut to `MAX_OP_WIDTH` visible characters.
fn op_target(entry: &LogEntry) -> String {
    let text = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    if text.chars().count() > MAX_OP_WIDTH {
        let mut s: String = text.chars().take(MAX_OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        text
    }
}

fn print_log(entries: &[LogEntry]) {
    if entries.is_empty() {
        info("The internal log is empty");
        return;
    }

    let rows: Vec<(&LogEntry, String, String)> = entries
        .iter()
        .map(|e| {
            let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| e.date.clone());
            (e, date, op_target(e))
        })
        .collect();

    let id_w = rows.iter().map(|(e, _, _)| e.id.to_string().len()).max().unwrap_or(1);
    let date_w = rows.iter().map(|(_, d, _)| d.len()).max().unwrap_or(10);
    let op_w = rows
        .iter()
        .map(|(_, _, o)| o.chars().count())
        .max()
        .unwrap_or(10);

    println!("📜 Internal log:\n");

    for (entry, date, text) in rows {
        let padding = " ".repeat(op_w.saturating_sub(text.chars().count()));
        // only the operation word is coloured
        let painted = match text.split_once(' ') {
            Some((op, rest)) => format!(
                "{}{}{} {}",
                color_for_operation(&entry.operation),
                op,
                RESET,
                rest
            ),
            None => format!("{}{}{}", color_for_operation(&entry.operation), text, RESET),
        };

        println!(
            "{:>id_w$}: {:<date_w$} | {}{} => {}",
            entry.id,
            date,
            painted,
            padding,
            entry.message,
            id_w = id_w,
            date_w = date_w
        );
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pool = DbPool::new(&cfg.database)?;
        init_db(&pool.conn)?;
        let entries = load_log(&pool.conn)?;
        print_log(&entries);
    }

    Ok(())
}
