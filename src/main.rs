//! # Command Line Interface
//! 
//! Dispatch commands to `commands` module.

use env_logger;
use fmkit::commands;
use fmkit::commands::CommandError;
mod cli;

fn main() -> Result<(),Box<dyn std::error::Error>>
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let main_cmd = cli::build_cli();
    let matches = main_cmd.get_matches();

    // Catalog the tables and columns

    if let Some(cmd) = matches.subcommand_matches("catalog") {
        return commands::catalog::catalog(cmd);
    }

    // Export everything as JSON

    if let Some(cmd) = matches.subcommand_matches("json") {
        return commands::export::json(cmd);
    }

    // Export one table as CSV

    if let Some(cmd) = matches.subcommand_matches("csv") {
        return commands::export::csv(cmd);
    }

    // Export everything as a SQL script

    if let Some(cmd) = matches.subcommand_matches("sql") {
        return commands::export::sql(cmd);
    }

    // Low level dump

    if let Some(cmd) = matches.subcommand_matches("dump") {
        return commands::dump::dump(cmd);
    }

    log::error!("No subcommand was found, try `fmkit --help`");
    return Err(Box::new(CommandError::InvalidCommand));
}
