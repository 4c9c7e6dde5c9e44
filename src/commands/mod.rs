//! # CLI Subcommands
//! 
//! Contains modules that run the subcommands.  Every subcommand opens the
//! database named by `-f` and exits nonzero on the first error.

pub mod catalog;
pub mod export;
pub mod dump;

use crate::hbam::FmpFile;
use crate::{DYNERR,STDRESULT};

#[derive(thiserror::Error,Debug)]
pub enum CommandError {
    #[error("Command could not be interpreted")]
    InvalidCommand,
    #[error("Table not found")]
    TableNotFound
}

/// Open the database named by the `-f` option.
pub fn open_from_matches(cmd: &clap::ArgMatches) -> Result<FmpFile,DYNERR> {
    let path = cmd.get_one::<String>("fmp").expect("required argument");
    crate::open_fmp_from_file(path)
}

/// Write to the `-o` option's path, or to stdout if it is absent or `-`.
pub fn write_output(cmd: &clap::ArgMatches,content: &str) -> STDRESULT {
    match cmd.get_one::<String>("output") {
        Some(path) if path != "-" => {
            std::fs::write(path,content)?;
            Ok(())
        },
        _ => {
            print!("{}",content);
            Ok(())
        }
    }
}
