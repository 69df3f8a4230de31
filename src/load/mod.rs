pub mod error;
pub mod parse;

use error::{Error, Record};
use parse::Command;

/// Read and validate a whole script of commands
///
/// Returns `None` if the file is missing or contains any fatal error,
/// all problems found are added to `errs`.
pub fn read_commands(filename: &str, errs: &mut Record) -> Option<Vec<Command>> {
    let contents = match std::fs::read_to_string(filename) {
        Ok(contents) => contents,
        Err(e) => {
            Error::new("File not found")
                .with_text(format!("Script to load is '{}'", filename))
                .with_text(e)
                .with_hint("check the path given to --script")
                .register(errs);
            return None;
        }
    };
    let commands = parse::extract(filename, errs, &contents);
    tracing::info!(filename, count = commands.len(), "loaded script");
    if errs.is_fatal() {
        None
    } else {
        Some(commands)
    }
}

