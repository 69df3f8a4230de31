mod cli;
mod lib;
mod load;

use clap::{App, Arg, ArgMatches};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

use cli::{
    page::Page,
    plot::Plotter,
    script,
    session::{Reply, Session},
};
use lib::{date::Date, rollover::Policy};
use load::{
    error::{Error, Record},
    parse,
};

fn main() {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let matches = App::new("perkcheck")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tracks which credit card statement credits have been claimed this period")
        .arg(Arg::with_name("script")
            .long("script")
            .short("s")
            .takes_value(true)
            .value_name("FILE")
            .help("Apply the commands of FILE instead of reading them interactively"))
        .arg(Arg::with_name("date")
            .long("date")
            .short("d")
            .takes_value(true)
            .value_name("YYYY-Mmm-DD")
            .help("Look at the tracker on this day instead of today"))
        .arg(Arg::with_name("auto-reset")
            .long("auto-reset")
            .help("Clear values entered in a reset window that has since ended"))
        .arg(Arg::with_name("svg")
            .long("svg")
            .takes_value(true)
            .value_name("FILE")
            .help("Write progress bars of the final ledger to FILE"))
        .arg(Arg::with_name("quiet")
            .long("quiet")
            .short("q")
            .help("Do not print the final page of a script"))
        .get_matches();

    let mut errs = Record::new();
    let ok = match start(&matches) {
        Ok(mut session) => {
            let ok = match matches.value_of("script") {
                Some(file) => run_script(&mut session, file, matches.is_present("quiet"), &mut errs),
                None => run_interactive(&mut session),
            };
            if let Some(file) = matches.value_of("svg") {
                if let Err(e) = Plotter::from(session.ledger()).save(file) {
                    Error::new("Cannot write chart")
                        .with_text(format!("Chart output is '{}'", file))
                        .with_text(e)
                        .register(&mut errs);
                }
            }
            ok
        }
        Err(err) => {
            err.register(&mut errs);
            false
        }
    };
    if !errs.is_empty() {
        print!("{}", errs);
    }
    if !ok || errs.is_fatal() {
        std::process::exit(1);
    }
}

fn start(matches: &ArgMatches) -> Result<Session, Error> {
    let today = match matches.value_of("date") {
        Some(text) => parse::date("--date", text)?,
        None => Date::today().map_err(|e| {
            Error::new("Cannot read the current date")
                .with_text(&e)
                .with_hint("pass the date explicitly with --date")
        })?,
    };
    let policy = if matches.is_present("auto-reset") {
        Policy::Automatic
    } else {
        Policy::Manual
    };
    tracing::info!(%today, ?policy, "session started");
    Ok(Session::new(today, policy))
}

/// Apply a whole file, nothing is applied if any line is invalid
fn run_script(session: &mut Session, file: &str, quiet: bool, errs: &mut Record) -> bool {
    let commands = match load::read_commands(file, errs) {
        Some(commands) => commands,
        None => return false,
    };
    let stdout = io::stdout();
    if let Err(e) = script::run(session, commands, quiet, &mut stdout.lock()) {
        tracing::warn!(error = %e, "cannot write to stdout");
        return false;
    }
    true
}

fn run_interactive(session: &mut Session) -> bool {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let _ = writeln!(out, "{}", Page::from(session));
    let _ = writeln!(out, "Type 'help' for the list of commands.");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let _ = write!(out, "> ");
        let _ = out.flush();
        let text = match lines.next() {
            Some(Ok(text)) => text,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "cannot read from stdin");
                return false;
            }
            None => break,
        };
        let mut errs = Record::new();
        if let Some(command) = parse::line(&mut errs, &text) {
            let written = match session.apply(command) {
                Ok(Reply::Quit) => break,
                Ok(reply) => script::respond(session, reply, true, &mut out),
                Err(e) => {
                    script::rejection(command, &e).register(&mut errs);
                    Ok(())
                }
            };
            if let Err(e) = written {
                tracing::warn!(error = %e, "cannot write to stdout");
                return false;
            }
        }
        if !errs.is_empty() {
            let _ = write!(out, "{}", errs);
        }
    }
    true
}
