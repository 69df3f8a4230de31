//! Translation of command text into session commands
//!
//! Parsing is done in two steps: `pest` checks the shape of the input
//! against `grammar.pest`, then every command is validated (benefit names,
//! dollar amounts, dates) and errors are reported with their location.

use pest::Parser;
use pest_derive::*;

use crate::lib::{
    benefit::{Amount, BenefitId, Card},
    date::{Date, Month},
    ledger::LedgerError,
};
use crate::load::error::{Error, Loc, Record};

#[derive(Parser)]
#[grammar = "load/grammar.pest"]
struct CommandParser;

type Pair<'i> = pest::iterators::Pair<'i, Rule>;

/// A single user interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// mark a credit as fully used
    Check(BenefitId),
    /// mark a credit as unused
    Uncheck(BenefitId),
    /// record a partial amount
    Set(BenefitId, Amount),
    /// same as `Set(id, 0)`
    Clear(BenefitId),
    Reset,
    Show,
    /// move the session date
    Date(Date),
    Rollover,
    Help,
    Quit,
}

/// Parse a whole script
///
/// Lines that fail validation are reported and skipped, the caller
/// should check `errs.is_fatal()` before using the result.
pub fn extract(path: &str, errs: &mut Record, contents: &str) -> Vec<Command> {
    let program = match CommandParser::parse(Rule::program, contents) {
        Ok(mut pairs) => match pairs.next() {
            Some(program) => program,
            None => return Vec::new(),
        },
        Err(e) => {
            Error::new("Parsing failure")
                .with_error(e.with_path(path))
                .with_hint("one command per line, see 'help' in an interactive session")
                .register(errs);
            return Vec::new();
        }
    };
    program
        .into_inner()
        .filter(|pair| pair.as_rule() == Rule::command)
        .filter_map(|pair| validate_command(path, errs, pair))
        .collect()
}

/// Parse a single interactive line, `None` for blank lines and failures
pub fn line(errs: &mut Record, contents: &str) -> Option<Command> {
    let input = match CommandParser::parse(Rule::input, contents) {
        Ok(mut pairs) => pairs.next()?,
        Err(e) => {
            Error::new("Unrecognized command")
                .with_error(e.with_path("<stdin>"))
                .with_hint("type 'help' for the list of commands")
                .register(errs);
            return None;
        }
    };
    let command = input
        .into_inner()
        .find(|pair| pair.as_rule() == Rule::command)?;
    validate_command("<stdin>", errs, command)
}

/// Parse a standalone `YYYY-Mmm-DD` date
pub fn date(path: &str, contents: &str) -> Result<Date, Error> {
    let input = CommandParser::parse(Rule::date_input, contents)
        .map_err(|e| Error::new("Invalid date format").with_error(e.with_path(path)))?
        .next()
        .and_then(|pair| pair.into_inner().find(|p| p.as_rule() == Rule::date))
        .ok_or_else(|| Error::new("Invalid date format").with_text("expected 'YYYY-Mmm-DD'"))?;
    validate_date(path, input)
}

fn validate_command(path: &str, errs: &mut Record, pair: Pair) -> Option<Command> {
    let inner = pair.into_inner().next()?;
    let rule = inner.as_rule();
    let mut args = inner.into_inner();
    let result = match rule {
        Rule::cmd_check => validate_claimable(path, args.next()?).map(Command::Check),
        Rule::cmd_uncheck => validate_claimable(path, args.next()?).map(Command::Uncheck),
        Rule::cmd_clear => validate_claimable(path, args.next()?).map(Command::Clear),
        Rule::cmd_set => {
            let id = validate_claimable(path, args.next()?);
            let amount = validate_amount(path, args.next()?);
            match (id, amount) {
                (Ok(id), Ok(amount)) => Ok(Command::Set(id, amount)),
                (Err(e), _) | (_, Err(e)) => Err(e),
            }
        }
        Rule::cmd_date => validate_date(path, args.next()?).map(Command::Date),
        Rule::cmd_reset => Ok(Command::Reset),
        Rule::cmd_show => Ok(Command::Show),
        Rule::cmd_rollover => Ok(Command::Rollover),
        Rule::cmd_help => Ok(Command::Help),
        Rule::cmd_quit => Ok(Command::Quit),
        _ => unreachable!("{:?} is not a command", rule),
    };
    match result {
        Ok(command) => Some(command),
        Err(err) => {
            err.register(errs);
            None
        }
    }
}

fn validate_benefit(path: &str, pair: Pair) -> Result<BenefitId, Error> {
    let loc: Loc = (path, pair.as_span());
    pair.as_str().parse::<BenefitId>().map_err(|e| {
        Error::new("Unknown benefit")
            .with_span(&loc, "referenced here")
            .with_text(e)
            .with_hint(format!(
                "tracked benefits are {}",
                BenefitId::all().map(|id| id.key()).collect::<Vec<_>>().join(", "),
            ))
    })
}

/// Only credits with an input can be the target of a write
fn validate_claimable(path: &str, pair: Pair) -> Result<BenefitId, Error> {
    let loc: Loc = (path, pair.as_span());
    let id = validate_benefit(path, pair)?;
    if id.control().is_some() {
        return Ok(id);
    }
    Err(Error::new("Benefit has no input")
        .with_span(&loc, "referenced here")
        .with_text(LedgerError::NoInput(id))
        .with_hint(format!(
            "benefits that can be marked as used are {}",
            Card::all().flat_map(Card::claimable).map(|id| id.key()).collect::<Vec<_>>().join(", "),
        )))
}

fn validate_amount(path: &str, pair: Pair) -> Result<Amount, Error> {
    let loc: Loc = (path, pair.as_span());
    pair.as_str().parse::<u32>().map(Amount).map_err(|_| {
        Error::new("Amount too large")
            .with_span(&loc, "provided here")
            .with_hint("amounts are whole dollars, no credit is worth more than $300")
    })
}

fn validate_date(path: &str, pair: Pair) -> Result<Date, Error> {
    let loc: Loc = (path, pair.as_span());
    let mut inner = pair.into_inner();
    let fields = (inner.next(), inner.next(), inner.next());
    let (year, month, day) = match fields {
        (Some(y), Some(m), Some(d)) => (y, m, d),
        _ => return Err(Error::new("Invalid date format").with_span(&loc, "provided here")),
    };
    let month_loc: Loc = (path, month.as_span());
    let month = month.as_str().parse::<Month>().map_err(|e| {
        Error::new("Invalid month")
            .with_span(&month_loc, "provided here")
            .with_text(format!("'{}' is not a valid month", e.0))
            .with_hint("Months are 'Jan', 'Feb', ..., 'Dec'")
    })?;
    // both are short runs of digits, enforced by the grammar
    let year = year.as_str().parse::<usize>().unwrap_or(0);
    let day = day.as_str().parse::<usize>().unwrap_or(0);
    Date::from(year, month, day).map_err(|e| {
        Error::new("Invalid date")
            .with_span(&loc, "provided here")
            .with_text(&e)
            .with_hint("choose a date that exists")
            .with_hint(e.fix_hint())
    })
}
