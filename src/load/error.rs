//! Pretty-printing facility for error messages
//!
//! In fairness, this is mostly a wrapper around `pest::error::Error::new_from_span`,
//! the difficult part of the formatting is handled and `Error` only adds aggregation
//! of messages as well as colored output.
//!
//! # Example
//!
//! ```rust
//! Error::new("Unknown benefit")
//!     .with_span(&loc, "referenced here")
//!     .with_text("'amex_lounge' is not a tracked benefit")
//!     .with_hint("tracked benefits are amex_dining, amex_uber, ...")
//!     .register(errors);
//! ```
//!
//! ```txt
//! --> Error: Unknown benefit
//!  |     --> october.perk:3:7
//!  |      |
//!  |    3 | check amex_lounge
//!  |      |       ^---------^
//!  |      |
//!  |      = referenced here
//!  |  'amex_lounge' is not a tracked benefit
//!  |      ? hint: tracked benefits are amex_dining, amex_uber, ...
//! ```

use std::fmt;

use crate::load::parse::Rule;

/// Location of an error
///
/// Contains information on the file in which the error
/// occured and the precise span within that file
pub type Loc<'i> = (&'i str, pest::Span<'i>);

/// Report for a single error
///
/// All messages (`label` passed with `new`, arguments of `with_hint`
/// and `with_text`) should fit in a single line.
#[must_use]
#[derive(Debug)]
pub struct Error {
    /// determines the error label (warning/error) and the color (yellow/red)
    fatal: bool,
    /// name of the error
    label: String,
    /// contents of the error
    items: Vec<Item>,
}

/// Kinds of items that can be added to an error report
#[derive(Debug)]
enum Item {
    /// code block
    Block(pest::error::Error<Rule>),
    /// important message
    Text(String),
    /// recommendations for fixes
    Hint(String),
}

/// A collection of errors
///
/// Typically to keep record of all errors detected in one script
/// or one interactive line
#[must_use]
#[derive(Debug, Default)]
pub struct Record {
    /// how many are errors, the rest are warnings
    fatal: usize,
    contents: Vec<Error>,
}

impl Error {
    /// Create a new error
    pub fn new<S>(msg: S) -> Self
    where S: ToString {
        Self {
            fatal: true,
            label: msg.to_string(),
            items: Vec::new(),
        }
    }

    /// Mark as a warning rather that a fatal error
    pub fn nonfatal(mut self) -> Self {
        self.fatal = false;
        self
    }

    /// Add a pre-existing error (e.g. to build from a parsing error)
    pub fn with_error(mut self, err: pest::error::Error<Rule>) -> Self {
        self.items.push(Item::Block(err.renamed_rules(rule_rename)));
        self
    }

    /// Add a code block and its associated message
    pub fn with_span<S>(mut self, loc: &Loc, msg: S) -> Self
    where S: ToString {
        self.items.push(Item::Block(pest::error::Error::new_from_span(
            pest::error::ErrorVariant::CustomError {
                message: msg.to_string(),
            },
            loc.1.clone(),
        ).with_path(loc.0)));
        self
    }

    /// Add an important note
    pub fn with_text<S>(mut self, msg: S) -> Self
    where S: ToString {
        self.items.push(Item::Text(msg.to_string()));
        self
    }

    /// Add a hint on how to fix
    pub fn with_hint<S>(mut self, msg: S) -> Self
    where S: ToString {
        self.items.push(Item::Hint(msg.to_string()));
        self
    }

    /// Consume the error and add it to the pool of recorded errors
    pub fn register(self, record: &mut Record) {
        record.register(self);
    }

    #[cfg(test)]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Record {
    /// Initialize a new pool of errors
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if any of the recorded errors are fatal
    pub fn is_fatal(&self) -> bool {
        self.fatal > 0
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Number of fatal errors
    pub fn count_errors(&self) -> usize {
        self.fatal
    }

    /// Number of nonfatal errors
    pub fn count_warnings(&self) -> usize {
        self.contents.len() - self.fatal
    }

    /// Labels of everything recorded so far, in order
    #[cfg(test)]
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.contents.iter().map(|err| err.label())
    }

    /// Add a new error to the pool
    fn register(&mut self, err: Error) {
        if err.fatal {
            self.fatal += 1;
        }
        self.contents.push(err);
    }
}

const RED: &str = "\x1b[0;91;1m";
const YELLOW: &str = "\x1b[0;93;1m";
const BLUE: &str = "\x1b[0;96;1m";
const WHITE: &str = "\x1b[0;1m";
const NONE: &str = "\x1b[0m";

/// Column at which the `-->` arrow of a code block should start
const GUTTER: usize = 3;
/// At most this many reports are printed for one record
const SHOWN: usize = 10;

/// How a report is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Fatal,
    Warning,
}

impl Severity {
    fn of(fatal: bool) -> Self {
        if fatal { Severity::Fatal } else { Severity::Warning }
    }

    fn color(self) -> &'static str {
        match self {
            Severity::Fatal => RED,
            Severity::Warning => YELLOW,
        }
    }

    /// (header of a single report, header of the recap, counted noun)
    fn words(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Severity::Fatal => ("Error", "Fatal", "error"),
            Severity::Warning => ("Warning", "Nonfatal", "warning"),
        }
    }
}

/// Write a block rendered by `pest` inside the margin of a report
///
/// The whole block is shifted right so that its location arrow
/// starts at `GUTTER`, decorations are colored on the fly.
fn code_block(f: &mut fmt::Formatter<'_>, color: &str, block: &str) -> fmt::Result {
    let indent = block.len() - block.trim_start_matches(' ').len();
    let shift = " ".repeat(GUTTER.saturating_sub(indent));
    for line in block.lines() {
        write!(f, " {}|  {}{}", color, shift, BLUE)?;
        for c in line.chars() {
            match c {
                '|' | '=' => write!(f, "{}{}", c, NONE)?,
                '^' => write!(f, "{}^", color)?,
                c => write!(f, "{}", c)?,
            }
        }
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = Severity::of(self.fatal);
        let color = severity.color();
        let (header, _, _) = severity.words();
        writeln!(f, "{}--> {}:{} {}{}", color, header, WHITE, self.label, NONE)?;
        for item in &self.items {
            match item {
                Item::Block(err) => code_block(f, color, &err.to_string())?,
                Item::Text(txt) => writeln!(f, " {}|  {}{}{}", color, WHITE, txt, NONE)?,
                Item::Hint(txt) => writeln!(f, " {}|      {}? hint: {}{}", color, BLUE, NONE, txt)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Record {
    /// Only reports of the worst severity present are shown, warnings
    /// are hidden as soon as there is an error
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        let severity = Severity::of(self.is_fatal());
        let color = severity.color();
        let count = match severity {
            Severity::Fatal => self.count_errors(),
            Severity::Warning => self.count_warnings(),
        };
        let worst = self.contents.iter().filter(|err| Severity::of(err.fatal) == severity);
        for err in worst.take(SHOWN) {
            writeln!(f, "{}", err)?;
        }
        if count > SHOWN {
            writeln!(f, "{} And {} more.", color, count - SHOWN)?;
        }
        let (_, recap, noun) = severity.words();
        let plural = if count > 1 { "s" } else { "" };
        writeln!(f, "{}{}: {}{} {}{} emitted{}", color, recap, WHITE, count, noun, plural, NONE)
    }
}

/// Convert rule names to user-friendly information about their purpose
#[allow(unreachable_patterns)]
fn rule_rename(rule: &Rule) -> String {
    use Rule::*;
    String::from(match rule {
        EOI => "end of line",
        identifier => "a benefit identifier (e.g. 'amex_dining')",
        amount => "a whole dollar amount",
        year => "a year ('YYYY')",
        month => "a month ('Jan' ... 'Dec')",
        day => "a day of the month",
        date => "a date ('YYYY-Mmm-DD')",
        cmd_check => "'check <benefit>'",
        cmd_uncheck => "'uncheck <benefit>'",
        cmd_set => "'set <benefit> <amount>'",
        cmd_clear => "'clear <benefit>'",
        cmd_reset => "'reset'",
        cmd_show => "'show'",
        cmd_date => "'date <YYYY-Mmm-DD>'",
        cmd_rollover => "'rollover'",
        cmd_help => "'help'",
        cmd_quit => "'quit'",
        command => "a command",
        program => "a sequence of commands",
        input => "a single command",
        date_input => "a single date",
        _ => "a separator",
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fatality_is_counted() {
        let mut record = Record::new();
        assert!(record.is_empty());
        Error::new("Out of range").nonfatal().with_text("ignored").register(&mut record);
        assert!(!record.is_fatal());
        assert_eq!(record.count_warnings(), 1);
        Error::new("Unknown benefit").register(&mut record);
        assert!(record.is_fatal());
        assert_eq!(record.count_errors(), 1);
        assert_eq!(record.labels().collect::<Vec<_>>(), vec!["Out of range", "Unknown benefit"]);
    }

    #[test]
    fn only_worst_errors_are_printed() {
        let mut record = Record::new();
        Error::new("Minor").nonfatal().register(&mut record);
        Error::new("Major").with_hint("fix it").register(&mut record);
        let text = format!("{}", record);
        assert!(text.contains("Major"));
        assert!(text.contains("? hint: "));
        assert!(!text.contains("Minor"));
        assert!(text.contains("1 error emitted"));
    }

    #[test]
    fn code_blocks_stay_in_the_margin() {
        let src = "check amex_lounge";
        let span = pest::Span::new(src, 6, 17).unwrap();
        let text = format!("{}", Error::new("Unknown benefit").with_span(&("october.perk", span), "referenced here"));
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(format!("{}--> Error:{} Unknown benefit{}", RED, WHITE, NONE).as_str()));
        let body = lines.collect::<Vec<_>>();
        assert!(body.len() > 3);
        assert!(body.iter().all(|line| line.starts_with(&format!(" {}|  ", RED))));
        assert!(body[0].contains("--> october.perk:1:7"));
        assert!(body.iter().any(|line| line.contains("check amex_lounge")));
        assert!(body.iter().any(|line| line.contains(&format!("{}^", RED))));
    }

    #[test]
    fn long_records_are_truncated() {
        let mut record = Record::new();
        for i in 0..13 {
            Error::new(format!("Warning number {}", i)).nonfatal().register(&mut record);
        }
        let text = format!("{}", record);
        assert!(text.contains("Warning number 9"));
        assert!(!text.contains("Warning number 10"));
        assert!(text.contains(" And 3 more."));
        assert!(text.contains(&format!("Nonfatal: {}13 warnings emitted", WHITE)));
    }

    #[test]
    fn empty_record_prints_nothing() {
        assert_eq!(format!("{}", Record::new()), "");
    }
}
