use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::Parser;

use crate::error::parse_date;

#[derive(Parser, Debug, Clone)]
#[command(name = "birthday-countdown")]
#[command(about = "Age calculator with a countdown to the next birthday", long_about = None)]
pub struct Config {
    /// Birth date (YYYY-MM-DD). Without it, dates are read from stdin one per line
    #[arg(long, env = "BIRTH_DATE", value_parser = parse_date)]
    pub birth_date: Option<NaiveDate>,

    /// Reference date to compute against instead of the local date
    #[arg(long, env = "BIRTHDAY_TODAY", value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    /// Directory the SVG age cards are written to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Do not write SVG age cards
    #[arg(long)]
    pub no_svg: bool,

    /// Print each reading as JSON instead of the text card
    #[arg(long)]
    pub json: bool,

    /// Seconds the birthday celebration stays visible
    #[arg(long, default_value_t = 5)]
    pub celebration_secs: u64,

    /// Run in verbose mode
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn celebration_delay(&self) -> Duration {
        Duration::from_secs(self.celebration_secs)
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Parses `args` (without the program name) ignoring `BIRTH_DATE` and
/// `BIRTHDAY_TODAY`, so results do not depend on the caller's environment.
#[cfg(test)]
pub(crate) fn parse_args(args: &[&str]) -> Result<Config, clap::Error> {
    use clap::{CommandFactory, FromArgMatches};

    let command = Config::command()
        .mut_arg("birth_date", |arg| arg.env(None::<&'static str>))
        .mut_arg("today", |arg| arg.env(None::<&'static str>));
    let argv = std::iter::once("birthday-countdown").chain(args.iter().copied());
    let matches = command.try_get_matches_from(argv)?;
    Config::from_arg_matches(&matches)
}
