use crate::domain::constants::API_URL_ENV;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use std::io::Write;

#[derive(Parser, Debug)]
#[command(
    name = "ecrime",
    version,
    about = "A CLI tool to interact with eCrime.ch",
    after_help = "Requires the ECRIME_API_KEY environment variable."
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = API_URL_ENV,
        help = "API base URL (overrides ~/.config/ecrime/config.toml)"
    )]
    pub api_url: Option<String>,
    #[arg(short, long, global = true, help = "Debug logging on stderr")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Test authentication
    Login,
    /// Events - List / Search - (Defaults to last 30 days)
    Events {
        #[arg(long = "event_id", visible_alias = "event-id", help = "View specific id")]
        event_id: Option<String>,
        #[arg(long, help = "Search tracked events")]
        search: Option<String>,
        #[arg(
            long = "from_timestamp",
            visible_alias = "from",
            value_parser = parse_date,
            help = "Start date in YYYY-MM-DD format (e.g. 2023-01-01)"
        )]
        from_timestamp: Option<NaiveDate>,
        #[arg(
            long = "to_timestamp",
            visible_alias = "to",
            value_parser = parse_date,
            help = "End date in YYYY-MM-DD format (e.g. 2023-12-31)"
        )]
        to_timestamp: Option<NaiveDate>,
        #[arg(long, help = "Output JSON response")]
        outjson: bool,
    },
    /// Leaksites - List / Search / Online
    Leaksites {
        #[arg(long, help = "Search leaksites")]
        search: Option<String>,
        #[arg(long, help = "Show online leaksites (ignored with --search)")]
        online: bool,
        #[arg(long, help = "Output JSON response")]
        outjson: bool,
    },
    /// Actors - View / Search / List
    Actors {
        #[arg(long = "actor_id", visible_alias = "actor-id", help = "View actor by id")]
        actor_id: Option<String>,
        #[arg(long, help = "Search actor profiles")]
        search: Option<String>,
        #[arg(long, help = "Output JSON response")]
        outjson: bool,
    },
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got '{}': {}", raw, e))
}

/// Top-level help, shown when no subcommand is given.
pub fn write_help(out: &mut dyn Write) -> anyhow::Result<()> {
    write!(out, "{}", Cli::command().render_help())?;
    out.flush()?;
    Ok(())
}
