//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `session.rs`: `login` auth check.
//! - `intel.rs`: events / leaksites / actors lookups and searches.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate API access and reshaping to `services/*`.
//! - Handlers write to the `out` they are given, never straight to stdout.

pub mod intel;
pub mod session;
#[cfg(test)]
pub mod testing;

use crate::cli::Commands;
use crate::domain::models::{ActorQuery, EventQuery, LeaksiteQuery, TimeWindow};
use crate::services::gateway::Gateway;
use chrono::NaiveDate;
use std::io::Write;

pub use intel::{actors, events, leaksites};
pub use session::login;

/// Runs one subcommand. `today` anchors the default event window.
pub fn dispatch(
    command: &Commands,
    api: &dyn Gateway,
    out: &mut dyn Write,
    today: NaiveDate,
) -> anyhow::Result<()> {
    match command {
        Commands::Login => login(api, out),
        Commands::Events {
            event_id,
            search,
            from_timestamp,
            to_timestamp,
            outjson,
        } => {
            let window = TimeWindow::resolve(*from_timestamp, *to_timestamp, today);
            let query = EventQuery::new(event_id.clone(), search.clone(), window);
            events(api, out, &query, *outjson)
        }
        Commands::Leaksites {
            search,
            online,
            outjson,
        } => {
            let query = LeaksiteQuery::new(search.clone(), *online);
            leaksites(api, out, &query, *outjson)
        }
        Commands::Actors {
            actor_id,
            search,
            outjson,
        } => {
            let query = ActorQuery::new(actor_id.clone(), search.clone());
            actors(api, out, &query, *outjson)
        }
    }
}
