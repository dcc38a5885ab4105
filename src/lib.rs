//! Client for the ecrime.ch threat-intelligence API.
//!
//! ## Layout
//! - `cli.rs`: clap argument model.
//! - `commands/`: subcommand handlers (login, events, leaksites, actors).
//! - `domain/`: envelope, record summaries, query modes, constants.
//! - `services/`: API gateway, config, projection, table and output helpers.

pub mod cli;
pub mod commands;
pub mod domain;
pub mod services;
