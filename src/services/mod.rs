//! Service layer containing API access and presentation helpers.
//!
//! ## Service map
//! - `gateway.rs`: authenticated API client + envelope interpretation.
//! - `config.rs`: credential and base URL resolution.
//! - `projection.rs`: record → display row / field table reshaping.
//! - `table.rs`: grid table rendering.
//! - `output.rs`: JSON/table/diagnostic output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Network side effects live in `gateway.rs` only.
//! - Keep command handlers thin; delegate to services.

pub mod config;
pub mod gateway;
pub mod output;
pub mod projection;
pub mod table;
