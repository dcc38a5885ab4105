//! Shared data model layer (structs/constants only).
//!
//! ## Files
//! - `models.rs`: envelope wrapper, record summaries, query modes, time window.
//! - `constants.rs`: API defaults, status codes, column sets.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! `--outjson` prints `Envelope::data` untouched. Anything that reshapes a
//! payload belongs to the table path in `services::projection`.

pub mod constants;
pub mod models;
