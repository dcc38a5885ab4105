use crate::domain::models::Envelope;
use crate::services::gateway::ApiError;
use crate::services::projection::summaries;
use crate::services::table::Table;
use colored::Colorize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::io::Write;
use tracing::debug;

/// `data` exactly as received, compact, one line.
pub fn print_data_json(out: &mut dyn Write, data: &Value) -> anyhow::Result<()> {
    writeln!(out, "{}", serde_json::to_string(data)?)?;
    Ok(())
}

/// Either the raw `data` payload or one table row per record.
pub fn print_records<T: DeserializeOwned>(
    out: &mut dyn Write,
    json: bool,
    envelope: &Envelope,
    headers: &[&str],
    row: impl Fn(T) -> Vec<String>,
) -> anyhow::Result<()> {
    if json {
        return print_data_json(out, envelope.data());
    }
    let mut table = Table::with_headers(headers);
    for record in summaries::<T>(envelope.records())? {
        table.push_row(row(record));
    }
    writeln!(out, "{}", table.render())?;
    Ok(())
}

pub fn print_detail(out: &mut dyn Write, fields: Vec<Vec<String>>) -> anyhow::Result<()> {
    let mut table = Table::plain();
    for f in fields {
        table.push_row(f);
    }
    writeln!(out, "{}", table.render())?;
    Ok(())
}

/// Writes a failure and its causes to stderr. Unauthorized failures get the
/// `[X]` marker, everything else `[!]`.
pub fn report_error(err: &anyhow::Error) {
    let api = err.chain().find_map(|c| c.downcast_ref::<ApiError>());
    if let Some(api) = api {
        debug!(kind = api.kind(), "command failed");
    }
    let marker = match api {
        Some(ApiError::Unauthorized { .. }) => "[X]".red().bold(),
        _ => "[!]".yellow().bold(),
    };
    eprintln!("{} {}", marker, err);
    for cause in err.chain().skip(1) {
        eprintln!("    caused by: {}", cause);
    }
    if let Some(envelope) = api.and_then(ApiError::envelope) {
        eprintln!("    response: {}", envelope);
    }
}
