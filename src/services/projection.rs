use crate::domain::constants::PLACEHOLDER;
use crate::domain::models::{cell_text, ActorSummary, EventSummary, LeaksiteSummary};
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde_json::Value;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

fn cell(v: Option<String>) -> String {
    v.unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn summary<T: DeserializeOwned>(record: &Value) -> anyhow::Result<T> {
    T::deserialize(record).context("unexpected record shape")
}

pub fn summaries<T: DeserializeOwned>(records: &[Value]) -> anyhow::Result<Vec<T>> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| summary(r).with_context(|| format!("record #{}", i)))
        .collect()
}

pub fn event_row(e: EventSummary) -> Vec<String> {
    vec![
        cell(e.id),
        cell(e.leak_site),
        cell(e.leak_title),
        cell(e.country),
        cell(e.first_seen),
    ]
}

pub fn leaksite_row(s: LeaksiteSummary) -> Vec<String> {
    vec![
        cell(s.id),
        cell(s.leaksite_name),
        cell(s.last_seen),
        cell(s.url),
    ]
}

pub fn actor_row(a: ActorSummary) -> Vec<String> {
    vec![cell(a.id), cell(a.name), a.alt_names.join(",")]
}

/// An event is only shown in detail when its status history has entries.
pub fn has_status_history(record: &Value) -> bool {
    match record.get("status") {
        None | Some(Value::Null) => false,
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Field/value pairs of a record in received order, minus `excluded`.
pub fn detail_rows(
    record: &Value,
    excluded: &[&str],
    width: usize,
) -> anyhow::Result<Vec<Vec<String>>> {
    let fields = record
        .as_object()
        .context("record is not a JSON object")?;
    Ok(fields
        .iter()
        .filter(|(k, _)| !excluded.contains(&k.as_str()))
        .map(|(k, v)| {
            let text = cell(cell_text(v));
            vec![k.clone(), wrap(&text, width).join("\n")]
        })
        .collect())
}

/// Greedy word wrap on whitespace, measured in terminal columns. Words wider
/// than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0usize;

    for word in text.split_whitespace() {
        let len = word.width();
        if line_len > 0 && line_len + 1 + len <= width {
            line.push(' ');
            line.push_str(word);
            line_len += 1 + len;
            continue;
        }
        if line_len > 0 {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if len <= width {
            line.push_str(word);
            line_len = len;
            continue;
        }

        for ch in word.chars() {
            let w = ch.width().unwrap_or(0);
            if line_len > 0 && line_len + w > width {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            line.push(ch);
            line_len += w;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
