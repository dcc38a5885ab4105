use crate::domain::constants::{
    ACTOR_DETAIL_EXCLUDED, ACTOR_HEADERS, DETAIL_WRAP_WIDTH, EVENT_DETAIL_EXCLUDED, EVENT_HEADERS,
    LEAKSITE_HEADERS,
};
use crate::domain::models::{ActorQuery, EventQuery, LeaksiteQuery};
use crate::services::gateway::{ApiError, Gateway};
use crate::services::output::{print_data_json, print_detail, print_records};
use crate::services::projection::{
    actor_row, detail_rows, event_row, has_status_history, leaksite_row,
};
use anyhow::Context;
use std::io::Write;
use tracing::debug;

pub fn events(
    api: &dyn Gateway,
    out: &mut dyn Write,
    query: &EventQuery,
    json: bool,
) -> anyhow::Result<()> {
    debug!(?query, "events");
    let endpoint = query.endpoint();

    let EventQuery::Lookup { id } = query else {
        let envelope = api
            .get(&endpoint)
            .context("unable to list/search events")?;
        return print_records(out, json, &envelope, &EVENT_HEADERS, event_row);
    };

    let envelope = api
        .get(&endpoint)
        .with_context(|| format!("error searching for event ID: {}", id))?;
    if json {
        return print_data_json(out, envelope.data());
    }

    let record = envelope
        .records()
        .first()
        .filter(|r| has_status_history(r))
        .ok_or_else(|| ApiError::NotFound {
            kind: "events",
            id: id.clone(),
        })?;
    print_detail(
        out,
        detail_rows(record, EVENT_DETAIL_EXCLUDED, DETAIL_WRAP_WIDTH)?,
    )
}

pub fn leaksites(
    api: &dyn Gateway,
    out: &mut dyn Write,
    query: &LeaksiteQuery,
    json: bool,
) -> anyhow::Result<()> {
    debug!(?query, "leaksites");
    let envelope = api
        .get(&query.endpoint())
        .context("unable to list/search leaksites")?;
    print_records(out, json, &envelope, &LEAKSITE_HEADERS, leaksite_row)
}

pub fn actors(
    api: &dyn Gateway,
    out: &mut dyn Write,
    query: &ActorQuery,
    json: bool,
) -> anyhow::Result<()> {
    debug!(?query, "actors");
    let endpoint = query.endpoint();

    let ActorQuery::Lookup(id) = query else {
        let envelope = api
            .get(&endpoint)
            .context("unable to list/search actors")?;
        return print_records(out, json, &envelope, &ACTOR_HEADERS, actor_row);
    };

    let envelope = api
        .get(&endpoint)
        .with_context(|| format!("error searching for ID: {}", id))?;
    if json {
        return print_data_json(out, envelope.data());
    }

    let record = envelope.records().first().ok_or_else(|| ApiError::NotFound {
        kind: "actors",
        id: id.clone(),
    })?;
    print_detail(
        out,
        detail_rows(record, ACTOR_DETAIL_EXCLUDED, DETAIL_WRAP_WIDTH)?,
    )
}
