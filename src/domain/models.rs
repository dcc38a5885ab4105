use crate::domain::constants::{DEFAULT_WINDOW_DAYS, STATUS_OK};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

static NULL: Value = Value::Null;

/// Parsed response body. Holds exactly what the server sent; accessors read
/// the `status`/`message`/`data` members without reshaping anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Envelope(Value);

impl Envelope {
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    /// Application status. Missing or unreadable reads as `0`.
    pub fn status(&self) -> i64 {
        match self.0.get("status") {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status() == STATUS_OK
    }

    pub fn message(&self) -> Option<String> {
        self.0.get("message").and_then(cell_text)
    }

    pub fn data(&self) -> &Value {
        self.0.get("data").unwrap_or(&NULL)
    }

    /// Records carried in `data`. A bare object counts as a single record.
    pub fn records(&self) -> &[Value] {
        match self.data() {
            Value::Array(items) => items,
            obj @ Value::Object(_) => std::slice::from_ref(obj),
            _ => &[],
        }
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display text for a JSON value: strings as-is, null as absent, anything
/// else in compact JSON.
pub fn cell_text(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn display_cell<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(cell_text(&v))
}

/// `name_alt` arrives as either `"a,b"` or `["a", "b"]`.
fn alt_names<'de, D>(d: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => vec![s],
        Value::Array(items) => items.iter().filter_map(cell_text).collect(),
        _ => Vec::new(),
    })
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct EventSummary {
    #[serde(deserialize_with = "display_cell")]
    pub id: Option<String>,
    #[serde(deserialize_with = "display_cell")]
    pub leak_site: Option<String>,
    #[serde(deserialize_with = "display_cell")]
    pub leak_title: Option<String>,
    #[serde(deserialize_with = "display_cell")]
    pub country: Option<String>,
    #[serde(deserialize_with = "display_cell")]
    pub first_seen: Option<String>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LeaksiteSummary {
    #[serde(deserialize_with = "display_cell")]
    pub id: Option<String>,
    #[serde(deserialize_with = "display_cell")]
    pub leaksite_name: Option<String>,
    #[serde(deserialize_with = "display_cell")]
    pub last_seen: Option<String>,
    #[serde(deserialize_with = "display_cell")]
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ActorSummary {
    #[serde(deserialize_with = "display_cell")]
    pub id: Option<String>,
    #[serde(deserialize_with = "display_cell")]
    pub name: Option<String>,
    #[serde(rename = "name_alt", deserialize_with = "alt_names")]
    pub alt_names: Vec<String>,
}

/// Inclusive day window for event list/search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl TimeWindow {
    /// Fills in whichever bound is missing: `to` defaults to `today`, `from`
    /// to `DEFAULT_WINDOW_DAYS` before `today`.
    pub fn resolve(from: Option<NaiveDate>, to: Option<NaiveDate>, today: NaiveDate) -> Self {
        let default_from = today
            .checked_sub_days(Days::new(DEFAULT_WINDOW_DAYS))
            .unwrap_or(NaiveDate::MIN);
        Self {
            from: from.unwrap_or(default_from),
            to: to.unwrap_or(today),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventQuery {
    Lookup { id: String },
    Search { text: String, window: TimeWindow },
    List { window: TimeWindow },
}

impl EventQuery {
    pub fn new(id: Option<String>, search: Option<String>, window: TimeWindow) -> Self {
        match (id, search) {
            (Some(id), _) => EventQuery::Lookup { id },
            (None, Some(text)) => EventQuery::Search { text, window },
            (None, None) => EventQuery::List { window },
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            EventQuery::Lookup { id } => Endpoint::EventView { id: id.clone() },
            EventQuery::Search { text, window } => Endpoint::EventSearch {
                text: text.clone(),
                window: *window,
            },
            EventQuery::List { window } => Endpoint::EventList { window: *window },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaksiteQuery {
    Search(String),
    Online,
    All,
}

impl LeaksiteQuery {
    /// Search text wins over `--online`; the online flag is ignored when both
    /// are given.
    pub fn new(search: Option<String>, online: bool) -> Self {
        match search {
            Some(text) => LeaksiteQuery::Search(text),
            None if online => LeaksiteQuery::Online,
            None => LeaksiteQuery::All,
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            LeaksiteQuery::Search(text) => Endpoint::LeaksiteSearch { text: text.clone() },
            LeaksiteQuery::Online => Endpoint::LeaksiteOnline,
            LeaksiteQuery::All => Endpoint::LeaksiteList,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorQuery {
    Lookup(String),
    Search(String),
    All,
}

impl ActorQuery {
    pub fn new(id: Option<String>, search: Option<String>) -> Self {
        match (id, search) {
            (Some(id), _) => ActorQuery::Lookup(id),
            (None, Some(text)) => ActorQuery::Search(text),
            (None, None) => ActorQuery::All,
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            ActorQuery::Lookup(id) => Endpoint::ActorView { id: id.clone() },
            ActorQuery::Search(text) => Endpoint::ActorSearch { text: text.clone() },
            ActorQuery::All => Endpoint::ActorList,
        }
    }
}

/// Every API route the client knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    EventList { window: TimeWindow },
    EventSearch { text: String, window: TimeWindow },
    EventView { id: String },
    LeaksiteList,
    LeaksiteOnline,
    LeaksiteSearch { text: String },
    ActorList,
    ActorSearch { text: String },
    ActorView { id: String },
}

impl Endpoint {
    /// Path segments below the base URL, unencoded.
    pub fn segments(&self) -> Vec<String> {
        fn owned(parts: &[&str]) -> Vec<String> {
            parts.iter().map(|p| p.to_string()).collect()
        }
        fn with_window(mut parts: Vec<String>, window: &TimeWindow) -> Vec<String> {
            parts.extend([
                "from".to_string(),
                window.from.to_string(),
                "to".to_string(),
                window.to.to_string(),
            ]);
            parts
        }

        match self {
            Endpoint::Login => owned(&["login"]),
            Endpoint::EventList { window } => with_window(owned(&["events", "list"]), window),
            Endpoint::EventSearch { text, window } => {
                with_window(vec!["events".into(), "search".into(), text.clone()], window)
            }
            Endpoint::EventView { id } => vec!["events".into(), "view".into(), id.clone()],
            Endpoint::LeaksiteList => owned(&["leaksites", "list"]),
            Endpoint::LeaksiteOnline => owned(&["leaksites", "list", "online"]),
            Endpoint::LeaksiteSearch { text } => {
                vec!["leaksites".into(), "search".into(), text.clone()]
            }
            Endpoint::ActorList => owned(&["actors", "list"]),
            Endpoint::ActorSearch { text } => vec!["actors".into(), "search".into(), text.clone()],
            Endpoint::ActorView { id } => vec!["actors".into(), "view".into(), id.clone()],
        }
    }

    /// Human-readable path, e.g. `/events/view/42/`.
    pub fn path(&self) -> String {
        format!("/{}/", self.segments().join("/"))
    }
}
