pub const DEFAULT_API_URL: &str = "https://ecrime.ch/api/v1";

pub const API_KEY_ENV: &str = "ECRIME_API_KEY";
pub const API_URL_ENV: &str = "ECRIME_API_URL";
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Envelope status codes, independent of the HTTP status line.
pub const STATUS_OK: i64 = 200;
pub const STATUS_UNAUTHORIZED: i64 = 403;

/// Events are listed for this many days back when no window is given.
pub const DEFAULT_WINDOW_DAYS: u64 = 30;

/// Column width for values in field/value detail tables.
pub const DETAIL_WRAP_WIDTH: usize = 110;

pub const PLACEHOLDER: &str = "-";

pub const EVENT_DETAIL_EXCLUDED: &[&str] = &["extra", "logo", "status"];
pub const ACTOR_DETAIL_EXCLUDED: &[&str] = &["screenshot_image"];

pub const EVENT_HEADERS: [&str; 5] = ["id", "Leak Site", "Leak Title", "Country", "First Seen"];
pub const LEAKSITE_HEADERS: [&str; 4] = ["id", "Leak Site", "Last Seen", "URL"];
pub const ACTOR_HEADERS: [&str; 3] = ["id", "Name", "Alt Names"];
