//! Display decoration for the backend's user record.

use jiff::{civil::DateTime, tz::TimeZone, Timestamp};
use serde_json::{Map, Value};
use tracing::warn;

/// Shown in place of a timestamp the backend did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `(source field, derived display field)`
const TIMESTAMP_FIELDS: [(&str, &str); 2] = [
    ("created_at", "created_at_display"),
    ("last_login_at", "last_login_at_display"),
];

/// Parse an ISO-8601 timestamp. Strings without an offset are taken as UTC,
/// which is how the backend serializes naive datetimes.
fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(timestamp) = raw.parse::<Timestamp>() {
        return Some(timestamp);
    }

    raw.parse::<DateTime>()
        .ok()
        .and_then(|datetime| datetime.to_zoned(TimeZone::UTC).ok())
        .map(|zoned| zoned.timestamp())
}

/// Render a raw JSON field as local time in `timezone`, or [`NOT_AVAILABLE`].
#[must_use]
pub fn localize(value: Option<&Value>, timezone: &TimeZone) -> String {
    let Some(raw) = value.and_then(Value::as_str) else {
        return NOT_AVAILABLE.to_string();
    };

    match parse_timestamp(raw) {
        Some(timestamp) => timestamp
            .to_zoned(timezone.clone())
            .strftime(DISPLAY_FORMAT)
            .to_string(),
        None => {
            warn!("Unparseable timestamp from backend: {raw:?}");
            NOT_AVAILABLE.to_string()
        }
    }
}

/// Add the `*_display` fields next to the backend's timestamps.
pub fn decorate_user(user: &mut Map<String, Value>, timezone: &TimeZone) {
    for (source, derived) in TIMESTAMP_FIELDS {
        let display = localize(user.get(source), timezone);
        user.insert(derived.to_string(), Value::String(display));
    }
}
