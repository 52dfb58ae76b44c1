use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One parsed row from an uploaded file: column name -> cell text.
pub type RawRow = BTreeMap<String, String>;

/// A single incident record: the raw fields from the source export plus
/// the fields derived once at ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    #[serde(rename = "Number")]
    pub number: String,
    #[serde(rename = "Active", default)]
    pub active: String,
    #[serde(rename = "Caller", default)]
    pub caller: String,
    #[serde(rename = "Created", default)]
    pub created: String,
    #[serde(rename = "Activity due", default)]
    pub activity_due: Option<String>,
    #[serde(rename = "Short description", default)]
    pub short_description: String,
    #[serde(rename = "Approval", default)]
    pub approval: String,
    #[serde(rename = "Assigned to", default)]
    pub assigned_to: String,
    #[serde(rename = "Business duration", default)]
    pub business_duration: String,
    #[serde(rename = "State", default)]
    pub state: String,
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "Impact", default)]
    pub impact: String,
    #[serde(rename = "Urgency", default)]
    pub urgency: String,
    #[serde(rename = "Priority", default)]
    pub priority: String,

    /// Parsed from `created`; `None` when the source text is empty or in an
    /// unrecognized format. Date-keyed aggregations skip such records.
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
    /// `business_duration` seconds as hours; 0.0 when absent or non-numeric.
    #[serde(default)]
    pub business_duration_hours: f64,
}

/// Timestamp formats seen in incident exports, tried after RFC 3339.
const CREATED_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
];

/// Build a typed record from a parsed row. Pure: the row is read, never
/// mutated, and parse failures degrade to the documented defaults instead
/// of erroring.
pub fn normalize(row: &RawRow) -> Incident {
    let field = |name: &str| row.get(name).cloned().unwrap_or_default();

    let created = field("Created");
    let business_duration = field("Business duration");
    let created_date = parse_created(&created);
    let business_duration_hours = duration_hours(&business_duration);

    Incident {
        number: field("Number"),
        active: field("Active"),
        caller: field("Caller"),
        activity_due: row.get("Activity due").cloned(),
        short_description: field("Short description"),
        approval: field("Approval"),
        assigned_to: field("Assigned to"),
        state: field("State"),
        category: field("Category"),
        impact: field("Impact"),
        urgency: field("Urgency"),
        priority: field("Priority"),
        created,
        business_duration,
        created_date,
        business_duration_hours,
    }
}

/// Parse a `Created` timestamp. Timezone-less values are taken as UTC.
pub fn parse_created(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in CREATED_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(DateTime::from_naive_utc_and_offset(dt, Utc));
        }
    }

    // Date-only exports carry no time component; midnight it is
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d
            .and_hms_opt(0, 0, 0)
            .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc));
    }

    None
}

/// Convert a string-encoded duration in seconds to hours. Only the leading
/// integer of the string is read; anything unparseable or negative is 0.
fn duration_hours(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let unsigned = match trimmed.strip_prefix('-') {
        Some(_) => return 0.0,
        None => trimmed.strip_prefix('+').unwrap_or(trimmed),
    };

    let digits: String = unsigned
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return 0.0;
    }

    match digits.parse::<i64>() {
        Ok(seconds) => seconds as f64 / 3600.0,
        Err(_) => 0.0,
    }
}
