use crate::record::Incident;
use chrono::Datelike;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Incident count for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCount {
    pub date: String,
    pub count: u64,
}

/// Incident count for one label (category, priority, state, month, assignee).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelCount {
    pub name: String,
    pub value: u64,
}

/// Mean resolution time in hours for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAverage {
    pub category: String,
    pub average: f64,
}

/// Fixed display order for priority labels; anything else sorts after.
const PRIORITY_ORDER: &[&str] = &[
    "1 - Critical",
    "2 - High",
    "3 - Moderate",
    "4 - Low",
    "Unspecified",
];

/// Assignee rows shown per chart.
const ASSIGNEE_LIMIT: usize = 15;
/// Resolution-time rows shown per chart.
const RESOLUTION_LIMIT: usize = 10;

/// Incident counts per calendar day, ascending. Records without a parsed
/// creation date are excluded.
pub fn by_day(incidents: &[Incident]) -> Vec<DayCount> {
    let mut days: BTreeMap<String, u64> = BTreeMap::new();
    for inc in incidents {
        if let Some(date) = inc.created_date {
            *days.entry(date.format("%Y-%m-%d").to_string()).or_insert(0) += 1;
        }
    }
    days.into_iter()
        .map(|(date, count)| DayCount { date, count })
        .collect()
}

/// Incident counts per calendar month, ascending by (year, month). Records
/// without a parsed creation date are excluded.
pub fn by_month(incidents: &[Incident]) -> Vec<LabelCount> {
    let mut months: BTreeMap<(i32, u32), (String, u64)> = BTreeMap::new();
    for inc in incidents {
        if let Some(date) = inc.created_date {
            let entry = months
                .entry((date.year(), date.month()))
                .or_insert_with(|| (date.format("%b %Y").to_string(), 0));
            entry.1 += 1;
        }
    }
    months
        .into_values()
        .map(|(name, value)| LabelCount { name, value })
        .collect()
}

/// Incident counts per category, most frequent first.
pub fn by_category(incidents: &[Incident]) -> Vec<LabelCount> {
    let mut rows = count_by(incidents, |inc| label_or(&inc.category, "Uncategorized"));
    rows.sort_by(|a, b| b.value.cmp(&a.value));
    rows
}

/// Incident counts per state, most frequent first.
pub fn by_state(incidents: &[Incident]) -> Vec<LabelCount> {
    let mut rows = count_by(incidents, |inc| label_or(&inc.state, "Unknown"));
    rows.sort_by(|a, b| b.value.cmp(&a.value));
    rows
}

/// Incident counts per priority, in the fixed critical-to-low display
/// order. Labels outside the known set keep their first-seen order at the
/// end.
pub fn by_priority(incidents: &[Incident]) -> Vec<LabelCount> {
    let mut rows = count_by(incidents, |inc| label_or(&inc.priority, "Unspecified"));
    rows.sort_by_key(|row| priority_rank(&row.name));
    rows
}

/// Incident counts for the busiest assignees, most loaded first.
pub fn by_assignee(incidents: &[Incident]) -> Vec<LabelCount> {
    let mut rows = count_by(incidents, |inc| label_or(&inc.assigned_to, "Unassigned"));
    rows.sort_by(|a, b| b.value.cmp(&a.value));
    rows.truncate(ASSIGNEE_LIMIT);
    rows
}

/// Mean resolution time per category, slowest first. Only closed incidents
/// with a positive duration contribute; categories with no contributing
/// records are omitted rather than reported as zero.
pub fn avg_resolution_by_category(incidents: &[Incident]) -> Vec<CategoryAverage> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(String, f64, u64)> = Vec::new();

    for inc in incidents {
        if inc.state != "Closed" || inc.business_duration_hours <= 0.0 {
            continue;
        }
        let category = label_or(&inc.category, "Uncategorized");
        let slot = match index.get(&category) {
            Some(&i) => i,
            None => {
                index.insert(category.clone(), buckets.len());
                buckets.push((category, 0.0, 0));
                buckets.len() - 1
            }
        };
        buckets[slot].1 += inc.business_duration_hours;
        buckets[slot].2 += 1;
    }

    let mut rows: Vec<CategoryAverage> = buckets
        .into_iter()
        .map(|(category, sum, n)| CategoryAverage {
            category,
            average: round2(sum / n as f64),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.average
            .partial_cmp(&a.average)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows.truncate(RESOLUTION_LIMIT);
    rows
}

/// Count incidents per label, preserving first-seen order so that later
/// stable sorts break ties by encounter order.
fn count_by<F>(incidents: &[Incident], label: F) -> Vec<LabelCount>
where
    F: Fn(&Incident) -> String,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<LabelCount> = Vec::new();
    for inc in incidents {
        let name = label(inc);
        match index.get(&name) {
            Some(&i) => rows[i].value += 1,
            None => {
                index.insert(name.clone(), rows.len());
                rows.push(LabelCount { name, value: 1 });
            }
        }
    }
    rows
}

fn label_or(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

fn priority_rank(label: &str) -> usize {
    PRIORITY_ORDER
        .iter()
        .position(|p| *p == label)
        .unwrap_or(PRIORITY_ORDER.len())
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
