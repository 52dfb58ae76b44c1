use crate::aggregate::round2;
use crate::record::Incident;
use crate::team::LocalAssignees;
use serde::Serialize;

/// Headline numbers for one loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStats {
    pub total: usize,
    pub open: usize,
    pub closed: usize,
    pub high_priority: usize,
    /// Mean hours over closed incidents with a positive duration; 0.0 when
    /// none qualify.
    pub avg_resolution_hours: f64,
}

/// Per-assignee workload and performance numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssigneeMetrics {
    pub name: String,
    pub total: usize,
    pub avg_resolution_hours: f64,
    pub high_priority_pct: f64,
}

/// Dataset split between the local team and everyone else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocalGroupSplit {
    pub local: usize,
    pub group: usize,
}

fn is_resolved(inc: &Incident) -> bool {
    inc.state == "Closed" || inc.state == "Resolved"
}

fn is_high_priority(inc: &Incident) -> bool {
    inc.priority == "1 - Critical" || inc.priority == "2 - High"
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

pub fn dataset_stats(records: &[Incident]) -> DatasetStats {
    let total = records.len();
    let closed = records.iter().filter(|inc| is_resolved(inc)).count();
    let high_priority = records.iter().filter(|inc| is_high_priority(inc)).count();
    let durations: Vec<f64> = records
        .iter()
        .filter(|inc| is_resolved(inc) && inc.business_duration_hours > 0.0)
        .map(|inc| inc.business_duration_hours)
        .collect();

    DatasetStats {
        total,
        open: total - closed,
        closed,
        high_priority,
        avg_resolution_hours: round2(mean(&durations)),
    }
}

/// One metrics row per local assignee, in roster order. Assignees with no
/// incidents in the dataset still get a row, with zeroes.
pub fn assignee_performance(
    records: &[Incident],
    local: &LocalAssignees,
) -> Vec<AssigneeMetrics> {
    local
        .names()
        .iter()
        .map(|name| {
            let assigned: Vec<&Incident> = records
                .iter()
                .filter(|inc| inc.assigned_to == *name)
                .collect();
            let total = assigned.len();
            let durations: Vec<f64> = assigned
                .iter()
                .filter(|inc| is_resolved(inc) && inc.business_duration_hours > 0.0)
                .map(|inc| inc.business_duration_hours)
                .collect();
            let high = assigned.iter().filter(|inc| is_high_priority(inc)).count();
            let high_priority_pct = if total == 0 {
                0.0
            } else {
                high as f64 / total as f64 * 100.0
            };

            AssigneeMetrics {
                name: name.clone(),
                total,
                avg_resolution_hours: round2(mean(&durations)),
                high_priority_pct: round2(high_priority_pct),
            }
        })
        .collect()
}

pub fn local_group_split(records: &[Incident], local: &LocalAssignees) -> LocalGroupSplit {
    let local_count = records
        .iter()
        .filter(|inc| local.contains(&inc.assigned_to))
        .count();
    LocalGroupSplit {
        local: local_count,
        group: records.len() - local_count,
    }
}
