use crate::record::Incident;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;

/// Detail views never render more rows than this; callers that need the
/// full result set must not go through `filter_and_search`.
pub const DETAIL_VIEW_CAP: usize = 100;

/// Filter the dataset for a detail view: caller predicate first, then a
/// case-insensitive substring query, newest first, capped at
/// [`DETAIL_VIEW_CAP`] rows. The input is untouched; matches are returned
/// as owned clones.
pub fn filter_and_search(
    records: &[Incident],
    predicate: Option<&dyn Fn(&Incident) -> bool>,
    query: &str,
) -> Vec<Incident> {
    let query = query.to_lowercase();
    let mut matched: Vec<Incident> = records
        .iter()
        .filter(|inc| predicate.map_or(true, |accept| accept(inc)))
        .filter(|inc| query.is_empty() || matches_query(inc, &query))
        .cloned()
        .collect();

    sort_newest_first(&mut matched);
    matched.truncate(DETAIL_VIEW_CAP);
    matched
}

/// The `limit` most recently created incidents.
pub fn recent(records: &[Incident], limit: usize) -> Vec<Incident> {
    let mut rows = records.to_vec();
    sort_newest_first(&mut rows);
    rows.truncate(limit);
    rows
}

/// Fields a free-text query is tested against. `query` must already be
/// lowercased.
fn matches_query(inc: &Incident, query: &str) -> bool {
    [
        &inc.number,
        &inc.short_description,
        &inc.category,
        &inc.assigned_to,
        &inc.state,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(query))
}

/// Records without a creation date sort as if dated at the epoch (oldest).
fn sort_newest_first(records: &mut [Incident]) {
    records.sort_by_key(|inc| Reverse(inc.created_date.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)));
}
