//! # Filter Engine
//!
//! Applies the dashboard's search box and status tabs to a set of batch
//! views. Both are passed in explicitly; a batch must match the text query
//! and the status category to be kept. Input order is preserved.

use super::types::BatchView;
use crate::constants::StatusFilter;

/// Keep the batches matching both `query` and `status_filter`.
pub fn apply_filters<'a>(
    views: &'a [BatchView],
    query: &str,
    status_filter: StatusFilter,
) -> Vec<&'a BatchView> {
    let needle = query.to_lowercase();
    views
        .iter()
        .filter(|view| matches_text(view, &needle) && matches_status(view, status_filter))
        .collect()
}

/// Case-insensitive substring match on group name or dress type.
///
/// `needle` must already be lowercased. An empty needle matches everything.
pub fn matches_text(view: &BatchView, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    view.batch.group_name.to_lowercase().contains(needle)
        || view.batch.dress_type.to_lowercase().contains(needle)
}

pub fn matches_status(view: &BatchView, status_filter: StatusFilter) -> bool {
    match status_filter {
        StatusFilter::All => true,
        StatusFilter::Completed => view.progress.is_complete(),
        StatusFilter::InProgress => view.progress.is_in_progress(),
        StatusFilter::NotStarted => view.progress.is_not_started(),
        StatusFilter::Delayed => view.batch.is_delayed(),
    }
}
