use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Number of rows sharing one category value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

impl CategoryCount {
    #[must_use]
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Counts occurrences per value, keeping categories in order of first appearance.
#[must_use]
pub fn count_by_category<'a, I>(values: I) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: IndexMap<&'a str, usize> = IndexMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(label, count)| CategoryCount::new(label, count))
        .collect()
}

/// Sorts counts descending and keeps the first `limit`.
///
/// The sort is stable, so equal counts keep first-appearance order. Fewer
/// distinct values than `limit` yields all of them.
#[must_use]
pub fn top_n_by_frequency(mut counts: Vec<CategoryCount>, limit: usize) -> Vec<CategoryCount> {
    counts.sort_by(|left, right| right.count.cmp(&left.count));
    counts.truncate(limit);
    counts
}

/// Largest count, or zero for an empty slice.
#[must_use]
pub fn max_count(counts: &[CategoryCount]) -> usize {
    counts.iter().map(|entry| entry.count).max().unwrap_or(0)
}
