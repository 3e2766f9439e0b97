//! # Trend Aggregation
//!
//! Groups dated records by trend label and reduces each group.

use crate::{calendar::parse_date_key, trends::range::DateRange};

/// Groups `(date key, value)` pairs by the label of their date.
///
/// Records outside `range` or with malformed dates are skipped. Labels keep
/// the order in which they are first seen, so callers feed records sorted
/// by date ascending.
pub fn group_by_label<V, I>(range: &DateRange, records: I) -> Vec<(String, Vec<V>)>
where
    I: IntoIterator<Item = (String, V)>,
{
    let mut groups: Vec<(String, Vec<V>)> = Vec::new();
    for (key, value) in records {
        if !range.contains(&key) {
            continue;
        }
        let Some(date) = parse_date_key(&key) else {
            continue;
        };
        let label = range.label_format.label(date);
        match groups.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, values)) => values.push(value),
            None => groups.push((label, vec![value])),
        }
    }
    groups
}

/// Sum per label.
pub fn sum_by_label<I>(range: &DateRange, records: I) -> Vec<(String, i64)>
where
    I: IntoIterator<Item = (String, i64)>,
{
    group_by_label(range, records)
        .into_iter()
        .map(|(label, values)| (label, values.into_iter().sum()))
        .collect()
}

/// Mean per label, rounded to one decimal.
pub fn mean_by_label<I>(range: &DateRange, records: I) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = (String, f64)>,
{
    group_by_label(range, records)
        .into_iter()
        .map(|(label, values)| {
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            (label, (mean * 10.0).round() / 10.0)
        })
        .collect()
}

/// Activity categories shown on the activity chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityBucket {
    Aerobic,
    Strength,
    Stretch,
}

impl ActivityBucket {
    /// Chart order.
    pub const ALL: [ActivityBucket; 3] = [
        ActivityBucket::Aerobic,
        ActivityBucket::Strength,
        ActivityBucket::Stretch,
    ];

    /// Classifies a free-text sport type.
    ///
    /// Running and aerobic work count as aerobic, weight training as
    /// strength, anything else as stretch.
    pub fn classify(sport_type: &str) -> Self {
        let lowered = sport_type.to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| lowered.contains(n));

        if has(&["跑步", "有氧", "running", "aerobic", "cardio"]) {
            ActivityBucket::Aerobic
        }
        else if has(&["重訓", "strength", "weight training"]) {
            ActivityBucket::Strength
        }
        else {
            ActivityBucket::Stretch
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ActivityBucket::Aerobic => "有氧",
            ActivityBucket::Strength => "重訓",
            ActivityBucket::Stretch => "伸展",
        }
    }

    /// Chart colour.
    pub fn fill(self) -> &'static str {
        match self {
            ActivityBucket::Aerobic => "#8B5CF6",
            ActivityBucket::Strength => "#EC4899",
            ActivityBucket::Stretch => "#F59E0B",
        }
    }
}

/// Counts sport types per bucket, in chart order. Every bucket is present.
pub fn count_activities<'a, I>(sport_types: I) -> Vec<(ActivityBucket, u64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = [0u64; 3];
    for sport_type in sport_types {
        let bucket = ActivityBucket::classify(sport_type);
        if let Some(index) = ActivityBucket::ALL.iter().position(|b| *b == bucket) {
            counts[index] += 1;
        }
    }
    ActivityBucket::ALL.into_iter().zip(counts).collect()
}
