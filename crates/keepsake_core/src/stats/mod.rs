//! Derived statistics over an entry collection.
//!
//! # Responsibility
//! - Compute totals, category breakdowns and name frequencies.
//! - Compute date-based aggregates: streaks, weekday and monthly histograms.
//!
//! # Invariants
//! - Every function is pure and recomputed from the full collection.
//! - Streaks count distinct calendar days; several entries on one day count
//!   once.
//! - `best_streak >= current_streak` for the same dates.

use crate::model::category::Category;
use crate::model::entry::Entry;
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeSet, HashMap};

/// Default occurrence count at which a named item becomes "frequent".
pub const DEFAULT_FREQUENT_THRESHOLD: usize = 3;

/// Occurrence classification of a named item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Frequent,
    Rare,
}

impl Frequency {
    pub fn classify(count: usize, threshold: usize) -> Self {
        if count >= threshold {
            Self::Frequent
        } else {
            Self::Rare
        }
    }
}

/// One category's share of the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCount<C: Category> {
    pub category: C,
    pub count: usize,
    /// 0.0..=100.0; 0.0 for an empty collection.
    pub percentage: f64,
}

/// Occurrences of one named item (e.g. a hair product used repeatedly).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFrequency {
    /// Title as first seen in the collection.
    pub name: String,
    pub count: usize,
    pub frequency: Frequency,
}

/// Aggregate numbers shown on a statistics screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics<C: Category> {
    pub total: usize,
    pub favorites: usize,
    pub distinct_days: usize,
    pub by_category: Vec<CategoryCount<C>>,
    pub most_common_category: Option<C>,
    pub frequencies: Vec<NameFrequency>,
    pub current_streak: usize,
    pub best_streak: usize,
    /// Monday first.
    pub weekday_histogram: [usize; 7],
}

impl<C: Category> Statistics<C> {
    /// Computes every aggregate for `entries` as seen on `today`.
    pub fn compute(entries: &[Entry<C>], today: NaiveDate, frequent_threshold: usize) -> Self {
        let dates = entries.iter().map(|entry| entry.date);
        let by_category = category_breakdown(entries);
        let most_common_category = most_common(&by_category);

        Self {
            total: entries.len(),
            favorites: entries.iter().filter(|entry| entry.is_favorite).count(),
            distinct_days: dates.clone().collect::<BTreeSet<_>>().len(),
            by_category,
            most_common_category,
            frequencies: frequencies(entries, frequent_threshold),
            current_streak: current_streak(dates.clone(), today),
            best_streak: best_streak(dates.clone()),
            weekday_histogram: weekday_histogram(dates),
        }
    }

    /// Items at or above the threshold, most used first.
    pub fn frequent_items(&self) -> impl Iterator<Item = &NameFrequency> {
        self.frequencies
            .iter()
            .filter(|item| item.frequency == Frequency::Frequent)
    }

    pub fn category_count(&self, category: C) -> usize {
        self.by_category
            .iter()
            .find(|row| row.category == category)
            .map_or(0, |row| row.count)
    }
}

/// Counts per category in `C::ALL` order, including zero rows.
pub fn category_breakdown<C: Category>(entries: &[Entry<C>]) -> Vec<CategoryCount<C>> {
    let total = entries.len();
    C::ALL
        .iter()
        .map(|&category| {
            let count = entries
                .iter()
                .filter(|entry| entry.category == category)
                .count();
            let percentage = if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            };
            CategoryCount {
                category,
                count,
                percentage,
            }
        })
        .collect()
}

fn most_common<C: Category>(rows: &[CategoryCount<C>]) -> Option<C> {
    // First category wins ties so the result follows display order.
    rows.iter()
        .filter(|row| row.count > 0)
        .fold(None::<&CategoryCount<C>>, |best, row| match best {
            Some(current) if current.count >= row.count => Some(current),
            _ => Some(row),
        })
        .map(|row| row.category)
}

/// Groups entries by trimmed, case-insensitive title and classifies each group.
///
/// Sorted by count descending, then name ascending.
pub fn frequencies<C: Category>(entries: &[Entry<C>], threshold: usize) -> Vec<NameFrequency> {
    let mut groups: HashMap<String, (String, usize)> = HashMap::new();
    // Oldest first so the display name is the earliest spelling.
    let mut ordered: Vec<&Entry<C>> = entries.iter().collect();
    ordered.sort_by_key(|entry| (entry.date, entry.created_at));

    for entry in ordered {
        let name = entry.title.trim();
        if name.is_empty() {
            continue;
        }
        groups
            .entry(name.to_lowercase())
            .or_insert_with(|| (name.to_string(), 0))
            .1 += 1;
    }

    let mut items: Vec<NameFrequency> = groups
        .into_values()
        .map(|(name, count)| NameFrequency {
            name,
            count,
            frequency: Frequency::classify(count, threshold),
        })
        .collect();
    items.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    items
}

/// Classifies how often `name` occurs among entry titles.
pub fn classify_name<C: Category>(entries: &[Entry<C>], name: &str, threshold: usize) -> Frequency {
    let needle = name.trim().to_lowercase();
    let count = entries
        .iter()
        .filter(|entry| entry.title.trim().to_lowercase() == needle)
        .count();
    Frequency::classify(count, threshold)
}

/// Consecutive days with at least one entry, counted backward from `today`.
///
/// Returns 0 when `today` itself has no entry.
pub fn current_streak(dates: impl IntoIterator<Item = NaiveDate>, today: NaiveDate) -> usize {
    let days: BTreeSet<NaiveDate> = dates.into_iter().filter(|date| *date <= today).collect();
    let mut streak = 0;
    let mut cursor = Some(today);
    while let Some(day) = cursor {
        if !days.contains(&day) {
            break;
        }
        streak += 1;
        cursor = day.pred_opt();
    }
    streak
}

/// Longest run of consecutive calendar days anywhere in history.
pub fn best_streak(dates: impl IntoIterator<Item = NaiveDate>) -> usize {
    let days: BTreeSet<NaiveDate> = dates.into_iter().collect();
    let mut best = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for day in days {
        run = match previous {
            Some(prev) if prev.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        previous = Some(day);
    }
    best
}

/// Entry counts per weekday, Monday first.
pub fn weekday_histogram(dates: impl IntoIterator<Item = NaiveDate>) -> [usize; 7] {
    let mut histogram = [0; 7];
    for date in dates {
        histogram[date.weekday().num_days_from_monday() as usize] += 1;
    }
    histogram
}

/// Entry counts per month of `year`, January first.
pub fn monthly_counts(dates: impl IntoIterator<Item = NaiveDate>, year: i32) -> [usize; 12] {
    let mut counts = [0; 12];
    for date in dates.into_iter().filter(|date| date.year() == year) {
        counts[date.month0() as usize] += 1;
    }
    counts
}
