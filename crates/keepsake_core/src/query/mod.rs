//! Filter and sort views over an entry collection.
//!
//! # Responsibility
//! - Express list screen filters as a conjunction of independent predicates.
//! - Provide the fixed set of sort orders list screens offer.
//!
//! # Invariants
//! - An empty `EntryFilter` matches every entry.
//! - Sorting is stable; entries that compare equal keep collection order.
//! - Views borrow from the collection and never copy entries.

use crate::model::category::Category;
use crate::model::entry::Entry;
use chrono::{Datelike, Duration, NaiveDate};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Inclusive calendar-day range. Either bound may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// Relative periods offered by period pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    /// Today and the six days before it.
    Week,
    /// Calendar month containing `today`.
    Month,
    /// Calendar year containing `today`.
    Year,
    #[default]
    All,
}

impl Period {
    /// Resolves the period against `today`.
    ///
    /// Ranges end at the period boundary, not at `today`, so entries dated in
    /// the future part of the current month/year still match. A week whose
    /// start falls before the earliest representable date has an open start.
    pub fn range(self, today: NaiveDate) -> DateRange {
        match self {
            Self::Week => DateRange {
                start: today.checked_sub_signed(Duration::days(6)),
                end: Some(today),
            },
            Self::Month => {
                let start = today.with_day(1).unwrap_or(today);
                DateRange::between(start, last_day_of_month(start))
            }
            Self::Year => DateRange {
                start: NaiveDate::from_ymd_opt(today.year(), 1, 1),
                end: NaiveDate::from_ymd_opt(today.year(), 12, 31),
            },
            Self::All => DateRange::default(),
        }
    }
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    let (year, month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

/// Sort orders available to list screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// By date descending, then most recently created first.
    #[default]
    NewestFirst,
    /// By date ascending, then earliest created first.
    OldestFirst,
    /// By title, case-insensitive; ties fall back to newest first.
    Alphabetical,
}

impl SortOrder {
    pub fn compare<C: Category>(self, a: &Entry<C>, b: &Entry<C>) -> Ordering {
        match self {
            Self::NewestFirst => newest_first(a, b),
            Self::OldestFirst => a
                .date
                .cmp(&b.date)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id)),
            Self::Alphabetical => a
                .title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| newest_first(a, b)),
        }
    }
}

fn newest_first<C: Category>(a: &Entry<C>, b: &Entry<C>) -> Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Current filter configuration of a list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFilter<C: Category> {
    /// Empty means every category.
    pub categories: BTreeSet<C>,
    /// Case-insensitive substring over title and comment. Blank is ignored.
    pub search: String,
    pub date_range: DateRange,
    pub favorites_only: bool,
}

impl<C: Category> Default for EntryFilter<C> {
    fn default() -> Self {
        Self {
            categories: BTreeSet::new(),
            search: String::new(),
            date_range: DateRange::default(),
            favorites_only: false,
        }
    }
}

impl<C: Category> EntryFilter<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: C) -> Self {
        self.categories.insert(category);
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    pub fn period(self, period: Period, today: NaiveDate) -> Self {
        self.date_range(period.range(today))
    }

    pub fn favorites_only(mut self) -> Self {
        self.favorites_only = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.search.trim().is_empty()
            && self.date_range == DateRange::default()
            && !self.favorites_only
    }

    /// Returns a reusable predicate with the search needle prepared once.
    pub fn matcher(&self) -> impl Fn(&Entry<C>) -> bool + '_ {
        let needle = self.search.trim().to_lowercase();
        move |entry: &Entry<C>| {
            (self.categories.is_empty() || self.categories.contains(&entry.category))
                && (needle.is_empty() || entry.matches_lowercase(&needle))
                && self.date_range.contains(entry.date)
                && (!self.favorites_only || entry.is_favorite)
        }
    }
}

/// Applies `filter` and `order` to `entries`, materializing a borrowed view.
pub fn apply<'a, C: Category>(
    entries: &'a [Entry<C>],
    filter: &EntryFilter<C>,
    order: SortOrder,
) -> Vec<&'a Entry<C>> {
    let matches = filter.matcher();
    let mut view: Vec<&Entry<C>> = entries.iter().filter(|entry| matches(*entry)).collect();
    view.sort_by(|a, b| order.compare(a, b));
    view
}
