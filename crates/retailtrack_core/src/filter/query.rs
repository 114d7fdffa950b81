//! Typed record predicates.

use chrono::NaiveDate;

/// Selector value meaning "do not filter on this field".
pub const ALL_SENTINEL: &str = "all";

/// Field accessor used by equality selectors.
pub type TextAccessor<E> = fn(&E) -> &str;

/// Field accessor used by calendar-day matching.
pub type DateAccessor<E> = fn(&E) -> Option<NaiveDate>;

/// Records that expose free-text fields to search.
pub trait Searchable {
    /// Fields matched by case-insensitive substring search.
    fn search_fields(&self) -> Vec<&str>;
}

/// Equality selector for status/category/shop style fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selector {
    /// Matches every record.
    #[default]
    All,
    /// Matches records whose field equals this value exactly.
    Value(String),
}

impl Selector {
    /// Parses UI selector text. Blank text and `"all"` both mean [`Selector::All`].
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == ALL_SENTINEL {
            Self::All
        } else {
            Self::Value(trimmed.to_string())
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Value(expected) => expected == value,
        }
    }
}

/// Conjunction of search, selector and day predicates over one record type.
pub struct RecordFilter<E> {
    needle: String,
    selectors: Vec<(Selector, TextAccessor<E>)>,
    day: Option<(NaiveDate, DateAccessor<E>)>,
}

impl<E> Default for RecordFilter<E> {
    fn default() -> Self {
        Self {
            needle: String::new(),
            selectors: Vec::new(),
            day: None,
        }
    }
}

impl<E: Searchable> RecordFilter<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search text. Blank text disables the search predicate.
    pub fn search(mut self, text: &str) -> Self {
        self.needle = text.trim().to_lowercase();
        self
    }

    /// Adds an equality selector on one field.
    pub fn select(mut self, selector: Selector, field: TextAccessor<E>) -> Self {
        if selector != Selector::All {
            self.selectors.push((selector, field));
        }
        self
    }

    /// Restricts results to one calendar day. `None` disables the predicate.
    pub fn on_day(mut self, day: Option<NaiveDate>, field: DateAccessor<E>) -> Self {
        self.day = day.map(|day| (day, field));
        self
    }

    /// Returns whether no predicate is active.
    pub fn is_unrestricted(&self) -> bool {
        self.needle.is_empty() && self.selectors.is_empty() && self.day.is_none()
    }

    pub fn matches(&self, record: &E) -> bool {
        self.matches_search(record)
            && self
                .selectors
                .iter()
                .all(|(selector, field)| selector.matches(field(record)))
            && self
                .day
                .as_ref()
                .map_or(true, |(day, field)| field(record) == Some(*day))
    }

    /// Applies the filter, keeping input order.
    pub fn apply<'a>(&self, records: &'a [E]) -> Vec<&'a E> {
        records.iter().filter(|record| self.matches(record)).collect()
    }

    fn matches_search(&self, record: &E) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        record
            .search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(self.needle.as_str()))
    }
}
