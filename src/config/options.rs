// src/config/options.rs
//
// User-adjustable knobs: the three filter criteria and the CLI output format.
// Nothing here touches the network; changing a filter only re-derives views.

use super::consts::{ALL_SENTINEL, CSV_SEP, TSV_SEP};

/// Category/team selector. `All` is the "all" sentinel of the filter bar.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Selector {
    #[default]
    All,
    Only(String),
}

impl Selector {
    /// `"all"` (exactly) maps to the sentinel; anything else is a literal value.
    pub fn parse(value: &str) -> Self {
        if value == ALL_SENTINEL { Selector::All } else { Selector::Only(s!(value)) }
    }

    #[inline]
    pub fn is_all(&self) -> bool { matches!(self, Selector::All) }

    /// Exact, case-sensitive match against a record value.
    #[inline]
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(want) => want == value,
        }
    }

    pub fn as_value(&self) -> &str {
        match self {
            Selector::All => ALL_SENTINEL,
            Selector::Only(v) => v,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FilterCriteria {
    /// Free-text search; empty means "no search"
    pub search: String,
    /// Program code selector
    pub category: Selector,
    /// Team code selector
    pub team: Selector,
}

impl FilterCriteria {
    pub fn new(search: &str, category: Selector, team: Selector) -> Self {
        Self { search: s!(search), category, team }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty() && self.category.is_all() && self.team.is_all()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Reset selectors whose value no longer exists in the data (e.g. after a
    /// refresh dropped a program). Returns true if anything changed.
    pub fn retain_known(&mut self, categories: &[String], teams: &[String]) -> bool {
        let mut changed = false;
        if let Selector::Only(c) = &self.category {
            if categories.binary_search(c).is_err() {
                logd!("Filters: category {:?} vanished, reset to all", c);
                self.category = Selector::All;
                changed = true;
            }
        }
        if let Selector::Only(t) = &self.team {
            if teams.binary_search(t).is_err() {
                logd!("Filters: team {:?} vanished, reset to all", t);
                self.team = Selector::All;
                changed = true;
            }
        }
        changed
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Tsv,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "text" | "txt" => Some(OutputFormat::Text),
            "csv" => Some(OutputFormat::Csv),
            "tsv" => Some(OutputFormat::Tsv),
            _ => None,
        }
    }

    /// Field separator for the delimited formats.
    pub fn delim(&self) -> Option<char> {
        match self {
            OutputFormat::Text => None,
            OutputFormat::Csv => Some(CSV_SEP),
            OutputFormat::Tsv => Some(TSV_SEP),
        }
    }
}
