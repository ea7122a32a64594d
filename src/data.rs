// src/data.rs
//
// Derived views over a record snapshot.
//
// Everything here is a pure function of (records, criteria). `ViewCache`
// remembers the last answer so a repaint costs nothing, and rebuilds only
// the part that depends on what changed:
//   - new generation (fresh snapshot) → vocabulary + view
//   - new criteria                    → view only

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::config::options::FilterCriteria;
use crate::config::source::SourceConfig;
use crate::model::ResultEntry;
use crate::store::ResultsStore;

/* ---------------- Vocabulary ---------------- */

/// Distinct, non-empty, byte-order sorted values offered by the selectors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Vocabulary {
    /// Program codes
    pub categories: Vec<String>,
    /// Team codes
    pub teams: Vec<String>,
}

impl Vocabulary {
    pub fn from_records(records: &[ResultEntry]) -> Self {
        let mut categories = BTreeSet::new();
        let mut teams = BTreeSet::new();
        for r in records {
            if !r.program_code.is_empty() {
                categories.insert(r.program_code.as_str());
            }
            if !r.team_code.is_empty() {
                teams.insert(r.team_code.as_str());
            }
        }
        Self {
            categories: categories.into_iter().map(String::from).collect(),
            teams: teams.into_iter().map(String::from).collect(),
        }
    }
}

/* ---------------- Filtering ---------------- */

/// Does one record pass all three criteria?
pub fn matches(entry: &ResultEntry, criteria: &FilterCriteria) -> bool {
    matches_needle(entry, criteria, &criteria.search.to_lowercase())
}

fn matches_needle(entry: &ResultEntry, criteria: &FilterCriteria, needle: &str) -> bool {
    if !criteria.category.accepts(&entry.program_code) || !criteria.team.accepts(&entry.team_code) {
        return false;
    }
    needle.is_empty()
        || contains_ci!(entry.candidate_name, needle)
        || contains_ci!(entry.team_code, needle)
        || contains_ci!(entry.program_name, needle)
        || contains_ci!(entry.program_code, needle)
}

/// Indices of passing records, in snapshot order.
pub fn filter_indices(records: &[ResultEntry], criteria: &FilterCriteria) -> Vec<usize> {
    if criteria.is_unfiltered() {
        return (0..records.len()).collect();
    }
    let needle = criteria.search.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches_needle(r, criteria, &needle))
        .map(|(i, _)| i)
        .collect()
}

/* ---------------- Grouping ---------------- */

/// A member whose program metadata disagrees with the group's first member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataConflict {
    /// Record index of the disagreeing member
    pub index: usize,
    pub program_name: String,
    pub program_section: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramGroup {
    pub code: String,
    /// From the first member seen
    pub name: String,
    pub section: String,
    /// Record indices, in snapshot order
    pub members: Vec<usize>,
    pub conflicts: Vec<MetadataConflict>,
}

impl ProgramGroup {
    #[inline]
    pub fn len(&self) -> usize { self.members.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.members.is_empty() }

    pub fn entries<'a>(&'a self, records: &'a [ResultEntry]) -> impl Iterator<Item = &'a ResultEntry> + 'a {
        self.members.iter().filter_map(move |&ix| records.get(ix))
    }
}

/// Partition `indices` by program code, groups in first-appearance order.
/// Rows without a program code belong to no group.
pub fn group_by_program(records: &[ResultEntry], indices: &[usize]) -> Vec<ProgramGroup> {
    let mut groups: Vec<ProgramGroup> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();

    for &ix in indices {
        let Some(r) = records.get(ix) else { continue };
        if !r.has_program() {
            continue;
        }
        match slot.get(r.program_code.as_str()) {
            Some(&g) => {
                let group = &mut groups[g];
                if r.program_name != group.name || r.program_section != group.section {
                    logd!(
                        "Group: {} row {} says {:?}/{:?}, keeping {:?}/{:?}",
                        group.code, ix, r.program_name, r.program_section, group.name, group.section
                    );
                    group.conflicts.push(MetadataConflict {
                        index: ix,
                        program_name: r.program_name.clone(),
                        program_section: r.program_section.clone(),
                    });
                }
                group.members.push(ix);
            }
            None => {
                slot.insert(r.program_code.as_str(), groups.len());
                groups.push(ProgramGroup {
                    code: r.program_code.clone(),
                    name: r.program_name.clone(),
                    section: r.program_section.clone(),
                    members: vec![ix],
                    conflicts: Vec::new(),
                });
            }
        }
    }
    groups
}

/* ---------------- Views ---------------- */

/// Header badge counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub programs: usize,
    pub results: usize,
    pub teams: usize,
}

/// Everything a consumer renders for one (snapshot, criteria) pair.
#[derive(Clone, Debug, Default)]
pub struct DerivedView {
    pub vocabulary: Arc<Vocabulary>,
    pub criteria: FilterCriteria,
    pub filtered: Vec<usize>,
    pub groups: Vec<ProgramGroup>,
    pub summary: Summary,
}

impl DerivedView {
    pub fn compute(records: &[ResultEntry], criteria: &FilterCriteria) -> Self {
        Self::with_vocabulary(records, criteria, Arc::new(Vocabulary::from_records(records)))
    }

    /// Reuse an already built vocabulary for the same snapshot.
    pub fn with_vocabulary(records: &[ResultEntry], criteria: &FilterCriteria, vocabulary: Arc<Vocabulary>) -> Self {
        let filtered = filter_indices(records, criteria);
        let groups = group_by_program(records, &filtered);
        let summary = Summary {
            programs: groups.len(),
            results: filtered.len(),
            teams: vocabulary.teams.len(),
        };
        Self { vocabulary, criteria: criteria.clone(), filtered, groups, summary }
    }

    pub fn filtered_entries<'a>(&'a self, records: &'a [ResultEntry]) -> impl Iterator<Item = &'a ResultEntry> + 'a {
        self.filtered.iter().filter_map(move |&ix| records.get(ix))
    }

    /// Filtered rows that carry no program code (listed, never grouped).
    pub fn ungrouped(&self, records: &[ResultEntry]) -> Vec<usize> {
        self.filtered
            .iter()
            .copied()
            .filter(|&ix| records.get(ix).is_some_and(|r| !r.has_program()))
            .collect()
    }
}

/// Memo over `DerivedView`. Must always agree with `DerivedView::compute`.
#[derive(Debug, Default)]
pub struct ViewCache {
    generation: Option<u64>,
    vocabulary: Arc<Vocabulary>,
    view: Option<DerivedView>,
    vocab_builds: usize,
    view_builds: usize,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current view for `records` (identified by `generation`) under `criteria`.
    pub fn refresh(&mut self, generation: u64, records: &[ResultEntry], criteria: &FilterCriteria) -> &DerivedView {
        if self.generation != Some(generation) {
            self.vocabulary = Arc::new(Vocabulary::from_records(records));
            self.vocab_builds += 1;
            self.generation = Some(generation);
            self.view = None;
        }
        if self.view.as_ref().is_some_and(|v| v.criteria != *criteria) {
            self.view = None;
        }

        let vocabulary = &self.vocabulary;
        let builds = &mut self.view_builds;
        self.view.get_or_insert_with(|| {
            *builds += 1;
            DerivedView::with_vocabulary(records, criteria, Arc::clone(vocabulary))
        })
    }

    pub fn invalidate(&mut self) {
        self.generation = None;
        self.view = None;
    }

    /// (vocabulary builds, view builds) since creation.
    pub fn builds(&self) -> (usize, usize) {
        (self.vocab_builds, self.view_builds)
    }
}

/* ---------------- Phase ---------------- */

/// What the consumer should show right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Unconfigured,
    Loading,
    Failed(String),
    /// Fetched fine, but zero records
    NoData,
    /// Records exist, none pass the filters
    NoMatches,
    Ready,
}

impl Phase {
    pub fn of(source: &SourceConfig, store: &ResultsStore, view: &DerivedView) -> Self {
        if !source.is_configured() {
            Phase::Unconfigured
        } else if store.is_loading() {
            Phase::Loading
        } else if let Some(e) = store.error() {
            Phase::Failed(e.to_string())
        } else if store.entries().is_empty() {
            Phase::NoData
        } else if view.filtered.is_empty() {
            Phase::NoMatches
        } else {
            Phase::Ready
        }
    }

    /// Result cards are drawn only here; stale rows stay hidden while loading or failed.
    pub fn shows_results(&self) -> bool {
        matches!(self, Phase::Ready)
    }
}
