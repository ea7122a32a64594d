// src/store.rs
//
// Owner-side state of the pipeline: the current record snapshot plus the
// loading/error flags consumers read. Only the owning thread mutates it;
// workers talk to it through `Ticket`s (see `fetch::Background`).

use std::sync::Arc;

use crate::core::HttpClient;
use crate::error::FetchError;
use crate::fetch::{self, Dataset, ParseReport};
use crate::model::ResultEntry;
use crate::progress::Progress;

/// Handle for one in-flight fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub id: u64,
    pub url: String,
}

/// What `finish` did with a result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// New snapshot installed with this many records
    Applied(usize),
    /// Error recorded; previous records kept
    Failed(FetchError),
    /// Ticket was superseded or reset; result dropped
    Stale,
    /// Nothing configured, nothing fetched
    Idle,
    /// A fetch for the same URL is already running
    Busy,
}

#[derive(Debug)]
pub struct ResultsStore {
    records: Arc<[ResultEntry]>,
    generation: u64,
    error: Option<FetchError>,
    report: Option<ParseReport>,
    last_url: String,
    pending: Option<Ticket>,
    next_id: u64,
}

impl Default for ResultsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultsStore {
    pub fn new() -> Self {
        Self {
            records: Arc::from(Vec::new()),
            generation: 0,
            error: None,
            report: None,
            last_url: s!(),
            pending: None,
            next_id: 0,
        }
    }

    /* ---------- reads ---------- */

    /// Shared snapshot; stays valid after the store moves on.
    #[inline]
    pub fn records(&self) -> Arc<[ResultEntry]> { Arc::clone(&self.records) }

    #[inline]
    pub fn entries(&self) -> &[ResultEntry] { &self.records }

    /// Bumped every time the snapshot is replaced or cleared.
    #[inline]
    pub fn generation(&self) -> u64 { self.generation }

    #[inline]
    pub fn is_loading(&self) -> bool { self.pending.is_some() }

    #[inline]
    pub fn error(&self) -> Option<&FetchError> { self.error.as_ref() }

    #[inline]
    pub fn report(&self) -> Option<&ParseReport> { self.report.as_ref() }

    /// URL of the latest fetch; empty before the first one.
    #[inline]
    pub fn source_url(&self) -> &str { &self.last_url }

    /* ---------- lifecycle ---------- */

    /// Start a fetch. `None` when there is nothing to do: a blank URL (idle),
    /// or the same URL already in flight. A different URL supersedes whatever
    /// is pending; that older result will come back `Stale`.
    pub fn begin(&mut self, url: &str) -> Option<Ticket> {
        let url = url.trim();
        if url.is_empty() {
            logd!("Store: no source, staying idle");
            return None;
        }
        if let Some(p) = &self.pending {
            if p.url == url {
                logd!("Store: #{} already fetching {}", p.id, url);
                return None;
            }
            logf!("Store: #{} superseded by new source", p.id);
        }

        self.next_id += 1;
        let ticket = Ticket { id: self.next_id, url: s!(url) };
        self.pending = Some(ticket.clone());
        self.last_url = s!(url);
        self.error = None;
        Some(ticket)
    }

    /// Manual retry against the last URL.
    pub fn refetch(&mut self) -> Option<Ticket> {
        let url = self.last_url.clone();
        self.begin(&url)
    }

    /// Apply a worker result. Loading is cleared before the new state lands.
    pub fn finish(&mut self, ticket: &Ticket, result: Result<Dataset, FetchError>) -> Outcome {
        match &self.pending {
            Some(p) if p.id == ticket.id => {}
            _ => {
                logd!("Store: dropping stale result #{} ({})", ticket.id, ticket.url);
                return Outcome::Stale;
            }
        }
        self.pending = None;

        match result {
            Ok(ds) => {
                let n = ds.records.len();
                self.records = Arc::from(ds.records);
                self.report = Some(ds.report);
                self.error = None;
                self.generation += 1;
                logf!("Store: generation {} with {} records", self.generation, n);
                Outcome::Applied(n)
            }
            Err(e) if e.is_idle() => Outcome::Idle,
            Err(e) => {
                loge!("Store: fetch #{} failed: {}", ticket.id, e);
                self.error = Some(e.clone());
                Outcome::Failed(e)
            }
        }
    }

    /// Forget everything (reconfigure). In-flight results become stale.
    pub fn reset(&mut self) {
        if let Some(p) = self.pending.take() {
            logd!("Store: abandoning #{}", p.id);
        }
        self.records = Arc::from(Vec::new());
        self.report = None;
        self.error = None;
        self.last_url.clear();
        self.generation += 1;
    }

    /// begin → load → finish on the calling thread (CLI, tests).
    pub fn load_blocking(
        &mut self,
        client: &HttpClient,
        url: &str,
        progress: Option<&mut dyn Progress>,
    ) -> Outcome {
        if url.trim().is_empty() {
            return Outcome::Idle;
        }
        let Some(ticket) = self.begin(url) else {
            return Outcome::Busy;
        };
        let result = fetch::load(client, &ticket.url, progress);
        self.finish(&ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::parse_results;

    fn dataset(names: &[&str]) -> Dataset {
        let mut text = s!("Candidate Name,Program Code\n");
        for n in names {
            text.push_str(&format!("{n},P1\n"));
        }
        parse_results(&text).unwrap()
    }

    #[test]
    fn blank_url_is_idle_and_sets_nothing() {
        let mut store = ResultsStore::new();
        assert_eq!(store.begin("   "), None);
        assert!(!store.is_loading());
        assert!(store.error().is_none());
        assert_eq!(store.load_blocking(&HttpClient::default(), "", None), Outcome::Idle);
    }

    #[test]
    fn same_url_is_refused_while_pending() {
        let mut store = ResultsStore::new();
        let t = store.begin("http://x/a").unwrap();
        assert!(store.is_loading());
        assert_eq!(store.begin(" http://x/a "), None);
        assert_eq!(store.refetch(), None);
        assert_eq!(store.finish(&t, Ok(dataset(&["Alice"]))), Outcome::Applied(1));
        assert!(!store.is_loading());
        assert_eq!(store.generation(), 1);
    }

    #[test]
    fn new_url_supersedes_and_old_result_is_stale() {
        let mut store = ResultsStore::new();
        let old = store.begin("http://x/a").unwrap();
        let new = store.begin("http://x/b").unwrap();
        assert!(new.id > old.id);

        assert_eq!(store.finish(&old, Ok(dataset(&["Old"]))), Outcome::Stale);
        assert!(store.entries().is_empty());
        assert!(store.is_loading());

        assert_eq!(store.finish(&new, Ok(dataset(&["New"]))), Outcome::Applied(1));
        assert_eq!(store.entries()[0].candidate_name, "New");
    }

    #[test]
    fn failure_keeps_previous_records() {
        let mut store = ResultsStore::new();
        let t = store.begin("http://x/a").unwrap();
        store.finish(&t, Ok(dataset(&["Alice", "Bob"])));
        let snapshot = store.records();

        let t = store.refetch().unwrap();
        let err = FetchError::EmptyOrMalformed(s!("empty"));
        assert_eq!(store.finish(&t, Err(err.clone())), Outcome::Failed(err.clone()));
        assert_eq!(store.error(), Some(&err));
        assert_eq!(store.entries().len(), 2);
        assert!(Arc::ptr_eq(&snapshot, &store.records()));
        assert_eq!(store.generation(), 1);

        // begin clears the error again
        let _ = store.refetch().unwrap();
        assert!(store.error().is_none());
    }

    #[test]
    fn reset_clears_and_strands_pending() {
        let mut store = ResultsStore::new();
        let t = store.begin("http://x/a").unwrap();
        store.finish(&t, Ok(dataset(&["Alice"])));
        let t = store.refetch().unwrap();

        store.reset();
        assert!(store.entries().is_empty());
        assert!(!store.is_loading());
        assert_eq!(store.source_url(), "");
        assert_eq!(store.generation(), 2);
        assert_eq!(store.finish(&t, Ok(dataset(&["Late"]))), Outcome::Stale);
        assert_eq!(store.refetch(), None);
    }
}
