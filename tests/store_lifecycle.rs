// tests/store_lifecycle.rs
//
// ResultsStore driven through real fetches: blocking and via the worker thread.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use common::{Canned, SAMPLE_CSV, client, dead_url, serve};
use fest_results::error::FetchError;
use fest_results::fetch::Background;
use fest_results::progress::NullProgress;
use fest_results::store::{Outcome, ResultsStore};

const WAIT: Duration = Duration::from_secs(10);

#[test]
fn empty_body_keeps_previous_records() {
    let url = serve(vec![Canned::ok(SAMPLE_CSV), Canned::ok("")]);
    let http = client();
    let mut store = ResultsStore::new();

    assert_eq!(store.load_blocking(&http, &url, None), Outcome::Applied(3));
    let before = store.records();
    let generation = store.generation();

    let outcome = store.load_blocking(&http, &url, None);
    assert!(matches!(outcome, Outcome::Failed(FetchError::EmptyOrMalformed(_))));
    assert!(matches!(store.error(), Some(FetchError::EmptyOrMalformed(_))));
    assert!(!store.is_loading());
    assert!(Arc::ptr_eq(&before, &store.records()));
    assert_eq!(store.generation(), generation);
}

#[test]
fn unreachable_url_fails_and_stops_loading() {
    let mut store = ResultsStore::new();
    let outcome = store.load_blocking(&client(), &dead_url(), None);
    assert!(matches!(outcome, Outcome::Failed(FetchError::Network(_))));
    assert!(!store.is_loading());
    assert!(matches!(store.error(), Some(FetchError::Network(_))));
    assert!(store.entries().is_empty());
}

#[test]
fn retry_after_failure_recovers() {
    let url = serve(vec![Canned::status(500), Canned::ok(SAMPLE_CSV)]);
    let http = client();
    let mut store = ResultsStore::new();

    assert!(matches!(store.load_blocking(&http, &url, None), Outcome::Failed(_)));
    let ticket = store.refetch().unwrap();
    let result = fest_results::fetch::load(&http, &ticket.url, None);
    assert_eq!(store.finish(&ticket, result), Outcome::Applied(3));
    assert!(store.error().is_none());
}

#[test]
fn background_delivers_and_notifies() {
    let url = serve(vec![Canned::ok(SAMPLE_CSV)]);
    let http = client();
    let bg = Background::new();
    let mut store = ResultsStore::new();
    let pings = Arc::new(AtomicUsize::new(0));

    let ticket = store.begin(&url).unwrap();
    assert!(store.is_loading());
    let p = Arc::clone(&pings);
    bg.spawn(&http, ticket, NullProgress, move || {
        p.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(bg.wait_into(&mut store, WAIT), Some(Outcome::Applied(3)));
    assert!(!store.is_loading());
    assert_eq!(pings.load(Ordering::SeqCst), 1);
    assert!(bg.drain_into(&mut store).is_empty());
}

#[test]
fn superseded_fetch_is_discarded() {
    let first = serve(vec![Canned::ok(SAMPLE_CSV)]);
    let second = serve(vec![Canned::ok("Candidate Name,Program Code\nZed,P9\n")]);
    let http = client();
    let bg = Background::new();
    let mut store = ResultsStore::new();

    let old = store.begin(&first).unwrap();
    let new = store.begin(&second).unwrap();
    bg.spawn(&http, old, NullProgress, || {});
    bg.spawn(&http, new, NullProgress, || {});

    let mut outcomes = vec![
        bg.wait_into(&mut store, WAIT).unwrap(),
        bg.wait_into(&mut store, WAIT).unwrap(),
    ];
    outcomes.sort_by_key(|o| matches!(o, Outcome::Stale));
    assert_eq!(outcomes, [Outcome::Applied(1), Outcome::Stale]);
    assert_eq!(store.entries()[0].candidate_name, "Zed");
    assert_eq!(store.source_url(), second);
}

#[test]
fn same_url_is_not_fetched_twice() {
    let mut store = ResultsStore::new();
    let url = "http://127.0.0.1:9/exec";
    assert!(store.begin(url).is_some());
    assert!(store.begin(url).is_none());
    assert_eq!(store.load_blocking(&client(), url, None), Outcome::Busy);
}
