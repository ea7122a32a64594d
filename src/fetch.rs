// src/fetch.rs
//
// URL → Dataset. `load` is the whole pipeline for one source:
// GET, reject HTML, tokenize, map the header, build rows.
// `Background` runs `load` on a worker thread and hands the result back to
// whoever owns the `ResultsStore`.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crate::config::consts::CSV_SEP;
use crate::core::{HttpClient, Payload};
use crate::csv::parse_rows;
use crate::error::FetchError;
use crate::model::ResultEntry;
use crate::progress::Progress;
use crate::schema::{Column, ColumnMap};
use crate::store::{Outcome, ResultsStore, Ticket};

/// Per-payload diagnostics. Row anomalies are counted here, never raised.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Records kept
    pub rows: usize,
    /// Rows with every mapped field empty (skipped)
    pub blank_rows: usize,
    /// Rows shorter than the header (missing cells read as "")
    pub padded_rows: usize,
    /// Schema columns the header did not name
    pub missing_columns: Vec<Column>,
    /// Header unrecognised, cells mapped in canonical order
    pub positional: bool,
    pub bytes: usize,
}

#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub records: Vec<ResultEntry>,
    pub report: ParseReport,
}

/// Fetch and parse one source. A blank URL is `Unconfigured` (idle, not a failure).
pub fn load(
    client: &HttpClient,
    url: &str,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Dataset, FetchError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(FetchError::Unconfigured);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.begin(url);
        p.log("Fetching results…");
    }
    logf!("Fetch: GET {}", url);

    let result = client.get(url).and_then(|payload| {
        logd!(
            "Fetch: {} bytes, status={}, content-type={:?}",
            payload.text.len(),
            payload.status,
            payload.content_type
        );
        decode(&payload)
    });

    match &result {
        Ok(ds) => {
            logf!("Fetch: OK rows={} blank={} padded={}", ds.report.rows, ds.report.blank_rows, ds.report.padded_rows);
            if let Some(p) = progress.as_deref_mut() {
                p.log(&format!("Loaded {} results", ds.report.rows));
            }
        }
        Err(e) => {
            loge!("Fetch: {} ({})", e, url);
            if let Some(p) = progress.as_deref_mut() {
                p.log(&e.to_string());
            }
        }
    }
    if let Some(p) = progress.as_deref_mut() {
        p.finish(result.is_ok());
    }
    result
}

/// Payload → Dataset, refusing HTML pages (unpublished or private Apps Script
/// deployments answer with a sign-in page and status 200).
pub fn decode(payload: &Payload) -> Result<Dataset, FetchError> {
    if looks_like_html(payload) {
        return Err(FetchError::EmptyOrMalformed(s!(
            "received an HTML page instead of CSV; check that the deployment is public"
        )));
    }
    parse_results(&payload.text)
}

fn looks_like_html(payload: &Payload) -> bool {
    if payload
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("text/html"))
    {
        return true;
    }
    let head: String = payload
        .text
        .trim_start_matches('\u{feff}')
        .trim_start()
        .chars()
        .take(9)
        .collect::<String>()
        .to_ascii_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html")
}

/// Comma-delimited text → typed records. First non-empty line is the header.
pub fn parse_results(text: &str) -> Result<Dataset, FetchError> {
    if text.trim().is_empty() {
        return Err(FetchError::EmptyOrMalformed(s!("the response body is empty")));
    }

    let mut rows = parse_rows(text, CSV_SEP)
        .into_iter()
        .skip_while(|row| row.iter().all(|cell| cell.trim().is_empty()));
    let header = rows
        .next()
        .ok_or_else(|| FetchError::EmptyOrMalformed(s!("no header row")))?;
    let map = ColumnMap::from_header(&header)?;
    let width = map.width();

    let mut report = ParseReport {
        missing_columns: map.missing(),
        positional: map.is_positional(),
        bytes: text.len(),
        ..Default::default()
    };

    let mut records = Vec::new();
    for row in rows {
        let entry = ResultEntry::from_row(&map, &row);
        if entry.is_blank() {
            report.blank_rows += 1;
            continue;
        }
        if row.len() < width {
            report.padded_rows += 1;
        }
        records.push(entry);
    }

    if records.is_empty() {
        return Err(FetchError::EmptyOrMalformed(format!(
            "header found but no result rows ({} blank)",
            report.blank_rows
        )));
    }

    report.rows = records.len();
    if report.blank_rows > 0 || report.padded_rows > 0 {
        logd!("Parse: skipped {} blank rows, padded {} short rows", report.blank_rows, report.padded_rows);
    }
    Ok(Dataset { records, report })
}

/* ---------------- Worker thread ---------------- */

type Delivery = (Ticket, Result<Dataset, FetchError>);

/// One channel, many short-lived workers. The owner polls with `drain_into`.
pub struct Background {
    tx: Sender<Delivery>,
    rx: Receiver<Delivery>,
}

impl Default for Background {
    fn default() -> Self {
        Self::new()
    }
}

impl Background {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// Run `load` for `ticket` off-thread. `notify` fires after the result is
    /// queued (the GUI passes a repaint request).
    pub fn spawn<P, F>(&self, client: &HttpClient, ticket: Ticket, mut progress: P, notify: F)
    where
        P: Progress + Send + 'static,
        F: FnOnce() + Send + 'static,
    {
        let tx = self.tx.clone();
        let client = client.clone();
        logd!("Worker: spawn #{} {}", ticket.id, ticket.url);

        thread::spawn(move || {
            let result = load(&client, &ticket.url, Some(&mut progress));
            // Receiver gone means the owner shut down; nothing to do.
            let _ = tx.send((ticket, result));
            notify();
        });
    }

    /// Apply every finished fetch to `store`, oldest first.
    pub fn drain_into(&self, store: &mut ResultsStore) -> Vec<Outcome> {
        self.rx
            .try_iter()
            .map(|(ticket, result)| store.finish(&ticket, result))
            .collect()
    }

    /// Block until one result arrives (or `timeout` passes) and apply it.
    pub fn wait_into(&self, store: &mut ResultsStore, timeout: Duration) -> Option<Outcome> {
        self.rx
            .recv_timeout(timeout)
            .ok()
            .map(|(ticket, result)| store.finish(&ticket, result))
    }
}
