// src/cli.rs
use std::{io::Write, path::PathBuf};

use thiserror::Error;

use crate::config::options::{FilterCriteria, OutputFormat, Selector};
use crate::config::source::SourceConfig;
use crate::core::HttpClient;
use crate::csv::to_delimited_string;
use crate::data::DerivedView;
use crate::error::{FetchError, SourceError};
use crate::file::write_output;
use crate::log::{set_sink, LogSink};
use crate::model::ResultEntry;
use crate::progress::Progress;
use crate::schema::canonical_headers;
use crate::store::{Outcome, ResultsStore};

pub const HELP: &str = include_str!("cli_help.txt");

#[derive(Debug, Error)]
pub enum CliError {
    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("unknown argument: {0} (try --help)")]
    UnknownArg(String),

    #[error("no data source given; pass --url <endpoint>")]
    MissingUrl,

    #[error("unknown format: {0} (expected text, csv or tsv)")]
    InvalidFormat(String),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("could not write output: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Debug, Default)]
pub struct Params {
    pub url: Option<String>,
    pub criteria: FilterCriteria,
    pub format: OutputFormat,
    pub include_headers: bool,
    pub out: Option<PathBuf>,
    pub list_categories: bool,
    pub list_teams: bool,
    pub verbose: bool,
}

#[derive(Clone, Debug)]
pub enum Command {
    Run(Params),
    Help,
}

pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut params = Params::default();
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        let mut value = |flag: &str| args.next().ok_or_else(|| CliError::MissingValue(s!(flag)));
        match a.as_str() {
            "-u" | "--url" => params.url = Some(value("--url")?),
            "-s" | "--search" => params.criteria.search = value("--search")?,
            "-c" | "--category" => params.criteria.category = Selector::parse(&value("--category")?),
            "-t" | "--team" => params.criteria.team = Selector::parse(&value("--team")?),
            "--format" => {
                let v = value("--format")?;
                params.format = OutputFormat::parse(&v).ok_or(CliError::InvalidFormat(v))?;
            }
            "-o" | "--out" => params.out = Some(PathBuf::from(value("--out")?)),
            "--include-headers" => params.include_headers = true,
            "--list-categories" => params.list_categories = true,
            "--list-teams" => params.list_teams = true,
            "-v" | "--verbose" => params.verbose = true,
            "-h" | "--help" => return Ok(Command::Help),
            other => return Err(CliError::UnknownArg(s!(other))),
        }
    }

    Ok(Command::Run(params))
}

/// `--url <URL>` (or `-u`) from an argument list; the GUI binary takes only this.
pub fn url_arg<I>(args: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        if a == "--url" || a == "-u" {
            return args.next();
        }
    }
    None
}

/// Status lines on stderr so stdout stays clean for data.
struct CliProgress;

impl Progress for CliProgress {
    fn begin(&mut self, url: &str) {
        eprintln!("Source: {url}");
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
}

pub fn run(params: &Params) -> Result<(), CliError> {
    if params.verbose {
        set_sink(LogSink::Stderr);
    }

    let url = params.url.as_deref().ok_or(CliError::MissingUrl)?;
    let mut source = SourceConfig::default();
    source.configure(url)?;

    let client = HttpClient::default();
    let mut store = ResultsStore::new();
    let mut progress = CliProgress;

    match store.load_blocking(&client, source.url(), Some(&mut progress)) {
        Outcome::Applied(_) => {}
        Outcome::Failed(e) => return Err(e.into()),
        other => {
            logd!("CLI: unexpected outcome {:?}", other);
            return Err(FetchError::Unconfigured.into());
        }
    }

    let view = DerivedView::compute(store.entries(), &params.criteria);
    logf!(
        "CLI: {} of {} records pass {:?}",
        view.filtered.len(),
        store.entries().len(),
        params.criteria
    );

    let text = render(params, store.entries(), &view);
    match &params.out {
        Some(path) => {
            let written = write_output(path, &text)?;
            eprintln!("Wrote {}", written.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
        }
    }
    Ok(())
}

/// Everything `run` prints, as one string.
pub fn render(params: &Params, records: &[ResultEntry], view: &DerivedView) -> String {
    if params.list_categories || params.list_teams {
        let mut out = s!();
        if params.list_categories {
            for c in &view.vocabulary.categories {
                out.push_str(c);
                out.push('\n');
            }
        }
        if params.list_teams {
            for t in &view.vocabulary.teams {
                out.push_str(t);
                out.push('\n');
            }
        }
        return out;
    }

    match params.format.delim() {
        Some(sep) => {
            let headers = canonical_headers();
            let rows: Vec<Vec<String>> = view.filtered_entries(records).map(ResultEntry::to_row).collect();
            let headers = params.include_headers.then_some(headers.as_slice());
            to_delimited_string(headers, &rows, sep)
        }
        None => render_text(records, view),
    }
}

fn render_text(records: &[ResultEntry], view: &DerivedView) -> String {
    if records.is_empty() {
        return s!("No data available\n");
    }
    if view.filtered.is_empty() {
        return s!("No results found\n");
    }

    let s = view.summary;
    let mut out = format!("{} programs · {} results · {} teams\n", s.programs, s.results, s.teams);

    for g in &view.groups {
        out.push('\n');
        out.push_str(&format!("[{}] {}", g.code, g.name));
        if !g.section.is_empty() {
            out.push_str(&format!(" · {}", g.section));
        }
        out.push_str(&format!(" ({})\n", g.len()));
        for e in g.entries(records) {
            out.push_str(&card_line(e));
        }
    }

    let loose = view.ungrouped(records);
    if !loose.is_empty() {
        out.push_str(&format!("\n[-] No program ({})\n", loose.len()));
        for e in loose.iter().filter_map(|&ix| records.get(ix)) {
            out.push_str(&card_line(e));
        }
    }
    out
}

fn card_line(e: &ResultEntry) -> String {
    let line = format!(
        "  {:>3}  {:<6} {:<28} {:<6} {}",
        e.display_position(),
        e.chest_no,
        e.candidate_name,
        e.team_code,
        e.grade
    );
    format!("{}\n", line.trim_end())
}
