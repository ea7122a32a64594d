// benches/derive.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use fest_results::{
    config::options::{FilterCriteria, Selector},
    data::{DerivedView, ViewCache},
    fetch::parse_results,
    model::ResultEntry,
};

/// A few thousand rows spread over 120 programs and 12 teams.
fn synthetic_csv(rows: usize) -> String {
    let mut out = String::from(
        "Position,Chest No,Candidate Name,Team Code,Grade,Program Code,Program Name,Program Section\n",
    );
    for i in 0..rows {
        let program = i % 120;
        let team = (b'A' + (i % 12) as u8) as char;
        let grade = ["A", "B", "C", ""][i % 4];
        out.push_str(&format!(
            "{},{},Candidate {},{},{},P{},Program {},{}\n",
            i % 5 + 1,
            1000 + i,
            i,
            team,
            grade,
            program,
            program,
            if program % 2 == 0 { "Senior" } else { "Junior" },
        ));
    }
    out
}

fn records() -> Vec<ResultEntry> {
    parse_results(&synthetic_csv(4000))
        .map(|ds| ds.records)
        .unwrap_or_default()
}

fn bench_parse(c: &mut Criterion) {
    let text = synthetic_csv(4000);
    c.bench_function("parse_4000", |b| {
        b.iter(|| {
            let ds = parse_results(black_box(&text));
            black_box(ds.map(|d| d.records.len()).unwrap_or(0))
        })
    });
}

fn bench_derive(c: &mut Criterion) {
    let recs = records();
    let all = FilterCriteria::default();
    let narrowed = FilterCriteria::new("candidate 1", Selector::All, Selector::Only("C".into()));

    c.bench_function("derive_fresh_all", |b| {
        b.iter(|| black_box(DerivedView::compute(black_box(&recs), &all).groups.len()))
    });

    c.bench_function("derive_fresh_search_team", |b| {
        b.iter(|| black_box(DerivedView::compute(black_box(&recs), &narrowed).filtered.len()))
    });

    // Typing in the search box: criteria change every frame, snapshot doesn't.
    c.bench_function("derive_cached_keystrokes", |b| {
        let mut cache = ViewCache::new();
        let steps: Vec<FilterCriteria> = ["c", "ca", "can", "cand", "candi"]
            .iter()
            .map(|q| FilterCriteria::new(q, Selector::All, Selector::All))
            .collect();
        b.iter(|| {
            for s in &steps {
                black_box(cache.refresh(1, &recs, s).filtered.len());
            }
        })
    });

    // Repaint with nothing changed.
    c.bench_function("derive_cached_repaint", |b| {
        let mut cache = ViewCache::new();
        b.iter(|| black_box(cache.refresh(1, &recs, &all).groups.len()))
    });
}

criterion_group!(benches, bench_parse, bench_derive);
criterion_main!(benches);
