//! Benchmarks for navigation derivation and home menu timing.
//!
//! These benchmarks measure the work done on every settings change and
//! every journey restart.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use folio_tui::content::Settings;
use folio_tui::journey::waterfall_delays;
use folio_tui::navigation::{derive_visible_pages, PageEditor};

fn settings_with_custom_pages(count: usize) -> Settings {
    let mut editor = PageEditor::default();
    for _ in 0..count {
        editor.add_page();
    }
    Settings {
        pages: editor.pages().to_vec(),
        ..Settings::default()
    }
}

fn bench_derive_default_pages(c: &mut Criterion) {
    c.bench_function("derive_visible_pages_defaults", |b| {
        b.iter(|| derive_visible_pages(black_box(None)))
    });
}

fn bench_derive_many_pages(c: &mut Criterion) {
    let settings = settings_with_custom_pages(50);
    c.bench_function("derive_visible_pages_54_entries", |b| {
        b.iter(|| derive_visible_pages(black_box(Some(&settings))))
    });
}

fn bench_waterfall_delays(c: &mut Criterion) {
    c.bench_function("waterfall_delays_12", |b| {
        b.iter(|| waterfall_delays(black_box(12)))
    });
}

criterion_group!(
    benches,
    bench_derive_default_pages,
    bench_derive_many_pages,
    bench_waterfall_delays
);
criterion_main!(benches);
