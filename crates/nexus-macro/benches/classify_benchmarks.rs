//! Benchmarks for transcript classification and clock-time extraction.
//!
//! Every wake-confirmed transcript goes through the classifier, and
//! unclassified ones through the time extractor, so both sit on the voice
//! command hot path.

use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use nexus_macro::{extract_clock_time, IntentClassifier};

/// Transcript that hits the category at `index % 10`, or none for the tail.
fn generate_transcript(index: usize) -> String {
    let command = match index % 11 {
        0 => "open the vault",
        1 => "clone the dashboard repo",
        2 => "google the weather in lisbon",
        3 => "rotate my email aliases",
        4 => "go to full lockdown",
        5 => "capture the screen",
        6 => "boot the windows vm",
        7 => "draft a reply to the thread",
        8 => "summarize my inbox",
        9 => "schedule the backup at 9:15",
        _ => "tell me something interesting",
    };
    format!("hey nexus core, {} please. reference {}", command, index)
}

fn bench_classify(c: &mut Criterion) {
    let classifier = IntentClassifier::new();
    let transcripts: Vec<String> = (0..1000).map(generate_transcript).collect();

    let mut group = c.benchmark_group("classify");
    group.sample_size(200);
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("mixed_transcripts", |b| {
        let mut idx = 0usize;
        b.iter(|| {
            let text = &transcripts[idx % transcripts.len()];
            idx += 1;
            black_box(classifier.classify(black_box(text)))
        });
    });

    // No rule matches, so every keyword is scanned
    group.bench_function("miss_scans_all_rules", |b| {
        let text = generate_transcript(10);
        b.iter(|| black_box(classifier.classify(black_box(&text))));
    });

    group.finish();
}

fn bench_extract_clock_time(c: &mut Criterion) {
    let transcripts: Vec<String> = (0..1000).map(generate_transcript).collect();

    c.bench_function("extract_clock_time", |b| {
        let mut idx = 0usize;
        b.iter(|| {
            let text = &transcripts[idx % transcripts.len()];
            idx += 1;
            black_box(extract_clock_time(black_box(text)))
        });
    });
}

criterion_group!(benches, bench_classify, bench_extract_clock_time);
criterion_main!(benches);
