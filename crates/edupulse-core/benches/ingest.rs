use criterion::{black_box, criterion_group, criterion_main, Criterion};

use edupulse_core::ingest::{parse_number, parse_roster};
use edupulse_core::insight::build_prompt;
use edupulse_core::scoring::derive_all;

fn bench_parse_number(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_number");

    group.bench_function("integer", |b| b.iter(|| parse_number(black_box("85"))));
    group.bench_function("decimal", |b| b.iter(|| parse_number(black_box("4.75"))));
    group.bench_function("garbage", |b| b.iter(|| parse_number(black_box("n/a"))));

    group.finish();
}

fn bench_roster_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("roster_parsing");

    // Rosters of various sizes, with a few malformed rows mixed in
    for n in [30, 500, 5_000] {
        let csv = generate_roster_csv(n);
        group.bench_function(format!("{n}_rows"), |b| {
            b.iter(|| parse_roster(black_box(&csv)))
        });
    }

    group.finish();
}

fn bench_prompt(c: &mut Criterion) {
    let mut group = c.benchmark_group("insight_prompt");

    let students = derive_all(&parse_roster(&generate_roster_csv(30)).unwrap_or_default());
    group.bench_function("30_students", |b| b.iter(|| build_prompt(black_box(&students))));

    group.finish();
}

fn generate_roster_csv(n: usize) -> String {
    let mut s = String::from("Name,Marks,Attendance,StudyHours\n");
    for i in 0..n {
        if i % 50 == 49 {
            s.push_str("broken,row\n");
            continue;
        }
        s.push_str(&format!(
            "Student {i},{},{},{}.5\n",
            i * 37 % 101,
            i * 53 % 101,
            i % 8
        ));
    }
    s
}

criterion_group!(benches, bench_parse_number, bench_roster_parsing, bench_prompt);
criterion_main!(benches);
