use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradecalc_core::config::EngineConfig;
use gradecalc_core::parser::{parse_gradebook_str, validate_gradebook};

fn gradebook_toml(semesters: usize, subjects: usize) -> String {
    let mut s = String::from("[program]\ntotal_semesters = 8\ncompleted_gpas = [3.2]\n");
    for sem in 0..semesters {
        s.push_str(&format!("\n[[semesters]]\nname = \"Semester {sem}\"\n"));
        for subj in 0..subjects {
            s.push_str(&format!(
                "\n[[semesters.subjects]]\nname = \"Subject {subj}\"\ngoal_percentage = 85.0\n"
            ));
            s.push_str("\n[[semesters.subjects.types]]\nkind = \"quiz\"\nweight = 40.0\nexpected_count = 4\n");
            for q in 0..4 {
                s.push_str(&format!(
                    "\n[[semesters.subjects.types.records]]\nscore = {}.0\nfinal = {}\n",
                    70 + q * 5,
                    q < 2
                ));
            }
            s.push_str("\n[[semesters.subjects.types]]\nkind = \"final_exam\"\nweight = 60.0\n");
        }
    }
    s
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_gradebook");
    let config = EngineConfig::default();

    let small = gradebook_toml(1, 4);
    let large = gradebook_toml(8, 8);

    group.bench_function("small", |b| {
        b.iter(|| parse_gradebook_str(black_box(&small), Path::new("bench.toml"), &config))
    });

    group.bench_function("large", |b| {
        b.iter(|| parse_gradebook_str(black_box(&large), Path::new("bench.toml"), &config))
    });

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let config = EngineConfig::default();
    let book = parse_gradebook_str(&gradebook_toml(8, 8), Path::new("bench.toml"), &config).unwrap();

    c.bench_function("validate_gradebook", |b| {
        b.iter(|| validate_gradebook(black_box(&book)))
    });
}

criterion_group!(benches, bench_parse, bench_validate);
criterion_main!(benches);
