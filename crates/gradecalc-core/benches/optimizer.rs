use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradecalc_core::config::EngineConfig;
use gradecalc_core::model::{AssessmentKind, AssessmentRecord, AssessmentType, Category, Subject};
use gradecalc_core::projection::{difficulty_rating, ProgramGpaProjector};
use gradecalc_core::subject::SubjectGradeEngine;

fn make_type(kind: AssessmentKind, weight: f64, graded: u32, open: u32) -> AssessmentType {
    let records = (0..graded + open)
        .map(|i| {
            let is_final = i < graded;
            let score = if is_final { 70.0 + f64::from(i % 30) } else { 0.0 };
            AssessmentRecord::new(u64::from(i), 0, i + 1, score, is_final).unwrap()
        })
        .collect::<Vec<_>>();
    AssessmentType::new(0, Category::new(kind, graded + open), weight, records).unwrap()
}

fn make_subject(graded: u32, open: u32) -> Subject {
    Subject::new(
        1,
        "bench",
        88.0,
        vec![
            make_type(AssessmentKind::Assignment, 15.0, graded, open),
            make_type(AssessmentKind::Quiz, 15.0, graded, open),
            make_type(AssessmentKind::Midterm, 20.0, 1, 0),
            make_type(AssessmentKind::FinalExam, 30.0, 0, 1),
            make_type(AssessmentKind::FinalProject, 20.0, 0, 1),
        ],
    )
    .unwrap()
}

fn bench_required_scores(c: &mut Criterion) {
    let mut group = c.benchmark_group("required_scores");
    let config = EngineConfig::default();

    for (label, graded, open) in [("early", 1, 9), ("midway", 5, 5), ("late", 9, 1)] {
        let subject = make_subject(graded, open);
        group.bench_function(label, |b| {
            let engine = SubjectGradeEngine::new(&subject, &config);
            b.iter(|| engine.required_scores(black_box(88.0)))
        });
    }

    group.finish();
}

fn bench_subject_summary(c: &mut Criterion) {
    let config = EngineConfig::default();
    let subject = make_subject(5, 5);

    c.bench_function("subject_summary", |b| {
        let engine = SubjectGradeEngine::new(&subject, &config);
        b.iter(|| black_box(engine.summary()))
    });
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    let projector = ProgramGpaProjector::from_gpas(&[3.1, 3.4, 2.9, 3.7], 8);

    group.bench_function("projections", |b| b.iter(|| black_box(&projector).projections()));

    group.bench_function("difficulty", |b| {
        b.iter(|| difficulty_rating(black_box(3.2), black_box(3.6), black_box(4), black_box(8)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_required_scores,
    bench_subject_summary,
    bench_projection
);
criterion_main!(benches);
