#![deny(warnings)]

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use inkmask::{
    Ledger, LedgerError, PathCache, Point, PointerEvent, RGBA, Rnd, Scene, Session, SessionConfig,
    Tool,
};
use std::hint::black_box;

/// Ledger with `count` strokes, every fifth of them an eraser
fn ledger_fill(rnd: &mut Rnd, count: usize, points: usize) -> Result<Ledger, LedgerError> {
    let mut ledger = Ledger::new();
    for index in 0..count {
        let tool = if index % 5 == 4 {
            Tool::eraser(20.0)
        } else {
            Tool::pen(RGBA::BLACK, 4.0)
        };
        let start = 1024.0 * rnd.point();
        let mut walk = rnd.walk(start, points, 4.0).into_iter();
        if let Some(start) = walk.next() {
            ledger.start_stroke(tool, start)?;
        }
        for point in walk {
            ledger.append_point(point)?;
        }
        ledger.end_stroke();
    }
    Ok(ledger)
}

fn append_benchmark(c: &mut Criterion) {
    let mut rnd = Rnd::new();
    let count = 4096;
    let points = rnd.walk(Point::new(512.0, 512.0), count, 4.0);

    let mut group = c.benchmark_group("append");
    group.throughput(Throughput::Elements(count as u64));
    group.bench_function("ledger", |b| {
        b.iter_with_large_drop(|| {
            let mut ledger = Ledger::new();
            let _ = ledger.start_stroke(Tool::pen(RGBA::RED, 4.0), points[0]);
            for point in &points[1..] {
                let _ = ledger.append_point(black_box(*point));
            }
            ledger
        })
    });
    group.bench_function("session", |b| {
        b.iter_with_large_drop(|| {
            let mut session = Session::new(SessionConfig::default()).ok()?;
            session.handle(PointerEvent::Start(points[0])).ok()?;
            for point in &points[1..] {
                session.handle(PointerEvent::Move(black_box(*point))).ok()?;
            }
            Some(session)
        })
    });
    group.finish();
}

fn scene_benchmark(c: &mut Criterion) {
    let mut rnd = Rnd::new();
    let count = 256;
    let Ok(mut ledger) = ledger_fill(&mut rnd, count, 64) else {
        return;
    };

    let mut group = c.benchmark_group("scene");
    group.throughput(Throughput::Elements(count as u64));
    group.bench_function("group", |b| {
        b.iter(|| black_box(&ledger).group_for_render().len())
    });
    group.bench_function("build-cold", |b| {
        b.iter_with_large_drop(|| Scene::build(&ledger.group_for_render(), &mut PathCache::new()))
    });

    // steady state of a drag: only the last stroke changes between frames
    let _ = ledger.start_stroke(Tool::pen(RGBA::BLUE, 4.0), Point::new(0.0, 0.0));
    let mut cache = PathCache::new();
    Scene::build(&ledger.group_for_render(), &mut cache);
    group.bench_function("build-warm", |b| {
        b.iter_with_large_drop(|| {
            let _ = ledger.append_point(rnd.point());
            Scene::build(&ledger.group_for_render(), &mut cache)
        })
    });
    group.finish();
}

criterion_group!(benches, append_benchmark, scene_benchmark);
criterion_main!(benches);
