use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pumpkin_core::{scan, Element, LayoutStateManager, StateKind};
use pumpkin_testing::{wide_tree, ApplyLog, RecordingState};

const GROUP_SAMPLES: &[usize] = &[8, 32, 128];
const LEAVES_PER_GROUP: usize = 16;
const BENCH_STATE: StateKind = StateKind::new("bench");

fn bench_full_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_full_tree");
    for &groups in GROUP_SAMPLES {
        let tree = wide_tree(groups, LEAVES_PER_GROUP);
        let root: Rc<dyn Element> = tree.clone();
        group.bench_with_input(BenchmarkId::from_parameter(groups), &root, |b, root| {
            b.iter(|| {
                let outcome = scan(root, |element| {
                    black_box(element.element_id());
                    false
                });
                black_box(outcome.visited)
            });
        });
    }
    group.finish();
}

fn bench_manager_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("manager_build");
    for &groups in GROUP_SAMPLES {
        let tree = wide_tree(groups, LEAVES_PER_GROUP);
        // One target near the front, one in the last group.
        let last = ((groups - 1) * 1000 + LEAVES_PER_GROUP) as i32;
        let targets = [1, last];
        group.bench_with_input(BenchmarkId::from_parameter(groups), &tree, |b, tree| {
            b.iter(|| {
                let log = ApplyLog::new();
                let manager = LayoutStateManager::setup_with(tree.clone())
                    .add_state(RecordingState::new(BENCH_STATE, &targets, &log))
                    .build();
                black_box(manager.target_index().len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_full_scan, bench_manager_build);
criterion_main!(benches);
