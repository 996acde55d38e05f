use criterion::{black_box, criterion_group, criterion_main, Criterion};
use myoreact_core::{Arm, DeviceEvent, Pose, XDirection};
use myoreact_experiment::PoseStateTracker;

/// One 50 ms tick worth of traffic: EMG at 200 Hz plus a pose change.
fn tick_events() -> Vec<DeviceEvent> {
    let mut events: Vec<DeviceEvent> = (0..10u64)
        .map(|i| DeviceEvent::Emg {
            timestamp: i * 5_000,
            samples: [i as i8, -3, 7, -12, 0, 4, -1, 9],
        })
        .collect();
    events.push(DeviceEvent::Pose {
        timestamp: 50_000,
        pose: Pose::FingersSpread,
    });
    events
}

fn bench_dispatch(c: &mut Criterion) {
    let events = tick_events();
    let mut tracker = PoseStateTracker::new();
    tracker.apply(&DeviceEvent::ArmSync {
        timestamp: 0,
        arm: Arm::Right,
        x_direction: XDirection::TowardWrist,
    });

    c.bench_function("apply_tick", |b| {
        b.iter(|| {
            let mut sent = 0;
            for event in events.iter() {
                sent += tracker.apply(black_box(event)).len();
            }
            black_box(sent)
        })
    });

    c.bench_function("query_gesture", |b| {
        b.iter(|| black_box(tracker.query_gesture()))
    });
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
