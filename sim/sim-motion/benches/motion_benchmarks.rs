//! Benchmarks for pose integration and separation tracking.
//!
//! Run with: cargo bench -p sim-motion
//!
//! These paths run once per body (integration) or once per pair
//! (tracker update) on every simulation step, so per-call cost matters.

#![allow(missing_docs, clippy::wildcard_imports)]

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use nalgebra::{Point3, Vector3};
use rand::Rng;

use sim_motion::{
    SeparatingDistanceTracker, calculate_velocity, calculate_velocity_quaternion,
    integrate_transform,
};
use sim_rotation::{Pose, Quaternion};

fn random_vector(rng: &mut impl Rng, scale: f64) -> Vector3<f64> {
    Vector3::new(
        rng.gen_range(-scale..scale),
        rng.gen_range(-scale..scale),
        rng.gen_range(-scale..scale),
    )
}

fn random_rotation(rng: &mut impl Rng) -> Quaternion {
    let axis = Vector3::new(
        rng.gen_range(0.1..1.0),
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
    );
    Quaternion::from_axis_angle(&axis, rng.gen_range(-3.0..3.0))
}

fn random_pose(rng: &mut impl Rng) -> Pose {
    Pose::from_position_rotation(Point3::from(random_vector(rng, 10.0)), random_rotation(rng))
}

/// Benchmark a single integration step at each branch of the rotation
/// update: Taylor series (slow spin), full sinc (moderate), and the
/// per-step angle clamp (fast).
fn bench_integrate_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("integrate_transform");

    let pose = Pose::from_position(Point3::new(1.0, 2.0, 3.0));
    let lin_vel = Vector3::new(0.5, -0.2, 0.1);
    let dt = 1.0 / 240.0;

    for (label, speed) in [("taylor", 5.0e-4), ("sinc", 2.0), ("clamped", 1.0e4)] {
        let ang_vel = Vector3::new(0.0, 0.0, speed);

        group.bench_with_input(
            BenchmarkId::new("branch", label),
            &(&pose, &lin_vel, &ang_vel),
            |b, (pose, lin_vel, ang_vel)| {
                b.iter(|| black_box(integrate_transform(pose, lin_vel, ang_vel, dt)));
            },
        );
    }

    group.finish();
}

/// Benchmark advancing a whole scene of bodies for one step.
fn bench_integrate_scene(c: &mut Criterion) {
    let mut group = c.benchmark_group("integrate_scene");
    let mut rng = rand::thread_rng();
    let dt = 1.0 / 240.0;

    for body_count in [64, 1024] {
        let bodies: Vec<_> = (0..body_count)
            .map(|_| {
                (
                    random_pose(&mut rng),
                    random_vector(&mut rng, 5.0),
                    random_vector(&mut rng, 3.0),
                )
            })
            .collect();

        group.throughput(Throughput::Elements(body_count as u64));

        group.bench_with_input(
            BenchmarkId::new("bodies", body_count),
            &bodies,
            |b, bodies| {
                b.iter(|| {
                    for (pose, lin_vel, ang_vel) in bodies {
                        black_box(integrate_transform(pose, lin_vel, ang_vel, dt));
                    }
                });
            },
        );
    }

    group.finish();
}

/// Benchmark velocity extraction from pose pairs, matrix path vs
/// quaternion path.
fn bench_velocity_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("velocity_extraction");
    let mut rng = rand::thread_rng();

    let pose0 = random_pose(&mut rng);
    let pose1 = integrate_transform(
        &pose0,
        &Vector3::new(1.0, 0.0, -0.5),
        &Vector3::new(0.2, 1.1, -0.4),
        1.0 / 240.0,
    );

    group.bench_function("matrix_path", |b| {
        b.iter(|| black_box(calculate_velocity(&pose0, &pose1, 1.0 / 240.0)));
    });

    group.bench_function("quaternion_path", |b| {
        b.iter(|| {
            black_box(calculate_velocity_quaternion(
                &pose0.position,
                &pose1.position,
                &pose0.rotation,
                &pose1.rotation,
                1.0 / 240.0,
            ))
        });
    });

    group.finish();
}

/// Benchmark the tracker update that replaces an exact distance query on
/// most steps. One tracker per pair; scenes easily carry thousands.
fn bench_tracker_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("tracker_update");
    let mut rng = rand::thread_rng();

    for pair_count in [16, 256] {
        let trackers: Vec<_> = (0..pair_count)
            .map(|_| {
                let pose_a = random_pose(&mut rng);
                let offset = random_vector(&mut rng, 1.0).normalize() * 8.0;
                let pose_b = Pose::from_position_rotation(
                    pose_a.position + offset,
                    random_rotation(&mut rng),
                );
                // Normal points from B toward A.
                let mut tracker = SeparatingDistanceTracker::new(0.5, 0.5);
                tracker.init_separating_distance(&(-offset / 8.0), 7.0, &pose_a, &pose_b);
                (tracker, pose_a, pose_b)
            })
            .collect();

        // Drift every B slightly so the update exercises the armed path,
        // not the collapsed short-circuit.
        let drift = Vector3::new(1.0e-3, 0.0, 0.0);

        group.throughput(Throughput::Elements(pair_count as u64));

        // Fresh trackers per iteration: the decrement is monotonic, so
        // reusing them would eventually measure collapsed updates.
        group.bench_function(BenchmarkId::new("pairs", pair_count), |b| {
            b.iter_batched_ref(
                || trackers.clone(),
                |trackers| {
                    for (tracker, pose_a, pose_b) in trackers.iter_mut() {
                        pose_b.position += drift;
                        tracker.update_separating_distance(pose_a, pose_b);
                        black_box(tracker.conservative_separating_distance());
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// Benchmark the quaternion primitives the hot paths lean on.
fn bench_quaternion_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("quaternion_ops");
    let mut rng = rand::thread_rng();

    let q0 = random_rotation(&mut rng);
    let q1 = random_rotation(&mut rng);
    let v = random_vector(&mut rng, 4.0);

    group.bench_function("multiply", |b| {
        b.iter(|| black_box(black_box(q0) * black_box(q1)));
    });

    group.bench_function("rotate_vector", |b| {
        b.iter(|| black_box(q0.rotate(black_box(&v))));
    });

    group.bench_function("slerp", |b| {
        b.iter(|| black_box(q0.slerp(&q1, black_box(0.37))));
    });

    group.bench_function("nearest", |b| {
        b.iter(|| black_box(q0.nearest(black_box(&q1))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_integrate_transform,
    bench_integrate_scene,
    bench_velocity_extraction,
    bench_tracker_update,
    bench_quaternion_ops,
);
criterion_main!(benches);
