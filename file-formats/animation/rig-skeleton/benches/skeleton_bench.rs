//! Skeleton build and load benchmarks

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use glam::Vec3;
use rig_archive::IArchive;
use rig_skeleton::{JointTransform, RawJoint, RawSkeleton, Skeleton, SkeletonBuilder, utils};

/// Humanoid-like hierarchy: `chains` limbs of `length` joints under one root
fn generate_rig(chains: usize, length: usize) -> RawSkeleton {
    let limbs = (0..chains)
        .map(|chain| {
            let mut joint = RawJoint::new(format!("limb_{chain}_end"));
            for link in (0..length - 1).rev() {
                joint = RawJoint::new(format!("limb_{chain}_{link}"))
                    .with_transform(JointTransform::from_translation(Vec3::Y * 0.1))
                    .with_children(vec![joint]);
            }
            joint
        })
        .collect();
    RawSkeleton::new(vec![RawJoint::new("root").with_children(limbs)])
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("skeleton/build");

    for (chains, length) in [(5, 4), (16, 8), (32, 31)] {
        let raw = generate_rig(chains, length);
        let joints = raw.num_joints();
        group.throughput(Throughput::Elements(joints as u64));
        group.bench_with_input(BenchmarkId::from_parameter(joints), &raw, |b, raw| {
            b.iter(|| SkeletonBuilder::new().build(black_box(raw)).unwrap());
        });
    }

    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("skeleton/load");

    for (chains, length) in [(5, 4), (16, 8), (32, 31)] {
        let skeleton = SkeletonBuilder::new()
            .build(&generate_rig(chains, length))
            .unwrap();
        let mut bytes = Vec::new();
        skeleton.to_writer(&mut bytes).unwrap();

        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("fresh", skeleton.num_joints()),
            &bytes,
            |b, bytes| b.iter(|| Skeleton::from_reader(black_box(bytes.as_slice())).unwrap()),
        );

        let mut target = Skeleton::new();
        group.bench_with_input(
            BenchmarkId::new("reload", skeleton.num_joints()),
            &bytes,
            |b, bytes| {
                b.iter(|| {
                    let mut archive = IArchive::new(black_box(bytes.as_slice())).unwrap();
                    archive.load_object(&mut target).unwrap();
                })
            },
        );
    }

    group.finish();
}

fn bench_traversal(c: &mut Criterion) {
    let skeleton = SkeletonBuilder::new().build(&generate_rig(32, 31)).unwrap();

    c.bench_function("skeleton/depth_first", |b| {
        b.iter(|| utils::iter_depth_first(black_box(&skeleton), None).count())
    });
    c.bench_function("skeleton/joint_depths", |b| {
        b.iter(|| utils::joint_depths(black_box(&skeleton)))
    });
}

criterion_group!(benches, bench_build, bench_load, bench_traversal);
criterion_main!(benches);
