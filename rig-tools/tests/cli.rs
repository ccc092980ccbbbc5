//! CLI integration tests for the skeleton commands

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rig_skeleton::{RawJoint, RawSkeleton, Skeleton, SkeletonBuilder};
use tempfile::TempDir;

const RIG_JSON: &str = r#"{
  "roots": [
    {
      "name": "hips",
      "transform": {
        "translation": [0.0, 1.0, 0.0],
        "rotation": [0.0, 0.0, 0.0, 1.0],
        "scale": [1.0, 1.0, 1.0]
      },
      "children": [
        { "name": "spine", "children": [{ "name": "head" }] },
        { "name": "tail" }
      ]
    },
    { "name": "prop" }
  ]
}"#;

fn rig() -> Command {
    Command::cargo_bin("rig").unwrap()
}

fn build_fixture(dir: &TempDir) -> std::path::PathBuf {
    let input = dir.path().join("rig.json");
    let output = dir.path().join("rig.skel");
    fs::write(&input, RIG_JSON).unwrap();

    rig()
        .args(["skeleton", "build"])
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Built skeleton with 5 joints"));
    output
}

fn load(path: &Path) -> Skeleton {
    Skeleton::from_path(path).unwrap()
}

#[test]
fn test_build_writes_breadth_first_skeleton() {
    let dir = TempDir::new().unwrap();
    let skeleton = load(&build_fixture(&dir));

    let names: Vec<_> = skeleton.joint_names().iter().collect();
    assert_eq!(names, vec!["hips", "prop", "spine", "tail", "head"]);
    assert_eq!(skeleton.parent(4), Some(2));
    assert_eq!(skeleton.joint_bind_pose(0).unwrap().translation.y, 1.0);
}

#[test]
fn test_info() {
    let dir = TempDir::new().unwrap();
    let archive = build_fixture(&dir);

    rig()
        .args(["skeleton", "info"])
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("Joints:         5"))
        .stdout(predicate::str::contains("SoA groups:     2"))
        .stdout(predicate::str::contains("Roots:          2"))
        .stdout(predicate::str::contains("Leaves:         3"))
        .stdout(predicate::str::contains("Max depth:      3"));
}

#[test]
fn test_info_detailed_lists_joints() {
    let dir = TempDir::new().unwrap();
    let archive = build_fixture(&dir);

    rig()
        .args(["skeleton", "info", "--detailed"])
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Joints ==="))
        .stdout(predicate::str::contains("2 (spine)"));
}

#[test]
fn test_tree() {
    let dir = TempDir::new().unwrap();
    let archive = build_fixture(&dir);

    rig()
        .args(["skeleton", "tree", "--no-color"])
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("rig.skel"))
        .stdout(predicate::str::contains("hips [0]"))
        .stdout(predicate::str::contains("└── ○ head [4]"));

    rig()
        .args(["skeleton", "tree", "--no-color", "--depth", "0"])
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("hips [0]"))
        .stdout(predicate::str::contains("spine").not());
}

#[test]
fn test_tree_metadata_layout() {
    let dir = TempDir::new().unwrap();
    let archive = build_fixture(&dir);

    rig()
        .args(["skeleton", "tree", "--no-color", "--bind-pose", "--compact"])
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("rig.skel ("))
        .stdout(predicate::str::contains("[joints:5]"))
        .stdout(predicate::str::contains("hips [0] [bind pose:"));

    rig()
        .args(["skeleton", "tree", "--no-color", "--bind-pose", "--no-metadata"])
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("head [4]"))
        .stdout(predicate::str::contains("bind pose").not())
        .stdout(predicate::str::contains("joints:").not());
}

#[test]
fn test_validate() {
    let dir = TempDir::new().unwrap();
    let archive = build_fixture(&dir);

    rig()
        .args(["skeleton", "validate"])
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("is a valid skeleton"));
}

#[test]
fn test_validate_rejects_garbage() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("garbage.skel");
    fs::write(&path, b"\x01not-a-skeleton\0\x01\0\0\0").unwrap();

    rig()
        .args(["skeleton", "validate"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load skeleton"));
}

#[test]
fn test_big_endian_export_round_trip() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("rig.json");
    let big = dir.path().join("big.skel");
    let exported = dir.path().join("exported.json");
    let rebuilt = dir.path().join("rebuilt.skel");
    fs::write(&input, RIG_JSON).unwrap();

    rig()
        .args(["skeleton", "build", "--endian", "big"])
        .arg(&input)
        .arg(&big)
        .assert()
        .success();
    assert_eq!(fs::read(&big).unwrap()[0], 0);

    rig()
        .args(["skeleton", "export"])
        .arg(&big)
        .arg(&exported)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 5 joints"));

    rig()
        .args(["skeleton", "build"])
        .arg(&exported)
        .arg(&rebuilt)
        .assert()
        .success();

    assert_eq!(load(&rebuilt), load(&big));
}

fn chain(length: usize) -> RawSkeleton {
    let mut joint = RawJoint::new(format!("link_{}", length - 1));
    for i in (0..length - 1).rev() {
        joint = RawJoint::new(format!("link_{i}")).with_children(vec![joint]);
    }
    RawSkeleton::new(vec![joint])
}

#[test]
fn test_deep_chain_export_round_trip() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("chain.skel");
    let exported = dir.path().join("chain.json");
    let rebuilt = dir.path().join("rebuilt.skel");

    let skeleton = SkeletonBuilder::new().build(&chain(200)).unwrap();
    skeleton.save_to_path(&archive).unwrap();

    rig()
        .args(["skeleton", "export"])
        .arg(&archive)
        .arg(&exported)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 200 joints"));

    rig()
        .args(["skeleton", "build"])
        .arg(&exported)
        .arg(&rebuilt)
        .assert()
        .success()
        .stdout(predicate::str::contains("Built skeleton with 200 joints"));

    assert_eq!(load(&rebuilt), skeleton);
}

#[test]
fn test_build_rejects_trailing_json() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("rig.json");
    fs::write(&input, format!("{RIG_JSON} {{}}")).unwrap();

    rig()
        .args(["skeleton", "build"])
        .arg(&input)
        .arg(dir.path().join("out.skel"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse authoring file"));
}

#[test]
fn test_build_rejects_missing_input() {
    let dir = TempDir::new().unwrap();
    rig()
        .args(["skeleton", "build"])
        .arg(dir.path().join("missing.json"))
        .arg(dir.path().join("out.skel"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open authoring file"));
}

#[test]
fn test_completions() {
    rig()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rig"));
}
