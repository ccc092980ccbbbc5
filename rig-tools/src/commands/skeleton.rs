//! Skeleton archive command implementations

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use rig_archive::{Endianness, IArchive};
use rig_skeleton::{RawSkeleton, Skeleton, SkeletonBuilder, utils};

use crate::utils::{
    NodeType, TreeNode, TreeOptions, add_table_row, create_table, format_bytes, format_transform,
    render_tree,
};

#[derive(Subcommand)]
pub enum SkeletonCommands {
    /// Build a skeleton archive from a JSON authoring file
    Build {
        /// JSON file holding the raw joint hierarchy
        input: PathBuf,

        /// Output skeleton archive
        output: PathBuf,

        /// Byte order of the archive (little, big or native)
        #[arg(short, long, default_value = "native")]
        endian: Endianness,
    },

    /// Display information about a skeleton archive
    Info {
        /// Path to the skeleton archive
        file: PathBuf,

        /// List every joint
        #[arg(short, long)]
        detailed: bool,
    },

    /// Display the joint hierarchy as a tree
    Tree {
        /// Path to the skeleton archive
        file: PathBuf,

        /// Maximum depth to display
        #[arg(short, long)]
        depth: Option<usize>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Show the bind pose of every joint
        #[arg(short, long)]
        bind_pose: bool,

        /// Print metadata on the node line
        #[arg(short, long)]
        compact: bool,

        /// Hide node metadata
        #[arg(long)]
        no_metadata: bool,
    },

    /// Check the structure of a skeleton archive
    Validate {
        /// Path to the skeleton archive
        file: PathBuf,
    },

    /// Convert a skeleton archive back to a JSON authoring file
    Export {
        /// Path to the skeleton archive
        file: PathBuf,

        /// Output JSON file
        output: PathBuf,
    },
}

pub fn execute(cmd: SkeletonCommands) -> Result<()> {
    match cmd {
        SkeletonCommands::Build {
            input,
            output,
            endian,
        } => handle_build(&input, &output, endian),
        SkeletonCommands::Info { file, detailed } => handle_info(&file, detailed),
        SkeletonCommands::Tree {
            file,
            depth,
            no_color,
            bind_pose,
            compact,
            no_metadata,
        } => {
            let options = TreeOptions {
                // the file node sits one level above the root joints
                max_depth: depth.map(|depth| depth + 1),
                no_color,
                show_metadata: !no_metadata,
                compact,
            };
            handle_tree(&file, &options, bind_pose)
        }
        SkeletonCommands::Validate { file } => handle_validate(&file),
        SkeletonCommands::Export { file, output } => handle_export(&file, &output),
    }
}

/// Load a skeleton archive, reporting the byte order it was written with
fn load(path: &Path) -> Result<(Skeleton, Endianness)> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open skeleton file: {}", path.display()))?;
    let mut archive = IArchive::new(BufReader::new(file))
        .with_context(|| format!("Not a skeleton archive: {}", path.display()))?;
    let endianness = archive.endianness();
    let skeleton: Skeleton = archive
        .read_object()
        .with_context(|| format!("Failed to load skeleton from {}", path.display()))?;
    Ok((skeleton, endianness))
}

fn handle_build(input: &Path, output: &Path, endianness: Endianness) -> Result<()> {
    let file = File::open(input)
        .with_context(|| format!("Failed to open authoring file: {}", input.display()))?;
    let raw = read_authoring(BufReader::new(file))
        .with_context(|| format!("Failed to parse authoring file: {}", input.display()))?;

    let skeleton = SkeletonBuilder::new()
        .build(&raw)
        .with_context(|| format!("Failed to build skeleton from {}", input.display()))?;

    let file = File::create(output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    skeleton
        .to_writer_with_endianness(BufWriter::new(file), endianness)
        .with_context(|| format!("Failed to write skeleton to {}", output.display()))?;

    log::info!("Wrote {endianness} archive {}", output.display());
    println!(
        "Built skeleton with {} joints ({}) -> {}",
        skeleton.num_joints(),
        format_bytes(skeleton.file_size() as u64),
        output.display()
    );
    Ok(())
}

/// Parse a JSON hierarchy without a nesting limit
///
/// Each joint level nests two JSON values; recursion runs on a heap-grown stack.
fn read_authoring<R: Read>(reader: R) -> serde_json::Result<RawSkeleton> {
    let mut json = serde_json::Deserializer::from_reader(reader);
    json.disable_recursion_limit();
    let raw = RawSkeleton::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(raw)
}

fn handle_info(path: &Path, detailed: bool) -> Result<()> {
    let (skeleton, endianness) = load(path)?;

    let leaves = skeleton
        .joint_properties()
        .iter()
        .filter(|joint| joint.is_leaf())
        .count();

    println!("Skeleton: {}", path.display());
    println!("\n=== Skeleton Information ===");
    println!("Byte order:     {endianness}");
    println!("Archive size:   {}", format_bytes(skeleton.file_size() as u64));
    println!("Joints:         {}", skeleton.num_joints());
    println!("SoA groups:     {}", skeleton.num_soa_joints());
    println!("Roots:          {}", skeleton.roots().count());
    println!("Leaves:         {leaves}");
    println!("Max depth:      {}", utils::max_depth(&skeleton));

    if detailed && !skeleton.is_empty() {
        println!("\n=== Joints ===");
        let depths = utils::joint_depths(&skeleton);
        let names = skeleton.joint_names();
        let mut table = create_table(&["Index", "Name", "Parent", "Depth", "Leaf", "Bind pose"]);
        for (index, joint) in skeleton.joint_properties().iter().enumerate() {
            let parent = match joint.parent_index() {
                Some(parent) => format!("{parent} ({})", &names[parent]),
                None => "-".to_string(),
            };
            let bind_pose = skeleton
                .joint_bind_pose(index)
                .map(|transform| format_transform(&transform))
                .unwrap_or_default();
            add_table_row(
                &mut table,
                vec![
                    index.to_string(),
                    names[index].to_string(),
                    parent,
                    depths[index].to_string(),
                    if joint.is_leaf() { "yes" } else { "no" }.to_string(),
                    bind_pose,
                ],
            );
        }
        table.printstd();
    }

    Ok(())
}

fn handle_tree(path: &Path, options: &TreeOptions, bind_pose: bool) -> Result<()> {
    let (skeleton, _) = load(path)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mut root = TreeNode::new(file_name, NodeType::File)
        .with_size(skeleton.file_size() as u64)
        .with_metadata("joints", skeleton.num_joints().to_string());
    for joint in skeleton.roots() {
        root = root.add_child(joint_node(&skeleton, joint, bind_pose));
    }

    print!("{}", render_tree(&root, options));
    Ok(())
}

fn joint_node(skeleton: &Skeleton, joint: usize, bind_pose: bool) -> TreeNode {
    let node_type = if skeleton.parent(joint).is_none() {
        NodeType::Root
    } else if skeleton.is_leaf(joint) {
        NodeType::Leaf
    } else {
        NodeType::Joint
    };

    let name = format!("{} [{joint}]", &skeleton.joint_names()[joint]);
    let mut node = TreeNode::new(name, node_type);
    if bind_pose && let Some(transform) = skeleton.joint_bind_pose(joint) {
        node = node.with_metadata("bind pose", format_transform(&transform));
    }
    for child in skeleton.children(joint) {
        node = node.add_child(joint_node(skeleton, child, bind_pose));
    }
    node
}

fn handle_validate(path: &Path) -> Result<()> {
    let (skeleton, _) = load(path)?;

    // load already rejects malformed content; check again for the report
    if let Err(e) = skeleton.validate() {
        bail!("{} is invalid: {e}", path.display());
    }

    println!("✓ {} is a valid skeleton", path.display());
    println!(
        "  {} joints in {} SoA groups",
        skeleton.num_joints(),
        skeleton.num_soa_joints()
    );
    println!("  parents precede children, leaf flags match the hierarchy");
    Ok(())
}

fn handle_export(path: &Path, output: &Path) -> Result<()> {
    let (skeleton, _) = load(path)?;
    let raw = RawSkeleton::from(&skeleton);

    let file = File::create(output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &raw)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    writer.flush()?;

    println!(
        "Exported {} joints to {}",
        raw.num_joints(),
        output.display()
    );
    Ok(())
}
