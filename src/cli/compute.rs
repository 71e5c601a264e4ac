// h36m-pose 🚀 AGPL-3.0 License

//! Implementation of the `stats` subcommand: the one-time offline pass that
//! turns raw training-split annotations into the normalization table every
//! later training/inference run loads read-only at startup.

use std::fs::File;

use ndarray::Array3;
use ndarray_npy::NpzReader;

use crate::cli::args::StatsArgs;
use crate::error::{PoseError, Result};
use crate::processing::center_root;
use crate::stats::NormStats;
use crate::{info, success};

/// Run the `stats` command.
///
/// # Errors
///
/// Returns any error from reading the pose archive, centering, statistics
/// computation, or writing the output table.
pub fn run(args: &StatsArgs) -> Result<()> {
    crate::cli::logging::set_verbose(!args.quiet);

    info!("Reading poses from {}", args.poses);
    let mut npz = NpzReader::new(File::open(&args.poses)?)?;
    let pose2d = read_pose_array(&mut npz, "pose2d")?;
    let pose3d = read_pose_array(&mut npz, "pose3d")?;
    info!(
        "Loaded {} samples ({} joints, 2D + 3D)",
        pose2d.dim().0,
        pose2d.dim().1
    );

    let pose2d = center_root(&pose2d, args.root_idx)?;
    let pose3d = center_root(&pose3d, args.root_idx)?;

    let stats = NormStats::compute(&pose2d, &pose3d)?;
    stats.write_npz(&args.output)?;

    success!("Wrote normalization statistics to {}", args.output);
    Ok(())
}

fn read_pose_array(npz: &mut NpzReader<File>, key: &str) -> Result<Array3<f32>> {
    let suffixed = format!("{key}.npy");
    let present = npz
        .names()?
        .iter()
        .any(|n| n == key || *n == suffixed);
    if !present {
        return Err(PoseError::StatsIo(format!(
            "pose archive has no `{key}` array"
        )));
    }
    match npz.by_name(key) {
        Ok(array) => Ok(array),
        Err(_) => Ok(npz.by_name(&suffixed)?),
    }
}
