// h36m-pose 🚀 AGPL-3.0 License

//! Pose normalization pipeline.
//!
//! Converts raw annotation batches into the learnable representation (root
//! centering + removal, then per-joint standardization against the training
//! statistics) and back (de-standardization + root re-attachment for
//! evaluation in original units).
//!
//! Every transform here is pure: inputs are borrowed, outputs are freshly
//! allocated. The Python pipeline this replaces mutated arrays in place,
//! which let aliasing bugs leak across batched samples; returning new arrays
//! rules that class of defect out by construction and keeps every function
//! safe to call concurrently from data-loader workers.

use ndarray::{s, Array3, Axis};

use crate::annotations::Annotations;
use crate::error::{PoseError, Result};
use crate::skeleton::{FLIP_INDICES_16, NUM_JOINTS, NUM_MOVABLE_JOINTS};
use crate::stats::NormStats;

/// ImageNet channel means used for RGB input normalization.
pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];

/// ImageNet channel standard deviations used for RGB input normalization.
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Center a pose batch at the root joint and delete the root row.
///
/// Given shape (N, J, D), subtracts each sample's root coordinate from every
/// joint of that sample and removes the root row, yielding (N, J-1, D). The
/// removed root is always reconstructible as the all-zero vector: centering
/// is exact and invertible.
///
/// # Errors
///
/// Returns [`PoseError::ConfigInconsistency`] if `root_idx` is not a valid
/// joint index.
pub fn center_root(pose: &Array3<f32>, root_idx: usize) -> Result<Array3<f32>> {
    let (n, j, d) = pose.dim();
    if root_idx >= j {
        return Err(PoseError::ConfigInconsistency(format!(
            "root index {root_idx} out of range for {j} joints"
        )));
    }

    let mut out = Array3::zeros((n, j - 1, d));
    for i in 0..n {
        let root = pose.slice(s![i, root_idx, ..]);
        let mut out_joint = 0;
        for joint in 0..j {
            if joint == root_idx {
                continue;
            }
            for coord in 0..d {
                out[[i, out_joint, coord]] = pose[[i, joint, coord]] - root[coord];
            }
            out_joint += 1;
        }
    }
    Ok(out)
}

/// Re-attach an all-zero root row at joint index 0, inflating (N, J, D) to
/// (N, J+1, D).
#[must_use]
pub fn restore_root(pose: &Array3<f32>) -> Array3<f32> {
    let (n, j, d) = pose.dim();
    let mut out = Array3::zeros((n, j + 1, d));
    out.slice_mut(s![.., 1.., ..]).assign(pose);
    out
}

/// Standardize a root-removed pose batch: `(pose - mean) / std`.
///
/// The mean/std pair is looked up from `stats` by the pose's coordinate
/// dimension (2 or 3).
///
/// # Errors
///
/// Returns [`PoseError::MissingStatistics`] if the table lacks the pair for
/// this dimension and [`PoseError::ShapeMismatch`] if the table's joint
/// count differs from the pose's.
pub fn standardize(pose: &Array3<f32>, stats: &NormStats) -> Result<Array3<f32>> {
    let (_, j, d) = pose.dim();
    let (mean, std) = stats.for_dim(d)?;
    if mean.nrows() != j {
        return Err(PoseError::ShapeMismatch(format!(
            "pose has {j} joints but the {d}D statistics cover {}",
            mean.nrows()
        )));
    }

    let mut out = pose.clone();
    for mut sample in out.axis_iter_mut(Axis(0)) {
        sample -= mean;
        sample /= std;
    }
    Ok(out)
}

/// Exact algebraic inverse of [`standardize`]: `pose * std + mean`.
///
/// # Errors
///
/// Same conditions as [`standardize`].
pub fn destandardize(pose: &Array3<f32>, stats: &NormStats) -> Result<Array3<f32>> {
    let (_, j, d) = pose.dim();
    let (mean, std) = stats.for_dim(d)?;
    if mean.nrows() != j {
        return Err(PoseError::ShapeMismatch(format!(
            "pose has {j} joints but the {d}D statistics cover {}",
            mean.nrows()
        )));
    }

    let mut out = pose.clone();
    for mut sample in out.axis_iter_mut(Axis(0)) {
        sample *= std;
        sample += mean;
    }
    Ok(out)
}

/// Prepare an annotation batch for model consumption.
///
/// Centers and removes the root from both the 2D and 3D pose fields, then
/// standardizes both against `stats` when provided. Camera parameters and
/// metadata pass through unchanged. All configuration is validated eagerly,
/// before any numeric work touches the arrays.
///
/// # Errors
///
/// Returns [`PoseError::ShapeMismatch`] if the batch does not carry 17-joint
/// poses (in particular, feeding an already-preprocessed 16-joint batch back
/// in fails here) and [`PoseError::ConfigInconsistency`] if `root_idx` is
/// out of range or the statistics do not cover exactly the 16 post-removal
/// joints.
pub fn preprocess(
    annotations: Annotations,
    root_idx: usize,
    stats: Option<&NormStats>,
) -> Result<Annotations> {
    let j = annotations.joints();
    if j != NUM_JOINTS {
        return Err(PoseError::ShapeMismatch(format!(
            "preprocess expects {NUM_JOINTS}-joint poses, got {j} (already preprocessed?)"
        )));
    }
    if root_idx >= j {
        return Err(PoseError::ConfigInconsistency(format!(
            "root index {root_idx} out of range for {j} joints"
        )));
    }
    if let Some(stats) = stats {
        for dim in [2, 3] {
            let stat_joints = stats.joints(dim)?;
            if stat_joints != NUM_MOVABLE_JOINTS {
                return Err(PoseError::ConfigInconsistency(format!(
                    "{dim}D statistics cover {stat_joints} joints, expected {NUM_MOVABLE_JOINTS}"
                )));
            }
        }
    }

    let mut pose2d = center_root(&annotations.pose2d, root_idx)?;
    let mut pose3d = center_root(&annotations.pose3d, root_idx)?;

    if let Some(stats) = stats {
        pose2d = standardize(&pose2d, stats)?;
        pose3d = standardize(&pose3d, stats)?;
    }

    Ok(Annotations {
        pose2d,
        pose3d,
        cameras: annotations.cameras,
        meta: annotations.meta,
    })
}

/// Undo normalization on a reconstructed/target pair for evaluation.
///
/// De-standardizes both batches and re-attaches an all-zero root at joint 0,
/// restoring the 17-joint layout in original units. Error metrics are
/// computed with roots re-aligned to the origin; the 17-joint denominator
/// this implies for averaged metrics is the accepted convention.
///
/// # Errors
///
/// Returns [`PoseError::ShapeMismatch`] if the two batches differ in shape,
/// plus the conditions of [`destandardize`].
pub fn post_process(
    recon: &Array3<f32>,
    target: &Array3<f32>,
    stats: &NormStats,
) -> Result<(Array3<f32>, Array3<f32>)> {
    if recon.dim() != target.dim() {
        return Err(PoseError::ShapeMismatch(format!(
            "recon shape {:?} does not match target shape {:?}",
            recon.dim(),
            target.dim()
        )));
    }

    let recon = restore_root(&destandardize(recon, stats)?);
    let target = restore_root(&destandardize(target, stats)?);
    Ok((recon, target))
}

/// Mirror a root-removed pose batch about the vertical axis.
///
/// Left/right joints swap positions and the x coordinate flips sign; used as
/// a train-time augmentation. Applying it twice is the identity.
///
/// # Errors
///
/// Returns [`PoseError::ShapeMismatch`] unless the batch carries 16-joint
/// poses.
pub fn flip_horizontal(pose: &Array3<f32>) -> Result<Array3<f32>> {
    let (n, j, d) = pose.dim();
    if j != NUM_MOVABLE_JOINTS {
        return Err(PoseError::ShapeMismatch(format!(
            "flip expects {NUM_MOVABLE_JOINTS}-joint (root-removed) poses, got {j}"
        )));
    }

    let mut out = Array3::zeros((n, j, d));
    for i in 0..n {
        for (joint, &src) in FLIP_INDICES_16.iter().enumerate() {
            for coord in 0..d {
                out[[i, joint, coord]] = pose[[i, src, coord]];
            }
            out[[i, joint, 0]] = -out[[i, joint, 0]];
        }
    }
    Ok(out)
}

/// Normalize an RGB image to ImageNet statistics.
///
/// Input is an HWC u8 image; output is `(pixel - mean * 255) / (std * 255)`
/// per channel, as f32.
///
/// # Errors
///
/// Returns [`PoseError::ShapeMismatch`] unless the image has 3 channels.
pub fn normalize_image(image: &Array3<u8>) -> Result<Array3<f32>> {
    let (h, w, c) = image.dim();
    if c != 3 {
        return Err(PoseError::ShapeMismatch(format!(
            "expected a 3-channel RGB image, got {c} channels"
        )));
    }

    let max_pixel = 255.0;
    let mut out = Array3::zeros((h, w, c));
    for channel in 0..3 {
        let mean = IMAGENET_MEAN[channel] * max_pixel;
        let inv_std = 1.0 / (IMAGENET_STD[channel] * max_pixel);
        for y in 0..h {
            for x in 0..w {
                out[[y, x, channel]] = (f32::from(image[[y, x, channel]]) - mean) * inv_std;
            }
        }
    }
    Ok(out)
}
