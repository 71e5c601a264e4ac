// h36m-pose 🚀 AGPL-3.0 License

//! Dataset-wide normalization statistics.
//!
//! The [`NormStats`] table holds the per-joint-coordinate mean and standard
//! deviation of the training split, computed once offline over root-centered,
//! root-removed poses and then loaded read-only at process start. It is an
//! explicit, immutable value passed by reference into every standardization
//! call, never hidden global state, so the transforms stay safe to call
//! from any number of worker threads.
//!
//! On disk the table is a flat NPZ archive with keys `mean2d`, `std2d`,
//! `mean3d`, `std3d`, each an array of shape (joints, 2 or 3). A table may
//! carry only the 2D or only the 3D pair; asking for the missing pair fails
//! with [`PoseError::MissingStatistics`] at first use.

use std::fs::File;
use std::path::Path;

use ndarray::{Array2, Array3, Axis};
use ndarray_npy::{NpzReader, NpzWriter};

use crate::error::{PoseError, Result};

/// Per-joint-coordinate mean/std table for 2D and 3D poses.
#[derive(Debug, Clone)]
pub struct NormStats {
    mean2d: Option<Array2<f32>>,
    std2d: Option<Array2<f32>>,
    mean3d: Option<Array2<f32>>,
    std3d: Option<Array2<f32>>,
}

impl NormStats {
    /// Build a table from explicit mean/std pairs.
    ///
    /// Each pair must be present or absent together, mean and std must have
    /// identical shapes, the coordinate dimension must match the key (2 or 3),
    /// and every standard deviation must be strictly positive. A zero std
    /// means a joint coordinate was constant across the whole training set;
    /// it is rejected here so the later divide can never produce inf or NaN.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::ConfigInconsistency`] if any of the above checks
    /// fail.
    pub fn new(
        mean2d: Option<Array2<f32>>,
        std2d: Option<Array2<f32>>,
        mean3d: Option<Array2<f32>>,
        std3d: Option<Array2<f32>>,
    ) -> Result<Self> {
        validate_pair(mean2d.as_ref(), std2d.as_ref(), 2)?;
        validate_pair(mean3d.as_ref(), std3d.as_ref(), 3)?;

        if let (Some(m2), Some(m3)) = (mean2d.as_ref(), mean3d.as_ref()) {
            if m2.nrows() != m3.nrows() {
                return Err(PoseError::ConfigInconsistency(format!(
                    "2D stats cover {} joints but 3D stats cover {}",
                    m2.nrows(),
                    m3.nrows()
                )));
            }
        }

        Ok(Self { mean2d, std2d, mean3d, std3d })
    }

    /// Compute the table from root-centered, root-removed training poses.
    ///
    /// `pose2d` has shape (N, J, 2) and `pose3d` shape (M, J, 3); mean and
    /// std are taken over the sample axis (population std, matching the
    /// offline annotation pipeline).
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::ShapeMismatch`] if the coordinate dimensions are
    /// wrong or the joint counts differ, and
    /// [`PoseError::ConfigInconsistency`] if either batch is empty or any
    /// joint coordinate is constant across the batch.
    pub fn compute(pose2d: &Array3<f32>, pose3d: &Array3<f32>) -> Result<Self> {
        let (n2, j2, d2) = pose2d.dim();
        let (n3, j3, d3) = pose3d.dim();

        if d2 != 2 || d3 != 3 {
            return Err(PoseError::ShapeMismatch(format!(
                "expected coordinate dims (2, 3), got ({d2}, {d3})"
            )));
        }
        if j2 != j3 {
            return Err(PoseError::ShapeMismatch(format!(
                "2D poses have {j2} joints but 3D poses have {j3}"
            )));
        }
        if n2 == 0 || n3 == 0 {
            return Err(PoseError::ConfigInconsistency(
                "cannot compute statistics from an empty batch".to_string(),
            ));
        }

        let mean2d = pose2d.mean_axis(Axis(0)).ok_or_else(|| {
            PoseError::ConfigInconsistency("empty 2D pose batch".to_string())
        })?;
        let mean3d = pose3d.mean_axis(Axis(0)).ok_or_else(|| {
            PoseError::ConfigInconsistency("empty 3D pose batch".to_string())
        })?;
        let std2d = pose2d.std_axis(Axis(0), 0.0);
        let std3d = pose3d.std_axis(Axis(0), 0.0);

        Self::new(Some(mean2d), Some(std2d), Some(mean3d), Some(std3d))
    }

    /// Look up the (mean, std) pair for a coordinate dimension (2 or 3).
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::MissingStatistics`] if the pair was never
    /// computed, or [`PoseError::ShapeMismatch`] for a dimension other than
    /// 2 or 3.
    pub fn for_dim(&self, dim: usize) -> Result<(&Array2<f32>, &Array2<f32>)> {
        let (mean, std) = match dim {
            2 => (self.mean2d.as_ref(), self.std2d.as_ref()),
            3 => (self.mean3d.as_ref(), self.std3d.as_ref()),
            _ => {
                return Err(PoseError::ShapeMismatch(format!(
                    "poses must have 2 or 3 coordinates, got {dim}"
                )))
            }
        };

        match (mean, std) {
            (Some(m), Some(s)) => Ok((m, s)),
            _ => Err(PoseError::MissingStatistics(format!(
                "mean{dim}d/std{dim}d not present in the loaded table"
            ))),
        }
    }

    /// Joint count covered by the table for a coordinate dimension.
    ///
    /// # Errors
    ///
    /// Same conditions as [`NormStats::for_dim`].
    pub fn joints(&self, dim: usize) -> Result<usize> {
        self.for_dim(dim).map(|(mean, _)| mean.nrows())
    }

    /// Load a table from an NPZ archive.
    ///
    /// Absent keys are tolerated (the pair simply stays unset); malformed
    /// arrays and archives are not.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::StatsIo`] on read failures and
    /// [`PoseError::ConfigInconsistency`] if the loaded arrays are
    /// internally inconsistent.
    pub fn read_npz<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut npz = NpzReader::new(File::open(path)?)?;
        let mean2d = read_optional(&mut npz, "mean2d")?;
        let std2d = read_optional(&mut npz, "std2d")?;
        let mean3d = read_optional(&mut npz, "mean3d")?;
        let std3d = read_optional(&mut npz, "std3d")?;
        Self::new(mean2d, std2d, mean3d, std3d)
    }

    /// Write the table to an NPZ archive.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::StatsIo`] or [`PoseError::Io`] on write failures.
    pub fn write_npz<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut npz = NpzWriter::new(File::create(path)?);
        if let (Some(mean), Some(std)) = (self.mean2d.as_ref(), self.std2d.as_ref()) {
            npz.add_array("mean2d", mean)?;
            npz.add_array("std2d", std)?;
        }
        if let (Some(mean), Some(std)) = (self.mean3d.as_ref(), self.std3d.as_ref()) {
            npz.add_array("mean3d", mean)?;
            npz.add_array("std3d", std)?;
        }
        npz.finish()?;
        Ok(())
    }
}

fn validate_pair(
    mean: Option<&Array2<f32>>,
    std: Option<&Array2<f32>>,
    dim: usize,
) -> Result<()> {
    let (mean, std) = match (mean, std) {
        (None, None) => return Ok(()),
        (Some(m), Some(s)) => (m, s),
        _ => {
            return Err(PoseError::ConfigInconsistency(format!(
                "mean{dim}d and std{dim}d must be present together"
            )))
        }
    };

    if mean.dim() != std.dim() {
        return Err(PoseError::ConfigInconsistency(format!(
            "mean{dim}d shape {:?} does not match std{dim}d shape {:?}",
            mean.dim(),
            std.dim()
        )));
    }
    if mean.ncols() != dim {
        return Err(PoseError::ConfigInconsistency(format!(
            "mean{dim}d has {} coordinates per joint, expected {dim}",
            mean.ncols()
        )));
    }
    for ((joint, coord), &s) in std.indexed_iter() {
        // Also rejects NaN.
        if !(s > 0.0) {
            return Err(PoseError::ConfigInconsistency(format!(
                "std{dim}d[{joint}, {coord}] = {s}; constant joint coordinate in the training set"
            )));
        }
    }
    Ok(())
}

/// Read one named array if present; NPZ entries may or may not carry the
/// `.npy` suffix depending on the writer.
fn read_optional(npz: &mut NpzReader<File>, key: &str) -> Result<Option<Array2<f32>>> {
    let suffixed = format!("{key}.npy");
    let present = npz
        .names()?
        .iter()
        .any(|n| n == key || *n == suffixed);
    if !present {
        return Ok(None);
    }
    match npz.by_name(key) {
        Ok(array) => Ok(Some(array)),
        Err(_) => Ok(Some(npz.by_name(&suffixed)?)),
    }
}
