// h36m-pose 🚀 AGPL-3.0 License

//! Evaluation metrics.
//!
//! MPJPE (mean per-joint position error) is computed in original physical
//! units on poses that went through [`crate::processing::post_process`],
//! i.e. 17-joint, root re-aligned to the origin.

use ndarray::{Array1, Array3};

use crate::error::{PoseError, Result};

/// Per-sample mean per-joint position error.
///
/// For each sample, the mean over joints of the Euclidean distance between
/// predicted and target joint positions. Output has shape (N,).
///
/// # Errors
///
/// Returns [`PoseError::ShapeMismatch`] if the two batches differ in shape
/// or carry zero joints.
pub fn mpjpe(pred: &Array3<f32>, target: &Array3<f32>) -> Result<Array1<f32>> {
    if pred.dim() != target.dim() {
        return Err(PoseError::ShapeMismatch(format!(
            "pred shape {:?} does not match target shape {:?}",
            pred.dim(),
            target.dim()
        )));
    }
    let (n, j, d) = pred.dim();
    if j == 0 {
        return Err(PoseError::ShapeMismatch(
            "cannot compute MPJPE over zero joints".to_string(),
        ));
    }

    let mut errors = Array1::zeros(n);
    for i in 0..n {
        let mut sum = 0.0f32;
        for joint in 0..j {
            let mut dist2 = 0.0f32;
            for coord in 0..d {
                let diff = pred[[i, joint, coord]] - target[[i, joint, coord]];
                dist2 += diff * diff;
            }
            sum += dist2.sqrt();
        }
        errors[i] = sum / j as f32;
    }
    Ok(errors)
}

/// Batch-level MPJPE: the mean of [`mpjpe`] over all samples.
///
/// # Errors
///
/// Same conditions as [`mpjpe`], plus an empty batch.
pub fn mean_mpjpe(pred: &Array3<f32>, target: &Array3<f32>) -> Result<f32> {
    let errors = mpjpe(pred, target)?;
    if errors.is_empty() {
        return Err(PoseError::ShapeMismatch(
            "cannot average MPJPE over an empty batch".to_string(),
        ));
    }
    Ok(errors.sum() / errors.len() as f32)
}
