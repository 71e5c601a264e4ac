// h36m-pose 🚀 AGPL-3.0 License

//! Pinhole camera projection with lens distortion.
//!
//! Implements the single canonical projection used everywhere in this crate:
//! perspective divide, Brown-Conrady radial + tangential distortion, focal
//! scale, principal-point shift. Distortion is always applied: dataset
//! preparation and re-projection consistency checks share one formula, so
//! there is exactly one projection semantics to validate against.

use ndarray::Array3;

use crate::camera::CameraParameters;
use crate::error::{PoseError, Result};

/// Smallest depth accepted by the perspective divide. Anything closer to the
/// camera plane (or behind it) is a domain error, not a numeric hiccup.
pub const MIN_DEPTH: f32 = 1e-6;

/// Project a batch of 3D camera-space poses to 2D pixel coordinates.
///
/// `cameras` has one entry per sample, or a single shared entry for the
/// whole batch. For each point (X, Y, Z):
///
/// 1. perspective divide: x = X/Z, y = Y/Z;
/// 2. r² = x² + y²;
/// 3. radial scale: 1 + k1·r² + k2·r⁴ + k3·r⁶;
/// 4. tangential term: t = p1·y + p2·x, with the residual (p2·r², p1·r²)
///    added after scaling;
/// 5. pixel = focal · distorted + center.
///
/// # Errors
///
/// Returns [`PoseError::ShapeMismatch`] if the poses are not 3D or the
/// camera count does not line up with the batch, and
/// [`PoseError::InvalidDepth`] for any point with depth below [`MIN_DEPTH`];
/// the error identifies the offending sample and joint so the caller can
/// decide between skipping the sample and aborting.
pub fn project_to_pixels(
    pose3d: &Array3<f32>,
    cameras: &[CameraParameters],
) -> Result<Array3<f32>> {
    let (n, j, d) = pose3d.dim();
    if d != 3 {
        return Err(PoseError::ShapeMismatch(format!(
            "projection expects 3D poses, got {d} coordinates per joint"
        )));
    }
    if cameras.len() != n && cameras.len() != 1 {
        return Err(PoseError::ShapeMismatch(format!(
            "got {} camera records for {n} samples (expected {n} or 1)",
            cameras.len()
        )));
    }

    let mut out = Array3::zeros((n, j, 2));
    for i in 0..n {
        let cam = if cameras.len() == 1 { &cameras[0] } else { &cameras[i] };
        let [k1, k2, k3] = cam.radial;
        let [p1, p2] = cam.tangential;

        for joint in 0..j {
            let depth = pose3d[[i, joint, 2]];
            if depth < MIN_DEPTH {
                return Err(PoseError::InvalidDepth { sample: i, joint, depth });
            }

            let x = pose3d[[i, joint, 0]] / depth;
            let y = pose3d[[i, joint, 1]] / depth;

            let r2 = x * x + y * y;
            let radial = 1.0 + k1 * r2 + k2 * r2 * r2 + k3 * r2 * r2 * r2;
            let tangential = p1 * y + p2 * x;

            let u = x * (radial + tangential) + p2 * r2;
            let v = y * (radial + tangential) + p1 * r2;

            out[[i, joint, 0]] = cam.focal[0] * u + cam.center[0];
            out[[i, joint, 1]] = cam.focal[1] * v + cam.center[1];
        }
    }
    Ok(out)
}

/// Transform a batch of world-coordinate poses into camera coordinates:
/// `X_cam = R · (X_world - T)` per sample.
///
/// # Errors
///
/// Returns [`PoseError::ShapeMismatch`] under the same shape conditions as
/// [`project_to_pixels`].
pub fn world_to_camera(
    pose3d: &Array3<f32>,
    cameras: &[CameraParameters],
) -> Result<Array3<f32>> {
    let (n, j, d) = pose3d.dim();
    if d != 3 {
        return Err(PoseError::ShapeMismatch(format!(
            "world-to-camera expects 3D poses, got {d} coordinates per joint"
        )));
    }
    if cameras.len() != n && cameras.len() != 1 {
        return Err(PoseError::ShapeMismatch(format!(
            "got {} camera records for {n} samples (expected {n} or 1)",
            cameras.len()
        )));
    }

    let mut out = Array3::zeros((n, j, 3));
    for i in 0..n {
        let cam = if cameras.len() == 1 { &cameras[0] } else { &cameras[i] };
        for joint in 0..j {
            let centered = [
                pose3d[[i, joint, 0]] - cam.translation[0],
                pose3d[[i, joint, 1]] - cam.translation[1],
                pose3d[[i, joint, 2]] - cam.translation[2],
            ];
            for row in 0..3 {
                out[[i, joint, row]] = cam.rotation[row][0] * centered[0]
                    + cam.rotation[row][1] * centered[1]
                    + cam.rotation[row][2] * centered[2];
            }
        }
    }
    Ok(out)
}
