// h36m-pose 🚀 AGPL-3.0 License

//! Annotation batch records.
//!
//! An [`Annotations`] value is the unit of data flowing through the pipeline:
//! a batch of 2D poses, the matching batch of 3D camera-space poses, the
//! camera parameters each sample was captured with, and identifying metadata.
//! The extraction stage produces these; [`crate::processing::preprocess`]
//! consumes them.

use ndarray::Array3;

use crate::camera::CameraParameters;
use crate::error::{PoseError, Result};

/// Identifying metadata for one annotated frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleMeta {
    /// Subject id (e.g., 1, 5, 6, 7, 8 for the training split).
    pub subject: u32,
    /// Action id (2..=16).
    pub action: u32,
    /// Sub-action id (1 or 2).
    pub subaction: u32,
    /// Camera id (1..=4).
    pub camera: u32,
    /// Frame index within the sequence.
    pub frame: u32,
}

/// A batch of annotation samples with parallel pose, camera, and metadata
/// fields.
///
/// `cameras` has either one entry per sample or a single shared entry when
/// the whole batch comes from one (subject, camera) pair; camera parameters
/// are constant across all frames of a camera and are never recomputed per
/// frame.
#[derive(Debug, Clone)]
pub struct Annotations {
    /// 2D poses in pixel coordinates, shape (N, J, 2).
    pub pose2d: Array3<f32>,
    /// 3D poses in camera coordinates, shape (N, J, 3).
    pub pose3d: Array3<f32>,
    /// Per-sample (len N) or shared (len 1) camera parameters.
    pub cameras: Vec<CameraParameters>,
    /// Per-sample metadata, len N.
    pub meta: Vec<SampleMeta>,
}

impl Annotations {
    /// Build a batch, validating that all parallel fields agree.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::ShapeMismatch`] if the pose batches differ in
    /// length or joint count or have the wrong coordinate dimensions, and
    /// [`PoseError::ConfigInconsistency`] if the camera or metadata lengths
    /// do not line up with the batch.
    pub fn new(
        pose2d: Array3<f32>,
        pose3d: Array3<f32>,
        cameras: Vec<CameraParameters>,
        meta: Vec<SampleMeta>,
    ) -> Result<Self> {
        let (n2, j2, d2) = pose2d.dim();
        let (n3, j3, d3) = pose3d.dim();

        if d2 != 2 || d3 != 3 {
            return Err(PoseError::ShapeMismatch(format!(
                "expected coordinate dims (2, 3), got ({d2}, {d3})"
            )));
        }
        if n2 != n3 {
            return Err(PoseError::ShapeMismatch(format!(
                "pose2d has {n2} samples but pose3d has {n3}"
            )));
        }
        if j2 != j3 {
            return Err(PoseError::ShapeMismatch(format!(
                "pose2d has {j2} joints but pose3d has {j3}"
            )));
        }
        if cameras.len() != n2 && cameras.len() != 1 {
            return Err(PoseError::ConfigInconsistency(format!(
                "got {} camera records for {n2} samples (expected {n2} or 1)",
                cameras.len()
            )));
        }
        if meta.len() != n2 {
            return Err(PoseError::ConfigInconsistency(format!(
                "got {} metadata records for {n2} samples",
                meta.len()
            )));
        }

        Ok(Self { pose2d, pose3d, cameras, meta })
    }

    /// Number of samples in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pose2d.dim().0
    }

    /// Whether the batch is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of joints per pose.
    #[must_use]
    pub fn joints(&self) -> usize {
        self.pose2d.dim().1
    }

    /// Camera parameters for one sample, resolving the shared-camera case.
    #[must_use]
    pub fn camera(&self, sample: usize) -> &CameraParameters {
        if self.cameras.len() == 1 {
            &self.cameras[0]
        } else {
            &self.cameras[sample]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn meta(n: usize) -> Vec<SampleMeta> {
        (0..n)
            .map(|i| SampleMeta {
                subject: 1,
                action: 2,
                subaction: 1,
                camera: 1,
                frame: i as u32,
            })
            .collect()
    }

    #[test]
    fn test_valid_batch() {
        let batch = Annotations::new(
            Array3::zeros((4, 17, 2)),
            Array3::zeros((4, 17, 3)),
            vec![CameraParameters::ideal()],
            meta(4),
        )
        .unwrap();
        assert_eq!(batch.len(), 4);
        assert_eq!(batch.joints(), 17);
        // Shared camera resolves for every sample.
        assert_eq!(batch.camera(3), &CameraParameters::ideal());
    }

    #[test]
    fn test_mismatched_batch_lengths() {
        let result = Annotations::new(
            Array3::zeros((4, 17, 2)),
            Array3::zeros((5, 17, 3)),
            vec![CameraParameters::ideal()],
            meta(4),
        );
        assert!(matches!(result, Err(PoseError::ShapeMismatch(_))));
    }

    #[test]
    fn test_wrong_coordinate_dims() {
        let result = Annotations::new(
            Array3::zeros((4, 17, 3)),
            Array3::zeros((4, 17, 3)),
            vec![CameraParameters::ideal()],
            meta(4),
        );
        assert!(matches!(result, Err(PoseError::ShapeMismatch(_))));
    }

    #[test]
    fn test_bad_camera_count() {
        let result = Annotations::new(
            Array3::zeros((4, 17, 2)),
            Array3::zeros((4, 17, 3)),
            vec![CameraParameters::ideal(); 2],
            meta(4),
        );
        assert!(matches!(result, Err(PoseError::ConfigInconsistency(_))));
    }
}
