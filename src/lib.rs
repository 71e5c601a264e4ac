// h36m-pose 🚀 AGPL-3.0 License

#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Human3.6M Pose Processing Library
//!
//! Deterministic data transforms for 3D human pose estimation research on
//! Human3.6M: pose normalization for model consumption, the inverse path for
//! evaluation in original units, and pinhole camera projection with lens
//! distortion.
//!
//! ## Features
//!
//! - **Root centering** - Pelvis-relative coordinates with exact, invertible
//!   root removal (17 → 16 joints)
//! - **Standardization** - Per-joint-coordinate z-scoring against
//!   training-split statistics, with a bit-exact algebraic inverse
//! - **Camera projection** - Brown-Conrady pinhole model (radial +
//!   tangential distortion) with strict depth validation
//! - **Evaluation** - MPJPE in original physical units after root
//!   re-attachment
//! - **Pure transforms** - Every function allocates its output; nothing is
//!   mutated in place, so batches can be processed from any number of
//!   data-loader workers
//!
//! ## Quick Start
//!
//! ```
//! use ndarray::array;
//! use h36m_pose::{CameraParameters, project_to_pixels};
//!
//! fn main() -> h36m_pose::Result<()> {
//!     // A point on the optical axis projects to the principal point.
//!     let pose3d = array![[[0.0_f32, 0.0, 1.0]]];
//!     let pixels = project_to_pixels(&pose3d, &[CameraParameters::ideal()])?;
//!     assert_eq!(pixels[[0, 0, 0]], 0.0);
//!     assert_eq!(pixels[[0, 0, 1]], 0.0);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! raw annotations (17 joints, pixels / camera-space mm)
//!     │ preprocess: center_root + standardize
//!     ▼
//! model tensors (16 joints, z-scored)
//!     │ model forward pass (out of scope)
//!     ▼
//! reconstructions (16 joints, z-scored)
//!     │ post_process: destandardize + restore_root
//!     ▼
//! poses in original units (17 joints) ──► metrics::mpjpe
//! ```
//!
//! The [`stats::NormStats`] table is computed once, offline, from the
//! training split (`h36m-pose stats` CLI) and loaded read-only at process
//! start; it is passed explicitly into every call that needs it, so the
//! crate holds no hidden global state.
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`processing`] | Normalization pipeline ([`preprocess`], [`post_process`], flips) |
//! | [`projection`] | Pinhole projection with distortion, world→camera transform |
//! | [`stats`] | Normalization statistics table ([`NormStats`]) |
//! | [`annotations`] | Batch records ([`Annotations`], [`SampleMeta`]) |
//! | [`camera`] | Camera parameter records ([`CameraParameters`]) |
//! | [`skeleton`] | Human3.6M joint ordering, bones, flip tables |
//! | [`metrics`] | MPJPE evaluation |
//! | [`error`] | Error types ([`PoseError`], [`Result`]) |
//! | [`cli`] | Offline statistics CLI |

// Modules
pub mod annotations;
pub mod camera;
pub mod cli;
pub mod error;
pub mod metrics;
pub mod processing;
pub mod projection;
pub mod skeleton;
pub mod stats;

// Re-export main types for convenience
pub use annotations::{Annotations, SampleMeta};
pub use camera::CameraParameters;
pub use error::{PoseError, Result};
pub use processing::{center_root, destandardize, post_process, preprocess, restore_root, standardize};
pub use projection::{project_to_pixels, world_to_camera};
pub use stats::NormStats;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        // Version should be semver format like "0.1.0"
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "h36m-pose");
    }
}
