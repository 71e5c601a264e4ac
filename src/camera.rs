// h36m-pose 🚀 AGPL-3.0 License

//! Camera parameter records for the Human3.6M capture setup.
//!
//! Each record describes one physical camera for one subject. Intrinsics and
//! distortion are constant across every frame of that (subject, camera) pair
//! and are shared by reference rather than recomputed per frame.

/// Intrinsic and extrinsic parameters of a single calibrated camera.
///
/// Distortion follows the Brown-Conrady lens model: three radial
/// coefficients (k1, k2, k3) and two tangential coefficients (p1, p2).
#[derive(Debug, Clone, PartialEq)]
pub struct CameraParameters {
    /// Focal length (fx, fy) in pixels.
    pub focal: [f32; 2],
    /// Principal point (cx, cy) in pixels.
    pub center: [f32; 2],
    /// Radial distortion coefficients (k1, k2, k3).
    pub radial: [f32; 3],
    /// Tangential distortion coefficients (p1, p2).
    pub tangential: [f32; 2],
    /// World-to-camera rotation matrix, row-major.
    pub rotation: [[f32; 3]; 3],
    /// Camera position in world coordinates.
    pub translation: [f32; 3],
}

impl CameraParameters {
    /// Create a camera record from its calibrated components.
    #[must_use]
    pub const fn new(
        focal: [f32; 2],
        center: [f32; 2],
        radial: [f32; 3],
        tangential: [f32; 2],
        rotation: [[f32; 3]; 3],
        translation: [f32; 3],
    ) -> Self {
        Self { focal, center, radial, tangential, rotation, translation }
    }

    /// An ideal camera: unit focal length, zero center offset, no distortion,
    /// identity extrinsics. Useful for tests and synthetic data.
    #[must_use]
    pub const fn ideal() -> Self {
        Self {
            focal: [1.0, 1.0],
            center: [0.0, 0.0],
            radial: [0.0, 0.0, 0.0],
            tangential: [0.0, 0.0],
            rotation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            translation: [0.0, 0.0, 0.0],
        }
    }

    /// Whether all five distortion coefficients are zero.
    #[must_use]
    pub fn is_distortion_free(&self) -> bool {
        self.radial.iter().chain(self.tangential.iter()).all(|&c| c == 0.0)
    }
}
