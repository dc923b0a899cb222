//! Scene cameras

use crate::foundation::math::Vec3;
use crate::scene::ids::CameraId;

/// Perspective camera as authored in the source asset
///
/// Stored as look-at parameters; no projection matrix is derived here.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub(crate) id: CameraId,
    /// Display name
    pub name: String,
    /// Distance to near clipping plane
    pub near_plane: f32,
    /// Distance to far clipping plane
    pub far_plane: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Camera position in world space
    pub eye: Vec3,
    /// Point the camera is looking at in world space
    pub look_at: Vec3,
    /// Up vector for camera orientation
    pub up: Vec3,
}

impl Camera {
    /// Create a camera at `eye` looking at `look_at` with a Y-up orientation
    pub fn new(name: impl Into<String>, eye: Vec3, look_at: Vec3) -> Self {
        Self {
            id: CameraId::invalid(),
            name: name.into(),
            near_plane: 0.1,
            far_plane: 1000.0,
            aspect: 16.0 / 9.0,
            fov: std::f32::consts::FRAC_PI_4,
            eye,
            look_at,
            up: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

impl_scene_entity!(Camera, CameraId, Camera);
