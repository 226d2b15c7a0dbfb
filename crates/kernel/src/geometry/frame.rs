use nalgebra::{Rotation3, UnitQuaternion, Vector3};
use tracing::warn;

use super::vector::Vec3;
use crate::Tolerance;

/// Orthonormal frame attached to a member, with `normal` along the member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationFrame {
    pub x_dir: Vec3,
    pub y_dir: Vec3,
    pub normal: Vec3,
}

impl OrientationFrame {
    /// Build the frame for a member running along `direction`.
    ///
    /// The profile's x axis is `Z x normal`. When the member runs (nearly)
    /// parallel to Z that cross product vanishes, so the global X axis is
    /// projected onto the profile plane instead.
    ///
    /// Returns `None` when `direction` is shorter than the coincidence tolerance.
    pub fn from_direction(direction: Vec3, tol: &Tolerance) -> Option<Self> {
        let normal = direction.normalized(tol.coincidence)?;

        let x_dir = match Vec3::Z.cross(&normal).normalized(tol.frame_fallback) {
            Some(x) => x,
            None => {
                warn!(?direction, "member parallel to Z, using X reference axis");
                (Vec3::X - normal * Vec3::X.dot(&normal)).normalized(tol.frame_fallback)?
            }
        };
        let y_dir = normal.cross(&x_dir);

        Some(Self { x_dir, y_dir, normal })
    }

    /// Rotation taking the global X/Y/Z axes onto `x_dir`/`y_dir`/`normal`.
    pub fn rotation(&self) -> UnitQuaternion<f64> {
        let basis: [Vector3<f64>; 3] = [self.x_dir.into(), self.y_dir.into(), self.normal.into()];
        UnitQuaternion::from_rotation_matrix(&Rotation3::from_basis_unchecked(&basis))
    }

    /// `[w, x, y, z]` components of [`Self::rotation`].
    pub fn rotation_wxyz(&self) -> [f64; 4] {
        let rotation = self.rotation();
        let quat = rotation.quaternion();
        [quat.w, quat.i, quat.j, quat.k]
    }
}
