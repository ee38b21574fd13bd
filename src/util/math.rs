//! Small vector helpers shared by the instancing and photo modules.

use glam::{Mat3, Quat, Vec3};

/// Linear interpolation that returns `b` exactly at `t == 1.0` and `a`
/// exactly at `t == 0.0`.
#[inline]
#[must_use]
pub fn lerp_exact(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a * (1.0 - t) + b * t
}

/// Rotation whose local +Z axis points along `forward`, keeping local +Y as
/// close to `up` as possible.
///
/// A zero `forward` yields the identity. When `forward` is parallel to `up`
/// an arbitrary perpendicular right axis is chosen.
#[must_use]
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let Some(z) = forward.try_normalize() else {
        return Quat::IDENTITY;
    };
    let x = up
        .cross(z)
        .try_normalize()
        .unwrap_or_else(|| z.any_orthonormal_vector());
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_hits_endpoints_exactly() {
        let a = Vec3::new(0.3, -1.7, 2.9);
        let b = Vec3::new(-4.1, 0.11, 7.3);
        assert_eq!(lerp_exact(a, b, 0.0), a);
        assert_eq!(lerp_exact(a, b, 1.0), b);
    }

    #[test]
    fn look_rotation_aims_forward_axis() {
        let dir = Vec3::new(1.0, 0.5, -2.0);
        let q = look_rotation(dir, Vec3::Y);
        let fwd = q * Vec3::Z;
        assert!((fwd - dir.normalize()).length() < 1e-5);
        // Up stays in the vertical plane containing forward.
        let right = q * Vec3::X;
        assert!(right.y.abs() < 1e-5);
    }

    #[test]
    fn degenerate_inputs_do_not_produce_nan() {
        assert_eq!(look_rotation(Vec3::ZERO, Vec3::Y), Quat::IDENTITY);
        let q = look_rotation(Vec3::Y * 3.0, Vec3::Y);
        assert!(q.is_finite());
        assert!(((q * Vec3::Z) - Vec3::Y).length() < 1e-5);
    }
}
