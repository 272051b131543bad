use crate::Vec3;

/// Right-handed orthonormal basis `(tangent, bitangent, normal)`.
///
/// Built with the branch-free construction of Duff et al. (2017), "Building
/// an Orthonormal Basis, Revisited". The sign of `normal.z` picks one of two
/// formulas, so the basis stays well conditioned for every normal including
/// the poles. For `normal = +Z` the frame is exactly the identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub tangent: Vec3,
    pub bitangent: Vec3,
    pub normal: Vec3,
}

impl Frame {
    /// Build a frame whose local +Z axis is `normal`.
    ///
    /// `normal` does not need to be unit length. A zero or non-finite normal
    /// falls back to the canonical frame.
    pub fn from_normal(normal: Vec3) -> Self {
        let n = normal.normalize_or_zero();
        if n == Vec3::ZERO {
            return Self::default();
        }

        // copysign keeps -0.0 on the negative branch
        let sign = 1.0_f32.copysign(n.z);
        let a = -1.0 / (sign + n.z);
        let b = n.x * n.y * a;

        let tangent = Vec3::new(1.0 + sign * n.x * n.x * a, sign * b, -sign * n.x);
        let bitangent = Vec3::new(b, sign + n.y * n.y * a, -n.y);

        Self {
            tangent,
            bitangent,
            normal: n,
        }
    }

    /// Map a frame-local vector back to world space.
    pub fn to_world(&self, v: Vec3) -> Vec3 {
        v.x * self.tangent + v.y * self.bitangent + v.z * self.normal
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            tangent: Vec3::X,
            bitangent: Vec3::Y,
            normal: Vec3::Z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(frame: &Frame) {
        assert!((frame.tangent.length() - 1.0).abs() < 1e-5);
        assert!((frame.bitangent.length() - 1.0).abs() < 1e-5);
        assert!((frame.normal.length() - 1.0).abs() < 1e-5);
        assert!(frame.tangent.dot(frame.bitangent).abs() < 1e-5);
        assert!(frame.tangent.dot(frame.normal).abs() < 1e-5);
        assert!(frame.bitangent.dot(frame.normal).abs() < 1e-5);
        // Right-handed
        assert!((frame.tangent.cross(frame.bitangent) - frame.normal).length() < 1e-5);
    }

    #[test]
    fn test_identity_frame_for_z() {
        let frame = Frame::from_normal(Vec3::Z);
        assert_eq!(frame, Frame::default());
    }

    #[test]
    fn test_frames_are_orthonormal() {
        let normals = [
            Vec3::X,
            Vec3::Y,
            -Vec3::Y,
            -Vec3::Z,
            Vec3::new(0.0, 0.0, -0.0),
            Vec3::new(1e-7, 0.0, -1.0),
            Vec3::new(0.3, -0.5, 0.8),
            Vec3::new(-2.0, 1.0, 0.5),
        ];
        for n in normals {
            if n.length() == 0.0 {
                continue;
            }
            assert_orthonormal(&Frame::from_normal(n));
        }
    }

    #[test]
    fn test_zero_normal_falls_back() {
        assert_eq!(Frame::from_normal(Vec3::ZERO), Frame::default());
        assert_eq!(Frame::from_normal(Vec3::NAN), Frame::default());
    }

    #[test]
    fn test_to_world_maps_axes() {
        let frame = Frame::from_normal(Vec3::new(0.2, 0.9, -0.4));
        assert!((frame.to_world(Vec3::Z) - frame.normal).length() < 1e-6);
        assert!((frame.to_world(Vec3::X) - frame.tangent).length() < 1e-6);
        assert!((frame.to_world(Vec3::new(0.0, 2.0, 0.0)) - 2.0 * frame.bitangent).length() < 1e-6);
    }
}
