//! Box face utility.

use crate::{
    aa_box::AaBox,
    facing::Facing,
};
use vek::*;


/// One face of an AA box, as the plane-facing rectangle it spans.
///
/// For the face's normal axis, `Axis::other_axes` picks out the two
/// tangential axes, and `half_ext[i]` is half the face's size along
/// `other_axes[i]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AaBoxFace {
    pub facing: Facing,
    /// Center of the face rectangle.
    pub center: Vec3<f64>,
    pub half_ext: [f64; 2],
}

impl AaBoxFace {
    pub fn new(aa_box: AaBox, facing: Facing) -> Self {
        let size = aa_box.size();
        let center = aa_box.min + size * facing.plane_center();
        let half_ext = facing
            .axis()
            .other_axes()
            .map(|axis| size[axis as usize] / 2.0);
        AaBoxFace {
            facing,
            center,
            half_ext,
        }
    }

    /// Where a ray crosses this face's plane, as the ray parameter `t` and
    /// the crossing point, if `t >= 0` and the point lies within the face
    /// rectangle, bounds inclusive.
    ///
    /// The caller decides which side of the face it cares about by checking
    /// the sign of `dir · normal` first; a ray parallel to the face never
    /// hits it.
    pub fn ray_hit(self, origin: Vec3<f64>, dir: Vec3<f64>) -> Option<(f64, Vec3<f64>)> {
        let normal = self.facing.normal_d();
        let denom = dir.dot(normal);
        if denom == 0.0 {
            return None;
        }
        let t = (self.center - origin).dot(normal) / denom;
        if !(t >= 0.0) {
            return None;
        }

        let hit = origin + dir * t;
        let other_axes = self.facing.axis().other_axes();
        for i in 0..2 {
            let axis = other_axes[i] as usize;
            if (hit[axis] - self.center[axis]).abs() > self.half_ext[i] {
                return None;
            }
        }
        Some((t, hit))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_geometry() {
        let b = AaBox::new([1.0, 2.0, 3.0], [1.5, 4.0, 3.25]);
        let face = AaBoxFace::new(b, Facing::Up);
        assert_eq!(face.center, Vec3::new(1.25, 4.0, 3.125));
        assert_eq!(face.half_ext, [0.25, 0.125]);

        let face = AaBoxFace::new(b, Facing::West);
        assert_eq!(face.center, Vec3::new(1.0, 3.0, 3.125));
        assert_eq!(face.half_ext, [1.0, 0.125]);
    }

    #[test]
    fn ray_hits_inclusive_edges() {
        let face = AaBoxFace::new(AaBox::UNIT_BOX, Facing::North);
        let dir = Vec3::new(0.0, 0.0, 1.0);

        let (t, hit) = face.ray_hit(Vec3::new(0.5, 0.5, -2.0), dir).unwrap();
        assert_eq!(t, 2.0);
        assert_eq!(hit, Vec3::new(0.5, 0.5, 0.0));

        // exactly on the edge still counts
        assert!(face.ray_hit(Vec3::new(1.0, 0.0, -2.0), dir).is_some());
        assert!(face.ray_hit(Vec3::new(1.0000001, 0.5, -2.0), dir).is_none());

        // behind the origin
        assert!(face.ray_hit(Vec3::new(0.5, 0.5, 2.0), dir).is_none());
        // parallel
        assert!(face.ray_hit(Vec3::new(0.5, 0.5, -2.0), Vec3::new(1.0, 0.0, 0.0)).is_none());
    }
}
