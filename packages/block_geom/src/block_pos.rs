//! Dimension-aware block positions.

use crate::facing::{
    Facing,
    FACINGS,
};
use std::{
    convert::TryInto,
    fmt,
};
use serde::{Serialize, Deserialize};
use vek::*;


/// Block position in dimension 0.
///
/// Panics if a component doesn't fit in an `i32`.
pub fn bpos<X, Y, Z>(x: X, y: Y, z: Z) -> BlockPos
where
    X: TryInto<i32>,
    Y: TryInto<i32>,
    Z: TryInto<i32>,
{
    BlockPos::new(
        x.try_into().ok().expect("block x out of range"),
        y.try_into().ok().expect("block y out of range"),
        z.try_into().ok().expect("block z out of range"),
    )
}


/// Position of a block: the unit cube from `<x,y,z>` to `<x+1,y+1,z+1>` in
/// dimension `dim`.
///
/// Positions in different dimensions are never equal, and the distance
/// between them is infinite.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    #[serde(default)]
    pub dim: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        BlockPos { x, y, z, dim: 0 }
    }

    pub const fn with_dim(x: i32, y: i32, z: i32, dim: i32) -> Self {
        BlockPos { x, y, z, dim }
    }

    /// Same coordinates, moved into `dim`.
    pub const fn in_dim(mut self, dim: i32) -> Self {
        self.dim = dim;
        self
    }

    /// Position of the block containing `point`.
    pub fn containing(point: Vec3<f64>, dim: i32) -> Self {
        let v = point.map(|n| n.floor() as i32);
        BlockPos::with_dim(v.x, v.y, v.z, dim)
    }

    pub fn from_vec(v: Vec3<i32>, dim: i32) -> Self {
        BlockPos::with_dim(v.x, v.y, v.z, dim)
    }

    pub fn to_vec(self) -> Vec3<i32> {
        Vec3 { x: self.x, y: self.y, z: self.z }
    }

    /// Minimum corner of the block in world space.
    pub fn origin(self) -> Vec3<f64> {
        self.to_vec().map(|n| n as f64)
    }

    /// Same dimension, translated by `v`.
    pub fn offset_by(self, v: Vec3<i32>) -> Self {
        BlockPos::from_vec(self.to_vec() + v, self.dim)
    }

    /// The neighbouring block on the given side.
    pub fn offset(self, facing: Facing) -> Self {
        self.offset_by(facing.normal_i())
    }

    /// All six neighbours, in `FACINGS` order.
    pub fn neighbors(self) -> [BlockPos; 6] {
        FACINGS.0.map(|facing| self.offset(facing))
    }

    pub fn same_dim(self, other: BlockPos) -> bool {
        self.dim == other.dim
    }

    /// Squared euclidean distance, or `None` across dimensions.
    pub fn distance_sq_to(self, other: BlockPos) -> Option<i64> {
        if !self.same_dim(other) {
            return None;
        }
        let d = (other.to_vec() - self.to_vec()).map(|n| n as i64);
        Some(d.x * d.x + d.y * d.y + d.z * d.z)
    }

    /// Euclidean distance, infinite across dimensions.
    pub fn distance_to(self, other: BlockPos) -> f64 {
        self.distance_sq_to(other)
            .map(|d| (d as f64).sqrt())
            .unwrap_or(f64::INFINITY)
    }

    /// Component-wise minimum, in self's dimension.
    pub fn component_min(self, other: BlockPos) -> Self {
        BlockPos::from_vec(self.to_vec().map2(other.to_vec(), i32::min), self.dim)
    }

    /// Component-wise maximum, in self's dimension.
    pub fn component_max(self, other: BlockPos) -> Self {
        BlockPos::from_vec(self.to_vec().map2(other.to_vec(), i32::max), self.dim)
    }
}


macro_rules! impl_fmt_block_pos {
    ($t:ident, $fstr:literal)=>{
        impl fmt::$t for BlockPos {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(
                    f, $fstr,
                    self.x, self.y, self.z, self.dim,
                )
            }
        }
    };
}
impl_fmt_block_pos!(Debug, "<{},{},{}>@{}");
impl_fmt_block_pos!(Display, "<{},{},{}>@{}");


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_and_neighbors() {
        let p = BlockPos::with_dim(3, -2, 7, 1);
        assert_eq!(p.offset(Facing::North), BlockPos::with_dim(3, -2, 6, 1));
        assert_eq!(p.offset(Facing::Up).offset(Facing::Down), p);
        for (neighbor, facing) in p.neighbors().into_iter().zip(FACINGS) {
            assert_eq!(neighbor, p.offset(facing));
            assert_eq!(neighbor.distance_sq_to(p), Some(1));
        }
    }

    #[test]
    fn cross_dimension_distance_is_infinite() {
        let a = BlockPos::new(0, 0, 0);
        let b = BlockPos::new(3, 4, 0);
        assert_eq!(a.distance_to(b), 5.0);
        assert_ne!(a, b.in_dim(2));
        assert_eq!(a.distance_sq_to(b.in_dim(2)), None);
        assert_eq!(a.distance_to(a.in_dim(2)), f64::INFINITY);
    }

    #[test]
    fn containing_floors() {
        let p = BlockPos::containing(Vec3::new(-0.5, 1.999, 3.0), 0);
        assert_eq!(p, bpos(-1, 1, 3));
        assert_eq!(p.origin(), Vec3::new(-1.0, 1.0, 3.0));
    }
}
