//! Axis-aligned box.

use crate::axis::{
    Axis,
    Pole,
};
use serde::{Serialize, Deserialize};
use vek::*;


/// Round `value` to `digits` decimal digits, ties to even.
pub fn round_to_digits(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round_ties_even() / scale
}


/// Axis-aligned box.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct AaBox {
    /// Minimum corner.
    pub min: Vec3<f64>,
    /// Maximum corner. Assumed to be >= `min` on every axis.
    pub max: Vec3<f64>,
}

impl AaBox {
    /// Box from <0,0,0> to <1,1,1>.
    pub const UNIT_BOX: AaBox = AaBox {
        min: Vec3 { x: 0.0, y: 0.0, z: 0.0 },
        max: Vec3 { x: 1.0, y: 1.0, z: 1.0 },
    };

    pub fn new<A, B>(min: A, max: B) -> Self
    where
        A: Into<Vec3<f64>>,
        B: Into<Vec3<f64>>,
    {
        AaBox {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Box with its bottom face centered on the origin, the usual shape of an
    /// entity hitbox.
    pub fn footprint(width: f64, height: f64) -> Self {
        let half = width / 2.0;
        AaBox {
            min: Vec3::new(-half, 0.0, -half),
            max: Vec3::new(half, height, half),
        }
    }

    pub fn size(self) -> Vec3<f64> {
        self.max - self.min
    }

    pub fn center(self) -> Vec3<f64> {
        (self.min + self.max) * 0.5
    }

    /// Translate self by `v`.
    pub fn translate<V: Into<Vec3<f64>>>(mut self, v: V) -> Self {
        let v = v.into();
        self.min += v;
        self.max += v;
        self
    }

    /// Translate self along a single axis.
    pub fn translate_axis(mut self, axis: Axis, amount: f64) -> Self {
        self.min[axis as usize] += amount;
        self.max[axis as usize] += amount;
        self
    }

    /// Move the minimum corner backwards and the maximum corner forwards on
    /// all axes by `amount`.
    pub fn expand(mut self, amount: f64) -> Self {
        self.min -= Vec3::from(amount);
        self.max += Vec3::from(amount);
        self
    }

    /// Smallest box containing both self and `rhs`.
    pub fn union(self, rhs: AaBox) -> Self {
        AaBox {
            min: self.min.map2(rhs.min, f64::min),
            max: self.max.map2(rhs.max, f64::max),
        }
    }

    /// Round the minimum y coordinate to `digits` decimal digits, leaving the
    /// maximum y coordinate alone.
    pub fn with_rounded_min_y(mut self, digits: i32) -> Self {
        self.min.y = round_to_digits(self.min.y, digits);
        self
    }

    /// Does self strictly contain the point `pos`?
    pub fn contains<V: Into<Vec3<f64>>>(self, pos: V) -> bool {
        let pos = pos.into();
        pos.x > self.min.x
            && pos.y > self.min.y
            && pos.z > self.min.z
            && pos.x < self.max.x
            && pos.y < self.max.y
            && pos.z < self.max.z
    }

    /// Does self overlap `rhs` with positive volume?
    pub fn intersects(self, rhs: AaBox) -> bool {
        for i in 0..3 {
            if self.min[i] >= rhs.max[i] {
                return false;
            }
            if self.max[i] <= rhs.min[i] {
                return false;
            }
        }
        true
    }

    /// Does self overlap or touch `rhs`?
    pub fn intersects_or_touches(self, rhs: AaBox) -> bool {
        for i in 0..3 {
            if self.min[i] > rhs.max[i] {
                return false;
            }
            if self.max[i] < rhs.min[i] {
                return false;
            }
        }
        true
    }

    /// Treating self as an immovable barrier, reduce `motion` of the moving
    /// box `mover` along `axis` so that it stops flush against self instead
    /// of passing into it.
    ///
    /// Only applies if the two boxes overlap strictly on both other axes, and
    /// `mover` starts entirely on one side of self along `axis`. Returns the
    /// possibly reduced motion and, if it was reduced, the direction `mover`
    /// was moving in.
    pub fn push_out(
        self,
        mover: AaBox,
        axis: Axis,
        motion: f64,
    ) -> (f64, Option<Pole>) {
        for other in axis.other_axes() {
            let i = other as usize;
            if !(mover.max[i] > self.min[i] && self.max[i] > mover.min[i]) {
                return (motion, None);
            }
        }

        let i = axis as usize;
        if motion > 0.0 && mover.max[i] <= self.min[i] {
            let gap = self.min[i] - mover.max[i];
            if gap < motion {
                return (gap, Some(Pole::Pos));
            }
        } else if motion < 0.0 && mover.min[i] >= self.max[i] {
            let gap = self.max[i] - mover.min[i];
            if gap > motion {
                return (gap, Some(Pole::Neg));
            }
        }
        (motion, None)
    }
}
