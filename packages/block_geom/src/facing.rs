//! The six block facings.
//!
//! Each facing is a plain enum value backed by one entry of a static table,
//! so `Facing::data` hands out the same `&'static FacingData` for a given
//! facing every time it's called, no matter how the facing was obtained.

use crate::axis::{
    axis_enum,
    Axis,
    Pole,
};
use std::{
    fmt,
    ops::Neg,
};
use serde::{
    Serialize,
    Serializer,
    Deserialize,
    Deserializer,
    de,
};
use vek::*;


axis_enum!(
    /// One of the six canonical axis directions.
    ///
    /// North is -Z, east is +X, south is +Z, west is -X, up is +Y, down is -Y.
    Facing,
    NUM_FACINGS = 6,
    PerFacing,
    FACINGS,
    (
        North,
        East,
        South,
        West,
        Up,
        Down,
    ),
);

/// The four horizontal facings, in index order.
pub const HORIZONTALS: [Facing; 4] = [
    Facing::North,
    Facing::East,
    Facing::South,
    Facing::West,
];

/// The four horizontal facings in order of increasing angle around +Y,
/// starting from east.
pub const HORIZONTALS_ANGLE_ORDER: [Facing; 4] = [
    Facing::East,
    Facing::North,
    Facing::West,
    Facing::South,
];

/// The two vertical facings.
pub const VERTICALS: [Facing; 2] = [
    Facing::Up,
    Facing::Down,
];

/// Bit offset of the x normal nibble in `Facing::normal_packed_flags`.
pub const NORMAL_FLAGS_X_SHIFT: u32 = 15;
/// Bit offset of the y normal nibble in `Facing::normal_packed_flags`.
pub const NORMAL_FLAGS_Y_SHIFT: u32 = 19;
/// Bit offset of the z normal nibble in `Facing::normal_packed_flags`.
pub const NORMAL_FLAGS_Z_SHIFT: u32 = 23;
/// Mask covering all normal nibbles in `Facing::normal_packed_flags`.
pub const NORMAL_FLAGS_MASK: i32 = 0xfff << NORMAL_FLAGS_X_SHIFT;


/// Static per-facing record.
#[derive(Debug, PartialEq)]
pub struct FacingData {
    pub code: &'static str,
    pub flag: u8,
    pub opposite: Facing,
    /// Index into `HORIZONTALS_ANGLE_ORDER`, for horizontal facings only.
    pub horizontal_angle_index: Option<u8>,
    pub normal: Vec3<i32>,
    /// Center of this face of the unit cube.
    pub plane_center: Vec3<f64>,
    pub axis: Axis,
    pub pole: Pole,
}

static FACING_DATA: [FacingData; NUM_FACINGS] = [
    FacingData {
        code: "north",
        flag: 1,
        opposite: Facing::South,
        horizontal_angle_index: Some(1),
        normal: Vec3 { x: 0, y: 0, z: -1 },
        plane_center: Vec3 { x: 0.5, y: 0.5, z: 0.0 },
        axis: Axis::Z,
        pole: Pole::Neg,
    },
    FacingData {
        code: "east",
        flag: 2,
        opposite: Facing::West,
        horizontal_angle_index: Some(0),
        normal: Vec3 { x: 1, y: 0, z: 0 },
        plane_center: Vec3 { x: 1.0, y: 0.5, z: 0.5 },
        axis: Axis::X,
        pole: Pole::Pos,
    },
    FacingData {
        code: "south",
        flag: 4,
        opposite: Facing::North,
        horizontal_angle_index: Some(3),
        normal: Vec3 { x: 0, y: 0, z: 1 },
        plane_center: Vec3 { x: 0.5, y: 0.5, z: 1.0 },
        axis: Axis::Z,
        pole: Pole::Pos,
    },
    FacingData {
        code: "west",
        flag: 8,
        opposite: Facing::East,
        horizontal_angle_index: Some(2),
        normal: Vec3 { x: -1, y: 0, z: 0 },
        plane_center: Vec3 { x: 0.0, y: 0.5, z: 0.5 },
        axis: Axis::X,
        pole: Pole::Neg,
    },
    FacingData {
        code: "up",
        flag: 16,
        opposite: Facing::Down,
        horizontal_angle_index: None,
        normal: Vec3 { x: 0, y: 1, z: 0 },
        plane_center: Vec3 { x: 0.5, y: 1.0, z: 0.5 },
        axis: Axis::Y,
        pole: Pole::Pos,
    },
    FacingData {
        code: "down",
        flag: 32,
        opposite: Facing::Up,
        horizontal_angle_index: None,
        normal: Vec3 { x: 0, y: -1, z: 0 },
        plane_center: Vec3 { x: 0.5, y: 0.0, z: 0.5 },
        axis: Axis::Y,
        pole: Pole::Neg,
    },
];

impl Facing {
    /// The static record backing this facing.
    pub fn data(self) -> &'static FacingData {
        &FACING_DATA[self as usize]
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        FACINGS.0.get(index).copied()
    }

    pub fn code(self) -> &'static str {
        self.data().code
    }

    pub fn flag(self) -> u8 {
        self.data().flag
    }

    pub fn opposite(self) -> Self {
        self.data().opposite
    }

    pub const fn is_horizontal(self) -> bool {
        (self as u8) < 4
    }

    pub const fn is_vertical(self) -> bool {
        !self.is_horizontal()
    }

    pub fn axis(self) -> Axis {
        self.data().axis
    }

    pub fn to_axis_pole(self) -> (Axis, Pole) {
        let data = self.data();
        (data.axis, data.pole)
    }

    pub const fn from_axis_pole(axis: Axis, pole: Pole) -> Self {
        match (axis, pole) {
            (Axis::X, Pole::Pos) => Facing::East,
            (Axis::X, Pole::Neg) => Facing::West,
            (Axis::Y, Pole::Pos) => Facing::Up,
            (Axis::Y, Pole::Neg) => Facing::Down,
            (Axis::Z, Pole::Pos) => Facing::South,
            (Axis::Z, Pole::Neg) => Facing::North,
        }
    }

    /// Whether `other` is perpendicular to self.
    pub fn is_adjacent(self, other: Facing) -> bool {
        self.axis() != other.axis()
    }

    pub fn horizontal_angle_index(self) -> Option<u8> {
        self.data().horizontal_angle_index
    }

    pub fn normal_i(self) -> Vec3<i32> {
        self.data().normal
    }

    pub fn normal_f(self) -> Vec3<f32> {
        self.data().normal.map(|n| n as f32)
    }

    pub fn normal_d(self) -> Vec3<f64> {
        self.data().normal.map(|n| n as f64)
    }

    pub fn plane_center(self) -> Vec3<f64> {
        self.data().plane_center
    }

    /// Rotate a quarter turn clockwise, as seen from above. Vertical facings
    /// are returned unchanged.
    pub fn rotate_cw(self) -> Self {
        self.rotate_horizontal_by(-90)
    }

    /// Rotate a quarter turn counterclockwise, as seen from above. Vertical
    /// facings are returned unchanged.
    pub fn rotate_ccw(self) -> Self {
        self.rotate_horizontal_by(90)
    }

    /// Rotate around +Y by `angle_deg`, which should be a multiple of 90.
    /// Positive angles are counterclockwise as seen from above. Vertical
    /// facings are returned unchanged.
    pub fn rotate_horizontal_by(self, angle_deg: i32) -> Self {
        match self.horizontal_angle_index() {
            Some(i) => {
                let i = (angle_deg / 90 + i as i32).rem_euclid(4);
                HORIZONTALS_ANGLE_ORDER[i as usize]
            }
            None => self,
        }
    }

    /// Horizontal facing nearest to a yaw angle in radians, where 0 is east
    /// and angles grow counterclockwise as seen from above.
    pub fn horizontal_from_angle(radians: f64) -> Self {
        let quarters = (radians.to_degrees() / 90.0).round_ties_even();
        HORIZONTALS_ANGLE_ORDER[(quarters as i64).rem_euclid(4) as usize]
    }

    /// Facing whose normal has the smallest angle to `v`. Ties go to the
    /// facing which comes first in `FACINGS`. `None` if `v` isn't finite.
    pub fn from_normal(v: Vec3<f64>) -> Option<Self> {
        if !(v.x.is_finite() && v.y.is_finite() && v.z.is_finite()) {
            return None;
        }

        // the angle is monotonically decreasing in the dot product, and
        // scaling v doesn't change the ordering
        let mut best = Facing::North;
        let mut best_dot = v.dot(best.normal_d());
        for facing in FACINGS.into_iter().skip(1) {
            let dot = v.dot(facing.normal_d());
            if dot > best_dot {
                best = facing;
                best_dot = dot;
            }
        }
        Some(best)
    }

    /// Single precision version of `from_normal`.
    pub fn nearest(v: Vec3<f32>) -> Option<Self> {
        Self::from_normal(v.map(|n| n as f64))
    }

    /// Facing with exactly the given normal.
    pub fn from_normal_i(v: Vec3<i32>) -> Option<Self> {
        FACINGS.into_iter().find(|facing| facing.normal_i() == v)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        FACINGS.into_iter().find(|facing| facing.code() == code)
    }

    pub fn from_first_letter(c: char) -> Option<Self> {
        let c = c.to_ascii_lowercase();
        FACINGS.into_iter().find(|facing| facing.code().starts_with(c))
    }

    /// Facing with exactly the given flag bit.
    pub fn from_flag(flag: u8) -> Option<Self> {
        FACINGS.into_iter().find(|facing| facing.flag() == flag)
    }

    /// Facings whose flag bit is set in `flags`, in index order.
    pub fn from_flags(flags: u8) -> impl Iterator<Item=Facing> {
        FACINGS.into_iter().filter(move |facing| flags & facing.flag() != 0)
    }

    /// Rotate the normal around X, then Y, then Z (radians), and take the
    /// nearest facing.
    pub fn face_when_rotated_by(self, rx: f64, ry: f64, rz: f64) -> Self {
        let rotation =
            Mat3::rotation_z(rz)
            * Mat3::rotation_y(ry)
            * Mat3::rotation_x(rx);
        Self::from_normal(rotation * self.normal_d()).unwrap_or(self)
    }

    /// Normal packed into a byte as `(x+1)<<4 | (y+1)<<2 | (z+1)`.
    pub fn normal_byte(self) -> u8 {
        let n = self.normal_i().map(|n| (n + 1) as u8);
        (n.x << 4) | (n.y << 2) | n.z
    }

    /// Normal packed as three 10 bit two's complement components scaled by
    /// 511, x in the lowest bits.
    pub fn normal_packed(self) -> i32 {
        let n = self.normal_i().map(|n| (n * 511) & 0x3ff);
        n.x | (n.y << 10) | (n.z << 20)
    }

    /// Normal packed into vertex flag bits: one nibble per component at
    /// `NORMAL_FLAGS_{X,Y,Z}_SHIFT`, each nibble being a 3 bit magnitude
    /// scaled by 7, shifted left once, or'd with 1 if negative.
    pub fn normal_packed_flags(self) -> i32 {
        fn nibble(n: i32) -> i32 {
            ((n.abs() * 7) << 1) | (n < 0) as i32
        }

        let n = self.normal_i();
        (nibble(n.x) << NORMAL_FLAGS_X_SHIFT)
            | (nibble(n.y) << NORMAL_FLAGS_Y_SHIFT)
            | (nibble(n.z) << NORMAL_FLAGS_Z_SHIFT)
    }
}

impl Neg for Facing {
    type Output = Self;

    fn neg(self) -> Self {
        self.opposite()
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Facing {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.code())
    }
}

impl<'d> Deserialize<'d> for Facing {
    fn deserialize<D: Deserializer<'d>>(d: D) -> Result<Self, D::Error> {
        let code = String::deserialize(d)?;
        Facing::from_code(&code)
            .ok_or_else(|| de::Error::unknown_variant(
                &code,
                &["north", "east", "south", "west", "up", "down"],
            ))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, FRAC_PI_2};

    #[test]
    fn opposite_is_involution() {
        for facing in FACINGS {
            assert_eq!(facing.opposite().opposite(), facing);
            assert_ne!(facing.opposite(), facing);
            assert_eq!(facing.opposite().normal_i(), -facing.normal_i());
        }
    }

    #[test]
    fn horizontal_vertical_split() {
        let horizontal = FACINGS.into_iter().filter(|f| f.is_horizontal()).count();
        let vertical = FACINGS.into_iter().filter(|f| f.is_vertical()).count();
        assert_eq!(horizontal, 4);
        assert_eq!(vertical, 2);
        for (i, facing) in HORIZONTALS.into_iter().enumerate() {
            assert_eq!(facing.index(), i);
        }
    }

    #[test]
    fn lookups_share_static_data() {
        let a = Facing::from_code("west").unwrap();
        let b = Facing::from_normal(Vec3::new(-3.0, 0.5, 0.0)).unwrap();
        let c = Facing::East.opposite();
        assert!(std::ptr::eq(a.data(), b.data()));
        assert!(std::ptr::eq(b.data(), c.data()));
    }

    #[test]
    fn rotation_cycle() {
        assert_eq!(Facing::North.rotate_cw(), Facing::East);
        assert_eq!(Facing::East.rotate_cw(), Facing::South);
        assert_eq!(Facing::South.rotate_cw(), Facing::West);
        assert_eq!(Facing::West.rotate_cw(), Facing::North);
        for facing in HORIZONTALS {
            assert_eq!(facing.rotate_cw().rotate_ccw(), facing);
        }
        assert_eq!(Facing::Up.rotate_cw(), Facing::Up);
        assert_eq!(Facing::Down.rotate_ccw(), Facing::Down);
    }

    #[test]
    fn rotate_horizontal_by_wraps() {
        assert_eq!(Facing::East.rotate_horizontal_by(90), Facing::North);
        assert_eq!(Facing::East.rotate_horizontal_by(180), Facing::West);
        assert_eq!(Facing::East.rotate_horizontal_by(-90), Facing::South);
        assert_eq!(Facing::North.rotate_horizontal_by(450), Facing::West);
        assert_eq!(Facing::South.rotate_horizontal_by(360), Facing::South);
        assert_eq!(Facing::Up.rotate_horizontal_by(90), Facing::Up);
    }

    #[test]
    fn nearest_facing() {
        assert_eq!(Facing::from_normal(Vec3::new(0.1, 0.9, -0.2)), Some(Facing::Up));
        assert_eq!(Facing::from_normal(Vec3::new(0.0, 0.0, 5.0)), Some(Facing::South));
        // exact diagonal between north and east: first in enumeration wins
        assert_eq!(Facing::from_normal(Vec3::new(1.0, 0.0, -1.0)), Some(Facing::North));
        // south and west tie, south comes first
        assert_eq!(Facing::from_normal(Vec3::new(-1.0, 0.0, 1.0)), Some(Facing::South));
        assert_eq!(Facing::from_normal(Vec3::zero()), Some(Facing::North));
        assert_eq!(Facing::from_normal(Vec3::new(f64::NAN, 0.0, 0.0)), None);
        assert_eq!(Facing::nearest(Vec3::new(0.0, -2.0, 0.0)), Some(Facing::Down));
    }

    #[test]
    fn code_flag_lookups() {
        for facing in FACINGS {
            assert_eq!(Facing::from_code(facing.code()), Some(facing));
            assert_eq!(Facing::from_flag(facing.flag()), Some(facing));
            assert_eq!(Facing::from_normal_i(facing.normal_i()), Some(facing));
            let first = facing.code().chars().next().unwrap();
            assert_eq!(Facing::from_first_letter(first), Some(facing));
        }
        assert_eq!(Facing::from_code("sideways"), None);
        let set: Vec<Facing> = Facing::from_flags(1 | 4 | 32).collect();
        assert_eq!(set, vec![Facing::North, Facing::South, Facing::Down]);
    }

    #[test]
    fn horizontal_from_angle_rounds_to_quarters() {
        assert_eq!(Facing::horizontal_from_angle(0.0), Facing::East);
        assert_eq!(Facing::horizontal_from_angle(FRAC_PI_2), Facing::North);
        assert_eq!(Facing::horizontal_from_angle(PI + 0.3), Facing::West);
        assert_eq!(Facing::horizontal_from_angle(-FRAC_PI_2), Facing::South);
    }

    #[test]
    fn rotated_faces() {
        assert_eq!(Facing::North.face_when_rotated_by(0.0, 0.0, 0.0), Facing::North);
        assert_eq!(Facing::North.face_when_rotated_by(0.0, PI, 0.0), Facing::South);
        assert_eq!(Facing::Up.face_when_rotated_by(0.0, FRAC_PI_2, 0.0), Facing::Up);
        assert_eq!(Facing::Up.face_when_rotated_by(PI, 0.0, 0.0), Facing::Down);
        assert!(Facing::Up.face_when_rotated_by(FRAC_PI_2, 0.0, 0.0).is_horizontal());
    }

    #[test]
    fn packed_normals() {
        assert_eq!(Facing::Up.normal_byte(), 0b01_10_01);
        assert_eq!(Facing::North.normal_byte(), 0b01_01_00);
        assert_eq!(Facing::East.normal_packed(), 511);
        assert_eq!(Facing::West.normal_packed(), 513);
        assert_eq!(Facing::Up.normal_packed(), 511 << 10);
        assert_eq!(Facing::North.normal_packed(), 513 << 20);
        assert_eq!(Facing::East.normal_packed_flags(), 0b1110 << NORMAL_FLAGS_X_SHIFT);
        assert_eq!(Facing::Down.normal_packed_flags(), 0b1111 << NORMAL_FLAGS_Y_SHIFT);
        for facing in FACINGS {
            assert_eq!(facing.normal_packed_flags() & !NORMAL_FLAGS_MASK, 0);
        }
    }

    #[test]
    fn axis_pole_round_trip() {
        for facing in FACINGS {
            let (axis, pole) = facing.to_axis_pole();
            assert_eq!(Facing::from_axis_pole(axis, pole), facing);
            assert_eq!(facing.normal_i()[axis as usize], pole.to_int());
        }
        assert!(Facing::North.is_adjacent(Facing::Up));
        assert!(!Facing::North.is_adjacent(Facing::South));
    }
}
