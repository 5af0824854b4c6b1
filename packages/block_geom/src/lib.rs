//! Geometry of a grid of unit blocks.
//!
//! ```
//! use block_geom::{
//!     AaBox,
//!     AaBoxFace,
//!     BlockPos,
//!     Facing,
//! };
//! use vek::*;
//!
//! let pos = BlockPos::new(4, 64, -2);
//! let above = pos.offset(Facing::Up);
//! assert_eq!(above, BlockPos::new(4, 65, -2));
//!
//! // the top face of the block, in world space
//! let top = AaBoxFace::new(AaBox::UNIT_BOX.translate(pos.origin()), Facing::Up);
//! assert_eq!(top.center, Vec3::new(4.5, 65.0, -1.5));
//!
//! assert_eq!(Facing::North.rotate_cw(), Facing::East);
//! assert_eq!(Facing::from_normal(Vec3::new(0.2, -0.9, 0.1)), Some(Facing::Down));
//! ```
//!
//! ## coordinates
//!
//! A block position `<x,y,z>` names the unit cube from `<x,y,z>` to
//! `<x+1,y+1,z+1>`. +Y is up. Facings name the sides of that cube: north is
//! -Z, east is +X, south is +Z, west is -X. Every block position also carries
//! a dimension, and positions in different dimensions never compare equal.

pub mod axis;
pub mod facing;
pub mod block_pos;
pub mod aa_box;
pub mod aa_box_face;


pub use crate::{
    axis::{
        Axis,
        Pole,
        PerAxis,
        AXES,
        NUM_AXES,
    },
    facing::{
        Facing,
        FacingData,
        PerFacing,
        FACINGS,
        NUM_FACINGS,
        HORIZONTALS,
        HORIZONTALS_ANGLE_ORDER,
        VERTICALS,
    },
    block_pos::{
        BlockPos,
        bpos,
    },
    aa_box::{
        AaBox,
        round_to_digits,
    },
    aa_box_face::AaBoxFace,
};
