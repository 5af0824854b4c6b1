//! Terrain physics for a grid of unit blocks.
//!
//! The system is built around axis-aligned boxes and a small number of seams
//! onto the world:
//!
//! - The world is reified by the `BlockGrid` trait for collision geometry and
//!   the `IntersectionSupplier` trait for selection geometry. Both hand out
//!   block-local boxes through visitor callbacks.
//! - The collision testers (`CollisionTester`, `MultiCollisionTester`) move an
//!   entity's hitbox(es) through the grid one tick at a time, resolving one
//!   axis at a time against a memoized list of the nearby block boxes kept in
//!   a caller-owned `CollisionWorkspace`.
//! - `compute_looking_at` walks a ray from block to block until it hits the
//!   selection geometry of some block, runs out of range, or hits a dead end.

#[macro_use]
extern crate tracing;

pub mod world_geometry;
pub mod cached_boxes;
pub mod collision;
pub mod looking_at;
pub mod body;
pub mod sparse_world;
pub mod settings;
pub mod logging;


/// Common re-exports.
pub mod prelude {
    pub use super::{
        world_geometry::{
            BlockGrid,
            IntersectionSupplier,
        },
        cached_boxes::{
            CachedBox,
            CachedBoxList,
        },
        collision::{
            PhysicsEntity,
            CollisionEntity,
            MultiCollisionEntity,
            CollisionFlags,
            CollisionOutcome,
            BlockCollision,
            CollisionWorkspace,
            single::CollisionTester,
            multi::MultiCollisionTester,
        },
        looking_at::{
            Ray,
            BlockSelection,
            compute_looking_at,
            compute_looking_at_filtered,
            select_between,
        },
        body::{
            Body,
            MultiBody,
        },
        settings::PhysicsSettings,
    };
    pub use block_geom::{
        AaBox,
        BlockPos,
        Facing,
    };
}
