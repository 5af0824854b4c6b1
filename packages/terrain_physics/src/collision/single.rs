//! Collision tester for entities with a single hitbox.

use super::{
    resolve,
    BlockCollision,
    CollisionEntity,
    CollisionOutcome,
    CollisionWorkspace,
    TickInput,
    Y_ROUNDING_DIGITS,
};
use crate::{
    cached_boxes::CachedBox,
    settings::PhysicsSettings,
    world_geometry::BlockGrid,
};
use block_geom::{
    AaBox,
    BlockPos,
};
use vek::*;


/// Resolves the motion of a single-hitbox entity against terrain.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CollisionTester {
    /// How far above the bottom of the hitbox blocks are considered, even if
    /// the hitbox is shorter than that.
    pub step_height: f64,
    /// How far below the bottom of the hitbox blocks are considered, to catch
    /// boxes which stick up out of the block below, such as fences.
    pub y_extra: f64,
}

impl Default for CollisionTester {
    fn default() -> Self {
        CollisionTester {
            step_height: 1.0,
            y_extra: 1.0,
        }
    }
}

impl CollisionTester {
    pub fn new(step_height: f64, y_extra: f64) -> Self {
        CollisionTester {
            step_height,
            y_extra,
        }
    }

    pub fn from_settings(settings: &PhysicsSettings) -> Self {
        CollisionTester::new(settings.step_height, settings.y_extra)
    }

    /// Resolve one tick of the entity's motion, scaled by `dt_fac`, against
    /// the grid. Writes the entity's collided flags, and calls `on_collide`
    /// for every block box that restricted the motion. Leaves the entity's
    /// position and motion to the caller.
    pub fn apply_terrain_collision<G, E, H>(
        &self,
        ws: &mut CollisionWorkspace<G::Block>,
        grid: &G,
        entity: &mut E,
        dt_fac: f64,
        mut on_collide: H,
    ) -> CollisionOutcome
    where
        G: BlockGrid,
        E: CollisionEntity,
        H: FnMut(&E, BlockCollision<'_, G::Block>),
    {
        ws.load_hitboxes(&[entity.hitbox()]);
        let input = TickInput::of(&*entity, dt_fac);
        let outcome = {
            let entity = &*entity;
            resolve(
                ws,
                grid,
                self.step_height,
                self.y_extra,
                input,
                |collision| on_collide(entity, collision),
            )
        };
        entity.set_collided(outcome.flags);
        outcome
    }

    /// Same computation as `apply_terrain_collision`, without touching the
    /// entity or calling anything back.
    pub fn predict<G, E>(
        &self,
        ws: &mut CollisionWorkspace<G::Block>,
        grid: &G,
        entity: &E,
        dt_fac: f64,
    ) -> CollisionOutcome
    where
        G: BlockGrid,
        E: CollisionEntity,
    {
        ws.load_hitboxes(&[entity.hitbox()]);
        let input = TickInput::of(entity, dt_fac);
        resolve(ws, grid, self.step_height, self.y_extra, input, |_| ())
    }

    /// Whether `hitbox`, placed at `pos`, overlaps any collision box in the
    /// grid. With `also_check_touch`, merely touching a box counts.
    pub fn is_colliding<G: BlockGrid>(
        &self,
        grid: &G,
        hitbox: AaBox,
        pos: Vec3<f64>,
        dim: i32,
        also_check_touch: bool,
    ) -> bool {
        self.colliding_box(grid, hitbox, pos, dim, also_check_touch).is_some()
    }

    /// The first collision box, in grid walk order, which `hitbox` placed at
    /// `pos` overlaps. Doesn't use or disturb any cached boxes.
    pub fn colliding_box<G: BlockGrid>(
        &self,
        grid: &G,
        hitbox: AaBox,
        pos: Vec3<f64>,
        dim: i32,
        also_check_touch: bool,
    ) -> Option<CachedBox<G::Block>> {
        let hitbox = hitbox
            .translate(pos)
            .with_rounded_min_y(Y_ROUNDING_DIGITS);
        let margin = if also_check_touch { 1.0 } else { 0.0 };
        let min = BlockPos::containing(
            hitbox.min - Vec3::new(margin, self.y_extra + margin, margin),
            dim,
        );
        let max = BlockPos::from_vec(hitbox.max.map(|n| n.ceil() as i32), dim);

        let mut found = None;
        grid.walk_blocks(min, max, |block_pos, block| {
            if found.is_some() {
                return;
            }
            let origin = block_pos.origin();
            grid.collision_boxes(block_pos, &block, |aa_box| {
                if found.is_some() {
                    return;
                }
                let aa_box = aa_box.translate(origin);
                let hit = if also_check_touch {
                    aa_box.intersects_or_touches(hitbox)
                } else {
                    aa_box.intersects(hitbox)
                };
                if hit {
                    found = Some(CachedBox {
                        aa_box,
                        pos: block_pos,
                        block: block.clone(),
                    });
                }
            });
        });
        found
    }
}
