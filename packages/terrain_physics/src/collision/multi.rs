//! Collision tester for entities made of several hitboxes.

use super::{
    resolve,
    BlockCollision,
    MultiCollisionEntity,
    CollisionOutcome,
    CollisionWorkspace,
    TickInput,
    MAX_HITBOXES,
};
use crate::{
    settings::PhysicsSettings,
    world_geometry::BlockGrid,
};


/// Resolves the motion of a multi-hitbox entity against terrain.
///
/// Resolution works like `CollisionTester`, with the swept region covering
/// every hitbox and every axis pass testing each cached block box against
/// each hitbox in turn. A collision of any hitbox counts as a collision of the
/// whole entity.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MultiCollisionTester {
    pub step_height: f64,
    pub y_extra: f64,
}

impl Default for MultiCollisionTester {
    fn default() -> Self {
        MultiCollisionTester {
            step_height: 1.0,
            y_extra: 1.0,
        }
    }
}

impl MultiCollisionTester {
    pub fn new(step_height: f64, y_extra: f64) -> Self {
        MultiCollisionTester {
            step_height,
            y_extra,
        }
    }

    pub fn from_settings(settings: &PhysicsSettings) -> Self {
        MultiCollisionTester::new(settings.step_height, settings.y_extra)
    }

    /// Resolve one tick of the entity's motion, scaled by `dt_fac`.
    ///
    /// Panics if the entity has more than `MAX_HITBOXES` hitboxes.
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
        E: MultiCollisionEntity,
        H: FnMut(&E, BlockCollision<'_, G::Block>),
    {
        load_hitboxes(ws, &*entity);
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
        E: MultiCollisionEntity,
    {
        load_hitboxes(ws, entity);
        let input = TickInput::of(entity, dt_fac);
        resolve(ws, grid, self.step_height, self.y_extra, input, |_| ())
    }
}

fn load_hitboxes<B: Clone, E: MultiCollisionEntity>(ws: &mut CollisionWorkspace<B>, entity: &E) {
    let hitboxes = entity.hitboxes();
    assert!(
        hitboxes.len() <= MAX_HITBOXES,
        "entity has {} hitboxes, at most {} supported",
        hitboxes.len(),
        MAX_HITBOXES,
    );
    ws.load_hitboxes(hitboxes);
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        body::MultiBody,
        collision::{
            CollisionFlags,
            PhysicsEntity,
        },
        sparse_world::{
            SparseWorld,
            STONE,
            FENCE,
        },
    };
    use block_geom::{
        AaBox,
        BlockPos,
        Facing,
    };
    use vek::*;

    fn floor_world() -> SparseWorld {
        let mut world = SparseWorld::new();
        world.fill(BlockPos::new(-5, 0, -5), BlockPos::new(5, 0, 5), STONE);
        world
    }

    #[test]
    fn callbacks_follow_block_then_hitbox_order() {
        let world = floor_world();
        let mut ws = CollisionWorkspace::new();
        let mut body = MultiBody::new(Vec3::new(0.0, 1.25, 0.0), vec![
            AaBox::new([0.25, 0.125, 0.25], [0.75, 0.5, 0.75]),
            AaBox::new([1.25, 0.0, 0.25], [1.75, 0.5, 0.75]),
        ]);
        body.motion = Vec3::new(0.0, -0.5, 0.0);

        let mut collisions = Vec::new();
        let outcome = MultiCollisionTester::default()
            .apply_terrain_collision(&mut ws, &world, &mut body, 1.0, |_, c| {
                collisions.push((c.pos, c.facing, c.delta.y));
            });
        assert_eq!(collisions, vec![
            (BlockPos::new(0, 0, 0), Facing::Up, -0.375),
            (BlockPos::new(1, 0, 0), Facing::Up, -0.25),
        ]);
        assert_eq!(outcome.position.y, 1.0);
        assert_eq!(body.collided(), CollisionFlags { vertical: true, horizontal: false });
    }

    #[test]
    fn block_boxes_are_the_outer_loop() {
        // the stone is under both hitboxes, the fence post only under the
        // first, and each contact is nearer than the one before it in
        // block-then-hitbox order
        let mut world = SparseWorld::new();
        world.set(BlockPos::new(0, 0, 0), STONE);
        world.set(BlockPos::new(1, 0, 0), FENCE);
        let mut ws = CollisionWorkspace::new();
        let mut body = MultiBody::new(Vec3::new(0.0, 1.0, 0.0), vec![
            AaBox::new([0.5, 0.75, 0.25], [1.5, 1.25, 0.75]),
            AaBox::new([0.0, 0.5, 0.25], [0.25, 1.0, 0.75]),
        ]);
        body.motion = Vec3::new(0.0, -1.0, 0.0);

        let mut collisions = Vec::new();
        let outcome = MultiCollisionTester::default()
            .apply_terrain_collision(&mut ws, &world, &mut body, 1.0, |_, c| {
                collisions.push((c.pos, c.delta.y));
            });
        // hitbox-outer order would have reached the fence before the second
        // hitbox's stone contact, skipping the latter
        assert_eq!(collisions, vec![
            (BlockPos::new(0, 0, 0), -0.75),
            (BlockPos::new(0, 0, 0), -0.5),
            (BlockPos::new(1, 0, 0), -0.25),
        ]);
        assert_eq!(outcome.position.y, 0.75);
    }

    #[test]
    fn any_hitbox_blocks_the_whole_entity() {
        let mut world = SparseWorld::new();
        world.set(BlockPos::new(1, 2, 0), STONE);
        let mut ws = CollisionWorkspace::new();
        // only the upper hitbox is level with the block
        let mut body = MultiBody::new(Vec3::new(0.5, 1.0, 0.5), vec![
            AaBox::new([-0.25, 0.0, -0.25], [0.25, 0.5, 0.25]),
            AaBox::new([-0.25, 1.0, -0.25], [0.25, 1.5, 0.25]),
        ]);
        body.motion = Vec3::new(1.0, 0.0, 0.0);

        let mut collisions = Vec::new();
        let outcome = MultiCollisionTester::default()
            .apply_terrain_collision(&mut ws, &world, &mut body, 1.0, |_, c| {
                collisions.push((c.pos, c.facing));
            });
        assert_eq!(outcome.motion, Vec3::new(0.25, 0.0, 0.0));
        assert_eq!(outcome.position, Vec3::new(0.75, 1.0, 0.5));
        assert!(body.collided.horizontal);
        assert!(!body.collided.vertical);
        assert_eq!(collisions, vec![(BlockPos::new(1, 2, 0), Facing::West)]);
    }

    #[test]
    fn no_hitboxes_moves_freely() {
        let world = floor_world();
        let mut ws = CollisionWorkspace::new();
        let mut body = MultiBody::new(Vec3::new(0.5, 1.5, 0.5), Vec::new());
        body.motion = Vec3::new(0.0, -4.0, 0.0);
        let outcome = MultiCollisionTester::default()
            .apply_terrain_collision(&mut ws, &world, &mut body, 1.0, |_, _| ());
        assert_eq!(outcome.position, Vec3::new(0.5, -2.5, 0.5));
        assert!(!outcome.flags.any());
    }

    #[test]
    fn predict_does_not_mutate() {
        let world = floor_world();
        let mut ws = CollisionWorkspace::new();
        let mut body = MultiBody::new(Vec3::new(0.0, 1.5, 0.0), vec![
            AaBox::new([0.0, 0.0, 0.0], [0.5, 0.5, 0.5]),
        ]);
        body.motion = Vec3::new(0.0, -1.0, 0.0);
        let before = body.clone();
        let outcome = MultiCollisionTester::default().predict(&mut ws, &world, &body, 1.0);
        assert_eq!(outcome.position.y, 1.0);
        assert!(outcome.flags.vertical);
        assert_eq!(body, before);
    }

    struct Swarm {
        hitboxes: Vec<AaBox>,
        collided: CollisionFlags,
    }

    impl PhysicsEntity for Swarm {
        fn position(&self) -> Vec3<f64> {
            Vec3::zero()
        }

        fn motion(&self) -> Vec3<f64> {
            Vec3::zero()
        }

        fn collided(&self) -> CollisionFlags {
            self.collided
        }

        fn set_collided(&mut self, flags: CollisionFlags) {
            self.collided = flags;
        }
    }

    impl MultiCollisionEntity for Swarm {
        fn hitboxes(&self) -> &[AaBox] {
            &self.hitboxes
        }
    }

    #[test]
    fn max_hitboxes_is_allowed() {
        let world = SparseWorld::new();
        let mut ws = CollisionWorkspace::new();
        let mut swarm = Swarm {
            hitboxes: vec![AaBox::UNIT_BOX; MAX_HITBOXES],
            collided: CollisionFlags::default(),
        };
        MultiCollisionTester::default()
            .apply_terrain_collision(&mut ws, &world, &mut swarm, 1.0, |_, _| ());
    }

    #[test]
    #[should_panic]
    fn too_many_hitboxes_panics() {
        let world = SparseWorld::new();
        let mut ws = CollisionWorkspace::new();
        let mut swarm = Swarm {
            hitboxes: vec![AaBox::UNIT_BOX; MAX_HITBOXES + 1],
            collided: CollisionFlags::default(),
        };
        MultiCollisionTester::default()
            .apply_terrain_collision(&mut ws, &world, &mut swarm, 1.0, |_, _| ());
    }
}
