//! Plain entity bodies implementing the collision entity traits.

use crate::collision::{
    PhysicsEntity,
    CollisionEntity,
    MultiCollisionEntity,
    CollisionFlags,
    CollisionOutcome,
    MAX_HITBOXES,
};
use block_geom::AaBox;
use serde::{Serialize, Deserialize};
use vek::*;


/// Entity with one hitbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec3<f64>,
    pub motion: Vec3<f64>,
    pub hitbox: AaBox,
    #[serde(default)]
    pub collided: CollisionFlags,
    #[serde(default)]
    pub ladder_fix_delta: f64,
    #[serde(default)]
    pub dim: i32,
}

impl Body {
    pub fn new(pos: Vec3<f64>, hitbox: AaBox) -> Self {
        Body {
            pos,
            motion: Vec3::zero(),
            hitbox,
            collided: CollisionFlags::default(),
            ladder_fix_delta: 0.0,
            dim: 0,
        }
    }

    /// Hitbox in world space.
    pub fn world_hitbox(&self) -> AaBox {
        self.hitbox.translate(self.pos)
    }

    /// Move to the outcome of a tick, keeping only the motion that was
    /// actually travelled.
    pub fn apply(&mut self, outcome: &CollisionOutcome) {
        self.pos = outcome.position;
        self.motion = outcome.motion;
    }
}

impl PhysicsEntity for Body {
    fn position(&self) -> Vec3<f64> {
        self.pos
    }

    fn motion(&self) -> Vec3<f64> {
        self.motion
    }

    fn collided(&self) -> CollisionFlags {
        self.collided
    }

    fn set_collided(&mut self, flags: CollisionFlags) {
        self.collided = flags;
    }

    fn ladder_fix_delta(&self) -> f64 {
        self.ladder_fix_delta
    }

    fn dim(&self) -> i32 {
        self.dim
    }
}

impl CollisionEntity for Body {
    fn hitbox(&self) -> AaBox {
        self.hitbox
    }
}


/// Entity made of several hitboxes, such as a boat or a minecart train.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiBody {
    pub pos: Vec3<f64>,
    pub motion: Vec3<f64>,
    hitboxes: Vec<AaBox>,
    #[serde(default)]
    pub collided: CollisionFlags,
    #[serde(default)]
    pub ladder_fix_delta: f64,
    #[serde(default)]
    pub dim: i32,
}

impl MultiBody {
    /// Panics if given more than `MAX_HITBOXES` hitboxes.
    pub fn new(pos: Vec3<f64>, hitboxes: Vec<AaBox>) -> Self {
        assert!(
            hitboxes.len() <= MAX_HITBOXES,
            "{} hitboxes, at most {} supported",
            hitboxes.len(),
            MAX_HITBOXES,
        );
        MultiBody {
            pos,
            motion: Vec3::zero(),
            hitboxes,
            collided: CollisionFlags::default(),
            ladder_fix_delta: 0.0,
            dim: 0,
        }
    }

    pub fn apply(&mut self, outcome: &CollisionOutcome) {
        self.pos = outcome.position;
        self.motion = outcome.motion;
    }
}

impl PhysicsEntity for MultiBody {
    fn position(&self) -> Vec3<f64> {
        self.pos
    }

    fn motion(&self) -> Vec3<f64> {
        self.motion
    }

    fn collided(&self) -> CollisionFlags {
        self.collided
    }

    fn set_collided(&mut self, flags: CollisionFlags) {
        self.collided = flags;
    }

    fn ladder_fix_delta(&self) -> f64 {
        self.ladder_fix_delta
    }

    fn dim(&self) -> i32 {
        self.dim
    }
}

impl MultiCollisionEntity for MultiBody {
    fn hitboxes(&self) -> &[AaBox] {
        &self.hitboxes
    }
}
