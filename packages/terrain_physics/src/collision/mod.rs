//! Swept terrain collision for axis-aligned hitboxes.
//!
//! Each tick, the hitbox is swept through the grid one axis at a time: first
//! Y, then, only if the horizontal motion would actually run into something,
//! X and then Z. Along each axis the motion is shortened so the hitbox stops
//! flush against every block box it would otherwise pass into. The block
//! boxes come from a `CachedBoxList` which is only rebuilt when the swept
//! region changes.

pub mod single;
pub mod multi;

use crate::{
    cached_boxes::CachedBoxList,
    world_geometry::BlockGrid,
};
use block_geom::{
    AaBox,
    Axis,
    BlockPos,
    Facing,
};
use serde::{Serialize, Deserialize};
use vek::*;


/// Number of decimal digits the bottom of a hitbox is rounded to before
/// resolving, so that an entity standing on a surface stays exactly on it.
pub const Y_ROUNDING_DIGITS: i32 = 5;

/// Maximum number of hitboxes a `MultiCollisionEntity` may have.
pub const MAX_HITBOXES: usize = 10;

/// Largest magnitude, in blocks, of any motion component within one tick.
pub const MAX_MOTION_PER_TICK: f64 = 64.0;


/// Which axes an entity collided on during its last resolution.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionFlags {
    pub vertical: bool,
    pub horizontal: bool,
}

impl CollisionFlags {
    pub fn any(self) -> bool {
        self.vertical || self.horizontal
    }
}


/// State every entity that moves through terrain exposes.
pub trait PhysicsEntity {
    fn position(&self) -> Vec3<f64>;

    /// Motion per tick, before scaling by the tick's `dt_fac`.
    ///
    /// After scaling, each component is clamped to `MAX_MOTION_PER_TICK`
    /// blocks, which bounds the region of blocks one tick visits.
    fn motion(&self) -> Vec3<f64>;

    fn collided(&self) -> CollisionFlags;

    fn set_collided(&mut self, flags: CollisionFlags);

    /// Subtracted from upward motion which ends in a vertical collision.
    fn ladder_fix_delta(&self) -> f64 {
        0.0
    }

    /// Dimension the entity's blocks are looked up in.
    fn dim(&self) -> i32 {
        0
    }
}

/// Entity with a single hitbox.
pub trait CollisionEntity: PhysicsEntity {
    /// Hitbox relative to the entity's position.
    fn hitbox(&self) -> AaBox;
}

/// Entity made of several hitboxes.
pub trait MultiCollisionEntity: PhysicsEntity {
    /// Hitboxes relative to the entity's position. At most `MAX_HITBOXES`.
    fn hitboxes(&self) -> &[AaBox];
}


/// A single collision between an entity and one box of a block.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BlockCollision<'a, B> {
    pub pos: BlockPos,
    pub block: &'a B,
    /// Face of the block box which blocked the motion.
    pub facing: Facing,
    /// Motion, as resolved so far, right after this collision.
    pub delta: Vec3<f64>,
    /// Whether the entity wasn't already collided on this axis before the
    /// tick started.
    pub is_new: bool,
}

/// Result of resolving one tick of motion.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CollisionOutcome {
    pub position: Vec3<f64>,
    /// Motion actually travelled.
    pub motion: Vec3<f64>,
    pub flags: CollisionFlags,
}


/// Per-entity scratch space for the collision testers.
///
/// Holding onto this between ticks is what makes the cached block boxes
/// useful, so there should be one workspace per entity.
#[derive(Debug, Clone)]
pub struct CollisionWorkspace<B> {
    pub boxes: CachedBoxList<B>,
    hitboxes: Vec<AaBox>,
}

impl<B> Default for CollisionWorkspace<B> {
    fn default() -> Self {
        CollisionWorkspace {
            boxes: CachedBoxList::default(),
            hitboxes: Vec::new(),
        }
    }
}

impl<B: Clone> CollisionWorkspace<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the next tick to rebuild the cached block boxes.
    pub fn invalidate(&mut self) {
        self.boxes.invalidate();
    }

    fn load_hitboxes(&mut self, local: &[AaBox]) {
        self.hitboxes.clear();
        self.hitboxes.extend_from_slice(local);
    }
}


/// Entity state read at the start of a tick.
#[derive(Debug, Copy, Clone)]
struct TickInput {
    position: Vec3<f64>,
    motion: Vec3<f64>,
    previous: CollisionFlags,
    ladder_fix_delta: f64,
    dim: i32,
}

impl TickInput {
    fn of<E: PhysicsEntity + ?Sized>(entity: &E, dt_fac: f64) -> Self {
        TickInput {
            position: entity.position(),
            motion: sanitize_motion(entity.motion() * dt_fac),
            previous: entity.collided(),
            ladder_fix_delta: entity.ladder_fix_delta(),
            dim: entity.dim(),
        }
    }
}

/// Replace non-finite motion components with zero and clamp the rest to
/// `MAX_MOTION_PER_TICK`.
fn sanitize_motion(motion: Vec3<f64>) -> Vec3<f64> {
    if !(motion.x.is_finite() && motion.y.is_finite() && motion.z.is_finite()) {
        warn!(?motion, "non-finite entity motion, zeroing bad components");
    } else if motion.reduce_partial_max() > MAX_MOTION_PER_TICK
        || motion.reduce_partial_min() < -MAX_MOTION_PER_TICK
    {
        warn!(?motion, "entity motion exceeds per-tick limit, clamping");
    } else {
        return motion;
    }
    motion.map(|n| if n.is_finite() {
        n.clamp(-MAX_MOTION_PER_TICK, MAX_MOTION_PER_TICK)
    } else {
        0.0
    })
}

/// Inclusive block region a tick of motion could touch.
fn sweep_region(
    hitboxes: &[AaBox],
    motion: Vec3<f64>,
    step_height: f64,
    y_extra: f64,
    dim: i32,
) -> (BlockPos, BlockPos) {
    let mut min = Vec3::from(f64::INFINITY);
    let mut max = Vec3::from(f64::NEG_INFINITY);
    for hitbox in hitboxes {
        let lo = Vec3 {
            x: hitbox.min.x + motion.x.min(0.0),
            y: hitbox.min.y + motion.y.min(0.0) - y_extra,
            z: hitbox.min.z + motion.z.min(0.0),
        };
        let hi = Vec3 {
            x: hitbox.max.x + motion.x.max(0.0),
            y: (hitbox.min.y + step_height).max(hitbox.max.y) + motion.y.max(0.0),
            z: hitbox.max.z + motion.z.max(0.0),
        };
        min = min.map2(lo, f64::min);
        max = max.map2(hi, f64::max);
    }
    (
        BlockPos::from_vec(min.map(|n| n.floor() as i32), dim),
        BlockPos::from_vec(max.map(|n| n.ceil() as i32), dim),
    )
}

/// Push the motion along `axis` out of every cached box, for every hitbox,
/// cached boxes in the outer loop. Returns whether anything was hit.
fn resolve_axis<B, F>(
    boxes: &CachedBoxList<B>,
    hitboxes: &[AaBox],
    axis: Axis,
    motion: &mut Vec3<f64>,
    is_new: bool,
    on_collide: &mut F,
) -> bool
where
    B: Clone,
    F: FnMut(BlockCollision<'_, B>),
{
    let i = axis as usize;
    let mut collided = false;
    for cached in boxes {
        for hitbox in hitboxes {
            let (resolved, pole) = cached.aa_box.push_out(*hitbox, axis, motion[i]);
            motion[i] = resolved;
            if let Some(pole) = pole {
                collided = true;
                on_collide(BlockCollision {
                    pos: cached.pos,
                    block: &cached.block,
                    facing: Facing::from_axis_pole(axis, -pole),
                    delta: *motion,
                    is_new,
                });
            }
        }
    }
    collided
}

/// Resolve one tick for the hitboxes loaded into `ws`.
fn resolve<G, F>(
    ws: &mut CollisionWorkspace<G::Block>,
    grid: &G,
    step_height: f64,
    y_extra: f64,
    input: TickInput,
    mut on_collide: F,
) -> CollisionOutcome
where
    G: BlockGrid,
    F: FnMut(BlockCollision<'_, G::Block>),
{
    let CollisionWorkspace { boxes, hitboxes } = ws;
    let mut motion = input.motion;

    if hitboxes.is_empty() {
        return CollisionOutcome {
            position: input.position + motion,
            motion,
            flags: CollisionFlags::default(),
        };
    }

    for hitbox in hitboxes.iter_mut() {
        *hitbox = hitbox
            .translate(input.position)
            .with_rounded_min_y(Y_ROUNDING_DIGITS);
    }

    let (min, max) = sweep_region(hitboxes, motion, step_height, y_extra, input.dim);
    boxes.update(grid, min, max);

    let mut flags = CollisionFlags::default();

    flags.vertical = resolve_axis(
        boxes,
        hitboxes,
        Axis::Y,
        &mut motion,
        !input.previous.vertical,
        &mut on_collide,
    );
    for hitbox in hitboxes.iter_mut() {
        *hitbox = hitbox.translate_axis(Axis::Y, motion.y);
    }

    let horizontal_blocked = boxes.iter().any(|cached| hitboxes
        .iter()
        .any(|hitbox| cached.aa_box.intersects(hitbox.translate([motion.x, 0.0, motion.z]))));
    if horizontal_blocked {
        let is_new = !input.previous.horizontal;
        flags.horizontal |= resolve_axis(
            boxes,
            hitboxes,
            Axis::X,
            &mut motion,
            is_new,
            &mut on_collide,
        );
        for hitbox in hitboxes.iter_mut() {
            *hitbox = hitbox.translate_axis(Axis::X, motion.x);
        }
        flags.horizontal |= resolve_axis(
            boxes,
            hitboxes,
            Axis::Z,
            &mut motion,
            is_new,
            &mut on_collide,
        );
    }

    if flags.vertical && motion.y > 0.0 {
        motion.y -= input.ladder_fix_delta;
    }

    CollisionOutcome {
        position: input.position + motion,
        motion,
        flags,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_region_covers_motion() {
        let hitbox = AaBox::new([0.25, 1.0, 0.25], [0.75, 2.75, 0.75]);
        let (min, max) = sweep_region(&[hitbox], Vec3::new(0.5, -0.5, 0.0), 1.0, 1.0, 3);
        assert_eq!(min, BlockPos::with_dim(0, -1, 0, 3));
        assert_eq!(max, BlockPos::with_dim(2, 3, 1, 3));
    }

    #[test]
    fn sweep_region_reaches_step_height() {
        let short = AaBox::new([0.0, 0.0, 0.0], [0.5, 0.25, 0.5]);
        let (_, max) = sweep_region(&[short], Vec3::zero(), 1.5, 0.0, 0);
        assert_eq!(max.y, 2);
        let (min, max) = sweep_region(&[short], Vec3::zero(), 0.0, 0.0, 0);
        assert_eq!((min.y, max.y), (0, 1));
    }

    #[test]
    fn sweep_region_is_union() {
        let a = AaBox::new([0.0, 0.0, 0.0], [0.5, 0.5, 0.5]);
        let b = AaBox::new([-3.5, 2.0, 1.0], [-3.0, 2.5, 4.5]);
        let (min, max) = sweep_region(&[a, b], Vec3::zero(), 0.0, 0.0, 0);
        assert_eq!(min, BlockPos::new(-4, 0, 0));
        assert_eq!(max, BlockPos::new(1, 3, 5));
    }

    #[test]
    fn sanitize_only_touches_bad_components() {
        let motion = sanitize_motion(Vec3::new(0.5, f64::NEG_INFINITY, f64::NAN));
        assert_eq!(motion, Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(sanitize_motion(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn huge_motion_is_clamped() {
        let motion = sanitize_motion(Vec3::new(1e9, -1e9, 0.5));
        assert_eq!(motion, Vec3::new(MAX_MOTION_PER_TICK, -MAX_MOTION_PER_TICK, 0.5));

        let (min, max) = sweep_region(&[AaBox::footprint(0.6, 1.8)], motion, 0.0, 0.0, 0);
        assert!(max.x - min.x <= MAX_MOTION_PER_TICK as i32 + 2);
        assert!(max.y - min.y <= MAX_MOTION_PER_TICK as i32 + 3);
    }
}
