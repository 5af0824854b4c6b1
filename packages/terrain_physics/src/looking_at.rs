//! Working out which block face a look ray hits.

use crate::world_geometry::IntersectionSupplier;
use block_geom::{
    AaBox,
    AaBoxFace,
    BlockPos,
    Facing,
    FACINGS,
};
use vek::*;


/// Half-line from `origin` in direction `dir`. `dir` need not be normalized,
/// and ray parameters `t` are in multiples of it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3<f64>,
    pub dir: Vec3<f64>,
}

impl Ray {
    pub fn new(origin: Vec3<f64>, dir: Vec3<f64>) -> Self {
        Ray { origin, dir }
    }

    /// Ray from `from` through `to`, reaching `to` at `t = 1`.
    pub fn between(from: Vec3<f64>, to: Vec3<f64>) -> Self {
        Ray::new(from, to - from)
    }

    pub fn at(&self, t: f64) -> Vec3<f64> {
        self.origin + self.dir * t
    }

    pub fn is_finite(&self) -> bool {
        self.origin.iter().chain(self.dir.iter()).all(|n| n.is_finite())
    }
}


/// Block a look ray hit.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockSelection<B> {
    pub pos: BlockPos,
    pub block: B,
    /// Face of the selection box the ray entered through.
    pub face: Facing,
    /// Hit point relative to the block's origin.
    pub hit_pos: Vec3<f64>,
    /// Index of the hit selection box, in the order the block visits them.
    pub selection_box: usize,
    /// Ray parameter of the hit point.
    pub t: f64,
}

impl<B> BlockSelection<B> {
    /// Hit point in world space.
    pub fn world_hit_pos(&self) -> Vec3<f64> {
        self.pos.origin() + self.hit_pos
    }

    /// The block a block placed against the hit face would go in.
    pub fn adjacent_pos(&self) -> BlockPos {
        self.pos.offset(self.face)
    }
}


/// Where a ray enters a box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoxHit {
    pub face: Facing,
    pub t: f64,
    pub point: Vec3<f64>,
}

/// Test a ray against a world-space box. Only faces the ray enters through
/// are considered, in `FACINGS` order, and the first one hit is returned.
pub fn ray_box_intersection(ray: &Ray, aa_box: AaBox) -> Option<BoxHit> {
    for face in FACINGS {
        if !(ray.dir.dot(face.normal_d()) < 0.0) {
            continue;
        }
        if let Some((t, point)) = AaBoxFace::new(aa_box, face).ray_hit(ray.origin, ray.dir) {
            return Some(BoxHit { face, t, point });
        }
    }
    None
}

/// The face of the unit cube at `pos` through which the ray leaves it, and
/// the point it leaves through, if any.
pub fn exiting_face(ray: &Ray, pos: BlockPos) -> Option<(Facing, Vec3<f64>)> {
    let cube = AaBox::UNIT_BOX.translate(pos.origin());
    for face in FACINGS {
        if !(ray.dir.dot(face.normal_d()) > 0.0) {
            continue;
        }
        if let Some((_, point)) = AaBoxFace::new(cube, face).ray_hit(ray.origin, ray.dir) {
            return Some((face, point));
        }
    }
    None
}

/// Compute which block is being looked at along `ray`, in dimension `dim`,
/// out to `max_dist` from the ray's origin.
///
/// The block containing the origin itself is never selected.
pub fn compute_looking_at<W>(
    world: &W,
    ray: Ray,
    dim: i32,
    max_dist: f64,
) -> Option<BlockSelection<W::Block>>
where
    W: IntersectionSupplier,
{
    compute_looking_at_filtered(world, ray, dim, max_dist, |_, _| true)
}

/// Like `compute_looking_at`, but the walk stops with `None` at the first
/// block `filter` rejects.
pub fn compute_looking_at_filtered<W, F>(
    world: &W,
    ray: Ray,
    dim: i32,
    max_dist: f64,
    mut filter: F,
) -> Option<BlockSelection<W::Block>>
where
    W: IntersectionSupplier,
    F: FnMut(BlockPos, &W::Block) -> bool,
{
    if !ray.is_finite() || !max_dist.is_finite() || max_dist < 0.0 {
        debug!(?ray, max_dist, "refusing to walk degenerate look ray");
        return None;
    }
    let max_dist_sq = max_dist * max_dist;

    let mut pos = BlockPos::containing(ray.origin, dim);
    loop {
        let (face, exit) = exiting_face(&ray, pos)?;
        pos = pos.offset(face);

        if !world.is_valid_pos(pos) {
            return None;
        }
        if exit.distance_squared(ray.origin) > max_dist_sq {
            return None;
        }
        let block = world.block(pos);
        if !filter(pos, &block) {
            return None;
        }

        if let Some(selection) = select_in_block(world, &ray, pos, block) {
            // the hit can lie deeper in the block than where the ray entered it
            if selection.world_hit_pos().distance_squared(ray.origin) > max_dist_sq {
                return None;
            }
            trace!(pos = %selection.pos, face = %selection.face, t = selection.t, "look ray hit");
            return Some(selection);
        }
    }
}

/// Compute which block is hit on the way from `from` to `to`.
pub fn select_between<W>(
    world: &W,
    from: Vec3<f64>,
    to: Vec3<f64>,
    dim: i32,
) -> Option<BlockSelection<W::Block>>
where
    W: IntersectionSupplier,
{
    compute_looking_at(world, Ray::between(from, to), dim, from.distance(to))
}

/// Test the ray against every selection box of the block at `pos`, keeping
/// the nearest hit, or the first on a tie.
fn select_in_block<W>(
    world: &W,
    ray: &Ray,
    pos: BlockPos,
    block: W::Block,
) -> Option<BlockSelection<W::Block>>
where
    W: IntersectionSupplier,
{
    let origin = pos.origin();
    let mut nearest: Option<(usize, BoxHit)> = None;
    let mut i = 0;
    world.selection_boxes(pos, &block, |aa_box| {
        if let Some(hit) = ray_box_intersection(ray, aa_box.translate(origin)) {
            if nearest.map(|(_, prev)| hit.t < prev.t).unwrap_or(true) {
                nearest = Some((i, hit));
            }
        }
        i += 1;
    });

    nearest.map(|(selection_box, hit)| BlockSelection {
        pos,
        block,
        face: hit.face,
        hit_pos: hit.point - origin,
        selection_box,
        t: hit.t,
    })
}
