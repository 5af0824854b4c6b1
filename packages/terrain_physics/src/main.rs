#[macro_use]
extern crate tracing;

use terrain_physics::{
    logging::init_logging,
    settings::{
        PhysicsSettings,
        SETTINGS_FILE_NAME,
    },
    sparse_world::{
        SparseWorld,
        STONE,
        FENCE,
        SLAB,
    },
    prelude::*,
};
use std::{
    env::args,
    path::Path,
};
use anyhow::Result;
use vek::*;


const CLI_INTRO: &'static str = "Terrain physics demo.";

const CLI_HELP: &'static str = r#"
Drops a body onto a small scene, walks it into a wall and a fence, and casts
a look ray, logging each step.

Examples:

    [this command]
    Run the demo with physics_settings.json, or defaults if it's missing.

    [this command] --settings=my_settings.json --log=demo.log
    Run with explicit settings and also log to a file.

    [this command] --write-settings
    Write the settings in use back out, to make editing them easier.

Env var examples:
    RUST_LOG=terrain_physics=trace
    Changes logging levels"#;


fn main() -> Result<()> {
    println!("{}", CLI_INTRO);
    let args = args().collect::<Vec<_>>();
    if args.get(1).map(String::as_str) == Some("--help") {
        println!("{}", CLI_HELP);
        return Ok(());
    }

    let log_file = args.iter()
        .filter_map(|arg| arg.strip_prefix("--log="))
        .next();
    init_logging(log_file.map(Path::new))?;

    let settings_file = args.iter()
        .filter_map(|arg| arg.strip_prefix("--settings="))
        .next()
        .unwrap_or(SETTINGS_FILE_NAME);
    let settings = PhysicsSettings::read(settings_file);
    debug!(?settings, "loaded settings");
    if args.iter().any(|arg| arg == "--write-settings") {
        settings.write(settings_file)?;
        info!(%settings_file, "wrote settings");
    }

    run_demo(&settings);
    Ok(())
}

// floor, with a wall along x = 4, a fence at <3,1,-2> and a slab at <-2,1,0>
fn demo_scene() -> SparseWorld {
    let mut world = SparseWorld::new();
    world.fill(BlockPos::new(-8, 0, -8), BlockPos::new(8, 0, 8), STONE);
    world.fill(BlockPos::new(4, 1, -8), BlockPos::new(4, 3, 8), STONE);
    world.set(BlockPos::new(3, 1, -2), FENCE);
    world.set(BlockPos::new(-2, 1, 0), SLAB);
    world
}

fn run_demo(settings: &PhysicsSettings) {
    let world = demo_scene();
    let tester = CollisionTester::from_settings(settings);
    let mut ws = CollisionWorkspace::new();

    let mut body = Body::new(Vec3::new(0.5, 4.0, 0.5), settings.body_hitbox);
    body.ladder_fix_delta = settings.ladder_fix_delta;

    // fall, then walk east into the wall, then north along it into the fence
    let walks = [
        (20, Vec3::new(0.0, 0.0, 0.0)),
        (20, Vec3::new(0.25, 0.0, 0.0)),
        (20, Vec3::new(0.0, 0.0, -0.25)),
    ];
    let mut ticks = 0;
    for (num_ticks, walk) in walks {
        for _ in 0..num_ticks {
            body.motion.x = walk.x;
            body.motion.z = walk.z;
            body.motion.y -= settings.gravity;

            let outcome = tester.apply_terrain_collision(
                &mut ws,
                &world,
                &mut body,
                settings.dt_fac,
                |entity, collision| {
                    if collision.is_new {
                        debug!(
                            pos = %collision.pos,
                            facing = %collision.facing,
                            block = world.shapes.name(*collision.block),
                            at = ?entity.pos,
                            "body hit block",
                        );
                    }
                },
            );
            body.apply(&outcome);
            ticks += 1;
            trace!(ticks, pos = ?body.pos, flags = ?body.collided, "tick");
        }
        info!(ticks, pos = ?body.pos, flags = ?body.collided, "finished walk");
    }

    // look straight ahead, then down at the floor
    let eye = body.pos + Vec3::new(0.0, 1.62, 0.0);
    for dir in [Vec3::new(0.0, 0.0, -1.0), Vec3::new(1.0, -1.0, 0.0)] {
        let ray = Ray::new(eye, dir.normalized());
        match compute_looking_at(&world, ray, body.dim, settings.pick_range) {
            Some(selection) => info!(
                pos = %selection.pos,
                face = %selection.face,
                block = world.shapes.name(selection.block),
                hit = ?selection.world_hit_pos(),
                "looking at block",
            ),
            None => info!(?dir, "looking at nothing"),
        }
    }
}
