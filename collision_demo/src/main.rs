//! Octree collision demo
//!
//! Scatters cubes and slabs around a bounded arena, drifts them for a number
//! of ticks and reports every contact the collision system finds.
//!
//! Usage: `octree_demo [config.toml|config.ron]`

use std::path::PathBuf;

use mesh_collision::foundation::logging;
use mesh_collision::prelude::*;
use rand::Rng;
use thiserror::Error;

const ARENA_HALF_SIZE: f32 = 12.0;
const SMALL_COUNT: usize = 24;
const LARGE_COUNT: usize = 4;
const TICKS: usize = 120;
const TICK_SECONDS: f32 = 1.0 / 30.0;
const SPEED: f32 = 3.0;

#[derive(Debug, Error)]
enum DemoError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("collision error: {0}")]
    Collision(#[from] CollisionError),
}

struct Body {
    id: ObjectId,
    position: Vec3,
    velocity: Vec3,
    half_size: f32,
}

impl Body {
    /// Advance and bounce off the arena walls
    fn step(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        let limit = ARENA_HALF_SIZE - self.half_size;
        for axis in 0..3 {
            if self.position[axis].abs() > limit {
                self.position[axis] = self.position[axis].clamp(-limit, limit);
                self.velocity[axis] = -self.velocity[axis];
            }
        }
    }
}

fn random_vector(rng: &mut impl Rng, range: f32) -> Vec3 {
    Vec3::new(
        rng.gen_range(-range..range),
        rng.gen_range(-range..range),
        rng.gen_range(-range..range),
    )
}

fn spawn(
    system: &mut CollisionSystem,
    rng: &mut impl Rng,
    mesh: &Mesh,
    half_size: f32,
) -> Result<Body, DemoError> {
    let id = system.add_object_from_mesh(mesh)?;
    let position = random_vector(rng, ARENA_HALF_SIZE - half_size);
    let velocity = random_vector(rng, 1.0).try_normalize(1e-6).unwrap_or_else(Vec3::x) * SPEED;
    system.update_position(id, position);

    Ok(Body {
        id,
        position,
        velocity,
        half_size,
    })
}

fn load_config() -> Result<CollisionConfig, DemoError> {
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            log::info!("Loading collision config from {}", path.display());
            CollisionConfig::load_or_default(&path)?
        }
        None => CollisionConfig::default(),
    };
    config.validate().map_err(DemoError::InvalidConfig)?;
    Ok(config)
}

fn run() -> Result<(), DemoError> {
    let config = load_config()?;
    log::info!(
        "Octree limits: max depth {}, leaf capacity {}",
        config.octree.max_depth,
        config.octree.max_triangles_per_leaf
    );

    let mut system = CollisionSystem::with_config(config);
    let mut rng = rand::thread_rng();

    // Centered meshes so a body's position is its center
    let small = Mesh::cuboid(Vec3::repeat(-0.5), Vec3::repeat(0.5));
    let large = Mesh::cuboid(Vec3::new(-3.0, -0.25, -2.0), Vec3::new(3.0, 0.25, 2.0));

    let mut bodies = Vec::with_capacity(SMALL_COUNT + LARGE_COUNT);
    for _ in 0..SMALL_COUNT {
        bodies.push(spawn(&mut system, &mut rng, &small, 0.5)?);
    }
    for _ in 0..LARGE_COUNT {
        bodies.push(spawn(&mut system, &mut rng, &large, 3.0)?);
    }
    log::info!("Spawned {} bodies", system.object_count());

    let mut total_contacts = 0usize;
    for tick in 0..TICKS {
        for body in &mut bodies {
            body.step(TICK_SECONDS);
            system.update_position(body.id, body.position);
        }

        for body in &bodies {
            // Each pair is reported once, from its lower id
            for other in system.check_collision_against_all(body.id) {
                if other < body.id {
                    continue;
                }
                total_contacts += 1;
                let info = system.detailed_collision(body.id, other);
                log::debug!(
                    "tick {}: {} hits {} at ({:.2}, {:.2}, {:.2}), depth {:.3}",
                    tick,
                    body.id,
                    other,
                    info.collision_point.x,
                    info.collision_point.y,
                    info.collision_point.z,
                    info.penetration_depth
                );
            }
        }
    }

    let probe = Ray::new(Vec3::new(-ARENA_HALF_SIZE, 0.0, 0.0), Vec3::x());
    match system.raycast(&probe) {
        Some(hit) => log::info!(
            "Probe ray hit object {} at distance {:.2}",
            hit.object,
            hit.distance
        ),
        None => log::info!("Probe ray hit nothing"),
    }

    let stats = system.stats();
    println!("=== Octree Collision Demo ===");
    println!("Ticks:                 {}", TICKS);
    println!("Contacts:              {}", total_contacts);
    println!("Pair tests:            {}", stats.broad_phase_tests);
    println!("Broad-phase rejections: {}", stats.broad_phase_rejections);
    println!("Octree queries:        {}", stats.mid_phase_queries);
    println!("Triangle tests:        {}", stats.narrow_phase_triangle_tests);
    Ok(())
}

fn main() {
    logging::init();

    if let Err(err) = run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
