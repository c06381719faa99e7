//! Physics sandbox demo
//!
//! Drops a pile of boxes onto a static floor while short lived debris
//! drifts through the scene. Runs headless at a fixed timestep and logs
//! progress once per simulated second.

mod config;

use crate::config::SandboxConfig;
use flat_engine::prelude::{
    EntityBuilder, EntityId, EntitySystem, IntervalTicker, Lifetime, PhysicsSystem, RigidBody,
    Timer, Vec2, Velocity,
};
use rand::prelude::*;
use std::cell::Cell;
use std::rc::Rc;

const CONFIG_PATH: &str = "sandbox.toml";
const FRAME_DT: f32 = 1.0 / 60.0;
const FLOOR_Y: f32 = -12.0;

pub struct SandboxApp {
    physics: PhysicsSystem,
    entities: EntitySystem,
    config: SandboxConfig,
    box_ids: Vec<EntityId>,
    floor_impacts: Rc<Cell<u64>>,
}

impl SandboxApp {
    pub fn new(config: SandboxConfig) -> Self {
        log::info!("Creating physics sandbox");
        Self {
            physics: PhysicsSystem::from_config(&config.physics),
            entities: EntitySystem::new(),
            config,
            box_ids: Vec::new(),
            floor_impacts: Rc::new(Cell::new(0)),
        }
    }

    fn init(&mut self) {
        let scene = self.config.scene.clone();
        let cell_x = self.config.physics.cell_size.x;
        let mut rng = thread_rng();

        // The broad phase files bodies by position, so the floor is tiled in
        // cell sized segments instead of one stretched box.
        let mut floor_ids = Vec::new();
        let segments = (2.0 * scene.spawn_spread / cell_x).ceil() as i32 + 1;
        for i in 0..segments {
            let x = -scene.spawn_spread + cell_x * i as f32;
            let id = self.entities.spawn(
                EntityBuilder::new()
                    .with_position(Vec2::new(x, FLOOR_Y))
                    .with_scale(Vec2::new(cell_x, 1.0))
                    .with_component(RigidBody::new(0.0)),
            );
            floor_ids.push(id);
        }

        for _ in 0..scene.box_count {
            let position = Vec2::new(
                rng.gen_range(-scene.spawn_spread..scene.spawn_spread),
                rng.gen_range(2.0..scene.spawn_spread),
            );
            let id = self.entities.spawn(
                EntityBuilder::new()
                    .with_position(position)
                    .with_component(RigidBody::new(1.0).with_bounciness(scene.bounciness)),
            );
            self.box_ids.push(id);
        }

        // Debris never touches the physics world; it drifts and expires
        for _ in 0..scene.debris_count {
            let position = Vec2::new(
                rng.gen_range(-scene.spawn_spread..scene.spawn_spread),
                rng.gen_range(-scene.spawn_spread..scene.spawn_spread),
            );
            let velocity = Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)) * 2.0;
            self.entities.spawn(
                EntityBuilder::new()
                    .with_position(position)
                    .with_scale(Vec2::new(0.25, 0.25))
                    .with_component(Velocity::new(velocity, rng.gen_range(-3.0..3.0)))
                    .with_component(Lifetime::new(rng.gen_range(0.5..scene.debris_lifetime))),
            );
        }

        // Spawns flush on the first update; a zero dt pass makes the bodies
        // reachable before gravity and contact reporting are wired up.
        self.entities.update(&mut self.physics, 0.0);

        for &id in &self.box_ids {
            let handle = self
                .entities
                .get_component::<RigidBody>(id)
                .and_then(RigidBody::handle);
            if let Some(body) = handle.and_then(|handle| self.physics.body_mut(handle)) {
                body.gravity = scene.gravity;
                body.velocity = Vec2::new(rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0));
            }
        }

        for &id in &floor_ids {
            let handle = self
                .entities
                .get_component::<RigidBody>(id)
                .and_then(RigidBody::handle);
            if let Some(body) = handle.and_then(|handle| self.physics.body_mut(handle)) {
                let impacts = Rc::clone(&self.floor_impacts);
                body.on_collide = Some(Box::new(move |_other, point| {
                    impacts.set(impacts.get() + 1);
                    log::trace!("floor contact, penetration {:.3}", point.penetration);
                }));
            }
        }

        log::info!(
            "Spawned {} entities backed by {} physics bodies",
            self.entities.len(),
            self.physics.body_count()
        );
    }

    pub fn run(&mut self) {
        self.init();

        let sub_steps = self.config.physics.sub_steps;
        let total_frames = (self.config.scene.run_seconds / FRAME_DT).ceil() as u32;

        let mut timer = Timer::new();
        let mut ticker = IntervalTicker::new(1.0);
        let mut simulated = 0.0f32;

        for _ in 0..total_frames {
            timer.update();

            self.entities.update(&mut self.physics, FRAME_DT);
            self.physics.update(FRAME_DT, sub_steps);

            simulated += FRAME_DT;
            if ticker.tick(FRAME_DT) {
                log::info!(
                    "t = {:.1}s: {} entities, {} bodies, {:.0} frames/s",
                    simulated,
                    self.entities.len(),
                    self.physics.body_count(),
                    timer.average_fps()
                );
            }
        }

        // A box at rest accumulates at most one sub step of gravity before
        // the next contact response zeroes it again
        let rest_threshold = 0.1;
        let mut resting = 0usize;
        for &id in &self.box_ids {
            let handle = self
                .entities
                .get_component::<RigidBody>(id)
                .and_then(RigidBody::handle);
            if let Some(body) = handle.and_then(|handle| self.physics.body(handle)) {
                if body.velocity.norm() < rest_threshold {
                    resting += 1;
                }
            }
        }
        log::info!(
            "Pile settled: {} of {} boxes at rest, floor reported {} contacts",
            resting,
            self.box_ids.len(),
            self.floor_impacts.get()
        );
    }

    pub fn shutdown(&mut self) {
        self.entities.clear(&mut self.physics);
        log::info!("Scene cleared, {} bodies remain", self.physics.body_count());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting flat_engine sandbox");

    let config = SandboxConfig::load_or_default(CONFIG_PATH)?;
    let mut app = SandboxApp::new(config);
    app.run();
    app.shutdown();

    log::info!("Sandbox finished");
    Ok(())
}
