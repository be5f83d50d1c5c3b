//! Ready-made particle systems.
//!
//! Common effects as one-liners. Coordinates are screen pixels with +Y
//! pointing down. The presets set up emission and motion only; attach an
//! artist to see them:
//!
//! ```ignore
//! let mut splash: ParticleSystem<Screen> = ParticleSystem::fountain(Vec2::new(320.0, 400.0), 60.0)
//!     .with_artist(ArtistFadeOverlay::new(drop, Anchor::Center, vec![BLUE, CLEAR])?);
//! ```

use crate::emitter::{Burst, ConstantRate};
use crate::particle::Particle;
use crate::physics::{Acceleration, Attributes, Inertia, Jitter, Kick, PhysicsComposite};
use crate::random::UniformNoise;
use crate::system::ParticleSystem;
use glam::Vec2;

/// Downward pull shared by the presets, in pixels / second / second.
const GRAVITY: f32 = 200.0;

impl<C> ParticleSystem<C> {
    /// Fountain preset: droplets shoot up, arc over and fall back down.
    ///
    /// # Arguments
    ///
    /// * `position` - Nozzle position
    /// * `rate` - Droplets per second
    pub fn fountain(position: Vec2, rate: f32) -> Self {
        ParticleSystem::new(
            Particle::new(position.x, position.y).with_life(3.0),
            ConstantRate::new(rate),
        )
        .with_launcher(
            PhysicsComposite::new()
                .with(Kick::velocity(0.0, -180.0))
                .with(Jitter::new(Attributes::velocity(40.0, 20.0))),
        )
        .with_physics(
            PhysicsComposite::new()
                .with(Inertia)
                .with(Acceleration::new(0.0, GRAVITY)),
        )
    }

    /// Explosion preset: a single burst flying out in every direction.
    ///
    /// # Arguments
    ///
    /// * `position` - Explosion center
    /// * `count` - Number of fragments
    pub fn explosion(position: Vec2, count: u32) -> Self {
        ParticleSystem::new(
            Particle::new(position.x, position.y).with_life(1.2),
            Burst::single(count, 0.0),
        )
        .with_launcher(Jitter::new(Attributes {
            dx: 150.0,
            dy: 150.0,
            life: 0.3,
            ..Default::default()
        }))
        .with_physics(
            PhysicsComposite::new()
                .with(Inertia)
                .with(Acceleration::new(0.0, GRAVITY * 0.3)),
        )
        .with_particle_limit(count as usize)
    }

    /// Smoke preset: slow puffs that rise and wander sideways.
    ///
    /// # Arguments
    ///
    /// * `position` - Smoke source
    /// * `rate` - Puffs per second
    pub fn smoke(position: Vec2, rate: f32) -> Self {
        ParticleSystem::new(
            Particle::new(position.x, position.y).with_life(4.0),
            ConstantRate::new(rate),
        )
        .with_launcher(
            PhysicsComposite::new()
                .with(Kick::velocity(0.0, -30.0))
                .with(Jitter::new(Attributes {
                    x: 4.0,
                    dx: 10.0,
                    ..Default::default()
                })),
        )
        .with_physics(
            PhysicsComposite::new()
                .with(Inertia)
                .with(Jitter::new(Attributes::velocity(15.0, 0.0)))
                .with(Acceleration::new(0.0, -5.0)),
        )
    }

    /// Sparkler preset: fast, short-lived sparks spraying outward.
    ///
    /// # Arguments
    ///
    /// * `position` - Sparkler tip
    /// * `rate` - Sparks per second
    pub fn sparkler(position: Vec2, rate: f32) -> Self {
        ParticleSystem::new(
            Particle::new(position.x, position.y).with_life(0.5),
            ConstantRate::new(rate),
        )
        .with_launcher(Jitter::new(Attributes {
            dx: 120.0,
            dy: 120.0,
            life: 0.15,
            ..Default::default()
        }))
        .with_physics(
            PhysicsComposite::new()
                .with(Inertia)
                .with(Acceleration::new(0.0, GRAVITY * 0.75)),
        )
    }

    /// Rain preset: drops falling from the top edge of the screen.
    ///
    /// Drops start evenly spread over `0..width` at `y = 0`.
    ///
    /// # Arguments
    ///
    /// * `width` - Screen width in pixels
    /// * `rate` - Drops per second
    pub fn rain(width: f32, rate: f32) -> Self {
        ParticleSystem::new(
            Particle::new(width * 0.5, 0.0).with_life(2.0),
            ConstantRate::new(rate),
        )
        .with_launcher(
            PhysicsComposite::new()
                .with(Kick::velocity(0.0, 300.0))
                // One launch second of uniform noise spans [-width/2, width/2)
                .with(Jitter::with_sampler(
                    Attributes::position(width, 0.0),
                    UniformNoise::new(),
                )),
        )
    }
}
