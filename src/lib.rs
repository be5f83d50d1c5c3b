//! # Kindle - composable 2D particle effects
//!
//! A small CPU particle simulation for 2D games. Kindle owns the numbers
//! (positions, velocities, lifetimes, emission schedules) and leaves pixels
//! to your renderer through an opaque canvas.
//!
//! ## Quick Start
//!
//! ```ignore
//! use kindle::prelude::*;
//!
//! let mut sparks: ParticleSystem<Screen> = ParticleSystem::new(
//!     Particle::new(320.0, 240.0).with_life(1.5),
//!     Burst::repeat(40, 0.5, 0.0)?,
//! )
//! .with_launcher(Jitter::new(Attributes::velocity(90.0, 90.0)))
//! .with_physics(
//!     PhysicsComposite::new()
//!         .with(Inertia)
//!         .with(Acceleration::new(0.0, 98.0)),
//! )
//! .with_artist(ArtistSimple::new(spark_image, Anchor::Center));
//!
//! // Once per frame:
//! sparks.update(dt);
//! sparks.draw(&mut screen);
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! A [`Particle`] is plain data: `x, y, dx, dy, life, initial_life` and a
//! `species` tag. A system creates particles by copying its origin particle.
//!
//! ### Policies
//!
//! Everything else is a small trait with one method, implemented by the
//! built-in types and by plain closures:
//!
//! | Role | Trait | Built-ins |
//! |------|-------|-----------|
//! | How many to create | [`Emitter`] | [`ConstantRate`], [`Burst`], [`EmitterComposite`] |
//! | Initial state | [`Physics`] (as launcher) | [`Kick`], [`Jitter`], [`Acceleration`] |
//! | Evolution | [`Physics`] | [`Inertia`], [`Jitter`], [`Kick`], [`Acceleration`], [`PhysicsComposite`] |
//! | Drawing | [`Artist`] | [`ArtistSimple`], [`ArtistFadeOverlay`] |
//!
//! ### Lifetime
//!
//! Particles die when `life <= 0` and are removed at the end of the update
//! that killed them. A system is finished ([`ParticleSystem::is_alive`]
//! returns `false`) once its emitter is exhausted and its last particle has
//! died.
//!
//! ## Presets
//!
//! | Preset | Emission |
//! |--------|----------|
//! | [`ParticleSystem::fountain`] | constant rate |
//! | [`ParticleSystem::explosion`] | single burst |
//! | [`ParticleSystem::smoke`] | constant rate |
//! | [`ParticleSystem::sparkler`] | constant rate |
//! | [`ParticleSystem::rain`] | constant rate |
//!
//! ## Logging
//!
//! Kindle emits [`tracing`] events under the `kindle` target (emitter
//! exhaustion, dropped particles, finished systems). Install any subscriber
//! to see them.

pub mod artist;
pub mod emitter;
mod error;
pub mod particle;
pub mod physics;
mod presets;
pub mod random;
pub mod system;

pub use artist::{
    Anchor, Artist, ArtistFadeOverlay, ArtistSimple, BlendMode, Canvas, ImageSize, Rgba,
};
pub use emitter::{Burst, ConstantRate, Emission, Emitter, EmitterComposite};
pub use error::ConfigError;
pub use glam::{IVec2, UVec2, Vec2};
pub use particle::Particle;
pub use physics::{
    Acceleration, Attributes, Inertia, Jitter, Kick, Physics, PhysicsComposite,
};
pub use random::{Brownian, Sampler, UniformNoise};
pub use system::ParticleSystem;

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use kindle::prelude::*;
/// ```
pub mod prelude {
    pub use crate::artist::{
        Anchor, Artist, ArtistFadeOverlay, ArtistSimple, BlendMode, Canvas, ImageSize, Rgba,
    };
    pub use crate::emitter::{Burst, ConstantRate, Emission, Emitter, EmitterComposite};
    pub use crate::error::ConfigError;
    pub use crate::particle::Particle;
    pub use crate::physics::{
        Acceleration, Attributes, Inertia, Jitter, Kick, Physics, PhysicsComposite,
    };
    pub use crate::random::{Brownian, Sampler, UniformNoise};
    pub use crate::system::ParticleSystem;
    pub use crate::{IVec2, UVec2, Vec2};
}
