//! Physics functions.
//!
//! A physics function advances one particle by `dt` seconds. Particle systems
//! run their physics on every live particle each tick, and run their
//! launcher (which is just another physics function) once on every new
//! particle.
//!
//! | Type | Effect per step |
//! |------|-----------------|
//! | [`Inertia`] | position += velocity * dt, life -= dt |
//! | [`Jitter`] | attribute += scale * sample(dt) |
//! | [`Kick`] | attribute += amount * dt |
//! | [`Acceleration`] | velocity += (ax, ay) * dt |
//! | [`PhysicsComposite`] | runs its children in order |
//!
//! # Launchers
//!
//! A launcher runs for a fixed effective time (one second by default), so
//! rates turn into absolute changes. `Acceleration::new(0.0, -20.0)` as a
//! launcher gives every new particle a starting `dy` of -20 px/s.
//!
//! # Example
//!
//! ```ignore
//! let physics = PhysicsComposite::new()
//!     .with(Inertia)
//!     .with(Acceleration::new(0.0, 98.0))
//!     .with(Jitter::new(Attributes { dx: 4.0, ..Default::default() }));
//! ```

use crate::particle::Particle;
use crate::random::{Brownian, Sampler};
use glam::Vec2;

/// A per-particle, per-step state update.
///
/// Closures taking `(dt, &mut Particle)` are physics functions too.
pub trait Physics: Send {
    /// Advance `particle` by `dt` seconds.
    fn apply(&mut self, dt: f32, particle: &mut Particle);
}

impl<F> Physics for F
where
    F: FnMut(f32, &mut Particle) + Send,
{
    fn apply(&mut self, dt: f32, particle: &mut Particle) {
        self(dt, particle)
    }
}

/// One value per mutable particle attribute.
///
/// Used as the per-second amounts of a [`Kick`] and the noise scales of a
/// [`Jitter`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Attributes {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub life: f32,
}

impl Attributes {
    /// Only position components.
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    /// Only velocity components.
    pub fn velocity(dx: f32, dy: f32) -> Self {
        Self {
            dx,
            dy,
            ..Default::default()
        }
    }

    /// Only the lifetime.
    pub fn life(life: f32) -> Self {
        Self {
            life,
            ..Default::default()
        }
    }

    /// Pair each value with the particle field it drives, in
    /// `x, y, dx, dy, life` order.
    fn pair_with<'a>(&self, particle: &'a mut Particle) -> [(f32, &'a mut f32); 5] {
        [
            (self.x, &mut particle.x),
            (self.y, &mut particle.y),
            (self.dx, &mut particle.dx),
            (self.dy, &mut particle.dy),
            (self.life, &mut particle.life),
        ]
    }
}

/// Move particles along their velocity and burn their life.
///
/// The default physics of a particle system.
#[derive(Clone, Copy, Debug, Default)]
pub struct Inertia;

impl Physics for Inertia {
    fn apply(&mut self, dt: f32, particle: &mut Particle) {
        particle.x += dt * particle.dx;
        particle.y += dt * particle.dy;
        particle.life -= dt;
    }
}

/// Random perturbation of particle attributes.
///
/// For every non-zero entry of `scale` (in `x, y, dx, dy, life` order) one
/// sample is drawn from the sampler and `scale * sample` is added to that
/// attribute. Zero entries draw nothing, so a deterministic test sampler
/// sees exactly one call per enabled attribute.
#[derive(Clone, Debug)]
pub struct Jitter<S = Brownian> {
    /// Noise scale per attribute.
    pub scale: Attributes,
    sampler: S,
}

impl Jitter<Brownian> {
    /// Jitter with Brownian noise seeded from the operating system.
    pub fn new(scale: Attributes) -> Self {
        Self {
            scale,
            sampler: Brownian::new(),
        }
    }
}

impl<S: Sampler> Jitter<S> {
    /// Jitter drawing its noise from `sampler`.
    pub fn with_sampler(scale: Attributes, sampler: S) -> Self {
        Self { scale, sampler }
    }
}

impl<S: Sampler> Physics for Jitter<S> {
    fn apply(&mut self, dt: f32, particle: &mut Particle) {
        for (scale, value) in self.scale.pair_with(particle) {
            if scale != 0.0 {
                *value += scale * self.sampler.sample(dt);
            }
        }
    }
}

/// Add fixed per-second amounts to particle attributes.
///
/// Used continuously it acts like a constant force on every attribute; used
/// as a launcher it sets initial conditions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Kick(pub Attributes);

impl Kick {
    /// Kick by the given per-second amounts.
    pub fn new(amount: Attributes) -> Self {
        Self(amount)
    }

    /// Kick only the position.
    pub fn position(x: f32, y: f32) -> Self {
        Self(Attributes::position(x, y))
    }

    /// Kick only the velocity.
    pub fn velocity(dx: f32, dy: f32) -> Self {
        Self(Attributes::velocity(dx, dy))
    }

    /// Kick only the lifetime.
    pub fn life(life: f32) -> Self {
        Self(Attributes::life(life))
    }
}

impl Physics for Kick {
    fn apply(&mut self, dt: f32, particle: &mut Particle) {
        for (amount, value) in self.0.pair_with(particle) {
            *value += dt * amount;
        }
    }
}

/// Constant acceleration field, in pixels / second / second.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Acceleration {
    pub ax: f32,
    pub ay: f32,
}

impl Acceleration {
    /// Acceleration along the X and Y axes.
    pub fn new(ax: f32, ay: f32) -> Self {
        Self { ax, ay }
    }

    /// Acceleration of `magnitude` in direction `degrees`.
    ///
    /// 0 degrees is the +X axis, 90 degrees is the +Y axis.
    pub fn radial(magnitude: f32, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(magnitude * cos, magnitude * sin)
    }
}

impl From<Vec2> for Acceleration {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl Physics for Acceleration {
    fn apply(&mut self, dt: f32, particle: &mut Particle) {
        particle.dx += dt * self.ax;
        particle.dy += dt * self.ay;
    }
}

/// Several physics functions applied in order.
#[derive(Default)]
pub struct PhysicsComposite {
    physics: Vec<Box<dyn Physics>>,
}

impl PhysicsComposite {
    /// Create an empty composite (a no-op).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a physics function, builder style.
    pub fn with(mut self, physics: impl Physics + 'static) -> Self {
        self.push(physics);
        self
    }

    /// Append a physics function.
    pub fn push(&mut self, physics: impl Physics + 'static) {
        self.physics.push(Box::new(physics));
    }

    /// Number of physics functions.
    pub fn len(&self) -> usize {
        self.physics.len()
    }

    /// Whether the composite has no children.
    pub fn is_empty(&self) -> bool {
        self.physics.is_empty()
    }
}

impl Physics for PhysicsComposite {
    fn apply(&mut self, dt: f32, particle: &mut Particle) {
        for physics in &mut self.physics {
            physics.apply(dt, particle);
        }
    }
}
