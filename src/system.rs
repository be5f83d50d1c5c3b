//! The particle system driver.
//!
//! A [`ParticleSystem`] owns its live particles and the policies that evolve
//! them. Call [`update`](ParticleSystem::update) once per frame with the
//! frame time, [`draw`](ParticleSystem::draw) to render, and drop the system
//! once [`is_alive`](ParticleSystem::is_alive) returns `false`.
//!
//! Each update:
//!
//! 1. asks the emitter how many particles to create, capped at the particle
//!    limit (the excess is dropped, not queued);
//! 2. copies the origin particle for each, runs the launcher on it for
//!    `launcher_dt` seconds and records its launched life;
//! 3. runs the physics on every live particle, including those just born;
//! 4. removes dead particles, keeping the survivors in creation order.

use crate::artist::Artist;
use crate::emitter::{Emission, Emitter};
use crate::particle::Particle;
use crate::physics::{Inertia, Physics};

/// Default maximum number of live particles.
pub const DEFAULT_PARTICLE_LIMIT: usize = 512;

/// Default effective time a launcher runs on a new particle, in seconds.
pub const DEFAULT_LAUNCHER_DT: f32 = 1.0;

/// A system of particles with its emission, physics and drawing policies.
///
/// `C` is the canvas type the artist draws on. Systems that are never drawn
/// can leave it at the default.
///
/// # Example
///
/// ```ignore
/// let mut sparks: ParticleSystem<Screen> = ParticleSystem::new(
///     Particle::new(320.0, 240.0).with_life(1.5),
///     Burst::single(200, 0.0),
/// )
/// .with_launcher(Jitter::new(Attributes::velocity(120.0, 120.0)))
/// .with_physics(PhysicsComposite::new().with(Inertia).with(Acceleration::new(0.0, 98.0)))
/// .with_artist(ArtistSimple::new(spark_image, Anchor::Center));
///
/// while sparks.is_alive() {
///     sparks.update(clock.tick());
///     sparks.draw(&mut screen);
/// }
/// ```
pub struct ParticleSystem<C = ()> {
    origin: Particle,
    particles: Vec<Particle>,
    emitter: Box<dyn Emitter>,
    launcher: Option<Box<dyn Physics>>,
    launcher_dt: f32,
    physics: Box<dyn Physics>,
    artist: Option<Box<dyn Artist<C>>>,
    particle_limit: usize,
    is_emitting: bool,
}

impl<C> ParticleSystem<C> {
    /// Create a system stamping copies of `origin` as `emitter` requests.
    ///
    /// Defaults: no launcher, [`Inertia`] physics, no artist, a limit of
    /// [`DEFAULT_PARTICLE_LIMIT`] particles and a launcher time of
    /// [`DEFAULT_LAUNCHER_DT`].
    pub fn new(origin: Particle, emitter: impl Emitter + 'static) -> Self {
        Self {
            origin,
            particles: Vec::new(),
            emitter: Box::new(emitter),
            launcher: None,
            launcher_dt: DEFAULT_LAUNCHER_DT,
            physics: Box::new(Inertia),
            artist: None,
            particle_limit: DEFAULT_PARTICLE_LIMIT,
            is_emitting: true,
        }
    }

    /// Physics run once on every new particle to set its initial state.
    pub fn with_launcher(mut self, launcher: impl Physics + 'static) -> Self {
        self.launcher = Some(Box::new(launcher));
        self
    }

    /// Physics run on every particle each update. Replaces the default
    /// [`Inertia`], so include it in a composite if particles should move.
    pub fn with_physics(mut self, physics: impl Physics + 'static) -> Self {
        self.physics = Box::new(physics);
        self
    }

    /// Artist drawing each particle.
    pub fn with_artist(mut self, artist: impl Artist<C> + 'static) -> Self {
        self.artist = Some(Box::new(artist));
        self
    }

    /// Maximum number of live particles. Zero means nothing is ever spawned.
    pub fn with_particle_limit(mut self, limit: usize) -> Self {
        self.particle_limit = limit;
        self
    }

    /// Effective seconds the launcher runs on each new particle.
    pub fn with_launcher_dt(mut self, launcher_dt: f32) -> Self {
        self.launcher_dt = launcher_dt;
        self
    }

    /// Advance the system by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let was_alive = self.is_alive();

        let new_particles = self.new_particle_count(dt);
        self.particles.reserve(new_particles);
        for _ in 0..new_particles {
            self.launch();
        }
        for particle in &mut self.particles {
            self.physics.apply(dt, particle);
        }
        self.particles.retain(|particle| !particle.is_dead());

        if was_alive && !self.is_alive() {
            tracing::debug!(target: "kindle", "Particle system finished");
        }
    }

    /// Draw every particle with the artist, in creation order.
    pub fn draw(&mut self, canvas: &mut C) {
        if let Some(artist) = self.artist.as_mut() {
            for particle in &self.particles {
                artist.draw(canvas, particle);
            }
        }
    }

    /// Whether the system may still emit or still has particles to show.
    ///
    /// Once this returns `false` it never returns `true` again.
    pub fn is_alive(&self) -> bool {
        !self.particles.is_empty() || self.is_emitting
    }

    /// Whether the emitter has not yet reported exhaustion.
    pub fn is_emitting(&self) -> bool {
        self.is_emitting
    }

    /// Live particles, in creation order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Live particles as raw bytes, for uploading to an instance buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether there are no live particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Maximum number of live particles.
    pub fn particle_limit(&self) -> usize {
        self.particle_limit
    }

    /// Effective seconds the launcher runs on each new particle.
    pub fn launcher_dt(&self) -> f32 {
        self.launcher_dt
    }

    /// The particle new particles are copied from.
    pub fn origin(&self) -> &Particle {
        &self.origin
    }

    /// Mutable origin, e.g. to move an emitter attached to a sprite.
    /// Only affects particles created afterwards.
    pub fn origin_mut(&mut self) -> &mut Particle {
        &mut self.origin
    }

    /// Ask the emitter for particles and apply the particle limit.
    fn new_particle_count(&mut self, dt: f32) -> usize {
        if !self.is_emitting {
            return 0;
        }

        let desired = match self.emitter.emit(dt) {
            Emission::Count(count) => count as usize,
            Emission::Exhausted => {
                tracing::debug!(target: "kindle", "Emitter exhausted");
                self.is_emitting = false;
                0
            }
        };

        let available = self.particle_limit.saturating_sub(self.particles.len());
        if desired > available {
            tracing::trace!(
                target: "kindle",
                desired,
                available,
                "Particle limit reached, dropping new particles"
            );
        }
        desired.min(available)
    }

    fn launch(&mut self) {
        let mut particle = self.origin;
        if let Some(launcher) = self.launcher.as_mut() {
            launcher.apply(self.launcher_dt, &mut particle);
        }
        particle.initial_life = particle.life;
        self.particles.push(particle);
    }
}
