//! Random sources for jitter physics.
//!
//! A [`Sampler`] takes the elapsed time of a step and returns a random
//! offset scaled for that step. Samplers are passed in explicitly (there is
//! no process-global generator) so tests can inject deterministic ones:
//!
//! ```ignore
//! // Alternates +dt, -dt
//! let mut sign = 1.0;
//! let jitter = Jitter::with_sampler(move |dt: f32| { sign = -sign; -sign * dt });
//! ```

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Source of per-step random offsets.
pub trait Sampler: Send {
    /// Draw one offset for a step of `dt` seconds.
    fn sample(&mut self, dt: f32) -> f32;
}

impl<F> Sampler for F
where
    F: FnMut(f32) -> f32 + Send,
{
    fn sample(&mut self, dt: f32) -> f32 {
        self(dt)
    }
}

/// Gaussian noise with standard deviation `sqrt(dt)`.
///
/// Variance grows linearly with elapsed time, like a discretized Wiener
/// process, so splitting a second into many small steps gives the same
/// spread as one large step.
///
/// Cloning copies the generator state, so a clone replays the same noise.
/// Use [`fork`](Brownian::fork) for an independent stream.
#[derive(Clone, Debug)]
pub struct Brownian {
    rng: SmallRng,
}

impl Brownian {
    /// Brownian noise seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Brownian noise with a fixed seed, for reproducible effects.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// A new generator seeded from this one. The two streams differ, and a
    /// seeded parent forks reproducibly.
    pub fn fork(&mut self) -> Self {
        Self::seeded(self.rng.gen())
    }

    /// Standard normal sample via Box-Muller.
    fn standard_normal(&mut self) -> f32 {
        // 1 - [0, 1) keeps the log argument away from zero
        let u1: f32 = 1.0 - self.rng.gen::<f32>();
        let u2: f32 = self.rng.gen();
        (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
    }
}

impl Default for Brownian {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for Brownian {
    fn sample(&mut self, dt: f32) -> f32 {
        self.standard_normal() * dt.max(0.0).sqrt()
    }
}

/// Uniform noise in `dt * [-0.5, 0.5)`.
///
/// Cheaper than [`Brownian`], but its variance shrinks quadratically with the
/// step size, so small frame times give visibly less motion.
///
/// Like [`Brownian`], a clone replays the same noise; use
/// [`fork`](UniformNoise::fork) for an independent stream.
#[derive(Clone, Debug)]
pub struct UniformNoise {
    rng: SmallRng,
}

impl UniformNoise {
    /// Uniform noise seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Uniform noise with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// A new generator seeded from this one.
    pub fn fork(&mut self) -> Self {
        Self::seeded(self.rng.gen())
    }
}

impl Default for UniformNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for UniformNoise {
    fn sample(&mut self, dt: f32) -> f32 {
        dt * (self.rng.gen::<f32>() - 0.5)
    }
}
