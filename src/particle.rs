//! The particle record.
//!
//! A [`Particle`] is plain data: position, velocity, remaining lifetime and an
//! opaque species tag. Every other part of the crate (physics, emitters,
//! artists) works by reading or mutating these fields.
//!
//! # Layout
//!
//! The struct is `#[repr(C)]` and [`bytemuck::Pod`], so a slice of particles
//! can be handed to an instanced renderer as raw bytes:
//!
//! | Field | Type | Description |
//! |-------|------|-------------|
//! | `x`, `y` | `f32` | Position of the particle's center, in pixels |
//! | `dx`, `dy` | `f32` | Velocity, in pixels / second |
//! | `life` | `f32` | Seconds of life remaining (dead when `<= 0`) |
//! | `initial_life` | `f32` | Life granted at launch, for fade fractions |
//! | `species` | `u32` | Free tag for custom physics/artists |

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use std::fmt;

/// State of a single simulated particle.
///
/// Particles are `Copy`: a particle system stamps new particles out of its
/// origin particle by value, so no state is ever shared between them.
///
/// # Example
///
/// ```ignore
/// let spark = Particle::new(0.0, -1.0)
///     .with_velocity(1.0, 0.0)
///     .with_life(3.0)
///     .with_species(Kind::Spark);
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Particle {
    /// X position in pixels.
    pub x: f32,
    /// Y position in pixels.
    pub y: f32,
    /// X velocity in pixels / second.
    pub dx: f32,
    /// Y velocity in pixels / second.
    pub dy: f32,
    /// Remaining lifetime in seconds.
    pub life: f32,
    /// Life the particle had right after launch.
    ///
    /// Set by the particle system when the particle is created and left
    /// alone afterwards, so `life / initial_life` is the remaining fraction.
    pub initial_life: f32,
    /// Arbitrary tag, unused by the built-in policies.
    pub species: u32,
}

impl Particle {
    /// Create a motionless particle at `(x, y)` with no life.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    /// Set the velocity.
    pub fn with_velocity(mut self, dx: f32, dy: f32) -> Self {
        self.dx = dx;
        self.dy = dy;
        self
    }

    /// Set the lifetime in seconds. Also resets `initial_life`.
    pub fn with_life(mut self, life: f32) -> Self {
        self.life = life;
        self.initial_life = life;
        self
    }

    /// Set the species tag. Enums can be used through `Into<u32>`.
    pub fn with_species(mut self, species: impl Into<u32>) -> Self {
        self.species = species.into();
        self
    }

    /// Position as a vector.
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Velocity as a vector.
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.dx, self.dy)
    }

    /// Whether the particle has run out of life.
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }

    /// Fraction of the launched lifetime already used up, in `[0, 1]`.
    ///
    /// A particle launched with no life counts as fully spent.
    pub fn spent_fraction(&self) -> f32 {
        spent_fraction(self.life, self.initial_life)
    }
}

pub(crate) fn spent_fraction(life: f32, initial_life: f32) -> f32 {
    if initial_life <= 0.0 {
        return 1.0;
    }
    ((initial_life - life) / initial_life).clamp(0.0, 1.0)
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Particle({}, {}", self.x, self.y)?;
        if self.dx != 0.0 || self.dy != 0.0 {
            write!(f, ", dx={}, dy={}", self.dx, self.dy)?;
        }
        write!(f, ", life={}", self.life)?;
        if self.species != 0 {
            write!(f, ", species={}", self.species)?;
        }
        write!(f, ")")
    }
}
