//! Particle emitters.
//!
//! An emitter decides *how many* particles a system creates in the next `dt`
//! seconds; where they go and how they move is up to the system's origin
//! particle and launcher. Emitters carry their own schedule state, so give
//! each particle system its own emitter.
//!
//! # Emitter Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ConstantRate`] | Steady stream, optionally with a total budget |
//! | [`Burst`] | Counts released on a (possibly infinite) schedule |
//! | [`EmitterComposite`] | Sum of several emitters |
//!
//! # Exhaustion
//!
//! Returning [`Emission::Count(0)`](Emission::Count) means "nothing this
//! time". Returning [`Emission::Exhausted`] means "nothing ever again"; the
//! particle system latches that and, once its last particle dies, reports
//! itself finished.
//!
//! # Example
//!
//! ```ignore
//! // A puff every half second, starting right away, plus a trickle
//! let emitter = EmitterComposite::new()
//!     .with(Burst::repeat(20, 0.5, 0.0)?)
//!     .with(ConstantRate::new(4.0));
//! ```

use crate::error::ConfigError;
use std::fmt;

/// Result of asking an emitter for particles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emission {
    /// Create this many particles now (may be zero).
    Count(u32),
    /// The emitter will never produce particles again.
    Exhausted,
}

impl Emission {
    /// Particle count, zero when exhausted.
    #[inline]
    pub fn count(self) -> u32 {
        match self {
            Emission::Count(n) => n,
            Emission::Exhausted => 0,
        }
    }

    /// Whether this is the permanent exhaustion signal.
    #[inline]
    pub fn is_exhausted(self) -> bool {
        matches!(self, Emission::Exhausted)
    }
}

/// Decides how many particles to create per time step.
///
/// Closures taking `dt` and returning an [`Emission`] are emitters too.
/// Emitters are `Send` so a whole system can move to a worker thread.
pub trait Emitter: Send {
    /// How many particles to emit in the next `dt` seconds.
    fn emit(&mut self, dt: f32) -> Emission;
}

impl<F> Emitter for F
where
    F: FnMut(f32) -> Emission + Send,
{
    fn emit(&mut self, dt: f32) -> Emission {
        self(dt)
    }
}

// =============================================================================
// CONSTANT RATE
// =============================================================================

/// Emit particles at a constant rate.
///
/// Fractional particles carry over between calls, so the total emitted over
/// many small steps matches `rate * elapsed` to within one particle. A large
/// `dt` simply yields a large count.
#[derive(Clone, Debug)]
pub struct ConstantRate {
    rate: f32,
    remaining: Option<u32>,
    remainder: f32,
}

impl ConstantRate {
    /// Emit `rate` particles per second, forever.
    pub fn new(rate: f32) -> Self {
        Self {
            rate,
            remaining: None,
            remainder: 0.0,
        }
    }

    /// Emit `rate` particles per second, `limit` particles in total.
    pub fn limited(rate: f32, limit: u32) -> Self {
        Self {
            remaining: Some(limit),
            ..Self::new(rate)
        }
    }

    /// Particles left in the budget, if there is one.
    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }
}

impl Emitter for ConstantRate {
    fn emit(&mut self, dt: f32) -> Emission {
        if self.remaining == Some(0) {
            return Emission::Exhausted;
        }

        let exact = self.remainder + dt * self.rate;
        let whole = exact.floor();
        self.remainder = exact - whole;
        let mut count = whole as u32;

        if let Some(remaining) = self.remaining.as_mut() {
            count = count.min(*remaining);
            *remaining -= count;
        }

        Emission::Count(count)
    }
}

// =============================================================================
// BURST
// =============================================================================

/// Emit bursts of particles on a schedule.
///
/// The schedule is a sequence of `(count, delay)` pairs: wait `delay`
/// seconds, then release `count` particles, then move on to the next pair.
/// It is pulled lazily, so infinite schedules work. A single large `dt` that
/// spans several scheduled bursts returns all of their counts at once.
///
/// Once the schedule runs out the emitter is exhausted. An empty schedule
/// is exhausted on the first call.
///
/// Schedules that repeat a zero delay forever never let a call finish; use
/// [`Burst::repeat`], which rejects that, for periodic bursts. Its periodic
/// tail is counted arithmetically, so any positive period works with any
/// `dt`.
pub struct Burst {
    schedule: Box<dyn Iterator<Item = (u32, f32)> + Send>,
    /// `(count, period)` repeated forever once `schedule` runs out.
    period: Option<(u32, f64)>,
    repeating: bool,
    count: u32,
    delay: f64,
}

impl Burst {
    /// Burst on an arbitrary schedule of `(count, delay_seconds)` pairs.
    pub fn new<I>(schedule: I) -> Self
    where
        I: IntoIterator<Item = (u32, f32)>,
        I::IntoIter: Send + 'static,
    {
        Self {
            schedule: Box::new(schedule.into_iter().fuse()),
            period: None,
            repeating: false,
            count: 0,
            delay: 0.0,
        }
    }

    /// Release `count` particles once, after `delay` seconds.
    pub fn single(count: u32, delay: f32) -> Self {
        Self::new([(count, delay)])
    }

    /// Release `count` particles every `period` seconds, forever, starting
    /// after `delay` seconds.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NonPositivePeriod`] if `period` is not a positive,
    /// finite number.
    pub fn repeat(count: u32, period: f32, delay: f32) -> Result<Self, ConfigError> {
        if !(period > 0.0 && period.is_finite()) {
            return Err(ConfigError::NonPositivePeriod(period));
        }
        Ok(Self {
            period: Some((count, f64::from(period))),
            ..Self::single(count, delay)
        })
    }

    /// Whether more bursts are still scheduled.
    pub fn is_alive(&self) -> bool {
        self.delay < f64::INFINITY
    }

    fn advance(&mut self) {
        let (count, delay) = match self.schedule.next() {
            Some((count, delay)) if delay >= 0.0 => (count, f64::from(delay)),
            Some((_, delay)) => {
                tracing::warn!(target: "kindle", delay, "Ending burst schedule at invalid delay");
                self.period = None;
                (0, f64::INFINITY)
            }
            None => match self.period {
                Some(tail) => {
                    self.repeating = true;
                    tail
                }
                None => (0, f64::INFINITY),
            },
        };
        self.count = count;
        self.delay = delay;
    }

    /// Consume every whole period in `dt` at once, returning how many bursts
    /// that was.
    fn skip_periods(&self, dt: &mut f64) -> u64 {
        let periods = (*dt / self.delay).floor();
        *dt = (*dt - periods * self.delay).max(0.0);
        periods as u64
    }
}

impl fmt::Debug for Burst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Burst")
            .field("count", &self.count)
            .field("delay", &self.delay)
            .field("period", &self.period)
            .finish_non_exhaustive()
    }
}

impl Emitter for Burst {
    fn emit(&mut self, dt: f32) -> Emission {
        let mut dt = f64::from(dt);
        let mut count = 0u32;
        while dt >= self.delay {
            count = count.saturating_add(self.count);
            dt -= self.delay;
            self.advance();
            if self.repeating {
                let bursts = self.skip_periods(&mut dt).saturating_mul(u64::from(self.count));
                count = count.saturating_add(u32::try_from(bursts).unwrap_or(u32::MAX));
            }
        }
        self.delay -= dt;

        if count > 0 || self.is_alive() {
            Emission::Count(count)
        } else {
            Emission::Exhausted
        }
    }
}

// =============================================================================
// COMPOSITE
// =============================================================================

/// Several emitters combined into one.
///
/// Counts are summed. Children that report exhaustion are not polled again,
/// and the composite is exhausted once every child is.
#[derive(Default)]
pub struct EmitterComposite {
    emitters: Vec<(Box<dyn Emitter>, bool)>,
}

impl EmitterComposite {
    /// Create an empty composite. With no children it is already exhausted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an emitter, builder style.
    pub fn with(mut self, emitter: impl Emitter + 'static) -> Self {
        self.push(emitter);
        self
    }

    /// Add an emitter.
    pub fn push(&mut self, emitter: impl Emitter + 'static) {
        self.emitters.push((Box::new(emitter), true));
    }

    /// Number of children that have not reported exhaustion.
    pub fn alive_count(&self) -> usize {
        self.emitters.iter().filter(|(_, alive)| *alive).count()
    }

    /// Whether any child may still emit.
    pub fn is_alive(&self) -> bool {
        self.alive_count() > 0
    }
}

impl Emitter for EmitterComposite {
    fn emit(&mut self, dt: f32) -> Emission {
        let mut count = 0u32;
        for (emitter, alive) in self.emitters.iter_mut().filter(|(_, alive)| *alive) {
            match emitter.emit(dt) {
                Emission::Count(n) => count = count.saturating_add(n),
                Emission::Exhausted => *alive = false,
            }
        }

        if count > 0 || self.is_alive() {
            Emission::Count(count)
        } else {
            Emission::Exhausted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_rate() {
        let mut emitter = ConstantRate::new(10.0);
        assert_eq!(emitter.emit(5.0), Emission::Count(50));
        assert_eq!(emitter.emit(1.0), Emission::Count(10));
        assert_eq!(emitter.emit(1.5), Emission::Count(15));
        assert_eq!(emitter.emit(9.0), Emission::Count(90));
    }

    #[test]
    fn test_constant_rate_no_drift() {
        let mut emitter = ConstantRate::new(10.0);
        for _ in 0..5 {
            assert_eq!(emitter.emit(1.0), Emission::Count(10));
        }
    }

    #[test]
    fn test_constant_rate_carries_fraction() {
        let mut emitter = ConstantRate::new(3.0);
        // 0.75, 1.5, 2.25, 3.0
        let counts: Vec<u32> = (0..4).map(|_| emitter.emit(0.25).count()).collect();
        assert_eq!(counts, vec![0, 1, 1, 1]);
    }

    #[test]
    fn test_constant_rate_with_limit() {
        let mut emitter = ConstantRate::limited(10.0, 70);
        assert_eq!(emitter.emit(5.0), Emission::Count(50));
        assert_eq!(emitter.emit(1.0), Emission::Count(10));
        // Clamped to the remaining budget, never past it
        assert_eq!(emitter.emit(1.5), Emission::Count(10));
        assert_eq!(emitter.remaining(), Some(0));
        assert_eq!(emitter.emit(9.0), Emission::Exhausted);
    }

    #[test]
    fn test_constant_rate_zero_limit() {
        let mut emitter = ConstantRate::limited(10.0, 0);
        assert!(emitter.emit(1.0).is_exhausted());
    }

    #[test]
    fn test_single_burst() {
        let mut emitter = Burst::single(100, 10.0);
        assert_eq!(emitter.emit(5.2), Emission::Count(0));
        assert_eq!(emitter.emit(4.9), Emission::Count(100));
        assert_eq!(emitter.emit(0.1), Emission::Exhausted);
        assert_eq!(emitter.emit(100.0), Emission::Exhausted);
    }

    #[test]
    fn test_single_burst_immediate() {
        let mut emitter = Burst::single(1, 0.0);
        assert_eq!(emitter.emit(1.0), Emission::Count(1));
        assert!(!emitter.is_alive());
        assert_eq!(emitter.emit(1.0), Emission::Exhausted);
    }

    #[test]
    fn test_repeated_bursts() {
        let mut emitter = Burst::repeat(100, 10.0, 0.0).unwrap();
        assert_eq!(emitter.emit(5.2), Emission::Count(100));
        assert_eq!(emitter.emit(4.9), Emission::Count(100));
        assert_eq!(emitter.emit(22.0), Emission::Count(200));
        assert_eq!(emitter.emit(1.0), Emission::Count(0));
        assert_eq!(emitter.emit(22.0), Emission::Count(200));
        assert!(emitter.is_alive());
    }

    #[test]
    fn test_repeated_bursts_with_delay() {
        let mut emitter = Burst::repeat(100, 10.0, 6.0).unwrap();
        assert_eq!(emitter.emit(5.2), Emission::Count(0));
        assert_eq!(emitter.emit(4.9), Emission::Count(100));
        assert_eq!(emitter.emit(22.0), Emission::Count(200));
        assert_eq!(emitter.emit(1.0), Emission::Count(0));
        assert_eq!(emitter.emit(22.0), Emission::Count(200));
    }

    #[test]
    fn test_repeat_tiny_period_large_step() {
        // Periods far below the f32 resolution of dt are still counted
        let mut emitter = Burst::repeat(1, 0.001, 0.0).unwrap();
        let count = emitter.emit(100_000.0).count();
        assert!((99_999_990..=100_000_001).contains(&count), "{}", count);
        assert!(emitter.is_alive());

        let mut emitter = Burst::repeat(0, 0.000_01, 0.0).unwrap();
        assert_eq!(emitter.emit(1_000.0), Emission::Count(0));
    }

    #[test]
    fn test_repeat_large_step_matches_small_steps() {
        let mut coarse = Burst::repeat(3, 0.25, 0.5).unwrap();
        let mut fine = Burst::repeat(3, 0.25, 0.5).unwrap();
        let total: u32 = (0..40).map(|_| fine.emit(0.25).count()).sum();
        assert_eq!(coarse.emit(10.0).count(), total);
        assert_eq!(coarse.emit(0.25), fine.emit(0.25));
    }

    #[test]
    fn test_repeat_saturates_count() {
        let mut emitter = Burst::repeat(u32::MAX, 1.0, 0.0).unwrap();
        assert_eq!(emitter.emit(10.0), Emission::Count(u32::MAX));
    }

    #[test]
    fn test_repeat_rejects_zero_period() {
        assert_eq!(
            Burst::repeat(1, 0.0, 0.0).unwrap_err(),
            ConfigError::NonPositivePeriod(0.0)
        );
        assert!(Burst::repeat(1, f32::INFINITY, 0.0).is_err());
        assert!(Burst::repeat(1, f32::NAN, 0.0).is_err());
    }

    #[test]
    fn test_burst_spanning_schedule() {
        let mut emitter = Burst::new(vec![(1, 1.0), (2, 1.0), (4, 1.0)]);
        assert_eq!(emitter.emit(10.0), Emission::Count(7));
        assert_eq!(emitter.emit(0.0), Emission::Exhausted);
    }

    #[test]
    fn test_empty_schedule_is_exhausted() {
        let mut emitter = Burst::new(Vec::new());
        assert_eq!(emitter.emit(0.0), Emission::Exhausted);
    }

    #[test]
    fn test_invalid_delay_ends_schedule() {
        let mut emitter = Burst::new(vec![(5, 0.0), (5, -1.0), (5, 1.0)]);
        assert_eq!(emitter.emit(0.0), Emission::Count(5));
        assert_eq!(emitter.emit(5.0), Emission::Exhausted);
    }

    #[test]
    fn test_composite_two_bursts() {
        let mut emitter = EmitterComposite::new()
            .with(Burst::single(100, 10.0))
            .with(Burst::single(200, 20.0));
        assert_eq!(emitter.emit(5.0), Emission::Count(0));
        assert_eq!(emitter.emit(5.0), Emission::Count(100));
        assert!(emitter.is_alive());
        assert_eq!(emitter.emit(15.0), Emission::Count(200));
        assert_eq!(emitter.emit(1.0), Emission::Exhausted);
        assert_eq!(emitter.alive_count(), 0);
    }

    #[test]
    fn test_composite_push() {
        let mut emitter = EmitterComposite::new();
        emitter.push(Burst::single(100, 10.0));
        emitter.push(Burst::single(200, 20.0));
        assert_eq!(emitter.emit(5.0), Emission::Count(0));
        assert_eq!(emitter.emit(5.0), Emission::Count(100));
        assert_eq!(emitter.emit(15.0), Emission::Count(200));
        assert_eq!(emitter.emit(1.0), Emission::Exhausted);
    }

    #[test]
    fn test_composite_sums_streams() {
        let mut emitter = EmitterComposite::new()
            .with(ConstantRate::new(2.0))
            .with(ConstantRate::new(3.0));
        assert_eq!(emitter.emit(2.0), Emission::Count(10));
    }

    #[test]
    fn test_empty_composite_is_exhausted() {
        let mut emitter = EmitterComposite::new();
        assert_eq!(emitter.emit(1.0), Emission::Exhausted);
    }

    #[test]
    fn test_closure_emitter() {
        let mut calls = 0;
        let mut emitter = move |_dt: f32| {
            calls += 1;
            if calls > 2 {
                Emission::Exhausted
            } else {
                Emission::Count(calls)
            }
        };
        assert_eq!(emitter.emit(1.0), Emission::Count(1));
        assert_eq!(emitter.emit(1.0), Emission::Count(2));
        assert_eq!(emitter.emit(1.0), Emission::Exhausted);
    }

    fn assert_send<T: Send>() {}

    #[test]
    fn test_emitters_are_send() {
        assert_send::<ConstantRate>();
        assert_send::<Burst>();
        assert_send::<EmitterComposite>();
    }
}
