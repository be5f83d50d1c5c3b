//! Integration tests for particle systems.
//!
//! These drive complete systems through the public API and check the
//! simulation-level guarantees: conservation, culling, emission exactness,
//! the particle cap and the terminal state.

use kindle::prelude::*;
use proptest::prelude::*;

fn moving(dx: f32, dy: f32, life: f32) -> Particle {
    Particle::new(0.0, 0.0).with_velocity(dx, dy).with_life(life)
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn test_single_particle_lifecycle() {
    let mut system: ParticleSystem = ParticleSystem::new(
        Particle::new(0.0, -1.0).with_velocity(1.0, 0.0).with_life(3.0),
        Burst::single(1, 0.0),
    )
    .with_physics(Inertia);

    system.update(1.0);
    assert_eq!(system.len(), 1);
    let p = system.particles()[0];
    assert_eq!((p.x, p.y, p.life), (1.0, -1.0, 2.0));

    system.update(1.0);
    assert_eq!(system.len(), 1);
    let p = system.particles()[0];
    assert_eq!((p.x, p.y, p.life), (2.0, -1.0, 1.0));

    system.update(1.0);
    assert!(system.is_empty());
    assert!(!system.is_alive());
}

// ============================================================================
// Lifetime
// ============================================================================

#[test]
fn test_particle_removed_when_life_runs_out() {
    let mut system: ParticleSystem = ParticleSystem::new(moving(0.0, 0.0, 2.5), Burst::single(1, 0.0));

    system.update(1.0);
    assert_eq!(system.len(), 1);
    system.update(1.0);
    assert_eq!(system.len(), 1);
    system.update(1.0);
    assert!(system.is_empty());
}

#[test]
fn test_removed_particles_are_not_drawn() {
    let mut system: ParticleSystem<Vec<Particle>> =
        ParticleSystem::new(moving(1.0, 0.0, 1.0), Burst::single(2, 0.0))
            .with_artist(|canvas: &mut Vec<Particle>, p: &Particle| canvas.push(*p));

    let mut canvas = Vec::new();
    system.update(0.5);
    system.draw(&mut canvas);
    assert_eq!(canvas.len(), 2);

    canvas.clear();
    system.update(0.5);
    system.draw(&mut canvas);
    assert!(canvas.is_empty());
}

// ============================================================================
// Emission
// ============================================================================

#[test]
fn test_constant_rate_half_steps() {
    let mut emitter = ConstantRate::new(10.0);
    let total: u32 = (0..10).map(|_| emitter.emit(0.5).count()).sum();
    assert_eq!(total, 50);
}

#[test]
fn test_burst_crossing_threshold() {
    let mut emitter = Burst::single(100, 10.0);
    for _ in 0..9 {
        assert_eq!(emitter.emit(1.0), Emission::Count(0));
    }
    assert_eq!(emitter.emit(1.0), Emission::Count(100));
    assert_eq!(emitter.emit(1.0), Emission::Exhausted);

    // One large step over the threshold
    let mut emitter = Burst::single(100, 10.0);
    assert_eq!(emitter.emit(3.0), Emission::Count(0));
    assert_eq!(emitter.emit(50.0), Emission::Count(100));
    assert!(emitter.emit(1.0).is_exhausted());
}

#[test]
fn test_composite_alive_until_all_children_exhausted() {
    let mut system: ParticleSystem = ParticleSystem::new(
        moving(0.0, 0.0, 1.5),
        EmitterComposite::new()
            .with(Burst::single(3, 5.0))
            .with(Burst::single(4, 10.0)),
    );

    let mut spawned = Vec::new();
    for _ in 0..12 {
        system.update(1.0);
        spawned.push(system.len());
        if system.is_emitting() {
            assert!(system.is_alive());
        }
    }
    // First burst at t=5, second at t=10, each surviving one update
    assert_eq!(spawned[4], 3);
    assert_eq!(spawned[9], 4);
    assert!(!system.is_emitting());
    assert!(!system.is_alive());
}

// ============================================================================
// Terminal state
// ============================================================================

#[test]
fn test_terminal_transition_happens_once() {
    let mut system: ParticleSystem = ParticleSystem::new(moving(0.0, 0.0, 2.0), Burst::single(5, 1.0));

    let mut history = Vec::new();
    for _ in 0..8 {
        system.update(1.0);
        history.push(system.is_alive());
    }
    let transitions = history.windows(2).filter(|w| w[0] && !w[1]).count();
    assert_eq!(transitions, 1);
    assert!(!history.last().copied().unwrap_or(true));
    assert!(history.windows(2).all(|w| w[0] || !w[1]), "revived: {:?}", history);
}

#[test]
fn test_inertia_uneven_split() {
    let origin = moving(3.0, -7.0, 2.0);
    let mut tenths: ParticleSystem = ParticleSystem::new(origin, Burst::single(1, 0.0));
    let mut whole: ParticleSystem = ParticleSystem::new(origin, Burst::single(1, 0.0));

    for _ in 0..10 {
        tenths.update(0.1);
    }
    whole.update(1.0);

    let (a, b) = (tenths.particles()[0], whole.particles()[0]);
    assert!((a.x - b.x).abs() < 1e-4, "{} vs {}", a.x, b.x);
    assert!((a.y - b.y).abs() < 1e-4, "{} vs {}", a.y, b.y);
    assert!((a.life - b.life).abs() < 1e-5, "{} vs {}", a.life, b.life);
}

// ============================================================================
// Threads
// ============================================================================

#[test]
fn test_system_runs_on_worker_thread() {
    let emitter = Burst::repeat(2, 1.0, 0.0).unwrap();
    let mut system: ParticleSystem = ParticleSystem::new(moving(1.0, 0.0, 5.0), emitter)
        .with_launcher(Jitter::with_sampler(
            Attributes::velocity(1.0, 1.0),
            Brownian::seeded(4),
        ))
        .with_physics(
            PhysicsComposite::new()
                .with(Inertia)
                .with(Acceleration::new(0.0, 10.0)),
        );

    let worker = std::thread::spawn(move || {
        for _ in 0..3 {
            system.update(1.0);
        }
        system
    });
    let system = worker.join().unwrap();
    // Bursts at t = 0, 1, 2, 3 all fall inside the three updates
    assert_eq!(system.len(), 8);
    assert!(system.is_alive());
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn inertia_is_additive(
        dx in -100.0f32..100.0,
        dy in -100.0f32..100.0,
        steps in prop::collection::vec(prop::sample::select(vec![0.125f32, 0.25, 0.5, 1.0]), 1..20)
    ) {
        let total: f32 = steps.iter().sum();
        let mut system: ParticleSystem =
            ParticleSystem::new(moving(dx, dy, total + 1.0), Burst::single(1, 0.0));
        for dt in &steps {
            system.update(*dt);
        }

        prop_assert_eq!(system.len(), 1);
        let p = system.particles()[0];
        let tolerance = 1e-3 * (1.0 + dx.abs().max(dy.abs()) * total);
        prop_assert!((p.x - dx * total).abs() <= tolerance);
        prop_assert!((p.y - dy * total).abs() <= tolerance);
        prop_assert!((p.life - 1.0).abs() <= 1e-4);
    }

    #[test]
    fn constant_rate_keeps_the_remainder(
        rate in 0.5f32..200.0,
        frames in 1usize..300
    ) {
        let dt = 1.0 / 64.0;
        let mut emitter = ConstantRate::new(rate);
        let total: u64 = (0..frames).map(|_| emitter.emit(dt).count() as u64).sum();
        let expected = (rate * dt * frames as f32) as f64;
        prop_assert!((total as f64 - expected).abs() <= 1.01, "{} vs {}", total, expected);
    }

    #[test]
    fn particle_cap_is_never_exceeded(
        limit in 0usize..64,
        rate in 1.0f32..500.0,
        frames in 1usize..30
    ) {
        let mut system: ParticleSystem =
            ParticleSystem::new(moving(0.0, 0.0, 100.0), ConstantRate::new(rate))
                .with_particle_limit(limit);
        for _ in 0..frames {
            system.update(0.25);
            prop_assert!(system.len() <= limit);
        }
    }
}
