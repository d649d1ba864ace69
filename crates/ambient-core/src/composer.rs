//! Per-region background lifecycle.
//!
//! A [`BackgroundComposer`] owns everything one mounted region needs: its
//! resolved composition, a particle pool, a frame monitor and the mounted
//! effect instances. Lifecycle events are fed in by the host and every
//! transition that does not apply is ignored, so repeated or out-of-order
//! visibility callbacks are harmless.
//!
//! ```text
//! Dormant --enter--> Pending --visible--> Active --2 low windows--> Degraded
//!    ^                  |                   |                          |
//!    +------exit--------+-------exit--------+----------exit------------+
//! any --teardown--> TornDown
//! ```

use crate::catalog::{self, place_particle, Layout};
use crate::composition::*;
use crate::constants::*;
use crate::monitor::{PerformanceMonitor, PerformanceSample};
use crate::params::EffectParams;
use crate::pool::{ParticleId, ParticlePool, ParticleRecord};
use crate::primitive::Primitive;
use crate::probe::DeviceTier;
use instant::Instant;

/// Opaque id the host assigns to a page region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Dormant,
    Pending,
    Active,
    Degraded,
    TornDown,
}

impl Phase {
    /// Rendering and holding resources.
    #[inline]
    pub fn is_live(&self) -> bool {
        matches!(self, Phase::Active | Phase::Degraded)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComposerConfig {
    /// Overrides the tier's particle budget when set.
    pub pool_capacity: Option<usize>,
    /// Consecutive low-fps windows before degrading.
    pub degrade_after: u32,
    /// Base seed mixed with the region handle for layout randomness.
    pub seed: u64,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            pool_capacity: None,
            degrade_after: DEGRADE_AFTER_LOW_WINDOWS,
            seed: 42,
        }
    }
}

/// What the host should do after a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameOutcome {
    /// Schedule another frame callback for this region.
    pub rearm: bool,
    /// A measurement window closed on this frame.
    pub sample: Option<PerformanceSample>,
    /// The region degraded on this frame.
    pub degraded: bool,
}

#[derive(Debug)]
struct EffectInstance {
    params: EffectParams,
    seed: u64,
    particles: Vec<ParticleId>,
}

#[derive(Debug)]
pub struct BackgroundComposer {
    region: RegionHandle,
    spec: CompositionSpec,
    options: MountOptions,
    resolved: ResolvedComposition,
    config: ComposerConfig,
    phase: Phase,
    degraded: bool,
    low_streak: u32,
    seed: u64,
    pool: ParticlePool,
    monitor: PerformanceMonitor,
    effects: Vec<EffectInstance>,
    scene: Vec<Primitive>,
}

impl BackgroundComposer {
    pub fn new(
        region: RegionHandle,
        spec: CompositionSpec,
        options: MountOptions,
        tier: DeviceTier,
        config: ComposerConfig,
    ) -> Self {
        let resolved = spec.resolve(&tier, &options);
        let capacity = config.pool_capacity.unwrap_or(tier.particle_budget());
        let seed = config.seed ^ (region.0 as u64 + 1).wrapping_mul(SEED_MIX);
        log::debug!(
            "[composer] region {} resolved `{}` tier={:?} intensity={} animated={} effects={}",
            region.0,
            resolved.id,
            tier.level,
            resolved.intensity.id(),
            resolved.animated,
            resolved.effects.len()
        );
        Self {
            region,
            spec,
            options,
            resolved,
            config,
            phase: Phase::Dormant,
            degraded: false,
            low_streak: 0,
            seed,
            pool: ParticlePool::new(capacity),
            monitor: PerformanceMonitor::new(format!("region {}", region.0)),
            effects: Vec::new(),
            scene: Vec::new(),
        }
    }

    /// Convenience constructor resolving a composition by name.
    pub fn for_name(
        region: RegionHandle,
        name: &str,
        options: MountOptions,
        tier: DeviceTier,
    ) -> Self {
        Self::new(
            region,
            CompositionSpec::lookup(name),
            options,
            tier,
            ComposerConfig::default(),
        )
    }

    // ---------------- lifecycle events ----------------

    /// The region came within the proximity margin of the viewport.
    pub fn on_proximity_enter(&mut self) {
        if self.phase == Phase::Dormant {
            self.phase = Phase::Pending;
            log::debug!("[composer] region {} pending", self.region.0);
        }
    }

    /// The region left the proximity margin: give back everything it holds.
    pub fn on_proximity_exit(&mut self) {
        match self.phase {
            Phase::Pending => self.phase = Phase::Dormant,
            Phase::Active | Phase::Degraded => {
                self.deactivate();
                self.phase = Phase::Dormant;
                log::debug!("[composer] region {} dormant", self.region.0);
            }
            Phase::Dormant | Phase::TornDown => {}
        }
    }

    /// Visibility confirmed. Activation always passes through pending, so a
    /// dormant region that is already visible (the host saw it before any
    /// proximity event) enters pending first and then activates.
    pub fn confirm_visible(&mut self, now: Instant) {
        if self.phase == Phase::Dormant {
            self.on_proximity_enter();
        }
        if self.phase == Phase::Pending {
            self.activate(now);
        }
    }

    /// Terminal: releases all particles and stops the monitor.
    pub fn teardown(&mut self) {
        if self.phase == Phase::TornDown {
            return;
        }
        self.deactivate();
        self.pool.reset_all();
        self.phase = Phase::TornDown;
        log::debug!("[composer] region {} torn down", self.region.0);
    }

    /// Drive one animation frame. Only live, animated regions are re-armed.
    pub fn frame(&mut self, now: Instant) -> FrameOutcome {
        if !self.phase.is_live() || !self.monitor.is_running() {
            return FrameOutcome::default();
        }
        let sample = self.monitor.record_frame(now);
        let mut degraded = false;
        if let Some(s) = &sample {
            if s.low_fps {
                self.low_streak += 1;
            } else {
                self.low_streak = 0;
            }
            if self.phase == Phase::Active && self.low_streak >= self.config.degrade_after.max(1)
            {
                self.degrade();
                degraded = true;
            }
        }
        FrameOutcome {
            rearm: self.monitor.is_running(),
            sample,
            degraded,
        }
    }

    /// Re-resolve for a new device tier. Live regions are remounted with the
    /// new parameters; the degraded flag survives.
    pub fn retier(&mut self, tier: DeviceTier, now: Instant) {
        if self.phase == Phase::TornDown || tier == self.resolved.tier {
            return;
        }
        let was_live = self.phase.is_live();
        if was_live {
            self.deactivate();
        }
        self.resolved = self.spec.resolve(&tier, &self.options);
        let capacity = self.config.pool_capacity.unwrap_or(tier.particle_budget());
        self.pool = ParticlePool::new(capacity);
        log::info!(
            "[composer] region {} retiered to {:?} (pool {})",
            self.region.0,
            tier.level,
            capacity
        );
        if was_live {
            self.activate(now);
        }
    }

    // ---------------- queries ----------------

    pub fn region(&self) -> RegionHandle {
        self.region
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn resolved(&self) -> &ResolvedComposition {
        &self.resolved
    }

    pub fn is_animated(&self) -> bool {
        self.resolved.animated
    }

    /// Effective intensity, one step lower once degraded.
    pub fn intensity(&self) -> Intensity {
        if self.degraded {
            self.resolved.intensity.step_down()
        } else {
            self.resolved.intensity
        }
    }

    pub fn intensity_style(&self) -> IntensityStyle {
        self.intensity().style()
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn monitor(&self) -> &PerformanceMonitor {
        &self.monitor
    }

    /// Particles currently held by this region's effects.
    pub fn held_particles(&self) -> usize {
        self.effects.iter().map(|e| e.particles.len()).sum()
    }

    /// Primitives of every mounted effect, in composition order. Empty unless live.
    pub fn primitives(&self) -> &[Primitive] {
        &self.scene
    }

    // ---------------- internals ----------------

    fn activate(&mut self, now: Instant) {
        let effects = self.resolved.effects.clone();
        for (i, params) in effects.into_iter().enumerate() {
            let params = if self.degraded {
                params.with_particle_factor(DEGRADED_PARTICLE_FACTOR)
            } else {
                params
            };
            let seed = self.seed ^ (i as u64 + 1).wrapping_mul(SEED_MIX).rotate_left(17);
            let particles = self.acquire_particles(&params, seed);
            self.effects.push(EffectInstance {
                params,
                seed,
                particles,
            });
        }
        if self.resolved.animated {
            self.monitor.start_at(now);
        }
        self.phase = if self.degraded {
            Phase::Degraded
        } else {
            Phase::Active
        };
        self.rebuild_scene();
        log::info!(
            "[composer] region {} active `{}`: {} primitives, {} particles",
            self.region.0,
            self.resolved.id,
            self.scene.len(),
            self.pool.active_count()
        );
    }

    fn acquire_particles(&mut self, params: &EffectParams, seed: u64) -> Vec<ParticleId> {
        let EffectParams::Particles(p) = params else {
            return Vec::new();
        };
        let wanted = params.particle_demand();
        let mut ids = Vec::with_capacity(wanted);
        for index in 0..wanted {
            let Some(record) = self.pool.acquire() else {
                log::debug!(
                    "[pool] region {} exhausted: {}/{} particles",
                    self.region.0,
                    ids.len(),
                    wanted
                );
                break;
            };
            place_particle(record, p, seed, index);
            ids.push(record.id);
        }
        ids
    }

    fn deactivate(&mut self) {
        for effect in self.effects.drain(..) {
            for id in effect.particles {
                self.pool.release(id);
            }
        }
        self.scene.clear();
        self.monitor.stop();
        self.low_streak = 0;
    }

    fn degrade(&mut self) {
        self.degraded = true;
        self.phase = Phase::Degraded;
        for effect in &mut self.effects {
            if !effect.params.kind().uses_pool() {
                continue;
            }
            effect.params = effect.params.with_particle_factor(DEGRADED_PARTICLE_FACTOR);
            let keep = effect.params.particle_demand();
            while effect.particles.len() > keep {
                if let Some(id) = effect.particles.pop() {
                    self.pool.release(id);
                }
            }
        }
        self.rebuild_scene();
        log::warn!(
            "[composer] region {} degraded after sustained low fps: intensity {} -> {}, {} particles",
            self.region.0,
            self.resolved.intensity.id(),
            self.intensity().id(),
            self.pool.active_count()
        );
    }

    fn rebuild_scene(&mut self) {
        self.scene.clear();
        let mut held: Vec<ParticleRecord> = Vec::new();
        for effect in &self.effects {
            held.clear();
            held.extend(effect.particles.iter().filter_map(|&id| self.pool.get(id).copied()));
            let layout = Layout {
                seed: effect.seed,
                particles: &held,
            };
            self.scene
                .extend(catalog::render(&effect.params, self.resolved.animated, &layout));
        }
    }
}
