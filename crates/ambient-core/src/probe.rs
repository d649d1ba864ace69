//! Device capability probing.
//!
//! Raw environment signals are read through a [`SignalSource`] and collapsed
//! into a coarse [`DeviceTier`]. The derivation is a pure function of the
//! signals so the same inputs always produce the same tier.

use crate::constants::*;

/// Raw signals as reported by the host environment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvironmentSignals {
    pub viewport_width: f64,
    pub prefers_reduced_motion: bool,
    /// `None` when the host has no power-state API.
    pub low_power: Option<bool>,
}

/// Low power means discharging below [`LOW_BATTERY_LEVEL`]. Missing fields
/// leave the answer unknown.
#[inline]
pub fn battery_is_low(charging: Option<bool>, level: Option<f64>) -> Option<bool> {
    match (charging, level) {
        (Some(true), _) => Some(false),
        (Some(false), Some(level)) => Some(level < LOW_BATTERY_LEVEL),
        _ => None,
    }
}

impl Default for EnvironmentSignals {
    fn default() -> Self {
        Self {
            viewport_width: WIDE_MIN_WIDTH,
            prefers_reduced_motion: false,
            low_power: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TierLevel {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidthClass {
    Narrow,
    Mid,
    Wide,
}

impl WidthClass {
    #[inline]
    pub fn of(width: f64) -> Self {
        // NaN and negative widths count as narrow
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        if width < NARROW_MAX_WIDTH {
            WidthClass::Narrow
        } else if width < WIDE_MIN_WIDTH {
            WidthClass::Mid
        } else {
            WidthClass::Wide
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceTier {
    pub level: TierLevel,
    pub is_narrow_viewport: bool,
    pub prefers_reduced_motion: bool,
    pub is_low_power: bool,
}

impl DeviceTier {
    pub fn from_signals(signals: &EnvironmentSignals) -> Self {
        let width_class = WidthClass::of(signals.viewport_width);
        let is_narrow_viewport = width_class == WidthClass::Narrow;
        let level = if is_narrow_viewport || signals.prefers_reduced_motion {
            TierLevel::Low
        } else if width_class == WidthClass::Mid {
            TierLevel::Medium
        } else {
            TierLevel::High
        };
        Self {
            level,
            is_narrow_viewport,
            prefers_reduced_motion: signals.prefers_reduced_motion,
            is_low_power: signals.low_power.unwrap_or(false),
        }
    }

    /// Multiplier applied to particle-like counts.
    pub fn particle_scale(&self) -> f32 {
        match self.level {
            TierLevel::High => PARTICLE_SCALE_HIGH,
            TierLevel::Medium => PARTICLE_SCALE_MEDIUM,
            TierLevel::Low => PARTICLE_SCALE_LOW,
        }
    }

    /// Multiplier applied to cell sizes; larger cells mean fewer tiles.
    pub fn cell_scale(&self) -> f32 {
        match self.level {
            TierLevel::High => CELL_SCALE_HIGH,
            TierLevel::Medium => CELL_SCALE_MEDIUM,
            TierLevel::Low => CELL_SCALE_LOW,
        }
    }

    /// Pool capacity for one region at this tier.
    pub fn particle_budget(&self) -> usize {
        let base = match self.level {
            TierLevel::High => POOL_BUDGET_HIGH,
            TierLevel::Medium => POOL_BUDGET_MEDIUM,
            TierLevel::Low => POOL_BUDGET_LOW,
        };
        if self.is_low_power {
            (base as f32 * LOW_POWER_BUDGET_FACTOR) as usize
        } else {
            base
        }
    }

    /// Motion is disabled outright when the user asked for reduced motion.
    #[inline]
    pub fn allows_motion(&self) -> bool {
        !self.prefers_reduced_motion
    }
}

impl Default for DeviceTier {
    fn default() -> Self {
        Self::from_signals(&EnvironmentSignals::default())
    }
}

/// Anything that can report the current environment signals.
pub trait SignalSource {
    fn read(&self) -> EnvironmentSignals;
}

/// Fixed signals, used by the simulator and in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticSignals(pub EnvironmentSignals);

impl SignalSource for StaticSignals {
    fn read(&self) -> EnvironmentSignals {
        self.0
    }
}

pub struct CapabilityProbe<S: SignalSource> {
    source: S,
}

impl<S: SignalSource> CapabilityProbe<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn probe(&self) -> DeviceTier {
        let signals = self.source.read();
        let tier = DeviceTier::from_signals(&signals);
        log::debug!(
            "[probe] width={:.0} reduced_motion={} low_power={:?} -> {:?}",
            signals.viewport_width,
            signals.prefers_reduced_motion,
            signals.low_power,
            tier.level
        );
        tier
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
