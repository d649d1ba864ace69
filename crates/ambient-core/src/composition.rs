//! Named composition presets and their resolution for a device tier.
//!
//! The catalog is closed: seven named presets plus a fallback used for any
//! name that is not recognised.

use crate::error::AmbientError;
use crate::params::*;
use crate::probe::DeviceTier;
use smallvec::{smallvec, SmallVec};
use std::str::FromStr;

pub type EffectList = SmallVec<[EffectParams; 4]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Intensity {
    Low,
    Medium,
    High,
}

/// Layer-wide opacity and blur radius (CSS pixels) for an intensity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntensityStyle {
    pub opacity: f32,
    pub blur_radius: f32,
}

impl Intensity {
    pub fn style(&self) -> IntensityStyle {
        match self {
            Intensity::Low => IntensityStyle {
                opacity: 0.3,
                blur_radius: 40.0,
            },
            Intensity::Medium => IntensityStyle {
                opacity: 0.5,
                blur_radius: 60.0,
            },
            Intensity::High => IntensityStyle {
                opacity: 0.7,
                blur_radius: 80.0,
            },
        }
    }

    /// One step lower; `Low` stays `Low`.
    pub fn step_down(&self) -> Self {
        match self {
            Intensity::High => Intensity::Medium,
            Intensity::Medium | Intensity::Low => Intensity::Low,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }
}

impl FromStr for Intensity {
    type Err = AmbientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Intensity::Low),
            "medium" => Ok(Intensity::Medium),
            "high" => Ok(Intensity::High),
            _ => Err(AmbientError::UnknownIntensity(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    Grid,
    Particles,
    Gradient,
    Circuit,
    Minimal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompositionName {
    Hero,
    Features,
    About,
    Technical,
    Cta,
    Content,
    Dashboard,
}

impl CompositionName {
    pub const ALL: [CompositionName; 7] = [
        CompositionName::Hero,
        CompositionName::Features,
        CompositionName::About,
        CompositionName::Technical,
        CompositionName::Cta,
        CompositionName::Content,
        CompositionName::Dashboard,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            CompositionName::Hero => "hero",
            CompositionName::Features => "features",
            CompositionName::About => "about",
            CompositionName::Technical => "technical",
            CompositionName::Cta => "cta",
            CompositionName::Content => "content",
            CompositionName::Dashboard => "dashboard",
        }
    }
}

impl FromStr for CompositionName {
    type Err = AmbientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_ascii_lowercase();
        CompositionName::ALL
            .into_iter()
            .find(|n| n.id() == id)
            .ok_or_else(|| AmbientError::UnknownComposition(s.to_string()))
    }
}

/// Caller overrides supplied at mount time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MountOptions {
    pub intensity: Option<Intensity>,
    pub animated: Option<bool>,
}

impl MountOptions {
    /// Build from loosely typed host input. An unknown intensity keeps the
    /// preset's own intensity.
    pub fn from_host(intensity: Option<&str>, animated: Option<bool>) -> Self {
        let intensity = intensity.and_then(|s| match s.parse::<Intensity>() {
            Ok(i) => Some(i),
            Err(e) => {
                log::warn!("[composition] {e}; keeping preset intensity");
                None
            }
        });
        Self {
            intensity,
            animated,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompositionSpec {
    /// `None` for the fallback composition.
    pub name: Option<CompositionName>,
    pub variant: Variant,
    pub intensity: Intensity,
    pub effects: EffectList,
}

impl CompositionSpec {
    pub fn preset(name: CompositionName) -> Self {
        let (variant, intensity, effects): (Variant, Intensity, EffectList) = match name {
            CompositionName::Hero => (
                Variant::Particles,
                Intensity::High,
                smallvec![
                    EffectParams::GradientOverlay(GradientParams::default()),
                    EffectParams::Grid(GridParams {
                        cell_size: 60.0,
                        ..Default::default()
                    }),
                    EffectParams::Particles(ParticleParams {
                        count: 40,
                        ..Default::default()
                    }),
                    EffectParams::GlowOrbs(GlowOrbParams::default()),
                ],
            ),
            CompositionName::Features => (
                Variant::Grid,
                Intensity::Medium,
                smallvec![
                    EffectParams::Grid(GridParams {
                        cell_size: 40.0,
                        scan_lines: 1,
                        ..Default::default()
                    }),
                    EffectParams::DotMatrix(DotMatrixParams::default()),
                    EffectParams::GlowOrbs(GlowOrbParams {
                        orb_count: 2,
                        ..Default::default()
                    }),
                ],
            ),
            CompositionName::About => (
                Variant::Gradient,
                Intensity::Medium,
                smallvec![
                    EffectParams::GradientOverlay(GradientParams {
                        angle_deg: 135.0,
                        ..Default::default()
                    }),
                    EffectParams::FlowLines(FlowLineParams {
                        line_count: 5,
                        ..Default::default()
                    }),
                    EffectParams::Grain(GrainParams::default()),
                ],
            ),
            CompositionName::Technical => (
                Variant::Circuit,
                Intensity::High,
                smallvec![
                    EffectParams::Circuit(CircuitParams::default()),
                    EffectParams::Grid(GridParams {
                        cell_size: 32.0,
                        line_opacity: 0.05,
                        ..Default::default()
                    }),
                    EffectParams::Waveform(WaveformParams::default()),
                ],
            ),
            CompositionName::Cta => (
                Variant::Gradient,
                Intensity::High,
                smallvec![
                    EffectParams::GradientOverlay(GradientParams {
                        opacity: 0.6,
                        ..Default::default()
                    }),
                    EffectParams::GlowOrbs(GlowOrbParams::default()),
                    EffectParams::Particles(ParticleParams {
                        count: 24,
                        connection_distance: 0.0,
                        ..Default::default()
                    }),
                ],
            ),
            CompositionName::Content => (
                Variant::Minimal,
                Intensity::Low,
                smallvec![
                    EffectParams::Grain(GrainParams::default()),
                    EffectParams::Grid(GridParams {
                        cell_size: 80.0,
                        line_opacity: 0.04,
                        scan_lines: 0,
                        ..Default::default()
                    }),
                ],
            ),
            CompositionName::Dashboard => (
                Variant::Grid,
                Intensity::Low,
                smallvec![
                    EffectParams::DotMatrix(DotMatrixParams {
                        twinkle_ratio: 0.1,
                        ..Default::default()
                    }),
                    EffectParams::Waveform(WaveformParams {
                        wave_count: 2,
                        amplitude: 4.0,
                        ..Default::default()
                    }),
                ],
            ),
        };
        Self {
            name: Some(name),
            variant,
            intensity,
            effects,
        }
    }

    /// Used for any unrecognised name: a plain grid at medium intensity.
    pub fn fallback() -> Self {
        Self {
            name: None,
            variant: Variant::Grid,
            intensity: Intensity::Medium,
            effects: smallvec![EffectParams::Grid(GridParams::default())],
        }
    }

    pub fn lookup(name: &str) -> Self {
        match name.parse::<CompositionName>() {
            Ok(n) => Self::preset(n),
            Err(e) => {
                log::warn!("[composition] {e}; mounting default grid");
                Self::fallback()
            }
        }
    }

    pub fn id(&self) -> &'static str {
        self.name.map(|n| n.id()).unwrap_or("default")
    }

    /// Concrete parameters for `tier` with caller overrides applied.
    pub fn resolve(&self, tier: &DeviceTier, options: &MountOptions) -> ResolvedComposition {
        ResolvedComposition {
            id: self.id(),
            variant: self.variant,
            intensity: options.intensity.unwrap_or(self.intensity),
            animated: options.animated.unwrap_or(true) && tier.allows_motion(),
            effects: self.effects.iter().map(|e| e.scaled_for(tier)).collect(),
            tier: *tier,
        }
    }
}

/// A composition fixed for one device tier. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedComposition {
    pub id: &'static str,
    pub variant: Variant,
    pub intensity: Intensity,
    pub animated: bool,
    pub effects: EffectList,
    pub tier: DeviceTier,
}

impl ResolvedComposition {
    pub fn particle_demand(&self) -> usize {
        self.effects.iter().map(|e| e.particle_demand()).sum()
    }
}
