//! Per-effect parameter records.
//!
//! Every record has a usable `Default`, and `sanitized()` clamps any field to
//! its safe range, counts included at both ends. Counts are signed so that bad host input (a negative row
//! count, say) is representable and can be clamped instead of rejected.

use crate::constants::*;
use crate::error::AmbientError;
use crate::probe::{DeviceTier, TierLevel};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Grid,
    Particles,
    FlowLines,
    GlowOrbs,
    Circuit,
    Waveform,
    DotMatrix,
    Grain,
    GradientOverlay,
}

impl EffectKind {
    pub const ALL: [EffectKind; 9] = [
        EffectKind::Grid,
        EffectKind::Particles,
        EffectKind::FlowLines,
        EffectKind::GlowOrbs,
        EffectKind::Circuit,
        EffectKind::Waveform,
        EffectKind::DotMatrix,
        EffectKind::Grain,
        EffectKind::GradientOverlay,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            EffectKind::Grid => "grid",
            EffectKind::Particles => "particles",
            EffectKind::FlowLines => "flow-lines",
            EffectKind::GlowOrbs => "glow-orbs",
            EffectKind::Circuit => "circuit",
            EffectKind::Waveform => "waveform",
            EffectKind::DotMatrix => "dot-matrix",
            EffectKind::Grain => "grain",
            EffectKind::GradientOverlay => "gradient-overlay",
        }
    }

    /// Parse an id, falling back to [`EffectKind::Grid`] for anything unknown.
    pub fn from_id(id: &str) -> Self {
        id.parse().unwrap_or_else(|e: AmbientError| {
            log::warn!("[catalog] {e}; using grid");
            EffectKind::Grid
        })
    }

    /// Whether instances of this kind draw their dots from the particle pool.
    #[inline]
    pub fn uses_pool(&self) -> bool {
        matches!(self, EffectKind::Particles)
    }
}

impl FromStr for EffectKind {
    type Err = AmbientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_ascii_lowercase();
        EffectKind::ALL
            .into_iter()
            .find(|k| k.id() == id || k.id().replace('-', "_") == id)
            .ok_or_else(|| AmbientError::UnknownEffect(s.to_string()))
    }
}

#[inline]
fn count_in(v: i32, min: i32, max: i32) -> i32 {
    v.clamp(min, max)
}

#[inline]
fn finite_at_least(v: f32, min: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v.max(min)
    } else {
        fallback.max(min)
    }
}

#[inline]
fn unit(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        fallback
    }
}

#[inline]
fn scale_count(n: i32, factor: f32, min: i32) -> i32 {
    ((n as f32 * factor).round() as i32).max(min)
}

/// Sort a `(min, max)` pair and floor both ends.
#[inline]
fn ordered_range(lo: f32, hi: f32, floor: f32, fallback: (f32, f32)) -> (f32, f32) {
    let lo = finite_at_least(lo, floor, fallback.0);
    let hi = finite_at_least(hi, floor, fallback.1);
    if lo <= hi {
        (lo, hi)
    } else {
        (hi, lo)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridParams {
    pub cell_size: f32,
    pub line_opacity: f32,
    pub fade_edges: bool,
    pub scan_lines: i32,
    pub scan_duration: f32,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            cell_size: 50.0,
            line_opacity: 0.08,
            fade_edges: true,
            scan_lines: 2,
            scan_duration: 8.0,
        }
    }
}

impl GridParams {
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        Self {
            cell_size: finite_at_least(self.cell_size, 8.0, d.cell_size),
            line_opacity: unit(self.line_opacity, d.line_opacity),
            fade_edges: self.fade_edges,
            scan_lines: count_in(self.scan_lines, 0, MAX_GRID_SCAN_LINES),
            scan_duration: finite_at_least(self.scan_duration, 1.0, d.scan_duration),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleParams {
    pub count: i32,
    pub min_size: f32,
    pub max_size: f32,
    /// Particles closer than this (layout units) are joined by a line; zero disables.
    pub connection_distance: f32,
    pub min_duration: f32,
    pub max_duration: f32,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            count: 30,
            min_size: 1.0,
            max_size: 3.0,
            connection_distance: 15.0,
            min_duration: 10.0,
            max_duration: 25.0,
        }
    }
}

impl ParticleParams {
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let (min_size, max_size) =
            ordered_range(self.min_size, self.max_size, 0.1, (d.min_size, d.max_size));
        let (min_duration, max_duration) = ordered_range(
            self.min_duration,
            self.max_duration,
            1.0,
            (d.min_duration, d.max_duration),
        );
        Self {
            count: count_in(self.count, 0, MAX_PARTICLES),
            min_size,
            max_size,
            connection_distance: finite_at_least(self.connection_distance, 0.0, 0.0),
            min_duration,
            max_duration,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowLineParams {
    pub line_count: i32,
    pub amplitude: f32,
    pub segments: i32,
    pub duration: f32,
}

impl Default for FlowLineParams {
    fn default() -> Self {
        Self {
            line_count: 6,
            amplitude: 8.0,
            segments: 24,
            duration: 12.0,
        }
    }
}

impl FlowLineParams {
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        Self {
            line_count: count_in(self.line_count, 1, MAX_EFFECT_ITEMS),
            amplitude: finite_at_least(self.amplitude, 0.0, d.amplitude),
            segments: count_in(self.segments, 2, MAX_PATH_POINTS),
            duration: finite_at_least(self.duration, 1.0, d.duration),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowOrbParams {
    pub orb_count: i32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub drift: f32,
    pub duration: f32,
}

impl Default for GlowOrbParams {
    fn default() -> Self {
        Self {
            orb_count: 3,
            min_radius: 15.0,
            max_radius: 30.0,
            drift: 5.0,
            duration: 18.0,
        }
    }
}

impl GlowOrbParams {
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let (min_radius, max_radius) =
            ordered_range(self.min_radius, self.max_radius, 1.0, (d.min_radius, d.max_radius));
        Self {
            orb_count: count_in(self.orb_count, 1, MAX_EFFECT_ITEMS),
            min_radius,
            max_radius,
            drift: finite_at_least(self.drift, 0.0, d.drift),
            duration: finite_at_least(self.duration, 1.0, d.duration),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircuitParams {
    pub rows: i32,
    pub cols: i32,
    pub trace_density: f32,
    pub node_radius: f32,
    pub pulse_count: i32,
    pub pulse_duration: f32,
}

impl Default for CircuitParams {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 12,
            trace_density: 0.35,
            node_radius: 0.6,
            pulse_count: 4,
            pulse_duration: 3.0,
        }
    }
}

impl CircuitParams {
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        Self {
            rows: count_in(self.rows, 1, MAX_MATRIX_SIDE),
            cols: count_in(self.cols, 1, MAX_MATRIX_SIDE),
            trace_density: unit(self.trace_density, d.trace_density),
            node_radius: finite_at_least(self.node_radius, 0.1, d.node_radius),
            pulse_count: count_in(self.pulse_count, 0, MAX_EFFECT_ITEMS),
            pulse_duration: finite_at_least(self.pulse_duration, 0.5, d.pulse_duration),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveformParams {
    pub wave_count: i32,
    pub amplitude: f32,
    pub frequency: f32,
    pub points: i32,
    pub duration: f32,
}

impl Default for WaveformParams {
    fn default() -> Self {
        Self {
            wave_count: 3,
            amplitude: 6.0,
            frequency: 2.0,
            points: 48,
            duration: 6.0,
        }
    }
}

impl WaveformParams {
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        Self {
            wave_count: count_in(self.wave_count, 1, MAX_EFFECT_ITEMS),
            amplitude: finite_at_least(self.amplitude, 0.0, d.amplitude),
            frequency: finite_at_least(self.frequency, 0.1, d.frequency),
            points: count_in(self.points, 4, MAX_PATH_POINTS),
            duration: finite_at_least(self.duration, 1.0, d.duration),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotMatrixParams {
    pub rows: i32,
    pub cols: i32,
    pub dot_radius: f32,
    pub twinkle_ratio: f32,
}

impl Default for DotMatrixParams {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 16,
            dot_radius: 0.35,
            twinkle_ratio: 0.2,
        }
    }
}

impl DotMatrixParams {
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        Self {
            rows: count_in(self.rows, 1, MAX_MATRIX_SIDE),
            cols: count_in(self.cols, 1, MAX_MATRIX_SIDE),
            dot_radius: finite_at_least(self.dot_radius, 0.05, d.dot_radius),
            twinkle_ratio: unit(self.twinkle_ratio, d.twinkle_ratio),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrainParams {
    pub opacity: f32,
    pub tile_size: f32,
}

impl Default for GrainParams {
    fn default() -> Self {
        Self {
            opacity: 0.04,
            tile_size: 128.0,
        }
    }
}

impl GrainParams {
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        Self {
            opacity: unit(self.opacity, d.opacity),
            tile_size: finite_at_least(self.tile_size, 16.0, d.tile_size),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientParams {
    pub stops: i32,
    pub angle_deg: f32,
    pub opacity: f32,
    /// Slowly shift the gradient angle when animated.
    pub shift: bool,
    pub duration: f32,
}

impl Default for GradientParams {
    fn default() -> Self {
        Self {
            stops: 3,
            angle_deg: 180.0,
            opacity: 0.5,
            shift: true,
            duration: 20.0,
        }
    }
}

impl GradientParams {
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        Self {
            stops: count_in(self.stops, 2, 4),
            angle_deg: if self.angle_deg.is_finite() {
                self.angle_deg.rem_euclid(360.0)
            } else {
                d.angle_deg
            },
            opacity: unit(self.opacity, d.opacity),
            shift: self.shift,
            duration: finite_at_least(self.duration, 1.0, d.duration),
        }
    }
}

/// Parameters for one effect, tagged by kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectParams {
    Grid(GridParams),
    Particles(ParticleParams),
    FlowLines(FlowLineParams),
    GlowOrbs(GlowOrbParams),
    Circuit(CircuitParams),
    Waveform(WaveformParams),
    DotMatrix(DotMatrixParams),
    Grain(GrainParams),
    GradientOverlay(GradientParams),
}

impl Default for EffectParams {
    fn default() -> Self {
        EffectParams::Grid(GridParams::default())
    }
}

impl EffectParams {
    pub fn default_for(kind: EffectKind) -> Self {
        match kind {
            EffectKind::Grid => EffectParams::Grid(GridParams::default()),
            EffectKind::Particles => EffectParams::Particles(ParticleParams::default()),
            EffectKind::FlowLines => EffectParams::FlowLines(FlowLineParams::default()),
            EffectKind::GlowOrbs => EffectParams::GlowOrbs(GlowOrbParams::default()),
            EffectKind::Circuit => EffectParams::Circuit(CircuitParams::default()),
            EffectKind::Waveform => EffectParams::Waveform(WaveformParams::default()),
            EffectKind::DotMatrix => EffectParams::DotMatrix(DotMatrixParams::default()),
            EffectKind::Grain => EffectParams::Grain(GrainParams::default()),
            EffectKind::GradientOverlay => EffectParams::GradientOverlay(GradientParams::default()),
        }
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            EffectParams::Grid(_) => EffectKind::Grid,
            EffectParams::Particles(_) => EffectKind::Particles,
            EffectParams::FlowLines(_) => EffectKind::FlowLines,
            EffectParams::GlowOrbs(_) => EffectKind::GlowOrbs,
            EffectParams::Circuit(_) => EffectKind::Circuit,
            EffectParams::Waveform(_) => EffectKind::Waveform,
            EffectParams::DotMatrix(_) => EffectKind::DotMatrix,
            EffectParams::Grain(_) => EffectKind::Grain,
            EffectParams::GradientOverlay(_) => EffectKind::GradientOverlay,
        }
    }

    pub fn sanitized(self) -> Self {
        match self {
            EffectParams::Grid(p) => EffectParams::Grid(p.sanitized()),
            EffectParams::Particles(p) => EffectParams::Particles(p.sanitized()),
            EffectParams::FlowLines(p) => EffectParams::FlowLines(p.sanitized()),
            EffectParams::GlowOrbs(p) => EffectParams::GlowOrbs(p.sanitized()),
            EffectParams::Circuit(p) => EffectParams::Circuit(p.sanitized()),
            EffectParams::Waveform(p) => EffectParams::Waveform(p.sanitized()),
            EffectParams::DotMatrix(p) => EffectParams::DotMatrix(p.sanitized()),
            EffectParams::Grain(p) => EffectParams::Grain(p.sanitized()),
            EffectParams::GradientOverlay(p) => EffectParams::GradientOverlay(p.sanitized()),
        }
    }

    /// Concrete parameters for `tier`: fewer particles and coarser grids on
    /// lower tiers. The result is always sanitized.
    pub fn scaled_for(self, tier: &DeviceTier) -> Self {
        let count = tier.particle_scale();
        let cell = tier.cell_scale();
        let low = tier.level == TierLevel::Low;
        let scaled = match self.sanitized() {
            EffectParams::Grid(p) => EffectParams::Grid(GridParams {
                cell_size: p.cell_size * cell,
                scan_lines: if low { 0 } else { scale_count(p.scan_lines, count, 0) },
                ..p
            }),
            EffectParams::Particles(p) => EffectParams::Particles(ParticleParams {
                count: scale_count(p.count, count, 0),
                ..p
            }),
            EffectParams::FlowLines(p) => EffectParams::FlowLines(FlowLineParams {
                line_count: scale_count(p.line_count, count, 1),
                segments: scale_count(p.segments, 1.0 / cell, 2),
                ..p
            }),
            EffectParams::GlowOrbs(p) => EffectParams::GlowOrbs(GlowOrbParams {
                orb_count: scale_count(p.orb_count, count, 1),
                ..p
            }),
            EffectParams::Circuit(p) => EffectParams::Circuit(CircuitParams {
                rows: scale_count(p.rows, 1.0 / cell, 1),
                cols: scale_count(p.cols, 1.0 / cell, 1),
                pulse_count: scale_count(p.pulse_count, count, 0),
                ..p
            }),
            EffectParams::Waveform(p) => EffectParams::Waveform(WaveformParams {
                wave_count: scale_count(p.wave_count, count, 1),
                points: scale_count(p.points, 1.0 / cell, 4),
                ..p
            }),
            EffectParams::DotMatrix(p) => EffectParams::DotMatrix(DotMatrixParams {
                rows: scale_count(p.rows, 1.0 / cell, 1),
                cols: scale_count(p.cols, 1.0 / cell, 1),
                ..p
            }),
            EffectParams::Grain(p) => EffectParams::Grain(GrainParams {
                tile_size: p.tile_size * cell,
                ..p
            }),
            other @ EffectParams::GradientOverlay(_) => other,
        };
        scaled.sanitized()
    }

    /// Number of pool records this effect wants while mounted.
    pub fn particle_demand(&self) -> usize {
        match self {
            EffectParams::Particles(p) => p.count.max(0) as usize,
            _ => 0,
        }
    }

    /// Copy with the particle count multiplied by `factor`.
    pub fn with_particle_factor(self, factor: f32) -> Self {
        match self {
            EffectParams::Particles(p) => EffectParams::Particles(ParticleParams {
                count: scale_count(p.count, factor, 0),
                ..p
            }),
            other => other,
        }
    }
}
