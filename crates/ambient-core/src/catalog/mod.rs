//! Stateless effect definitions.
//!
//! Each effect is a pure function from parameters (plus the instance's frozen
//! seed and, for particle effects, its held pool records) to an ordered list
//! of primitives. Calling it twice with the same inputs yields the same output.

use crate::constants::*;
use crate::params::EffectParams;
use crate::pool::ParticleRecord;
use crate::primitive::Primitive;
use rand::rngs::StdRng;
use rand::SeedableRng;

mod circuit;
mod dot_matrix;
mod flow_lines;
mod glow_orbs;
mod gradient;
mod grain;
mod grid;
mod particles;
mod waveform;

pub use particles::place_particle;

/// Frozen inputs of one effect instance.
#[derive(Clone, Copy, Debug)]
pub struct Layout<'a> {
    pub seed: u64,
    /// Pool records held by the instance, in acquisition order.
    pub particles: &'a [ParticleRecord],
}

impl<'a> Layout<'a> {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            particles: &[],
        }
    }
}

pub fn render(params: &EffectParams, animated: bool, layout: &Layout<'_>) -> Vec<Primitive> {
    match params.sanitized() {
        EffectParams::Grid(p) => grid::render(&p, animated),
        EffectParams::Particles(p) => particles::render(&p, animated, layout.particles),
        EffectParams::FlowLines(p) => flow_lines::render(&p, animated, layout.seed),
        EffectParams::GlowOrbs(p) => glow_orbs::render(&p, animated, layout.seed),
        EffectParams::Circuit(p) => circuit::render(&p, animated, layout.seed),
        EffectParams::Waveform(p) => waveform::render(&p, animated, layout.seed),
        EffectParams::DotMatrix(p) => dot_matrix::render(&p, animated, layout.seed),
        EffectParams::Grain(p) => grain::render(&p, animated, layout.seed),
        EffectParams::GradientOverlay(p) => gradient::render(&p, animated),
    }
}

// --- helpers shared by the effect modules ---

/// Fresh generator for one render pass; `salt` separates independent streams.
#[inline]
pub(crate) fn layout_rng(seed: u64, salt: u64) -> StdRng {
    StdRng::seed_from_u64(seed ^ salt.wrapping_mul(SEED_MIX))
}

/// Pixel length to percentage-square units.
#[inline]
pub(crate) fn px(v: f32) -> f32 {
    v * LAYOUT_EXTENT / LAYOUT_REFERENCE_PX
}
