use crate::constants::{LAYOUT_EXTENT, SEED_MIX};
use crate::params::GrainParams;
use crate::primitive::*;
use glam::Vec2;

// Grain jitters in short steps; longer cycles read as drifting texture
const GRAIN_CYCLE_SEC: f32 = 0.8;

pub(super) fn render(p: &GrainParams, animated: bool, seed: u64) -> Vec<Primitive> {
    let tile = Primitive::new(
        Shape::Tile {
            origin: Vec2::ZERO,
            size: Vec2::splat(LAYOUT_EXTENT),
            fill: TileFill::Noise {
                seed: seed ^ SEED_MIX,
                tile_size: p.tile_size,
            },
        },
        Style::fill(Tone::Muted, p.opacity),
    )
    .animated_if(
        animated,
        Animation::new(
            Motion::Drift {
                offset: Vec2::new(2.0, 2.0),
            },
            GRAIN_CYCLE_SEC,
            0.0,
            Easing::Linear,
        ),
    );
    vec![tile]
}
