use super::layout_rng;
use crate::constants::LAYOUT_EXTENT;
use crate::params::FlowLineParams;
use crate::primitive::*;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

pub(super) fn render(p: &FlowLineParams, animated: bool, seed: u64) -> Vec<Primitive> {
    let lines = p.line_count as usize;
    let segments = p.segments as usize;
    let mut rng = layout_rng(seed, 0xF10);
    let mut out = Vec::with_capacity(lines);

    for i in 0..lines {
        let base_y = (i + 1) as f32 * LAYOUT_EXTENT / (lines + 1) as f32;
        let phase = rng.gen_range(0.0..TAU);
        let cycles = rng.gen_range(1.0..2.5_f32);
        let duration = p.duration * rng.gen_range(0.8..1.2_f32);

        let points = (0..=segments)
            .map(|k| {
                let x = k as f32 * LAYOUT_EXTENT / segments as f32;
                let y = base_y + p.amplitude * (TAU * cycles * x / LAYOUT_EXTENT + phase).sin();
                Vec2::new(x, y)
            })
            .collect::<Vec<_>>();

        out.push(
            Primitive::new(
                Shape::Path {
                    points,
                    closed: false,
                },
                Style::stroke(Tone::Secondary, 0.15, 0.15),
            )
            .animated_if(
                animated,
                Animation::new(Motion::Travel, duration, i as f32 * 0.8, Easing::Linear),
            ),
        );
    }
    out
}
