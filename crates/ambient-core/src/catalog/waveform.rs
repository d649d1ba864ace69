use super::layout_rng;
use crate::constants::LAYOUT_EXTENT;
use crate::params::WaveformParams;
use crate::primitive::*;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

pub(super) fn render(p: &WaveformParams, animated: bool, seed: u64) -> Vec<Primitive> {
    let waves = p.wave_count as usize;
    let points = p.points as usize;
    let mut rng = layout_rng(seed, 0x3A7);
    let wavelength = LAYOUT_EXTENT / p.frequency;
    // one extra wavelength past the right edge is revealed as the wave drifts left
    let span = LAYOUT_EXTENT + wavelength;

    (0..waves)
        .map(|i| {
            // Each successive wave is flatter and fainter
            let falloff = 1.0 / (1.0 + i as f32 * 0.35);
            let amplitude = p.amplitude * falloff;
            let phase = i as f32 * 0.9 + rng.gen_range(0.0..0.5_f32);
            let pts = (0..points)
                .map(|k| {
                    let x = k as f32 * span / (points - 1) as f32;
                    let y = 50.0 + amplitude * (TAU * p.frequency * x / LAYOUT_EXTENT + phase).sin();
                    Vec2::new(x, y)
                })
                .collect::<Vec<_>>();
            Primitive::new(
                Shape::Path {
                    points: pts,
                    closed: false,
                },
                Style::stroke(Tone::Accent, 0.3 * falloff, 0.15),
            )
            .animated_if(
                animated,
                // Shifting by one wavelength loops seamlessly
                Animation::new(
                    Motion::Drift {
                        offset: Vec2::new(-wavelength, 0.0),
                    },
                    p.duration * (1.0 + i as f32 * 0.25),
                    0.0,
                    Easing::Linear,
                ),
            )
        })
        .collect()
}
