use super::layout_rng;
use crate::params::GlowOrbParams;
use crate::primitive::*;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

const ORB_TONES: [Tone; 3] = [Tone::Primary, Tone::Secondary, Tone::Accent];
const ORB_OPACITY: f32 = 0.25;

pub(super) fn render(p: &GlowOrbParams, animated: bool, seed: u64) -> Vec<Primitive> {
    let mut rng = layout_rng(seed, 0x0B5);
    (0..p.orb_count as usize)
        .map(|i| {
            let center = Vec2::new(rng.gen_range(15.0..85.0), rng.gen_range(15.0..85.0));
            let radius = if p.max_radius > p.min_radius {
                rng.gen_range(p.min_radius..p.max_radius)
            } else {
                p.min_radius
            };
            let heading = rng.gen_range(0.0..TAU);
            let duration = p.duration * rng.gen_range(0.8..1.2_f32);
            Primitive::new(
                Shape::Circle { center, radius },
                Style::fill(ORB_TONES[i % ORB_TONES.len()], ORB_OPACITY).with_blur(radius * 0.6),
            )
            .animated_if(
                animated,
                Animation::new(
                    Motion::Drift {
                        offset: Vec2::from_angle(heading) * p.drift,
                    },
                    duration,
                    i as f32 * 2.0,
                    Easing::Sine,
                )
                .alternating(),
            )
        })
        .collect()
}
