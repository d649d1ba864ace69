use super::{layout_rng, px};
use crate::constants::*;
use crate::params::ParticleParams;
use crate::pool::ParticleRecord;
use crate::primitive::*;
use glam::Vec2;
use rand::Rng;

const DOT_OPACITY: f32 = 0.6;
const LINK_OPACITY: f32 = 0.25;
const DRIFT_RISE: f32 = 4.0;

/// Scatter a freshly acquired record. Position, size and timing depend only
/// on the instance seed and the particle's index within the instance.
pub fn place_particle(record: &mut ParticleRecord, p: &ParticleParams, seed: u64, index: usize) {
    let mut rng = layout_rng(seed, index as u64 + 1);
    record.position = Vec2::new(
        rng.gen_range(0.0..=LAYOUT_EXTENT),
        rng.gen_range(0.0..=LAYOUT_EXTENT),
    );
    record.size = if p.max_size > p.min_size {
        rng.gen_range(p.min_size..p.max_size)
    } else {
        p.min_size
    };
    record.animation_duration = if p.max_duration > p.min_duration {
        rng.gen_range(p.min_duration..p.max_duration)
    } else {
        p.min_duration
    };
    record.animation_delay = rng.gen_range(0.0..record.animation_duration.max(0.1));
}

pub(super) fn render(
    p: &ParticleParams,
    animated: bool,
    particles: &[ParticleRecord],
) -> Vec<Primitive> {
    let shown = &particles[..particles.len().min(p.count.max(0) as usize)];
    let mut out = Vec::with_capacity(shown.len() * (1 + MAX_CONNECTIONS_PER_PARTICLE));

    if p.connection_distance > 0.0 {
        let mut links = vec![0usize; shown.len()];
        for i in 0..shown.len() {
            for j in (i + 1)..shown.len() {
                if links[i] >= MAX_CONNECTIONS_PER_PARTICLE {
                    break;
                }
                if links[j] >= MAX_CONNECTIONS_PER_PARTICLE {
                    continue;
                }
                let (a, b) = (shown[i].position, shown[j].position);
                let d = a.distance(b);
                if d < p.connection_distance {
                    links[i] += 1;
                    links[j] += 1;
                    let strength = 1.0 - d / p.connection_distance;
                    out.push(Primitive::new(
                        Shape::Line { from: a, to: b },
                        Style::stroke(Tone::Primary, LINK_OPACITY * strength, 0.08),
                    ));
                }
            }
        }
    }

    for r in shown {
        // sideways sway derived from the frozen position, so no extra randomness
        let sway = (r.position.x * 0.37 + r.position.y * 0.11).sin() * 3.0;
        out.push(
            Primitive::new(
                Shape::Circle {
                    center: r.position,
                    radius: px(r.size),
                },
                Style::fill(Tone::Primary, DOT_OPACITY),
            )
            .animated_if(
                animated,
                Animation::new(
                    Motion::Drift {
                        offset: Vec2::new(sway, -(DRIFT_RISE + r.size)),
                    },
                    r.animation_duration,
                    r.animation_delay,
                    Easing::Sine,
                )
                .alternating(),
            ),
        );
    }
    out
}
