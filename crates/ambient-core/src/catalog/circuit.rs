use super::layout_rng;
use crate::constants::LAYOUT_EXTENT;
use crate::params::CircuitParams;
use crate::primitive::*;
use glam::Vec2;
use rand::Rng;

const TRACE_OPACITY: f32 = 0.18;
const NODE_OPACITY: f32 = 0.35;
const PULSE_OPACITY: f32 = 0.7;

pub(super) fn render(p: &CircuitParams, animated: bool, seed: u64) -> Vec<Primitive> {
    let rows = p.rows as usize;
    let cols = p.cols as usize;
    let dx = LAYOUT_EXTENT / cols as f32;
    let dy = LAYOUT_EXTENT / rows as f32;
    let node = |r: usize, c: usize| Vec2::new((c as f32 + 0.5) * dx, (r as f32 + 0.5) * dy);

    let mut rng = layout_rng(seed, 0xC1C);
    let mut traces: Vec<Vec<Vec2>> = Vec::new();
    let mut used = vec![false; rows * cols];

    for r in 0..rows {
        for c in 0..cols {
            if rng.gen::<f32>() >= p.trace_density {
                continue;
            }
            let can_right = c + 1 < cols;
            let can_down = r + 1 < rows;
            // right, down, or an L bend through the diagonal neighbour's corner
            let (points, end) = match (can_right, can_down, rng.gen_range(0..3u8)) {
                (true, true, 2) => (
                    vec![node(r, c), node(r, c + 1), node(r + 1, c + 1)],
                    (r + 1, c + 1),
                ),
                (true, _, 0) | (true, false, _) => (vec![node(r, c), node(r, c + 1)], (r, c + 1)),
                (_, true, _) => (vec![node(r, c), node(r + 1, c)], (r + 1, c)),
                _ => continue,
            };
            used[r * cols + c] = true;
            used[end.0 * cols + end.1] = true;
            traces.push(points);
        }
    }

    let pulses = if animated {
        (p.pulse_count as usize).min(traces.len())
    } else {
        0
    };
    let mut out = Vec::with_capacity(traces.len() + pulses + rows * cols / 2);

    for t in &traces {
        out.push(Primitive::new(
            Shape::Path {
                points: t.clone(),
                closed: false,
            },
            Style::stroke(Tone::Secondary, TRACE_OPACITY, 0.12),
        ));
    }
    for r in 0..rows {
        for c in 0..cols {
            if used[r * cols + c] {
                out.push(Primitive::new(
                    Shape::Circle {
                        center: node(r, c),
                        radius: p.node_radius,
                    },
                    Style::fill(Tone::Secondary, NODE_OPACITY),
                ));
            }
        }
    }
    // Pulses run along evenly spaced traces
    for k in 0..pulses {
        let t = &traces[k * traces.len() / pulses];
        out.push(
            Primitive::new(
                Shape::Path {
                    points: t.clone(),
                    closed: false,
                },
                Style::stroke(Tone::Accent, PULSE_OPACITY, 0.2).with_blur(0.4),
            )
            .animated_if(
                true,
                Animation::new(
                    Motion::Travel,
                    p.pulse_duration,
                    k as f32 * p.pulse_duration / pulses as f32,
                    Easing::EaseInOut,
                ),
            ),
        );
    }
    out
}
