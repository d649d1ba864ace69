use super::layout_rng;
use crate::constants::LAYOUT_EXTENT;
use crate::params::DotMatrixParams;
use crate::primitive::*;
use glam::Vec2;
use rand::Rng;

pub(super) fn render(p: &DotMatrixParams, animated: bool, seed: u64) -> Vec<Primitive> {
    let rows = p.rows as usize;
    let cols = p.cols as usize;
    let mut rng = layout_rng(seed, 0xD07);
    let mut out = Vec::with_capacity(rows * cols);

    for r in 0..rows {
        for c in 0..cols {
            let center = Vec2::new(
                (c as f32 + 0.5) * LAYOUT_EXTENT / cols as f32,
                (r as f32 + 0.5) * LAYOUT_EXTENT / rows as f32,
            );
            // Every dot consumes the same draws so one dot's role never shifts the rest
            let twinkles = rng.gen::<f32>() < p.twinkle_ratio;
            let duration = rng.gen_range(2.0..5.0_f32);
            let delay = rng.gen_range(0.0..5.0_f32);
            let dot = Shape::Circle {
                center,
                radius: p.dot_radius,
            };
            if twinkles {
                out.push(
                    Primitive::new(dot, Style::fill(Tone::Accent, 0.6)).animated_if(
                        animated,
                        Animation::new(
                            Motion::Fade { from: 0.2, to: 1.0 },
                            duration,
                            delay,
                            Easing::EaseInOut,
                        )
                        .alternating(),
                    ),
                );
            } else {
                out.push(Primitive::new(dot, Style::fill(Tone::Muted, 0.15)));
            }
        }
    }
    out
}
