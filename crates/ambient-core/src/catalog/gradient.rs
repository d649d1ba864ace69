use crate::constants::LAYOUT_EXTENT;
use crate::params::GradientParams;
use crate::primitive::*;
use glam::Vec2;
use smallvec::SmallVec;

const STOP_TONES: [Tone; 4] = [Tone::Primary, Tone::Secondary, Tone::Accent, Tone::Muted];
const SHIFT_DEGREES: f32 = 30.0;

pub(super) fn render(p: &GradientParams, animated: bool) -> Vec<Primitive> {
    let n = p.stops as usize;
    let stops = (0..n)
        .map(|k| (k as f32 / (n - 1) as f32, STOP_TONES[k % STOP_TONES.len()]))
        .collect::<SmallVec<[(f32, Tone); 4]>>();
    let overlay = Primitive::new(
        Shape::Tile {
            origin: Vec2::ZERO,
            size: Vec2::splat(LAYOUT_EXTENT),
            fill: TileFill::LinearGradient {
                angle_deg: p.angle_deg,
                stops,
            },
        },
        Style::fill(Tone::Primary, p.opacity),
    )
    .animated_if(
        animated && p.shift,
        Animation::new(
            Motion::Rotate {
                degrees: SHIFT_DEGREES,
            },
            p.duration,
            0.0,
            Easing::Sine,
        )
        .alternating(),
    );
    vec![overlay]
}
