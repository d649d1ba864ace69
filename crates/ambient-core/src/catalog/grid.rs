use super::px;
use crate::constants::LAYOUT_EXTENT;
use crate::params::GridParams;
use crate::primitive::*;
use glam::Vec2;

// Lines within this distance of an edge fade out when `fade_edges` is set
const EDGE_FADE_SPAN: f32 = 20.0;
const SCAN_OPACITY: f32 = 0.3;

#[inline]
fn edge_factor(pos: f32) -> f32 {
    let d = pos.min(LAYOUT_EXTENT - pos);
    (d / EDGE_FADE_SPAN).clamp(0.2, 1.0)
}

pub(super) fn render(p: &GridParams, animated: bool) -> Vec<Primitive> {
    let step = px(p.cell_size);
    let n = (LAYOUT_EXTENT / step).floor() as usize;
    let scans = if animated { p.scan_lines.max(0) as usize } else { 0 };
    let mut out = Vec::with_capacity(2 * (n + 1) + scans);

    for i in 0..=n {
        let pos = i as f32 * step;
        let opacity = if p.fade_edges {
            p.line_opacity * edge_factor(pos)
        } else {
            p.line_opacity
        };
        out.push(Primitive::new(
            Shape::Line {
                from: Vec2::new(pos, 0.0),
                to: Vec2::new(pos, LAYOUT_EXTENT),
            },
            Style::stroke(Tone::Muted, opacity, 0.1),
        ));
        out.push(Primitive::new(
            Shape::Line {
                from: Vec2::new(0.0, pos),
                to: Vec2::new(LAYOUT_EXTENT, pos),
            },
            Style::stroke(Tone::Muted, opacity, 0.1),
        ));
    }

    // A scan line only means something while it moves
    for i in 0..scans {
        let delay = i as f32 * p.scan_duration / scans as f32;
        out.push(
            Primitive::new(
                Shape::Line {
                    from: Vec2::new(0.0, 0.0),
                    to: Vec2::new(LAYOUT_EXTENT, 0.0),
                },
                Style::stroke(Tone::Accent, SCAN_OPACITY, 0.15).with_blur(0.5),
            )
            .animated_if(
                true,
                Animation::new(
                    Motion::Scan {
                        from_y: 0.0,
                        to_y: LAYOUT_EXTENT,
                    },
                    p.scan_duration,
                    delay,
                    Easing::Linear,
                ),
            ),
        );
    }
    out
}
