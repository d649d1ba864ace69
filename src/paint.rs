//! Canvas 2D rendering of composer primitives.
//!
//! Layout units map to canvas pixels per axis (`x/100 * width`,
//! `y/100 * height`); radii and stroke widths follow the width axis.
//! Looping animations are evaluated at the frame time on every paint.

use crate::constants::*;
use crate::dom;
use ambient_core::{BackgroundComposer, IntensityStyle, Motion, Primitive, Shape, TileFill, Tone};
use glam::Vec2;
use wasm_bindgen::JsValue;
use web_sys as web;

#[inline]
fn tone_color(tone: Tone) -> &'static str {
    match tone {
        Tone::Primary => TONE_PRIMARY,
        Tone::Secondary => TONE_SECONDARY,
        Tone::Accent => TONE_ACCENT,
        Tone::Muted => TONE_MUTED,
    }
}

/// Per-primitive values derived from its animation at one instant.
#[derive(Default)]
struct Animated {
    alpha: f64,
    offset: Vec2,
    radius_scale: f64,
    travel: Option<f64>,
    rotate_deg: f64,
}

fn evaluate(prim: &Primitive, t_sec: f32, layer: &IntensityStyle) -> Animated {
    let mut a = Animated {
        alpha: (prim.style.opacity * layer.opacity) as f64,
        radius_scale: 1.0,
        ..Default::default()
    };
    let Some(anim) = &prim.animation else {
        return a;
    };
    let p = anim.progress_at(t_sec);
    match anim.motion {
        Motion::Fade { from, to } => a.alpha *= (from + (to - from) * p) as f64,
        Motion::Drift { offset } => a.offset = offset * p,
        Motion::Pulse { scale } => a.radius_scale = 1.0 + ((scale - 1.0) * p) as f64,
        Motion::Travel => a.travel = Some(p as f64),
        Motion::Scan { from_y, to_y } => a.offset.y = from_y + (to_y - from_y) * p,
        Motion::Rotate { degrees } => a.rotate_deg = (degrees * p) as f64,
    }
    a
}

pub struct Painter {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    width: f64,
    height: f64,
    dpr: f64,
    // grain tile cached by (seed, tile px)
    noise: Option<(u64, u32, web::CanvasPattern)>,
}

impl Painter {
    pub fn new(canvas: web::HtmlCanvasElement, ctx: web::CanvasRenderingContext2d) -> Self {
        Self {
            canvas,
            ctx,
            width: 1.0,
            height: 1.0,
            dpr: 1.0,
            noise: None,
        }
    }

    pub fn clear(&self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
    }

    pub fn paint(&mut self, composer: &BackgroundComposer, t_sec: f32) {
        let (w, h) = dom::sync_canvas_backing_size(&self.canvas);
        self.width = w as f64;
        self.height = h as f64;
        self.dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        self.clear();
        if !composer.phase().is_live() {
            return;
        }
        let layer = composer.intensity_style();
        for prim in composer.primitives() {
            self.draw(prim, t_sec, &layer);
        }
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_filter("none");
    }

    #[inline]
    fn map(&self, v: Vec2, offset: Vec2) -> (f64, f64) {
        (
            (v.x + offset.x) as f64 * self.width / 100.0,
            (v.y + offset.y) as f64 * self.height / 100.0,
        )
    }

    #[inline]
    fn len(&self, units: f32) -> f64 {
        units as f64 * self.width / 100.0
    }

    #[allow(deprecated)]
    fn draw(&mut self, prim: &Primitive, t_sec: f32, layer: &IntensityStyle) {
        let a = evaluate(prim, t_sec, layer);
        if a.alpha <= 0.001 {
            return;
        }
        let ctx = self.ctx.clone();
        ctx.set_global_alpha(a.alpha.clamp(0.0, 1.0));
        if prim.style.blur > 0.0 {
            let blur = self
                .len(prim.style.blur)
                .min(layer.blur_radius as f64 * self.dpr);
            ctx.set_filter(&format!("blur({:.1}px)", blur));
        } else {
            ctx.set_filter("none");
        }
        let color = JsValue::from_str(tone_color(prim.style.tone));
        ctx.set_stroke_style(&color);
        ctx.set_fill_style(&color);
        ctx.set_line_width(self.len(prim.style.stroke_width).max(0.5));

        match &prim.shape {
            Shape::Line { from, to } => {
                let (x0, y0) = self.map(*from, a.offset);
                let (x1, y1) = self.map(*to, a.offset);
                ctx.begin_path();
                ctx.move_to(x0, y0);
                ctx.line_to(x1, y1);
                self.finish_stroke(((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt(), a.travel);
            }
            Shape::Circle { center, radius } => {
                let (cx, cy) = self.map(*center, a.offset);
                let r = (self.len(*radius) * a.radius_scale).max(0.5);
                ctx.begin_path();
                _ = ctx.arc(cx, cy, r, 0.0, std::f64::consts::TAU);
                if prim.style.is_fill() {
                    ctx.fill();
                } else {
                    ctx.stroke();
                }
            }
            Shape::Path { points, closed } => {
                let mut length = 0.0;
                let mut prev: Option<(f64, f64)> = None;
                ctx.begin_path();
                for p in points {
                    let (x, y) = self.map(*p, a.offset);
                    match prev {
                        None => ctx.move_to(x, y),
                        Some((px, py)) => {
                            length += ((x - px).powi(2) + (y - py).powi(2)).sqrt();
                            ctx.line_to(x, y);
                        }
                    }
                    prev = Some((x, y));
                }
                if *closed {
                    ctx.close_path();
                }
                self.finish_stroke(length, a.travel);
            }
            Shape::Tile { origin, size, fill } => {
                let (x, y) = self.map(*origin, Vec2::ZERO);
                let (x1, y1) = self.map(*origin + *size, Vec2::ZERO);
                match fill {
                    TileFill::Noise { seed, tile_size } => {
                        if let Some(pattern) = self.noise_pattern(*seed, *tile_size) {
                            let (dx, dy) = (self.len(a.offset.x), self.len(a.offset.y));
                            ctx.save();
                            _ = ctx.translate(dx, dy);
                            ctx.set_fill_style(&pattern);
                            ctx.fill_rect(x - dx, y - dy, x1 - x, y1 - y);
                            ctx.restore();
                        }
                    }
                    TileFill::LinearGradient { angle_deg, stops } => {
                        let angle = (*angle_deg as f64 + a.rotate_deg).to_radians();
                        let (cx, cy) = ((x + x1) * 0.5, (y + y1) * 0.5);
                        let (sx, sy) = (angle.sin(), -angle.cos());
                        let half = ((x1 - x) * sx.abs() + (y1 - y) * sy.abs()) * 0.5;
                        let gradient = ctx.create_linear_gradient(
                            cx - sx * half,
                            cy - sy * half,
                            cx + sx * half,
                            cy + sy * half,
                        );
                        for (offset, tone) in stops {
                            _ = gradient.add_color_stop(*offset, tone_color(*tone));
                        }
                        ctx.set_fill_style(&gradient);
                        ctx.fill_rect(x, y, x1 - x, y1 - y);
                    }
                }
            }
        }
    }

    /// Stroke the current path, optionally as a travelling highlight.
    fn finish_stroke(&self, length: f64, travel: Option<f64>) {
        let ctx = &self.ctx;
        match travel {
            Some(p) if length > 0.0 => {
                let lit = length * TRAVEL_DASH_FRACTION;
                let dash = js_sys::Array::of2(&lit.into(), &length.into());
                _ = ctx.set_line_dash(&dash);
                ctx.set_line_dash_offset(lit - p * (length + lit));
                ctx.stroke();
                _ = ctx.set_line_dash(&js_sys::Array::new());
                ctx.set_line_dash_offset(0.0);
            }
            _ => ctx.stroke(),
        }
    }

    #[allow(deprecated)]
    fn noise_pattern(&mut self, seed: u64, tile_size: f32) -> Option<JsValue> {
        let tile_px = ((tile_size as f64 * self.dpr) as u32).max(16);
        if let Some((s, px, pattern)) = &self.noise {
            if *s == seed && *px == tile_px {
                return Some(pattern.clone().into());
            }
        }
        let document = dom::window_document()?;
        let tile: web::HtmlCanvasElement = wasm_bindgen::JsCast::dyn_into(
            document.create_element("canvas").ok()?,
        )
        .ok()?;
        tile.set_width(tile_px);
        tile.set_height(tile_px);
        let tctx: web::CanvasRenderingContext2d =
            wasm_bindgen::JsCast::dyn_into(tile.get_context("2d").ok()??).ok()?;
        tctx.set_fill_style(&JsValue::from_str("#ffffff"));

        // xorshift keeps the tile identical for a given seed
        let mut state = seed | 1;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };
        let blocks = ((tile_px as u64 * tile_px as u64) / (64 * 64)).max(1);
        for _ in 0..blocks * GRAIN_DOTS_PER_BLOCK as u64 {
            let x = (next() % tile_px as u64) as f64;
            let y = (next() % tile_px as u64) as f64;
            tctx.set_global_alpha(((next() % 100) as f64) / 100.0);
            tctx.fill_rect(x, y, 1.0, 1.0);
        }
        let pattern = self
            .ctx
            .create_pattern_with_html_canvas_element(&tile, "repeat")
            .ok()??;
        self.noise = Some((seed, tile_px, pattern.clone()));
        Some(pattern.into())
    }
}
