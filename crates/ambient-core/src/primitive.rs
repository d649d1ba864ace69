//! Declarative output of effect rendering.
//!
//! Primitives are technology-neutral: positions are in the region's
//! `[0, 100]` percentage square, colors are palette tones, and looping motion
//! is described rather than simulated. A host (canvas, SVG, DOM) maps them to
//! its own drawing calls and evaluates [`Animation::progress_at`] per frame.

use glam::Vec2;
use smallvec::SmallVec;

/// Palette slot; the host maps tones to concrete colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tone {
    Primary,
    Secondary,
    Accent,
    Muted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseInOut,
    Sine,
}

impl Easing {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => t * t * (3.0 - 2.0 * t),
            Easing::Sine => 0.5 - 0.5 * (t * std::f32::consts::PI).cos(),
        }
    }
}

/// What a looping transition changes over one cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// Opacity multiplier goes from `from` to `to`.
    Fade { from: f32, to: f32 },
    /// Position moves by up to `offset`.
    Drift { offset: Vec2 },
    /// Size scales between 1 and `scale`.
    Pulse { scale: f32 },
    /// A highlight travels along a line or path (dash offset in `[0, 1]`).
    Travel,
    /// Vertical sweep between two y positions.
    Scan { from_y: f32, to_y: f32 },
    /// Rotation by up to `degrees` (gradient angle shift).
    Rotate { degrees: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animation {
    pub motion: Motion,
    pub duration_sec: f32,
    pub delay_sec: f32,
    pub easing: Easing,
    /// Play forwards then backwards instead of jumping back to the start.
    pub alternate: bool,
}

impl Animation {
    pub fn new(motion: Motion, duration_sec: f32, delay_sec: f32, easing: Easing) -> Self {
        Self {
            motion,
            duration_sec: duration_sec.max(0.1),
            delay_sec: delay_sec.max(0.0),
            easing,
            alternate: false,
        }
    }

    pub fn alternating(mut self) -> Self {
        self.alternate = true;
        self
    }

    /// Eased loop phase in `[0, 1]` at host time `t_sec`.
    pub fn progress_at(&self, t_sec: f32) -> f32 {
        let local = t_sec - self.delay_sec;
        if local <= 0.0 || !local.is_finite() {
            return self.easing.apply(0.0);
        }
        let duration = self.duration_sec.max(0.1);
        let raw = if self.alternate {
            let cycle = (local / duration) % 2.0;
            if cycle > 1.0 {
                2.0 - cycle
            } else {
                cycle
            }
        } else {
            (local % duration) / duration
        };
        self.easing.apply(raw)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TileFill {
    /// Film-grain noise; the seed is frozen per effect instance.
    Noise { seed: u64, tile_size: f32 },
    LinearGradient {
        angle_deg: f32,
        stops: SmallVec<[(f32, Tone); 4]>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Line { from: Vec2, to: Vec2 },
    Circle { center: Vec2, radius: f32 },
    Path { points: Vec<Vec2>, closed: bool },
    Tile { origin: Vec2, size: Vec2, fill: TileFill },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub tone: Tone,
    pub opacity: f32,
    /// Zero means filled; positive values are stroke widths in layout units.
    pub stroke_width: f32,
    pub blur: f32,
}

impl Style {
    pub fn fill(tone: Tone, opacity: f32) -> Self {
        Self {
            tone,
            opacity: opacity.clamp(0.0, 1.0),
            stroke_width: 0.0,
            blur: 0.0,
        }
    }

    pub fn stroke(tone: Tone, opacity: f32, width: f32) -> Self {
        Self {
            tone,
            opacity: opacity.clamp(0.0, 1.0),
            stroke_width: width.max(0.0),
            blur: 0.0,
        }
    }

    pub fn with_blur(mut self, blur: f32) -> Self {
        self.blur = blur.max(0.0);
        self
    }

    #[inline]
    pub fn is_fill(&self) -> bool {
        self.stroke_width <= 0.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub style: Style,
    pub animation: Option<Animation>,
}

impl Primitive {
    pub fn new(shape: Shape, style: Style) -> Self {
        Self {
            shape,
            style,
            animation: None,
        }
    }

    /// Attach `animation` only when the effect is rendered animated.
    pub fn animated_if(mut self, animated: bool, animation: Animation) -> Self {
        if animated {
            self.animation = Some(animation);
        }
        self
    }
}
