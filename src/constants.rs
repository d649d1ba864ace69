// DOM wiring and palette constants for the browser front-end.

// Canvas inserted as the first child of each mounted region
pub const CANVAS_CLASS: &str = "ambient-bg";
pub const CANVAS_STYLE: &str =
    "position:absolute;inset:0;width:100%;height:100%;pointer-events:none;z-index:0;";
pub const REGION_ATTR: &str = "data-ambient-region";

// IntersectionObserver margin; mirrors the core proximity margin of 50px
pub const OBSERVER_ROOT_MARGIN: &str = "50px";
pub const OBSERVER_THRESHOLD: f64 = 0.0;

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// Palette for primitive tones (CSS colors)
pub const TONE_PRIMARY: &str = "#6366f1";
pub const TONE_SECONDARY: &str = "#22d3ee";
pub const TONE_ACCENT: &str = "#a855f7";
pub const TONE_MUTED: &str = "#94a3b8";

// Fraction of a path lit by a travelling highlight
pub const TRAVEL_DASH_FRACTION: f64 = 0.15;

// Grain tiles are generated once per seed; this many dots per 64x64 block
pub const GRAIN_DOTS_PER_BLOCK: u32 = 96;
