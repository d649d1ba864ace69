// Shared tuning constants for probing, pooling, monitoring and composition.

// Viewport width thresholds (CSS pixels). Bit-exact with existing visual baselines.
pub const NARROW_MAX_WIDTH: f64 = 768.0; // width < 768 is narrow
pub const WIDE_MIN_WIDTH: f64 = 1024.0; // width >= 1024 is wide

// Distance outside the visible viewport at which a dormant region becomes pending
pub const PROXIMITY_MARGIN_PX: f64 = 50.0;

// Frame monitor
pub const FPS_WINDOW_MS: f64 = 1000.0;
pub const DEFAULT_FPS: f32 = 60.0; // reported before the first window closes and after stop
pub const GOOD_FPS_THRESHOLD: f32 = 45.0;
pub const LOW_FPS_THRESHOLD: f32 = 30.0;
pub const DEGRADE_AFTER_LOW_WINDOWS: u32 = 2;

// Particle budget per tier (pool capacity for one region)
pub const POOL_BUDGET_HIGH: usize = 64;
pub const POOL_BUDGET_MEDIUM: usize = 40;
pub const POOL_BUDGET_LOW: usize = 20;

// Per-tier scaling
pub const PARTICLE_SCALE_HIGH: f32 = 1.0;
pub const PARTICLE_SCALE_MEDIUM: f32 = 0.6;
pub const PARTICLE_SCALE_LOW: f32 = 0.3;
pub const CELL_SCALE_HIGH: f32 = 1.0;
pub const CELL_SCALE_MEDIUM: f32 = 1.25;
pub const CELL_SCALE_LOW: f32 = 1.5;
pub const LOW_POWER_BUDGET_FACTOR: f32 = 0.5;

// Battery below this level while discharging counts as low power
pub const LOW_BATTERY_LEVEL: f64 = 0.2;

// Upper bounds on effect counts; anything larger is clamped
pub const MAX_GRID_SCAN_LINES: i32 = 8;
pub const MAX_EFFECT_ITEMS: i32 = 32; // flow lines, orbs, waves, pulses
pub const MAX_MATRIX_SIDE: i32 = 64; // circuit and dot-matrix rows/cols
pub const MAX_PATH_POINTS: i32 = 256; // flow-line segments, waveform points
pub const MAX_PARTICLES: i32 = POOL_BUDGET_HIGH as i32;

// Degraded regions render this fraction of their particles
pub const DEGRADED_PARTICLE_FACTOR: f32 = 0.5;

// Connection lines per particle are capped to keep the line count linear
pub const MAX_CONNECTIONS_PER_PARTICLE: usize = 3;

// Layout coordinates live in a [0, 100] percentage square
pub const LAYOUT_EXTENT: f32 = 100.0;

// Seed mixing constant (golden ratio), used to derive per-region and per-effect seeds
pub const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

// Pixel-denominated params are mapped onto the percentage square as if the
// region were this many pixels wide.
pub const LAYOUT_REFERENCE_PX: f32 = 1000.0;
