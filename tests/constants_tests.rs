// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include its constants module directly.

#![allow(dead_code)]
mod web_constants {
    include!("../src/constants.rs");
}

use ambient_core::constants::*;
use web_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn tier_thresholds_are_ordered() {
    assert!(NARROW_MAX_WIDTH < WIDE_MIN_WIDTH);
    assert!(LOW_FPS_THRESHOLD < GOOD_FPS_THRESHOLD);
    assert!(GOOD_FPS_THRESHOLD <= DEFAULT_FPS);
    assert!(FPS_WINDOW_MS > 0.0);
    assert!(DEGRADE_AFTER_LOW_WINDOWS >= 1);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn budgets_shrink_with_the_tier() {
    assert!(POOL_BUDGET_HIGH > POOL_BUDGET_MEDIUM);
    assert!(POOL_BUDGET_MEDIUM > POOL_BUDGET_LOW);
    assert!(POOL_BUDGET_LOW > 0);
    assert!(PARTICLE_SCALE_HIGH > PARTICLE_SCALE_MEDIUM);
    assert!(PARTICLE_SCALE_MEDIUM > PARTICLE_SCALE_LOW);
    assert!(CELL_SCALE_HIGH < CELL_SCALE_MEDIUM);
    assert!(CELL_SCALE_MEDIUM < CELL_SCALE_LOW);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn factors_are_fractions() {
    for f in [LOW_POWER_BUDGET_FACTOR, DEGRADED_PARTICLE_FACTOR] {
        assert!(f > 0.0 && f < 1.0);
    }
    assert!(LOW_BATTERY_LEVEL > 0.0 && LOW_BATTERY_LEVEL < 1.0);
    assert!(TRAVEL_DASH_FRACTION > 0.0 && TRAVEL_DASH_FRACTION < 1.0);
}

#[test]
fn observer_margin_matches_the_proximity_margin() {
    let px: f64 = OBSERVER_ROOT_MARGIN
        .trim_end_matches("px")
        .parse()
        .expect("margin is in px");
    assert_eq!(px, PROXIMITY_MARGIN_PX);
    assert_eq!(OBSERVER_THRESHOLD, 0.0);
}

#[test]
fn palette_entries_are_hex_colors() {
    for c in [TONE_PRIMARY, TONE_SECONDARY, TONE_ACCENT, TONE_MUTED] {
        assert!(c.starts_with('#') && c.len() == 7, "{c}");
        assert!(c[1..].chars().all(|ch| ch.is_ascii_hexdigit()));
    }
}

#[test]
fn canvas_never_intercepts_input() {
    assert!(CANVAS_STYLE.contains("pointer-events:none"));
    assert!(CANVAS_STYLE.contains("position:absolute"));
}
