// Host-side tests for device capability probing.

use ambient_core::*;

fn signals(width: f64, reduced: bool) -> EnvironmentSignals {
    EnvironmentSignals {
        viewport_width: width,
        prefers_reduced_motion: reduced,
        low_power: None,
    }
}

fn probe(width: f64, reduced: bool) -> DeviceTier {
    CapabilityProbe::new(StaticSignals(signals(width, reduced))).probe()
}

#[test]
fn narrow_viewport_is_low_tier() {
    let tier = probe(500.0, false);
    assert_eq!(tier.level, TierLevel::Low);
    assert!(tier.is_narrow_viewport);
    assert!(!tier.prefers_reduced_motion);
}

#[test]
fn reduced_motion_forces_low_tier_on_wide_viewports() {
    let tier = probe(1200.0, true);
    assert_eq!(tier.level, TierLevel::Low);
    assert!(!tier.is_narrow_viewport);
    assert!(tier.prefers_reduced_motion);
    assert!(!tier.allows_motion());
}

#[test]
fn width_thresholds() {
    assert_eq!(probe(767.0, false).level, TierLevel::Low);
    assert_eq!(probe(768.0, false).level, TierLevel::Medium);
    assert_eq!(probe(1023.0, false).level, TierLevel::Medium);
    assert_eq!(probe(1024.0, false).level, TierLevel::High);
    assert_eq!(probe(2560.0, false).level, TierLevel::High);
}

#[test]
fn garbage_widths_are_treated_as_narrow() {
    assert_eq!(WidthClass::of(f64::NAN), WidthClass::Narrow);
    assert_eq!(WidthClass::of(-1.0), WidthClass::Narrow);
    assert_eq!(probe(f64::NAN, false).level, TierLevel::Low);
}

#[test]
fn probing_is_deterministic() {
    let s = signals(900.0, false);
    assert_eq!(DeviceTier::from_signals(&s), DeviceTier::from_signals(&s));
    let p = CapabilityProbe::new(StaticSignals(s));
    assert_eq!(p.probe(), p.probe());
}

#[test]
fn scales_follow_the_tier() {
    let high = probe(1400.0, false);
    let medium = probe(900.0, false);
    let low = probe(400.0, false);
    assert!(high.particle_scale() > medium.particle_scale());
    assert!(medium.particle_scale() > low.particle_scale());
    assert!(high.cell_scale() < medium.cell_scale());
    assert!(medium.cell_scale() < low.cell_scale());
    assert_eq!(high.particle_budget(), POOL_BUDGET_HIGH);
    assert_eq!(medium.particle_budget(), POOL_BUDGET_MEDIUM);
    assert_eq!(low.particle_budget(), POOL_BUDGET_LOW);
}

#[test]
fn low_power_halves_the_budget_without_changing_the_tier() {
    let tier = DeviceTier::from_signals(&EnvironmentSignals {
        viewport_width: 1400.0,
        prefers_reduced_motion: false,
        low_power: Some(true),
    });
    assert_eq!(tier.level, TierLevel::High);
    assert!(tier.is_low_power);
    assert_eq!(tier.particle_budget(), POOL_BUDGET_HIGH / 2);

    let unknown = DeviceTier::from_signals(&signals(1400.0, false));
    assert!(!unknown.is_low_power);
}

#[test]
fn default_tier_matches_default_signals() {
    assert_eq!(
        DeviceTier::default(),
        DeviceTier::from_signals(&EnvironmentSignals::default())
    );
    assert_eq!(DeviceTier::default().level, TierLevel::High);
}

#[test]
fn battery_classification() {
    assert_eq!(battery_is_low(Some(true), Some(0.05)), Some(false));
    assert_eq!(battery_is_low(Some(false), Some(0.1)), Some(true));
    assert_eq!(battery_is_low(Some(false), Some(0.8)), Some(false));
    assert_eq!(battery_is_low(Some(false), None), None);
    assert_eq!(battery_is_low(None, Some(0.1)), None);
}
