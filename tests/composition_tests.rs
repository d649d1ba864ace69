// Host-side tests for the composition catalog, the region registry and
// proximity classification.

use ambient_core::*;
use instant::Instant;

fn tier_for(width: f64) -> DeviceTier {
    DeviceTier::from_signals(&EnvironmentSignals {
        viewport_width: width,
        ..Default::default()
    })
}

#[test]
fn every_named_preset_resolves() {
    for name in CompositionName::ALL {
        let spec = CompositionSpec::lookup(name.id());
        assert_eq!(spec.name, Some(name));
        assert_eq!(spec.id(), name.id());
        assert!(!spec.effects.is_empty(), "{} has no effects", name.id());
        let resolved = spec.resolve(&tier_for(1400.0), &MountOptions::default());
        assert_eq!(resolved.id, name.id());
        assert!(resolved.animated);
    }
}

#[test]
fn unknown_name_mounts_the_default_grid() {
    let spec = CompositionSpec::lookup("nonexistent");
    assert_eq!(spec.name, None);
    assert_eq!(spec.id(), "default");
    assert_eq!(spec.variant, Variant::Grid);
    assert_eq!(spec.intensity, Intensity::Medium);
    assert_eq!(spec.effects.len(), 1);
    assert_eq!(spec.effects[0].kind(), EffectKind::Grid);
    assert_eq!(spec, CompositionSpec::fallback());
}

#[test]
fn names_parse_case_insensitively() {
    assert_eq!("Hero".parse::<CompositionName>().unwrap(), CompositionName::Hero);
    assert_eq!(" cta ".parse::<CompositionName>().unwrap(), CompositionName::Cta);
    assert!(matches!(
        "nope".parse::<CompositionName>(),
        Err(AmbientError::UnknownComposition(_))
    ));
}

#[test]
fn intensity_styles() {
    assert_eq!(
        Intensity::Low.style(),
        IntensityStyle {
            opacity: 0.3,
            blur_radius: 40.0
        }
    );
    assert_eq!(
        Intensity::Medium.style(),
        IntensityStyle {
            opacity: 0.5,
            blur_radius: 60.0
        }
    );
    assert_eq!(
        Intensity::High.style(),
        IntensityStyle {
            opacity: 0.7,
            blur_radius: 80.0
        }
    );
    assert_eq!(Intensity::High.step_down(), Intensity::Medium);
    assert_eq!(Intensity::Medium.step_down(), Intensity::Low);
    assert_eq!(Intensity::Low.step_down(), Intensity::Low);
}

#[test]
fn mount_options_override_the_preset() {
    let spec = CompositionSpec::preset(CompositionName::Hero);
    let options = MountOptions::from_host(Some("low"), Some(false));
    let resolved = spec.resolve(&tier_for(1400.0), &options);
    assert_eq!(resolved.intensity, Intensity::Low);
    assert!(!resolved.animated);

    // an unrecognised intensity keeps the preset's own
    let options = MountOptions::from_host(Some("blinding"), None);
    assert_eq!(options.intensity, None);
    let resolved = spec.resolve(&tier_for(1400.0), &options);
    assert_eq!(resolved.intensity, Intensity::High);
    assert!(resolved.animated);
}

#[test]
fn resolution_scales_with_the_tier() {
    let spec = CompositionSpec::preset(CompositionName::Hero);
    let high = spec.resolve(&tier_for(1400.0), &MountOptions::default());
    let medium = spec.resolve(&tier_for(900.0), &MountOptions::default());
    let low = spec.resolve(&tier_for(400.0), &MountOptions::default());
    assert_eq!(high.particle_demand(), 40);
    assert_eq!(medium.particle_demand(), 24);
    assert_eq!(low.particle_demand(), 12);
    assert_eq!(high.effects.len(), low.effects.len());
}

#[test]
fn registry_mounts_dormant_and_replaces_on_remount() {
    let mut bg = Backgrounds::new(tier_for(1400.0));
    let region = RegionHandle(7);
    let c = bg.mount_background(region, "features", MountOptions::default());
    assert_eq!(c.phase(), Phase::Dormant);
    assert_eq!(c.resolved().id, "features");

    bg.mount_background(region, "cta", MountOptions::default());
    assert_eq!(bg.len(), 1);
    assert_eq!(bg.get(region).unwrap().resolved().id, "cta");
}

#[test]
fn registry_unknown_name_falls_back() {
    let mut bg = Backgrounds::new(tier_for(1400.0));
    let c = bg.mount_background(RegionHandle(1), "nonexistent", MountOptions::default());
    assert_eq!(c.resolved().id, "default");
    assert_eq!(c.resolved().intensity, Intensity::Medium);
}

#[test]
fn registry_routes_lifecycle_events() {
    let mut bg = Backgrounds::new(tier_for(1400.0));
    let (a, b) = (RegionHandle(1), RegionHandle(2));
    bg.mount_background(a, "hero", MountOptions::default());
    bg.mount_background(b, "cta", MountOptions::default());

    let now = Instant::now();
    bg.on_proximity_enter(a);
    bg.confirm_visible(a, now);
    assert_eq!(bg.get(a).unwrap().phase(), Phase::Active);
    assert_eq!(bg.get(b).unwrap().phase(), Phase::Dormant);

    // each region has its own pool
    assert_eq!(bg.get(a).unwrap().pool().active_count(), 40);
    assert_eq!(bg.get(b).unwrap().pool().active_count(), 0);

    assert!(bg.frame(a, now).rearm);
    assert!(!bg.frame(b, now).rearm);
    assert_eq!(bg.frame(RegionHandle(99), now), FrameOutcome::default());
}

#[test]
fn unmount_tears_down_and_forgets() {
    let mut bg = Backgrounds::new(tier_for(1400.0));
    let region = RegionHandle(3);
    bg.mount_background(region, "hero", MountOptions::default());
    bg.confirm_visible(region, Instant::now());

    let torn = bg.unmount_background(region).unwrap();
    assert_eq!(torn.phase(), Phase::TornDown);
    assert_eq!(torn.pool().active_count(), 0);
    assert!(!torn.monitor().is_running());
    assert!(torn.monitor().is_performance_good());
    assert!(bg.is_empty());
    assert!(bg.unmount_background(region).is_none());
}

#[test]
fn environment_change_retiers_live_regions() {
    let mut bg = Backgrounds::new(tier_for(1400.0));
    let region = RegionHandle(1);
    bg.mount_background(region, "hero", MountOptions::default());
    let now = Instant::now();
    bg.confirm_visible(region, now);

    let same = EnvironmentSignals {
        viewport_width: 1500.0,
        ..Default::default()
    };
    assert!(!bg.update_environment(&same, now));

    let phone = EnvironmentSignals {
        viewport_width: 390.0,
        ..Default::default()
    };
    assert!(bg.update_environment(&phone, now));
    assert_eq!(bg.tier().level, TierLevel::Low);
    let c = bg.get(region).unwrap();
    assert_eq!(c.phase(), Phase::Active);
    assert_eq!(c.held_particles(), 12);

    // regions mounted afterwards use the new tier
    let later = bg.mount_background(RegionHandle(2), "hero", MountOptions::default());
    assert_eq!(later.resolved().tier.level, TierLevel::Low);
}

#[test]
fn reduced_motion_change_stops_animation() {
    let mut bg = Backgrounds::new(tier_for(1400.0));
    let region = RegionHandle(1);
    bg.mount_background(region, "about", MountOptions::default());
    let now = Instant::now();
    bg.confirm_visible(region, now);
    assert!(bg.get(region).unwrap().is_animated());

    let reduced = EnvironmentSignals {
        viewport_width: 1400.0,
        prefers_reduced_motion: true,
        low_power: None,
    };
    assert!(bg.update_environment(&reduced, now));
    let c = bg.get(region).unwrap();
    assert!(!c.is_animated());
    assert!(!c.monitor().is_running());
    assert!(c.primitives().iter().all(|p| p.animation.is_none()));
}

#[test]
fn proximity_classification() {
    let viewport = Rect::new(0.0, 0.0, 1280.0, 800.0);
    let on_screen = Rect::new(100.0, 100.0, 400.0, 300.0);
    let just_below = Rect::new(0.0, 830.0, 1280.0, 400.0);
    let far_below = Rect::new(0.0, 2000.0, 1280.0, 400.0);
    let touching = Rect::new(0.0, 800.0, 1280.0, 400.0);

    assert_eq!(classify(&on_screen, &viewport), Proximity::Visible);
    assert_eq!(classify(&just_below, &viewport), Proximity::Near);
    assert_eq!(classify(&far_below, &viewport), Proximity::Outside);
    // a shared edge is not on screen
    assert_eq!(classify(&touching, &viewport), Proximity::Near);
}

#[test]
fn negative_rect_sizes_are_clamped() {
    let r = Rect::new(10.0, 10.0, -5.0, -5.0);
    assert_eq!(r.width, 0.0);
    assert_eq!(r.right(), 10.0);
    assert_eq!(r.bottom(), 10.0);
    assert!(!r.intersects(&Rect::new(20.0, 20.0, 100.0, 100.0)));
}
