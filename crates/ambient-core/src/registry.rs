//! The surface page code talks to: mount, unmount and lifecycle events keyed
//! by region handle. Each region gets its own composer, pool and monitor.

use crate::composer::*;
use crate::composition::{CompositionSpec, MountOptions};
use crate::probe::{DeviceTier, EnvironmentSignals};
use fnv::FnvHashMap;
use instant::Instant;

#[derive(Debug, Default)]
pub struct Backgrounds {
    tier: DeviceTier,
    config: ComposerConfig,
    regions: FnvHashMap<RegionHandle, BackgroundComposer>,
}

impl Backgrounds {
    pub fn new(tier: DeviceTier) -> Self {
        Self::with_config(tier, ComposerConfig::default())
    }

    pub fn with_config(tier: DeviceTier, config: ComposerConfig) -> Self {
        Self {
            tier,
            config,
            regions: FnvHashMap::default(),
        }
    }

    /// Start the dormant lifecycle for `region`. Unknown names mount the
    /// default grid. Mounting an already mounted region replaces it.
    pub fn mount_background(
        &mut self,
        region: RegionHandle,
        composition_name: &str,
        options: MountOptions,
    ) -> &BackgroundComposer {
        if let Some(mut previous) = self.regions.remove(&region) {
            log::debug!("[registry] region {} remounted", region.0);
            previous.teardown();
        }
        let composer = BackgroundComposer::new(
            region,
            CompositionSpec::lookup(composition_name),
            options,
            self.tier,
            self.config,
        );
        self.regions.entry(region).or_insert(composer)
    }

    /// Tear down and forget `region`, handing back the torn-down composer.
    /// Unknown regions are ignored.
    pub fn unmount_background(&mut self, region: RegionHandle) -> Option<BackgroundComposer> {
        let mut composer = self.regions.remove(&region)?;
        composer.teardown();
        Some(composer)
    }

    pub fn on_proximity_enter(&mut self, region: RegionHandle) {
        if let Some(c) = self.regions.get_mut(&region) {
            c.on_proximity_enter();
        }
    }

    pub fn on_proximity_exit(&mut self, region: RegionHandle) {
        if let Some(c) = self.regions.get_mut(&region) {
            c.on_proximity_exit();
        }
    }

    pub fn confirm_visible(&mut self, region: RegionHandle, now: Instant) {
        if let Some(c) = self.regions.get_mut(&region) {
            c.confirm_visible(now);
        }
    }

    pub fn frame(&mut self, region: RegionHandle, now: Instant) -> FrameOutcome {
        self.regions
            .get_mut(&region)
            .map(|c| c.frame(now))
            .unwrap_or_default()
    }

    /// Re-probe after a resize or preference change. Returns whether the tier changed.
    pub fn update_environment(&mut self, signals: &EnvironmentSignals, now: Instant) -> bool {
        let tier = DeviceTier::from_signals(signals);
        if tier == self.tier {
            return false;
        }
        log::info!("[registry] tier {:?} -> {:?}", self.tier.level, tier.level);
        self.tier = tier;
        for c in self.regions.values_mut() {
            c.retier(tier, now);
        }
        true
    }

    pub fn get(&self, region: RegionHandle) -> Option<&BackgroundComposer> {
        self.regions.get(&region)
    }

    pub fn tier(&self) -> DeviceTier {
        self.tier
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn regions(&self) -> impl Iterator<Item = &BackgroundComposer> + '_ {
        self.regions.values()
    }
}
