#![cfg(target_arch = "wasm32")]
use ambient_core::{
    Backgrounds, CapabilityProbe, MountOptions, Phase, Proximity, RegionHandle, SignalSource,
};
use fnv::FnvHashMap;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod dom;
mod frame;
mod observer;
mod paint;
mod power;

use frame::RegionLoop;
use observer::ProximityWatcher;
use paint::Painter;

struct MountedRegion {
    element: web::Element,
    canvas: web::HtmlCanvasElement,
    painter: Painter,
    watcher: Option<ProximityWatcher>,
    frames: Rc<RegionLoop>,
}

struct Host {
    backgrounds: Backgrounds,
    signals: dom::BrowserSignals,
    mounted: FnvHashMap<RegionHandle, MountedRegion>,
    next_handle: u32,
}

impl Host {
    fn new() -> Self {
        let signals = dom::BrowserSignals::default();
        let tier = CapabilityProbe::new(signals.clone()).probe();
        log::info!(
            "[web] tier {:?} (narrow={} reduced_motion={})",
            tier.level,
            tier.is_narrow_viewport,
            tier.prefers_reduced_motion
        );
        Self {
            backgrounds: Backgrounds::new(tier),
            signals,
            mounted: FnvHashMap::default(),
            next_handle: 1,
        }
    }

    fn paint(&mut self, region: RegionHandle, t_sec: f32) {
        let (Some(m), Some(composer)) = (self.mounted.get_mut(&region), self.backgrounds.get(region))
        else {
            return;
        };
        m.painter.paint(composer, t_sec);
    }

    fn on_proximity(&mut self, region: RegionHandle, near: bool) {
        let Some(m) = self.mounted.get(&region) else {
            return;
        };
        let frames = m.frames.clone();
        if near {
            self.backgrounds.on_proximity_enter(region);
            // the first frame confirms visibility
            frames.start();
        } else {
            frames.stop();
            self.backgrounds.on_proximity_exit(region);
            if let Some(m) = self.mounted.get(&region) {
                m.painter.clear();
            }
        }
    }

    /// One rAF tick. Returns whether the region wants another.
    fn on_frame(&mut self, region: RegionHandle, ts: f64) -> bool {
        let now = Instant::now();
        let t_sec = (ts / 1000.0) as f32;
        let (Some(m), Some(composer)) = (self.mounted.get(&region), self.backgrounds.get(region))
        else {
            return false;
        };
        match composer.phase() {
            Phase::Pending => match observer::element_proximity(&m.element) {
                Proximity::Visible => {
                    self.backgrounds.confirm_visible(region, now);
                    self.paint(region, t_sec);
                    self.backgrounds
                        .get(region)
                        .map(|c| c.is_animated() && c.phase().is_live())
                        .unwrap_or(false)
                }
                Proximity::Near => true,
                Proximity::Outside => {
                    self.backgrounds.on_proximity_exit(region);
                    false
                }
            },
            Phase::Active | Phase::Degraded => {
                let outcome = self.backgrounds.frame(region, now);
                if let Some(s) = outcome.sample {
                    log::debug!("[web] region {} fps {:.1}", region.0, s.fps);
                }
                self.paint(region, t_sec);
                outcome.rearm
            }
            Phase::Dormant | Phase::TornDown => false,
        }
    }

    /// Re-probe after resize, preference or battery changes and bring every
    /// live region in line with the (possibly new) tier.
    fn on_environment_change(&mut self) {
        let now = Instant::now();
        let signals = self.signals.read();
        self.backgrounds.update_environment(&signals, now);
        let regions: Vec<RegionHandle> = self.mounted.keys().copied().collect();
        for region in regions {
            let Some(composer) = self.backgrounds.get(region) else {
                continue;
            };
            if !composer.phase().is_live() {
                continue;
            }
            let animated = composer.is_animated();
            if let Some(m) = self.mounted.get(&region) {
                if animated {
                    m.frames.start();
                } else {
                    m.frames.stop();
                }
            }
            // static scenes carry no animations, so any time will do
            if !animated {
                self.paint(region, 0.0);
            }
        }
    }

    fn mount(
        &mut self,
        element: web::Element,
        composition: &str,
        options: MountOptions,
    ) -> anyhow::Result<RegionHandle> {
        let region = RegionHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1).max(1);
        let (canvas, ctx) = dom::create_region_canvas(&element, region.0)?;

        let frames = Rc::new(RegionLoop::new(move |ts| {
            // a busy host retries on the next frame
            with_host(|h| h.on_frame(region, ts)).unwrap_or(true)
        }));
        self.backgrounds.mount_background(region, composition, options);
        self.mounted.insert(
            region,
            MountedRegion {
                element: element.clone(),
                canvas: canvas.clone(),
                painter: Painter::new(canvas.clone(), ctx),
                frames,
                watcher: None,
            },
        );
        let watcher = match ProximityWatcher::observe(&element, move |near| {
            with_host(|h| h.on_proximity(region, near));
        }) {
            Ok(w) => w,
            Err(e) => {
                self.unmount(region);
                return Err(e);
            }
        };
        if let Some(m) = self.mounted.get_mut(&region) {
            m.watcher = Some(watcher);
        }
        Ok(region)
    }

    fn unmount(&mut self, region: RegionHandle) {
        if let Some(m) = self.mounted.remove(&region) {
            m.frames.stop();
            drop(m.watcher);
            dom::remove_region_canvas(&m.element, &m.canvas);
        }
        if self.backgrounds.unmount_background(region).is_some() {
            log::info!("[web] region {} unmounted", region.0);
        }
    }
}

thread_local! {
    static HOST: RefCell<Option<Host>> = const { RefCell::new(None) };
}

/// Run `f` against the host, creating it on first use. Returns `None` when
/// the host is already borrowed higher up the stack.
fn with_host<R>(f: impl FnOnce(&mut Host) -> R) -> Option<R> {
    HOST.with(|cell| {
        let mut slot = cell.try_borrow_mut().ok()?;
        Some(f(slot.get_or_insert_with(Host::new)))
    })
}

fn wire_environment() {
    let signals = with_host(|h| h.signals.clone()).unwrap_or_default();
    dom::wire_environment_listeners(|| {
        with_host(Host::on_environment_change);
    });
    power::watch_battery(signals.low_power, || {
        with_host(Host::on_environment_change);
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("[web] ambient backgrounds starting");
    wire_environment();
    Ok(())
}

/// Attach an ambient background to `element`. Returns a handle for
/// `unmountBackground`, or 0 if the canvas could not be created.
#[wasm_bindgen(js_name = mountBackground)]
pub fn mount_background(
    element: web::Element,
    composition: &str,
    intensity: Option<String>,
    animated: Option<bool>,
) -> u32 {
    let options = MountOptions::from_host(intensity.as_deref(), animated);
    let result = with_host(|h| h.mount(element, composition, options));
    match result {
        Some(Ok(region)) => region.0,
        Some(Err(e)) => {
            log::error!("[web] mount `{}` failed: {:?}", composition, e);
            0
        }
        None => 0,
    }
}

#[wasm_bindgen(js_name = unmountBackground)]
pub fn unmount_background(handle: u32) {
    with_host(|h| h.unmount(RegionHandle(handle)));
}
