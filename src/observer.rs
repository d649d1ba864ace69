use crate::constants::*;
use ambient_core::{classify, Proximity, Rect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

type EntryCallback = Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>;

/// Proximity watcher for one region element. Dropping it disconnects.
pub struct ProximityWatcher {
    observer: web::IntersectionObserver,
    _callback: EntryCallback,
}

impl ProximityWatcher {
    /// `on_change(true)` fires when the element comes within the margin,
    /// `on_change(false)` when it leaves.
    #[allow(deprecated)]
    pub fn observe(
        element: &web::Element,
        mut on_change: impl FnMut(bool) + 'static,
    ) -> anyhow::Result<Self> {
        let callback: EntryCallback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _obs: web::IntersectionObserver| {
                // Only the latest entry matters when several queue up
                let latest = entries
                    .iter()
                    .filter_map(|e| e.dyn_into::<web::IntersectionObserverEntry>().ok())
                    .last();
                if let Some(entry) = latest {
                    on_change(entry.is_intersecting());
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

        let mut init = web::IntersectionObserverInit::new();
        init.root_margin(OBSERVER_ROOT_MARGIN);
        init.threshold(&JsValue::from_f64(OBSERVER_THRESHOLD));
        let observer = web::IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &init,
        )
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        observer.observe(element);
        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for ProximityWatcher {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Where `element` sits relative to the current viewport.
pub fn element_proximity(element: &web::Element) -> Proximity {
    let Some(window) = web::window() else {
        return Proximity::Outside;
    };
    let r = element.get_bounding_client_rect();
    let vw = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let vh = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    classify(
        &Rect::new(r.left(), r.top(), r.width(), r.height()),
        &Rect::new(0.0, 0.0, vw, vh),
    )
}
