use crate::constants::*;
use ambient_core::{EnvironmentSignals, SignalSource, WIDE_MIN_WIDTH};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Match the canvas backing store to its CSS box times devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = ((rect.width() * dpr) as u32).max(1);
        let h_px = ((rect.height() * dpr) as u32).max(1);
        if canvas.width() != w_px {
            canvas.set_width(w_px);
        }
        if canvas.height() != h_px {
            canvas.set_height(h_px);
        }
    }
    (canvas.width(), canvas.height())
}

pub fn prefers_reduced_motion(window: &web::Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(false)
}

/// Live browser signals. The power flag is filled in asynchronously by
/// `power::watch_battery` and stays `None` where the Battery API is missing.
#[derive(Clone, Default)]
pub struct BrowserSignals {
    pub low_power: Rc<Cell<Option<bool>>>,
}

impl SignalSource for BrowserSignals {
    fn read(&self) -> EnvironmentSignals {
        let Some(window) = web::window() else {
            return EnvironmentSignals::default();
        };
        let viewport_width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(WIDE_MIN_WIDTH);
        EnvironmentSignals {
            viewport_width,
            prefers_reduced_motion: prefers_reduced_motion(&window),
            low_power: self.low_power.get(),
        }
    }
}

/// Call `on_change` after window resizes and reduced-motion preference flips.
pub fn wire_environment_listeners(on_change: impl Fn() + 'static) {
    let Some(window) = web::window() else {
        return;
    };
    let on_change = Rc::new(on_change);

    let resize_cb = on_change.clone();
    let resize_closure = Closure::wrap(Box::new(move || resize_cb()) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    resize_closure.forget();

    if let Ok(Some(mql)) = window.match_media(REDUCED_MOTION_QUERY) {
        let motion_cb = on_change.clone();
        let motion_closure = Closure::wrap(Box::new(move |_ev: web::MediaQueryListEvent| {
            motion_cb()
        }) as Box<dyn FnMut(web::MediaQueryListEvent)>);
        _ = mql.add_event_listener_with_callback("change", motion_closure.as_ref().unchecked_ref());
        motion_closure.forget();
    }
}

/// Insert a full-bleed, non-interactive canvas as the region's first child.
pub fn create_region_canvas(
    region: &web::Element,
    handle: u32,
) -> anyhow::Result<(web::HtmlCanvasElement, web::CanvasRenderingContext2d)> {
    let document = window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_class_name(CANVAS_CLASS);
    _ = canvas.set_attribute("style", CANVAS_STYLE);
    _ = canvas.set_attribute("aria-hidden", "true");
    _ = region.set_attribute(REGION_ATTR, &handle.to_string());

    // The canvas is absolutely positioned; anchor it to the region
    if let Some(el) = region.dyn_ref::<web::HtmlElement>() {
        let style = el.style();
        if style.get_property_value("position").unwrap_or_default().is_empty() {
            _ = style.set_property("position", "relative");
        }
    }
    region
        .prepend_with_node_1(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    sync_canvas_backing_size(&canvas);
    Ok((canvas, ctx))
}

pub fn remove_region_canvas(region: &web::Element, canvas: &web::HtmlCanvasElement) {
    canvas.remove();
    _ = region.remove_attribute(REGION_ATTR);
}
