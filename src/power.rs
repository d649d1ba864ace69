use ambient_core::battery_is_low;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn read_battery(battery: &JsValue) -> Option<bool> {
    let charging = js_sys::Reflect::get(battery, &JsValue::from_str("charging"))
        .ok()
        .and_then(|v| v.as_bool());
    let level = js_sys::Reflect::get(battery, &JsValue::from_str("level"))
        .ok()
        .and_then(|v| v.as_f64());
    battery_is_low(charging, level)
}

/// Resolve `navigator.getBattery()` once and keep `low_power` current.
/// Browsers without the Battery API leave it at `None`.
pub fn watch_battery(low_power: Rc<Cell<Option<bool>>>, on_change: impl Fn() + 'static) {
    let Some(window) = web::window() else {
        return;
    };
    let navigator = window.navigator();
    let get_battery = match js_sys::Reflect::get(&navigator, &JsValue::from_str("getBattery")) {
        Ok(f) if f.is_function() => f.unchecked_into::<js_sys::Function>(),
        _ => {
            log::debug!("[power] Battery API unavailable; assuming mains power");
            return;
        }
    };
    let promise = match get_battery
        .call0(&navigator)
        .ok()
        .and_then(|p| p.dyn_into::<js_sys::Promise>().ok())
    {
        Some(p) => p,
        None => return,
    };

    spawn_local(async move {
        let battery = match JsFuture::from(promise).await {
            Ok(b) => b,
            Err(e) => {
                log::debug!("[power] getBattery rejected: {:?}", e);
                return;
            }
        };
        low_power.set(read_battery(&battery));
        on_change();

        let on_change = Rc::new(on_change);
        let Some(target) = battery.dyn_ref::<web::EventTarget>() else {
            return;
        };
        for event in ["chargingchange", "levelchange"] {
            let battery_cb = battery.clone();
            let low_power_cb = low_power.clone();
            let on_change_cb = on_change.clone();
            let closure = Closure::wrap(Box::new(move || {
                let next = read_battery(&battery_cb);
                if next != low_power_cb.get() {
                    low_power_cb.set(next);
                    on_change_cb();
                }
            }) as Box<dyn FnMut()>);
            _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    });
}
