use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A requestAnimationFrame loop for one region. The callback returns whether
/// it wants another frame; `stop` cancels any frame already requested.
pub struct RegionLoop {
    tick: Tick,
    raf_id: Rc<Cell<Option<i32>>>,
}

fn request(tick: &Tick, raf_id: &Rc<Cell<Option<i32>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        if let Ok(id) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            raf_id.set(Some(id));
        }
    }
}

impl RegionLoop {
    pub fn new(mut on_frame: impl FnMut(f64) -> bool + 'static) -> Self {
        let tick: Tick = Rc::new(RefCell::new(None));
        let raf_id = Rc::new(Cell::new(None));
        let tick_clone = tick.clone();
        let raf_clone = raf_id.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            raf_clone.set(None);
            if on_frame(ts) {
                request(&tick_clone, &raf_clone);
            }
        }) as Box<dyn FnMut(f64)>));
        Self { tick, raf_id }
    }

    /// Request the next frame unless one is already pending.
    pub fn start(&self) {
        if self.raf_id.get().is_none() {
            request(&self.tick, &self.raf_id);
        }
    }

    pub fn stop(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.raf_id.get().is_some()
    }
}

impl Drop for RegionLoop {
    fn drop(&mut self) {
        self.stop();
        // break the closure -> tick reference cycle
        self.tick.borrow_mut().take();
    }
}
