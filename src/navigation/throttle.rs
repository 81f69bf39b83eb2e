use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Coalesces bursts of scroll events into one animation frame.
#[derive(Clone, Debug, Default)]
pub struct FrameThrottle {
    ticking: Rc<Cell<bool>>,
}

impl FrameThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the next frame. False while a frame is already pending.
    fn try_begin(&self) -> bool {
        !self.ticking.replace(true)
    }

    fn finish(&self) {
        self.ticking.set(false);
    }

    /// Runs `work` on the next animation frame unless one is already queued.
    pub fn request(&self, work: impl FnOnce() + 'static) {
        if !self.try_begin() {
            return;
        }
        let Some(window) = web_sys::window() else {
            self.finish();
            return;
        };
        let throttle = self.clone();
        let frame = Closure::once_into_js(move || {
            work();
            throttle.finish();
        });
        if window
            .request_animation_frame(frame.unchecked_ref())
            .is_err()
        {
            self.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_frame_is_claimed_at_a_time() {
        let throttle = FrameThrottle::new();
        assert!(throttle.try_begin());
        assert!(!throttle.try_begin());
        assert!(!throttle.clone().try_begin());
        throttle.finish();
        assert!(throttle.try_begin());
    }
}
