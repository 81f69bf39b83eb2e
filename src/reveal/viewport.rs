use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::DomError;

use super::engine::ElementId;

/// Axis-aligned box in CSS pixels, viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Overlap of the two boxes, touching edges included.
    fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (right >= left && bottom >= top).then(|| Rect::new(left, top, right - left, bottom - top))
    }
}

impl From<web_sys::DomRect> for Rect {
    fn from(rect: web_sys::DomRect) -> Self {
        Rect::new(rect.x(), rect.y(), rect.width(), rect.height())
    }
}

/// Root margin in pixels. Positive values grow the viewport, negative shrink it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub fn to_css(&self) -> String {
        format!(
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the element's area that must be inside the root.
    pub threshold: f64,
    pub root_margin: Margin,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: Margin::default(),
        }
    }
}

impl ObserverOptions {
    /// 10% visible, counted only once the element is 50px clear of the bottom edge.
    pub fn reveal() -> Self {
        Self {
            threshold: 0.1,
            root_margin: Margin {
                bottom: -50.0,
                ..Margin::default()
            },
        }
    }

    /// The viewport after the root margin is applied.
    pub fn root(&self, viewport: Rect) -> Rect {
        let m = self.root_margin;
        Rect::new(
            viewport.x - m.left,
            viewport.y - m.top,
            viewport.width + m.left + m.right,
            viewport.height + m.top + m.bottom,
        )
    }

    /// Whether an element at `element` counts as intersecting `viewport`.
    ///
    /// Same rule the browser applies: the visible ratio is measured against the
    /// margin-adjusted root, and a zero threshold accepts edge contact.
    pub fn evaluate(&self, element: Rect, viewport: Rect) -> bool {
        let root = self.root(viewport);
        let Some(overlap) = element.intersection(&root) else {
            return false;
        };
        if self.threshold <= 0.0 {
            return true;
        }
        let area = element.area();
        let ratio = if area == 0.0 { 1.0 } else { overlap.area() / area };
        ratio >= self.threshold
    }

    fn to_init(&self) -> IntersectionObserverInit {
        let init = IntersectionObserverInit::new();
        init.set_root_margin(&self.root_margin.to_css());
        init.set_threshold(&JsValue::from_f64(self.threshold));
        init
    }
}

/// Registration side of a viewport watcher, keyed by engine id.
pub trait ViewportObserver {
    fn observe(&mut self, id: ElementId);
    fn unobserve(&mut self, id: ElementId);
}

/// A native `IntersectionObserver` together with the closure it calls into.
pub struct DomObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl DomObserver {
    pub fn is_supported() -> bool {
        web_sys::window()
            .map(|window| {
                js_sys::Reflect::has(&window, &JsValue::from_str("IntersectionObserver"))
                    .unwrap_or(false)
            })
            .unwrap_or(false)
    }

    pub fn new<F>(options: &ObserverOptions, mut on_entries: F) -> Result<Self, DomError>
    where
        F: FnMut(Vec<IntersectionObserverEntry>, &IntersectionObserver) + 'static,
    {
        let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            let entries = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .collect();
            on_entries(entries, &observer);
        }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let observer = IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &options.to_init(),
        )?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }

    pub fn unobserve(&self, element: &Element) {
        self.observer.unobserve(element);
    }
}

impl Drop for DomObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 1280.0,
        height: 800.0,
    };

    #[test]
    fn reveal_margin_serializes_for_the_browser() {
        assert_eq!(
            ObserverOptions::reveal().root_margin.to_css(),
            "0px 0px -50px 0px"
        );
    }

    #[test]
    fn bottom_margin_shrinks_the_root() {
        let root = ObserverOptions::reveal().root(VIEWPORT);
        assert_eq!(root, Rect::new(0.0, 0.0, 1280.0, 750.0));
    }

    #[test]
    fn element_needs_ten_percent_above_the_margin() {
        let reveal = ObserverOptions::reveal();
        // 200px tall card whose top sits 15px above the shrunken bottom edge: 7.5% inside.
        assert!(!reveal.evaluate(Rect::new(0.0, 735.0, 300.0, 200.0), VIEWPORT));
        // 20px inside: exactly 10%.
        assert!(reveal.evaluate(Rect::new(0.0, 730.0, 300.0, 200.0), VIEWPORT));
        // Fully in the bottom 50px band does not count at all.
        assert!(!reveal.evaluate(Rect::new(0.0, 760.0, 300.0, 30.0), VIEWPORT));
    }

    #[test]
    fn default_options_accept_any_contact() {
        let lazy = ObserverOptions::default();
        assert!(lazy.evaluate(Rect::new(0.0, 799.0, 100.0, 100.0), VIEWPORT));
        assert!(lazy.evaluate(Rect::new(0.0, 800.0, 100.0, 100.0), VIEWPORT));
        assert!(!lazy.evaluate(Rect::new(0.0, 801.0, 100.0, 100.0), VIEWPORT));
        assert!(!lazy.evaluate(Rect::new(0.0, -300.0, 100.0, 100.0), VIEWPORT));
    }

    #[test]
    fn empty_elements_count_when_inside() {
        let reveal = ObserverOptions::reveal();
        assert!(reveal.evaluate(Rect::new(10.0, 10.0, 0.0, 0.0), VIEWPORT));
        assert!(!reveal.evaluate(Rect::new(10.0, 790.0, 0.0, 0.0), VIEWPORT));
    }
}
