//! Binds the reveal engine to the rendered page.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, NodeList};

use crate::error::DomError;

use super::engine::{ElementId, RevealEffect, RevealEngine, RevealTarget};
use super::flowchart::FlowPart;
use super::discovery::discover;
use super::role::Role;
use super::scheduler::TimeoutScheduler;
use super::viewport::{DomObserver, ObserverOptions, Rect, ViewportObserver};

pub const VISIBLE_CLASS: &str = "visible";
/// Set on every tracked element so observer entries map back to their id.
pub const REVEAL_ID_ATTR: &str = "data-reveal-id";

struct FlowElements {
    steps: Vec<Element>,
    arrows: Vec<Element>,
}

enum Watcher {
    Native(DomObserver),
    Scroll(ScrollWatcher),
}

struct ScrollWatcher {
    callback: Closure<dyn FnMut()>,
}

impl Drop for ScrollWatcher {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let _ = window
                .remove_event_listener_with_callback("scroll", self.callback.as_ref().unchecked_ref());
        }
    }
}

struct DriverState {
    engine: RevealEngine,
    elements: Vec<Element>,
    flows: HashMap<ElementId, FlowElements>,
    watcher: Option<Watcher>,
}

impl DriverState {
    fn id_of(&self, element: &Element) -> Option<ElementId> {
        let raw = element.get_attribute(REVEAL_ID_ATTR);
        parse_reveal_id(raw.as_deref(), self.elements.len())
            .filter(|id| self.elements.get(id.0) == Some(element))
    }

    fn apply(&mut self, effects: Vec<RevealEffect>) {
        for effect in effects {
            match effect {
                RevealEffect::Reveal(target) => {
                    if let Some(element) = self.target_element(target) {
                        let _ = element.class_list().add_1(VISIBLE_CLASS);
                    }
                }
                RevealEffect::Unobserve(id) => self.unobserve(id),
            }
        }
    }

    fn target_element(&self, target: RevealTarget) -> Option<&Element> {
        match target {
            RevealTarget::Element(id) => self.elements.get(id.0),
            RevealTarget::Flow { container, part } => {
                let flow = self.flows.get(&container)?;
                match part {
                    FlowPart::Step(i) => flow.steps.get(i),
                    FlowPart::Arrow(i) => flow.arrows.get(i),
                }
            }
        }
    }
}

impl ViewportObserver for DriverState {
    fn observe(&mut self, id: ElementId) {
        if !self.engine.is_observed(id) {
            return;
        }
        if let (Some(Watcher::Native(observer)), Some(element)) =
            (&self.watcher, self.elements.get(id.0))
        {
            observer.observe(element);
        }
    }

    // The scroll watcher polls `RevealEngine::observed`, so only the native
    // observer needs telling.
    fn unobserve(&mut self, id: ElementId) {
        if let (Some(Watcher::Native(observer)), Some(element)) =
            (&self.watcher, self.elements.get(id.0))
        {
            observer.unobserve(element);
        }
    }
}

/// Owns the reveal machinery for one page. Dropping it stops observation, and
/// timers still in flight find nothing to reveal.
pub struct RevealDriver {
    _state: Rc<RefCell<DriverState>>,
}

impl RevealDriver {
    /// Discovers the animated elements in `document` and starts watching them.
    pub fn attach(document: &Document) -> Result<Self, DomError> {
        let mut engine = RevealEngine::new();
        let mut elements: Vec<Element> = Vec::new();
        let mut flows = HashMap::new();

        let matches = Role::ALL
            .iter()
            .map(|role| Ok((*role, query_all(document, &role.selector())?)))
            .collect::<Result<Vec<_>, DomError>>()?;

        for (element, spec) in discover(&matches) {
            let starts_flowchart = spec.starts_flowchart;
            let id = engine.register(spec);
            element.set_attribute(REVEAL_ID_ATTR, &id.0.to_string())?;
            if starts_flowchart {
                let steps = query_all_in(&element, ".flow-step")?;
                let arrows = query_all_in(&element, ".flow-arrow")?;
                engine.attach_flowchart(id, steps.len(), arrows.len());
                flows.insert(id, FlowElements { steps, arrows });
            }
            elements.push(element);
        }

        if elements.is_empty() {
            debug!("No reveal targets on this page");
        }

        let state = Rc::new(RefCell::new(DriverState {
            engine,
            elements,
            flows,
            watcher: None,
        }));
        let scheduler = Self::scheduler(Rc::downgrade(&state));

        let watcher = if DomObserver::is_supported() {
            Self::native_watcher(Rc::downgrade(&state), scheduler)
        } else {
            Err(DomError::Js("IntersectionObserver unavailable".to_string()))
        };
        let watcher = match watcher {
            Ok(observer) => Watcher::Native(observer),
            Err(err) => {
                warn!("Falling back to scroll polling for reveals: {}", err);
                Watcher::Scroll(Self::scroll_watcher(Rc::downgrade(&state))?)
            }
        };

        {
            let mut state = state.borrow_mut();
            state.watcher = Some(watcher);
            let ids: Vec<ElementId> = state.engine.observed().collect();
            for id in ids {
                state.observe(id);
            }
            info!("Watching {} elements for scroll reveals", state.engine.tracked_count());
        }

        if matches!(state.borrow().watcher, Some(Watcher::Scroll(_))) {
            poll_viewport(&state, &mut Self::scheduler(Rc::downgrade(&state)));
        }

        Ok(Self { _state: state })
    }

    fn scheduler(state: Weak<RefCell<DriverState>>) -> TimeoutScheduler {
        TimeoutScheduler::new(move |target| {
            if let Some(state) = state.upgrade() {
                let mut state = state.borrow_mut();
                let effects = state.engine.fire(target);
                state.apply(effects);
            }
        })
    }

    fn native_watcher(
        state: Weak<RefCell<DriverState>>,
        mut scheduler: TimeoutScheduler,
    ) -> Result<DomObserver, DomError> {
        DomObserver::new(
            &ObserverOptions::reveal(),
            move |entries: Vec<IntersectionObserverEntry>, _: &IntersectionObserver| {
                let Some(state) = state.upgrade() else {
                    return;
                };
                let mut state = state.borrow_mut();
                for entry in entries {
                    let Some(id) = state.id_of(&entry.target()) else {
                        continue;
                    };
                    let effects = state
                        .engine
                        .on_intersect(id, entry.is_intersecting(), &mut scheduler);
                    state.apply(effects);
                }
            },
        )
    }

    fn scroll_watcher(state: Weak<RefCell<DriverState>>) -> Result<ScrollWatcher, DomError> {
        let window = web_sys::window().ok_or(DomError::NoDocument)?;
        let mut scheduler = Self::scheduler(state.clone());
        let callback = Closure::wrap(Box::new(move || {
            if let Some(state) = state.upgrade() {
                poll_viewport(&state, &mut scheduler);
            }
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref())?;
        Ok(ScrollWatcher { callback })
    }
}

/// Scroll fallback: measures every still-observed element against the window.
fn poll_viewport(state: &Rc<RefCell<DriverState>>, scheduler: &mut TimeoutScheduler) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let viewport = Rect::new(0.0, 0.0, width, height);
    let options = ObserverOptions::reveal();

    let mut state = state.borrow_mut();
    let hits: Vec<(ElementId, bool)> = state
        .engine
        .observed()
        .map(|id| {
            let rect = Rect::from(state.elements[id.0].get_bounding_client_rect());
            (id, options.evaluate(rect, viewport))
        })
        .collect();
    for (id, intersecting) in hits {
        let effects = state.engine.on_intersect(id, intersecting, scheduler);
        state.apply(effects);
    }
}

pub(crate) fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, DomError> {
    let list = document
        .query_selector_all(selector)
        .map_err(|_| DomError::Selector(selector.to_string()))?;
    Ok(elements_of(&list))
}

fn query_all_in(parent: &Element, selector: &str) -> Result<Vec<Element>, DomError> {
    let list = parent
        .query_selector_all(selector)
        .map_err(|_| DomError::Selector(selector.to_string()))?;
    Ok(elements_of(&list))
}

fn elements_of(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn parse_reveal_id(raw: Option<&str>, tracked: usize) -> Option<ElementId> {
    raw?.parse::<usize>()
        .ok()
        .filter(|index| *index < tracked)
        .map(ElementId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_ids_parse_within_the_tracked_range() {
        assert_eq!(parse_reveal_id(Some("0"), 3), Some(ElementId(0)));
        assert_eq!(parse_reveal_id(Some("2"), 3), Some(ElementId(2)));
        assert_eq!(parse_reveal_id(Some("3"), 3), None);
        assert_eq!(parse_reveal_id(Some("x"), 3), None);
        assert_eq!(parse_reveal_id(None, 3), None);
    }
}
