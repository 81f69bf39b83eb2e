use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry};

use crate::error::DomError;
use crate::reveal::driver::query_all;
use crate::reveal::viewport::{DomObserver, ObserverOptions};

pub const DEFERRED_SRC_ATTR: &str = "data-src";

/// The deferred source worth loading, if any.
fn deferred_source(raw: Option<String>) -> Option<String> {
    raw.filter(|src| !src.trim().is_empty())
}

/// Moves `data-src` into `src`. Returns false when there was nothing to load.
fn load(element: &Element) -> bool {
    let Some(src) = deferred_source(element.get_attribute(DEFERRED_SRC_ATTR)) else {
        return false;
    };
    let Some(img) = element.dyn_ref::<HtmlImageElement>() else {
        return false;
    };
    img.set_src(&src);
    let _ = element.remove_attribute(DEFERRED_SRC_ATTR);
    true
}

/// Swaps in the real source of every `img[data-src]` the first time it scrolls
/// into view. Keep it alive for as long as the images should keep loading.
pub struct LazyImages {
    _observer: Option<DomObserver>,
}

impl LazyImages {
    pub fn attach(document: &Document) -> Result<Self, DomError> {
        let images = query_all(document, &format!("img[{}]", DEFERRED_SRC_ATTR))?;
        if images.is_empty() {
            return Ok(Self { _observer: None });
        }

        if !DomObserver::is_supported() {
            warn!("No IntersectionObserver, loading {} images eagerly", images.len());
            images.iter().for_each(|img| {
                load(img);
            });
            return Ok(Self { _observer: None });
        }

        let observer = DomObserver::new(
            &ObserverOptions::default(),
            |entries: Vec<IntersectionObserverEntry>, observer: &IntersectionObserver| {
                for entry in entries.into_iter().filter(|e| e.is_intersecting()) {
                    let target = entry.target();
                    if load(&target) {
                        observer.unobserve(&target);
                    }
                }
            },
        )?;
        for img in &images {
            observer.observe(img);
        }
        debug!("Lazy loading {} images", images.len());

        Ok(Self {
            _observer: Some(observer),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_deferred_sources_are_skipped() {
        assert_eq!(deferred_source(None), None);
        assert_eq!(deferred_source(Some(String::new())), None);
        assert_eq!(deferred_source(Some("  ".into())), None);
        assert_eq!(
            deferred_source(Some("/assets/team.webp".into())),
            Some("/assets/team.webp".to_string())
        );
    }
}
