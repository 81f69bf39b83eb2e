use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, KeyboardEvent, MouseEvent};
use yew::prelude::*;
use yew_hooks::prelude::use_event_with_window;
use yew_router::prelude::*;

mod config;
mod error;
mod lazy_images;
mod reveal {
    pub mod discovery;
    pub mod driver;
    pub mod engine;
    pub mod flowchart;
    pub mod role;
    pub mod scheduler;
    pub mod viewport;
}
mod navigation {
    pub mod sections;
    pub mod state;
    pub mod throttle;
}
mod contact {
    pub mod emailjs;
    pub mod form;
}
mod components {
    pub mod contact_form;
    pub mod header;
    pub mod hero;
    pub mod media;
}
mod pages {
    pub mod landing;
    pub mod not_found;
}

use components::header::Header;
use pages::{landing::Landing, not_found::NotFound};

const KEYBOARD_NAVIGATION_CLASS: &str = "keyboard-navigation";

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Landing page");
            html! {
                <>
                    <Header />
                    <Landing />
                </>
            }
        }
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! { <NotFound /> }
        }
    }
}

/// Shrinks the animation custom properties for visitors who asked for less motion.
fn apply_reduced_motion() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let prefers_reduced = window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false);
    if !prefers_reduced {
        return;
    }
    let root = window
        .document()
        .and_then(|d| d.document_element())
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    if let Some(root) = root {
        let style = root.style();
        let _ = style.set_property("--animation-duration", "0.01ms");
        let _ = style.set_property("--transition-duration", "0.01ms");
        debug!("Reduced motion enabled");
    }
}

fn set_keyboard_navigation(enabled: bool) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    let classes = body.class_list();
    let _ = if enabled {
        classes.add_1(KEYBOARD_NAVIGATION_CLASS)
    } else {
        classes.remove_1(KEYBOARD_NAVIGATION_CLASS)
    };
}

#[function_component]
fn App() -> Html {
    use_effect_with_deps(
        |_| {
            apply_reduced_motion();
            || ()
        },
        (),
    );

    use_event_with_window("keydown", |e: KeyboardEvent| {
        if e.key() == "Tab" {
            set_keyboard_navigation(true);
        }
    });
    use_event_with_window("mousedown", |_: MouseEvent| set_keyboard_navigation(false));

    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::get_log_level()).expect("error initializing log");

    info!("Starting SignBridge site");
    yew::Renderer::<App>::new().render();
}
