use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, KeyboardEvent, MouseEvent, ScrollBehavior, ScrollIntoViewOptions};
use yew::prelude::*;
use yew_hooks::prelude::use_event_with_window;

use crate::config::RESIZE_DEBOUNCE_MS;
use crate::navigation::sections::{active_section, section_for_key, Section};
use crate::navigation::state::{UiAction, UiState};
use crate::navigation::throttle::FrameThrottle;

/// Smooth-scrolls to `section`. Does nothing if the page has no such anchor.
pub fn scroll_to_section(section: Section) {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(section.id()))
    else {
        debug!("No #{} on this page", section.id());
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Scroll position plus the section it falls in.
fn read_scroll() -> Option<(f64, Option<Section>)> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let y = window.scroll_y().ok()?;
    let offsets: Vec<(Section, Option<f64>)> = Section::ALL
        .iter()
        .map(|section| {
            let top = document
                .get_element_by_id(section.id())
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                .map(|el| f64::from(el.offset_top()));
            (*section, top)
        })
        .collect();
    Some((y, active_section(y, &offsets)))
}

fn focus_is_on_nav_link() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.active_element())
        .map(|el| {
            let classes = el.class_list();
            classes.contains("nav-link") || classes.contains("mobile-nav-link")
        })
        .unwrap_or(false)
}

#[function_component(Header)]
pub fn header() -> Html {
    let ui = use_reducer(UiState::default);

    // Keyboard handlers read the section through this instead of a stale snapshot.
    let current_section = use_mut_ref(|| Section::Home);
    *current_section.borrow_mut() = ui.active_section;

    {
        let dispatcher = ui.dispatcher();
        use_effect_with_deps(
            move |_| {
                let window = web_sys::window();
                let throttle = FrameThrottle::new();
                let sync: Rc<dyn Fn()> = Rc::new(move || {
                    if let Some((y, section)) = read_scroll() {
                        dispatcher.dispatch(UiAction::Scrolled { y, section });
                    }
                });

                let on_scroll = {
                    let sync = sync.clone();
                    Closure::wrap(Box::new(move || {
                        let sync = sync.clone();
                        throttle.request(move || sync());
                    }) as Box<dyn FnMut()>)
                };

                if let Some(window) = &window {
                    let _ = window
                        .add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
                }
                sync();

                move || {
                    if let Some(window) = window {
                        let _ = window.remove_event_listener_with_callback(
                            "scroll",
                            on_scroll.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    {
        let dispatcher = ui.dispatcher();
        let pending = use_mut_ref(|| None::<Timeout>);
        use_event_with_window("resize", move |_: Event| {
            let dispatcher = dispatcher.clone();
            // Replacing the pending timeout cancels it.
            *pending.borrow_mut() = Some(Timeout::new(RESIZE_DEBOUNCE_MS, move || {
                let width = web_sys::window()
                    .and_then(|w| w.inner_width().ok())
                    .and_then(|w| w.as_f64());
                if let Some(width) = width {
                    dispatcher.dispatch(UiAction::Resized { width });
                }
            }));
        });
    }

    {
        let dispatcher = ui.dispatcher();
        let current_section = current_section.clone();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            let key = e.key();
            if key == "Escape" {
                dispatcher.dispatch(UiAction::EscapePressed);
            }
            if !focus_is_on_nav_link() {
                return;
            }
            let current = *current_section.borrow();
            if let Some(target) = section_for_key(&key, current) {
                e.prevent_default();
                scroll_to_section(target);
                dispatcher.dispatch(UiAction::CloseMenu);
            }
        });
    }

    let toggle_menu = {
        let dispatcher = ui.dispatcher();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            dispatcher.dispatch(UiAction::ToggleMenu);
        })
    };

    let nav_link = |section: Section, class: &'static str| {
        let dispatcher = ui.dispatcher();
        let onclick = Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            scroll_to_section(section);
            dispatcher.dispatch(UiAction::CloseMenu);
        });
        html! {
            <a
                href={format!("#{}", section.id())}
                class={classes!(class, (ui.active_section == section).then(|| "active"))}
                data-section={section.id()}
                {onclick}
            >
                {section.label()}
            </a>
        }
    };

    html! {
        <header id="header" class={classes!("header", ui.header_scrolled.then(|| "scrolled"))}>
            <style>
                {r#"
                    .header {
                        position: fixed;
                        top: 0;
                        left: 0;
                        right: 0;
                        z-index: 50;
                        transition: background var(--transition-duration, 0.3s) ease, box-shadow var(--transition-duration, 0.3s) ease;
                    }
                    .header.scrolled {
                        background: rgba(15, 23, 42, 0.92);
                        backdrop-filter: blur(10px);
                        box-shadow: 0 4px 24px rgba(0, 0, 0, 0.25);
                    }
                    .header-content {
                        max-width: 1200px;
                        margin: 0 auto;
                        padding: 1rem 1.5rem;
                        display: flex;
                        align-items: center;
                        justify-content: space-between;
                    }
                    .logo {
                        font-weight: 700;
                        font-size: 1.4rem;
                        color: #fff;
                        text-decoration: none;
                    }
                    .desktop-nav {
                        display: flex;
                        gap: 2rem;
                    }
                    .nav-link, .mobile-nav-link {
                        color: rgba(255, 255, 255, 0.75);
                        text-decoration: none;
                        transition: color 0.2s ease;
                    }
                    .nav-link.active, .mobile-nav-link.active, .nav-link:hover {
                        color: #38bdf8;
                    }
                    .mobile-menu-button {
                        display: none;
                        background: none;
                        border: none;
                        color: #fff;
                        font-size: 1.5rem;
                        cursor: pointer;
                    }
                    .mobile-menu {
                        display: flex;
                        flex-direction: column;
                        gap: 1rem;
                        padding: 1rem 1.5rem 1.5rem;
                        background: rgba(15, 23, 42, 0.97);
                    }
                    .hidden {
                        display: none !important;
                    }
                    body.keyboard-navigation a:focus,
                    body.keyboard-navigation button:focus {
                        outline: 2px solid #38bdf8;
                        outline-offset: 3px;
                    }
                    @media (max-width: 768px) {
                        .desktop-nav {
                            display: none;
                        }
                        .mobile-menu-button {
                            display: block;
                        }
                    }
                "#}
            </style>
            <div class="header-content">
                <a href="#home" class="logo">{"SignBridge"}</a>
                <nav class="desktop-nav">
                    { for Section::ALL.iter().map(|s| nav_link(*s, "nav-link")) }
                </nav>
                <button class="mobile-menu-button" aria-label="Toggle menu" onclick={toggle_menu}>
                    <span class={classes!("menu-icon", ui.menu_open.then(|| "hidden"))}>{"☰"}</span>
                    <span class={classes!("close-icon", (!ui.menu_open).then(|| "hidden"))}>{"✕"}</span>
                </button>
            </div>
            <nav class={classes!("mobile-menu", (!ui.menu_open).then(|| "hidden"))}>
                { for Section::ALL.iter().map(|s| nav_link(*s, "mobile-nav-link")) }
            </nav>
        </header>
    }
}
