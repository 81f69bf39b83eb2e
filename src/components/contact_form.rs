use gloo_console::error;
use gloo_timers::callback::Timeout;
use log::info;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::contact::emailjs::send_form;
use crate::contact::form::{resolution_plan, ButtonAffordance, ContactAction, ContactState, Field};

const FAILURE_ALERT: &str = "Failed to send message. Please try again.";

#[function_component(ContactForm)]
pub fn contact_form() -> Html {
    let form = use_reducer(ContactState::default);

    let edit = |field: Field| {
        let dispatcher = form.dispatcher();
        Callback::from(move |e: InputEvent| {
            let value = match field {
                Field::Message => e.target_unchecked_into::<HtmlTextAreaElement>().value(),
                _ => e.target_unchecked_into::<HtmlInputElement>().value(),
            };
            dispatcher.dispatch(ContactAction::Edit(field, value));
        })
    };

    let onsubmit = {
        let form = form.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if form.button_disabled() {
                return;
            }
            let fields = form.fields.clone();
            let dispatcher = form.dispatcher();
            dispatcher.dispatch(ContactAction::Submit);

            spawn_local(async move {
                let result = send_form(&fields).await;
                if let Err(err) = &result {
                    if let Some(window) = web_sys::window() {
                        let _ = window.alert_with_message(FAILURE_ALERT);
                    }
                    error!("EMAILJS FAILED...", err.to_string());
                } else {
                    info!("Contact form sent for {}", fields.email);
                }

                for (delay, action) in resolution_plan(result.is_ok()) {
                    let dispatcher = dispatcher.clone();
                    if delay == 0 {
                        dispatcher.dispatch(action);
                    } else {
                        Timeout::new(delay, move || dispatcher.dispatch(action)).forget();
                    }
                }
            });
        })
    };

    let affordance = form.affordance();
    let button_style = if affordance == ButtonAffordance::Success {
        "background: #22c55e;"
    } else {
        ""
    };

    html! {
        <form id="contact-form" class="contact-form" {onsubmit}>
            <style>
                {r#"
                    .contact-form {
                        display: flex;
                        flex-direction: column;
                        gap: 1rem;
                        max-width: 560px;
                        margin: 0 auto;
                    }
                    .contact-form input, .contact-form textarea {
                        background: rgba(255, 255, 255, 0.06);
                        border: 1px solid rgba(255, 255, 255, 0.15);
                        border-radius: 10px;
                        padding: 0.85rem 1rem;
                        color: #fff;
                        font: inherit;
                    }
                    .contact-form textarea {
                        min-height: 140px;
                        resize: vertical;
                    }
                    #submit-btn {
                        display: inline-flex;
                        align-items: center;
                        justify-content: center;
                        gap: 0.5rem;
                        padding: 0.9rem 1.5rem;
                        border: none;
                        border-radius: 10px;
                        background: #0ea5e9;
                        color: #fff;
                        font-weight: 600;
                        cursor: pointer;
                        transition: background 0.3s ease;
                    }
                    #submit-btn:disabled {
                        cursor: default;
                        opacity: 0.85;
                    }
                    .submit-spinner {
                        width: 18px;
                        height: 18px;
                        border: 3px solid rgba(255, 255, 255, 0.3);
                        border-top-color: #fff;
                        border-radius: 50%;
                        animation: spin 1s linear infinite;
                    }
                    @keyframes spin { to { transform: rotate(360deg); } }
                "#}
            </style>
            <input
                type="text"
                name="name"
                placeholder="Your name"
                required={true}
                value={form.fields.name.clone()}
                oninput={edit(Field::Name)}
            />
            <input
                type="email"
                name="email"
                placeholder="Your email"
                required={true}
                value={form.fields.email.clone()}
                oninput={edit(Field::Email)}
            />
            <textarea
                name="message"
                placeholder="How can we help?"
                required={true}
                value={form.fields.message.clone()}
                oninput={edit(Field::Message)}
            />
            <button id="submit-btn" type="submit" disabled={form.button_disabled()} style={button_style}>
                {
                    match affordance {
                        ButtonAffordance::Default => html! {
                            <>
                                <span class="submit-icon">{"✉"}</span>
                                <span class="submit-text">{"Send Message"}</span>
                            </>
                        },
                        ButtonAffordance::Loading => html! {
                            <span class="submit-spinner"></span>
                        },
                        ButtonAffordance::Success => html! {
                            <span class="submit-success">{"✓ Message sent!"}</span>
                        },
                    }
                }
            </button>
        </form>
    }
}
